#[macro_use]
extern crate lazy_static;

pub mod emitter;
pub mod error;
pub mod instruction;
pub mod opcodes;
pub mod stream;
pub mod toolchain;
pub mod translator;
pub mod value;

#[cfg(test)]
mod translator_tests;
