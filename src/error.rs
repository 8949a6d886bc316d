// Translation error handling

use std::fmt;

#[derive(Debug, Clone)]
pub enum TranslateError {
    /// A handler needed more operands than the simulated stack held.
    /// Fatal: the stream is malformed and no output is written.
    StackUnderflow {
        opname: String,
        offset: u32,
        needed: usize,
        available: usize,
    },

    /// A row of the disassembly dump could not be decoded.
    StreamFormat(String),

    // IO errors
    Io(String),
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TranslateError::StackUnderflow {
                opname,
                offset,
                needed,
                available,
            } => {
                write!(
                    f,
                    "Stack underflow at offset {}: {} needs {} operand(s), {} available",
                    offset, opname, needed, available
                )
            }
            TranslateError::StreamFormat(msg) => {
                write!(f, "Malformed instruction stream: {}", msg)
            }
            TranslateError::Io(msg) => {
                write!(f, "IO error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TranslateError {}
