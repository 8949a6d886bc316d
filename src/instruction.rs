use std::fmt;

/// The decoded argument of a bytecode instruction: either a literal the
/// source interpreter would have loaded, or a name it would have resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// No argument (or the source language's null literal).
    None,
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A string literal, stored without quotes.
    Str(String),
    /// A variable or function name.
    Name(String),
}

impl ArgValue {
    /// The identifier carried by this argument, if it is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ArgValue::Name(s) | ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgValue::None => write!(f, "None"),
            ArgValue::Int(v) => write!(f, "{}", v),
            ArgValue::Float(v) => write!(f, "{}", v),
            ArgValue::Bool(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            ArgValue::Str(s) => write!(f, "'{}'", s),
            ArgValue::Name(s) => write!(f, "{}", s),
        }
    }
}

/// One record of the disassembled instruction stream.
///
/// Mirrors the columns of the disassembly dump the front-end produces.
/// Line and jump metadata are carried through for the inspection tooling
/// but never consulted by the translation core.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub opname: String,
    pub opcode: u16,
    /// Raw numeric argument (constant index, arity, operator selector).
    pub arg: Option<u32>,
    /// Decoded argument value.
    pub argval: ArgValue,
    /// Byte offset of the instruction within the code object.
    pub offset: u32,
    pub starts_line: Option<u32>,
    pub is_jump_target: bool,
}

impl Instruction {
    pub fn new(opcode: u16, opname: &str, arg: Option<u32>, argval: ArgValue, offset: u32) -> Self {
        Instruction {
            opname: opname.to_string(),
            opcode,
            arg,
            argval,
            offset,
            starts_line: None,
            is_jump_target: false,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>5}  {:<20}", self.offset, self.opname)?;
        match &self.argval {
            ArgValue::None if self.arg.is_none() => Ok(()),
            argval => write!(f, " {}", argval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argval_display() {
        assert_eq!(ArgValue::Int(30).to_string(), "30");
        assert_eq!(ArgValue::Str("Kevin".to_string()).to_string(), "'Kevin'");
        assert_eq!(ArgValue::Bool(true).to_string(), "True");
        assert_eq!(ArgValue::Name("print".to_string()).to_string(), "print");
    }

    #[test]
    fn test_as_name() {
        assert_eq!(ArgValue::Name("age".to_string()).as_name(), Some("age"));
        assert_eq!(ArgValue::Int(3).as_name(), None);
    }

    #[test]
    fn test_instruction_display() {
        let ins = Instruction::new(
            100,
            "LOAD_CONST",
            Some(1),
            ArgValue::Str("Kevin".to_string()),
            2,
        );
        assert_eq!(ins.to_string(), "    2  LOAD_CONST           'Kevin'");
    }
}
