/// The closed opcode vocabulary the translator recognizes.
///
/// Anything outside this set is skipped by the dispatch loop. The numeric
/// values are the source interpreter's opcode numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Push a literal constant (100).
    LoadConst,
    /// Push a global name marker, e.g. a callee (116).
    LoadGlobal,
    /// Combine the two topmost values with an infix operator (122).
    BinaryOp,
    /// Push a local variable reference (124).
    LoadFast,
    /// Bind the top of stack to a local (125).
    StoreFast,
    /// Call the marked global with N positional arguments (171).
    Call,
}

impl Opcode {
    /// Map a raw opcode number to the recognized vocabulary.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            100 => Some(Opcode::LoadConst),
            116 => Some(Opcode::LoadGlobal),
            122 => Some(Opcode::BinaryOp),
            124 => Some(Opcode::LoadFast),
            125 => Some(Opcode::StoreFast),
            171 => Some(Opcode::Call),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::LoadConst => "LOAD_CONST",
            Opcode::LoadGlobal => "LOAD_GLOBAL",
            Opcode::BinaryOp => "BINARY_OP",
            Opcode::LoadFast => "LOAD_FAST",
            Opcode::StoreFast => "STORE_FAST",
            Opcode::Call => "CALL",
        }
    }
}

/// Infix operators selected by the BINARY_OP argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
}

impl BinaryOperator {
    /// Map the instruction's operator selector. Only addition (0) and
    /// subtraction (10) are in the vocabulary.
    pub fn from_selector(selector: u32) -> Option<Self> {
        match selector {
            0 => Some(BinaryOperator::Add),
            10 => Some(BinaryOperator::Subtract),
            _ => None,
        }
    }

    /// The operator's spelling in generated code.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
        }
    }
}
