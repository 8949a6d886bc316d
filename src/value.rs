use crate::instruction::ArgValue;

/// Static type tag for a literal, derived from its runtime type in the
/// source language. Only used to decide quoting in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticType {
    Int,
    Float,
    Bool,
    Str,
    NoneType,
}

impl StaticType {
    pub fn name(&self) -> &'static str {
        match self {
            StaticType::Int => "int",
            StaticType::Float => "float",
            StaticType::Bool => "bool",
            StaticType::Str => "str",
            StaticType::NoneType => "NoneType",
        }
    }
}

/// A translation-time stand-in for a runtime value.
///
/// Each simulated stack slot holds one of these. The provenance variant
/// determines how the value renders into generated code: constants carry
/// a type tag so string literals come out quoted, locals and globals
/// render as their identifier, computed expressions as their text.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    Constant { ty: StaticType, text: String },
    Local { name: String },
    Global { name: String },
    Computed { expr: String },
}

impl StackValue {
    /// Build a constant from a decoded instruction argument.
    pub fn constant(argval: &ArgValue) -> Self {
        match argval {
            ArgValue::Int(v) => StackValue::Constant {
                ty: StaticType::Int,
                text: v.to_string(),
            },
            ArgValue::Float(v) => StackValue::Constant {
                ty: StaticType::Float,
                text: v.to_string(),
            },
            ArgValue::Bool(v) => StackValue::Constant {
                ty: StaticType::Bool,
                text: if *v { "true" } else { "false" }.to_string(),
            },
            ArgValue::Str(s) => StackValue::Constant {
                ty: StaticType::Str,
                text: s.clone(),
            },
            // The source's null literal; rendered as the unit value so a
            // stray trailing constant still reads as Rust.
            ArgValue::None => StackValue::Constant {
                ty: StaticType::NoneType,
                text: "()".to_string(),
            },
            ArgValue::Name(s) => StackValue::Constant {
                ty: StaticType::NoneType,
                text: s.clone(),
            },
        }
    }

    /// The expression text to splice into generated code. String constants
    /// are quoted; every other provenance renders bare.
    pub fn render(&self) -> String {
        match self {
            StackValue::Constant {
                ty: StaticType::Str,
                text,
            } => format!("\"{}\"", text),
            StackValue::Constant { text, .. } => text.clone(),
            StackValue::Local { name } => name.clone(),
            StackValue::Global { name } => name.clone(),
            StackValue::Computed { expr } => expr.clone(),
        }
    }

    /// Provenance label for trace output.
    pub fn provenance(&self) -> &'static str {
        match self {
            StackValue::Constant { .. } => "CONST",
            StackValue::Local { .. } => "LOCAL",
            StackValue::Global { .. } => "GLOBAL",
            StackValue::Computed { .. } => "COMPUTED",
        }
    }

    /// The static type tag, if this slot carries one. Computed values and
    /// name references have none.
    pub fn static_type(&self) -> Option<StaticType> {
        match self {
            StackValue::Constant { ty, .. } => Some(*ty),
            _ => None,
        }
    }
}
