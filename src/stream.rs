// Instruction stream loading
//
// The disassembly front-end runs in the source interpreter and writes one
// CSV row per instruction (opname, opcode, arg, argval, argrepr, offset,
// starts_line, is_jump_target). This module turns that dump back into
// typed Instruction records for the translator.

use crate::error::TranslateError;
use crate::instruction::{ArgValue, Instruction};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One CSV row, as written by the front-end. Booleans arrive as the source
/// language spells them ("True"/"False"), so they are parsed by hand.
#[derive(Debug, Deserialize)]
struct RawRow {
    opname: String,
    opcode: u16,
    arg: Option<u32>,
    argval: String,
    argrepr: String,
    offset: u32,
    starts_line: Option<u32>,
    is_jump_target: String,
}

/// Reconstruct the decoded argument from the argval/argrepr columns.
///
/// A quoted argrepr means the argval is a string literal; numeric argvals
/// are integers or floats; the source's boolean and null spellings map to
/// their tags; anything else is a name (a local or a callee).
fn decode_argval(arg: Option<u32>, argval: &str, argrepr: &str) -> ArgValue {
    let quoted = (argrepr.starts_with('\'') && argrepr.ends_with('\'') && argrepr.len() >= 2)
        || (argrepr.starts_with('"') && argrepr.ends_with('"') && argrepr.len() >= 2);
    if quoted {
        return ArgValue::Str(argval.to_string());
    }
    if argval.is_empty() && arg.is_none() {
        return ArgValue::None;
    }
    match argval {
        "None" => ArgValue::None,
        "True" => ArgValue::Bool(true),
        "False" => ArgValue::Bool(false),
        _ => {
            if let Ok(v) = argval.parse::<i64>() {
                ArgValue::Int(v)
            } else if let Ok(v) = argval.parse::<f64>() {
                ArgValue::Float(v)
            } else {
                ArgValue::Name(argval.to_string())
            }
        }
    }
}

fn source_bool(field: &str) -> bool {
    matches!(field, "True" | "true" | "1")
}

/// Read an instruction stream from any CSV source.
pub fn read_instructions<R: Read>(reader: R) -> Result<Vec<Instruction>, TranslateError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut instructions = Vec::new();

    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = row.map_err(|e| {
            TranslateError::StreamFormat(format!("row {}: {}", index + 1, e))
        })?;
        let argval = decode_argval(raw.arg, &raw.argval, &raw.argrepr);
        instructions.push(Instruction {
            opname: raw.opname,
            opcode: raw.opcode,
            arg: raw.arg,
            argval,
            offset: raw.offset,
            starts_line: raw.starts_line,
            is_jump_target: source_bool(&raw.is_jump_target),
        });
    }

    debug!("loaded {} instructions", instructions.len());
    Ok(instructions)
}

/// Load an instruction stream from a disassembly dump on disk.
pub fn load_instructions(path: &Path) -> Result<Vec<Instruction>, TranslateError> {
    let file = std::fs::File::open(path)
        .map_err(|e| TranslateError::Io(format!("cannot open {}: {}", path.display(), e)))?;
    read_instructions(file)
}
