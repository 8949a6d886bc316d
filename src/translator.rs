use crate::error::TranslateError;
use crate::instruction::Instruction;
use crate::opcodes::{BinaryOperator, Opcode};
use crate::value::StackValue;
use indexmap::IndexSet;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::Write;

/// Auxiliary declarations the generated program may depend on. Each is
/// emitted once, ahead of the main routine, if any statement requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportFn {
    /// Runtime type-name helper backing the source's `type(x)` builtin.
    TypeName,
}

impl SupportFn {
    pub fn declaration(&self) -> &'static str {
        match self {
            SupportFn::TypeName => {
                "fn o_type<T>(t: &T) -> String {\n    std::any::type_name::<T>().to_string()\n}"
            }
        }
    }
}

/// Builtin callees the invoke handler knows how to lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Print,
    TypeOf,
}

lazy_static! {
    static ref BUILTIN_CALLEES: HashMap<&'static str, Builtin> = {
        let mut m = HashMap::new();
        m.insert("print", Builtin::Print);
        m.insert("type", Builtin::TypeOf);
        m
    };
}

/// The finished product of one translation pass: statements in emission
/// order plus the deduplicated support declarations they rely on.
#[derive(Debug, Clone)]
pub struct Translation {
    pub statements: Vec<String>,
    pub support: IndexSet<SupportFn>,
}

/// Single-pass stack simulator.
///
/// Walks the instruction stream once, in order, maintaining a simulated
/// operand stack of [`StackValue`]s. Handlers never evaluate the logic
/// they translate; they only track provenance and produce statement text.
/// All state is owned here and created fresh per run, so concurrent runs
/// need no coordination.
pub struct Translator {
    stack: Vec<StackValue>,
    statements: Vec<String>,
    support: IndexSet<SupportFn>,
    /// (opname, argval) history of every dispatched instruction.
    trace: Vec<(String, String)>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        Translator {
            stack: Vec::new(),
            statements: Vec::new(),
            support: IndexSet::new(),
            trace: Vec::new(),
        }
    }

    /// Run the dispatch loop over the whole stream.
    ///
    /// Unrecognized opcodes are skipped; the vocabulary is intentionally
    /// partial. Stack underflow aborts the pass with no output.
    pub fn translate(&mut self, instructions: &[Instruction]) -> Result<(), TranslateError> {
        for ins in instructions {
            let op = match Opcode::from_raw(ins.opcode) {
                Some(op) => op,
                None => {
                    debug!("skipping opcode {} ({})", ins.opcode, ins.opname);
                    continue;
                }
            };

            self.trace.push((ins.opname.clone(), ins.argval.to_string()));
            debug!("{}", ins);

            match op {
                Opcode::LoadConst => self.load_const(ins),
                Opcode::LoadFast => self.load_fast(ins)?,
                Opcode::LoadGlobal => self.load_global(ins)?,
                Opcode::StoreFast => self.store_fast(ins)?,
                Opcode::BinaryOp => self.binary_op(ins)?,
                Opcode::Call => self.call_function(ins)?,
            }
        }
        Ok(())
    }

    /// Consume the translator, yielding the accumulated output.
    pub fn into_translation(self) -> Translation {
        Translation {
            statements: self.statements,
            support: self.support,
        }
    }

    /// Current operand stack, top last.
    pub fn stack(&self) -> &[StackValue] {
        &self.stack
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    fn pop_operand(&mut self, ins: &Instruction, needed: usize) -> Result<StackValue, TranslateError> {
        let available = self.stack.len();
        self.stack
            .pop()
            .ok_or_else(|| TranslateError::StackUnderflow {
                opname: ins.opname.clone(),
                offset: ins.offset,
                needed,
                available,
            })
    }

    fn argval_name(&self, ins: &Instruction) -> Result<String, TranslateError> {
        ins.argval
            .as_name()
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::StreamFormat(format!(
                    "{} at offset {} carries no name argument",
                    ins.opname, ins.offset
                ))
            })
    }

    /// LOAD_CONST: push a literal with its static type.
    fn load_const(&mut self, ins: &Instruction) {
        self.stack.push(StackValue::constant(&ins.argval));
    }

    /// LOAD_FAST: push a local reference. Prior binding is not verified;
    /// an unbound name surfaces later as a target-compiler error.
    fn load_fast(&mut self, ins: &Instruction) -> Result<(), TranslateError> {
        let name = self.argval_name(ins)?;
        self.stack.push(StackValue::Local { name });
        Ok(())
    }

    /// LOAD_GLOBAL: push a name marker for a later CALL to consume.
    fn load_global(&mut self, ins: &Instruction) -> Result<(), TranslateError> {
        let name = self.argval_name(ins)?;
        self.stack.push(StackValue::Global { name });
        Ok(())
    }

    /// STORE_FAST: pop the bound value and emit a let-binding. What goes
    /// back on the stack is the local's *name*, not the original value,
    /// so later reads resolve to the identifier instead of a re-inlined
    /// literal.
    fn store_fast(&mut self, ins: &Instruction) -> Result<(), TranslateError> {
        let name = self.argval_name(ins)?;
        let value = self.pop_operand(ins, 1)?;
        self.statements
            .push(format!("let mut {} = {};", name, value.render()));
        self.stack.push(StackValue::Local { name });
        Ok(())
    }

    /// BINARY_OP: pop right then left, push the infix expression text.
    /// Arithmetic is never evaluated here. An unrecognized selector
    /// leaves the stack untouched.
    fn binary_op(&mut self, ins: &Instruction) -> Result<(), TranslateError> {
        let operator = ins.arg.and_then(BinaryOperator::from_selector);
        let operator = match operator {
            Some(operator) => operator,
            None => {
                warn!(
                    "unrecognized binary operator selector {:?} at offset {}",
                    ins.arg, ins.offset
                );
                return Ok(());
            }
        };

        let right = self.pop_operand(ins, 2)?;
        let left = self.pop_operand(ins, 2)?;
        self.stack.push(StackValue::Computed {
            expr: format!("{} {} {}", left.render(), operator.symbol(), right.render()),
        });
        Ok(())
    }

    /// CALL: pop N arguments, then the callee marker beneath them, and
    /// lower the call according to the builtin table.
    fn call_function(&mut self, ins: &Instruction) -> Result<(), TranslateError> {
        let arity = ins.arg.unwrap_or(0) as usize;

        let mut args = Vec::with_capacity(arity);
        for _ in 0..arity {
            args.push(self.pop_operand(ins, arity + 1)?);
        }
        // Pop order is the reverse of call-site order
        args.reverse();

        let callee = self.pop_operand(ins, arity + 1)?;
        let name = match callee {
            StackValue::Global { name } => name,
            other => {
                warn!(
                    "call at offset {} has no global callee marker (found {} value); dropping",
                    ins.offset,
                    other.provenance()
                );
                self.statements
                    .push(format!("// dropped call: callee {} is not a global name", other.render()));
                return Ok(());
            }
        };

        match BUILTIN_CALLEES.get(name.as_str()) {
            Some(Builtin::Print) => self.lower_print(&args),
            Some(Builtin::TypeOf) if args.len() == 1 => self.lower_type_of(&args[0]),
            _ => {
                warn!("unsupported call to '{}' at offset {}", name, ins.offset);
                self.statements
                    .push(format!("// unsupported call: {}", name));
            }
        }
        Ok(())
    }

    fn lower_print(&mut self, args: &[StackValue]) {
        if args.is_empty() {
            self.statements.push("println!();".to_string());
            return;
        }
        let placeholders = vec!["{}"; args.len()].join(" ");
        let rendered: Vec<String> = args.iter().map(StackValue::render).collect();
        self.statements.push(format!(
            "println!(\"{}\", {});",
            placeholders,
            rendered.join(", ")
        ));
    }

    fn lower_type_of(&mut self, arg: &StackValue) {
        self.support.insert(SupportFn::TypeName);
        self.stack.push(StackValue::Computed {
            expr: format!("o_type(&{})", arg.render()),
        });
    }

    /// Format the operand stack and statement history for diagnosis,
    /// in the shape the --trace-stack flag prints after a pass.
    pub fn trace_stack(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{:<12} {:<10} rendered", "type", "provenance").unwrap();
        for item in &self.stack {
            let ty = item
                .static_type()
                .map(|t| t.name())
                .unwrap_or("-");
            writeln!(out, "{:<12} {:<10} {}", ty, item.provenance(), item.render()).unwrap();
        }
        writeln!(out).unwrap();
        for (opname, argval) in &self.trace {
            writeln!(out, "{:<20} {}", opname, argval).unwrap();
        }
        writeln!(out).unwrap();
        for statement in &self.statements {
            writeln!(out, "{}", statement).unwrap();
        }
        out
    }
}
