use crate::translator::Translation;
use std::fmt::Write;

/// Serialize a finished translation into target source text.
///
/// Layout: a crate-level warning suppression (the generated program binds
/// everything `mut` whether or not it is reassigned), each support
/// declaration once with a blank line after it, then one `fn main`
/// holding every statement in emission order, one per line. No
/// well-formedness validation happens here; rustc is the judge.
pub fn emit_program(translation: &Translation) -> String {
    let mut out = String::new();
    out.push_str("#![allow(warnings)]\n");

    for support in &translation.support {
        out.push_str(support.declaration());
        out.push_str("\n\n");
    }

    out.push_str("fn main() {\n");
    for statement in &translation.statements {
        writeln!(out, "    {}", statement).unwrap();
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{SupportFn, Translation};
    use indexmap::IndexSet;

    #[test]
    fn test_empty_translation() {
        let t = Translation {
            statements: Vec::new(),
            support: IndexSet::new(),
        };
        assert_eq!(emit_program(&t), "#![allow(warnings)]\nfn main() {\n}\n");
    }

    #[test]
    fn test_statements_one_per_line() {
        let t = Translation {
            statements: vec![
                "let mut name = \"Kevin\";".to_string(),
                "println!(\"{}\", name);".to_string(),
            ],
            support: IndexSet::new(),
        };
        let text = emit_program(&t);
        assert_eq!(
            text,
            "#![allow(warnings)]\nfn main() {\n    let mut name = \"Kevin\";\n    println!(\"{}\", name);\n}\n"
        );
    }

    #[test]
    fn test_support_precedes_main() {
        let mut support = IndexSet::new();
        support.insert(SupportFn::TypeName);
        let t = Translation {
            statements: vec!["let mut t = o_type(&1);".to_string()],
            support,
        };
        let text = emit_program(&t);
        let support_pos = text.find("fn o_type").unwrap();
        let main_pos = text.find("fn main").unwrap();
        assert!(support_pos < main_pos);
        // blank line between the support declaration and fn main
        assert!(text.contains("}\n\nfn main"));
    }
}
