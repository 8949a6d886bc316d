// Translator tests: dispatch, handlers, and stack discipline

#[cfg(test)]
mod tests {
    use crate::emitter::emit_program;
    use crate::error::TranslateError;
    use crate::instruction::{ArgValue, Instruction};
    use crate::translator::Translator;
    use crate::value::StackValue;
    use test_log::test;

    fn ins(opcode: u16, opname: &str, arg: Option<u32>, argval: ArgValue, offset: u32) -> Instruction {
        Instruction::new(opcode, opname, arg, argval, offset)
    }

    fn load_const(argval: ArgValue, offset: u32) -> Instruction {
        ins(100, "LOAD_CONST", Some(0), argval, offset)
    }

    fn store_fast(name: &str, offset: u32) -> Instruction {
        ins(125, "STORE_FAST", Some(0), ArgValue::Name(name.to_string()), offset)
    }

    fn load_fast(name: &str, offset: u32) -> Instruction {
        ins(124, "LOAD_FAST", Some(0), ArgValue::Name(name.to_string()), offset)
    }

    fn load_global(name: &str, offset: u32) -> Instruction {
        ins(116, "LOAD_GLOBAL", Some(1), ArgValue::Name(name.to_string()), offset)
    }

    fn binary_op(selector: u32, offset: u32) -> Instruction {
        ins(122, "BINARY_OP", Some(selector), ArgValue::Int(selector as i64), offset)
    }

    fn call(arity: u32, offset: u32) -> Instruction {
        ins(171, "CALL", Some(arity), ArgValue::Int(arity as i64), offset)
    }

    fn translate(instructions: &[Instruction]) -> Translator {
        let mut translator = Translator::new();
        translator.translate(instructions).unwrap();
        translator
    }

    #[test]
    fn test_string_store_emits_quoted_binding() {
        let t = translate(&[
            load_const(ArgValue::Str("Kevin".to_string()), 0),
            store_fast("name", 2),
        ]);
        assert_eq!(t.statements(), &["let mut name = \"Kevin\";".to_string()]);
    }

    #[test]
    fn test_integer_store_emits_bare_binding() {
        let t = translate(&[load_const(ArgValue::Int(30), 0), store_fast("age", 2)]);
        assert_eq!(t.statements(), &["let mut age = 30;".to_string()]);
    }

    #[test]
    fn test_store_count_matches_store_instructions() {
        let t = translate(&[
            load_const(ArgValue::Str("Kevin".to_string()), 0),
            store_fast("name", 2),
            load_const(ArgValue::Int(30), 4),
            store_fast("age", 6),
            load_const(ArgValue::Bool(true), 8),
            store_fast("flag", 10),
        ]);
        assert_eq!(
            t.statements(),
            &[
                "let mut name = \"Kevin\";".to_string(),
                "let mut age = 30;".to_string(),
                "let mut flag = true;".to_string(),
            ]
        );
    }

    #[test]
    fn test_store_pushes_the_name_not_the_value() {
        // After binding, reads must resolve to the identifier rather than
        // the re-inlined literal.
        let t = translate(&[
            load_const(ArgValue::Str("Kevin".to_string()), 0),
            store_fast("name", 2),
        ]);
        assert_eq!(
            t.stack(),
            &[StackValue::Local {
                name: "name".to_string()
            }]
        );
    }

    #[test]
    fn test_binary_add_renders_infix() {
        let t = translate(&[
            load_fast("age", 0),
            load_const(ArgValue::Int(1), 2),
            binary_op(0, 4),
        ]);
        assert_eq!(
            t.stack(),
            &[StackValue::Computed {
                expr: "age + 1".to_string()
            }]
        );
    }

    #[test]
    fn test_binary_subtract_renders_infix() {
        let t = translate(&[
            load_fast("age", 0),
            load_const(ArgValue::Int(1), 2),
            binary_op(10, 4),
        ]);
        assert_eq!(
            t.stack(),
            &[StackValue::Computed {
                expr: "age - 1".to_string()
            }]
        );
    }

    #[test]
    fn test_chained_binary_ops() {
        // 30 + 1 - 2 folds left to right into one computed expression
        let t = translate(&[
            load_const(ArgValue::Int(30), 0),
            load_const(ArgValue::Int(1), 2),
            binary_op(0, 4),
            load_const(ArgValue::Int(2), 6),
            binary_op(10, 8),
            store_fast("age", 10),
        ]);
        assert_eq!(t.statements(), &["let mut age = 30 + 1 - 2;".to_string()]);
    }

    #[test]
    fn test_unknown_binary_selector_leaves_stack_untouched() {
        let t = translate(&[
            load_fast("age", 0),
            load_const(ArgValue::Int(1), 2),
            binary_op(5, 4),
        ]);
        assert_eq!(t.stack().len(), 2);
        assert!(t.statements().is_empty());
    }

    #[test]
    fn test_print_two_locals_preserves_call_order() {
        let t = translate(&[
            load_global("print", 0),
            load_fast("age", 2),
            load_fast("name", 4),
            call(2, 6),
        ]);
        assert_eq!(
            t.statements(),
            &["println!(\"{} {}\", age, name);".to_string()]
        );
        assert!(t.stack().is_empty());
    }

    #[test]
    fn test_print_no_arguments_emits_bare_newline() {
        let t = translate(&[load_global("print", 0), call(0, 2)]);
        assert_eq!(t.statements(), &["println!();".to_string()]);
    }

    #[test]
    fn test_print_constant_argument_quoted_per_type() {
        let t = translate(&[
            load_global("print", 0),
            load_const(ArgValue::Str("hello".to_string()), 2),
            load_const(ArgValue::Int(7), 4),
            call(2, 6),
        ]);
        assert_eq!(
            t.statements(),
            &["println!(\"{} {}\", \"hello\", 7);".to_string()]
        );
    }

    #[test]
    fn test_print_computed_argument_renders_bare() {
        let t = translate(&[
            load_global("print", 0),
            load_fast("age", 2),
            load_const(ArgValue::Int(1), 4),
            binary_op(0, 6),
            call(1, 8),
        ]);
        assert_eq!(t.statements(), &["println!(\"{}\", age + 1);".to_string()]);
    }

    #[test]
    fn test_type_call_pushes_computed_and_requests_support() {
        let t = translate(&[
            load_global("type", 0),
            load_fast("name", 2),
            call(1, 4),
            store_fast("type_of_name", 6),
        ]);
        assert_eq!(
            t.statements(),
            &["let mut type_of_name = o_type(&name);".to_string()]
        );
        let translation = t.into_translation();
        assert_eq!(translation.support.len(), 1);
    }

    #[test]
    fn test_support_declaration_deduplicated() {
        let t = translate(&[
            load_global("type", 0),
            load_fast("a", 2),
            call(1, 4),
            store_fast("x", 6),
            load_global("type", 8),
            load_fast("b", 10),
            call(1, 12),
            store_fast("y", 14),
        ]);
        let translation = t.into_translation();
        assert_eq!(translation.support.len(), 1);
        let text = emit_program(&translation);
        assert_eq!(text.matches("fn o_type").count(), 1);
    }

    #[test]
    fn test_unsupported_call_degrades_to_comment() {
        let t = translate(&[
            load_global("foo", 0),
            load_const(ArgValue::Int(1), 2),
            load_const(ArgValue::Int(2), 4),
            call(2, 6),
        ]);
        assert_eq!(t.statements(), &["// unsupported call: foo".to_string()]);
        // arity and marker consumed, nothing pushed
        assert!(t.stack().is_empty());
    }

    #[test]
    fn test_call_without_global_marker_reported_not_silent() {
        let t = translate(&[
            load_const(ArgValue::Int(3), 0),
            load_const(ArgValue::Int(4), 2),
            call(1, 4),
        ]);
        assert_eq!(t.statements().len(), 1);
        assert!(t.statements()[0].starts_with("// dropped call"));
        assert!(t.stack().is_empty());
    }

    #[test]
    fn test_store_on_empty_stack_is_fatal() {
        let mut translator = Translator::new();
        let err = translator.translate(&[store_fast("name", 0)]).unwrap_err();
        match err {
            TranslateError::StackUnderflow {
                opname,
                offset,
                needed,
                available,
            } => {
                assert_eq!(opname, "STORE_FAST");
                assert_eq!(offset, 0);
                assert_eq!(needed, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
    }

    #[test]
    fn test_call_underflow_is_fatal() {
        let mut translator = Translator::new();
        let err = translator
            .translate(&[load_global("print", 0), call(2, 2)])
            .unwrap_err();
        assert!(matches!(err, TranslateError::StackUnderflow { .. }));
    }

    #[test]
    fn test_unrecognized_opcodes_skipped() {
        let t = translate(&[
            ins(151, "RESUME", Some(0), ArgValue::Int(0), 0),
            load_const(ArgValue::Int(30), 2),
            store_fast("age", 4),
            ins(83, "RETURN_VALUE", None, ArgValue::None, 6),
        ]);
        assert_eq!(t.statements(), &["let mut age = 30;".to_string()]);
    }

    #[test]
    fn test_translation_is_idempotent() {
        let stream = [
            load_const(ArgValue::Str("Kevin".to_string()), 0),
            store_fast("name", 2),
            load_global("print", 4),
            load_fast("name", 6),
            call(1, 8),
        ];
        let first = emit_program(&translate(&stream).into_translation());
        let second = emit_program(&translate(&stream).into_translation());
        assert_eq!(first, second);
    }

    #[test]
    fn test_trace_stack_lists_history_and_statements() {
        let t = translate(&[load_const(ArgValue::Int(30), 0), store_fast("age", 2)]);
        let trace = t.trace_stack();
        assert!(trace.contains("LOAD_CONST"));
        assert!(trace.contains("STORE_FAST"));
        assert!(trace.contains("let mut age = 30;"));
        assert!(trace.contains("LOCAL"));
    }
}
