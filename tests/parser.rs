mod parser_tests {
    use zero_lang as zero;

    use zero::ast_printer::AstPrinter;
    use zero::parser::Parser;
    use zero::scanner::Scanner;
    use zero::stmt::Stmt;
    use zero::token::Token;

    fn scan(source: &str) -> Vec<Token> {
        Scanner::new(source.as_bytes())
            .filter_map(Result::ok)
            .collect()
    }

    /// Parse `source` and return the printed program plus the rendered
    /// diagnostics.
    fn parse(source: &str) -> (Vec<Stmt>, Vec<String>) {
        let tokens = scan(source);
        let mut parser = Parser::new(&tokens);
        let statements = parser.parse();
        let diagnostics = parser
            .take_diagnostics()
            .iter()
            .map(|e| e.to_string())
            .collect();

        (statements, diagnostics)
    }

    fn parse_clean(source: &str) -> String {
        let (statements, diagnostics) = parse(source);
        assert!(diagnostics.is_empty(), "diagnostics: {:?}", diagnostics);

        AstPrinter.print_program(&statements)
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(parse_clean("1 + 2 * 3;"), "(expr (+ 1 (* 2 3)))");
    }

    #[test]
    fn test_equal_precedence_is_left_associative() {
        assert_eq!(parse_clean("1 - 2 - 3;"), "(expr (- (- 1 2) 3))");
        assert_eq!(parse_clean("8 / 4 / 2;"), "(expr (/ (/ 8 4) 2))");
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        assert_eq!(parse_clean("(1 + 2) * 3;"), "(expr (* (group (+ 1 2)) 3))");
    }

    #[test]
    fn test_unary_binds_tighter_than_factor() {
        assert_eq!(parse_clean("-1 * 2;"), "(expr (* (- 1) 2))");
        assert_eq!(parse_clean("not true == false;"), "(expr (== (not true) false))");
    }

    #[test]
    fn test_comparison_below_equality() {
        assert_eq!(parse_clean("1 < 2 == true;"), "(expr (== (< 1 2) true))");
    }

    #[test]
    fn test_logical_precedence_and_over_or() {
        assert_eq!(parse_clean("a or b and c;"), "(expr (or a (and b c)))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(parse_clean("a = b = 1;"), "(expr (= a (= b 1)))");
    }

    #[test]
    fn test_call_chains() {
        assert_eq!(parse_clean("f(1)(2, 3);"), "(expr (call (call f 1) 2 3))");
    }

    #[test]
    fn test_function_declaration() {
        assert_eq!(
            parse_clean("fn add(a, b) { return a + b; }"),
            "(fn add (a b) (return (+ a b)))"
        );
        assert_eq!(parse_clean("fn nop() { return; }"), "(fn nop () (return))");
    }

    #[test]
    fn test_if_else_and_while() {
        assert_eq!(
            parse_clean("if (x > 0) print(x); else print(0);"),
            "(if (> x 0) (expr (call print x)) (expr (call print 0)))"
        );
        assert_eq!(
            parse_clean("while (x < 10) x = x + 1;"),
            "(while (< x 10) (expr (= x (+ x 1))))"
        );
    }

    #[test]
    fn test_for_desugars_to_while_in_blocks() {
        assert_eq!(
            parse_clean("for (let i = 0; i < 3; i = i + 1) print(i);"),
            "(block (let i 0) (while (< i 3) (block (expr (call print i)) (expr (= i (+ i 1))))))"
        );
    }

    #[test]
    fn test_for_with_empty_clauses_is_infinite_while() {
        assert_eq!(
            parse_clean("for (;;) print(1);"),
            "(while true (expr (call print 1)))"
        );
    }

    #[test]
    fn test_var_declaration_with_and_without_initializer() {
        assert_eq!(parse_clean("let x = 1;"), "(let x 1)");
        assert_eq!(parse_clean("let x;"), "(let x)");
    }

    #[test]
    fn test_invalid_assignment_target_is_recoverable() {
        let (statements, diagnostics) = parse("1 = 2;");

        // diagnostic recorded at the '=' token, but the statement survives
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0],
            "[Line 1] Error at '=': Invalid assignment target."
        );
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_missing_semicolon_reports_offending_token() {
        let (_, diagnostics) = parse("let x = 1\nlet y = 2;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0],
            "[Line 2] Error at 'let': Expect ';' after variable declaration."
        );
    }

    #[test]
    fn test_error_at_end_of_input() {
        let (_, diagnostics) = parse("1 +");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0], "[Line 1] Error at end: Expect expression.");
    }

    #[test]
    fn test_synchronize_recovers_per_statement() {
        // two broken declarations, one good one — both errors surface and the
        // good declaration still parses
        let (statements, diagnostics) = parse("let = 1; let x 5; let y = 2;");

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].contains("Expect variable name."));
        assert!(diagnostics[1].contains("Expect ';' after variable declaration."));

        assert_eq!(statements.len(), 1);
        assert_eq!(AstPrinter.print_program(&statements), "(let y 2)");
    }

    #[test]
    fn test_has_error_flag_gates_execution() {
        let tokens = scan("let x = ;");
        let mut parser = Parser::new(&tokens);
        let _ = parser.parse();

        assert!(parser.has_error());
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_bang_and_not_are_interchangeable() {
        assert_eq!(parse_clean("!x;"), "(expr (! x))");
        assert_eq!(parse_clean("not x;"), "(expr (not x))");
        assert_eq!(parse_clean("1 != 2;"), "(expr (!= 1 2))");
    }

    #[test]
    fn test_nested_blocks() {
        assert_eq!(
            parse_clean("{ let a = 1; { a = 2; } }"),
            "(block (let a 1) (block (expr (= a 2))))"
        );
    }
}
