mod scanner_tests {
    use zero_lang as zero;

    use zero::scanner::Scanner;
    use zero::token::TokenType;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(
            tokens.len(),
            expected.len(),
            "token count mismatch for {:?}",
            source
        );

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::END, ""),
            ],
        );
    }

    #[test]
    fn test_var_declaration_lexemes() {
        // `let five = 5;` must produce exactly these lexemes, then END with
        // an empty lexeme.
        assert_token_sequence(
            "let five = 5;",
            &[
                (TokenType::LET, "let"),
                (TokenType::IDENTIFIER, "five"),
                (TokenType::EQUAL, "="),
                (TokenType::NUMBER(5), "5"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::END, ""),
            ],
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::NOT, "!"),
                (TokenType::NOT_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::END, ""),
            ],
        );
    }

    #[test]
    fn test_keywords_vs_identifiers() {
        assert_token_sequence(
            "and or not fn let lettuce nothing iff",
            &[
                (TokenType::AND, "and"),
                (TokenType::OR, "or"),
                (TokenType::NOT, "not"),
                (TokenType::FN, "fn"),
                (TokenType::LET, "let"),
                (TokenType::IDENTIFIER, "lettuce"),
                (TokenType::IDENTIFIER, "nothing"),
                (TokenType::IDENTIFIER, "iff"),
                (TokenType::END, ""),
            ],
        );
    }

    #[test]
    fn test_number_literal_payload() {
        let tokens: Vec<_> = Scanner::new(b"1234".as_slice())
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens.len(), 2);

        match &tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 1234),
            other => panic!("expected NUMBER, got {:?}", other),
        }
    }

    #[test]
    fn test_number_literal_overflow_is_a_lex_error() {
        // one past i64::MAX — must diagnose, never clamp to some other value
        let results: Vec<_> = Scanner::new(b"9223372036854775808;".as_slice()).collect();

        let err = results[0].as_ref().unwrap_err().to_string();
        assert!(
            err.contains("Number literal too large."),
            "unexpected message: {}",
            err
        );

        // scanning continues past the bad literal
        let kinds: Vec<_> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|t| t.token_type.clone())
            .collect();

        assert_eq!(kinds, vec![TokenType::SEMICOLON, TokenType::END]);
    }

    #[test]
    fn test_number_literal_at_i64_max_still_scans() {
        let tokens: Vec<_> = Scanner::new(b"9223372036854775807".as_slice())
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, i64::MAX),
            other => panic!("expected NUMBER, got {:?}", other),
        }
    }

    #[test]
    fn test_string_literal_strips_quotes() {
        let tokens: Vec<_> = Scanner::new(br#""hello world""#.as_slice())
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello world"),
            other => panic!("expected STRING, got {:?}", other),
        }

        // lexeme keeps the quotes
        assert_eq!(tokens[0].lexeme, r#""hello world""#);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_token_sequence(
            "1 // the rest is ignored ;;;\n2 // no trailing newline",
            &[
                (TokenType::NUMBER(1), "1"),
                (TokenType::NUMBER(2), "2"),
                (TokenType::END, ""),
            ],
        );
    }

    #[test]
    fn test_line_counting() {
        let tokens: Vec<_> = Scanner::new(b"1\n2\n\n3".as_slice())
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 4);
    }

    #[test]
    fn test_multiline_string_counts_lines() {
        let tokens: Vec<_> = Scanner::new(b"\"a\nb\" c".as_slice())
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "a\nb"),
            other => panic!("expected STRING, got {:?}", other),
        }

        // identifier after the string sits on line 2
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let results: Vec<_> = Scanner::new(b"\"oops".as_slice()).collect();

        // one error, then a clean END — no partial string token
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());

        let err = results[0].as_ref().unwrap_err().to_string();
        assert!(
            err.contains("Unterminated string."),
            "unexpected message: {}",
            err
        );

        let end = results[1].as_ref().unwrap();
        assert_eq!(end.token_type, TokenType::END);
    }

    #[test]
    fn test_unexpected_chars_are_skipped_not_fatal() {
        let results: Vec<_> = Scanner::new(b",.$(#".as_slice()).collect();

        // COMMA DOT Err('$') LEFT_PAREN Err('#') END
        assert_eq!(results.len(), 6);

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2);

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "unexpected message: {}",
                err
            );
        }

        let kinds: Vec<_> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|t| t.token_type.clone())
            .collect();

        assert_eq!(
            kinds,
            vec![
                TokenType::COMMA,
                TokenType::DOT,
                TokenType::LEFT_PAREN,
                TokenType::END,
            ]
        );
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let tokens: Vec<_> = Scanner::new(br#"let n = 5; let s = "hi";"#.as_slice())
            .filter_map(Result::ok)
            .collect();

        // unit variant
        assert_eq!(
            serde_json::to_string(&tokens[0]).unwrap(),
            r#"{"token_type":"LET","lexeme":"let","line":1}"#
        );

        // payload variants keep their literal values
        assert_eq!(
            serde_json::to_string(&tokens[3]).unwrap(),
            r#"{"token_type":{"NUMBER":5},"lexeme":"5","line":1}"#
        );
        assert_eq!(
            serde_json::to_string(&tokens[8]).unwrap(),
            r#"{"token_type":{"STRING":"hi"},"lexeme":"\"hi\"","line":1}"#
        );
    }

    #[test]
    fn test_exactly_one_end_token() {
        let mut scanner = Scanner::new(b"1;".as_slice());

        let mut ends = 0;
        for item in &mut scanner {
            if let Ok(token) = item {
                if token.token_type == TokenType::END {
                    ends += 1;
                }
            }
        }

        assert_eq!(ends, 1);
        // fused: further calls keep yielding None
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
