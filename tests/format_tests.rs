//! Conformance tests for the KVS text format, grouped by grammar rule.

use kvs_format::de::Parser;
use kvs_format::{parse, parse_strict, to_string, Entry, Error, ParseMode};

mod entries {
    use super::*;

    #[test]
    fn test_document_example() {
        let tree = parse("name=Alice;age=30;tags[0=admin;1=eng;]");
        assert_eq!(tree.keys(), vec!["name", "age", "tags"]);
        assert_eq!(tree.get_list(&["tags"]), vec!["admin", "eng"]);
    }

    #[test]
    fn test_empty_value() {
        let tree = parse("a=;b=1;");
        assert_eq!(tree.entry("a"), Some(&Entry::from("")));
        assert_eq!(tree.get(&["b"]), "1");
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let tree = parse("a=1;b=2;a=3;");
        assert_eq!(tree.keys(), vec!["a", "b"]);
        assert_eq!(tree.get(&["a"]), "3");
    }

    #[test]
    fn test_newlines_between_entries_are_ignored() {
        let tree = parse("\n  a=1;\n  b=2;\n");
        assert_eq!(tree.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_newline_inside_value_is_kept() {
        let tree = parse("text=line one\nline two;");
        assert_eq!(tree.get(&["text"]), "line one\nline two");
    }
}

mod escaping {
    use super::*;

    #[test]
    fn test_doubled_semicolon() {
        assert_eq!(parse("v=a;;b;").get(&["v"]), "a;b");
    }

    #[test]
    fn test_leading_and_trailing_semicolons() {
        assert_eq!(parse("v=;;x;").get(&["v"]), ";x");
        assert_eq!(parse("v=x;;;").get(&["v"]), "x;");
    }

    #[test]
    fn test_escaped_terminator_does_not_end_value() {
        let tree = parse("a=1;;b=2;");
        assert_eq!(tree.keys(), vec!["a"]);
        assert_eq!(tree.get(&["a"]), "1;b=2");
    }

    #[test]
    fn test_serializer_doubles_semicolons() {
        let mut tree = kvs_format::Tree::new();
        tree.set("x;y", &["v"]);
        assert_eq!(to_string(&tree), "v=x;;y;");
    }
}

mod metadata {
    use super::*;

    #[test]
    fn test_metadata_discarded() {
        let tree = parse("n~int=5;");
        assert_eq!(tree.keys(), vec!["n"]);
        assert_eq!(tree.get(&["n"]), "5");
    }

    #[test]
    fn test_metadata_before_structure() {
        let tree = parse("list~array=[=a;]");
        assert_eq!(tree.get(&["list", "0"]), "a");
    }

    #[test]
    fn test_metadata_not_written_back() {
        assert_eq!(to_string(&parse("n~int=5;")), "n=5;");
    }
}

mod structures {
    use super::*;

    #[test]
    fn test_optional_equals_before_bracket() {
        assert_eq!(parse("t=[a=1;]"), parse("t[a=1;]"));
    }

    #[test]
    fn test_empty_structure() {
        let tree = parse("e[]");
        assert!(tree.entry("e").is_some_and(Entry::is_child));
        assert_eq!(to_string(&tree), "e[]");
    }

    #[test]
    fn test_deep_nesting() {
        let tree = parse("a[b[c[d[e=deep;]]]]");
        assert_eq!(tree.get(&["a", "b", "c", "d", "e"]), "deep");
        assert_eq!(to_string(&tree), "a[b[c[d[e=deep;]]]]");
    }

    #[test]
    fn test_siblings_after_nested_structure() {
        let tree = parse("a[b=1;]c=2;d[e=3;]");
        assert_eq!(tree.keys(), vec!["a", "c", "d"]);
    }
}

mod auto_keys {
    use super::*;

    #[test]
    fn test_blank_keys_are_numbered() {
        let tree = parse("=a;=b;=c;");
        assert_eq!(tree.keys(), vec!["0", "1", "2"]);
    }

    #[test]
    fn test_whitespace_key_is_blank() {
        assert_eq!(parse("  =a;").keys(), vec!["0"]);
    }

    #[test]
    fn test_each_level_counts_separately() {
        let tree = parse("=a;[=b;=c;]=d;");
        assert_eq!(tree.keys(), vec!["0", "1", "2"]);
        assert_eq!(tree.get(&["1", "0"]), "b");
        assert_eq!(tree.get(&["1", "1"]), "c");
        assert_eq!(tree.get(&["2"]), "d");
    }

    #[test]
    fn test_explicit_keys_do_not_advance_counter() {
        let tree = parse("x=1;=a;y=2;=b;");
        assert_eq!(tree.keys(), vec!["x", "0", "y", "1"]);
    }

    #[test]
    fn test_auto_key_overwrites_explicit_numeric_key() {
        let tree = parse("0=explicit;=auto;");
        assert_eq!(tree.keys(), vec!["0"]);
        assert_eq!(tree.get(&["0"]), "auto");
    }
}

mod malformed {
    use super::*;

    fn issues(input: &str) -> Vec<Error> {
        Parser::new(input).parse_with_diagnostics().1
    }

    #[test]
    fn test_value_without_terminator_at_end_is_committed() {
        assert_eq!(parse("a=1;b=2").get(&["b"]), "2");
        assert!(matches!(
            parse_strict("a=1;b=2"),
            Err(Error::UnterminatedValue { .. })
        ));
    }

    #[test]
    fn test_value_without_terminator_before_close_is_dropped() {
        let tree = parse("s[a=1;b=2]c=3;");
        assert_eq!(tree.get(&["s", "a"]), "1");
        assert!(!tree.exists(&["s", "b"]));
        assert_eq!(tree.get(&["c"]), "3");
    }

    #[test]
    fn test_unclosed_structures_close_at_end() {
        let tree = parse("a[b[c=1;");
        assert_eq!(tree.get(&["a", "b", "c"]), "1");
        assert_eq!(issues("a[b[c=1;").len(), 1);
    }

    #[test]
    fn test_stray_close_stops_parsing() {
        let tree = parse("a=1;]b=2;");
        assert_eq!(tree.keys(), vec!["a"]);
        assert_eq!(parse_strict("a=1;]b=2;"), Err(Error::unexpected_struct_end(1, 5)));
    }

    #[test]
    fn test_open_after_partial_value() {
        let tree = parse("a=xy[b=1;]");
        assert_eq!(tree.get(&["a", "b"]), "1");
        assert!(matches!(
            parse_strict("a=xy[b=1;]"),
            Err(Error::UnexpectedStructStart { line: 1, col: 5 })
        ));
    }

    #[test]
    fn test_trailing_key_without_value_is_dropped() {
        let tree = parse("a=1;dangling");
        assert_eq!(tree.keys(), vec!["a"]);
        assert!(issues("a=1;dangling").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert_eq!(parse_strict(""), Ok(kvs_format::Tree::new()));
    }

    #[test]
    fn test_strict_mode_via_parser() {
        let result = Parser::with_mode("a[", ParseMode::Strict).parse();
        assert_eq!(result, Err(Error::unterminated_struct(1, 3, 1)));
    }
}

mod deep_nesting {
    use super::*;

    const DEPTH: usize = 100_000;

    fn nested_keys(depth: usize) -> String {
        format!("{}{}", "0[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_unclosed_nesting_is_total() {
        let input = "[".repeat(DEPTH);

        let tree = parse(&input);
        assert_eq!(tree.keys(), vec!["0"]);
        assert!(to_string(&tree) == nested_keys(DEPTH));

        assert_eq!(
            parse_strict(&input),
            Err(Error::unterminated_struct(1, DEPTH + 1, DEPTH))
        );
    }

    #[test]
    fn test_closed_nesting_round_trips() {
        let input = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));

        let tree = parse_strict(&input).unwrap();
        let text = to_string(&tree);
        assert!(text == nested_keys(DEPTH));

        let copy = tree.clone();
        assert!(copy == parse(&text));
    }

    #[test]
    fn test_deep_leaf_is_reachable() {
        let input = format!("{}k=v;", "[".repeat(DEPTH));
        let tree = parse(&input);

        let mut path = vec!["0"; DEPTH];
        path.push("k");
        assert_eq!(tree.get(path.as_slice()), "v");
        assert!(tree.debug().as_map().is_some());
    }
}
