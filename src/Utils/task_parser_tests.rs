/////////////////////////////TESTS////////////////////////////////////////////////////
/*
comprehensive tests:
title, key, value and section parsers
document parsing with comments and quoted values
template usage (missing keys, unknown keys, unknown titles)
malformed documents
file-based parsing
typed getters of TaskDocument
*/

#[cfg(test)]
mod tests1 {

    use crate::numerical::integration_errors::IntegrationError;
    use crate::Utils::task_parser::{
        TaskDocument, Value, filter_comments, parse_document, parse_document_as, parse_key,
        parse_key_value_pair, parse_section, parse_title, parse_value, parse_value_list,
        template_from,
    };
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn task_template() -> crate::Utils::task_parser::DocumentMap {
        template_from(&[
            ("function", &["expression"][..]),
            ("bounds", &["lower", "upper"][..]),
            ("settings", &["intervals", "samples", "methods"][..]),
            ("run", &["seed", "loglevel"][..]),
        ])
    }

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("bounds\n lower: 0").unwrap();
        assert_eq!(title, "bounds");
        assert_eq!(remaining, "lower: 0");

        let (remaining, title) = parse_title("run_2 seed: 1").unwrap();
        assert_eq!(title, "run_2");
        assert_eq!(remaining, "seed: 1");
    }

    #[test]
    fn test_parse_key() {
        let (remaining, key) = parse_key("intervals: 100").unwrap();
        assert_eq!(key, "intervals");
        assert_eq!(remaining, ": 100");
        assert!(parse_key("1intervals: 100").is_err());
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("trapezoidal, simpson").unwrap();
        assert_eq!(value, Value::String("trapezoidal".to_string()));
        assert_eq!(remaining, ", simpson");

        let (remaining, value) = parse_value("100 samples: 10").unwrap();
        assert_eq!(value, Value::Integer(100));
        assert_eq!(remaining, " samples: 10");

        let (_, value) = parse_value("3.14159").unwrap();
        assert_eq!(value, Value::Float(3.14159));

        let (_, value) = parse_value("x^2").unwrap();
        assert_eq!(value, Value::String("x^2".to_string()));
    }

    #[test]
    fn test_parse_value_list() {
        let (remaining, values) = parse_value_list("trapezoidal , simpson,monte-carlo").unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("trapezoidal".to_string()),
                Value::String("simpson".to_string()),
                Value::String("monte-carlo".to_string())
            ]
        );
        assert_eq!(remaining, "");

        let (_, values) = parse_value_list("\"sin(x), cos(x)\", x").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], Value::String("sin(x), cos(x)".to_string()));
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("lower : -1 upper: 1").unwrap();
        assert_eq!(key, "lower");
        assert_eq!(values, vec![Value::Integer(-1)]);
        assert_eq!(remaining, "upper: 1");

        let (_, (key, values)) = parse_key_value_pair("expression: \"x ** 2 + 1\"").unwrap();
        assert_eq!(key, "expression");
        assert_eq!(values, vec![Value::String("x ** 2 + 1".to_string())]);
    }

    #[test]
    fn test_parse_section() {
        let (remaining, (title, section)) =
            parse_section("bounds lower: 0 upper: 3.14159\nsettings intervals: 10").unwrap();
        assert_eq!(title, "bounds");
        assert_eq!(section.len(), 2);
        assert_eq!(section["lower"], vec![Value::Integer(0)]);
        assert_eq!(section["upper"], vec![Value::Float(3.14159)]);
        assert_eq!(remaining, "settings intervals: 10");
    }

    #[test]
    fn test_parse_section_multiline() {
        let input = "settings\n  intervals: 50\n  samples: 2000\n  methods: simpson38, monte-carlo";
        let (remaining, (title, section)) = parse_section(input).unwrap();
        assert_eq!(title, "settings");
        assert_eq!(section["samples"], vec![Value::Integer(2000)]);
        assert_eq!(section["methods"].len(), 2);
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_parse_document_basic() {
        let input = r#"function expression: "sin(x) + x^2"
bounds lower: 0 upper: 3.14159
settings intervals: 100 samples: 1000 methods: trapezoidal, simpson, monte-carlo
run seed: 42 loglevel: info"#;
        let (remaining, document) = parse_document(input).unwrap();
        assert!(remaining.trim().is_empty());
        assert_eq!(document.len(), 4);
        assert_eq!(
            document["function"]["expression"],
            Some(vec![Value::String("sin(x) + x^2".to_string())])
        );
        assert_eq!(document["settings"]["methods"].as_ref().map(|v| v.len()), Some(3));
        assert_eq!(
            document["run"]["loglevel"],
            Some(vec![Value::String("info".to_string())])
        );
    }

    #[test]
    fn test_filter_comments() {
        let input =
            "// header\nbounds lower: 0\n# note\n   % matlab style\n; ini style\n\nrun seed: 1";
        assert_eq!(filter_comments(input), "bounds lower: 0\nrun seed: 1");
    }

    #[test]
    fn test_parse_document_with_comments() {
        let input = r#"
        // integrate a parabola
        function
          expression: x**2
        # interval
        bounds
          lower: 0
          upper: 1
        "#;
        let document = parse_document_as(input, None).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document["bounds"]["upper"], Some(vec![Value::Integer(1)]));
    }

    #[test]
    fn test_parse_document_with_template() {
        let template = task_template();
        let document = parse_document_as("bounds lower: 1 upper: 2", Some(&template)).unwrap();
        assert_eq!(document.len(), 4);
        assert_eq!(document["bounds"]["lower"], Some(vec![Value::Integer(1)]));
        assert_eq!(document["function"]["expression"], None);
        assert_eq!(document["settings"]["methods"], None);
        assert_eq!(document["run"].len(), 2);
    }

    #[test]
    fn test_template_rejects_unknown_names() {
        let template = task_template();
        let err = parse_document_as("bounds lower: 1 middle: 2", Some(&template)).unwrap_err();
        assert!(matches!(err, IntegrationError::TaskFile(ref msg) if msg.contains("middle")));
        let err = parse_document_as("plots width: 800", Some(&template)).unwrap_err();
        assert!(matches!(err, IntegrationError::TaskFile(ref msg) if msg.contains("plots")));
    }

    #[test]
    fn test_parse_document_malformed() {
        assert!(parse_document_as("bounds lower 0", None).is_err());
        assert!(parse_document_as("bounds lower: 0 stray", None).is_err());
        assert!(matches!(
            parse_document_as(": 0", None),
            Err(IntegrationError::TaskFile(_))
        ));
    }

    #[test]
    fn test_parse_document_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("task.txt");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "// test task").unwrap();
        writeln!(file, "function").unwrap();
        writeln!(file, "  expression: \"exp(x) - 1\"").unwrap();
        writeln!(file, "settings").unwrap();
        writeln!(file, "  intervals: 64").unwrap();
        writeln!(file, "  methods: simpson, simpson38").unwrap();
        drop(file);

        let template = task_template();
        let document = TaskDocument::from_file(&file_path, Some(&template)).unwrap();
        assert_eq!(
            document.get_string("function", "expression").unwrap(),
            Some("exp(x) - 1".to_string())
        );
        assert_eq!(document.get_usize("settings", "intervals").unwrap(), Some(64));
        assert_eq!(document.get_usize("settings", "samples").unwrap(), None);
        assert_eq!(
            document.get_strings("settings", "methods"),
            Some(vec!["simpson".to_string(), "simpson38".to_string()])
        );
    }

    #[test]
    fn test_missing_file_is_task_file_error() {
        let dir = tempdir().unwrap();
        let err = TaskDocument::from_file(dir.path().join("absent.txt"), None).unwrap_err();
        assert!(matches!(err, IntegrationError::TaskFile(_)));
    }

    #[test]
    fn test_typed_getters_reject_wrong_types() {
        let document = TaskDocument::parse(
            "settings intervals: many samples: -5 methods: simpson\nbounds lower: 0, 1",
            None,
        )
        .unwrap();
        assert!(document.get_usize("settings", "intervals").is_err());
        assert!(document.get_usize("settings", "samples").is_err());
        assert!(document.get_f64("bounds", "lower").is_err());
        assert_eq!(
            document.get_string("settings", "methods").unwrap(),
            Some("simpson".to_string())
        );
        assert_eq!(
            document.values("bounds", "lower"),
            Some(&[Value::Integer(0), Value::Integer(1)][..])
        );
    }
}
