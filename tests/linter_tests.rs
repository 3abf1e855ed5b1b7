// tests/linter_tests.rs

use jsweep::ast::{Context, Node, NodeType};
use jsweep::index::SymbolIndex;
use jsweep::linter::{LEXICAL_GAP, LintConfig, Linter};
use jsweep::output::to_json;
use jsweep::rules::builtin::{
    NAMING_PATTERN, RETURN_OUTSIDE_FUNCTION, UNKNOWN_IDENTIFIER, UNUSED_IDENTIFIER,
    UnknownIdentifier, WRONG_ARGUMENT_COUNT,
};
use jsweep::rules::{Report, Rule, RuleError};

/// Messages reported by one checker, in order.
fn messages_of(reports: &[Report], checker: &str) -> Vec<String> {
    reports
        .iter()
        .filter(|r| r.checker() == Some(checker))
        .flat_map(|r| r.messages())
        .map(str::to_string)
        .collect()
}

struct Panicky;

impl Rule for Panicky {
    fn name(&self) -> &str {
        "Panicky"
    }

    fn target(&self) -> NodeType {
        NodeType::Identifier
    }

    fn check(&self, _node: &Node, _index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        panic!("rule exploded")
    }
}

/// Reports every node of its target type, to observe ordering.
struct Echo(&'static str, NodeType);

impl Rule for Echo {
    fn name(&self) -> &str {
        self.0
    }

    fn target(&self) -> NodeType {
        self.1
    }

    fn check(&self, node: &Node, _index: &SymbolIndex<'_>, _context: &Context<'_>) -> Vec<RuleError> {
        vec![RuleError::new(format!("{} at ({})", node.name().unwrap_or("?"), node.loc))]
    }
}

// ============================================================================
// Built-in rules
// ============================================================================

#[test]
fn test_unknown_identifier_reports_only_undeclared() {
    let reports = Linter::default().analyze("let x = 1; y;");
    assert_eq!(
        messages_of(&reports, UNKNOWN_IDENTIFIER),
        vec!["Unknown identifier: 'y' at (1:11)."]
    );
}

#[test]
fn test_unused_identifier() {
    let reports = Linter::default().analyze("var used = 1;\nvar spare = used;\nfunction helper() {}");
    assert_eq!(
        messages_of(&reports, UNUSED_IDENTIFIER),
        vec![
            "Unused var: 'spare' at (2:4).",
            "Unused function: 'helper' at (3:0).",
        ]
    );
}

#[test]
fn test_called_function_is_used() {
    let reports = Linter::default().analyze("function f() {}\nf();");
    assert!(messages_of(&reports, UNUSED_IDENTIFIER).is_empty());
    assert!(messages_of(&reports, UNKNOWN_IDENTIFIER).is_empty());
}

#[test]
fn test_wrong_argument_count() {
    let reports = Linter::default().analyze("function f(a, b) { return a + b; }\nf(1);\nf(1, 2);");
    assert_eq!(
        messages_of(&reports, WRONG_ARGUMENT_COUNT),
        vec!["Function 'f' expects 2 arguments, 1 given at (2:0)."]
    );
}

#[test]
fn test_argument_count_uses_last_declaration() {
    let source = "function f(a) {}\nfunction f(a, b, c) {}\nf(1, 2, 3);";
    let reports = Linter::default().analyze(source);
    assert!(messages_of(&reports, WRONG_ARGUMENT_COUNT).is_empty());
}

#[test]
fn test_naming_pattern() {
    let reports = Linter::default().analyze("var funky = 1;\nvar plain = funky;\nplain;");
    assert_eq!(
        messages_of(&reports, NAMING_PATTERN),
        vec!["Disallowed name: 'funky' matches /fun/ at (1:4)."]
    );
}

#[test]
fn test_named_function_expression_can_recurse() {
    let reports = Linter::default().analyze("var f = function g(n) { return g(n); };\nf(1);");
    assert!(messages_of(&reports, UNKNOWN_IDENTIFIER).is_empty());
    assert!(messages_of(&reports, UNUSED_IDENTIFIER).is_empty());
}

#[test]
fn test_return_outside_function() {
    let reports = Linter::default().analyze("function f() { return 1; }\nf();\nreturn 2;");
    assert_eq!(
        messages_of(&reports, RETURN_OUTSIDE_FUNCTION),
        vec!["Return outside function at (3:0)."]
    );
}

#[test]
fn test_clean_program() {
    let source = r#"
function greet(name) {
    var message = "hello " + name;
    return message;
}
greet("world");
"#;
    assert!(Linter::default().analyze(source).is_empty());
}

// ============================================================================
// Engine behavior
// ============================================================================

#[test]
fn test_reports_in_traversal_then_registration_order() {
    let mut linter = Linter::new(vec![]);
    linter.register_rule(Box::new(Echo("first", NodeType::Identifier)));
    linter.register_rule(Box::new(Echo("second", NodeType::Identifier)));

    let reports = linter.analyze("a; b;");
    let checkers: Vec<(&str, Vec<&str>)> = reports
        .iter()
        .map(|r| (r.checker().unwrap(), r.messages()))
        .collect();
    assert_eq!(
        checkers,
        vec![
            ("first", vec!["a at (1:0)"]),
            ("second", vec!["a at (1:0)"]),
            ("first", vec!["b at (1:3)"]),
            ("second", vec!["b at (1:3)"]),
        ]
    );
}

#[test]
fn test_empty_rule_list_reports_nothing() {
    assert!(Linter::new(vec![]).analyze("x = y + z;").is_empty());
}

#[test]
fn test_analysis_is_idempotent() {
    let linter = Linter::default();
    let source = "var a = b;\nfunction funny(x) { return x; }\nfunny(1, 2);\nreturn;";
    let first = linter.analyze(source);
    let second = linter.analyze(source);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_parse_failure_is_contained() {
    let reports = Linter::default().analyze("var = ;");
    assert_eq!(
        reports,
        vec![Report::Failure {
            message: "Unexpected token '=' at (1:4), expected variable name".to_string(),
        }]
    );
}

#[test]
fn test_deep_nesting_is_a_single_failure() {
    let test_cases = vec![
        format!("{}1{};", "(".repeat(10_000), ")".repeat(10_000)),
        format!("{}b;", "if (a) ".repeat(20_000)),
        format!("{}1;", "1 + ".repeat(2_000)),
    ];
    for input in &test_cases {
        let reports = Linter::default().analyze(input);
        assert_eq!(reports.len(), 1, "Failed for input: {}...", &input[..20]);
        match &reports[0] {
            Report::Failure { message } => assert!(
                message.starts_with("Nesting too deep at ("),
                "Failed for input: {}...",
                &input[..20]
            ),
            other => panic!("Expected failure, got {:?}", other),
        }
    }
}

#[test]
fn test_moderate_nesting_is_analyzed() {
    let source = format!("var a = {}1{};\na;", "(".repeat(30), ")".repeat(30));
    assert!(Linter::default().analyze(&source).is_empty());
}

#[test]
fn test_panicking_rule_is_isolated() {
    let mut linter = Linter::new(vec![]);
    linter.register_rule(Box::new(Panicky));
    linter.register_rule(Box::new(UnknownIdentifier));

    let reports = linter.analyze("y;");
    assert_eq!(
        messages_of(&reports, "Panicky"),
        vec!["Rule 'Panicky' failed: rule exploded"]
    );
    assert_eq!(
        messages_of(&reports, UNKNOWN_IDENTIFIER),
        vec!["Unknown identifier: 'y' at (1:0)."]
    );
}

#[test]
fn test_lexical_gaps_come_first() {
    let reports = Linter::default().analyze("var a = 1;\n@ a;");
    assert_eq!(reports[0].checker(), Some(LEXICAL_GAP));
    assert_eq!(reports[0].messages(), vec!["Unrecognized input '@' at (2:0)."]);
    assert_eq!(reports.len(), 1);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_custom_pattern() {
    let config = LintConfig {
        disabled_rules: vec![],
        name_pattern: Some("^tmp".to_string()),
    };
    let linter = Linter::from_config(&config).unwrap();
    let reports = linter.analyze("var tmpValue = 1, fun = tmpValue;\nfun;");
    assert_eq!(
        messages_of(&reports, NAMING_PATTERN),
        vec!["Disallowed name: 'tmpValue' matches /^tmp/ at (1:4)."]
    );
}

#[test]
fn test_config_disabled_rule_is_silent() {
    let config = LintConfig::from_json(r#"{"disabled_rules": ["Unknown identifier"]}"#).unwrap();
    let linter = Linter::from_config(&config).unwrap();
    assert!(messages_of(&linter.analyze("y;"), UNKNOWN_IDENTIFIER).is_empty());
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_report_shape() {
    let reports = Linter::default().analyze("var x = 1; y;");
    assert_eq!(
        to_json(&reports).unwrap(),
        concat!(
            r#"[{"checker":"Unused identifier","errors":[{"message":"Unused var: 'x' at (1:4)."}]},"#,
            r#"{"checker":"Unknown identifier","errors":[{"message":"Unknown identifier: 'y' at (1:11)."}]}]"#
        )
    );
}

#[test]
fn test_json_failure_shape() {
    let reports = Linter::default().analyze("if (");
    assert_eq!(
        to_json(&reports).unwrap(),
        r#"[{"message":"Unexpected end of program, expected expression"}]"#
    );
}
