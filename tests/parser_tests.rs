// tests/parser_tests.rs

use jsweep::ast::{
    AssignOperator, BinaryOperator, DeclarationKind, LiteralValue, Node, NodeKind, NodeType,
    Position, UnaryOperator, UpdateOperator,
};
use jsweep::parser::{ParseError, parse_source};

fn body(source: &str) -> Vec<Node> {
    match parse_source(source).unwrap().kind {
        NodeKind::Program { body } => body,
        other => panic!("Expected program, got {:?}", other),
    }
}

/// The expression of a single expression statement.
fn expression(source: &str) -> Node {
    let mut statements = body(source);
    assert_eq!(statements.len(), 1, "Expected one statement in {}", source);
    match statements.remove(0).kind {
        NodeKind::ExpressionStatement { expression } => *expression,
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

fn statement_types(source: &str) -> Vec<NodeType> {
    body(source).iter().map(Node::node_type).collect()
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    // Should be: Add(1, Multiply(2, 3))
    match expression("1 + 2 * 3;").kind {
        NodeKind::BinaryExpression {
            operator: BinaryOperator::Add,
            left,
            right,
        } => {
            assert!(matches!(left.kind, NodeKind::Literal { value: LiteralValue::Number(n) } if n == 1.0));
            assert!(matches!(
                right.kind,
                NodeKind::BinaryExpression {
                    operator: BinaryOperator::Multiply,
                    ..
                }
            ));
        }
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_parentheses() {
    // Should be: Multiply(Add(1, 2), 3)
    match expression("(1 + 2) * 3;").kind {
        NodeKind::BinaryExpression {
            operator: BinaryOperator::Multiply,
            left,
            ..
        } => assert!(matches!(
            left.kind,
            NodeKind::BinaryExpression {
                operator: BinaryOperator::Add,
                ..
            }
        )),
        other => panic!("Expected multiplication, got {:?}", other),
    }
}

#[test]
fn test_left_associative_subtraction() {
    // Should be: Subtract(Subtract(a, b), c)
    match expression("a - b - c;").kind {
        NodeKind::BinaryExpression { left, right, .. } => {
            assert!(matches!(left.kind, NodeKind::BinaryExpression { .. }));
            assert!(matches!(right.kind, NodeKind::Identifier { ref name } if name == "c"));
        }
        other => panic!("Expected subtraction, got {:?}", other),
    }
}

#[test]
fn test_logical_precedence() {
    // Should be: Or(a, And(b, c))
    match expression("a || b && c;").kind {
        NodeKind::BinaryExpression {
            operator: BinaryOperator::Or,
            right,
            ..
        } => assert!(matches!(
            right.kind,
            NodeKind::BinaryExpression {
                operator: BinaryOperator::And,
                ..
            }
        )),
        other => panic!("Expected ||, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match expression("a = b += 1;").kind {
        NodeKind::AssignmentExpression {
            operator: AssignOperator::Assign,
            right,
            ..
        } => assert!(matches!(
            right.kind,
            NodeKind::AssignmentExpression {
                operator: AssignOperator::AddAssign,
                ..
            }
        )),
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_conditional() {
    assert!(matches!(
        expression("a ? b : c;").kind,
        NodeKind::ConditionalExpression { .. }
    ));
}

#[test]
fn test_unary_and_update() {
    assert!(matches!(
        expression("typeof x;").kind,
        NodeKind::UnaryExpression {
            operator: UnaryOperator::Typeof,
            ..
        }
    ));
    assert!(matches!(
        expression("++i;").kind,
        NodeKind::UpdateExpression {
            operator: UpdateOperator::Increment,
            prefix: true,
            ..
        }
    ));
    assert!(matches!(
        expression("i--;").kind,
        NodeKind::UpdateExpression {
            operator: UpdateOperator::Decrement,
            prefix: false,
            ..
        }
    ));
}

#[test]
fn test_member_and_call_chain() {
    // Should be: Call(Member(Member(a, "b"), c), [d])
    match expression("a.b[c](d);").kind {
        NodeKind::CallExpression { callee, arguments } => {
            assert!(matches!(arguments.kind, NodeKind::FunctionArgumentList { ref args } if args.len() == 1));
            match callee.kind {
                NodeKind::MemberExpression {
                    object,
                    computed: true,
                    ..
                } => match object.kind {
                    NodeKind::MemberExpression {
                        property,
                        computed: false,
                        ..
                    } => assert!(matches!(
                        property.kind,
                        NodeKind::Literal { value: LiteralValue::String(ref s) } if s == "b"
                    )),
                    other => panic!("Expected dot access, got {:?}", other),
                },
                other => panic!("Expected computed access, got {:?}", other),
            }
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_new_with_and_without_arguments() {
    let with_args = expression("new Foo(1, 2);");
    assert!(matches!(with_args.kind, NodeKind::NewExpression { arguments: Some(_), .. }));
    assert_eq!(with_args.argument_count(), Some(2));

    let bare = expression("new Foo;");
    assert!(matches!(bare.kind, NodeKind::NewExpression { arguments: None, .. }));
    assert_eq!(bare.argument_count(), Some(0));
}

#[test]
fn test_literals() {
    match expression("[1, , 'two', {a: 1, 'b': null}];").kind {
        NodeKind::ArrayExpression { elements } => {
            let types: Vec<NodeType> = elements.iter().map(Node::node_type).collect();
            assert_eq!(
                types,
                vec![
                    NodeType::Literal,
                    NodeType::EmptyExpression,
                    NodeType::Literal,
                    NodeType::ObjectExpression,
                ]
            );
        }
        other => panic!("Expected array, got {:?}", other),
    }
}

#[test]
fn test_sequence() {
    assert!(matches!(
        expression("a, b, c;").kind,
        NodeKind::SequenceExpression { ref expressions } if expressions.len() == 3
    ));
}

#[test]
fn test_function_expression() {
    match expression("(function named(a, b) { return a; });").kind {
        NodeKind::FunctionExpression { ref name, .. } => {
            assert_eq!(name.as_deref(), Some("named"));
        }
        other => panic!("Expected function expression, got {:?}", other),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_statement_kinds() {
    let test_cases = vec![
        ("if (a) b; else c;", NodeType::IfStatement),
        ("while (a) {}", NodeType::WhileStatement),
        ("do x++; while (x < 3);", NodeType::DoWhileStatement),
        ("for (var i = 0; i < 3; i++) {}", NodeType::ForStatement),
        ("for (;;) break;", NodeType::ForStatement),
        ("for (k in o) {}", NodeType::ForInStatement),
        ("for (var k in o) {}", NodeType::ForInStatement),
        ("with (o) x;", NodeType::WithStatement),
        ("switch (x) { case 1: a; break; default: b; }", NodeType::SwitchStatement),
        ("throw e;", NodeType::ThrowStatement),
        ("try { a; } catch (e) { b; }", NodeType::TryStatement),
        ("try { a; } finally { b; }", NodeType::TryStatement),
        ("return;", NodeType::ReturnStatement),
        ("debugger;", NodeType::DebuggerStatement),
        (";", NodeType::EmptyStatement),
        ("{ a; b; }", NodeType::CompoundStatement),
        ("function f() {}", NodeType::FunctionDeclaration),
        ("const x = 1;", NodeType::VariableDefinitionList),
    ];

    for (input, expected) in test_cases {
        assert_eq!(statement_types(input), vec![expected], "Failed for input: {}", input);
    }
}

#[test]
fn test_declaration_kind_recorded() {
    let test_cases = vec![
        ("var a;", DeclarationKind::Var),
        ("let a;", DeclarationKind::Let),
        ("const a = 1;", DeclarationKind::Const),
    ];

    for (input, expected) in test_cases {
        match &body(input)[0].kind {
            NodeKind::VariableDefinitionList { declaration, .. } => {
                assert_eq!(*declaration, expected, "Failed for input: {}", input)
            }
            other => panic!("Expected declaration list, got {:?}", other),
        }
    }
}

#[test]
fn test_multiple_definitions() {
    match &body("var a = 1, b, c = a;")[0].kind {
        NodeKind::VariableDefinitionList { definitions, .. } => {
            let names: Vec<&str> = definitions.iter().filter_map(Node::name).collect();
            assert_eq!(names, vec!["a", "b", "c"]);
        }
        other => panic!("Expected declaration list, got {:?}", other),
    }
}

#[test]
fn test_switch_cases() {
    match &body("switch (x) { case 1: case 2: a; default: b; c; }")[0].kind {
        NodeKind::SwitchStatement { cases, .. } => {
            let shapes: Vec<(bool, usize)> = cases
                .iter()
                .map(|case| match &case.kind {
                    NodeKind::SwitchCase { test, consequent } => (test.is_some(), consequent.len()),
                    other => panic!("Expected case, got {:?}", other),
                })
                .collect();
            assert_eq!(shapes, vec![(true, 0), (true, 1), (false, 2)]);
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

#[test]
fn test_labels_on_jumps() {
    match &body("while (1) { continue outer; }")[0].kind {
        NodeKind::WhileStatement { body, .. } => match &body.kind {
            NodeKind::CompoundStatement { body } => assert!(matches!(
                &body[0].kind,
                NodeKind::ContinueStatement { label: Some(l) } if l == "outer"
            )),
            other => panic!("Expected block, got {:?}", other),
        },
        other => panic!("Expected while, got {:?}", other),
    }
}

// ============================================================================
// Automatic semicolon insertion
// ============================================================================

#[test]
fn test_semicolons_optional_at_line_ends() {
    assert_eq!(
        statement_types("var a = 1\nvar b = 2\na + b"),
        vec![
            NodeType::VariableDefinitionList,
            NodeType::VariableDefinitionList,
            NodeType::ExpressionStatement,
        ]
    );
}

#[test]
fn test_semicolon_optional_before_brace() {
    assert_eq!(statement_types("{ a }"), vec![NodeType::CompoundStatement]);
}

#[test]
fn test_return_does_not_take_next_line() {
    match &body("function f() {\n  return\n  1\n}")[0].kind {
        NodeKind::FunctionDeclaration { body, .. } => match &body.kind {
            NodeKind::CompoundStatement { body } => {
                assert!(matches!(body[0].kind, NodeKind::ReturnStatement { argument: None }));
                assert_eq!(body.len(), 2);
            }
            other => panic!("Expected block, got {:?}", other),
        },
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_postfix_does_not_cross_lines() {
    // Should be: a; ++b;
    let statements = body("a\n++b");
    assert_eq!(statements.len(), 2);
    match &statements[1].kind {
        NodeKind::ExpressionStatement { expression } => assert!(matches!(
            expression.kind,
            NodeKind::UpdateExpression { prefix: true, .. }
        )),
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

// ============================================================================
// Locations
// ============================================================================

#[test]
fn test_locations_span_tokens() {
    let statements = body("var x = 1;\n  foo(x);");
    assert_eq!(statements[0].loc.start(), Position::new(1, 0));
    assert_eq!(statements[0].loc.end(), Position::new(1, 10));
    assert_eq!(statements[1].loc.start(), Position::new(2, 2));
    assert_eq!(statements[1].loc.end(), Position::new(2, 9));
}

#[test]
fn test_comments_are_ignored_by_parser() {
    assert_eq!(
        statement_types("// leading\nvar a = /* inline */ 1; // trailing"),
        vec![NodeType::VariableDefinitionList]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unexpected_token() {
    let err = parse_source("var = 1;").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            found: "'='".to_string(),
            expected: "variable name".to_string(),
            position: Position::new(1, 4),
        }
    );
    assert_eq!(
        err.to_string(),
        "Unexpected token '=' at (1:4), expected variable name"
    );
}

#[test]
fn test_unexpected_end() {
    let err = parse_source("f(1, 2").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEnd { .. }));
}

#[test]
fn test_unclosed_block() {
    assert!(matches!(
        parse_source("function f() { a;").unwrap_err(),
        ParseError::UnexpectedEnd { .. }
    ));
}

#[test]
fn test_invalid_assignment_target() {
    let test_cases = vec!["1 = 2;", "f() = 1;", "++1;", "(a + b)++;"];
    for input in test_cases {
        assert!(
            matches!(parse_source(input), Err(ParseError::InvalidAssignmentTarget { .. })),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_try_needs_handler() {
    assert!(matches!(
        parse_source("try { a; }").unwrap_err(),
        ParseError::MissingCatchOrFinally { .. }
    ));
}

#[test]
fn test_trailing_dot_number() {
    assert!(matches!(
        expression("5.;").kind,
        NodeKind::Literal { value: LiteralValue::Number(n) } if n == 5.0
    ));
    assert_eq!(statement_types("var x = 5.;"), vec![NodeType::VariableDefinitionList]);
    assert!(matches!(
        expression("5..toString();").kind,
        NodeKind::CallExpression { .. }
    ));
}

// ============================================================================
// Nesting limits
// ============================================================================

#[test]
fn test_deep_nesting_is_an_error() {
    let test_cases = vec![
        format!("{}1{};", "(".repeat(10_000), ")".repeat(10_000)),
        format!("{}b;", "if (a) ".repeat(20_000)),
        format!("{}{}", "{".repeat(5_000), "}".repeat(5_000)),
        format!("{}a;", "!".repeat(5_000)),
        format!("{}f;", "new ".repeat(5_000)),
        format!("{}1;", "a = ".repeat(5_000)),
    ];
    for input in &test_cases {
        assert!(
            matches!(parse_source(input), Err(ParseError::NestingTooDeep { .. })),
            "Failed for input: {}...",
            &input[..20]
        );
    }
}

#[test]
fn test_long_chains_are_an_error() {
    let test_cases = vec![
        format!("{}1;", "1 + ".repeat(2_000)),
        format!("f{};", "()".repeat(2_000)),
        format!("a{};", ".b".repeat(2_000)),
    ];
    for input in &test_cases {
        assert!(
            matches!(parse_source(input), Err(ParseError::NestingTooDeep { .. })),
            "Failed for input: {}...",
            &input[..20]
        );
    }
}

#[test]
fn test_moderate_nesting_parses() {
    let test_cases = vec![
        format!("{}1{};", "(".repeat(30), ")".repeat(30)),
        format!("{}b;", "if (a) ".repeat(30)),
        format!("{}1;", "1 + ".repeat(200)),
        format!("a{};", ".b".repeat(200)),
    ];
    for input in &test_cases {
        assert!(parse_source(input).is_ok(), "Failed for input: {}...", &input[..20]);
    }
}

#[test]
fn test_height_counts_levels() {
    let root = parse_source("a;").unwrap();
    // Program > ExpressionStatement > Identifier
    assert_eq!(root.height(), 3);
    assert_eq!(expression("1 + 2 * 3;").height(), 3);
    assert_eq!(expression("x;").height(), 1);
}
