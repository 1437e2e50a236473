use gcalc_ast::{AstNode, BinaryOperator, Constant, Function};
use gcalc_lexer::{normalize, tokenize};
use gcalc_parser::parse;
use proptest::prelude::*;

fn arb_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Sub),
        Just(BinaryOperator::Mul),
        Just(BinaryOperator::Div),
        Just(BinaryOperator::Pow),
    ]
}

fn arb_function() -> impl Strategy<Value = Function> {
    prop_oneof![
        Just(Function::Sin),
        Just(Function::Cos),
        Just(Function::Tan),
        Just(Function::Log),
        Just(Function::Ln),
        Just(Function::Sqrt),
    ]
}

fn arb_tree() -> impl Strategy<Value = AstNode> {
    let leaf = prop_oneof![
        (0u32..10_000).prop_map(|n| AstNode::number(n.to_string())),
        (0u32..1_000, 0u32..1_000).prop_map(|(i, f)| AstNode::number(format!("{i}.{f}"))),
        Just(AstNode::Constant(Constant::E)),
        Just(AstNode::Constant(Constant::Pi)),
        Just(AstNode::Variable),
    ];
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), arb_operator(), inner.clone())
                .prop_map(|(left, op, right)| AstNode::binary(left, op, right)),
            (arb_function(), inner).prop_map(|(function, arg)| AstNode::call(function, arg)),
        ]
    })
}

fn reparse(source: &str) -> AstNode {
    let tokens = normalize(&tokenize(source).expect("printed trees always lex"));
    parse(&tokens).expect("printed trees always parse")
}

proptest! {
    #[test]
    fn printed_tree_parses_back(tree in arb_tree()) {
        prop_assert_eq!(reparse(&tree.to_string()), tree);
    }

    #[test]
    fn wrapping_in_parentheses_is_transparent(tree in arb_tree()) {
        let source = tree.to_string();
        prop_assert_eq!(reparse(&format!("({source})")), reparse(&source));
    }
}
