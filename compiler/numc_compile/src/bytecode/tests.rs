use numc_eval::{Arity, EvalError, EvaluationContext};
use numc_ir::{Node, OperatorType};
use pretty_assertions::assert_eq;

use super::*;

fn var<T>(name: &str) -> Node<T> {
    Node::variable(name)
}

#[test]
fn disassembly_listing() {
    let tree: Node<i64> = Node::call(
        "max",
        vec![
            var("a"),
            Node::binary(OperatorType::Plus, var("b"), Node::literal(1)),
        ],
    );
    let program = assemble(&tree).unwrap();
    assert_eq!(
        program.to_string(),
        "; scratch 2, stack 2\n\
         0000  load a\n\
         0001  starg 0\n\
         0002  load b\n\
         0003  const 1\n\
         0004  add\n\
         0005  starg 1\n\
         0006  call max [0; 2]\n"
    );
}

#[test]
fn nested_calls_take_slots_after_their_position() {
    // f(1, g(2, h(3, 4)))
    let tree: Node<i32> = Node::call(
        "f",
        vec![
            Node::literal(1),
            Node::call(
                "g",
                vec![
                    Node::literal(2),
                    Node::call("h", vec![Node::literal(3), Node::literal(4)]),
                ],
            ),
        ],
    );
    let program = assemble(&tree).unwrap();
    // `h` runs at base 2 and needs slots 2 and 3.
    assert_eq!(program.scratch_size(), 4);
    assert!(program.instructions().contains(&Instruction::Call {
        name: NameId::new(2),
        base: 2,
        argc: 2,
    }));

    let mut ctx = EvaluationContext::new();
    ctx.set_function("f", Arity::exactly(2), |args: &[i32]| Ok(args[0] * 100 + args[1]));
    ctx.set_function("g", Arity::exactly(2), |args: &[i32]| Ok(args[0] * 10 + args[1]));
    ctx.set_function("h", Arity::exactly(2), |args: &[i32]| Ok(args[0] + args[1]));
    let evaluator = compile(Name::from("nested"), &tree).unwrap();
    assert_eq!(evaluator.evaluate(&ctx), Ok(100 + 27));
}

#[test]
fn zero_argument_call_gets_an_empty_view() {
    let tree: Node<u64> = Node::call("answer", vec![]);
    let program = assemble(&tree).unwrap();
    assert_eq!(program.scratch_size(), 0);

    let mut ctx = EvaluationContext::new();
    ctx.set_function("answer", Arity::exactly(0), |args: &[u64]| {
        assert!(args.is_empty());
        Ok(42)
    });
    assert_eq!(program.run(&ctx), Ok(42));
}

#[test]
fn names_are_pooled_once() {
    let tree: Node<i64> = Node::binary(
        OperatorType::Multiplication,
        var("x"),
        Node::binary(OperatorType::Plus, var("x"), var("y")),
    );
    let program = assemble(&tree).unwrap();
    let names: Vec<&str> = program.names().iter().map(|name| name.as_str()).collect();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(program.max_stack(), 3);
}

#[test]
fn comparison_lowering_depends_on_signedness() {
    let le = |a, b| Node::binary(OperatorType::LessThanOrEqualTo, Node::literal(a), Node::literal(b));

    let signed = assemble::<i32>(&le(1, 2)).unwrap();
    assert_eq!(
        &signed.instructions()[2..],
        &[Instruction::Cgt, Instruction::IsZero]
    );

    let unsigned = assemble::<u32>(&Node::binary(
        OperatorType::LessThan,
        Node::literal(1),
        Node::literal(2),
    ))
    .unwrap();
    assert_eq!(&unsigned.instructions()[2..], &[Instruction::CltUn]);

    let float = assemble::<f32>(&Node::binary(
        OperatorType::GreaterThanOrEqualTo,
        Node::literal(1.0),
        Node::literal(2.0),
    ))
    .unwrap();
    assert_eq!(
        &float.instructions()[2..],
        &[Instruction::CltUn, Instruction::IsZero]
    );
}

#[test]
fn nan_comparisons_are_false() {
    let ctx = EvaluationContext::<f64>::new();
    for op in [
        OperatorType::LessThan,
        OperatorType::LessThanOrEqualTo,
        OperatorType::GreaterThan,
        OperatorType::GreaterThanOrEqualTo,
        OperatorType::EqualTo,
    ] {
        let tree = Node::binary(op, var("nan"), Node::literal(1.0));
        let program = assemble(&tree).unwrap();
        assert_eq!(program.run(&ctx), Ok(0.0), "{op}");
    }
    let tree = Node::binary(OperatorType::NotEqualTo, var("nan"), var("nan"));
    assert_eq!(assemble(&tree).unwrap().run(&ctx), Ok(1.0));
}

#[test]
fn unsigned_shift_right_is_logical() {
    let tree: Node<u32> = Node::binary(
        OperatorType::RShift,
        Node::literal(0x8000_0000),
        Node::literal(31),
    );
    let program = assemble(&tree).unwrap();
    assert_eq!(program.instructions()[2], Instruction::ShrUn);
    assert_eq!(program.run(&EvaluationContext::new()), Ok(1));

    let tree: Node<i32> = Node::binary(OperatorType::RShift, Node::literal(-8), Node::literal(1));
    assert_eq!(assemble(&tree).unwrap().run(&EvaluationContext::new()), Ok(-4));
}

#[test]
fn errors_propagate_unchanged() {
    let ctx = EvaluationContext::<i64>::new();
    let tree = Node::binary(OperatorType::Modulo, Node::literal(1), Node::literal(0));
    assert_eq!(assemble(&tree).unwrap().run(&ctx), Err(EvalError::DivideByZero));

    let tree: Node<i64> = var("missing");
    assert_eq!(
        assemble(&tree).unwrap().run(&ctx),
        Err(EvalError::UnknownVariable(Name::from("missing")))
    );
}

#[test]
fn float_shift_fails_before_emission_completes() {
    let tree: Node<f64> = Node::binary(OperatorType::LShift, Node::literal(1.0), Node::literal(2.0));
    assert!(matches!(
        assemble(&tree),
        Err(CompileError::IllegalOperator {
            op: OperatorType::LShift,
            ..
        })
    ));
}
