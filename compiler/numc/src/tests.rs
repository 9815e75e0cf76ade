use pretty_assertions::assert_eq;

use super::*;

fn checked(source: &str, ctx: &EvaluationContext<i64>) -> Result<Evaluator<i64>, Error> {
    compile_checked("checked", source, Backend::default(), &ParseOptions::default(), ctx)
}

fn validation_message(result: Result<Evaluator<i64>, Error>) -> Option<String> {
    match result {
        Err(Error::Parse(ParseError::Validation { message, .. })) => Some(message),
        _ => None,
    }
}

#[test]
fn unknown_names_are_rejected_while_parsing() {
    let mut ctx = EvaluationContext::new();
    ctx.set_variable("x", 1);

    assert!(checked("x + abs(x)", &ctx).is_ok());

    let err = checked("x + y", &ctx).err();
    assert_eq!(
        err,
        Some(Error::Parse(ParseError::Validation {
            message: "unknown variable `y`".to_owned(),
            span: Span::new(4, 5),
        }))
    );

    assert_eq!(
        validation_message(checked("frob(x)", &ctx)).as_deref(),
        Some("unknown function `frob`")
    );
}

#[test]
fn call_arity_is_checked_against_the_declaration() {
    let ctx = EvaluationContext::new();
    assert_eq!(
        validation_message(checked("clamp(1, 2)", &ctx)).as_deref(),
        Some("function `clamp` takes exactly 3 argument(s) but 2 were supplied")
    );
}

#[test]
fn compile_errors_are_wrapped() {
    let err = compile_expression::<f64>("bad", "1 ^ 2", Backend::Staged).err();
    assert_eq!(
        err,
        Some(Error::Compile(CompileError::IllegalOperator {
            op: OperatorType::Xor,
            ty: NumKind::F64,
        }))
    );
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

fn tree(source: &str) -> Node<i64> {
    parse(source, &ParseOptions::default(), &NoValidation).unwrap()
}

#[test]
fn references_are_checked_without_evaluating() {
    let mut ctx = EvaluationContext::<i64>::new();
    ctx.set_variable("x", 1);

    assert_eq!(check_references(&tree("clamp(x, 0, 10) + x / 0"), &ctx), Ok(()));
    assert_eq!(
        check_references(&tree("max(x, y) + z"), &ctx),
        Err(EvalError::UnknownVariable(Name::new("y")))
    );
    assert!(matches!(
        check_references(&tree("abs(x, x)"), &ctx),
        Err(EvalError::Arity { got: 2, .. })
    ));
    assert_eq!(
        check_references(&tree("f(x)"), &ctx),
        Err(EvalError::UnknownFunction(Name::new("f")))
    );
}
