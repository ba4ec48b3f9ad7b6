use std::sync::Arc;

use super::{
    interpreter,
    assert_evaluation,
    Error,
};

#[test]
fn eval() {
    let mut interpreter = interpreter();
    assert_evaluation(&mut interpreter, &["5", "4", "3", "2"], &["5", "4", "3", "2"]);
    assert_evaluation(&mut interpreter, &["20"], &["undo", "undo", "*"]);
    assert_evaluation(&mut interpreter, &["100"], &["5", "*"]);
    assert_evaluation(&mut interpreter, &["20", "5"], &["undo"]);
}

#[test]
fn eval_restores_nested_operands() {
    let mut interpreter = interpreter();
    assert_evaluation(&mut interpreter, &["11"], &["1", "2", "3", "*", "5", "+", "*"]);
    assert_evaluation(&mut interpreter, &["1", "11"], &["undo"]);
    assert_evaluation(&mut interpreter, &["1", "6", "5"], &["undo"]);
    assert_evaluation(&mut interpreter, &["1", "6"], &["undo"]);
    assert_evaluation(&mut interpreter, &["1", "2", "3"], &["undo"]);
    assert_eq!(interpreter.weight(), 3);
}

#[test]
fn eval_unary() {
    let mut interpreter = interpreter();
    assert_evaluation(&mut interpreter, &["3"], &["9", "sqrt"]);
    assert_evaluation(&mut interpreter, &["9"], &["undo"]);
    assert_evaluation(&mut interpreter, &[], &["undo"]);
}

#[test]
fn eval_keeps_children_and_their_memo() {
    let mut interpreter = interpreter();
    assert_eq!(interpreter.accept_many(&["2", "sqrt", "3", "*"]), Ok(()));
    let product = interpreter.roots().pop().unwrap();
    let children = product.undo();
    assert_eq!(interpreter.depth(), 1);

    interpreter.evaluate();
    assert!(children.iter().all(|child| child.is_resolved()));

    assert_eq!(interpreter.accept("undo"), Ok(()));
    let restored = interpreter.roots();
    assert_eq!(restored.len(), 2);
    assert!(Arc::ptr_eq(&restored[0], &children[0]));
    assert!(Arc::ptr_eq(&restored[1], &children[1]));
    assert!(restored.iter().all(|cell| cell.is_resolved()));
}

#[test]
fn eval_on_empty_stack() {
    let mut interpreter = interpreter();
    assert_eq!(
        interpreter.accept("undo"),
        Err(Error::InsufficientOperands { operator: "undo".to_string(), position: 1, }),
    );
}
