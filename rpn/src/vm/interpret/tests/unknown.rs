use super::{
    interpreter,
    assert_evaluation,
    Error,
};

#[test]
fn eval() {
    let mut interpreter = interpreter();
    assert_eq!(
        interpreter.accept(""),
        Err(Error::UnknownToken { token: "".to_string(), }),
    );
    assert_evaluation(&mut interpreter, &["100"], &["20", "5", "*"]);
    assert_evaluation(&mut interpreter, &["20", "5"], &["undo"]);
    assert_eq!(
        interpreter.accept("null"),
        Err(Error::UnknownToken { token: "null".to_string(), }),
    );
}

#[test]
fn eval_stops_batch() {
    let mut interpreter = interpreter();
    assert_eq!(
        interpreter.accept_many(&["5", "foo", "6"]),
        Err(Error::UnknownToken { token: "foo".to_string(), }),
    );
    assert_eq!(interpreter.depth(), 1);
    assert_evaluation(&mut interpreter, &["5"], &[]);
}
