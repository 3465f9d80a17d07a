use std::rc::Rc;

use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Bool** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("not", self::not, "Nothing", "Bool"),
    ("string", self::string, "Nothing", "String"),
    ("true?", self::is_true, "Nothing", "Bool"),
    ("==", self::eq, "Bool", "Bool"),
];

fn not(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Bool not";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(value) => value,
    ]);

    Return::Local(Value::Boolean(!value))
}

fn string(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Bool string";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(value) => value,
    ]);

    Return::Local(Value::String(Rc::new(value.to_string())))
}

fn is_true(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Bool true?";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(value) => value,
    ]);

    Return::Local(Value::Boolean(value))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Bool ==";

    expect_args!(SIGNATURE, args, [
        Value::Boolean(a) => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(matches!(b, Value::Boolean(other) if a == other)))
}
