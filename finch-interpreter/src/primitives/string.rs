use std::convert::TryFrom;
use std::rc::Rc;

use crate::error::Exception;
use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **String** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("+", self::plus, "String", "String"),
    ("print", self::print, "Nothing", "Nothing"),
    ("string", self::string, "Nothing", "String"),
    ("count", self::count, "Nothing", "Int"),
    ("true?", self::is_true, "Nothing", "Bool"),
    ("==", self::eq, "String", "Bool"),
];

fn plus(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String +";

    expect_args!(SIGNATURE, args, [
        Value::String(a) => a,
        _,
        Value::String(b) => b,
    ]);

    let mut output = String::with_capacity(a.len() + b.len());
    output.push_str(a.as_str());
    output.push_str(b.as_str());

    Return::Local(Value::String(Rc::new(output)))
}

fn print(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String print";

    expect_args!(SIGNATURE, args, [
        Value::String(string) => string,
    ]);

    universe.print(string.as_str());
    Return::Local(Value::Nothing)
}

fn string(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String string";

    expect_args!(SIGNATURE, args, [
        value @ Value::String(_) => value,
    ]);

    Return::Local(value)
}

fn count(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String count";

    expect_args!(SIGNATURE, args, [
        Value::String(string) => string,
    ]);

    match i64::try_from(string.chars().count()) {
        Ok(count) => Return::Local(Value::Integer(count)),
        Err(err) => Return::Exception(Exception::Runtime(format!("'{}': {}", SIGNATURE, err))),
    }
}

fn is_true(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String true?";

    expect_args!(SIGNATURE, args, [
        Value::String(string) => string,
    ]);

    Return::Local(Value::Boolean(!string.is_empty()))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "String ==";

    expect_args!(SIGNATURE, args, [
        Value::String(a) => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(matches!(b, Value::String(other) if a == other)))
}
