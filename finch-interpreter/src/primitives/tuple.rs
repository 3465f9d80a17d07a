use std::convert::TryFrom;
use std::rc::Rc;

use crate::error::Exception;
use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Tuple** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("field", self::field, "Int", "Dynamic"),
    ("count", self::count, "Nothing", "Int"),
    ("string", self::string, "Nothing", "String"),
];

fn field(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Tuple field";

    expect_args!(SIGNATURE, args, [
        Value::Tuple(fields) => fields,
        _,
        Value::Integer(index) => index,
    ]);

    let value = usize::try_from(index)
        .ok()
        .and_then(|index| fields.get(index).cloned());
    match value {
        Some(value) => Return::Local(value),
        None => Return::Exception(Exception::Runtime(format!(
            "'{}': index {} is out of bounds for a tuple of {} field(s)",
            SIGNATURE,
            index,
            fields.len()
        ))),
    }
}

fn count(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Tuple count";

    expect_args!(SIGNATURE, args, [
        Value::Tuple(fields) => fields,
    ]);

    match i64::try_from(fields.len()) {
        Ok(count) => Return::Local(Value::Integer(count)),
        Err(err) => Return::Exception(Exception::Runtime(format!("'{}': {}", SIGNATURE, err))),
    }
}

fn string(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Tuple string";

    expect_args!(SIGNATURE, args, [
        value @ Value::Tuple(_) => value,
    ]);

    Return::Local(Value::String(Rc::new(value.to_string())))
}
