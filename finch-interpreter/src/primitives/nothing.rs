use std::rc::Rc;

use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Nothing** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("string", self::string, "Nothing", "String"),
    ("true?", self::is_true, "Nothing", "Bool"),
];

fn string(_: &mut Universe, _: Vec<Value>) -> Return {
    Return::Local(Value::String(Rc::new(String::from("()"))))
}

fn is_true(_: &mut Universe, _: Vec<Value>) -> Return {
    Return::Local(Value::Boolean(false))
}
