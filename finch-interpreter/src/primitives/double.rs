use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::error::Exception;
use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Double** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("+", self::plus, "Double", "Double"),
    ("-", self::minus, "Double", "Double"),
    ("*", self::times, "Double", "Double"),
    ("/", self::divide, "Double", "Double"),
    ("==", self::eq, "Double", "Bool"),
    ("!=", self::neq, "Double", "Bool"),
    ("<", self::lt, "Double", "Bool"),
    (">", self::gt, "Double", "Bool"),
    ("<=", self::lte, "Double", "Bool"),
    (">=", self::gte, "Double", "Bool"),
    ("string", self::string, "Nothing", "String"),
    ("true?", self::is_true, "Nothing", "Bool"),
];

macro_rules! promote {
    ($signature:expr, $value:expr) => {
        match $value {
            Value::Integer(value) => value as f64,
            Value::BigInteger(value) => match value.to_f64() {
                Some(value) => value,
                None => {
                    return Return::Exception(Exception::Runtime(format!(
                        "'{}': `Int` too big to be converted to `Double`",
                        $signature
                    )))
                }
            },
            Value::Double(value) => value,
            _ => {
                return Return::Exception(Exception::representation(
                    $signature,
                    "an Int or a Double",
                ))
            }
        }
    };
}

macro_rules! binary {
    ($name:ident, $signature:expr, |$a:ident, $b:ident| $body:expr) => {
        fn $name(_: &mut Universe, args: Vec<Value>) -> Return {
            const SIGNATURE: &str = $signature;

            expect_args!(SIGNATURE, args, [
                a => a,
                _,
                b => b,
            ]);

            let $a = promote!(SIGNATURE, a);
            let $b = promote!(SIGNATURE, b);

            Return::Local($body)
        }
    };
}

binary!(plus, "Double +", |a, b| Value::Double(a + b));
binary!(minus, "Double -", |a, b| Value::Double(a - b));
binary!(times, "Double *", |a, b| Value::Double(a * b));
binary!(divide, "Double /", |a, b| Value::Double(a / b));
binary!(lt, "Double <", |a, b| Value::Boolean(a < b));
binary!(gt, "Double >", |a, b| Value::Boolean(a > b));
binary!(lte, "Double <=", |a, b| Value::Boolean(a <= b));
binary!(gte, "Double >=", |a, b| Value::Boolean(a >= b));

fn eq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Double ==";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(a == b))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Double !=";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(a != b))
}

fn string(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Double string";

    expect_args!(SIGNATURE, args, [
        value @ Value::Double(_) => value,
    ]);

    Return::Local(Value::String(Rc::new(value.to_string())))
}

fn is_true(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Double true?";

    expect_args!(SIGNATURE, args, [
        Value::Double(value) => value,
    ]);

    Return::Local(Value::Boolean(value != 0.0))
}
