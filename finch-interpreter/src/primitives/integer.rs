use std::cmp::Ordering;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use rand::distributions::Uniform;
use rand::Rng;

use crate::error::Exception;
use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Int** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("+", self::plus, "Int", "Int"),
    ("-", self::minus, "Int", "Int"),
    ("*", self::times, "Int", "Int"),
    ("/", self::divide, "Int", "Int"),
    ("%", self::modulo, "Int", "Int"),
    ("==", self::eq, "Int", "Bool"),
    ("!=", self::neq, "Int", "Bool"),
    ("<", self::lt, "Int", "Bool"),
    (">", self::gt, "Int", "Bool"),
    ("<=", self::lte, "Int", "Bool"),
    (">=", self::gte, "Int", "Bool"),
    ("string", self::string, "Nothing", "String"),
    ("true?", self::is_true, "Nothing", "Bool"),
    ("random", self::random, "Nothing", "Int"),
];

macro_rules! demote {
    ($expr:expr) => {{
        let value = $expr;
        match value.to_i64() {
            Some(value) => Return::Local(Value::Integer(value)),
            None => Return::Local(Value::BigInteger(value)),
        }
    }};
}

fn too_big(signature: &str) -> Return {
    Return::Exception(Exception::Runtime(format!(
        "'{}': `Int` too big to be converted to `Double`",
        signature
    )))
}

fn plus(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int +";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => match a.checked_add(b) {
            Some(value) => Return::Local(Value::Integer(value)),
            None => demote!(BigInt::from(a) + BigInt::from(b)),
        },
        (Value::BigInteger(a), Value::BigInteger(b)) => demote!(a + b),
        (Value::BigInteger(a), Value::Integer(b)) | (Value::Integer(b), Value::BigInteger(a)) => {
            demote!(a + BigInt::from(b))
        }
        (Value::Integer(a), Value::Double(b)) => Return::Local(Value::Double((a as f64) + b)),
        (Value::BigInteger(a), Value::Double(b)) => match a.to_f64() {
            Some(a) => Return::Local(Value::Double(a + b)),
            None => too_big(SIGNATURE),
        },
        _ => Return::Exception(Exception::representation(SIGNATURE, "two numbers")),
    }
}

fn minus(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int -";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => match a.checked_sub(b) {
            Some(value) => Return::Local(Value::Integer(value)),
            None => demote!(BigInt::from(a) - BigInt::from(b)),
        },
        (Value::BigInteger(a), Value::BigInteger(b)) => demote!(a - b),
        (Value::BigInteger(a), Value::Integer(b)) => demote!(a - BigInt::from(b)),
        (Value::Integer(a), Value::BigInteger(b)) => demote!(BigInt::from(a) - b),
        (Value::Integer(a), Value::Double(b)) => Return::Local(Value::Double((a as f64) - b)),
        (Value::BigInteger(a), Value::Double(b)) => match a.to_f64() {
            Some(a) => Return::Local(Value::Double(a - b)),
            None => too_big(SIGNATURE),
        },
        _ => Return::Exception(Exception::representation(SIGNATURE, "two numbers")),
    }
}

fn times(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int *";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => match a.checked_mul(b) {
            Some(value) => Return::Local(Value::Integer(value)),
            None => demote!(BigInt::from(a) * BigInt::from(b)),
        },
        (Value::BigInteger(a), Value::BigInteger(b)) => demote!(a * b),
        (Value::BigInteger(a), Value::Integer(b)) | (Value::Integer(b), Value::BigInteger(a)) => {
            demote!(a * BigInt::from(b))
        }
        (Value::Integer(a), Value::Double(b)) => Return::Local(Value::Double((a as f64) * b)),
        (Value::BigInteger(a), Value::Double(b)) => match a.to_f64() {
            Some(a) => Return::Local(Value::Double(a * b)),
            None => too_big(SIGNATURE),
        },
        _ => Return::Exception(Exception::representation(SIGNATURE, "two numbers")),
    }
}

fn divide(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int /";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    match (a, b) {
        (Value::Integer(_), Value::Integer(0)) | (Value::BigInteger(_), Value::Integer(0)) => {
            Return::Exception(Exception::DivisionByZero {
                signature: SIGNATURE.to_string(),
            })
        }
        (Value::Integer(a), Value::Integer(b)) => match a.checked_div(b) {
            Some(value) => Return::Local(Value::Integer(value)),
            None => demote!(BigInt::from(a) / BigInt::from(b)),
        },
        (Value::BigInteger(a), Value::BigInteger(b)) => demote!(a / b),
        (Value::BigInteger(a), Value::Integer(b)) => demote!(a / BigInt::from(b)),
        (Value::Integer(a), Value::BigInteger(b)) => demote!(BigInt::from(a) / b),
        (Value::Integer(a), Value::Double(b)) => Return::Local(Value::Double((a as f64) / b)),
        (Value::BigInteger(a), Value::Double(b)) => match a.to_f64() {
            Some(a) => Return::Local(Value::Double(a / b)),
            None => too_big(SIGNATURE),
        },
        _ => Return::Exception(Exception::representation(SIGNATURE, "two numbers")),
    }
}

fn modulo(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int %";

    expect_args!(SIGNATURE, args, [
        Value::Integer(a) => a,
        _,
        Value::Integer(b) => b,
    ]);

    if b == 0 {
        return Return::Exception(Exception::DivisionByZero {
            signature: SIGNATURE.to_string(),
        });
    }

    let result = a.wrapping_rem(b);
    if result != 0 && result.signum() != b.signum() {
        Return::Local(Value::Integer(result + b))
    } else {
        Return::Local(Value::Integer(result))
    }
}

/// Compare two numbers, `None` if either one is not a number (or is NaN).
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::BigInteger(a), Value::BigInteger(b)) => Some(a.cmp(b)),
        (Value::BigInteger(a), Value::Integer(b)) => Some(a.cmp(&BigInt::from(*b))),
        (Value::Integer(a), Value::BigInteger(b)) => Some(BigInt::from(*a).cmp(b)),
        (Value::Integer(a), Value::Double(b)) => (*a as f64).partial_cmp(b),
        (Value::BigInteger(a), Value::Double(b)) => a.to_f64()?.partial_cmp(b),
        _ => None,
    }
}

fn ordering(signature: &str, args: Vec<Value>, accept: fn(Ordering) -> bool) -> Return {
    expect_args!(signature, args, [
        a => a,
        _,
        b => b,
    ]);

    match compare(&a, &b) {
        Some(ordering) => Return::Local(Value::Boolean(accept(ordering))),
        None => Return::Exception(Exception::representation(signature, "two numbers")),
    }
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int ==";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(compare(&a, &b) == Some(Ordering::Equal)))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int !=";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(compare(&a, &b) != Some(Ordering::Equal)))
}

fn lt(_: &mut Universe, args: Vec<Value>) -> Return {
    ordering("Int <", args, |ordering| ordering == Ordering::Less)
}

fn gt(_: &mut Universe, args: Vec<Value>) -> Return {
    ordering("Int >", args, |ordering| ordering == Ordering::Greater)
}

fn lte(_: &mut Universe, args: Vec<Value>) -> Return {
    ordering("Int <=", args, |ordering| ordering != Ordering::Greater)
}

fn gte(_: &mut Universe, args: Vec<Value>) -> Return {
    ordering("Int >=", args, |ordering| ordering != Ordering::Less)
}

fn string(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int string";

    expect_args!(SIGNATURE, args, [
        value => value,
    ]);

    let value = match value {
        Value::Integer(value) => value.to_string(),
        Value::BigInteger(value) => value.to_string(),
        _ => return Return::Exception(Exception::representation(SIGNATURE, "an Int")),
    };

    Return::Local(Value::String(Rc::new(value)))
}

fn is_true(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int true?";

    expect_args!(SIGNATURE, args, [
        value => value,
    ]);

    match value {
        Value::Integer(value) => Return::Local(Value::Boolean(value != 0)),
        Value::BigInteger(value) => Return::Local(Value::Boolean(!value.is_zero())),
        _ => Return::Exception(Exception::representation(SIGNATURE, "an Int")),
    }
}

fn random(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Int random";

    expect_args!(SIGNATURE, args, [
        value => value,
    ]);

    let chosen = match value {
        Value::Integer(value) if value > 0 => {
            let distribution = Uniform::new(0, value);
            let mut rng = rand::thread_rng();
            rng.sample(distribution)
        }
        Value::Integer(_) => {
            return Return::Exception(Exception::Runtime(format!(
                "'{}': the range to pick a random value from is empty",
                SIGNATURE,
            )))
        }
        Value::BigInteger(_) => {
            return Return::Exception(Exception::Runtime(format!(
                "'{}': the range is too big to pick a random value from",
                SIGNATURE,
            )))
        }
        _ => return Return::Exception(Exception::representation(SIGNATURE, "an Int")),
    };

    Return::Local(Value::Integer(chosen))
}
