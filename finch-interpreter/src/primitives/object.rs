use std::rc::Rc;

use crate::error::Exception;
use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Object** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("class", self::class, "Nothing", "Class"),
    ("is?", self::is, "Class", "Bool"),
    ("sameAs?", self::same_as, "Dynamic", "Bool"),
    ("==", self::eq, "Dynamic", "Bool"),
    ("!=", self::neq, "Dynamic", "Bool"),
    ("string", self::string, "Nothing", "String"),
    ("true?", self::is_true, "Nothing", "Bool"),
    ("__if", self::conditional, "Dynamic", "Dynamic"),
];

fn class(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object class";

    expect_args!(SIGNATURE, args, [
        object => object,
    ]);

    Return::Local(Value::Class(object.class(universe)))
}

fn is(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object is?";

    expect_args!(SIGNATURE, args, [
        object => object,
        _,
        Value::Class(target) => target,
    ]);

    let class = object.class(universe);
    Return::Local(Value::Boolean(universe.is_subclass_of(&class, &target)))
}

fn same_as(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object sameAs?";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(a.is_same(&b)))
}

fn eq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object ==";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(a == b))
}

fn neq(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object !=";

    expect_args!(SIGNATURE, args, [
        a => a,
        _,
        b => b,
    ]);

    Return::Local(Value::Boolean(a != b))
}

fn string(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object string";

    expect_args!(SIGNATURE, args, [
        object => object,
    ]);

    let class = object.class(universe);
    let name = format!("<{}>", class.borrow().name());
    Return::Local(Value::String(Rc::new(name)))
}

fn is_true(_: &mut Universe, _: Vec<Value>) -> Return {
    Return::Local(Value::Boolean(true))
}

/// `__if((flag, then, else))`: calls one of the two branch functions, depending on the flag.
fn conditional(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Object __if";

    expect_args!(SIGNATURE, args, [
        _,
        _,
        Value::Tuple(fields) => fields,
    ]);

    let (flag, then_branch, else_branch) = match fields.as_slice() {
        [flag, Value::Function(then_branch), Value::Function(else_branch)] => {
            (flag, then_branch, else_branch)
        }
        _ => {
            return Return::Exception(Exception::representation(
                SIGNATURE,
                "a (flag, then, else) tuple",
            ))
        }
    };

    let branch = match universe.expect_condition(flag) {
        Ok(true) => then_branch,
        Ok(false) => else_branch,
        Err(ret) => return ret,
    };
    branch.call(universe, Value::Nothing, Value::Nothing)
}
