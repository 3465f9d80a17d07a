use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::class::{self as classes, Class};
use crate::error::Exception;
use crate::evaluate::Evaluate;
use crate::expect_args;
use crate::instance::Instance;
use crate::invokable::{Invoke, Return};
use crate::method::Method;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;
use crate::FinchRef;

/// The primitives of the **Class** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[
    ("name", self::name, "Nothing", "String"),
    ("parent", self::parent, "Nothing", "Class"),
    ("parent=", self::set_parent, "Class", "Class"),
    ("addMethod", self::add_method, "Dynamic", "Nothing"),
    ("addSharedMethod", self::add_shared_method, "Dynamic", "Nothing"),
];

/// Install the `new` primitive into the metaclass of the given class.
pub fn install_constructor(class: &FinchRef<Class>) {
    let class = class.borrow();
    if let Some(metaclass) = class.metaclass() {
        let method = Method::primitive("new", self::new, "Dynamic", class.name());
        metaclass.borrow_mut().add_method(method);
    }
}

fn name(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class name";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
    ]);

    let name = class.borrow().name().to_string();
    Return::Local(Value::String(Rc::new(name)))
}

fn parent(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class parent";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
    ]);

    let parent = class.borrow().parent();
    Return::Local(Value::Class(
        parent.unwrap_or_else(|| universe.object_class()),
    ))
}

fn set_parent(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class parent=";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
        _,
        value => value,
    ]);

    let parent = match value {
        Value::Class(parent) => parent,
        value => {
            let target = class.borrow().name().to_string();
            universe.runtime_error(format_args!(
                "cannot make '{}' the parent of '{}': it is not a class",
                value, target,
            ));
            return Return::Local(Value::Nothing);
        }
    };

    if classes::inherits_from(&parent, &class) {
        let target = class.borrow().name().to_string();
        let name = parent.borrow().name().to_string();
        universe.runtime_error(format_args!(
            "cannot make '{}' the parent of '{}': it would become its own ancestor",
            name, target,
        ));
        return Return::Local(Value::Nothing);
    }

    class.borrow_mut().set_parent(parent.clone());
    Return::Local(Value::Class(parent))
}

/// Read an `(name, function)` tuple, into a method ready to be installed.
fn method_from_args(signature: &str, arg: &Value) -> Result<Method, Return> {
    match (arg.tuple_field(0), arg.tuple_field(1)) {
        (Some(Value::String(name)), Some(Value::Function(function))) => {
            Ok(Method::defined(name.as_str(), function))
        }
        _ => Err(Return::Exception(Exception::representation(
            signature,
            "a (String, Function) tuple",
        ))),
    }
}

fn add_method(_: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class addMethod";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
        _,
        arg => arg,
    ]);

    match method_from_args(SIGNATURE, &arg) {
        Ok(method) => class.borrow_mut().add_method(method),
        Err(ret) => return ret,
    }
    Return::Local(Value::Nothing)
}

fn add_shared_method(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class addSharedMethod";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
        _,
        arg => arg,
    ]);

    let method = match method_from_args(SIGNATURE, &arg) {
        Ok(method) => method,
        Err(ret) => return ret,
    };
    let metaclass = class.borrow().metaclass();
    match metaclass {
        Some(metaclass) => metaclass.borrow_mut().add_method(method),
        None => {
            let name = class.borrow().name().to_string();
            universe.runtime_error(format_args!(
                "cannot add a shared method to '{}': it has no metaclass",
                name,
            ));
        }
    }
    Return::Local(Value::Nothing)
}

/// Allocates the object, runs the field initializers, then the constructor.
fn new(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Class new";

    expect_args!(SIGNATURE, args, [
        Value::Class(class) => class,
        _,
        arg => arg,
    ]);

    debug!("constructing a '{}'", class.borrow().name());
    let instance = Rc::new(RefCell::new(Instance::from_class(class.clone())));

    let initializers: Vec<_> = class
        .borrow()
        .fields
        .iter()
        .map(|(name, initializer)| (name.clone(), initializer.clone()))
        .collect();
    for (name, initializer) in initializers {
        // Each initializer only sees the globals, never the scope `new` was sent from nor its siblings.
        let context = universe.top_level_context();
        let value = match initializer.evaluate(universe, &context) {
            Return::Local(value) | Return::Early(value) => value,
            exception => return exception,
        };
        instance.borrow_mut().set_field(name, value);
    }

    let instance = Value::Instance(instance);
    let constructor = class.borrow().constructor();
    if let Some(constructor) = constructor {
        if let exception @ Return::Exception(_) =
            constructor.invoke(universe, instance.clone(), Value::Nothing, arg)
        {
            return exception;
        }
    }

    Return::Local(instance)
}
