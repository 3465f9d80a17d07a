use crate::error::Exception;
use crate::evaluate::Evaluate;
use crate::function::Function;
use crate::method::{Method, MethodKind};
use crate::scope::{Context, Scope};
use crate::universe::Universe;
use crate::value::Value;

/// Represents the kinds of possible returns from an evaluation or an invocation.
#[derive(Debug)]
pub enum Return {
    /// A local return, the value is for the immediate caller.
    Local(Value),
    /// An early return, unwinding up to the closest function invocation.
    Early(Value),
    /// An exception, expected to bubble all the way up.
    Exception(Exception),
}

/// The trait for invoking methods and functions.
pub trait Invoke {
    /// Invoke within the given universe, for the given receiver and with the given arguments.
    ///
    /// A missing argument is passed as **nothing**.
    fn invoke(&self, universe: &mut Universe, receiver: Value, static_arg: Value, arg: Value)
        -> Return;
}

impl Invoke for Method {
    fn invoke(
        &self,
        universe: &mut Universe,
        receiver: Value,
        static_arg: Value,
        arg: Value,
    ) -> Return {
        match self.kind() {
            MethodKind::Defined(function) => function.invoke(universe, receiver, static_arg, arg),
            MethodKind::Primitive(func) => func(universe, vec![receiver, static_arg, arg]),
            MethodKind::FieldGetter(field) => match receiver {
                Value::Instance(instance) => Return::Local(instance.borrow().get_field(field)),
                _ => Return::Exception(Exception::representation(self.signature(), "an instance")),
            },
            MethodKind::FieldSetter(field) => match receiver {
                Value::Instance(instance) => {
                    instance.borrow_mut().set_field(field.as_str(), arg.clone());
                    Return::Local(arg)
                }
                _ => Return::Exception(Exception::representation(self.signature(), "an instance")),
            },
        }
    }
}

impl Invoke for Function {
    fn invoke(
        &self,
        universe: &mut Universe,
        receiver: Value,
        static_arg: Value,
        arg: Value,
    ) -> Return {
        let context = Context::new(Scope::nested(&self.context.scope), receiver);
        {
            let mut scope = context.scope.borrow_mut();
            let params = &self.function.params;
            bind_parameters(&mut scope, &params.static_params, static_arg);
            bind_parameters(&mut scope, &params.names, arg);
        }

        match self.function.body.evaluate(universe, &context) {
            Return::Early(value) if !self.is_thunk() => Return::Local(value),
            output => output,
        }
    }
}

/// Binds an argument to a list of parameter names.
///
/// Never fails on a shape mismatch:
/// - a single name gets the whole argument, whatever its shape.
/// - several names destructure a tuple field by field, names past its end get **nothing**.
/// - several names given a non-tuple: the first name gets the whole argument, every other one gets **nothing**.
pub fn bind_parameters(scope: &mut Scope, names: &[String], arg: Value) {
    match (names, arg) {
        ([], _) => {}
        ([name], arg) => scope.define(name.as_str(), arg),
        (names, Value::Tuple(fields)) => {
            for (index, name) in names.iter().enumerate() {
                let value = fields.get(index).cloned().unwrap_or(Value::Nothing);
                scope.define(name.as_str(), value);
            }
        }
        ([first, rest @ ..], arg) => {
            scope.define(first.as_str(), arg);
            for name in rest {
                scope.define(name.as_str(), Value::Nothing);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn tuple(fields: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(fields))
    }

    #[test]
    fn no_names_binds_nothing() {
        let mut scope = Scope::default();
        bind_parameters(&mut scope, &[], Value::Integer(1));
        assert!(scope.bindings.is_empty());
    }

    #[test]
    fn single_name_binds_whole_argument() {
        let mut scope = Scope::default();
        let arg = tuple(vec![Value::Integer(1), Value::Integer(2)]);
        bind_parameters(&mut scope, &names(&["a"]), arg.clone());
        assert_eq!(scope.lookup("a"), Some(arg));
    }

    #[test]
    fn names_destructure_tuples() {
        let mut scope = Scope::default();
        let arg = tuple(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        bind_parameters(&mut scope, &names(&["a", "b"]), arg);
        assert_eq!(scope.lookup("a"), Some(Value::Integer(1)));
        assert_eq!(scope.lookup("b"), Some(Value::Integer(2)));
        assert_eq!(scope.bindings.len(), 2);
    }

    #[test]
    fn short_tuples_are_padded() {
        let mut scope = Scope::default();
        bind_parameters(&mut scope, &names(&["a", "b"]), tuple(vec![Value::Integer(1)]));
        assert_eq!(scope.lookup("a"), Some(Value::Integer(1)));
        assert_eq!(scope.lookup("b"), Some(Value::Nothing));
    }

    #[test]
    fn non_tuple_fills_every_other_name() {
        let mut scope = Scope::default();
        bind_parameters(&mut scope, &names(&["a", "b", "c"]), Value::Integer(7));
        assert_eq!(scope.lookup("a"), Some(Value::Integer(7)));
        assert_eq!(scope.lookup("b"), Some(Value::Nothing));
        assert_eq!(scope.lookup("c"), Some(Value::Nothing));
    }
}
