use std::fmt;
use std::rc::Rc;

use log::{debug, error, trace};

use finch_core::ast::Block;
use finch_parser::ParseError;

use crate::class::{self, Class};
use crate::error::Exception;
use crate::evaluate::Evaluate;
use crate::invokable::{Invoke, Return};
use crate::method::Method;
use crate::primitives;
use crate::scope::{Context, Scope};
use crate::value::Value;
use crate::FinchRef;

/// The message sent to a value to know whether it counts as true.
pub const TRUTHINESS_MESSAGE: &str = finch_parser::conditional::TRUTHINESS_MESSAGE;

/// The interpreter's state: the top-level scope, the well-known classes and the host hooks.
pub struct Universe {
    /// The top-level scope (globals).
    pub globals: FinchRef<Scope>,

    /// The root class.
    pub object_class: FinchRef<Class>,
    /// The class of classes (parent of every metaclass).
    pub class_class: FinchRef<Class>,

    /// The class of **nothing**.
    pub nothing_class: FinchRef<Class>,
    /// The class of booleans.
    pub bool_class: FinchRef<Class>,
    /// The class of integers.
    pub int_class: FinchRef<Class>,
    /// The class of doubles.
    pub double_class: FinchRef<Class>,
    /// The class of strings.
    pub string_class: FinchRef<Class>,
    /// The class of tuples.
    pub tuple_class: FinchRef<Class>,
    /// The class of functions (closures).
    pub function_class: FinchRef<Class>,

    output: Box<dyn FnMut(&str)>,
    errors: Vec<String>,
}

impl Universe {
    /// Bootstrap a universe whose `print` writes to the standard output.
    pub fn new() -> Self {
        Self::with_output(|text| println!("{}", text))
    }

    /// Bootstrap a universe with the given output sink (called once per printed line).
    pub fn with_output(output: impl FnMut(&str) + 'static) -> Self {
        let object_class = Class::new("Object", None, None);
        let class_class = Class::new("Class", Some(object_class.clone()), None);
        for class in [&object_class, &class_class] {
            if let Some(metaclass) = class.borrow().metaclass() {
                metaclass.borrow_mut().set_parent(class_class.clone());
            }
        }

        let builtin = |name: &str| {
            Class::new(name, Some(object_class.clone()), Some(class_class.clone()))
        };
        let nothing_class = builtin("Nothing");
        let bool_class = builtin("Bool");
        let int_class = builtin("Int");
        let double_class = builtin("Double");
        let string_class = builtin("String");
        let tuple_class = builtin("Tuple");
        let function_class = builtin("Function");

        let mut universe = Self {
            globals: Scope::top_level(),
            object_class,
            class_class,
            nothing_class,
            bool_class,
            int_class,
            double_class,
            string_class,
            tuple_class,
            function_class,
            output: Box::new(output),
            errors: Vec::new(),
        };

        let classes = [
            universe.object_class(),
            universe.class_class(),
            universe.nothing_class(),
            universe.bool_class(),
            universe.int_class(),
            universe.double_class(),
            universe.string_class(),
            universe.tuple_class(),
            universe.function_class(),
        ];
        for class in classes.iter() {
            let name = class.borrow().name().to_string();
            if let Some(primitives) = primitives::get_instance_primitives(&name) {
                let mut class = class.borrow_mut();
                for (signature, primitive, param_type, return_type) in primitives {
                    class.add_method(Method::primitive(
                        *signature,
                        *primitive,
                        *param_type,
                        *return_type,
                    ));
                }
            }
            primitives::class::install_constructor(class);
            universe.define_global(name, Value::Class(class.clone()));
        }

        universe
    }

    /// Get the root class.
    pub fn object_class(&self) -> FinchRef<Class> {
        self.object_class.clone()
    }
    /// Get the class of classes.
    pub fn class_class(&self) -> FinchRef<Class> {
        self.class_class.clone()
    }

    /// Get the class of **nothing**.
    pub fn nothing_class(&self) -> FinchRef<Class> {
        self.nothing_class.clone()
    }
    /// Get the class of booleans.
    pub fn bool_class(&self) -> FinchRef<Class> {
        self.bool_class.clone()
    }
    /// Get the class of integers.
    pub fn int_class(&self) -> FinchRef<Class> {
        self.int_class.clone()
    }
    /// Get the class of doubles.
    pub fn double_class(&self) -> FinchRef<Class> {
        self.double_class.clone()
    }
    /// Get the class of strings.
    pub fn string_class(&self) -> FinchRef<Class> {
        self.string_class.clone()
    }
    /// Get the class of tuples.
    pub fn tuple_class(&self) -> FinchRef<Class> {
        self.tuple_class.clone()
    }
    /// Get the class of functions.
    pub fn function_class(&self) -> FinchRef<Class> {
        self.function_class.clone()
    }

    /// Get the context top-level code runs in (definitions land in the globals).
    pub fn global_context(&self) -> Context {
        Context::new(self.globals.clone(), Value::Nothing)
    }

    /// Create a fresh context rooted at the top-level scope, which sees nothing but the globals.
    pub fn top_level_context(&self) -> Context {
        Context::new(Scope::nested(&self.globals), Value::Nothing)
    }

    /// Search for a global binding.
    pub fn lookup_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().bindings.get(name).cloned()
    }

    /// Define (or redefine) a global binding.
    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().define(name, value);
    }

    /// Get the class declared under that global name, or create it (as a subclass of the root class).
    ///
    /// Reopening an existing class keeps its identity, so redefinitions reach existing instances.
    pub fn define_class(&mut self, name: &str) -> FinchRef<Class> {
        if let Some(Value::Class(class)) = self.lookup_global(name) {
            debug!("reopening class '{}'", name);
            return class;
        }

        let class = Class::new(name, Some(self.object_class()), Some(self.class_class()));
        primitives::class::install_constructor(&class);
        self.define_global(name, Value::Class(class.clone()));
        class
    }

    /// Search for a method, starting at `class` and walking up its parents.
    ///
    /// A chain that does not run into the root class falls back to it.
    pub fn lookup_method(&self, class: &FinchRef<Class>, signature: &str) -> Option<Rc<Method>> {
        class
            .borrow()
            .lookup_method(signature)
            .or_else(|| self.object_class.borrow().lookup_method(signature))
    }

    /// Whether `class` is `target` or one of its descendants.
    ///
    /// Every class is a descendant of the root class, even with no explicit parent.
    pub fn is_subclass_of(&self, class: &FinchRef<Class>, target: &FinchRef<Class>) -> bool {
        Rc::ptr_eq(target, &self.object_class) || class::inherits_from(class, target)
    }

    /// Send a message: look the method up in the receiver's class and invoke it.
    pub fn send(
        &mut self,
        receiver: Value,
        signature: &str,
        static_arg: Value,
        arg: Value,
    ) -> Return {
        let class = receiver.class(self);
        trace!("sending '{}' to a '{}'", signature, class.borrow().name());
        match self.lookup_method(&class, signature) {
            Some(method) => method.invoke(self, receiver, static_arg, arg),
            None => Return::Exception(Exception::NoSuchMethod {
                class: class.borrow().name().to_string(),
                name: signature.to_string(),
            }),
        }
    }

    /// Read a condition flag, as returned by the truthiness-test message.
    pub fn expect_condition(&self, value: &Value) -> Result<bool, Return> {
        match value {
            Value::Boolean(flag) => Ok(*flag),
            value => Err(Return::Exception(Exception::Runtime(format!(
                "'{}' should evaluate to a Bool, got '{}'",
                TRUTHINESS_MESSAGE, value
            )))),
        }
    }

    /// Send the truthiness-test message to a value and read the resulting flag.
    pub fn truthiness(&mut self, value: Value) -> Result<bool, Return> {
        match self.send(value, TRUTHINESS_MESSAGE, Value::Nothing, Value::Nothing) {
            Return::Local(flag) => self.expect_condition(&flag),
            output => Err(output),
        }
    }

    /// Report a recoverable runtime error.
    pub fn runtime_error(&mut self, args: fmt::Arguments<'_>) {
        let message = fmt::format(args);
        error!("{}", message);
        self.errors.push(message);
    }

    /// Get the runtime errors reported so far.
    pub fn reported_errors(&self) -> &[String] {
        self.errors.as_slice()
    }

    /// Write a line to the output sink.
    pub fn print(&mut self, text: &str) {
        (self.output)(text);
    }

    /// Run a whole program at the top level.
    ///
    /// An early return reaching the top level becomes the value of the program.
    pub fn run(&mut self, program: &Block) -> Return {
        let context = self.global_context();
        let mut output = Value::Nothing;
        for expr in program.exprs.iter() {
            output = match expr.evaluate(self, &context) {
                Return::Local(value) => value,
                Return::Early(value) => return Return::Local(value),
                exception => return exception,
            };
        }
        Return::Local(output)
    }

    /// Parse and run a whole program from source text.
    pub fn run_source(&mut self, source: &str) -> Result<Return, ParseError> {
        let program = finch_parser::parse_source(source)?;
        Ok(self.run(&program))
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}
