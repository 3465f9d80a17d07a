use std::rc::Rc;

use log::debug;

use finch_core::ast;

use crate::error::Exception;
use crate::function::Function;
use crate::invokable::Return;
use crate::method::Method;
use crate::scope::Context;
use crate::universe::Universe;
use crate::value::Value;

macro_rules! propagate {
    ($expr:expr) => {
        match $expr {
            Return::Local(value) => value,
            ret => return ret,
        }
    };
}

macro_rules! condition {
    ($expr:expr) => {
        match $expr {
            Ok(flag) => flag,
            Err(ret) => return ret,
        }
    };
}

/// The trait for evaluating AST nodes.
pub trait Evaluate {
    /// Evaluate the node within a given universe and invocation context.
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return;
}

impl Universe {
    /// Evaluate an expression within the given context.
    pub fn evaluate(&mut self, expr: &ast::Expression, context: &Context) -> Return {
        expr.evaluate(self, context)
    }
}

impl Evaluate for ast::Expression {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        match self {
            Self::Nothing => Return::Local(Value::Nothing),
            Self::This => Return::Local(context.this.clone()),
            Self::Literal(literal) => literal.evaluate(universe, context),
            Self::Message(msg) => msg.evaluate(universe, context),
            Self::Tuple(exprs) => {
                let mut fields = Vec::with_capacity(exprs.len());
                for expr in exprs {
                    fields.push(propagate!(expr.evaluate(universe, context)));
                }
                Return::Local(Value::Tuple(Rc::new(fields)))
            }
            Self::Block(block) => block.evaluate(universe, &context.nested()),
            Self::Fn(function) => {
                let function = Function::new(function.clone(), context.clone());
                Return::Local(Value::Function(Rc::new(function)))
            }
            Self::Define(name, expr) => {
                let value = propagate!(expr.evaluate(universe, context));
                context.define(name.as_str(), value.clone());
                Return::Local(value)
            }
            Self::Assignment(assignment) => assignment.evaluate(universe, context),
            Self::And(lhs, rhs) => {
                let value = propagate!(lhs.evaluate(universe, context));
                if condition!(universe.truthiness(value.clone())) {
                    rhs.evaluate(universe, context)
                } else {
                    Return::Local(value)
                }
            }
            Self::Or(lhs, rhs) => {
                let value = propagate!(lhs.evaluate(universe, context));
                if condition!(universe.truthiness(value.clone())) {
                    Return::Local(value)
                } else {
                    rhs.evaluate(universe, context)
                }
            }
            Self::If(conditional) => conditional.evaluate(universe, context),
            Self::Return(expr) => {
                let value = propagate!(expr.evaluate(universe, context));
                Return::Early(value)
            }
            Self::Class(defn) => defn.evaluate(universe, context),
        }
    }
}

impl Evaluate for ast::Literal {
    fn evaluate(&self, _: &mut Universe, _: &Context) -> Return {
        match self {
            Self::Bool(value) => Return::Local(Value::Boolean(*value)),
            Self::Integer(value) => Return::Local(Value::Integer(*value)),
            Self::BigInteger(value) => match value.parse() {
                Ok(value) => Return::Local(Value::BigInteger(value)),
                Err(err) => Return::Exception(Exception::Runtime(err.to_string())),
            },
            Self::Double(value) => Return::Local(Value::Double(*value)),
            Self::String(value) => Return::Local(Value::String(Rc::new(value.clone()))),
        }
    }
}

impl Evaluate for ast::Message {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        let receiver = match self.receiver.as_deref() {
            Some(receiver) => Some(propagate!(receiver.evaluate(universe, context))),
            None => None,
        };

        let has_args = self.static_value.is_some() || self.value.is_some();
        let static_arg = match self.static_value.as_deref() {
            Some(expr) => propagate!(expr.evaluate(universe, context)),
            None => Value::Nothing,
        };
        let arg = match self.value.as_deref() {
            Some(expr) => propagate!(expr.evaluate(universe, context)),
            None => Value::Nothing,
        };

        match receiver {
            Some(receiver) => universe.send(receiver, &self.signature, static_arg, arg),
            None => match context.lookup(&self.signature) {
                Some(value) if !has_args => Return::Local(value),
                Some(value) => universe.send(value, "call", static_arg, arg),
                None => universe.send(context.this.clone(), &self.signature, static_arg, arg),
            },
        }
    }
}

impl Evaluate for ast::Assignment {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        let setter = format!("{}=", self.name);
        match self.receiver.as_deref() {
            Some(receiver) => {
                let receiver = propagate!(receiver.evaluate(universe, context));
                let value = propagate!(self.value.evaluate(universe, context));
                universe.send(receiver, &setter, Value::Nothing, value)
            }
            None => {
                let value = propagate!(self.value.evaluate(universe, context));
                if context.assign(&self.name, value.clone()) {
                    Return::Local(value)
                } else {
                    universe.send(context.this.clone(), &setter, Value::Nothing, value)
                }
            }
        }
    }
}

impl Evaluate for ast::Block {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        let mut last_value = Value::Nothing;
        for expr in &self.exprs {
            last_value = propagate!(expr.evaluate(universe, context));
        }
        Return::Local(last_value)
    }
}

impl Evaluate for ast::IfExpr {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        // Narrowed names are visible to the rest of the chain and to the `then` branch only.
        let chain = context.nested();
        for condition in &self.conditions {
            let value = propagate!(condition.body().evaluate(universe, &chain));
            let passed = match condition {
                ast::Condition::If(_) => condition!(universe.expect_condition(&value)),
                ast::Condition::Let { name, .. } => {
                    if value.is_nothing() {
                        false
                    } else {
                        chain.define(name.as_str(), value);
                        true
                    }
                }
            };
            if !passed {
                return self.else_expr.evaluate(universe, &context.nested());
            }
        }
        self.then_expr.evaluate(universe, &chain)
    }
}

impl Evaluate for ast::ClassDef {
    fn evaluate(&self, universe: &mut Universe, context: &Context) -> Return {
        let class = universe.define_class(&self.name);
        debug!("evaluating the declaration of '{}'", self.name);

        for member in &self.members {
            match member {
                ast::ClassMember::Field { name, initializer } => {
                    let mut class = class.borrow_mut();
                    class.add_field(name.as_str(), initializer.clone());
                    class.add_method(Method::field_getter(name.as_str()));
                    class.add_method(Method::field_setter(name.as_str()));
                }
                ast::ClassMember::Method {
                    name,
                    function,
                    shared,
                } => {
                    let function = Rc::new(Function::new(function.clone(), context.clone()));
                    let method = Method::defined(name.as_str(), function);
                    let holder = if *shared {
                        match class.borrow().metaclass() {
                            Some(metaclass) => metaclass,
                            None => {
                                return Return::Exception(Exception::Runtime(format!(
                                    "'{}' has no metaclass to hold shared methods",
                                    self.name
                                )))
                            }
                        }
                    } else {
                        class.clone()
                    };
                    holder.borrow_mut().add_method(method);
                }
            }
        }

        Return::Local(Value::Class(class))
    }
}
