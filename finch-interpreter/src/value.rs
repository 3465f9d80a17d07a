use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;

use crate::class::Class;
use crate::function::Function;
use crate::instance::Instance;
use crate::universe::Universe;
use crate::FinchRef;

/// Represents a Finch value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The **nothing** value.
    Nothing,
    /// A boolean value (**true** or **false**).
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A big integer value (arbitrarily big).
    BigInteger(BigInt),
    /// An floating-point value.
    Double(f64),
    /// A string value.
    String(Rc<String>),
    /// A fixed-arity tuple of values.
    Tuple(Rc<Vec<Self>>),
    /// A function (closure), ready to be called.
    Function(Rc<Function>),
    /// A generic (non-primitive) class instance.
    Instance(FinchRef<Instance>),
    /// A bare class object.
    Class(FinchRef<Class>),
}

impl Value {
    /// Get the class of the current value.
    pub fn class(&self, universe: &Universe) -> FinchRef<Class> {
        match self {
            Self::Nothing => universe.nothing_class(),
            Self::Boolean(_) => universe.bool_class(),
            Self::Integer(_) | Self::BigInteger(_) => universe.int_class(),
            Self::Double(_) => universe.double_class(),
            Self::String(_) => universe.string_class(),
            Self::Tuple(_) => universe.tuple_class(),
            Self::Function(_) => universe.function_class(),
            Self::Instance(instance) => instance.borrow().class(),
            Self::Class(class) => class
                .borrow()
                .metaclass()
                .unwrap_or_else(|| universe.class_class()),
        }
    }

    /// Whether this is the **nothing** value.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Whether both values are the very same object.
    ///
    /// Values without identity (numbers, booleans, strings and tuples) are the same when they are equal.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Rc::ptr_eq(a, b) || a == b,
            (Self::Tuple(a), Self::Tuple(b)) => Rc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }

    /// Search for a field in a tuple value.
    pub fn tuple_field(&self, index: usize) -> Option<Value> {
        match self {
            Self::Tuple(fields) => fields.get(index).cloned(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nothing, Self::Nothing) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a.eq(b),
            (Self::Integer(a), Self::Integer(b)) => a.eq(b),
            (Self::Integer(a), Self::Double(b)) | (Self::Double(b), Self::Integer(a)) => {
                (*a as f64).eq(b)
            }
            (Self::Double(a), Self::Double(b)) => a.eq(b),
            (Self::BigInteger(a), Self::BigInteger(b)) => a.eq(b),
            (Self::BigInteger(a), Self::Integer(b)) | (Self::Integer(b), Self::BigInteger(a)) => {
                a.eq(&BigInt::from(*b))
            }
            (Self::String(a), Self::String(b)) => a.eq(b),
            (Self::Tuple(a), Self::Tuple(b)) => a.eq(b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "()"),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::BigInteger(value) => write!(f, "{}", value),
            Self::Double(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Self::String(value) => write!(f, "{}", value),
            Self::Tuple(fields) => {
                write!(f, "(")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, ")")
            }
            Self::Function(_) => write!(f, "<fn>"),
            Self::Instance(instance) => write!(f, "<{}>", instance.borrow().class().borrow().name()),
            Self::Class(class) => write!(f, "{}", class.borrow().name()),
        }
    }
}
