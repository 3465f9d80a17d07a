use std::collections::HashMap;
use std::fmt;

use crate::class::Class;
use crate::value::Value;
use crate::FinchRef;

/// Represents a generic (non-primitive) class instance.
#[derive(Clone)]
pub struct Instance {
    /// The class of which this is an instance from.
    pub class: FinchRef<Class>,
    /// This instance's fields.
    pub fields: HashMap<String, Value>,
}

impl Instance {
    /// Construct a bare instance for a given class, with no field populated.
    pub fn from_class(class: FinchRef<Class>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// Get the class of which this is an instance from.
    pub fn class(&self) -> FinchRef<Class> {
        self.class.clone()
    }

    /// Get a field's value, **nothing** if it was never set.
    pub fn get_field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or(Value::Nothing)
    }

    /// Assign a value to a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.class.borrow().name())
            .field("fields", &self.fields.keys())
            .finish()
    }
}
