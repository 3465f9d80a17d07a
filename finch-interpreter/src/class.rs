use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use finch_core::ast::Expression;

use crate::method::Method;
use crate::FinchRef;

/// The name of the constructor method, searched on the class' own method table.
pub const CONSTRUCTOR: &str = "init";

/// Represents a class.
///
/// A class is itself an object, whose class is its metaclass: shared (static) methods live in the metaclass' method
/// table and are found by the very same lookup as instance methods.
pub struct Class {
    /// The class' name.
    pub name: String,
    /// The metaclass (class of this class), `None` for metaclasses themselves.
    pub class: Option<FinchRef<Class>>,
    /// The parent of this class (single inheritance).
    pub parent: Option<FinchRef<Class>>,
    /// The class' instance methods.
    pub methods: IndexMap<String, Rc<Method>>,
    /// The field initializers, in declaration order.
    pub fields: IndexMap<String, Expression>,
}

impl Class {
    /// Construct a class and its metaclass.
    pub fn new(
        name: impl Into<String>,
        parent: Option<FinchRef<Class>>,
        metaclass_parent: Option<FinchRef<Class>>,
    ) -> FinchRef<Class> {
        let name = name.into();
        let metaclass = Rc::new(RefCell::new(Self {
            name: format!("{} class", name),
            class: None,
            parent: metaclass_parent,
            methods: IndexMap::new(),
            fields: IndexMap::new(),
        }));

        debug!("created class '{}'", name);
        Rc::new(RefCell::new(Self {
            name,
            class: Some(metaclass),
            parent,
            methods: IndexMap::new(),
            fields: IndexMap::new(),
        }))
    }

    /// Get the class' name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the metaclass of this class.
    pub fn metaclass(&self) -> Option<FinchRef<Class>> {
        self.class.clone()
    }

    /// Get the parent of this class.
    pub fn parent(&self) -> Option<FinchRef<Class>> {
        self.parent.clone()
    }

    /// Set the parent of this class.
    pub fn set_parent(&mut self, parent: FinchRef<Class>) {
        self.parent = Some(parent);
    }

    /// Install a method in this class' own table, replacing any method of the same name.
    pub fn add_method(&mut self, method: Method) {
        debug!("installing '{}' into '{}'", method.signature(), self.name);
        self.methods.insert(method.signature().to_string(), Rc::new(method));
    }

    /// Declare a field and its initializer, keeping its first declaration slot when redeclared.
    pub fn add_field(&mut self, name: impl Into<String>, initializer: Expression) {
        self.fields.insert(name.into(), initializer);
    }

    /// Search for a given method within this class and its ancestors.
    pub fn lookup_method(&self, signature: &str) -> Option<Rc<Method>> {
        match self.methods.get(signature) {
            Some(method) => Some(method.clone()),
            None => self.parent.as_ref()?.borrow().lookup_method(signature),
        }
    }

    /// Get the constructor defined by this very class, if any.
    pub fn constructor(&self) -> Option<Rc<Method>> {
        self.methods.get(CONSTRUCTOR).cloned()
    }
}

/// Whether `class` is `target` or one of its descendants, walking explicit parent links only.
pub fn inherits_from(class: &FinchRef<Class>, target: &FinchRef<Class>) -> bool {
    let mut current = Some(class.clone());
    while let Some(class) = current {
        if Rc::ptr_eq(&class, target) {
            return true;
        }
        current = class.borrow().parent();
    }
    false
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("methods", &self.methods.keys())
            .field("fields", &self.fields.keys())
            .finish()
    }
}
