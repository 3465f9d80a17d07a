use std::rc::Rc;

use crate::function::Function;
use crate::primitives::PrimitiveFn;

/// The type name used when a callable declares no precise type.
pub const DYNAMIC: &str = "Dynamic";

/// The kind of a class method.
#[derive(Clone)]
pub enum MethodKind {
    /// A user-defined function.
    Defined(Rc<Function>),
    /// An interpreter primitive.
    Primitive(PrimitiveFn),
    /// A native getter for the named field.
    FieldGetter(String),
    /// A native setter for the named field.
    FieldSetter(String),
}

/// Represents a class method.
///
/// Native methods carry declared parameter and return type names, which are not checked at runtime.
#[derive(Clone)]
pub struct Method {
    /// How the method is implemented.
    pub kind: MethodKind,
    /// The method's name.
    pub signature: String,
    /// The declared parameter type.
    pub param_type: String,
    /// The declared return type.
    pub return_type: String,
}

impl Method {
    /// Construct a method from a user-defined function.
    pub fn defined(signature: impl Into<String>, function: Rc<Function>) -> Self {
        Self {
            kind: MethodKind::Defined(function),
            signature: signature.into(),
            param_type: DYNAMIC.to_string(),
            return_type: DYNAMIC.to_string(),
        }
    }

    /// Construct a method from an interpreter primitive and its declared types.
    pub fn primitive(
        signature: impl Into<String>,
        primitive: PrimitiveFn,
        param_type: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: MethodKind::Primitive(primitive),
            signature: signature.into(),
            param_type: param_type.into(),
            return_type: return_type.into(),
        }
    }

    /// Construct the getter for a field.
    pub fn field_getter(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            signature: field.clone(),
            kind: MethodKind::FieldGetter(field),
            param_type: String::from("Nothing"),
            return_type: DYNAMIC.to_string(),
        }
    }

    /// Construct the setter for a field (its signature is the field's name followed by `=`).
    pub fn field_setter(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            signature: format!("{}=", field),
            kind: MethodKind::FieldSetter(field),
            param_type: DYNAMIC.to_string(),
            return_type: DYNAMIC.to_string(),
        }
    }

    /// Get how the method is implemented.
    pub fn kind(&self) -> &MethodKind {
        &self.kind
    }

    /// Get the method's name.
    pub fn signature(&self) -> &str {
        self.signature.as_str()
    }
}
