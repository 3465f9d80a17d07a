/// Primitives for the **Bool** class.
pub mod boolean;
/// Primitives for the **Class** class, and the per-metaclass constructor.
pub mod class;
/// Primitives for the **Double** class.
pub mod double;
/// Primitives for the **Function** class.
pub mod function;
/// Primitives for the **Int** class.
pub mod integer;
/// Primitives for the **Nothing** class.
pub mod nothing;
/// Primitives for the **Object** class.
pub mod object;
/// Primitives for the **String** class.
pub mod string;
/// Primitives for the **Tuple** class.
pub mod tuple;

use crate::invokable::Return;
use crate::universe::Universe;
use crate::value::Value;

/// A interpreter primitive (just a bare function pointer).
///
/// The arguments are always the receiver, the static argument and the argument, in that order.
pub type PrimitiveFn = fn(universe: &mut Universe, args: Vec<Value>) -> Return;

/// A primitive table entry: its name, its implementation, then its declared parameter and return types.
pub type PrimitiveEntry = (&'static str, PrimitiveFn, &'static str, &'static str);

/// Macro for checking and destructuring arguments passed to primitives.
#[macro_export]
macro_rules! expect_args {
    ($signature:expr, $args:expr, [ $( $ptrn:pat $( => $name:ident )? ),* $(,)? ]) => {
        #[allow(unused_mut)]
        let ($($(mut $name,)?)*) = {
            #[allow(unused_variables, unused_mut)]
            let mut iter = $args.into_iter();
            $(#[allow(unreachable_patterns)]
            $(let $name =)? match iter.next() {
                Some($ptrn) => {$($name)?},
                Some(_) => return $crate::invokable::Return::Exception(
                    $crate::error::Exception::representation($signature, stringify!($ptrn)),
                ),
                None => return $crate::invokable::Return::Exception(
                    $crate::error::Exception::Runtime(format!("'{}': missing argument", $signature)),
                ),
            };)*
            ($($($name,)?)*)
        };
    };
}

/// Get the primitives to install into the instance method table of a built-in class.
pub fn get_instance_primitives(class_name: &str) -> Option<&'static [PrimitiveEntry]> {
    match class_name {
        "Bool" => Some(self::boolean::INSTANCE_PRIMITIVES),
        "Class" => Some(self::class::INSTANCE_PRIMITIVES),
        "Double" => Some(self::double::INSTANCE_PRIMITIVES),
        "Function" => Some(self::function::INSTANCE_PRIMITIVES),
        "Int" => Some(self::integer::INSTANCE_PRIMITIVES),
        "Nothing" => Some(self::nothing::INSTANCE_PRIMITIVES),
        "Object" => Some(self::object::INSTANCE_PRIMITIVES),
        "String" => Some(self::string::INSTANCE_PRIMITIVES),
        "Tuple" => Some(self::tuple::INSTANCE_PRIMITIVES),
        _ => None,
    }
}
