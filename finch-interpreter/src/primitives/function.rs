use crate::expect_args;
use crate::invokable::Return;
use crate::primitives::PrimitiveEntry;
use crate::universe::Universe;
use crate::value::Value;

/// The primitives of the **Function** class.
pub static INSTANCE_PRIMITIVES: &[PrimitiveEntry] = &[("call", self::call, "Dynamic", "Dynamic")];

fn call(universe: &mut Universe, args: Vec<Value>) -> Return {
    const SIGNATURE: &str = "Function call";

    expect_args!(SIGNATURE, args, [
        Value::Function(function) => function,
        static_arg => static_arg,
        arg => arg,
    ]);

    function.call(universe, static_arg, arg)
}
