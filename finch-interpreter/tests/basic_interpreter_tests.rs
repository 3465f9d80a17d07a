use std::cell::RefCell;
use std::rc::Rc;

use num_bigint::BigInt;

use finch_interpreter::error::Exception;
use finch_interpreter::invokable::Return;
use finch_interpreter::universe::Universe;
use finch_interpreter::value::Value;

fn setup_universe() -> (Universe, Rc<RefCell<Vec<String>>>) {
    let output = Rc::new(RefCell::new(Vec::new()));
    let sink = output.clone();
    let universe = Universe::with_output(move |text| sink.borrow_mut().push(text.to_string()));
    (universe, output)
}

fn run(universe: &mut Universe, source: &str) -> Return {
    universe
        .run_source(source)
        .expect("could not parse the test program")
}

fn eval(universe: &mut Universe, source: &str) -> Value {
    match run(universe, source) {
        Return::Local(value) => value,
        ret => panic!("expected a value, got {:?}", ret),
    }
}

fn exception(universe: &mut Universe, source: &str) -> Exception {
    match run(universe, source) {
        Return::Exception(exception) => exception,
        ret => panic!("expected an exception, got {:?}", ret),
    }
}

fn string(value: &str) -> Value {
    Value::String(Rc::new(value.to_string()))
}

fn tuple(fields: Vec<Value>) -> Value {
    Value::Tuple(Rc::new(fields))
}

#[test]
fn subclass_chain_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Grandparent
end
class Parent
end
class Child
end
class Unrelated
end
Parent parent = Grandparent
Child parent = Parent
var child = Child new()
(child is?(Child), child is?(Parent), child is?(Grandparent), child is?(Object), child is?(Unrelated))
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![
            Value::Boolean(true),
            Value::Boolean(true),
            Value::Boolean(true),
            Value::Boolean(true),
            Value::Boolean(false),
        ])
    );
}

#[test]
fn inherited_methods_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Animal
    def speak() \"...\"
    def describe() \"I say \" + speak()
end
class Dog
    def speak() \"woof\"
end
Dog parent = Animal
(Animal new() describe, Dog new() describe)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![string("I say ..."), string("I say woof")])
    );
}

#[test]
fn late_binding_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Greeter
    def greet() \"hello\"
end
var greeter = Greeter new()
var before = greeter greet
Greeter addMethod((\"greet\", fn \"bonjour\"))
var during = greeter greet
class Greeter
    def greet() \"salut\"
end
(before, during, greeter greet)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![string("hello"), string("bonjour"), string("salut")])
    );
}

#[test]
fn parameter_binding_test() {
    let (mut universe, _) = setup_universe();

    eval(&mut universe, "def pair(a, b) (a, b)");

    assert_eq!(
        eval(&mut universe, "pair(1)"),
        tuple(vec![Value::Integer(1), Value::Nothing])
    );
    assert_eq!(
        eval(&mut universe, "pair(1, 2, 3)"),
        tuple(vec![Value::Integer(1), Value::Integer(2)])
    );

    let pair = universe.lookup_global("pair").expect("'pair' is not defined");
    let output = universe.send(
        pair,
        "call",
        Value::Nothing,
        tuple(vec![Value::Integer(1)]),
    );
    match output {
        Return::Local(value) => assert_eq!(value, tuple(vec![Value::Integer(1), Value::Nothing])),
        ret => panic!("expected a value, got {:?}", ret),
    }
}

#[test]
fn non_tuple_argument_fills_every_other_parameter_test() {
    let (mut universe, _) = setup_universe();

    let source = "
def triple(a, b, c) (a, b, c)
triple(7)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![Value::Integer(7), Value::Nothing, Value::Nothing])
    );
}

#[test]
fn single_parameter_takes_whole_tuple_test() {
    let (mut universe, _) = setup_universe();

    let source = "
def count(values) values count
count(1, 2, 3)
";

    assert_eq!(eval(&mut universe, source), Value::Integer(3));
}

#[test]
fn shared_counter_test() {
    let (mut universe, _) = setup_universe();

    let source = "
def makeCounter()
    var count = 0
    var increment = fn count = count + 1
    var read = fn count
    (increment, read)
end
var counter = makeCounter()
var increment = counter field(0)
var read = counter field(1)
increment()
increment()
read()
";

    assert_eq!(eval(&mut universe, source), Value::Integer(2));
}

#[test]
fn field_initializers_run_before_constructor_test() {
    let (mut universe, _) = setup_universe();

    let source = "
var log = \"\"
var visible = \"global\"
class Record
    var first = log = log + \"first \"
    var second = log = log + \"second \"
    var seen = visible
    var total = 1
    def init(extra)
        log = log + \"init\"
        total = total + extra
    end
end
def build()
    var visible = \"local\"
    Record new(10)
end
var record = build()
(log, record seen, record total)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![
            string("first second init"),
            string("global"),
            Value::Integer(11),
        ])
    );
}

#[test]
fn field_initializers_cannot_see_caller_locals_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Peek
    var value = hidden
end
def build()
    var hidden = \"local\"
    Peek new()
end
build()
";

    assert_eq!(
        exception(&mut universe, source),
        Exception::NoSuchMethod {
            class: String::from("Nothing"),
            name: String::from("hidden"),
        }
    );
}

#[test]
fn missing_constructor_is_not_an_error_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Empty
    var value = 3
end
Empty new() value
";

    assert_eq!(eval(&mut universe, source), Value::Integer(3));
}

#[test]
fn constructor_failure_propagates_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Broken
    def init() 1 / 0
end
Broken new()
";

    assert_eq!(
        exception(&mut universe, source),
        Exception::DivisionByZero {
            signature: String::from("Int /"),
        }
    );
}

#[test]
fn shared_methods_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Counter
    var total = 0
    shared def starting(value)
        var counter = Counter new()
        counter total = value
        counter
    end
end
Counter addSharedMethod((\"zero\", fn Counter new()))
(Counter starting(5) total, Counter zero total)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![Value::Integer(5), Value::Integer(0)])
    );
}

#[test]
fn new_can_be_shadowed_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Singleton
    shared def new() \"shadowed\"
end
Singleton new()
";

    assert_eq!(eval(&mut universe, source), string("shadowed"));
}

#[test]
fn receiver_less_sends_reach_this_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Calc
    def double(n) n * 2
    def quad(n) double(double(n))
end
Calc new() quad(3)
";

    assert_eq!(eval(&mut universe, source), Value::Integer(12));
}

#[test]
fn invalid_parent_is_reported_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Orphan
end
Orphan parent = 3
";

    assert_eq!(eval(&mut universe, source), Value::Nothing);
    assert_eq!(universe.reported_errors().len(), 1);
    assert!(universe.reported_errors()[0].contains("it is not a class"));
    assert_eq!(
        eval(&mut universe, "Orphan parent"),
        Value::Class(universe.object_class())
    );
}

#[test]
fn cyclic_parent_is_reported_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class A
end
class B
end
B parent = A
A parent = B
";

    assert_eq!(eval(&mut universe, source), Value::Nothing);
    assert_eq!(universe.reported_errors().len(), 1);
    assert!(universe.reported_errors()[0].contains("its own ancestor"));
}

#[test]
fn no_such_method_test() {
    let (mut universe, _) = setup_universe();

    assert_eq!(
        exception(&mut universe, "3 frobnicate"),
        Exception::NoSuchMethod {
            class: String::from("Int"),
            name: String::from("frobnicate"),
        }
    );
}

#[test]
fn representation_error_test() {
    let (mut universe, _) = setup_universe();

    assert!(matches!(
        exception(&mut universe, "\"a\" + 1"),
        Exception::Representation { .. }
    ));
}

#[test]
fn print_test() {
    let (mut universe, output) = setup_universe();

    eval(&mut universe, "\"hello\" print\n(\"a\" + \"b\") print");

    assert_eq!(
        output.borrow().as_slice(),
        &[String::from("hello"), String::from("ab")]
    );
}

#[test]
fn string_conversions_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Foo
end
(Foo new() string, nothing string, (1, true) string, 42 string, false string, Foo name, Foo class name)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![
            string("<Foo>"),
            string("()"),
            string("(1, true)"),
            string("42"),
            string("false"),
            string("Foo"),
            string("Foo class"),
        ])
    );
}

#[test]
fn integer_overflow_promotes_test() {
    let (mut universe, _) = setup_universe();

    let expected: BigInt = "9223372036854775808".parse().expect("invalid big integer");
    assert_eq!(
        eval(&mut universe, "9223372036854775807 + 1"),
        Value::BigInteger(expected)
    );
    assert_eq!(
        eval(&mut universe, "9223372036854775808 - 1"),
        Value::Integer(i64::MAX)
    );
}

#[test]
fn arithmetic_test() {
    let (mut universe, _) = setup_universe();

    assert_eq!(eval(&mut universe, "1 + 2 * 3 - 4"), Value::Integer(3));
    assert_eq!(eval(&mut universe, "7 / 2"), Value::Integer(3));
    assert_eq!(eval(&mut universe, "-7 % 3"), Value::Integer(2));
    assert_eq!(eval(&mut universe, "1.5 + 1"), Value::Double(2.5));
    assert_eq!(eval(&mut universe, "2 <= 2"), Value::Boolean(true));

    let random = eval(&mut universe, "10 random");
    assert!(matches!(random, Value::Integer(value) if (0..10).contains(&value)));
}

#[test]
fn division_by_zero_test() {
    let (mut universe, _) = setup_universe();

    assert_eq!(
        exception(&mut universe, "1 % 0"),
        Exception::DivisionByZero {
            signature: String::from("Int %"),
        }
    );
}

#[test]
fn tuple_field_out_of_bounds_test() {
    let (mut universe, _) = setup_universe();

    assert_eq!(eval(&mut universe, "(1, 2) field(1)"), Value::Integer(2));
    assert!(matches!(
        exception(&mut universe, "(1, 2) field(2)"),
        Exception::Runtime(_)
    ));
}

#[test]
fn top_level_early_return_test() {
    let (mut universe, _) = setup_universe();

    assert_eq!(eval(&mut universe, "return 5\n6"), Value::Integer(5));
}

#[test]
fn early_return_stops_at_invocation_test() {
    let (mut universe, _) = setup_universe();

    let source = "
def inner()
    return 1
    2
end
def outer()
    var value = inner()
    value + 10
end
outer()
";

    assert_eq!(eval(&mut universe, source), Value::Integer(11));
}

#[test]
fn class_reflection_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Foo
end
class Disguised
    def class() Int
end
(3 class name, Foo new() class name, Foo new() class sameAs?(Foo), Disguised new() class name)
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![
            string("Int"),
            string("Foo"),
            Value::Boolean(true),
            string("Int"),
        ])
    );
}

#[test]
fn static_parameter_binding_test() {
    let (mut universe, _) = setup_universe();

    let source = "
def tagged[T](a) (T, a)
def spread[A, B](a) (A, B, a)
(tagged[3](4), spread[3](4), spread[(1, 2)](4))
";

    assert_eq!(
        eval(&mut universe, source),
        tuple(vec![
            tuple(vec![Value::Integer(3), Value::Integer(4)]),
            tuple(vec![Value::Integer(3), Value::Nothing, Value::Integer(4)]),
            tuple(vec![Value::Integer(1), Value::Integer(2), Value::Integer(4)]),
        ])
    );
}

#[test]
fn field_initializers_do_not_share_scopes_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Leak
    var a = var secret = \"seen\"
    var b = secret
end
Leak new() b
";

    assert_eq!(
        exception(&mut universe, source),
        Exception::NoSuchMethod {
            class: String::from("Nothing"),
            name: String::from("secret"),
        }
    );
}

#[test]
fn big_integer_and_double_arithmetic_test() {
    let (mut universe, _) = setup_universe();

    let big = 9_223_372_036_854_775_808_f64;
    assert_eq!(
        eval(&mut universe, "9223372036854775808 * 1.5"),
        Value::Double(big * 1.5)
    );
    assert_eq!(
        eval(&mut universe, "9223372036854775808 / 2.0"),
        Value::Double(big / 2.0)
    );
}

#[test]
fn shared_method_on_metaclass_is_reported_test() {
    let (mut universe, _) = setup_universe();

    let source = "
class Foo
end
Foo class addSharedMethod((\"hidden\", fn 1))
";

    assert_eq!(eval(&mut universe, source), Value::Nothing);
    assert_eq!(universe.reported_errors().len(), 1);
    assert!(universe.reported_errors()[0].contains("it has no metaclass"));
    assert_eq!(
        exception(&mut universe, "Int hidden"),
        Exception::NoSuchMethod {
            class: String::from("Int class"),
            name: String::from("hidden"),
        }
    );
}
