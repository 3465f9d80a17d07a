/// Represents an expression.
///
/// Exemple:
/// ```text
/// "reference"          counter
/// "definition"         var counter = 10
/// "assignment"         counter = 10
/// "messsage send"      counter incrementBy(5)
/// "operator send"      counter <= 5
/// "early return"       return counter
/// "literal"            "foo"
/// "function"           fn(value) counter incrementBy(value)
/// "conditional"        if counter > 5 then "big" else "small"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// The `nothing` value (eg. `nothing` or `()`).
    Nothing,
    /// The current receiver (`this`).
    This,
    /// A literal (eg. `"foo"`, `10`, `true`, ...).
    Literal(Literal),
    /// A message send, with or without an explicit receiver (eg. `counter incrementBy(5)`).
    Message(Message),
    /// A tuple construction (eg. `(1, "two", three)`).
    Tuple(Vec<Expression>),
    /// A sequence of expressions evaluated in a nested scope.
    Block(Block),
    /// A function literal (eg. `fn(a, b) a + b`).
    Fn(FnExpr),
    /// A new binding in the current scope (eg. `var counter = 10`).
    Define(String, Box<Expression>),
    /// An assignment to a binding or a setter send (eg. `counter = 10`, `point x = 3`).
    Assignment(Assignment),
    /// A short-circuiting conjunction (eg. `a and b`).
    And(Box<Expression>, Box<Expression>),
    /// A short-circuiting disjunction (eg. `a or b`).
    Or(Box<Expression>, Box<Expression>),
    /// A conditional chain (eg. `let a = foo if a > 1 then a else 0`).
    If(IfExpr),
    /// An early return (eg. `return counter`).
    Return(Box<Expression>),
    /// A class declaration.
    Class(ClassDef),
}

impl Expression {
    /// Construct a message send.
    pub fn message(
        receiver: Option<Expression>,
        signature: impl Into<String>,
        value: Option<Expression>,
    ) -> Self {
        Self::Message(Message {
            receiver: receiver.map(Box::new),
            signature: signature.into(),
            static_value: None,
            value: value.map(Box::new),
        })
    }

    /// Construct a tuple from its fields.
    pub fn tuple(fields: Vec<Expression>) -> Self {
        Self::Tuple(fields)
    }

    /// Construct a parameterless branch thunk around the given body, transparent to early returns.
    pub fn thunk(body: Expression) -> Self {
        Self::Fn(FnExpr {
            params: Parameters::default(),
            body: Box::new(body),
            is_thunk: true,
        })
    }
}

/// Represents a message send.
///
/// Exemple:
/// ```text
/// "unary message send"
/// "hello, world" print
///
/// "message send with an argument"
/// range from(0, 10)
///
/// "message send with a static argument"
/// list of[Int](3)
///
/// "receiver-less send"
/// square(3)
///
/// "operator message send"
/// value == 3
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The object to which the message is sent, `None` for a receiver-less send.
    pub receiver: Option<Box<Expression>>,
    /// The name of the message (eg. `print`, `+`, `true?`).
    pub signature: String,
    /// The static argument, if any (between square brackets).
    pub static_value: Option<Box<Expression>>,
    /// The argument, if any (between parentheses or to the right of an operator).
    pub value: Option<Box<Expression>>,
}

/// Represents an assignment.
///
/// Exemple:
/// ```text
/// "binding or field assignment"
/// counter = 10
///
/// "setter send"
/// point x = 10
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The receiver of the setter, `None` when assigning to a bare name.
    pub receiver: Option<Box<Expression>>,
    /// The assigned name.
    pub name: String,
    /// The assigned value.
    pub value: Box<Expression>,
}

/// Represents a sequence of expressions.
///
/// Exemple:
/// ```text
/// if ready then
///     var message = "go"
///     message print
/// end
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The expressions in the block.
    pub exprs: Vec<Expression>,
}

/// Represents the parameter list of a function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    /// The static parameters' names (between square brackets).
    pub static_params: Vec<String>,
    /// The value parameters' names (between parentheses).
    pub names: Vec<String>,
}

/// Represents a function literal.
///
/// Exemple:
/// ```text
/// "simple function"
/// fn "hello" print
///
/// "function with parameters"
/// fn(a, b) a + b
///
/// "function with a static parameter and a block body"
/// fn[T](value)
///     value print
///     value
/// end
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FnExpr {
    /// The function's parameters.
    pub params: Parameters,
    /// The function's body.
    pub body: Box<Expression>,
    /// Whether this is a branch thunk, which lets early returns through.
    pub is_thunk: bool,
}

/// Represents one guard in a conditional chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A plain guard (eg. `if a < b`), already wrapped in its truthiness test.
    If(Expression),
    /// A narrowing binding (eg. `let value = lookup(key)`).
    Let {
        /// The name being bound.
        name: String,
        /// The guard expression.
        body: Expression,
    },
}

impl Condition {
    /// Get the guard expression.
    pub fn body(&self) -> &Expression {
        match self {
            Self::If(body) => body,
            Self::Let { body, .. } => body,
        }
    }
}

/// Represents a conditional chain.
///
/// Exemple:
/// ```text
/// let user = find(id)
/// if user active? then
///     user greet
/// else
///     "nobody" print
/// end
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    /// The guards, in evaluation order.
    pub conditions: Vec<Condition>,
    /// The expression evaluated when every guard passes.
    pub then_expr: Box<Expression>,
    /// The expression evaluated otherwise.
    pub else_expr: Box<Expression>,
}

/// Represents a class declaration.
///
/// Example:
/// ```text
/// class Counter
///     var total = 0
///     def increment() total = total + 1
///     shared def starting(value)
///         var counter = Counter new()
///         counter total = value
///         counter
///     end
/// end
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// The name of the class.
    pub name: String,
    /// The members of the class, in declaration order.
    pub members: Vec<ClassMember>,
}

/// Represents a member of a class declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// A field with its initializer (eg. `var total = 0`).
    Field {
        /// The field's name.
        name: String,
        /// The initializer, evaluated at construction.
        initializer: Expression,
    },
    /// A method definition (eg. `def increment() total = total + 1`).
    Method {
        /// The method's name.
        name: String,
        /// The method's function.
        function: FnExpr,
        /// Whether the method is shared (installed on the metaclass).
        shared: bool,
    },
}

/// Represents a literal.
///
/// Exemple:
/// ```text
/// "hello"  "string literal"
/// 3.14     "double literal"
/// 42       "integer literal"
/// true     "boolean literal"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Represents a boolean literal (eg. `true`).
    Bool(bool),
    /// Represents a string literal (eg. `"hello"`).
    String(String),
    /// Represents a decimal number literal (eg. `3.14`).
    Double(f64),
    /// Represents a integer number literal (eg. `42`).
    Integer(i64),
    /// Represents a big integer (bigger than a 64-bit signed integer can represent).
    BigInteger(String),
}
