use crate::ast::{BlockStatement, Identifier};
use crate::environment::Environment;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

pub type BuiltinFunction = fn(&[Object]) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
    Integer { value: i64 },
    Boolean { value: bool },
    String { value: String },
    Null,
    Array { elements: Rc<Vec<Object>> },
    Hash { pairs: Rc<BTreeMap<HashKey, HashPair>> },
    Function(Rc<Function>),
    Builtin(Builtin),
    Error { message: String },
}

/// Content-based key of a hashable object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// A hash entry keeps the original key object for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<RefCell<Environment>>,
}

// The captured environment is left out: it may hold this very function.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl Object {
    pub const TRUE: Object = Object::Boolean { value: true };
    pub const FALSE: Object = Object::Boolean { value: false };

    pub fn r#type(&self) -> &'static str {
        use Object::*;
        match self {
            Integer { .. } => "INTEGER",
            Boolean { .. } => "BOOLEAN",
            String { .. } => "STRING",
            Null => "NULL",
            Array { .. } => "ARRAY",
            Hash { .. } => "HASH",
            Function(_) => "FUNCTION",
            Builtin(_) => "BUILTIN",
            Error { .. } => "ERROR",
        }
    }

    pub fn boolean(value: bool) -> Object {
        Object::Boolean { value }
    }

    pub fn string(value: impl Into<std::string::String>) -> Object {
        Object::String {
            value: value.into(),
        }
    }

    pub fn array(elements: Vec<Object>) -> Object {
        Object::Array {
            elements: Rc::new(elements),
        }
    }

    pub fn error(message: impl Into<std::string::String>) -> Object {
        Object::Error {
            message: message.into(),
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean { value: false })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error { .. })
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer { value } => Some(HashKey::Integer(*value)),
            Object::Boolean { value } => Some(HashKey::Boolean(*value)),
            Object::String { value } => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        use Object::*;
        match (self, other) {
            (Integer { value: l }, Integer { value: r }) => l == r,
            (Boolean { value: l }, Boolean { value: r }) => l == r,
            (String { value: l }, String { value: r }) => l == r,
            (Null, Null) => true,
            (Array { elements: l }, Array { elements: r }) => l == r,
            (Hash { pairs: l }, Hash { pairs: r }) => l == r,
            (Function(l), Function(r)) => Rc::ptr_eq(l, r),
            (Builtin(l), Builtin(r)) => l.name == r.name,
            (Error { message: l }, Error { message: r }) => l == r,
            _ => false,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Object::*;
        match self {
            Integer { value } => write!(f, "{}", value),
            Boolean { value } => write!(f, "{}", value),
            String { value } => write!(f, "{}", value),
            Null => write!(f, "null"),
            Array { elements } => {
                let elements: Vec<_> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Hash { pairs } => {
                let pairs: Vec<_> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Function(func) => {
                let params: Vec<_> = func.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn({}) {{\n{}\n}}", params.join(", "), func.body.body())
            }
            Builtin(_) => write!(f, "builtin function"),
            Error { message } => write!(f, "ERROR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::object::{HashKey, Object};
    use crate::parser::Parser;
    use crate::{environment::Environment, lexer::Lexer};

    #[test]
    fn test_string_hash_key() {
        let hello1 = Object::string("Hello World");
        let hello2 = Object::string("Hello World");
        let diff1 = Object::string("My name is johnny");
        let diff2 = Object::string("Hello Worle");
        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff1.hash_key());
        // same length, different content
        assert_ne!(hello1.hash_key(), diff2.hash_key());
    }

    #[test]
    fn test_hash_key_by_type() {
        assert_eq!(Object::Integer { value: 1 }.hash_key(), Some(HashKey::Integer(1)));
        assert_eq!(Object::TRUE.hash_key(), Some(HashKey::Boolean(true)));
        assert_ne!(
            Object::Integer { value: 1 }.hash_key(),
            Object::string("1").hash_key()
        );
        assert_eq!(Object::Null.hash_key(), None);
        assert_eq!(Object::array(vec![]).hash_key(), None);
    }

    #[test]
    fn test_truthiness() {
        let tests = vec![
            (Object::TRUE, true),
            (Object::FALSE, false),
            (Object::Null, false),
            (Object::Integer { value: 0 }, true),
            (Object::string(""), true),
            (Object::array(vec![]), true),
        ];
        for (obj, expected) in tests {
            assert_eq!(obj.is_truthy(), expected, "{:?}", obj);
        }
    }

    #[test]
    fn test_inspect() {
        let tests = vec![
            (Object::Integer { value: -3 }, "-3"),
            (Object::FALSE, "false"),
            (Object::string("hi"), "hi"),
            (Object::Null, "null"),
            (
                Object::array(vec![Object::Integer { value: 1 }, Object::string("a")]),
                "[1, a]",
            ),
            (Object::error("boom"), "ERROR: boom"),
        ];
        for (obj, expected) in tests {
            assert_eq!(obj.to_string(), expected);
            assert_ne!(obj.r#type(), "");
        }
    }

    #[test]
    fn test_inspect_function() {
        let program = Parser::new(Lexer::new("fn(x, y) { x + y; }"))
            .parse()
            .unwrap();
        let env = Environment::new_shared();
        let func = crate::evaluator::eval(&program, &env);
        assert_eq!(func.r#type(), "FUNCTION");
        assert_eq!(func.to_string(), "fn(x, y) {\n(x + y);\n}");
    }
}
