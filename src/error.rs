use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: &'static str,
        got: &'static str,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(&'static str),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
}

/// Every syntax error found in one parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl std::error::Error for ParseErrors {}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: String,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: String,
        right: &'static str,
    },
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: String,
        right: &'static str,
    },
    #[error("integer overflow: {0}")]
    IntegerOverflow(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount { want: usize, got: usize },
    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(&'static str),
    #[error("missing return value")]
    MissingReturnValue,
    /// Raised by a builtin through an `Error` value.
    #[error("{0}")]
    Builtin(String),
}

#[cfg(test)]
mod tests {
    use crate::error::{ParseError, ParseErrors, RuntimeError};

    #[test]
    fn test_parse_errors_display() {
        let errors = ParseErrors(vec![
            ParseError::UnexpectedToken {
                expected: ")",
                got: "EOF",
            },
            ParseError::NoPrefixParseFn("}"),
        ]);
        assert_eq!(
            errors.to_string(),
            "expected next token to be ), got EOF instead\nno prefix parse function for } found"
        );
    }

    #[test]
    fn test_runtime_error_display() {
        let tests = vec![
            (
                RuntimeError::TypeMismatch {
                    left: "INTEGER",
                    operator: "+".to_string(),
                    right: "BOOLEAN",
                },
                "type mismatch: INTEGER + BOOLEAN",
            ),
            (
                RuntimeError::UnknownPrefixOperator {
                    operator: "-".to_string(),
                    right: "BOOLEAN",
                },
                "unknown operator: -BOOLEAN",
            ),
            (
                RuntimeError::WrongArgumentCount { want: 2, got: 1 },
                "wrong number of arguments: want=2, got=1",
            ),
        ];
        for (err, expected) in tests {
            assert_eq!(err.to_string(), expected);
        }
    }
}
