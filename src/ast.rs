use crate::token::Token;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    LetStatement {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    ReturnStatement {
        token: Token,
        value: Option<Expression>,
    },
    ExpressionStatement(Expression),
    BlockStatement(BlockStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    PrefixExpression {
        token: Token,
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    InfixExpression {
        token: Token,
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    IfExpression {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        // shared with every function value created from this literal
        body: Rc<BlockStatement>,
    },
    CallExpression {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expression>,
    },
    IndexExpression {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfixOperator {
    PLUS,
    MINUS,
    ASTERISK,
    SLASH,
    LT,
    GT,
    EQ,
    NEQ,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefixOperator {
    MINUS,
    BANG,
}

impl Program {
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

impl Statement {
    pub fn token_literal(&self) -> String {
        use Statement::*;
        match self {
            LetStatement { token, .. } | ReturnStatement { token, .. } => token.literal(),
            ExpressionStatement(exp) => exp.token_literal(),
            BlockStatement(block) => block.token.literal(),
        }
    }
}

impl Expression {
    pub fn token_literal(&self) -> String {
        use Expression::*;
        match self {
            Identifier(ident) => ident.token.literal(),
            IntegerLiteral { token, .. }
            | StringLiteral { token, .. }
            | Boolean { token, .. }
            | PrefixExpression { token, .. }
            | InfixExpression { token, .. }
            | IfExpression { token, .. }
            | FunctionLiteral { token, .. }
            | CallExpression { token, .. }
            | ArrayLiteral { token, .. }
            | IndexExpression { token, .. }
            | HashLiteral { token, .. } => token.literal(),
        }
    }
}

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_joined(f, &self.statements, " ")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            LetStatement { name, value, .. } => {
                write!(f, "let {} = {};", name, value)
            }
            ReturnStatement { value: Some(value), .. } => {
                write!(f, "return {};", value)
            }
            ReturnStatement { value: None, .. } => {
                write!(f, "return;")
            }
            ExpressionStatement(exp) => {
                write!(f, "{};", exp)
            }
            BlockStatement(block) => {
                write!(f, "{}", block)
            }
        }
    }
}

impl BlockStatement {
    /// The statements without the surrounding braces, one per line.
    pub fn body(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        write_joined(f, &self.statements, " ")?;
        write!(f, " }}")
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => {
                write!(f, "{}", ident)
            }
            IntegerLiteral { value, .. } => {
                write!(f, "{}", value)
            }
            StringLiteral { value, .. } => {
                write!(f, "\"{}\"", value)
            }
            Boolean { value, .. } => {
                write!(f, "{}", value)
            }
            PrefixExpression {
                operator, right, ..
            } => {
                write!(f, "({}{})", operator, right)
            }
            InfixExpression {
                left,
                operator,
                right,
                ..
            } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            IfExpression {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            FunctionLiteral {
                parameters, body, ..
            } => {
                write!(f, "fn(")?;
                write_joined(f, parameters, ", ")?;
                write!(f, ") {}", body)
            }
            CallExpression {
                function,
                arguments,
                ..
            } => {
                write!(f, "{}(", function)?;
                write_joined(f, arguments, ", ")?;
                write!(f, ")")
            }
            ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            IndexExpression { left, index, .. } => {
                write!(f, "({}[{}])", left, index)
            }
            HashLiteral { pairs, .. } => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use PrefixOperator::*;
        match self {
            MINUS => {
                write!(f, "-")
            }
            BANG => {
                write!(f, "!")
            }
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use InfixOperator::*;
        match self {
            PLUS => {
                write!(f, "+")
            }
            MINUS => {
                write!(f, "-")
            }
            ASTERISK => {
                write!(f, "*")
            }
            SLASH => {
                write!(f, "/")
            }
            LT => {
                write!(f, "<")
            }
            GT => {
                write!(f, ">")
            }
            EQ => {
                write!(f, "==")
            }
            NEQ => {
                write!(f, "!=")
            }
        }
    }
}
