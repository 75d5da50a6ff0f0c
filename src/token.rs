use std::fmt::{Display, Formatter};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    ILLEGAL(char),
    EOF,

    IDENT(String), // foobar, x, y, ...
    INT(String),
    STRING(String),

    ASSIGN,   // =
    PLUS,     // +
    MINUS,    // -
    BANG,     // !
    ASTERISK, // *
    SLASH,    // /

    LT, // <
    GT, // >

    EQ,  // ==
    NEQ, // !=

    COMMA,     // ,
    SEMICOLON, // ;
    COLON,     // :

    LPAREN,   // (
    RPAREN,   // )
    LBRACE,   // {
    RBRACE,   // }
    LBRACKET, // [
    RBRACKET, // ]

    FUNCTION,
    LET,
    TRUE,
    FALSE,
    IF,
    ELSE,
    RETURN,
}

impl Token {
    /// Source text of the token.
    pub fn literal(&self) -> String {
        use Token::*;
        match self {
            ILLEGAL(c) => c.to_string(),
            EOF => String::new(),
            IDENT(s) | INT(s) | STRING(s) => s.clone(),
            FUNCTION => "fn".to_string(),
            LET => "let".to_string(),
            TRUE => "true".to_string(),
            FALSE => "false".to_string(),
            IF => "if".to_string(),
            ELSE => "else".to_string(),
            RETURN => "return".to_string(),
            _ => self.kind().to_string(),
        }
    }

    /// Name of the token kind, as shown in syntax errors.
    pub fn kind(&self) -> &'static str {
        use Token::*;
        match self {
            ILLEGAL(_) => "ILLEGAL",
            EOF => "EOF",
            IDENT(_) => "IDENT",
            INT(_) => "INT",
            STRING(_) => "STRING",
            ASSIGN => "=",
            PLUS => "+",
            MINUS => "-",
            BANG => "!",
            ASTERISK => "*",
            SLASH => "/",
            LT => "<",
            GT => ">",
            EQ => "==",
            NEQ => "!=",
            COMMA => ",",
            SEMICOLON => ";",
            COLON => ":",
            LPAREN => "(",
            RPAREN => ")",
            LBRACE => "{",
            RBRACE => "}",
            LBRACKET => "[",
            RBRACKET => "]",
            FUNCTION => "FUNCTION",
            LET => "LET",
            TRUE => "TRUE",
            FALSE => "FALSE",
            IF => "IF",
            ELSE => "ELSE",
            RETURN => "RETURN",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal())
    }
}

pub fn lookup_identifier(ident: &str) -> Token {
    use Token::*;
    match ident {
        "fn" => FUNCTION,
        "let" => LET,
        "true" => TRUE,
        "false" => FALSE,
        "if" => IF,
        "else" => ELSE,
        "return" => RETURN,
        _ => IDENT(ident.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{lookup_identifier, Token};

    #[test]
    fn test_lookup_identifier() {
        let tests = vec![
            ("fn", Token::FUNCTION),
            ("let", Token::LET),
            ("return", Token::RETURN),
            ("lettuce", Token::IDENT("lettuce".to_string())),
        ];
        for (input, expected) in tests {
            assert_eq!(lookup_identifier(input), expected);
        }
    }

    #[test]
    fn test_literal_and_kind() {
        let tests = vec![
            (Token::FUNCTION, "fn", "FUNCTION"),
            (Token::NEQ, "!=", "!="),
            (Token::IDENT("x".to_string()), "x", "IDENT"),
            (Token::INT("42".to_string()), "42", "INT"),
            (Token::EOF, "", "EOF"),
            (Token::ILLEGAL('@'), "@", "ILLEGAL"),
        ];
        for (token, literal, kind) in tests {
            assert_eq!(token.literal(), literal);
            assert_eq!(token.kind(), kind);
        }
    }
}
