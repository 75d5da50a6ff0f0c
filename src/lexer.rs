use crate::token::{lookup_identifier, Token};
use std::str::Chars;

/// Turns source text into tokens. The iterator ends where the parser
/// expects `Token::EOF`.
pub struct Lexer<'a> {
    input: Chars<'a>,
    cur: Option<char>,
    peek: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input: input.chars(),
            cur: None,
            peek: None,
        };
        lexer.read_char();
        lexer.read_char();
        lexer
    }
    fn read_char(&mut self) {
        self.cur = self.peek;
        self.peek = self.input.next();
    }
    fn skip_whitespace(&mut self) {
        while self.cur.map_or(false, |c| c.is_ascii_whitespace()) {
            self.read_char();
        }
    }
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut res = String::new();
        while let Some(c) = self.cur.filter(|&c| pred(c)) {
            res.push(c);
            self.read_char();
        }
        res
    }
    fn read_number(&mut self) -> String {
        self.read_while(|c| c.is_ascii_digit())
    }
    fn read_identifier(&mut self) -> String {
        self.read_while(|c| is_letter(c) || c.is_ascii_digit())
    }
    // cur is the opening quote
    fn read_string(&mut self) -> Option<String> {
        self.read_char();
        let s = self.read_while(|c| c != '"');
        self.cur?;
        self.read_char();
        Some(s)
    }
    fn two_char(&mut self, second: char, matched: Token, single: Token) -> Token {
        self.read_char();
        if self.cur == Some(second) {
            self.read_char();
            matched
        } else {
            single
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        use Token::*;
        self.skip_whitespace();
        let c = self.cur?;
        let token = match c {
            '=' => self.two_char('=', EQ, ASSIGN),
            '!' => self.two_char('=', NEQ, BANG),
            '"' => match self.read_string() {
                Some(s) => STRING(s),
                None => ILLEGAL('"'),
            },
            c if is_letter(c) => lookup_identifier(&self.read_identifier()),
            c if c.is_ascii_digit() => INT(self.read_number()),
            c => {
                self.read_char();
                match c {
                    '+' => PLUS,
                    '-' => MINUS,
                    '*' => ASTERISK,
                    '/' => SLASH,
                    '<' => LT,
                    '>' => GT,
                    ',' => COMMA,
                    ';' => SEMICOLON,
                    ':' => COLON,
                    '(' => LPAREN,
                    ')' => RPAREN,
                    '{' => LBRACE,
                    '}' => RBRACE,
                    '[' => LBRACKET,
                    ']' => RBRACKET,
                    c => ILLEGAL(c),
                }
            }
        };
        Some(token)
    }
}
