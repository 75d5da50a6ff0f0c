use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::error::{ParseError, ParseErrors};
use crate::lexer::Lexer;
use crate::token::Token;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
enum Precedence {
    LOWEST,
    EQUALS,
    LESSGREATER,
    SUM,
    PRODUCT,
    PREFIX,
    CALL,
    INDEX,
}

impl Token {
    fn precedence(&self) -> Precedence {
        use Precedence::*;
        use Token::*;
        match self {
            PLUS | MINUS => SUM,
            ASTERISK | SLASH => PRODUCT,
            LT | GT => LESSGREATER,
            EQ | NEQ => EQUALS,
            LPAREN => CALL,
            LBRACKET => INDEX,
            _ => LOWEST,
        }
    }
}

/// Pratt parser over a [`Lexer`].
///
/// Syntax errors are collected rather than returned early: a construct that
/// fails yields `None`, the surrounding statement is dropped and parsing goes
/// on with the next token.
pub struct Parser<'a> {
    l: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(l: Lexer<'a>) -> Self {
        let mut parser = Parser {
            l,
            cur: Token::EOF,
            peek: Token::EOF,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }
    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.l.next().unwrap_or(Token::EOF));
    }
    fn cur_token_is(&self, token: &Token) -> bool {
        &self.cur == token
    }
    fn peek_token_is(&self, token: &Token) -> bool {
        &self.peek == token
    }
    fn expect_peek(&mut self, token: Token) -> Option<()> {
        if self.peek_token_is(&token) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(token.kind());
            None
        }
    }
    fn expect_peek_identifier(&mut self) -> Option<Identifier> {
        match &self.peek {
            Token::IDENT(name) => {
                let value = name.clone();
                self.next_token();
                Some(Identifier {
                    token: self.cur.clone(),
                    value,
                })
            }
            _ => {
                self.peek_error("IDENT");
                None
            }
        }
    }
    fn peek_error(&mut self, expected: &'static str) {
        let got = self.peek.kind();
        self.record(ParseError::UnexpectedToken { expected, got });
    }
    fn record(&mut self, err: ParseError) {
        tracing::debug!(%err, "syntax error");
        self.errors.push(err);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses the whole token stream. Check [`Parser::errors`] before using
    /// the result: statements that failed to parse are missing from it.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_token_is(&Token::EOF) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Program { statements }
    }

    pub fn parse(&mut self) -> Result<Program, ParseErrors> {
        let program = self.parse_program();
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(ParseErrors(std::mem::take(&mut self.errors)))
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur {
            Token::LET => self.parse_let_statement(),
            Token::RETURN => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }
    fn skip_semicolon(&mut self) {
        if self.peek_token_is(&Token::SEMICOLON) {
            self.next_token();
        }
    }
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let name = self.expect_peek_identifier()?;
        self.expect_peek(Token::ASSIGN)?;
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST)?;
        self.skip_semicolon();
        Some(Statement::LetStatement { token, name, value })
    }
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        if matches!(self.peek, Token::SEMICOLON | Token::RBRACE | Token::EOF) {
            self.skip_semicolon();
            return Some(Statement::ReturnStatement { token, value: None });
        }
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST)?;
        self.skip_semicolon();
        Some(Statement::ReturnStatement {
            token,
            value: Some(value),
        })
    }
    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let exp = self.parse_expression(Precedence::LOWEST)?;
        self.skip_semicolon();
        Some(Statement::ExpressionStatement(exp))
    }
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        use Token::*;
        let mut exp = self.parse_prefix()?;
        while !self.peek_token_is(&SEMICOLON) && precedence < self.peek.precedence() {
            exp = match &self.peek {
                PLUS | MINUS | ASTERISK | SLASH | LT | GT | EQ | NEQ => {
                    self.next_token();
                    self.parse_infix_expression(exp)?
                }
                LPAREN => {
                    self.next_token();
                    self.parse_call_expression(exp)?
                }
                LBRACKET => {
                    self.next_token();
                    self.parse_index_expression(exp)?
                }
                _ => return Some(exp),
            };
        }
        Some(exp)
    }
    fn parse_prefix(&mut self) -> Option<Expression> {
        use Expression::*;
        use Token::*;
        let token = self.cur.clone();
        let exp = match &self.cur {
            IDENT(name) => Identifier(crate::ast::Identifier {
                value: name.clone(),
                token,
            }),
            INT(literal) => match literal.parse::<i64>() {
                Ok(value) => IntegerLiteral { token, value },
                Err(_) => {
                    let literal = literal.clone();
                    self.record(ParseError::InvalidInteger(literal));
                    return None;
                }
            },
            STRING(value) => StringLiteral {
                value: value.clone(),
                token,
            },
            TRUE => Boolean { token, value: true },
            FALSE => Boolean {
                token,
                value: false,
            },
            MINUS | BANG => self.parse_prefix_expression()?,
            LPAREN => self.parse_grouped_expression()?,
            IF => self.parse_if_expression()?,
            FUNCTION => self.parse_function_literal()?,
            LBRACKET => self.parse_array_literal()?,
            LBRACE => self.parse_hash_literal()?,
            other => {
                let kind = other.kind();
                self.record(ParseError::NoPrefixParseFn(kind));
                return None;
            }
        };
        Some(exp)
    }
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RPAREN)?;
        Some(exp)
    }
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = match &token {
            Token::MINUS => PrefixOperator::MINUS,
            _ => PrefixOperator::BANG,
        };
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX)?;
        Some(Expression::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        })
    }
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let operator = match &token {
            Token::PLUS => InfixOperator::PLUS,
            Token::MINUS => InfixOperator::MINUS,
            Token::ASTERISK => InfixOperator::ASTERISK,
            Token::SLASH => InfixOperator::SLASH,
            Token::LT => InfixOperator::LT,
            Token::GT => InfixOperator::GT,
            Token::EQ => InfixOperator::EQ,
            _ => InfixOperator::NEQ,
        };
        let precedence = self.cur.precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.expect_peek(Token::LPAREN)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RPAREN)?;
        self.expect_peek(Token::LBRACE)?;
        let consequence = self.parse_block_statement()?;
        let alternative = if self.peek_token_is(&Token::ELSE) {
            self.next_token();
            self.expect_peek(Token::LBRACE)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };
        Some(Expression::IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }
    // cur is `{`; returns with cur on the matching `}`
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let token = self.cur.clone();
        self.next_token();
        let mut statements = Vec::new();
        while !self.cur_token_is(&Token::RBRACE) {
            if self.cur_token_is(&Token::EOF) {
                self.record(ParseError::UnexpectedToken {
                    expected: "}",
                    got: "EOF",
                });
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Some(BlockStatement { token, statements })
    }
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        self.expect_peek(Token::LPAREN)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(Token::LBRACE)?;
        let body = self.parse_block_statement()?;
        Some(Expression::FunctionLiteral {
            token,
            parameters,
            body: Rc::new(body),
        })
    }
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        if self.peek_token_is(&Token::RPAREN) {
            self.next_token();
            return Some(Vec::new());
        }
        let mut identifiers = vec![self.expect_peek_identifier()?];
        while self.peek_token_is(&Token::COMMA) {
            self.next_token();
            identifiers.push(self.expect_peek_identifier()?);
        }
        self.expect_peek(Token::RPAREN)?;
        Some(identifiers)
    }
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        let arguments = self.parse_expression_list(Token::RPAREN)?;
        Some(Expression::CallExpression {
            token,
            function: Box::new(function),
            arguments,
        })
    }
    fn parse_expression_list(&mut self, end: Token) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_token_is(&end) {
            self.next_token();
            return Some(list);
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::LOWEST)?);
        while self.peek_token_is(&Token::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::LOWEST)?);
        }
        self.expect_peek(end)?;
        Some(list)
    }
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let elements = self.parse_expression_list(Token::RBRACKET)?;
        Some(Expression::ArrayLiteral { token, elements })
    }
    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur.clone();
        self.next_token();
        let index = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RBRACKET)?;
        Some(Expression::IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur.clone();
        let mut pairs = Vec::new();
        while !self.peek_token_is(&Token::RBRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::LOWEST)?;
            self.expect_peek(Token::COLON)?;
            self.next_token();
            let value = self.parse_expression(Precedence::LOWEST)?;
            pairs.push((key, value));
            if !self.peek_token_is(&Token::RBRACE) {
                self.expect_peek(Token::COMMA)?;
            }
        }
        self.expect_peek(Token::RBRACE)?;
        Some(Expression::HashLiteral { token, pairs })
    }
}
