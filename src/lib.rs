//! A tree-walking interpreter for the Monkey language.
//!
//! Source text goes through the [`lexer`], the Pratt [`parser`] builds an
//! [`ast::Program`], and the [`evaluator`] walks it against an
//! [`environment::Environment`].

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

use crate::ast::Program;
use crate::environment::Environment;
use crate::error::ParseErrors;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;
use std::cell::RefCell;
use std::rc::Rc;

pub fn parse(input: &str) -> Result<Program, ParseErrors> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parses and evaluates `input` in a fresh top-level environment. A program
/// with syntax errors is not evaluated.
pub fn run(input: &str) -> Result<Object, ParseErrors> {
    run_in(input, &Environment::new_shared())
}

/// Like [`run`], but keeps the bindings in `env`.
pub fn run_in(input: &str, env: &Rc<RefCell<Environment>>) -> Result<Object, ParseErrors> {
    let program = parse(input)?;
    Ok(evaluator::eval(&program, env))
}
