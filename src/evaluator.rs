use crate::ast::{BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::object::{Function, HashPair, Object};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Why evaluation of a block stopped early.
#[derive(Debug)]
enum Signal {
    /// `return` unwinding to the nearest function call or the program.
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

type EvalResult = Result<Object, Signal>;

/// Evaluates `program` in `env`. A runtime error comes back as
/// `Object::Error`.
pub fn eval(program: &Program, env: &Rc<RefCell<Environment>>) -> Object {
    match eval_program(program, env) {
        Ok(obj) => obj,
        Err(Signal::Return(obj)) => obj,
        Err(Signal::Error(err)) => {
            tracing::debug!(%err, "runtime error");
            Object::error(err.to_string())
        }
    }
}

fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> EvalResult {
    let mut result = Object::Null;
    for stmt in &program.statements {
        result = match eval_statement(stmt, env) {
            Err(Signal::Return(value)) => return Ok(value),
            other => other?,
        };
    }
    Ok(result)
}

fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> EvalResult {
    let mut result = Object::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env)?;
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> EvalResult {
    use Statement::*;
    match statement {
        LetStatement { name, value, .. } => {
            let value = eval_expression(value, env)?;
            Ok(env.borrow_mut().set(&name.value, value))
        }
        ReturnStatement { value: Some(value), .. } => {
            let value = eval_expression(value, env)?;
            Err(Signal::Return(value))
        }
        ReturnStatement { value: None, .. } => Err(RuntimeError::MissingReturnValue.into()),
        ExpressionStatement(exp) => eval_expression(exp, env),
        BlockStatement(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> EvalResult {
    use Expression::*;
    match expression {
        Identifier(ident) => eval_identifier(&ident.value, env),
        IntegerLiteral { value, .. } => Ok(Object::Integer { value: *value }),
        StringLiteral { value, .. } => Ok(Object::string(value.as_str())),
        Boolean { value, .. } => Ok(Object::boolean(*value)),
        PrefixExpression {
            operator, right, ..
        } => {
            let right = eval_expression(right, env)?;
            eval_prefix_expression(*operator, right)
        }
        InfixExpression {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix_expression(*operator, left, right)
        }
        IfExpression {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, env)
            } else if let Some(alt) = alternative {
                eval_block_statement(alt, env)
            } else {
                Ok(Object::Null)
            }
        }
        FunctionLiteral {
            parameters, body, ..
        } => Ok(Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: Rc::clone(body),
            env: Rc::clone(env),
        }))),
        CallExpression {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env)?;
            let arguments = eval_expressions(arguments, env)?;
            apply_function(function, arguments)
        }
        ArrayLiteral { elements, .. } => Ok(Object::array(eval_expressions(elements, env)?)),
        IndexExpression { left, index, .. } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            eval_index_expression(left, index)
        }
        HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),
    }
}

fn eval_expressions(
    expressions: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Object>, Signal> {
    expressions
        .iter()
        .map(|exp| eval_expression(exp, env))
        .collect()
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> EvalResult {
    if let Some(obj) = env.borrow().get(name) {
        return Ok(obj);
    }
    match builtins::lookup(name) {
        Some(builtin) => Ok(Object::Builtin(builtin)),
        None => Err(RuntimeError::IdentifierNotFound(name.to_string()).into()),
    }
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> EvalResult {
    match operator {
        PrefixOperator::BANG => Ok(Object::boolean(!right.is_truthy())),
        PrefixOperator::MINUS => match right {
            Object::Integer { value } => value
                .checked_neg()
                .map(|value| Object::Integer { value })
                .ok_or_else(|| RuntimeError::IntegerOverflow(format!("-({})", value)).into()),
            other => Err(RuntimeError::UnknownPrefixOperator {
                operator: operator.to_string(),
                right: other.r#type(),
            }
            .into()),
        },
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> EvalResult {
    match (&left, &right) {
        (Object::Integer { value: l }, Object::Integer { value: r }) => {
            eval_integer_infix_expression(operator, *l, *r)
        }
        (Object::String { value: l }, Object::String { value: r }) => match operator {
            InfixOperator::PLUS => Ok(Object::string(format!("{}{}", l, r))),
            _ => Err(unknown_infix_operator(operator, &left, &right)),
        },
        _ => match operator {
            InfixOperator::EQ => Ok(Object::boolean(left == right)),
            InfixOperator::NEQ => Ok(Object::boolean(left != right)),
            _ if left.r#type() != right.r#type() => Err(RuntimeError::TypeMismatch {
                left: left.r#type(),
                operator: operator.to_string(),
                right: right.r#type(),
            }
            .into()),
            _ => Err(unknown_infix_operator(operator, &left, &right)),
        },
    }
}

fn unknown_infix_operator(operator: InfixOperator, left: &Object, right: &Object) -> Signal {
    RuntimeError::UnknownInfixOperator {
        left: left.r#type(),
        operator: operator.to_string(),
        right: right.r#type(),
    }
    .into()
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> EvalResult {
    use InfixOperator::*;
    let value = match operator {
        PLUS => left.checked_add(right),
        MINUS => left.checked_sub(right),
        ASTERISK => left.checked_mul(right),
        SLASH => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero.into());
            }
            // truncates toward zero
            left.checked_div(right)
        }
        LT => return Ok(Object::boolean(left < right)),
        GT => return Ok(Object::boolean(left > right)),
        EQ => return Ok(Object::boolean(left == right)),
        NEQ => return Ok(Object::boolean(left != right)),
    };
    value
        .map(|value| Object::Integer { value })
        .ok_or_else(|| {
            RuntimeError::IntegerOverflow(format!("{} {} {}", left, operator, right)).into()
        })
}

fn apply_function(function: Object, arguments: Vec<Object>) -> EvalResult {
    match function {
        Object::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(RuntimeError::WrongArgumentCount {
                    want: function.parameters.len(),
                    got: arguments.len(),
                }
                .into());
            }
            tracing::trace!(parameters = function.parameters.len(), "applying function");
            let mut env = Environment::new_enclosed(Rc::clone(&function.env));
            for (param, arg) in function.parameters.iter().zip(arguments) {
                env.set(&param.value, arg);
            }
            let env = Rc::new(RefCell::new(env));
            match eval_block_statement(&function.body, &env) {
                Err(Signal::Return(value)) => Ok(value),
                other => other,
            }
        }
        Object::Builtin(builtin) => {
            tracing::trace!(name = builtin.name, "applying builtin");
            match (builtin.func)(&arguments) {
                Object::Error { message } => Err(RuntimeError::Builtin(message).into()),
                obj => Ok(obj),
            }
        }
        other => Err(RuntimeError::NotAFunction(other.r#type()).into()),
    }
}

fn eval_index_expression(left: Object, index: Object) -> EvalResult {
    match (&left, &index) {
        (Object::Array { elements }, Object::Integer { value }) => Ok(usize::try_from(*value)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Object::Null)),
        (Object::Hash { pairs }, _) => {
            let key = index
                .hash_key()
                .ok_or_else(|| RuntimeError::UnusableHashKey(index.r#type()))?;
            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null))
        }
        _ => Err(RuntimeError::IndexNotSupported(left.r#type()).into()),
    }
}

fn eval_hash_literal(
    pairs: &[(Expression, Expression)],
    env: &Rc<RefCell<Environment>>,
) -> EvalResult {
    let mut map = BTreeMap::new();
    for (key_exp, value_exp) in pairs {
        let key = eval_expression(key_exp, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| RuntimeError::UnusableHashKey(key.r#type()))?;
        let value = eval_expression(value_exp, env)?;
        map.insert(hash_key, HashPair { key, value });
    }
    Ok(Object::Hash {
        pairs: Rc::new(map),
    })
}
