use std::cmp::Ordering;
use std::io::Write;

use tracing::debug;

use crate::env::Env;
use crate::error::{Flow, Signal};
use crate::interpreter::Interpreter;
use crate::object::Value;
use crate::token::{join, Glyph, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Add,
  Subtract,
  Less,
  Equal,
}

impl BinaryOperator {
  fn from_token(token: &Token) -> Option<BinaryOperator> {
    match token.glyph()? {
      Glyph::Add => Some(BinaryOperator::Add),
      Glyph::Sub => Some(BinaryOperator::Subtract),
      Glyph::Less => Some(BinaryOperator::Less),
      Glyph::Equal => Some(BinaryOperator::Equal),
      _ => None,
    }
  }

  fn glyph(self) -> Glyph {
    match self {
      BinaryOperator::Add => Glyph::Add,
      BinaryOperator::Subtract => Glyph::Sub,
      BinaryOperator::Less => Glyph::Less,
      BinaryOperator::Equal => Glyph::Equal,
    }
  }
}

fn type_error(left: &Value, op: BinaryOperator, right: &Value) -> Signal {
  Signal::error(format!(
    "Type error: cannot apply '{}' to {} '{}' and {} '{}'",
    op.glyph(),
    left.type_name(),
    left,
    right.type_name(),
    right,
  ))
}

pub fn eval_binary(left: Value, op: BinaryOperator, right: Value) -> Flow<Value> {
  match (op, &left, &right) {
    (BinaryOperator::Add, Value::Integer(l), Value::Integer(r)) => l
      .checked_add(*r)
      .map(Value::Integer)
      .ok_or_else(|| Signal::error(format!("Integer overflow: {} {} {}", l, op.glyph(), r))),
    (BinaryOperator::Add, Value::String(l), Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),
    (BinaryOperator::Subtract, Value::Integer(l), Value::Integer(r)) => l
      .checked_sub(*r)
      .map(Value::Integer)
      .ok_or_else(|| Signal::error(format!("Integer overflow: {} {} {}", l, op.glyph(), r))),
    (BinaryOperator::Less, _, _) => match left.compare(&right) {
      Some(ordering) => Ok(Value::Boolean(ordering == Ordering::Less)),
      None => Err(type_error(&left, op, &right)),
    },
    (BinaryOperator::Equal, _, _) => Ok(Value::Boolean(left == right)),
    _ => Err(type_error(&left, op, &right)),
  }
}

impl<W: Write> Interpreter<W> {
  /// Value of a single token: a literal, or a variable looked up in the active scope
  /// and then in the globals.
  pub fn resolve(&self, token: &Token) -> Flow<Value> {
    match &token.kind {
      TokenKind::String(s) => Ok(Value::String(s.clone())),
      TokenKind::Integer(n) => Ok(Value::Integer(*n)),
      _ => self
        .lookup(&token.slice)
        .cloned()
        .ok_or_else(|| Signal::error(format!("Undefined variable/symbol: {}", token.slice))),
    }
  }

  pub fn evaluate(&mut self, tokens: &[Token]) -> Flow<Value> {
    debug!(expression = %join(tokens), "evaluating");

    match tokens {
      [] => Err(Signal::error("Invalid expression: Empty expression.")),
      [first, ..] if first.is_call() => self.call(tokens),
      [single] => self.resolve(single),
      [left, op, right] => match BinaryOperator::from_token(op) {
        Some(op) => {
          let left = self.resolve(left)?;
          let right = self.resolve(right)?;
          eval_binary(left, op, right)
        }
        None => Err(Signal::error(format!("Invalid expression: {}", join(tokens)))),
      },
      _ => Err(Signal::error(format!("Invalid expression: {}", join(tokens)))),
    }
  }

  /// Calls the function named by `tokens[0]` with the remaining tokens as arguments.
  pub fn call(&mut self, tokens: &[Token]) -> Flow<Value> {
    let (callee, args) = match tokens.split_first() {
      Some(split) => split,
      None => return Err(Signal::error("Invalid expression: Empty expression.")),
    };
    let name = callee.slice.as_str();
    debug!(function = name, args = %join(args), "calling");

    let function = match self.functions.get(name) {
      Some(function) => function.clone(),
      None => return Err(Signal::error(format!("Function not found: {}", name))),
    };

    if args.len() != function.params.len() {
      return Err(Signal::error(format!(
        "Parameter error when calling {}. Required {}, received {}.",
        name,
        function.params.len(),
        args.len(),
      )));
    }

    if self.frames.len() >= self.config.max_call_depth {
      return Err(Signal::error(format!(
        "Call depth limit of {} exceeded calling {}",
        self.config.max_call_depth, name,
      )));
    }

    let mut bound = Vec::with_capacity(args.len());
    for (param, arg) in function.params.iter().zip(args) {
      let value = self.resolve(arg)?;
      debug!(param = %param, value = %value, "binding parameter");
      bound.push((param.clone(), value));
    }

    let frame = Env::for_call(&self.globals, self.local(), bound);
    self.frames.push(frame);
    let outcome = self.execute_body(&function.body);
    self.frames.pop();

    match outcome {
      Ok(()) => {
        debug!(function = name, "finished without a value");
        Ok(Value::Void)
      }
      Err(Signal::Return(value)) => {
        debug!(function = name, value = %value, "returned");
        Ok(value)
      }
      Err(signal) => Err(signal),
    }
  }
}
