use std::io::Write;

use tracing::debug;

use crate::error::{Flow, Signal};
use crate::interpreter::Interpreter;
use crate::object::Value;
use crate::scan::{expression_end, find_clause, matching_end};
use crate::stack::ensure_sufficient_stack;
use crate::token::{Glyph, Token, TokenKind};

impl<W: Write> Interpreter<W> {
  /// Runs a whole region: a function body or the global block. Stopping on a stray
  /// terminator before the end is a syntax error.
  pub fn execute_body(&mut self, tokens: &[Token]) -> Flow<()> {
    let end = self.execute_block(tokens, 0)?;
    match tokens.get(end) {
      Some(token) => Err(Signal::syntax(format!("Unexpected token '{}'", token))),
      None => Ok(()),
    }
  }

  /// Executes commands from `start` until a block terminator or the end of `tokens`,
  /// returning the index it stopped at. The terminator itself is left for the caller.
  pub fn execute_block(&mut self, tokens: &[Token], start: usize) -> Flow<usize> {
    ensure_sufficient_stack(|| self.run_block(tokens, start))
  }

  fn run_block(&mut self, tokens: &[Token], start: usize) -> Flow<usize> {
    debug!(start, "executing block");
    let mut i = start;

    while i < tokens.len() {
      let token = &tokens[i];
      debug!(index = i, token = %token, "processing token");

      if token.is_block_end() {
        debug!(token = %token, "hit block end");
        return Ok(i);
      }

      i = match &token.kind {
        TokenKind::Print(operand) => self.print(operand.as_deref(), i)?,
        TokenKind::Glyph(Glyph::Throw) => return Err(self.throw(tokens, i)),
        TokenKind::Glyph(Glyph::Return) => return Err(self.ret(tokens, i)),
        TokenKind::Call => {
          let end = expression_end(tokens, i + 1);
          debug!(call = %token, "standalone call");
          self.call(&tokens[i..end])?;
          end
        }
        _ if tokens.get(i + 1).map_or(false, |next| next.is(Glyph::Assign)) => self.assignment(tokens, i)?,
        TokenKind::Glyph(Glyph::IfStart) => self.conditional(tokens, i)?,
        TokenKind::Glyph(Glyph::TryStart) => self.try_block(tokens, i)?,
        _ => return Err(Signal::syntax(format!("Unexpected token '{}'", token))),
      };
    }

    debug!("reached end of block");
    Ok(i)
  }

  fn print(&mut self, operand: Option<&Token>, i: usize) -> Flow<usize> {
    let operand = operand.ok_or_else(|| Signal::syntax("'*' command must be followed by a value."))?;
    let value = self.resolve(operand)?;
    debug!(value = %value, "print");
    self.emit(&value)?;
    Ok(i + 1)
  }

  /// Evaluates the expression following a throw or return glyph at `i`.
  fn operand_of(&mut self, tokens: &[Token], i: usize) -> Flow<Value> {
    let end = expression_end(tokens, i + 1);
    let expression = &tokens[i + 1..end];
    if expression.is_empty() {
      return Err(Signal::syntax(format!("'{}' command must be followed by a value.", tokens[i])));
    }
    self.evaluate(expression)
  }

  fn throw(&mut self, tokens: &[Token], i: usize) -> Signal {
    match self.operand_of(tokens, i) {
      Ok(message) => {
        debug!(message = %message, "throw");
        Signal::Error(message.to_string())
      }
      Err(signal) => signal,
    }
  }

  fn ret(&mut self, tokens: &[Token], i: usize) -> Signal {
    match self.operand_of(tokens, i) {
      Ok(value) => {
        debug!(value = %value, "return");
        Signal::Return(value)
      }
      Err(signal) => signal,
    }
  }

  fn assignment(&mut self, tokens: &[Token], i: usize) -> Flow<usize> {
    let target = &tokens[i];
    let start = i + 2;
    let end = expression_end(tokens, start);
    debug!(target = %target, "assignment");

    if end == start {
      return Err(Signal::syntax(format!("Missing expression for assignment to '{}'.", target)));
    }
    if target.kind != TokenKind::Identifier {
      return Err(Signal::error(format!("Cannot assign to command: {}", target)));
    }

    let value = self.evaluate(&tokens[start..end])?;
    debug!(target = %target, value = %value, "assigned");
    self.assign(&target.slice, value);
    Ok(end)
  }

  fn conditional(&mut self, tokens: &[Token], i: usize) -> Flow<usize> {
    let end = matching_end(tokens, i, Glyph::IfStart, Glyph::IfEnd)?;

    let cond = find_clause(tokens, i + 1, end, Glyph::IfCond)
      .ok_or_else(|| Signal::syntax(format!("Missing '{}' for '{}'.", Glyph::IfCond, Glyph::IfStart)))?;
    let then = find_clause(tokens, cond, end, Glyph::IfThen)
      .ok_or_else(|| Signal::syntax(format!("Missing '{}' for '{}'.", Glyph::IfThen, Glyph::IfStart)))?;

    let condition = &tokens[cond + 1..then];
    if condition.is_empty() {
      return Err(Signal::error("Invalid expression: Empty IF condition."));
    }
    let result = self.evaluate(condition)?;
    debug!(result = %result, "if condition");

    let otherwise = find_clause(tokens, then, end, Glyph::IfElse);
    if result.is_truthy() {
      debug!("executing then branch");
      self.execute_block(tokens, then + 1)?;
    } else if let Some(otherwise) = otherwise {
      debug!("executing else branch");
      self.execute_block(tokens, otherwise + 1)?;
    } else {
      debug!("condition false, no else branch");
    }

    Ok(end + 1)
  }

  fn try_block(&mut self, tokens: &[Token], i: usize) -> Flow<usize> {
    let end = matching_end(tokens, i, Glyph::TryStart, Glyph::TryEnd)?;
    let catch = find_clause(tokens, i + 1, end, Glyph::Catch);
    let finally = find_clause(tokens, i + 1, end, Glyph::Finally);

    // `⎁` directly before `⍰` declares no handler.
    let handler = catch.filter(|&at| at + 1 < end);

    debug!("executing try block");
    let outcome = match self.execute_block(tokens, i + 1) {
      Err(Signal::Error(message)) => match handler {
        Some(catch) => self.catch(tokens, catch, message),
        None => {
          debug!(error = %message, "no catch block, rethrowing");
          Err(Signal::Error(message))
        }
      },
      other => other.map(|_| ()),
    };

    if let Err(Signal::Fault(fault)) = outcome {
      return Err(Signal::Fault(fault));
    }

    if let Some(finally) = finally {
      debug!("executing finally block");
      self.execute_block(tokens, finally + 1)?;
    }

    outcome?;
    Ok(end + 1)
  }

  /// Binds `message` to the variable after the `⎁` at `catch` and runs the handler.
  fn catch(&mut self, tokens: &[Token], catch: usize, message: String) -> Flow<()> {
    let variable = &tokens[catch + 1];
    if variable.kind != TokenKind::Identifier {
      return Err(Signal::syntax(format!(
        "'{}' must be followed by an error variable, found '{}'.",
        Glyph::Catch,
        variable
      )));
    }

    debug!(error = %message, variable = %variable, "executing catch block");
    self.bind(&variable.slice, Value::String(message));
    self.execute_block(tokens, catch + 2).map(|_| ())
  }
}
