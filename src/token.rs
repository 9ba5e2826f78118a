use std::fmt;

pub const CALL: char = '§';
pub const PRINT: char = '*';
pub const COMMENT: char = '※';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
  FuncStart,
  FuncEnd,
  IfStart,
  IfCond,
  IfThen,
  IfElse,
  IfEnd,
  TryStart,
  Catch,
  Finally,
  TryEnd,
  Throw,
  Return,
  Assign,
  Add,
  Sub,
  Less,
  Equal,
}

impl Glyph {
  pub const ALL: [Glyph; 18] = [
    Glyph::FuncStart,
    Glyph::FuncEnd,
    Glyph::IfStart,
    Glyph::IfCond,
    Glyph::IfThen,
    Glyph::IfElse,
    Glyph::IfEnd,
    Glyph::TryStart,
    Glyph::Catch,
    Glyph::Finally,
    Glyph::TryEnd,
    Glyph::Throw,
    Glyph::Return,
    Glyph::Assign,
    Glyph::Add,
    Glyph::Sub,
    Glyph::Less,
    Glyph::Equal,
  ];

  pub fn symbol(self) -> &'static str {
    match self {
      Glyph::FuncStart => "⥀",
      Glyph::FuncEnd => "⥁",
      Glyph::IfStart => "↜",
      Glyph::IfCond => "?",
      Glyph::IfThen => "⇒",
      Glyph::IfElse => "⇏",
      Glyph::IfEnd => "↯",
      Glyph::TryStart => "⛌",
      Glyph::Catch => "⎁",
      Glyph::Finally => "⎎",
      Glyph::TryEnd => "⍰",
      Glyph::Throw => "λ!",
      Glyph::Return => "⎋",
      Glyph::Assign => "≔",
      Glyph::Add => "⊞",
      Glyph::Sub => "⊖",
      Glyph::Less => "≺",
      Glyph::Equal => "≡",
    }
  }

  pub fn from_symbol(symbol: &str) -> Option<Glyph> {
    Glyph::ALL.iter().copied().find(|glyph| glyph.symbol() == symbol)
  }

  /// Ends the current block or opens its next clause.
  pub fn is_block_end(self) -> bool {
    matches!(
      self,
      Glyph::FuncEnd | Glyph::IfEnd | Glyph::TryEnd | Glyph::IfElse | Glyph::Catch | Glyph::Finally
    )
  }

  /// Opens a command on its own, without needing a left-hand side.
  pub fn is_command_starter(self) -> bool {
    matches!(self, Glyph::IfStart | Glyph::TryStart | Glyph::Throw | Glyph::Return)
  }
}

impl fmt::Display for Glyph {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
  Glyph(Glyph),
  Integer(i64),
  String(String),
  Identifier,
  /// `§name`, or a lone `§`.
  Call,
  /// `*operand`; `None` for a lone marker.
  Print(Option<Box<Token>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub slice: String,
}

impl Token {
  pub fn new(kind: TokenKind, slice: String) -> Token {
    Token {
      kind,
      slice,
    }
  }

  /// Classifies a raw fragment of source text.
  pub fn classify(slice: &str) -> Token {
    let kind = if slice.starts_with(CALL) {
      TokenKind::Call
    } else if let Some(operand) = slice.strip_prefix(PRINT) {
      if operand.is_empty() {
        TokenKind::Print(None)
      } else {
        TokenKind::Print(Some(Box::new(Token::classify(operand))))
      }
    } else if let Some(glyph) = Glyph::from_symbol(slice) {
      TokenKind::Glyph(glyph)
    } else if slice.starts_with('"') && slice.ends_with('"') {
      TokenKind::String(slice.trim_matches('"').to_owned())
    } else if let Ok(value) = slice.parse::<i64>() {
      TokenKind::Integer(value)
    } else {
      TokenKind::Identifier
    };

    Token::new(kind, slice.to_owned())
  }

  pub fn glyph(&self) -> Option<Glyph> {
    match self.kind {
      TokenKind::Glyph(glyph) => Some(glyph),
      _ => None,
    }
  }

  pub fn is(&self, glyph: Glyph) -> bool {
    self.glyph() == Some(glyph)
  }

  pub fn is_block_end(&self) -> bool {
    self.glyph().map_or(false, Glyph::is_block_end)
  }

  pub fn is_command_starter(&self) -> bool {
    match &self.kind {
      TokenKind::Print(_) => true,
      TokenKind::Glyph(glyph) => glyph.is_command_starter(),
      _ => false,
    }
  }

  pub fn is_call(&self) -> bool {
    matches!(self.kind, TokenKind::Call)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.slice)
  }
}

/// Joins tokens back into source form, one space apart.
pub fn join(tokens: &[Token]) -> String {
  tokens.iter().map(|token| token.slice.as_str()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_prefixed_identifiers() {
    assert_eq!(Token::classify("§add").kind, TokenKind::Call);
    assert_eq!(Token::classify("§").kind, TokenKind::Call);
    assert_eq!(Token::classify("*").kind, TokenKind::Print(None));

    let print = Token::classify("*\"hi\"");
    match print.kind {
      TokenKind::Print(Some(operand)) => assert_eq!(operand.kind, TokenKind::String("hi".to_owned())),
      other => panic!("unexpected kind {:?}", other),
    }
  }

  #[test]
  fn classifies_literals() {
    assert_eq!(Token::classify("42").kind, TokenKind::Integer(42));
    assert_eq!(Token::classify("-7").kind, TokenKind::Integer(-7));
    assert_eq!(Token::classify("\"\"").kind, TokenKind::String(String::new()));
    assert_eq!(Token::classify("\"").kind, TokenKind::String(String::new()));
    assert_eq!(Token::classify("x1").kind, TokenKind::Identifier);
    assert_eq!(Token::classify("λ!").kind, TokenKind::Glyph(Glyph::Throw));
  }

  #[test]
  fn glyph_roles() {
    assert!(Token::classify("↯").is_block_end());
    assert!(Token::classify("⎁").is_block_end());
    assert!(!Token::classify("≔").is_block_end());
    assert!(Token::classify("*x").is_command_starter());
    assert!(Token::classify("⎋").is_command_starter());
    assert!(!Token::classify("§f").is_command_starter());
  }

  #[test]
  fn symbols_round_trip() {
    for glyph in Glyph::ALL {
      assert_eq!(Glyph::from_symbol(glyph.symbol()), Some(glyph));
    }
  }
}
