use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::token::{Glyph, Token, CALL, COMMENT, PRINT};

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("{}.*", regex::escape(&COMMENT.to_string())))
            .expect("comment pattern is valid")
    })
}

fn glyph_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternatives = Glyph::ALL
            .iter()
            .map(|glyph| regex::escape(glyph.symbol()))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternatives).expect("glyph pattern is valid")
    })
}

fn is_marker(fragment: &str) -> bool {
    let mut chars = fragment.chars();
    matches!((chars.next(), chars.next()), (Some(CALL), None) | (Some(PRINT), None))
}

pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source }
    }

    /// Comment-free source, one surviving line per space-separated segment.
    pub fn clean(&self) -> String {
        self.source
            .lines()
            .map(|line| comment_pattern().replace(line, ""))
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whitespace-separated fragments, with every glyph split out on its own.
    pub fn fragments(&self) -> Vec<String> {
        let cleaned = self.clean();
        trace!(cleaned = %cleaned, "stripped comments");

        let padded = glyph_pattern().replace_all(&cleaned, " $0 ");
        padded.split_whitespace().map(str::to_owned).collect()
    }

    pub fn lex(&self) -> Vec<Token> {
        let fragments = self.fragments();
        let mut tokens = Vec::with_capacity(fragments.len());

        let mut i = 0;
        while i < fragments.len() {
            let fragment = &fragments[i];

            if is_marker(fragment) {
                if let Some(next) = fragments.get(i + 1) {
                    if Glyph::from_symbol(next).is_none() && !is_marker(next) {
                        let merged = format!("{}{}", fragment, next);
                        trace!(token = %merged, "merged marker");
                        tokens.push(Token::classify(&merged));
                        i += 2;
                        continue;
                    }
                }
            }

            tokens.push(Token::classify(fragment));
            i += 1;
        }

        debug!(count = tokens.len(), "tokenized source");
        tokens
    }
}
