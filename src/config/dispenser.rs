//! Directive block reader.
//!
//! Splits Caddyfile-style text into line-numbered directive lines and nests
//! them into blocks:
//!
//! ```text
//! login /context {
//!     jwt_secret "my secret"   # comment
//!     simple bob=secret
//! }
//! ```
//!
//! A line ending in `{` opens a block, a `}` closes it. Quoted tokens may
//! contain whitespace and braces; `\"` escapes a quote inside them. A `#`
//! at the start of a token comments out the rest of the line.

use crate::config::error::{ConfigError, ConfigResult};

/// One directive line: its name, arguments and optional sub-block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    /// 1-based source line of the directive name.
    pub line: usize,
    pub name: String,
    pub args: Vec<String>,
    /// Lines of a `{ ... }` block opened by this directive.
    pub block: Option<Vec<DirectiveLine>>,
}

impl DirectiveLine {
    /// Create a directive line without a sub-block.
    pub fn new(line: usize, name: impl Into<String>, args: &[&str]) -> Self {
        Self {
            line,
            name: name.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            block: None,
        }
    }

    /// Lines of the sub-block, empty when none was opened.
    pub fn block_lines(&self) -> &[DirectiveLine] {
        self.block.as_deref().unwrap_or_default()
    }

    /// Iterate the sub-block as a token source.
    pub fn lines(&self) -> impl TokenSource + '_ {
        self.block_lines().iter().cloned()
    }
}

/// Yields the directive lines of one block in document order.
pub trait TokenSource {
    fn next_directive(&mut self) -> Option<DirectiveLine>;
}

impl<I> TokenSource for I
where
    I: Iterator<Item = DirectiveLine>,
{
    fn next_directive(&mut self) -> Option<DirectiveLine> {
        self.next()
    }
}

#[derive(Debug)]
struct Token {
    text: String,
    line: usize,
    quoted: bool,
}

impl Token {
    fn is(&self, structural: &str) -> bool {
        !self.quoted && self.text == structural
    }
}

/// Parse a whole document into its top-level directives.
pub fn parse_blocks(input: &str) -> ConfigResult<Vec<DirectiveLine>> {
    let tokens = tokenize(input)?;
    let mut pos = 0;
    parse_lines(&tokens, &mut pos, None)
}

fn parse_lines(
    tokens: &[Token],
    pos: &mut usize,
    opened_at: Option<usize>,
) -> ConfigResult<Vec<DirectiveLine>> {
    let mut lines = Vec::new();
    loop {
        let Some(first) = tokens.get(*pos) else {
            return match opened_at {
                Some(line) => Err(ConfigError::Syntax {
                    line,
                    message: "unclosed block, expected '}'".to_string(),
                }),
                None => Ok(lines),
            };
        };

        if first.is("}") {
            if opened_at.is_none() {
                return Err(ConfigError::Syntax {
                    line: first.line,
                    message: "unexpected '}'".to_string(),
                });
            }
            *pos += 1;
            return Ok(lines);
        }
        if first.is("{") {
            return Err(ConfigError::Syntax {
                line: first.line,
                message: "block opened without a directive name".to_string(),
            });
        }

        let line = first.line;
        let name = first.text.clone();
        let mut args = Vec::new();
        let mut block = None;
        *pos += 1;

        while let Some(token) = tokens.get(*pos) {
            if token.line != line || token.is("}") {
                break;
            }
            *pos += 1;
            if token.is("{") {
                block = Some(parse_lines(tokens, pos, Some(line))?);
                break;
            }
            args.push(token.text.clone());
        }

        lines.push(DirectiveLine {
            line,
            name,
            args,
            block,
        });
    }
}

fn tokenize(input: &str) -> ConfigResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut line = 1;
    let mut token_line = 1;
    let mut chars = input.chars().peekable();

    let flush = |tokens: &mut Vec<Token>, current: &mut String, token_line: usize| {
        if !current.is_empty() {
            tokens.push(Token {
                text: std::mem::take(current),
                line: token_line,
                quoted: false,
            });
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                flush(&mut tokens, &mut current, token_line);
                line += 1;
            }
            c if c.is_whitespace() => flush(&mut tokens, &mut current, token_line),
            '#' if current.is_empty() => {
                while chars.peek().is_some_and(|&next| next != '\n') {
                    chars.next();
                }
            }
            '"' if current.is_empty() => {
                let start = line;
                let mut text = String::new();
                let mut closed = false;
                while let Some(q) = chars.next() {
                    match q {
                        '\\' if chars.peek() == Some(&'"') => {
                            text.push('"');
                            chars.next();
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\n' => {
                            line += 1;
                            text.push(q);
                        }
                        _ => text.push(q),
                    }
                }
                if !closed {
                    return Err(ConfigError::Syntax {
                        line: start,
                        message: "unterminated quoted token".to_string(),
                    });
                }
                tokens.push(Token {
                    text,
                    line: start,
                    quoted: true,
                });
            }
            _ => {
                if current.is_empty() {
                    token_line = line;
                }
                current.push(c);
            }
        }
    }
    flush(&mut tokens, &mut current, token_line);

    Ok(tokens)
}
