use crate::error::ExprError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    AmpAmp,
    PipePipe,
    Bang,
    EqEq,
    BangEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number `{n}`"),
            Token::Str(_) => "string literal".to_string(),
            Token::Ident(name) => format!("identifier `{name}`"),
            Token::True => "`true`".to_string(),
            Token::False => "`false`".to_string(),
            Token::Null => "`null`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::Dot => "`.`".to_string(),
            Token::AmpAmp => "`&&`".to_string(),
            Token::PipePipe => "`||`".to_string(),
            Token::Bang => "`!`".to_string(),
            Token::EqEq => "`==`".to_string(),
            Token::BangEq => "`!=`".to_string(),
            Token::Lt => "`<`".to_string(),
            Token::Le => "`<=`".to_string(),
            Token::Gt => "`>`".to_string(),
            Token::Ge => "`>=`".to_string(),
            Token::Plus => "`+`".to_string(),
            Token::Minus => "`-`".to_string(),
            Token::Star => "`*`".to_string(),
            Token::Slash => "`/`".to_string(),
            Token::Percent => "`%`".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SpannedToken {
    pub token: Token,
    /// Byte offset of the token's first character in the source.
    pub offset: usize,
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Decode the character starting at `offset` for error messages.
fn char_at(source: &str, offset: usize) -> char {
    source[offset..].chars().next().unwrap_or('\u{fffd}')
}

fn parse_error(position: usize, message: impl Into<String>) -> ExprError {
    ExprError::Parse {
        position,
        message: message.into(),
    }
}

/// Tokenize an expression source string.
///
/// The grammar is ASCII outside string literals, so the scanner walks bytes;
/// multi-byte UTF-8 only ever appears inside quoted strings, where it is
/// copied through verbatim.
pub(crate) fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < bytes.len() {
        let start = pos;
        let byte = bytes[pos];
        let token = match byte {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
                continue;
            }
            b'(' => {
                pos += 1;
                Token::LParen
            }
            b')' => {
                pos += 1;
                Token::RParen
            }
            b'[' => {
                pos += 1;
                Token::LBracket
            }
            b']' => {
                pos += 1;
                Token::RBracket
            }
            b'.' => {
                pos += 1;
                Token::Dot
            }
            b'+' => {
                pos += 1;
                Token::Plus
            }
            b'-' => {
                pos += 1;
                Token::Minus
            }
            b'*' => {
                pos += 1;
                Token::Star
            }
            b'/' => {
                pos += 1;
                Token::Slash
            }
            b'%' => {
                pos += 1;
                Token::Percent
            }
            b'&' => {
                if bytes.get(pos + 1) == Some(&b'&') {
                    pos += 2;
                    Token::AmpAmp
                } else {
                    return Err(parse_error(start, "expected `&&`"));
                }
            }
            b'|' => {
                if bytes.get(pos + 1) == Some(&b'|') {
                    pos += 2;
                    Token::PipePipe
                } else {
                    return Err(parse_error(start, "expected `||`"));
                }
            }
            b'!' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::BangEq
                } else {
                    pos += 1;
                    Token::Bang
                }
            }
            b'=' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::EqEq
                } else {
                    return Err(parse_error(start, "expected `==` (assignment is not supported)"));
                }
            }
            b'<' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Le
                } else {
                    pos += 1;
                    Token::Lt
                }
            }
            b'>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    Token::Ge
                } else {
                    pos += 1;
                    Token::Gt
                }
            }
            b'\'' | b'"' => {
                let (literal, next) = scan_string(source, pos)?;
                pos = next;
                Token::Str(literal)
            }
            b'0'..=b'9' => {
                let (value, next) = scan_number(source, pos)?;
                pos = next;
                Token::Number(value)
            }
            b if is_ident_start(b) => {
                let mut end = pos + 1;
                while end < bytes.len() && is_ident_continue(bytes[end]) {
                    end += 1;
                }
                let word = &source[pos..end];
                pos = end;
                match word {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    "and" => Token::AmpAmp,
                    "or" => Token::PipePipe,
                    "not" => Token::Bang,
                    _ => Token::Ident(word.to_string()),
                }
            }
            _ => {
                let ch = char_at(source, pos);
                return Err(parse_error(start, format!("unexpected character `{ch}`")));
            }
        };
        tokens.push(SpannedToken {
            token,
            offset: start,
        });
    }

    Ok(tokens)
}

/// Scan a quoted string literal starting at `start` (which holds the quote).
/// Returns the unescaped contents and the offset just past the closing quote.
fn scan_string(source: &str, start: usize) -> Result<(String, usize), ExprError> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut out = String::new();
    let mut pos = start + 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                let Some(&escaped) = bytes.get(pos + 1) else {
                    return Err(parse_error(start, "unterminated string literal"));
                };
                let replacement = match escaped {
                    b'\\' => '\\',
                    b'\'' => '\'',
                    b'"' => '"',
                    b'n' => '\n',
                    b't' => '\t',
                    _ => {
                        let ch = char_at(source, pos + 1);
                        return Err(parse_error(
                            pos,
                            format!("invalid escape sequence `\\{ch}`"),
                        ));
                    }
                };
                out.push(replacement);
                pos += 2;
            }
            b if b == quote => {
                return Ok((out, pos + 1));
            }
            b if b.is_ascii() => {
                out.push(b as char);
                pos += 1;
            }
            _ => {
                // Multi-byte UTF-8: copy the whole character through.
                let ch = char_at(source, pos);
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    Err(parse_error(start, "unterminated string literal"))
}

/// Scan a number literal: digits, optional fraction, optional exponent.
/// A `.` or `e` not followed by a digit is left for the next token.
fn scan_number(source: &str, start: usize) -> Result<(f64, usize), ExprError> {
    let bytes = source.as_bytes();
    let mut pos = start;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len()
        && bytes[pos] == b'.'
        && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)
    {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut probe = pos + 1;
        if probe < bytes.len() && (bytes[probe] == b'+' || bytes[probe] == b'-') {
            probe += 1;
        }
        if probe < bytes.len() && bytes[probe].is_ascii_digit() {
            pos = probe;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let literal = &source[start..pos];
    let value = literal
        .parse::<f64>()
        .map_err(|_| parse_error(start, format!("invalid number literal `{literal}`")))?;
    Ok((value, pos))
}
