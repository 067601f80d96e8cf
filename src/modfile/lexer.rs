//! Line lexer for go.mod files.
//!
//! go.mod is line-oriented: every statement, block opener, block entry and
//! block closer sits on its own line, so the lexer works one line at a time
//! and never has to carry state across lines.

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `,`
    Comma,
    /// A bare word such as `require`, `=>` or `github.com/pkg/errors`
    Word(String),
    /// A quoted string, already unescaped
    Str(String),
}

impl Token {
    /// Returns the textual value of a word or string token.
    pub fn value(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Reports whether this token is the unquoted word `word`.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Word(w) if w == word)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrack => write!(f, "["),
            Token::RBrack => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Word(s) => write!(f, "{s}"),
            Token::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// The tokens of one source line plus its trailing comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Tokens in source order, comments excluded
    pub tokens: Vec<Token>,
    /// Text after `//`, trimmed, if the line carries a comment
    pub comment: Option<String>,
}

fn is_special(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | ',' | '"' | '`')
}

/// Splits one line into tokens.
///
/// Returns the error message (without position) on malformed input.
pub fn lex_line(number: usize, text: &str) -> Result<Line, String> {
    let mut line = Line {
        number,
        ..Line::default()
    };
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        let Some(c) = rest.chars().next() else {
            break;
        };

        if let Some(comment) = rest.strip_prefix("//") {
            line.comment = Some(comment.trim().to_string());
            break;
        }
        if rest.starts_with("/*") {
            return Err("mod files must use // comments, not /* */ comments".to_string());
        }

        let single = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBrack),
            ']' => Some(Token::RBrack),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = single {
            line.tokens.push(token);
            rest = &rest[1..];
            continue;
        }

        match c {
            '"' => {
                let (value, remaining) = lex_quoted(&rest[1..])?;
                line.tokens.push(Token::Str(value));
                rest = remaining;
            }
            '`' => {
                let body = &rest[1..];
                let end = body.find('`').ok_or_else(|| "unterminated raw string".to_string())?;
                line.tokens.push(Token::Str(body[..end].to_string()));
                rest = &body[end + 1..];
            }
            _ => {
                let mut end = rest.len();
                for (idx, ch) in rest.char_indices() {
                    if ch.is_whitespace() || is_special(ch) {
                        end = idx;
                        break;
                    }
                    if rest[idx..].starts_with("//") || rest[idx..].starts_with("/*") {
                        end = idx;
                        break;
                    }
                }
                line.tokens.push(Token::Word(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
    }

    Ok(line)
}

/// Reads an interpreted string body up to the closing quote.
///
/// Accepts the escapes of a Go interpreted string literal: `\a \b \f \n \r
/// \t \v \\ \"`, `\xHH`, three-digit octal, `\uHHHH` and `\UHHHHHHHH`.
fn lex_quoted(body: &str) -> Result<(String, &str), String> {
    let mut value = Vec::new();
    let mut rest = body;

    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        match ch {
            '"' => {
                let value = String::from_utf8(value)
                    .map_err(|_| "quoted string is not valid UTF-8".to_string())?;
                return Ok((value, rest));
            }
            '\\' => rest = unescape(rest, &mut value)?,
            _ => value.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }

    Err("unterminated quoted string".to_string())
}

/// Decodes one escape sequence (after the backslash) into `out`.
fn unescape<'a>(rest: &'a str, out: &mut Vec<u8>) -> Result<&'a str, String> {
    let Some(c) = rest.chars().next() else {
        return Err("unterminated quoted string".to_string());
    };
    let after = &rest[c.len_utf8()..];

    let byte = match c {
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'n' => b'\n',
        'r' => b'\r',
        't' => b'\t',
        'v' => 0x0b,
        '\\' => b'\\',
        '"' => b'"',
        'x' => {
            let (value, remaining) = escape_digits(after, 2, 16, c)?;
            out.push(value as u8);
            return Ok(remaining);
        }
        '0'..='7' => {
            let (value, remaining) = escape_digits(rest, 3, 8, c)?;
            let byte = u8::try_from(value).map_err(|_| format!("invalid escape sequence \\{c}"))?;
            out.push(byte);
            return Ok(remaining);
        }
        'u' | 'U' => {
            let count = if c == 'u' { 4 } else { 8 };
            let (value, remaining) = escape_digits(after, count, 16, c)?;
            let decoded =
                char::from_u32(value).ok_or_else(|| format!("invalid escape sequence \\{c}"))?;
            out.extend_from_slice(decoded.encode_utf8(&mut [0; 4]).as_bytes());
            return Ok(remaining);
        }
        other => return Err(format!("invalid escape sequence \\{other}")),
    };
    out.push(byte);
    Ok(after)
}

/// Reads exactly `count` digits in `radix` from the start of `text`.
fn escape_digits(text: &str, count: usize, radix: u32, escape: char) -> Result<(u32, &str), String> {
    let invalid = || format!("invalid escape sequence \\{escape}");
    let digits = text.get(..count).ok_or_else(invalid)?;
    if !digits.chars().all(|d| d.is_digit(radix)) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, radix).map_err(|_| invalid())?;
    Ok((value, &text[count..]))
}
