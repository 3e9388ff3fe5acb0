//! Token lookup for text that is still being typed.
//!
//! Unlike [`syntax`](crate::syntax), this never fails: unterminated strings end
//! at the end of their line and unbalanced brackets are tolerated, so a cursor
//! inside `{"fo` still resolves to a property name.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A string in key position of an object.
    PropertyName,
    String,
    /// A number, `true`, `false`, `null`, or anything else that is not
    /// punctuation.
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}

/// The token under a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorToken {
    pub kind: TokenKind,
    /// Byte offset of the first character, e.g. the opening quote.
    pub from: usize,
    pub to: usize,
    /// Enclosing containers, outermost first.
    pub containers: Vec<Container>,
}

impl CursorToken {
    /// A property name of the top-level object.
    pub fn is_top_level_property_name(&self) -> bool {
        self.kind == TokenKind::PropertyName && self.containers == [Container::Object]
    }
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object { expect_key: bool },
    Array,
}

impl Frame {
    fn container(self) -> Container {
        match self {
            Self::Object { .. } => Container::Object,
            Self::Array => Container::Array,
        }
    }
}

/// Find the innermost token with `from < pos <= to`.
///
/// A cursor directly after a token still belongs to it. Punctuation and
/// whitespace have no token.
pub fn token_at(content: &str, pos: usize) -> Option<CursorToken> {
    let bytes = content.as_bytes();
    let mut stack: Vec<Frame> = Vec::new();
    let mut i = 0;

    while i < bytes.len() && i < pos {
        match bytes[i] {
            b'{' => {
                stack.push(Frame::Object { expect_key: true });
                i += 1;
            }
            b'[' => {
                stack.push(Frame::Array);
                i += 1;
            }
            b'}' | b']' => {
                stack.pop();
                i += 1;
            }
            b':' => {
                if let Some(Frame::Object { expect_key }) = stack.last_mut() {
                    *expect_key = false;
                }
                i += 1;
            }
            b',' => {
                if let Some(Frame::Object { expect_key }) = stack.last_mut() {
                    *expect_key = true;
                }
                i += 1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            b'"' => {
                let end = string_end(bytes, i);
                if pos <= end {
                    let kind = if matches!(stack.last(), Some(Frame::Object { expect_key: true })) {
                        TokenKind::PropertyName
                    } else {
                        TokenKind::String
                    };
                    return Some(token(kind, i, end, &stack));
                }
                i = end;
            }
            _ => {
                let end = word_end(bytes, i);
                if pos <= end {
                    return Some(token(TokenKind::Word, i, end, &stack));
                }
                i = end;
            }
        }
    }
    None
}

fn token(kind: TokenKind, from: usize, to: usize, stack: &[Frame]) -> CursorToken {
    CursorToken {
        kind,
        from,
        to,
        containers: stack.iter().map(|frame| frame.container()).collect(),
    }
}

/// Offset just past the string starting at `start`, or the end of the line if
/// it is unterminated.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'[' | b']' | b':' | b',' | b'"'))
        .map_or(bytes.len(), |len| start + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_top_level_property_name() {
        let token = token_at(r#"{""}"#, 2).expect("token");
        assert_eq!(token.kind, TokenKind::PropertyName);
        assert_eq!((token.from, token.to), (1, 3));
        assert!(token.is_top_level_property_name());
    }

    #[test]
    fn unterminated_property_name() {
        let token = token_at("{\n  \"fo", 7).expect("token");
        assert_eq!(token.kind, TokenKind::PropertyName);
        assert_eq!((token.from, token.to), (4, 7));
        assert!(token.is_top_level_property_name());
    }

    #[test]
    fn cursor_after_closing_quote_belongs_to_the_string() {
        let token = token_at(r#"{"foo": 1}"#, 6).expect("token");
        assert!(token.is_top_level_property_name());
    }

    #[test]
    fn cursor_before_opening_quote_is_not_in_the_string() {
        assert_eq!(token_at(r#"{"foo": 1}"#, 1), None);
    }

    #[test]
    fn second_property_after_comma() {
        let content = r#"{"a": 1, "b"#;
        let token = token_at(content, content.len()).expect("token");
        assert!(token.is_top_level_property_name());
        assert_eq!(token.from, 9);
    }

    #[test]
    fn string_values_are_not_property_names() {
        let token = token_at(r#"{"a": "xy"}"#, 8).expect("token");
        assert_eq!(token.kind, TokenKind::String);
        assert!(!token.is_top_level_property_name());
    }

    #[test]
    fn nested_property_names_are_not_top_level() {
        let token = token_at(r#"{"a": {""}}"#, 8).expect("token");
        assert_eq!(token.kind, TokenKind::PropertyName);
        assert_eq!(token.containers, [Container::Object, Container::Object]);
        assert!(!token.is_top_level_property_name());
    }

    #[test]
    fn objects_inside_arrays_are_not_top_level() {
        let token = token_at(r#"[{""}]"#, 3).expect("token");
        assert_eq!(token.containers, [Container::Array, Container::Object]);
        assert!(!token.is_top_level_property_name());
    }

    #[test]
    fn closed_objects_are_popped() {
        let content = r#"{"a": {"b": 1}, ""}"#;
        let token = token_at(content, 17).expect("token");
        assert!(token.is_top_level_property_name());
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let content = r#"{"a\"b": 1}"#;
        let token = token_at(content, 6).expect("token");
        assert_eq!((token.from, token.to), (1, 7));
    }

    #[test]
    fn words() {
        let token = token_at(r#"{"a": true}"#, 8).expect("token");
        assert_eq!(token.kind, TokenKind::Word);
        assert_eq!((token.from, token.to), (6, 10));
    }

    #[test]
    fn whitespace_and_punctuation_have_no_token() {
        assert_eq!(token_at(r#"{"a":  1}"#, 6), None);
        assert_eq!(token_at("{", 1), None);
        assert_eq!(token_at("", 0), None);
    }
}
