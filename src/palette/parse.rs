//! Argument text parsing.
//!
//! parse_arguments -> ParsedArgs { positional, named }
//! One line of the form `JSON1, JSON2, ..., nameA=JSONA, nameB=JSONB` is
//! split into positional and named values. Each value is a single JSON
//! literal (scalar, array, or object) decoded from the front of the
//! remaining text; names are `[A-Za-z_][A-Za-z0-9_]*`.

use serde_json::{Map, Value};

use crate::palette::error::PaletteError;

/// Positional and named argument values parsed from one input line.
///
/// Created fresh per parse call and consumed by the reconciler; nothing
/// is retained across invocations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedArgs {
    pub positional: Vec<Value>,
    pub named: Map<String, Value>,
}

impl ParsedArgs {
    /// Convenience: true when the line carried no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Parse a free-text argument line.
///
/// Empty (or whitespace-only) input yields an empty `ParsedArgs`, the
/// common case for commands declaring no arguments. Grammar faults are
/// reported as [`PaletteError::Syntax`].
pub fn parse_arguments(input: &str) -> Result<ParsedArgs, PaletteError> {
    let mut positional = Vec::new();
    let mut named = Map::new();

    // The current name is intentionally sticky across iterations: once any
    // argument has been named, a later bare value has no name to bind to
    // and is rejected.
    let mut current_name: Option<&str> = None;

    let mut pos = skip_ws(input, 0);
    while pos < input.len() {
        if let Some((name, used)) = match_named_prefix(&input[pos..]) {
            current_name = Some(name);
            pos = skip_ws(input, pos + used);
        } else if current_name.is_some() {
            return Err(PaletteError::syntax(format!(
                "expected argument name at '{}'",
                excerpt(&input[pos..])
            )));
        }

        let (value, used) = decode_literal(&input[pos..])?;
        pos += used;

        if let Some(name) = current_name {
            if named.contains_key(name) {
                return Err(PaletteError::syntax(format!(
                    "repeated argument name '{name}'"
                )));
            }
            named.insert(name.to_string(), value);
        } else {
            positional.push(value);
        }

        pos = skip_ws(input, pos);
        if pos < input.len() {
            if input.as_bytes()[pos] == b',' {
                pos = skip_ws(input, pos + 1);
            } else {
                return Err(PaletteError::syntax(format!(
                    "expected ',' at '{}'",
                    excerpt(&input[pos..])
                )));
            }
        }
    }

    Ok(ParsedArgs { positional, named })
}

/// Decode exactly one JSON value from the front of `text`.
///
/// Returns the value and the number of bytes consumed. Uses the streaming
/// deserializer so trailing text (the rest of the argument line) is left
/// untouched.
fn decode_literal(text: &str) -> Result<(Value, usize), PaletteError> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok((value, stream.byte_offset())),
        Some(Err(err)) => Err(PaletteError::syntax(format!(
            "bad value at '{}': {err}",
            excerpt(text)
        ))),
        None => Err(PaletteError::syntax("expected a value")),
    }
}

/// Match `identifier ws? '='` at the front of `text`.
///
/// Returns the identifier and the number of bytes consumed through the
/// `'='`, or `None` when the text does not open a named argument.
fn match_named_prefix(text: &str) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let first = *bytes.first()?;
    if first != b'_' && !first.is_ascii_alphabetic() {
        return None;
    }
    let mut end = 1;
    while end < bytes.len() && (bytes[end] == b'_' || bytes[end].is_ascii_alphanumeric()) {
        end += 1;
    }
    let mut cursor = end;
    while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    if cursor < bytes.len() && bytes[cursor] == b'=' {
        // The scanned identifier is pure ASCII, so the slice is valid UTF-8.
        Some((&text[..end], cursor + 1))
    } else {
        None
    }
}

fn skip_ws(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Shorten the remaining text for an error message.
fn excerpt(text: &str) -> String {
    const MAX: usize = 40;
    if text.chars().count() <= MAX {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX).collect();
    format!("{cut}…")
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_input_yields_nothing() {
        let parsed = parse_arguments("").unwrap();
        assert!(parsed.is_empty());
        let parsed = parse_arguments("   \t ").unwrap();
        assert!(parsed.positional.is_empty());
        assert!(parsed.named.is_empty());
    }

    #[test]
    fn mixed_positional_and_named() {
        let parsed = parse_arguments("1, 2, name=3").unwrap();
        assert_eq!(parsed.positional, vec![json!(1), json!(2)]);
        assert_eq!(parsed.named.len(), 1);
        assert_eq!(parsed.named.get("name"), Some(&json!(3)));
    }

    #[test]
    fn composite_literals() {
        let parsed = parse_arguments("[1, 2], {\"x\": true}").unwrap();
        assert_eq!(
            parsed.positional,
            vec![json!([1, 2]), json!({"x": true})]
        );
    }

    #[test]
    fn scalar_literal_forms() {
        let parsed = parse_arguments("null, true, -2.5, \"a,b\"").unwrap();
        assert_eq!(
            parsed.positional,
            vec![json!(null), json!(true), json!(-2.5), json!("a,b")]
        );
    }

    #[test]
    fn whitespace_around_equals() {
        let parsed = parse_arguments("extend = false, by =\"words\"").unwrap();
        assert_eq!(parsed.named.get("extend"), Some(&json!(false)));
        assert_eq!(parsed.named.get("by"), Some(&json!("words")));
    }

    #[test]
    fn underscore_identifier() {
        let parsed = parse_arguments("_hidden=1").unwrap();
        assert_eq!(parsed.named.get("_hidden"), Some(&json!(1)));
    }

    #[test]
    fn repeated_name_is_rejected() {
        let err = parse_arguments("a=1, a=2").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
        assert!(err.to_string().contains("repeated argument name 'a'"));
    }

    #[test]
    fn positional_after_named_is_rejected() {
        let err = parse_arguments("a=1, 2").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
        assert!(err.to_string().contains("expected argument name"));
    }

    #[test]
    fn missing_comma_is_rejected() {
        let err = parse_arguments("1 2").unwrap_err();
        assert!(err.to_string().contains("expected ','"));
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        let parsed = parse_arguments("1, ").unwrap();
        assert_eq!(parsed.positional, vec![json!(1)]);
    }

    #[test]
    fn name_without_value_is_rejected() {
        let err = parse_arguments("a=").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
    }

    #[test]
    fn malformed_literal_is_rejected() {
        let err = parse_arguments("oops").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
        let err = parse_arguments("{\"x\": }").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
    }

    #[test]
    fn nested_composites_consume_exactly_one_value() {
        let parsed = parse_arguments("{\"k\": [1, {\"z\": null}]}, 5").unwrap();
        assert_eq!(parsed.positional.len(), 2);
        assert_eq!(parsed.positional[1], json!(5));
    }

    #[test]
    fn identifier_like_bare_word_is_not_a_value() {
        // `move` has no `=`, so it must decode as a JSON literal, and fails.
        let err = parse_arguments("move").unwrap_err();
        assert!(matches!(err, PaletteError::Syntax { .. }));
    }
}
