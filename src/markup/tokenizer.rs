//! logos-based markup tokenizer.
//!
//! Markup lexing is context-sensitive: between tags, everything up to the
//! next `<` is character data; inside a tag, the input is names, `=`, quoted
//! values and the closing delimiters. Two logos token enums cover the two
//! contexts and the tokenizer switches between them with [`logos::Lexer::morph`]
//! on `<` and `>`.
//!
//! Comments (`<!-- -->`) are stripped by a byte-level prepass before lexing,
//! so neither token enum has to model them.

use logos::Logos;

use super::parser::ParseError;

/// Character-data context: everything outside a tag.
#[derive(Logos, Debug, Clone, PartialEq)]
enum TextToken {
    /// Start of a tag; switches the lexer into [`TagToken`] context.
    #[token("<")]
    Lt,

    /// A run of character data.
    #[regex(r"[^<]+")]
    Text,
}

/// Tag-interior context: between `<` and `>`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TagToken {
    /// `/`, part of `</name>` or `<name/>`.
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Eq,

    /// `>`, ends the tag; switches back to [`TextToken`] context.
    #[token(">")]
    Gt,

    /// Element or attribute name, optionally prefixed (`w:Window`, `xmlns:w`).
    #[regex(r"[A-Za-z_][A-Za-z0-9_.:-]*")]
    Name,

    /// Double-quoted attribute value.
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// Single-quoted attribute value.
    #[regex(r"'[^']*'")]
    SingleQuoted,
}

/// A lexed token with its decoded payload, ready for the parser.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Tok {
    /// Character data (entities decoded, whitespace preserved).
    Text(String),
    /// `<`
    Lt,
    /// `/`
    Slash,
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// Element or attribute name.
    Name(String),
    /// Attribute value (quotes stripped, entities decoded).
    Value(String),
}

/// A token plus the byte offset where it starts, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PTok {
    pub tok: Tok,
    pub pos: usize,
}

/// Strip markup comments (`<!-- ... -->`) from the input.
///
/// Unterminated comments consume the rest of the input. Comments are removed
/// entirely rather than replaced, so surrounding character data is unchanged.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"<!--") {
            // Scan for the terminator on bytes: comment content may be
            // multi-byte UTF-8 and `&str` slicing mid-char would panic.
            i += 4;
            match bytes[i..].windows(3).position(|w| w == b"-->") {
                Some(end) => i += end + 3,
                None => i = bytes.len(),
            }
        } else {
            let ch = input[i..].chars().next().unwrap_or('\0');
            result.push(ch);
            i += ch.len_utf8();
        }
    }

    result
}

/// Decode the five predefined entities. Unrecognised `&...;` runs are left
/// verbatim.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let entity_len = tail.find(';').map(|semi| semi + 1);
        let decoded = entity_len.and_then(|end| match &tail[..end] {
            "&amp;" => Some('&'),
            "&lt;" => Some('<'),
            "&gt;" => Some('>'),
            "&quot;" => Some('"'),
            "&apos;" => Some('\''),
            _ => None,
        });
        match (decoded, entity_len) {
            (Some(ch), Some(end)) => {
                result.push(ch);
                rest = &tail[end..];
            }
            _ => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Tokenize a comment-stripped document into a flat token stream.
pub(crate) fn tokenize(input: &str) -> Result<Vec<PTok>, ParseError> {
    let mut out = Vec::new();
    let mut text = TextToken::lexer(input);

    loop {
        let Some(result) = text.next() else { break };
        let span = text.span();
        match result {
            Ok(TextToken::Text) => out.push(PTok {
                tok: Tok::Text(decode_entities(text.slice())),
                pos: span.start,
            }),
            Ok(TextToken::Lt) => {
                out.push(PTok {
                    tok: Tok::Lt,
                    pos: span.start,
                });

                // Tag context until the matching `>`.
                let mut tag = text.morph::<TagToken>();
                let mut closed = false;
                while let Some(tag_result) = tag.next() {
                    let tag_span = tag.span();
                    let tok = match tag_result {
                        Ok(TagToken::Gt) => {
                            out.push(PTok {
                                tok: Tok::Gt,
                                pos: tag_span.start,
                            });
                            closed = true;
                            break;
                        }
                        Ok(TagToken::Slash) => Tok::Slash,
                        Ok(TagToken::Eq) => Tok::Eq,
                        Ok(TagToken::Name) => Tok::Name(tag.slice().to_owned()),
                        Ok(TagToken::Quoted) | Ok(TagToken::SingleQuoted) => {
                            let slice = tag.slice();
                            Tok::Value(decode_entities(&slice[1..slice.len() - 1]))
                        }
                        Err(()) => {
                            return Err(ParseError::UnexpectedChar {
                                position: tag_span.start,
                                found: tag.slice().to_owned(),
                            });
                        }
                    };
                    out.push(PTok {
                        tok,
                        pos: tag_span.start,
                    });
                }
                if !closed {
                    return Err(ParseError::UnexpectedEof("unterminated tag".into()));
                }
                text = tag.morph();
            }
            Err(()) => {
                return Err(ParseError::UnexpectedChar {
                    position: span.start,
                    found: text.slice().to_owned(),
                });
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return just the token variants.
    fn toks(input: &str) -> Vec<Tok> {
        tokenize(input)
            .expect("tokenize failed")
            .into_iter()
            .map(|p| p.tok)
            .collect()
    }

    // ── Basic tags ───────────────────────────────────────────────────

    #[test]
    fn self_closing_tag() {
        assert_eq!(
            toks("<Button/>"),
            vec![
                Tok::Lt,
                Tok::Name("Button".into()),
                Tok::Slash,
                Tok::Gt,
            ]
        );
    }

    #[test]
    fn tag_with_attributes() {
        assert_eq!(
            toks(r#"<Window title="Main" width='800'>"#),
            vec![
                Tok::Lt,
                Tok::Name("Window".into()),
                Tok::Name("title".into()),
                Tok::Eq,
                Tok::Value("Main".into()),
                Tok::Name("width".into()),
                Tok::Eq,
                Tok::Value("800".into()),
                Tok::Gt,
            ]
        );
    }

    #[test]
    fn closing_tag() {
        assert_eq!(
            toks("</Window>"),
            vec![Tok::Lt, Tok::Slash, Tok::Name("Window".into()), Tok::Gt]
        );
    }

    #[test]
    fn prefixed_name_is_one_token() {
        assert_eq!(
            toks("<w:Window>"),
            vec![Tok::Lt, Tok::Name("w:Window".into()), Tok::Gt]
        );
    }

    // ── Character data ───────────────────────────────────────────────

    #[test]
    fn text_between_tags() {
        assert_eq!(
            toks("<b>Click me!</b>"),
            vec![
                Tok::Lt,
                Tok::Name("b".into()),
                Tok::Gt,
                Tok::Text("Click me!".into()),
                Tok::Lt,
                Tok::Slash,
                Tok::Name("b".into()),
                Tok::Gt,
            ]
        );
    }

    #[test]
    fn text_entities_are_decoded() {
        assert_eq!(
            toks("<b>a &amp; b &lt;c&gt;</b>")[3],
            Tok::Text("a & b <c>".into())
        );
    }

    #[test]
    fn attribute_entities_are_decoded() {
        let tokens = toks(r#"<b title="&quot;x&apos;">"#);
        assert_eq!(tokens[4], Tok::Value("\"x'".into()));
    }

    #[test]
    fn unknown_entity_left_verbatim() {
        assert_eq!(decode_entities("a &copy; b"), "a &copy; b");
        assert_eq!(decode_entities("dangling &"), "dangling &");
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn strip_comments_removes_comment() {
        assert_eq!(strip_comments("a<!-- hi -->b"), "ab");
    }

    #[test]
    fn strip_comments_unterminated() {
        assert_eq!(strip_comments("a<!-- hi"), "a");
    }

    #[test]
    fn strip_comments_with_multibyte_content() {
        assert_eq!(strip_comments("a<!-- café -->b"), "ab");
        assert_eq!(strip_comments("<!-- 日本語 -->"), "");
        assert_eq!(strip_comments("über<!-- é"), "über");
    }

    #[test]
    fn strip_comments_leaves_plain_input() {
        assert_eq!(strip_comments("<a b=\"c\"/>"), "<a b=\"c\"/>");
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn unterminated_tag_is_an_error() {
        assert!(matches!(
            tokenize("<Window "),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn stray_character_in_tag_is_an_error() {
        assert!(matches!(
            tokenize("<Window !>"),
            Err(ParseError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(toks("").is_empty());
    }
}
