//! Recursive descent markup parser.
//!
//! Parses an XML-like document into a [`Node`] tree. Element names come out
//! in Clark notation (`{namespace}local`): `xmlns` and `xmlns:prefix`
//! declarations are resolved during the parse and removed from the attribute
//! set, so a consumer never sees a raw prefix. An element with no namespace
//! in scope gets an empty fragment (`{}Button`), which the renderer later
//! fills with its default namespace.

use std::collections::HashMap;

use super::node::{Attributes, Node, NodeValue};
use super::tokenizer::{strip_comments, tokenize, PTok, Tok};

/// Errors from markup parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A character the tokenizer could not place inside a tag.
    #[error("unexpected character at byte {position}: '{found}'")]
    UnexpectedChar {
        /// Byte offset in the (comment-stripped) source.
        position: usize,
        /// The offending slice.
        found: String,
    },

    /// A structurally misplaced token.
    #[error("unexpected token at byte {position}: {message}")]
    UnexpectedToken {
        /// Byte offset in the (comment-stripped) source.
        position: usize,
        /// What was expected and what was found.
        message: String,
    },

    /// The document ended mid-construct.
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// A closing tag did not match the open element.
    #[error("mismatched closing tag at byte {position}: expected </{expected}>, found </{found}>")]
    MismatchedClosingTag {
        /// Byte offset of the closing name.
        position: usize,
        /// The open element's raw name.
        expected: String,
        /// The closing name actually present.
        found: String,
    },

    /// A prefixed name used a prefix with no `xmlns:prefix` declaration in
    /// scope.
    #[error("undeclared namespace prefix '{0}'")]
    UndeclaredPrefix(String),
}

/// Namespace bindings in scope for one element and its descendants.
#[derive(Debug, Clone, Default)]
struct NsScope {
    /// The default namespace (`xmlns="..."`). Empty when undeclared.
    default: String,
    /// Prefix bindings (`xmlns:p="..."`).
    prefixes: HashMap<String, String>,
}

/// Parse a markup document into its single root [`Node`].
///
/// Leading and trailing whitespace around the root element is ignored; any
/// other top-level content is an error.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize(&cleaned)?;

    let mut parser = Parser { tokens, cursor: 0 };

    parser.skip_blank_text();
    let root = parser.parse_element(&NsScope::default())?;
    parser.skip_blank_text();

    if let Some(extra) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: extra.pos,
            message: "expected a single root element".into(),
        });
    }

    Ok(root)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PTok>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PTok> {
        self.tokens.get(self.cursor)
    }

    fn peek_at(&self, offset: usize) -> Option<&PTok> {
        self.tokens.get(self.cursor + offset)
    }

    fn advance(&mut self) -> Option<&PTok> {
        let tok = self.tokens.get(self.cursor);
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Tok, what: &str) -> Result<PTok, ParseError> {
        match self.advance() {
            Some(tok) if &tok.tok == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?}", tok.tok),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    fn expect_name(&mut self) -> Result<(String, usize), ParseError> {
        match self.advance() {
            Some(PTok {
                tok: Tok::Name(name),
                pos,
            }) => Ok((name.clone(), *pos)),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected a name, got {:?}", tok.tok),
            }),
            None => Err(ParseError::UnexpectedEof("expected a name".into())),
        }
    }

    /// Skip whitespace-only character data at the current position.
    fn skip_blank_text(&mut self) {
        while let Some(PTok {
            tok: Tok::Text(text),
            ..
        }) = self.peek()
        {
            if !text.trim().is_empty() {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Parse one element. The cursor must be at its opening `<`.
    fn parse_element(&mut self, scope: &NsScope) -> Result<Node, ParseError> {
        self.expect(&Tok::Lt, "'<'")?;
        let (raw_name, name_pos) = self.expect_name()?;

        // Attributes, separating out namespace declarations.
        let mut attributes = Attributes::new();
        let mut scope = scope.clone();
        while let Some(PTok {
            tok: Tok::Name(_), ..
        }) = self.peek()
        {
            let (attr_name, _) = self.expect_name()?;
            self.expect(&Tok::Eq, "'='")?;
            let value = match self.advance() {
                Some(PTok {
                    tok: Tok::Value(value),
                    ..
                }) => value.clone(),
                Some(tok) => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("expected a quoted value, got {:?}", tok.tok),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEof("expected a quoted value".into()));
                }
            };

            if attr_name == "xmlns" {
                scope.default = value;
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                scope.prefixes.insert(prefix.to_owned(), value);
            } else {
                attributes.set(attr_name, value);
            }
        }

        let tag_name = resolve_name(&raw_name, &scope, name_pos)?;

        // Self-closing?
        match self.peek() {
            Some(PTok { tok: Tok::Slash, .. }) => {
                self.advance();
                self.expect(&Tok::Gt, "'>'")?;
                return Ok(Node::element(
                    tag_name,
                    attributes,
                    NodeValue::Text(String::new()),
                ));
            }
            Some(PTok { tok: Tok::Gt, .. }) => {
                self.advance();
            }
            Some(tok) => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected '>' or '/>', got {:?}", tok.tok),
                });
            }
            None => return Err(ParseError::UnexpectedEof("expected '>' or '/>'".into())),
        }

        // Content: interleaved text and child elements until `</name>`.
        let mut children = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(PTok {
                    tok: Tok::Text(chunk),
                    ..
                }) => {
                    text.push_str(chunk);
                    self.cursor += 1;
                }
                Some(PTok { tok: Tok::Lt, .. }) => {
                    if matches!(
                        self.peek_at(1),
                        Some(PTok { tok: Tok::Slash, .. })
                    ) {
                        // Closing tag for this element.
                        self.advance(); // <
                        self.advance(); // /
                        let (closing, pos) = self.expect_name()?;
                        if closing != raw_name {
                            return Err(ParseError::MismatchedClosingTag {
                                position: pos,
                                expected: raw_name,
                                found: closing,
                            });
                        }
                        self.expect(&Tok::Gt, "'>'")?;
                        break;
                    }
                    children.push(self.parse_element(&scope)?);
                }
                Some(tok) => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("unexpected {:?} in element content", tok.tok),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEof(format!(
                        "expected </{raw_name}>"
                    )));
                }
            }
        }

        // Child elements win over interleaved text; text-only content is
        // trimmed so document indentation never reaches attribute handling.
        let value = if children.is_empty() {
            NodeValue::Text(text.trim().to_owned())
        } else {
            NodeValue::Children(children)
        };

        Ok(Node::element(tag_name, attributes, value))
    }
}

/// Resolve a raw element name against the namespace scope, producing Clark
/// notation.
fn resolve_name(raw: &str, scope: &NsScope, position: usize) -> Result<String, ParseError> {
    if let Some((prefix, local)) = raw.split_once(':') {
        let Some(namespace) = scope.prefixes.get(prefix) else {
            return Err(ParseError::UndeclaredPrefix(prefix.to_owned()));
        };
        if local.is_empty() {
            return Err(ParseError::UnexpectedToken {
                position,
                message: format!("invalid element name '{raw}'"),
            });
        }
        Ok(format!("{{{namespace}}}{local}"))
    } else {
        Ok(format!("{{{}}}{raw}", scope.default))
    }
}
