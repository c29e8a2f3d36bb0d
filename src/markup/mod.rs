//! Markup documents: node model, tokenizer, parser.

pub mod node;
pub mod parser;
pub mod tokenizer;

pub use node::{Attributes, Node, NodeValue};
pub use parser::{parse, ParseError};
