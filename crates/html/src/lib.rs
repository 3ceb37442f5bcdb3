//! xmlify HTML core
//!
//! Lenient HTML tokenizer and tag-balancing normalizer that turns
//! hand-written HTML into well-formed XML.

mod attributes;
mod config;
mod diagnostics;
pub mod entities;
mod error;
mod normalizer;
mod reader;
mod tag;
mod token;
mod tokenizer;

pub use config::ParserConfig;
pub use diagnostics::{describe_char, Diagnostics, DEFAULT_MAX_ERRORS};
pub use error::{ParseError, ParseResult, SourceLocation, TagError};
pub use normalizer::{
    convert_html_to_xml, is_singleton_element, is_void_element, Normalizer, XML_HEADER,
};
pub use reader::Reader;
pub use tag::{is_name_char, is_name_start_char, Attribute, DummyElement, EmptyElement, Tag};
pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer};
