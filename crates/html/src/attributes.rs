//! Attribute parsing
//!
//! Once the tokenizer has read a start-tag name followed by whitespace, this
//! machine owns the reader until the tag closes, filling in the tag's
//! attributes. It shares the tokenizer's diagnostics and recovery policy: a
//! hard error discards input up to the next `>`, and the attributes committed
//! before the error are kept.

use crate::diagnostics::{describe_char, Diagnostics};
use crate::error::ParseResult;
use crate::reader::Reader;
use crate::tag::{is_name_char, EmptyElement, Tag};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Recover,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueUnquoted,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
}

impl State {
    fn description(self) -> &'static str {
        match self {
            State::Recover => "error recovery",
            State::BeforeAttributeName => "tag attribute parse begin",
            State::AttributeName => "attribute name",
            State::AfterAttributeName => "after attribute name",
            State::BeforeAttributeValue => "attribute value begin",
            State::AttributeValueUnquoted => "literal value",
            State::AttributeValueDoubleQuoted => "quoted value",
            State::AttributeValueSingleQuoted => "inverted-comma delimited value",
            State::AfterAttributeValueQuoted => "attribute value end",
            State::SelfClosingStartTag => "empty-element marker",
        }
    }
}

/// How the tag was closed
enum Closed {
    Tag,
    EmptyElement,
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Attribute sub-parser for one start-tag
pub(crate) struct AttributeParser<'a> {
    reader: &'a mut Reader,
    diagnostics: &'a mut Diagnostics,
    state: State,
    tag: Tag,
    name: String,
    value: String,
}

impl<'a> AttributeParser<'a> {
    pub(crate) fn new(reader: &'a mut Reader, diagnostics: &'a mut Diagnostics, tag: Tag) -> Self {
        Self {
            reader,
            diagnostics,
            state: State::BeforeAttributeName,
            tag,
            name: String::new(),
            value: String::new(),
        }
    }

    /// Consume input up to the closing `>`.
    ///
    /// Returns a `Tag` or `EmptyElement` token, or `None` when the input ends
    /// before the tag is closed.
    pub(crate) fn parse(mut self) -> ParseResult<Option<Token>> {
        while let Some(c) = self.reader.read() {
            let before = self.state;
            let closed = self.step(c)?;
            if self.state != before {
                log::trace!("Attribute state {:?} -> {:?}", before, self.state);
            }

            if let Some(closed) = closed {
                let token = match closed {
                    Closed::Tag => Token::Tag(self.tag),
                    Closed::EmptyElement => {
                        Token::EmptyElement(EmptyElement::from_start_tag(self.tag))
                    }
                };
                return Ok(Some(token));
            }
        }

        self.diagnostics.warning();
        log::warn!(
            "Unexpected end of input inside tag <{}> ({})",
            self.tag.name(),
            self.reader.position()
        );
        Ok(None)
    }

    fn step(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match self.state {
            State::Recover => Ok((c == '>').then_some(Closed::Tag)),
            State::BeforeAttributeName => self.before_attribute_name_state(c),
            State::AttributeName => self.attribute_name_state(c),
            State::AfterAttributeName => self.after_attribute_name_state(c),
            State::BeforeAttributeValue => self.before_attribute_value_state(c),
            State::AttributeValueUnquoted => self.attribute_value_unquoted_state(c),
            State::AttributeValueDoubleQuoted => self.attribute_value_quoted_state(c, '"'),
            State::AttributeValueSingleQuoted => self.attribute_value_quoted_state(c, '\''),
            State::AfterAttributeValueQuoted => Ok(self.after_attribute_value_quoted_state(c)),
            State::SelfClosingStartTag => self.self_closing_start_tag_state(c),
        }
    }

    fn before_attribute_name_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '>' => return Ok(Some(Closed::Tag)),
            '/' => self.state = State::SelfClosingStartTag,
            c if is_space(c) => {}
            c if is_name_char(c) => {
                self.name.push(c);
                self.state = State::AttributeName;
            }
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    fn attribute_name_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '>' => {
                self.commit(None)?;
                return Ok(Some(Closed::Tag));
            }
            '/' => {
                self.commit(None)?;
                self.state = State::SelfClosingStartTag;
            }
            '=' => self.state = State::BeforeAttributeValue,
            c if is_space(c) => self.state = State::AfterAttributeName,
            c if is_name_char(c) => self.name.push(c),
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    /// A name has been read; it either gets a value or stands alone
    fn after_attribute_name_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '>' => {
                self.commit(None)?;
                return Ok(Some(Closed::Tag));
            }
            '/' => {
                self.commit(None)?;
                self.state = State::SelfClosingStartTag;
            }
            '=' => self.state = State::BeforeAttributeValue,
            c if is_space(c) => {}
            c if is_name_char(c) => {
                self.commit(None)?;
                self.name.push(c);
                self.state = State::AttributeName;
            }
            c => {
                self.commit(None)?;
                self.invalid_char(c)?;
            }
        }
        Ok(None)
    }

    fn before_attribute_value_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '"' => self.state = State::AttributeValueDoubleQuoted,
            '\'' => self.state = State::AttributeValueSingleQuoted,
            c if is_space(c) => {}
            '>' | '<' => self.invalid_char(c)?,
            c => {
                self.value.push(c);
                self.state = State::AttributeValueUnquoted;
            }
        }
        Ok(None)
    }

    fn attribute_value_unquoted_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '>' => {
                self.commit_value()?;
                return Ok(Some(Closed::Tag));
            }
            c if is_space(c) => {
                self.commit_value()?;
                self.state = State::BeforeAttributeName;
            }
            c => self.value.push(c),
        }
        Ok(None)
    }

    fn attribute_value_quoted_state(&mut self, c: char, quote: char) -> ParseResult<Option<Closed>> {
        if c == quote {
            self.commit_value()?;
            self.state = State::AfterAttributeValueQuoted;
        } else {
            self.value.push(c);
        }
        Ok(None)
    }

    fn after_attribute_value_quoted_state(&mut self, c: char) -> Option<Closed> {
        match c {
            '>' => return Some(Closed::Tag),
            '/' => self.state = State::SelfClosingStartTag,
            c if is_space(c) => self.state = State::BeforeAttributeName,
            c => {
                // e.g. `a="1"b="2"`
                self.reader.pushback(c);
                self.state = State::BeforeAttributeName;
            }
        }
        None
    }

    fn self_closing_start_tag_state(&mut self, c: char) -> ParseResult<Option<Closed>> {
        match c {
            '>' => return Ok(Some(Closed::EmptyElement)),
            c if is_space(c) => {}
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    fn commit_value(&mut self) -> ParseResult<()> {
        let value = std::mem::take(&mut self.value);
        self.commit(Some(&value))
    }

    /// Add the pending attribute to the tag
    fn commit(&mut self, value: Option<&str>) -> ParseResult<()> {
        let name = std::mem::take(&mut self.name);
        match self.tag.set_attribute(&name, value) {
            Ok(false) => Ok(()),
            Ok(true) => {
                self.diagnostics.warning();
                Ok(())
            }
            Err(err) => {
                log::error!(
                    "Dropping attribute of <{}>: {} ({})",
                    self.tag.name(),
                    err,
                    self.reader.position()
                );
                self.diagnostics.error(self.reader.location())
            }
        }
    }

    /// Hard error: abandon the pending attribute and skip to the next `>`
    fn invalid_char(&mut self, c: char) -> ParseResult<()> {
        log::error!(
            "Character {} cannot be accepted from the {} state ({})",
            describe_char(Some(c)),
            self.state.description(),
            self.reader.position()
        );
        self.reader.pushback(c);
        self.name.clear();
        self.value.clear();
        self.state = State::Recover;
        self.diagnostics.error(self.reader.location())
    }
}
