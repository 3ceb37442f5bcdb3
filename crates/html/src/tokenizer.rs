//! Lenient HTML tokenizer
//!
//! Converts a character stream into a sequence of tokens, one per call to
//! [`Tokenizer::next_token`]. Malformed input is repaired where the intent is
//! clear (a recovery), or skipped up to the next `>` where it is not (a hard
//! error). Too many of either abandons the parse.

use crate::attributes::AttributeParser;
use crate::config::ParserConfig;
use crate::diagnostics::{describe_char, Diagnostics};
use crate::entities::{decode_numeric, is_known_entity};
use crate::error::{ParseResult, SourceLocation};
use crate::reader::Reader;
use crate::tag::{is_name_char, is_name_start_char, EmptyElement, Tag};
use crate::token::Token;

/// Markup declaration keywords accepted after `<!`
const DECLARATION_KEYWORDS: [&str; 5] = ["DOCTYPE", "ELEMENT", "ATTLIST", "ENTITY", "NOTATION"];

/// Closing sequence that ends script content
const SCRIPT_END_TAG: [char; 9] = ['<', '/', 's', 'c', 'r', 'i', 'p', 't', '>'];

/// Characters that stand alone as punctuation tokens in text content
fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '\'' | '`' | '!' | '"' | '^' | '*' | '(' | ')' | '-' | '_' | '+' | '=' | '|' | '['
            | ']' | '{' | '}' | ':' | ';' | '@' | '~' | '#' | ',' | '.' | '?' | '/' | '\\'
    )
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Tokenizer state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Recover,
    Text,
    Number,
    Spaces,
    TagOpen,
    TagName,
    SelfClosingStartTag,
    EndTagOpen,
    EndTagName,
    MarkupDeclarationOpen,
    DeclarationKeyword,
    DeclarationSpace,
    DeclarationData,
    CommentStart,
    Comment,
    CommentEndDash,
    CommentEnd,
    PiTarget,
    PiData,
    PiEnd,
    Entity,
    EntityName,
    CharRef,
    HexCharRef,
    DecimalCharRef,
    CdataKeywordStart,
    CdataKeyword,
    CdataSection,
    CdataBracket,
    CdataEnd,
    ScriptData,
    /// Number of characters of `</script>` matched so far (1 to 8)
    ScriptEndTag(usize),
}

impl State {
    fn description(self) -> &'static str {
        match self {
            State::Recover => "error recovery",
            State::Text => "text content",
            State::Number => "number text content",
            State::Spaces => "white-space content",
            State::TagOpen => "tag markup entry",
            State::TagName => "start-tag name",
            State::SelfClosingStartTag => "empty-element marker",
            State::EndTagOpen => "end-tag begin",
            State::EndTagName => "end-tag name",
            State::MarkupDeclarationOpen => "SGML tag begin",
            State::DeclarationKeyword => "DTD identifier",
            State::DeclarationSpace => "DTD white-space",
            State::DeclarationData => "DTD unparsed data",
            State::CommentStart => "comment entry-sequence",
            State::Comment => "comment content",
            State::CommentEndDash => "comment exit-sequence A",
            State::CommentEnd => "comment exit-sequence B",
            State::PiTarget => "PI target identifier",
            State::PiData => "PI data",
            State::PiEnd => "PI end",
            State::Entity => "entity markup begin",
            State::EntityName => "entity reference",
            State::CharRef => "character reference begin",
            State::HexCharRef => "hexadecimal character",
            State::DecimalCharRef => "decimal character",
            State::CdataKeywordStart => "CData entry-sequence",
            State::CdataKeyword => "CData identifier",
            State::CdataSection => "CData content",
            State::CdataBracket => "CData exit-sequence A",
            State::CdataEnd => "CData exit-sequence B",
            State::ScriptData => "script element content",
            State::ScriptEndTag(_) => "script end-tag",
        }
    }
}

/// Text of a digit run: a number when it reads back the same, a word otherwise
fn number_token(digits: String) -> Token {
    if digits.len() > 1 && digits.starts_with('0') {
        return Token::Word(digits);
    }
    match digits.parse::<i64>() {
        Ok(n) => Token::Number(n),
        Err(_) => Token::Word(digits),
    }
}

/// Lenient HTML tokenizer
pub struct Tokenizer {
    reader: Reader,
    state: State,
    /// Text of the token being built
    buffer: String,
    /// Declaration keyword or PI target while the rest is collected
    name: String,
    /// Characters of a partial `</script>` match, as written
    script_end: String,
    case_sensitive: bool,
    diagnostics: Diagnostics,
}

impl Tokenizer {
    /// Create a tokenizer with the default configuration
    pub fn new(reader: Reader) -> Self {
        Self::with_config(reader, &ParserConfig::default())
    }

    pub fn with_config(mut reader: Reader, config: &ParserConfig) -> Self {
        if let Some(source) = &config.source {
            reader.set_source(source.as_str());
        }
        Self {
            reader,
            state: State::Text,
            buffer: String::new(),
            name: String::new(),
            script_end: String::new(),
            case_sensitive: config.case_sensitive,
            diagnostics: Diagnostics::new(config.max_errors),
        }
    }

    /// Get the next token. Returns `Token::Eof` once the input is exhausted,
    /// and keeps returning it on later calls.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        loop {
            while let Some(c) = self.reader.read() {
                let before = self.state;
                let token = self.step(c)?;
                if self.state != before {
                    log::trace!("State {:?} -> {:?}", before, self.state);
                }

                if let Some(token) = token {
                    log::debug!("Token {:?}", token);
                    return Ok(token);
                }
            }

            if !self.complete_reference() {
                return Ok(self.finish());
            }
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn location(&self) -> SourceLocation {
        self.reader.location()
    }

    pub fn line(&self) -> usize {
        self.reader.line()
    }

    pub fn column(&self) -> usize {
        self.reader.column()
    }

    pub fn char_count(&self) -> usize {
        self.reader.char_count()
    }

    pub fn checksum(&self) -> u32 {
        self.reader.checksum()
    }

    /// Summary of lines, characters and diagnostics read so far
    pub fn completion_report(&self) -> String {
        self.diagnostics
            .completion_report(self.reader.line(), self.reader.char_count())
    }

    /// Execute one step of the state machine
    fn step(&mut self, c: char) -> ParseResult<Option<Token>> {
        match self.state {
            State::Recover => {
                if c == '>' {
                    self.state = State::Text;
                }
                Ok(None)
            }
            State::Text => Ok(self.text_state(c)),
            State::Number => Ok(self.number_state(c)),
            State::Spaces => Ok(self.spaces_state(c)),
            State::TagOpen => self.tag_open_state(c),
            State::TagName => self.tag_name_state(c),
            State::SelfClosingStartTag => self.self_closing_start_tag_state(c),
            State::EndTagOpen => self.end_tag_open_state(c),
            State::EndTagName => self.end_tag_name_state(c),
            State::MarkupDeclarationOpen => self.markup_declaration_open_state(c),
            State::DeclarationKeyword => self.declaration_keyword_state(c),
            State::DeclarationSpace => Ok(self.declaration_space_state(c)),
            State::DeclarationData => Ok(self.declaration_data_state(c)),
            State::CommentStart => self.comment_start_state(c),
            State::Comment => Ok(self.comment_state(c)),
            State::CommentEndDash => Ok(self.comment_end_dash_state(c)),
            State::CommentEnd => Ok(self.comment_end_state(c)),
            State::PiTarget => self.pi_target_state(c),
            State::PiData => Ok(self.pi_data_state(c)),
            State::PiEnd => self.pi_end_state(c),
            State::Entity => Ok(self.entity_state(c)),
            State::EntityName => Ok(self.entity_name_state(c)),
            State::CharRef => self.char_ref_state(c),
            State::HexCharRef => self.hex_char_ref_state(c),
            State::DecimalCharRef => Ok(self.decimal_char_ref_state(c)),
            State::CdataKeywordStart => self.cdata_keyword_start_state(c),
            State::CdataKeyword => self.cdata_keyword_state(c),
            State::CdataSection => Ok(self.cdata_section_state(c)),
            State::CdataBracket => Ok(self.cdata_bracket_state(c)),
            State::CdataEnd => Ok(self.cdata_end_state(c)),
            State::ScriptData => Ok(self.script_data_state(c)),
            State::ScriptEndTag(matched) => Ok(self.script_end_tag_state(c, matched)),
        }
    }

    /// Pending text, if any, as a word token
    fn flush_word(&mut self) -> Option<Token> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(Token::Word(std::mem::take(&mut self.buffer)))
        }
    }

    fn take_buffer(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    fn text_state(&mut self, c: char) -> Option<Token> {
        match c {
            '<' => {
                self.state = State::TagOpen;
                self.flush_word()
            }
            '&' => {
                self.state = State::Entity;
                self.flush_word()
            }
            ' ' | '\t' => {
                self.reader.pushback(c);
                self.state = State::Spaces;
                self.flush_word()
            }
            '\n' => {
                if self.buffer.is_empty() {
                    return Some(Token::Newline);
                }
                self.reader.pushback(c);
                self.flush_word()
            }
            '0'..='9' => {
                self.reader.pushback(c);
                self.state = State::Number;
                self.flush_word()
            }
            c if is_punctuation(c) => {
                if self.buffer.is_empty() {
                    return Some(Token::Punctuation(c));
                }
                self.reader.pushback(c);
                self.flush_word()
            }
            c => {
                self.buffer.push(c);
                None
            }
        }
    }

    fn number_state(&mut self, c: char) -> Option<Token> {
        if c.is_ascii_digit() {
            self.buffer.push(c);
            return None;
        }
        self.reader.pushback(c);
        self.state = State::Text;
        Some(number_token(self.take_buffer()))
    }

    fn spaces_state(&mut self, c: char) -> Option<Token> {
        if c == ' ' || c == '\t' {
            self.buffer.push(c);
            return None;
        }
        self.reader.pushback(c);
        self.state = State::Text;
        Some(Token::Spaces(self.take_buffer()))
    }

    fn tag_open_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '!' => self.state = State::MarkupDeclarationOpen,
            '?' => self.state = State::PiTarget,
            '/' => {
                self.buffer.push(c);
                self.state = State::EndTagOpen;
            }
            c if is_name_start_char(c) => {
                self.buffer.push(c);
                self.state = State::TagName;
            }
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    /// State to continue in after a start-tag
    fn after_start_tag(name: &str) -> State {
        if name.eq_ignore_ascii_case("script") {
            State::ScriptData
        } else {
            State::Text
        }
    }

    fn tag_name_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '>' => {
                let name = self.take_buffer();
                self.state = Self::after_start_tag(&name);
                Ok(Some(Token::Tag(Tag::new(&name, self.case_sensitive))))
            }
            '/' => {
                self.state = State::SelfClosingStartTag;
                Ok(None)
            }
            c if is_space(c) => {
                let name = self.take_buffer();
                let tag = Tag::new(&name, self.case_sensitive);
                let token =
                    AttributeParser::new(&mut self.reader, &mut self.diagnostics, tag).parse()?;
                self.state = match token {
                    Some(Token::Tag(_)) => Self::after_start_tag(&name),
                    _ => State::Text,
                };
                Ok(token)
            }
            c if is_name_char(c) => {
                self.buffer.push(c);
                Ok(None)
            }
            c => {
                self.invalid_char(c)?;
                Ok(None)
            }
        }
    }

    fn self_closing_start_tag_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '>' => {
                let tag = Tag::new(&self.take_buffer(), self.case_sensitive);
                self.state = State::Text;
                Ok(Some(Token::EmptyElement(EmptyElement::from_start_tag(tag))))
            }
            c if is_space(c) => Ok(None),
            c => {
                self.unknown_edge(c)?;
                Ok(None)
            }
        }
    }

    fn end_tag_open_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        if is_name_start_char(c) {
            self.buffer.push(c);
            self.state = State::EndTagName;
        } else {
            self.invalid_char(c)?;
        }
        Ok(None)
    }

    fn end_tag_name_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '>' => {
                self.state = State::Text;
                let tag = Tag::new(&self.take_buffer(), self.case_sensitive);
                Ok(Some(Token::Tag(tag)))
            }
            c if is_name_char(c) => {
                self.buffer.push(c);
                Ok(None)
            }
            c => {
                self.invalid_char(c)?;
                Ok(None)
            }
        }
    }

    fn markup_declaration_open_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '-' => self.state = State::CommentStart,
            '[' => self.state = State::CdataKeywordStart,
            c if is_name_start_char(c) => {
                self.buffer.push(c);
                self.state = State::DeclarationKeyword;
            }
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    fn declaration_keyword_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            c if is_space(c) => {
                let keyword = self.take_buffer();
                if DECLARATION_KEYWORDS
                    .iter()
                    .any(|k| k.eq_ignore_ascii_case(&keyword))
                {
                    self.name = keyword;
                    self.state = State::DeclarationSpace;
                } else {
                    self.error(format!("Unrecognised DTD part \"{}\"", keyword))?;
                }
            }
            c if is_name_char(c) => self.buffer.push(c),
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    fn declaration_space_state(&mut self, c: char) -> Option<Token> {
        match c {
            '>' => {
                self.state = State::Text;
                Some(Token::Doctype {
                    name: std::mem::take(&mut self.name),
                    data: String::new(),
                })
            }
            c if is_space(c) => None,
            c => {
                self.buffer.push(c);
                self.state = State::DeclarationData;
                None
            }
        }
    }

    fn declaration_data_state(&mut self, c: char) -> Option<Token> {
        if c != '>' {
            self.buffer.push(c);
            return None;
        }
        self.state = State::Text;
        Some(Token::Doctype {
            name: std::mem::take(&mut self.name),
            data: self.take_buffer(),
        })
    }

    fn comment_start_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        if c == '-' {
            self.state = State::Comment;
        } else {
            self.unknown_edge(c)?;
        }
        Ok(None)
    }

    fn comment_state(&mut self, c: char) -> Option<Token> {
        self.buffer.push(c);
        if c == '-' {
            self.state = State::CommentEndDash;
        }
        None
    }

    fn comment_end_dash_state(&mut self, c: char) -> Option<Token> {
        self.buffer.push(c);
        self.state = if c == '-' {
            State::CommentEnd
        } else {
            State::Comment
        };
        None
    }

    /// The buffer ends in `--`
    fn comment_end_state(&mut self, c: char) -> Option<Token> {
        match c {
            '>' => {
                self.state = State::Text;
                let mut text = self.take_buffer();
                text.truncate(text.len() - 2);
                Some(Token::Comment(text))
            }
            '-' => {
                self.buffer.push(c);
                None
            }
            c => {
                self.buffer.push(c);
                self.state = State::Comment;
                None
            }
        }
    }

    fn pi_target_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '?' => {
                self.name = self.take_buffer();
                self.state = State::PiEnd;
            }
            '>' => self.unknown_edge(c)?,
            c if is_space(c) => {
                self.name = self.take_buffer();
                self.state = State::PiData;
            }
            c => self.buffer.push(c),
        }
        Ok(None)
    }

    fn pi_data_state(&mut self, c: char) -> Option<Token> {
        if c == '?' {
            self.state = State::PiEnd;
        } else {
            self.buffer.push(c);
        }
        None
    }

    fn pi_end_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        if c != '>' {
            self.unknown_edge(c)?;
            return Ok(None);
        }
        self.state = State::Text;
        Ok(Some(Token::ProcessingInstruction {
            target: std::mem::take(&mut self.name),
            data: self.take_buffer(),
        }))
    }

    /// Just read `&`
    fn entity_state(&mut self, c: char) -> Option<Token> {
        if c == '#' {
            self.state = State::CharRef;
        } else if is_name_start_char(c) {
            self.reader.pushback(c);
            self.state = State::EntityName;
        } else {
            self.recovery(format_args!(
                "Recovery assumed that '&' is not intended as an entity reference"
            ));
            self.reader.pushback(c);
            self.reader.pushback_str("&amp;");
            self.state = State::Text;
        }
        None
    }

    fn entity_name_state(&mut self, c: char) -> Option<Token> {
        if c == ';' {
            self.state = State::Text;
            return Some(Token::EntityReference(self.take_buffer()));
        }
        if is_name_char(c) {
            self.buffer.push(c);
            return None;
        }

        self.state = State::Text;
        self.reader.pushback(c);
        let name = self.take_buffer();
        if is_known_entity(&name) {
            self.recovery(format_args!(
                "Recovery assumed that ; should have ended the entity reference &{}",
                name
            ));
            return Some(Token::EntityReference(name));
        }

        // Not an entity after all; read it again as text behind a literal ampersand
        self.recovery(format_args!(
            "Recovery assumed that &{} was not intended as an entity reference",
            name
        ));
        self.reader.pushback_str(&name);
        self.reader.pushback_str("&amp;");
        None
    }

    /// Just read `&#`
    fn char_ref_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '0'..='9' => {
                self.buffer.push(c);
                self.state = State::DecimalCharRef;
            }
            'x' | 'X' => self.state = State::HexCharRef,
            c => self.unknown_edge(c)?,
        }
        Ok(None)
    }

    /// Decimal digits, or hex digits behind an `x`
    fn char_entity(&mut self, digits: &str) -> Token {
        self.state = State::Text;
        Token::CharacterEntity(decode_numeric(digits).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex_char_ref_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        if c.is_ascii_hexdigit() {
            self.buffer.push(c);
            return Ok(None);
        }
        if self.buffer.is_empty() {
            self.unknown_edge(c)?;
            return Ok(None);
        }

        let digits = format!("x{}", self.take_buffer());
        if c != ';' {
            self.recovery(format_args!(
                "Recovery assumed that ; should have ended the character entity &#{}",
                digits
            ));
            self.reader.pushback(c);
        }
        Ok(Some(self.char_entity(&digits)))
    }

    fn decimal_char_ref_state(&mut self, c: char) -> Option<Token> {
        if c.is_ascii_digit() {
            self.buffer.push(c);
            return None;
        }

        let digits = self.take_buffer();
        if c != ';' {
            self.recovery(format_args!(
                "Recovery assumed that ; should have ended the character entity &#{}",
                digits
            ));
            self.reader.pushback(c);
        }
        Some(self.char_entity(&digits))
    }

    /// Just read `<![`
    fn cdata_keyword_start_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        if is_name_char(c) {
            self.buffer.push(c);
            self.state = State::CdataKeyword;
        } else {
            self.invalid_char(c)?;
        }
        Ok(None)
    }

    fn cdata_keyword_state(&mut self, c: char) -> ParseResult<Option<Token>> {
        match c {
            '[' => {
                if self.buffer.eq_ignore_ascii_case("CDATA") {
                    self.buffer.clear();
                    self.state = State::CdataSection;
                } else {
                    self.reader.pushback(c);
                    self.error(format!("CData declaration expected, found \"{}\"", self.buffer))?;
                }
            }
            c if is_name_char(c) => self.buffer.push(c),
            c => self.invalid_char(c)?,
        }
        Ok(None)
    }

    fn cdata_section_state(&mut self, c: char) -> Option<Token> {
        if c == ']' {
            self.state = State::CdataBracket;
        } else {
            self.buffer.push(c);
        }
        None
    }

    /// Read one `]`
    fn cdata_bracket_state(&mut self, c: char) -> Option<Token> {
        if c == ']' {
            self.state = State::CdataEnd;
        } else {
            self.buffer.push(']');
            self.buffer.push(c);
            self.state = State::CdataSection;
        }
        None
    }

    /// Read `]]`
    fn cdata_end_state(&mut self, c: char) -> Option<Token> {
        match c {
            '>' => {
                self.state = State::Text;
                Some(Token::CData(self.take_buffer()))
            }
            // `]]]>`: the first bracket is content
            ']' => {
                self.buffer.push(']');
                None
            }
            c => {
                self.buffer.push_str("]]");
                self.buffer.push(c);
                self.state = State::CdataSection;
                None
            }
        }
    }

    fn script_data_state(&mut self, c: char) -> Option<Token> {
        if c == '<' {
            self.script_end.push(c);
            self.state = State::ScriptEndTag(1);
        } else {
            self.buffer.push(c);
        }
        None
    }

    fn script_end_tag_state(&mut self, c: char, matched: usize) -> Option<Token> {
        if !c.eq_ignore_ascii_case(&SCRIPT_END_TAG[matched]) {
            // Not the end after all; the partial match is script content
            let partial = std::mem::take(&mut self.script_end);
            self.buffer.push_str(&partial);
            self.reader.pushback(c);
            self.state = State::ScriptData;
            return None;
        }

        self.script_end.push(c);
        if matched + 1 < SCRIPT_END_TAG.len() {
            self.state = State::ScriptEndTag(matched + 1);
            return None;
        }

        // Leave the end-tag in the stream so it is tokenized as a tag
        let end_tag = std::mem::take(&mut self.script_end);
        self.reader.pushback_str(&end_tag);
        self.state = State::Text;
        Some(Token::Script(self.take_buffer()))
    }

    /// Correct an entity or character reference cut off by the end of input
    /// and push it back to be read again. Returns false when there is none.
    fn complete_reference(&mut self) -> bool {
        let corrected = match self.state {
            State::Entity => "&amp;".to_string(),
            State::EntityName if is_known_entity(&self.buffer) => format!("&{};", self.buffer),
            State::EntityName => format!("&amp;{}", self.buffer),
            State::DecimalCharRef => format!("&#{};", self.buffer),
            State::HexCharRef if !self.buffer.is_empty() => format!("&#x{};", self.buffer),
            _ => return false,
        };
        self.recovery(format_args!(
            "Recovery assumed that {} was intended at end of input",
            corrected
        ));
        self.buffer.clear();
        self.state = State::Text;
        self.reader.pushback_str(&corrected);
        true
    }

    /// End of input: flush a pending text run, anything else is dropped
    fn finish(&mut self) -> Token {
        let leftovers = self.take_buffer();
        let state = std::mem::replace(&mut self.state, State::Text);
        match state {
            State::Text | State::Spaces | State::Number if leftovers.is_empty() => Token::Eof,
            State::Text => Token::Word(leftovers),
            State::Spaces => Token::Spaces(leftovers),
            State::Number => number_token(leftovers),
            state => {
                self.diagnostics.warning();
                log::warn!(
                    "Unexpected end of input in {} ({})",
                    state.description(),
                    self.reader.position()
                );
                self.name.clear();
                self.script_end.clear();
                Token::Eof
            }
        }
    }

    fn recovery(&mut self, message: std::fmt::Arguments<'_>) {
        log::warn!("{} ({})", message, self.reader.position());
        self.diagnostics.recovery();
    }

    /// Record a hard error and skip input up to the next `>`
    fn error(&mut self, message: String) -> ParseResult<()> {
        log::error!("{} ({})", message, self.reader.position());
        self.buffer.clear();
        self.name.clear();
        self.state = State::Recover;
        self.diagnostics.error(self.reader.location())
    }

    /// A character that cannot appear here. It is pushed back so that a `>`
    /// still ends the recovery.
    fn invalid_char(&mut self, c: char) -> ParseResult<()> {
        let message = format!(
            "Character {} cannot be accepted from the {} state",
            describe_char(Some(c)),
            self.state.description()
        );
        self.reader.pushback(c);
        self.error(message)
    }

    /// No transition for this character from the current state
    fn unknown_edge(&mut self, c: char) -> ParseResult<()> {
        let message = format!(
            "No edge labelled {} from the {} state",
            describe_char(Some(c)),
            self.state.description()
        );
        self.reader.pushback(c);
        self.error(message)
    }
}

/// Tokenize a whole document, excluding the final `Eof`
pub fn tokenize(text: &str) -> ParseResult<Vec<Token>> {
    let mut tokenizer = Tokenizer::new(Reader::new(text));
    let mut tokens = Vec::new();
    loop {
        match tokenizer.next_token()? {
            Token::Eof => return Ok(tokens),
            token => tokens.push(token),
        }
    }
}
