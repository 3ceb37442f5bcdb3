//! Tag balancing and XML emission
//!
//! Drives the tokenizer over one document and writes well-formed XML. Open
//! elements are tracked on a stack; end-tags that do not match the top of the
//! stack are repaired in one of three ways:
//!
//! - the end-tag closes a singleton element (`html`, `head`, `body`) further
//!   down the stack: everything above it is closed first
//! - otherwise a start-tag is invented right before it, leaving the stack
//!   as it was
//! - with nothing open at all it is dropped
//!
//! Elements still open at the end of input are closed there.

use crate::config::ParserConfig;
use crate::entities::{entity_code_point, is_xml_entity};
use crate::error::{ParseError, ParseResult};
use crate::reader::Reader;
use crate::tag::{DummyElement, EmptyElement, Tag};
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// Declaration written at the top of every document
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Comment placed in invented start-tags when repairs are annotated
const REPAIR_COMMENT: &str = "inserted missing start-tag";

/// Elements that never have content
const VOID_ELEMENTS: [&str; 7] = ["br", "meta", "link", "base", "input", "img", "area"];

/// Elements that appear once per document
const SINGLETON_ELEMENTS: [&str; 3] = ["html", "head", "body"];

/// Check if a lowercase element name is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Check if a lowercase element name is a singleton element
pub fn is_singleton_element(name: &str) -> bool {
    SINGLETON_ELEMENTS.contains(&name)
}

/// HTML to XML converter
pub struct Normalizer {
    config: ParserConfig,
    /// Names of open elements, as written in their start-tags
    open_elements: Vec<String>,
    output: String,
    report: Option<String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            open_elements: Vec::new(),
            output: String::new(),
            report: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Convert one HTML document to XML.
    ///
    /// Fails without output when the error ceiling is reached or an entity
    /// has no numeric equivalent.
    pub fn convert(&mut self, text: &str) -> ParseResult<String> {
        self.report = None;
        self.open_elements.clear();
        self.output.clear();
        self.output.push_str(XML_HEADER);

        let mut tokenizer = Tokenizer::with_config(Reader::new(text), &self.config);
        let result = self.run(&mut tokenizer);
        let output = std::mem::take(&mut self.output);
        self.open_elements.clear();
        result?;

        let report = tokenizer.completion_report();
        log::info!("{}", report);
        self.report = Some(report);
        Ok(output)
    }

    /// Completion report of the last successful conversion
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    fn run(&mut self, tokenizer: &mut Tokenizer) -> ParseResult<()> {
        let mut token = tokenizer.next_token()?;

        // Leading white-space and document type declarations
        while matches!(token, Token::Spaces(_) | Token::Newline | Token::Doctype { .. }) {
            token = tokenizer.next_token()?;
        }

        while !token.is_eof() {
            self.process_token(token, tokenizer)?;
            token = tokenizer.next_token()?;
        }

        self.close_open_elements(tokenizer);
        Ok(())
    }

    /// Process a single token
    fn process_token(&mut self, token: Token, tokenizer: &mut Tokenizer) -> ParseResult<()> {
        match token {
            Token::Tag(tag) if tag.is_end_tag() => self.handle_end_tag(tag, tokenizer),
            Token::Tag(tag) => self.handle_start_tag(tag),
            Token::EmptyElement(element) => self.output.push_str(&element.render()),

            Token::Word(text) | Token::Spaces(text) => self.write_text(&text),
            Token::Number(n) => self.output.push_str(&n.to_string()),
            Token::Punctuation(c) => self.write_char(c),
            Token::Newline => self.output.push('\n'),
            Token::CharacterEntity(_) | Token::CData(_) => self.output.push_str(&token.render()),

            Token::EntityReference(name) => self.handle_entity(&name, tokenizer)?,
            Token::Script(script) => self.handle_script(&script),
            Token::Comment(text) => self.handle_comment(&text, tokenizer),

            Token::Doctype { .. } | Token::ProcessingInstruction { .. } => {
                log::debug!("Dropping {}", token.render());
            }
            Token::Eof => {}
        }
        Ok(())
    }

    fn handle_start_tag(&mut self, tag: Tag) {
        if is_void_element(&tag.name().to_ascii_lowercase()) {
            self.output
                .push_str(&EmptyElement::from_start_tag(tag).render());
            return;
        }

        self.output.push_str(&tag.render());
        log::debug!("Open <{}> at depth {}", tag.name(), self.open_elements.len());
        self.open_elements.push(tag.name().to_string());
    }

    fn handle_end_tag(&mut self, tag: Tag, tokenizer: &mut Tokenizer) {
        let name = tag.local_name().to_ascii_lowercase();

        if is_void_element(&name) {
            log::debug!("Ignoring redundant end-tag </{}>", name);
            return;
        }

        let Some(top) = self.open_elements.last() else {
            tokenizer.diagnostics_mut().warning();
            log::warn!(
                "Ignoring extra content at end of document: </{}> ({})",
                tag.local_name(),
                tokenizer.reader().position()
            );
            return;
        };

        if top.eq_ignore_ascii_case(&name) {
            self.close_top();
            return;
        }

        let is_open = self
            .open_elements
            .iter()
            .any(|open| open.eq_ignore_ascii_case(&name));

        if is_singleton_element(&name) && is_open {
            // Close everything nested inside the singleton first
            while let Some(open) = self.open_elements.last() {
                if open.eq_ignore_ascii_case(&name) {
                    break;
                }
                tokenizer.diagnostics_mut().warning();
                log::warn!(
                    "Adding a missing end-tag </{}> ({})",
                    open,
                    tokenizer.reader().position()
                );
                self.close_top();
            }
            self.close_top();
            return;
        }

        let mut dummy = DummyElement::from_end_tag(tag);
        if self.config.annotate_repairs {
            dummy = dummy.with_comment(REPAIR_COMMENT);
        }
        tokenizer.diagnostics_mut().warning();
        log::warn!(
            "Adding a missing start-tag <{}> ({})",
            dummy.name(),
            tokenizer.reader().position()
        );
        self.output.push_str(&dummy.render());
    }

    fn write_text(&mut self, text: &str) {
        for c in text.chars() {
            self.write_char(c);
        }
    }

    /// Character data may not contain `]]>`
    fn write_char(&mut self, c: char) {
        if c == '>' && self.output.ends_with("]]") {
            self.output.push_str("&gt;");
        } else {
            self.output.push(c);
        }
    }

    /// Pop the innermost open element and write its end-tag
    fn close_top(&mut self) {
        if let Some(open) = self.open_elements.pop() {
            log::debug!("Close </{}> at depth {}", open, self.open_elements.len());
            self.output.push_str("</");
            self.output.push_str(&open);
            self.output.push('>');
        }
    }

    fn close_open_elements(&mut self, tokenizer: &mut Tokenizer) {
        while let Some(open) = self.open_elements.last() {
            tokenizer.diagnostics_mut().warning();
            log::warn!("Adding a missing end-tag </{}> at end of document", open);
            self.close_top();
        }
    }

    /// Keep the XML entities; everything else becomes a character reference
    fn handle_entity(&mut self, name: &str, tokenizer: &Tokenizer) -> ParseResult<()> {
        if is_xml_entity(name) {
            self.output.push('&');
            self.output.push_str(name);
            self.output.push(';');
            return Ok(());
        }

        match entity_code_point(name) {
            Some(code) => {
                self.output.push_str(&format!("&#{};", code));
                Ok(())
            }
            None => {
                log::error!(
                    "Unsupported entity name: {} ({})",
                    name,
                    tokenizer.reader().position()
                );
                Err(ParseError::UnmappedEntity {
                    name: name.to_string(),
                    location: tokenizer.location(),
                })
            }
        }
    }

    fn handle_script(&mut self, script: &str) {
        if script.is_empty() {
            return;
        }
        // Markers already in the script would end the wrapper early
        let script = script.replace("<![CDATA[", "").replace("]]>", "");
        self.output.push_str("/*<![CDATA[*/");
        self.output.push_str(&script);
        self.output.push_str("/*]]>*/");
    }

    /// XML comments may not contain `--` or end in `-`
    fn handle_comment(&mut self, text: &str, tokenizer: &mut Tokenizer) {
        if !text.contains("--") && !text.ends_with('-') {
            self.output.push_str("<!--");
            self.output.push_str(text);
            self.output.push_str("-->");
            return;
        }

        tokenizer.diagnostics_mut().warning();
        log::warn!(
            "Separating dashes in comment ({})",
            tokenizer.reader().position()
        );
        let mut text = text.to_string();
        while text.contains("--") {
            text = text.replace("--", "- -");
        }
        if text.ends_with('-') {
            text.push(' ');
        }
        self.output.push_str("<!--");
        self.output.push_str(&text);
        self.output.push_str("-->");
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an HTML document to XML with the default configuration
pub fn convert_html_to_xml(text: &str) -> ParseResult<String> {
    Normalizer::new().convert(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Converted body without the XML declaration
    fn convert(html: &str) -> String {
        let xml = convert_html_to_xml(html).unwrap();
        xml.strip_prefix(XML_HEADER).unwrap().to_string()
    }

    fn convert_with(config: ParserConfig, html: &str) -> (String, Normalizer) {
        let mut normalizer = Normalizer::with_config(config);
        let xml = normalizer.convert(html).unwrap();
        (xml.strip_prefix(XML_HEADER).unwrap().to_string(), normalizer)
    }

    #[test]
    fn test_header() {
        let xml = convert_html_to_xml("").unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    #[test]
    fn test_balanced_document() {
        assert_eq!(
            convert(r#"<div class="a"><p>Hello, world!</p></div>"#),
            r#"<div class="a"><p>Hello, world!</p></div>"#
        );
    }

    #[test]
    fn test_void_elements_forced_empty() {
        assert_eq!(convert("<br>"), "<br/>");
        assert_eq!(convert("<br/>"), "<br/>");
        assert_eq!(convert("<BR>"), "<br/>");
        assert_eq!(convert(r#"<img src="a.png">"#), r#"<img src="a.png"/>"#);
        assert_eq!(convert("<p>a<br>b</p>"), "<p>a<br/>b</p>");
    }

    #[test]
    fn test_void_end_tag_ignored() {
        assert_eq!(convert("<p>a<br></br>b</p>"), "<p>a<br/>b</p>");
    }

    #[test]
    fn test_singleton_unwind() {
        assert_eq!(
            convert("<html><body><p>text</html>"),
            "<html><body><p>text</p></body></html>"
        );
    }

    #[test]
    fn test_singleton_not_open_is_ordinary_mismatch() {
        assert_eq!(convert("<div>x</body></div>"), "<div>x<body></body></div>");
    }

    #[test]
    fn test_missing_start_tag() {
        let (xml, normalizer) = convert_with(ParserConfig::default(), "<div>a</b>c</div>");
        assert_eq!(xml, "<div>a<b></b>c</div>");
        assert_eq!(
            normalizer.report(),
            Some("Parsed 1 line containing 17 characters. Reported 1 warning.")
        );
    }

    #[test]
    fn test_missing_start_tag_annotated() {
        let config = ParserConfig::new().with_annotate_repairs(true);
        let (xml, _) = convert_with(config, "<div>a</b></div>");
        assert_eq!(xml, "<div>a<b><!--inserted missing start-tag--></b></div>");
    }

    #[test]
    fn test_extra_end_tag_dropped() {
        let (xml, normalizer) = convert_with(ParserConfig::default(), "<p>a</p></div>");
        assert_eq!(xml, "<p>a</p>");
        assert!(normalizer.report().unwrap().ends_with("Reported 1 warning."));
    }

    #[test]
    fn test_unclosed_elements_closed_at_end() {
        let (xml, normalizer) = convert_with(ParserConfig::default(), "<div><p>text");
        assert_eq!(xml, "<div><p>text</p></div>");
        assert!(normalizer.report().unwrap().ends_with("Reported 2 warnings."));
    }

    #[test]
    fn test_entities() {
        assert_eq!(convert("&copy; &lt; &nbsp;&euro;"), "&#169; &lt; &#160;&#8364;");
        assert_eq!(convert("&#60;&#x3E;"), "&#60;&#62;");
    }

    #[test]
    fn test_entity_missing_semicolon() {
        assert_eq!(convert("&amp is bad"), "&amp; is bad");
        assert_eq!(convert("R&D"), "R&amp;D");
    }

    #[test]
    fn test_unknown_entity_is_fatal() {
        let err = convert_html_to_xml("<p>&bogus;</p>").unwrap_err();
        assert!(matches!(err, ParseError::UnmappedEntity { ref name, .. } if name == "bogus"));
    }

    #[test]
    fn test_script_wrapped() {
        assert_eq!(
            convert("<script>if (a<b) {}</script>"),
            "<script>/*<![CDATA[*/if (a<b) {}/*]]>*/</script>"
        );
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(
            convert(r#"<script src="a.js"></script>"#),
            r#"<script src="a.js"></script>"#
        );
    }

    #[test]
    fn test_script_existing_cdata_removed() {
        assert_eq!(
            convert("<script><![CDATA[x = 1;]]></script>"),
            "<script>/*<![CDATA[*/x = 1;/*]]>*/</script>"
        );
    }

    #[test]
    fn test_leading_doctype_and_space_skipped() {
        assert_eq!(
            convert("<!DOCTYPE html>\n  <html></html>\n"),
            "<html></html>\n"
        );
    }

    #[test]
    fn test_processing_instruction_dropped() {
        assert_eq!(convert("<p><?php echo 1?></p>"), "<p></p>");
    }

    #[test]
    fn test_comment_and_cdata_kept() {
        assert_eq!(
            convert("<p><!-- note --><![CDATA[a < b]]></p>"),
            "<p><!-- note --><![CDATA[a < b]]></p>"
        );
    }

    #[test]
    fn test_cdata_end_in_text_escaped() {
        assert_eq!(convert("<p>a]]>b</p>"), "<p>a]]&gt;b</p>");
        assert_eq!(convert("x]>y ]] >"), "x]>y ]] >");
    }

    #[test]
    fn test_folded_attribute_overwrites() {
        let (xml, normalizer) = convert_with(ParserConfig::default(), r#"<input a="x" a="true">"#);
        assert_eq!(xml, r#"<input a=""/>"#);
        assert!(normalizer.report().unwrap().ends_with("Reported 1 warning."));
    }

    #[test]
    fn test_comment_dashes_separated() {
        assert_eq!(convert("<!-- a -- b -->"), "<!-- a - - b -->");
        assert_eq!(convert("<!-- c --->"), "<!-- c - -->");
    }

    #[test]
    fn test_boolean_attribute() {
        assert_eq!(
            convert(r#"<input disabled="true">"#),
            r#"<input disabled=""/>"#
        );
        assert_eq!(
            convert("<option selected>a</option>"),
            r#"<option selected="">a</option>"#
        );
    }

    #[test]
    fn test_case_sensitive_names_kept() {
        let config = ParserConfig::new().with_case_sensitive(true);
        let (xml, _) = convert_with(config, "<Item>x</ITEM><BR>");
        assert_eq!(xml, "<Item>x</Item><BR/>");
    }

    #[test]
    fn test_error_ceiling_gives_no_output() {
        let html = "<>".repeat(1000);
        let err = convert_html_to_xml(&html).unwrap_err();
        assert!(matches!(err, ParseError::TooManyErrors { errors: 1000, .. }));
    }

    #[test]
    fn test_report_only_after_success() {
        let mut normalizer = Normalizer::new();
        assert_eq!(normalizer.report(), None);
        normalizer.convert("<p>x</p>").unwrap();
        assert_eq!(
            normalizer.report(),
            Some("Parsed 1 line containing 8 characters.")
        );
        assert!(normalizer.convert("&bogus;").is_err());
        assert_eq!(normalizer.report(), None);
    }

    #[test]
    fn test_normalizer_reusable() {
        let mut normalizer = Normalizer::new();
        let first = normalizer.convert("<div>unclosed").unwrap();
        let second = normalizer.convert("<p>x</p>").unwrap();
        assert!(first.ends_with("<div>unclosed</div>"));
        assert_eq!(second, format!("{}<p>x</p>", XML_HEADER));
    }

    #[test]
    fn test_element_sets() {
        assert!(is_void_element("img"));
        assert!(!is_void_element("IMG"));
        assert!(!is_void_element("hr"));
        assert!(is_singleton_element("body"));
        assert!(!is_singleton_element("div"));
    }
}
