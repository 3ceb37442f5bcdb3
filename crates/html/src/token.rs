//! Token model
//!
//! The lexical units the tokenizer produces. Every token except `Eof` renders
//! back to markup that tokenizes to an equivalent token.

use serde::Serialize;

use crate::tag::{EmptyElement, Tag};

/// A token produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Run of text characters
    Word(String),
    /// Run of spaces and tabs
    Spaces(String),
    /// Line feed
    Newline,
    /// Run of decimal digits
    Number(i64),
    /// Single punctuation character in text content
    Punctuation(char),
    /// Start-tag or end-tag
    Tag(Tag),
    /// Self-closed start-tag
    EmptyElement(EmptyElement),
    /// Named entity reference, without `&` and `;`
    EntityReference(String),
    /// Decoded character reference
    CharacterEntity(char),
    /// Comment body
    Comment(String),
    /// CDATA section body
    CData(String),
    /// Markup declaration, e.g. `<!DOCTYPE html>`
    Doctype { name: String, data: String },
    /// Processing instruction, e.g. `<?xml version="1.0"?>`
    ProcessingInstruction { target: String, data: String },
    /// Raw content of a script element
    Script(String),
    /// End of input
    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }

    /// Markup text equivalent to this token. `Eof` renders as nothing.
    pub fn render(&self) -> String {
        match self {
            Token::Word(text) | Token::Spaces(text) | Token::Script(text) => text.clone(),
            Token::Newline => "\n".to_string(),
            Token::Number(n) => n.to_string(),
            Token::Punctuation(c) => c.to_string(),
            Token::Tag(tag) => tag.render(),
            Token::EmptyElement(element) => element.render(),
            Token::EntityReference(name) => format!("&{};", name),
            Token::CharacterEntity(c) => format!("&#{};", *c as u32),
            Token::Comment(text) => format!("<!--{}-->", text),
            Token::CData(data) => format!("<![CDATA[{}]]>", data),
            Token::Doctype { name, data } => format!("<!{} {}>", name, data),
            Token::ProcessingInstruction { target, data } => format!("<?{} {}?>", target, data),
            Token::Eof => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_tokens() {
        assert_eq!(Token::Word("hello".to_string()).render(), "hello");
        assert_eq!(Token::Spaces(" \t ".to_string()).render(), " \t ");
        assert_eq!(Token::Newline.render(), "\n");
        assert_eq!(Token::Number(2024).render(), "2024");
        assert_eq!(Token::Punctuation('!').render(), "!");
    }

    #[test]
    fn test_render_references() {
        assert_eq!(Token::EntityReference("nbsp".to_string()).render(), "&nbsp;");
        assert_eq!(Token::CharacterEntity('A').render(), "&#65;");
        assert_eq!(Token::CharacterEntity('\u{20AC}').render(), "&#8364;");
    }

    #[test]
    fn test_render_markup() {
        assert_eq!(Token::Comment(" note ".to_string()).render(), "<!-- note -->");
        assert_eq!(Token::CData("a < b".to_string()).render(), "<![CDATA[a < b]]>");
        assert_eq!(
            Token::Doctype { name: "DOCTYPE".to_string(), data: "html".to_string() }.render(),
            "<!DOCTYPE html>"
        );
        assert_eq!(
            Token::ProcessingInstruction {
                target: "xml".to_string(),
                data: "version=\"1.0\"".to_string()
            }
            .render(),
            "<?xml version=\"1.0\"?>"
        );
        assert_eq!(Token::Script("var x = 1;".to_string()).render(), "var x = 1;");
    }

    #[test]
    fn test_render_tags() {
        let mut tag = Tag::new("img", false);
        tag.set_attribute("src", Some("a.png")).unwrap();
        assert_eq!(Token::Tag(tag.clone()).render(), r#"<img src="a.png">"#);

        let empty = EmptyElement::try_from(tag).unwrap();
        assert_eq!(Token::EmptyElement(empty).render(), r#"<img src="a.png"/>"#);
    }

    #[test]
    fn test_eof() {
        assert!(Token::Eof.is_eof());
        assert!(!Token::Newline.is_eof());
        assert_eq!(Token::Eof.render(), "");
    }
}
