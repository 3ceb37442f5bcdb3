//! Tags and attributes
//!
//! A [`Tag`] is a start-tag or an end-tag (name beginning with `/`) with an
//! insertion-ordered attribute set. [`EmptyElement`] and [`DummyElement`] are
//! views derived from a finished tag: the self-closed form, and the
//! start/end pair synthesized for an end-tag that had no start-tag.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use crate::error::TagError;

/// First character of a tag or attribute name
pub fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':'
}

/// Any later character of a tag or attribute name
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

/// Check a name against the name-start/name-char classes
pub fn validate_name(name: &str) -> Result<(), TagError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(TagError::EmptyName)?;
    if !is_name_start_char(first) {
        return Err(TagError::InvalidName { name: name.to_string(), character: first });
    }
    match chars.find(|&c| !is_name_char(c)) {
        Some(character) => Err(TagError::InvalidName { name: name.to_string(), character }),
        None => Ok(()),
    }
}

/// Decode the predefined XML entities in an attribute value. `&amp;` goes
/// last so that `&amp;lt;` comes out as `&lt;`, not `<`.
fn unescape_value(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn escape_value(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// `"true"` in any case means the attribute is merely present. An empty
/// value renders the same as no value, so it is stored as none too.
fn fold_value(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("true"))
        .map(unescape_value)
}

/// A tag attribute. The value is kept decoded and escaped again on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    name: String,
    value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: fold_value(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the value, last write wins. Returns `true` when an existing value
    /// was replaced. Setting no value leaves the attribute untouched; a value
    /// that folds to none still clears the old one.
    pub fn set_value(&mut self, value: Option<&str>) -> bool {
        if value.is_none() {
            return false;
        }
        let value = fold_value(value);
        let Some(old) = self.value.take() else {
            self.value = value;
            return false;
        };
        log::warn!(
            "Overwriting previous attribute value. Attribute name is \"{}\". Old value is \"{}\". New value is \"{}\".",
            self.name,
            old,
            value.as_deref().unwrap_or("")
        );
        self.value = value;
        true
    }

    fn write(&self, out: &mut String) {
        out.push(' ');
        out.push_str(&self.name);
        out.push_str("=\"");
        if let Some(value) = &self.value {
            escape_value(value, out);
        }
        out.push('"');
    }
}

/// A start-tag or end-tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    name: String,
    case_sensitive: bool,
    attributes: SmallVec<[Attribute; 4]>,
}

impl Tag {
    /// Create a tag. Names beginning with `/` are end-tags. Unless
    /// `case_sensitive` is set the name is lowercased.
    pub fn new(name: &str, case_sensitive: bool) -> Self {
        let name = if case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        Self {
            name,
            case_sensitive,
            attributes: SmallVec::new(),
        }
    }

    /// Tag name as stored, including the leading `/` of an end-tag
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name without the end-tag marker
    pub fn local_name(&self) -> &str {
        self.name.strip_prefix('/').unwrap_or(&self.name)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_end_tag(&self) -> bool {
        self.name.starts_with('/')
    }

    fn fold_name(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }

    /// Add an attribute, or set the value of one already present.
    ///
    /// Returns `Ok(true)` when an earlier value was overwritten. An invalid
    /// name drops the attribute and leaves the tag as it was.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<bool, TagError> {
        validate_name(name)?;
        let name = self.fold_name(name);

        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => Ok(existing.set_value(value)),
            None => {
                self.attributes.push(Attribute::new(name, value));
                Ok(false)
            }
        }
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        let name = self.fold_name(name);
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Value of an attribute, `None` when it is absent or has no value
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Attribute::value)
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Markup text for this tag
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// `<name attr="..."` without the closing bracket
    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for attribute in &self.attributes {
            attribute.write(out);
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_open(&mut out);
        out.push('>');
        f.write_str(&out)
    }
}

/// A self-closed element, e.g. `<br/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyElement(Tag);

impl EmptyElement {
    /// Wrap a tag already known to be a start-tag
    pub(crate) fn from_start_tag(tag: Tag) -> Self {
        debug_assert!(!tag.is_end_tag());
        Self(tag)
    }

    pub fn tag(&self) -> &Tag {
        &self.0
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<Tag> for EmptyElement {
    type Error = TagError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        if tag.is_end_tag() {
            return Err(TagError::NotAStartTag(tag.name));
        }
        Ok(Self::from_start_tag(tag))
    }
}

impl fmt::Display for EmptyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.0.write_open(&mut out);
        out.push_str("/>");
        f.write_str(&out)
    }
}

/// Start/end pair standing in for a start-tag that never appeared,
/// e.g. `<b><!--comment--></b>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DummyElement {
    tag: Tag,
    comment: Option<String>,
}

impl DummyElement {
    /// Build from a tag already known to be an end-tag
    pub(crate) fn from_end_tag(end_tag: Tag) -> Self {
        debug_assert!(end_tag.is_end_tag());
        let tag = Tag {
            name: end_tag.local_name().to_string(),
            case_sensitive: end_tag.case_sensitive,
            attributes: end_tag.attributes,
        };
        Self { tag, comment: None }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<Tag> for DummyElement {
    type Error = TagError;

    fn try_from(end_tag: Tag) -> Result<Self, Self::Error> {
        if !end_tag.is_end_tag() {
            return Err(TagError::NotAnEndTag(end_tag.name));
        }
        Ok(Self::from_end_tag(end_tag))
    }
}

impl fmt::Display for DummyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.tag.write_open(&mut out);
        out.push('>');
        if let Some(comment) = &self.comment {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        out.push_str("</");
        out.push_str(self.tag.name());
        out.push('>');
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_classes() {
        assert!(is_name_start_char('a'));
        assert!(is_name_start_char('Z'));
        assert!(is_name_start_char('_'));
        assert!(is_name_start_char(':'));
        assert!(!is_name_start_char('1'));
        assert!(!is_name_start_char('-'));
        assert!(is_name_char('1'));
        assert!(is_name_char('-'));
        assert!(is_name_char('.'));
        assert!(!is_name_char(' '));
        assert!(!is_name_char('é'));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("data-id").is_ok());
        assert!(validate_name("xml:lang").is_ok());
        assert_eq!(validate_name(""), Err(TagError::EmptyName));
        assert_eq!(
            validate_name("1st"),
            Err(TagError::InvalidName { name: "1st".to_string(), character: '1' })
        );
        assert_eq!(
            validate_name("a$b"),
            Err(TagError::InvalidName { name: "a$b".to_string(), character: '$' })
        );
    }

    #[test]
    fn test_tag_name_folding() {
        let tag = Tag::new("DIV", false);
        assert_eq!(tag.name(), "div");
        assert!(!tag.is_end_tag());

        let tag = Tag::new("myTag", true);
        assert_eq!(tag.name(), "myTag");
        assert!(tag.is_case_sensitive());
    }

    #[test]
    fn test_end_tag() {
        let tag = Tag::new("/P", false);
        assert!(tag.is_end_tag());
        assert_eq!(tag.name(), "/p");
        assert_eq!(tag.local_name(), "p");
        assert_eq!(tag.render(), "</p>");
    }

    #[test]
    fn test_attribute_insertion_order() {
        let mut tag = Tag::new("a", false);
        tag.set_attribute("href", Some("x.html")).unwrap();
        tag.set_attribute("class", Some("link")).unwrap();
        tag.set_attribute("id", Some("top")).unwrap();
        let names: Vec<&str> = tag.attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, ["href", "class", "id"]);
        assert_eq!(tag.render(), r#"<a href="x.html" class="link" id="top">"#);
    }

    #[test]
    fn test_attribute_name_case() {
        let mut tag = Tag::new("a", false);
        tag.set_attribute("HREF", Some("x")).unwrap();
        assert_eq!(tag.attributes()[0].name(), "href");
        assert_eq!(tag.attribute_value("Href"), Some("x"));

        let mut tag = Tag::new("a", true);
        tag.set_attribute("HREF", Some("x")).unwrap();
        assert_eq!(tag.attribute_value("HREF"), Some("x"));
        assert_eq!(tag.attribute_value("href"), None);
    }

    #[test]
    fn test_attribute_overwrite() {
        let mut tag = Tag::new("p", false);
        assert_eq!(tag.set_attribute("id", Some("one")), Ok(false));
        assert_eq!(tag.set_attribute("id", Some("two")), Ok(true));
        assert_eq!(tag.attribute_value("id"), Some("two"));
        assert_eq!(tag.attributes().len(), 1);
    }

    #[test]
    fn test_overwrite_with_folded_value() {
        let mut tag = Tag::new("input", false);
        assert_eq!(tag.set_attribute("a", Some("x")), Ok(false));
        assert_eq!(tag.set_attribute("a", Some("true")), Ok(true));
        assert_eq!(tag.attribute_value("a"), None);
        assert_eq!(tag.set_attribute("a", Some("y")), Ok(false));
        assert_eq!(tag.set_attribute("a", Some("")), Ok(true));
        assert_eq!(tag.render(), r#"<input a="">"#);
    }

    #[test]
    fn test_valueless_attribute_then_value() {
        let mut tag = Tag::new("input", false);
        assert_eq!(tag.set_attribute("checked", None), Ok(false));
        assert_eq!(tag.set_attribute("checked", Some("yes")), Ok(false));
        assert_eq!(tag.attribute_value("checked"), Some("yes"));
        assert_eq!(tag.set_attribute("checked", None), Ok(false));
        assert_eq!(tag.attribute_value("checked"), Some("yes"));
    }

    #[test]
    fn test_invalid_attribute_dropped() {
        let mut tag = Tag::new("p", false);
        assert!(tag.set_attribute("9lives", Some("x")).is_err());
        assert!(tag.attributes().is_empty());
        assert_eq!(tag.render(), "<p>");
    }

    #[test]
    fn test_boolean_true_folding() {
        let mut tag = Tag::new("input", false);
        tag.set_attribute("disabled", Some("TRUE")).unwrap();
        assert!(tag.attribute("disabled").is_some());
        assert_eq!(tag.attribute_value("disabled"), None);
        assert_eq!(tag.render(), r#"<input disabled="">"#);
    }

    #[test]
    fn test_empty_value_same_as_none() {
        let attribute = Attribute::new("alt", Some(""));
        assert_eq!(attribute, Attribute::new("alt", None));
    }

    #[test]
    fn test_value_decoded_then_escaped() {
        let mut tag = Tag::new("a", false);
        tag.set_attribute("title", Some("&quot;Tom&quot; &amp; <Jerry>")).unwrap();
        assert_eq!(tag.attribute_value("title"), Some("\"Tom\" & <Jerry>"));
        assert_eq!(
            tag.render(),
            r#"<a title="&quot;Tom&quot; &amp; &lt;Jerry&gt;">"#
        );
    }

    #[test]
    fn test_amp_decoded_last() {
        let attribute = Attribute::new("x", Some("&amp;lt;"));
        assert_eq!(attribute.value(), Some("&lt;"));
    }

    #[test]
    fn test_bare_ampersand_escaped() {
        let mut tag = Tag::new("a", false);
        tag.set_attribute("href", Some("?a=1&b=2")).unwrap();
        assert_eq!(tag.render(), r#"<a href="?a=1&amp;b=2">"#);
    }

    #[test]
    fn test_empty_element() {
        let mut tag = Tag::new("img", false);
        tag.set_attribute("src", Some("a.png")).unwrap();
        let empty = EmptyElement::try_from(tag).unwrap();
        assert_eq!(empty.name(), "img");
        assert_eq!(empty.render(), r#"<img src="a.png"/>"#);
    }

    #[test]
    fn test_empty_element_rejects_end_tag() {
        let err = EmptyElement::try_from(Tag::new("/br", false)).unwrap_err();
        assert_eq!(err, TagError::NotAStartTag("/br".to_string()));
    }

    #[test]
    fn test_dummy_element() {
        let dummy = DummyElement::try_from(Tag::new("/b", false)).unwrap();
        assert_eq!(dummy.name(), "b");
        assert_eq!(dummy.render(), "<b></b>");

        let dummy = dummy.with_comment("inserted missing start-tag");
        assert_eq!(dummy.comment(), Some("inserted missing start-tag"));
        assert_eq!(dummy.render(), "<b><!--inserted missing start-tag--></b>");
    }

    #[test]
    fn test_dummy_element_rejects_start_tag() {
        let err = DummyElement::try_from(Tag::new("b", false)).unwrap_err();
        assert_eq!(err, TagError::NotAnEndTag("b".to_string()));
    }
}
