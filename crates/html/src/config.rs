//! Parser configuration

use crate::diagnostics::DEFAULT_MAX_ERRORS;

/// Options for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Keep tag and attribute names as written instead of lowercasing them
    pub case_sensitive: bool,
    /// Ceiling on `errors + recoveries` before the parse is abandoned
    pub max_errors: usize,
    /// Filename or URL of the input, for diagnostics
    pub source: Option<String>,
    /// Put a comment inside every start-tag the normalizer has to invent
    pub annotate_repairs: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_annotate_repairs(mut self, annotate: bool) -> Self {
        self.annotate_repairs = annotate;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_errors: DEFAULT_MAX_ERRORS,
            source: None,
            annotate_repairs: false,
        }
    }
}
