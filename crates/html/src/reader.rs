//! Character reader
//!
//! A cursor over the raw input with a pushback stack in front of it. The
//! tokenizer pushes characters back whenever it has read one too many, or
//! when it rewrites malformed input into something it can re-scan.

use smallvec::SmallVec;

use crate::error::SourceLocation;

/// Character source with pushback, position and checksum tracking
pub struct Reader {
    input: Vec<char>,
    pos: usize,
    /// Pending characters, top of the stack is read first
    pushback: SmallVec<[char; 16]>,
    /// Optional filename or URL, used in diagnostics only
    source: Option<String>,

    line: usize,
    column: usize,
    char_count: usize,
    checksum: u32,
}

impl Reader {
    /// Create a new reader over the given text
    pub fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            pos: 0,
            pushback: SmallVec::new(),
            source: None,
            line: 1,
            column: 0,
            char_count: 0,
            checksum: 0,
        }
    }

    /// Create a reader that names its source in diagnostics
    pub fn with_source(text: &str, source: impl Into<String>) -> Self {
        let mut reader = Self::new(text);
        reader.source = Some(source.into());
        reader
    }

    /// Filename or URL identifying the input, if one was given
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    /// Read the next character, or `None` at end of input.
    ///
    /// Carriage returns never reach the caller, whether they come from the
    /// source or from the pushback stack.
    pub fn read(&mut self) -> Option<char> {
        loop {
            let next = match self.pushback.pop() {
                Some(c) => Some(c),
                None => self.raw_read(),
            };
            match next {
                Some('\r') => continue,
                other => return other,
            }
        }
    }

    /// Push a single character back onto the stream
    pub fn pushback(&mut self, c: char) {
        log::trace!("Pushback char: {:?}", c);
        self.pushback.push(c);
    }

    /// Push a whole string back; it is read again in its original order
    pub fn pushback_str(&mut self, s: &str) {
        log::trace!("Pushback string: {:?}", s);
        self.pushback.extend(s.chars().rev());
    }

    /// Current line number (1-indexed)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column (0-indexed)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of characters consumed from the source
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// XOR of every character consumed from the source
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Current position as a source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.char_count)
    }

    /// Position for log messages, prefixed with the source name when known
    pub fn position(&self) -> String {
        match &self.source {
            Some(source) => format!("{}:{}", source, self.location()),
            None => self.location().to_string(),
        }
    }

    /// Consume a character from the underlying source. Replays from the
    /// pushback stack never come through here, so they are not counted twice.
    fn raw_read(&mut self) -> Option<char> {
        let c = *self.input.get(self.pos)?;
        self.pos += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.char_count += 1;
        self.checksum ^= c as u32;

        Some(c)
    }
}

impl From<&str> for Reader {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
