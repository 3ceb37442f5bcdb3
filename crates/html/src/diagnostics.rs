//! Error, recovery and warning accounting
//!
//! One `Diagnostics` value belongs to one parse. Hard errors count towards
//! the ceiling together with recoveries; hitting it is the only way the
//! scanner gives up on a document.

use crate::error::{ParseError, ParseResult, SourceLocation};

/// Default ceiling on `errors + recoveries`
pub const DEFAULT_MAX_ERRORS: usize = 1000;

/// Per-parse counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    errors: usize,
    recoveries: usize,
    warnings: usize,
    max_errors: usize,
}

impl Diagnostics {
    pub fn new(max_errors: usize) -> Self {
        Self {
            errors: 0,
            recoveries: 0,
            warnings: 0,
            max_errors,
        }
    }

    /// Hard errors seen so far
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Heuristic corrections applied so far
    pub fn recoveries(&self) -> usize {
        self.recoveries
    }

    /// Warnings raised so far
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// Record a hard error. Fails once `errors + recoveries` reaches the
    /// ceiling; recoveries on their own never trip it.
    pub fn error(&mut self, location: SourceLocation) -> ParseResult<()> {
        self.errors += 1;
        if self.errors + self.recoveries >= self.max_errors {
            log::error!(
                "Giving up after {} errors and {} recoveries ({})",
                self.errors,
                self.recoveries,
                location
            );
            return Err(ParseError::TooManyErrors {
                errors: self.errors,
                recoveries: self.recoveries,
                location,
            });
        }
        Ok(())
    }

    /// Record a heuristic correction
    pub fn recovery(&mut self) {
        self.recoveries += 1;
    }

    /// Record a warning
    pub fn warning(&mut self) {
        self.warnings += 1;
    }

    /// Human-readable summary of a finished parse
    pub fn completion_report(&self, lines: usize, chars: usize) -> String {
        let mut report = format!(
            "Parsed {} line{} containing {} characters.",
            lines,
            plural(lines),
            chars
        );

        let failures = self.errors + self.recoveries;
        if failures == 0 && self.warnings == 0 {
            return report;
        }

        report.push_str(" Reported ");
        if failures > 0 {
            report.push_str(&format!("{} error{}", failures, plural(failures)));
            if self.recoveries > 0 {
                report.push_str(&format!(" (recovered {})", self.recoveries));
            }
            report.push_str(if self.warnings == 0 { "." } else { " and " });
        }
        if self.warnings > 0 {
            report.push_str(&format!("{} warning{}.", self.warnings, plural(self.warnings)));
        }
        report
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Label a character for log output: printable ASCII as itself, control
/// characters by their ASCII name, end of input as `EOF`.
pub fn describe_char(c: Option<char>) -> String {
    const CONTROL_NAMES: [&str; 33] = [
        "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF",
        "CR", "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM",
        "SUB", "ESC", "FS", "GS", "RS", "US", "SP",
    ];

    match c {
        None => "EOF".to_string(),
        Some(c) if (c as u32) < 0x21 => {
            format!("0x{:02X} <{}>", c as u32, CONTROL_NAMES[c as usize])
        }
        Some('\x7F') => "0x7F <DEL>".to_string(),
        Some(c) if c.is_ascii() => c.to_string(),
        Some(c) => format!("0x{:X}", c as u32),
    }
}
