//! Ordered, localized status report

use crate::error::BackupError;
use crate::i18n::{render, Language, MessageKey};
use std::fmt::{self, Display, Formatter};

/// Ordered status lines of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    language: Language,
    lines: Vec<String>,
}

impl BackupReport {
    /// Create empty report
    #[inline]
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            lines: Vec::new(),
        }
    }

    /// Report consisting of a single error line
    #[must_use]
    pub fn failed(language: Language, error: &BackupError) -> Self {
        let mut report = Self::new(language);
        report.push_error(error);
        report
    }

    /// Language lines are rendered in
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Append a preformatted line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a catalog message
    pub fn push_msg(&mut self, key: MessageKey, args: &[(&str, &str)]) {
        self.lines.push(render(self.language, key, args));
    }

    /// Append the localized line for an error
    pub fn push_error(&mut self, error: &BackupError) {
        self.lines.push(error.message(self.language));
    }

    /// Lines in order
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Newline-joined report
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl Display for BackupReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
