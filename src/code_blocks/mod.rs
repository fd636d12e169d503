//! Validation and display of `<pre>` code blocks inside rich text.

pub mod allow_list;
pub mod renderer;
pub mod report;
pub mod tables;
pub mod validator;

pub use allow_list::{ALLOWED_HTML_ATTRIBUTES, ALLOWED_HTML_TAGS, AllowList};
pub use renderer::{CODE_BLOCK_CLASS, render};
pub use report::format_errors;
pub use tables::decorate_tables;
pub use validator::{Validation, validate};

use crate::config::{Config, DEFAULT_ERROR_LABEL};
use crate::error::AppError;
use crate::markup::ParseError;

/// Entry point for the save and display paths.
///
/// Holds the allow-list and the label put in front of validation messages.
/// Cheap to clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct CodeBlockService {
    allow_list: AllowList,
    error_label: String,
}

impl CodeBlockService {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            error_label: DEFAULT_ERROR_LABEL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::default().with_error_label(config.error_label.clone())
    }

    pub fn with_error_label(mut self, label: impl Into<String>) -> Self {
        self.error_label = label.into();
        self
    }

    pub fn validate(&self, html: &str) -> Validation {
        validate(html, &self.allow_list)
    }

    pub fn render(&self, html: &str) -> String {
        render(html)
    }

    /// Render content that may predate validation, cleaning it first.
    pub fn render_untrusted(&self, html: &str) -> String {
        render(&self.validate(html).html)
    }

    /// The labelled message shown to a user whose content was rejected.
    pub fn error_message(&self, errors: &[ParseError]) -> String {
        format!("{}{}", self.error_label, format_errors(errors))
    }

    /// Validate rich text about to be persisted.
    ///
    /// Returns the cleaned HTML to store, or `AppError::ValidationFailed`
    /// when any code block is malformed.
    pub fn prepare_for_save(&self, html: &str) -> Result<String, AppError> {
        let validation = self.validate(html);
        if !validation.is_valid() {
            tracing::info!(
                errors = validation.errors.len(),
                "rejecting rich text with malformed code blocks"
            );
            return Err(AppError::ValidationFailed(
                self.error_message(&validation.errors),
            ));
        }
        Ok(validation.html)
    }
}

impl Default for CodeBlockService {
    fn default() -> Self {
        Self::new(AllowList::default())
    }
}
