use serde::{Deserialize, Serialize};

use crate::{code_blocks::CodeBlockService, error::AppError};

/// An entity with a rich-text body that may contain code blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,

    /// Rich-text HTML as stored.
    pub body: Option<String>,

    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Article {
    /// Save hook: clean the body's code blocks before the article is persisted.
    ///
    /// An absent or empty body is left alone. When a code block is malformed
    /// the article is not touched and the labelled validation message is
    /// returned; the caller must abort the save.
    pub fn before_save(&mut self, code_blocks: &CodeBlockService) -> Result<(), AppError> {
        let Some(body) = self.body.as_deref().filter(|body| !body.is_empty()) else {
            return Ok(());
        };

        let cleaned = code_blocks.prepare_for_save(body)?;
        self.body = Some(cleaned);
        self.updated_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// The body ready to embed in a page as-is.
    pub fn formatted_body(&self, code_blocks: &CodeBlockService) -> String {
        self.body
            .as_deref()
            .map(|body| code_blocks.render(body))
            .unwrap_or_default()
    }
}
