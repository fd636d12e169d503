use tracing::debug;

use super::tables::decorate_tables;
use crate::markup::{self, Element, Node};
use crate::utils::html::{self, Rewrite};

/// Class of the container that replaces each `<pre>` on display.
pub const CODE_BLOCK_CLASS: &str = "advanced-code-block";

/// Turn stored rich text into display markup.
///
/// Every `<pre>` is replaced by a `<div class="advanced-code-block">` that
/// holds the block's text as live markup, with its tables decorated. The
/// input is trusted: nothing is filtered here.
pub fn render(rich_text: &str) -> String {
    html::rewrite_elements(rich_text, "pre", |pre| {
        let parsed = markup::parse_fragment(&html::text_content(pre));
        if !parsed.errors.is_empty() {
            debug!(
                errors = parsed.errors.len(),
                "rendering code block from recovered markup"
            );
        }
        let mut container = Element::new("div").with_attribute("class", CODE_BLOCK_CLASS);
        container.children = decorate_tables(parsed.nodes);
        Rewrite::Replace(vec![Node::Element(container)])
    })
}
