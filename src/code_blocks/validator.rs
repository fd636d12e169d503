use serde::Serialize;
use tracing::{debug, warn};

use super::allow_list::AllowList;
use super::report::merge_unique;
use crate::markup::{self, Node, ParseError, Parsed};
use crate::utils::html::{self, Rewrite};

/// Outcome of validating a rich-text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// The fragment with every code block cleaned.
    pub html: String,
    /// Diagnostics from all code blocks, unique by raw message.
    pub errors: Vec<ParseError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check and clean every `<pre>` block of a rich-text fragment.
///
/// The text of each block is checked for well-formed markup, then stripped
/// down to allow-listed tags without attributes. The cleaned markup is
/// stored back as the block's text, so it is still displayed verbatim.
/// Malformed blocks are cleaned as well as the parser could recover them;
/// their diagnostics end up in [`Validation::errors`].
pub fn validate(rich_text: &str, allow_list: &AllowList) -> Validation {
    let mut errors = Vec::new();

    let html = html::rewrite_elements(rich_text, "pre", |pre| {
        let code = html::text_content(pre);
        Rewrite::Text(clean_code_block(&code, allow_list, &mut errors))
    });

    Validation { html, errors }
}

fn clean_code_block(code: &str, allow_list: &AllowList, errors: &mut Vec<ParseError>) -> String {
    if code.is_empty() {
        return String::new();
    }
    debug!(bytes = code.len(), "validating code block");

    let envelope = check_well_formed(code);
    if !envelope.errors.is_empty() {
        warn!(
            errors = envelope.errors.len(),
            "code block markup is not well-formed"
        );
    }
    let inner = extract_inner_markup(&envelope);
    merge_unique(errors, envelope.errors);

    // Only the envelope's diagnostics are reported.
    let parsed = markup::parse_fragment(&inner);
    markup::to_markup(&remove_not_allowed(parsed.nodes, allow_list))
}

/// Parse code-block text strictly, inside a synthetic `<pre>` root.
pub fn check_well_formed(code: &str) -> Parsed {
    markup::parse_document(&format!("<pre>{code}</pre>"))
}

/// Markup inside the synthetic root produced by [`check_well_formed`].
pub fn extract_inner_markup(envelope: &Parsed) -> String {
    envelope
        .root()
        .map(|pre| markup::to_markup(&pre.children))
        .unwrap_or_default()
}

/// Drop attributes and non allow-listed elements, children first.
///
/// A rejected element takes whatever survived below it along. Text is
/// kept as is; comments are dropped.
pub fn remove_not_allowed(nodes: Vec<Node>, allow_list: &AllowList) -> Vec<Node> {
    nodes
        .into_iter()
        .filter_map(|node| filter_node(node, allow_list))
        .collect()
}

fn filter_node(node: Node, allow_list: &AllowList) -> Option<Node> {
    match node {
        Node::Text(_) => Some(node),
        Node::Comment(_) => None,
        Node::Element(mut element) => {
            element
                .attributes
                .retain(|(name, _)| allow_list.allows_attribute(name));
            element.children = remove_not_allowed(std::mem::take(&mut element.children), allow_list);
            allow_list
                .allows_tag(&element.name)
                .then_some(Node::Element(element))
        }
    }
}
