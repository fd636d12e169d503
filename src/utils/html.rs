use ego_tree::NodeMut;
use html5ever::{Attribute, LocalName, QualName, ns};
use scraper::node::{Comment, Element, Text};
use scraper::{ElementRef, Html, Node, StrTendril};

use crate::markup;

/// What becomes of an element handed to [`rewrite_elements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Keep the element and its attributes; its children are replaced by
    /// this text.
    Text(String),
    /// Put these nodes where the element was.
    Replace(Vec<markup::Node>),
}

/// Parse a rich-text fragment, rewrite every `tag` element and serialize the
/// result back.
///
/// The HTML parser is tolerant: malformed outer markup is repaired the way a
/// browser would repair it, so the output is normalized even when nothing is
/// rewritten. Elements are visited in document order; one that sits inside
/// an element already rewritten is left alone.
pub fn rewrite_elements<F>(rich_text: &str, tag: &str, mut rewrite: F) -> String
where
    F: FnMut(ElementRef<'_>) -> Rewrite,
{
    let mut fragment = Html::parse_fragment(rich_text);
    let root = fragment.tree.root().id();
    let targets: Vec<_> = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == tag)
        .map(|element| element.id())
        .collect();

    for id in targets {
        let Some(element) = fragment.tree.get(id).and_then(ElementRef::wrap) else {
            continue;
        };
        if !element.ancestors().any(|node| node.id() == root) {
            continue;
        }
        let change = rewrite(element);
        if let Some(target) = fragment.tree.get_mut(id) {
            apply(target, change);
        }
    }

    fragment.root_element().inner_html()
}

/// All descendant text of `element`, markup ignored.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn apply(mut target: NodeMut<'_, Node>, change: Rewrite) {
    match change {
        Rewrite::Text(text) => {
            while let Some(mut child) = target.first_child() {
                child.detach();
            }
            if !text.is_empty() {
                target.append(Node::Text(Text {
                    text: StrTendril::from(text.as_str()),
                }));
            }
        }
        Rewrite::Replace(nodes) => {
            for node in &nodes {
                let mut inserted = target.insert_before(convert(node));
                append_children(&mut inserted, node);
            }
            target.detach();
        }
    }
}

fn append_children(parent: &mut NodeMut<'_, Node>, node: &markup::Node) {
    if let markup::Node::Element(element) = node {
        for child in &element.children {
            let mut appended = parent.append(convert(child));
            append_children(&mut appended, child);
        }
    }
}

/// Code-block markup as an HTML tree node, children not included.
fn convert(node: &markup::Node) -> Node {
    match node {
        markup::Node::Text(text) => Node::Text(Text {
            text: StrTendril::from(text.as_str()),
        }),
        markup::Node::Comment(comment) => Node::Comment(Comment {
            comment: StrTendril::from(comment.as_str()),
        }),
        markup::Node::Element(element) => {
            let name = QualName::new(None, ns!(html), LocalName::from(element.name.as_str()));
            let attributes = element
                .attributes
                .iter()
                .map(|(name, value)| Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
                    value: value.as_str().into(),
                })
                .collect();
            Node::Element(Element::new(name, attributes))
        }
    }
}
