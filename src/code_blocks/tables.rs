use crate::markup::{Element, Node};

/// Give every table the `table` class and wrap it in a
/// `<div class="table-responsive">`.
///
/// Nested tables are decorated too. Running this twice wraps twice.
pub fn decorate_tables(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(decorate).collect()
}

fn decorate(node: Node) -> Node {
    let Node::Element(mut element) = node else {
        return node;
    };
    element.children = decorate_tables(std::mem::take(&mut element.children));

    if element.name != "table" {
        return Node::Element(element);
    }
    element.set_attribute("class", "table");
    Node::Element(
        Element::new("div")
            .with_attribute("class", "table-responsive")
            .with_child(Node::Element(element)),
    )
}
