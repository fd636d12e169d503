// tests/render_tests.rs

use richtext_code_blocks::code_blocks::{CodeBlockService, decorate_tables, render};
use richtext_code_blocks::markup::{self, Element, Node};

#[test]
fn code_block_table_is_wrapped_and_decorated() {
    let html = render("<pre>&lt;table&gt;&lt;tr&gt;&lt;td&gt;x&lt;/td&gt;&lt;/tr&gt;&lt;/table&gt;</pre>");

    assert_eq!(
        html,
        "<div class=\"advanced-code-block\"><div class=\"table-responsive\"><table class=\"table\"><tr><td>x</td></tr></table></div></div>"
    );
}

#[test]
fn whole_pre_is_replaced_including_its_attributes() {
    let html = render("<p>Intro</p><pre class=\"lang\">&lt;p&gt;x&lt;/p&gt;</pre><p>Outro</p>");

    assert_eq!(
        html,
        "<p>Intro</p><div class=\"advanced-code-block\"><p>x</p></div><p>Outro</p>"
    );
    assert!(!html.contains("<pre"));
}

#[test]
fn empty_code_block_renders_empty_container() {
    assert_eq!(render("<pre></pre>"), "<div class=\"advanced-code-block\"></div>");
}

#[test]
fn tables_outside_code_blocks_are_not_decorated() {
    let html = render("<table><tr><td>1</td></tr></table><pre>&lt;p&gt;x&lt;/p&gt;</pre>");

    assert!(!html.contains("table-responsive"));
    assert!(!html.contains("class=\"table\""));
    assert!(html.ends_with("<div class=\"advanced-code-block\"><p>x</p></div>"));
}

#[test]
fn nested_tables_are_each_decorated() {
    let html = render(
        "<pre>&lt;table&gt;&lt;tr&gt;&lt;td&gt;&lt;table&gt;&lt;tr&gt;&lt;td&gt;x&lt;/td&gt;&lt;/tr&gt;&lt;/table&gt;&lt;/td&gt;&lt;/tr&gt;&lt;/table&gt;</pre>",
    );

    assert_eq!(
        html,
        "<div class=\"advanced-code-block\"><div class=\"table-responsive\"><table class=\"table\"><tr><td><div class=\"table-responsive\"><table class=\"table\"><tr><td>x</td></tr></table></div></td></tr></table></div></div>"
    );
}

#[test]
fn render_trusts_its_input_but_untrusted_render_cleans_first() {
    let stored = "<pre>&lt;p&gt;ok&lt;/p&gt;&lt;script&gt;x()&lt;/script&gt;</pre>";
    let service = CodeBlockService::default();

    assert_eq!(
        service.render(stored),
        "<div class=\"advanced-code-block\"><p>ok</p><script>x()</script></div>"
    );
    assert_eq!(
        service.render_untrusted(stored),
        "<div class=\"advanced-code-block\"><p>ok</p></div>"
    );
}

#[test]
fn validated_content_renders() {
    let service = CodeBlockService::default();
    let validation = service.validate(
        "<pre>&lt;table style=\"x\"&gt;&lt;tr&gt;&lt;th&gt;h&lt;/th&gt;&lt;/tr&gt;&lt;/table&gt;</pre>",
    );

    assert_eq!(
        service.render(&validation.html),
        "<div class=\"advanced-code-block\"><div class=\"table-responsive\"><table class=\"table\"><tr><th>h</th></tr></table></div></div>"
    );
}

#[test]
fn decoration_overwrites_class_and_is_not_idempotent() {
    let table = Node::Element(
        Element::new("table")
            .with_attribute("class", "striped")
            .with_child(Node::Element(Element::new("tr"))),
    );

    let once = decorate_tables(vec![table]);
    assert_eq!(
        markup::to_markup(&once),
        "<div class=\"table-responsive\"><table class=\"table\"><tr></tr></table></div>"
    );

    let twice = decorate_tables(once);
    assert_eq!(
        markup::to_markup(&twice),
        "<div class=\"table-responsive\"><div class=\"table-responsive\"><table class=\"table\"><tr></tr></table></div></div>"
    );
}
