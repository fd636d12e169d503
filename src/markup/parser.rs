//! Recovering tree builder on top of the `quick-xml` tokenizer.
//!
//! The tokenizer only reports lexical problems, so nesting is checked here.
//! Every problem becomes a [`ParseError`] and the builder keeps going with a
//! best-effort tree, the way libxml2's recover mode behaves.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::diagnostic::{ParseError, Severity};
use super::{Element, Node};

/// Result of a parse: the recovered nodes and everything that went wrong.
#[derive(Debug, Default)]
pub struct Parsed {
    pub nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// First top-level element, if any.
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(Node::as_element)
    }
}

/// Parses `source` as an XML document with exactly one root element.
pub fn parse_document(source: &str) -> Parsed {
    TreeBuilder::new(source, Mode::Document).run()
}

/// Parses `source` as a fragment: any number of top-level nodes.
pub fn parse_fragment(source: &str) -> Parsed {
    TreeBuilder::new(source, Mode::Fragment).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Document,
    Fragment,
}

struct OpenElement {
    element: Element,
    line: usize,
}

/// Last position resolved by [`TreeBuilder::position`].
struct Cursor {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    mode: Mode,
    cursor: Cursor,
    stack: Vec<OpenElement>,
    nodes: Vec<Node>,
    errors: Vec<ParseError>,
    seen_root: bool,
    halted: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, mode: Mode) -> Self {
        Self {
            source,
            mode,
            cursor: Cursor::default(),
            stack: Vec::new(),
            nodes: Vec::new(),
            errors: Vec::new(),
            seen_root: false,
            halted: false,
        }
    }

    fn run(mut self) -> Parsed {
        let mut reader = Reader::from_str(self.source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        while !self.halted {
            let offset = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref().is_empty() => {
                    self.invalid_start_tag(&format!("<{}>", String::from_utf8_lossy(&e)), offset);
                }
                Ok(Event::Empty(e)) if e.name().as_ref().is_empty() => {
                    self.invalid_start_tag(&format!("<{}/>", String::from_utf8_lossy(&e)), offset);
                }
                Ok(Event::Start(e)) => {
                    let element = self.element_from(&e, offset);
                    self.open(element, offset);
                }
                Ok(Event::Empty(e)) => {
                    let element = self.element_from(&e, offset);
                    self.append(Node::Element(element), offset);
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    self.close(&name, offset);
                }
                Ok(Event::Text(e)) => match e.decode() {
                    Ok(text) => self.text(&text, offset),
                    Err(err) => self.not_utf8(offset, err),
                },
                Ok(Event::CData(e)) => match reader.decoder().decode(&e) {
                    Ok(text) => self.text(&text, offset),
                    Err(err) => self.not_utf8(offset, err),
                },
                Ok(Event::GeneralRef(e)) => match e.decode() {
                    Ok(name) => self.entity(&name, offset),
                    Err(err) => self.not_utf8(offset, err),
                },
                Ok(Event::Comment(e)) => match e.decode() {
                    Ok(comment) => self.append(Node::Comment(comment.into_owned()), offset),
                    Err(err) => self.not_utf8(offset, err),
                },
                Ok(Event::Eof) => break,
                // Declarations, processing instructions and doctypes carry
                // nothing a code block keeps.
                Ok(_) => {}
                Err(err) => {
                    let offset = usize::try_from(reader.error_position()).unwrap_or(offset);
                    self.error(offset, Severity::Fatal, err.to_string());
                    break;
                }
            }
        }

        let end = self.source.len();
        while let Some(open) = self.stack.last() {
            let message = format!(
                "Premature end of data in tag {} line {}",
                open.element.name, open.line
            );
            self.error(end, Severity::Fatal, message);
            self.close_top(end);
        }

        Parsed {
            nodes: self.nodes,
            errors: self.errors,
        }
    }

    fn element_from(&mut self, start: &BytesStart<'_>, offset: usize) -> Element {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            match attribute {
                Ok(attribute) => {
                    let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                    let raw = String::from_utf8_lossy(&attribute.value).into_owned();
                    let value = quick_xml::escape::unescape(&raw)
                        .map(|value| value.into_owned())
                        .unwrap_or(raw);
                    element.attributes.push((key, value));
                }
                Err(err) => {
                    let message = format!("attributes construct error: {err}");
                    self.error(offset, Severity::Fatal, message);
                }
            }
        }
        element
    }

    fn open(&mut self, element: Element, offset: usize) {
        if self.stack.is_empty() && !self.accepts_top_level_element(offset) {
            return;
        }
        let line = self.position(offset).0;
        self.stack.push(OpenElement { element, line });
    }

    fn close(&mut self, name: &str, offset: usize) {
        let Some(index) = self
            .stack
            .iter()
            .rposition(|open| open.element.name == name)
        else {
            let message = format!("Unexpected end tag : {name}");
            self.error(offset, Severity::Fatal, message);
            return;
        };

        if index + 1 != self.stack.len() {
            if let Some(top) = self.stack.last() {
                let message = format!(
                    "Opening and ending tag mismatch: {} line {} and {}",
                    top.element.name, top.line, name
                );
                self.error(offset, Severity::Fatal, message);
            }
        }
        while self.stack.len() > index {
            self.close_top(offset);
        }
    }

    fn close_top(&mut self, offset: usize) {
        if let Some(open) = self.stack.pop() {
            self.append(Node::Element(open.element), offset);
        }
    }

    fn text(&mut self, text: &str, offset: usize) {
        if text.is_empty() {
            return;
        }
        if let Some(open) = self.stack.last_mut() {
            push_text(&mut open.element.children, text);
            return;
        }
        match self.mode {
            Mode::Fragment => push_text(&mut self.nodes, text),
            Mode::Document if text.trim().is_empty() => {}
            Mode::Document => {
                let message = if self.seen_root {
                    "Extra content at the end of the document"
                } else {
                    "Start tag expected, '<' not found"
                };
                self.error(offset, Severity::Fatal, message);
                self.halted = true;
            }
        }
    }

    /// A `<` not followed by a name, as in `a < b`. The tag is kept as text.
    fn invalid_start_tag(&mut self, raw: &str, offset: usize) {
        self.error(offset, Severity::Fatal, "StartTag: invalid element name");
        self.text(raw, offset);
    }

    fn entity(&mut self, name: &str, offset: usize) {
        let reference = format!("&{name};");
        let text = match quick_xml::escape::unescape(&reference) {
            Ok(text) => text.into_owned(),
            Err(_) => {
                let message = format!("Entity '{name}' not defined");
                self.error(offset, Severity::Error, message);
                html_escape::decode_html_entities(&reference).into_owned()
            }
        };
        self.text(&text, offset);
    }

    fn append(&mut self, node: Node, offset: usize) {
        if let Some(open) = self.stack.last_mut() {
            open.element.children.push(node);
            return;
        }
        if matches!(node, Node::Element(_)) && !self.accepts_top_level_element(offset) {
            return;
        }
        if matches!(node, Node::Element(_)) {
            self.seen_root = true;
        }
        self.nodes.push(node);
    }

    /// A document takes a single root; anything after it stops the parse.
    fn accepts_top_level_element(&mut self, offset: usize) -> bool {
        if self.mode == Mode::Document && self.seen_root {
            self.error(offset, Severity::Fatal, "Extra content at the end of the document");
            self.halted = true;
            return false;
        }
        true
    }

    fn error(&mut self, offset: usize, severity: Severity, message: impl Into<String>) {
        let (line, column) = self.position(offset);
        self.errors.push(ParseError::new(line, column, severity, message));
    }

    fn not_utf8(&mut self, offset: usize, err: impl fmt::Display) {
        let message = format!("Input is not proper UTF-8: {err}");
        self.error(offset, Severity::Fatal, message);
    }

    /// 1-based line and column of a byte offset.
    ///
    /// Scans forward from the last offset asked for, so a whole parse reads
    /// the source once.
    fn position(&mut self, offset: usize) -> (usize, usize) {
        let bytes = self.source.as_bytes();
        let offset = offset.min(bytes.len());
        if offset < self.cursor.offset {
            self.cursor = Cursor::default();
        }
        let start = self.cursor.offset;
        for (index, &byte) in bytes[start..offset].iter().enumerate() {
            if byte == b'\n' {
                self.cursor.line += 1;
                self.cursor.line_start = start + index + 1;
            }
        }
        self.cursor.offset = offset;
        (self.cursor.line, offset - self.cursor.line_start + 1)
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}
