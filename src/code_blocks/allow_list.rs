/// Tags that may survive inside a code block.
pub const ALLOWED_HTML_TAGS: &[&str] = &[
    "table", "tr", "td", "th", "col", "pre", "p", "h1", "h2", "h3", "summary", "details", "row",
    "code",
];

/// Attributes that may survive inside a code block. None do.
pub const ALLOWED_HTML_ATTRIBUTES: &[&str] = &[];

/// Immutable set of tag and attribute names permitted in code-block markup.
///
/// Names are compared case-sensitively, as the content is parsed as XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    tags: Vec<String>,
    attributes: Vec<String>,
}

impl AllowList {
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    pub fn allows_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute == name)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(
            ALLOWED_HTML_TAGS.iter().copied(),
            ALLOWED_HTML_ATTRIBUTES.iter().copied(),
        )
    }
}
