//! Structured markup nodes.
//!
//! [`Element`] is the universal tree representation: both the parsed base
//! world and every generated actor are built from it. Layout whitespace is
//! never part of a generated tree; see [`crate::format`] for how trees are
//! laid out as text. Parsed elements are flagged [`Element::verbatim`] and
//! keep exactly the content they were read with.

/// A single child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    /// Returns `true` for text that consists solely of whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A named markup element with ordered attributes and ordered children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,

    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,

    pub children: Vec<Node>,

    /// Written back exactly as stored, never re-indented. Set by the parser.
    pub verbatim: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets an attribute, replacing an existing value with the same key in place.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Appends a text payload. An empty string still counts as a payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The element's text payload: all text and CDATA children concatenated.
    ///
    /// Returns `None` when the element has no character data at all, which is
    /// distinct from `Some("")` (an element written as `<a></a>`).
    pub fn text(&self) -> Option<String> {
        let mut out: Option<String> = None;
        for child in &self.children {
            if let Node::Text(t) | Node::CData(t) = child {
                out.get_or_insert_with(String::new).push_str(t);
            }
        }
        out
    }

    /// Iterates over child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Returns the first direct child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Returns all direct child elements called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// Depth-first, pre-order search for the first descendant called `name`.
    /// The element itself is not considered.
    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if e.name == name {
                    return Some(e);
                }
                if let Some(found) = e.find_descendant_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        for e in self.elements() {
            if e.name == name {
                return Some(e);
            }
            if let Some(found) = e.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// `true` when every child is markup (no character data of any kind).
    pub fn is_element_only(&self) -> bool {
        !self.children.is_empty()
            && self
                .children
                .iter()
                .all(|n| !matches!(n, Node::Text(_) | Node::CData(_)))
    }

    /// `true` for generated element-only content, which the formatter indents.
    pub fn is_laid_out(&self) -> bool {
        !self.verbatim && self.is_element_only()
    }

    /// Returns a copy with all whitespace-only text removed and the
    /// [`verbatim`](Element::verbatim) flag cleared, recursively.
    ///
    /// Two trees that differ only in layout compare equal after this.
    pub fn without_layout(&self) -> Element {
        Element {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: self
                .children
                .iter()
                .filter(|n| !n.is_blank_text())
                .map(|n| match n {
                    Node::Element(e) => Node::Element(e.without_layout()),
                    other => other.clone(),
                })
                .collect(),
            verbatim: false,
        }
    }
}

/// Builds a single element from a name, an optional text payload and an
/// attribute mapping given in order.
pub fn element(name: &str, text: Option<&str>, attributes: &[(&str, &str)]) -> Element {
    let mut e = Element::new(name);
    for (key, value) in attributes {
        e.set_attribute(*key, *value);
    }
    if let Some(text) = text {
        e.children.push(Node::Text(text.to_string()));
    }
    e
}
