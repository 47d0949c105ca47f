//! Base world documents: parsing with quick-xml and scene-root lookup.
//!
//! Parsing keeps everything inside the root element, layout whitespace and
//! comments included, and marks every element verbatim, so that content the
//! generator does not touch is written back unchanged. The XML declaration is dropped; one is emitted
//! again on output.

use crate::element::{Element, Node};
use crate::error::DocumentError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Name of the element generated actors are appended to.
pub const SCENE_ROOT: &str = "world";

/// A parsed markup document.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldDocument {
    pub doctype: Option<String>,

    /// Comments between the declaration and the root element.
    pub prolog: Vec<Node>,

    pub root: Element,

    /// Comments after the root element.
    pub epilog: Vec<Node>,
}

impl WorldDocument {
    pub fn new(root: Element) -> Self {
        Self {
            doctype: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        let mut doctype = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        // Open elements, innermost last.
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(DocumentError::Malformed(
                            "more than one root element".into(),
                        ));
                    }
                    stack.push(open_element(e)?);
                }
                Event::Empty(ref e) => {
                    let element = open_element(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push(element),
                        None if root.is_none() => root = Some(element),
                        None => {
                            return Err(DocumentError::Malformed(
                                "more than one root element".into(),
                            ));
                        }
                    }
                }
                Event::End(_) => {
                    let Some(mut element) = stack.pop() else {
                        return Err(DocumentError::Malformed("unbalanced end tag".into()));
                    };
                    // `<a></a>` carries an explicit empty payload, unlike `<a/>`.
                    if element.children.is_empty() {
                        element.children.push(Node::Text(String::new()));
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape()?;
                        match parent.children.last_mut() {
                            Some(Node::Text(prev)) => prev.push_str(&text),
                            _ => parent.children.push(Node::Text(text.into_owned())),
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::CData(utf8(&e)?));
                    }
                }
                Event::Comment(ref e) => {
                    let comment = Node::Comment(utf8(e)?);
                    match (stack.last_mut(), root.is_some()) {
                        (Some(parent), _) => parent.children.push(comment),
                        (None, false) => prolog.push(comment),
                        (None, true) => epilog.push(comment),
                    }
                }
                Event::DocType(ref e) => doctype = Some(utf8(e)?.trim().to_string()),
                Event::Eof => break,
                // Declaration and processing instructions are not carried over.
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(DocumentError::Malformed("unexpected end of document".into()));
        }
        let root = root.ok_or_else(|| DocumentError::Malformed("no root element".into()))?;
        Ok(Self {
            doctype,
            prolog,
            root,
            epilog,
        })
    }

    /// The scene root: the first descendant of the root element named [`SCENE_ROOT`].
    pub fn scene_root(&self) -> Result<&Element, DocumentError> {
        self.root
            .find_descendant(SCENE_ROOT)
            .ok_or(DocumentError::MissingSceneRoot(SCENE_ROOT))
    }

    pub fn scene_root_mut(&mut self) -> Result<&mut Element, DocumentError> {
        self.root
            .find_descendant_mut(SCENE_ROOT)
            .ok_or(DocumentError::MissingSceneRoot(SCENE_ROOT))
    }
}

fn open_element(start: &BytesStart) -> Result<Element, DocumentError> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    element.verbatim = true;
    for attr in start.attributes() {
        let attr = attr?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<String, DocumentError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DocumentError::Malformed(e.to_string()))
}
