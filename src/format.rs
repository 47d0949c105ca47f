//! Tree-to-text serialization with an explicit indentation policy.
//!
//! Layout is decided per element while writing, never stored in the tree:
//!
//! * a generated element whose children are all markup is laid out, one
//!   child per line, each indented one level deeper than its parent;
//! * a parsed element, or one holding any character data (whitespace
//!   included), is written exactly as it is, so a base world is preserved
//!   byte for byte whether or not it was indented;
//! * a laid-out tree nested inside verbatim content starts again at depth 0
//!   and is followed by a line break.
//!
//! Parsing the output and writing it again therefore reproduces it exactly.

use crate::document::WorldDocument;
use crate::element::{Element, Node};
use crate::error::DocumentError;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// One level of indentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Indent {
    #[default]
    Tabs,
    Spaces(usize),
}

impl Indent {
    fn unit(&self) -> String {
        match self {
            Indent::Tabs => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// Writes elements and documents as human-readable markup.
#[derive(Clone, Debug, Default)]
pub struct Formatter {
    indent: Indent,
}

impl Formatter {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    /// Renders a standalone tree, its root at depth 0.
    pub fn format_element(&self, element: &Element) -> Result<String, DocumentError> {
        let mut writer = Writer::new(Vec::new());
        self.write_element(&mut writer, element, None)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| DocumentError::Malformed(e.to_string()))
    }

    /// Renders a whole document, UTF-8 encoded, behind an XML declaration.
    pub fn write_document(&self, document: &WorldDocument) -> Result<Vec<u8>, DocumentError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_raw(&mut writer, "\n")?;

        if let Some(doctype) = &document.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
            self.write_raw(&mut writer, "\n")?;
        }
        for node in &document.prolog {
            self.write_node(&mut writer, node, None)?;
            self.write_raw(&mut writer, "\n")?;
        }

        self.write_element(&mut writer, &document.root, None)?;
        self.write_raw(&mut writer, "\n")?;

        for node in &document.epilog {
            self.write_node(&mut writer, node, None)?;
            self.write_raw(&mut writer, "\n")?;
        }
        Ok(writer.into_inner())
    }

    /// `depth` is `Some` inside laid-out content and `None` inside verbatim content.
    fn write_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        element: &Element,
        depth: Option<usize>,
    ) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if element.is_laid_out() {
            let depth = depth.unwrap_or(0);
            for child in &element.children {
                self.write_break(writer, depth + 1)?;
                self.write_node(writer, child, Some(depth + 1))?;
            }
            self.write_break(writer, depth)?;
        } else {
            for child in &element.children {
                self.write_node(writer, child, None)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
        Ok(())
    }

    fn write_node<W: Write>(
        &self,
        writer: &mut Writer<W>,
        node: &Node,
        depth: Option<usize>,
    ) -> Result<(), DocumentError> {
        match node {
            Node::Element(e) => {
                self.write_element(writer, e, depth)?;
                if depth.is_none() && e.is_laid_out() {
                    self.write_raw(writer, "\n")?;
                }
            }
            Node::Text(t) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(t))))?
            }
            Node::CData(c) => writer.write_event(Event::CData(BytesCData::new(c.as_str())))?,
            Node::Comment(c) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
            }
        }
        Ok(())
    }

    fn write_break<W: Write>(
        &self,
        writer: &mut Writer<W>,
        depth: usize,
    ) -> Result<(), DocumentError> {
        let line = format!("\n{}", self.indent.unit().repeat(depth));
        self.write_raw(writer, &line)
    }

    fn write_raw<W: Write>(&self, writer: &mut Writer<W>, raw: &str) -> Result<(), DocumentError> {
        writer.write_event(Event::Text(BytesText::from_escaped(raw)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::element;

    fn sample() -> Element {
        Element::new("actor")
            .with_attribute("name", "human_0")
            .with_child(element("pose", Some("0 0 1 0 0 0"), &[]))
            .with_child(
                Element::new("skin")
                    .with_child(element("filename", Some("walk.dae"), &[]))
                    .with_child(element("scale", Some("1.0"), &[])),
            )
    }

    #[test]
    fn children_are_indented_one_level_deeper() {
        let out = Formatter::default().format_element(&sample()).expect("format");
        assert_eq!(
            out,
            "<actor name=\"human_0\">\n\
             \t<pose>0 0 1 0 0 0</pose>\n\
             \t<skin>\n\
             \t\t<filename>walk.dae</filename>\n\
             \t\t<scale>1.0</scale>\n\
             \t</skin>\n\
             </actor>"
        );
    }

    #[test]
    fn spaces_policy() {
        let tree = Element::new("a").with_child(Element::new("b").with_child(Element::new("c")));
        let out = Formatter::new(Indent::Spaces(2)).format_element(&tree).expect("format");
        assert_eq!(out, "<a>\n  <b>\n    <c/>\n  </b>\n</a>");
    }

    #[test]
    fn empty_payload_is_not_self_closing() {
        let f = Formatter::default();
        assert_eq!(f.format_element(&element("x", None, &[])).unwrap(), "<x/>");
        assert_eq!(f.format_element(&element("x", Some(""), &[])).unwrap(), "<x></x>");
    }

    #[test]
    fn existing_whitespace_is_kept_verbatim() {
        let tree = Element::new("world")
            .with_text("\n  ")
            .with_child(element("gravity", Some("0 0 -9.8"), &[]))
            .with_text("\n");
        let out = Formatter::default().format_element(&tree).expect("format");
        assert_eq!(out, "<world>\n  <gravity>0 0 -9.8</gravity>\n</world>");
    }

    #[test]
    fn laid_out_tree_inside_verbatim_content_breaks_after_itself() {
        let tree = Element::new("world")
            .with_text("\n  ")
            .with_child(Element::new("actor").with_child(element("pose", Some("0"), &[])));
        let out = Formatter::default().format_element(&tree).expect("format");
        assert_eq!(out, "<world>\n  <actor>\n\t<pose>0</pose>\n</actor>\n</world>");
    }

    #[test]
    fn compact_parsed_content_is_not_reindented() {
        let doc = WorldDocument::parse(
            "<world>\n    <include><uri>model://sun</uri></include>\n    <gravity>0</gravity>\n</world>",
        )
        .expect("parse");
        let out = Formatter::default().format_element(&doc.root).expect("format");
        assert_eq!(
            out,
            "<world>\n    <include><uri>model://sun</uri></include>\n    <gravity>0</gravity>\n</world>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let out = Formatter::default()
            .format_element(&element("model", Some("a<b & c"), &[("name", "\"q\"")]))
            .expect("format");
        assert_eq!(out, "<model name=\"&quot;q&quot;\">a&lt;b &amp; c</model>");
    }
}
