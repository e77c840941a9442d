// src/core/xml_tree.rs

//! A small owned XML element tree.
//!
//! Override documents are edited structurally (find a `<Menu>` by its `<Name>`, drop
//! an `<Include>`, append a `<Layout>`), which is awkward on an event stream. This
//! module parses a document with `quick-xml` into [`Element`]s, and writes it back
//! pretty-printed. All walks over the tree use explicit stacks.

use lazy_static::lazy_static;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Text on its own line right before a closing tag.
    static ref DANGLING_TEXT: Regex = Regex::new(r"\n\s*([^\n<]*)\n\s*</").unwrap();
}

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML parse error at byte {position}: {source}")]
    Parse {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("Invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("Failed to write XML: {0}")]
    Write(#[source] quick_xml::Error),
    #[error("Serialized XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Document has no root element.")]
    NoRoot,
    #[error("Document has more than one root element ('{first}' and '{second}').")]
    MultipleRoots { first: String, second: String },
    #[error("Closing tag '{0}' does not match any open element.")]
    UnbalancedEnd(String),
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// `<name>text</name>`
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: vec![Node::Text(text.into())],
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// The first text child, if the element starts with one.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Direct child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> + '_ {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Direct child elements whose name is one of `names`.
    pub fn elements_named<'a>(&'a self, names: &'a [&'a str]) -> impl Iterator<Item = &'a Self> + 'a {
        self.child_elements()
            .filter(move |element| names.contains(&element.name.as_str()))
    }

    /// The first direct child element, whatever its name.
    pub fn first_child_element(&self) -> Option<&Self> {
        self.child_elements().next()
    }

    /// Appends `element` and returns its index among all children.
    pub fn push_element(&mut self, element: Self) -> usize {
        self.children.push(Node::Element(element));
        self.children.len() - 1
    }

    /// Appends `<name>text</name>`.
    pub fn append_text_element(&mut self, name: &str, text: &str) {
        self.push_element(Self::with_text(name, text));
    }

    /// The child element at `index` among all children.
    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Self> {
        match self.children.get_mut(index) {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Index of the first child element matching `predicate`.
    pub fn position_of(&self, mut predicate: impl FnMut(&Self) -> bool) -> Option<usize> {
        self.children.iter().position(|child| match child {
            Node::Element(element) => predicate(element),
            _ => false,
        })
    }

    /// Removes every child element matching `predicate`; returns how many went away.
    pub fn remove_elements_where(&mut self, mut predicate: impl FnMut(&Self) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|child| match child {
            Node::Element(element) => !predicate(element),
            _ => true,
        });
        before - self.children.len()
    }
}

/// A parsed document: optional DOCTYPE, one root element, and the comments found
/// before and after the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doctype: Option<String>,
    pub leading_comments: Vec<String>,
    pub root: Element,
    pub trailing_comments: Vec<String>,
}

impl Document {
    /// Parses `xml` keeping text nodes as they are. The XML declaration and processing
    /// instructions are dropped; comments inside the root survive.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut doctype = None;
        let mut leading_comments = Vec::new();
        let mut trailing_comments = Vec::new();
        let mut root: Option<Element> = None;
        let mut open: Vec<Element> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| XmlError::Parse {
                position: reader.buffer_position(),
                source: e,
            })?;
            match event {
                Event::Start(e) => open.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(element, &mut open, &mut root)?;
                }
                Event::End(e) => {
                    let element = open.pop().ok_or_else(|| {
                        XmlError::UnbalancedEnd(String::from_utf8_lossy(e.name().as_ref()).into_owned())
                    })?;
                    attach(element, &mut open, &mut root)?;
                }
                Event::Text(e) => {
                    if let Some(parent) = open.last_mut() {
                        let text = e.unescape().map_err(|err| XmlError::Parse {
                            position: reader.buffer_position(),
                            source: err,
                        })?;
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = open.last_mut() {
                        parent
                            .children
                            .push(Node::Text(String::from_utf8_lossy(&e).into_owned()));
                    }
                }
                Event::Comment(e) => {
                    let comment = String::from_utf8_lossy(&e).into_owned();
                    match (open.last_mut(), &root) {
                        (Some(parent), _) => parent.children.push(Node::Comment(comment)),
                        (None, None) => leading_comments.push(comment),
                        (None, Some(_)) => trailing_comments.push(comment),
                    }
                }
                Event::DocType(e) => {
                    doctype = Some(String::from_utf8_lossy(&e).trim().to_string());
                }
                Event::Decl(_) | Event::PI(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(XmlError::UnbalancedEnd(unclosed.name));
        }
        let root = root.ok_or(XmlError::NoRoot)?;
        Ok(Self {
            doctype,
            leading_comments,
            root,
            trailing_comments,
        })
    }

    /// Pretty-prints the document with two-space indentation. No XML declaration is
    /// written, and text is kept on the line of its element
    /// (`<Name>Games</Name>`), so repeated load/save cycles do not accumulate blank lines.
    pub fn to_pretty_string(&self) -> Result<String, XmlError> {
        enum Step<'a> {
            Open(&'a Element),
            Text(&'a str),
            Comment(&'a str),
            Close(&'a str),
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        if let Some(doctype) = &self.doctype {
            writer
                .write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))
                .map_err(XmlError::Write)?;
        }
        for comment in &self.leading_comments {
            writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
                .map_err(XmlError::Write)?;
        }

        let mut steps: Vec<Step<'_>> = self
            .trailing_comments
            .iter()
            .rev()
            .map(|comment| Step::Comment(comment.as_str()))
            .collect();
        steps.push(Step::Open(&self.root));
        while let Some(step) = steps.pop() {
            let event = match step {
                Step::Open(element) => {
                    let mut start = BytesStart::new(element.name.as_str());
                    for (key, value) in &element.attributes {
                        start.push_attribute((key.as_str(), value.as_str()));
                    }
                    if element.children.is_empty() {
                        Event::Empty(start)
                    } else {
                        steps.push(Step::Close(element.name.as_str()));
                        for child in element.children.iter().rev() {
                            steps.push(match child {
                                Node::Element(e) => Step::Open(e),
                                Node::Text(t) => Step::Text(t.as_str()),
                                Node::Comment(c) => Step::Comment(c.as_str()),
                            });
                        }
                        Event::Start(start)
                    }
                }
                Step::Text(text) => Event::Text(BytesText::new(text)),
                Step::Comment(text) => Event::Comment(BytesText::from_escaped(text)),
                Step::Close(name) => Event::End(BytesEnd::new(name)),
            };
            writer.write_event(event).map_err(XmlError::Write)?;
        }

        let pretty = String::from_utf8(writer.into_inner())?;
        let mut collapsed = DANGLING_TEXT.replace_all(&pretty, "${1}</").into_owned();
        collapsed.push('\n');
        Ok(collapsed)
    }
}

/// Drops whitespace-only text nodes and trims the rest, so that lookups by element
/// name and child text are not confused by formatting.
pub fn strip_whitespace_nodes(root: &mut Element) {
    let mut stack: Vec<&mut Element> = vec![root];
    while let Some(element) = stack.pop() {
        element.children.retain_mut(|child| match child {
            Node::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    false
                } else {
                    if trimmed.len() != text.len() {
                        *text = trimmed.to_string();
                    }
                    true
                }
            }
            _ => true,
        });
        for child in element.children.iter_mut() {
            if let Node::Element(child_element) = child {
                stack.push(child_element);
            }
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(XmlError::Write)?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    match root {
        Some(existing) => Err(XmlError::MultipleRoots {
            first: existing.name.clone(),
            second: element.name,
        }),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE Menu PUBLIC "-//freedesktop//DTD Menu 1.0//EN" "http://standards.freedesktop.org/menu-spec/menu-1.0.dtd">
<Menu>
	<Name>
		Applications
	</Name>
	<!-- user edits -->
	<MergeFile type="parent">/etc/xdg/menus/applications.menu</MergeFile>
	<Layout>
		<Merge type="menus"/>
		<Separator/>
	</Layout>
</Menu>
"#;

    #[test]
    fn test_parse_keeps_structure() {
        let doc = Document::parse(MENU).unwrap();
        assert_eq!(
            doc.doctype.as_deref(),
            Some(r#"Menu PUBLIC "-//freedesktop//DTD Menu 1.0//EN" "http://standards.freedesktop.org/menu-spec/menu-1.0.dtd""#)
        );
        assert_eq!(doc.root.name, "Menu");
        let names: Vec<&str> = doc.root.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "MergeFile", "Layout"]);
        let merge_file = doc.root.elements_named(&["MergeFile"]).next().unwrap();
        assert_eq!(merge_file.attribute("type"), Some("parent"));
    }

    #[test]
    fn test_strip_whitespace_nodes() {
        // --- Setup ---
        let mut doc = Document::parse(MENU).unwrap();
        assert!(doc.root.children.iter().any(|c| matches!(c, Node::Text(_))));

        // --- Execute ---
        strip_whitespace_nodes(&mut doc.root);

        // --- Assert ---
        assert!(!doc.root.children.iter().any(|c| matches!(c, Node::Text(_))));
        let name = doc.root.first_child_element().unwrap();
        assert_eq!(name.text(), Some("Applications"));
        let layout = doc.root.elements_named(&["Layout"]).next().unwrap();
        assert_eq!(layout.children.len(), 2);
    }

    #[test]
    fn test_pretty_output_is_stable() {
        // --- Setup ---
        let mut doc = Document::parse(MENU).unwrap();
        strip_whitespace_nodes(&mut doc.root);

        // --- Execute ---
        let first = doc.to_pretty_string().unwrap();
        let mut reparsed = Document::parse(&first).unwrap();
        strip_whitespace_nodes(&mut reparsed.root);
        let second = reparsed.to_pretty_string().unwrap();

        // --- Assert ---
        assert!(!first.contains("<?xml"));
        assert!(first.starts_with("<!DOCTYPE Menu PUBLIC"));
        assert!(first.contains("\n  <Name>Applications</Name>\n"));
        assert!(first.contains("<!-- user edits -->"));
        assert!(first.contains("\n    <Merge type=\"menus\"/>\n"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_comments_around_root_survive() {
        // --- Setup ---
        let xml = "<!-- keep me -->\n<Menu><Name>Applications</Name></Menu>\n<!-- tail -->\n";

        // --- Execute ---
        let doc = Document::parse(xml).unwrap();
        let written = doc.to_pretty_string().unwrap();

        // --- Assert ---
        assert_eq!(doc.leading_comments, vec![" keep me ".to_string()]);
        assert_eq!(doc.trailing_comments, vec![" tail ".to_string()]);
        assert!(written.starts_with("<!-- keep me -->"));
        assert!(written.trim_end().ends_with("<!-- tail -->"));
        let menu_at = written.find("<Menu>").unwrap();
        assert!(written.find("<!-- tail -->").unwrap() > menu_at);
        let reparsed = Document::parse(&written).unwrap();
        assert_eq!(reparsed.leading_comments, doc.leading_comments);
        assert_eq!(reparsed.trailing_comments, doc.trailing_comments);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut root = Element::new("Menu");
        root.append_text_element("Name", "R&D <lab>");
        let doc = Document {
            doctype: None,
            leading_comments: Vec::new(),
            root,
            trailing_comments: Vec::new(),
        };
        let xml = doc.to_pretty_string().unwrap();
        assert!(xml.contains("<Name>R&amp;D &lt;lab&gt;</Name>"));

        let back = Document::parse(&xml).unwrap();
        assert_eq!(back.root.first_child_element().unwrap().text(), Some("R&D <lab>"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Document::parse(""), Err(XmlError::NoRoot)));
        assert!(matches!(
            Document::parse("<Menu/><Menu/>"),
            Err(XmlError::MultipleRoots { .. })
        ));
        assert!(Document::parse("<Menu><Name></Menu>").is_err());
    }

    #[test]
    fn test_remove_and_find_helpers() {
        let mut menu = Element::new("Menu");
        menu.append_text_element("Name", "Games");
        menu.push_element(Element::new("Deleted"));
        menu.push_element(Element::new("NotDeleted"));

        assert_eq!(menu.position_of(|e| e.name == "Deleted"), Some(1));
        assert_eq!(
            menu.remove_elements_where(|e| e.name == "Deleted" || e.name == "NotDeleted"),
            2
        );
        assert_eq!(menu.children.len(), 1);
        assert!(menu.element_at_mut(0).is_some());
        assert!(menu.element_at_mut(5).is_none());
    }
}
