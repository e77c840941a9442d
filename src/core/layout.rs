// src/core/layout.rs

//! The `<Layout>` element of a menu: how its children are ordered.

use crate::core::xml_tree::{Element, Node};
use thiserror::Error;

const DEFAULT_INLINE_LIMIT: u32 = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Menuname cannot be empty")]
    EmptyMenuname,
    #[error("Filename cannot be empty")]
    EmptyFilename,
    #[error("Invalid Merge type '{0}' (expected menus, files or all)")]
    InvalidMergeType(String),
    #[error("Attribute '{attribute}' must be true or false, got '{value}'")]
    InvalidBoolean { attribute: String, value: String },
    #[error("inline_limit must be a non-negative integer, got '{0}'")]
    InvalidInlineLimit(String),
    #[error("Expected a <Layout> element, found <{0}>")]
    NotALayout(String),
}

/// What a `<Merge>` directive pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Menus,
    Files,
    All,
}

impl MergeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menus => "menus",
            Self::Files => "files",
            Self::All => "all",
        }
    }

    fn parse(value: &str) -> Result<Self, LayoutError> {
        match value {
            "menus" => Ok(Self::Menus),
            "files" => Ok(Self::Files),
            // An absent type means "all".
            "all" | "" => Ok(Self::All),
            other => Err(LayoutError::InvalidMergeType(other.to_string())),
        }
    }
}

/// A `<Menuname>` directive with its inlining options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenunameDirective {
    pub name: String,
    pub show_empty: bool,
    pub inline: bool,
    pub inline_limit: u32,
    pub inline_header: bool,
    pub inline_alias: bool,
}

impl MenunameDirective {
    /// A directive for `name` with every option at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show_empty: false,
            inline: false,
            inline_limit: DEFAULT_INLINE_LIMIT,
            inline_header: true,
            inline_alias: false,
        }
    }
}

/// One entry of a layout's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDirective {
    Separator,
    Filename(String),
    Menuname(MenunameDirective),
    Merge(MergeKind),
}

/// A child to place when building a layout from an explicit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutItem {
    Separator,
    /// A sub-menu, by menu id.
    Menu(String),
    /// An entry, by desktop file id.
    File(String),
}

/// Ordering and inlining directives for the children of one menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub show_empty: bool,
    pub inline: bool,
    pub inline_limit: u32,
    pub inline_header: bool,
    pub inline_alias: bool,
    pub order: Vec<LayoutDirective>,
}

impl Default for Layout {
    /// All sub-menus, then all files, in resolver order.
    fn default() -> Self {
        Self {
            order: vec![
                LayoutDirective::Merge(MergeKind::Menus),
                LayoutDirective::Merge(MergeKind::Files),
            ],
            ..Self::empty()
        }
    }
}

impl Layout {
    fn empty() -> Self {
        Self {
            show_empty: false,
            inline: false,
            inline_limit: DEFAULT_INLINE_LIMIT,
            inline_header: true,
            inline_alias: false,
            order: Vec::new(),
        }
    }

    /// Builds an explicit order, bracketed by `Merge menus` and `Merge files` so that
    /// children not listed still show up.
    pub fn from_order(items: impl IntoIterator<Item = LayoutItem>) -> Self {
        let mut order = vec![LayoutDirective::Merge(MergeKind::Menus)];
        order.extend(items.into_iter().map(|item| match item {
            LayoutItem::Separator => LayoutDirective::Separator,
            LayoutItem::Menu(id) => LayoutDirective::Menuname(MenunameDirective::new(id)),
            LayoutItem::File(id) => LayoutDirective::Filename(id),
        }));
        order.push(LayoutDirective::Merge(MergeKind::Files));
        Self {
            order,
            ..Self::empty()
        }
    }

    /// Keeps the order of `self` but takes the menu-wide options of `previous`.
    pub fn with_options_of(mut self, previous: &Self) -> Self {
        self.show_empty = previous.show_empty;
        self.inline = previous.inline;
        self.inline_limit = previous.inline_limit;
        self.inline_header = previous.inline_header;
        self.inline_alias = previous.inline_alias;
        self
    }

    /// Parses a `<Layout>` element. Missing attributes take their defaults.
    pub fn from_xml(element: &Element) -> Result<Self, LayoutError> {
        if element.name != "Layout" {
            return Err(LayoutError::NotALayout(element.name.clone()));
        }

        let mut layout = Self::empty();
        layout.show_empty = bool_attr(element, "show_empty", false)?;
        layout.inline = bool_attr(element, "inline", false)?;
        layout.inline_limit = limit_attr(element)?;
        layout.inline_header = bool_attr(element, "inline_header", true)?;
        layout.inline_alias = bool_attr(element, "inline_alias", false)?;

        for child in element.child_elements() {
            let directive = match child.name.as_str() {
                "Separator" => LayoutDirective::Separator,
                "Filename" => {
                    let id = non_empty_text(child).ok_or(LayoutError::EmptyFilename)?;
                    LayoutDirective::Filename(id.to_string())
                }
                "Menuname" => {
                    let name = non_empty_text(child).ok_or(LayoutError::EmptyMenuname)?;
                    LayoutDirective::Menuname(MenunameDirective {
                        name: name.to_string(),
                        show_empty: bool_attr(child, "show_empty", false)?,
                        inline: bool_attr(child, "inline", false)?,
                        inline_limit: limit_attr(child)?,
                        inline_header: bool_attr(child, "inline_header", true)?,
                        inline_alias: bool_attr(child, "inline_alias", false)?,
                    })
                }
                "Merge" => LayoutDirective::Merge(MergeKind::parse(
                    child.attribute("type").unwrap_or_default(),
                )?),
                other => {
                    log::trace!("Ignoring unknown layout element <{}>", other);
                    continue;
                }
            };
            layout.order.push(directive);
        }
        Ok(layout)
    }

    /// Serializes to a `<Layout>` element. Options equal to their default are left out.
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new("Layout");
        write_options(
            &mut element,
            self.show_empty,
            self.inline,
            self.inline_limit,
            self.inline_header,
            self.inline_alias,
        );

        for directive in &self.order {
            let child = match directive {
                LayoutDirective::Separator => Element::new("Separator"),
                LayoutDirective::Filename(id) => Element::with_text("Filename", id.as_str()),
                LayoutDirective::Menuname(menu) => {
                    let mut child = Element::with_text("Menuname", menu.name.as_str());
                    write_options(
                        &mut child,
                        menu.show_empty,
                        menu.inline,
                        menu.inline_limit,
                        menu.inline_header,
                        menu.inline_alias,
                    );
                    child
                }
                LayoutDirective::Merge(kind) => {
                    let mut child = Element::new("Merge");
                    child.set_attribute("type", kind.as_str());
                    child
                }
            };
            element.children.push(Node::Element(child));
        }
        element
    }
}

fn write_options(
    element: &mut Element,
    show_empty: bool,
    inline: bool,
    inline_limit: u32,
    inline_header: bool,
    inline_alias: bool,
) {
    if show_empty {
        element.set_attribute("show_empty", "true");
    }
    if inline {
        element.set_attribute("inline", "true");
    }
    if inline_limit != DEFAULT_INLINE_LIMIT {
        element.set_attribute("inline_limit", inline_limit.to_string());
    }
    if !inline_header {
        element.set_attribute("inline_header", "false");
    }
    if inline_alias {
        element.set_attribute("inline_alias", "true");
    }
}

fn non_empty_text(element: &Element) -> Option<&str> {
    element.text().map(str::trim).filter(|text| !text.is_empty())
}

fn bool_attr(element: &Element, name: &str, default: bool) -> Result<bool, LayoutError> {
    match element.attribute(name).unwrap_or_default() {
        "" => Ok(default),
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(LayoutError::InvalidBoolean {
            attribute: name.to_string(),
            value: other.to_string(),
        }),
    }
}

fn limit_attr(element: &Element) -> Result<u32, LayoutError> {
    match element.attribute("inline_limit").unwrap_or_default() {
        "" => Ok(DEFAULT_INLINE_LIMIT),
        raw => raw
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidInlineLimit(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::xml_tree::Document;

    #[test]
    fn test_default_layout_merges_menus_then_files() {
        let layout = Layout::default();
        assert_eq!(
            layout.order,
            vec![
                LayoutDirective::Merge(MergeKind::Menus),
                LayoutDirective::Merge(MergeKind::Files),
            ]
        );
        assert_eq!(layout.inline_limit, 4);
        assert!(layout.inline_header);
    }

    #[test]
    fn test_from_order_brackets_items() {
        let layout = Layout::from_order([
            LayoutItem::Menu("Games".to_string()),
            LayoutItem::Separator,
            LayoutItem::File("foo.desktop".to_string()),
        ]);
        assert_eq!(
            layout.order,
            vec![
                LayoutDirective::Merge(MergeKind::Menus),
                LayoutDirective::Menuname(MenunameDirective::new("Games")),
                LayoutDirective::Separator,
                LayoutDirective::Filename("foo.desktop".to_string()),
                LayoutDirective::Merge(MergeKind::Files),
            ]
        );
    }

    #[test]
    fn test_xml_round_trip() {
        // --- Setup ---
        let layout = Layout::from_order([
            LayoutItem::File("b.desktop".to_string()),
            LayoutItem::Menu("Office".to_string()),
            LayoutItem::Separator,
            LayoutItem::File("a.desktop".to_string()),
        ]);

        // --- Execute ---
        let xml = layout.to_xml();
        let parsed = Layout::from_xml(&xml).unwrap();

        // --- Assert ---
        assert_eq!(parsed, layout);
        assert!(xml.attributes.is_empty());
        let menuname = xml.elements_named(&["Menuname"]).next().unwrap();
        assert!(menuname.attributes.is_empty());
        assert_eq!(menuname.text(), Some("Office"));
    }

    #[test]
    fn test_from_xml_fills_defaults_and_reads_options() {
        let doc = Document::parse(
            r#"<Layout inline="true" inline_limit="7">
                 <Menuname show_empty="true" inline_header="false">Games</Menuname>
                 <Merge/>
               </Layout>"#,
        )
        .unwrap();
        let mut root = doc.root;
        crate::core::xml_tree::strip_whitespace_nodes(&mut root);

        let layout = Layout::from_xml(&root).unwrap();
        assert!(layout.inline);
        assert_eq!(layout.inline_limit, 7);
        assert!(!layout.show_empty);

        let mut games = MenunameDirective::new("Games");
        games.show_empty = true;
        games.inline_header = false;
        assert_eq!(
            layout.order,
            vec![
                LayoutDirective::Menuname(games),
                LayoutDirective::Merge(MergeKind::All),
            ]
        );

        // Non-default options survive serialization.
        assert_eq!(Layout::from_xml(&layout.to_xml()).unwrap(), layout);
    }

    #[test]
    fn test_from_xml_rejects_empty_names() {
        let mut layout = Element::new("Layout");
        layout.push_element(Element::new("Menuname"));
        assert_eq!(Layout::from_xml(&layout), Err(LayoutError::EmptyMenuname));

        let mut layout = Element::new("Layout");
        layout.push_element(Element::new("Filename"));
        assert_eq!(Layout::from_xml(&layout), Err(LayoutError::EmptyFilename));
    }

    #[test]
    fn test_from_xml_rejects_bad_values() {
        let mut merge = Element::new("Merge");
        merge.set_attribute("type", "everything");
        let mut layout = Element::new("Layout");
        layout.push_element(merge);
        assert_eq!(
            Layout::from_xml(&layout),
            Err(LayoutError::InvalidMergeType("everything".to_string()))
        );

        let mut layout = Element::new("Layout");
        layout.set_attribute("inline_limit", "many");
        assert!(matches!(
            Layout::from_xml(&layout),
            Err(LayoutError::InvalidInlineLimit(_))
        ));

        assert!(matches!(
            Layout::from_xml(&Element::new("Menu")),
            Err(LayoutError::NotALayout(_))
        ));
    }

    #[test]
    fn test_with_options_of_keeps_order() {
        let mut previous = Layout::default();
        previous.inline = true;
        previous.inline_limit = 2;

        let layout = Layout::from_order([LayoutItem::Separator]).with_options_of(&previous);
        assert!(layout.inline);
        assert_eq!(layout.inline_limit, 2);
        assert_eq!(layout.order.len(), 3);
    }
}
