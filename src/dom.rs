//! Owned HTML node tree built from an html5ever parse.
//!
//! html5ever hands back a reference-counted DOM with interior mutability.
//! Extraction only ever reads, so the parse result is copied once into a
//! closed [`Node`] enum that every extractor can pattern match on.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document { children: Vec<Node> },
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Source order is kept; lookups resolve duplicates to the last value.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Parse a fragment (or full document) into a [`Node::Document`] root.
///
/// Malformed markup is repaired by the tokenizer the way a browser would;
/// only a failure to read the byte stream is reported.
pub fn parse(bytes: &[u8]) -> Result<Node, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut input = bytes;
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut input)?;

    Ok(convert(&dom.document).unwrap_or(Node::Document {
        children: Vec::new(),
    }))
}

fn convert(handle: &Handle) -> Option<Node> {
    let children = || {
        handle
            .children
            .borrow()
            .iter()
            .filter_map(convert)
            .collect::<Vec<_>>()
    };

    match &handle.data {
        NodeData::Document => Some(Node::Document {
            children: children(),
        }),
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            Some(Node::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children: children(),
            }))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => None,
    }
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(el.tag.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(el) => el
                .attrs
                .iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Whitespace-separated entries of the `class` attribute, in source order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Always false for anything that is not an element.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } => children,
            Node::Element(el) => &el.children,
            Node::Text(_) | Node::Comment(_) => &[],
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Node> {
        self.children()
            .iter()
            .filter(|c| matches!(c, Node::Element(_)))
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children().iter().filter(move |c| c.is_element(tag))
    }

    pub fn first_child_element(&self, tag: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.is_element(tag))
    }

    /// First `tag` element among the children that follow child `index`.
    pub fn next_sibling_element(&self, index: usize, tag: &str) -> Option<&Node> {
        self.children()
            .iter()
            .skip(index + 1)
            .find(|c| c.is_element(tag))
    }

    /// Depth-first pre-order visit of every descendant, not including `self`.
    pub fn walk<'a, F: FnMut(&'a Node)>(&'a self, visit: &mut F) {
        for child in self.children() {
            visit(child);
            child.walk(visit);
        }
    }

    /// Descendants matching `pred`, without descending into a match.
    pub fn outermost<'a>(&'a self, pred: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut found = Vec::new();
        collect_outermost(self, pred, &mut found);
        found
    }
}

fn collect_outermost<'a>(node: &'a Node, pred: &dyn Fn(&Node) -> bool, found: &mut Vec<&'a Node>) {
    for child in node.children() {
        if pred(child) {
            found.push(child);
        } else {
            collect_outermost(child, pred, found);
        }
    }
}
