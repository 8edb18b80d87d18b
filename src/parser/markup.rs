//! Inline markup as offsets into a block's normalized text.
//!
//! The text is built in one depth-first pass. Each markup carrier records
//! where the text stood before and after its own content was appended, so
//! offsets always address the same string the block exposes as `text`.

use tracing::debug;

use crate::dom::Node;
use crate::schema::{Markup, MarkupType};
use crate::text::collapse_whitespace;

const HIGHLIGHT_CLASS: &str = "markup--highlight";

/// Inline elements that contribute text but no markup of their own.
const PASSTHROUGH: &[&str] = &[
    "span", "code", "b", "i", "u", "s", "sup", "sub", "small", "mark", "abbr", "cite", "q",
    "time", "del", "ins", "kbd", "strike", "div", "p", "figcaption",
];

/// Normalized text of `node` and the markup spans over it, in document order.
pub fn extract_markup(node: &Node) -> (String, Vec<Markup>) {
    let mut acc = Accumulator::default();
    acc.visit_children(node);

    let mut text = acc.text;
    text.truncate(text.trim_end_matches(' ').len());
    let len = text.len();
    let markups = acc
        .markups
        .into_iter()
        .map(|mut m| {
            m.start = m.start.min(len);
            m.end = m.end.min(len);
            m
        })
        .collect();

    (text, markups)
}

#[derive(Default)]
struct Accumulator {
    text: String,
    /// A collapsed space seen but not yet written. It is materialised once
    /// more text follows or the enclosing carrier closes; a space left at the
    /// end of the block is trimmed.
    pending_space: bool,
    markups: Vec<Markup>,
}

impl Accumulator {
    fn visit_children(&mut self, node: &Node) {
        for child in node.children() {
            self.visit(child);
        }
    }

    fn visit(&mut self, node: &Node) {
        match node {
            Node::Text(data) => self.push_text(data),
            Node::Element(el) => match carrier(node) {
                Some(kind) => {
                    self.flush_space();
                    let start = self.text.len();
                    let idx = self.markups.len();
                    let mut markup = Markup::new(kind, start, start);
                    if kind == MarkupType::Link {
                        markup.href = node.attr("href").map(str::to_string);
                    }
                    self.markups.push(markup);

                    self.visit_children(node);
                    // A space left over from the carrier's own text belongs to it.
                    self.flush_space();
                    self.markups[idx].end = self.text.len();
                }
                None => {
                    if !PASSTHROUGH.contains(&el.tag.as_str()) {
                        debug!(tag = %el.tag, "unknown inline markup, keeping text only");
                    }
                    self.visit_children(node);
                }
            },
            Node::Document { .. } => self.visit_children(node),
            Node::Comment(_) => {}
        }
    }

    fn push_text(&mut self, data: &str) {
        let collapsed = collapse_whitespace(data);
        let mut rest = collapsed.as_ref();

        if let Some(r) = rest.strip_prefix(' ') {
            self.pending_space = true;
            rest = r;
        }
        if rest.is_empty() {
            return;
        }

        let (body, trailing) = match rest.strip_suffix(' ') {
            Some(body) => (body, true),
            None => (rest, false),
        };
        self.flush_space();
        self.text.push_str(body);
        self.pending_space = trailing;
    }

    fn flush_space(&mut self) {
        if self.pending_space && !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
        self.pending_space = false;
    }
}

fn carrier(node: &Node) -> Option<MarkupType> {
    // Highlights are spans told apart by class, never by tag.
    if node.has_class(HIGHLIGHT_CLASS) {
        return Some(MarkupType::Highlight);
    }
    match node.tag()? {
        "em" => Some(MarkupType::Emphasis),
        "strong" => Some(MarkupType::Strong),
        "br" => Some(MarkupType::LineBreak),
        "a" => Some(MarkupType::Link),
        _ => None,
    }
}
