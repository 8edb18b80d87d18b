use crate::dom::Node;
use crate::images::ImageSink;
use crate::parser::blocks::classify_children;
use crate::schema::Highlight;
use crate::text::rendered_text;

/// Each `li.h-entry` holds a timestamp and the highlighted grafs as siblings.
pub fn extract(root: &Node, images: &dyn ImageSink) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    root.walk(&mut |n| {
        if !n.is_element("li") || !n.has_class("h-entry") {
            return;
        }

        let created_at = n
            .child_elements()
            .find(|c| c.is_element("time") && c.has_class("dt-published"))
            .map(rendered_text)
            .unwrap_or_default();

        // Non-graf children (the timestamp, links) are skipped by the classifier.
        highlights.push(Highlight {
            created_at,
            body: classify_children(n, images),
        });
    });
    highlights
}
