use crate::dom::Node;
use crate::images::ImageSink;
use crate::parser::blocks::classify_children;
use crate::schema::{InnerSection, Section};

/// Marker class of the wrapper that groups grafs inside a post section.
pub const SECTION_INNER_CLASS: &str = "section-inner";

/// Collect the `section-inner` wrappers below `container`.
///
/// The search stops at the first wrapper on each path. Wrappers whose grafs
/// all get dropped are left out.
pub fn assemble_sections(container: &Node, images: &dyn ImageSink) -> Vec<InnerSection> {
    container
        .outermost(&|n| n.has_class(SECTION_INNER_CLASS))
        .into_iter()
        .filter_map(|wrapper| {
            let body = classify_children(wrapper, images);
            if body.is_empty() {
                return None;
            }

            let classes = wrapper
                .classes()
                .filter(|c| *c != SECTION_INNER_CLASS)
                .map(str::to_string)
                .collect();

            Some(InnerSection { classes, body })
        })
        .collect()
}

/// One [`Section`] per direct `<section>` child of a post body.
pub fn body_sections(body: &Node, images: &dyn ImageSink) -> Vec<Section> {
    body.children_named("section")
        .map(|section| Section {
            name: section.attr("name").unwrap_or_default().to_string(),
            body: assemble_sections(section, images),
        })
        .collect()
}
