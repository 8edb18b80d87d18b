use crate::dom::Node;
use crate::images::ImageSink;
use crate::parser::extract::parse_medium_id;
use crate::parser::sections::body_sections;
use crate::schema::Post;
use crate::text::rendered_text;

/// A full post: title, body sections, and the canonical link and publish
/// time from the footer.
pub fn extract(root: &Node, images: &dyn ImageSink) -> Post {
    let mut post = Post::default();
    visit(root, &mut post, images);
    post
}

fn visit(node: &Node, post: &mut Post, images: &dyn ImageSink) {
    for c in node.children() {
        if c.is_element("title") {
            post.title = rendered_text(c);
        } else if c.is_element("section") && c.attr("data-field") == Some("body") {
            post.content.extend(body_sections(c, images));
        } else if c.is_element("footer") {
            footer(c, post);
        } else {
            visit(c, post, images);
        }
    }
}

fn footer(node: &Node, post: &mut Post) {
    node.walk(&mut |n| {
        if n.is_element("time") && n.has_class("dt-published") {
            post.published_at = n.attr("datetime").map(str::to_string);
        } else if n.is_element("a") && n.has_class("p-canonical") {
            post.url = n.attr("href").unwrap_or_default().to_string();
            post.id = parse_medium_id(&post.url);
        }
    });
}
