use crate::dom::Node;
use crate::schema::Post;
use crate::text::rendered_text;

use super::parse_medium_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

impl Anchor {
    pub fn from_node(a: &Node) -> Self {
        Self {
            href: a.attr("href").unwrap_or_default().to_string(),
            text: rendered_text(a),
        }
    }

    /// Display text without a leading `@`, as shown for user handles.
    pub fn handle(&self) -> String {
        self.text.strip_prefix('@').unwrap_or(&self.text).to_string()
    }

    pub fn to_post(&self) -> Post {
        Post {
            id: parse_medium_id(&self.href),
            url: self.href.clone(),
            title: self.text.clone(),
            ..Default::default()
        }
    }
}

/// Every anchor in the fragment, nested ones included, in document order.
pub fn all_anchors(root: &Node) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    root.walk(&mut |n| {
        if n.is_element("a") {
            anchors.push(Anchor::from_node(n));
        }
    });
    anchors
}

/// Anchors that are direct children of `node`.
pub fn child_anchors(node: &Node) -> impl Iterator<Item = Anchor> + '_ {
    node.children_named("a").map(Anchor::from_node)
}

/// Elements whose `class` attribute is exactly `class`, not merely contains it.
pub fn has_exact_class(node: &Node, class: &str) -> bool {
    node.attr("class") == Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn post_from_anchor() {
        let root = parse(br#"<li><a class="h-cite" href="https://site/p/my-slug-5940ded906e7">Title</a></li>"#).unwrap();
        let anchors = all_anchors(&root);
        assert_eq!(anchors.len(), 1);
        let post = anchors[0].to_post();
        assert_eq!(post.id, "5940ded906e7");
        assert_eq!(post.url, "https://site/p/my-slug-5940ded906e7");
        assert_eq!(post.title, "Title");
    }

    #[test]
    fn nested_anchors_and_handles() {
        let root = parse(br#"<ul><li><a href="https://medium.com/@bob">@bob</a></li><li><div><a href="/u">  @ann </a></div></li></ul>"#).unwrap();
        let handles: Vec<String> = all_anchors(&root).iter().map(Anchor::handle).collect();
        assert_eq!(handles, vec!["bob", "ann"]);
    }

    #[test]
    fn missing_href_is_empty() {
        let root = parse(b"<a>x</a>").unwrap();
        assert_eq!(all_anchors(&root)[0].href, "");
    }
}
