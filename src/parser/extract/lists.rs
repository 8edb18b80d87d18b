use crate::dom::Node;
use crate::schema::List;
use crate::text::rendered_text;

use super::anchors::child_anchors;

/// A list fragment: name, optional summary, and the posts it collects.
pub fn extract(root: &Node) -> List {
    let mut list = List::default();
    collect(root, &mut list);
    list
}

fn collect(node: &Node, list: &mut List) {
    for c in node.child_elements() {
        if c.is_element("h1") && c.has_class("p-name") {
            list.name = rendered_text(c);
        } else if c.is_element("h2") && c.has_class("p-summary") {
            list.summary = Some(rendered_text(c));
        } else if c.is_element("li") && c.attr("data-field") == Some("post") {
            list.posts.extend(child_anchors(c).map(|a| a.to_post()));
        } else {
            collect(c, list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn list_with_posts() {
        let html = r#"<article>
          <header><h1 class="p-name">Birding</h1><h2 class="p-summary">Posts about birds</h2></header>
          <ul>
            <li data-field="post"><a href="https://medium.com/p/owls-7e904c599273">Owls</a></li>
            <li data-field="post"><a href="https://medium.com/p/c3b588867899">Crows</a></li>
            <li data-field="note"><a href="https://medium.com/p/ffff">ignored</a></li>
          </ul>
        </article>"#;
        let list = extract(&parse(html.as_bytes()).unwrap());
        assert_eq!(list.name, "Birding");
        assert_eq!(list.summary.as_deref(), Some("Posts about birds"));
        let ids: Vec<&str> = list.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["7e904c599273", "c3b588867899"]);
        assert_eq!(list.posts[0].title, "Owls");
    }

    #[test]
    fn list_without_summary() {
        let list = extract(&parse(br#"<h1 class="p-name">Empty</h1>"#).unwrap());
        assert_eq!(list.name, "Empty");
        assert_eq!(list.summary, None);
        assert!(list.posts.is_empty());
    }
}
