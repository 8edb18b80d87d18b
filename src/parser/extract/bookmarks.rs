use crate::dom::Node;
use crate::schema::Post;
use crate::text::rendered_text;

use super::anchors::{has_exact_class, Anchor};

/// One post per outermost `<li>`.
pub fn extract(root: &Node) -> Vec<Post> {
    root.outermost(&|n| n.is_element("li"))
        .into_iter()
        .map(|li| {
            let mut post = Post::default();
            for c in li.child_elements() {
                if c.is_element("a") && has_exact_class(c, "h-cite") {
                    post = Post {
                        published_at: post.published_at.take(),
                        ..Anchor::from_node(c).to_post()
                    };
                } else if c.is_element("time") && has_exact_class(c, "dt-published") {
                    post.published_at = Some(rendered_text(c));
                }
            }
            post
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn bookmarked_posts() {
        let html = r#"<ul class="h-feed">
            <li><a class="h-cite" href="https://medium.com/p/welcome-to-medium-9e53ca408c48">Welcome to Medium</a> by <a class="p-author h-card" href="https://medium.com/@ev">Ev</a> <time class="dt-published">2012-08-14 11:54 pm</time></li>
            <li><time class="dt-published">2013-04-28</time> <a class="h-cite" href="https://medium.com/p/b8d43e4c204d">Re-thinking J-school</a></li>
        </ul>"#;
        let posts = extract(&parse(html.as_bytes()).unwrap());
        assert_eq!(
            posts,
            vec![
                Post {
                    id: "9e53ca408c48".into(),
                    url: "https://medium.com/p/welcome-to-medium-9e53ca408c48".into(),
                    title: "Welcome to Medium".into(),
                    published_at: Some("2012-08-14 11:54 pm".into()),
                    content: Vec::new(),
                },
                Post {
                    id: "b8d43e4c204d".into(),
                    url: "https://medium.com/p/b8d43e4c204d".into(),
                    title: "Re-thinking J-school".into(),
                    published_at: Some("2013-04-28".into()),
                    content: Vec::new(),
                },
            ]
        );
    }

    #[test]
    fn scenario_single_item() {
        let posts = extract(&parse(br#"<li><a class="h-cite" href="https://site/p/my-slug-5940ded906e7">Title</a></li>"#).unwrap());
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "5940ded906e7");
        assert_eq!(posts[0].title, "Title");
        assert_eq!(posts[0].published_at, None);
    }
}
