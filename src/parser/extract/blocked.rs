use crate::dom::Node;
use crate::schema::User;

use super::anchors::{has_exact_class, Anchor};

pub fn extract(root: &Node) -> Vec<User> {
    let mut users = Vec::new();
    root.walk(&mut |n| {
        if n.is_element("a") && has_exact_class(n, "h-cite") {
            let anchor = Anchor::from_node(n);
            users.push(User {
                username: anchor.handle(),
                url: anchor.href,
                ..Default::default()
            });
        }
    });
    users
}
