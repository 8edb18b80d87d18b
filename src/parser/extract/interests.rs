//! Interests fragments: one `<li>` per entry, described by its direct anchor.

use crate::dom::Node;
use crate::schema::{Publication, Tag, Topic, User};

use super::anchors::{child_anchors, Anchor};
use super::parse_medium_username;

/// Last direct-child anchor of each `<li>`; an `<li>` without one still
/// yields an (empty) entry.
fn entries(root: &Node) -> Vec<Option<Anchor>> {
    let mut entries = Vec::new();
    root.walk(&mut |n| {
        if n.is_element("li") {
            entries.push(child_anchors(n).last());
        }
    });
    entries
}

pub fn publications(root: &Node) -> Vec<Publication> {
    entries(root)
        .into_iter()
        .map(|a| a.map_or_else(Publication::default, |a| Publication { name: a.text, url: a.href }))
        .collect()
}

pub fn tags(root: &Node) -> Vec<Tag> {
    entries(root)
        .into_iter()
        .map(|a| a.map_or_else(Tag::default, |a| Tag { name: a.text, url: a.href }))
        .collect()
}

pub fn topics(root: &Node) -> Vec<Topic> {
    entries(root)
        .into_iter()
        .map(|a| a.map_or_else(Topic::default, |a| Topic { name: a.text, url: a.href }))
        .collect()
}

pub fn writers(root: &Node) -> Vec<User> {
    entries(root)
        .into_iter()
        .map(|a| {
            a.map_or_else(User::default, |a| User {
                username: parse_medium_username(&a.href),
                name: Some(a.text),
                url: a.href,
                ..Default::default()
            })
        })
        .collect()
}
