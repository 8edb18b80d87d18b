//! Follow lists: every anchor in the fragment is one followed entity.

use crate::dom::Node;
use crate::schema::{Publication, Topic, User};

use super::anchors::all_anchors;

pub fn publications(root: &Node) -> Vec<Publication> {
    all_anchors(root)
        .into_iter()
        .map(|a| Publication {
            name: a.text,
            url: a.href,
        })
        .collect()
}

pub fn topics(root: &Node) -> Vec<Topic> {
    all_anchors(root)
        .into_iter()
        .map(|a| Topic {
            name: a.text,
            url: a.href,
        })
        .collect()
}

/// Used for both followed users and suggested (Twitter) friends.
pub fn users(root: &Node) -> Vec<User> {
    all_anchors(root)
        .into_iter()
        .map(|a| User {
            username: a.handle(),
            url: a.href,
            ..Default::default()
        })
        .collect()
}
