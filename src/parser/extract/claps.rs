use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::dom::Node;
use crate::schema::{Clap, Post};
use crate::text::rendered_text;

use super::anchors::{has_exact_class, Anchor};

// `&mdash;` is decoded to `—` by the tokenizer.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.*\+([0-9]+) —").unwrap());

/// One clap per `<li>`:
///
/// ```html
/// <li>+25 &mdash; <a class="h-cite u-like-of" href="…">Title</a>
///     <time class="dt-published">2013-04-28 6:55 am</time></li>
/// ```
pub fn extract(root: &Node) -> Vec<Clap> {
    let mut claps = Vec::new();
    root.walk(&mut |n| {
        if n.is_element("li") {
            claps.push(extract_one(n));
        }
    });
    claps
}

fn extract_one(li: &Node) -> Clap {
    let mut amount = 0;
    let mut post = Post::default();

    for c in li.children() {
        match c {
            Node::Text(data) => {
                if let Some(caps) = AMOUNT_RE.captures(data) {
                    match caps[1].parse::<u64>() {
                        Ok(n) => amount = n,
                        Err(e) => warn!("unreadable clap count {}: {}", &caps[1], e),
                    }
                }
            }
            c if c.is_element("a") && has_exact_class(c, "h-cite u-like-of") => {
                post = Post {
                    published_at: post.published_at.take(),
                    ..Anchor::from_node(c).to_post()
                };
            }
            c if c.is_element("time") && has_exact_class(c, "dt-published") => {
                post.published_at = Some(rendered_text(c));
            }
            _ => {}
        }
    }

    Clap { post, amount }
}
