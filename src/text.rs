use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::dom::Node;

static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Replace every run of Unicode whitespace with a single ASCII space.
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    SPACE_RE.replace_all(s, " ")
}

/// Text content as a reader sees it: descendant text concatenated, whitespace
/// runs collapsed, and the ends of the whole string trimmed.
///
/// ```text
/// <p>
///   This is a message from the
///     <strong>log</strong>
/// </p>                          ->  "This is a message from the log"
/// ```
pub fn rendered_text(node: &Node) -> String {
    let mut raw = String::new();
    match node {
        Node::Text(data) => raw.push_str(data),
        _ => node.walk(&mut |n| {
            if let Node::Text(data) = n {
                raw.push_str(data);
            }
        }),
    }
    collapse_whitespace(&raw).trim_matches(' ').to_string()
}

/// Like [`rendered_text`] but whitespace is kept verbatim and `<br>` becomes
/// a newline.
pub fn preformatted_text(node: &Node) -> String {
    let mut out = String::new();
    node.walk(&mut |n| match n {
        Node::Text(data) => out.push_str(data),
        n if n.is_element("br") => out.push('\n'),
        _ => {}
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn body(html: &str) -> Node {
        let root = parse(html.as_bytes()).unwrap();
        let mut found = None;
        root.walk(&mut |n| {
            if found.is_none() && n.is_element("body") {
                found = Some(n.clone());
            }
        });
        found.unwrap()
    }

    #[test]
    fn collapses_runs() {
        assert_eq!(collapse_whitespace("a \t\n b\u{a0}\u{2003}c"), "a b c");
    }

    #[test]
    fn keeps_space_between_elements() {
        assert_eq!(rendered_text(&body("<p>word <em>two</em></p>")), "word two");
    }

    #[test]
    fn trims_only_the_whole_string() {
        let html = "<p>\n\t\t\tThe <em>owls</em>\n\t\t\tare not what\n\t\t\t<strong>\n\t\t\t\t<em>they seem</em>\n\t\t\t</strong>\n\t\t</p>\n";
        assert_eq!(rendered_text(&body(html)), "The owls are not what they seem");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(rendered_text(&body("<p> \n </p>")), "");
    }

    #[test]
    fn text_node_on_its_own() {
        assert_eq!(rendered_text(&Node::Text("  Created at:\n 2020 ".into())), "Created at: 2020");
    }

    #[test]
    fn preformatted_keeps_layout() {
        let html = "<pre>fn main() {<br>    println!(\"hi\");<br>}</pre>";
        assert_eq!(
            preformatted_text(&body(html)),
            "fn main() {\n    println!(\"hi\");\n}"
        );
    }
}
