//! Records spelled out as `Label: value` text lines separated by `<br>`.
//!
//! ```html
//! <li>Created at: 2022-03-16 4:39 am<br>Last seen at: 2022-03-17<br>...</li>
//! ```

use std::net::IpAddr;

use crate::dom::Node;
use crate::text::collapse_whitespace;

/// `(label, value)` for each direct text child of `item` that starts with one
/// of `labels`. Matching is exact and case sensitive; the first label in
/// `labels` that matches wins. Unmatched lines are ignored.
pub fn labelled_values<'l>(item: &Node, labels: &[&'l str]) -> Vec<(&'l str, String)> {
    item.children()
        .iter()
        .filter_map(|c| match c {
            Node::Text(data) => Some(data.trim_start()),
            _ => None,
        })
        .filter_map(|line| {
            labels.iter().find_map(|label| {
                line.strip_prefix(label)
                    .map(|rest| (*label, collapse_whitespace(rest).trim().to_string()))
            })
        })
        .collect()
}

/// Canonical form of an IPv4/IPv6 address, or `None` if it does not parse.
pub fn parse_ip(value: &str) -> Option<String> {
    value.trim().parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

/// `$4.99` style amounts. Anything unparsable counts as zero.
pub fn parse_amount(value: &str) -> f64 {
    let value = value.trim();
    value
        .strip_prefix('$')
        .unwrap_or(value)
        .replace(',', "")
        .trim()
        .parse()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn li(html: &str) -> Node {
        let root = parse(html.as_bytes()).unwrap();
        root.outermost(&|n| n.is_element("li"))[0].clone()
    }

    #[test]
    fn values_by_label() {
        let item = li("<ul><li>Created at: 2022-03-16 4:39 am<br>\n  Last seen at:  yesterday <br>Unknown: x<br></li></ul>");
        let values = labelled_values(&item, &["Created at:", "Last seen at:"]);
        assert_eq!(
            values,
            vec![
                ("Created at:", "2022-03-16 4:39 am".to_string()),
                ("Last seen at:", "yesterday".to_string()),
            ]
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        let item = li("<ul><li>created at: 2022</li></ul>");
        assert!(labelled_values(&item, &["Created at:"]).is_empty());
    }

    #[test]
    fn ip_syntax() {
        assert_eq!(parse_ip(" 127.0.0.1 ").as_deref(), Some("127.0.0.1"));
        assert_eq!(parse_ip("2001:0db8:0:0:0:0:0:68").as_deref(), Some("2001:db8::68"));
        assert_eq!(parse_ip("not-an-ip"), None);
        assert_eq!(parse_ip("300.1.1.1"), None);
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("$5.00"), 5.0);
        assert_eq!(parse_amount("$1,050.50"), 1050.5);
        assert_eq!(parse_amount("50"), 50.0);
        assert_eq!(parse_amount("free"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }
}
