use crate::dom::Node;
use crate::schema::Ip;

use super::labels::{labelled_values, parse_ip};

const IP: &str = "IP:";
const CREATED_AT: &str = "Created at:";

/// IP history entries. An entry without a valid address is dropped whole.
pub fn extract(root: &Node) -> Vec<Ip> {
    let mut ips = Vec::new();
    root.walk(&mut |n| {
        if !n.is_element("li") {
            return;
        }

        let mut address = None;
        let mut created_at = String::new();
        for (label, value) in labelled_values(n, &[IP, CREATED_AT]) {
            match label {
                IP => address = parse_ip(&value),
                CREATED_AT => created_at = value,
                _ => {}
            }
        }

        if let Some(address) = address {
            ips.push(Ip { address, created_at });
        }
    });
    ips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn ip_history() {
        let html = "<ul>
            <li>IP: 127.0.0.1<br>Created at: 2022-03-16 4:39 am</li>
            <li>IP: 2001:db8:0:0:0:0:0:68<br>Created at: 2022-04-16 4:39 am</li>
        </ul>";
        assert_eq!(
            extract(&parse(html.as_bytes()).unwrap()),
            vec![
                Ip { address: "127.0.0.1".into(), created_at: "2022-03-16 4:39 am".into() },
                Ip { address: "2001:db8::68".into(), created_at: "2022-04-16 4:39 am".into() },
            ]
        );
    }

    #[test]
    fn invalid_address_discards_record() {
        let html = "<ul><li>IP: not-an-ip<br>Created at: 2022-03-16</li></ul>";
        assert!(extract(&parse(html.as_bytes()).unwrap()).is_empty());
    }

    #[test]
    fn missing_address_discards_record() {
        let html = "<ul><li>Created at: 2022-03-16</li></ul>";
        assert!(extract(&parse(html.as_bytes()).unwrap()).is_empty());
    }
}
