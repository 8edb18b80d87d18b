use crate::dom::Node;
use crate::schema::Session;

use super::labels::labelled_values;

const CREATED_AT: &str = "Created at:";
const LAST_SEEN_AT: &str = "Last seen at:";
const LAST_SEEN_LOCATION: &str = "Last seen location:";
const USER_AGENT: &str = "User agent:";

/// One session per outermost `<li>`:
///
/// ```html
/// <li>Created at: …<br>Last seen at: …<br>Last seen location: …<br>User agent: …</li>
/// ```
pub fn extract(root: &Node) -> Vec<Session> {
    root.outermost(&|n| n.is_element("li"))
        .into_iter()
        .map(|li| {
            let mut s = Session::default();
            let labels = [CREATED_AT, LAST_SEEN_AT, LAST_SEEN_LOCATION, USER_AGENT];
            for (label, value) in labelled_values(li, &labels) {
                let field = match label {
                    CREATED_AT => &mut s.created_at,
                    LAST_SEEN_AT => &mut s.last_seen_at,
                    LAST_SEEN_LOCATION => &mut s.last_seen_location,
                    _ => &mut s.user_agent,
                };
                *field = Some(value);
            }
            s
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn session_fields() {
        let html = "<ul>
          <li>
            Created at: 2022-03-16 4:39 am
            <br>
            Last seen at: 2022-03-20 9:00 pm
            <br>
            Last seen location: Portland, OR, US
            <br>
            User agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)
          </li>
          <li>Created at: 2021-01-01</li>
        </ul>";
        let sessions = extract(&parse(html.as_bytes()).unwrap());
        assert_eq!(sessions.len(), 2);
        assert_eq!(
            sessions[0],
            Session {
                created_at: Some("2022-03-16 4:39 am".into()),
                last_seen_at: Some("2022-03-20 9:00 pm".into()),
                last_seen_location: Some("Portland, OR, US".into()),
                user_agent: Some("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)".into()),
            }
        );
        assert_eq!(sessions[1].created_at.as_deref(), Some("2021-01-01"));
        assert_eq!(sessions[1].user_agent, None);
    }
}
