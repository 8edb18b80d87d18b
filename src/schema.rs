//! Output model written to JSON by the formatter.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkupType {
    #[serde(rename = "em")]
    Emphasis,
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "br")]
    LineBreak,
    #[serde(rename = "a")]
    Link,
    #[serde(rename = "highlight")]
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrafType {
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
    #[serde(rename = "h4")]
    H4,
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "bq")]
    Blockquote,
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "embed")]
    Embed,
    #[serde(rename = "pre")]
    Preformatted,
}

/// Inline annotation over `Graf::text`. Offsets are byte offsets, half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markup {
    #[serde(rename = "type")]
    pub kind: MarkupType,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Markup {
    pub fn new(kind: MarkupType, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            href: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// One rendered content block ("graf").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graf {
    #[serde(rename = "type")]
    pub kind: GrafType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub markups: Vec<Markup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerSection {
    pub classes: Vec<String>,
    pub body: Vec<Graf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub body: Vec<InnerSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub username: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clap {
    pub post: Post,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub created_at: String,
    #[serde(rename = "grafs")]
    pub body: Vec<Graf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ip {
    pub address: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct List {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    pub amount: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCharge {
    pub created_at: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub past_emails: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub membership_charges: Vec<MembershipCharge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub memberships: Vec<Membership>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub social_accounts: BTreeMap<String, SocialAccount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub editor: Vec<Publication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub writer: Vec<Publication>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interests {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    pub publications: Vec<Publication>,
    pub tags: Vec<Tag>,
    pub topics: Vec<Topic>,
    pub writers: Vec<User>,
}

/// Category output: a description plus the merged records of every fragment
/// file in the category, serialized under `key`.
#[derive(Debug, Clone, Serialize)]
pub struct Collection<T: Serialize> {
    pub meta: &'static str,
    #[serde(flatten)]
    pub items: BTreeMap<&'static str, Vec<T>>,
}

impl<T: Serialize> Collection<T> {
    pub fn new(meta: &'static str, key: &'static str, items: Vec<T>) -> Self {
        Self {
            meta,
            items: BTreeMap::from([(key, items)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graf_omits_absent_fields_but_keeps_markups() {
        let graf = Graf {
            kind: GrafType::Image,
            name: "a1b2".into(),
            text: None,
            image: None,
            markups: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&graf).unwrap(),
            json!({ "type": "img", "name": "a1b2", "markups": [] })
        );
    }

    #[test]
    fn markup_tags() {
        let mut link = Markup::new(MarkupType::Link, 0, 3);
        link.href = Some("https://x".into());
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({ "type": "a", "start": 0, "end": 3, "href": "https://x" })
        );
        assert_eq!(
            serde_json::to_value(Markup::new(MarkupType::Highlight, 1, 2)).unwrap(),
            json!({ "type": "highlight", "start": 1, "end": 2 })
        );
    }

    #[test]
    fn collection_flattens_under_key() {
        let c = Collection::new("Users you follow", "users", vec![User::default()]);
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({ "meta": "Users you follow", "users": [{ "username": "", "url": "" }] })
        );
    }

    #[test]
    fn post_uses_camel_case() {
        let post = Post {
            id: "x".into(),
            published_at: Some("2020".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&post).unwrap();
        assert_eq!(v["publishedAt"], "2020");
        assert!(v.get("content").is_none());
    }
}
