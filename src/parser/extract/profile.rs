//! The `profile/` category is spread over several files that each fill in
//! part of one [`Profile`].

use crate::dom::Node;
use crate::schema::{Image, Membership, MembershipCharge, Profile, Publication, SocialAccount};
use crate::text::rendered_text;

use super::anchors::Anchor;
use super::labels::{labelled_values, parse_amount};

/// `about.html`: the text of the `section.h-card`, if there is one.
pub fn bio(root: &Node) -> Option<String> {
    let mut bio = None;
    root.walk(&mut |n| {
        if n.is_element("section") && n.has_class("h-card") {
            bio = Some(rendered_text(n));
        }
    });
    bio
}

/// `profile.html`: name, picture, account info and connected accounts.
pub fn user_profile(root: &Node, profile: &mut Profile) {
    root.walk(&mut |n| {
        if !n.is_element("section") || !n.has_class("h-card") {
            return;
        }

        for (i, c) in n.children().iter().enumerate() {
            if c.is_element("h3") && c.has_class("p-name") {
                profile.user.name = Some(rendered_text(c));
            } else if c.is_element("img") && c.has_class("u-photo") {
                profile.user.profile_pic = Some(Image {
                    source: c.attr("src").map(str::to_string),
                    ..Default::default()
                });
            } else if c.is_element("h4") {
                let Some(ul) = n.next_sibling_element(i, "ul") else {
                    continue;
                };
                match rendered_text(c).as_str() {
                    "Account info" => account_info(ul, profile),
                    "Connected accounts" => connected_accounts(ul, profile),
                    _ => {}
                }
            }
        }
    });
}

/// `<li><b>Label:</b> value</li>` entries: the bold label and the rest of the
/// item's text.
fn bold_labelled(ul: &Node) -> impl Iterator<Item = (String, String, &Node)> + '_ {
    ul.children_named("li").filter_map(|li| {
        let label = rendered_text(li.first_child_element("b")?);
        let text = rendered_text(li);
        let value = text.strip_prefix(label.as_str()).unwrap_or(&text).trim().to_string();
        Some((label, value, li))
    })
}

/// First anchor below `li` accepted by `filter`.
fn first_anchor(li: &Node, filter: impl Fn(&Node) -> bool) -> Option<Anchor> {
    let mut found = None;
    li.walk(&mut |n| {
        if found.is_none() && n.is_element("a") && filter(n) {
            found = Some(Anchor::from_node(n));
        }
    });
    found
}

fn account_info(ul: &Node, profile: &mut Profile) {
    for (label, value, li) in bold_labelled(ul) {
        match label.as_str() {
            "Profile:" => {
                if let Some(a) = first_anchor(li, |a| a.has_class("u-url")) {
                    profile.user.username = a.handle();
                    profile.user.url = a.href;
                }
            }
            "Display name:" => profile.user.name = Some(value),
            "Email address:" => profile.email = Some(value),
            "Previous email address:" => profile.past_emails.push(value),
            "Medium user ID:" => profile.user.id = Some(value),
            "Created at:" => profile.user.created_at = Some(value),
            _ => {}
        }
    }
}

fn connected_accounts(ul: &Node, profile: &mut Profile) {
    let mut twitter = SocialAccount::default();
    let mut google = SocialAccount::default();

    for (label, value, li) in bold_labelled(ul) {
        match label.as_str() {
            "Twitter:" => {
                if let Some(a) = first_anchor(li, |_| true) {
                    twitter.url = Some(a.href);
                    twitter.name = Some(a.text);
                }
            }
            "Twitter account ID:" => twitter.id = Some(value),
            "Google email:" => google.email = Some(value),
            "Google display name:" => google.name = Some(value),
            "Google account ID:" => google.id = Some(value),
            _ => {}
        }
    }

    for (key, account) in [("twitter", twitter), ("google", google)] {
        if account != SocialAccount::default() {
            profile.social_accounts.insert(key.to_string(), account);
        }
    }
}

/// `publications.html`: the `ul` following the `Editor` and `Writer` headings.
pub fn publications(root: &Node, profile: &mut Profile) {
    root.walk(&mut |n| {
        if !n.is_element("section") {
            return;
        }
        for (i, c) in n.children().iter().enumerate() {
            if !c.is_element("h4") {
                continue;
            }
            let target = match rendered_text(c).as_str() {
                "Editor" => &mut profile.editor,
                "Writer" => &mut profile.writer,
                _ => continue,
            };
            if let Some(ul) = n.next_sibling_element(i, "ul") {
                *target = publication_list(ul);
            }
        }
    });
}

fn publication_list(ul: &Node) -> Vec<Publication> {
    ul.children_named("li")
        .filter_map(|li| li.first_child_element("a"))
        .map(|a| {
            let a = Anchor::from_node(a);
            Publication {
                name: a.text,
                url: a.href,
            }
        })
        .collect()
}

const MEMBERSHIP_ID: &str = "Membership ID:";
const STARTED_AT: &str = "Started at:";
const ENDED_AT: &str = "Ended at:";
const AMOUNT: &str = "Amount:";
const TYPE: &str = "Type:";
const CREATED_AT: &str = "Created at:";

/// `memberships.html`: one record per list item.
pub fn memberships(root: &Node) -> Vec<Membership> {
    let mut memberships = Vec::new();
    root.walk(&mut |n| {
        if !n.is_element("ul") {
            return;
        }
        for li in n.children_named("li") {
            let mut m = Membership::default();
            for (label, value) in
                labelled_values(li, &[MEMBERSHIP_ID, STARTED_AT, ENDED_AT, AMOUNT, TYPE])
            {
                match label {
                    MEMBERSHIP_ID => m.id = value,
                    STARTED_AT => m.started_at = Some(value),
                    ENDED_AT => m.ended_at = Some(value),
                    AMOUNT => m.amount = parse_amount(&value),
                    TYPE => m.kind = Some(value),
                    _ => {}
                }
            }
            memberships.push(m);
        }
    });
    memberships
}

/// `charges-*.html`: one charge per list item.
pub fn charges(root: &Node) -> Vec<MembershipCharge> {
    let mut charges = Vec::new();
    root.walk(&mut |n| {
        if !n.is_element("ul") {
            return;
        }
        for li in n.children_named("li") {
            let mut c = MembershipCharge::default();
            for (label, value) in labelled_values(li, &[CREATED_AT, AMOUNT]) {
                match label {
                    CREATED_AT => c.created_at = value,
                    AMOUNT => c.amount = parse_amount(&value),
                    _ => {}
                }
            }
            charges.push(c);
        }
    });
    charges
}
