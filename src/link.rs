//! Public invitation link codec.
//!
//! A share link is `/invite/{templateSlug}/{slug}`, optionally suffixed
//! with a query string carrying the invitation text, date, and location.
//! The query channel lets the manual single-recipient flow hand out a
//! fully self-contained link without persisting anything remotely.

use crate::error::InviteError;
use url::form_urlencoded;

/// Invitation fields carried inline on a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOverrides {
    pub text: String,
    pub date: String,
    pub location: String,
}

/// What a decoded link knows about the event. `Unavailable` is an
/// explicit placeholder state: the link carried no overrides, which is
/// different from overrides that happen to be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetails {
    Provided(EventOverrides),
    Unavailable,
}

/// Display data resolved from a public invitation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInvite {
    pub template_slug: String,
    pub slug: String,
    pub first_name: String,
    pub last_name: String,
    pub details: EventDetails,
}

impl DisplayInvite {
    /// Guest name as shown on the invitation card.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Encode the public path for a recipient slug, percent-encoding any
/// override values into the query string.
pub fn encode(template_slug: &str, slug: &str, overrides: Option<&EventOverrides>) -> String {
    let mut path = format!("/invite/{}/{}", template_slug, slug);
    if let Some(overrides) = overrides {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("text", &overrides.text)
            .append_pair("date", &overrides.date)
            .append_pair("location", &overrides.location)
            .finish();
        path.push('?');
        path.push_str(&query);
    }
    path
}

/// Decode a public invitation path back to display data.
///
/// The display name comes from splitting the slug on its first hyphen:
/// the first token is the first name, the remaining tokens rejoined with
/// spaces are the last name, each capitalized.
pub fn decode(path: &str) -> Result<DisplayInvite, InviteError> {
    let (path_part, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    let rest = path_part
        .strip_prefix("/invite/")
        .ok_or_else(|| InviteError::ParseFailure(format!("not an invite path: {}", path_part)))?;
    let (template_slug, slug) = rest
        .split_once('/')
        .ok_or_else(|| InviteError::ParseFailure(format!("missing recipient slug: {}", path_part)))?;
    if template_slug.is_empty() || slug.is_empty() || slug.contains('/') {
        return Err(InviteError::ParseFailure(format!(
            "malformed invite path: {}",
            path_part
        )));
    }

    let (first_name, last_name) = name_from_slug(slug);
    let details = query.map_or(EventDetails::Unavailable, parse_overrides);

    Ok(DisplayInvite {
        template_slug: template_slug.to_string(),
        slug: slug.to_string(),
        first_name,
        last_name,
        details,
    })
}

fn parse_overrides(query: &str) -> EventDetails {
    let mut text = None;
    let mut date = None;
    let mut location = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "text" => text = Some(value.into_owned()),
            "date" => date = Some(value.into_owned()),
            "location" => location = Some(value.into_owned()),
            _ => {}
        }
    }
    // Encode always writes the three keys together; anything less is
    // treated as the placeholder state.
    match (text, date, location) {
        (Some(text), Some(date), Some(location)) => EventDetails::Provided(EventOverrides {
            text,
            date,
            location,
        }),
        _ => EventDetails::Unavailable,
    }
}

fn name_from_slug(slug: &str) -> (String, String) {
    match slug.split_once('-') {
        Some((first, rest)) => (capitalize(first), capitalize(&rest.replace('-', " "))),
        None => (capitalize(slug), String::new()),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
