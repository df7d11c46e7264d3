use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque comment identifier assigned by the comments service.
///
/// The service may send ids as JSON strings (UUIDs) or integers (seed data);
/// both are normalised to their string form so the client never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CommentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CommentId(s),
            RawId::Int(n) => CommentId(n.to_string()),
        })
    }
}

/// A single comment as returned by the service.
///
/// Only `text` is ever changed by this client (through an update request);
/// every other field is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: i64,
}

impl Comment {
    /// Single-character avatar: the author's first letter uppercased, or `?`.
    pub fn avatar_initial(&self) -> String {
        self.author
            .as_deref()
            .and_then(|a| a.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_owned())
    }

    pub fn author_or_unknown(&self) -> &str {
        match self.author.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => "unknown",
        }
    }

    /// Creation date in local time when it parses as RFC 3339, otherwise the raw value.
    ///
    /// Returns an empty string when the service sent no date.
    pub fn display_date(&self) -> String {
        match self.date.as_deref() {
            None => String::new(),
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
                Err(_) => raw.to_owned(),
            },
        }
    }

    /// Attachment URL, treating an empty string as no attachment.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Request body for both `POST /comments` and `PUT /comments/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentText<'a> {
    pub text: &'a str,
}

/// Ordering requested from the service when listing comments.
///
/// `Server` lists via plain `GET /comments`; the others use the service's
/// `GET /comments/{order}` route. The client never re-sorts a snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Server,
    DateUp,
    DateDown,
    IdUp,
    IdDown,
}

impl SortOrder {
    /// Path segment appended to `/comments`, if any.
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            SortOrder::Server => None,
            SortOrder::DateUp => Some("date-up"),
            SortOrder::DateDown => Some("date-down"),
            SortOrder::IdUp => Some("id-up"),
            SortOrder::IdDown => Some("id-down"),
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOrder::Server => SortOrder::DateDown,
            SortOrder::DateDown => SortOrder::DateUp,
            SortOrder::DateUp => SortOrder::IdUp,
            SortOrder::IdUp => SortOrder::IdDown,
            SortOrder::IdDown => SortOrder::Server,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Server => "server order",
            SortOrder::DateUp => "date ↑",
            SortOrder::DateDown => "date ↓",
            SortOrder::IdUp => "id ↑",
            SortOrder::IdDown => "id ↓",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_record_with_missing_optionals() {
        let c: Comment = serde_json::from_str(r#"{"id": 7, "text": "hi"}"#).unwrap();
        assert_eq!(c.id.as_str(), "7");
        assert_eq!(c.author, None);
        assert_eq!(c.likes, 0);
        assert_eq!(c.avatar_initial(), "?");
        assert_eq!(c.author_or_unknown(), "unknown");
        assert_eq!(c.display_date(), "");
        assert_eq!(c.image_url(), None);
    }

    #[test]
    fn decodes_full_record() {
        let c: Comment = serde_json::from_str(
            r#"{"id":"a1","author":"admin","text":"t","date":"not a date",
                "likes":3,"image":"https://example.com/x.png"}"#,
        )
        .unwrap();
        assert_eq!(c.id, CommentId::new("a1"));
        assert_eq!(c.avatar_initial(), "A");
        assert_eq!(c.display_date(), "not a date");
        assert_eq!(c.image_url(), Some("https://example.com/x.png"));
        assert_eq!(c.likes, 3);
    }

    #[test]
    fn empty_image_is_no_attachment() {
        let c: Comment =
            serde_json::from_str(r#"{"id":"a","text":"t","image":""}"#).unwrap();
        assert_eq!(c.image_url(), None);
    }

    #[test]
    fn rfc3339_dates_are_reformatted() {
        let c: Comment =
            serde_json::from_str(r#"{"id":"a","text":"t","date":"2024-03-01T10:00:00Z"}"#)
                .unwrap();
        let shown = c.display_date();
        assert_ne!(shown, "2024-03-01T10:00:00Z");
        assert_eq!(shown.len(), "2024-03-01 10:00:00".len());
    }

    #[test]
    fn sort_order_cycles_through_every_variant() {
        let mut order = SortOrder::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(order);
            order = order.next();
        }
        assert_eq!(order, SortOrder::Server);
        assert_eq!(seen.len(), 5);
        assert!(seen.contains(&SortOrder::IdDown));
    }

    #[test]
    fn sort_order_parses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrap {
            sort: SortOrder,
        }
        let w: Wrap = serde_json::from_str(r#"{"sort":"date-down"}"#).unwrap();
        assert_eq!(w.sort, SortOrder::DateDown);
        assert_eq!(w.sort.path_segment(), Some("date-down"));
    }
}
