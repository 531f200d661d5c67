//! Serde types mirroring the catalog's JSON payloads. The catalog is loose
//! about which fields it sends and how it shapes them, so every field is
//! optional and a field of the wrong shape decodes to its empty value. These
//! stay plain data holders; formatting for display lives in the `ui` layer.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decode a field, falling back to its default when the value has an
/// unexpected shape or is `null`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list item by item, skipping entries of the wrong shape. Anything
/// that is not an array yields an empty list.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Author reference embedded in a subject listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AuthorRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
}

/// One work as returned by the subjects endpoint. Only lives as long as the
/// result list of the current query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct BookSummary {
    /// Catalog key, e.g. `/works/OL27448W`.
    #[serde(default, deserialize_with = "lenient")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub authors: Option<Vec<AuthorRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<i32>,
}

impl BookSummary {
    /// Non-blank author names in catalog order.
    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .iter()
            .flatten()
            .map(|author| author.name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Body of the subjects endpoint. Only `works` matters to us.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectPage {
    #[serde(default, deserialize_with = "lenient_items")]
    pub works: Vec<BookSummary>,
}

/// Work descriptions come either as a bare string or as a typed text object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed { value: String },
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Typed { value } => value,
        }
    }
}

/// Language entries are usually `{ "key": "/languages/eng" }`, sometimes a
/// bare code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LanguageRef {
    Keyed { key: String },
    Code(String),
}

impl LanguageRef {
    /// Last path segment of the reference, lowercased (`/languages/ENG` -> `eng`).
    pub fn code(&self) -> String {
        let raw = match self {
            LanguageRef::Keyed { key } => key.as_str(),
            LanguageRef::Code(code) => code.as_str(),
        };
        raw.rsplit('/').next().unwrap_or(raw).trim().to_lowercase()
    }
}

/// Ebook availability entry. The format names are the keys of `formats`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Ebook {
    #[serde(default, deserialize_with = "lenient")]
    pub formats: Option<Map<String, Value>>,
}

impl Ebook {
    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().flat_map(|formats| formats.keys().map(String::as_str))
    }
}

/// Full work record fetched when the detail view opens. Discarded as soon as
/// the view closes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BookDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub covers: Vec<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub languages: Option<Vec<LanguageRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<LanguageRef>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub ebooks: Vec<Ebook>,
    /// The untouched payload, kept for dotted-path lookups such as
    /// `publishers.0.name`.
    #[serde(skip)]
    raw: Value,
}

impl BookDetail {
    /// Decode a work record while keeping the raw JSON around.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let mut detail: BookDetail = serde_json::from_value(value.clone())?;
        detail.raw = value;
        Ok(detail)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Language references, preferring the list form over the single one.
    pub fn language_refs(&self) -> Vec<&LanguageRef> {
        match (&self.languages, &self.language) {
            (Some(list), _) => list.iter().collect(),
            (None, Some(single)) => vec![single],
            (None, None) => Vec::new(),
        }
    }
}
