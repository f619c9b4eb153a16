//! Metadata extraction from raw post text.
//!
//! Two conventions are understood: `<!-- [key: value] -->` comments anywhere
//! in the document, and a `---` delimited front matter block at its very
//! start. Both fall back to the document's `<title>` element for the title.

pub mod front_matter;
pub mod html_comment;

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

/// Record field names that extracted extra keys must never shadow.
pub(crate) const RESERVED_KEYS: &[&str] = &[
    "fileName",
    "filePath",
    "date",
    "title",
    "desc",
    "description",
    "content",
    "year",
    "month",
    "day",
    "slug",
];

pub(crate) fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

static TITLE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("title regex is valid")
});

/// The first non-empty `<title>` element's text.
pub(crate) fn title_element(text: &str) -> Option<String> {
    let title = TITLE_ELEMENT.captures(text)?.get(1)?.as_str().trim();
    (!title.is_empty()).then(|| title.to_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub date: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MetadataFormat {
    #[default]
    HtmlComment,
    FrontMatter,
}

impl MetadataFormat {
    #[must_use]
    pub fn extract(self, text: &str) -> Metadata {
        match self {
            MetadataFormat::HtmlComment => html_comment::extract(text),
            MetadataFormat::FrontMatter => front_matter::extract(text),
        }
    }
}

impl From<&str> for MetadataFormat {
    fn from(name: &str) -> Self {
        match name {
            "html-comment" => MetadataFormat::HtmlComment,
            "front-matter" | "frontmatter" => MetadataFormat::FrontMatter,
            unknown => {
                warn!("Unknown metadata format {unknown:?}, using html-comment");
                MetadataFormat::HtmlComment
            }
        }
    }
}

impl From<String> for MetadataFormat {
    fn from(name: String) -> Self {
        name.as_str().into()
    }
}
