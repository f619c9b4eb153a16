use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::{
    date::split_components,
    metadata::{Metadata, MetadataFormat},
    slug::slugify,
};

pub const NO_DATE: &str = "No date";
pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, thiserror::Error)]
pub enum ReadFromPathError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path has no file name: {0}")]
    NoFileName(Utf8PathBuf),
}

/// One parsed post. Extra metadata is flattened next to the core fields when
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub file_name: String,
    pub file_path: Utf8PathBuf,
    pub date: String,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub slug: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl BlogPost {
    /// Assembles a post from a file's identity, its raw text and the metadata
    /// extracted from that text.
    #[must_use]
    pub fn from_source(file_path: &Utf8Path, content: String, metadata: Metadata) -> Self {
        let file_name = file_path.file_name().unwrap_or_default().to_owned();
        let Metadata {
            date,
            title,
            desc,
            extra,
        } = metadata;

        let slug = slugify(
            title
                .as_deref()
                .unwrap_or_else(|| file_path.file_stem().unwrap_or(&file_name)),
        );
        let date = date.unwrap_or_else(|| NO_DATE.to_owned());
        let (year, month, day) = match split_components(&date) {
            Some((year, month, day)) => (Some(year), Some(month), Some(day)),
            None => (None, None, None),
        };

        BlogPost {
            file_name,
            file_path: file_path.to_owned(),
            date,
            title: title.unwrap_or_else(|| UNTITLED.to_owned()),
            desc: desc.unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            content,
            year,
            month,
            day,
            slug,
            extra,
        }
    }

    pub fn read_from_path(path: &Utf8Path, format: MetadataFormat) -> Result<Self, ReadFromPathError> {
        if path.file_name().is_none() {
            return Err(ReadFromPathError::NoFileName(path.to_owned()));
        }
        let content = std::fs::read_to_string(path)?;
        let metadata = format.extract(&content);
        Ok(BlogPost::from_source(path, content, metadata))
    }

    /// The post's date as integers, when it has one.
    #[must_use]
    pub fn ymd(&self) -> Option<(i32, u32, u32)> {
        Some((
            self.year.as_deref()?.parse().ok()?,
            self.month.as_deref()?.parse().ok()?,
            self.day.as_deref()?.parse().ok()?,
        ))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use camino::Utf8Path;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{BlogPost, ReadFromPathError, NO_DATE, NO_DESCRIPTION, UNTITLED};
    use crate::metadata::{Metadata, MetadataFormat};

    #[test]
    fn defaults_for_missing_metadata() {
        let post = BlogPost::from_source(
            Utf8Path::new("/posts/My First Post.html"),
            "<p>hi</p>".to_owned(),
            Metadata::default(),
        );
        assert_eq!("My First Post.html", post.file_name);
        assert_eq!(NO_DATE, post.date);
        assert_eq!(UNTITLED, post.title);
        assert_eq!(NO_DESCRIPTION, post.desc);
        assert_eq!("my-first-post", post.slug);
        assert_eq!(None, post.year);
        assert_eq!(None, post.ymd());
    }

    #[test]
    fn date_components_and_title_slug() {
        let post = BlogPost::from_source(
            Utf8Path::new("/posts/a.html"),
            String::new(),
            Metadata {
                date: Some("2025-01-20".to_owned()),
                title: Some("Test Blog Post".to_owned()),
                ..Metadata::default()
            },
        );
        assert_eq!(Some("2025".to_owned()), post.year);
        assert_eq!(Some("01".to_owned()), post.month);
        assert_eq!(Some("20".to_owned()), post.day);
        assert_eq!(Some((2025, 1, 20)), post.ymd());
        assert_eq!("test-blog-post", post.slug);
    }

    #[test]
    fn serializes_extra_at_top_level() {
        let post = BlogPost::from_source(
            Utf8Path::new("/posts/a.html"),
            "raw".to_owned(),
            Metadata {
                date: Some("2025-01-20".to_owned()),
                title: Some("T".to_owned()),
                desc: Some("D".to_owned()),
                extra: BTreeMap::from([("author".to_owned(), "Jane".to_owned())]),
            },
        );
        assert_eq!(
            json!({
                "fileName": "a.html",
                "filePath": "/posts/a.html",
                "date": "2025-01-20",
                "title": "T",
                "desc": "D",
                "content": "raw",
                "year": "2025",
                "month": "01",
                "day": "20",
                "slug": "t",
                "author": "Jane",
            }),
            serde_json::to_value(&post).unwrap()
        );
    }

    #[test]
    fn read_from_missing_path() {
        let err = BlogPost::read_from_path(
            Utf8Path::new("/definitely/not/here.html"),
            MetadataFormat::HtmlComment,
        )
        .unwrap_err();
        assert!(matches!(err, ReadFromPathError::Io(_)));
    }
}
