use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{html_comment, is_reserved, title_element, Metadata};

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
        .expect("front matter regex is valid")
});

/// Splits a leading `---` block off `text`, returning its inner lines.
fn block(text: &str) -> Option<&str> {
    let captures = BLOCK.captures(text)?;
    Some(captures.get(1).map_or("", |inner| inner.as_str()))
}

/// Reads a leading `---` front matter block of `key: value` lines. Without
/// such a block the whole document is read as HTML comment markers instead.
#[must_use]
pub fn extract(text: &str) -> Metadata {
    let Some(block) = block(text) else {
        return html_comment::extract(text);
    };

    let mut metadata = Metadata::default();

    for line in block.lines() {
        let Some(colon) = line.find(':') else {
            continue;
        };
        if colon == 0 {
            continue;
        }
        let key = line[..colon].trim();
        let value = line[colon + 1..].trim().to_owned();
        match key {
            "" => continue,
            "date" => metadata.date = Some(value),
            "title" => metadata.title = Some(value),
            "description" | "desc" => metadata.desc = Some(value),
            key if is_reserved(key) => debug!("Ignoring reserved front matter key {key:?}"),
            key => {
                metadata.extra.insert(key.to_owned(), value);
            }
        }
    }

    if metadata.title.is_none() {
        metadata.title = title_element(text);
    }

    metadata
}
