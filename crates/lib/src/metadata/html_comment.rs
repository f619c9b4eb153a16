use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{is_reserved, title_element, Metadata};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*\[\s*([\w-]+)\s*:\s*([^\]]*?)\s*\]\s*-->").expect("marker regex is valid")
});

/// Reads `<!-- [key: value] -->` markers. The first `date` and `desc` win,
/// any other key lands in `extra` with the last occurrence winning.
#[must_use]
pub fn extract(text: &str) -> Metadata {
    let mut metadata = Metadata {
        title: title_element(text),
        ..Metadata::default()
    };

    for captures in MARKER.captures_iter(text) {
        let (_, [key, value]) = captures.extract();
        match key {
            "date" => {
                metadata.date.get_or_insert_with(|| value.to_owned());
            }
            "desc" => {
                metadata.desc.get_or_insert_with(|| value.to_owned());
            }
            key if is_reserved(key) => debug!("Ignoring reserved comment marker {key:?}"),
            key => {
                metadata.extra.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    metadata
}
