//! Attribution extraction
//!
//! Downloaded models carry creator credit in their embedded metadata
//! (the Sketchfab convention of `title`, `author`, `source` in the
//! asset extras). This module turns that metadata into a structured
//! [`Attribution`] and upgrades the legacy `"Title by Author"` string
//! format still found in older scenes.

use crate::model::AssetMetadata;
use serde::{Deserialize, Serialize};

/// Creator credit attached to a node
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Title of the work
    pub name: String,
    /// Creator, without any trailing profile link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Where the work came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Attribution {
    /// Parse the legacy single-string `"Title by Author"` format
    ///
    /// Lenient by contract: a string without the separator becomes a
    /// title-only credit. Segments past the second separator are
    /// discarded; old scenes never stored more than two.
    pub fn from_legacy(text: &str) -> Attribution {
        let mut segments = text.split(" by ");
        let name = segments.next().unwrap_or(text).to_string();
        let author = segments.next().map(String::from);
        Attribution {
            name,
            author,
            url: None,
        }
    }
}

/// Extract attribution from a model's embedded metadata
///
/// Both a title and an author must be present, otherwise the metadata
/// is considered anonymous and `None` is returned. The url prefers the
/// metadata's own `source` and falls back to `fallback_url` (the
/// reference the model was loaded from).
pub fn extract(metadata: Option<&AssetMetadata>, fallback_url: &str) -> Option<Attribution> {
    let metadata = metadata?;
    let name = metadata.title.as_deref()?;
    let author = metadata.author.as_deref()?;
    let url = metadata
        .source
        .clone()
        .unwrap_or_else(|| fallback_url.to_string());
    Some(Attribution {
        name: name.to_string(),
        author: Some(strip_profile_link(author).to_string()),
        url: Some(url),
    })
}

/// Drop a trailing ` (http...)` parenthetical from an author string
///
/// Sketchfab embeds the author's profile link alongside the display
/// name; the credit line only wants the name.
fn strip_profile_link(author: &str) -> &str {
    if author.ends_with(')') {
        if let Some(start) = author.find(" (http") {
            return author[..start].trim_end();
        }
    }
    author
}
