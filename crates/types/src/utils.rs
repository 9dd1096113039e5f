use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("<[^>]*>").unwrap());

/// Reduce rich text coming out of the CMS to plain text.
/// Line breaks and paragraph ends become newlines, remaining tags are dropped and
/// entities are decoded last so escaped markup survives as text.
pub fn plain_text(input: &str) -> String {
    let broken = BREAK_RE.replace_all(input, "\n");
    let stripped = TAG_RE.replace_all(&broken, "");

    match html_entities::decode_html_entities(&stripped) {
        Ok(decoded) => decoded.trim_end().to_string(),
        Err(_) => {
            debug!("Could not decode entities, keeping them as-is");
            stripped.trim_end().to_string()
        }
    }
}
