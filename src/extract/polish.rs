use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Zettelkasten note links: a 14-digit timestamp id in double brackets.
static NOTE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[\d{14}\]\]").unwrap());

/// Inline math region: shortest span between two dollar signs on one line.
static MATH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$.+?\$").unwrap());

/// Embedded image reference with a known raster extension.
static MEDIA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\]]+\]\(([^)]+\.(?:png|PNG|jpg|JPG|jpeg|JPEG|bmp|BMP))\)").unwrap()
});

/// Line starting with `1` whose previous line is not blank.
static ORDERED_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\n])\n1").unwrap());

/// Dash line with a non-blank line directly above it.
static UNORDERED_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.+)\n-").unwrap());

/// Media paths are stored relative to the directory the packages land in,
/// one level below the notes.
pub const MEDIA_PREFIX: &str = "../";

/// A question or answer segment after polishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishedText {
    pub text: String,
    /// Referenced media paths, deduplicated, in order of first appearance.
    pub media: Vec<String>,
}

/// Rewrites one raw segment into renderer-ready markdown and collects the
/// media paths it references.
///
/// In order: note links are stripped, math regions are wrapped in `[latex]`
/// envelopes with markdown-hostile characters escaped, media references are
/// collected, and list starts get the blank line markdown requires. Segments
/// never contain blank lines, so "preceded by a blank line" reduces to
/// "preceded by a newline" here.
pub fn polish(raw: &str) -> PolishedText {
    let text = NOTE_ID_REGEX.replace_all(raw, "").into_owned();
    let text = MATH_REGEX
        .replace_all(&text, |caps: &Captures<'_>| {
            escape_math(caps.get(0).map_or("", |m| m.as_str()))
        })
        .into_owned();
    let media = collect_media(&text);
    let text = ORDERED_LIST_REGEX.replace_all(&text, "$1\n\n1").into_owned();
    let text = UNORDERED_LIST_REGEX
        .replace_all(&text, |caps: &Captures<'_>| {
            let prev = caps.get(1).map_or("", |m| m.as_str());
            if prev.starts_with("- ") {
                // Already inside a dash list, keep items adjacent.
                format!("{}\n-", prev)
            } else {
                format!("{}\n\n-", prev)
            }
        })
        .into_owned();
    PolishedText { text, media }
}

/// Wraps one math region (dollar signs included) in a `[latex]` envelope and
/// escapes the characters markdown would otherwise eat. Backslashes are
/// doubled in pairs so LaTeX line breaks survive while single-command
/// backslashes stay intact.
fn escape_math(region: &str) -> String {
    let escaped = region
        .replace("\\\\", "\\\\\\\\")
        .replace('*', "\\*")
        .replace("\\{", "\\\\\\{")
        .replace("\\}", "\\\\\\}")
        .replace("\\#", "\\\\\\#")
        .replace('_', "\\_");
    format!("[latex]{}[/latex]", escaped)
}

fn collect_media(text: &str) -> Vec<String> {
    let mut media = Vec::new();
    for caps in MEDIA_REGEX.captures_iter(text) {
        if let Some(path) = caps.get(1) {
            let path = format!("{}{}", MEDIA_PREFIX, path.as_str());
            if !media.contains(&path) {
                media.push(path);
            }
        }
    }
    media
}
