//! Narration script cleanup
//!
//! Video transcripts arrive as markdown with production cues for the editor
//! ([PAUSE], [VISUAL: ...], [CAPTION: ...], [SOURCE: ...]). None of that
//! should be read aloud, so it is stripped before synthesis.

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading markers at the start of a line
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*").expect("Failed to compile heading regex"));

/// List bullets (`*` or `-`) at the start of a line
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[*\-][ \t]*").expect("Failed to compile bullet regex"));

/// Bold or italic emphasis around a span
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{1,2}([^*]+)\*{1,2}").expect("Failed to compile emphasis regex"));

/// Editor cues that carry no narration
static CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[PAUSE\]|\[OPINION:\]|\[(?:VISUAL|CAPTION|SOURCE):.*?\]")
        .expect("Failed to compile cue regex")
});

/// Runs of blank lines
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n+").expect("Failed to compile blank line regex"));

/// Turn a markdown transcript into plain text suitable for speech
pub fn narration_text(markdown: &str) -> String {
    let text = HEADING.replace_all(markdown, "");
    let text = BULLET.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = CUES.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
