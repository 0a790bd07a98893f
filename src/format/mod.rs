//! Markdown-subset rendering for bot replies.
//!
//! Only a fixed handful of constructs is recognised: `#`..`####` headings,
//! `**strong**`, `*emphasis*`, bullet lines and blank-line paragraphs. The
//! input is HTML-escaped before any substitution, so the only markup in the
//! output is the markup inserted here.

pub mod decoder;

use once_cell::sync::Lazy;
use regex::{ Captures, Regex };

const HEADING_STYLES: [&str; 4] = [
    "font-size: 1.5em; font-weight: 700; margin: 0.6em 0 0.3em 0;",
    "font-size: 1.3em; font-weight: 700; margin: 0.5em 0 0.25em 0;",
    "font-size: 1.15em; font-weight: 600; margin: 0.4em 0 0.2em 0;",
    "font-size: 1em; font-weight: 600; margin: 0.3em 0 0.15em 0;",
];

const PARAGRAPH_STYLE: &str = "margin: 0 0 0.75em 0;";

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(#{1,4})[ \t]+(\S.*?)[ \t]*$").unwrap()
});

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

// Boundary checks against neighbouring asterisks happen in `apply_emphasis`;
// the regex crate has no lookaround.
static EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").unwrap()
});

static BULLET_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[*•-][ \t]+").unwrap());

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a bot reply (or the accumulated part of one) to HTML.
pub fn format_message(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let escaped = escape_html(&normalized);
    let with_headings = apply_headings(&escaped);
    let with_strong = STRONG.replace_all(&with_headings, "<strong>$1</strong>");
    let with_emphasis = apply_emphasis(&with_strong);
    let with_bullets = BULLET_LINE.replace_all(&with_emphasis, "• ");
    wrap_paragraphs(&with_bullets)
}

fn apply_headings(text: &str) -> String {
    HEADING.replace_all(text, |caps: &Captures| {
        let level = caps[1].len();
        format!("<div style=\"{}\">{}</div>", HEADING_STYLES[level - 1], &caps[2])
    }).into_owned()
}

fn apply_emphasis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = EMPHASIS.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        // `*` is one byte, so stepping past it stays on a char boundary.
        if text[..whole.start()].ends_with('*') || text[whole.end()..].starts_with('*') {
            pos = whole.start() + 1;
            continue;
        }
        out.push_str(&text[copied..whole.start()]);
        out.push_str("<em>");
        out.push_str(&caps[1]);
        out.push_str("</em>");
        copied = whole.end();
        pos = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

fn wrap_paragraphs(text: &str) -> String {
    PARAGRAPH_BREAK.split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p style=\"{}\">{}</p>", PARAGRAPH_STYLE, p.replace('\n', "<br>")))
        .collect()
}
