//! Span protection
//!
//! Hides romanized tone syllables (`zhong4`) and multi-part CJK names
//! (`约瑟夫·高登`) behind opaque markers while the surrounding text is
//! normalized, then puts them back.
//!
//! Protection splices markers in at the offsets reported by the matcher, so a
//! span string that merely occurs inside some other word is left alone.
//! Restoration scans the normalized buffer for markers once and never rescans
//! text it has already restored.

use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};
use tracing::debug;

use crate::core::error::{FrontendError, Result, TextOperation};

/// Tags available to one table: `a` through `z`.
pub const MAX_PLACEHOLDERS: usize = 26;

/// Initial consonant (optionally `h`-retroflexed), optional medial glide, one or
/// two vowels, nasal coda and a tone number.
static TONE_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[bmnpqdfghjklzcsxwy]?h?[iuüv]?[aeiouüv]{1,2}[ng]*|ng)[1-5]")
        .expect("tone span pattern")
});

/// Two or three ideograph groups joined by `-`, `·` or `—`.
static NAME_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{4e00}-\x{9fff}]+(?:[-·—][\x{4e00}-\x{9fff}]+){1,2}").expect("name span pattern")
});

static TONE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<pinyin_([a-z])>").expect("tone marker pattern"));

static NAME_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<n_([a-z])>").expect("name marker pattern"));

/// Palatal initial followed by `u`/`ü` and an allowed final.
static PALATAL_U_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([jqx])[uü]((?:n|e|an)*)([1-5])").expect("palatal correction pattern")
});

/// Class of protected span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Romanized syllable with a tone digit
    Tone,
    /// Multi-part proper name
    Name,
}

impl SpanKind {
    /// Reserved marker string for a tag
    pub fn marker(self, tag: char) -> String {
        match self {
            SpanKind::Tone => format!("<pinyin_{}>", tag),
            SpanKind::Name => format!("<n_{}>", tag),
        }
    }

    fn span_pattern(self) -> &'static Regex {
        match self {
            SpanKind::Tone => &TONE_SPAN_RE,
            SpanKind::Name => &NAME_SPAN_RE,
        }
    }

    /// Spans of this kind in `text`. Tone-shaped fragments of a longer Latin
    /// word (`version2`, `Win10`) are not tone spans.
    fn spans<'t>(self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.span_pattern()
            .find_iter(text)
            .filter(move |m| self == SpanKind::Name || is_standalone(text, m))
    }

    fn marker_pattern(self) -> &'static Regex {
        match self {
            SpanKind::Tone => &TONE_MARKER_RE,
            SpanKind::Name => &NAME_MARKER_RE,
        }
    }
}

/// Per-call mapping from tags to the spans they stand in for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTable {
    kind: SpanKind,
    entries: Vec<(char, String)>,
}

impl PlaceholderTable {
    fn new(kind: SpanKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// (tag, original span) pairs in order of first appearance
    pub fn entries(&self) -> &[(char, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original span registered under `tag`
    pub fn original(&self, tag: char) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, span)| span.as_str())
    }

    /// Tag for `span`, allocating the next free one on first sight
    fn tag_for(&mut self, span: &str) -> Result<char> {
        if let Some((tag, _)) = self.entries.iter().find(|(_, s)| s == span) {
            return Ok(*tag);
        }
        if self.entries.len() >= MAX_PLACEHOLDERS {
            return Err(FrontendError::text(
                TextOperation::Protection,
                format!(
                    "more than {} distinct {:?} spans in one text",
                    MAX_PLACEHOLDERS, self.kind
                ),
            ));
        }
        let tag = (b'a' + self.entries.len() as u8) as char;
        self.entries.push((tag, span.to_string()));
        Ok(tag)
    }
}

/// Whether `text` contains a tone-span-shaped substring
pub fn contains_tone_span(text: &str) -> bool {
    SpanKind::Tone.spans(text).next().is_some()
}

/// Not preceded by a Latin letter and not followed by a digit
fn is_standalone(text: &str, m: &Match<'_>) -> bool {
    let before = text[..m.start()].chars().next_back();
    let after = text[m.end()..].chars().next();
    !before.is_some_and(|c| c.is_ascii_alphabetic()) && !after.is_some_and(|c| c.is_ascii_digit())
}

/// Replace tone spans with `<pinyin_x>` markers
pub fn protect_tone_spans(text: &str) -> Result<(String, Option<PlaceholderTable>)> {
    protect(text, SpanKind::Tone)
}

/// Replace name spans with `<n_x>` markers
pub fn protect_name_spans(text: &str) -> Result<(String, Option<PlaceholderTable>)> {
    protect(text, SpanKind::Name)
}

/// Put tone spans back, applying [`correct_tone_span`] to each
pub fn restore_tone_spans(text: &str, table: Option<&PlaceholderTable>) -> String {
    restore(text, table, correct_tone_span)
}

/// Put name spans back verbatim
pub fn restore_name_spans(text: &str, table: Option<&PlaceholderTable>) -> String {
    restore(text, table, str::to_string)
}

/// Canonical spelling of a restored tone span.
///
/// Spans starting with a palatal initial (`j`, `q`, `x`) spell `u`/`ü` as `v`.
/// Every span comes back upper-cased, the form the vocabulary carries.
pub fn correct_tone_span(span: &str) -> String {
    let palatal = span
        .chars()
        .next()
        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'j' | 'q' | 'x'));
    if palatal {
        PALATAL_U_RE
            .replace_all(span, "${1}v${2}${3}")
            .to_uppercase()
    } else {
        span.to_uppercase()
    }
}

fn protect(text: &str, kind: SpanKind) -> Result<(String, Option<PlaceholderTable>)> {
    let mut table = PlaceholderTable::new(kind);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for m in kind.spans(text) {
        let tag = table.tag_for(m.as_str())?;
        out.push_str(&text[cursor..m.start()]);
        out.push_str(&kind.marker(tag));
        cursor = m.end();
    }

    if table.is_empty() {
        return Ok((text.to_string(), None));
    }
    out.push_str(&text[cursor..]);
    debug!(kind = ?kind, spans = table.len(), "protected spans");
    Ok((out, Some(table)))
}

fn restore(
    text: &str,
    table: Option<&PlaceholderTable>,
    render: impl Fn(&str) -> String,
) -> String {
    let Some(table) = table.filter(|t| !t.is_empty()) else {
        return text.to_string();
    };
    table
        .kind
        .marker_pattern()
        .replace_all(text, |caps: &Captures| {
            let tag = caps[1].chars().next().unwrap_or('a');
            match table.original(tag) {
                Some(span) => render(span),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
