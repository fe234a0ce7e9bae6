//! Repeated multi-line pattern discovery for the substitution codec.

use std::collections::HashMap;

use tracing::debug;
use tt_core::LosslessConfig;

use crate::lossless::PLACEHOLDER_LEN;

/// A repeated block of text and its estimated worth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCandidate<'a> {
    pub text: &'a str,
    /// Length in characters.
    pub len: usize,
    pub occurrences: usize,
    pub savings: usize,
}

/// Net characters saved if one occurrence stays literal and the rest
/// become placeholders.
pub fn savings(len: usize, occurrences: usize) -> usize {
    occurrences.saturating_sub(1) * len.saturating_sub(PLACEHOLDER_LEN)
}

struct Line {
    start: usize,
    end: usize,
    chars: usize,
}

/// Line boundaries: LF, VT, FF, CR, FS, GS, RS, NEL, LINE SEPARATOR and
/// PARAGRAPH SEPARATOR. CR LF counts as a single terminator.
fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | '\u{1c}'..='\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Lines with their terminators kept, as byte ranges into `text`.
fn lines(text: &str) -> Vec<Line> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((offset, ch)) = iter.next() {
        chars += 1;
        if !is_line_break(ch) {
            continue;
        }
        let mut end = offset + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(_, '\n')) = iter.peek() {
                iter.next();
                chars += 1;
                end += 1;
            }
        }
        out.push(Line { start, end, chars });
        start = end;
        chars = 0;
    }
    if start < text.len() {
        out.push(Line { start, end: text.len(), chars });
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    config: LosslessConfig,
}

impl PatternCatalog {
    pub fn new(config: LosslessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LosslessConfig {
        &self.config
    }

    /// Count every window of 1..=`max_window_lines` consecutive lines that
    /// is at least `min_pattern_len` characters long. Windows overlap.
    pub fn scan<'a>(&self, text: &'a str) -> HashMap<&'a str, usize> {
        let lines = lines(text);
        let mut counts = HashMap::new();
        for window in 1..=self.config.max_window_lines {
            if window > lines.len() {
                break;
            }
            for group in lines.windows(window) {
                let chars: usize = group.iter().map(|l| l.chars).sum();
                if chars < self.config.min_pattern_len {
                    continue;
                }
                let block = &text[group[0].start..group[window - 1].end];
                *counts.entry(block).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Keep frequent, long-enough windows, best savings first, capped at
    /// `max_patterns`. Equal savings are ordered by text so output is stable.
    pub fn rank<'a>(&self, counts: HashMap<&'a str, usize>) -> Vec<PatternCandidate<'a>> {
        let mut ranked: Vec<PatternCandidate<'a>> = counts
            .into_iter()
            .filter(|(_, count)| *count >= self.config.min_occurrences)
            .map(|(text, occurrences)| {
                let len = text.chars().count();
                PatternCandidate { text, len, occurrences, savings: savings(len, occurrences) }
            })
            .filter(|c| c.len >= self.config.min_pattern_len)
            .collect();
        ranked.sort_by(|a, b| b.savings.cmp(&a.savings).then_with(|| a.text.cmp(b.text)));
        ranked.truncate(self.config.max_patterns);
        ranked
    }

    /// Full candidate search: scan, rank, prune subsumed entries, then order
    /// longest first for substitution.
    pub fn find_candidates<'a>(&self, text: &'a str) -> Vec<PatternCandidate<'a>> {
        let counts = self.scan(text);
        let windows = counts.len();
        let mut candidates = remove_subsumed(self.rank(counts));
        candidates.sort_by(|a, b| b.len.cmp(&a.len));
        debug!(windows, candidates = candidates.len(), "pattern scan");
        candidates
    }
}

/// Drop candidates contained in a higher-ranked candidate's text.
pub fn remove_subsumed(ranked: Vec<PatternCandidate<'_>>) -> Vec<PatternCandidate<'_>> {
    let mut kept = Vec::with_capacity(ranked.len());
    for (i, candidate) in ranked.iter().enumerate() {
        let subsumed = ranked[..i]
            .iter()
            .any(|earlier| {
                earlier.text.len() > candidate.text.len() && earlier.text.contains(candidate.text)
            });
        if !subsumed {
            kept.push(candidate.clone());
        }
    }
    kept
}
