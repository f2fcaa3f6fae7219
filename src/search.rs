//! Substring search over the rendered cue texts, with cyclic next/previous
//! navigation. Independent of playback state; owns the Match Set.

use regex::RegexBuilder;

/// Queries shorter than this clear all search state instead of matching.
pub const MIN_QUERY_LEN: usize = 2;

/// One highlight span: byte offsets into the text of cue `cue`.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSpan {
    pub cue: usize,
    pub start: usize,
    pub end: usize,
}

pub struct SearchEngine {
    texts: Vec<String>,
    matches: Vec<MatchSpan>,
    current: Option<usize>,
    query_active: bool,
}

impl SearchEngine {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            matches: Vec::new(),
            current: None,
            query_active: false,
        }
    }

    /// Rebuild the Match Set from scratch for `query`. Matching is
    /// case-insensitive and literal (the query is escaped, every character
    /// taken verbatim); matches are collected in document order, cue by cue,
    /// left to right, non-overlapping. The first match becomes current.
    pub fn set_query(&mut self, query: &str) {
        self.matches.clear();
        self.current = None;
        if query.chars().count() < MIN_QUERY_LEN {
            self.query_active = false;
            return;
        }
        self.query_active = true;
        let Ok(re) = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        else {
            return;
        };
        for (cue, text) in self.texts.iter().enumerate() {
            for found in re.find_iter(text) {
                self.matches.push(MatchSpan {
                    cue,
                    start: found.start(),
                    end: found.end(),
                });
            }
        }
        if !self.matches.is_empty() {
            self.current = Some(0);
        }
    }

    /// Advance to the next match, wrapping from last back to first. Returns
    /// the new current index so the caller can scroll it into view.
    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Step back to the previous match, wrapping from first to last.
    pub fn prev(&mut self) -> Option<usize> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<usize> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let next = match self.current {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None => 0,
        };
        self.current = Some(next);
        Some(next)
    }

    pub fn matches(&self) -> &[MatchSpan] {
        &self.matches
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Status readout: `None` when no query is in effect (the readout is
    /// cleared entirely), otherwise `"N of M"` or `"No matches"`.
    pub fn status(&self) -> Option<String> {
        if !self.query_active {
            return None;
        }
        match self.current {
            Some(i) => Some(format!("{} of {}", i + 1, self.matches.len())),
            None => Some("No matches".to_string()),
        }
    }
}
