//! Tolerant extraction of timed, speaker-attributed cues from an informal
//! WebVTT-style transcript.
//!
//! The format in the wild is loose: an optional `WEBVTT` header, optional
//! numeric cue-index lines, a timing line (`start --> end`), then text lines
//! until a blank line. Only the start time is used. Speaker labels arrive as
//! a `Name:` prefix on a text line. A cue whose timing line fails to parse
//! is dropped whole with a warning rather than emitted half-formed.

use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::corrections::{self, Correction};
use crate::timecode;

lazy_static! {
    static ref CUE_INDEX_RE: Regex = Regex::new(r"^\d+$").unwrap();
}

/// One attributed caption. `speaker` is empty when no speaker label was
/// found on any of the cue's text lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    pub speaker: String,
    pub start: f64,
    pub text: String,
}

enum State {
    /// Between cues, skipping header/index/stray lines.
    Seeking,
    /// Accumulating text lines for a cue that parsed a valid start time.
    ReadingText,
    /// Discarding the remainder of a block whose timing line was malformed.
    SkippingCue,
}

/// Scan `content` and extract every well-formed cue, in file order.
pub fn extract_cues(content: &str, rules: &[Correction]) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut state = State::Seeking;
    let mut start = 0.0;
    let mut speaker = String::new();
    let mut text_lines: Vec<String> = Vec::new();

    for raw in content.lines() {
        let line = raw.trim();
        match state {
            State::Seeking => {
                if line.is_empty() || line.starts_with("WEBVTT") || CUE_INDEX_RE.is_match(line) {
                    continue;
                }
                if let Some((left, _end)) = line.split_once("-->") {
                    // Only the start time matters; the end time is ignored.
                    match timecode::parse_timestamp(left.trim()) {
                        Ok(t) => {
                            start = t;
                            speaker.clear();
                            text_lines.clear();
                            state = State::ReadingText;
                        }
                        Err(err) => {
                            log::warn!("{}, dropping cue", err);
                            state = State::SkippingCue;
                        }
                    }
                }
                // anything else is a stray line, skip it
            }
            State::ReadingText => {
                if line.is_empty() {
                    cues.push(finish_cue(start, &mut speaker, &mut text_lines));
                    state = State::Seeking;
                } else {
                    read_text_line(line, rules, &mut speaker, &mut text_lines);
                }
            }
            State::SkippingCue => {
                if line.is_empty() {
                    state = State::Seeking;
                }
            }
        }
    }

    if let State::ReadingText = state {
        cues.push(finish_cue(start, &mut speaker, &mut text_lines));
    }

    cues
}

/// Read the transcript at `path` and extract its cues.
pub fn extract_cues_from_file(
    path: impl AsRef<Path>,
    rules: &[Correction],
) -> anyhow::Result<Vec<Cue>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("failed to read transcript '{}'", path.as_ref().display()))?;
    Ok(extract_cues(&content, rules))
}

/// Fold one text line into the cue under construction. A `Name: words` line
/// updates the cue's speaker; if several lines carry a label, the last one
/// wins. Quirk preserved from the source material.
fn read_text_line(
    line: &str,
    rules: &[Correction],
    speaker: &mut String,
    text_lines: &mut Vec<String>,
) {
    if let Some((label, rest)) = line.split_once(':') {
        let label = label.trim();
        let rest = rest.trim();
        if !label.is_empty() && !rest.is_empty() {
            *speaker = label.to_string();
            text_lines.push(corrections::apply(rest, rules));
            return;
        }
    }
    text_lines.push(corrections::apply(line, rules));
}

fn finish_cue(start: f64, speaker: &mut String, text_lines: &mut Vec<String>) -> Cue {
    Cue {
        speaker: std::mem::take(speaker),
        start,
        text: text_lines.drain(..).collect::<Vec<_>>().join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrections::DEFAULT_CORRECTIONS;

    const NO_RULES: &[Correction] = &[];

    #[test]
    fn extracts_speaker_time_and_text() {
        let input = "WEBVTT\n\n1\n00:00:05.000 --> 00:00:08.000\nAda: Hello there.\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].speaker, "Ada");
        assert_eq!(cues[0].start, 5.0);
        assert_eq!(cues[0].text, "Hello there.");
    }

    #[test]
    fn joins_multiple_text_lines_with_spaces() {
        let input = "0 --> 1\nAda: first line\nsecond line\n\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues[0].text, "first line second line");
    }

    #[test]
    fn last_speaker_label_wins_within_a_cue() {
        let input = "0 --> 1\nAda: one\nGrace: two\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues[0].speaker, "Grace");
        assert_eq!(cues[0].text, "one two");
    }

    #[test]
    fn cue_without_label_has_empty_speaker() {
        let input = "00:00:01.000 --> 00:00:02.000\njust words\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues[0].speaker, "");
    }

    #[test]
    fn label_with_empty_remainder_is_plain_text() {
        let input = "0 --> 1\nAda:\nmore\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues[0].speaker, "");
        assert_eq!(cues[0].text, "Ada: more");
    }

    #[test]
    fn malformed_timing_drops_only_that_block() {
        let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nAda: kept\n\n\
                     10:20 --> 10:25\nAda: lost\n\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "kept");
    }

    #[test]
    fn malformed_block_text_cannot_start_a_cue() {
        // The discarded block's text lines are consumed outright, so a line
        // that happens to contain the separator does not open a phantom cue.
        let input = "bogus --> 00:00:02.000\n5 --> 6\nstill skipped\n\n\
                     7 --> 8\nAda: real\n";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start, 7.0);
    }

    #[test]
    fn corrections_are_applied_to_cue_text() {
        let input = "0 --> 1\nAda: we visited McCauley\n";
        let cues = extract_cues(input, DEFAULT_CORRECTIONS);
        assert_eq!(cues[0].text, "we visited McCallie");
    }

    #[test]
    fn final_cue_ends_at_eof() {
        let input = "0 --> 1\nAda: no trailing blank line";
        let cues = extract_cues(input, NO_RULES);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "no trailing blank line");
    }

    #[test]
    fn empty_input_yields_no_cues() {
        assert!(extract_cues("", NO_RULES).is_empty());
        assert!(extract_cues("WEBVTT\n\n", NO_RULES).is_empty());
    }
}
