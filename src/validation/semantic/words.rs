/*!
 * Word-level rules: text consistency with the owning segment and
 * zero-duration flagging.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::model::{Document, WordTimingMode};
use crate::validation::issue::{format_time, Issue, RuleKind};

use super::{segment_field_path, segment_path, word_path, SemanticRule};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Text with every whitespace run removed
fn strip_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, "").into_owned()
}

/// Words must agree with the segment text for the segment's timing mode
pub struct WordTextRule;

impl SemanticRule for WordTextRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WordText
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for segment in document.segments() {
            if let Some(mode) = segment.word_timing_mode {
                if segment.words().is_empty() {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_field_path(segment, "word_timing_mode"),
                        format!(
                            "'word_timing_mode' is '{}' but no words are provided in segment {}",
                            mode.as_str(),
                            segment.index
                        ),
                    ));
                    continue;
                }
            }

            let (Some(mode), Some(text)) = (segment.effective_word_timing_mode(), &segment.text)
            else {
                continue;
            };

            let normalized_text = strip_whitespace(text);
            let word_texts = segment
                .words()
                .iter()
                .filter_map(|w| w.text.as_deref().map(|t| (w, strip_whitespace(t))));

            match mode {
                WordTimingMode::Complete => {
                    let concatenated: String = word_texts.map(|(_, t)| t).collect();
                    if concatenated != normalized_text {
                        issues.push(Issue::semantic(
                            self.kind(),
                            segment_path(segment),
                            format!(
                                "Concatenated words do not match segment text in segment {} (words: '{}', text: '{}')",
                                segment.index, concatenated, normalized_text
                            ),
                        ));
                    }
                }
                WordTimingMode::Partial => {
                    // Word texts must occur in the segment text, in order
                    let mut cursor = 0;
                    for (word, word_text) in word_texts {
                        match normalized_text[cursor..].find(&word_text) {
                            Some(offset) => cursor += offset + word_text.len(),
                            None => issues.push(Issue::semantic(
                                self.kind(),
                                word_path(segment, word),
                                format!(
                                    "Word '{}' does not appear in the text of segment {} in order",
                                    word_text, segment.index
                                ),
                            )),
                        }
                    }
                }
            }
        }

        issues
    }
}

/// Zero-length timings must be flagged explicitly, and flags must be truthful
pub struct ZeroDurationRule;

impl SemanticRule for ZeroDurationRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ZeroDuration
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for segment in document.segments() {
            match segment.timing() {
                Some((start, end)) if start == end && !segment.is_zero_duration => {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_path(segment),
                        format!(
                            "Zero-duration segment at {} must set 'is_zero_duration' to true",
                            format_time(start)
                        ),
                    ));
                }
                Some((start, end)) if start != end && segment.is_zero_duration => {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_field_path(segment, "is_zero_duration"),
                        format!(
                            "Segment is marked zero-duration but runs from {} to {}",
                            format_time(start),
                            format_time(end)
                        ),
                    ));
                }
                None if segment.is_zero_duration => {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_field_path(segment, "is_zero_duration"),
                        "Zero-duration segment must have both 'start' and 'end'",
                    ));
                }
                _ => {}
            }

            for word in segment.words() {
                let (Some(start), Some(end)) = (word.start, word.end) else {
                    continue;
                };

                if start == end && !(word.is_zero_duration || segment.is_zero_duration) {
                    issues.push(Issue::semantic(
                        self.kind(),
                        word_path(segment, word),
                        format!(
                            "Zero-duration word at {} must set 'is_zero_duration' to true",
                            format_time(start)
                        ),
                    ));
                } else if start != end && word.is_zero_duration {
                    issues.push(Issue::semantic(
                        self.kind(),
                        word_path(segment, word),
                        format!(
                            "Word is marked zero-duration but runs from {} to {}",
                            format_time(start),
                            format_time(end)
                        ),
                    ));
                }
            }
        }

        issues
    }
}
