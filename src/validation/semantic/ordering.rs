/*!
 * Timing rules: segment order/overlap, segment time ranges, word timings.
 */

use crate::document::model::Document;
use crate::validation::issue::{format_time, Issue, RuleKind};

use super::{segment_path, word_path, SemanticRule};

/// Adjacent timed segments must not overlap or go backwards
pub struct SegmentOrderRule;

impl SemanticRule for SegmentOrderRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SegmentOrder
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        // (index, end) of the last timed segment
        let mut previous: Option<(usize, f64)> = None;

        for segment in document.segments() {
            let Some((start, end)) = segment.timing() else {
                continue;
            };

            if let Some((previous_index, previous_end)) = previous {
                if start < previous_end {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_path(segment),
                        format!(
                            "Segments overlap or are out of order: segment {} starts at {} before segment {} ends at {}",
                            segment.index,
                            format_time(start),
                            previous_index,
                            format_time(previous_end)
                        ),
                    ));
                }
            }

            previous = Some((segment.index, end));
        }

        issues
    }
}

/// Segment `start`/`end` come as a pair and are ordered
pub struct SegmentTimingRule;

impl SemanticRule for SegmentTimingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SegmentTiming
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for segment in document.segments() {
            match (segment.start, segment.end) {
                (Some(start), Some(end)) if start > end => {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_path(segment),
                        format!(
                            "Segment start time {} is greater than end time {}",
                            format_time(start),
                            format_time(end)
                        ),
                    ));
                }
                (Some(_), None) | (None, Some(_)) => {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_path(segment),
                        "Segment must have both 'start' and 'end' or neither",
                    ));
                }
                _ => {}
            }
        }

        issues
    }
}

/// Words are ordered, non-overlapping and inside their segment
pub struct WordTimingRule;

impl SemanticRule for WordTimingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WordTiming
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        for segment in document.segments() {
            let bounds = segment.timing();
            // (index, end) of the previous word in this segment
            let mut previous: Option<(usize, f64)> = None;

            for word in segment.words() {
                let (Some(start), Some(end)) = (word.start, word.end) else {
                    continue;
                };
                let path = word_path(segment, word);

                if start > end {
                    issues.push(Issue::semantic(
                        self.kind(),
                        path.clone(),
                        format!(
                            "Word start time {} is greater than end time {}",
                            format_time(start),
                            format_time(end)
                        ),
                    ));
                }

                if let Some((segment_start, segment_end)) = bounds {
                    if start < segment_start || end > segment_end {
                        issues.push(Issue::semantic(
                            self.kind(),
                            path.clone(),
                            format!(
                                "Word timings {}-{} fall outside segment timings {}-{}",
                                format_time(start),
                                format_time(end),
                                format_time(segment_start),
                                format_time(segment_end)
                            ),
                        ));
                    }
                }

                if let Some((previous_index, previous_end)) = previous {
                    if start < previous_end {
                        issues.push(Issue::semantic(
                            self.kind(),
                            path,
                            format!(
                                "Words overlap or are out of order: word {} starts at {} before word {} ends at {}",
                                word.index,
                                format_time(start),
                                previous_index,
                                format_time(previous_end)
                            ),
                        ));
                    }
                }

                previous = Some((word.index, end));
            }
        }

        issues
    }
}
