/*!
 * Advisory confidence-threshold signal.
 *
 * `metadata.confidence_threshold` marks where a consumer may start to
 * distrust the transcription. Values below it are legal; this rule only
 * counts them and, when asked, reports them as warnings.
 */

use log::debug;

use crate::document::model::Document;
use crate::validation::issue::{format_time, Issue, RuleKind};

use super::{segment_path, word_path, SemanticRule};

/// Reports segment and word confidences below the declared threshold
pub struct ConfidenceThresholdRule {
    /// Emit warnings instead of only logging
    pub emit_advisories: bool,
}

impl SemanticRule for ConfidenceThresholdRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ConfidenceThreshold
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let Some(threshold) = document.confidence_threshold() else {
            return Vec::new();
        };

        let mut advisories = Vec::new();
        for segment in document.segments() {
            if let Some(confidence) = segment.confidence.filter(|c| *c < threshold) {
                advisories.push(Issue::semantic(
                    self.kind(),
                    segment_path(segment),
                    format!(
                        "Segment confidence {} is below the confidence threshold {}",
                        confidence, threshold
                    ),
                ));
            }

            for word in segment.words() {
                if let Some(confidence) = word.confidence.filter(|c| *c < threshold) {
                    advisories.push(Issue::semantic(
                        self.kind(),
                        word_path(segment, word),
                        format!(
                            "Word confidence {} at {} is below the confidence threshold {}",
                            confidence,
                            word.start.map(format_time).unwrap_or_else(|| "?".to_string()),
                            threshold
                        ),
                    ));
                }
            }
        }

        debug!(
            "{} confidence values below threshold {}",
            advisories.len(),
            threshold
        );

        if self.emit_advisories {
            advisories.into_iter().map(Issue::as_warning).collect()
        } else {
            Vec::new()
        }
    }
}
