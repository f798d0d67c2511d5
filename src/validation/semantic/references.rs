/*!
 * Referential integrity between segments and the speaker/style lists.
 */

use std::collections::{HashMap, HashSet};

use crate::document::model::Document;
use crate::validation::issue::{child_path, item_path, Issue, RuleKind};

use super::{segment_field_path, SemanticRule, SPEAKERS_PATH, STYLES_PATH};

/// Every `speaker_id` / `style_id` must name a declared entity
pub struct ReferenceIntegrityRule;

impl SemanticRule for ReferenceIntegrityRule {
    fn kind(&self) -> RuleKind {
        RuleKind::References
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let speaker_ids: HashSet<&str> = document
            .speakers()
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();
        let style_ids: HashSet<&str> = document
            .styles()
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();

        let mut issues = Vec::new();
        for segment in document.segments() {
            if let Some(speaker_id) = segment.speaker_id.as_deref() {
                if !speaker_ids.contains(speaker_id) {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_field_path(segment, "speaker_id"),
                        format!(
                            "Segment {} references unknown speaker_id '{}'",
                            segment.index, speaker_id
                        ),
                    ));
                }
            }

            if let Some(style_id) = segment.style_id.as_deref() {
                if !style_ids.contains(style_id) {
                    issues.push(Issue::semantic(
                        self.kind(),
                        segment_field_path(segment, "style_id"),
                        format!(
                            "Segment {} references unknown style_id '{}'",
                            segment.index, style_id
                        ),
                    ));
                }
            }
        }

        issues
    }
}

/// Speaker ids and style ids are unique within their lists
pub struct UniqueIdRule;

impl UniqueIdRule {
    fn check_list<'a>(
        &self,
        entity: &str,
        list_path: &str,
        ids: impl Iterator<Item = (usize, &'a str)>,
        issues: &mut Vec<Issue>,
    ) {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (index, id) in ids {
            match first_seen.get(id) {
                Some(first) => issues.push(Issue::semantic(
                    self.kind(),
                    child_path(&item_path(list_path, index), "id"),
                    format!(
                        "Duplicate {} id '{}' (first declared at {})",
                        entity,
                        id,
                        item_path(list_path, *first)
                    ),
                )),
                None => {
                    first_seen.insert(id, index);
                }
            }
        }
    }
}

impl SemanticRule for UniqueIdRule {
    fn kind(&self) -> RuleKind {
        RuleKind::UniqueIds
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        self.check_list(
            "speaker",
            SPEAKERS_PATH,
            document
                .speakers()
                .iter()
                .filter_map(|s| s.id.as_deref().map(|id| (s.index, id))),
            &mut issues,
        );
        self.check_list(
            "style",
            STYLES_PATH,
            document
                .styles()
                .iter()
                .filter_map(|s| s.id.as_deref().map(|id| (s.index, id))),
            &mut issues,
        );

        issues
    }
}
