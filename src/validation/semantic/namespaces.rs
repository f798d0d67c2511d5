/*!
 * Reserved extension namespace protection.
 */

use crate::document::model::{Document, Extensions, STJ_ROOT_KEY};
use crate::validation::issue::{child_path, item_path, Issue, RuleKind};

use super::{segment_path, word_path, SemanticRule, SPEAKERS_PATH, STYLES_PATH};

/// Namespace owned by the format itself
pub const RESERVED_NAMESPACE: &str = STJ_ROOT_KEY;

/// No `extensions` mapping may use the format's own name as a namespace
pub struct ReservedNamespaceRule;

impl ReservedNamespaceRule {
    fn check_extensions(
        &self,
        owner_path: &str,
        extensions: Option<&Extensions>,
        issues: &mut Vec<Issue>,
    ) {
        if extensions.is_some_and(|e| e.contains(RESERVED_NAMESPACE)) {
            let extensions_path = child_path(owner_path, "extensions");
            issues.push(Issue::semantic(
                self.kind(),
                child_path(&extensions_path, RESERVED_NAMESPACE),
                format!(
                    "Reserved namespace '{}' cannot be used in {}; use the defined STJ fields instead",
                    RESERVED_NAMESPACE, extensions_path
                ),
            ));
        }
    }
}

impl SemanticRule for ReservedNamespaceRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ReservedNamespace
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some(metadata) = &document.metadata {
            self.check_extensions("metadata", metadata.extensions.as_ref(), &mut issues);
            if let Some(source) = &metadata.source {
                self.check_extensions("metadata.source", source.extensions.as_ref(), &mut issues);
            }
        }

        for speaker in document.speakers() {
            let path = item_path(SPEAKERS_PATH, speaker.index);
            self.check_extensions(&path, speaker.extensions.as_ref(), &mut issues);
        }

        for style in document.styles() {
            let path = item_path(STYLES_PATH, style.index);
            self.check_extensions(&path, style.extensions.as_ref(), &mut issues);
        }

        for segment in document.segments() {
            self.check_extensions(&segment_path(segment), segment.extensions.as_ref(), &mut issues);
            for word in segment.words() {
                self.check_extensions(&word_path(segment, word), word.extensions.as_ref(), &mut issues);
            }
        }

        issues
    }
}
