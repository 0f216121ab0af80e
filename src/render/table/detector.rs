//! Ordered, first-match-wins table detection over a text span.

use std::ops::Range;

use tutor_render_config::RuleOverride;

use super::rules::{Normalization, TableRule, builtin_rules};
use crate::render::regexes::re_plain_separator;

/// A table region found by [`TableDetector::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatch {
    pub rule_id: String,
    pub normalization: Normalization,
    /// Byte range of the region in the searched text, from the header line
    /// to the first blank line outside a nested fence.
    pub range: Range<usize>,
}

/// Evaluates [`TableRule`]s in priority order.
#[derive(Debug, Clone)]
pub struct TableDetector {
    rules: Vec<TableRule>,
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TableDetector {
    /// Detector with every built-in rule enabled.
    pub fn builtin() -> Self {
        TableDetectorBuilder::new().rules(builtin_rules()).build()
    }

    pub fn rules(&self) -> &[TableRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&TableRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Toggle rules by ID. Unknown IDs are ignored.
    pub fn apply_overrides(&mut self, overrides: &[RuleOverride]) {
        for ov in overrides {
            match self.rules.iter_mut().find(|r| r.id == ov.id) {
                Some(rule) => {
                    if let Some(enabled) = ov.enabled {
                        rule.enabled = enabled;
                    }
                }
                None => log::warn!("Unknown table rule id in rule_overrides: {}", ov.id),
            }
        }
    }

    /// Find the first enabled rule that matches anywhere in `text`.
    pub fn detect(&self, text: &str) -> Option<TableMatch> {
        for rule in self.rules.iter().filter(|r| r.enabled) {
            let Some(m) = rule.pattern.find(text) else {
                continue;
            };

            let mut start = line_start(text, m.start());
            if rule.normalization != Normalization::Passthrough {
                start = header_start(text, start, m.end());
            }
            let end = region_end(text, start, m.end());

            crate::debug_log!(
                "TABLE",
                "rule {} matched, region {}..{} of {} bytes",
                rule.id,
                start,
                end,
                text.len()
            );
            return Some(TableMatch {
                rule_id: rule.id.clone(),
                normalization: rule.normalization,
                range: start..end,
            });
        }

        crate::debug_trace!("TABLE", "no rule matched ({} bytes)", text.len());
        None
    }
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Move `start` down to the line directly above the first separator line
/// inside the match, so lines preceding the header stay prose.
fn header_start(text: &str, start: usize, match_end: usize) -> usize {
    let mut prev: Option<usize> = None;
    let mut offset = start;
    for line in text[start..match_end].split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if let Some(prev_offset) = prev
            && re_plain_separator().is_match(trimmed)
        {
            return prev_offset;
        }
        if !trimmed.trim().is_empty() {
            prev = Some(offset);
        }
        offset += line.len();
    }
    start
}

/// End of the region: the first blank line at or after `match_end` that is
/// not inside a nested fence, or the end of text.
fn region_end(text: &str, start: usize, match_end: usize) -> usize {
    let mut in_fence = false;
    let mut offset = start;
    for line in text[start..].split_inclusive('\n') {
        if line.matches("```").count() % 2 == 1 {
            in_fence = !in_fence;
        }
        if !in_fence && line.trim().is_empty() && offset >= match_end {
            return offset;
        }
        offset += line.len();
    }
    text.len()
}

/// Builder for [`TableDetector`].
pub struct TableDetectorBuilder {
    rules: Vec<TableRule>,
}

impl TableDetectorBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append one rule at the lowest priority so far.
    pub fn rule(mut self, rule: TableRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = TableRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> TableDetector {
        TableDetector { rules: self.rules }
    }
}

impl Default for TableDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
