#[cfg(test)]
#[path = "../../tests/unit/matching/filter_test.rs"]
mod filter_test;

use crate::models::{Candidate, Rule, RuleCheck};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Counts candidates or combinations rejected by one rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleRejection {
    /// A rule in readable form.
    pub rule: String,
    /// Amount of rejections.
    pub count: usize,
}

/// Describes the result of filtering one candidate pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// A kind of filtered candidates.
    pub kind: String,
    /// Amount of candidates before filtering.
    pub total: usize,
    /// Amount of candidates kept.
    pub kept: usize,
    /// Rejections per rule, rules which rejected nothing are omitted.
    pub rejections: Vec<RuleRejection>,
    /// Rules which could not be evaluated for some candidate.
    pub unresolved: BTreeSet<String>,
}

/// Removes candidates failing any of the rules. When `allow_missing` is set, a rule which cannot
/// be evaluated for a candidate (missing field, division by zero) does not reject it.
/// Candidate order is kept.
pub fn filter_candidates<C>(
    kind: &str,
    candidates: &[Arc<C>],
    rules: &[Rule],
    allow_missing: bool,
) -> (Vec<Arc<C>>, FilterReport)
where
    C: Candidate,
{
    let mut counts = vec![0_usize; rules.len()];
    let mut unresolved = BTreeSet::new();

    let kept = candidates
        .iter()
        .filter(|&candidate| {
            let source: &C = candidate;
            let failed = rules.iter().enumerate().find(|(_, rule)| match rule.check(source) {
                RuleCheck::Pass => false,
                RuleCheck::Fail => true,
                RuleCheck::Unresolved(reason) => {
                    unresolved.insert(format!("{} '{}': {reason} in '{rule}'", kind, candidate.id()));
                    !allow_missing
                }
            });

            match failed {
                Some((idx, _)) => {
                    counts[idx] += 1;
                    false
                }
                None => true,
            }
        })
        .cloned()
        .collect::<Vec<_>>();

    let rejections = rules
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(rule, count)| RuleRejection { rule: rule.to_string(), count })
        .collect();

    let report =
        FilterReport { kind: kind.to_string(), total: candidates.len(), kept: kept.len(), rejections, unresolved };

    (kept, report)
}
