//! Contains functionality to filter candidates and match them into solutions.

mod combinations;
pub use self::combinations::*;

mod filter;
pub use self::filter::*;

mod matcher;
pub use self::matcher::*;

use std::collections::BTreeSet;
use std::fmt;

/// A template discarded as a whole because one of its candidate pools is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDiscard {
    /// A template name.
    pub template: String,
    /// A discard reason.
    pub reason: String,
}

/// Explains how solutions of a phase were matched or why there are none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Candidate filtering reports.
    pub filters: Vec<FilterReport>,
    /// Discarded templates.
    pub discarded_templates: Vec<TemplateDiscard>,
    /// Combinations rejected per compatibility rule.
    pub rejections: Vec<RuleRejection>,
    /// Compatibility rules which could not be evaluated for some combination.
    pub unresolved: BTreeSet<String>,
    /// Amount of enumerated combinations.
    pub enumerated: usize,
    /// Amount of matched solutions.
    pub matched: usize,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matched {} of {} combinations", self.matched, self.enumerated)?;

        self.filters.iter().filter(|filter| filter.kept < filter.total).try_for_each(|filter| {
            write!(f, "; {}: kept {} of {}", filter.kind, filter.kept, filter.total)?;
            filter
                .rejections
                .iter()
                .try_for_each(|rejection| write!(f, ", '{}' rejected {}", rejection.rule, rejection.count))
        })?;

        self.discarded_templates
            .iter()
            .try_for_each(|discard| write!(f, "; template '{}' discarded: {}", discard.template, discard.reason))?;

        self.rejections
            .iter()
            .try_for_each(|rejection| write!(f, "; '{}' rejected {}", rejection.rule, rejection.count))
    }
}
