use std::collections::BTreeSet;

/// Collects missing data warnings raised while planning a phase. Warnings never stop planning,
/// they are reported together with the phase outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: BTreeSet<String>,
}

impl Diagnostics {
    /// Adds a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.insert(message.into());
    }

    /// Adds many warnings.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, warnings: I) {
        self.warnings.extend(warnings);
    }

    /// Returns warnings in sorted order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> + '_ {
        self.warnings.iter().map(|warning| warning.as_str())
    }

    /// Returns amount of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true when there are no warnings.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
