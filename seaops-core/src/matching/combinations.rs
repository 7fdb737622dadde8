#[cfg(test)]
#[path = "../../tests/unit/matching/combinations_test.rs"]
mod combinations_test;

/// A lazy, restartable cartesian product over index ranges `0..radix` for every position.
/// Indices are produced in lexicographic order: the last position changes fastest.
#[derive(Clone, Debug)]
pub struct Combinations {
    radices: Vec<usize>,
    current: Option<Vec<usize>>,
    started: bool,
}

impl Combinations {
    /// Creates a new instance of `Combinations`.
    pub fn new(radices: Vec<usize>) -> Self {
        let mut combinations = Self { radices, current: None, started: false };
        combinations.reset();

        combinations
    }

    /// Returns an upper bound of combinations: a product of all radices.
    pub fn total(&self) -> usize {
        self.radices.iter().product()
    }

    /// Restarts enumeration from the first combination.
    pub fn reset(&mut self) {
        self.started = false;
        self.current = if self.radices.contains(&0) { None } else { Some(vec![0; self.radices.len()]) };
    }

    fn advance(&mut self) {
        let Some(current) = self.current.as_mut() else { return };

        for position in (0..current.len()).rev() {
            current[position] += 1;
            if current[position] < self.radices[position] {
                return;
            }
            current[position] = 0;
        }

        self.current = None;
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.advance();
        }
        self.started = true;

        self.current.clone()
    }
}
