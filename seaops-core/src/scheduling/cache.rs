#[cfg(test)]
#[path = "../../tests/unit/scheduling/cache_test.rs"]
mod cache_test;

use crate::models::{Olc, WeatherWindow};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

type WindowsCell = Arc<OnceLock<Arc<Vec<WeatherWindow>>>>;

/// Memoizes weather windows of one weather series by operational limits.
/// Safe for concurrent use: windows of every key are computed at most once, other threads asking
/// for the same key wait for the result.
#[derive(Default)]
pub struct WindowCache {
    entries: RwLock<FxHashMap<Olc, WindowsCell>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl WindowCache {
    /// Returns cached windows or computes them using the given function.
    pub fn get_or_compute<F>(&self, olc: &Olc, compute: F) -> Arc<Vec<WeatherWindow>>
    where
        F: FnOnce() -> Vec<WeatherWindow>,
    {
        let cell = self.cell(olc);

        let mut is_computed = false;
        let windows = cell
            .get_or_init(|| {
                is_computed = true;
                Arc::new(compute())
            })
            .clone();

        let counter = if is_computed { &self.misses } else { &self.hits };
        counter.fetch_add(1, Ordering::Relaxed);

        windows
    }

    /// Returns amount of requests served from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns amount of requests which computed windows.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns amount of cached keys.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, olc: &Olc) -> WindowsCell {
        if let Some(cell) = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).get(olc) {
            return cell.clone();
        }

        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner()).entry(*olc).or_default().clone()
    }
}
