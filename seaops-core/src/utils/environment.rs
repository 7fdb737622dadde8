use crate::utils::{Quota, ThreadPool};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the planner.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}

/// Specifies a degree of parallelism used to evaluate solutions.
#[derive(Clone, Copy, Debug)]
pub struct Parallelism {
    threads: usize,
}

impl Parallelism {
    /// Creates a new instance of `Parallelism` with the given amount of worker threads.
    pub fn new(threads: usize) -> Self {
        Self { threads: threads.max(1) }
    }

    /// Returns amount of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Creates a thread pool of given size.
    pub fn create_pool(&self) -> ThreadPool {
        ThreadPool::new(self.threads)
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(get_cpus())
    }
}

/// Keeps track of environment specific information which influences the planner behavior.
#[derive(Clone)]
pub struct Environment {
    /// Parallelism settings.
    pub parallelism: Parallelism,
    /// An information logger.
    pub logger: InfoLogger,
    /// An optional quota which limits weather window search.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,
}

impl Environment {
    /// Creates a new instance of `Environment`.
    pub fn new(parallelism: Parallelism, logger: InfoLogger, quota: Option<Arc<dyn Quota + Send + Sync>>) -> Self {
        Self { parallelism, logger, quota }
    }

    /// Writes a message into the log.
    pub fn log(&self, message: &str) {
        (self.logger)(message)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(Parallelism::default(), Arc::new(|_| {}), None)
    }
}
