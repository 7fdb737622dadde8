//! Interruption handler.

use seaops_core::prelude::Float;
use seaops_core::utils::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Creates a quota which is reached when max time is elapsed or the process is interrupted.
pub fn create_interruption_quota(max_time: Option<usize>, logger: &InfoLogger) -> Arc<dyn Quota + Send + Sync> {
    let inner = max_time.map::<Arc<dyn Quota + Send + Sync>, _>(|time| Arc::new(TimeQuota::new(time as Float)));
    let should_interrupt = Arc::new(AtomicBool::new(false));

    // NOTE only one handler can be installed per process
    let result = ctrlc::set_handler({
        let should_interrupt = should_interrupt.clone();
        move || {
            should_interrupt.store(true, Ordering::Relaxed);
        }
    });

    if let Err(err) = result {
        (logger)(format!("cannot set interruption handler: {err}").as_str());
    }

    Arc::new(InterruptionQuota { inner, should_interrupt })
}

struct InterruptionQuota {
    inner: Option<Arc<dyn Quota + Send + Sync>>,
    should_interrupt: Arc<AtomicBool>,
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is_reached()) || self.should_interrupt.load(Ordering::Relaxed)
    }
}
