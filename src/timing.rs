//! Coalescing timer (debounce) and leading-edge rate limiter.

/// Something that can run a task after a delay. Dropping the returned handle
/// must cancel the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Cancel-and-reschedule timer: a burst of triggers inside `delay_ms` runs
/// only the last task, once, after the burst goes quiet.
pub struct CoalescingTimer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> CoalescingTimer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    pub fn trigger(&mut self, task: impl FnOnce() + 'static) {
        // drop first so the old timer is cleared before the new one exists
        self.pending.take();
        self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(task)));
    }

    pub fn cancel(&mut self) {
        self.pending.take();
    }
}

/// Lets a callback through at most once per `interval_ms`.
#[derive(Debug)]
pub struct RateLimiter {
    interval_ms: f64,
    last: Option<f64>,
}

impl RateLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_timers::callback::Timeout;

    /// `setTimeout` backed scheduler; `Timeout` clears itself on drop.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TimeoutScheduler;

    impl super::Scheduler for TimeoutScheduler {
        type Handle = Timeout;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
            Timeout::new(delay_ms, task)
        }
    }
}
