//! Request pacing for the maps API client.
//!
//! The places endpoints impose two waits: a freshly issued `next_page_token`
//! is rejected until a couple of seconds have passed, and place-details calls
//! are subject to a per-second quota. Both are expressed as a [`RateGate`]
//! the client awaits before the request, so tests can substitute [`NoDelay`]
//! or a counting gate.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Something a request awaits before it is sent.
pub trait RateGate: Send + Sync {
    fn wait(&self) -> impl Future<Output = ()> + Send;
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl RateGate for NoDelay {
    async fn wait(&self) {}
}

/// Sleeps for the same duration on every pass.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl RateGate for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Lets a caller through once at least `interval` has elapsed since the
/// previous pass. The first pass is immediate.
#[derive(Debug)]
pub struct IntervalGate {
    interval: Duration,
    last_pass: Mutex<Option<Instant>>,
}

impl IntervalGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: Mutex::new(None),
        }
    }
}

impl RateGate for IntervalGate {
    async fn wait(&self) {
        let mut last_pass = self.last_pass.lock().await;
        if let Some(prev) = *last_pass {
            let ready_at = prev + self.interval;
            if ready_at > Instant::now() {
                tracing::trace!(
                    wait = ?(ready_at - Instant::now()),
                    "interval gate holding request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last_pass = Some(Instant::now());
    }
}
