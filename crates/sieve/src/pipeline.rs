// ABOUTME: Concurrent fetch pipeline: bounded worker pool gated by a global rate limiter.
// ABOUTME: Completed fetches are handed off to the extraction consumer over a bounded channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::error::SieveError;
use crate::options::Options;
use crate::resource::{self, FetchRequest, Target};

/// Rate limiter that enforces a concurrency ceiling and a minimum spacing
/// between successive dispatches.
///
/// The semaphore bounds in-flight fetches; the delay gate is global, not
/// per-worker: two workers cannot dispatch less than `min_delay` apart.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    min_delay: Duration,
    last_dispatch: tokio::sync::Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(max_in_flight: usize, min_delay: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            min_delay,
            last_dispatch: tokio::sync::Mutex::new(Instant::now()),
        }
    }

    /// Acquire permission to dispatch. Resolves once a worker slot is free
    /// and the minimum delay since the previous dispatch has elapsed.
    pub async fn acquire(&self) -> RateLimitGuard {
        let permit = self.semaphore.clone().acquire_owned().await.unwrap();

        if !self.min_delay.is_zero() {
            let mut last = self.last_dispatch.lock().await;
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
            *last = Instant::now();
        }

        RateLimitGuard { _permit: permit }
    }
}

/// Guard that frees the worker slot when dropped.
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

/// Build the HTTP client used by the fetch workers.
///
/// Certificate verification is deliberately disabled: the tool is pointed at
/// arbitrary hosts and treats transport trust as out of scope.
pub fn build_http_client(opts: &Options) -> Result<reqwest::Client, SieveError> {
    reqwest::Client::builder()
        .user_agent(opts.user_agent.clone())
        .timeout(opts.timeout)
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(|e| {
            SieveError::fetch(
                "",
                "BuildClient",
                Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
            )
        })
}

/// Dispatches fetch requests with a concurrency ceiling and a minimum delay
/// between dispatches, handing successful responses off as targets.
///
/// Every worker owns a clone of the handoff sender, so the channel cannot
/// close before all in-flight fetches have finished: `wait()` joins the
/// workers, and the receiver sees end-of-stream only once the last sender
/// clone is dropped.
pub struct FetchPipeline {
    client: reqwest::Client,
    limiter: Arc<RateLimiter>,
    tx: mpsc::Sender<Target>,
    workers: JoinSet<()>,
}

impl FetchPipeline {
    pub fn new(opts: &Options, tx: mpsc::Sender<Target>) -> Result<Self, SieveError> {
        let client = match &opts.http_client {
            Some(client) => client.clone(),
            None => build_http_client(opts)?,
        };
        Ok(Self {
            client,
            limiter: Arc::new(RateLimiter::new(opts.concurrency.max(1), opts.delay)),
            tx,
            workers: JoinSet::new(),
        })
    }

    /// Submit a request. The worker holds its slot until the resulting target
    /// has been accepted by the channel, so a slow consumer throttles
    /// dispatch.
    pub fn submit(&mut self, request: FetchRequest) {
        let client = self.client.clone();
        let limiter = Arc::clone(&self.limiter);
        let tx = self.tx.clone();

        self.workers.spawn(async move {
            let _guard = limiter.acquire().await;
            match resource::fetch(&client, &request).await {
                Ok(Some(target)) => {
                    let _ = tx.send(target).await;
                }
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            }
        });
    }

    /// Wait for every submitted request's worker to finish. Consumes the
    /// pipeline, dropping its sender.
    pub async fn wait(mut self) {
        while self.workers.join_next().await.is_some() {}
    }
}
