//! Stand-ins for the server round trips of the page.
//!
//! There is no real network. [`SimulatedTransport`] sleeps and rolls a die;
//! [`ScriptedTransport`] answers immediately from a queue so tests and demos
//! get deterministic outcomes.

use crate::error::TransportError;
use crate::event::{Event, EventId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Boxed future returned by [`Transport`] methods.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + Send + 'a>>;

/// Form data sent along with a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub event_id: EventId,
}

/// The page's view of the server.
pub trait Transport: Send + Sync {
    /// Fetch the event list. The simulated server answers with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the list could not be fetched.
    fn fetch_events(&self, snapshot: Vec<Event>) -> TransportFuture<'_, Vec<Event>>;

    /// Post a registration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the server did not accept it.
    fn post_registration(&self, request: RegistrationRequest) -> TransportFuture<'_, ()>;
}

/// Default latency of [`Transport::fetch_events`].
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1500);

/// Default latency of [`Transport::post_registration`].
pub const DEFAULT_POST_DELAY: Duration = Duration::from_millis(1000);

/// Default probability that a post succeeds.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

/// Timer-based fake server.
///
/// Fetches always succeed after `fetch_delay`. Posts succeed with
/// probability `success_rate` after `post_delay`. Use
/// [`SimulatedTransportBuilder::seed`] for a reproducible sequence of
/// outcomes.
#[derive(Debug)]
pub struct SimulatedTransport {
    fetch_delay: Duration,
    post_delay: Duration,
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        SimulatedTransport::builder().build()
    }
}

impl SimulatedTransport {
    pub fn builder() -> SimulatedTransportBuilder {
        SimulatedTransportBuilder::default()
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn roll(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(self.success_rate)
    }
}

impl Transport for SimulatedTransport {
    fn fetch_events(&self, snapshot: Vec<Event>) -> TransportFuture<'_, Vec<Event>> {
        Box::pin(async move {
            tokio::time::sleep(self.fetch_delay).await;
            log::debug!("simulated fetch returned {} events", snapshot.len());
            Ok(snapshot)
        })
    }

    fn post_registration(&self, request: RegistrationRequest) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            tokio::time::sleep(self.post_delay).await;
            if self.roll() {
                log::info!("simulated post accepted for event {}", request.event_id);
                Ok(())
            } else {
                log::warn!("simulated post rejected for event {}", request.event_id);
                Err(TransportError::Rejected)
            }
        })
    }
}

/// Configuration for [`SimulatedTransport`].
#[derive(Debug, Clone)]
pub struct SimulatedTransportBuilder {
    fetch_delay: Duration,
    post_delay: Duration,
    success_rate: f64,
    seed: Option<u64>,
}

impl Default for SimulatedTransportBuilder {
    fn default() -> Self {
        SimulatedTransportBuilder {
            fetch_delay: DEFAULT_FETCH_DELAY,
            post_delay: DEFAULT_POST_DELAY,
            success_rate: DEFAULT_SUCCESS_RATE,
            seed: None,
        }
    }
}

impl SimulatedTransportBuilder {
    pub fn fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = delay;
        self
    }

    /// Probability a post succeeds. Clamped to `0.0..=1.0`; NaN counts as 0.
    pub fn success_rate(mut self, rate: f64) -> Self {
        self.success_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    /// Seed the outcome generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> SimulatedTransport {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SimulatedTransport {
            fetch_delay: self.fetch_delay,
            post_delay: self.post_delay,
            success_rate: self.success_rate,
            rng: Mutex::new(rng),
        }
    }
}

/// Transport that answers from queued outcomes, without delay.
///
/// An empty queue means success. Every posted request is kept for
/// inspection.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    fetches: Mutex<VecDeque<Result<(), TransportError>>>,
    posts: Mutex<VecDeque<Result<(), TransportError>>>,
    posted: Mutex<Vec<RegistrationRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unscripted fetch.
    pub fn then_fetch(self, outcome: Result<(), TransportError>) -> Self {
        lock(&self.fetches).push_back(outcome);
        self
    }

    /// Queue the outcome of the next unscripted post.
    pub fn then_post(self, outcome: Result<(), TransportError>) -> Self {
        lock(&self.posts).push_back(outcome);
        self
    }

    /// Requests posted so far, oldest first.
    pub fn posted(&self) -> Vec<RegistrationRequest> {
        lock(&self.posted).clone()
    }
}

impl Transport for ScriptedTransport {
    fn fetch_events(&self, snapshot: Vec<Event>) -> TransportFuture<'_, Vec<Event>> {
        let outcome = lock(&self.fetches).pop_front().unwrap_or(Ok(()));
        Box::pin(async move { outcome.map(|()| snapshot) })
    }

    fn post_registration(&self, request: RegistrationRequest) -> TransportFuture<'_, ()> {
        let outcome = lock(&self.posts).pop_front().unwrap_or(Ok(()));
        lock(&self.posted).push(request);
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            event_id: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_fetch_waits_then_returns_snapshot() {
        let transport = SimulatedTransport::builder().seed(7).build();
        let start = tokio::time::Instant::now();
        let events = transport.fetch_events(crate::seed::sample_events()).await.unwrap();
        assert_eq!(events.len(), 4);
        assert!(start.elapsed() >= DEFAULT_FETCH_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_certain_success_and_certain_failure() {
        let always = SimulatedTransport::builder().success_rate(1.0).build();
        let never = SimulatedTransport::builder().success_rate(0.0).build();
        for _ in 0..20 {
            assert_eq!(always.post_registration(request()).await, Ok(()));
            assert_eq!(
                never.post_registration(request()).await,
                Err(TransportError::Rejected)
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_rate_mostly_succeeds() {
        let transport = SimulatedTransport::builder().seed(42).build();
        let mut ok = 0;
        for _ in 0..1000 {
            if transport.post_registration(request()).await.is_ok() {
                ok += 1;
            }
        }
        assert!((850..=950).contains(&ok), "{ok} successes out of 1000");
    }

    #[test]
    fn test_success_rate_is_clamped() {
        assert_eq!(SimulatedTransport::builder().success_rate(3.0).build().success_rate(), 1.0);
        assert_eq!(SimulatedTransport::builder().success_rate(-1.0).build().success_rate(), 0.0);
        assert_eq!(SimulatedTransport::builder().success_rate(f64::NAN).build().success_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_scripted_outcomes_in_order() {
        let transport = ScriptedTransport::new()
            .then_post(Err(TransportError::Rejected))
            .then_post(Ok(()));
        assert!(transport.post_registration(request()).await.is_err());
        assert!(transport.post_registration(request()).await.is_ok());
        assert!(transport.post_registration(request()).await.is_ok());
        assert_eq!(transport.posted().len(), 3);
    }
}
