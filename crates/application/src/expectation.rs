//! Expectation runner.
//!
//! An [`Expectation`] collects assertions for one request and evaluates
//! them, in registration order, against the exchange produced by its
//! [`ExchangeProvider`]. Evaluation stops at the first failure, which is
//! forwarded to the [`FailureSink`].
//!
//! # Example
//!
//! ```ignore
//! let pending = PendingExchange::new(provider);
//! pending
//!     .expect(sink)?
//!     .with(StatusEquals::new(200))
//!     .with(ContentType::new("json"))
//!     .run()
//!     .await?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};
use uuid::Uuid;
use vouch_domain::{AssertionError, AssertionResult, Exchange, UsageError};

use crate::ports::{Assertion, ExchangeProvider, FailureSink};
use crate::registry::AssertionRegistry;

/// A request that has not been tested yet.
///
/// The first call to [`PendingExchange::expect`] consumes it; later calls
/// are usage errors and never reach the provider.
pub struct PendingExchange<P> {
    id: Uuid,
    provider: Arc<P>,
    consumed: AtomicBool,
}

impl<P: ExchangeProvider> PendingExchange<P> {
    /// Wraps a provider.
    pub fn new(provider: P) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Wraps a provider that is shared with the caller.
    pub fn from_shared(provider: Arc<P>) -> Self {
        Self {
            id: Uuid::now_v7(),
            provider,
            consumed: AtomicBool::new(false),
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns true once an expectation has been created.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::SeqCst)
    }

    /// Binds a new expectation to this request.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::AlreadyTested`] if an expectation was already
    /// created. The error is also reported to `sink`.
    pub fn expect(&self, sink: Arc<dyn FailureSink>) -> Result<Expectation<P>, AssertionError> {
        if self.consumed.swap(true, Ordering::SeqCst) {
            let err = AssertionError::from(UsageError::AlreadyTested {
                request: self.id.to_string(),
            });
            warn!(request = %self.id, "request bound to a second expectation");
            sink.report_with_exchange(&err, None);
            return Err(err);
        }
        Ok(Expectation::new(self.id, Arc::clone(&self.provider), sink))
    }
}

impl<P> std::fmt::Debug for PendingExchange<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingExchange")
            .field("id", &self.id)
            .field("consumed", &self.consumed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Lifecycle of an expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationState {
    /// Accepting assertions.
    Created,
    /// `run` is in progress.
    Evaluating,
    /// `run` has finished.
    Done,
}

/// An ordered, single-use collection of assertions bound to one request.
pub struct Expectation<P> {
    id: Uuid,
    provider: Arc<P>,
    sink: Arc<dyn FailureSink>,
    assertions: Vec<Arc<dyn Assertion>>,
    state: ExpectationState,
}

impl<P: ExchangeProvider> Expectation<P> {
    fn new(id: Uuid, provider: Arc<P>, sink: Arc<dyn FailureSink>) -> Self {
        Self {
            id,
            provider,
            sink,
            assertions: Vec::new(),
            state: ExpectationState::Created,
        }
    }

    /// Appends an assertion.
    ///
    /// Assertions added after `run` are ignored with a warning.
    pub fn add(&mut self, assertion: impl Assertion + 'static) -> &mut Self {
        self.add_shared(Arc::new(assertion))
    }

    /// Appends an already shared assertion.
    pub fn add_shared(&mut self, assertion: Arc<dyn Assertion>) -> &mut Self {
        if self.state == ExpectationState::Created {
            self.assertions.push(assertion);
        } else {
            warn!(
                expectation = %self.id,
                assertion = %assertion.describe(),
                "assertion added after run was ignored"
            );
        }
        self
    }

    /// Appends an assertion (builder pattern).
    #[must_use]
    pub fn with(mut self, assertion: impl Assertion + 'static) -> Self {
        self.add(assertion);
        self
    }

    /// Appends an already shared assertion (builder pattern).
    #[must_use]
    pub fn with_shared(mut self, assertion: Arc<dyn Assertion>) -> Self {
        self.add_shared(assertion);
        self
    }

    /// Appends registered assertions, in argument order.
    ///
    /// Nothing is appended unless every name resolves.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownAssertion`] for the first unregistered
    /// name.
    pub fn use_registered<I, S>(
        &mut self,
        registry: &AssertionRegistry,
        names: I,
    ) -> Result<&mut Self, AssertionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = registry.resolve(names).map_err(|err| {
            warn!(expectation = %self.id, error = %err, "unregistered assertion alias");
            AssertionError::from(err)
        })?;
        for assertion in resolved {
            self.add_shared(assertion);
        }
        Ok(self)
    }

    /// Returns the number of collected assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Returns true if no assertion was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ExpectationState {
        self.state
    }

    /// Performs the request and evaluates every assertion in order.
    ///
    /// The first failure, or a transport error, is reported to the sink
    /// and returned. A second call is rejected with
    /// [`UsageError::AlreadyRun`] without touching the provider.
    ///
    /// # Errors
    ///
    /// Returns the first failure observed.
    pub async fn run(&mut self) -> AssertionResult {
        if self.state != ExpectationState::Created {
            let err = AssertionError::from(UsageError::AlreadyRun);
            warn!(expectation = %self.id, "expectation run twice");
            self.sink.report_with_exchange(&err, None);
            return Err(err);
        }
        self.state = ExpectationState::Evaluating;

        let outcome = match self.provider.execute().await {
            Ok(exchange) => {
                let outcome = self.verify(&exchange);
                if let Err(err) = &outcome {
                    self.sink.report_with_exchange(err, Some(&exchange));
                }
                outcome
            }
            Err(transport) => {
                let err = AssertionError::from(transport);
                warn!(expectation = %self.id, error = %err, "request failed, skipping assertions");
                self.sink.report_with_exchange(&err, None);
                Err(err)
            }
        };

        self.state = ExpectationState::Done;
        info!(
            expectation = %self.id,
            assertions = self.assertions.len(),
            passed = outcome.is_ok(),
            "expectation finished"
        );
        outcome
    }

    /// Evaluates the collected assertions against an exchange.
    ///
    /// Stops at the first failure; later assertions are not invoked. This
    /// does not report to the sink or change the lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns the first failure observed.
    pub fn verify(&self, exchange: &Exchange) -> AssertionResult {
        for (index, assertion) in self.assertions.iter().enumerate() {
            let result = assertion.evaluate(exchange);
            debug!(
                expectation = %self.id,
                index,
                assertion = %assertion.describe(),
                passed = result.is_ok(),
                "assertion evaluated"
            );
            result?;
        }
        Ok(())
    }
}

impl<P> std::fmt::Debug for Expectation<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let assertions: Vec<String> = self.assertions.iter().map(|a| a.describe()).collect();
        f.debug_struct("Expectation")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("assertions", &assertions)
            .finish_non_exhaustive()
    }
}
