use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate_portfolio, PortfolioRecord, ScenarioResult};
use crate::config::ValuationConfig;
use crate::decimal::Rate;
use crate::errors::Result;
use crate::events::{EngineEvent, EventLog};
use crate::providers::{BorrowerProvider, LoanProvider};
use crate::recommend::{summarize, PortfolioSummary};
use crate::types::EngineStatus;

/// immutable result of one successful comparison run
///
/// exposed read-only; a new run replaces the whole snapshot, it is never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub results: Vec<ScenarioResult>,
    pub summary: PortfolioSummary,
    pub config: ValuationConfig,
    pub computed_at: DateTime<Utc>,
    pub generation: u64,
}

/// one in-flight recompute, tagged with the generation that must still be
/// current when its result lands
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    generation: u64,
    config: ValuationConfig,
}

impl RefreshRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// scenario comparison engine
///
/// providers and configuration are injected at construction; there is no
/// global service lookup. the recompute lifecycle is
/// `Idle → Loading → Ready → Stale → Loading …` with no error terminal
/// state: a failed load logs the condition and returns to `Idle` with the
/// previous `Ready` snapshot retained for display.
pub struct ComparisonEngine {
    borrowers: Arc<dyn BorrowerProvider>,
    loans: Arc<dyn LoanProvider>,
    config: ValuationConfig,
    status: EngineStatus,
    snapshot: Option<ComparisonSnapshot>,
    generation: u64,
    events: EventLog,
}

impl ComparisonEngine {
    pub fn new(
        borrowers: Arc<dyn BorrowerProvider>,
        loans: Arc<dyn LoanProvider>,
        config: ValuationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            borrowers,
            loans,
            config,
            status: EngineStatus::Idle,
            snapshot: None,
            generation: 0,
            events: EventLog::new(),
        })
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// last-known-good snapshot, retained across failed recomputes
    pub fn snapshot(&self) -> Option<&ComparisonSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.events.take_events()
    }

    /// apply a new discount rate without triggering the reload
    ///
    /// marks a `Ready` snapshot `Stale`; an in-flight load is left alone and
    /// will be superseded by the next `begin_refresh`.
    pub fn apply_discount_rate(&mut self, rate: Rate) -> Result<()> {
        let updated = self.config.with_discount_rate(rate);
        updated.validate()?;
        let old_rate = self.config.discount_rate;
        self.config = updated;
        self.events.emit(EngineEvent::DiscountRateChanged {
            old_rate,
            new_rate: rate,
        });
        if self.status == EngineStatus::Ready {
            self.status = EngineStatus::Stale;
        }
        Ok(())
    }

    /// change the discount rate and immediately recompute
    ///
    /// `Stale → Loading` is automatic: there is no separate apply step.
    pub async fn set_discount_rate(
        &mut self,
        rate: Rate,
        time: &SafeTimeProvider,
    ) -> Result<EngineStatus> {
        self.apply_discount_rate(rate)?;
        Ok(self.refresh(time).await)
    }

    /// mark the underlying borrower/loan data changed and recompute
    pub async fn refresh_data(&mut self, time: &SafeTimeProvider) -> EngineStatus {
        self.events.emit(EngineEvent::DataInvalidated);
        if self.status == EngineStatus::Ready {
            self.status = EngineStatus::Stale;
        }
        self.refresh(time).await
    }

    /// run one full recompute: begin, fetch, complete
    pub async fn refresh(&mut self, time: &SafeTimeProvider) -> EngineStatus {
        let request = self.begin_refresh();
        let outcome = self.fetch_portfolio().await;
        self.complete_refresh(request, outcome, time);
        self.status
    }

    /// issue a new generation-tagged refresh request and enter `Loading`
    ///
    /// issuing a request supersedes any in-flight one: an older completion
    /// arriving later is discarded (last-request-wins).
    pub fn begin_refresh(&mut self) -> RefreshRequest {
        self.generation += 1;
        self.status = EngineStatus::Loading;
        self.events.emit(EngineEvent::RecomputeStarted {
            generation: self.generation,
            discount_rate: self.config.discount_rate,
        });
        RefreshRequest {
            generation: self.generation,
            config: self.config,
        }
    }

    /// fetch an immutable portfolio snapshot from the providers
    ///
    /// the only suspend points of a comparison run; the valuation math
    /// itself never blocks on I/O.
    pub async fn fetch_portfolio(&self) -> Result<Vec<PortfolioRecord>> {
        let borrowers = self.borrowers.get_all().await?;
        let mut records = Vec::with_capacity(borrowers.len());
        for borrower in borrowers {
            let loans = self.loans.get_by_borrower(borrower.id).await?;
            records.push(PortfolioRecord { borrower, loans });
        }
        Ok(records)
    }

    /// land a fetch outcome
    ///
    /// applies the result only when the request's generation is still
    /// current; stale completions are discarded so partial results of a
    /// superseded run can never interleave with a newer one.
    pub fn complete_refresh(
        &mut self,
        request: RefreshRequest,
        outcome: Result<Vec<PortfolioRecord>>,
        time: &SafeTimeProvider,
    ) {
        if request.generation != self.generation {
            debug!(
                generation = request.generation,
                current = self.generation,
                "discarding superseded recompute result"
            );
            self.events.emit(EngineEvent::RecomputeSuperseded {
                generation: request.generation,
                current_generation: self.generation,
            });
            return;
        }

        let computed = outcome.and_then(|records| {
            let results = aggregate_portfolio(&records, &request.config)?;
            let summary = summarize(&results);
            Ok((results, summary))
        });

        match computed {
            Ok((results, summary)) => {
                info!(
                    generation = request.generation,
                    borrowers = results.len(),
                    recommendation = %summary.recommendation,
                    "comparison snapshot ready"
                );
                self.events.emit(EngineEvent::RecomputeCompleted {
                    generation: request.generation,
                    borrower_count: results.len(),
                    timestamp: time.now(),
                });
                self.snapshot = Some(ComparisonSnapshot {
                    results,
                    summary,
                    config: request.config,
                    computed_at: time.now(),
                    generation: request.generation,
                });
                self.status = EngineStatus::Ready;
            }
            Err(err) => {
                warn!(
                    generation = request.generation,
                    error = %err,
                    "recompute failed, retaining last-known-good snapshot"
                );
                self.events.emit(EngineEvent::RecomputeFailed {
                    generation: request.generation,
                    reason: err.to_string(),
                });
                self.status = EngineStatus::Idle;
            }
        }
    }
}
