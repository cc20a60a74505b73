use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;

/// all events emitted by the comparison engine's recompute lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    // invalidation events
    DiscountRateChanged {
        old_rate: Rate,
        new_rate: Rate,
    },
    DataInvalidated,

    // recompute lifecycle
    RecomputeStarted {
        generation: u64,
        discount_rate: Rate,
    },
    RecomputeCompleted {
        generation: u64,
        borrower_count: usize,
        timestamp: DateTime<Utc>,
    },
    RecomputeFailed {
        generation: u64,
        reason: String,
    },
    /// a completion arrived after a newer request was issued and was discarded
    RecomputeSuperseded {
        generation: u64,
        current_generation: u64,
    },
}

/// append-only log of engine events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
