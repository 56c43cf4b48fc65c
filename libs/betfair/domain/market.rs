//! Market domain entity

use super::runner::{Runner, RunnerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Market identifier assigned by the exchange (e.g. "1.171796736")
pub type MarketId = String;

/// A single tradable proposition within an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    id: MarketId,
    name: String,
    start_time: DateTime<Utc>,
    runners: BTreeMap<RunnerId, Runner>,
}

impl Market {
    pub fn new(id: impl Into<MarketId>, name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time,
            runners: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Add a runner unless one with the same id is already present.
    ///
    /// Returns true when the runner was inserted.
    pub fn add_runner(&mut self, runner: Runner) -> bool {
        if self.runners.contains_key(&runner.id()) {
            return false;
        }
        self.runners.insert(runner.id(), runner);
        true
    }

    pub fn runner(&self, id: RunnerId) -> Option<&Runner> {
        self.runners.get(&id)
    }

    pub fn runner_mut(&mut self, id: RunnerId) -> Option<&mut Runner> {
        self.runners.get_mut(&id)
    }

    pub fn runners(&self) -> impl Iterator<Item = &Runner> {
        self.runners.values()
    }

    pub fn runner_ids(&self) -> impl Iterator<Item = RunnerId> + '_ {
        self.runners.keys().copied()
    }

    pub fn runner_count(&self) -> usize {
        self.runners.len()
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Market: \"{}\". Starts at: {}", self.name, self.start_time)
    }
}
