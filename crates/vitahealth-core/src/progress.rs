//! Per-plan completion state
//!
//! Progress is owned by the client alone: there is no server record to
//! reconcile with. Writes are last-write-wins across views and tabs; the
//! change notification that follows a write carries no payload and no
//! ordering guarantee.

use crate::error::StorageError;
use crate::storage::{progress_key, KeyValueStore, PROGRESS_UPDATED_KEY};
use crate::types::PlanDay;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Completion flag per day identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanProgress(BTreeMap<String, bool>);

impl PlanProgress {
    /// Whether `day` is marked done; unseen days are not.
    pub fn is_done(&self, day: &str) -> bool {
        self.0.get(day).copied().unwrap_or(false)
    }

    /// Set the flag of one day
    pub fn set(&mut self, day: &str, done: bool) {
        self.0.insert(day.to_string(), done);
    }

    /// Number of days marked done
    pub fn completed(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    /// Keep exactly the days of `plan`, defaulting unseen ones to not done.
    pub fn for_plan(&self, plan: &[PlanDay]) -> Self {
        Self(
            plan.iter()
                .map(|day| (day.day.clone(), self.is_done(&day.day)))
                .collect(),
        )
    }

    /// Rounded completion percentage over `total_days`; 0 for an empty plan.
    pub fn percentage(&self, total_days: usize) -> u8 {
        if total_days == 0 {
            return 0;
        }
        let pct = (self.completed() as f64 / total_days as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Iterate `(day, done)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(day, done)| (day.as_str(), *done))
    }
}

/// Reads and writes plan progress in the shared key-value store
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved progress for `vitamin`; missing or unreadable values are empty.
    pub fn load(&self, vitamin: &str) -> PlanProgress {
        let Some(raw) = self.store.get(&progress_key(vitamin)) else {
            return PlanProgress::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(vitamin, error = %e, "Discarding unreadable plan progress");
            PlanProgress::default()
        })
    }

    /// Write `progress` for `vitamin` as a whole (last write wins), stamp the
    /// "progress updated" marker and notify listeners.
    pub fn save(&self, vitamin: &str, progress: &PlanProgress) -> Result<(), StorageError> {
        self.store
            .set(&progress_key(vitamin), &serde_json::to_string(progress)?)?;
        self.store.set(
            PROGRESS_UPDATED_KEY,
            &chrono::Utc::now().timestamp_millis().to_string(),
        )?;
        self.store.notify_changed();
        debug!(vitamin, completed = progress.completed(), "Plan progress saved");
        Ok(())
    }

    /// Set one day's flag on top of `current` and persist the result.
    ///
    /// Repeating the same toggle leaves storage unchanged apart from the marker.
    pub fn toggle(
        &self,
        vitamin: &str,
        current: &PlanProgress,
        day: &str,
        done: bool,
    ) -> Result<PlanProgress, StorageError> {
        let mut next = current.clone();
        next.set(day, done);
        self.save(vitamin, &next)?;
        Ok(next)
    }

    /// Millisecond timestamp of the most recent write, if any
    pub fn last_updated(&self) -> Option<i64> {
        self.store
            .get(PROGRESS_UPDATED_KEY)
            .and_then(|raw| raw.parse().ok())
    }
}
