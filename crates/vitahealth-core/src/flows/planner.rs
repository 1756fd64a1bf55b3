//! Planner page

use crate::api::Backend;
use crate::error::StorageError;
use crate::planner_key::matches_history;
use crate::progress::{PlanProgress, ProgressStore};
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::types::PlanDay;
use tracing::{debug, error};

/// What the planner page renders
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerView {
    Loading,
    /// Terminal state with a call-to-action back to detection
    NoActivePlanner,
    Ready(PlannerBoard),
}

/// A loaded meal plan with its local progress
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerBoard {
    vitamin: String,
    days: Vec<PlanDay>,
    fact: String,
    progress: PlanProgress,
}

impl PlannerBoard {
    /// Assemble a board, keeping progress only for the days of the plan.
    pub fn new(vitamin: impl Into<String>, days: Vec<PlanDay>, fact: String, saved: &PlanProgress) -> Self {
        let progress = saved.for_plan(&days);
        Self {
            vitamin: vitamin.into(),
            days,
            fact,
            progress,
        }
    }

    pub fn vitamin(&self) -> &str {
        &self.vitamin
    }

    pub fn days(&self) -> &[PlanDay] {
        &self.days
    }

    pub fn fact(&self) -> &str {
        &self.fact
    }

    pub fn progress(&self) -> &PlanProgress {
        &self.progress
    }

    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    pub fn completed_days(&self) -> usize {
        self.progress.completed()
    }

    pub fn percentage(&self) -> u8 {
        self.progress.percentage(self.total_days())
    }

    pub fn is_done(&self, day: &str) -> bool {
        self.progress.is_done(day)
    }

    /// Mark a day done or not, writing through to storage synchronously.
    pub fn toggle_day<S: KeyValueStore>(
        &mut self,
        store: &ProgressStore<S>,
        day: &str,
        done: bool,
    ) -> Result<(), StorageError> {
        self.progress = store.toggle(&self.vitamin, &self.progress, day, done)?;
        Ok(())
    }

    /// Re-read progress after a storage change from another view or tab.
    pub fn refresh_progress<S: KeyValueStore>(&mut self, store: &ProgressStore<S>) {
        self.progress = store.load(&self.vitamin).for_plan(&self.days);
    }
}

/// Load the planner for `vitamin`.
///
/// The plan is only fetched when the user's detection history contains a
/// matching deficiency; any failure along the way ends in
/// [`PlannerView::NoActivePlanner`]. Nothing is retried.
pub async fn load_planner<B, S>(
    backend: &B,
    progress: &ProgressStore<S>,
    session: &Session,
    vitamin: &str,
) -> PlannerView
where
    B: Backend + ?Sized,
    S: KeyValueStore,
{
    let Some(token) = session.token() else {
        debug!("No session token, no planner");
        return PlannerView::NoActivePlanner;
    };

    let history = match backend.history(token).await {
        Ok(payload) => payload.into_records(),
        Err(e) => {
            error!(error = %e, "Planner history fetch failed");
            return PlannerView::NoActivePlanner;
        }
    };

    if history.is_empty() {
        debug!("Empty detection history");
        return PlannerView::NoActivePlanner;
    }
    if !matches_history(vitamin, history.iter().map(|h| h.deficiency.as_str())) {
        debug!(vitamin, "No detection matches requested planner");
        return PlannerView::NoActivePlanner;
    }

    match backend.planner(vitamin).await {
        Ok(plan) => {
            let saved = progress.load(vitamin);
            PlannerView::Ready(PlannerBoard::new(vitamin, plan.plan, plan.fact, &saved))
        }
        Err(e) => {
            error!(error = %e, vitamin, "Planner fetch failed");
            PlannerView::NoActivePlanner
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::Meal;

    fn plan() -> Vec<PlanDay> {
        ["Day 1", "Day 2", "Day 3", "Day 4"]
            .iter()
            .map(|d| PlanDay {
                day: d.to_string(),
                meals: vec![Meal {
                    meal_type: "Breakfast".to_string(),
                    food: "Citrus salad".to_string(),
                }],
            })
            .collect()
    }

    #[test]
    fn test_toggle_updates_board_and_storage() {
        let store = ProgressStore::new(MemoryStore::new());
        let mut board = PlannerBoard::new("VitaminC", plan(), String::new(), &PlanProgress::default());
        assert_eq!(board.percentage(), 0);

        board.toggle_day(&store, "Day 2", true).unwrap();
        assert!(board.is_done("Day 2"));
        assert_eq!(board.completed_days(), 1);
        assert_eq!(board.percentage(), 25);
        assert!(store.load("VitaminC").is_done("Day 2"));
    }

    #[test]
    fn test_refresh_picks_up_other_writer() {
        let shared = MemoryStore::new();
        let mine = ProgressStore::new(shared.clone());
        let theirs = ProgressStore::new(shared);
        let mut board = PlannerBoard::new("VitaminC", plan(), String::new(), &mine.load("VitaminC"));

        let mut other = theirs.load("VitaminC");
        other.set("Day 4", true);
        theirs.save("VitaminC", &other).unwrap();

        board.refresh_progress(&mine);
        assert!(board.is_done("Day 4"));
    }
}
