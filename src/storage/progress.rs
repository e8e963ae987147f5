use super::store::KeyValueStore;
use crate::error::StorageError;
use log::info;
use serde::{Deserialize, Serialize};

pub const PROGRESS_KEY: &str = "logicsim_progress";

/// Which challenges a player has finished and the level that unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(rename = "completedChallenges", default)]
    pub completed_challenges: Vec<String>,
    #[serde(rename = "currentLevel", default = "first_level")]
    pub current_level: u32,
}

fn first_level() -> u32 {
    1
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            completed_challenges: Vec::new(),
            current_level: first_level(),
        }
    }
}

pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn progress(&self) -> Result<Progress, StorageError> {
        match self.store.get(PROGRESS_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            None => Ok(Progress::default()),
        }
    }

    pub fn save(&self, progress: &Progress) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(progress).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(PROGRESS_KEY, &json)
    }

    /// Records a completion. The level becomes one past the number of
    /// completed challenges. Completing the same challenge twice is a no-op.
    pub fn mark_completed(&self, challenge_id: &str) -> Result<Progress, StorageError> {
        let mut progress = self.progress()?;
        if !progress.completed_challenges.iter().any(|c| c == challenge_id) {
            progress.completed_challenges.push(challenge_id.to_string());
            progress.current_level = progress.completed_challenges.len() as u32 + 1;
            self.save(&progress)?;
            info!(
                "Challenge '{}' completed, now at level {}",
                challenge_id, progress.current_level
            );
        }
        Ok(progress)
    }

    pub fn is_completed(&self, challenge_id: &str) -> Result<bool, StorageError> {
        Ok(self
            .progress()?
            .completed_challenges
            .iter()
            .any(|c| c == challenge_id))
    }

    pub fn is_unlocked(&self, required_level: u32) -> Result<bool, StorageError> {
        Ok(self.progress()?.current_level >= required_level)
    }

    pub fn current_level(&self) -> Result<u32, StorageError> {
        Ok(self.progress()?.current_level)
    }
}
