//! Achievements module - unlock tracking with JSON persistence
//!
//! Definitions live in a static table. Unlocked ids are persisted as a
//! JSON list next to the binary; a missing or unreadable save file just
//! means nothing is unlocked yet, and save failures never interrupt play.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default save file for unlocked achievement ids
pub const DEFAULT_SAVE_FILE: &str = "achieved.json";

/// What kind of gameplay quantity an achievement watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RowsCleared,
    TileMerged,
    Score,
}

/// How reported amounts count toward the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Amounts accumulate across reports until the total reaches the goal
    Accumulate,
    /// Each reported amount is compared against the goal on its own
    Reach,
}

/// A single achievement definition
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: EventKind,
    pub trigger: Trigger,
    pub goal: u64,
}

/// All achievements the game knows about
pub static ACHIEVEMENTS: [AchievementDef; 3] = [
    AchievementDef {
        id: "first_row",
        name: "First Clear",
        description: "Clear your first full row.",
        kind: EventKind::RowsCleared,
        trigger: Trigger::Accumulate,
        goal: 1,
    },
    AchievementDef {
        id: "merge_2048",
        name: "2048",
        description: "Accumulate 2048 points worth of merged tiles.",
        kind: EventKind::TileMerged,
        trigger: Trigger::Accumulate,
        goal: 2048,
    },
    AchievementDef {
        id: "score_1000",
        name: "Four Digits",
        description: "Reach a score of 1000.",
        kind: EventKind::Score,
        trigger: Trigger::Reach,
        goal: 1000,
    },
];

/// A gameplay quantity reported to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    RowsCleared(u64),
    TileMerged(u64),
    Score(u64),
}

impl ProgressEvent {
    fn kind(&self) -> EventKind {
        match self {
            ProgressEvent::RowsCleared(_) => EventKind::RowsCleared,
            ProgressEvent::TileMerged(_) => EventKind::TileMerged,
            ProgressEvent::Score(_) => EventKind::Score,
        }
    }

    fn amount(&self) -> u64 {
        match self {
            ProgressEvent::RowsCleared(n) | ProgressEvent::TileMerged(n) | ProgressEvent::Score(n) => *n,
        }
    }
}

/// On-disk format: a bare JSON list of unlocked ids
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct UnlockedList(Vec<String>);

/// Tracks progress, unlocks achievements and persists them
#[derive(Debug)]
pub struct AchievementManager {
    unlocked: HashSet<String>,
    progress: HashMap<&'static str, u64>,
    save_path: PathBuf,
}

impl AchievementManager {
    /// Load state from the default save file
    pub fn new() -> Self {
        Self::with_save_path(DEFAULT_SAVE_FILE)
    }

    /// Load state from a specific save file
    pub fn with_save_path(path: impl Into<PathBuf>) -> Self {
        let save_path = path.into();
        let unlocked = load_unlocked(&save_path);
        Self {
            unlocked,
            progress: HashMap::new(),
            save_path,
        }
    }

    /// Feed one gameplay quantity into the tracker. Returns the
    /// definitions this report newly unlocked, in table order.
    pub fn report(&mut self, event: ProgressEvent) -> Vec<&'static AchievementDef> {
        let mut newly = Vec::new();
        for def in ACHIEVEMENTS.iter() {
            if def.kind != event.kind() || self.unlocked.contains(def.id) {
                continue;
            }
            let reached = match def.trigger {
                Trigger::Accumulate => {
                    let total = self.progress.entry(def.id).or_insert(0);
                    *total = total.saturating_add(event.amount());
                    *total >= def.goal
                }
                Trigger::Reach => event.amount() >= def.goal,
            };
            if reached {
                self.unlocked.insert(def.id.to_string());
                newly.push(def);
            }
        }
        if !newly.is_empty() {
            self.save();
        }
        newly
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Accumulated progress toward an achievement, 0 when nothing counted
    pub fn progress(&self, id: &str) -> u64 {
        self.progress.get(id).copied().unwrap_or(0)
    }

    /// Write unlocked ids to the save file. Failures are swallowed so a
    /// read-only directory never interrupts the game.
    fn save(&self) {
        let mut ids: Vec<String> = self.unlocked.iter().cloned().collect();
        ids.sort_unstable();
        if let Ok(json) = serde_json::to_string_pretty(&UnlockedList(ids)) {
            let _ = fs::write(&self.save_path, json);
        }
    }
}

impl Default for AchievementManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_unlocked(path: &Path) -> HashSet<String> {
    let Ok(raw) = fs::read_to_string(path) else {
        return HashSet::new();
    };
    match serde_json::from_str::<UnlockedList>(&raw) {
        Ok(list) => list.0.into_iter().collect(),
        Err(_) => HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager(tag: &str) -> AchievementManager {
        let path = std::env::temp_dir().join(format!(
            "tui-tetris2048-ach-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        AchievementManager::with_save_path(path)
    }

    #[test]
    fn test_definition_ids_are_unique() {
        let mut ids: Vec<&str> = ACHIEVEMENTS.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn test_accumulate_unlocks_at_goal() {
        let mut manager = temp_manager("accumulate");

        assert!(manager.report(ProgressEvent::TileMerged(1024)).is_empty());
        assert_eq!(manager.progress("merge_2048"), 1024);

        let newly = manager.report(ProgressEvent::TileMerged(1024));
        assert_eq!(newly.len(), 1);
        assert_eq!(newly[0].id, "merge_2048");
        assert!(manager.is_unlocked("merge_2048"));
    }

    #[test]
    fn test_reach_compares_each_report_alone() {
        let mut manager = temp_manager("reach");

        // Two sub-goal scores never unlock, no matter the total.
        assert!(manager.report(ProgressEvent::Score(600)).is_empty());
        assert!(manager.report(ProgressEvent::Score(600)).is_empty());
        assert!(!manager.is_unlocked("score_1000"));

        let newly = manager.report(ProgressEvent::Score(1000));
        assert_eq!(newly.len(), 1);
        assert_eq!(newly[0].id, "score_1000");
    }

    #[test]
    fn test_unlocked_achievement_stays_unlocked_once() {
        let mut manager = temp_manager("once");

        assert_eq!(manager.report(ProgressEvent::RowsCleared(1)).len(), 1);
        assert!(manager.report(ProgressEvent::RowsCleared(3)).is_empty());
        assert!(manager.is_unlocked("first_row"));
    }
}
