use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Achievement id unlocked by five four-line clears.
pub const TETRIS_ACHIEVEMENT_ID: &str = "tetris-5";

/// A named milestone with a galaxy-point reward.
///
/// Serialized with camelCase keys; this is the element type of the persisted
/// achievement list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: usize,
    pub unlocked: bool,
    pub icon: String,
}

/// Numbers the unlock rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Milestones {
    pub score: usize,
    pub level: usize,
    pub total_lines_cleared: usize,
    pub total_hard_drops: usize,
    pub tetris_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Score(usize),
    Level(usize),
    TotalLines(usize),
    HardDrops(usize),
    Tetrises(usize),
}

impl Rule {
    const fn is_met(self, m: &Milestones) -> bool {
        match self {
            Self::Score(n) => m.score >= n,
            Self::Level(n) => m.level >= n,
            Self::TotalLines(n) => m.total_lines_cleared >= n,
            Self::HardDrops(n) => m.total_hard_drops >= n,
            Self::Tetrises(n) => m.tetris_count >= n,
        }
    }
}

#[derive(Debug)]
struct AchievementDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    points: usize,
    rule: Rule,
}

/// Number of achievements in the catalog.
pub const ACHIEVEMENT_COUNT: usize = CATALOG.len();

const CATALOG: [AchievementDef; 7] = [
    AchievementDef {
        id: "score-1000",
        name: "Stardust",
        description: "Score 1,000 points in a single game",
        icon: "✨",
        points: 10,
        rule: Rule::Score(1000),
    },
    AchievementDef {
        id: "level-5",
        name: "Orbit Reached",
        description: "Reach level 5",
        icon: "🛰",
        points: 20,
        rule: Rule::Level(5),
    },
    AchievementDef {
        id: "lines-50",
        name: "Line Voyager",
        description: "Clear 50 lines in total",
        icon: "🌠",
        points: 25,
        rule: Rule::TotalLines(50),
    },
    AchievementDef {
        id: "level-10",
        name: "Escape Velocity",
        description: "Reach level 10",
        icon: "🚀",
        points: 50,
        rule: Rule::Level(10),
    },
    AchievementDef {
        id: "hard-drops-50",
        name: "Meteor Shower",
        description: "Hard drop 50 pieces in total",
        icon: "☄",
        points: 20,
        rule: Rule::HardDrops(50),
    },
    AchievementDef {
        id: "score-10000",
        name: "Supernova",
        description: "Score 10,000 points in a single game",
        icon: "🌟",
        points: 100,
        rule: Rule::Score(10000),
    },
    AchievementDef {
        id: TETRIS_ACHIEVEMENT_ID,
        name: "Quasar",
        description: "Clear four lines at once five times",
        icon: "🌌",
        points: 75,
        rule: Rule::Tetrises(5),
    },
];

impl AchievementDef {
    fn to_achievement(&self, unlocked: bool) -> Achievement {
        Achievement {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            points: self.points,
            unlocked,
            icon: self.icon.to_owned(),
        }
    }
}

/// Ids unlocked by one evaluation, in catalog order.
pub type UnlockedIds = ArrayVec<&'static str, ACHIEVEMENT_COUNT>;

/// Tracks which achievements are unlocked and the galaxy points they earned.
///
/// # Example
///
/// ```
/// use galaxis_engine::{AchievementTracker, Milestones};
///
/// let mut tracker = AchievementTracker::new();
/// let unlocked = tracker.evaluate(&Milestones {
///     score: 1200,
///     level: 1,
///     ..Milestones::default()
/// });
///
/// assert_eq!(unlocked.as_slice(), ["score-1000"]);
/// assert_eq!(tracker.galaxy_points(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementTracker {
    unlocked: [bool; ACHIEVEMENT_COUNT],
    galaxy_points: usize,
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementTracker {
    /// Creates a tracker with every achievement locked and no points.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unlocked: [false; ACHIEVEMENT_COUNT],
            galaxy_points: 0,
        }
    }

    /// Restores a tracker from persisted data.
    ///
    /// Unlock flags are taken from `stored` by id; ids missing from `stored`
    /// stay locked and ids unknown to the catalog are ignored. Catalog texts
    /// and point values always win over stored ones.
    #[must_use]
    pub fn restore(stored: &[Achievement], galaxy_points: usize) -> Self {
        let mut unlocked = [false; ACHIEVEMENT_COUNT];
        for (flag, def) in unlocked.iter_mut().zip(&CATALOG) {
            *flag = stored.iter().any(|a| a.id == def.id && a.unlocked);
        }
        Self {
            unlocked,
            galaxy_points,
        }
    }

    #[must_use]
    pub const fn galaxy_points(&self) -> usize {
        self.galaxy_points
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        CATALOG
            .iter()
            .zip(&self.unlocked)
            .any(|(def, &unlocked)| unlocked && def.id == id)
    }

    /// Returns the full achievement list, in catalog order.
    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        CATALOG
            .iter()
            .zip(&self.unlocked)
            .map(|(def, &unlocked)| def.to_achievement(unlocked))
            .collect()
    }

    /// Unlocks every locked achievement whose rule is met.
    ///
    /// Already unlocked achievements are skipped, so evaluating twice with the
    /// same milestones never awards points twice.
    pub fn evaluate(&mut self, milestones: &Milestones) -> UnlockedIds {
        let mut newly_unlocked = UnlockedIds::new();
        for (def, unlocked) in CATALOG.iter().zip(&mut self.unlocked) {
            if *unlocked || !def.rule.is_met(milestones) {
                continue;
            }
            *unlocked = true;
            self.galaxy_points += def.points;
            newly_unlocked.push(def.id);
        }
        newly_unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_new_tracker_is_all_locked() {
        let tracker = AchievementTracker::new();
        let achievements = tracker.achievements();
        assert_eq!(achievements.len(), ACHIEVEMENT_COUNT);
        assert!(achievements.iter().all(|a| !a.unlocked));
        assert_eq!(tracker.galaxy_points(), 0);
    }

    #[test]
    fn test_evaluate_each_rule() {
        let cases = [
            (
                Milestones {
                    score: 1000,
                    ..Milestones::default()
                },
                "score-1000",
            ),
            (
                Milestones {
                    level: 5,
                    ..Milestones::default()
                },
                "level-5",
            ),
            (
                Milestones {
                    total_lines_cleared: 50,
                    ..Milestones::default()
                },
                "lines-50",
            ),
            (
                Milestones {
                    total_hard_drops: 50,
                    ..Milestones::default()
                },
                "hard-drops-50",
            ),
            (
                Milestones {
                    tetris_count: 5,
                    ..Milestones::default()
                },
                TETRIS_ACHIEVEMENT_ID,
            ),
        ];
        for (milestones, id) in cases {
            let mut tracker = AchievementTracker::new();
            assert_eq!(tracker.evaluate(&milestones).as_slice(), [id]);
        }
    }

    #[test]
    fn test_thresholds_are_inclusive_and_exact() {
        let mut tracker = AchievementTracker::new();
        let unlocked = tracker.evaluate(&Milestones {
            score: 999,
            level: 4,
            total_lines_cleared: 49,
            total_hard_drops: 49,
            tetris_count: 4,
        });
        assert!(unlocked.is_empty());
        assert_eq!(tracker.galaxy_points(), 0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut tracker = AchievementTracker::new();
        let milestones = Milestones {
            score: 12_000,
            level: 10,
            ..Milestones::default()
        };
        let first = tracker.evaluate(&milestones);
        assert_eq!(
            first.as_slice(),
            ["score-1000", "level-5", "level-10", "score-10000"]
        );
        assert_eq!(tracker.galaxy_points(), 10 + 20 + 50 + 100);

        assert!(tracker.evaluate(&milestones).is_empty());
        assert_eq!(tracker.galaxy_points(), 180);
    }

    #[test]
    fn test_unlocked_is_monotonic() {
        let mut tracker = AchievementTracker::new();
        tracker.evaluate(&Milestones {
            level: 5,
            ..Milestones::default()
        });
        tracker.evaluate(&Milestones::default());
        assert!(tracker.is_unlocked("level-5"));
    }

    #[test]
    fn test_restore_by_id() {
        let mut stored = AchievementTracker::new().achievements();
        stored[1].unlocked = true;
        stored[1].name = "renamed".to_owned();
        stored.push(Achievement {
            id: "unknown".to_owned(),
            name: String::new(),
            description: String::new(),
            points: 1,
            unlocked: true,
            icon: String::new(),
        });
        let tracker = AchievementTracker::restore(&stored, 20);
        assert!(tracker.is_unlocked("level-5"));
        assert!(!tracker.is_unlocked("score-1000"));
        assert!(!tracker.is_unlocked("unknown"));
        assert_eq!(tracker.achievements()[1].name, "Orbit Reached");
        assert_eq!(tracker.galaxy_points(), 20);
    }

    #[test]
    fn test_achievement_json_shape() {
        let json = serde_json::to_value(&AchievementTracker::new().achievements()[0]).unwrap();
        assert_eq!(json["id"], "score-1000");
        assert_eq!(json["points"], 10);
        assert_eq!(json["unlocked"], false);
        assert!(json.get("icon").is_some());
    }
}
