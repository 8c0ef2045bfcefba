//! Progress engine: experience points, levels, streaks and badges.
//!
//! Every operation here is a pure function of a [`ProgressState`] snapshot and
//! an activity payload. Loading the snapshot, serializing concurrent updates
//! for the same user and persisting the result are the caller's job; the
//! engine never touches storage.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// XP awarded for a daily check-in.
pub const CHECK_IN_XP: i64 = 10;

/// XP awarded for a journal entry.
pub const JOURNAL_ENTRY_XP: i64 = 15;

/// XP needed per level: reaching `XP_PER_LEVEL * level` advances `level`.
pub const XP_PER_LEVEL: i64 = 100;

/// Reward used when a lesson is created without an explicit one.
pub const DEFAULT_LESSON_XP_REWARD: i32 = 50;

/// Streak length that earns the streak badge.
pub const STREAK_BADGE_DAYS: i32 = 7;

/// XP total that earns the XP badge.
pub const XP_BADGE_THRESHOLD: i64 = 100;

/// Streak policy names accepted in configuration.
pub const STREAK_UNCONDITIONAL: &str = "unconditional";
pub const STREAK_CONSECUTIVE_DAYS: &str = "consecutive_days";

/// All valid streak policy names.
pub const VALID_STREAK_POLICIES: &[&str] = &[STREAK_UNCONDITIONAL, STREAK_CONSECUTIVE_DAYS];

/// Level advancement names accepted in configuration.
pub const LEVEL_LOOPED: &str = "looped";
pub const LEVEL_SINGLE_STEP: &str = "single_step";

/// All valid level advancement names.
pub const VALID_LEVEL_ADVANCES: &[&str] = &[LEVEL_LOOPED, LEVEL_SINGLE_STEP];

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The gamified counters stored on a user row.
///
/// Invariants: `xp >= 0`, `level >= 1`, `streak >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
}

impl ProgressState {
    /// State of a freshly created account.
    pub const INITIAL: Self = Self {
        xp: 0,
        level: 1,
        streak: 0,
    };

    /// XP total at which the current level is left behind.
    pub fn next_level_xp(&self) -> i64 {
        level_threshold(self.level)
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::INITIAL
    }
}

fn level_threshold(level: i32) -> i64 {
    XP_PER_LEVEL * i64::from(level)
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// How a check-in moves the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreakPolicy {
    /// Every check-in adds one, regardless of the gap since the last one.
    #[default]
    Unconditional,
    /// Calendar-day (UTC) streak: a second check-in on the same day keeps
    /// the streak, the next day extends it, any longer gap resets it to 1.
    ConsecutiveDays,
}

impl StreakPolicy {
    /// Parse a configuration value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STREAK_UNCONDITIONAL => Ok(Self::Unconditional),
            STREAK_CONSECUTIVE_DAYS => Ok(Self::ConsecutiveDays),
            _ => Err(format!(
                "Invalid streak policy '{s}'. Must be one of: {}",
                VALID_STREAK_POLICIES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconditional => STREAK_UNCONDITIONAL,
            Self::ConsecutiveDays => STREAK_CONSECUTIVE_DAYS,
        }
    }

    /// Compute the streak after a check-in at `now`.
    pub fn next_streak(&self, current: i32, previous: Option<Timestamp>, now: Timestamp) -> i32 {
        match self {
            Self::Unconditional => current.saturating_add(1),
            Self::ConsecutiveDays => {
                let Some(previous) = previous else {
                    return 1;
                };
                let gap_days = (now.date_naive() - previous.date_naive()).num_days();
                match gap_days {
                    i64::MIN..=0 => current.max(1),
                    1 => current.saturating_add(1),
                    _ => 1,
                }
            }
        }
    }
}

/// How many level boundaries a single XP award may cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelAdvance {
    /// Keep advancing while the XP total is past the current threshold.
    #[default]
    Looped,
    /// Advance at most one level per award.
    SingleStep,
}

impl LevelAdvance {
    /// Parse a configuration value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            LEVEL_LOOPED => Ok(Self::Looped),
            LEVEL_SINGLE_STEP => Ok(Self::SingleStep),
            _ => Err(format!(
                "Invalid level advance '{s}'. Must be one of: {}",
                VALID_LEVEL_ADVANCES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Looped => LEVEL_LOOPED,
            Self::SingleStep => LEVEL_SINGLE_STEP,
        }
    }

    /// Level reached with `xp` total, starting from `level`.
    pub fn advance(&self, xp: i64, level: i32) -> i32 {
        let mut level = level.max(1);
        match self {
            Self::SingleStep => {
                if xp >= level_threshold(level) {
                    level = level.saturating_add(1);
                }
            }
            Self::Looped => {
                // First level whose threshold is above `xp`.
                let reached = i32::try_from(xp.max(0) / XP_PER_LEVEL + 1).unwrap_or(i32::MAX);
                level = level.max(reached);
            }
        }
        level
    }
}

/// The pair of policies the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressRules {
    pub streak: StreakPolicy,
    pub level_advance: LevelAdvance,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A daily mood check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub mood: String,
    pub energy: i32,
    pub checked_in_at: Timestamp,
    /// When the user last checked in, if ever. Only read by
    /// [`StreakPolicy::ConsecutiveDays`].
    pub previous_check_in_at: Option<Timestamp>,
}

/// A journal entry. The engine only cares that one was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub content: String,
    pub mood: Option<String>,
    pub entry_type: String,
    pub voice_url: Option<String>,
    pub photo_url: Option<String>,
}

/// A user finishing a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCompletion {
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub xp_reward: i32,
    pub completed_at: Timestamp,
}

/// Any event that moves a user's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    CheckIn(CheckIn),
    JournalEntry(JournalEntry),
    LessonCompletion(LessonCompletion),
}

/// The record produced by a successful lesson completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRecord {
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub completed_at: Timestamp,
}

/// Result of applying an [`ActivityEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ProgressState,
    pub completion: Option<CompletionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("Lesson {lesson_id} has already been completed by user {user_id}")]
    DuplicateCompletion { user_id: DbId, lesson_id: DbId },
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Applies activity events to progress snapshots under a fixed set of rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressEngine {
    rules: ProgressRules,
}

impl ProgressEngine {
    pub fn new(rules: ProgressRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> ProgressRules {
        self.rules
    }

    /// Check-in: +10 XP and a streak update. Level is untouched.
    pub fn apply_check_in(&self, state: ProgressState, check_in: &CheckIn) -> ProgressState {
        ProgressState {
            xp: state.xp.saturating_add(CHECK_IN_XP),
            level: state.level,
            streak: self.rules.streak.next_streak(
                state.streak,
                check_in.previous_check_in_at,
                check_in.checked_in_at,
            ),
        }
    }

    /// Journal entry: +15 XP. Streak and level are untouched.
    pub fn apply_journal_entry(&self, state: ProgressState, _entry: &JournalEntry) -> ProgressState {
        ProgressState {
            xp: state.xp.saturating_add(JOURNAL_ENTRY_XP),
            ..state
        }
    }

    /// Lesson completion: award the lesson's XP and advance the level.
    ///
    /// Fails with [`ProgressError::DuplicateCompletion`] when the user has
    /// already completed the lesson; the state is not modified in that case.
    pub fn apply_lesson_completion(
        &self,
        state: ProgressState,
        completion: &LessonCompletion,
        already_completed: bool,
    ) -> Result<(ProgressState, CompletionRecord), ProgressError> {
        if already_completed {
            return Err(ProgressError::DuplicateCompletion {
                user_id: completion.user_id,
                lesson_id: completion.lesson_id,
            });
        }

        let xp = state
            .xp
            .saturating_add(i64::from(completion.xp_reward.max(0)));
        let level = self.rules.level_advance.advance(xp, state.level);

        let record = CompletionRecord {
            user_id: completion.user_id,
            lesson_id: completion.lesson_id,
            completed_at: completion.completed_at,
        };

        Ok((
            ProgressState {
                xp,
                level,
                streak: state.streak,
            },
            record,
        ))
    }

    /// Dispatch any event. `already_completed` is only consulted for lesson
    /// completions.
    pub fn apply(
        &self,
        state: ProgressState,
        event: &ActivityEvent,
        already_completed: bool,
    ) -> Result<Transition, ProgressError> {
        let transition = match event {
            ActivityEvent::CheckIn(check_in) => Transition {
                state: self.apply_check_in(state, check_in),
                completion: None,
            },
            ActivityEvent::JournalEntry(entry) => Transition {
                state: self.apply_journal_entry(state, entry),
                completion: None,
            },
            ActivityEvent::LessonCompletion(completion) => {
                let (state, record) =
                    self.apply_lesson_completion(state, completion, already_completed)?;
                Transition {
                    state,
                    completion: Some(record),
                }
            }
        };
        Ok(transition)
    }
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// An achievement label derived from current progress. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Badge {
    #[serde(rename = "7-Day Streak")]
    SevenDayStreak,
    #[serde(rename = "Level 1 XP Achiever")]
    XpAchiever,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SevenDayStreak => "7-Day Streak",
            Self::XpAchiever => "Level 1 XP Achiever",
        }
    }
}

struct BadgeRule {
    badge: Badge,
    earned: fn(&ProgressState) -> bool,
}

fn streak_badge_earned(state: &ProgressState) -> bool {
    state.streak >= STREAK_BADGE_DAYS
}

fn xp_badge_earned(state: &ProgressState) -> bool {
    state.xp >= XP_BADGE_THRESHOLD
}

/// Badge rules in output order. New badges are appended here.
const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        badge: Badge::SevenDayStreak,
        earned: streak_badge_earned,
    },
    BadgeRule {
        badge: Badge::XpAchiever,
        earned: xp_badge_earned,
    },
];

/// Badges earned by `state`, in the fixed order of the rule table.
pub fn derive_badges(state: &ProgressState) -> Vec<Badge> {
    BADGE_RULES
        .iter()
        .filter(|rule| (rule.earned)(state))
        .map(|rule| rule.badge)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn state(xp: i64, level: i32, streak: i32) -> ProgressState {
        ProgressState { xp, level, streak }
    }

    fn check_in(previous: Option<Timestamp>, now: Timestamp) -> CheckIn {
        CheckIn {
            mood: "calm".to_string(),
            energy: 3,
            checked_in_at: now,
            previous_check_in_at: previous,
        }
    }

    fn journal() -> JournalEntry {
        JournalEntry {
            content: "Went for a walk.".to_string(),
            mood: Some("happy".to_string()),
            entry_type: "text".to_string(),
            voice_url: None,
            photo_url: None,
        }
    }

    fn completion(lesson_id: DbId, xp_reward: i32) -> LessonCompletion {
        LessonCompletion {
            user_id: 7,
            lesson_id,
            xp_reward,
            completed_at: at(2, 12),
        }
    }

    fn looped() -> ProgressEngine {
        ProgressEngine::default()
    }

    fn single_step() -> ProgressEngine {
        ProgressEngine::new(ProgressRules {
            level_advance: LevelAdvance::SingleStep,
            ..ProgressRules::default()
        })
    }

    fn consecutive_days() -> ProgressEngine {
        ProgressEngine::new(ProgressRules {
            streak: StreakPolicy::ConsecutiveDays,
            ..ProgressRules::default()
        })
    }

    // -- Check-in -------------------------------------------------------------

    #[test]
    fn check_in_awards_xp_and_streak_without_touching_level() {
        for start in [state(0, 1, 0), state(95, 1, 3), state(420, 4, 30)] {
            let next = looped().apply_check_in(start, &check_in(None, at(1, 9)));
            assert_eq!(next.xp, start.xp + 10);
            assert_eq!(next.streak, start.streak + 1);
            assert_eq!(next.level, start.level);
        }
    }

    #[test]
    fn check_in_does_not_level_up_even_past_threshold() {
        let next = looped().apply_check_in(state(95, 1, 0), &check_in(None, at(1, 9)));
        assert_eq!(next.xp, 105);
        assert_eq!(next.level, 1);
    }

    #[test]
    fn unconditional_streak_ignores_day_gaps() {
        let next = looped().apply_check_in(state(0, 1, 4), &check_in(Some(at(1, 9)), at(20, 9)));
        assert_eq!(next.streak, 5);
    }

    #[test]
    fn sequential_check_ins_accumulate() {
        let engine = looped();
        let once = engine.apply_check_in(ProgressState::INITIAL, &check_in(None, at(1, 9)));
        let twice = engine.apply_check_in(once, &check_in(Some(at(1, 9)), at(1, 10)));
        assert_eq!(twice.xp, 20);
        assert_eq!(twice.streak, 2);
    }

    // -- Consecutive-days streak ----------------------------------------------

    #[test]
    fn consecutive_days_first_check_in_starts_at_one() {
        let next = consecutive_days().apply_check_in(state(0, 1, 0), &check_in(None, at(1, 9)));
        assert_eq!(next.streak, 1);
    }

    #[test]
    fn consecutive_days_same_day_keeps_streak() {
        let next =
            consecutive_days().apply_check_in(state(30, 1, 3), &check_in(Some(at(5, 8)), at(5, 21)));
        assert_eq!(next.streak, 3);
        assert_eq!(next.xp, 40);
    }

    #[test]
    fn consecutive_days_next_day_extends_streak() {
        let next =
            consecutive_days().apply_check_in(state(30, 1, 3), &check_in(Some(at(5, 23)), at(6, 1)));
        assert_eq!(next.streak, 4);
    }

    #[test]
    fn consecutive_days_gap_resets_streak() {
        let next =
            consecutive_days().apply_check_in(state(30, 1, 3), &check_in(Some(at(5, 9)), at(8, 9)));
        assert_eq!(next.streak, 1);
    }

    // -- Journal --------------------------------------------------------------

    #[test]
    fn journal_entry_awards_fifteen_xp_only() {
        let start = state(40, 2, 6);
        let next = looped().apply_journal_entry(start, &journal());
        assert_eq!(next, state(55, 2, 6));
    }

    // -- Lesson completion ----------------------------------------------------

    #[test]
    fn lesson_completion_crossing_one_threshold() {
        let (next, record) = looped()
            .apply_lesson_completion(state(95, 1, 0), &completion(3, 10), false)
            .unwrap();
        assert_eq!(next.xp, 105);
        assert_eq!(next.level, 2);
        assert_eq!(record.lesson_id, 3);
        assert_eq!(record.user_id, 7);
        assert_eq!(record.completed_at, at(2, 12));
    }

    #[test]
    fn looped_advance_crosses_multiple_thresholds() {
        // 310 is past 100, 200 and 300.
        let (next, _) = looped()
            .apply_lesson_completion(state(290, 1, 0), &completion(3, 20), false)
            .unwrap();
        assert_eq!(next.xp, 310);
        assert_eq!(next.level, 4);
    }

    #[test]
    fn single_step_advance_grants_one_level() {
        let (next, _) = single_step()
            .apply_lesson_completion(state(290, 1, 0), &completion(3, 20), false)
            .unwrap();
        assert_eq!(next.xp, 310);
        assert_eq!(next.level, 2);
    }

    #[test]
    fn looped_advance_stops_below_next_threshold() {
        assert_eq!(LevelAdvance::Looped.advance(250, 1), 3);
        assert_eq!(LevelAdvance::Looped.advance(250, 2), 3);
        assert_eq!(LevelAdvance::Looped.advance(300, 1), 4);
        assert_eq!(LevelAdvance::Looped.advance(199, 1), 2);
        assert_eq!(LevelAdvance::Looped.advance(99, 1), 1);
        assert_eq!(LevelAdvance::Looped.advance(310, 1), 4);
    }

    #[test]
    fn looped_advance_saturates_at_max_level() {
        assert_eq!(LevelAdvance::Looped.advance(i64::MAX, 1), i32::MAX);
        assert_eq!(
            LevelAdvance::Looped.advance(XP_PER_LEVEL * 1_000_000, 1),
            1_000_001
        );
    }

    #[test]
    fn duplicate_completion_is_rejected() {
        let engine = looped();
        let start = state(40, 1, 2);
        let (after_first, _) = engine
            .apply_lesson_completion(start, &completion(9, 50), false)
            .unwrap();
        assert_eq!(after_first.xp, 90);

        let result = engine.apply_lesson_completion(after_first, &completion(9, 50), true);
        assert_matches!(
            result,
            Err(ProgressError::DuplicateCompletion {
                user_id: 7,
                lesson_id: 9
            })
        );
    }

    #[test]
    fn negative_reward_never_reduces_xp() {
        let (next, _) = looped()
            .apply_lesson_completion(state(40, 1, 0), &completion(1, -25), false)
            .unwrap();
        assert_eq!(next.xp, 40);
    }

    // -- Dispatch -------------------------------------------------------------

    #[test]
    fn apply_dispatches_by_event_type() {
        let engine = looped();
        let start = ProgressState::INITIAL;

        let t = engine
            .apply(start, &ActivityEvent::CheckIn(check_in(None, at(1, 9))), false)
            .unwrap();
        assert_eq!(t.state, state(10, 1, 1));
        assert!(t.completion.is_none());

        let t = engine
            .apply(start, &ActivityEvent::JournalEntry(journal()), false)
            .unwrap();
        assert_eq!(t.state, state(15, 1, 0));

        let t = engine
            .apply(start, &ActivityEvent::LessonCompletion(completion(2, 120)), false)
            .unwrap();
        assert_eq!(t.state, state(120, 2, 0));
        assert!(t.completion.is_some());

        let err = engine
            .apply(start, &ActivityEvent::LessonCompletion(completion(2, 120)), true)
            .unwrap_err();
        assert_matches!(err, ProgressError::DuplicateCompletion { .. });
    }

    // -- Badges ---------------------------------------------------------------

    #[test]
    fn badges_are_emitted_in_fixed_order() {
        let s = state(100, 1, 7);
        let expected = vec![Badge::SevenDayStreak, Badge::XpAchiever];
        for _ in 0..3 {
            assert_eq!(derive_badges(&s), expected);
        }
        let labels: Vec<_> = derive_badges(&s).iter().map(Badge::label).collect();
        assert_eq!(labels, ["7-Day Streak", "Level 1 XP Achiever"]);
    }

    #[test]
    fn badges_below_boundary_are_empty() {
        assert!(derive_badges(&state(99, 1, 6)).is_empty());
    }

    #[test]
    fn each_badge_is_independent() {
        assert_eq!(derive_badges(&state(0, 1, 7)), vec![Badge::SevenDayStreak]);
        assert_eq!(derive_badges(&state(100, 2, 0)), vec![Badge::XpAchiever]);
    }

    #[test]
    fn badge_serializes_as_label() {
        let json = serde_json::to_value(derive_badges(&state(100, 1, 7))).unwrap();
        assert_eq!(json, serde_json::json!(["7-Day Streak", "Level 1 XP Achiever"]));
    }

    // -- Policies -------------------------------------------------------------

    #[test]
    fn policy_names_round_trip() {
        for name in VALID_STREAK_POLICIES {
            assert_eq!(StreakPolicy::from_str_value(name).unwrap().as_str(), *name);
        }
        for name in VALID_LEVEL_ADVANCES {
            assert_eq!(LevelAdvance::from_str_value(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn unknown_policy_names_are_rejected() {
        let err = StreakPolicy::from_str_value("weekly").unwrap_err();
        assert!(err.contains("unconditional, consecutive_days"));
        assert!(LevelAdvance::from_str_value("").is_err());
    }

    #[test]
    fn next_level_xp_tracks_level() {
        assert_eq!(ProgressState::INITIAL.next_level_xp(), 100);
        assert_eq!(state(310, 4, 0).next_level_xp(), 400);
    }
}
