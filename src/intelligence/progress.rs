// ABOUTME: Progress roll-ups over food logs and weight entries for dashboard views
// ABOUTME: Period summaries, remaining-vs-goal, logging streaks, calorie series, weight projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Progress Roll-ups
//!
//! Pure functions over logs and weight entries. The caller supplies "now"
//! so results are reproducible. Days and times of day are UTC.

use crate::intelligence::aggregation::sum_log_totals;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Timelike, Utc};
use macrolens_core::errors::AppError;
use macrolens_core::models::{DailyGoals, FoodLog, MealType, NutrientProfile, WeightEntry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Trends flatter than this (kg/day) produce no projection
const MIN_TREND_KG_PER_DAY: f64 = 0.001;

const SECONDS_PER_DAY: f64 = 86_400.0;

const MINUTES_PER_HOUR: u64 = 60;

/// Streak lengths (days) and log count that unlock achievements
const SHORT_STREAK_DAYS: u32 = 7;
const LONG_STREAK_DAYS: u32 = 30;
const LOG_COUNT_MILESTONE: usize = 100;

/// History view period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPeriod {
    /// Today only
    Today,
    /// Last 7 days including today
    #[default]
    Week,
    /// Last 15 days including today
    Last15,
    /// Last 30 days including today
    Month,
    /// Every log
    All,
}

impl ProgressPeriod {
    /// Length in days, `None` for all time
    #[must_use]
    pub const fn days(self) -> Option<u32> {
        match self {
            Self::Today => Some(1),
            Self::Week => Some(7),
            Self::Last15 => Some(15),
            Self::Month => Some(30),
            Self::All => None,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Last15 => "last15",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Display name, e.g. "This Week"
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Last15 => "Last 15 Days",
            Self::Month => "This Month",
            Self::All => "All Time",
        }
    }

    /// Start of the range: midnight today minus `days - 1`, `None` for all time
    #[must_use]
    pub fn range_start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = self.days()?;
        let first_day = now
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))?;
        Some(first_day.and_time(NaiveTime::MIN).and_utc())
    }

    /// Whether a timestamp falls inside the period ending at `now`
    #[must_use]
    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.range_start(now)
            .is_none_or(|start| at >= start && at <= now)
    }
}

impl fmt::Display for ProgressPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "last15" => Ok(Self::Last15),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(AppError::invalid_input(format!("Unknown period '{other}'"))),
        }
    }
}

/// Share of macro grams, in whole percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroPercentages {
    /// Protein share
    pub protein: u32,
    /// Carbohydrate share
    pub carbs: u32,
    /// Fat share
    pub fat: u32,
}

impl MacroPercentages {
    /// Gram shares of a profile; all zero when there are no macro grams
    #[must_use]
    pub fn of(profile: &NutrientProfile) -> Self {
        let total = profile.protein + profile.carbs + profile.fat;
        if total <= 0.0 {
            return Self::default();
        }
        let pct = |grams: f64| (grams / total * 100.0).round() as u32;
        Self {
            protein: pct(profile.protein),
            carbs: pct(profile.carbs),
            fat: pct(profile.fat),
        }
    }
}

/// Roll-up of logs within one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Period summarized
    pub period: ProgressPeriod,
    /// First instant included, `None` for all time
    pub range_start: Option<DateTime<Utc>>,
    /// Logs inside the period
    pub log_count: usize,
    /// Distinct calendar days with at least one log in the period
    pub logged_days: usize,
    /// Days the log rate is measured against
    pub days_in_range: usize,
    /// Sum of every log in the period
    pub totals: NutrientProfile,
    /// Totals divided by logged days (at least one)
    pub averages: NutrientProfile,
    /// Totals for today, averages otherwise
    pub shown: NutrientProfile,
    /// Logged days as a whole percentage of days in range
    pub log_rate: u32,
    /// Macro gram shares of `shown`
    pub macro_percentages: MacroPercentages,
}

fn logged_days<'a>(logs: impl IntoIterator<Item = &'a FoodLog>) -> BTreeSet<NaiveDate> {
    logs.into_iter().map(|log| log.date.date_naive()).collect()
}

/// Summarize the logs that fall inside `period` as of `now`
#[must_use]
pub fn summarize_period(logs: &[FoodLog], period: ProgressPeriod, now: DateTime<Utc>) -> PeriodSummary {
    let in_period: Vec<&FoodLog> = logs
        .iter()
        .filter(|log| period.contains(log.date, now))
        .collect();

    let logged = logged_days(in_period.iter().copied()).len();
    let days_in_range = period
        .days()
        .map_or_else(|| logged_days(logs).len(), |days| days as usize)
        .max(1);

    let totals = sum_log_totals(in_period.iter().copied());
    let divisor = logged.max(1) as f64;
    let averages = totals.map_values(|value| value / divisor);
    let shown = if period == ProgressPeriod::Today {
        totals.clone()
    } else {
        averages.clone()
    };

    PeriodSummary {
        period,
        range_start: period.range_start(now),
        log_count: in_period.len(),
        logged_days: logged,
        days_in_range,
        log_rate: (logged as f64 / days_in_range as f64 * 100.0).round() as u32,
        macro_percentages: MacroPercentages::of(&shown),
        totals,
        averages,
        shown,
    }
}

/// Progress of one nutrient against its daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Daily goal
    pub goal: u32,
    /// Amount consumed
    pub consumed: f64,
    /// `max(0, goal - consumed)`
    pub remaining: f64,
    /// `consumed / max(goal, 1)`, clamped to [0, 1]
    pub progress: f64,
}

impl GoalProgress {
    /// Compare a consumed amount with a goal
    #[must_use]
    pub fn new(goal: u32, consumed: f64) -> Self {
        let goal_f = f64::from(goal);
        Self {
            goal,
            consumed,
            remaining: (goal_f - consumed).max(0.0),
            progress: (consumed / goal_f.max(1.0)).clamp(0.0, 1.0),
        }
    }
}

/// Remaining calories and macros for the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingAgainstGoals {
    /// Calories (kcal)
    pub calories: GoalProgress,
    /// Protein (g)
    pub protein: GoalProgress,
    /// Carbohydrates (g)
    pub carbs: GoalProgress,
    /// Fat (g)
    pub fat: GoalProgress,
}

/// Compare consumed nutrients with daily goals
#[must_use]
pub fn remaining_against_goals(consumed: &NutrientProfile, goals: &DailyGoals) -> RemainingAgainstGoals {
    RemainingAgainstGoals {
        calories: GoalProgress::new(goals.calories, consumed.calories),
        protein: GoalProgress::new(goals.protein, consumed.protein),
        carbs: GoalProgress::new(goals.carbs, consumed.carbs),
        fat: GoalProgress::new(goals.fat, consumed.fat),
    }
}

/// Consecutive-day logging streaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Consecutive logged days ending today (0 when today has no log)
    pub current: u32,
    /// Longest run of consecutive logged days ever
    pub best: u32,
}

/// Current and best logging streaks
#[must_use]
pub fn logging_streaks(logs: &[FoodLog], today: NaiveDate) -> Streaks {
    let days = logged_days(logs);

    let mut current = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor.filter(|day| days.contains(day)) {
        current += 1;
        cursor = day.pred_opt();
    }

    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in &days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(*day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(*day);
    }

    Streaks { current, best }
}

/// Calories logged on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCalories {
    /// Calendar day
    pub date: NaiveDate,
    /// Total calories logged that day
    pub calories: f64,
}

/// Calorie totals for the `days` days ending `today`, oldest first
#[must_use]
pub fn daily_calorie_series(logs: &[FoodLog], today: NaiveDate, days: u32) -> Vec<DailyCalories> {
    let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
    for log in logs {
        *per_day.entry(log.date.date_naive()).or_insert(0.0) += log.total_nutrition().calories;
    }

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| DailyCalories {
            date,
            calories: per_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Most frequently logged food names (trimmed, lower-cased) with counts
#[must_use]
pub fn top_foods(logs: &[FoodLog], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for food in logs.iter().flat_map(FoodLog::foods) {
        let name = food.name.trim();
        if !name.is_empty() {
            *counts.entry(name.to_lowercase()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Average logging time for one meal slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTimeAverage {
    /// Meal slot
    pub meal: MealType,
    /// Mean time of day to the minute, `None` when the slot has no logs
    pub average_time: Option<NaiveTime>,
    /// 12-hour clock text such as "7:05 AM", "-" when the slot has no logs
    pub label: String,
}

/// Mean logging time of each meal slot for logs inside `period`
///
/// Slots come back in day order (breakfast, lunch, dinner, snack). The mean
/// is taken over minutes after midnight and rounded to a whole minute.
#[must_use]
pub fn meal_time_averages(
    logs: &[FoodLog],
    period: ProgressPeriod,
    now: DateTime<Utc>,
) -> Vec<MealTimeAverage> {
    MealType::ALL
        .into_iter()
        .map(|meal| {
            let minutes: Vec<u64> = logs
                .iter()
                .filter(|log| log.meal_type == meal && period.contains(log.date, now))
                .map(|log| {
                    let time = log.date.time();
                    u64::from(time.hour()) * MINUTES_PER_HOUR + u64::from(time.minute())
                })
                .collect();

            let average_time = if minutes.is_empty() {
                None
            } else {
                let mean = minutes.iter().sum::<u64>() as f64 / minutes.len() as f64;
                let rounded = mean.round() as u64;
                NaiveTime::from_hms_opt(
                    (rounded / MINUTES_PER_HOUR) as u32,
                    (rounded % MINUTES_PER_HOUR) as u32,
                    0,
                )
            };

            MealTimeAverage {
                meal,
                label: average_time
                    .map_or_else(|| "-".to_owned(), |time| time.format("%-I:%M %p").to_string()),
                average_time,
            }
        })
        .collect()
}

/// Linear projection toward the target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProjection {
    /// Trend between first and last entry (kg/day)
    pub trend_kg_per_day: f64,
    /// Whole days until the target at the current trend
    pub days_to_goal: u32,
    /// Calendar day the target is reached
    pub projected_date: NaiveDate,
}

/// Weight-goal progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProgress {
    /// Starting weight (onboarding value, else earliest entry)
    pub start_kg: f64,
    /// Latest weight
    pub current_kg: f64,
    /// Target weight
    pub target_kg: f64,
    /// `current - start`
    pub change_kg: f64,
    /// `|target - current|`
    pub remaining_kg: f64,
    /// `|change| / |target - start|`, 0 when start equals target
    pub goal_progress: f64,
    /// Whether the change has covered the whole start-to-target distance
    pub goal_reached: bool,
    /// Projection, when the trend is meaningful and points at the target
    pub projection: Option<WeightProjection>,
}

/// Weight progress toward a target
///
/// Returns `None` when there is neither a start weight nor any entry.
/// Without a target, the start weight is used as the target.
#[must_use]
pub fn weight_progress(
    entries: &[WeightEntry],
    start_weight: Option<f64>,
    target_weight: Option<f64>,
    now: DateTime<Utc>,
) -> Option<WeightProgress> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.date);

    let start_kg = start_weight.or_else(|| sorted.first().map(|entry| entry.weight_kg))?;
    let current_kg = sorted.last().map_or(start_kg, |entry| entry.weight_kg);
    let target_kg = target_weight.unwrap_or(start_kg);

    let change_kg = current_kg - start_kg;
    let goal_diff = (target_kg - start_kg).abs();
    let goal_progress = if goal_diff == 0.0 {
        0.0
    } else {
        change_kg.abs() / goal_diff
    };

    Some(WeightProgress {
        start_kg,
        current_kg,
        target_kg,
        change_kg,
        remaining_kg: (target_kg - current_kg).abs(),
        goal_progress,
        goal_reached: goal_diff > 0.0 && change_kg.abs() >= goal_diff,
        projection: project_weight(&sorted, current_kg, target_kg, now),
    })
}

fn project_weight(
    sorted: &[&WeightEntry],
    current_kg: f64,
    target_kg: f64,
    now: DateTime<Utc>,
) -> Option<WeightProjection> {
    let (first, last) = match sorted {
        [first, .., last] => (first, last),
        _ => return None,
    };
    let needed = target_kg - current_kg;
    if needed == 0.0 {
        return None;
    }

    let elapsed_days = ((last.date - first.date).num_seconds() as f64 / SECONDS_PER_DAY).max(1.0);
    let trend = (last.weight_kg - first.weight_kg) / elapsed_days;
    if trend.abs() < MIN_TREND_KG_PER_DAY {
        return None;
    }
    let direction_matches = if needed > 0.0 { trend > 0.0 } else { trend < 0.0 };
    if !direction_matches {
        return None;
    }

    let days_to_goal = (needed / trend).abs().ceil() as u32;
    let projected_date = now
        .date_naive()
        .checked_add_days(Days::new(u64::from(days_to_goal)))?;

    Some(WeightProjection {
        trend_kg_per_day: trend,
        days_to_goal,
        projected_date,
    })
}

/// Milestones shown on the progress screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementType {
    /// Best streak of 7 days
    #[serde(rename = "streak_7")]
    Streak7,
    /// Best streak of 30 days
    #[serde(rename = "streak_30")]
    Streak30,
    /// 100 food logs in total
    #[serde(rename = "logs_100")]
    Logs100,
    /// Start-to-target weight distance covered
    #[serde(rename = "weight_goal")]
    WeightGoal,
}

impl AchievementType {
    /// Display title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Streak7 => "7-Day Streak",
            Self::Streak30 => "30-Day Streak",
            Self::Logs100 => "100 Food Logs",
            Self::WeightGoal => "Weight Goal",
        }
    }
}

/// Progress toward one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Which achievement
    #[serde(rename = "type")]
    pub achievement: AchievementType,
    /// Display title
    pub title: String,
    /// Amount needed to unlock
    pub target: f64,
    /// Amount reached so far
    pub current: f64,
    /// Whether the achievement is unlocked
    pub unlocked: bool,
}

impl AchievementProgress {
    fn new(achievement: AchievementType, target: f64, current: f64, unlocked: bool) -> Self {
        Self {
            achievement,
            title: achievement.title().to_owned(),
            target,
            current,
            unlocked,
        }
    }

    /// `current / target`, clamped to [0, 1]
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target).clamp(0.0, 1.0)
    }
}

/// Achievement progress from streaks, the all-time log count and weight progress
///
/// Streak achievements use the best streak. Without weight progress, or when
/// start and target weight are equal, the weight goal has a target of 1 and
/// stays locked.
#[must_use]
pub fn achievements(
    streaks: Streaks,
    total_logs: usize,
    weight: Option<&WeightProgress>,
) -> Vec<AchievementProgress> {
    let best = f64::from(streaks.best);
    let (goal_diff, covered) = weight.map_or((0.0, 0.0), |progress| {
        (
            (progress.target_kg - progress.start_kg).abs(),
            progress.change_kg.abs(),
        )
    });

    vec![
        AchievementProgress::new(
            AchievementType::Streak7,
            f64::from(SHORT_STREAK_DAYS),
            best,
            streaks.best >= SHORT_STREAK_DAYS,
        ),
        AchievementProgress::new(
            AchievementType::Streak30,
            f64::from(LONG_STREAK_DAYS),
            best,
            streaks.best >= LONG_STREAK_DAYS,
        ),
        AchievementProgress::new(
            AchievementType::Logs100,
            LOG_COUNT_MILESTONE as f64,
            total_logs as f64,
            total_logs >= LOG_COUNT_MILESTONE,
        ),
        AchievementProgress::new(
            AchievementType::WeightGoal,
            if goal_diff > 0.0 { goal_diff } else { 1.0 },
            covered,
            goal_diff > 0.0 && covered >= goal_diff,
        ),
    ]
}

/// First locked achievement, else the first one
#[must_use]
pub fn next_achievement(progress: &[AchievementProgress]) -> Option<&AchievementProgress> {
    progress
        .iter()
        .find(|item| !item.unlocked)
        .or_else(|| progress.first())
}

/// Three short sentences describing a period
///
/// Calories and protein come from `summary.shown`: today's totals, or the
/// per-logged-day average for longer periods.
#[must_use]
pub fn period_insights(summary: &PeriodSummary, goals: &DailyGoals, streaks: Streaks) -> Vec<String> {
    let calories = summary.shown.calories.round();
    let headline = if summary.period == ProgressPeriod::Today {
        format!("Today: {calories} calories.")
    } else {
        format!(
            "In {}: {calories} calories.",
            summary.period.label().to_lowercase()
        )
    };

    let protein_goal = f64::from(goals.protein);
    let protein = if summary.shown.protein >= protein_goal {
        "Protein target is on track.".to_owned()
    } else {
        let missing = (protein_goal - summary.shown.protein).round().max(0.0);
        format!("Need {missing}g more protein.")
    };

    vec![
        headline,
        protein,
        format!("Current streak: {} days.", streaks.current),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_range_start() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap();
        assert_eq!(
            ProgressPeriod::Today.range_start(now),
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(
            ProgressPeriod::Week.range_start(now),
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap())
        );
        assert_eq!(ProgressPeriod::All.range_start(now), None);
    }

    #[test]
    fn test_goal_progress_clamps() {
        let over = GoalProgress::new(100, 150.0);
        assert!(over.remaining.abs() < f64::EPSILON);
        assert!((over.progress - 1.0).abs() < f64::EPSILON);

        let zero_goal = GoalProgress::new(0, 10.0);
        assert!((zero_goal.progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_macro_percentages_empty() {
        assert_eq!(MacroPercentages::of(&NutrientProfile::default()), MacroPercentages::default());
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("last15".parse::<ProgressPeriod>().unwrap(), ProgressPeriod::Last15);
        assert!("year".parse::<ProgressPeriod>().is_err());
    }
}
