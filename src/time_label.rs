//! Short relative-time labels ("3 m ago", "1 d ago").
//!
//! The token table and unit thresholds live in [`RelativeTimeConfig`], which
//! is part of the application config and handed to a
//! [`RelativeTimeFormatter`] at startup. Labels are computed against an
//! explicit `now` so one render pass uses a single reference time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days in 400 Gregorian years over months in 400 years.
const DAYS_PER_400_YEARS: f64 = 146_097.0;
const MONTHS_PER_400_YEARS: f64 = 4_800.0;

/// Shorthand tokens. `%d` is replaced by the unit count, `%s` (in `past` and
/// `future`) by the unit string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeTimeConfig {
    pub seconds: String,
    pub minute: String,
    pub minutes: String,
    pub hour: String,
    pub hours: String,
    pub day: String,
    pub days: String,
    pub week: String,
    pub month: String,
    /// Months are shown as weeks: `n` months render as `n * months_as_weeks`
    /// through the `week` pattern.
    pub months_as_weeks: u32,
    pub year: String,
    pub past: String,
    pub future: String,
    pub thresholds: RelativeTimeThresholds,
}

/// Upper bounds (exclusive unless noted) for switching to the next unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeTimeThresholds {
    /// Inclusive bound for the seconds unit.
    pub seconds: u32,
    pub minutes: u32,
    pub hours: u32,
    pub days: u32,
    /// Weeks are skipped entirely when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks: Option<u32>,
    pub months: u32,
}

impl Default for RelativeTimeThresholds {
    fn default() -> Self {
        Self {
            seconds: 44,
            minutes: 45,
            hours: 22,
            days: 26,
            weeks: None,
            months: 11,
        }
    }
}

impl Default for RelativeTimeConfig {
    fn default() -> Self {
        Self {
            seconds: "%d s".to_string(),
            minute: "1 m".to_string(),
            minutes: "%d m".to_string(),
            hour: "1 h".to_string(),
            hours: "%d h".to_string(),
            day: "1 d".to_string(),
            days: "%d d".to_string(),
            week: "%d w".to_string(),
            month: "4 w".to_string(),
            months_as_weeks: 4,
            year: "%d y".to_string(),
            past: "%s ago".to_string(),
            future: "in %s".to_string(),
            thresholds: RelativeTimeThresholds::default(),
        }
    }
}

/// Formats Unix timestamps relative to a reference time.
#[derive(Debug, Clone, Default)]
pub struct RelativeTimeFormatter {
    config: RelativeTimeConfig,
}

impl RelativeTimeFormatter {
    pub fn new(config: RelativeTimeConfig) -> Self {
        Self { config }
    }

    /// Label for `timestamp` (Unix seconds) as seen from `now`.
    pub fn format(&self, timestamp: i64, now: DateTime<Utc>) -> String {
        let delta = now.timestamp().saturating_sub(timestamp);
        let unit = self.unit_string(delta.unsigned_abs());
        let wrapper = if delta >= 0 {
            &self.config.past
        } else {
            &self.config.future
        };
        wrapper.replace("%s", &unit)
    }

    /// The unit part of a label for an absolute distance in seconds.
    pub fn unit_string(&self, distance_secs: u64) -> String {
        let c = &self.config;
        let t = &c.thresholds;

        let exact_secs = distance_secs as f64;
        let exact_days = exact_secs / 86_400.0;
        let exact_months = exact_days * MONTHS_PER_400_YEARS / DAYS_PER_400_YEARS;

        let seconds = distance_secs;
        let minutes = (exact_secs / 60.0).round() as u64;
        let hours = (exact_secs / 3_600.0).round() as u64;
        let days = exact_days.round() as u64;
        let weeks = (exact_days / 7.0).round() as u64;
        let months = exact_months.round() as u64;
        let years = (exact_months / 12.0).round() as u64;

        if seconds <= u64::from(t.seconds) {
            return fill(&c.seconds, seconds);
        }
        if minutes <= 1 {
            return fill(&c.minute, 1);
        }
        if minutes < u64::from(t.minutes) {
            return fill(&c.minutes, minutes);
        }
        if hours <= 1 {
            return fill(&c.hour, 1);
        }
        if hours < u64::from(t.hours) {
            return fill(&c.hours, hours);
        }
        if days <= 1 {
            return fill(&c.day, 1);
        }
        if days < u64::from(t.days) {
            return fill(&c.days, days);
        }
        if let Some(week_limit) = t.weeks {
            if weeks < u64::from(week_limit) {
                return fill(&c.week, weeks.max(1));
            }
        }
        if months <= 1 {
            return fill(&c.month, 1);
        }
        if months < u64::from(t.months) {
            return fill(&c.week, months * u64::from(c.months_as_weeks));
        }
        fill(&c.year, years.max(1))
    }
}

fn fill(pattern: &str, count: u64) -> String {
    pattern.replace("%d", &count.to_string())
}
