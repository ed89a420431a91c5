//! Time-window extraction from question text.
//!
//! Recognises "today", "yesterday" and "last <N> <minute|hour>". Instants are
//! local naive date-times rendered in the same ISO-8601 form the store uses,
//! so string comparison in SQL orders them correctly.

use std::sync::{Arc, LazyLock};

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use regex::Regex;

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of "now" for relative phrases.
pub trait Clock: Send + Sync {
  fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime { Local::now().naive_local() }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime { self.0 }
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

impl TimeWindow {
  pub fn start_text(&self) -> String { format_instant(self.start) }

  pub fn end_text(&self) -> String { format_instant(self.end) }
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS`, with a six-digit fraction only
/// when sub-second precision is present.
pub fn format_instant(dt: NaiveDateTime) -> String {
  let micros = dt.nanosecond() / 1_000;
  if micros == 0 {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
  } else {
    format!("{}.{micros:06}", dt.format("%Y-%m-%dT%H:%M:%S"))
  }
}

// ─── Parser ──────────────────────────────────────────────────────────────────

static LAST_N_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"last (\d+) (minute|hour)").expect("Invalid regex")
});

/// Extracts a [`TimeWindow`] from normalized (lowercased) text.
#[derive(Clone)]
pub struct TimeWindowParser {
  clock: Arc<dyn Clock>,
}

impl Default for TimeWindowParser {
  fn default() -> Self { Self::new(SystemClock) }
}

impl TimeWindowParser {
  pub fn new(clock: impl Clock + 'static) -> Self {
    Self { clock: Arc::new(clock) }
  }

  /// First matching phrase wins: "today", then "yesterday", then
  /// "last N minute(s)/hour(s)".
  pub fn parse(&self, text: &str) -> Option<TimeWindow> {
    let now = self.clock.now();

    if text.contains("today") {
      return Some(TimeWindow { start: now.date().and_time(NaiveTime::MIN), end: now });
    }

    if text.contains("yesterday") {
      let day = now.date().pred_opt()?;
      return Some(TimeWindow {
        start: day.and_time(NaiveTime::MIN),
        end:   day.and_hms_opt(23, 59, 59)?,
      });
    }

    let caps = LAST_N_PATTERN.captures(text)?;
    let n: i64 = caps[1].parse().ok().filter(|n| *n > 0)?;
    let delta = match &caps[2] {
      "minute" => TimeDelta::try_minutes(n)?,
      _ => TimeDelta::try_hours(n)?,
    };
    Some(TimeWindow { start: now.checked_sub_signed(delta)?, end: now })
  }
}

impl std::fmt::Debug for TimeWindowParser {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TimeWindowParser").finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
      .unwrap()
      .and_hms_opt(h, m, s)
      .unwrap()
  }

  fn parser() -> TimeWindowParser { TimeWindowParser::new(FixedClock(at(14, 30, 0))) }

  #[test]
  fn today_spans_midnight_to_now() {
    let w = parser().parse("who was in the lab today").unwrap();
    assert_eq!(w.start, at(0, 0, 0));
    assert_eq!(w.end, at(14, 30, 0));
  }

  #[test]
  fn yesterday_is_the_whole_previous_day() {
    let w = parser().parse("where was alice yesterday").unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    assert_eq!(w.start, day.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(w.end, day.and_hms_opt(23, 59, 59).unwrap());
  }

  #[test]
  fn last_minutes_ends_now() {
    let w = parser().parse("track bob in the last 15 minutes").unwrap();
    assert_eq!(w.end - w.start, TimeDelta::minutes(15));
    assert_eq!(w.end, at(14, 30, 0));
  }

  #[test]
  fn last_hours() {
    let w = parser().parse("low signal last 2 hours").unwrap();
    assert_eq!(w.start, at(12, 30, 0));
  }

  #[test]
  fn today_wins_over_last_n() {
    let w = parser().parse("today, last 5 minutes").unwrap();
    assert_eq!(w.start, at(0, 0, 0));
  }

  #[test]
  fn zero_or_missing_count_is_no_window() {
    assert!(parser().parse("last 0 minutes").is_none());
    assert!(parser().parse("last few hours").is_none());
    assert!(parser().parse("last 3 days").is_none());
    assert!(parser().parse("where is alice").is_none());
  }

  #[test]
  fn yesterday_crosses_month_boundary() {
    let p = TimeWindowParser::new(FixedClock(
      NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
    ));
    let w = p.parse("yesterday").unwrap();
    assert_eq!(w.start_text(), "2024-02-29T00:00:00");
    assert_eq!(w.end_text(), "2024-02-29T23:59:59");
  }

  #[test]
  fn instants_render_like_stored_timestamps() {
    assert_eq!(format_instant(at(8, 5, 3)), "2024-03-15T08:05:03");
    let frac = at(8, 5, 3).with_nanosecond(123_456_000).unwrap();
    assert_eq!(format_instant(frac), "2024-03-15T08:05:03.123456");
  }
}
