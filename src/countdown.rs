//! Event countdown evaluation
//!
//! A schedule is a `[starts_at, ends_at]` window in Unix milliseconds. The
//! display is a pure function of the schedule and the current instant, so the
//! widget simply re-evaluates on every tick.

use crate::error::{FxError, FxResult};

const MS_PER_SECOND: u64 = 1_000;
const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// Label shown while waiting for the event to start
pub const UPCOMING_LABEL: &str = "Faltan";
/// Markup shown while the event is running
pub const LIVE_MARKUP: &str = "<span class=\"live-dot\">🔴</span> ¡El evento está <strong>EN VIVO</strong> ahora!";
/// Label shown once the event is over
pub const ENDED_LABEL: &str = "Evento finalizado. ¡Pronto el siguiente!";

/// Where `now` sits relative to the event window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Event has not started; counting down to the start
    Upcoming,
    /// Event is running; counting down to the end (both bounds inclusive)
    Live,
    /// Event is over; all fields read zero
    Ended,
}

impl Phase {
    /// CSS modifier applied next to the status base class
    pub fn status_class(&self) -> &'static str {
        match self {
            Phase::Upcoming => "",
            Phase::Live => "live",
            Phase::Ended => "past",
        }
    }

    pub fn label(&self) -> StatusLabel {
        match self {
            Phase::Upcoming => StatusLabel::Text(UPCOMING_LABEL),
            Phase::Live => StatusLabel::Markup(LIVE_MARKUP),
            Phase::Ended => StatusLabel::Text(ENDED_LABEL),
        }
    }
}

/// Status region content; only the live phase carries markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Text(&'static str),
    Markup(&'static str),
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Text(s) | StatusLabel::Markup(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, StatusLabel::Markup(_))
    }
}

/// Remaining time broken into calendar-style fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownFields {
    pub days: u64,
    /// Always in `0..24`
    pub hours: u64,
    /// Always in `0..60`
    pub minutes: u64,
    /// Always in `0..60`
    pub seconds: u64,
}

impl CountdownFields {
    /// Decompose a duration in milliseconds (sub-second part is dropped)
    pub fn from_millis(remaining_ms: u64) -> Self {
        let total = remaining_ms / MS_PER_SECOND;
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Whole seconds represented by the fields
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Zero-padded `[days, hours, minutes, seconds]`
    pub fn padded(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

/// Render a field at least two characters wide
#[inline]
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

/// Everything the widget writes on one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub phase: Phase,
    pub fields: CountdownFields,
    pub label: StatusLabel,
}

impl CountdownDisplay {
    pub fn status_class(&self) -> &'static str {
        self.phase.status_class()
    }

    /// Space separated fields, e.g. `"00 02 00 00"`
    pub fn fields_line(&self) -> String {
        self.fields.padded().join(" ")
    }
}

/// A validated event window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    starts_at: i64,
    ends_at: i64,
}

impl EventSchedule {
    /// Build a schedule from Unix milliseconds, rejecting inverted windows
    pub fn from_millis(starts_at: i64, ends_at: i64) -> FxResult<Self> {
        if starts_at > ends_at {
            return Err(FxError::InvertedSchedule { starts_at, ends_at });
        }
        Ok(Self { starts_at, ends_at })
    }

    /// Parse the start/end attribute values
    pub fn parse(start: &str, end: &str) -> FxResult<Self> {
        let starts_at = parse_timestamp("start", start)?;
        let ends_at = parse_timestamp("end", end)?;
        Self::from_millis(starts_at, ends_at)
    }

    pub fn starts_at(&self) -> i64 {
        self.starts_at
    }

    pub fn ends_at(&self) -> i64 {
        self.ends_at
    }

    pub fn phase_at(&self, now: i64) -> Phase {
        if now < self.starts_at {
            Phase::Upcoming
        } else if now <= self.ends_at {
            Phase::Live
        } else {
            Phase::Ended
        }
    }

    /// Milliseconds left in the current phase (zero once ended)
    pub fn remaining_ms(&self, now: i64) -> u64 {
        let target = match self.phase_at(now) {
            Phase::Upcoming => self.starts_at,
            Phase::Live => self.ends_at,
            Phase::Ended => return 0,
        };
        // Phase guarantees target >= now
        target.abs_diff(now)
    }

    pub fn evaluate(&self, now: i64) -> CountdownDisplay {
        let phase = self.phase_at(now);
        CountdownDisplay {
            phase,
            fields: CountdownFields::from_millis(self.remaining_ms(now)),
            label: phase.label(),
        }
    }
}

/// Parse a page timestamp the way the browser's `Date.parse` does
#[cfg(target_arch = "wasm32")]
pub fn parse_timestamp(field: &'static str, value: &str) -> FxResult<i64> {
    let ms = js_sys::Date::parse(value.trim());
    if ms.is_finite() {
        Ok(ms as i64)
    } else {
        Err(FxError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
    }
}

/// Native parsing: RFC 3339, or a naive date/time read as UTC
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_timestamp(field: &'static str, value: &str) -> FxResult<i64> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    if let Some(dt) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt.and_utc().timestamp_millis());
    }
    Err(FxError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOUR: i64 = 3_600_000;
    const NOW: i64 = 1_760_000_000_000;

    fn schedule(start_offset: i64, end_offset: i64) -> EventSchedule {
        EventSchedule::from_millis(NOW + start_offset, NOW + end_offset).unwrap()
    }

    #[test]
    fn test_upcoming_two_hours_out() {
        let display = schedule(2 * HOUR, 4 * HOUR).evaluate(NOW);
        assert_eq!(display.phase, Phase::Upcoming);
        assert_eq!(display.fields_line(), "00 02 00 00");
        assert_eq!(display.label, StatusLabel::Text(UPCOMING_LABEL));
        assert_eq!(display.status_class(), "");
    }

    #[test]
    fn test_live_one_hour_left() {
        let display = schedule(-HOUR, HOUR).evaluate(NOW);
        assert_eq!(display.phase, Phase::Live);
        assert_eq!(display.fields_line(), "00 01 00 00");
        assert!(display.label.is_markup());
        assert!(display.label.as_str().contains("EN VIVO"));
        assert_eq!(display.status_class(), "live");
    }

    #[test]
    fn test_ended_reads_zero() {
        let display = schedule(-3 * HOUR, -HOUR).evaluate(NOW);
        assert_eq!(display.phase, Phase::Ended);
        assert_eq!(display.fields_line(), "00 00 00 00");
        assert_eq!(display.label, StatusLabel::Text(ENDED_LABEL));
        assert_eq!(display.status_class(), "past");
    }

    #[test]
    fn test_boundaries_are_live() {
        let s = schedule(0, HOUR);
        assert_eq!(s.phase_at(NOW - 1), Phase::Upcoming);
        assert_eq!(s.phase_at(NOW), Phase::Live);
        assert_eq!(s.phase_at(NOW + HOUR), Phase::Live);
        assert_eq!(s.phase_at(NOW + HOUR + 1), Phase::Ended);
        // At the very end the live countdown has nothing left
        assert_eq!(s.evaluate(NOW + HOUR).fields, CountdownFields::default());
    }

    #[test]
    fn test_zero_length_event() {
        let s = schedule(0, 0);
        assert_eq!(s.phase_at(NOW), Phase::Live);
        assert_eq!(s.phase_at(NOW + 1), Phase::Ended);
    }

    #[test]
    fn test_decomposition_carries() {
        let ms = (3 * 86_400 + 23 * 3_600 + 59 * 60 + 59) * 1_000 + 999;
        let f = CountdownFields::from_millis(ms);
        assert_eq!((f.days, f.hours, f.minutes, f.seconds), (3, 23, 59, 59));
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(3), "03");
        assert_eq!(pad2(42), "42");
        assert_eq!(pad2(99), "99");
        assert_eq!(pad2(123), "123");
    }

    #[test]
    fn test_inverted_schedule_rejected() {
        let err = EventSchedule::from_millis(NOW, NOW - 1).unwrap_err();
        assert!(matches!(err, FxError::InvertedSchedule { .. }));
    }

    #[test]
    fn test_parse_timestamps() {
        let s = EventSchedule::parse("2025-11-20T18:00:00Z", "2025-11-20T21:30:00+00:00").unwrap();
        assert_eq!(s.ends_at() - s.starts_at(), 3 * HOUR + HOUR / 2);

        let naive = EventSchedule::parse("2025-11-20T18:00", "2025-11-20").unwrap_err();
        assert!(matches!(naive, FxError::InvertedSchedule { .. }));

        let err = EventSchedule::parse("not a date", "2025-11-20").unwrap_err();
        assert!(matches!(err, FxError::InvalidTimestamp { field: "start", .. }));
        let err = EventSchedule::parse("2025-11-20", "").unwrap_err();
        assert!(matches!(err, FxError::InvalidTimestamp { field: "end", .. }));
    }

    proptest! {
        #[test]
        fn prop_fields_bounded_and_lossless(ms in 0u64..10_000_000_000_000) {
            let f = CountdownFields::from_millis(ms);
            prop_assert!(f.hours < 24);
            prop_assert!(f.minutes < 60);
            prop_assert!(f.seconds < 60);
            prop_assert_eq!(f.total_seconds(), ms / 1_000);
        }

        #[test]
        fn prop_padded_width(v in 0u64..100) {
            prop_assert_eq!(pad2(v).len(), 2);
        }

        #[test]
        fn prop_exactly_one_phase(
            start in -1_000_000_000i64..1_000_000_000,
            len in 0i64..1_000_000_000,
            now in -2_000_000_000i64..2_000_000_000,
        ) {
            let s = EventSchedule::from_millis(start, start + len).unwrap();
            let expected = if now < start {
                Phase::Upcoming
            } else if now <= start + len {
                Phase::Live
            } else {
                Phase::Ended
            };
            prop_assert_eq!(s.phase_at(now), expected);
        }

        #[test]
        fn prop_ended_is_frozen(past in 1i64..1_000_000_000_000) {
            let s = EventSchedule::from_millis(NOW - HOUR, NOW).unwrap();
            let d = s.evaluate(NOW + past);
            prop_assert_eq!(d.fields_line(), "00 00 00 00");
        }
    }
}
