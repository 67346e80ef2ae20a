//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, Timelike};

/// Wall-clock time of day, local to the server process.
///
/// No date or timezone is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Create a time of day, returning `None` when out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local time of day
    fn time_of_day(&self) -> TimeOfDay;
}

/// System clock implementation (uses the process' local time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> TimeOfDay {
        get_local_time_of_day()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed: TimeOfDay,
}

impl FixedClock {
    /// Create a new fixed clock with the given time of day
    pub fn new(fixed: TimeOfDay) -> Self {
        Self { fixed }
    }
}

impl Clock for FixedClock {
    fn time_of_day(&self) -> TimeOfDay {
        self.fixed
    }
}

/// Get the current local time of day
pub fn get_local_time_of_day() -> TimeOfDay {
    let now = Local::now();
    TimeOfDay {
        hour: now.hour(),
        minute: now.minute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_accepts_valid_range() {
        // テスト項目: 範囲内の時刻が生成できる
        // given (前提条件):

        // when (操作):
        let morning = TimeOfDay::new(0, 0);
        let night = TimeOfDay::new(23, 59);

        // then (期待する結果):
        assert_eq!(morning, Some(TimeOfDay { hour: 0, minute: 0 }));
        assert_eq!(night, Some(TimeOfDay { hour: 23, minute: 59 }));
    }

    #[test]
    fn test_time_of_day_rejects_out_of_range() {
        // テスト項目: 範囲外の時刻は None になる
        // given (前提条件):

        // when (操作):
        let bad_hour = TimeOfDay::new(24, 0);
        let bad_minute = TimeOfDay::new(12, 60);

        // then (期待する結果):
        assert!(bad_hour.is_none());
        assert!(bad_minute.is_none());
    }

    #[test]
    fn test_system_clock_returns_valid_time_of_day() {
        // テスト項目: SystemClock が有効な時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let now = clock.time_of_day();

        // then (期待する結果):
        assert!(now.hour < 24);
        assert!(now.minute < 60);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_time_of_day() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let fixed = TimeOfDay::new(9, 41).unwrap();
        let clock = FixedClock::new(fixed);

        // when (操作):
        let first = clock.time_of_day();
        let second = clock.time_of_day();

        // then (期待する結果):
        assert_eq!(first, fixed);
        assert_eq!(second, fixed);
    }
}
