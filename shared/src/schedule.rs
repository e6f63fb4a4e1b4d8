//! Trading schedule and the exact-minute slot matcher.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;

use crate::models::Direction;

/// Zone every slot time is written in.
pub const MARKET_TZ: Tz = chrono_tz::Asia::Damascus;

const MIDWEEK: &[Weekday] = &[Weekday::Tue, Weekday::Wed, Weekday::Thu];

/// Fixed trading table. Buy slots come first; on a collision the earlier
/// entry wins.
pub const TRADING_SCHEDULE: &[ScheduleSlot] = &[
    ScheduleSlot::new(Direction::Buy, MIDWEEK, 1, 0),
    ScheduleSlot::new(Direction::Buy, MIDWEEK, 15, 0),
    ScheduleSlot::new(Direction::Buy, &[Weekday::Mon, Weekday::Fri], 13, 0),
    ScheduleSlot::new(Direction::Buy, &[Weekday::Sun, Weekday::Sat], 1, 0),
    ScheduleSlot::new(Direction::Buy, &[Weekday::Sat], 16, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Sun, Weekday::Mon], 17, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Mon], 0, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Mon], 7, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Fri], 0, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Fri], 5, 0),
    ScheduleSlot::new(Direction::Sell, &[Weekday::Sat], 21, 0),
    ScheduleSlot::new(Direction::Sell, MIDWEEK, 8, 0),
];

/// One schedule entry: a direction, the weekdays it applies to and the
/// minute it fires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub direction: Direction,
    pub days: &'static [Weekday],
    pub hour: u32,
    pub minute: u32,
}

impl ScheduleSlot {
    pub const fn new(direction: Direction, days: &'static [Weekday], hour: u32, minute: u32) -> Self {
        Self {
            direction,
            days,
            hour,
            minute,
        }
    }

    fn matches(&self, weekday: Weekday, hour: u32, minute: u32) -> bool {
        self.days.contains(&weekday) && self.hour == hour && self.minute == minute
    }

    /// `HH:MM` form of the trigger time.
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Ordered slot table evaluated in a fixed timezone. Pure and stateless, so
/// the polling loop and the status endpoints can both consult it.
#[derive(Debug, Clone)]
pub struct Schedule {
    tz: Tz,
    slots: Vec<ScheduleSlot>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(MARKET_TZ, TRADING_SCHEDULE.to_vec())
    }
}

impl Schedule {
    pub fn new(tz: Tz, slots: Vec<ScheduleSlot>) -> Self {
        Self { tz, slots }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    /// Direction of the first slot whose weekday and `HH:MM` equal `now` in
    /// the schedule's zone. Seconds are ignored; there is no window.
    pub fn match_slot<Z: TimeZone>(&self, now: &DateTime<Z>) -> Option<Direction> {
        let local = self.localize(now);
        let (weekday, hour, minute) = (local.weekday(), local.hour(), local.minute());
        self.slots
            .iter()
            .find(|slot| slot.matches(weekday, hour, minute))
            .map(|slot| slot.direction)
    }

    pub fn localize<Z: TimeZone>(&self, now: &DateTime<Z>) -> DateTime<Tz> {
        now.with_timezone(&self.tz)
    }
}
