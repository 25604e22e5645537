use time::{Date, Month};

/// Days from `today` (exclusive) to the next billing date (inclusive).
///
/// The target is this month's `pay_day` while today's day-of-month is still
/// below it; on or after the pay day it rolls to next month. `pay_day` is
/// clamped to the target month's length, so a day 31 cycle renews on the
/// 30th (or 28th/29th) in shorter months.
pub fn days_until_billing(today: Date, pay_day: u8) -> i64 {
    let (year, month) = if today.day() < pay_day {
        (today.year(), today.month())
    } else {
        match today.month() {
            Month::December => (today.year() + 1, Month::January),
            month => (today.year(), month.next()),
        }
    };

    let day = pay_day.clamp(1, month.length(year));
    let target = Date::from_calendar_date(year, month, day).unwrap_or(today);
    (target - today).whole_days()
}
