//! Calendar/clock conversions shared by the temporal structure types
//! (`Date`, `LocalTime`, `LocalDateTime`, `Duration`, zone offsets) and
//! their ISO-8601 string forms.
//!
//! The epoch-day and epoch-second algorithms follow the same
//! proleptic-Gregorian arithmetic `java.time`/JSR-310 uses (and which
//! the reference driver's temporal module is itself a port of): dates
//! are folded into 400-year cycles, which is why two of the
//! intermediate products (`year * 400`, `zeroDay * 400`) need more
//! than 64 bits of headroom and go through [`BigInt::mul_wide`].

use super::bigint::BigInt;

pub const DAYS_0000_TO_1970: i64 = 719_528;
pub const DAYS_PER_400_YEAR_CYCLE: i64 = 146_097;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * 24;
const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDateTime {
    pub date: Date,
    pub time: LocalTime,
}

pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0) && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month out of range: {month}"),
    }
}

/// Converts nanosecond-of-day back to hour/minute/second/nanosecond.
pub fn nano_of_day_to_local_time(nano_of_day: i64) -> LocalTime {
    let nano = BigInt::new(nano_of_day);
    let second_of_day = nano.floor_div(BigInt::new(NANOS_PER_SECOND)).value();
    let nanosecond = nano.floor_mod(BigInt::new(NANOS_PER_SECOND)).value();

    let hour = second_of_day / SECONDS_PER_HOUR;
    let minute = (second_of_day / SECONDS_PER_MINUTE) % SECONDS_PER_MINUTE;
    let second = second_of_day % SECONDS_PER_MINUTE;

    LocalTime {
        hour: hour as u32,
        minute: minute as u32,
        second: second as u32,
        nanosecond: nanosecond as u32,
    }
}

/// Converts hour/minute/second/nanosecond to nanosecond-of-day.
pub fn local_time_to_nano_of_day(time: LocalTime) -> i64 {
    let second_of_day = time.hour as i64 * SECONDS_PER_HOUR
        + time.minute as i64 * SECONDS_PER_MINUTE
        + time.second as i64;
    second_of_day
        .wrapping_mul(NANOS_PER_SECOND)
        .wrapping_add(time.nanosecond as i64)
}

/// Days since the Unix epoch (1970-01-01), proleptic Gregorian,
/// following the 400/100/4-year cycle folding `java.time.LocalDate`
/// uses internally.
pub fn date_to_epoch_day(date: Date) -> i64 {
    let year = date.year;
    let month = date.month as i64;
    let day = date.day as i64;

    let mut total: i64 = 365 * year;
    if year >= 0 {
        total += (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400;
    } else {
        total -= year / -4 - year / -100 + year / -400;
    }

    total += (367 * month - 362) / 12;
    total += day - 1;

    if month > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }

    total - DAYS_0000_TO_1970
}

/// Converts an epoch day back to a proleptic-Gregorian calendar date.
pub fn epoch_day_to_date(epoch_day: i64) -> Date {
    let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0i128;

    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_400_YEAR_CYCLE - 1;
        adjust = adjust_cycles as i128 * 400;
        zero_day += -adjust_cycles * DAYS_PER_400_YEAR_CYCLE;
    }

    let mut year_est = (400 * zero_day as i128 + 591) / DAYS_PER_400_YEAR_CYCLE as i128;
    let mut day_est = zero_day as i128
        - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    if day_est < 0 {
        year_est -= 1;
        day_est = zero_day as i128
            - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    }
    year_est += adjust;
    let march_doy0 = day_est as i64;

    let march_month0 = (march_doy0 * 5 + 2) / 153;
    let month = ((march_month0 + 2) % 12 + 1) as u32;
    let day = (march_doy0 - (march_month0 * 306 + 5) / 10 + 1) as u32;
    year_est += (march_month0 / 10) as i128;

    Date {
        year: year_est as i64,
        month,
        day,
    }
}

/// Seconds since the Unix epoch for a given local date-time, ignoring
/// any offset/zone (Bolt's `LocalDateTime` is zone-naive by design).
pub fn local_date_time_to_epoch_second(dt: LocalDateTime) -> i64 {
    let epoch_day = date_to_epoch_day(dt.date);
    epoch_day
        .wrapping_mul(SECONDS_PER_DAY)
        .wrapping_add(dt.time.hour as i64 * SECONDS_PER_HOUR)
        .wrapping_add(dt.time.minute as i64 * SECONDS_PER_MINUTE)
        .wrapping_add(dt.time.second as i64)
}

/// Recomposes a local date-time from epoch-second and a nanosecond
/// remainder, handling negative seconds (days before 1970) correctly
/// via floor division/modulo rather than truncating toward zero.
pub fn epoch_second_and_nano_to_local_date_time(epoch_second: i64, nano: u32) -> LocalDateTime {
    let sec = BigInt::new(epoch_second);
    let epoch_day = sec.floor_div(BigInt::new(SECONDS_PER_DAY)).value();
    let second_of_day = sec.floor_mod(BigInt::new(SECONDS_PER_DAY)).value();

    let date = epoch_day_to_date(epoch_day);
    let time = nano_of_day_to_local_time(second_of_day.wrapping_mul(NANOS_PER_SECOND) + nano as i64);

    LocalDateTime { date, time }
}

fn pad(value: i64, width: usize) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{:0width$}", value.abs(), width = width)
}

/// `PT...S`-style ISO-8601 duration string with months/days folded
/// into their own designators, matching the reference driver's
/// `durationToIsoString(months, days, seconds, nanoseconds)`.
pub fn duration_to_iso_string(months: i64, days: i64, seconds: i64, nanoseconds: u32) -> String {
    let (sign, abs_seconds, abs_nanos) = if seconds < 0 && nanoseconds > 0 {
        (-1, -(seconds + 1), NANOS_PER_SECOND as u32 - nanoseconds)
    } else {
        (if seconds < 0 { -1 } else { 1 }, seconds.abs(), nanoseconds)
    };

    let mut result = String::from("P");
    if months != 0 {
        result.push_str(&format!("{months}M"));
    }
    if days != 0 {
        result.push_str(&format!("{days}D"));
    }
    result.push('T');
    if sign < 0 && abs_seconds == 0 {
        result.push('-');
    }
    result.push_str(&format!("{}.{:09}S", sign as i64 * abs_seconds, abs_nanos));
    result
}

/// `HH:MM:SS.NNNNNNNNN` with no zone suffix, matching
/// `timeToIsoString(hour, minute, second, nanosecond)`.
pub fn time_to_iso_string(hour: u32, minute: u32, second: u32, nanosecond: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:09}",
        hour, minute, second, nanosecond
    )
}

/// `YYYY-MM-DD`, zero-padded to at least four year digits and signed
/// for years before 0000, matching `dateToIsoString(year, month, day)`.
pub fn date_to_iso_string(year: i64, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", pad(year, 4), month, day)
}

/// `Z` for a zero offset, otherwise `+HH:MM` / `+HH:MM:SS`, matching
/// `timeZoneOffsetToIsoString(offsetSeconds)`.
pub fn time_zone_offset_to_iso_string(offset_seconds: i64) -> String {
    if offset_seconds == 0 {
        return "Z".to_string();
    }
    let sign = if offset_seconds < 0 { "-" } else { "+" };
    let abs = offset_seconds.abs();
    let hours = abs / SECONDS_PER_HOUR;
    let minutes = (abs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = abs % SECONDS_PER_MINUTE;

    if secs != 0 {
        format!("{sign}{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{sign}{:02}:{:02}", hours, minutes)
    }
}
