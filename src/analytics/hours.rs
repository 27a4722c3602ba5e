//! Work duration from clock-in / clock-out times.

/// Break deducted from shifts longer than this many minutes.
pub const BREAK_MINUTES: i64 = 60;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse `HH:MM` into minutes since midnight. Out-of-range components are
/// accepted; arithmetic overflow is not.
fn parse_clock(time: &str) -> Option<i64> {
    let mut parts = time.split(':');
    let hour: i64 = parts.next()?.trim().parse().ok()?;
    let minute: i64 = parts.next()?.trim().parse().ok()?;
    hour.checked_mul(60)?.checked_add(minute)
}

/// Hours worked between two `HH:MM` clock times, rounded to one decimal.
///
/// A clock-out earlier than clock-in is taken as the next day. One hour of
/// break is deducted only when the raw span exceeds an hour, so a 61 minute
/// span nets 1 minute. Empty, unparseable or overflowing times yield 0.
pub fn calc_work_hours(clock_in: &str, clock_out: &str) -> f64 {
    if clock_in.is_empty() || clock_out.is_empty() {
        return 0.0;
    }

    let (Some(start), Some(end)) = (parse_clock(clock_in), parse_clock(clock_out)) else {
        return 0.0;
    };
    let Some(mut minutes) = end.checked_sub(start) else {
        return 0.0;
    };

    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    // Components beyond a day can still leave the span negative.
    if minutes < 0 {
        return 0.0;
    }
    let worked = if minutes > BREAK_MINUTES {
        minutes - BREAK_MINUTES
    } else {
        minutes
    };

    minutes_to_hours(worked)
}

/// Convert non-negative minutes to hours at one decimal.
///
/// Rounds half-up on the exact binary value of `minutes / 60.0`, so a
/// minute count landing on `.x5` goes whichever way its `f64` lies:
/// 69 minutes (1.1499..) gives 1.1, 27 minutes (0.4500..01) gives 0.5.
fn minutes_to_hours(minutes: i64) -> f64 {
    let magnitude = u128::from(minutes.unsigned_abs());
    let mut tenths = magnitude * 10 / 60;
    let remainder = magnitude * 10 % 60;

    if remainder > 30 || (remainder == 30 && reaches_midpoint(magnitude as f64 / 60.0, tenths)) {
        tenths += 1;
    }

    tenths as f64 / 10.0
}

/// Whether positive `x` is at or above `(tenths + 0.5) / 10`, compared exactly.
fn reaches_midpoint(x: f64, tenths: u128) -> bool {
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = u128::from(bits & ((1 << 52) - 1)) | (1 << 52);
    // x == mantissa / 2^scale
    let scale = 1075 - exponent;
    if scale <= 0 {
        return true;
    }
    let midpoint = 2 * tenths + 1;
    match midpoint.checked_shl(scale as u32) {
        Some(shifted) if midpoint.leading_zeros() > scale as u32 => mantissa * 20 >= shifted,
        _ => false,
    }
}
