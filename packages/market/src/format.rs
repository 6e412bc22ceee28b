//! Display formatting for prices, timestamps and upload sizes.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Insert thousands separators: `1000000` → `"1,000,000"`.
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if price < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Price with the won suffix, as shown on cards and in the detail view.
pub fn format_won(price: i64) -> String {
    format!("{}원", format_price(price))
}

/// Relative label for `created` as seen at `now`.
///
/// Under a minute (including timestamps slightly in the future) is "방금 전",
/// then minutes, hours and days up to a week; older posts show `M.D` in `tz`.
pub fn relative_time<Tz: TimeZone>(created: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String {
    let elapsed = now.signed_duration_since(created);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "방금 전".to_string()
    } else if minutes < 60 {
        format!("{minutes}분 전")
    } else if hours < 24 {
        format!("{hours}시간 전")
    } else if days < 7 {
        format!("{days}일 전")
    } else {
        let local = created.with_timezone(tz);
        format!("{}.{}", local.month(), local.day())
    }
}

/// Byte count as megabytes with two decimals: `"3.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
