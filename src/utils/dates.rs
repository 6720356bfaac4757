use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::{EduDeskError, Result};

/// 当前 UTC 日期
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// 所在月份的第一天
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 解析账单月份
///
/// 支持 `YYYY-MM-DD`、`YYYY-MM` 与 RFC3339 时间戳，结果归一到当月第一天。
pub fn parse_target_month(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(month_start(date));
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d") {
        return Ok(month_start(date));
    }

    chrono::DateTime::parse_from_rfc3339(input)
        .map(|dt| month_start(dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| {
            EduDeskError::date_parse(format!(
                "Invalid targetMonth '{input}', expected YYYY-MM-DD, YYYY-MM or RFC3339"
            ))
        })
}

/// 某月的缴费截止日（due_day 限定在 1-28）
pub fn due_date_for_month(payment_month: NaiveDate, due_day: u32) -> NaiveDate {
    let month = month_start(payment_month);
    month.with_day(due_day.clamp(1, 28)).unwrap_or(month)
}

/// 某个 UTC 日的时间戳区间 [start, end)
pub fn day_bounds_utc(date: NaiveDate) -> (i64, i64) {
    let start = Utc
        .from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .timestamp();
    (start, start + 86_400)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_parse_target_month_formats() {
        let march = date(2025, 3, 1);
        assert_eq!(parse_target_month("2025-03-01").ok(), Some(march));
        assert_eq!(parse_target_month("2025-03-17").ok(), Some(march));
        assert_eq!(parse_target_month("2025-03").ok(), Some(march));
        assert_eq!(parse_target_month("2025-03-15T10:00:00Z").ok(), Some(march));
    }

    #[test]
    fn test_parse_target_month_rejects_garbage() {
        assert!(parse_target_month("03/2025").is_err());
        assert!(parse_target_month("").is_err());
        assert!(parse_target_month("2025-13").is_err());
    }

    #[test]
    fn test_due_date_for_month() {
        assert_eq!(due_date_for_month(date(2025, 2, 14), 5), date(2025, 2, 5));
        assert_eq!(due_date_for_month(date(2025, 2, 1), 31), date(2025, 2, 28));
        assert_eq!(due_date_for_month(date(2025, 2, 1), 0), date(2025, 2, 1));
    }

    #[test]
    fn test_day_bounds_utc() {
        let (start, end) = day_bounds_utc(date(1970, 1, 2));
        assert_eq!(start, 86_400);
        assert_eq!(end, 172_800);
    }
}
