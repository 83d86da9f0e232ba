use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month")
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of next month") - Duration::days(1)
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn from_iso(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()
}

/// Calendar quarter, 1..=4.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// First and last day of the quarter. `quarter` must be 1..=4; anything
/// else is a caller bug, not a recoverable error.
pub fn quarter_range(year: i32, quarter: u32) -> (NaiveDate, NaiveDate) {
    assert!((1..=4).contains(&quarter), "quarter out of range: {quarter}");
    let start_month = (quarter - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, start_month, 1).expect("quarter start");
    let end = end_of_month(
        NaiveDate::from_ymd_opt(year, start_month + 2, 1).expect("quarter third month"),
    );
    (start, end)
}

/// Mon-Fri; holidays are not excluded.
pub fn is_business_day(date: NaiveDate) -> bool {
    date.weekday().number_from_monday() <= 5
}

/// Inclusive on both ends; 0 when `end < start`.
pub fn business_days_between_inclusive(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if is_business_day(day) {
            count += 1;
        }
        day = day.succ_opt().expect("date overflow");
    }
    count
}
