use crate::dates;
use crate::store::TrackerData;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PaceSnapshot {
    pub year: i32,
    pub quarter: u32,
    pub target: u32,
    pub in_office_count: u32,
    pub total_business_days: u32,
    pub elapsed_business_days: u32,
    pub remaining_business_days: u32,
    pub expected_by_today: i64,
    pub ahead_behind: i64,
    pub needed_to_hit_target: u32,
    pub needed_per_business_day: f64,
}

/// Linear pace over business days: by today's point in the quarter the
/// expectation is `target * elapsed / total`, rounded.
pub fn snapshot(data: &TrackerData, year: i32, quarter: u32, today: NaiveDate) -> PaceSnapshot {
    let (q_start, q_end) = dates::quarter_range(year, quarter);
    let q_start_iso = dates::to_iso(q_start);
    let q_end_iso = dates::to_iso(q_end);

    let in_office_count = data.in_office_count(&q_start_iso, &q_end_iso);
    let clamp_today = today.clamp(q_start, q_end);

    let total = dates::business_days_between_inclusive(q_start, q_end);
    let elapsed = dates::business_days_between_inclusive(q_start, clamp_today);
    let remaining = total.saturating_sub(elapsed);

    let target = data.target_per_quarter;
    let expected_by_today = if total == 0 {
        0
    } else {
        (f64::from(target) * f64::from(elapsed) / f64::from(total)).round() as i64
    };
    let ahead_behind = i64::from(in_office_count) - expected_by_today;
    let needed_to_hit_target = target.saturating_sub(in_office_count);
    let needed_per_business_day = if remaining > 0 {
        f64::from(needed_to_hit_target) / f64::from(remaining)
    } else {
        f64::from(needed_to_hit_target)
    };

    PaceSnapshot {
        year,
        quarter,
        target,
        in_office_count,
        total_business_days: total,
        elapsed_business_days: elapsed,
        remaining_business_days: remaining,
        expected_by_today,
        ahead_behind,
        needed_to_hit_target,
        needed_per_business_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DayStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn behind_by_one_mid_quarter() {
        // Q3 2026 spans Jul 1 - Sep 30: 66 business days total. Pin today
        // so that 30 have elapsed, then check round(24 * 30 / 66).
        let mut data = TrackerData::default();
        for day in 1..=10 {
            data.set_status(&format!("2026-07-{day:02}"), Some(DayStatus::In));
        }

        let snap = snapshot(&data, 2026, 3, date(2026, 8, 11));
        assert_eq!(snap.total_business_days, 66);
        assert_eq!(snap.elapsed_business_days, 30);
        assert_eq!(snap.in_office_count, 10);
        assert_eq!(snap.expected_by_today, 11);
        assert_eq!(snap.ahead_behind, -1);
        assert_eq!(snap.remaining_business_days, 36);
        assert_eq!(snap.needed_to_hit_target, 14);
    }

    #[test]
    fn expected_equals_target_when_quarter_fully_elapsed() {
        let data = TrackerData::default();
        let snap = snapshot(&data, 2026, 1, date(2026, 3, 31));
        assert_eq!(snap.elapsed_business_days, snap.total_business_days);
        assert_eq!(snap.expected_by_today, i64::from(snap.target));
    }

    #[test]
    fn today_before_quarter_clamps_to_start() {
        let data = TrackerData::default();
        // Q4 2026 starts on Thursday Oct 1; a September "today" clamps there.
        let snap = snapshot(&data, 2026, 4, date(2026, 9, 1));
        assert_eq!(snap.elapsed_business_days, 1);
    }

    #[test]
    fn today_after_quarter_clamps_to_end() {
        let data = TrackerData::default();
        let snap = snapshot(&data, 2026, 1, date(2026, 7, 15));
        assert_eq!(snap.elapsed_business_days, snap.total_business_days);
        assert_eq!(snap.remaining_business_days, 0);
    }

    #[test]
    fn empty_state_counts_zero_in_office() {
        let data = TrackerData::default();
        for quarter in 1..=4 {
            let snap = snapshot(&data, 2026, quarter, date(2026, 8, 6));
            assert_eq!(snap.in_office_count, 0);
        }
    }

    #[test]
    fn needed_per_day_is_fractional() {
        let mut data = TrackerData::default();
        data.set_target(24);
        let snap = snapshot(&data, 2026, 3, date(2026, 8, 11));
        assert!((snap.needed_per_business_day - 14.0 / 36.0).abs() < 1e-9);
    }

    #[test]
    fn needed_per_day_falls_back_to_needed_when_no_days_remain() {
        let mut data = TrackerData::default();
        data.set_status("2026-01-05", Some(DayStatus::In));
        let snap = snapshot(&data, 2026, 1, date(2026, 3, 31));
        assert_eq!(snap.remaining_business_days, 0);
        assert!((snap.needed_per_business_day - f64::from(snap.needed_to_hit_target)).abs() < 1e-9);
    }
}
