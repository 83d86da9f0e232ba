use crate::dates;
use chrono::{Datelike, NaiveDate};

/// Month layout as full weeks of seven cells, Sunday first. Cells outside
/// the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<Vec<Option<NaiveDate>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let last = dates::end_of_month(first);

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    for day in 1..=last.day() {
        cells.push(NaiveDate::from_ymd_opt(year, month, day));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_whole_weeks() {
        for month in 1..=12 {
            let grid = month_grid(2026, month);
            assert!(grid.iter().all(|week| week.len() == 7), "month {month}");
        }
    }

    #[test]
    fn leading_blanks_match_first_weekday() {
        // August 2026 starts on a Saturday: six leading blanks.
        let grid = month_grid(2026, 8);
        let blanks = grid[0].iter().take_while(|cell| cell.is_none()).count();
        assert_eq!(blanks, 6);
        assert_eq!(grid[0][6], NaiveDate::from_ymd_opt(2026, 8, 1));
    }

    #[test]
    fn all_days_present_in_order() {
        let grid = month_grid(2026, 2);
        let days: Vec<u32> = grid
            .iter()
            .flatten()
            .filter_map(|cell| cell.map(|d| d.day()))
            .collect();
        assert_eq!(days, (1..=28).collect::<Vec<_>>());
    }

    #[test]
    fn trailing_blanks_pad_last_week() {
        // November 2026 ends on a Monday: five trailing blanks.
        let grid = month_grid(2026, 11);
        let last_week = grid.last().unwrap();
        assert_eq!(last_week[1], NaiveDate::from_ymd_opt(2026, 11, 30));
        assert!(last_week[2..].iter().all(|cell| cell.is_none()));
    }
}
