//! Calendar domain logic for the trainer home view.
//!
//! Builds the fixed six-week month grid the schedule is laid out on and keeps
//! the month the trainer is currently looking at. Grids are pure values: they
//! know nothing about schedule data and are rebuilt on every navigation.

use crate::domain::weekday::WeekdayCode;
use chrono::{Datelike, Days, Months, NaiveDate};
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};

/// Six full weeks, so the grid never changes height between months
pub const GRID_CELLS: usize = 42;

/// A single cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: WeekdayCode,
    /// Whether the date falls inside the month being displayed
    pub is_current_month: bool,
    pub is_today: bool,
}

/// A month laid out Monday-first over exactly [`GRID_CELLS`] days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub days: [CalendarDay; GRID_CELLS],
}

impl CalendarGrid {
    /// Rows of seven days, Monday to Sunday
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }
}

/// Calendar service that handles month grids and month navigation
#[derive(Clone)]
pub struct CalendarService {
    /// First day of the month currently in focus
    focus_month: Arc<Mutex<NaiveDate>>,
}

impl CalendarService {
    /// Create a service focused on the month containing `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focus_month: Arc::new(Mutex::new(first_of_month(today))),
        }
    }

    /// Build the 42-cell grid for the month containing `anchor`.
    ///
    /// The grid starts on the Monday on or before the 1st of the month;
    /// a month starting on Sunday gets six days of padding. Returns `None`
    /// when the grid would run past the dates chrono can represent.
    pub fn build_grid(&self, anchor: NaiveDate, today: NaiveDate) -> Option<CalendarGrid> {
        let first = first_of_month(anchor);
        let padding = first.weekday().num_days_from_monday();
        let grid_start = first.checked_sub_days(Days::new(u64::from(padding)))?;
        // Every cell lies between the first and the last one
        grid_start.checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;

        debug!(
            "Building grid for {}-{:02}: {} padding days, starting {}",
            first.year(),
            first.month(),
            padding,
            grid_start
        );

        let days = std::array::from_fn(|index| {
            let date = grid_start + Days::new(index as u64);
            CalendarDay {
                date,
                day: date.day(),
                weekday: WeekdayCode::of(date),
                is_current_month: date.year() == first.year() && date.month() == first.month(),
                is_today: date == today,
            }
        });

        Some(CalendarGrid {
            year: first.year(),
            month: first.month(),
            days,
        })
    }

    /// First day of the month before the one containing `anchor`
    pub fn previous_month(&self, anchor: NaiveDate) -> NaiveDate {
        let first = first_of_month(anchor);
        first.checked_sub_months(Months::new(1)).unwrap_or(first)
    }

    /// First day of the month after the one containing `anchor`
    pub fn next_month(&self, anchor: NaiveDate) -> NaiveDate {
        let first = first_of_month(anchor);
        first.checked_add_months(Months::new(1)).unwrap_or(first)
    }

    /// Title shown above the grid, e.g. "Tháng 1/2024"
    pub fn month_title(&self, grid: &CalendarGrid) -> String {
        format!("Tháng {}/{}", grid.month, grid.year)
    }

    /// Get the first day of the month currently in focus
    pub fn focus_month(&self) -> NaiveDate {
        *self.focus_month.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Focus the month containing `date`
    pub fn set_focus_month(&self, date: NaiveDate) -> NaiveDate {
        let first = first_of_month(date);
        *self.focus_month.lock().unwrap_or_else(PoisonError::into_inner) = first;
        first
    }

    /// Navigate to the previous month
    pub fn navigate_previous_month(&self) -> NaiveDate {
        let previous = self.previous_month(self.focus_month());
        self.set_focus_month(previous)
    }

    /// Navigate to the next month
    pub fn navigate_next_month(&self) -> NaiveDate {
        let next = self.next_month(self.focus_month());
        self.set_focus_month(next)
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn first_current_index(grid: &CalendarGrid) -> usize {
        grid.days.iter().position(|d| d.is_current_month).unwrap()
    }

    #[test]
    fn test_grid_always_has_42_monday_first_cells() {
        let service = CalendarService::new(date(2024, 1, 1));

        for year in 2020..=2030 {
            for month in 1..=12 {
                let grid = service.build_grid(date(year, month, 15), date(2024, 1, 1)).unwrap();
                assert_eq!(grid.days.len(), GRID_CELLS);
                assert_eq!(grid.days[0].weekday, WeekdayCode::Monday);
                assert_eq!(grid.days[41].weekday, WeekdayCode::Sunday);
                assert_eq!(grid.days[41].date, grid.days[0].date + Days::new(41));
                assert_eq!(grid.weeks().count(), 6);
            }
        }
    }

    #[test]
    fn test_month_starting_wednesday_has_two_padding_days() {
        let service = CalendarService::new(date(2023, 11, 1));
        // November 2023: 30 days, starts on a Wednesday
        let grid = service.build_grid(date(2023, 11, 1), date(2023, 11, 1)).unwrap();

        assert_eq!(first_current_index(&grid), 2);
        assert_eq!(grid.days[0].date, date(2023, 10, 30));
        assert_eq!(grid.days[2].day, 1);
        assert_eq!(grid.days.iter().filter(|d| d.is_current_month).count(), 30);
        assert!(!grid.days[41].is_current_month);
    }

    #[test]
    fn test_month_starting_sunday_walks_back_six_days() {
        let service = CalendarService::new(date(2024, 9, 1));
        // September 2024 starts on a Sunday
        let grid = service.build_grid(date(2024, 9, 20), date(2024, 9, 1)).unwrap();

        assert_eq!(first_current_index(&grid), 6);
        assert_eq!(grid.days[0].date, date(2024, 8, 26));
    }

    #[test]
    fn test_month_starting_monday_has_no_padding() {
        let service = CalendarService::new(date(2024, 1, 1));
        let grid = service.build_grid(date(2024, 1, 31), date(2024, 1, 1)).unwrap();

        assert_eq!(first_current_index(&grid), 0);
        assert_eq!(grid.year, 2024);
        assert_eq!(grid.month, 1);
    }

    #[test]
    fn test_today_flag() {
        let service = CalendarService::new(date(2024, 1, 1));
        let grid = service.build_grid(date(2024, 1, 1), date(2024, 1, 17)).unwrap();

        let today: Vec<_> = grid.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 1, 17));

        // Today outside the grid flags nothing
        let grid = service.build_grid(date(2024, 6, 1), date(2024, 1, 17)).unwrap();
        assert!(grid.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn test_navigation() {
        let service = CalendarService::new(date(2025, 6, 1));

        assert_eq!(service.previous_month(date(2025, 6, 30)), date(2025, 5, 1));
        assert_eq!(service.previous_month(date(2025, 1, 31)), date(2024, 12, 1));
        assert_eq!(service.next_month(date(2025, 6, 30)), date(2025, 7, 1));
        assert_eq!(service.next_month(date(2025, 12, 31)), date(2026, 1, 1));
    }

    #[test]
    fn test_focus_navigation() {
        let service = CalendarService::new(date(2025, 1, 20));
        assert_eq!(service.focus_month(), date(2025, 1, 1));

        assert_eq!(service.navigate_previous_month(), date(2024, 12, 1));
        assert_eq!(service.navigate_next_month(), date(2025, 1, 1));
        assert_eq!(service.navigate_next_month(), date(2025, 2, 1));

        service.set_focus_month(date(2025, 12, 25));
        assert_eq!(service.navigate_next_month(), date(2026, 1, 1));
    }

    #[test]
    fn test_month_title() {
        let service = CalendarService::new(date(2024, 1, 1));
        let grid = service.build_grid(date(2024, 1, 5), date(2024, 1, 5)).unwrap();
        assert_eq!(service.month_title(&grid), "Tháng 1/2024");
    }

    #[test]
    fn test_grid_at_the_edge_of_the_calendar() {
        let service = CalendarService::new(date(2024, 1, 1));

        // December of the last representable year needs days past NaiveDate::MAX
        assert!(service.build_grid(NaiveDate::MAX, date(2024, 1, 1)).is_none());
        let last_month = first_of_month(NaiveDate::MAX);
        assert!(service.build_grid(service.previous_month(last_month), date(2024, 1, 1)).is_some());
    }
}
