//! Month grid for the day picker

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::PickerError;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build from a year and a 1-based month
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidMonth`] when `month` is not in 1..=12
    /// or the year is outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Result<Self, PickerError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| PickerError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// Month containing `date`
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year component
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// 1-based month component
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First day of the month
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Following month
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Preceding month
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of days in the month
    #[must_use]
    pub fn days(self) -> u32 {
        let first = self.first_day();
        let next = self.next().first_day();
        u32::try_from((next - first).num_days()).unwrap_or(31)
    }

    /// Human label such as "October 2026"
    #[must_use]
    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PickerError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The date shown in the cell
    pub date: NaiveDate,
    /// Cell cannot be picked
    pub disabled: bool,
    /// Cell is the currently selected day
    pub selected: bool,
    /// Cell is today
    pub today: bool,
}

/// Monday-first month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// Month being shown
    pub month: YearMonth,
    /// Rows of seven cells; `None` pads days outside the month
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

impl CalendarMonth {
    /// Lay out `month`, flagging each day with `is_disabled` and the
    /// selected/today markers
    pub fn build(
        month: YearMonth,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        is_disabled: impl Fn(NaiveDate) -> bool,
    ) -> Self {
        let first = month.first_day();
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::with_capacity(6);
        let mut row: [Option<CalendarDay>; 7] = [None; 7];
        let mut column = offset;

        for date in first.iter_days().take(month.days() as usize) {
            row[column] = Some(CalendarDay {
                date,
                disabled: is_disabled(date),
                selected: selected == Some(date),
                today: date == today,
            });
            column += 1;
            if column == 7 {
                weeks.push(row);
                row = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(row);
        }

        Self { month, weeks }
    }

    /// Iterate over the real days of the month
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let month: YearMonth = "2026-10".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 10);
        assert_eq!(month.to_string(), "2026-10");
        assert_eq!(month.label(), "October 2026");
    }

    #[test]
    fn test_year_month_rejects_garbage() {
        assert!("2026".parse::<YearMonth>().is_err());
        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_navigation_wraps_years() {
        let december = YearMonth::new(2026, 12).unwrap();
        assert_eq!(december.next(), YearMonth::new(2027, 1).unwrap());
        assert_eq!(december.next().prev(), december);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2028, 2).unwrap().days(), 29);
        assert_eq!(YearMonth::new(2026, 2).unwrap().days(), 28);
        assert_eq!(YearMonth::new(2026, 10).unwrap().days(), 31);
    }

    #[test]
    fn test_grid_layout_monday_first() {
        // October 1st 2026 is a Thursday
        let month = YearMonth::new(2026, 10).unwrap();
        let grid = CalendarMonth::build(month, date(2026, 10, 16), None, |_| false);

        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][2].is_none());
        assert_eq!(grid.weeks[0][3].unwrap().date, date(2026, 10, 1));
        assert_eq!(grid.days().count(), 31);
        assert!(grid.days().any(|d| d.today && d.date == date(2026, 10, 16)));
    }

    #[test]
    fn test_grid_flags() {
        let month = YearMonth::new(2026, 10).unwrap();
        let today = date(2026, 10, 16);
        let grid = CalendarMonth::build(month, today, Some(date(2026, 10, 20)), |d| d < today);

        let disabled = grid.days().filter(|d| d.disabled).count();
        assert_eq!(disabled, 15);
        let selected: Vec<_> = grid.days().filter(|d| d.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2026, 10, 20));
    }
}
