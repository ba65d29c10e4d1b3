use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::todo::Task;

/// Which period the main list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodTab {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for PeriodTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodTab::Daily => write!(f, "daily"),
            PeriodTab::Weekly => write!(f, "weekly"),
            PeriodTab::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for PeriodTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(PeriodTab::Daily),
            "weekly" | "week" => Ok(PeriodTab::Weekly),
            "monthly" | "month" => Ok(PeriodTab::Monthly),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

/// Sunday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - Days::new(u64::from(offset))
}

/// Saturday closing the week that begins on `week_start`.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Days::new(6)
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

pub fn format_week_range(week_start: NaiveDate) -> String {
    format!(
        "{} ~ {}",
        format_day(week_start),
        format_day(week_end(week_start))
    )
}

pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y.%m").to_string()
}

/// The anchor date of each period tab. Every tab keeps its own anchor, so
/// switching tabs never loses a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodAnchors {
    pub selected_date: NaiveDate,
    /// Always a Sunday.
    pub selected_week_start: NaiveDate,
    /// Only year and month are significant.
    pub selected_month: NaiveDate,
}

impl PeriodAnchors {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            selected_week_start: week_start(today),
            selected_month: today,
        }
    }

    /// Point every tab at the period containing `date`.
    pub fn jump_to(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }

    pub fn next(&mut self, tab: PeriodTab) {
        self.shift(tab, 1);
    }

    pub fn previous(&mut self, tab: PeriodTab) {
        self.shift(tab, -1);
    }

    /// Move the anchor of `tab` by `steps` periods (negative goes back).
    /// Month shifts clamp the day to the length of the target month.
    pub fn shift(&mut self, tab: PeriodTab, steps: i32) {
        let magnitude = steps.unsigned_abs();
        match tab {
            PeriodTab::Daily => {
                self.selected_date = shift_days(self.selected_date, steps, 1);
            }
            PeriodTab::Weekly => {
                let moved = shift_days(self.selected_week_start, steps, 7);
                self.selected_week_start = week_start(moved);
            }
            PeriodTab::Monthly => {
                let months = Months::new(magnitude);
                let moved = if steps >= 0 {
                    self.selected_month.checked_add_months(months)
                } else {
                    self.selected_month.checked_sub_months(months)
                };
                if let Some(date) = moved {
                    self.selected_month = date;
                }
            }
        }
    }

    /// Whether a task with this due date belongs to the selected period.
    /// Tasks without a due date belong to no period.
    pub fn contains(&self, tab: PeriodTab, due_date: Option<NaiveDate>) -> bool {
        let Some(due) = due_date else {
            return false;
        };
        match tab {
            PeriodTab::Daily => due == self.selected_date,
            PeriodTab::Weekly => {
                due >= self.selected_week_start && due <= week_end(self.selected_week_start)
            }
            PeriodTab::Monthly => {
                due.year() == self.selected_month.year()
                    && due.month() == self.selected_month.month()
            }
        }
    }

    pub fn label(&self, tab: PeriodTab) -> String {
        match tab {
            PeriodTab::Daily => format_day(self.selected_date),
            PeriodTab::Weekly => format_week_range(self.selected_week_start),
            PeriodTab::Monthly => format_month(self.selected_month),
        }
    }
}

fn shift_days(date: NaiveDate, steps: i32, days_per_step: u64) -> NaiveDate {
    let days = Days::new(u64::from(steps.unsigned_abs()) * days_per_step);
    let moved = if steps >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    moved.unwrap_or(date)
}

/// Tasks of the selected period, in list order.
pub fn filter_by_period<'a>(
    tasks: &'a [Task],
    tab: PeriodTab,
    anchors: &PeriodAnchors,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| anchors.contains(tab, t.due_date))
        .collect()
}
