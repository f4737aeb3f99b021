use almanac::core::calendar::first_weekday_of_month;
use almanac::storage::Storage;
use almanac::{DayKey, Planner};

use super::task_row::fit;

const CELL_WIDTH: usize = 12;
const DAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u8) -> &'static str {
    MONTH_NAMES.get(usize::from(month)).copied().unwrap_or("")
}

/// Render the viewed month as a Sunday-first grid. Each day cell shows up to
/// `preview_limit` tasks followed by "+ N more".
pub fn month_calendar<S: Storage>(planner: &Planner<S>, preview_limit: usize) -> String {
    let month = planner.viewed_month();
    let mut out = String::new();

    // Header: Month Year
    out.push_str(&format!("{} {}\n", month_name(month.month()), month.year()));

    let labels: Vec<String> = DAY_LABELS.iter().map(|l| fit(l, CELL_WIDTH)).collect();
    out.push_str(labels.join("|").trim_end());
    out.push('\n');

    let leading = usize::from(first_weekday_of_month(month.year(), month.month()));
    let mut cells: Vec<Option<DayKey>> = vec![None; leading];
    cells.extend((1..=month.days_in_month()).map(|d| month.day(d)));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let rule = vec!["-".repeat(CELL_WIDTH); 7].join("+");
    for week in cells.chunks(7) {
        out.push_str(&rule);
        out.push('\n');
        let rendered: Vec<Vec<String>> = week
            .iter()
            .map(|cell| day_cell(planner, *cell, preview_limit))
            .collect();
        for line in 0..preview_limit + 2 {
            let row: Vec<&str> = rendered.iter().map(|c| c[line].as_str()).collect();
            out.push_str(row.join("|").trim_end());
            out.push('\n');
        }
    }
    out
}

fn day_cell<S: Storage>(planner: &Planner<S>, day: Option<DayKey>, preview_limit: usize) -> Vec<String> {
    let height = preview_limit + 2;
    let Some(day) = day else {
        return vec![" ".repeat(CELL_WIDTH); height];
    };

    let mut lines = Vec::with_capacity(height);
    let number = if planner.is_today(day) {
        format!("[{}]", day.day())
    } else {
        format!(" {}", day.day())
    };
    lines.push(fit(&number, CELL_WIDTH));

    let tasks = planner.tasks_for_day(day);
    for task in tasks.iter().take(preview_limit) {
        let mark = if task.completed { "x " } else { "- " };
        lines.push(fit(&format!("{mark}{}", task.text), CELL_WIDTH));
    }
    if tasks.len() > preview_limit {
        lines.push(fit(&format!("+ {} more", tasks.len() - preview_limit), CELL_WIDTH));
    }
    lines.resize(height, " ".repeat(CELL_WIDTH));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac::core::clock::FixedClock;
    use almanac::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn planner() -> Planner<MemoryStorage> {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        Planner::load_with_clock(MemoryStorage::new(), Box::new(clock))
    }

    #[test]
    fn header_and_labels() {
        let grid = month_calendar(&planner(), 2);
        let mut lines = grid.lines();
        assert_eq!(lines.next(), Some("September 2024"));
        assert!(lines.next().unwrap().starts_with("Su"));
    }

    #[test]
    fn september_2024_starts_on_sunday_and_marks_today() {
        let grid = month_calendar(&planner(), 2);
        // Line 0 header, 1 labels, 2 rule, 3 first day numbers.
        let first_week = grid.lines().nth(3).unwrap();
        assert!(first_week.starts_with("[1]"));
        assert!(first_week.contains(" 7"));
    }

    #[test]
    fn leading_blanks_follow_first_weekday() {
        let mut planner = planner();
        // October 2024 starts on a Tuesday.
        planner.go_to_next_month();
        let grid = month_calendar(&planner, 0);
        let first_week = grid.lines().nth(3).unwrap();
        let cells: Vec<&str> = first_week.split('|').collect();
        assert_eq!(cells[0].trim(), "");
        assert_eq!(cells[1].trim(), "");
        assert_eq!(cells[2].trim(), "1");
    }

    #[test]
    fn cells_preview_tasks_and_overflow() {
        let mut planner = planner();
        let day = planner.day(3).unwrap();
        for text in ["One", "Two", "Three", "Four"] {
            planner.add_task(day, text);
        }
        let id = planner.tasks_for_day(day)[0].id.clone();
        planner.toggle_task(day, &id);

        let grid = month_calendar(&planner, 2);
        assert!(grid.contains("x One"));
        assert!(grid.contains("- Two"));
        assert!(!grid.contains("Three"));
        assert!(grid.contains("+ 2 more"));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(11), "December");
    }
}
