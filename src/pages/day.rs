use almanac::core::task::DayTask;
use almanac::{DayKey, ItemId};

use crate::components::task_row::day_task_row;

/// The day modal: the task input line followed by the day's tasks.
pub fn day_view(day: DayKey, tasks: &[DayTask], editing: Option<&ItemId>, input: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Date: {}\n", day));
    out.push_str("Daily Tasks\n\n");

    let prompt = if editing.is_some() { "Edit task..." } else { "What needs to be done?" };
    if input.is_empty() {
        out.push_str(&format!("> {}\n\n", prompt));
    } else {
        out.push_str(&format!("> {}\n\n", input));
    }

    if tasks.is_empty() {
        out.push_str("No tasks for this day yet.\n");
        return out;
    }
    for task in tasks {
        out.push_str(&day_task_row(task, editing == Some(&task.id)));
        out.push('\n');
    }
    out
}
