pub mod month_calendar;
pub mod task_row;
