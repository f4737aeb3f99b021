use almanac::{DayKey, ItemId, MonthKey};

/// Tabs of the month view. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthTab {
    #[default]
    Add,
    Review,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Month calendar navigation
    CalendarPrevMonth,
    CalendarNextMonth,
    CalendarToday,
    CalendarGoTo(MonthKey),

    // Day modal
    OpenDay(DayKey),
    CloseDay,
    TodoInputChanged(String),
    SubmitTodo,
    StartEditTodo(ItemId),
    ToggleDayTodo(DayKey, ItemId),
    DeleteDayTodo(DayKey, ItemId),

    // Month view
    OpenMonthView,
    CloseMonthView,
    SelectMonthTab(MonthTab),
    MonthInputChanged(String),
    SubmitMonthGoal,
    ToggleMonthGoal(ItemId),
    DeleteMonthGoal(ItemId),

    // Goal assignment
    StartAssign(ItemId),
    AssignDayChanged(String),
    ConfirmAssign,
    CancelAssign,
}
