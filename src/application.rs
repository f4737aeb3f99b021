use almanac::config::PlannerConfig;
use almanac::storage::Storage;
use almanac::{DayKey, ItemId, Planner};

use crate::components::month_calendar;
use crate::message::{Message, MonthTab};
use crate::pages;

/// Front-end state around the planner: which overlays are open and what the
/// user has typed so far.
pub struct Almanac<S: Storage> {
    planner: Planner<S>,
    config: PlannerConfig,

    // Day modal
    selected_day: Option<DayKey>,
    todo_input: String,
    editing: Option<ItemId>,

    // Month view
    month_view_open: bool,
    month_tab: MonthTab,
    month_input: String,
    assigning: Option<ItemId>,
    day_to_assign: String,
}

impl<S: Storage> Almanac<S> {
    pub fn new(planner: Planner<S>, config: PlannerConfig) -> Self {
        Self {
            planner,
            config,
            selected_day: None,
            todo_input: String::new(),
            editing: None,
            month_view_open: false,
            month_tab: MonthTab::default(),
            month_input: String::new(),
            assigning: None,
            day_to_assign: String::new(),
        }
    }

    pub fn planner(&self) -> &Planner<S> {
        &self.planner
    }

    pub fn selected_day(&self) -> Option<DayKey> {
        self.selected_day
    }

    pub fn month_view_open(&self) -> bool {
        self.month_view_open
    }

    pub fn month_tab(&self) -> MonthTab {
        self.month_tab
    }

    pub fn editing(&self) -> Option<&ItemId> {
        self.editing.as_ref()
    }

    pub fn assigning(&self) -> Option<&ItemId> {
        self.assigning.as_ref()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            // Month calendar navigation
            Message::CalendarPrevMonth => {
                self.planner.go_to_previous_month();
            }

            Message::CalendarNextMonth => {
                self.planner.go_to_next_month();
            }

            Message::CalendarToday => {
                self.planner.go_to_today();
            }

            Message::CalendarGoTo(month) => {
                self.planner.go_to_month(month);
            }

            // Day modal
            Message::OpenDay(day) => {
                self.selected_day = Some(day);
                self.editing = None;
                self.todo_input.clear();
            }

            Message::CloseDay => {
                self.selected_day = None;
            }

            Message::TodoInputChanged(value) => {
                self.todo_input = value;
            }

            Message::SubmitTodo => {
                let Some(day) = self.selected_day else {
                    return;
                };
                if self.todo_input.trim().is_empty() {
                    return;
                }
                match self.editing.take() {
                    Some(id) => {
                        self.planner.edit_task(day, &id, &self.todo_input);
                    }
                    None => {
                        self.planner.add_task(day, &self.todo_input);
                    }
                }
                self.todo_input.clear();
            }

            Message::StartEditTodo(id) => {
                let Some(day) = self.selected_day else {
                    return;
                };
                if let Some(task) = self.planner.tasks().task(day, &id) {
                    self.todo_input = task.text.clone();
                    self.editing = Some(id);
                }
            }

            Message::ToggleDayTodo(day, id) => {
                self.planner.toggle_task(day, &id);
            }

            Message::DeleteDayTodo(day, id) => {
                self.planner.delete_task(day, &id);
                if self.editing.as_ref() == Some(&id) {
                    self.editing = None;
                    self.todo_input.clear();
                }
            }

            // Month view
            Message::OpenMonthView => {
                self.month_view_open = true;
                self.month_tab = MonthTab::Add;
            }

            Message::CloseMonthView => {
                self.month_view_open = false;
                self.assigning = None;
            }

            Message::SelectMonthTab(tab) => {
                self.month_tab = tab;
            }

            Message::MonthInputChanged(value) => {
                self.month_input = value;
            }

            Message::SubmitMonthGoal => {
                if self.planner.add_goal(&self.month_input).is_some() {
                    self.month_input.clear();
                }
            }

            Message::ToggleMonthGoal(id) => {
                self.planner.toggle_goal(&id);
            }

            Message::DeleteMonthGoal(id) => {
                self.planner.delete_goal(&id);
                if self.assigning.as_ref() == Some(&id) {
                    self.assigning = None;
                }
            }

            // Goal assignment
            Message::StartAssign(id) => {
                // Clicking the assign button of the open goal closes it.
                if self.assigning.as_ref() == Some(&id) {
                    self.assigning = None;
                } else {
                    self.assigning = Some(id);
                }
            }

            Message::AssignDayChanged(value) => {
                self.day_to_assign = value;
            }

            Message::ConfirmAssign => {
                let Some(id) = self.assigning.clone() else {
                    return;
                };
                // Rejected input leaves the form open and unchanged.
                if self.planner.assign_goal(&id, &self.day_to_assign).is_ok() {
                    self.assigning = None;
                    self.day_to_assign.clear();
                }
            }

            Message::CancelAssign => {
                self.assigning = None;
            }
        }
    }

    /// Renders whatever is on top: the day modal, the month view, or the grid.
    pub fn view(&self) -> String {
        if let Some(day) = self.selected_day {
            return pages::day::day_view(
                day,
                self.planner.tasks_for_day(day),
                self.editing.as_ref(),
                &self.todo_input,
            );
        }

        if self.month_view_open {
            let month = self.planner.viewed_month();
            return match self.month_tab {
                MonthTab::Add => pages::goals::goals_view(
                    month,
                    self.planner.goals_for_month(),
                    self.assigning.as_ref(),
                    &self.day_to_assign,
                ),
                MonthTab::Review => pages::review::review_view(&self.planner.summary()),
            };
        }

        month_calendar::month_calendar(&self.planner, self.config.preview_limit)
    }

    /// Finds a task of `day` by full id or unique id prefix.
    pub fn resolve_task(&self, day: DayKey, prefix: &str) -> Option<ItemId> {
        unique_match(self.planner.tasks_for_day(day).iter().map(|t| &t.id), prefix)
    }

    /// Finds a goal of the viewed month by full id or unique id prefix.
    pub fn resolve_goal(&self, prefix: &str) -> Option<ItemId> {
        unique_match(self.planner.goals_for_month().iter().map(|g| &g.id), prefix)
    }
}

fn unique_match<'a>(ids: impl Iterator<Item = &'a ItemId>, prefix: &str) -> Option<ItemId> {
    if prefix.is_empty() {
        return None;
    }
    let candidates: Vec<&ItemId> = ids.filter(|id| id.as_str().starts_with(prefix)).collect();
    if let Some(exact) = candidates.iter().find(|id| id.as_str() == prefix) {
        return Some((*exact).clone());
    }
    match candidates.as_slice() {
        [only] => Some((*only).clone()),
        _ => None,
    }
}
