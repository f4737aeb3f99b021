//! Planner state: the viewed month plus the task and goal stores, mirrored
//! to storage after every change.

use chrono::NaiveDate;

use crate::core::assign::{self, AssignError};
use crate::core::calendar::CalendarNavigator;
use crate::core::clock::{Clock, SystemClock};
use crate::core::goal::{GoalStore, MonthGoal};
use crate::core::id::ItemId;
use crate::core::key::{DayKey, MonthKey};
use crate::core::summary::MonthSummary;
use crate::core::task::{DayTask, TaskStore, Toggled};
use crate::storage::{self, GOALS_KEY, Storage, TASKS_KEY};

pub struct Planner<S: Storage> {
    storage: S,
    clock: Box<dyn Clock>,
    navigator: CalendarNavigator,
    tasks: TaskStore,
    goals: GoalStore,
}

impl<S: Storage> Planner<S> {
    /// Reads both documents once and opens on the current month. Unreadable
    /// documents start empty.
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, Box::new(SystemClock))
    }

    pub fn load_with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let mut tasks: TaskStore = storage::load_or_default(&storage, TASKS_KEY);
        let mut goals: GoalStore = storage::load_or_default(&storage, GOALS_KEY);
        tasks.prune_empty();
        goals.prune_empty();
        log::info!(
            "Loaded planner: {} days with tasks, {} months with goals",
            tasks.len(),
            goals.months().count()
        );
        let navigator = CalendarNavigator::today(clock.as_ref());
        Self {
            storage,
            clock,
            navigator,
            tasks,
            goals,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn goals(&self) -> &GoalStore {
        &self.goals
    }

    // Navigation

    pub fn navigator(&self) -> &CalendarNavigator {
        &self.navigator
    }

    pub fn viewed_month(&self) -> MonthKey {
        self.navigator.viewed()
    }

    pub fn go_to_previous_month(&mut self) {
        self.navigator.go_to_previous_month();
    }

    pub fn go_to_next_month(&mut self) {
        self.navigator.go_to_next_month();
    }

    pub fn go_to_today(&mut self) {
        self.navigator.go_to_today(self.clock.as_ref());
    }

    pub fn go_to_month(&mut self, month: MonthKey) {
        self.navigator.go_to(month);
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_today(&self, day: DayKey) -> bool {
        self.navigator.is_today(day, self.clock.as_ref())
    }

    /// Key for `day` of the viewed month.
    pub fn day(&self, day: u8) -> Option<DayKey> {
        self.viewed_month().day(day)
    }

    // Day tasks

    pub fn tasks_for_day(&self, day: DayKey) -> &[DayTask] {
        self.tasks.tasks_for_day(day)
    }

    pub fn add_task(&mut self, day: DayKey, text: &str) -> Option<ItemId> {
        let id = self.tasks.add_task(day, text, None)?;
        self.save_tasks();
        Some(id)
    }

    pub fn edit_task(&mut self, day: DayKey, id: &ItemId, text: &str) -> bool {
        let changed = self.tasks.edit_task(day, id, text);
        if changed {
            self.save_tasks();
        }
        changed
    }

    /// Flips a day task and carries the new state over to its source goal
    /// when that goal still exists in the task's month.
    pub fn toggle_task(&mut self, day: DayKey, id: &ItemId) -> Option<Toggled> {
        let toggled = self.tasks.toggle_task(day, id)?;
        self.save_tasks();

        if let Some(goal_id) = &toggled.source_goal_id {
            let month = day.month_key();
            if self.goals.set_goal_completion(month, goal_id, toggled.completed) {
                self.save_goals();
            } else if self.goals.goal(month, goal_id).is_none() {
                log::debug!("Source goal {} of task {} no longer exists", goal_id, id);
            }
        }
        Some(toggled)
    }

    pub fn delete_task(&mut self, day: DayKey, id: &ItemId) -> bool {
        let removed = self.tasks.delete_task(day, id);
        if removed {
            self.save_tasks();
        }
        removed
    }

    // Month goals (viewed month)

    pub fn goals_for_month(&self) -> &[MonthGoal] {
        self.goals.goals_for_month(self.viewed_month())
    }

    pub fn add_goal(&mut self, text: &str) -> Option<ItemId> {
        let id = self.goals.add_goal(self.viewed_month(), text)?;
        self.save_goals();
        Some(id)
    }

    pub fn toggle_goal(&mut self, id: &ItemId) -> bool {
        let changed = self.goals.toggle_goal(self.viewed_month(), id);
        if changed {
            self.save_goals();
        }
        changed
    }

    pub fn delete_goal(&mut self, id: &ItemId) -> bool {
        let removed = self.goals.delete_goal(self.viewed_month(), id);
        if removed {
            self.save_goals();
        }
        removed
    }

    /// Schedules a goal of the viewed month on `target_day` (raw user input).
    pub fn assign_goal(&mut self, goal_id: &ItemId, target_day: &str) -> Result<DayKey, AssignError> {
        let month = self.viewed_month();
        let text = self
            .goals
            .goal(month, goal_id)
            .map(|g| g.text.clone())
            .ok_or_else(|| AssignError::UnknownGoal(goal_id.to_string()))?;

        match assign::assign_goal_to_day(
            &mut self.tasks,
            &text,
            goal_id,
            month,
            target_day,
            month.days_in_month(),
        ) {
            Ok((day, _)) => {
                self.save_tasks();
                Ok(day)
            }
            Err(e) => {
                log::debug!("Assignment of {} rejected: {}", goal_id, e);
                Err(e)
            }
        }
    }

    /// Review data for the viewed month, rebuilt on every call.
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::build(&self.tasks, &self.goals, self.viewed_month())
    }

    fn save_tasks(&self) {
        storage::save_document(&self.storage, TASKS_KEY, &self.tasks);
    }

    fn save_goals(&self) {
        storage::save_document(&self.storage, GOALS_KEY, &self.goals);
    }
}
