use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::key::{DayKey, MonthKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTask {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Month goal this task was assigned from, if any.
    #[serde(default)]
    pub source_goal_id: Option<ItemId>,
}

impl DayTask {
    /// Returns `None` when `text` is blank.
    pub fn new(text: &str, source_goal_id: Option<ItemId>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: ItemId::generate(),
            text: text.to_string(),
            completed: false,
            source_goal_id,
        })
    }

    pub fn is_assigned(&self) -> bool {
        self.source_goal_id.is_some()
    }
}

/// Result of flipping a day task's completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub completed: bool,
    pub source_goal_id: Option<ItemId>,
}

/// Day tasks keyed by day. Days without tasks have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    days: BTreeMap<DayKey, Vec<DayTask>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to `day`. Blank text is ignored.
    pub fn add_task(&mut self, day: DayKey, text: &str, source_goal_id: Option<ItemId>) -> Option<ItemId> {
        let task = DayTask::new(text, source_goal_id)?;
        let id = task.id.clone();
        self.days.entry(day).or_default().push(task);
        Some(id)
    }

    /// Replaces a task's text. Blank text and unknown ids are ignored.
    pub fn edit_task(&mut self, day: DayKey, id: &ItemId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.find_mut(day, id) {
            Some(task) => {
                task.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Flips a task's completion and reports what the caller needs to sync
    /// the source goal. `None` when the task does not exist.
    pub fn toggle_task(&mut self, day: DayKey, id: &ItemId) -> Option<Toggled> {
        let task = self.find_mut(day, id)?;
        task.completed = !task.completed;
        Some(Toggled {
            completed: task.completed,
            source_goal_id: task.source_goal_id.clone(),
        })
    }

    /// Removes a task, dropping the day's entry once it is empty.
    pub fn delete_task(&mut self, day: DayKey, id: &ItemId) -> bool {
        let Some(tasks) = self.days.get_mut(&day) else {
            return false;
        };
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        let removed = tasks.len() != before;
        if tasks.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    pub fn tasks_for_day(&self, day: DayKey) -> &[DayTask] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn task(&self, day: DayKey, id: &ItemId) -> Option<&DayTask> {
        self.tasks_for_day(day).iter().find(|t| &t.id == id)
    }

    /// Day entries of `month` in ascending day order.
    pub fn days_in(&self, month: MonthKey) -> impl Iterator<Item = (DayKey, &[DayTask])> {
        self.days
            .range(month.first_day()..=month.last_day())
            .map(|(key, tasks)| (*key, tasks.as_slice()))
    }

    pub fn days(&self) -> impl Iterator<Item = &DayKey> {
        self.days.keys()
    }

    /// Number of days that have tasks.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Drops entries with no tasks, e.g. after loading a hand-edited document.
    pub fn prune_empty(&mut self) {
        self.days.retain(|_, tasks| !tasks.is_empty());
    }

    fn find_mut(&mut self, day: DayKey, id: &ItemId) -> Option<&mut DayTask> {
        self.days.get_mut(&day)?.iter_mut().find(|t| &t.id == id)
    }
}
