use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::key::MonthKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGoal {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
}

impl MonthGoal {
    /// Returns `None` when `text` is blank.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: ItemId::generate(),
            text: text.to_string(),
            completed: false,
        })
    }
}

/// Month-wide goals keyed by month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalStore {
    months: BTreeMap<MonthKey, Vec<MonthGoal>>,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_goal(&mut self, month: MonthKey, text: &str) -> Option<ItemId> {
        let goal = MonthGoal::new(text)?;
        let id = goal.id.clone();
        self.months.entry(month).or_default().push(goal);
        Some(id)
    }

    pub fn toggle_goal(&mut self, month: MonthKey, id: &ItemId) -> bool {
        match self.find_mut(month, id) {
            Some(goal) => {
                goal.completed = !goal.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete_goal(&mut self, month: MonthKey, id: &ItemId) -> bool {
        let Some(goals) = self.months.get_mut(&month) else {
            return false;
        };
        let before = goals.len();
        goals.retain(|g| &g.id != id);
        let removed = goals.len() != before;
        if goals.is_empty() {
            self.months.remove(&month);
        }
        removed
    }

    /// Sets completion on an existing goal. Never recreates a deleted goal.
    /// Returns `true` only when the stored value changed.
    pub fn set_goal_completion(&mut self, month: MonthKey, id: &ItemId, completed: bool) -> bool {
        match self.find_mut(month, id) {
            Some(goal) if goal.completed != completed => {
                goal.completed = completed;
                true
            }
            _ => false,
        }
    }

    pub fn goals_for_month(&self, month: MonthKey) -> &[MonthGoal] {
        self.months.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn goal(&self, month: MonthKey, id: &ItemId) -> Option<&MonthGoal> {
        self.goals_for_month(month).iter().find(|g| &g.id == id)
    }

    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.months.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn prune_empty(&mut self) {
        self.months.retain(|_, goals| !goals.is_empty());
    }

    fn find_mut(&mut self, month: MonthKey, id: &ItemId) -> Option<&mut MonthGoal> {
        self.months.get_mut(&month)?.iter_mut().find(|g| &g.id == id)
    }
}
