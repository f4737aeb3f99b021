use super::id::ItemId;
use super::key::{DayKey, MonthKey};
use super::task::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("`{0}` is not a day of the month")]
    InvalidDay(String),
    #[error("goal text is empty")]
    EmptyText,
    #[error("no goal `{0}` in this month")]
    UnknownGoal(String),
}

/// Schedules a month goal on one of the month's days.
///
/// `target_day` is raw user input and must be an integer in
/// `1..=max_day`. The new day task always starts incomplete and links back
/// to `goal_id`. The store is untouched on error.
pub fn assign_goal_to_day(
    tasks: &mut TaskStore,
    goal_text: &str,
    goal_id: &ItemId,
    month: MonthKey,
    target_day: &str,
    max_day: u8,
) -> Result<(DayKey, ItemId), AssignError> {
    let day = parse_day(target_day, max_day)
        .and_then(|d| month.day(d))
        .ok_or_else(|| AssignError::InvalidDay(target_day.trim().to_string()))?;
    let id = tasks
        .add_task(day, goal_text, Some(goal_id.clone()))
        .ok_or(AssignError::EmptyText)?;
    Ok((day, id))
}

fn parse_day(input: &str, max_day: u8) -> Option<u8> {
    let day: u8 = input.trim().parse().ok()?;
    (1..=max_day).contains(&day).then_some(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> MonthKey {
        MonthKey::new(2024, 0).unwrap()
    }

    #[test]
    fn assigns_linked_incomplete_task() {
        let mut tasks = TaskStore::new();
        let goal = ItemId::from("goal-7");
        let (day, id) = assign_goal_to_day(&mut tasks, "Write report", &goal, january(), " 12 ", 31).unwrap();

        assert_eq!(day, DayKey::new(2024, 0, 12).unwrap());
        let task = tasks.task(day, &id).unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.source_goal_id, Some(goal));
        assert!(!task.completed);
    }

    #[test]
    fn rejects_days_outside_month() {
        let mut tasks = TaskStore::new();
        let goal = ItemId::from("g");
        for input in ["0", "32", "-1", "", "abc", "1.5", "300"] {
            assert_eq!(
                assign_goal_to_day(&mut tasks, "Goal", &goal, january(), input, 31),
                Err(AssignError::InvalidDay(input.to_string()))
            );
        }
        assert!(tasks.is_empty());
    }

    #[test]
    fn max_day_bounds_the_range() {
        let mut tasks = TaskStore::new();
        let goal = ItemId::from("g");
        let feb = MonthKey::new(2023, 1).unwrap();
        assert!(assign_goal_to_day(&mut tasks, "Goal", &goal, feb, "29", 28).is_err());
        assert!(assign_goal_to_day(&mut tasks, "Goal", &goal, feb, "28", 28).is_ok());
    }

    #[test]
    fn blank_goal_text_is_rejected() {
        let mut tasks = TaskStore::new();
        let result = assign_goal_to_day(&mut tasks, "  ", &ItemId::from("g"), january(), "3", 31);
        assert_eq!(result, Err(AssignError::EmptyText));
        assert!(tasks.is_empty());
    }
}
