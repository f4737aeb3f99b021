use super::goal::{GoalStore, MonthGoal};
use super::key::{DayKey, MonthKey};
use super::task::{DayTask, TaskStore};

/// Review data for one month, rebuilt from the stores on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub general_goals: Vec<MonthGoal>,
    /// Day groups in ascending day order.
    pub daily_by_day: Vec<(DayKey, Vec<DayTask>)>,
    /// Day tasks plus general goals.
    pub total: usize,
    pub completed: usize,
    pub percentage: u8,
}

impl MonthSummary {
    pub fn build(tasks: &TaskStore, goals: &GoalStore, month: MonthKey) -> Self {
        let general_goals = goals.goals_for_month(month).to_vec();
        let daily_by_day: Vec<(DayKey, Vec<DayTask>)> = tasks
            .days_in(month)
            .map(|(day, list)| (day, list.to_vec()))
            .collect();

        let daily = daily_by_day.iter().flat_map(|(_, list)| list.iter());
        let total = general_goals.len() + daily.clone().count();
        let completed = general_goals.iter().filter(|g| g.completed).count()
            + daily.filter(|t| t.completed).count();

        Self {
            month,
            general_goals,
            daily_by_day,
            total,
            completed,
            percentage: completion_percentage(completed, total),
        }
    }

    pub fn daily_total(&self) -> usize {
        self.daily_by_day.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn goal_total(&self) -> usize {
        self.general_goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// `round(100 * completed / total)`, ties rounding up; 0 when `total` is 0.
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> MonthKey {
        MonthKey::new(2024, 0).unwrap()
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(1, 8), 13);
        assert_eq!(completion_percentage(3, 8), 38);
        assert_eq!(completion_percentage(4, 4), 100);
        assert_eq!(completion_percentage(0, 5), 0);
    }

    #[test]
    fn days_enumerate_in_numeric_order() {
        let mut tasks = TaskStore::new();
        for (d, text) in [(2, "two"), (10, "ten"), (1, "one")] {
            tasks.add_task(january().day(d).unwrap(), text, None);
        }

        let summary = MonthSummary::build(&tasks, &GoalStore::new(), january());
        let days: Vec<u8> = summary.daily_by_day.iter().map(|(k, _)| k.day()).collect();
        assert_eq!(days, vec![1, 2, 10]);
    }

    #[test]
    fn only_viewed_month_is_counted() {
        let mut tasks = TaskStore::new();
        let mut goals = GoalStore::new();
        let done = tasks.add_task(january().day(4).unwrap(), "done", None).unwrap();
        tasks.toggle_task(january().day(4).unwrap(), &done);
        tasks.add_task(january().day(5).unwrap(), "open", None);
        tasks.add_task(DayKey::new(2024, 1, 4).unwrap(), "february", None);
        goals.add_goal(january(), "goal");
        goals.add_goal(MonthKey::new(2024, 1).unwrap(), "other goal");

        let summary = MonthSummary::build(&tasks, &goals, january());
        assert_eq!(summary.daily_total(), 2);
        assert_eq!(summary.goal_total(), 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.percentage, 33);
    }

    #[test]
    fn completed_goals_count_toward_progress() {
        let mut goals = GoalStore::new();
        let id = goals.add_goal(january(), "g").unwrap();
        goals.add_goal(january(), "h");
        goals.set_goal_completion(january(), &id, true);

        let summary = MonthSummary::build(&TaskStore::new(), &goals, january());
        assert_eq!((summary.completed, summary.total, summary.percentage), (1, 2, 50));
        assert!(summary.daily_by_day.is_empty());
    }

    #[test]
    fn empty_month() {
        let summary = MonthSummary::build(&TaskStore::new(), &GoalStore::new(), january());
        assert!(summary.is_empty());
        assert_eq!(summary.percentage, 0);
        assert!(summary.general_goals.is_empty());
    }
}
