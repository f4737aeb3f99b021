use almanac::core::summary::MonthSummary;

use crate::components::month_calendar::month_name;
use crate::components::task_row::check_box;

pub fn review_view(summary: &MonthSummary) -> String {
    let mut out = String::new();
    let month = summary.month;
    out.push_str(&format!("{} {} Review\n", month_name(month.month()), month.year()));
    out.push_str("Add [Review]\n\n");

    // Totals
    out.push_str(&format!(
        "Total: {}   Done: {}   Progress: {}%\n\n",
        summary.total, summary.completed, summary.percentage
    ));

    out.push_str("General Month Goals\n");
    if summary.general_goals.is_empty() {
        out.push_str("  No general goals set.\n");
    }
    for goal in &summary.general_goals {
        out.push_str(&format!("  {} {}\n", check_box(goal.completed), goal.text));
    }
    out.push('\n');

    out.push_str("Daily Activity Breakdown\n");
    if summary.daily_by_day.is_empty() {
        out.push_str("  No daily tasks recorded this month.\n");
    }
    for (day, tasks) in &summary.daily_by_day {
        out.push_str(&format!("  Day {}\n", day.day()));
        for task in tasks {
            out.push_str(&format!("    {} {}\n", check_box(task.completed), task.text));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac::MonthKey;
    use almanac::core::goal::GoalStore;
    use almanac::core::task::TaskStore;

    #[test]
    fn lists_days_in_order_with_progress() {
        let month = MonthKey::new(2024, 0).unwrap();
        let mut tasks = TaskStore::new();
        let mut goals = GoalStore::new();
        for d in [10, 2, 1] {
            tasks.add_task(month.day(d).unwrap(), &format!("task on {d}"), None);
        }
        let done = tasks.tasks_for_day(month.day(1).unwrap())[0].id.clone();
        tasks.toggle_task(month.day(1).unwrap(), &done);
        goals.add_goal(month, "Month goal");

        let view = review_view(&MonthSummary::build(&tasks, &goals, month));
        assert!(view.contains("Total: 4   Done: 1   Progress: 25%"));
        assert!(view.contains("  [ ] Month goal"));

        let day1 = view.find("Day 1\n").unwrap();
        let day2 = view.find("Day 2\n").unwrap();
        let day10 = view.find("Day 10\n").unwrap();
        assert!(day1 < day2 && day2 < day10);
        assert!(view.contains("    [x] task on 1"));
    }

    #[test]
    fn empty_review() {
        let month = MonthKey::new(2024, 0).unwrap();
        let view = review_view(&MonthSummary::build(&TaskStore::new(), &GoalStore::new(), month));
        assert!(view.contains("Progress: 0%"));
        assert!(view.contains("No general goals set."));
        assert!(view.contains("No daily tasks recorded this month."));
    }
}
