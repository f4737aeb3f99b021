use almanac::core::goal::MonthGoal;
use almanac::{ItemId, MonthKey};

use crate::components::month_calendar::month_name;
use crate::components::task_row::goal_row;

/// The month view's "Add" tab: month-wide goals with the assign form under
/// the goal being assigned.
pub fn goals_view(
    month: MonthKey,
    goals: &[MonthGoal],
    assigning: Option<&ItemId>,
    day_input: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {} Goals\n", month_name(month.month()), month.year()));
    out.push_str("[Add] Review\n\n");

    if goals.is_empty() {
        out.push_str("No general goals added yet.\n");
        return out;
    }

    for goal in goals {
        out.push_str(&goal_row(goal));
        out.push('\n');
        if assigning == Some(&goal.id) {
            let day = if day_input.is_empty() {
                format!("1-{}", month.days_in_month())
            } else {
                day_input.to_string()
            };
            out.push_str(&format!("      Assign to Day: {}\n", day));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_assign_form_under_selected_goal() {
        let month = MonthKey::new(2024, 1).unwrap();
        let a = MonthGoal::new("Read").unwrap();
        let b = MonthGoal::new("Swim").unwrap();
        let view = goals_view(month, &[a.clone(), b], Some(&a.id), "");

        assert!(view.starts_with("February 2024 Goals\n"));
        let lines: Vec<&str> = view.lines().collect();
        let read = lines.iter().position(|l| l.contains("Read")).unwrap();
        assert_eq!(lines[read + 1].trim(), "Assign to Day: 1-29");
        assert!(lines[read + 2].contains("Swim"));
    }

    #[test]
    fn empty_month() {
        let view = goals_view(MonthKey::new(2024, 1).unwrap(), &[], None, "");
        assert!(view.contains("No general goals added yet."));
    }
}
