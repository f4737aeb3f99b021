use almanac::ItemId;
use almanac::core::goal::MonthGoal;
use almanac::core::task::DayTask;

/// Characters of an id shown next to a row; enough to type back as a prefix.
pub const SHORT_ID_LEN: usize = 8;

pub fn check_box(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

pub fn short_id(id: &ItemId) -> &str {
    let s = id.as_str();
    match s.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// `[x] Buy milk  (goal)  #1a2b3c4d`, with `*` marking the row being edited.
pub fn day_task_row(task: &DayTask, editing: bool) -> String {
    let mut out = String::new();
    out.push_str(if editing { "* " } else { "  " });
    out.push_str(check_box(task.completed));
    out.push(' ');
    out.push_str(&task.text);
    if task.is_assigned() {
        out.push_str("  (goal)");
    }
    out.push_str("  #");
    out.push_str(short_id(&task.id));
    out
}

pub fn goal_row(goal: &MonthGoal) -> String {
    format!(
        "  {} {}  #{}",
        check_box(goal.completed),
        goal.text,
        short_id(&goal.id)
    )
}

/// Fit `text` into exactly `width` characters, cutting with `~`.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{:<width$}", text)
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, completed: bool, goal: Option<&str>) -> DayTask {
        DayTask {
            id: ItemId::from("0123456789abcdef"),
            text: text.to_string(),
            completed,
            source_goal_id: goal.map(ItemId::from),
        }
    }

    #[test]
    fn renders_day_task() {
        assert_eq!(day_task_row(&task("Run", false, None), false), "  [ ] Run  #01234567");
        assert_eq!(
            day_task_row(&task("Run", true, Some("g")), true),
            "* [x] Run  (goal)  #01234567"
        );
    }

    #[test]
    fn short_ids_keep_legacy_ids_intact() {
        assert_eq!(short_id(&ItemId::from("abc")), "abc");
        assert_eq!(short_id(&ItemId::from("1712345678901")), "17123456");
    }

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("abcd", 4), "abcd");
        assert_eq!(fit("ab", 0), "");
    }
}
