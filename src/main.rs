#![allow(dead_code)]

mod application;
mod components;
mod message;
mod pages;

use almanac::config::PlannerConfig;
use almanac::storage::Storage;
use almanac::{MonthKey, Planner};
use chrono::NaiveDate;

use application::Almanac;
use message::{Message, MonthTab};

const USAGE: &str = "usage: almanac [--month YYYY-MM] [--prev] [--next] [--today] [COMMAND]

commands:
  show                  month grid (default)
  day D                 tasks of day D
  add D TEXT...         add a task to day D
  edit D ID TEXT...     replace a task's text
  toggle D ID           mark a task done / not done
  delete D ID           delete a task
  goals                 month goals
  goal TEXT...          add a month goal
  goal-toggle ID        mark a goal done / not done
  goal-delete ID        delete a goal
  assign ID D           schedule a goal on day D
  review                month progress

D is a day of the viewed month; ID is any unique prefix of an id.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Day(String),
    Add { day: String, text: String },
    Edit { day: String, id: String, text: String },
    Toggle { day: String, id: String },
    Delete { day: String, id: String },
    Goals,
    Goal(String),
    GoalToggle(String),
    GoalDelete(String),
    Assign { id: String, day: String },
    Review,
}

#[derive(Debug, Clone)]
struct Invocation {
    navigation: Vec<Message>,
    command: Command,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PlannerConfig::load_or_default();

    // Log to the systemd user journal (`journalctl --user -t almanac -f`).
    // Wrapper filters: almanac crate at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                if metadata.target().starts_with("almanac") {
                    let max = if almanac::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        almanac::set_debug_logging(config.debug_logging);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("almanac".to_string());
                if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
                    // Global max must be Debug so debug logs can pass through when enabled
                    log::set_max_level(log::LevelFilter::Debug);
                }
            }
            Err(e) => eprintln!("almanac: journal unavailable, logging disabled: {}", e),
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let invocation = parse_args(&args).map_err(|e| format!("{e}\n\n{USAGE}"))?;

    let planner = Planner::load(config.storage());
    let mut app = Almanac::new(planner, config);
    for message in invocation.navigation {
        app.update(message);
    }
    for message in command_messages(&app, &invocation.command)? {
        app.update(message);
    }

    print!("{}", app.view());
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut navigation = Vec::new();
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--month" => {
                let value = iter.next().ok_or("--month needs a value")?;
                navigation.push(Message::CalendarGoTo(parse_month(value)?));
            }
            "--prev" => navigation.push(Message::CalendarPrevMonth),
            "--next" => navigation.push(Message::CalendarNextMonth),
            "--today" => navigation.push(Message::CalendarToday),
            _ => rest.push(arg.as_str()),
        }
    }

    let text = |words: &[&str]| -> Result<String, String> {
        let joined = words.join(" ");
        if joined.trim().is_empty() {
            Err("missing text".to_string())
        } else {
            Ok(joined)
        }
    };

    let command = match rest.as_slice() {
        [] | ["show"] => Command::Show,
        ["day", day] => Command::Day(day.to_string()),
        ["add", day, words @ ..] => Command::Add {
            day: day.to_string(),
            text: text(words)?,
        },
        ["edit", day, id, words @ ..] => Command::Edit {
            day: day.to_string(),
            id: id.to_string(),
            text: text(words)?,
        },
        ["toggle", day, id] => Command::Toggle {
            day: day.to_string(),
            id: id.to_string(),
        },
        ["delete", day, id] => Command::Delete {
            day: day.to_string(),
            id: id.to_string(),
        },
        ["goals"] => Command::Goals,
        ["goal", words @ ..] => Command::Goal(text(words)?),
        ["goal-toggle", id] => Command::GoalToggle(id.to_string()),
        ["goal-delete", id] => Command::GoalDelete(id.to_string()),
        ["assign", id, day] => Command::Assign {
            id: id.to_string(),
            day: day.to_string(),
        },
        ["review"] => Command::Review,
        other => return Err(format!("unrecognized arguments: {}", other.join(" "))),
    };

    Ok(Invocation { navigation, command })
}

/// `YYYY-MM` with a 1-based month.
fn parse_month(value: &str) -> Result<MonthKey, String> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map(MonthKey::containing)
        .map_err(|_| format!("invalid month `{value}`, expected YYYY-MM"))
}

/// Translate a command into the UI messages a user would have produced.
fn command_messages<S: Storage>(app: &Almanac<S>, command: &Command) -> Result<Vec<Message>, String> {
    let day = |value: &str| {
        value
            .parse::<u8>()
            .ok()
            .and_then(|d| app.planner().day(d))
            .ok_or_else(|| format!("`{value}` is not a day of the viewed month"))
    };
    let task = |day, id: &str| {
        app.resolve_task(day, id)
            .ok_or_else(|| format!("no task matching `{id}` on {day}"))
    };
    let goal = |id: &str| app.resolve_goal(id).ok_or_else(|| format!("no goal matching `{id}`"));

    let messages = match command {
        Command::Show => Vec::new(),
        Command::Day(d) => vec![Message::OpenDay(day(d)?)],
        Command::Add { day: d, text } => {
            let key = day(d)?;
            vec![
                Message::OpenDay(key),
                Message::TodoInputChanged(text.clone()),
                Message::SubmitTodo,
            ]
        }
        Command::Edit { day: d, id, text } => {
            let key = day(d)?;
            vec![
                Message::OpenDay(key),
                Message::StartEditTodo(task(key, id)?),
                Message::TodoInputChanged(text.clone()),
                Message::SubmitTodo,
            ]
        }
        Command::Toggle { day: d, id } => {
            let key = day(d)?;
            vec![Message::OpenDay(key), Message::ToggleDayTodo(key, task(key, id)?)]
        }
        Command::Delete { day: d, id } => {
            let key = day(d)?;
            vec![Message::OpenDay(key), Message::DeleteDayTodo(key, task(key, id)?)]
        }
        Command::Goals => vec![Message::OpenMonthView],
        Command::Goal(text) => vec![
            Message::OpenMonthView,
            Message::MonthInputChanged(text.clone()),
            Message::SubmitMonthGoal,
        ],
        Command::GoalToggle(id) => vec![Message::OpenMonthView, Message::ToggleMonthGoal(goal(id)?)],
        Command::GoalDelete(id) => vec![Message::OpenMonthView, Message::DeleteMonthGoal(goal(id)?)],
        // The day is passed through unchecked: the planner rejects bad input itself.
        Command::Assign { id, day: d } => vec![
            Message::OpenMonthView,
            Message::StartAssign(goal(id)?),
            Message::AssignDayChanged(d.clone()),
            Message::ConfirmAssign,
        ],
        Command::Review => vec![
            Message::OpenMonthView,
            Message::SelectMonthTab(MonthTab::Review),
        ],
    };
    Ok(messages)
}
