use crate::task::{Status, Task};
use crate::task_list::TaskList;
use crate::utils::{format_duration, format_timestamp};
use chrono::{DateTime, Duration, Local};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// An unfinished task whose deadline has passed.
pub fn is_overdue(task: &Task, now: DateTime<Local>) -> bool {
    !task.is_done() && now > task.deadline
}

/// An unfinished task due within the next 24 hours.
pub fn is_urgent(task: &Task, now: DateTime<Local>) -> bool {
    let remaining = task.deadline - now;
    !task.is_done() && remaining > Duration::zero() && remaining <= Duration::hours(24)
}

pub fn task_icon(task: &Task, now: DateTime<Local>) -> &'static str {
    if task.is_done() {
        return task.status.icon();
    }
    let remaining = task.deadline - now;
    if remaining <= Duration::zero() {
        "❌"
    } else if remaining <= Duration::hours(24) {
        "⚠️"
    } else {
        task.status.icon()
    }
}

fn header<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    execute!(
        out,
        SetForegroundColor(color),
        Print(format!("\n{text}\n")),
        ResetColor
    )
}

/// Prints every task grouped by status.
pub fn render_board<W: Write>(
    list: &TaskList,
    now: DateTime<Local>,
    out: &mut W,
) -> io::Result<()> {
    for status in Status::ALL {
        header(out, Color::Cyan, &format!("--- {status} ---"))?;
        let tasks = list.get_tasks_by_status(status);
        if tasks.is_empty() {
            writeln!(out, "No tasks")?;
            continue;
        }
        for task in tasks {
            render_task(task, now, out)?;
        }
    }
    Ok(())
}

fn render_task<W: Write>(task: &Task, now: DateTime<Local>, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} ID: {} | {} | {}",
        task_icon(task, now),
        task.id,
        task.name,
        task.category
    )?;
    writeln!(out, "   Description: {}", task.description)?;
    writeln!(out, "   Deadline: {}", format_timestamp(&task.deadline))?;

    match (task.status, task.completed_at) {
        (Status::Done, Some(completed_at)) => {
            writeln!(out, "   ✅ Completed: {}", format_timestamp(&completed_at))?;
            writeln!(
                out,
                "   ⏱️  Duration: {}",
                format_duration(completed_at - task.created_at)
            )?;
        }
        (Status::Done, None) => {}
        _ => {
            let remaining = task.deadline - now;
            if remaining > Duration::zero() {
                writeln!(out, "   ⏰ Remaining: {}", format_duration(remaining))?;
            } else {
                writeln!(out, "   ⚠️ Overdue: {}", format_duration(remaining))?;
            }
        }
    }
    writeln!(out, "---")
}

/// Lists overdue and urgent tasks.
pub fn render_reminders<W: Write>(
    list: &TaskList,
    now: DateTime<Local>,
    out: &mut W,
) -> io::Result<()> {
    let overdue = list.filter(|t| is_overdue(t, now));
    let urgent = list.filter(|t| is_urgent(t, now));

    if !overdue.is_empty() {
        header(out, Color::Red, &format!("🚨 OVERDUE TASKS ({}):", overdue.len()))?;
        for task in &overdue {
            writeln!(
                out,
                "❌ ID: {} | {} | Overdue: {}",
                task.id,
                task.name,
                format_duration(now - task.deadline)
            )?;
        }
    }

    if !urgent.is_empty() {
        header(out, Color::Yellow, &format!("⚠️  URGENT TASKS ({}):", urgent.len()))?;
        for task in &urgent {
            writeln!(
                out,
                "⏰ ID: {} | {} | Due in: {}",
                task.id,
                task.name,
                format_duration(task.deadline - now)
            )?;
        }
    }

    if overdue.is_empty() && urgent.is_empty() {
        header(out, Color::Green, "✅ No urgent or overdue tasks!")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub on_time: usize,
}

impl Stats {
    pub fn collect(list: &TaskList) -> Self {
        let completed = list.filter(|t| t.is_done()).len();
        let on_time = list
            .filter(|t| {
                t.is_done()
                    && t.completed_at
                        .is_some_and(|completed_at| completed_at <= t.deadline)
            })
            .len();
        Self {
            total: list.len(),
            completed,
            on_time,
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Percentage of completed tasks finished by their deadline, if any are completed.
    pub fn on_time_rate(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.on_time as f64 / self.completed as f64 * 100.0)
    }
}

pub fn render_stats<W: Write>(list: &TaskList, out: &mut W) -> io::Result<()> {
    let stats = Stats::collect(list);
    header(out, Color::Cyan, "📊 STATISTICS:")?;
    writeln!(
        out,
        "Total: {} | Completed: {} | Pending: {}",
        stats.total,
        stats.completed,
        stats.pending()
    )?;
    if let Some(rate) = stats.on_time_rate() {
        writeln!(out, "On-time rate: {rate:.1}%")?;
    }
    Ok(())
}
