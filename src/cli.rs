use crate::config::Config;
use crate::display::{render_board, render_reminders, render_stats};
use crate::error::Result;
use crate::task::{Status, TaskUpdate};
use crate::task_list::TaskList;
use crate::utils::{format_timestamp, parse_deadline, parse_id};
use chrono::Local;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const MENU: &str =
    "1. Add Task  2. Update Task  3. View Tasks  4. Reminders  5. Statistics  6. Exit";
const FIELDS: &str = "Fields: 1=Name 2=Category 3=Description 4=Status 5=Deadline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    View,
    Reminders,
    Stats,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Update),
            "3" => Some(Self::View),
            "4" => Some(Self::Reminders),
            "5" => Some(Self::Stats),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Category,
    Description,
    Status,
    Deadline,
}

impl UpdateField {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Name),
            "2" => Some(Self::Category),
            "3" => Some(Self::Description),
            "4" => Some(Self::Status),
            "5" => Some(Self::Deadline),
            _ => None,
        }
    }
}

/// Prints `message` and reads one trimmed line. `None` means input is exhausted.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the read.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(&line);
    if let Cow::Owned(_) = text {
        debug!("replaced invalid UTF-8 in input line");
    }
    Ok(Some(text.trim().to_string()))
}

/// Runs the interactive menu until the user exits or input runs out, then saves.
///
/// The list is saved even when the session ends on an input or output error;
/// that error is returned afterwards.
pub fn run<R: BufRead, W: Write>(
    list: &mut TaskList,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let session = menu_loop(list, input, out);
    if let Err(err) = &session {
        warn!(%err, "session aborted");
    }

    if let Err(err) = list.save(&config.data_file) {
        warn!(path = %config.data_file.display(), %err, "failed to save tasks");
        writeln!(out, "Error: {err}")?;
    }
    writeln!(out, "👋 Goodbye!")?;
    session
}

fn menu_loop<R: BufRead, W: Write>(
    list: &mut TaskList,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let now = Local::now();
    writeln!(out, "Current time: {}", format_timestamp(&now))?;
    render_reminders(list, now, out)?;

    loop {
        writeln!(out, "\n{MENU}")?;
        let Some(choice) = prompt(input, out, "Choose: ")? else {
            info!("input closed");
            break;
        };

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Add) => add_task_interactive(list, input, out)?,
            Some(MenuChoice::Update) => update_task_interactive(list, input, out)?,
            Some(MenuChoice::View) => render_board(list, Local::now(), out)?,
            Some(MenuChoice::Reminders) => render_reminders(list, Local::now(), out)?,
            Some(MenuChoice::Stats) => render_stats(list, out)?,
            Some(MenuChoice::Exit) => break,
            None => writeln!(out, "❌ Invalid choice!")?,
        }
    }
    Ok(())
}

fn add_task_interactive<R: BufRead, W: Write>(
    list: &mut TaskList,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(name) = prompt(input, out, "Task name: ")? else {
        return Ok(());
    };
    let Some(category) = prompt(input, out, "Category: ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, out, "Description: ")? else {
        return Ok(());
    };
    let Some(raw_deadline) = prompt(input, out, "Deadline (YYYY-MM-DD HH:MM): ")? else {
        return Ok(());
    };

    let added = parse_deadline(&raw_deadline)
        .and_then(|deadline| list.add(name, category, description, deadline).map(|_| ()));
    match added {
        Ok(()) => writeln!(out, "✅ Task added!")?,
        Err(err) => {
            warn!(%err, "task not added");
            writeln!(out, "Error: {err}")?;
        }
    }
    Ok(())
}

fn update_task_interactive<R: BufRead, W: Write>(
    list: &mut TaskList,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(raw_id) = prompt(input, out, "Task ID: ")? else {
        return Ok(());
    };
    let id = match parse_id(&raw_id) {
        Ok(id) if list.find(id).is_some() => id,
        _ => {
            writeln!(out, "❌ Task not found!")?;
            return Ok(());
        }
    };

    writeln!(out, "{FIELDS}")?;
    let Some(raw_field) = prompt(input, out, "Update field (1-5): ")? else {
        return Ok(());
    };
    let Some(field) = UpdateField::parse(&raw_field) else {
        writeln!(out, "❌ Invalid field!")?;
        return Ok(());
    };

    let message = match field {
        UpdateField::Name => "New name: ",
        UpdateField::Category => "New category: ",
        UpdateField::Description => "New description: ",
        UpdateField::Status => "Status (to_do/doing/done): ",
        UpdateField::Deadline => "New deadline: ",
    };
    let Some(value) = prompt(input, out, message)? else {
        return Ok(());
    };

    let update = match field {
        UpdateField::Name => Ok(TaskUpdate::Name(value)),
        UpdateField::Category => Ok(TaskUpdate::Category(value)),
        UpdateField::Description => Ok(TaskUpdate::Description(value)),
        UpdateField::Status => value.parse::<Status>().map(TaskUpdate::Status),
        UpdateField::Deadline => parse_deadline(&value).map(TaskUpdate::Deadline),
    };

    match update {
        Ok(update) => {
            if list.update(id, [update]) {
                writeln!(out, "✅ Updated!")?;
            }
        }
        Err(err) => {
            warn!(id, %err, "rejected update");
            writeln!(out, "Error: {err}")?;
        }
    }
    Ok(())
}
