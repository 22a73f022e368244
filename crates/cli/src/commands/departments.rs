use chrono::{Local, NaiveDateTime};
use helpdesk_core::{DepartmentDirectory, StaticDirectory};
use serde::Serialize;

use super::CommandResult;

const COMMAND: &str = "departments";

#[derive(Debug, Serialize)]
struct DepartmentLine<'a> {
    department: &'static str,
    name: &'a str,
    phone: &'a str,
    description: &'a str,
    hours: String,
    phone_active: bool,
}

/// List the directory with phone availability at `local_time` (default: now).
pub fn run(local_time: Option<NaiveDateTime>) -> CommandResult {
    let at = local_time.unwrap_or_else(|| Local::now().naive_local());
    let directory = StaticDirectory::seeded();

    let lines: Vec<DepartmentLine<'_>> = directory
        .records()
        .iter()
        .map(|record| DepartmentLine {
            department: record.department.as_str(),
            name: &record.name,
            phone: &record.phone,
            description: &record.description,
            hours: record.hours.label(),
            phone_active: record.hours.is_open_at(at),
        })
        .collect();

    let open = lines.iter().filter(|line| line.phone_active).count();
    match serde_json::to_value(&lines) {
        Ok(data) => CommandResult::success_with(
            COMMAND,
            format!("{open} of {} phone lines open at {at}", lines.len()),
            Some(data),
        ),
        Err(error) => CommandResult::failure(COMMAND, "serialization", error.to_string(), 1),
    }
}
