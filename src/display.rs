use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;

use crate::filter::is_overdue;
use crate::model::{ArchiveEntry, Priority, Task};
use crate::util::format_due;

pub fn print_task_list(view: &[&Task], now: NaiveDateTime, color: bool) {
    if view.is_empty() {
        println!("No tasks.");
        return;
    }

    for task in view {
        for line in task_lines(task, now, color) {
            println!("{line}");
        }
    }
}

pub fn print_archive(entries: &[ArchiveEntry], color: bool) {
    if entries.is_empty() {
        println!("Archive is empty.");
        return;
    }

    for entry in entries {
        let task = &entry.task;
        let mut line = format!(
            "[{}] {}  {}",
            format_status(true, color),
            format_id(task.id, color),
            format_title(&task.title, color)
        );
        if let Some(at) = entry.completed_at {
            line.push_str(&format!(
                "  {} {}",
                format_label("completed:", color),
                format_due(at)
            ));
        }
        println!("{line}");
    }
}

pub fn task_lines_plain(task: &Task, now: NaiveDateTime) -> Vec<String> {
    task_lines(task, now, false)
}

fn task_lines(task: &Task, now: NaiveDateTime, color: bool) -> Vec<String> {
    let status = format_status(task.done, color);
    let id = format_id(task.id, color);
    let star = format_star(task.important, color);
    let title = format_title(&task.title, color);
    let mut lines = vec![format!("{:>2}. [{status}] {star} {id}  {title}", task.order)];

    let mut meta_parts: Vec<String> = vec![
        format!(
            "{} {}",
            format_label("due:", color),
            format_due_state(task, now, color)
        ),
        format!(
            "{} {}",
            format_label("priority:", color),
            format_priority(task.priority, color)
        ),
    ];
    if !task.description.is_empty() {
        meta_parts.push(format!(
            "{} {}",
            format_label("desc:", color),
            task.description
        ));
    }
    lines.push(format!("       {}", meta_parts.join(" | ")));

    lines
}

pub fn print_task_view(task: &Task, now: NaiveDateTime, color: bool) {
    println!(
        "{} {}",
        format_label("ID:", color),
        format_id(task.id, color)
    );
    println!(
        "{} {}",
        format_label("Title:", color),
        format_title(&task.title, color)
    );
    if !task.description.is_empty() {
        println!("{} {}", format_label("Description:", color), task.description);
    }
    println!(
        "{} {}",
        format_label("Due:", color),
        format_due_state(task, now, color)
    );
    println!(
        "{} {}",
        format_label("Priority:", color),
        format_priority(task.priority, color)
    );
    println!(
        "{} {}",
        format_label("Important:", color),
        if task.important { "yes" } else { "no" }
    );
    println!("{} {}", format_label("Position:", color), task.order);
}

pub fn print_profiles(profiles: &BTreeMap<String, String>, current: &str, color: bool) {
    for (name, path) in profiles {
        let marker = if name == current { "*" } else { " " };
        println!(
            "{marker} {}  {}",
            format_title(name, color),
            format_label(path, color)
        );
    }
}

fn format_status(done: bool, color: bool) -> String {
    if done {
        if color {
            format!("{}", "x".green())
        } else {
            "x".to_string()
        }
    } else {
        " ".to_string()
    }
}

fn format_star(important: bool, color: bool) -> String {
    if !important {
        return "☆".to_string();
    }
    if color {
        format!("{}", "★".yellow())
    } else {
        "★".to_string()
    }
}

fn format_id(id: u64, color: bool) -> String {
    let value = format!("#{:>3}", id);
    if color {
        format!("{}", value.dimmed())
    } else {
        value
    }
}

fn format_title(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold())
    } else {
        title.to_string()
    }
}

fn format_label(label: &str, color: bool) -> String {
    if color {
        format!("{}", label.dimmed())
    } else {
        label.to_string()
    }
}

fn format_due_state(task: &Task, now: NaiveDateTime, color: bool) -> String {
    let text = format_due(task.due_at);
    let overdue = is_overdue(task, now);
    if !color {
        return if overdue { format!("{text} (overdue)") } else { text };
    }

    if task.done {
        format!("{}", text.dimmed())
    } else if overdue {
        format!("{}", text.red())
    } else if task.due_at.date() == now.date() {
        format!("{}", text.yellow())
    } else {
        format!("{}", text.cyan())
    }
}

fn format_priority(priority: Priority, color: bool) -> String {
    let text = priority.label();
    if !color {
        return text.to_string();
    }

    match priority {
        Priority::High => format!("{}", text.red()),
        Priority::Medium => format!("{}", text.yellow()),
        Priority::Low => format!("{}", text.green()),
    }
}
