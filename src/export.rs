use chrono::NaiveDateTime;
use std::io::Write;

use crate::cli::ExportFormat;
use crate::display::task_lines_plain;
use crate::model::Task;
use crate::util::format_due;

pub fn export_tasks(
    out: &mut impl Write,
    view: &[&Task],
    format: ExportFormat,
    now: NaiveDateTime,
) -> std::io::Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, view).map_err(std::io::Error::other)?;
            writeln!(out)?;
        }
        ExportFormat::Markdown => {
            for task in view {
                let status = if task.done { "x" } else { " " };
                let star = if task.important { " ★" } else { "" };
                writeln!(out, "- [{status}] {}{star} (#{})", task.title, task.id)?;
                writeln!(out, "  - due: {}", format_due(task.due_at))?;
                writeln!(out, "  - priority: {}", task.priority.label())?;
                if !task.description.is_empty() {
                    writeln!(out, "  - desc: {}", task.description)?;
                }
            }
        }
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer
                .write_record(["id", "task", "desc", "due", "priority", "done", "important", "order"])
                .map_err(std::io::Error::other)?;
            for task in view {
                writer
                    .write_record([
                        task.id.to_string(),
                        task.title.clone(),
                        task.description.clone(),
                        format_due(task.due_at),
                        task.priority.label().to_string(),
                        task.done.to_string(),
                        task.important.to_string(),
                        task.order.to_string(),
                    ])
                    .map_err(std::io::Error::other)?;
            }
            writer.flush()?;
        }
        ExportFormat::Text => {
            for task in view {
                for line in task_lines_plain(task, now) {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::NaiveDate;

    fn task() -> Task {
        Task {
            id: 4,
            title: "Buy milk, eggs".into(),
            description: String::new(),
            due_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .unwrap(),
            priority: Priority::Medium,
            done: false,
            important: true,
            order: 0,
        }
    }

    fn render(format: ExportFormat) -> String {
        let t = task();
        let mut out = Vec::new();
        export_tasks(&mut out, &[&t], format, t.due_at).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn csv_quotes_commas() {
        let text = render(ExportFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,task,desc,due,priority,done,important,order")
        );
        assert_eq!(
            lines.next(),
            Some("4,\"Buy milk, eggs\",,01.01.2025 10:00,Medium,false,true,0")
        );
    }

    #[test]
    fn markdown_marks_important() {
        let text = render(ExportFormat::Markdown);
        assert!(text.starts_with("- [ ] Buy milk, eggs ★ (#4)"));
        assert!(text.contains("  - due: 01.01.2025 10:00"));
    }

    #[test]
    fn json_uses_wire_field_names() {
        let value: serde_json::Value = serde_json::from_str(&render(ExportFormat::Json)).unwrap();
        assert_eq!(value[0]["task"], "Buy milk, eggs");
        assert_eq!(value[0]["due"], "01.01.2025 10:00");
    }
}
