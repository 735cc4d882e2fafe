//! Rendering the Markdown report and linking it from the README.

use crate::scan::{Todo, TodoKind};
use std::collections::HashSet;

/// Line that opens the generated block in the README.
pub const START_MARKER: &str = "<!-- TODOS_START -->";
/// Line that closes the generated block in the README.
pub const END_MARKER: &str = "<!-- TODOS_END -->";

/// Render the report, one section per [TodoKind] in order. Identical items are only listed once.
#[must_use]
pub fn render(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "# No outstanding todos!\n".to_owned();
    }

    let mut report = String::new();
    let mut seen = HashSet::new();
    for (i, kind) in TodoKind::ALL.into_iter().enumerate() {
        if i > 0 {
            report.push_str("\n---\n\n");
        }
        report.push_str(&format!("# {}\n", kind.header()));

        let mut items = todos.iter().filter(|todo| todo.kind == kind).peekable();
        if items.peek().is_none() {
            report.push('\n');
        }
        for todo in items {
            let line = todo.to_string();
            if seen.insert(line.clone()) {
                report.push_str(&line);
                report.push('\n');
            }
        }
    }
    report
}

/// The README line pointing at the report file.
#[must_use]
pub fn link_line(report_name: &str) -> String {
    format!("This project also has a [\"todo list \"]({report_name}).")
}

/// Replace everything between the README markers with a link to the report. Returns `None` when
/// either marker is missing.
#[must_use]
pub fn link_readme(readme: &str, report_name: &str) -> Option<String> {
    let is_marker = |line: &str, marker: &str| line.trim() == marker;
    let has_start = readme.lines().any(|line| is_marker(line, START_MARKER));
    let has_end = readme.lines().any(|line| is_marker(line, END_MARKER));
    if !has_start || !has_end {
        return None;
    }

    let mut linked = String::with_capacity(readme.len());
    let mut in_block = false;
    for line in readme.split_inclusive('\n') {
        if is_marker(line, START_MARKER) {
            linked.push_str(START_MARKER);
            linked.push('\n');
            linked.push_str(&link_line(report_name));
            linked.push('\n');
            in_block = true;
        } else if is_marker(line, END_MARKER) {
            linked.push_str(END_MARKER);
            linked.push('\n');
            in_block = false;
        } else if !in_block {
            linked.push_str(line);
        }
    }
    Some(linked)
}
