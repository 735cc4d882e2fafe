//! Finding tagged comments in a project tree.

use crate::{filesystem, Options, Result};
use async_recursion::async_recursion;
use regex::Regex;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;

/// Kind of tagged comment, in report order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub enum TodoKind {
    Todo,
    Fixme,
    Bug,
    Danger,
    Todocs,
}

impl TodoKind {
    pub const ALL: [TodoKind; 5] = [
        TodoKind::Todo,
        TodoKind::Fixme,
        TodoKind::Bug,
        TodoKind::Danger,
        TodoKind::Todocs,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TodoKind::Todo => "TODO",
            TodoKind::Fixme => "FIXME",
            TodoKind::Bug => "BUG",
            TodoKind::Danger => "DANGER",
            TodoKind::Todocs => "TODOCS",
        }
    }

    /// Section header text in the report.
    #[must_use]
    pub fn header(self) -> String {
        match self {
            TodoKind::Fixme => "'FIXME's".to_owned(),
            TodoKind::Todocs => "TODOCSes".to_owned(),
            _ => format!("{}s", self.as_str()),
        }
    }
}

impl fmt::Display for TodoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown comment kind {s:?}"))
    }
}

/// A single tagged comment, e.g. `FIXME(parser): handle EOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Todo {
    pub path: PathBuf,
    pub kind: TodoKind,
    pub label: String,
    pub message: String,
}

impl fmt::Display for Todo {
    /// Formats as a Markdown checklist item.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("- [ ] ")?;
        if !self.path.as_os_str().is_empty() {
            write!(f, "({}) - ", self.path.display())?;
        }
        f.write_str(&self.label)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Walks a project tree collecting [Todo]s.
#[derive(Debug, Clone)]
#[must_use]
pub struct Scanner {
    pattern: Regex,
}

impl Scanner {
    pub fn new() -> Self {
        let kinds = TodoKind::ALL
            .iter()
            .map(|kind| regex::escape(kind.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?i)({kinds})\s*\(([^)]*)\)(?:\s*:\s*([^\n]*))?"
        ))
        .unwrap_or_else(|err| unreachable!("comment pattern is valid: {err}"));
        Self { pattern }
    }

    /// Parse every tagged comment in a single line.
    pub fn parse_line<'a>(
        &'a self,
        path: &'a Path,
        line: &'a str,
    ) -> impl Iterator<Item = Todo> + 'a {
        self.pattern.captures_iter(line).filter_map(move |captures| {
            let kind = captures.get(1)?.as_str().parse().ok()?;
            let label = captures.get(2).map_or("", |m| m.as_str()).trim();
            let message = captures.get(3).map_or("", |m| m.as_str()).trim();
            Some(Todo {
                path: path.to_path_buf(),
                kind,
                label: label.to_owned(),
                message: message.to_owned(),
            })
        })
    }

    /// Scan all files below `options.root`. Paths in the result are relative to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory can not be listed. Unreadable files and
    /// subdirectories are skipped with a warning.
    pub async fn scan(&self, options: &Options) -> Result<Vec<Todo>> {
        let mut files = Vec::new();
        collect_files(&options.root, options, &mut files).await?;
        tracing::debug!("scanning {} file(s) under {:?}", files.len(), options.root);

        let mut todos = Vec::new();
        for file in files {
            let contents = match filesystem::read_lossy(&file).await {
                Ok(contents) => contents,
                Err(err) => {
                    mlog::wrn!("Could not read file: {}", file.display());
                    tracing::debug!("{err:#}");
                    continue;
                }
            };
            let path = file.strip_prefix(&options.root).unwrap_or(&file);
            for line in contents.lines() {
                todos.extend(self.parse_line(path, line));
            }
        }
        Ok(todos)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively collect files in sorted order, skipping excluded and hidden directories.
///
/// Symlinked directories are neither followed nor read as files. Only a failure to list
/// `directory` itself is returned.
#[async_recursion]
async fn collect_files(
    directory: &Path,
    options: &Options,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let mut entries = fs::read_dir(directory).await?;
    let mut directories = Vec::new();
    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let file_type = entry.file_type().await?;
        if file_type.is_symlink() && is_directory(&path).await {
            tracing::debug!("not following directory link {path:?}");
            continue;
        }
        if file_type.is_dir() {
            if !name.starts_with('.') && !options.exclude_dirs.contains(&name) {
                directories.push(path);
            }
        } else if !options.exclude_files.contains(&name) {
            found.push(path);
        }
    }
    found.sort();
    directories.sort();
    files.extend(found);
    collect_subdirectories(&directories, options, files).await;
    Ok(())
}

/// Collect files below each directory, warning about and skipping any that can not be listed.
async fn collect_subdirectories(
    directories: &[PathBuf],
    options: &Options,
    files: &mut Vec<PathBuf>,
) {
    for directory in directories {
        if let Err(err) = collect_files(directory, options, files).await {
            mlog::wrn!("Could not list directory: {}", directory.display());
            tracing::debug!("{err:#}");
        }
    }
}

async fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map_or(false, |metadata| metadata.is_dir())
}
