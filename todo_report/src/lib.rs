//! Collects `TYPE(label): message` comments from a project into a Markdown checklist and links
//! it from the project README.

#![warn(
    anonymous_parameters,
    bare_trait_objects,
    clippy::branches_sharing_code,
    clippy::map_unwrap_or,
    clippy::match_wildcard_for_single_variants,
    clippy::must_use_candidate,
    clippy::needless_for_each,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::unreadable_literal,
    clippy::unwrap_used,
    clippy::expect_used,
    deprecated_in_future,
    ellipsis_inclusive_range_patterns,
    future_incompatible,
    missing_copy_implementations,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    rustdoc::bare_urls,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::private_intra_doc_links,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused,
    variant_size_differences
)]

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

pub mod filesystem;
pub mod report;
pub mod scan;

pub use report::{END_MARKER, START_MARKER};
pub use scan::{Scanner, Todo, TodoKind};

/// Default report file name.
pub const REPORT_FILE: &str = "TODO.md";
/// Default README file name.
pub const README_FILE: &str = "README.md";

/// Results that can be returned from this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can be returned from this library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "the {0:?} file doesn't exist, create it with the {start:?} and {end:?} markers",
        start = START_MARKER,
        end = END_MARKER
    )]
    MissingReadme(PathBuf),
    #[error(
        "the {0:?} file doesn't have the {start:?} and {end:?} markers in it yet",
        start = START_MARKER,
        end = END_MARKER
    )]
    MissingMarkers(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Where to scan and which files to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Options {
    pub root: PathBuf,
    pub report_file: String,
    pub readme_file: String,
    pub exclude_dirs: HashSet<String>,
    pub exclude_files: HashSet<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Options {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let exclude_dirs = [".venv", "node_modules", "dist", ".git", "__pycache__"]
            .map(String::from)
            .into();
        Self {
            root: root.into(),
            report_file: REPORT_FILE.to_owned(),
            readme_file: README_FILE.to_owned(),
            exclude_dirs,
            exclude_files: [REPORT_FILE, README_FILE].map(String::from).into(),
        }
    }

    /// Skip files with this name in any directory.
    pub fn exclude_file(mut self, name: impl Into<String>) -> Self {
        self.exclude_files.insert(name.into());
        self
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report_file)
    }

    #[must_use]
    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.readme_file)
    }
}

/// Scan the project and write the report, returning the comments found.
///
/// # Errors
///
/// Returns an error if the project can not be scanned or the report can not be written.
pub async fn generate_report(options: &Options) -> Result<Vec<Todo>> {
    mlog::inf!("Starting project scan of {}", options.root.display());
    let kinds = TodoKind::ALL.map(TodoKind::as_str).join(", ");
    mlog::inf!("Types targeted: {kinds}");

    let todos = Scanner::new().scan(options).await?;
    mlog::inf!("Found {} total comments.", todos.len());
    if todos.is_empty() {
        mlog::inf!("No outstanding comments found. Creating clean report.");
    }

    let path = options.report_path();
    filesystem::write_file(&path, &report::render(&todos)).await?;
    mlog::suc!("Full report successfully generated in {}", path.display());
    Ok(todos)
}

/// Point the README block between the markers at the report.
///
/// # Errors
///
/// Returns an error if the README is missing, has no markers, or can not be rewritten.
pub async fn update_readme(options: &Options) -> Result<()> {
    let path = options.readme_path();
    if !path.exists() {
        return Err(Error::MissingReadme(path));
    }
    let readme = filesystem::read_lossy(&path).await?;
    let linked = report::link_readme(&readme, &options.report_file)
        .ok_or_else(|| Error::MissingMarkers(path.clone()))?;
    filesystem::write_file(&path, &linked).await?;
    mlog::suc!("Successfully updated link within {} markers.", path.display());
    Ok(())
}

/// Generate the report, then link it from the README.
///
/// # Errors
///
/// Returns the first error from [generate_report] or [update_readme].
pub async fn run(options: &Options) -> Result<Vec<Todo>> {
    let todos = generate_report(options).await?;
    update_readme(options).await?;
    Ok(todos)
}

/// The executable's own file name, so it never reports on itself.
#[must_use]
pub fn executable_name(argv0: &str) -> Option<String> {
    Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, process};

    struct Project {
        root: PathBuf,
    }

    impl Project {
        async fn new(name: &str) -> Self {
            let root = env::temp_dir().join(format!("todo_report_{}_{name}", process::id()));
            if root.exists() {
                tokio::fs::remove_dir_all(&root)
                    .await
                    .expect("valid stale project removal");
            }
            filesystem::create_dirs(&root)
                .await
                .expect("valid project directory");
            Self { root }
        }

        async fn file(&self, path: &str, contents: &str) -> &Self {
            filesystem::write_file(self.root.join(path), contents)
                .await
                .expect("valid project file");
            self
        }

        async fn read(&self, path: &str) -> String {
            filesystem::read_lossy(self.root.join(path))
                .await
                .expect("valid project file")
        }
    }

    impl Drop for Project {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    #[tokio::test]
    async fn scan_and_link() {
        let project = Project::new("scan_and_link").await;
        project
            .file(
                "src/main.rs",
                "// TODO(cli): parse flags\n\
                 // fixme(io) : handle EINTR\n\
                 let x = 1; // BUG(math)\n\
                 // TODO(cli): parse flags\n",
            )
            .await
            .file("notes.txt", "DANGER(prod): careful: really\n")
            .await
            .file(".git/HEAD", "TODO(hidden): skipped\n")
            .await
            .file(".cache/entry", "TODO(hidden): skipped\n")
            .await
            .file("node_modules/dep/index.js", "TODO(dep): skipped\n")
            .await
            .file("todo_report", "TODO(self): skipped\n")
            .await
            .file(
                "README.md",
                "# Project\nTODO(readme): skipped\n<!-- TODOS_START -->\nstale\n<!-- TODOS_END -->\n",
            )
            .await;

        let options = Options::new(&project.root).exclude_file("todo_report");
        let todos = run(&options).await.expect("valid report run");
        assert_eq!(todos.len(), 5);

        assert_eq!(
            project.read(REPORT_FILE).await,
            "# TODOs\n\
             - [ ] (src/main.rs) - cli: parse flags\n\
             \n---\n\n\
             # 'FIXME's\n\
             - [ ] (src/main.rs) - io: handle EINTR\n\
             \n---\n\n\
             # BUGs\n\
             - [ ] (src/main.rs) - math\n\
             \n---\n\n\
             # DANGERs\n\
             - [ ] (notes.txt) - prod: careful: really\n\
             \n---\n\n\
             # TODOCSes\n\
             \n"
        );
        assert_eq!(
            project.read(README_FILE).await,
            "# Project\n\
             TODO(readme): skipped\n\
             <!-- TODOS_START -->\n\
             This project also has a [\"todo list \"](TODO.md).\n\
             <!-- TODOS_END -->\n"
        );
    }

    #[tokio::test]
    async fn clean_report() {
        let project = Project::new("clean_report").await;
        project
            .file("src/lib.rs", "fn main() {}\n")
            .await
            .file("README.md", "<!-- TODOS_START -->\n<!-- TODOS_END -->\n")
            .await;

        let todos = run(&Options::new(&project.root))
            .await
            .expect("valid report run");
        assert!(todos.is_empty());
        assert_eq!(project.read(REPORT_FILE).await, "# No outstanding todos!\n");
    }

    #[tokio::test]
    async fn readme_errors() {
        let project = Project::new("readme_errors").await;
        let options = Options::new(&project.root);
        assert!(matches!(
            update_readme(&options).await,
            Err(Error::MissingReadme(_))
        ));

        project.file("README.md", "# Project\n").await;
        assert!(matches!(
            update_readme(&options).await,
            Err(Error::MissingMarkers(_))
        ));
        assert_eq!(project.read(README_FILE).await, "# Project\n");
    }

    #[test]
    fn executable() {
        assert_eq!(
            executable_name("/usr/local/bin/todo_report").as_deref(),
            Some("todo_report")
        );
        assert_eq!(executable_name(""), None);
    }
}
