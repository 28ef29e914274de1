//! Front-end actions shared by one-shot subcommands and the shell.
//!
//! Each action is one "frame": mutate, print, then flush via `maybe_save`.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use todo_core::{
    AppError, StorageError, StoreError, TodoApp, TodoItem, TodoStorage, TodoValidationError,
};

#[derive(Debug)]
pub enum CliError {
    App(AppError),
    Io(io::Error),
    Json(serde_json::Error),
    /// Storage could not be read; writing would discard its content.
    ReadOnly(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::App(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "output failed: {err}"),
            Self::Json(err) => write!(f, "json encoding failed: {err}"),
            Self::ReadOnly(reason) => write!(
                f,
                "refusing to modify tasks because storage could not be read: {reason}"
            ),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::App(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::ReadOnly(_) => None,
        }
    }
}

impl From<AppError> for CliError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::App(AppError::Store(value))
    }
}

impl From<TodoValidationError> for CliError {
    fn from(value: TodoValidationError) -> Self {
        Self::App(AppError::Validation(value))
    }
}

impl From<StorageError> for CliError {
    fn from(value: StorageError) -> Self {
        Self::App(AppError::Storage(value))
    }
}

/// One user action. Indices are 0-based store indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List { json: bool },
    Add(String),
    Toggle(usize),
    Remove(usize),
    ClearCompleted,
    ClearAll,
    Summary,
    ShowCompleted(bool),
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Add(_) | Self::Toggle(_) | Self::Remove(_) | Self::ClearCompleted | Self::ClearAll
        )
    }
}

#[derive(Serialize)]
struct ListedTodo<'a> {
    number: usize,
    #[serde(flatten)]
    item: &'a TodoItem,
}

/// Applies `action` and writes its user-facing output.
pub fn execute<S: TodoStorage, W: Write>(
    app: &mut TodoApp<S>,
    action: Action,
    out: &mut W,
) -> Result<(), CliError> {
    match action {
        Action::List { json: true } => {
            let listed = app
                .visible()
                .map(|(index, item)| ListedTodo {
                    number: index + 1,
                    item,
                })
                .collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut *out, &listed).map_err(CliError::Json)?;
            writeln!(out).map_err(CliError::Io)?;
        }
        Action::List { json: false } => render_list(app, out).map_err(CliError::Io)?,
        Action::Add(text) => match app.add(&text)? {
            Some(index) => writeln!(out, "Added #{}.", index + 1).map_err(CliError::Io)?,
            None => writeln!(out, "Nothing to add.").map_err(CliError::Io)?,
        },
        Action::Toggle(index) => {
            let verb = if app.toggle(index)? {
                "Checked"
            } else {
                "Unchecked"
            };
            writeln!(out, "{verb} #{}.", index + 1).map_err(CliError::Io)?;
        }
        Action::Remove(index) => {
            app.remove(index)?;
            writeln!(out, "Deleted #{}.", index + 1).map_err(CliError::Io)?;
        }
        Action::ClearCompleted => {
            let removed = app.clear_completed();
            writeln!(out, "Cleared {removed} completed task(s).").map_err(CliError::Io)?;
        }
        Action::ClearAll => {
            let removed = app.clear_all();
            writeln!(out, "Cleared {removed} task(s).").map_err(CliError::Io)?;
        }
        Action::Summary => writeln!(out, "{}", app.summary()).map_err(CliError::Io)?,
        Action::ShowCompleted(show) => {
            app.set_show_completed(show);
            let state = if show { "shown" } else { "hidden" };
            writeln!(out, "Completed tasks {state}.").map_err(CliError::Io)?;
        }
    }
    Ok(())
}

/// Prints the status line followed by the visible tasks.
pub fn render_list<S: TodoStorage, W: Write>(app: &TodoApp<S>, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", app.summary())?;
    let mut shown = 0;
    for (index, item) in app.visible() {
        let mark = if item.completed { 'x' } else { ' ' };
        writeln!(out, "{:>3}. [{mark}] {}", index + 1, item.text)?;
        shown += 1;
    }
    if shown == 0 {
        writeln!(out, "  (no tasks)")?;
    }
    Ok(())
}
