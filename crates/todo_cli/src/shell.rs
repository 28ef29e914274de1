//! Interactive line-oriented session.
//!
//! Every input line is one frame: the action runs, then pending changes are
//! flushed before the next prompt. Save failures are reported and retried on
//! the following frame.

use crate::action::{execute, Action};
use std::io::{self, BufRead, Write};
use todo_core::{TodoApp, TodoStorage};

const HELP: &str = "\
commands:
  add <text>        add a task
  toggle <n>        check or uncheck task n
  rm <n>            delete task n
  clear-done        delete completed tasks
  clear-all         delete every task
  show-done | hide-done
  list | summary | help | quit";

/// Parsed shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Action(Action),
    Help,
    Quit,
    Blank,
}

/// Parses one input line.
///
/// Task numbers are 1-based; `add` keeps everything after the keyword,
/// minus leading spaces.
pub fn parse_line(line: &str) -> Result<ShellInput, String> {
    let line = line.trim_start();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None => (line.trim_end(), ""),
    };

    let input = match keyword {
        "" => ShellInput::Blank,
        "add" | "a" => ShellInput::Action(Action::Add(rest.to_string())),
        "toggle" | "t" => ShellInput::Action(Action::Toggle(parse_number(rest)?)),
        "rm" | "remove" | "delete" => ShellInput::Action(Action::Remove(parse_number(rest)?)),
        "clear-done" | "clear-completed" => ShellInput::Action(Action::ClearCompleted),
        "clear-all" => ShellInput::Action(Action::ClearAll),
        "show-done" => ShellInput::Action(Action::ShowCompleted(true)),
        "hide-done" => ShellInput::Action(Action::ShowCompleted(false)),
        "list" | "ls" => ShellInput::Action(Action::List { json: false }),
        "summary" => ShellInput::Action(Action::Summary),
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" | "q" => ShellInput::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(input)
}

fn parse_number(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(format!("expected a task number >= 1, got `{}`", value.trim())),
    }
}

/// Runs the session until `quit` or end of input.
pub fn run_shell<S, R, W>(app: &mut TodoApp<S>, input: R, out: &mut W) -> io::Result<()>
where
    S: TodoStorage,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{HELP}")?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line?) {
            Ok(ShellInput::Blank) => {}
            Ok(ShellInput::Help) => writeln!(out, "{HELP}")?,
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Action(action)) => {
                if let Err(err) = execute(app, action, out) {
                    writeln!(out, "error: {err}")?;
                }
            }
            Err(message) => writeln!(out, "error: {message}")?,
        }

        if let Err(err) = app.maybe_save() {
            writeln!(out, "warning: changes not saved yet: {err}")?;
        }
    }

    if let Err(err) = app.maybe_save() {
        writeln!(out, "warning: unsaved changes lost on exit: {err}")?;
    }
    Ok(())
}
