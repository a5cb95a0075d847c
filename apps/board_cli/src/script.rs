//! Line-oriented board script: one command per line, `#` starts a comment.

use shared::{domain::Column, error::BoardError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    /// 1-based position in display order (ordered, then preparing, then served).
    Index(usize),
    /// Leading hex digits of the order id. A bare number is an index, so
    /// all-digit prefixes are written `@1234`.
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add {
        title: String,
        table: String,
    },
    Open(OrderRef),
    Edit {
        title: String,
        table: String,
        column: String,
    },
    Delete,
    CancelEdit,
    Drag {
        order: OrderRef,
        column: Column,
    },
    Help,
    Show,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid order reference '{0}'")]
    InvalidRef(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}

pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    }
    .trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((line, ""));

    let parsed = match command.to_ascii_lowercase().as_str() {
        "add" => {
            let [title, table] = fields::<2>(rest).ok_or(ScriptError::Arity {
                command: "add",
                expected: "<title> | <table>",
            })?;
            ScriptCommand::Add { title, table }
        }
        "open" => ScriptCommand::Open(parse_ref(single(rest, "open", "<order>")?)?),
        "edit" => {
            let [title, table, column] = fields::<3>(rest).ok_or(ScriptError::Arity {
                command: "edit",
                expected: "<title> | <table> | <column>",
            })?;
            ScriptCommand::Edit {
                title,
                table,
                column,
            }
        }
        "delete" => no_args(rest, "delete", ScriptCommand::Delete)?,
        "cancel-edit" => no_args(rest, "cancel-edit", ScriptCommand::CancelEdit)?,
        "drag" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(order), Some(column), None) => ScriptCommand::Drag {
                    order: parse_ref(order)?,
                    column: column.parse::<Column>()?,
                },
                _ => {
                    return Err(ScriptError::Arity {
                        command: "drag",
                        expected: "<order> <column>",
                    })
                }
            }
        }
        "help" => no_args(rest, "help", ScriptCommand::Help)?,
        "show" => no_args(rest, "show", ScriptCommand::Show)?,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(parsed))
}

/// Splits `rest` on `|` into exactly `N` trimmed fields. Empty fields are allowed.
fn fields<const N: usize>(rest: &str) -> Option<[String; N]> {
    let parts: Vec<String> = rest.split('|').map(|part| part.trim().to_string()).collect();
    parts.try_into().ok()
}

fn single<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ScriptError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(ScriptError::Arity { command, expected }),
    }
}

fn no_args(
    rest: &str,
    command: &'static str,
    parsed: ScriptCommand,
) -> Result<ScriptCommand, ScriptError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ScriptError::Arity {
            command,
            expected: "no arguments",
        })
    }
}

fn parse_ref(raw: &str) -> Result<OrderRef, ScriptError> {
    let prefix = match raw.strip_prefix('@') {
        Some(prefix) => prefix,
        None => {
            if let Ok(index) = raw.parse::<usize>() {
                if index == 0 {
                    return Err(ScriptError::InvalidRef(raw.to_string()));
                }
                return Ok(OrderRef::Index(index));
            }
            raw
        }
    }
    .to_ascii_lowercase();
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(ScriptError::InvalidRef(raw.to_string()));
    }
    Ok(OrderRef::Prefix(prefix))
}
