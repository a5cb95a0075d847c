use std::{
    fmt::Write as _,
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{anyhow, bail, Context, Result};
use board_core::{
    config::load_settings, BoardController, BoardView, MemoryView, OrderStore, Overlay,
};
use clap::Parser;
use shared::{
    domain::{Column, OrderId},
    protocol::{BoardEvent, ClickTarget, ElementData},
};
use tracing_subscriber::EnvFilter;

mod script;

use script::{parse_line, OrderRef, ScriptCommand};

/// Replays a board script against an in-memory order board.
#[derive(Parser, Debug)]
struct Args {
    /// Script file; reads standard input when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Settings file (defaults to ./board.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final board as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Report failing commands and continue instead of stopping.
    #[arg(long)]
    keep_going: bool,
}

type Board = BoardController<MemoryView>;

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };

    let mut board = BoardController::new(OrderStore::new(), MemoryView::new());
    if settings.show_help_on_start {
        board.handle_help_toggle();
    }

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let outcome = parse_line(line)
            .map_err(anyhow::Error::from)
            .and_then(|command| match command {
                Some(command) => run_command(&mut board, command),
                None => Ok(()),
            });

        if let Err(err) = outcome {
            if args.keep_going {
                tracing::warn!(line = line_no, error = %err, "command failed");
                eprintln!("line {line_no}: {err:#}");
            } else {
                return Err(err).with_context(|| format!("script line {line_no}: '{}'", line.trim()));
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&board.view().snapshot(board.store()))?
        );
    } else {
        print!("{}", render_board(&board));
    }
    Ok(())
}

fn run_command(board: &mut Board, command: ScriptCommand) -> Result<()> {
    match command {
        ScriptCommand::Add { title, table } => {
            board.dispatch(BoardEvent::Click(ClickTarget::AddButton))?;
            board.view_mut().add.title = title;
            board.view_mut().add.table = table;
            board.dispatch(BoardEvent::AddSubmit)?;
        }
        ScriptCommand::Open(order) => {
            if board.view().overlay_open(Overlay::Edit) {
                bail!("an order is already open for editing");
            }
            let order_id = resolve_ref(board, &order)?;
            board.dispatch(BoardEvent::Click(ClickTarget::Grid(Some(order_id))))?;
        }
        ScriptCommand::Edit {
            title,
            table,
            column,
        } => {
            let edit = &mut board.view_mut().edit;
            edit.title = title;
            edit.table = table;
            edit.column = column;
            board.dispatch(BoardEvent::EditSubmit)?;
        }
        ScriptCommand::Delete => board.dispatch(BoardEvent::Click(ClickTarget::EditDelete))?,
        ScriptCommand::CancelEdit => board.dispatch(BoardEvent::Click(ClickTarget::EditCancel))?,
        ScriptCommand::Drag { order, column } => {
            let order_id = resolve_ref(board, &order)?;
            board.dispatch(BoardEvent::DragStart { order_id })?;
            board.dispatch(BoardEvent::DragOver {
                path: vec![
                    ElementData::card(order_id),
                    ElementData::area(column.as_str()),
                ],
            })?;
            board.dispatch(BoardEvent::DragEnd)?;
        }
        ScriptCommand::Help => board.dispatch(BoardEvent::Click(ClickTarget::HelpButton))?,
        ScriptCommand::Show => print!("{}", render_board(board)),
    }
    Ok(())
}

/// Cards in display order: ordered, then preparing, then served.
fn display_order(board: &Board) -> Vec<OrderId> {
    Column::ALL
        .iter()
        .flat_map(|column| board.view().cards(*column).iter().map(|card| card.order_id))
        .collect()
}

fn resolve_ref(board: &Board, order: &OrderRef) -> Result<OrderId> {
    let ids = display_order(board);
    match order {
        OrderRef::Index(index) => ids
            .get(index - 1)
            .copied()
            .ok_or_else(|| anyhow!("no card at position {index}; board has {}", ids.len())),
        OrderRef::Prefix(prefix) => {
            let matches: Vec<OrderId> = ids
                .into_iter()
                .filter(|id| id.0.to_string().starts_with(prefix.as_str()))
                .collect();
            match matches.as_slice() {
                [id] => Ok(*id),
                [] => Err(anyhow!("no order id starts with '{prefix}'")),
                _ => Err(anyhow!("order id prefix '{prefix}' is ambiguous")),
            }
        }
    }
}

fn render_board(board: &Board) -> String {
    let view = board.view();
    let mut out = String::new();
    let mut position = 0;
    for column in Column::ALL {
        let marker = if view.highlighted() == Some(column) {
            " *"
        } else {
            ""
        };
        let _ = writeln!(out, "== {}{marker}", column.label());
        for card in view.cards(column) {
            position += 1;
            let _ = writeln!(
                out,
                "  {position}. [{}] {} (table {}) {}",
                card.order_id.short(),
                card.title,
                card.table,
                card.created_label
            );
        }
    }
    for overlay in [Overlay::Help, Overlay::Add, Overlay::Edit] {
        if view.overlay_open(overlay) {
            let _ = writeln!(out, "-- {overlay:?} overlay open");
        }
    }
    out
}
