//! Terminal frontend for the board controller
//!
//! Type a square (`e2`) to press it, `q`/`r`/`b`/`n` to pick a promotion,
//! `cancel` to abandon one, `quit` to leave.

use anyhow::{Context, Result};
use clap::Parser;
use hotseat_board::core::logging;
use hotseat_board::core::GameSettings;
use hotseat_board::game::types::{PieceKind, Square};
use hotseat_board::game::{BoardController, BoardEvent, BoardInput, ShakmatyEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Play hotseat chess in the terminal")]
struct Args {
    /// Starting position as FEN
    #[arg(long)]
    fen: Option<String>,

    /// Settings file; defaults to settings.json in the user config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Do not list legal-move markers
    #[arg(long)]
    no_hints: bool,

    /// Log filter, e.g. "debug"
    #[arg(long, default_value = "warn")]
    log: String,
}

enum Command {
    Input(BoardInput),
    Board,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "quit" | "exit" => return Some(Command::Quit),
        "board" | "" => return Some(Command::Board),
        "cancel" | "esc" => return Some(Command::Input(BoardInput::PromotionCancelled)),
        _ => {}
    }
    let mut chars = line.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        return PieceKind::from_letter(letter)
            .map(|kind| Command::Input(BoardInput::PromotionPicked(kind)));
    }
    line.parse::<Square>()
        .ok()
        .map(|square| Command::Input(BoardInput::SquarePressed(square)))
}

fn render_board(controller: &BoardController) -> String {
    let mut out = String::new();
    for rank in (1..=8u8).rev() {
        out.push_str(&format!("{} ", rank));
        for file in 0..8u8 {
            let glyph = Square::new(file, rank - 1)
                .and_then(|square| controller.registry().get(square))
                .map(|handle| handle.piece.glyph())
                .unwrap_or('.');
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out.push_str(&format!("{} to move", controller.side_to_move().name()));
    out
}

fn describe(event: &BoardEvent) -> Option<String> {
    let line = match event {
        BoardEvent::HintsShown(set) => {
            let targets: Vec<String> = set
                .markers
                .iter()
                .map(|marker| format!("{}({:?})", marker.square, marker.glyph))
                .collect();
            format!("selected {}: {}", set.selected, targets.join(" "))
        }
        BoardEvent::PromotionChooserShown(layout) => {
            let options: Vec<String> = layout
                .options
                .iter()
                .map(|option| format!("{}={:?}", option.square, option.kind))
                .collect();
            format!("promote: {} (or type q/r/b/n, cancel)", options.join(" "))
        }
        BoardEvent::PromotionChooserDismissed => "promotion chooser closed".to_string(),
        BoardEvent::MoveCommitted(record) => {
            format!("{}. {} {}", record.move_number, record.side.name(), record.mv)
        }
        BoardEvent::MoveRejected { from, to, reason } => {
            format!("{}{} rejected: {}", from, to, reason)
        }
        BoardEvent::PositionResynced { from, to, reason } => {
            format!("{}{} resynced from engine: {}", from, to, reason)
        }
        BoardEvent::Check { side } => format!("{} is in check", side.name()),
        BoardEvent::Checkmate { message, .. } => message.clone(),
        _ => return None,
    };
    Some(line)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(Some(&args.log))?;

    let mut settings = GameSettings::load_or_default(args.settings.as_deref());
    if args.no_hints {
        settings.show_hints = false;
    }
    let engine = match &args.fen {
        Some(fen) => ShakmatyEngine::from_fen(fen).context("could not load starting position")?,
        None => ShakmatyEngine::new(),
    };
    let mut controller = BoardController::new(engine, settings.controller_settings());
    controller.drain_events();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render_board(&controller))?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            writeln!(stdout, "unrecognised input {:?}", line.trim())?;
            continue;
        };
        match command {
            Command::Quit => break,
            Command::Board => writeln!(stdout, "{}", render_board(&controller))?,
            Command::Input(input) => {
                controller.dispatch(input);
                let events = controller.drain_events();
                let committed = events
                    .iter()
                    .any(|event| {
                        matches!(
                            event,
                            BoardEvent::MoveCommitted(_) | BoardEvent::PositionResynced { .. }
                        )
                    });
                for message in events.iter().filter_map(describe) {
                    writeln!(stdout, "{}", message)?;
                }
                if committed {
                    writeln!(stdout, "{}", render_board(&controller))?;
                }
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
