use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;
use hotseat_board::core::logging;
use hotseat_board::core::GameSettings;
use hotseat_board::frontend::BoardFrontendPlugin;
use std::path::PathBuf;

/// Hotseat chessboard: two players, one mouse
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings file; defaults to settings.json in the user config directory
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Do not draw legal-move markers
    #[arg(long)]
    no_hints: bool,

    /// Log filter, e.g. "debug" or "hotseat_board=trace"
    #[arg(long)]
    log: Option<String>,
}

const BOARD_MARGIN: f32 = 40.0;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.log.as_deref())?;

    let mut settings = GameSettings::load_or_default(args.settings.as_deref());
    if args.no_hints {
        settings.show_hints = false;
    }

    let side = (settings.tile_size * 8.0 + BOARD_MARGIN * 2.0) as u32;
    let window = Window {
        title: "Hotseat Board".to_string(),
        resolution: (side, side).into(),
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .disable::<bevy::log::LogPlugin>(),
        )
        .insert_resource(ClearColor(Color::srgb(0.19, 0.18, 0.17)))
        .add_plugins(BoardFrontendPlugin { settings })
        .run();

    Ok(())
}
