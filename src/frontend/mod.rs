//! Bevy presentation layer for the board controller
//!
//! A thin 2D adapter: mouse presses become [`BoardInput`](crate::game::BoardInput)s, and every
//! [`BoardEvent`](crate::game::BoardEvent) drained from the controller is
//! turned into sprites, tweens and overlays. No chess logic lives here.
//!
//! # System Ordering
//!
//! 1. `board_input_system` - dispatch presses into the controller
//! 2. `apply_board_events_system` - drain and render queued events
//! 3. `slide_tween_system` - advance piece slides

pub mod events;
pub mod input;
pub mod layout;
pub mod overlays;
pub mod pieces;

use crate::core::GameSettings;
use crate::game::BoardController;
use bevy::prelude::*;
use layout::BoardLayout;

/// Controller aggregate owned by the Bevy world
#[derive(Resource)]
pub struct BoardState {
    pub controller: BoardController,
}

/// Settings the render systems read each frame
#[derive(Resource, Clone, Debug)]
pub struct FrontendSettings(pub GameSettings);

/// Ordering of frontend systems within `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoardSystems {
    Input,
    Render,
    Animate,
}

/// Plugin wiring the controller into a Bevy app
pub struct BoardFrontendPlugin {
    pub settings: GameSettings,
}

impl Plugin for BoardFrontendPlugin {
    fn build(&self, app: &mut App) {
        let controller = BoardController::standard(self.settings.controller_settings());

        app.insert_resource(FrontendSettings(self.settings.clone()))
            .insert_resource(BoardLayout::new(self.settings.tile_size))
            .insert_resource(BoardState { controller })
            .init_resource::<pieces::HandleSprites>()
            .configure_sets(
                Update,
                (BoardSystems::Input, BoardSystems::Render, BoardSystems::Animate).chain(),
            )
            .add_systems(Startup, (setup_camera, layout::spawn_board_squares))
            .add_systems(Update, input::board_input_system.in_set(BoardSystems::Input))
            .add_systems(
                Update,
                events::apply_board_events_system.in_set(BoardSystems::Render),
            )
            .add_systems(Update, pieces::slide_tween_system.in_set(BoardSystems::Animate));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Name::new("Board Camera")));
}
