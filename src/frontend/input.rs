//! Mouse and keyboard input -> [`BoardInput`]
//!
//! Left click on a piece dispatches `HandlePressed`, anywhere else on the
//! board `SquarePressed`. Escape abandons a pending promotion.

use super::layout::BoardLayout;
use super::BoardState;
use crate::game::BoardInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub fn board_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    q_windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    layout: Res<BoardLayout>,
    mut state: ResMut<BoardState>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && state.controller.chooser().is_active() {
        debug!("[INPUT] Escape pressed, cancelling promotion");
        state.controller.dispatch(BoardInput::PromotionCancelled);
    }

    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = q_windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };
    let Some(square) = layout.square_at(world) else {
        trace!("[INPUT] Click at {:?} is off the board", world);
        return;
    };

    // The chooser column covers pieces; route those presses to the square.
    let input = match state.controller.registry().get(square) {
        Some(handle) if !state.controller.chooser().is_active() => {
            BoardInput::HandlePressed(handle.id)
        }
        _ => BoardInput::SquarePressed(square),
    };
    state.controller.dispatch(input);
}
