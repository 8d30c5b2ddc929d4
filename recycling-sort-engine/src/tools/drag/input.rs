use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};

use super::{PointerDragEvent, PointerPhase};

/// Translate native mouse input into pointer drag phases: left press
/// begins, cursor motion while held changes, release ends. Losing
/// window focus mid-drag (or releasing with the cursor outside the
/// window) is a host interruption and cancels. Registered by the
/// binary only.
pub fn mouse_drag_adapter(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut focus_changed: EventReader<WindowFocused>,
    mut pointer: EventWriter<PointerDragEvent>,
    mut dragging: Local<bool>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    for focus in focus_changed.read() {
        if !focus.focused && *dragging {
            pointer.write(PointerDragEvent {
                phase: PointerPhase::Cancelled,
                position: Vec2::ZERO,
            });
            *dragging = false;
        }
    }

    if buttons.just_pressed(MouseButton::Left) && !*dragging {
        if let Some(position) = window.cursor_position() {
            pointer.write(PointerDragEvent {
                phase: PointerPhase::Began,
                position,
            });
            *dragging = true;
        }
    }

    if *dragging && buttons.pressed(MouseButton::Left) {
        for moved in cursor_moved.read() {
            pointer.write(PointerDragEvent {
                phase: PointerPhase::Changed,
                position: moved.position,
            });
        }
    }

    if *dragging && buttons.just_released(MouseButton::Left) {
        match window.cursor_position() {
            Some(position) => {
                pointer.write(PointerDragEvent {
                    phase: PointerPhase::Ended,
                    position,
                });
            }
            None => {
                pointer.write(PointerDragEvent {
                    phase: PointerPhase::Cancelled,
                    position: Vec2::ZERO,
                });
            }
        }
        *dragging = false;
    }
}
