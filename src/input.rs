use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};

use crate::tail::CloseAffordance;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LastPointer>()
            .add_systems(Update, (track_last_pointer, close_on_escape, handle_window_press));
    }
}

/// Last pointer position the toolkit delivered to the overlay.
/// Window (logical) coordinates, top-left origin; `None` until the pointer
/// first crosses the window.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct LastPointer(pub Option<Vec2>);

/// The toolkit only reports moves over the overlay; the value goes stale,
/// rather than `None`, once the pointer leaves
fn track_last_pointer(mut moves: MessageReader<CursorMoved>, mut last: ResMut<LastPointer>) {
    if let Some(latest) = moves.read().last() {
        last.0 = Some(latest.position);
    }
}

fn close_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Escape pressed - closing overlay");
        exit.write(AppExit::Success);
    }
}

/// Left press: close if on the close box, otherwise drag the window
fn handle_window_press(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    close: Res<CloseAffordance>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: MessageWriter<AppExit>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let on_close = window
        .cursor_position()
        .is_some_and(|p| close.contains(p, window.width()));

    if on_close {
        info!("Close button clicked - closing overlay");
        exit.write(AppExit::Success);
    } else {
        window.start_drag_move();
    }
}
