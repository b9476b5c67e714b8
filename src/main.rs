use bevy::prelude::*;

mod camera;
mod config;
mod cursor;
mod input;
mod tail;

use bevy::window::{MonitorSelection, WindowLevel, WindowPosition, WindowResolution};
use camera::CameraPlugin;
use config::OverlaySettings;
use cursor::CursorPlugin;
use input::InputPlugin;

use crate::tail::TailPlugin;

fn main() {
    let settings = OverlaySettings::load_or_default();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(overlay_window(&settings)),
        ..default()
    }))
    .insert_resource(settings)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(CursorPlugin)
    .add_plugins(TailPlugin);

    app.run();
}

/// Transparent, undecorated, always-on-top overlay window
fn overlay_window(settings: &OverlaySettings) -> Window {
    Window {
        title: settings.title.clone(),
        resolution: WindowResolution::new(settings.width, settings.height),
        resizable: false,
        // Cursor conversion estimates the origin from this until the backend reports one
        position: WindowPosition::Centered(MonitorSelection::Primary),
        decorations: false,
        transparent: true,
        window_level: WindowLevel::AlwaysOnTop,
        #[cfg(target_os = "macos")]
        composite_alpha_mode: bevy::window::CompositeAlphaMode::PostMultiplied,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_window_requests_centred_placement() {
        let window = overlay_window(&OverlaySettings::default());
        assert_eq!(
            window.position,
            WindowPosition::Centered(MonitorSelection::Primary)
        );
    }

    #[test]
    fn test_overlay_window_is_floating_chrome_free() {
        let window = overlay_window(&OverlaySettings::default());
        assert!(window.transparent);
        assert!(!window.decorations);
        assert!(!window.resizable);
        assert_eq!(window.window_level, WindowLevel::AlwaysOnTop);
    }
}
