// tail/render.rs

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::camera::{MainCamera, viewport_to_ground};
use crate::config::OverlaySettings;
use crate::cursor::CursorSample;

/// Render target for the tail: the latest snapshot, replaced wholesale each tick
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct TailSurface {
    /// Window-local logical coordinates, head first
    pub points: Vec<Vec2>,
}

impl TailSurface {
    pub fn set_points(&mut self, points: &[DVec2]) {
        self.points = points.iter().map(|p| p.as_vec2()).collect();
    }
}

/// Close button shown while the cursor is near the right edge of the screen
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CloseAffordance {
    pub visible: bool,
    /// Fraction of the primary screen width
    pub threshold: f32,
    /// Side of the box in logical pixels, anchored to the window's top-right
    pub size: f32,
}

impl Default for CloseAffordance {
    fn default() -> Self {
        Self::from_settings(&OverlaySettings::default())
    }
}

impl CloseAffordance {
    pub fn from_settings(settings: &OverlaySettings) -> Self {
        Self {
            visible: false,
            threshold: settings.close_threshold,
            size: settings.close_size,
        }
    }

    /// Recompute visibility from this tick's cursor sample.
    /// Hidden when the screen width is unknown.
    pub fn update(&mut self, sample: &CursorSample, screen_width: Option<u32>) {
        self.visible = screen_width
            .map(|width| sample.screen.x as f32 > width as f32 * self.threshold)
            .unwrap_or(false);
    }

    /// Is a window-local logical point inside the close box?
    pub fn contains(&self, local: Vec2, window_width: f32) -> bool {
        self.visible
            && local.x >= window_width - self.size
            && local.x <= window_width
            && local.y >= 0.0
            && local.y <= self.size
    }
}

/// Apply line settings to the default gizmo group
pub fn configure_gizmos(settings: Res<OverlaySettings>, mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = settings.line_width;
    config.line.joints = GizmoLineJoint::Round(8);
}

/// System: draw the tail as a connected line through the surface points
pub fn draw_tail(
    surface: Res<TailSurface>,
    settings: Res<OverlaySettings>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut gizmos: Gizmos,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let world_points: Vec<Vec3> = surface
        .points
        .iter()
        .filter_map(|p| viewport_to_ground(camera, camera_transform, *p))
        .collect();

    if world_points.len() < 2 {
        return;
    }

    gizmos.linestrip(world_points, settings.line_color());
}

/// System: draw the close box as an "×" while visible
pub fn draw_close_affordance(
    close: Res<CloseAffordance>,
    settings: Res<OverlaySettings>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut gizmos: Gizmos,
) {
    if !close.visible {
        return;
    }
    let (Ok(window), Ok((camera, camera_transform))) = (windows.single(), camera_query.single())
    else {
        return;
    };

    let inset = close.size * 0.25;
    let left = window.width() - close.size + inset;
    let right = window.width() - inset;
    let top = inset;
    let bottom = close.size - inset;

    let corners = [
        (Vec2::new(left, top), Vec2::new(right, bottom)),
        (Vec2::new(right, top), Vec2::new(left, bottom)),
    ];
    for (from, to) in corners {
        let (Some(from), Some(to)) = (
            viewport_to_ground(camera, camera_transform, from),
            viewport_to_ground(camera, camera_transform, to),
        ) else {
            continue;
        };
        gizmos.line(from, to, settings.line_color());
    }
}
