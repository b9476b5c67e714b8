use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::config::OverlaySettings;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        // Transparent window: only the tail shows
        app.insert_resource(ClearColor(Color::NONE))
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Overlay camera: orthographic, looking straight down at the y=0 plane.
///
/// The visible height is pinned to the window's logical height so one world
/// unit is one logical pixel and line widths stay in screen pixels. The
/// window is not resizable, so this never needs updating. The tail itself
/// lives in window coordinates and goes through `viewport_to_ground` only
/// when drawn.
fn setup_camera(mut commands: Commands, settings: Res<OverlaySettings>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: settings.height as f32,
        },
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        // +Z is screen-up, so window +Y (down) maps to world -Z
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        MainCamera,
    ));
}

/// Map a window position (logical, top-left origin) onto the drawing plane.
/// `None` until the camera has a computed viewport.
pub fn viewport_to_ground(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    window_position: Vec2,
) -> Option<Vec3> {
    let ray = camera.viewport_to_world(camera_transform, window_position).ok()?;
    // Straight-down camera: the ray always crosses y=0
    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
    Some(ray.get_point(distance))
}
