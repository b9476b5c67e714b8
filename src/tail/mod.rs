pub mod animator;
pub mod render;
pub mod tick;

use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;

use crate::config::{OverlaySettings, TICK_INTERVAL};

pub use render::{CloseAffordance, TailSurface, configure_gizmos, draw_close_affordance, draw_tail};
pub use tick::{AnimatorState, tick_tail};

pub struct TailPlugin;

impl Plugin for TailPlugin {
    fn build(&self, app: &mut App) {
        let close = app
            .world()
            .get_resource::<OverlaySettings>()
            .map(CloseAffordance::from_settings)
            .unwrap_or_default();

        app.init_resource::<AnimatorState>()
            .insert_resource(close)
            .add_systems(Startup, (setup_surface, configure_gizmos))
            .add_systems(
                Update,
                (
                    tick_tail.run_if(on_timer(TICK_INTERVAL)),
                    // Gizmos are immediate mode: redraw the latest snapshot every frame
                    draw_tail,
                    draw_close_affordance,
                )
                    .chain(),
            );
    }
}

fn setup_surface(mut commands: Commands, state: Res<AnimatorState>) {
    let mut surface = TailSurface::default();
    surface.set_points(state.trail.points());
    commands.insert_resource(surface);
    info!(
        "Tail ready: {} points, smoothing {}, tick {:?}",
        state.trail.len(),
        state.trail.alpha(),
        TICK_INTERVAL
    );
}
