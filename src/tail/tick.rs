// tail/tick.rs

use bevy::prelude::*;
use bevy::window::{Monitor, PrimaryMonitor, PrimaryWindow};

use crate::config::{SMOOTHING, TAIL_LENGTH};
use crate::cursor::{CursorError, CursorLocator, CursorSample, PointerContext, WindowGeometry};
use crate::input::LastPointer;
use crate::tail::animator::Trail;
use crate::tail::render::{CloseAffordance, TailSurface};

pub type PetTrail = Trail<TAIL_LENGTH>;

/// Animator state owned by the tick loop
#[derive(Resource, Debug)]
pub struct AnimatorState {
    pub trail: PetTrail,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            trail: PetTrail::new(SMOOTHING),
        }
    }
}

/// What happened on one tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Trail advanced and the surface got the new points
    Rendered(CursorSample),
    /// Trail advanced but there was nowhere to draw it
    AdvancedUnrendered(CursorSample),
    /// Cursor unavailable; trail left exactly as it was
    Skipped(CursorError),
}

impl TickOutcome {
    pub fn sample(&self) -> Option<&CursorSample> {
        match self {
            TickOutcome::Rendered(sample) | TickOutcome::AdvancedUnrendered(sample) => Some(sample),
            TickOutcome::Skipped(_) => None,
        }
    }
}

/// One tick: locate the cursor, advance the trail, hand the points to the surface.
///
/// A failed locate skips the whole tick so the trail never chases an
/// undefined target.
pub fn step<const N: usize>(
    locator: &mut CursorLocator,
    ctx: &PointerContext,
    trail: &mut Trail<N>,
    surface: Option<&mut TailSurface>,
) -> TickOutcome {
    let sample = match locator.locate(ctx) {
        Ok(sample) => sample,
        Err(err) => return TickOutcome::Skipped(err),
    };

    let target = sample.to_window(&ctx.geometry);
    let points = trail.advance(target);

    match surface {
        Some(surface) => {
            surface.set_points(&points);
            TickOutcome::Rendered(sample)
        }
        None => TickOutcome::AdvancedUnrendered(sample),
    }
}

/// System: one animation tick, gated by the tick timer
pub fn tick_tail(
    mut locator: NonSendMut<CursorLocator>,
    mut state: ResMut<AnimatorState>,
    surface: Option<ResMut<TailSurface>>,
    mut close: ResMut<CloseAffordance>,
    last_pointer: Res<LastPointer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    monitors: Query<&Monitor, With<PrimaryMonitor>>,
) {
    // Window already closing
    let Ok(window) = windows.single() else {
        return;
    };
    let monitor = monitors.single().ok();

    let ctx = PointerContext {
        geometry: WindowGeometry::from_window(window, monitor),
        last_pointer: last_pointer.0,
    };

    let surface = surface.map(ResMut::into_inner);
    let outcome = step(&mut locator, &ctx, &mut state.trail, surface);

    match &outcome {
        TickOutcome::Rendered(_) => {}
        TickOutcome::AdvancedUnrendered(_) => debug!("Tail surface missing, skipped render"),
        TickOutcome::Skipped(err) => trace!("Skipping tick: {}", err),
    }

    if let Some(sample) = outcome.sample() {
        let screen_width = locator
            .primary_screen_width()
            .or_else(|| monitor.map(|m| m.physical_width));
        close.update(sample, screen_width);
    }
}
