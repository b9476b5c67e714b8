mod geometry;
mod native;
mod toolkit;

use bevy::math::{DVec2, IVec2, Vec2};
use bevy::prelude::*;
use thiserror::Error;

use crate::config::{CURSOR_OFFSET, OverlaySettings};

pub use geometry::{ScreenPoint, WindowGeometry};
pub use native::NativeProvider;
pub use toolkit::ToolkitPointerProvider;

pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        let fallback_on_failure = app
            .world()
            .get_resource::<OverlaySettings>()
            .map(|s| s.fallback_on_native_failure)
            .unwrap_or_default();

        let locator = CursorLocator::detect(fallback_on_failure);
        match locator.accuracy() {
            Accuracy::Exact => info!("Cursor locator: {}", locator.provider_name()),
            Accuracy::Degraded => warn!(
                "Cursor locator: {} (degraded: follows the last pointer position seen by the \
                 overlay)",
                locator.provider_name()
            ),
        }

        // Main thread only: native handles need not be Send
        app.insert_non_send_resource(locator);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor position unavailable: {0}")]
    Unavailable(String),
    #[error("no display connection")]
    NoDisplay,
}

/// How far a provider's answer can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// True global cursor position
    Exact,
    /// Last pointer position seen by our own window; stale outside it
    Degraded,
}

/// What the host can tell a provider about the overlay this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerContext {
    pub geometry: WindowGeometry,
    /// Last pointer position delivered to the window (logical, top-left origin)
    pub last_pointer: Option<Vec2>,
}

/// Source of the global cursor position
pub trait CursorProvider {
    fn name(&self) -> &'static str;

    fn accuracy(&self) -> Accuracy;

    /// Current cursor position in screen pixels. Must report failure rather
    /// than hand back stale data.
    fn locate(&mut self, ctx: &PointerContext) -> Result<ScreenPoint, CursorError>;

    /// Width of the primary screen in physical pixels, if the platform exposes it
    fn primary_screen_width(&self) -> Option<u32> {
        None
    }
}

/// One tick's cursor reading, with the offset used to place the tail head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSample {
    pub screen: ScreenPoint,
    pub offset: IVec2,
}

impl CursorSample {
    /// Window-local logical position the tail head should chase
    pub fn to_window(&self, geometry: &WindowGeometry) -> DVec2 {
        geometry.screen_to_window(self.screen.as_ivec2() + self.offset)
    }
}

/// Picks a provider once at startup and turns its readings into samples.
pub struct CursorLocator {
    primary: Box<dyn CursorProvider>,
    fallback: Option<ToolkitPointerProvider>,
    offset: IVec2,
}

impl CursorLocator {
    pub fn new(primary: Box<dyn CursorProvider>, fallback: Option<ToolkitPointerProvider>) -> Self {
        Self {
            primary,
            fallback,
            offset: CURSOR_OFFSET,
        }
    }

    /// Native provider where the platform has one, toolkit pointer otherwise.
    pub fn detect(fallback_on_failure: bool) -> Self {
        match NativeProvider::detect() {
            Some(native) => {
                let fallback = fallback_on_failure.then_some(ToolkitPointerProvider);
                if fallback.is_some() {
                    info!("Toolkit pointer will stand in if the native query fails");
                }
                Self::new(Box::new(native), fallback)
            }
            None => Self::new(Box::new(ToolkitPointerProvider), None),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn accuracy(&self) -> Accuracy {
        self.primary.accuracy()
    }

    pub fn primary_screen_width(&self) -> Option<u32> {
        self.primary.primary_screen_width()
    }

    /// Read the cursor. An `Err` means the tick must be skipped.
    pub fn locate(&mut self, ctx: &PointerContext) -> Result<CursorSample, CursorError> {
        let screen = match self.primary.locate(ctx) {
            Ok(point) => point,
            Err(err) => match self.fallback.as_mut() {
                Some(fallback) => {
                    log::trace!("{} failed ({}), using {}", self.primary.name(), err, fallback.name());
                    fallback.locate(ctx)?
                }
                None => return Err(err),
            },
        };

        Ok(CursorSample {
            screen,
            offset: self.offset,
        })
    }
}
