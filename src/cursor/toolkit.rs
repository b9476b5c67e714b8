use super::{Accuracy, CursorError, CursorProvider, PointerContext, ScreenPoint};

/// Falls back on the host toolkit's last pointer position.
///
/// The toolkit only hears about the pointer while it moves over the overlay,
/// so this lags behind the real cursor once it leaves the window, and reads
/// as the window's own origin until the pointer has entered at least once.
/// That is the accepted degraded mode on platforms without a global query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolkitPointerProvider;

impl CursorProvider for ToolkitPointerProvider {
    fn name(&self) -> &'static str {
        "toolkit pointer"
    }

    fn accuracy(&self) -> Accuracy {
        Accuracy::Degraded
    }

    fn locate(&mut self, ctx: &PointerContext) -> Result<ScreenPoint, CursorError> {
        let local = ctx.last_pointer.unwrap_or_default();
        Ok(ctx.geometry.window_to_screen(local).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::WindowGeometry;
    use bevy::math::{IVec2, UVec2, Vec2};

    fn ctx(last_pointer: Option<Vec2>, scale_factor: f64) -> PointerContext {
        PointerContext {
            geometry: WindowGeometry {
                origin: IVec2::new(200, 100),
                size: UVec2::new(480, 360),
                scale_factor,
            },
            last_pointer,
        }
    }

    #[test]
    fn test_reads_window_origin_before_pointer_enters() {
        let mut provider = ToolkitPointerProvider;
        let point = provider.locate(&ctx(None, 1.0)).unwrap();
        assert_eq!(point, ScreenPoint::new(200, 100));
    }

    #[test]
    fn test_maps_last_pointer_to_screen() {
        let mut provider = ToolkitPointerProvider;
        let point = provider.locate(&ctx(Some(Vec2::new(30.0, 40.0)), 2.0)).unwrap();
        assert_eq!(point, ScreenPoint::new(260, 180));
    }

    #[test]
    fn test_is_degraded() {
        assert_eq!(ToolkitPointerProvider.accuracy(), Accuracy::Degraded);
        assert_eq!(ToolkitPointerProvider.primary_screen_width(), None);
    }
}
