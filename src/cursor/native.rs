//! Platform cursor queries.
//!
//! Windows always has `GetCursorPos`. Elsewhere a true global query needs
//! the `global-cursor` feature (`device_query`: X11 on Linux, Quartz on
//! macOS); without it there is no native provider and the toolkit pointer
//! is used instead.

#[allow(unused_imports)]
use super::{Accuracy, CursorError, CursorProvider, PointerContext, ScreenPoint};

#[cfg(windows)]
mod imp {
    use super::*;
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetSystemMetrics, SM_CXSCREEN};

    pub struct NativeProvider;

    impl NativeProvider {
        pub fn detect() -> Option<Self> {
            Some(Self)
        }
    }

    impl CursorProvider for NativeProvider {
        fn name(&self) -> &'static str {
            "GetCursorPos"
        }

        fn accuracy(&self) -> Accuracy {
            Accuracy::Exact
        }

        fn locate(&mut self, _ctx: &PointerContext) -> Result<ScreenPoint, CursorError> {
            let mut point = POINT::default();
            // SAFETY: `point` is a valid, writable POINT for the duration of the call
            unsafe { GetCursorPos(&mut point) }
                .map_err(|e| CursorError::Unavailable(format!("GetCursorPos: {e}")))?;
            Ok(ScreenPoint::new(point.x, point.y))
        }

        fn primary_screen_width(&self) -> Option<u32> {
            // SAFETY: no pointers involved
            let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
            u32::try_from(width).ok().filter(|w| *w > 0)
        }
    }
}

#[cfg(all(not(windows), feature = "global-cursor"))]
mod imp {
    use super::*;
    use device_query::{DeviceQuery, DeviceState};

    /// Global cursor via `device_query`.
    ///
    /// Coordinates come back in the desktop's own units: physical pixels on
    /// X11, points on macOS. The latter are scaled by the overlay's factor,
    /// which is exact on single-DPI setups only.
    pub struct NativeProvider {
        state: DeviceState,
    }

    impl NativeProvider {
        pub fn detect() -> Option<Self> {
            match DeviceState::checked_new() {
                Some(state) => Some(Self { state }),
                None => {
                    log::warn!("device_query could not reach the display server");
                    None
                }
            }
        }
    }

    impl CursorProvider for NativeProvider {
        fn name(&self) -> &'static str {
            "device_query"
        }

        fn accuracy(&self) -> Accuracy {
            Accuracy::Exact
        }

        fn locate(&mut self, ctx: &PointerContext) -> Result<ScreenPoint, CursorError> {
            let (x, y) = self.state.get_mouse().coords;
            if cfg!(target_os = "macos") {
                let scale = ctx.geometry.scale_factor;
                return Ok(ScreenPoint::new(
                    (f64::from(x) * scale).round() as i32,
                    (f64::from(y) * scale).round() as i32,
                ));
            }
            Ok(ScreenPoint::new(x, y))
        }
    }
}

#[cfg(all(not(windows), not(feature = "global-cursor")))]
mod imp {
    use super::*;

    /// Stand-in for platforms without a native query; never selected.
    pub struct NativeProvider {
        _private: (),
    }

    impl NativeProvider {
        pub fn detect() -> Option<Self> {
            None
        }
    }

    impl CursorProvider for NativeProvider {
        fn name(&self) -> &'static str {
            "none"
        }

        fn accuracy(&self) -> Accuracy {
            Accuracy::Degraded
        }

        fn locate(&mut self, _ctx: &PointerContext) -> Result<ScreenPoint, CursorError> {
            Err(CursorError::NoDisplay)
        }
    }
}

pub use imp::NativeProvider;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(not(windows), not(feature = "global-cursor")))]
    #[test]
    fn test_no_native_provider_without_feature() {
        assert!(NativeProvider::detect().is_none());
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_provider_is_exact() {
        let provider = NativeProvider::detect().unwrap();
        assert_eq!(provider.accuracy(), Accuracy::Exact);
    }
}
