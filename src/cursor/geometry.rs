use bevy::math::{DVec2, IVec2, UVec2, Vec2};
use bevy::window::{Monitor, Window, WindowPosition};

/// Global cursor position in virtual-desktop physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for ScreenPoint {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Where the overlay sits on the desktop, queried from the host every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowGeometry {
    /// Top-left corner on the virtual desktop, physical pixels
    pub origin: IVec2,
    /// Physical size
    pub size: UVec2,
    /// Physical pixels per logical unit
    pub scale_factor: f64,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            origin: IVec2::ZERO,
            size: UVec2::ZERO,
            scale_factor: 1.0,
        }
    }
}

impl WindowGeometry {
    /// Read geometry off a host window.
    ///
    /// The overlay asks to be centred on the primary monitor; until the
    /// windowing backend reports a concrete `At` position the origin is
    /// derived from that request. Without a monitor the origin is the
    /// desktop origin (Wayland never reports one).
    pub fn from_window(window: &Window, monitor: Option<&Monitor>) -> Self {
        let size = UVec2::new(window.physical_width(), window.physical_height());
        let monitor_bounds = monitor.map(|m| {
            (
                m.physical_position,
                UVec2::new(m.physical_width, m.physical_height),
            )
        });
        Self::from_parts(
            window.position,
            size,
            f64::from(window.scale_factor()),
            monitor_bounds,
        )
    }

    /// `monitor` is the primary monitor's (top-left, physical size)
    fn from_parts(
        position: WindowPosition,
        size: UVec2,
        scale_factor: f64,
        monitor: Option<(IVec2, UVec2)>,
    ) -> Self {
        let centred = || {
            monitor
                .map(|(corner, extent)| corner + (extent.as_ivec2() - size.as_ivec2()) / 2)
                .unwrap_or(IVec2::ZERO)
        };
        let origin = match position {
            WindowPosition::At(pos) => pos,
            WindowPosition::Centered(_) => centred(),
            // Never requested by the overlay: the OS picks the spot, so
            // centred placement is only a guess here
            WindowPosition::Automatic => {
                log::debug!("Window position is Automatic; guessing centred placement");
                centred()
            }
        };

        Self {
            origin,
            size,
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
        }
    }

    /// Screen pixels → window-local logical units
    pub fn screen_to_window(&self, screen: IVec2) -> DVec2 {
        (screen - self.origin).as_dvec2() / self.scale_factor
    }

    /// Window-local logical units → screen pixels (rounded)
    pub fn window_to_screen(&self, local: Vec2) -> IVec2 {
        let physical = local.as_dvec2() * self.scale_factor;
        self.origin + physical.round().as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::window::MonitorSelection;

    #[test]
    fn test_screen_to_window_subtracts_origin() {
        let geometry = WindowGeometry {
            origin: IVec2::new(100, 200),
            size: UVec2::new(400, 300),
            scale_factor: 1.0,
        };
        let local = geometry.screen_to_window(IVec2::new(150, 260));
        assert_eq!(local, DVec2::new(50.0, 60.0));
    }

    #[test]
    fn test_screen_to_window_applies_scale() {
        let geometry = WindowGeometry {
            origin: IVec2::new(100, 100),
            size: UVec2::new(800, 600),
            scale_factor: 2.0,
        };
        let local = geometry.screen_to_window(IVec2::new(300, 140));
        assert_eq!(local, DVec2::new(100.0, 20.0));
    }

    #[test]
    fn test_cursor_left_of_window_is_negative() {
        let geometry = WindowGeometry {
            origin: IVec2::new(500, 500),
            ..Default::default()
        };
        let local = geometry.screen_to_window(IVec2::new(480, 520));
        assert_eq!(local, DVec2::new(-20.0, 20.0));
    }

    const FULL_HD: (IVec2, UVec2) = (IVec2::ZERO, UVec2::new(1920, 1080));

    #[test]
    fn test_reported_position_is_used_as_is() {
        let geometry = WindowGeometry::from_parts(
            WindowPosition::At(IVec2::new(-300, 75)),
            UVec2::new(480, 360),
            1.0,
            Some(FULL_HD),
        );
        assert_eq!(geometry.origin, IVec2::new(-300, 75));
    }

    #[test]
    fn test_centred_window_origin_from_monitor() {
        let geometry = WindowGeometry::from_parts(
            WindowPosition::Centered(MonitorSelection::Primary),
            UVec2::new(480, 360),
            1.0,
            Some((IVec2::new(1920, 0), UVec2::new(1920, 1080))),
        );
        assert_eq!(geometry.origin, IVec2::new(2640, 360));
    }

    #[test]
    fn test_centred_without_monitor_is_desktop_origin() {
        let geometry = WindowGeometry::from_parts(
            WindowPosition::Centered(MonitorSelection::Primary),
            UVec2::new(480, 360),
            1.0,
            None,
        );
        assert_eq!(geometry.origin, IVec2::ZERO);
    }

    #[test]
    fn test_non_positive_scale_factor_falls_back_to_one() {
        for scale in [0.0, -2.0] {
            let geometry = WindowGeometry::from_parts(
                WindowPosition::At(IVec2::ZERO),
                UVec2::new(480, 360),
                scale,
                None,
            );
            assert_eq!(geometry.scale_factor, 1.0);
        }
    }

    #[test]
    fn test_from_window_reads_reported_position() {
        let window = Window {
            position: WindowPosition::At(IVec2::new(40, 60)),
            ..Default::default()
        };
        let geometry = WindowGeometry::from_window(&window, None);
        assert_eq!(geometry.origin, IVec2::new(40, 60));
        assert_eq!(
            geometry.size,
            UVec2::new(window.physical_width(), window.physical_height())
        );
    }

    #[test]
    fn test_window_to_screen_inverts_conversion() {
        let geometry = WindowGeometry {
            origin: IVec2::new(-1920, 40),
            size: UVec2::new(600, 400),
            scale_factor: 1.5,
        };
        let screen = geometry.window_to_screen(Vec2::new(10.0, 20.0));
        assert_eq!(screen, IVec2::new(-1905, 70));
        assert_eq!(geometry.screen_to_window(screen), DVec2::new(10.0, 20.0));
    }
}
