// tail/animator.rs

use bevy::math::DVec2;

/// Fixed-length chain of points chasing a target.
///
/// Each tick the head covers `alpha` of its remaining distance to the target,
/// then every following point covers `alpha` of its distance to the point in
/// front of it, reading that point's value from *this* tick. Processing runs
/// strictly head to tail so a jump propagates down the whole chain in one
/// tick. There is no velocity state: points approach their attractors
/// asymptotically and never overshoot.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail<const N: usize> {
    points: [DVec2; N],
    alpha: f64,
}

impl<const N: usize> Trail<N> {
    /// All points start at the window origin
    pub fn new(alpha: f64) -> Self {
        let clamped = alpha.clamp(f64::EPSILON, 1.0 - f64::EPSILON);
        if clamped != alpha {
            log::warn!("Smoothing factor {} outside (0, 1), using {}", alpha, clamped);
        }

        Self {
            points: [DVec2::ZERO; N],
            alpha: clamped,
        }
    }

    /// Advance every point one tick toward `target` and return a copy of the chain
    pub fn advance(&mut self, target: DVec2) -> [DVec2; N] {
        let mut attractor = target;
        for point in &mut self.points {
            *point += (attractor - *point) * self.alpha;
            attractor = *point;
        }
        self.points
    }

    pub fn points(&self) -> &[DVec2; N] {
        &self.points
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn len(&self) -> usize {
        N
    }
}
