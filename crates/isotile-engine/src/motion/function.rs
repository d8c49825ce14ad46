use crate::coords::Vec3;

use super::ParabolicArc;

/// Straight-line interpolation of all three coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Linear {
    start: Vec3,
    destination: Vec3,
}

impl Linear {
    pub fn new(start: Vec3, destination: Vec3) -> Self {
        Self { start, destination }
    }

    #[inline]
    fn compute(&self, t: f32) -> Vec3 {
        self.start.lerp(self.destination, t)
    }
}

/// Closed set of motion curves.
///
/// New curve kinds are added as a variant here plus a matching arm in
/// `start`, `destination` and `compute`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MotionFunction {
    Linear(Linear),
    ParabolicArc(ParabolicArc),
}

impl MotionFunction {
    #[inline]
    pub fn linear(start: Vec3, destination: Vec3) -> Self {
        MotionFunction::Linear(Linear::new(start, destination))
    }

    #[inline]
    pub fn parabolic_arc(start: Vec3, destination: Vec3) -> Self {
        MotionFunction::ParabolicArc(ParabolicArc::new(start, destination))
    }

    pub fn start(&self) -> Vec3 {
        match self {
            MotionFunction::Linear(f) => f.start,
            MotionFunction::ParabolicArc(f) => f.start(),
        }
    }

    pub fn destination(&self) -> Vec3 {
        match self {
            MotionFunction::Linear(f) => f.destination,
            MotionFunction::ParabolicArc(f) => f.destination(),
        }
    }

    /// Position at relative time `t`. `t <= 0` is the start, `t >= 1` the destination.
    pub fn at(&self, t: f32) -> Vec3 {
        if t <= 0.0 {
            self.start()
        } else if t >= 1.0 {
            self.destination()
        } else {
            match self {
                MotionFunction::Linear(f) => f.compute(t),
                MotionFunction::ParabolicArc(f) => f.compute(t),
            }
        }
    }

    /// Planar (x, y) length, used to turn a speed into a frame budget.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start().planar_distance(self.destination())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        let f = MotionFunction::linear(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(f.at(0.5), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn out_of_range_time_clamps_to_endpoints() {
        let start = Vec3::new(0.1, 0.2, 0.3);
        let end = Vec3::new(7.7, -3.3, 1.1);
        for f in [MotionFunction::linear(start, end), MotionFunction::parabolic_arc(start, end)] {
            assert_eq!(f.at(-2.0), start);
            assert_eq!(f.at(0.0), start);
            assert_eq!(f.at(1.0), end);
            assert_eq!(f.at(3.0), end);
        }
    }

    #[test]
    fn length_is_planar() {
        let f = MotionFunction::linear(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 9.0));
        assert_eq!(f.length(), 5.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_point() -> impl Strategy<Value = Vec3> {
        (-50.0f32..50.0, -50.0f32..50.0, -5.0f32..5.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn endpoints_are_exact(start in arb_point(), end in arb_point()) {
            for f in [MotionFunction::linear(start, end), MotionFunction::parabolic_arc(start, end)] {
                prop_assert_eq!(f.at(0.0), start);
                prop_assert_eq!(f.at(1.0), end);
            }
        }
    }
}
