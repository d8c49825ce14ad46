use crate::coords::Vec3;

/// Extra height above the higher endpoint that every jump clears.
pub const ARC_CLEARANCE: f32 = 1.0;

/// Jump curve: x and y move linearly, z follows a downward parabola.
///
/// With `s` the fraction of planar distance covered from the lower endpoint,
/// `h` the height difference and `o` the clearance, the curve passes through
/// `(0, 0)` and `(1, h)` and peaks at `h + o` when `s = summit`:
///
/// `summit = ((h + o) - sqrt(o * (h + o))) / h`, or `0.5` when `h == 0`.
///
/// Jumping down plays the same curve from the far end, so the arc always
/// rises away from the lower endpoint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParabolicArc {
    start: Vec3,
    destination: Vec3,
    floor: f32,
    height: f32,
    summit: f32,
    reversed: bool,
}

impl ParabolicArc {
    pub fn new(start: Vec3, destination: Vec3) -> Self {
        let floor = start.z.min(destination.z);
        let height = start.z.max(destination.z) - floor;
        let peak = height + ARC_CLEARANCE;

        let summit = if height > 0.0 {
            (peak - (ARC_CLEARANCE * peak).sqrt()) / height
        } else {
            0.5
        };

        Self {
            start,
            destination,
            floor,
            height,
            summit,
            reversed: start.z > floor,
        }
    }

    #[inline]
    pub fn start(&self) -> Vec3 {
        self.start
    }

    #[inline]
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Highest z reached along the curve.
    #[inline]
    pub fn apex(&self) -> f32 {
        self.floor + self.height + ARC_CLEARANCE
    }

    /// Relative time `t` at which the apex is reached.
    #[inline]
    pub fn apex_time(&self) -> f32 {
        if self.reversed { 1.0 - self.summit } else { self.summit }
    }

    pub(crate) fn compute(&self, t: f32) -> Vec3 {
        let s = if self.reversed { 1.0 - t } else { t };
        let peak = self.height + ARC_CLEARANCE;
        let d = s - self.summit;
        let z = -peak / (self.summit * self.summit) * d * d + peak + self.floor;

        Vec3::new(
            self.start.x + (self.destination.x - self.start.x) * t,
            self.start.y + (self.destination.y - self.start.y) * t,
            z,
        )
    }
}
