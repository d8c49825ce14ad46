use core::ops::{Add, Mul, Sub};

use super::Vec2;

/// 3D point in iso space. `z` is the vertical axis.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Horizontal (x, y) component.
    #[inline]
    pub fn planar(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Distance in the x-y plane; `z` does not contribute.
    #[inline]
    pub fn planar_distance(self, other: Vec3) -> f32 {
        (other.planar() - self.planar()).length()
    }

    /// Isometric depth key. Larger values are closer to the viewer.
    #[inline]
    pub fn depth(self) -> f32 {
        self.x + self.y
    }

    #[inline]
    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        self + (to - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
