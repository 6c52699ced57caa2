//! Cartesian geometry for the simulated world.
//!
//! Coordinates are metres in a right-handed frame: `x` east, `y` north,
//! `z` up.  Headings (`yaw`) are degrees counter-clockwise from `+x`, so a
//! positive steering angle turns left.  Single precision is plenty for
//! junction-scale scenes.

use std::ops::{Add, Sub};

/// A point in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Location {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the ground plane.
    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Location) -> f32 {
        (other - self).length()
    }

    /// Distance ignoring elevation.
    #[inline]
    pub fn distance_2d(self, other: Location) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading (degrees) of the vector from `self` to `other`.
    #[inline]
    pub fn yaw_to(self, other: Location) -> f32 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// The point `distance` metres ahead along `yaw_deg`.
    #[inline]
    pub fn project(self, yaw_deg: f32, distance: f32) -> Location {
        self + Vector3::from_yaw(yaw_deg) * distance
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Location, t: f32) -> Location {
        self + (other - self) * t
    }
}

impl Sub for Location {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Location) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector3> for Location {
    type Output = Location;
    #[inline]
    fn add(self, rhs: Vector3) -> Location {
        Location::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Vector3 ───────────────────────────────────────────────────────────────────

/// A displacement or velocity.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Unit vector on the ground plane pointing along `yaw_deg`.
    #[inline]
    pub fn from_yaw(yaw_deg: f32) -> Self {
        let r = yaw_deg.to_radians();
        Self::new(r.cos(), r.sin(), 0.0)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// `z` component of the cross product.  Positive when `other` lies
    /// counter-clockwise (to the left) of `self`.
    #[inline]
    pub fn cross_z(self, other: Vector3) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Unsigned angle between two vectors in degrees; `0` if either is zero.
    pub fn angle_deg(self, other: Vector3) -> f32 {
        let norm = self.length() * other.length();
        if norm <= f32::EPSILON {
            return 0.0;
        }
        (self.dot(other) / norm).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl std::ops::Mul<f32> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, k: f32) -> Vector3 {
        Vector3::new(self.x * k, self.y * k, self.z * k)
    }
}

/// Wrap an angle into `(-180, 180]` degrees.
pub fn normalize_angle_deg(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}
