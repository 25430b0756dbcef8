//! Plain 2D value types shared by the layout, edge geometry and parse tree.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Components below this magnitude are treated as a zero vector.
pub const MAGNITUDE_EPSILON: f64 = 1e-8;

/// 2D vector in canvas space (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component.
	pub y: f64,
}

impl Vec2 {
	/// The zero vector.
	pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

	/// Builds a vector from its components.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean length, or `fallback` when the vector is (numerically) zero.
	///
	/// The larger component is factored out before squaring so huge and tiny
	/// inputs neither overflow nor underflow.
	pub fn length_or(self, fallback: f64) -> f64 {
		let (x, y) = (self.x.abs(), self.y.abs());
		let m = x.max(y);
		if m < MAGNITUDE_EPSILON {
			return fallback;
		}
		let (x, y) = (x / m, y / m);
		m * (x * x + y * y).sqrt()
	}

	/// Euclidean length; zero for the zero vector.
	pub fn length(self) -> f64 {
		self.length_or(0.0)
	}

	/// Unit vector in the same direction. A zero vector stays zero.
	pub fn normalized(self) -> Self {
		let len = self.length_or(1.0);
		Self::new(self.x / len, self.y / len)
	}

	/// Counter-clockwise perpendicular in a y-down space: `(-y, x)`.
	pub fn perp(self) -> Self {
		Self::new(-self.y, self.x)
	}

	/// Dot product.
	pub fn dot(self, other: Self) -> f64 {
		self.x * other.x + self.y * other.y
	}

	/// z-component of the 3D cross product.
	pub fn cross(self, other: Self) -> f64 {
		self.x * other.y - self.y * other.x
	}

	/// Point on the unit circle at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}

	/// Linear interpolation toward `other`.
	pub fn lerp(self, other: Self, t: f64) -> Self {
		self + (other - self) * t
	}

	/// Whether both components are finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Vec2 {
	type Output = Self;
	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vec2 {
	type Output = Self;
	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vec2 {
	type Output = Self;
	fn mul(self, rhs: f64) -> Self {
		Self::new(self.x * rhs, self.y * rhs)
	}
}

impl Neg for Vec2 {
	type Output = Self;
	fn neg(self) -> Self {
		Self::new(-self.x, -self.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Self) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Self) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

/// Axis-aligned rectangle given by its two extreme corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Top-left corner.
	pub min: Vec2,
	/// Bottom-right corner.
	pub max: Vec2,
}

impl Bounds {
	/// Rectangle spanning `min..=max`.
	pub const fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	/// Rectangle anchored at the origin with the given size.
	pub fn from_size(size: Vec2) -> Self {
		Self::new(Vec2::ZERO, size)
	}

	/// Smallest rectangle containing every point, `None` when empty.
	pub fn enclosing(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
		let mut points = points.into_iter();
		let first = points.next()?;
		Some(points.fold(Self::new(first, first), |b, p| {
			Self::new(
				Vec2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
				Vec2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
			)
		}))
	}

	/// Shrinks the rectangle by half of `margins` on every side.
	pub fn inset(self, margins: Vec2) -> Self {
		let half = margins * 0.5;
		Self::new(self.min + half, self.max - half)
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}
}

/// Bounding rectangle of a rendered label, anchored at its text baseline.
///
/// `(x, y)` is the baseline origin handed to `fill_text`; the glyph occupies
/// `x..x + width` horizontally and `y - height..y` vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphBox {
	/// Baseline origin, horizontal.
	pub x: f64,
	/// Baseline origin, vertical.
	pub y: f64,
	/// Advance width of the label.
	pub width: f64,
	/// Row height the label occupies above its baseline.
	pub height: f64,
}

impl GlyphBox {
	/// Baseline origin as a vector.
	pub fn origin(&self) -> Vec2 {
		Vec2::new(self.x, self.y)
	}

	/// Horizontal center of the label.
	pub fn center_x(&self) -> f64 {
		self.x + self.width / 2.0
	}

	/// Right edge of the label.
	pub fn right(&self) -> f64 {
		self.x + self.width
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn length_matches_hypot() {
		let v = Vec2::new(3.0, -4.0);
		assert!((v.length() - 5.0).abs() < 1e-12);
		let big = Vec2::new(1e200, 1e200);
		assert!(big.length().is_finite());
	}

	#[test]
	fn zero_vector_uses_fallback() {
		assert_eq!(Vec2::ZERO.length_or(7.0), 7.0);
		assert_eq!(Vec2::new(1e-9, -1e-9).length_or(1.0), 1.0);
		assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
	}

	#[test]
	fn cross_sign_tracks_turn_direction() {
		let right = Vec2::new(1.0, 0.0);
		let down = Vec2::new(0.0, 1.0);
		assert!(right.cross(down) > 0.0);
		assert!(down.cross(right) < 0.0);
		assert_eq!(right.perp(), down);
	}

	#[test]
	fn enclosing_bounds() {
		let b = Bounds::enclosing([
			Vec2::new(1.0, 5.0),
			Vec2::new(-2.0, 3.0),
			Vec2::new(4.0, 4.0),
		])
		.unwrap();
		assert_eq!(b.min, Vec2::new(-2.0, 3.0));
		assert_eq!(b.max, Vec2::new(4.0, 5.0));
		assert!(Bounds::enclosing(std::iter::empty()).is_none());
	}
}
