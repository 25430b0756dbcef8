//! Drawing surface contract used by the renderers.
//!
//! The core never touches the DOM directly; it draws through [`Surface`], which
//! is implemented for the browser's `CanvasRenderingContext2d` and for a
//! recording surface in tests.

use log::warn;
use web_sys::CanvasRenderingContext2d;

use crate::geometry::Vec2;

/// Horizontal advance of a measured label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
	/// Advance width.
	pub width: f64,
}

/// Text measurement, the only surface capability the trace stepper needs.
pub trait TextMeasure {
	/// Measures `text` rendered with the CSS `font` string.
	fn measure_text(&self, text: &str, font: &str) -> TextMetrics;
}

/// Path, fill and text primitives in a y-down coordinate space.
pub trait Surface: TextMeasure {
	/// Starts a new path.
	fn begin_path(&self);
	/// Moves the pen without drawing.
	fn move_to(&self, p: Vec2);
	/// Adds a straight segment to the path.
	fn line_to(&self, p: Vec2);
	/// Adds a circular arc to the path.
	fn arc(&self, center: Vec2, radius: f64, start: f64, end: f64, counter_clockwise: bool);
	/// Closes the current subpath.
	fn close_path(&self);
	/// Strokes the current path.
	fn stroke(&self);
	/// Fills the current path.
	fn fill(&self);
	/// Fills an axis-aligned rectangle with the current fill style.
	fn fill_rect(&self, origin: Vec2, size: Vec2);
	/// Sets the CSS fill color.
	fn set_fill_style(&self, style: &str);
	/// Sets the CSS stroke color.
	fn set_stroke_style(&self, style: &str);
	/// Sets the stroke width.
	fn set_line_width(&self, width: f64);
	/// Sets the CSS font used by [`Surface::fill_text`].
	fn set_font(&self, font: &str);
	/// Sets the opacity applied to every following primitive.
	fn set_global_alpha(&self, alpha: f64);
	/// Draws `text` with its baseline origin at `origin`.
	fn fill_text(&self, text: &str, origin: Vec2);
}

impl TextMeasure for CanvasRenderingContext2d {
	fn measure_text(&self, text: &str, font: &str) -> TextMetrics {
		self.set_font(font);
		match CanvasRenderingContext2d::measure_text(self, text) {
			Ok(m) => TextMetrics { width: m.width() },
			Err(err) => {
				warn!("measureText failed for {:?}: {:?}", text, err);
				TextMetrics::default()
			}
		}
	}
}

impl Surface for CanvasRenderingContext2d {
	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&self, p: Vec2) {
		CanvasRenderingContext2d::move_to(self, p.x, p.y);
	}

	fn line_to(&self, p: Vec2) {
		CanvasRenderingContext2d::line_to(self, p.x, p.y);
	}

	fn arc(&self, center: Vec2, radius: f64, start: f64, end: f64, counter_clockwise: bool) {
		let _ = self.arc_with_anticlockwise(center.x, center.y, radius, start, end, counter_clockwise);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn fill_rect(&self, origin: Vec2, size: Vec2) {
		CanvasRenderingContext2d::fill_rect(self, origin.x, origin.y, size.x, size.y);
	}

	fn set_fill_style(&self, style: &str) {
		self.set_fill_style_str(style);
	}

	fn set_stroke_style(&self, style: &str) {
		self.set_stroke_style_str(style);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn set_global_alpha(&self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn fill_text(&self, text: &str, origin: Vec2) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, origin.x, origin.y);
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory surface that records every primitive.

	use std::cell::RefCell;

	use super::{Surface, TextMeasure, TextMetrics};
	use crate::geometry::Vec2;

	/// Advance width per character reported by [`RecordingSurface`].
	pub const CHAR_WIDTH: f64 = 10.0;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		BeginPath,
		MoveTo(Vec2),
		LineTo(Vec2),
		Arc {
			center: Vec2,
			radius: f64,
			start: f64,
			end: f64,
			counter_clockwise: bool,
		},
		ClosePath,
		Stroke,
		Fill,
		FillRect(Vec2, Vec2),
		FillStyle(String),
		StrokeStyle(String),
		LineWidth(f64),
		Font(String),
		GlobalAlpha(f64),
		FillText(String, Vec2),
	}

	/// Monospace surface: every character is [`CHAR_WIDTH`] wide.
	#[derive(Default)]
	pub struct RecordingSurface {
		pub ops: RefCell<Vec<Op>>,
	}

	impl RecordingSurface {
		pub fn take(&self) -> Vec<Op> {
			std::mem::take(&mut *self.ops.borrow_mut())
		}

		fn push(&self, op: Op) {
			self.ops.borrow_mut().push(op);
		}
	}

	impl TextMeasure for RecordingSurface {
		fn measure_text(&self, text: &str, _font: &str) -> TextMetrics {
			TextMetrics {
				width: text.chars().count() as f64 * CHAR_WIDTH,
			}
		}
	}

	impl Surface for RecordingSurface {
		fn begin_path(&self) {
			self.push(Op::BeginPath);
		}
		fn move_to(&self, p: Vec2) {
			self.push(Op::MoveTo(p));
		}
		fn line_to(&self, p: Vec2) {
			self.push(Op::LineTo(p));
		}
		fn arc(&self, center: Vec2, radius: f64, start: f64, end: f64, counter_clockwise: bool) {
			self.push(Op::Arc {
				center,
				radius,
				start,
				end,
				counter_clockwise,
			});
		}
		fn close_path(&self) {
			self.push(Op::ClosePath);
		}
		fn stroke(&self) {
			self.push(Op::Stroke);
		}
		fn fill(&self) {
			self.push(Op::Fill);
		}
		fn fill_rect(&self, origin: Vec2, size: Vec2) {
			self.push(Op::FillRect(origin, size));
		}
		fn set_fill_style(&self, style: &str) {
			self.push(Op::FillStyle(style.into()));
		}
		fn set_stroke_style(&self, style: &str) {
			self.push(Op::StrokeStyle(style.into()));
		}
		fn set_line_width(&self, width: f64) {
			self.push(Op::LineWidth(width));
		}
		fn set_font(&self, font: &str) {
			self.push(Op::Font(font.into()));
		}
		fn set_global_alpha(&self, alpha: f64) {
			self.push(Op::GlobalAlpha(alpha));
		}
		fn fill_text(&self, text: &str, origin: Vec2) {
			self.push(Op::FillText(text.into(), origin));
		}
	}
}
