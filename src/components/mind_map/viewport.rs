//! Pan/zoom transform between world space and screen space.
//!
//! `screen = world * scale + pan`. Panning is additive in screen pixels and
//! zooming keeps a chosen screen anchor fixed over the same world point.

use super::types::{Bounds, Point};

/// Furthest zoom out.
pub const MIN_SCALE: f64 = 0.1;
/// Furthest zoom in.
pub const MAX_SCALE: f64 = 3.0;

/// Scale used when fitting a non-empty graph.
pub const FIT_SCALE: f64 = 0.4;
/// View used when there is nothing to fit.
pub const EMPTY_SCALE: f64 = 0.5;
/// Pan used when there is nothing to fit.
pub const EMPTY_PAN: Point = Point::new(200.0, 100.0);

/// Current view of the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	/// Screen pixels per world unit, within `[MIN_SCALE, MAX_SCALE]`.
	pub scale: f64,
	/// Screen position of the world origin.
	pub pan: Point,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Identity transform over a `width` × `height` canvas.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			scale: 1.0,
			pan: Point::default(),
			width,
			height,
		}
	}

	/// Track a new canvas size. The transform is left alone.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Middle of the canvas in screen pixels.
	pub fn screen_center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Project a world point onto the canvas.
	pub fn world_to_screen(&self, world: Point) -> Point {
		world * self.scale + self.pan
	}

	/// Inverse of [`Viewport::world_to_screen`].
	pub fn screen_to_world(&self, screen: Point) -> Point {
		(screen - self.pan) / self.scale
	}

	/// Zoom by `factor` keeping the world point under `anchor` in place.
	/// Returns `true` if the (clamped) scale actually changed.
	pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
		if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
			return false;
		}
		let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
		if new_scale == self.scale {
			return false;
		}
		let ratio = new_scale / self.scale;
		self.pan = anchor - (anchor - self.pan) * ratio;
		self.scale = new_scale;
		true
	}

	/// Zoom around the centre of `content`, or around the screen centre when
	/// there is no content.
	pub fn zoom_toward_content_center(&mut self, content: Option<Bounds>, factor: f64) -> bool {
		let anchor = match content {
			Some(bounds) => self.world_to_screen(bounds.center()),
			None => self.screen_center(),
		};
		self.zoom_at(anchor, factor)
	}

	/// Show all content at a fixed reduced scale, centred on screen.
	pub fn fit_to_content(&mut self, content: Option<Bounds>) {
		match content {
			None => {
				self.scale = EMPTY_SCALE;
				self.pan = EMPTY_PAN;
			}
			Some(bounds) => {
				self.scale = FIT_SCALE;
				self.pan = self.screen_center() - bounds.center() * FIT_SCALE;
			}
		}
	}

	/// Same as [`Viewport::fit_to_content`].
	pub fn reset_view(&mut self, content: Option<Bounds>) {
		self.fit_to_content(content);
	}

	/// Shift the view by a screen-space delta.
	pub fn pan_by(&mut self, delta: Point) {
		if delta.is_finite() {
			self.pan = self.pan + delta;
		}
	}
}

/// Zoom factor for one wheel tick. Wheel up (negative delta) zooms in.
pub fn wheel_factor(delta_y: f64, intensity: f64) -> f64 {
	let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
	(direction * intensity).exp()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	const EPS: f64 = 1e-9;

	fn approx(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
	}

	#[test]
	fn screen_world_roundtrip() {
		let transforms = [
			(1.0, Point::new(0.0, 0.0)),
			(0.1, Point::new(-350.0, 12.5)),
			(2.75, Point::new(1024.0, -768.0)),
			(0.4, Point::new(300.0, 200.0)),
		];
		let points = [
			Point::new(0.0, 0.0),
			Point::new(123.456, -987.1),
			Point::new(-1e4, 3e3),
		];
		for (scale, pan) in transforms {
			let vp = Viewport {
				scale,
				pan,
				width: 800.0,
				height: 600.0,
			};
			for p in points {
				let back = vp.screen_to_world(vp.world_to_screen(p));
				assert!(approx(back, p), "{p:?} -> {back:?} at scale {scale}");
			}
		}
	}

	#[test]
	fn zoom_at_keeps_anchor_fixed() {
		let mut vp = Viewport::new(800.0, 600.0);
		vp.pan = Point::new(40.0, -20.0);
		let anchor = Point::new(310.0, 255.0);
		let world_before = vp.screen_to_world(anchor);

		assert!(vp.zoom_at(anchor, 1.2));
		assert!((vp.scale - 1.2).abs() < EPS);
		assert!(approx(vp.world_to_screen(world_before), anchor));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut vp = Viewport::new(800.0, 600.0);
		for _ in 0..100 {
			vp.zoom_at(Point::new(10.0, 10.0), 1.2);
			assert!(vp.scale <= MAX_SCALE);
		}
		assert_eq!(vp.scale, MAX_SCALE);
		assert!(!vp.zoom_at(Point::new(10.0, 10.0), 1.2));

		for _ in 0..200 {
			vp.zoom_at(Point::new(10.0, 10.0), wheel_factor(1.0, 0.02));
			assert!(vp.scale >= MIN_SCALE);
		}
		assert_eq!(vp.scale, MIN_SCALE);
	}

	#[test]
	fn invalid_factor_is_ignored() {
		let mut vp = Viewport::new(800.0, 600.0);
		let before = vp.clone();
		assert!(!vp.zoom_at(Point::new(1.0, 1.0), f64::NAN));
		assert!(!vp.zoom_at(Point::new(1.0, 1.0), 0.0));
		assert!(!vp.zoom_at(Point::new(1.0, 1.0), -2.0));
		assert_eq!(vp, before);
	}

	#[test]
	fn wheel_direction() {
		assert!(wheel_factor(-3.0, 0.02) > 1.0);
		assert!(wheel_factor(3.0, 0.02) < 1.0);
		assert!((wheel_factor(-1.0, 0.02) * wheel_factor(1.0, 0.02) - 1.0).abs() < EPS);
	}

	#[test]
	fn fit_empty_uses_default_view() {
		let mut vp = Viewport::new(800.0, 600.0);
		vp.fit_to_content(None);
		assert_eq!(vp.scale, 0.5);
		assert_eq!(vp.pan, Point::new(200.0, 100.0));
	}

	#[test]
	fn fit_centres_content() {
		let mut vp = Viewport::new(800.0, 600.0);
		let bounds =
			Bounds::enclosing([Point::new(0.0, 0.0), Point::new(100.0, 100.0)], 200.0, 100.0);
		vp.fit_to_content(bounds);
		assert_eq!(vp.scale, FIT_SCALE);
		assert!(approx(
			vp.world_to_screen(Point::new(150.0, 100.0)),
			Point::new(400.0, 300.0)
		));
	}

	#[test]
	fn reset_view_matches_fit() {
		let bounds = Bounds::enclosing([Point::new(-500.0, 40.0)], 200.0, 100.0);
		let mut a = Viewport::new(1280.0, 720.0);
		let mut b = a.clone();
		a.zoom_at(Point::new(3.0, 4.0), 2.0);
		a.reset_view(bounds);
		b.fit_to_content(bounds);
		assert_eq!(a, b);
	}

	#[test]
	fn zoom_toward_content_keeps_content_centre() {
		let mut vp = Viewport::new(800.0, 600.0);
		let bounds = Bounds::enclosing([Point::new(1000.0, 1000.0)], 200.0, 100.0);
		let centre_on_screen = vp.world_to_screen(bounds.unwrap().center());
		vp.zoom_toward_content_center(bounds, 0.8);
		assert!(approx(vp.world_to_screen(bounds.unwrap().center()), centre_on_screen));
	}

	#[test]
	fn zoom_toward_empty_content_uses_screen_centre() {
		let mut vp = Viewport::new(800.0, 600.0);
		let world = vp.screen_to_world(vp.screen_center());
		vp.zoom_toward_content_center(None, 1.2);
		assert!(approx(vp.world_to_screen(world), Point::new(400.0, 300.0)));
		assert!(vp.pan.is_finite());
	}

	#[test]
	fn pan_is_scale_independent() {
		let mut vp = Viewport::new(800.0, 600.0);
		vp.scale = 2.5;
		vp.pan_by(Point::new(15.0, -5.0));
		vp.pan_by(Point::new(5.0, 5.0));
		assert_eq!(vp.pan, Point::new(20.0, 0.0));
	}

	fn point(range: f64) -> impl Strategy<Value = Point> {
		(-range..range, -range..range).prop_map(|(x, y)| Point::new(x, y))
	}

	fn viewport() -> impl Strategy<Value = Viewport> {
		(MIN_SCALE..=MAX_SCALE, point(1.0e4)).prop_map(|(scale, pan)| Viewport {
			scale,
			pan,
			width: 800.0,
			height: 600.0,
		})
	}

	/// Anything the view can be asked to do that changes the scale.
	#[derive(Clone, Debug)]
	enum Zoom {
		At(Point, f64),
		Wheel(Point, f64),
		Content(Option<Point>, f64),
		Fit(Option<Point>),
	}

	fn zoom() -> impl Strategy<Value = Zoom> {
		prop_oneof![
			(point(2.0e3), 0.01..10.0f64).prop_map(|(p, f)| Zoom::At(p, f)),
			(point(2.0e3), -500.0..500.0f64).prop_map(|(p, d)| Zoom::Wheel(p, d)),
			(prop::option::of(point(1.0e4)), prop_oneof![Just(0.8), Just(1.2)])
				.prop_map(|(c, f)| Zoom::Content(c, f)),
			prop::option::of(point(1.0e4)).prop_map(Zoom::Fit),
		]
	}

	proptest! {
		#[test]
		fn screen_world_roundtrip_holds(vp in viewport(), p in point(1.0e5)) {
			let back = vp.screen_to_world(vp.world_to_screen(p));
			let tolerance = 1e-9 * (1.0 + p.x.abs().max(p.y.abs()));
			prop_assert!((back.x - p.x).abs() < tolerance, "{:?} -> {:?}", p, back);
			prop_assert!((back.y - p.y).abs() < tolerance, "{:?} -> {:?}", p, back);
		}

		#[test]
		fn scale_stays_in_range(steps in prop::collection::vec(zoom(), 0..80)) {
			let mut vp = Viewport::new(800.0, 600.0);
			for step in steps {
				match step {
					Zoom::At(anchor, factor) => {
						vp.zoom_at(anchor, factor);
					}
					Zoom::Wheel(anchor, delta) => {
						vp.zoom_at(anchor, wheel_factor(delta, 0.02));
					}
					Zoom::Content(origin, factor) => {
						let bounds = origin.map(|o| Bounds::from_origin_size(o, 200.0, 100.0));
						vp.zoom_toward_content_center(bounds, factor);
					}
					Zoom::Fit(origin) => {
						vp.fit_to_content(origin.map(|o| Bounds::from_origin_size(o, 200.0, 100.0)));
					}
				}
				prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&vp.scale), "scale {}", vp.scale);
				prop_assert!(vp.pan.is_finite());
			}
		}
	}
}
