//! Host-independent input events.
//!
//! The canvas component converts DOM mouse, wheel and keyboard events into
//! `InputEvent`s with canvas-relative screen coordinates and hands them to
//! `MindMap::handle`. Hit-testing happens before that, so pointer-down
//! already carries what was pressed.

use super::types::{NodeId, Point};

/// Which part of a node's chrome a point falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePart {
	/// Anywhere not covered by a button.
	Body,
	/// Top-right delete button.
	Delete,
	/// Edit button, left of delete.
	Edit,
	/// Bottom-right link button; only present when the node has a link.
	Link,
}

/// Result of hit-testing a screen point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeHit {
	/// Node under the point.
	pub id: NodeId,
	/// Part of that node.
	pub part: NodePart,
}

impl NodeHit {
	/// A press on the node body.
	pub fn body(id: NodeId) -> Self {
		Self {
			id,
			part: NodePart::Body,
		}
	}
}

/// One user action, in canvas-relative screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
	/// Primary button pressed.
	PointerDown {
		/// Pointer position.
		point: Point,
		/// What was pressed; `None` on empty canvas.
		target: Option<NodeHit>,
	},
	/// Pointer moved, pressed or not.
	PointerMove {
		/// Pointer position.
		point: Point,
	},
	/// Primary button released.
	PointerUp {
		/// Pointer position.
		point: Point,
	},
	/// Pointer left the canvas; ends any drag or pan.
	PointerLeave,
	/// Wheel scrolled over the canvas.
	Wheel {
		/// Vertical scroll amount; negative is up.
		delta_y: f64,
		/// Pointer position, used as the zoom anchor.
		point: Point,
	},
	/// Key pressed anywhere in the window.
	Key {
		/// `KeyboardEvent.key`, e.g. `"Escape"`.
		key: String,
	},
}

impl InputEvent {
	/// Key event for `key`.
	pub fn key(key: impl Into<String>) -> Self {
		Self::Key { key: key.into() }
	}
}
