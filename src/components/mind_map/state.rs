//! Gesture and connection-mode state between input events.

use super::types::{ConnectionStyle, NodeId, Point};

/// Hint while no source node is picked.
pub const HINT_PICK_FIRST: &str = "Click two nodes to connect them";
/// Hint once the source node is picked.
pub const HINT_PICK_SECOND: &str = "Now click the second node to connect";

/// Click-to-connect progress while connection mode is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectState {
	/// Waiting for the first node.
	#[default]
	Idle,
	/// First node picked; the next distinct node completes the connection.
	AwaitingSecondNode(NodeId),
}

/// A node following the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
	/// Node being dragged.
	pub node: NodeId,
	/// Screen position of the pointer when the drag began.
	pub start: Point,
	/// World position of the node when the drag began.
	pub node_start: Point,
}

/// Background drag moving the view.
#[derive(Clone, Debug, PartialEq)]
pub struct PanState {
	/// Screen position of the previous pointer event.
	pub last: Point,
}

/// Ephemeral per-session interaction state. Never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
	/// Node clicks create connections instead of drags.
	pub connection_mode: bool,
	/// Progress of the current connection.
	pub connect: ConnectState,
	/// Style for new connections.
	pub line_style: ConnectionStyle,
	/// Last node pressed outside connection mode.
	pub selected: Option<NodeId>,
	/// Drag in progress.
	pub drag: Option<DragState>,
	/// Pan in progress.
	pub pan: Option<PanState>,
}

impl Interaction {
	/// Selected, or the pending connection source.
	pub fn is_highlighted(&self, id: NodeId) -> bool {
		self.selected == Some(id) || self.connect == ConnectState::AwaitingSecondNode(id)
	}

	/// Banner text, only in connection mode.
	pub fn hint(&self) -> Option<&'static str> {
		match (self.connection_mode, self.connect) {
			(false, _) => None,
			(true, ConnectState::Idle) => Some(HINT_PICK_FIRST),
			(true, ConnectState::AwaitingSecondNode(_)) => Some(HINT_PICK_SECOND),
		}
	}

	/// Stop whatever the pointer was doing.
	pub fn release_pointer(&mut self) -> Option<DragState> {
		self.pan = None;
		self.drag.take()
	}

	/// Drop every reference to a deleted node.
	pub fn forget(&mut self, id: NodeId) {
		if self.selected == Some(id) {
			self.selected = None;
		}
		if self.connect == ConnectState::AwaitingSecondNode(id) {
			self.connect = ConnectState::Idle;
		}
		if self.drag.as_ref().is_some_and(|d| d.node == id) {
			self.drag = None;
		}
	}
}
