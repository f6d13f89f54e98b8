//! The editor instance: owns the graph and the view, and turns input into
//! mutations.
//!
//! Every mutation that should survive a reload is followed by a save through
//! the injected [`Persistence`]. Node moves during a drag are the exception:
//! they are saved once, when the pointer is released.

use log::{debug, error, info, warn};

use super::config::MindMapConfig;
use super::error::FormError;
use super::input::{InputEvent, NodeHit, NodePart};
use super::persistence::Persistence;
use super::prompt::Prompt;
use super::render::{NODE_HEIGHT, NODE_WIDTH};
use super::seed;
use super::state::{ConnectState, DragState, Interaction, PanState};
use super::store::GraphStore;
use super::types::{Bounds, Category, ConnectionId, ConnectionStyle, NodeFields, NodeId, Point};
use super::viewport::{Viewport, wheel_factor};

/// What the editor dialog is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
	/// A new node of this category.
	Create(Category),
	/// An existing node.
	Edit(NodeId),
}

/// Contents for the editor dialog when it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorDraft {
	/// Dialog title.
	pub heading: String,
	/// Initial field values.
	pub fields: NodeFields,
}

/// Work for the host after an input event.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	/// Repaint the canvas.
	Redraw,
	/// Open the editor dialog with this content.
	ShowEditor(EditorDraft),
	/// Close the editor dialog.
	HideEditor,
	/// Open a node's link in a new tab.
	OpenLink(String),
}

/// One editor session: the graph, the view and the in-progress gesture.
pub struct MindMap {
	store: GraphStore,
	viewport: Viewport,
	interaction: Interaction,
	editing: Option<EditTarget>,
	persistence: Persistence,
	prompt: Box<dyn Prompt>,
	config: MindMapConfig,
}

impl MindMap {
	/// Restore the saved graph (or the default one) and fit the view to it.
	pub fn new(
		persistence: Persistence,
		prompt: impl Prompt + 'static,
		config: MindMapConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut map = Self {
			store: GraphStore::new(),
			viewport: Viewport::new(width, height),
			interaction: Interaction::default(),
			editing: None,
			persistence,
			prompt: Box::new(prompt),
			config,
		};
		map.restore();
		map.fit_to_content();
		map
	}

	fn restore(&mut self) {
		match self.persistence.load() {
			Some(snapshot) => match self.store.deserialize(snapshot) {
				Ok(()) => {
					info!(
						"restored {} nodes, {} connections",
						self.store.len(),
						self.store.connections().len()
					);
					return;
				}
				Err(err) => warn!("saved graph rejected: {err}"),
			},
			None => info!("no saved graph, loading defaults"),
		}
		match self.store.deserialize(seed::default_graph()) {
			Ok(()) => self.persist(),
			Err(err) => error!("default graph rejected: {err}"),
		}
	}

	fn persist(&self) {
		if let Err(err) = self.persistence.save(&self.store) {
			warn!("could not save graph: {err}");
		}
	}

	/// The graph.
	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	/// The current view.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Selection, drag, pan and connection state.
	pub fn interaction(&self) -> &Interaction {
		&self.interaction
	}

	/// What the editor dialog is working on, if it is open.
	pub fn editing(&self) -> Option<EditTarget> {
		self.editing
	}

	/// Whether clicks on nodes create connections.
	pub fn connection_mode(&self) -> bool {
		self.interaction.connection_mode
	}

	/// Instruction banner text while in connection mode.
	pub fn hint(&self) -> Option<&'static str> {
		self.interaction.hint()
	}

	fn content_bounds(&self) -> Option<Bounds> {
		self.store.content_bounds(NODE_WIDTH, NODE_HEIGHT)
	}

	/// Add and save a node. `None` once no id is left to hand out.
	pub fn create_node(
		&mut self,
		fields: NodeFields,
		category: Category,
		position: Point,
	) -> Option<NodeId> {
		let Some(id) = self.store.create_node(fields, category, position) else {
			warn!("node ids exhausted");
			return None;
		};
		debug!("created {id}");
		self.persist();
		Some(id)
	}

	/// Replace a node's text and save. `false` if the node is gone.
	pub fn update_node(&mut self, id: NodeId, fields: NodeFields) -> bool {
		let updated = self.store.update_node(id, fields);
		if updated {
			self.persist();
		}
		updated
	}

	/// Delete without asking. See [`MindMap::request_delete`].
	pub fn delete_node(&mut self, id: NodeId) -> bool {
		let Some(node) = self.store.delete_node(id) else {
			return false;
		};
		self.interaction.forget(id);
		if self.editing == Some(EditTarget::Edit(id)) {
			self.editing = None;
		}
		info!("deleted {id} ({:?})", node.title);
		self.persist();
		true
	}

	/// Delete after the user confirms.
	pub fn request_delete(&mut self, id: NodeId) -> bool {
		let Some(node) = self.store.node(id) else {
			return false;
		};
		let message = format!("Delete \"{}\" and all its connections?", node.title);
		self.prompt.confirm(&message) && self.delete_node(id)
	}

	/// Position-only update; not persisted.
	pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
		self.store.move_node(id, position)
	}

	/// Connect two nodes and save. See [`GraphStore::create_connection`].
	pub fn create_connection(
		&mut self,
		from: NodeId,
		to: NodeId,
		style: ConnectionStyle,
	) -> Option<ConnectionId> {
		let id = self.store.create_connection(from, to, style)?;
		self.persist();
		Some(id)
	}

	/// Empty the graph and save. Connection mode and line style survive.
	pub fn clear(&mut self) {
		self.store.clear();
		self.interaction = Interaction {
			connection_mode: self.interaction.connection_mode,
			line_style: self.interaction.line_style,
			..Interaction::default()
		};
		if matches!(self.editing, Some(EditTarget::Edit(_))) {
			self.editing = None;
		}
		info!("canvas cleared");
		self.persist();
	}

	/// Clear after the user confirms.
	pub fn request_clear(&mut self) -> bool {
		if !self
			.prompt
			.confirm("Are you sure you want to clear all nodes and connections?")
		{
			return false;
		}
		self.clear();
		true
	}

	/// Follow a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
	}

	/// Zoom in one button step toward the content centre.
	pub fn zoom_in(&mut self) -> bool {
		let bounds = self.content_bounds();
		self.viewport
			.zoom_toward_content_center(bounds, self.config.zoom_in_factor)
	}

	/// Zoom out one button step from the content centre.
	pub fn zoom_out(&mut self) -> bool {
		let bounds = self.content_bounds();
		self.viewport
			.zoom_toward_content_center(bounds, self.config.zoom_out_factor)
	}

	/// Centre all nodes on screen.
	pub fn fit_to_content(&mut self) {
		let bounds = self.content_bounds();
		self.viewport.fit_to_content(bounds);
	}

	/// Same as [`MindMap::fit_to_content`].
	pub fn reset_view(&mut self) {
		let bounds = self.content_bounds();
		self.viewport.reset_view(bounds);
	}

	/// Flip connection mode. Either way any pending source and selection are
	/// dropped. Returns the new mode.
	pub fn toggle_connection_mode(&mut self) -> bool {
		let on = !self.interaction.connection_mode;
		self.interaction.connection_mode = on;
		self.interaction.connect = ConnectState::Idle;
		self.interaction.selected = None;
		if self.interaction.release_pointer().is_some() {
			self.persist();
		}
		on
	}

	/// Style for connections made from now on.
	pub fn set_line_style(&mut self, style: ConnectionStyle) {
		self.interaction.line_style = style;
	}

	fn connection_click(&mut self, id: NodeId) -> Vec<Effect> {
		self.interaction.connect = match self.interaction.connect {
			ConnectState::Idle => ConnectState::AwaitingSecondNode(id),
			ConnectState::AwaitingSecondNode(from) if from != id => {
				let style = self.interaction.line_style;
				if self.create_connection(from, id, style).is_none() {
					debug!("{from} and {id} not connected");
				}
				ConnectState::Idle
			}
			ConnectState::AwaitingSecondNode(_) => ConnectState::Idle,
		};
		vec![Effect::Redraw]
	}

	/// Open the dialog for a new node.
	pub fn open_create(&mut self, category: Category) -> EditorDraft {
		self.editing = Some(EditTarget::Create(category));
		let heading = match category {
			Category::Primer => "Add New Primer",
			Category::DeepDive => "Add New Deep Dive",
		};
		EditorDraft {
			heading: heading.to_string(),
			fields: NodeFields::default(),
		}
	}

	/// Open the dialog pre-filled from an existing node.
	pub fn open_edit(&mut self, id: NodeId) -> Option<EditorDraft> {
		let node = self.store.node(id)?;
		let draft = EditorDraft {
			heading: "Edit Node".to_string(),
			fields: node.fields(),
		};
		self.editing = Some(EditTarget::Edit(id));
		Some(draft)
	}

	/// Close the dialog without saving. Returns whether it was open.
	pub fn close_editor(&mut self) -> bool {
		self.editing.take().is_some()
	}

	/// Accept the dialog. An empty title is reported and leaves the dialog
	/// open; otherwise the node is created or updated and the dialog closes.
	pub fn submit(&mut self, fields: NodeFields) -> Result<NodeId, FormError> {
		let fields = fields.trimmed();
		if fields.title.is_empty() {
			self.prompt.alert(&FormError::EmptyTitle.to_string());
			return Err(FormError::EmptyTitle);
		}
		let target = self
			.editing
			.unwrap_or(EditTarget::Create(Category::default()));
		let id = match target {
			EditTarget::Edit(id) => {
				if !self.update_node(id, fields) {
					debug!("{id} vanished while being edited");
				}
				id
			}
			EditTarget::Create(category) => {
				let position = self.new_node_position();
				match self.create_node(fields, category, position) {
					Some(id) => id,
					None => {
						self.prompt.alert(&FormError::NoFreeNodeId.to_string());
						return Err(FormError::NoFreeNodeId);
					}
				}
			}
		};
		self.editing = None;
		Ok(id)
	}

	/// Top-left corner that centres a new node in the current view.
	fn new_node_position(&self) -> Point {
		self.viewport.screen_to_world(self.viewport.screen_center())
			- Point::new(NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0)
	}

	/// Feed one input event through the pointer and keyboard state machines.
	pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
		match event {
			InputEvent::PointerDown { point, target } => self.pointer_down(point, target),
			InputEvent::PointerMove { point } => self.pointer_move(point),
			InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.pointer_up(),
			InputEvent::Wheel { delta_y, point } => {
				let factor = wheel_factor(delta_y, self.config.wheel_intensity);
				if self.viewport.zoom_at(point, factor) {
					vec![Effect::Redraw]
				} else {
					vec![]
				}
			}
			InputEvent::Key { key } => self.key(&key),
		}
	}

	fn pointer_down(&mut self, point: Point, target: Option<NodeHit>) -> Vec<Effect> {
		let Some(hit) = target else {
			if !self.interaction.connection_mode {
				self.interaction.pan = Some(PanState { last: point });
			}
			return vec![];
		};
		let Some(node) = self.store.node(hit.id) else {
			return vec![];
		};

		match hit.part {
			NodePart::Delete => {
				if self.request_delete(hit.id) {
					vec![Effect::Redraw]
				} else {
					vec![]
				}
			}
			NodePart::Edit => self
				.open_edit(hit.id)
				.map(Effect::ShowEditor)
				.into_iter()
				.collect(),
			NodePart::Link => node.link.clone().map(Effect::OpenLink).into_iter().collect(),
			NodePart::Body if self.interaction.connection_mode => self.connection_click(hit.id),
			NodePart::Body => {
				let node_start = node.position;
				self.interaction.selected = Some(hit.id);
				self.interaction.drag = Some(DragState {
					node: hit.id,
					start: point,
					node_start,
				});
				vec![Effect::Redraw]
			}
		}
	}

	fn pointer_move(&mut self, point: Point) -> Vec<Effect> {
		if let Some(drag) = &self.interaction.drag {
			// Divide by scale so the node tracks the cursor 1:1 on screen.
			let position = drag.node_start + (point - drag.start) / self.viewport.scale;
			let id = drag.node;
			return if self.store.move_node(id, position) {
				vec![Effect::Redraw]
			} else {
				vec![]
			};
		}
		if let Some(pan) = self.interaction.pan.as_mut() {
			let delta = point - pan.last;
			pan.last = point;
			self.viewport.pan_by(delta);
			return vec![Effect::Redraw];
		}
		vec![]
	}

	fn pointer_up(&mut self) -> Vec<Effect> {
		match self.interaction.release_pointer() {
			Some(drag) => {
				debug!("drag of {} ended", drag.node);
				self.persist();
				vec![Effect::Redraw]
			}
			None => vec![],
		}
	}

	fn key(&mut self, key: &str) -> Vec<Effect> {
		if key != "Escape" {
			return vec![];
		}
		if self.interaction.connection_mode {
			self.toggle_connection_mode();
			vec![Effect::Redraw]
		} else if self.close_editor() {
			vec![Effect::HideEditor]
		} else {
			vec![]
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::persistence::MemoryStorage;
	use pretty_assertions::assert_eq;

	struct Yes;

	impl Prompt for Yes {
		fn confirm(&self, _: &str) -> bool {
			true
		}

		fn alert(&self, _: &str) {}
	}

	fn empty_map() -> MindMap {
		let mut map = MindMap::new(
			Persistence::new(MemoryStorage::new()),
			Yes,
			MindMapConfig::default(),
			800.0,
			600.0,
		);
		map.clear();
		map.reset_view();
		map
	}

	fn add(map: &mut MindMap, title: &str, category: Category, at: Point) -> NodeId {
		map.create_node(NodeFields::new(title, ""), category, at).unwrap()
	}

	fn down(map: &mut MindMap, x: f64, y: f64, target: Option<NodeHit>) -> Vec<Effect> {
		map.handle(InputEvent::PointerDown {
			point: Point::new(x, y),
			target,
		})
	}

	#[test]
	fn connection_state_machine() {
		let mut map = empty_map();
		let a = add(&mut map, "A", Category::Primer, Point::new(0.0, 0.0));
		let b = add(&mut map, "B", Category::DeepDive, Point::new(300.0, 0.0));

		assert!(map.toggle_connection_mode());
		assert_eq!(map.hint(), Some("Click two nodes to connect them"));

		down(&mut map, 0.0, 0.0, Some(NodeHit::body(a)));
		assert_eq!(map.interaction().connect, ConnectState::AwaitingSecondNode(a));
		assert!(map.interaction().is_highlighted(a));
		assert_eq!(map.hint(), Some("Now click the second node to connect"));

		map.set_line_style(ConnectionStyle::Dotted);
		down(&mut map, 0.0, 0.0, Some(NodeHit::body(b)));
		assert_eq!(map.interaction().connect, ConnectState::Idle);
		let connections = map.store().connections();
		assert_eq!(connections.len(), 1);
		assert_eq!((connections[0].from, connections[0].to), (a, b));
		assert_eq!(connections[0].style, ConnectionStyle::Dotted);
	}

	#[test]
	fn clicking_source_twice_cancels() {
		let mut map = empty_map();
		let a = add(&mut map, "A", Category::Primer, Point::default());
		map.toggle_connection_mode();
		down(&mut map, 0.0, 0.0, Some(NodeHit::body(a)));
		down(&mut map, 0.0, 0.0, Some(NodeHit::body(a)));
		assert_eq!(map.interaction().connect, ConnectState::Idle);
		assert!(map.store().connections().is_empty());
	}

	#[test]
	fn leaving_connection_mode_drops_pending_source() {
		let mut map = empty_map();
		let a = add(&mut map, "A", Category::Primer, Point::default());
		map.toggle_connection_mode();
		down(&mut map, 0.0, 0.0, Some(NodeHit::body(a)));
		assert!(!map.toggle_connection_mode());
		assert_eq!(map.interaction().connect, ConnectState::Idle);
		assert!(!map.interaction().is_highlighted(a));
		assert_eq!(map.hint(), None);
	}

	#[test]
	fn no_pan_or_drag_in_connection_mode() {
		let mut map = empty_map();
		map.toggle_connection_mode();
		let pan = map.viewport().pan;
		down(&mut map, 10.0, 10.0, None);
		map.handle(InputEvent::PointerMove {
			point: Point::new(60.0, 60.0),
		});
		assert_eq!(map.viewport().pan, pan);
	}

	#[test]
	fn drag_is_scale_compensated() {
		let mut map = empty_map();
		let a = add(&mut map, "A", Category::Primer, Point::new(10.0, 20.0));
		// empty graph fit
		assert_eq!(map.viewport().scale, 0.5);

		down(&mut map, 100.0, 100.0, Some(NodeHit::body(a)));
		map.handle(InputEvent::PointerMove {
			point: Point::new(150.0, 80.0),
		});
		assert_eq!(map.store().node(a).unwrap().position, Point::new(110.0, -20.0));
		assert_eq!(map.interaction().selected, Some(a));
	}

	#[test]
	fn press_on_node_never_pans() {
		let mut map = empty_map();
		let a = add(&mut map, "A", Category::Primer, Point::default());
		let pan = map.viewport().pan;
		down(&mut map, 5.0, 5.0, Some(NodeHit::body(a)));
		map.handle(InputEvent::PointerMove {
			point: Point::new(45.0, 5.0),
		});
		assert_eq!(map.viewport().pan, pan);
		assert!(map.interaction().pan.is_none());
	}

	#[test]
	fn escape_prefers_connection_mode_over_editor() {
		let mut map = empty_map();
		map.open_create(Category::Primer);
		map.toggle_connection_mode();

		assert_eq!(map.handle(InputEvent::key("Escape")), vec![Effect::Redraw]);
		assert!(!map.connection_mode());
		assert!(map.editing().is_some());

		assert_eq!(map.handle(InputEvent::key("Escape")), vec![Effect::HideEditor]);
		assert_eq!(map.editing(), None);
		assert_eq!(map.handle(InputEvent::key("Escape")), vec![]);
		assert_eq!(map.handle(InputEvent::key("Enter")), vec![]);
	}

	#[test]
	fn new_nodes_land_in_view_centre() {
		let mut map = empty_map();
		map.open_create(Category::DeepDive);
		let id = map.submit(NodeFields::new("  Centered  ", " d ")).unwrap();
		let node = map.store().node(id).unwrap();
		assert_eq!(node.title, "Centered");
		assert_eq!(node.description, "d");
		assert_eq!(node.category, Category::DeepDive);

		let centre = node.position + Point::new(NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0);
		assert_eq!(map.viewport().world_to_screen(centre), map.viewport().screen_center());
	}

	#[test]
	fn chrome_buttons() {
		let mut map = empty_map();
		let mut fields = NodeFields::new("Deck", "");
		fields.link = "https://example.org/slides".into();
		let a = map.create_node(fields, Category::Primer, Point::default()).unwrap();

		let effects = down(&mut map, 0.0, 0.0, Some(NodeHit { id: a, part: NodePart::Link }));
		assert_eq!(effects, vec![Effect::OpenLink("https://example.org/slides".into())]);

		let effects = down(&mut map, 0.0, 0.0, Some(NodeHit { id: a, part: NodePart::Edit }));
		assert!(matches!(&effects[..], [Effect::ShowEditor(d)] if d.heading == "Edit Node"));
		assert_eq!(map.editing(), Some(EditTarget::Edit(a)));

		let effects = down(&mut map, 0.0, 0.0, Some(NodeHit { id: a, part: NodePart::Delete }));
		assert_eq!(effects, vec![Effect::Redraw]);
		assert!(map.store().is_empty());
		assert_eq!(map.editing(), None);
	}
}
