//! In-memory graph: nodes keyed by id, connections in creation order, and the
//! id allocators.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::error::SnapshotError;
use super::types::{
	Bounds, Category, Connection, ConnectionId, ConnectionStyle, Node, NodeFields, NodeId, Point,
	SerializedGraph,
};

/// Owns every node and connection. Pure data: persistence is driven by the caller.
///
/// Node ids come from a max+1 allocator. The last value of the id space is
/// never handed out, so the allocator always has a successor to move to.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStore {
	nodes: BTreeMap<NodeId, Node>,
	connections: Vec<Connection>,
	next_node_id: u32,
	next_connection_id: u64,
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphStore {
	/// Empty graph; the first node gets id 1.
	pub fn new() -> Self {
		Self {
			nodes: BTreeMap::new(),
			connections: Vec::new(),
			next_node_id: 1,
			next_connection_id: 1,
		}
	}

	/// Look up a node.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(&id)
	}

	/// Nodes in id order (which is also paint order).
	pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
		self.nodes.values()
	}

	/// Connections in creation order.
	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The id the next `create_node` call will hand out.
	pub fn next_node_id(&self) -> NodeId {
		NodeId(self.next_node_id)
	}

	/// Add a node under a fresh id. `None` once the id space is used up.
	pub fn create_node(
		&mut self,
		fields: NodeFields,
		category: Category,
		position: Point,
	) -> Option<NodeId> {
		let id = NodeId(self.next_node_id);
		self.create_node_with_id(id, fields, category, position).then_some(id)
	}

	/// Insert with a caller-chosen id and move the allocator past it. Refused
	/// when `id` is taken or is the last id of the space.
	pub fn create_node_with_id(
		&mut self,
		id: NodeId,
		fields: NodeFields,
		category: Category,
		position: Point,
	) -> bool {
		let Some(next) = id.0.checked_add(1) else {
			debug!("{id} is out of range");
			return false;
		};
		if self.nodes.contains_key(&id) {
			debug!("{id} already exists");
			return false;
		}
		self.next_node_id = self.next_node_id.max(next);
		self.nodes.insert(id, Node::new(id, fields, category, position));
		true
	}

	/// Replace a node's text fields. `false` if the node is gone.
	pub fn update_node(&mut self, id: NodeId, fields: NodeFields) -> bool {
		match self.nodes.get_mut(&id) {
			Some(node) => {
				node.apply(fields);
				true
			}
			None => {
				debug!("update of missing {id} ignored");
				false
			}
		}
	}

	/// Remove a node together with every connection touching it.
	pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
		let node = self.nodes.remove(&id)?;
		self.connections.retain(|c| !c.touches(id));
		Some(node)
	}

	/// Set a node's top-left corner. Non-finite positions are refused.
	pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
		match self.nodes.get_mut(&id) {
			Some(node) if position.is_finite() => {
				node.position = position;
				true
			}
			_ => false,
		}
	}

	/// Connect two existing, distinct nodes. `None` if the unordered pair is
	/// already connected (in either direction, any style).
	pub fn create_connection(
		&mut self,
		from: NodeId,
		to: NodeId,
		style: ConnectionStyle,
	) -> Option<ConnectionId> {
		if from == to || !self.nodes.contains_key(&from) || !self.nodes.contains_key(&to) {
			return None;
		}
		if self.connections.iter().any(|c| c.joins(from, to)) {
			debug!("{from} and {to} already connected");
			return None;
		}
		let id = ConnectionId(self.next_connection_id);
		self.next_connection_id = self.next_connection_id.checked_add(1)?;
		self.connections.push(Connection {
			id,
			from,
			to,
			style,
		});
		Some(id)
	}

	/// Drop everything and restart both allocators at 1.
	pub fn clear(&mut self) {
		*self = Self::new();
	}

	/// Bounding box of all node footprints, `None` when empty.
	pub fn content_bounds(&self, width: f64, height: f64) -> Option<Bounds> {
		Bounds::enclosing(self.nodes.values().map(|n| n.position), width, height)
	}

	/// Snapshot for storage.
	pub fn serialize(&self) -> SerializedGraph {
		SerializedGraph {
			nodes: self.nodes.values().map(Into::into).collect(),
			connections: self.connections.iter().map(Into::into).collect(),
			next_node_id: self.next_node_id,
		}
	}

	/// Replace the whole graph with `data`. Nothing changes if the snapshot is
	/// inconsistent.
	pub fn deserialize(&mut self, data: SerializedGraph) -> Result<(), SnapshotError> {
		let mut seen = HashSet::with_capacity(data.nodes.len());
		for record in &data.nodes {
			if !seen.insert(record.id) {
				return Err(SnapshotError::DuplicateNodeId(record.id));
			}
		}

		let max_node = data.nodes.iter().map(|n| n.id).max().unwrap_or(NodeId(0));
		let max_connection = data
			.connections
			.iter()
			.map(|c| c.id)
			.max()
			.unwrap_or(ConnectionId(0));
		let next_node_id = max_node
			.0
			.checked_add(1)
			.ok_or(SnapshotError::NodeIdOutOfRange(max_node))?;
		let next_connection_id = max_connection
			.0
			.checked_add(1)
			.ok_or(SnapshotError::ConnectionIdOutOfRange(max_connection))?;

		self.nodes = data
			.nodes
			.into_iter()
			.map(|r| (r.id, Node::from(r)))
			.collect();
		self.connections = data.connections.into_iter().map(Into::into).collect();
		self.next_node_id = next_node_id.max(1);
		self.next_connection_id = next_connection_id.max(1);
		Ok(())
	}
}
