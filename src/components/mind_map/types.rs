//! Graph entities, world-space geometry primitives and the persisted snapshot shape.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a node. Allocated from 1 upwards and never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

/// Identifier of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

/// A 2D point or vector. Used for both world and screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate, growing to the right.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Neither coordinate is NaN or infinite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, k: f64) -> Point {
		Point::new(self.x * k, self.y * k)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, k: f64) -> Point {
		Point::new(self.x / k, self.y / k)
	}
}

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Top-left corner.
	pub min: Point,
	/// Bottom-right corner.
	pub max: Point,
}

impl Bounds {
	/// Rectangle with its top-left corner at `origin`.
	pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
		Self {
			min: origin,
			max: Point::new(origin.x + width, origin.y + height),
		}
	}

	/// Bounding box of every node footprint anchored at `origins`.
	/// `None` for an empty iterator, so no infinities leak into callers.
	pub fn enclosing(
		origins: impl IntoIterator<Item = Point>,
		width: f64,
		height: f64,
	) -> Option<Self> {
		origins.into_iter().fold(None, |acc: Option<Bounds>, p| {
			let fp = Bounds::from_origin_size(p, width, height);
			Some(match acc {
				None => fp,
				Some(b) => Bounds {
					min: Point::new(b.min.x.min(fp.min.x), b.min.y.min(fp.min.y)),
					max: Point::new(b.max.x.max(fp.max.x), b.max.y.max(fp.max.y)),
				},
			})
		})
	}

	/// Midpoint of the rectangle.
	pub fn center(&self) -> Point {
		Point::new(
			(self.min.x + self.max.x) / 2.0,
			(self.min.y + self.max.y) / 2.0,
		)
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max.x - self.min.x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max.y - self.min.y
	}

	/// Edges count as inside.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
	}
}

/// Node category. Only affects labelling and colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
	/// Introductory material.
	#[default]
	Primer,
	/// In-depth material.
	DeepDive,
}

impl Category {
	/// Caption drawn at the top of the node.
	pub fn label(self) -> &'static str {
		match self {
			Category::Primer => "PRIMER",
			Category::DeepDive => "DEEP DIVE",
		}
	}
}

/// Cosmetic edge style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStyle {
	/// Continuous line.
	#[default]
	Solid,
	/// Dashed line.
	Dotted,
}

/// The user-editable text fields of a node, as handed over by the editor dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeFields {
	/// Required once trimmed.
	pub title: String,
	/// Free text.
	pub description: String,
	/// Empty means no author.
	pub author: String,
	/// Empty means no link.
	pub link: String,
}

impl NodeFields {
	/// Fields with only a title and a description.
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			..Self::default()
		}
	}

	/// Trim every field, the way the dialog submits them.
	pub fn trimmed(&self) -> Self {
		Self {
			title: self.title.trim().to_string(),
			description: self.description.trim().to_string(),
			author: self.author.trim().to_string(),
			link: self.link.trim().to_string(),
		}
	}
}

/// A titled box on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Stable identifier.
	pub id: NodeId,
	/// Heading text.
	pub title: String,
	/// Body text.
	pub description: String,
	/// Primer or deep dive.
	pub category: Category,
	/// Top-left corner in world space.
	pub position: Point,
	/// Credited author, if any.
	pub author: Option<String>,
	/// Slides or document URL, if any.
	pub link: Option<String>,
}

impl Node {
	/// Build a node; empty author and link become `None`.
	pub fn new(id: NodeId, fields: NodeFields, category: Category, position: Point) -> Self {
		let mut node = Self {
			id,
			title: String::new(),
			description: String::new(),
			category,
			position,
			author: None,
			link: None,
		};
		node.apply(fields);
		node
	}

	pub(crate) fn apply(&mut self, fields: NodeFields) {
		self.title = fields.title;
		self.description = fields.description;
		self.author = non_empty(fields.author);
		self.link = non_empty(fields.link);
	}

	/// The node's text as the editor dialog shows it.
	pub fn fields(&self) -> NodeFields {
		NodeFields {
			title: self.title.clone(),
			description: self.description.clone(),
			author: self.author.clone().unwrap_or_default(),
			link: self.link.clone().unwrap_or_default(),
		}
	}
}

fn non_empty(s: String) -> Option<String> {
	if s.is_empty() { None } else { Some(s) }
}

/// An undirected edge between two nodes. `from`/`to` only record click order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	/// Stable identifier.
	pub id: ConnectionId,
	/// First node clicked.
	pub from: NodeId,
	/// Second node clicked.
	pub to: NodeId,
	/// Line style.
	pub style: ConnectionStyle,
}

impl Connection {
	/// Undirected pair match.
	pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: NodeId) -> bool {
		self.from == id || self.to == id
	}
}

fn first_node_id() -> u32 {
	1
}

/// Persisted form of the whole graph, stored as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGraph {
	/// Every node, in id order.
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	/// Every connection, in creation order.
	#[serde(default)]
	pub connections: Vec<ConnectionRecord>,
	/// Informational only: the allocator is recomputed from the node ids on load.
	#[serde(default = "first_node_id")]
	pub next_node_id: u32,
}

/// Stored text field. Absent and `null` both read as empty.
fn text_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Persisted form of a [`Node`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	/// Node id.
	pub id: NodeId,
	/// Heading text.
	pub title: String,
	/// Body text.
	#[serde(default, deserialize_with = "text_or_empty")]
	pub description: String,
	/// Stored as `"type"`.
	#[serde(rename = "type")]
	pub category: Category,
	/// World-space left edge.
	pub x: f64,
	/// World-space top edge.
	pub y: f64,
	/// Empty when the node has no author.
	#[serde(default, deserialize_with = "text_or_empty")]
	pub author: String,
	/// Empty when the node has no link.
	#[serde(default, deserialize_with = "text_or_empty")]
	pub link: String,
}

impl From<&Node> for NodeRecord {
	fn from(node: &Node) -> Self {
		Self {
			id: node.id,
			title: node.title.clone(),
			description: node.description.clone(),
			category: node.category,
			x: node.position.x,
			y: node.position.y,
			author: node.author.clone().unwrap_or_default(),
			link: node.link.clone().unwrap_or_default(),
		}
	}
}

impl From<NodeRecord> for Node {
	fn from(r: NodeRecord) -> Self {
		Node::new(
			r.id,
			NodeFields {
				title: r.title,
				description: r.description,
				author: r.author,
				link: r.link,
			},
			r.category,
			Point::new(r.x, r.y),
		)
	}
}

/// Persisted form of a [`Connection`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
	/// Connection id.
	pub id: ConnectionId,
	/// First endpoint.
	pub from: NodeId,
	/// Second endpoint.
	pub to: NodeId,
	/// Stored as `"type"`; solid when absent.
	#[serde(rename = "type", default)]
	pub style: ConnectionStyle,
}

impl From<&Connection> for ConnectionRecord {
	fn from(c: &Connection) -> Self {
		Self {
			id: c.id,
			from: c.from,
			to: c.to,
			style: c.style,
		}
	}
}

impl From<ConnectionRecord> for Connection {
	fn from(r: ConnectionRecord) -> Self {
		Self {
			id: r.id,
			from: r.from,
			to: r.to,
			style: r.style,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn enclosing_empty_is_none() {
		assert_eq!(Bounds::enclosing(Vec::<Point>::new(), 200.0, 100.0), None);
	}

	#[test]
	fn enclosing_pads_by_footprint() {
		let b = Bounds::enclosing([Point::new(0.0, 0.0), Point::new(100.0, 100.0)], 200.0, 100.0)
			.unwrap();
		assert_eq!(b.min, Point::new(0.0, 0.0));
		assert_eq!(b.max, Point::new(300.0, 200.0));
		assert_eq!(b.center(), Point::new(150.0, 100.0));
	}

	#[test]
	fn empty_author_and_link_become_none() {
		let node = Node::new(
			NodeId(1),
			NodeFields::new("A", ""),
			Category::Primer,
			Point::default(),
		);
		assert_eq!(node.author, None);
		assert_eq!(node.link, None);
		assert_eq!(node.fields(), NodeFields::new("A", ""));
	}

	#[test]
	fn legacy_record_without_author_or_link() {
		let json = r#"{"id":3,"title":"T","description":"d","type":"deep-dive","x":1.5,"y":-2}"#;
		let record: NodeRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.category, Category::DeepDive);
		assert_eq!(record.author, "");
		assert_eq!(record.link, "");
		assert_eq!(record.y, -2.0);
	}

	#[test]
	fn null_text_fields_read_as_empty() {
		let json = r#"{"id":5,"title":"T","description":null,"type":"primer","x":0,"y":0,"author":null,"link":null}"#;
		let record: NodeRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.description, "");
		assert_eq!(record.author, "");
		assert_eq!(record.link, "");
		assert_eq!(Node::from(record).author, None);
	}

	#[test]
	fn wire_names_match_storage_format() {
		let record = ConnectionRecord {
			id: ConnectionId(1_700_000_000_000),
			from: NodeId(1),
			to: NodeId(2),
			style: ConnectionStyle::Dotted,
		};
		let json = serde_json::to_string(&record).unwrap();
		assert_eq!(
			json,
			r#"{"id":1700000000000,"from":1,"to":2,"type":"dotted"}"#
		);
	}

	#[test]
	fn connection_match_is_undirected() {
		let c = Connection {
			id: ConnectionId(1),
			from: NodeId(1),
			to: NodeId(2),
			style: ConnectionStyle::Solid,
		};
		assert!(c.joins(NodeId(2), NodeId(1)));
		assert!(c.touches(NodeId(2)));
		assert!(!c.touches(NodeId(3)));
	}
}
