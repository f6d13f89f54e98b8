//! Canvas drawing and hit-testing over a fixed node footprint.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::controller::MindMap;
use super::input::{NodeHit, NodePart};
use super::state::Interaction;
use super::store::GraphStore;
use super::types::{Bounds, Category, ConnectionStyle, Node, Point};
use super::viewport::Viewport;

/// Node footprint in world units. Drawing, hit-testing and content bounds all use it.
pub const NODE_WIDTH: f64 = 200.0;
/// See [`NODE_WIDTH`].
pub const NODE_HEIGHT: f64 = 100.0;

const PADDING: f64 = 12.0;
const BUTTON_SIZE: f64 = 18.0;
const BUTTON_INSET: f64 = 6.0;

fn body() -> Bounds {
	Bounds::from_origin_size(Point::default(), NODE_WIDTH, NODE_HEIGHT)
}

fn delete_button() -> Bounds {
	Bounds::from_origin_size(
		Point::new(NODE_WIDTH - BUTTON_INSET - BUTTON_SIZE, BUTTON_INSET),
		BUTTON_SIZE,
		BUTTON_SIZE,
	)
}

fn edit_button() -> Bounds {
	Bounds::from_origin_size(
		Point::new(NODE_WIDTH - 2.0 * (BUTTON_INSET + BUTTON_SIZE), BUTTON_INSET),
		BUTTON_SIZE,
		BUTTON_SIZE,
	)
}

fn link_button() -> Bounds {
	Bounds::from_origin_size(
		Point::new(
			NODE_WIDTH - BUTTON_INSET - BUTTON_SIZE,
			NODE_HEIGHT - BUTTON_INSET - BUTTON_SIZE,
		),
		BUTTON_SIZE,
		BUTTON_SIZE,
	)
}

/// Topmost node part under a screen point. Later nodes paint over earlier ones.
pub fn hit_test(store: &GraphStore, viewport: &Viewport, screen: Point) -> Option<NodeHit> {
	let world = viewport.screen_to_world(screen);
	store.nodes().rev().find_map(|node| {
		let local = world - node.position;
		if !body().contains(local) {
			return None;
		}
		let part = if delete_button().contains(local) {
			NodePart::Delete
		} else if edit_button().contains(local) {
			NodePart::Edit
		} else if node.link.is_some() && link_button().contains(local) {
			NodePart::Link
		} else {
			NodePart::Body
		};
		Some(NodeHit { id: node.id, part })
	})
}

fn node_center(node: &Node) -> Point {
	node.position + Point::new(NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0)
}

/// Paint the whole scene: background, then edges, then nodes.
pub fn render(map: &MindMap, ctx: &CanvasRenderingContext2d) {
	let viewport = map.viewport();
	ctx.set_fill_style_str("#f4f5f7");
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	ctx.save();
	let _ = ctx.translate(viewport.pan.x, viewport.pan.y);
	let _ = ctx.scale(viewport.scale, viewport.scale);
	draw_edges(map.store(), ctx);
	draw_nodes(map.store(), map.interaction(), ctx);
	ctx.restore();
}

fn draw_edges(store: &GraphStore, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#8a94a6");
	ctx.set_line_width(2.0);

	for connection in store.connections() {
		// Dangling connections from old snapshots are kept but not drawn.
		let (Some(from), Some(to)) = (store.node(connection.from), store.node(connection.to))
		else {
			continue;
		};
		let dash = match connection.style {
			ConnectionStyle::Solid => js_sys::Array::new(),
			ConnectionStyle::Dotted => {
				js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(6.0))
			}
		};
		let _ = ctx.set_line_dash(&dash);
		let (a, b) = (node_center(from), node_center(to));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(store: &GraphStore, interaction: &Interaction, ctx: &CanvasRenderingContext2d) {
	for node in store.nodes() {
		let Point { x, y } = node.position;
		let (fill, accent) = match node.category {
			Category::Primer => ("#ffffff", "#2f6fde"),
			Category::DeepDive => ("#fff8ec", "#d9822b"),
		};

		ctx.set_fill_style_str(fill);
		ctx.fill_rect(x, y, NODE_WIDTH, NODE_HEIGHT);
		ctx.set_fill_style_str(accent);
		ctx.fill_rect(x, y, 4.0, NODE_HEIGHT);

		let highlighted = interaction.is_highlighted(node.id);
		ctx.set_stroke_style_str(if highlighted { "#16a34a" } else { "#d0d5dd" });
		ctx.set_line_width(if highlighted { 3.0 } else { 1.0 });
		ctx.stroke_rect(x, y, NODE_WIDTH, NODE_HEIGHT);

		let text_width = NODE_WIDTH - 2.0 * PADDING - 2.0 * (BUTTON_INSET + BUTTON_SIZE);
		ctx.set_fill_style_str(accent);
		ctx.set_font("bold 10px sans-serif");
		let _ = ctx.fill_text(node.category.label(), x + PADDING, y + 20.0);

		ctx.set_fill_style_str("#1f2933");
		ctx.set_font("bold 15px sans-serif");
		let title = fit_text(ctx, &node.title, text_width);
		let _ = ctx.fill_text(&title, x + PADDING, y + 44.0);

		ctx.set_fill_style_str("#52606d");
		ctx.set_font("12px sans-serif");
		let description = fit_text(ctx, &node.description, NODE_WIDTH - 2.0 * PADDING);
		let _ = ctx.fill_text(&description, x + PADDING, y + 64.0);

		if let Some(author) = &node.author {
			ctx.set_font("italic 11px sans-serif");
			let author = fit_text(ctx, author, NODE_WIDTH - 2.0 * PADDING - BUTTON_SIZE);
			let _ = ctx.fill_text(&author, x + PADDING, y + NODE_HEIGHT - 10.0);
		}

		draw_button(ctx, node.position, delete_button(), "×");
		draw_button(ctx, node.position, edit_button(), "i");
		if node.link.is_some() {
			draw_button(ctx, node.position, link_button(), "↗");
		}
	}
}

fn draw_button(ctx: &CanvasRenderingContext2d, origin: Point, button: Bounds, glyph: &str) {
	let Point { x, y } = origin + button.min;
	ctx.set_fill_style_str("#eef1f5");
	ctx.fill_rect(x, y, button.width(), button.height());
	ctx.set_fill_style_str("#3e4c59");
	ctx.set_font("bold 12px sans-serif");
	let _ = ctx.fill_text(glyph, x + 5.0, y + 13.0);
}

/// Truncate `text` with an ellipsis so it fits `max_width` in the current font.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	let width = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	if width(text) <= max_width {
		return text.to_string();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate: String = chars.iter().collect::<String>() + "…";
		if width(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::{NodeFields, NodeId};
	use pretty_assertions::assert_eq;

	fn store_with_overlap() -> GraphStore {
		let mut store = GraphStore::new();
		store.create_node(NodeFields::new("under", ""), Category::Primer, Point::new(0.0, 0.0));
		let mut linked = NodeFields::new("over", "");
		linked.link = "https://example.org".into();
		store.create_node(linked, Category::DeepDive, Point::new(100.0, 50.0));
		store
	}

	#[test]
	fn misses_empty_canvas() {
		let store = store_with_overlap();
		let viewport = Viewport::new(800.0, 600.0);
		assert_eq!(hit_test(&store, &viewport, Point::new(-5.0, -5.0)), None);
		assert_eq!(hit_test(&store, &viewport, Point::new(500.0, 500.0)), None);
	}

	#[test]
	fn topmost_node_wins() {
		let store = store_with_overlap();
		let viewport = Viewport::new(800.0, 600.0);
		assert_eq!(
			hit_test(&store, &viewport, Point::new(120.0, 90.0)),
			Some(NodeHit::body(NodeId(2)))
		);
		assert_eq!(
			hit_test(&store, &viewport, Point::new(20.0, 90.0)),
			Some(NodeHit::body(NodeId(1)))
		);
	}

	#[test]
	fn buttons_are_hit_through_the_transform() {
		let store = store_with_overlap();
		let viewport = Viewport {
			scale: 0.5,
			pan: Point::new(200.0, 100.0),
			width: 800.0,
			height: 600.0,
		};
		let at = |local: Point, node: Point| viewport.world_to_screen(node + local);
		let first = Point::new(0.0, 0.0);
		let second = Point::new(100.0, 50.0);

		// node 2 overlaps node 1's lower right, clear of its buttons
		let edit = at(edit_button().center(), first);
		assert_eq!(
			hit_test(&store, &viewport, edit),
			Some(NodeHit { id: NodeId(1), part: NodePart::Edit })
		);
		let delete = at(delete_button().center(), second);
		assert_eq!(
			hit_test(&store, &viewport, delete),
			Some(NodeHit { id: NodeId(2), part: NodePart::Delete })
		);
		let link = at(link_button().center(), second);
		assert_eq!(
			hit_test(&store, &viewport, link),
			Some(NodeHit { id: NodeId(2), part: NodePart::Link })
		);
	}

	#[test]
	fn link_button_absent_without_link() {
		let mut store = store_with_overlap();
		store.delete_node(NodeId(2));
		let viewport = Viewport::new(800.0, 600.0);
		let p = link_button().center();
		assert_eq!(hit_test(&store, &viewport, p), Some(NodeHit::body(NodeId(1))));
	}
}
