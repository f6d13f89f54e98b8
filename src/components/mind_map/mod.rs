//! Mind-map editor: graph model, view transform, input handling, storage
//! and the Leptos canvas component that hosts them.

mod component;
pub mod config;
pub mod controller;
mod editor;
pub mod error;
pub mod input;
pub mod persistence;
pub mod prompt;
pub mod render;
pub mod seed;
pub mod state;
pub mod store;
pub mod types;
pub mod viewport;

pub use component::MindMapCanvas;
pub use config::MindMapConfig;
pub use controller::{EditTarget, EditorDraft, Effect, MindMap};
pub use error::{FormError, PersistenceError, SnapshotError};
pub use input::{InputEvent, NodeHit, NodePart};
pub use persistence::{LocalStorage, MemoryStorage, Persistence, SnapshotStorage};
pub use prompt::{BrowserPrompt, Prompt};
pub use store::GraphStore;
pub use types::{
	Category, Connection, ConnectionId, ConnectionStyle, Node, NodeFields, NodeId, Point,
	SerializedGraph,
};
pub use viewport::Viewport;
