//! Snapshot persistence: JSON in browser local storage, or in memory.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use super::error::PersistenceError;
use super::store::GraphStore;
use super::types::SerializedGraph;

/// Local storage key the browser editor uses unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "mindMapData";

/// Durable string slot holding the serialized graph.
pub trait SnapshotStorage {
	/// Current contents, `None` if nothing was ever written.
	fn read(&self) -> Result<Option<String>, PersistenceError>;
	/// Replace the contents.
	fn write(&self, value: &str) -> Result<(), PersistenceError>;
}

/// `window.localStorage` under a fixed key.
pub struct LocalStorage {
	key: String,
}

impl LocalStorage {
	/// Slot stored under `key`.
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage(&self) -> Result<web_sys::Storage, PersistenceError> {
		let window = web_sys::window().ok_or(PersistenceError::Unavailable)?;
		window
			.local_storage()
			.map_err(|err| PersistenceError::Access(format!("{err:?}")))?
			.ok_or(PersistenceError::Unavailable)
	}
}

impl SnapshotStorage for LocalStorage {
	fn read(&self) -> Result<Option<String>, PersistenceError> {
		self.storage()?
			.get_item(&self.key)
			.map_err(|err| PersistenceError::Access(format!("{err:?}")))
	}

	fn write(&self, value: &str) -> Result<(), PersistenceError> {
		self.storage()?
			.set_item(&self.key, value)
			.map_err(|err| PersistenceError::Access(format!("{err:?}")))
	}
}

/// In-memory slot. Clones share the same contents, so a handle kept outside
/// the editor observes every write.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
	value: Rc<RefCell<Option<String>>>,
	writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
	/// Empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Slot that already holds `value`.
	pub fn with_value(value: impl Into<String>) -> Self {
		let storage = Self::default();
		*storage.value.borrow_mut() = Some(value.into());
		storage
	}

	/// What was last written (or seeded).
	pub fn value(&self) -> Option<String> {
		self.value.borrow().clone()
	}

	/// Number of successful writes so far.
	pub fn write_count(&self) -> usize {
		self.writes.get()
	}
}

impl SnapshotStorage for MemoryStorage {
	fn read(&self) -> Result<Option<String>, PersistenceError> {
		Ok(self.value.borrow().clone())
	}

	fn write(&self, value: &str) -> Result<(), PersistenceError> {
		*self.value.borrow_mut() = Some(value.to_string());
		self.writes.set(self.writes.get() + 1);
		Ok(())
	}
}

/// Reads and writes whole-graph snapshots through a [`SnapshotStorage`].
pub struct Persistence {
	storage: Box<dyn SnapshotStorage>,
}

impl Persistence {
	/// Adapter over `storage`.
	pub fn new(storage: impl SnapshotStorage + 'static) -> Self {
		Self {
			storage: Box::new(storage),
		}
	}

	/// Serialize the whole graph and write it.
	pub fn save(&self, store: &GraphStore) -> Result<(), PersistenceError> {
		let json = serde_json::to_string(&store.serialize())?;
		self.storage.write(&json)?;
		debug!("saved {} nodes, {} connections", store.len(), store.connections().len());
		Ok(())
	}

	/// Stored snapshot, with the reason when it cannot be read.
	pub fn try_load(&self) -> Result<Option<SerializedGraph>, PersistenceError> {
		match self.storage.read()? {
			Some(json) => Ok(Some(serde_json::from_str(&json)?)),
			None => Ok(None),
		}
	}

	/// Stored snapshot, or `None` if there is none or it cannot be read.
	pub fn load(&self) -> Option<SerializedGraph> {
		self.try_load().unwrap_or_else(|err| {
			warn!("discarding saved data: {err}");
			None
		})
	}
}
