//! Error types for snapshot loading, storage access and the editor dialog.

use thiserror::Error;

use super::types::{ConnectionId, NodeId};

/// A snapshot that parsed but cannot be loaded as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
	/// Two nodes share an id.
	#[error("{0} appears more than once")]
	DuplicateNodeId(NodeId),
	/// The largest node id leaves no room for the allocator.
	#[error("{0} is the last id; no further nodes could be allocated")]
	NodeIdOutOfRange(NodeId),
	/// The largest connection id leaves no room for the allocator.
	#[error("{0:?} is the last connection id")]
	ConnectionIdOutOfRange(ConnectionId),
}

/// Failure reading or writing the stored graph.
#[derive(Debug, Error)]
pub enum PersistenceError {
	/// No `localStorage` in this environment.
	#[error("local storage is unavailable")]
	Unavailable,
	/// The browser refused the read or write.
	#[error("storage access failed: {0}")]
	Access(String),
	/// Stored text is not a snapshot.
	#[error("malformed snapshot: {0}")]
	Malformed(#[from] serde_json::Error),
	/// Stored snapshot parsed but cannot be loaded.
	#[error("inconsistent snapshot: {0}")]
	Inconsistent(#[from] SnapshotError),
}

/// Rejected editor submission.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
	/// Title is blank after trimming.
	#[error("Please enter a title")]
	EmptyTitle,
	/// Every node id has been handed out.
	#[error("No more nodes can be added")]
	NoFreeNodeId,
}
