//! Built-in starter graph.

use super::types::{
	Category, ConnectionId, ConnectionRecord, ConnectionStyle, NodeId, NodeRecord,
	SerializedGraph,
};

use Category::{DeepDive, Primer};
use ConnectionStyle::{Dotted, Solid};

type SeedNode = (u32, Category, &'static str, &'static str, f64, f64, &'static str, &'static str);

#[rustfmt::skip]
const NODES: &[SeedNode] = &[
	(1, Primer, "Distributed Systems", "Start here: what changes once work spans more than one machine.", 0.0, 0.0, "Platform Guild", ""),
	(2, Primer, "Networking Basics", "Packets, sockets and the latency budget.", -600.0, 250.0, "", ""),
	(3, Primer, "Storage Engines", "How bytes get to disk and back.", -200.0, 250.0, "", ""),
	(4, Primer, "Consensus", "Agreeing on a value when nodes fail.", 200.0, 250.0, "", "https://raft.github.io/"),
	(5, Primer, "Observability", "Logs, metrics and traces as one story.", 600.0, 250.0, "", ""),
	(6, DeepDive, "TCP Congestion Control", "Slow start, CUBIC and BBR compared.", -750.0, 500.0, "", ""),
	(7, DeepDive, "QUIC and HTTP/3", "Streams over UDP without head-of-line blocking.", -500.0, 500.0, "", "https://quicwg.org/"),
	(8, DeepDive, "B-Trees vs LSM-Trees", "Read and write amplification trade-offs.", -300.0, 500.0, "", ""),
	(9, DeepDive, "Write-Ahead Logging", "Durability before the page hits disk.", -50.0, 500.0, "", ""),
	(10, DeepDive, "Raft in Practice", "Leader election, log replication, snapshots.", 150.0, 500.0, "Platform Guild", ""),
	(11, DeepDive, "Paxos Made Simple", "The classic, read slowly.", 400.0, 500.0, "", "https://lamport.azurewebsites.net/pubs/paxos-simple.pdf"),
	(12, DeepDive, "Distributed Tracing", "Propagating context across service hops.", 600.0, 500.0, "", ""),
	(13, DeepDive, "Metrics Cardinality", "Why a user-id label takes your TSDB down.", 850.0, 500.0, "", ""),
	(14, Primer, "Failure Modes", "Everything that goes wrong between two machines.", 0.0, -250.0, "", ""),
	(15, DeepDive, "Timeouts and Retries", "Partial failure, idempotency and retry storms.", -300.0, -500.0, "", ""),
	(16, DeepDive, "Clock Skew", "Wall clocks lie; logical clocks help.", 0.0, -500.0, "", ""),
	(17, DeepDive, "Backpressure", "Bounded queues and load shedding.", 300.0, -500.0, "", ""),
	(18, Primer, "Data Modeling", "Shaping data for the queries you will run.", -600.0, -250.0, "", ""),
	(19, DeepDive, "Schema Evolution", "Changing formats without breaking readers.", -600.0, -500.0, "", ""),
];

const CONNECTIONS: &[(u64, u32, u32, ConnectionStyle)] = &[
	(1, 1, 2, Solid),
	(2, 1, 3, Solid),
	(3, 1, 4, Solid),
	(4, 1, 5, Solid),
	(5, 2, 6, Solid),
	(6, 2, 7, Solid),
	(7, 3, 8, Solid),
	(8, 3, 9, Solid),
	(9, 4, 10, Solid),
	(10, 4, 11, Dotted),
	(11, 5, 12, Solid),
	(12, 5, 13, Dotted),
	(13, 1, 14, Solid),
	(14, 14, 15, Solid),
	(15, 14, 16, Dotted),
	(16, 14, 17, Solid),
	(17, 1, 18, Solid),
	(18, 18, 19, Solid),
];

/// Graph shown on first run and whenever saved data cannot be restored.
pub fn default_graph() -> SerializedGraph {
	let nodes: Vec<NodeRecord> = NODES
		.iter()
		.map(|&(id, category, title, description, x, y, author, link)| NodeRecord {
			id: NodeId(id),
			title: title.into(),
			description: description.into(),
			category,
			x,
			y,
			author: author.into(),
			link: link.into(),
		})
		.collect();
	let connections = CONNECTIONS
		.iter()
		.map(|&(id, from, to, style)| ConnectionRecord {
			id: ConnectionId(id),
			from: NodeId(from),
			to: NodeId(to),
			style,
		})
		.collect();
	let next_node_id = nodes.iter().map(|n| n.id.0).max().unwrap_or(0) + 1;
	SerializedGraph {
		nodes,
		connections,
		next_node_id,
	}
}
