use crate::models::{Edge, Graph, MapDataResponse, NameLookup, SystemId};
use std::collections::HashSet;

/// Vue immuable de la map pour un tick: adjacence, noms, arêtes canoniques.
/// Reconstruit entier à chaque poll, jamais muté en place.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    pub graph: Graph,
    pub names: NameLookup,
    pub edges: HashSet<Edge>,
}

/// Aplatit toutes les couches de map du payload en un seul snapshot.
/// Un id présent dans plusieurs couches: le dernier nom vu gagne (non fatal).
pub fn build_snapshot(payload: &MapDataResponse) -> GraphSnapshot {
    let mut snapshot = GraphSnapshot::default();

    for layer in &payload.map_data {
        let Some(data) = &layer.data else { continue };

        for system in &data.systems {
            snapshot.names.insert(system.id, system.name.clone());
        }

        for conn in &data.connections {
            let edge = Edge::new(conn.source, conn.target);
            if snapshot.edges.insert(edge) {
                insert_neighbor(&mut snapshot.graph, conn.source, conn.target);
                insert_neighbor(&mut snapshot.graph, conn.target, conn.source);
            }
        }
    }

    snapshot
}

fn insert_neighbor(graph: &mut Graph, from: SystemId, to: SystemId) {
    let neighbors = graph.entry(from).or_default();
    if !neighbors.contains(&to) {
        neighbors.push(to);
    }
}
