/*!
# Wormwatch Core - Moteur pur de surveillance de map wormhole

Bibliothèque sans I/O consommée par le daemon wormwatch-kernel:
- Construction du snapshot graphe depuis le payload Pathfinder
- Diff de topologie (connexions ajoutées / disparues) entre deux polls
- Diff de signatures par système (nouvelles, EOL, masse, disparues)
- BFS vers le système safe le plus proche + politique anti-doublon de route
*/

pub mod diff;
pub mod error;
pub mod models;
pub mod policy;
pub mod route;
pub mod signatures;
pub mod snapshot;

pub use diff::{diff_edges, system_label, TopologyDiff};
pub use error::WatchError;
pub use models::{Edge, Graph, MapDataResponse, NameLookup, SignatureRecord, SystemId};
pub use policy::route_changed;
pub use route::{find_safe_route, resolve_names};
pub use signatures::{diff_signatures, SignatureEvent};
pub use snapshot::{build_snapshot, GraphSnapshot};
