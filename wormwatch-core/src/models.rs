use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifiant opaque d'un système sur la map Pathfinder
pub type SystemId = i64;

/// Lookup id -> nom, reconstruit à chaque poll
pub type NameLookup = HashMap<SystemId, String>;

/// Adjacence id -> voisins. Le Vec conserve l'ordre d'insertion du payload,
/// ce qui rend la sortie du BFS déterministe pour un payload donné.
pub type Graph = HashMap<SystemId, Vec<SystemId>>;

/// Connexion wormhole non orientée, canonisée à la construction:
/// (A,B) et (B,A) désignent la même arête.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge(pub SystemId, pub SystemId);

impl Edge {
    pub fn new(a: SystemId, b: SystemId) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }
}

// Miroir serde du payload /api/Map/updateData.
// Les sous-listes absentes sont tolérées (default = vide), pas une erreur.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapDataResponse {
    #[serde(rename = "mapData", default)]
    pub map_data: Vec<MapLayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapLayer {
    #[serde(default)]
    pub data: Option<LayerData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerData {
    #[serde(default)]
    pub systems: Vec<RawSystem>,
    #[serde(default)]
    pub connections: Vec<RawConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSystem {
    pub id: SystemId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConnection {
    pub source: SystemId,
    pub target: SystemId,
}

/// Signature scannée dans un système (wormhole): label, flag fin de vie, masse restante
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub name: String,
    #[serde(default)]
    pub eol: bool,
    #[serde(default)]
    pub mass: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn edge_is_canonical() {
        assert_eq!(Edge::new(2, 1), Edge::new(1, 2));

        let mut set = HashSet::new();
        set.insert(Edge::new(7, 3));
        set.insert(Edge::new(3, 7));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn edge_serializes_as_pair() {
        let json = serde_json::to_string(&Edge::new(5, 2)).unwrap();
        assert_eq!(json, "[2,5]");
        let back: Edge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Edge::new(2, 5));
    }

    #[test]
    fn payload_tolerates_missing_lists() {
        let payload: MapDataResponse =
            serde_json::from_str(r#"{"mapData":[{"data":{}},{"data":null},{}]}"#).unwrap();
        assert_eq!(payload.map_data.len(), 3);
        let empty: MapDataResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.map_data.is_empty());
    }
}
