use crate::diff::system_label;
use crate::models::{Graph, NameLookup, SystemId};
use std::collections::{HashSet, VecDeque};

/// BFS depuis `home` jusqu'au premier système dont le nom résolu appartient
/// au safe set. Retourne le chemin complet (home inclus, cible incluse) ou
/// None si la map n'offre aucune route.
///
/// Le marquage visited se fait au dequeue: la file peut contenir des entrées
/// en double pour un même id, mais le premier dequeue d'un id passe toujours
/// par un chemin au nombre de sauts minimal.
pub fn find_safe_route(
    graph: &Graph,
    home: SystemId,
    names: &NameLookup,
    safe_names: &HashSet<String>,
) -> Option<Vec<SystemId>> {
    let mut visited: HashSet<SystemId> = HashSet::new();
    let mut queue: VecDeque<(SystemId, Vec<SystemId>)> = VecDeque::new();
    queue.push_back((home, vec![home]));

    while let Some((current, path)) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }

        if let Some(name) = names.get(&current) {
            if safe_names.contains(name) {
                return Some(path);
            }
        }

        let Some(neighbors) = graph.get(&current) else {
            continue;
        };
        for &next in neighbors {
            if !visited.contains(&next) {
                let mut next_path = path.clone();
                next_path.push(next);
                queue.push_back((next, next_path));
            }
        }
    }

    None
}

/// Chemin d'ids -> chemin de noms (fallback id brut), base de comparaison
/// de la politique de changement de route
pub fn resolve_names(names: &NameLookup, path: &[SystemId]) -> Vec<String> {
    path.iter().map(|&id| system_label(names, id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MapDataResponse, MapLayer, LayerData, RawConnection, RawSystem};
    use crate::snapshot::build_snapshot;

    fn snapshot(
        systems: &[(SystemId, &str)],
        connections: &[(SystemId, SystemId)],
    ) -> crate::snapshot::GraphSnapshot {
        build_snapshot(&MapDataResponse {
            map_data: vec![MapLayer {
                data: Some(LayerData {
                    systems: systems
                        .iter()
                        .map(|&(id, name)| RawSystem { id, name: name.into() })
                        .collect(),
                    connections: connections
                        .iter()
                        .map(|&(source, target)| RawConnection { source, target })
                        .collect(),
                }),
            }],
        })
    }

    fn safe(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_shortest_of_two_chains() {
        // home 1: chaîne courte 1-2-3 (3 = Jita), chaîne longue 1-4-5-6-7 (7 = Amarr)
        let snap = snapshot(
            &[(1, "H"), (2, "B"), (3, "Jita"), (4, "C"), (5, "D"), (6, "E"), (7, "Amarr")],
            &[(1, 2), (2, 3), (1, 4), (4, 5), (5, 6), (6, 7)],
        );

        let path = find_safe_route(&snap.graph, 1, &snap.names, &safe(&["Jita", "Amarr"]));
        assert_eq!(path, Some(vec![1, 2, 3]));
    }

    #[test]
    fn home_without_edges_has_no_route() {
        let snap = snapshot(&[(1, "H"), (2, "Jita")], &[]);
        let path = find_safe_route(&snap.graph, 1, &snap.names, &safe(&["Jita"]));
        assert_eq!(path, None);
    }

    #[test]
    fn home_absent_from_graph_has_no_route() {
        let snap = snapshot(&[(2, "B"), (3, "Jita")], &[(2, 3)]);
        let path = find_safe_route(&snap.graph, 99, &snap.names, &safe(&["Jita"]));
        assert_eq!(path, None);
    }

    #[test]
    fn safe_home_is_singleton_path() {
        let snap = snapshot(&[(1, "Jita"), (2, "B")], &[(1, 2)]);
        let path = find_safe_route(&snap.graph, 1, &snap.names, &safe(&["Jita"]));
        assert_eq!(path, Some(vec![1]));
    }

    #[test]
    fn unreachable_safe_component_has_no_route() {
        let snap = snapshot(
            &[(1, "H"), (2, "B"), (3, "C"), (4, "Jita")],
            &[(1, 2), (3, 4)],
        );
        let path = find_safe_route(&snap.graph, 1, &snap.names, &safe(&["Jita"]));
        assert_eq!(path, None);
    }

    #[test]
    fn cycles_terminate() {
        let snap = snapshot(
            &[(1, "H"), (2, "B"), (3, "C"), (4, "Jita")],
            &[(1, 2), (2, 3), (3, 1), (3, 4)],
        );
        // l'arête (3,1) donne à 1 le voisin direct 3: la route courte passe par là
        let path = find_safe_route(&snap.graph, 1, &snap.names, &safe(&["Jita"]));
        assert_eq!(path, Some(vec![1, 3, 4]));
    }

    #[test]
    fn resolve_names_falls_back_to_id() {
        let snap = snapshot(&[(1, "H"), (2, "B")], &[(1, 2)]);
        assert_eq!(
            resolve_names(&snap.names, &[1, 2, 9]),
            vec!["H".to_string(), "B".to_string(), "9".to_string()]
        );
    }
}
