use crate::models::{Edge, NameLookup, SystemId};
use std::collections::HashSet;

/// Delta de topologie entre deux polls.
/// Les deux listes sont triées pour que l'ordre des alertes soit reproductible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyDiff {
    pub added: Vec<Edge>,
    pub removed: Vec<Edge>,
}

impl TopologyDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// added = cur − prev, removed = prev − cur
pub fn diff_edges(prev: &HashSet<Edge>, cur: &HashSet<Edge>) -> TopologyDiff {
    let mut added: Vec<Edge> = cur.difference(prev).copied().collect();
    let mut removed: Vec<Edge> = prev.difference(cur).copied().collect();
    added.sort();
    removed.sort();

    TopologyDiff { added, removed }
}

/// Nom d'un système pour affichage, fallback sur l'id brut si inconnu du lookup
pub fn system_label(names: &NameLookup, id: SystemId) -> String {
    names.get(&id).cloned().unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(SystemId, SystemId)]) -> HashSet<Edge> {
        pairs.iter().map(|&(a, b)| Edge::new(a, b)).collect()
    }

    #[test]
    fn added_and_removed_are_set_differences() {
        let prev = edges(&[(1, 2), (2, 3)]);
        let cur = edges(&[(1, 2), (2, 4)]);

        let diff = diff_edges(&prev, &cur);
        assert_eq!(diff.added, vec![Edge::new(2, 4)]);
        assert_eq!(diff.removed, vec![Edge::new(2, 3)]);
    }

    #[test]
    fn applying_diff_reconstructs_current() {
        let prev = edges(&[(1, 2), (2, 3), (3, 4)]);
        let cur = edges(&[(2, 3), (4, 5), (5, 6)]);

        let diff = diff_edges(&prev, &cur);
        let mut rebuilt = prev.clone();
        for e in &diff.removed {
            rebuilt.remove(e);
        }
        for e in &diff.added {
            rebuilt.insert(*e);
        }
        assert_eq!(rebuilt, cur);
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let set = edges(&[(1, 2), (2, 3)]);
        assert!(diff_edges(&set, &set).is_empty());
    }

    #[test]
    fn diff_is_sorted() {
        let prev = HashSet::new();
        let cur = edges(&[(9, 8), (1, 2), (5, 3)]);

        let diff = diff_edges(&prev, &cur);
        assert_eq!(
            diff.added,
            vec![Edge::new(1, 2), Edge::new(3, 5), Edge::new(8, 9)]
        );
    }

    #[test]
    fn label_falls_back_to_raw_id() {
        let mut names = NameLookup::new();
        names.insert(1, "Jita".to_string());
        assert_eq!(system_label(&names, 1), "Jita");
        assert_eq!(system_label(&names, 42), "42");
    }
}
