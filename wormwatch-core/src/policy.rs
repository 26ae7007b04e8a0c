/// Politique anti-doublon des alertes de route.
///
/// La comparaison porte sur la séquence de noms résolus, pas sur les ids:
/// un renumérotage côté Pathfinder ne déclenche rien tant que la route
/// nommée reste identique. Une liste vide encode "pas de route" (une vraie
/// route contient toujours au moins le système home).
pub fn route_changed(current: &[String], last_notified: &[String]) -> bool {
    current != last_notified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_named_route_is_suppressed() {
        let last = path(&["A", "B", "Jita"]);
        assert!(!route_changed(&path(&["A", "B", "Jita"]), &last));
    }

    #[test]
    fn any_name_difference_fires() {
        let last = path(&["A", "B", "Jita"]);
        assert!(route_changed(&path(&["A", "B", "Amarr"]), &last));
        assert!(route_changed(&path(&["A", "Jita"]), &last));
        assert!(route_changed(&path(&["B", "A", "Jita"]), &last));
    }

    #[test]
    fn no_path_transitions_fire_both_ways() {
        let last = path(&["A", "Jita"]);
        assert!(route_changed(&[], &last));
        assert!(route_changed(&path(&["A", "Jita"]), &[]));
        assert!(!route_changed(&[], &[]));
    }
}
