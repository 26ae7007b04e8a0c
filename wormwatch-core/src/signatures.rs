use crate::models::SignatureRecord;
use std::collections::HashMap;

/// Événement de diff de signatures pour un système donné
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureEvent {
    New { sig_name: String },
    NowEol { sig_name: String },
    MassChanged { sig_name: String, old: f64, new: f64 },
    Disappeared { sig_name: String },
}

/// Diff du contenu signatures d'un système entre deux polls.
/// Événements émis en ordre lexicographique d'id de signature.
pub fn diff_signatures(
    prev: &HashMap<String, SignatureRecord>,
    cur: &HashMap<String, SignatureRecord>,
) -> Vec<SignatureEvent> {
    let mut events = Vec::new();

    let mut cur_ids: Vec<&String> = cur.keys().collect();
    cur_ids.sort();

    for sig_id in cur_ids {
        let sig = &cur[sig_id];
        match prev.get(sig_id) {
            None => events.push(SignatureEvent::New {
                sig_name: sig.name.clone(),
            }),
            Some(old) => {
                if sig.eol && !old.eol {
                    events.push(SignatureEvent::NowEol {
                        sig_name: sig.name.clone(),
                    });
                }
                if sig.mass != old.mass {
                    events.push(SignatureEvent::MassChanged {
                        sig_name: sig.name.clone(),
                        old: old.mass,
                        new: sig.mass,
                    });
                }
            }
        }
    }

    let mut gone_ids: Vec<&String> = prev.keys().filter(|id| !cur.contains_key(*id)).collect();
    gone_ids.sort();

    for sig_id in gone_ids {
        events.push(SignatureEvent::Disappeared {
            sig_name: prev[sig_id].name.clone(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, eol: bool, mass: f64) -> SignatureRecord {
        SignatureRecord {
            name: name.to_string(),
            eol,
            mass,
        }
    }

    fn sigs(entries: &[(&str, SignatureRecord)]) -> HashMap<String, SignatureRecord> {
        entries
            .iter()
            .map(|(id, s)| (id.to_string(), s.clone()))
            .collect()
    }

    #[test]
    fn new_signature_emits_new() {
        let prev = HashMap::new();
        let cur = sigs(&[("ABC-123", sig("K162", false, 100.0))]);

        let events = diff_signatures(&prev, &cur);
        assert_eq!(
            events,
            vec![SignatureEvent::New {
                sig_name: "K162".to_string()
            }]
        );
    }

    #[test]
    fn eol_transition_only_fires_false_to_true() {
        let prev = sigs(&[("A", sig("K162", false, 100.0)), ("B", sig("C247", true, 50.0))]);
        let cur = sigs(&[("A", sig("K162", true, 100.0)), ("B", sig("C247", true, 50.0))]);

        let events = diff_signatures(&prev, &cur);
        assert_eq!(
            events,
            vec![SignatureEvent::NowEol {
                sig_name: "K162".to_string()
            }]
        );
    }

    #[test]
    fn mass_change_carries_old_and_new() {
        let prev = sigs(&[("A", sig("K162", false, 100.0))]);
        let cur = sigs(&[("A", sig("K162", false, 40.0))]);

        let events = diff_signatures(&prev, &cur);
        assert_eq!(
            events,
            vec![SignatureEvent::MassChanged {
                sig_name: "K162".to_string(),
                old: 100.0,
                new: 40.0
            }]
        );
    }

    #[test]
    fn eol_and_mass_can_fire_for_same_signature() {
        let prev = sigs(&[("A", sig("K162", false, 100.0))]);
        let cur = sigs(&[("A", sig("K162", true, 40.0))]);

        let events = diff_signatures(&prev, &cur);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SignatureEvent::NowEol { .. }));
        assert!(matches!(events[1], SignatureEvent::MassChanged { .. }));
    }

    #[test]
    fn disappeared_after_current_events_in_id_order() {
        let prev = sigs(&[("Z", sig("H296", false, 10.0)), ("A", sig("K162", false, 10.0))]);
        let cur = sigs(&[("M", sig("N062", false, 10.0))]);

        let events = diff_signatures(&prev, &cur);
        assert_eq!(
            events,
            vec![
                SignatureEvent::New {
                    sig_name: "N062".to_string()
                },
                SignatureEvent::Disappeared {
                    sig_name: "K162".to_string()
                },
                SignatureEvent::Disappeared {
                    sig_name: "H296".to_string()
                },
            ]
        );
    }

    #[test]
    fn unchanged_signatures_emit_nothing() {
        let set = sigs(&[("A", sig("K162", true, 40.0))]);
        assert!(diff_signatures(&set, &set).is_empty());
    }
}
