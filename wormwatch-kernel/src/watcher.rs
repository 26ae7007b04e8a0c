/**
 * WATCHER - Orchestrateur de la boucle de surveillance
 *
 * RÔLE : Un tick = fetch du payload Pathfinder, diff de topologie et de
 * signatures contre l'état précédent, BFS vers le high-sec, politique
 * anti-doublon de route, envoi des alertes puis persistance de l'état.
 *
 * ARCHITECTURE : strictement séquentiel, un seul tick en vol. Toute erreur
 * avorte le tick courant (aucune persistance partielle) et raccourcit le
 * délai avant le tick suivant. Rien ne sort de la boucle externe.
 *
 * Ordre d'émission dans un tick : signatures, connexions disparues,
 * connexions ajoutées, changement de route.
 */
use crate::config::WatchConfig;
use crate::esi::EsiClient;
use crate::notify::{AlertLog, DiscordNotifier};
use crate::pathfinder::PathfinderClient;
use crate::store::StateStore;
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};
use wormwatch_core::{
    build_snapshot, diff_edges, diff_signatures, find_safe_route, resolve_names, route_changed,
    system_label, Edge, MapDataResponse, SignatureEvent, SignatureRecord, SystemId, WatchError,
};

/// État précédent, propriété exclusive de l'orchestrateur pendant un tick
#[derive(Debug, Default)]
pub struct WatchState {
    pub prior_edges: HashSet<Edge>,
    pub last_route: Vec<String>,
    pub prior_signatures: HashMap<SystemId, HashMap<String, SignatureRecord>>,
}

/// Alerte produite par un tick, déjà formatée pour livraison
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Signature(String),
    ConnectionRemoved(String),
    ConnectionAdded(String),
    RouteChanged {
        text: String,
        safe_endpoint: Option<String>,
    },
}

impl Alert {
    pub fn text(&self) -> &str {
        match self {
            Alert::Signature(text)
            | Alert::ConnectionRemoved(text)
            | Alert::ConnectionAdded(text) => text,
            Alert::RouteChanged { text, .. } => text,
        }
    }
}

/// Résultat d'un tick: alertes à livrer + état à persister
#[derive(Debug)]
pub struct TickReport {
    pub alerts: Vec<Alert>,
    pub edges: HashSet<Edge>,
    pub route: Vec<String>,
    pub route_changed: bool,
    pub baseline: bool,
}

/// Cœur pur d'un tick, sans I/O: tout ce qui est testable vit ici.
/// Met à jour `state` en mémoire; la persistance reste à la charge de
/// l'appelant.
pub fn process_tick(
    state: &mut WatchState,
    payload: &MapDataResponse,
    signatures: &HashMap<SystemId, HashMap<String, SignatureRecord>>,
    home: SystemId,
    safe_names: &HashSet<String>,
) -> TickReport {
    let snap = build_snapshot(payload);
    let mut alerts = Vec::new();

    // 1. diff de signatures par système (union des systèmes connus, ordre par id)
    let mut sig_systems: Vec<SystemId> = signatures
        .keys()
        .chain(state.prior_signatures.keys())
        .copied()
        .collect();
    sig_systems.sort();
    sig_systems.dedup();

    let empty = HashMap::new();
    for system_id in sig_systems {
        let prev = state.prior_signatures.get(&system_id).unwrap_or(&empty);
        let cur = signatures.get(&system_id).unwrap_or(&empty);
        let label = system_label(&snap.names, system_id);
        for event in diff_signatures(prev, cur) {
            alerts.push(Alert::Signature(render_signature_event(&label, &event)));
        }
    }
    state.prior_signatures = signatures.clone();

    // 2. diff de topologie. Premier passage (aucune arête connue): on établit
    // la baseline sans alerter, comme le faisait le bot d'origine.
    let baseline = state.prior_edges.is_empty() && !snap.edges.is_empty();
    if baseline {
        info!("topology baseline established ({} connections)", snap.edges.len());
    } else {
        let diff = diff_edges(&state.prior_edges, &snap.edges);
        for edge in &diff.removed {
            alerts.push(Alert::ConnectionRemoved(format!(
                "❌ Connection removed: `{}` → `{}`",
                system_label(&snap.names, edge.0),
                system_label(&snap.names, edge.1)
            )));
        }
        for edge in &diff.added {
            alerts.push(Alert::ConnectionAdded(format!(
                "➕ New connection: `{}` → `{}`",
                system_label(&snap.names, edge.0),
                system_label(&snap.names, edge.1)
            )));
        }
    }
    state.prior_edges = snap.edges.clone();

    // 3. route safe + politique anti-doublon (comparaison par noms, pas ids)
    let path = find_safe_route(&snap.graph, home, &snap.names, safe_names);
    let route: Vec<String> = match &path {
        Some(ids) => resolve_names(&snap.names, ids),
        None => Vec::new(),
    };

    let changed = route_changed(&route, &state.last_route);
    if changed {
        if route.is_empty() {
            alerts.push(Alert::RouteChanged {
                text: format!(
                    "🚨 No route to safe space found from `{}`",
                    system_label(&snap.names, home)
                ),
                safe_endpoint: None,
            });
        } else {
            let hops = route.len() - 1;
            let pretty = route
                .iter()
                .map(|name| format!("`{name}`"))
                .collect::<Vec<_>>()
                .join(" → ");
            alerts.push(Alert::RouteChanged {
                text: format!("🧭 Safe route changed ({hops} jumps): {pretty}"),
                safe_endpoint: route.last().cloned(),
            });
        }
        state.last_route = route.clone();
    }

    TickReport {
        alerts,
        edges: snap.edges,
        route,
        route_changed: changed,
        baseline,
    }
}

fn render_signature_event(system: &str, event: &SignatureEvent) -> String {
    match event {
        SignatureEvent::New { sig_name } => format!("🆕 `{system}`: New WH `{sig_name}`"),
        SignatureEvent::NowEol { sig_name } => {
            format!("⏳ `{system}`: WH `{sig_name}` is now **EOL**")
        }
        SignatureEvent::MassChanged { sig_name, old, new } => {
            format!("⚖️ `{system}`: WH `{sig_name}` mass changed: {old} → {new}")
        }
        SignatureEvent::Disappeared { sig_name } => {
            format!("💀 `{system}`: WH `{sig_name}` disappeared (likely collapsed)")
        }
    }
}

pub struct Watcher {
    cfg: WatchConfig,
    safe_names: HashSet<String>,
    pathfinder: PathfinderClient,
    esi: EsiClient,
    notifier: DiscordNotifier,
    alert_log: AlertLog,
    store: StateStore,
    state: WatchState,
}

impl Watcher {
    pub async fn new(cfg: WatchConfig, safe_names: HashSet<String>) -> anyhow::Result<Self> {
        let pathfinder = PathfinderClient::new(&cfg)?;
        let esi = EsiClient::new(cfg.http_timeout)?;
        let notifier = DiscordNotifier::new(cfg.webhook_url.clone(), cfg.http_timeout)?;
        let alert_log = AlertLog::new(&cfg.data_dir);
        let store = StateStore::new(&cfg.data_dir);

        // état persistant: absent = vide, corrompu = on repart de zéro en le signalant
        let mut state = WatchState::default();
        match store.load_edges().await {
            Ok(edges) => state.prior_edges = edges,
            Err(e) => warn!("could not load persisted edge set, starting fresh: {e}"),
        }
        match store.load_last_route().await {
            Ok(route) => state.last_route = route,
            Err(e) => warn!("could not load persisted route, starting fresh: {e}"),
        }

        info!(
            "watcher ready (home={}, {} safe systems, {} known connections)",
            cfg.home_system_id,
            safe_names.len(),
            state.prior_edges.len()
        );

        Ok(Self {
            cfg,
            safe_names,
            pathfinder,
            esi,
            notifier,
            alert_log,
            store,
            state,
        })
    }

    /// Boucle externe: jamais de sortie, un tick raté raccourcit juste
    /// l'attente avant le suivant.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(
            "starting poll loop (interval {}s, retry {}s)",
            self.cfg.poll_interval.as_secs(),
            self.cfg.retry_delay.as_secs()
        );

        loop {
            match self.tick().await {
                Ok(()) => tokio::time::sleep(self.cfg.poll_interval).await,
                Err(e) => {
                    error!("tick failed: {e}");
                    tokio::time::sleep(self.cfg.retry_delay).await;
                }
            }
        }
    }

    /// Un tick complet. Toute erreur remontée ici avorte le tick avant
    /// persistance; un échec de livraison seul n'est jamais fatal.
    async fn tick(&mut self) -> Result<(), WatchError> {
        let payload = self.pathfinder.fetch_map_data().await?;

        let mut signatures = HashMap::new();
        if self.cfg.track_signatures {
            for layer in &payload.map_data {
                let Some(data) = &layer.data else { continue };
                for system in &data.systems {
                    let sigs = self.pathfinder.fetch_signatures(system.id).await?;
                    signatures.insert(system.id, sigs);
                }
            }
        }

        let report = process_tick(
            &mut self.state,
            &payload,
            &signatures,
            self.cfg.home_system_id,
            &self.safe_names,
        );

        if report.alerts.is_empty() && !report.baseline {
            info!("nothing has changed, no alert sent");
        }

        for alert in &report.alerts {
            let text = match alert {
                Alert::RouteChanged { text, safe_endpoint } => {
                    self.decorate_route_alert(text, safe_endpoint.as_deref()).await
                }
                other => other.text().to_string(),
            };

            if let Err(e) = self.notifier.notify(&text).await {
                warn!("delivery failed, alert dropped: {e}");
            }
            if let Err(e) = self.alert_log.append(&text).await {
                warn!("alert log write failed: {e}");
            }
        }

        self.store.save_edges(&report.edges).await?;
        if report.route_changed {
            self.store.save_last_route(&report.route).await?;
        }

        Ok(())
    }

    /// Ajoute la distance vers le hub de marché à une alerte de route.
    /// Tout échec ESI laisse l'alerte telle quelle (décorateur best effort).
    async fn decorate_route_alert(&self, text: &str, safe_endpoint: Option<&str>) -> String {
        let (Some(hub), Some(endpoint)) = (self.cfg.trade_hub.as_deref(), safe_endpoint) else {
            return text.to_string();
        };
        if hub == endpoint {
            return text.to_string();
        }

        match self.hub_distance(endpoint, hub).await {
            Ok(Some(jumps)) => format!("{text} ({jumps} jumps from `{endpoint}` to `{hub}`)"),
            Ok(None) => text.to_string(),
            Err(e) => {
                warn!("trade hub distance lookup failed: {e}");
                text.to_string()
            }
        }
    }

    async fn hub_distance(&self, from: &str, hub: &str) -> Result<Option<u32>, WatchError> {
        let Some(from_id) = self.esi.resolve_system_id(from).await? else {
            return Ok(None);
        };
        let Some(hub_id) = self.esi.resolve_system_id(hub).await? else {
            return Ok(None);
        };
        self.esi.route_length(from_id, hub_id).await
    }
}
