/**
 * WORMWATCH KERNEL - Point d'entrée du daemon de surveillance
 *
 * RÔLE : Bootstrap complet : env, logging, config, safe set, état persistant,
 * puis boucle de poll infinie (fetch Pathfinder -> diffs -> alertes Discord).
 *
 * ARCHITECTURE : un seul worker logique, ticks séquentiels. Seules les
 * erreurs de démarrage (config requise manquante, safe set absent) sont
 * fatales; après le démarrage, plus rien ne termine le processus.
 */

mod config;
mod esi;
mod notify;
mod pathfinder;
mod store;
mod watcher;

use anyhow::Context;
use crate::config::{load_safe_set, WatchConfig};
use crate::watcher::Watcher;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().init();

    info!("🚀 Wormwatch kernel starting...");

    let cfg = WatchConfig::from_env().context("invalid configuration")?;
    let safe_names = load_safe_set(&cfg.safe_systems_file)
        .await
        .context("failed to load safe system names")?;
    info!(
        "loaded {} safe system names from {}",
        safe_names.len(),
        cfg.safe_systems_file.display()
    );

    let watcher = Watcher::new(cfg, safe_names)
        .await
        .context("failed to initialize watcher")?;

    watcher.run().await
}
