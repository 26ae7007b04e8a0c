use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use wormwatch_core::SystemId;

/// Configuration du daemon, chargée depuis l'environnement (.env supporté).
/// Les variables requises manquantes sont fatales avant le démarrage de la
/// boucle; tout le reste a un défaut raisonnable.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub pathfinder_base_url: String,
    pub map_id: String,
    pub webhook_url: String,
    pub pf_session: String,
    /// Paire complète `char_<hash>=<valeur>` du cookie personnage Pathfinder
    pub pf_char_cookie: String,
    pub pf_character: String,
    pub home_system_id: SystemId,
    pub poll_interval: Duration,
    pub retry_delay: Duration,
    pub http_timeout: Duration,
    pub safe_systems_file: PathBuf,
    pub data_dir: PathBuf,
    /// Hub de marché pour le décorateur de distance (vide = désactivé)
    pub trade_hub: Option<String>,
    pub track_signatures: bool,
}

impl WatchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            pathfinder_base_url: optional("PATHFINDER_BASE_URL", "https://path.shadowflight.org"),
            map_id: required("MAP_ID")?,
            webhook_url: required("DISCORD_WEBHOOK")?,
            pf_session: required("PF_SESSION")?,
            pf_char_cookie: required("PF_CHAR_COOKIE")?,
            pf_character: required("PF_CHARACTER")?,
            home_system_id: required("HOME_SYSTEM_ID")?
                .parse()
                .context("HOME_SYSTEM_ID doit être un id de système entier")?,
            poll_interval: Duration::from_secs(parse_secs("POLL_INTERVAL_SECS", 60)?),
            retry_delay: Duration::from_secs(parse_secs("RETRY_DELAY_SECS", 5)?),
            http_timeout: Duration::from_secs(parse_secs("HTTP_TIMEOUT_SECS", 30)?),
            safe_systems_file: optional("SAFE_SYSTEMS_FILE", "highsec_system_names.json").into(),
            data_dir: optional("DATA_DIR", ".").into(),
            trade_hub: match optional("TRADE_HUB", "Jita") {
                s if s.is_empty() => None,
                s => Some(s),
            },
            track_signatures: parse_bool(&optional("TRACK_SIGNATURES", "false")),
        })
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("variable d'environnement requise: {key}"))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_secs(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("{key} doit être un nombre de secondes")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Charge le safe set (liste JSON de noms de systèmes) une fois au démarrage.
/// Fichier absent = erreur fatale: sans cible, le BFS n'a aucun sens.
pub async fn load_safe_set(path: &std::path::Path) -> Result<HashSet<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("lecture du safe set {} (générer via wormwatch-safelist)", path.display()))?;
    let names: Vec<String> =
        serde_json::from_str(&content).with_context(|| format!("safe set invalide: {}", path.display()))?;

    Ok(names.into_iter().collect())
}
