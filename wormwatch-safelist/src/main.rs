//! Wormwatch Safelist - harvests high-sec system names from ESI
//!
//! One-shot tool that walks every solar system known to ESI, keeps the names
//! with security status >= 0.5 and writes the sorted list the daemon loads as
//! its safe set. Progress is saved every 50 systems so an interrupted run can
//! resume from the partial file instead of starting over.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const ESI_BASE: &str = "https://esi.evetech.net/latest";
const FINAL_FILE: &str = "highsec_system_names.json";
const PARTIAL_FILE: &str = "highsec_system_names.partial.json";

const SLEEP_INTERVAL: Duration = Duration::from_secs(1);
const SAVE_EVERY: usize = 50;
const MAX_RETRIES: u32 = 3;
const HIGHSEC_THRESHOLD: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct SystemDetails {
    name: String,
    #[serde(default)]
    security_status: f64,
}

async fn get_all_system_ids(http: &reqwest::Client) -> Result<Vec<i64>> {
    info!("📡 Fetching all solar system ids from ESI...");
    let response = http
        .get(format!("{ESI_BASE}/universe/systems/"))
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json().await?)
}

/// Détails d'un système, avec retries et backoff linéaire.
/// None après MAX_RETRIES échecs: le système est sauté, pas fatal.
async fn get_system_details(http: &reqwest::Client, system_id: i64) -> Option<SystemDetails> {
    let url = format!("{ESI_BASE}/universe/systems/{system_id}/");
    for attempt in 1..=MAX_RETRIES {
        match http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<SystemDetails>().await {
                    Ok(details) => return Some(details),
                    Err(e) => warn!("bad payload for {system_id}: {e}"),
                }
            }
            Ok(response) => warn!("status {} for {system_id}, retrying...", response.status()),
            Err(e) => warn!("error fetching {system_id}: {e}"),
        }
        tokio::time::sleep(SLEEP_INTERVAL * attempt).await;
    }
    None
}

async fn load_partial(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let content = tokio::fs::read_to_string(path).await?;
    let names: Vec<String> = serde_json::from_str(&content)?;
    Ok(names.into_iter().collect())
}

/// Écrit la liste triée (BTreeSet = tri gratuit)
async fn save_names(path: &Path, names: &BTreeSet<String>, pretty: bool) -> Result<()> {
    let sorted: Vec<&String> = names.iter().collect();
    let content = if pretty {
        serde_json::to_string_pretty(&sorted)?
    } else {
        serde_json::to_string(&sorted)?
    };
    tokio::fs::write(path, content).await?;
    Ok(())
}

async fn fetch_highsec_system_names(http: &reqwest::Client) -> Result<BTreeSet<String>> {
    let all_ids = get_all_system_ids(http).await?;
    let mut highsec_names = load_partial(Path::new(PARTIAL_FILE)).await?;

    if !highsec_names.is_empty() {
        info!(
            "🔁 Resuming from {PARTIAL_FILE} with {} names...",
            highsec_names.len()
        );
    }

    let total = all_ids.len();
    for (i, system_id) in all_ids.into_iter().enumerate() {
        if let Some(details) = get_system_details(http, system_id).await {
            if details.security_status >= HIGHSEC_THRESHOLD {
                highsec_names.insert(details.name);
            }
        }

        if (i + 1) % SAVE_EVERY == 0 {
            save_names(Path::new(PARTIAL_FILE), &highsec_names, false).await?;
            info!(
                "💾 Progress saved: {} high-sec systems, {}/{total} checked",
                highsec_names.len(),
                i + 1
            );
        }

        tokio::time::sleep(SLEEP_INTERVAL).await;
    }

    Ok(highsec_names)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("wormwatch-safelist")
        .build()
        .context("failed to build http client")?;

    let highsec_names = fetch_highsec_system_names(&http).await?;

    save_names(Path::new(FINAL_FILE), &highsec_names, true).await?;
    info!(
        "✅ Saved {} high-sec system names to {FINAL_FILE}",
        highsec_names.len()
    );

    if Path::new(PARTIAL_FILE).exists() {
        tokio::fs::remove_file(PARTIAL_FILE).await.ok();
    }

    Ok(())
}
