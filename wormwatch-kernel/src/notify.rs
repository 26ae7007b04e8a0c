use serde_json::json;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;
use wormwatch_core::WatchError;

/// Livraison des alertes vers un webhook Discord.
/// Best effort: un échec de livraison n'avorte jamais le tick appelant.
pub struct DiscordNotifier {
    http: reqwest::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String, timeout: std::time::Duration) -> Result<Self, WatchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::Delivery(e.to_string()))?;
        Ok(Self { http, webhook_url })
    }

    pub async fn notify(&self, text: &str) -> Result<(), WatchError> {
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "content": text }))
            .send()
            .await
            .map_err(|e| WatchError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WatchError::Delivery(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Journal plat des alertes envoyées (wh_alerts.log), une ligne horodatée
/// par alerte. Trace locale indépendante de Discord.
pub struct AlertLog {
    path: PathBuf,
}

impl AlertLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("wh_alerts.log"),
        }
    }

    pub async fn append(&self, text: &str) -> Result<(), WatchError> {
        let stamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{stamp} - {text}\n").as_bytes()).await?;

        Ok(())
    }
}
