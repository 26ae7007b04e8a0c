use serde::Deserialize;
use std::time::Duration;
use wormwatch_core::{SystemId, WatchError};

const ESI_BASE: &str = "https://esi.evetech.net/latest";

/// Client ESI minimal: résolution nom -> id et longueur de route sécurisée.
/// Sert uniquement au décorateur de distance vers le hub de marché.
pub struct EsiClient {
    http: reqwest::Client,
}

impl EsiClient {
    pub fn new(timeout: Duration) -> Result<Self, WatchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::Resolution(e.to_string()))?;
        Ok(Self { http })
    }

    /// POST /universe/ids/, None si ESI ne connaît pas ce nom de système
    pub async fn resolve_system_id(&self, name: &str) -> Result<Option<SystemId>, WatchError> {
        let response = self
            .http
            .post(format!("{ESI_BASE}/universe/ids/"))
            .json(&[name])
            .send()
            .await
            .map_err(|e| WatchError::Resolution(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WatchError::Resolution(format!(
                "esi returned {} for {name}",
                response.status()
            )));
        }

        let ids: IdsResponse = response
            .json()
            .await
            .map_err(|e| WatchError::Resolution(e.to_string()))?;

        Ok(ids.systems.and_then(|s| s.first().map(|entry| entry.id)))
    }

    /// GET /route/{from}/{to}/?flag=secure, nombre de sauts (systèmes - 1).
    /// None si ESI ne trouve pas de route (statut non 200).
    pub async fn route_length(
        &self,
        from: SystemId,
        to: SystemId,
    ) -> Result<Option<u32>, WatchError> {
        let response = self
            .http
            .get(format!("{ESI_BASE}/route/{from}/{to}/?flag=secure"))
            .send()
            .await
            .map_err(|e| WatchError::Route(e.to_string()))?;

        if response.status() != reqwest::StatusCode::OK {
            return Ok(None);
        }

        let systems: Vec<SystemId> = response
            .json()
            .await
            .map_err(|e| WatchError::Route(e.to_string()))?;

        Ok(Some(systems.len().saturating_sub(1) as u32))
    }
}

#[derive(Debug, Deserialize)]
struct IdsResponse {
    systems: Option<Vec<IdEntry>>,
}

#[derive(Debug, Deserialize)]
struct IdEntry {
    id: SystemId,
}
