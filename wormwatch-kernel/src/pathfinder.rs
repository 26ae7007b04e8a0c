/**
 * PATHFINDER CLIENT - Accès HTTP à la map wormhole Pathfinder
 *
 * RÔLE : Récupération du payload complet de la map (systèmes + connexions)
 * et, en option, des signatures d'un système. Session par cookies.
 *
 * Une réponse 401/403 signifie que la session Pathfinder a expiré: l'erreur
 * SessionExpired remonte jusqu'au handler de tick qui la loggue et réessaie.
 */
use crate::config::WatchConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use wormwatch_core::{MapDataResponse, SignatureRecord, SystemId, WatchError};

pub struct PathfinderClient {
    http: reqwest::Client,
    base_url: String,
    map_id: String,
    character: String,
    cookie: String,
}

impl PathfinderClient {
    pub fn new(cfg: &WatchConfig) -> Result<Self, WatchError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(|e| WatchError::Fetch(e.to_string()))?;

        Ok(Self {
            http,
            base_url: cfg.pathfinder_base_url.trim_end_matches('/').to_string(),
            map_id: cfg.map_id.clone(),
            character: cfg.pf_character.clone(),
            cookie: format!(
                "cookie=1; pathfinder_session={}; {}",
                cfg.pf_session, cfg.pf_char_cookie
            ),
        })
    }

    /// POST /api/Map/updateData, payload brut de toutes les couches de map
    pub async fn fetch_map_data(&self) -> Result<MapDataResponse, WatchError> {
        let response = self
            .http
            .post(format!("{}/api/Map/updateData", self.base_url))
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("Cookie", &self.cookie)
            .header("pf-character", &self.character)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("getUserData=1")
            .send()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))?;

        let body = Self::check_session(response)?
            .text()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }

    /// GET /api/rest/System/{id}, signatures scannées du système
    /// (uniquement quand TRACK_SIGNATURES est actif)
    pub async fn fetch_signatures(
        &self,
        system_id: SystemId,
    ) -> Result<HashMap<String, SignatureRecord>, WatchError> {
        let response = self
            .http
            .get(format!(
                "{}/api/rest/System/{}?mapId={}",
                self.base_url, system_id, self.map_id
            ))
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("Cookie", &self.cookie)
            .header("pf-character", &self.character)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))?;

        let body = Self::check_session(response)?
            .text()
            .await
            .map_err(|e| WatchError::Fetch(e.to_string()))?;
        let system: SystemResponse = serde_json::from_str(&body)?;

        Ok(system
            .signatures
            .into_iter()
            .map(|raw| {
                (
                    raw.id,
                    SignatureRecord {
                        name: raw.name,
                        eol: raw.eol,
                        mass: raw.mass,
                    },
                )
            })
            .collect())
    }

    fn check_session(response: reqwest::Response) -> Result<reqwest::Response, WatchError> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(WatchError::SessionExpired),
            status if !status.is_success() => {
                Err(WatchError::Fetch(format!("pathfinder returned {status}")))
            }
            _ => Ok(response),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SystemResponse {
    #[serde(default)]
    signatures: Vec<RawSignature>,
}

#[derive(Debug, Deserialize)]
struct RawSignature {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    eol: bool,
    #[serde(default)]
    mass: f64,
}
