use std::collections::HashSet;
use std::path::{Path, PathBuf};
use wormwatch_core::{Edge, WatchError};

/// Passerelle de persistance de l'état entre redémarrages:
/// - last_path.json : dernière route notifiée (liste ordonnée de noms)
/// - connections.json : dernier jeu d'arêtes vu (liste de paires d'ids)
///
/// Fichier absent = premier lancement, valeur vide. Lecture une fois au
/// démarrage, écriture une fois par tick réussi.
pub struct StateStore {
    last_path_file: PathBuf,
    connections_file: PathBuf,
}

impl StateStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            last_path_file: data_dir.join("last_path.json"),
            connections_file: data_dir.join("connections.json"),
        }
    }

    pub async fn load_last_route(&self) -> Result<Vec<String>, WatchError> {
        if !self.last_path_file.exists() {
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.last_path_file).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save_last_route(&self, route: &[String]) -> Result<(), WatchError> {
        let content = serde_json::to_string(route)?;
        tokio::fs::write(&self.last_path_file, content).await?;
        Ok(())
    }

    pub async fn load_edges(&self) -> Result<HashSet<Edge>, WatchError> {
        if !self.connections_file.exists() {
            return Ok(HashSet::new());
        }
        let content = tokio::fs::read_to_string(&self.connections_file).await?;
        let pairs: Vec<Edge> = serde_json::from_str(&content)?;
        Ok(pairs.into_iter().collect())
    }

    pub async fn save_edges(&self, edges: &HashSet<Edge>) -> Result<(), WatchError> {
        // tri pour des fichiers stables d'un tick à l'autre
        let mut pairs: Vec<Edge> = edges.iter().copied().collect();
        pairs.sort();
        let content = serde_json::to_string(&pairs)?;
        tokio::fs::write(&self.connections_file, content).await?;
        Ok(())
    }
}
