//! Champion skin catalog from the public game-data CDN.
//!
//! Read-only collaborator keyed by patch version. The full catalog is a
//! few hundred upstream requests, so the result is cached in-process for
//! 24 hours.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

const DATA_DRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

/// How long a fetched catalog stays fresh.
pub const CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One skin of a champion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinData {
    pub skin_name: String,
    pub skin_image_url: String,
}

/// A champion and its splash arts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionSkins {
    pub champion_name: String,
    pub skins: Vec<SkinData>,
}

/// Catalog fetch failures (upstream unreachable or malformed).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch champion data: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("champion data malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct ChampionListDto {
    data: std::collections::HashMap<String, ChampionEntryDto>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntryDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChampionDetailDto {
    data: std::collections::HashMap<String, ChampionDetailEntryDto>,
}

#[derive(Debug, Deserialize)]
struct ChampionDetailEntryDto {
    skins: Vec<SkinDto>,
}

#[derive(Debug, Deserialize)]
struct SkinDto {
    name: String,
    num: u32,
}

struct CachedCatalog {
    fetched_at: Instant,
    champions: Arc<Vec<ChampionSkins>>,
}

/// Cached catalog of every champion's skins.
pub struct ChampionCatalog {
    http: reqwest::Client,
    cache: Mutex<Option<CachedCatalog>>,
}

impl ChampionCatalog {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    /// Return the catalog, fetching it when the cache is cold or stale.
    pub async fn all_champion_skins(&self) -> Result<Arc<Vec<ChampionSkins>>, CatalogError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < CATALOG_TTL {
                return Ok(cached.champions.clone());
            }
        }

        let champions = Arc::new(self.fetch_catalog().await?);
        *cache = Some(CachedCatalog {
            fetched_at: Instant::now(),
            champions: champions.clone(),
        });
        Ok(champions)
    }

    async fn fetch_catalog(&self) -> Result<Vec<ChampionSkins>, CatalogError> {
        let versions = self
            .http
            .get(format!("{DATA_DRAGON_BASE}/api/versions.json"))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<String>>()
            .await?;
        let latest = versions
            .first()
            .ok_or_else(|| CatalogError::Malformed("empty version list".to_string()))?;

        tracing::info!("fetching champion catalog for patch {}", latest);

        let list = self
            .http
            .get(format!(
                "{DATA_DRAGON_BASE}/cdn/{latest}/data/en_US/champion.json"
            ))
            .send()
            .await?
            .error_for_status()?
            .json::<ChampionListDto>()
            .await?;

        let mut catalog = Vec::with_capacity(list.data.len());
        for entry in list.data.values() {
            let skins = match self.fetch_champion_skins(latest, &entry.id).await {
                Ok(skins) => skins,
                Err(e) => {
                    // One broken champion page should not sink the catalog.
                    tracing::warn!("failed to fetch skins for {}: {}", entry.id, e);
                    vec![SkinData {
                        skin_name: "Default".to_string(),
                        skin_image_url: format!(
                            "{DATA_DRAGON_BASE}/cdn/img/champion/splash/{}_0.jpg",
                            entry.id
                        ),
                    }]
                }
            };
            catalog.push(ChampionSkins {
                champion_name: entry.id.clone(),
                skins,
            });
        }

        catalog.sort_by(|a, b| a.champion_name.cmp(&b.champion_name));
        tracing::info!("champion catalog ready: {} champions", catalog.len());
        Ok(catalog)
    }

    async fn fetch_champion_skins(
        &self,
        version: &str,
        champion_id: &str,
    ) -> Result<Vec<SkinData>, CatalogError> {
        let detail = self
            .http
            .get(format!(
                "{DATA_DRAGON_BASE}/cdn/{version}/data/en_US/champion/{champion_id}.json"
            ))
            .send()
            .await?
            .error_for_status()?
            .json::<ChampionDetailDto>()
            .await?;

        let entry = detail
            .data
            .get(champion_id)
            .ok_or_else(|| CatalogError::Malformed(format!("missing entry for {champion_id}")))?;

        Ok(entry
            .skins
            .iter()
            .map(|skin| SkinData {
                skin_name: skin.name.clone(),
                skin_image_url: format!(
                    "{DATA_DRAGON_BASE}/cdn/img/champion/splash/{champion_id}_{}.jpg",
                    skin.num
                ),
            })
            .collect())
    }
}

impl Default for ChampionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ttl_is_24_hours() {
        assert_eq!(CATALOG_TTL, Duration::from_secs(86_400));
    }

    #[test]
    fn test_skin_payload_shape() {
        // given:
        let champion = ChampionSkins {
            champion_name: "Ahri".to_string(),
            skins: vec![SkinData {
                skin_name: "Default".to_string(),
                skin_image_url: "https://example.invalid/Ahri_0.jpg".to_string(),
            }],
        };

        // when:
        let json = serde_json::to_value(&champion).unwrap();

        // then:
        assert_eq!(json["champion_name"], "Ahri");
        assert_eq!(json["skins"][0]["skin_name"], "Default");
    }
}
