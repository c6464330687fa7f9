//! Live-match lookup against the public game API.
//!
//! Read-only collaborator: given a riot id and a region it resolves the
//! account, finds the active game, and returns the enemies that carry
//! Flash. Every expected failure (missing key, unknown summoner, no
//! active game, upstream hiccup) comes back as a structured
//! `success: false` result; these are frequent, user-triggerable
//! conditions, not faults.

use serde::{Deserialize, Serialize};

/// Summoner spell id for Flash.
const FLASH_SPELL_ID: u32 = 4;

const DATA_DRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

/// One participant of an active game, as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveParticipant {
    pub puuid: String,
    pub team_id: u32,
    pub champion_id: u32,
    pub summoner_name: String,
    pub spell1_id: u32,
    pub spell2_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion_icon_url: Option<String>,
}

/// Payload of a successful live-game lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveGameData {
    pub allies: Vec<LiveParticipant>,
    /// Only enemies carrying Flash; the others are not tracked.
    pub enemies: Vec<LiveParticipant>,
    pub game_id: i64,
    pub game_start_time: i64,
    pub game_length: i64,
}

/// Structured result of a live-game lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveGameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LiveGameData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LiveGameResponse {
    fn ok(data: LiveGameData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    puuid: String,
}

#[derive(Debug, Deserialize)]
struct ActiveGameDto {
    #[serde(rename = "gameId")]
    game_id: i64,
    #[serde(rename = "gameStartTime")]
    game_start_time: i64,
    #[serde(rename = "gameLength")]
    game_length: i64,
    participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize)]
struct ParticipantDto {
    puuid: String,
    #[serde(rename = "teamId")]
    team_id: u32,
    #[serde(rename = "championId")]
    champion_id: u32,
    #[serde(rename = "riotId", default)]
    riot_id: Option<String>,
    #[serde(rename = "summonerName", default)]
    summoner_name: Option<String>,
    #[serde(rename = "spell1Id")]
    spell1_id: u32,
    #[serde(rename = "spell2Id")]
    spell2_id: u32,
}

#[derive(Debug, Deserialize)]
struct ChampionListDto {
    data: std::collections::HashMap<String, ChampionEntryDto>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntryDto {
    id: String,
    key: String,
}

/// Client for the live-match collaborator.
pub struct RiotClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl RiotClient {
    /// `api_key` comes from the environment; without one every lookup
    /// reports a structured failure instead of reaching the API.
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("RIOT_API_KEY not set, live-game lookups will be unavailable");
        }
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Regional routing value for the account API.
    fn regional_routing(region: &str) -> &'static str {
        match region.to_ascii_lowercase().as_str() {
            "br1" | "la1" | "la2" | "na1" => "americas",
            "jp1" | "kr" => "asia",
            "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
            _ => "europe",
        }
    }

    fn has_flash(p: &ParticipantDto) -> bool {
        p.spell1_id == FLASH_SPELL_ID || p.spell2_id == FLASH_SPELL_ID
    }

    /// Look up the active game for `summoner` ("GameName#TAG"), split
    /// the participants by the requester's team, and keep only enemies
    /// that carry Flash.
    pub async fn live_game(&self, summoner: &str, region: &str) -> LiveGameResponse {
        let Some(api_key) = self.api_key.as_deref() else {
            return LiveGameResponse::err("live-game lookups are not configured");
        };

        let mut parts = summoner.splitn(2, '#');
        let game_name = parts.next().unwrap_or("").trim();
        let tag_line = parts.next().unwrap_or("EUW").trim();
        if game_name.is_empty() {
            return LiveGameResponse::err("missing summoner name");
        }

        let account = match self
            .fetch_account(api_key, game_name, tag_line, region)
            .await
        {
            Ok(Some(account)) => account,
            Ok(None) => {
                return LiveGameResponse::err(format!(
                    "summoner not found: {game_name}#{tag_line}"
                ))
            }
            Err(e) => {
                tracing::warn!("account lookup failed: {}", e);
                return LiveGameResponse::err("upstream error during account lookup");
            }
        };

        let game = match self.fetch_active_game(api_key, &account.puuid, region).await {
            Ok(Some(game)) => game,
            Ok(None) => return LiveGameResponse::err("no active game found"),
            Err(e) => {
                tracing::warn!("active-game lookup failed: {}", e);
                return LiveGameResponse::err("upstream error during active-game lookup");
            }
        };

        let Some(player) = game.participants.iter().find(|p| p.puuid == account.puuid) else {
            return LiveGameResponse::err("player not found in game");
        };
        let player_team = player.team_id;

        let icon_index = self.champion_icon_index().await;

        let to_participant = |p: &ParticipantDto| LiveParticipant {
            puuid: p.puuid.clone(),
            team_id: p.team_id,
            champion_id: p.champion_id,
            summoner_name: p
                .riot_id
                .clone()
                .or_else(|| p.summoner_name.clone())
                .unwrap_or_default(),
            spell1_id: p.spell1_id,
            spell2_id: p.spell2_id,
            champion_icon_url: icon_index
                .as_ref()
                .and_then(|index| index.get(&p.champion_id).cloned()),
        };

        let allies = game
            .participants
            .iter()
            .filter(|p| p.team_id == player_team)
            .map(&to_participant)
            .collect();
        let enemies = game
            .participants
            .iter()
            .filter(|p| p.team_id != player_team && Self::has_flash(p))
            .map(&to_participant)
            .collect();

        LiveGameResponse::ok(LiveGameData {
            allies,
            enemies,
            game_id: game.game_id,
            game_start_time: game.game_start_time,
            game_length: game.game_length,
        })
    }

    async fn fetch_account(
        &self,
        api_key: &str,
        game_name: &str,
        tag_line: &str,
        region: &str,
    ) -> Result<Option<AccountDto>, reqwest::Error> {
        let routing = Self::regional_routing(region);
        let url = format!(
            "https://{routing}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
            urlencode(game_name),
            urlencode(tag_line)
        );
        let response = self
            .http
            .get(url)
            .header("X-Riot-Token", api_key)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let account = response.error_for_status()?.json::<AccountDto>().await?;
        Ok(Some(account))
    }

    async fn fetch_active_game(
        &self,
        api_key: &str,
        puuid: &str,
        region: &str,
    ) -> Result<Option<ActiveGameDto>, reqwest::Error> {
        let platform = region.to_ascii_lowercase();
        let url = format!(
            "https://{platform}.api.riotgames.com/lol/spectator/v5/active-games/by-summoner/{}",
            urlencode(puuid)
        );
        let response = self
            .http
            .get(url)
            .header("X-Riot-Token", api_key)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let game = response.error_for_status()?.json::<ActiveGameDto>().await?;
        Ok(Some(game))
    }

    /// champion_id → icon URL, from the public CDN. Best-effort: a
    /// failure here only costs the icons, not the lookup.
    async fn champion_icon_index(
        &self,
    ) -> Option<std::collections::HashMap<u32, String>> {
        let versions = self
            .http
            .get(format!("{DATA_DRAGON_BASE}/api/versions.json"))
            .send()
            .await
            .ok()?
            .json::<Vec<String>>()
            .await
            .ok()?;
        let latest = versions.first()?;

        let champions = self
            .http
            .get(format!(
                "{DATA_DRAGON_BASE}/cdn/{latest}/data/en_US/champion.json"
            ))
            .send()
            .await
            .ok()?
            .json::<ChampionListDto>()
            .await
            .ok()?;

        let index = champions
            .data
            .values()
            .filter_map(|entry| {
                let id: u32 = entry.key.parse().ok()?;
                let url = format!("{DATA_DRAGON_BASE}/cdn/{latest}/img/champion/{}.png", entry.id);
                Some((id, url))
            })
            .collect();
        Some(index)
    }
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
