use crate::game::types::{Food, Player, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Client-to-relay messages. The relay trusts `update` content verbatim;
/// there is no acknowledgement for any of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
  #[serde(rename = "update")]
  Update {
    x: f64,
    y: f64,
    angle: f64,
    segments: Vec<Vec2>,
    score: i64,
  },
  #[serde(rename = "eatFood")]
  EatFood {
    #[serde(rename = "foodId")]
    food_id: usize,
  },
  #[serde(rename = "dead")]
  Dead,
}

/// Relay-to-client messages. `init` goes to the connecting client only;
/// `updateFood` and `resetPlayer` fan out to every connection including the
/// sender, the rest exclude it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
  #[serde(rename = "init")]
  Init {
    #[serde(rename = "playerId")]
    player_id: u32,
    #[serde(deserialize_with = "deserialize_player_map")]
    players: HashMap<u32, Player>,
    foods: Vec<Food>,
  },
  #[serde(rename = "newPlayer")]
  NewPlayer { player: Player },
  #[serde(rename = "updatePlayer")]
  UpdatePlayer { player: Player },
  #[serde(rename = "updateFood")]
  UpdateFood { food: Food },
  #[serde(rename = "resetPlayer")]
  ResetPlayer { player: Player },
  #[serde(rename = "removePlayer")]
  RemovePlayer {
    #[serde(rename = "playerId")]
    player_id: u32,
  },
}

// JSON object keys are strings, and the internally tagged enum buffers the
// payload in a form that cannot coerce string keys back to `u32`, so the
// roster keys have to be parsed by hand on the way in.
fn deserialize_player_map<'de, D>(deserializer: D) -> Result<HashMap<u32, Player>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let raw = HashMap::<String, Player>::deserialize(deserializer)?;
  raw
    .into_iter()
    .map(|(id, player)| {
      id.parse()
        .map(|id| (id, player))
        .map_err(serde::de::Error::custom)
    })
    .collect()
}
