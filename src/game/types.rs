use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
  pub x: f64,
  pub y: f64,
}

/// Roster entry as it travels on the wire. The relay stores these verbatim
/// and clients keep mirrored copies keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  pub id: u32,
  pub x: f64,
  pub y: f64,
  pub radius: f64,
  pub color: String,
  pub segments: Vec<Vec2>,
  pub segment_count: usize,
  pub angle: f64,
  pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
  pub id: usize,
  pub x: f64,
  pub y: f64,
  pub radius: f64,
  pub color: String,
}

/// Wandering trail local to one client's simulation. Bots never appear on
/// the wire.
#[derive(Debug, Clone)]
pub struct Bot {
  pub x: f64,
  pub y: f64,
  pub radius: f64,
  pub color: String,
  pub speed: f64,
  pub segments: Vec<Vec2>,
  pub segment_count: usize,
  pub angle: f64,
  pub turn_speed: f64,
}
