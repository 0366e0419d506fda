use super::spawn::{initial_food_pool, random_food, random_player, reset_player_in_place};
use super::types::{Food, Player, Vec2};
use crate::protocol::{ClientMessage, ServerMessage};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Opt-in guard at the update/eatFood boundary. The default relay accepts
/// everything; a stricter deployment can reject messages here without any
/// protocol change. Rejected messages are dropped silently.
pub trait Validation: Send + Sync {
  fn allow_update(&self, _current: &Player, _proposed: &Player) -> bool {
    true
  }

  fn allow_eat_food(&self, _player: &Player, _slot: usize) -> bool {
    true
  }
}

/// Relay-only trust model: client-reported state is stored verbatim.
#[derive(Debug, Default)]
pub struct RelayTrust;

impl Validation for RelayTrust {}

pub struct World {
  state: Mutex<WorldState>,
}

struct SessionEntry {
  sender: UnboundedSender<String>,
  player_id: u32,
}

struct WorldState {
  sessions: HashMap<String, SessionEntry>,
  players: HashMap<u32, Player>,
  foods: Vec<Food>,
  next_player_id: u32,
  validation: Box<dyn Validation>,
}

impl World {
  pub fn new() -> Self {
    Self::with_validation(Box::new(RelayTrust))
  }

  pub fn with_validation(validation: Box<dyn Validation>) -> Self {
    let mut rng = rand::thread_rng();
    Self {
      state: Mutex::new(WorldState {
        sessions: HashMap::new(),
        players: HashMap::new(),
        foods: initial_food_pool(&mut rng),
        next_player_id: 1,
        validation,
      }),
    }
  }

  /// Registers the connection, creates its player, sends the full snapshot
  /// back on `sender` and announces the newcomer to everyone else.
  pub async fn add_session(&self, sender: UnboundedSender<String>) -> String {
    let session_id = Uuid::new_v4().to_string();
    let mut state = self.state.lock().await;
    state.connect_session(session_id.clone(), sender);
    session_id
  }

  pub async fn remove_session(&self, session_id: &str) {
    let mut state = self.state.lock().await;
    state.disconnect_session(session_id);
  }

  /// Unparseable frames are dropped; the connection stays up.
  pub async fn handle_text_message(&self, session_id: &str, text: &str) {
    let Ok(message) = serde_json::from_str::<ClientMessage>(text) else { return };
    let mut state = self.state.lock().await;
    match message {
      ClientMessage::Update {
        x,
        y,
        angle,
        segments,
        score,
      } => {
        state.handle_update(session_id, x, y, angle, segments, score);
      }
      ClientMessage::EatFood { food_id } => {
        state.handle_eat_food(session_id, food_id);
      }
      ClientMessage::Dead => {
        state.handle_dead(session_id);
      }
    }
  }

  pub async fn player_count(&self) -> usize {
    let state = self.state.lock().await;
    state.players.len()
  }
}

impl Default for World {
  fn default() -> Self {
    Self::new()
  }
}

impl WorldState {
  fn connect_session(&mut self, session_id: String, sender: UnboundedSender<String>) {
    let player_id = self.next_player_id;
    self.next_player_id += 1;

    let mut rng = rand::thread_rng();
    let player = random_player(player_id, &mut rng);
    self.players.insert(player_id, player.clone());
    tracing::info!(player_id, "player connected");

    let init = ServerMessage::Init {
      player_id,
      players: self.players.clone(),
      foods: self.foods.clone(),
    };
    if let Ok(payload) = serde_json::to_string(&init) {
      let _ = sender.send(payload);
    }

    self.sessions.insert(session_id.clone(), SessionEntry { sender, player_id });
    self.broadcast_except(&session_id, &ServerMessage::NewPlayer { player });
  }

  fn disconnect_session(&mut self, session_id: &str) {
    let Some(entry) = self.sessions.remove(session_id) else { return };
    if self.players.remove(&entry.player_id).is_some() {
      tracing::info!(player_id = entry.player_id, "player disconnected");
      self.broadcast_all(&ServerMessage::RemovePlayer {
        player_id: entry.player_id,
      });
    }
  }

  fn session_player_id(&self, session_id: &str) -> Option<u32> {
    self.sessions.get(session_id).map(|entry| entry.player_id)
  }

  /// Full-state overwrite, no plausibility checks beyond the validation
  /// seam. A stale session or removed player id is a no-op.
  fn handle_update(
    &mut self,
    session_id: &str,
    x: f64,
    y: f64,
    angle: f64,
    segments: Vec<Vec2>,
    score: i64,
  ) {
    let Some(player_id) = self.session_player_id(session_id) else { return };
    let Some(player) = self.players.get_mut(&player_id) else { return };

    let mut proposed = player.clone();
    proposed.x = x;
    proposed.y = y;
    proposed.angle = angle;
    proposed.segment_count = segments.len();
    proposed.segments = segments;
    proposed.score = score;

    if !self.validation.allow_update(player, &proposed) {
      tracing::debug!(player_id, "update rejected by validation");
      return;
    }

    *player = proposed.clone();
    self.broadcast_except(session_id, &ServerMessage::UpdatePlayer { player: proposed });
  }

  /// Unconditionally re-rolls the slot. Two clients claiming the same slot
  /// in quick succession both win in turn: last write stays.
  fn handle_eat_food(&mut self, session_id: &str, slot: usize) {
    let Some(player_id) = self.session_player_id(session_id) else { return };
    let Some(player) = self.players.get(&player_id) else { return };
    if slot >= self.foods.len() {
      return;
    }
    if !self.validation.allow_eat_food(player, slot) {
      tracing::debug!(player_id, slot, "eatFood rejected by validation");
      return;
    }

    let mut rng = rand::thread_rng();
    let food = random_food(slot, &mut rng);
    self.foods[slot] = food.clone();
    self.broadcast_all(&ServerMessage::UpdateFood { food });
  }

  /// Resets the entity in place; the roster entry survives death.
  fn handle_dead(&mut self, session_id: &str) {
    let Some(player_id) = self.session_player_id(session_id) else { return };
    let Some(player) = self.players.get_mut(&player_id) else { return };

    let mut rng = rand::thread_rng();
    reset_player_in_place(player, &mut rng);
    let player = player.clone();
    tracing::debug!(player_id, "player reset after death");
    self.broadcast_all(&ServerMessage::ResetPlayer { player });
  }

  fn broadcast_all(&mut self, message: &ServerMessage) {
    self.broadcast(None, message);
  }

  fn broadcast_except(&mut self, skip_session_id: &str, message: &ServerMessage) {
    self.broadcast(Some(skip_session_id), message);
  }

  /// Fan-out preserving handler order. Sessions whose channel is gone are
  /// collected first and disconnected after the send loop.
  fn broadcast(&mut self, skip_session_id: Option<&str>, message: &ServerMessage) {
    let Ok(payload) = serde_json::to_string(message) else { return };
    let mut stale = Vec::new();
    for (session_id, session) in &self.sessions {
      if Some(session_id.as_str()) == skip_session_id {
        continue;
      }
      if session.sender.send(payload.clone()).is_err() {
        stale.push(session_id.clone());
      }
    }
    for session_id in stale {
      self.disconnect_session(&session_id);
    }
  }
}
