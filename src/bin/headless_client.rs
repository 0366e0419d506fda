use rand::Rng;
use snake_arena::client::net::Connection;
use snake_arena::client::GameClient;
use snake_arena::game::constants::{ARENA_HEIGHT, ARENA_WIDTH, TICK_MS};
use snake_arena::game::types::Vec2;
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Drives one synchronization client against a running relay without any
/// rendering: the pointer drifts to a new random arena position now and
/// then, deaths auto-restart.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let url = env::var("SERVER_URL").unwrap_or_else(|_| "ws://127.0.0.1:3000/ws".to_string());
  tracing::info!("connecting to {url}");
  let mut connection = Connection::open(&url).await?;
  let mut client = GameClient::new();

  let mut rng = rand::thread_rng();
  let mut pointer = Vec2 {
    x: ARENA_WIDTH / 2.0,
    y: ARENA_HEIGHT / 2.0,
  };

  let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
  let mut ticks: u64 = 0;
  loop {
    interval.tick().await;
    if connection.is_closed() {
      tracing::info!("connection closed, exiting");
      return Ok(());
    }

    while let Some(message) = connection.try_recv() {
      client.apply(message);
    }

    if client.is_game_over() {
      let score = client.player().map(|player| player.score).unwrap_or(0);
      tracing::info!(score, "game over, restarting");
      client.restart();
    }

    if rng.gen::<f64>() < 0.05 {
      pointer = Vec2 {
        x: rng.gen::<f64>() * ARENA_WIDTH,
        y: rng.gen::<f64>() * ARENA_HEIGHT,
      };
    }

    for message in client.tick(pointer) {
      connection.send(message);
    }

    ticks += 1;
    if ticks % 600 == 0 {
      if let Some(player) = client.player() {
        tracing::info!(score = player.score, segments = player.segments.len(), "still playing");
      }
    }
  }
}
