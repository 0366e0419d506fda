use super::constants::{
  ARENA_HEIGHT, ARENA_WIDTH, BOT_BASE_SPEED, BOT_MIN_SEGMENT_COUNT, BOT_RADIUS,
  BOT_SEGMENT_COUNT_SPAN, BOT_SPEED_SPAN, BOT_TURN_SPEED, FOOD_COLORS, FOOD_COUNT,
  FOOD_RADIUS_MIN, FOOD_RADIUS_SPAN, PLAYER_RADIUS, SEGMENT_SPACING, STARTING_SEGMENT_COUNT,
};
use super::types::{Bot, Food, Player, Vec2};
use rand::Rng;

pub fn random_position<R: Rng>(rng: &mut R) -> Vec2 {
  Vec2 {
    x: rng.gen::<f64>() * ARENA_WIDTH,
    y: rng.gen::<f64>() * ARENA_HEIGHT,
  }
}

pub fn random_hsl_color<R: Rng>(rng: &mut R) -> String {
  format!("hsl({}, 100%, 50%)", (rng.gen::<f64>() * 360.0).floor())
}

/// Fresh trail laid out behind the head along -x, one segment per spacing
/// step, head first.
pub fn default_trail(head: Vec2, segment_count: usize) -> Vec<Vec2> {
  (0..segment_count)
    .map(|index| Vec2 {
      x: head.x - index as f64 * SEGMENT_SPACING,
      y: head.y,
    })
    .collect()
}

pub fn random_food<R: Rng>(slot: usize, rng: &mut R) -> Food {
  Food {
    id: slot,
    x: rng.gen::<f64>() * ARENA_WIDTH,
    y: rng.gen::<f64>() * ARENA_HEIGHT,
    radius: FOOD_RADIUS_MIN + rng.gen::<f64>() * FOOD_RADIUS_SPAN,
    color: FOOD_COLORS[rng.gen_range(0..FOOD_COLORS.len())].to_string(),
  }
}

pub fn initial_food_pool<R: Rng>(rng: &mut R) -> Vec<Food> {
  (0..FOOD_COUNT).map(|slot| random_food(slot, rng)).collect()
}

pub fn random_player<R: Rng>(id: u32, rng: &mut R) -> Player {
  let position = random_position(rng);
  Player {
    id,
    x: position.x,
    y: position.y,
    radius: PLAYER_RADIUS,
    color: random_hsl_color(rng),
    segments: default_trail(position, STARTING_SEGMENT_COUNT),
    segment_count: STARTING_SEGMENT_COUNT,
    angle: 0.0,
    score: 0,
  }
}

/// Shared by the relay's `dead` handler and the client's restart: new random
/// position, default trail, score zero. Identity and color survive the reset.
pub fn reset_player_in_place<R: Rng>(player: &mut Player, rng: &mut R) {
  let position = random_position(rng);
  player.x = position.x;
  player.y = position.y;
  player.angle = 0.0;
  player.segments = default_trail(position, STARTING_SEGMENT_COUNT);
  player.segment_count = STARTING_SEGMENT_COUNT;
  player.score = 0;
}

pub fn random_bot<R: Rng>(rng: &mut R) -> Bot {
  let position = random_position(rng);
  let segment_count = BOT_MIN_SEGMENT_COUNT + rng.gen_range(0..BOT_SEGMENT_COUNT_SPAN);
  Bot {
    x: position.x,
    y: position.y,
    radius: BOT_RADIUS,
    color: random_hsl_color(rng),
    speed: BOT_BASE_SPEED + rng.gen::<f64>() * BOT_SPEED_SPAN,
    segments: default_trail(position, segment_count),
    segment_count,
    angle: rng.gen::<f64>() * std::f64::consts::PI * 2.0,
    turn_speed: BOT_TURN_SPEED,
  }
}
