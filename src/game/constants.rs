pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;

pub const PLAYER_RADIUS: f64 = 10.0;
pub const PLAYER_SPEED: f64 = 3.0;
pub const STARTING_SEGMENT_COUNT: usize = 20;
pub const SEGMENT_SPACING: f64 = 5.0;

pub const FOOD_COUNT: usize = 50;
pub const FOOD_RADIUS_MIN: f64 = 5.0;
pub const FOOD_RADIUS_SPAN: f64 = 5.0;

pub const BOT_COUNT: usize = 5;
pub const BOT_RADIUS: f64 = 10.0;
pub const BOT_BASE_SPEED: f64 = 2.0;
pub const BOT_SPEED_SPAN: f64 = 1.0;
pub const BOT_MIN_SEGMENT_COUNT: usize = 10;
pub const BOT_SEGMENT_COUNT_SPAN: usize = 20;
pub const BOT_TURN_SPEED: f64 = 0.05;
pub const BOT_TURN_CHANCE: f64 = 0.02;

pub const TICK_MS: u64 = 16;

pub const FOOD_COLORS: [&str; 7] = [
  "#ff0000",
  "#ff7700",
  "#ffff00",
  "#00ff00",
  "#00ffff",
  "#0000ff",
  "#ff00ff",
];
