use super::constants::{ARENA_HEIGHT, ARENA_WIDTH, BOT_TURN_CHANCE, PLAYER_SPEED};
use super::math::{circles_overlap, clamp, distance, heading_toward};
use super::spawn::random_food;
use super::types::{Bot, Food, Player, Vec2};
use rand::Rng;
use std::f64::consts::PI;

/// One food item taken this tick. `points` is floor(radius) of the item as
/// it was before the slot got replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumedFood {
  pub slot: usize,
  pub points: i64,
}

fn advance_trail(segments: &mut Vec<Vec2>, head: Vec2) {
  segments.insert(0, head);
  segments.pop();
}

/// Growth duplicates the tail instead of popping it, so the trail gains a
/// segment without opening a visible gap.
pub fn grow_trail(segments: &mut Vec<Vec2>, segment_count: &mut usize) {
  let Some(tail) = segments.last().copied() else { return };
  segments.push(tail);
  *segment_count += 1;
}

/// Pointer-driven step: steer at the pointer, move one speed increment,
/// clamp to the arena, shift the trail.
pub fn advance_player(player: &mut Player, pointer: Vec2) {
  let head = Vec2 {
    x: player.x,
    y: player.y,
  };
  player.angle = heading_toward(head, pointer);
  player.x = clamp(player.x + player.angle.cos() * PLAYER_SPEED, 0.0, ARENA_WIDTH);
  player.y = clamp(player.y + player.angle.sin() * PLAYER_SPEED, 0.0, ARENA_HEIGHT);
  advance_trail(
    &mut player.segments,
    Vec2 {
      x: player.x,
      y: player.y,
    },
  );
}

/// Angle reflection at the arena bounds. Wandering entities are not
/// clamped; they may sit outside the bound for the tick that crossed it.
pub fn reflect_heading(position: Vec2, angle: f64) -> f64 {
  let mut angle = angle;
  if position.x < 0.0 || position.x > ARENA_WIDTH {
    angle = PI - angle;
  }
  if position.y < 0.0 || position.y > ARENA_HEIGHT {
    angle = -angle;
  }
  angle
}

/// Autonomous step: occasional random heading perturbation, move, reflect
/// at the bounds, shift the trail.
pub fn wander_bot<R: Rng>(bot: &mut Bot, rng: &mut R) {
  if rng.gen::<f64>() < BOT_TURN_CHANCE {
    bot.angle += (rng.gen::<f64>() - 0.5) * bot.turn_speed;
  }

  bot.x += bot.angle.cos() * bot.speed;
  bot.y += bot.angle.sin() * bot.speed;
  bot.angle = reflect_heading(
    Vec2 {
      x: bot.x,
      y: bot.y,
    },
    bot.angle,
  );

  advance_trail(
    &mut bot.segments,
    Vec2 {
      x: bot.x,
      y: bot.y,
    },
  );
}

/// Checks every slot against the entity head and replaces consumed slots in
/// place with fresh random items. Returns what was eaten, in slot order.
pub fn consume_food<R: Rng>(
  head: Vec2,
  radius: f64,
  foods: &mut [Food],
  rng: &mut R,
) -> Vec<ConsumedFood> {
  let mut consumed = Vec::new();
  for slot in 0..foods.len() {
    let center = Vec2 {
      x: foods[slot].x,
      y: foods[slot].y,
    };
    if !circles_overlap(head, radius, center, foods[slot].radius) {
      continue;
    }
    consumed.push(ConsumedFood {
      slot,
      points: foods[slot].radius.floor() as i64,
    });
    foods[slot] = random_food(slot, rng);
  }
  consumed
}

/// Terminal collision test against one other trail: its head counts with
/// the sum of radii, its body segments (index 1 onward) with the player's
/// own radius. Segment 0 shadows the head and is skipped.
pub fn hits_trail(
  head: Vec2,
  radius: f64,
  other_head: Vec2,
  other_radius: f64,
  other_segments: &[Vec2],
) -> bool {
  if circles_overlap(head, radius, other_head, other_radius) {
    return true;
  }
  other_segments
    .iter()
    .skip(1)
    .any(|segment| distance(head, *segment) < radius)
}
