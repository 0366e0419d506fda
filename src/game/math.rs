use super::types::Vec2;

pub fn distance(a: Vec2, b: Vec2) -> f64 {
  ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

pub fn heading_toward(from: Vec2, to: Vec2) -> f64 {
  (to.y - from.y).atan2(to.x - from.x)
}

/// Strict less-than: touching circles do not overlap.
pub fn circles_overlap(a: Vec2, radius_a: f64, b: Vec2, radius_b: f64) -> bool {
  distance(a, b) < radius_a + radius_b
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
  value.min(max).max(min)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn distance_is_euclidean() {
    let a = Vec2 { x: 0.0, y: 0.0 };
    let b = Vec2 { x: 3.0, y: 4.0 };
    assert!((distance(a, b) - 5.0).abs() < 1e-12);
  }

  #[test]
  fn heading_along_positive_x_is_zero() {
    let from = Vec2 { x: 400.0, y: 300.0 };
    let to = Vec2 { x: 500.0, y: 300.0 };
    assert_eq!(heading_toward(from, to), 0.0);
  }

  #[test]
  fn circles_at_exact_radius_sum_do_not_overlap() {
    let a = Vec2 { x: 0.0, y: 0.0 };
    let b = Vec2 { x: 15.0, y: 0.0 };
    assert!(!circles_overlap(a, 10.0, b, 5.0));
    assert!(circles_overlap(a, 10.0, b, 5.0 + 1e-9));
  }
}
