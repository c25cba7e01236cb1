//! Scrolling ground band.

use crate::config::{GROUND_HEIGHT, GROUND_SPEED, GROUND_TOP, GROUND_WIDTH, SCREEN_WIDTH};
use crate::entity::{Entity, Visual};
use crate::geom::Rect;

/// A band twice the screen width that jumps back to the origin after
/// scrolling one screen width, so it appears endless.
#[derive(Debug, Clone)]
pub struct GroundBand {
    x: i32,
    velocity: i32,
}

impl Default for GroundBand {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundBand {
    pub fn new() -> Self {
        Self {
            x: 0,
            velocity: GROUND_SPEED,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f64,
            GROUND_TOP as f64,
            GROUND_WIDTH as f64,
            GROUND_HEIGHT as f64,
        )
    }

    pub fn stop(&mut self) {
        self.velocity = 0;
    }
}

impl Entity for GroundBand {
    fn tick(&mut self) {
        self.x += self.velocity;
        if self.x <= -SCREEN_WIDTH {
            self.x = 0;
        }
    }

    fn visuals(&self, out: &mut Vec<Visual>) {
        out.push(Visual::Ground { rect: self.rect() });
    }
}
