//! Obstacle pairs: a top and a bottom pipe sharing one x position, with a
//! fixed opening between them.

use rand::Rng;

use crate::config::*;
use crate::entity::{Entity, PipeEnd, Visual};
use crate::geom::Rect;

#[derive(Debug, Clone)]
pub struct ObstaclePair {
    x: i32,
    /// Top piece's y. Always within `PIPE_OFFSET_MIN..=PIPE_OFFSET_MAX`.
    offset: i32,
    velocity: i32,
    /// Set once the pair has counted for the current pass.
    scored: bool,
}

impl ObstaclePair {
    pub fn spawn(x_start: i32, rng: &mut impl Rng) -> Self {
        Self::new(x_start, random_offset(rng))
    }

    /// A stationary pair with a chosen opening. `offset` is clamped to the
    /// allowed range.
    pub fn new(x_start: i32, offset: i32) -> Self {
        Self {
            x: x_start,
            offset: offset.clamp(PIPE_OFFSET_MIN, PIPE_OFFSET_MAX),
            velocity: 0,
            scored: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    /// Vertical extent covered by the top piece.
    pub fn pixel_height(&self) -> i32 {
        TOP_PIPE_HEIGHT + self.offset
    }

    pub fn bottom_y(&self) -> i32 {
        self.pixel_height() + PIPE_SPACING
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.offset as f64,
            PIPE_WIDTH as f64,
            TOP_PIPE_HEIGHT as f64,
        )
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.bottom_y() as f64,
            PIPE_WIDTH as f64,
            BOTTOM_PIPE_HEIGHT as f64,
        )
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.top_rect().intersects(rect) || self.bottom_rect().intersects(rect)
    }

    pub fn start(&mut self) {
        self.velocity = PIPE_SPEED;
    }

    pub fn stop(&mut self) {
        self.velocity = 0;
    }

    /// The pair has scrolled fully past the left edge.
    pub fn is_offscreen(&self) -> bool {
        self.x <= PIPE_RECYCLE_X
    }

    /// Move back to the right edge with a fresh opening.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.offset = random_offset(rng);
        self.x = PIPE_RESPAWN_X;
        self.scored = false;
    }

    /// True exactly once per pass, on the tick the pair sits on the score line.
    pub fn passes_score_line(&mut self) -> bool {
        if self.x == SCORE_TRIGGER_X && !self.scored {
            self.scored = true;
            return true;
        }
        false
    }
}

fn random_offset(rng: &mut impl Rng) -> i32 {
    rng.gen_range(PIPE_OFFSET_MIN..=PIPE_OFFSET_MAX)
}

impl Entity for ObstaclePair {
    fn tick(&mut self) {
        self.x += self.velocity;
    }

    fn visuals(&self, out: &mut Vec<Visual>) {
        out.push(Visual::Pipe {
            rect: self.top_rect(),
            end: PipeEnd::Top,
        });
        out.push(Visual::Pipe {
            rect: self.bottom_rect(),
            end: PipeEnd::Bottom,
        });
    }
}
