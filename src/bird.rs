//! Bird kinematics.
//!
//! Motion has two phases. A jump sets a fixed upward impulse that is applied
//! for [`JUMP_HEIGHT`] ticks while the bird tilts up. After that gravity takes
//! over, compounding every tick up to [`MAX_GRAVITY`], while the bird tilts
//! back down. Once the nose drops below [`FALLING_ANGLE`] the wings freeze.

use crate::audio::{Audio, Cue};
use crate::config::*;
use crate::entity::{Entity, Visual, WingFrame};
use crate::geom::{Point, Rect};

#[derive(Debug, Clone)]
pub struct Bird {
    /// Hitbox. Its size follows the sprite rotation, see [`Bird::rotate`].
    rect: Rect,
    velocity: f64,
    gravity: f64,
    angle: f64,
    frame: WingFrame,
    frame_index: usize,
    frame_ticks: u32,
    /// Ticks of upward motion spent from the current impulse.
    distance: u32,
    falling: bool,
    dead: bool,
    hit_cue_pending: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        let (x, y) = BIRD_START;
        Self {
            rect: Rect::from_center(Point::new(x, y), BIRD_WIDTH, BIRD_HEIGHT),
            velocity: 0.0,
            gravity: BASE_GRAVITY,
            angle: 0.0,
            frame: WingFrame::Mid,
            frame_index: 0,
            frame_ticks: 0,
            distance: 0,
            falling: false,
            dead: false,
            hit_cue_pending: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn frame(&self) -> WingFrame {
        self.frame
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Ticks of upward travel used from the current jump.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Re-derive the hitbox from the current angle: the bounding box of the
    /// rotated sprite, narrowed by [`BIRD_INFLATE_X`], around the same centre.
    pub fn rotate(&mut self) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let w = (BIRD_WIDTH * cos.abs() + BIRD_HEIGHT * sin.abs()).round();
        let h = (BIRD_WIDTH * sin.abs() + BIRD_HEIGHT * cos.abs()).round();
        self.rect = Rect::from_center(self.rect.center(), w, h).inflate(BIRD_INFLATE_X, 0.0);
    }

    pub fn jump(&mut self, audio: &mut dyn Audio) {
        if self.dead {
            return;
        }
        audio.play(Cue::Flap);
        self.falling = false;
        self.velocity = JUMP_IMPULSE;
        self.distance = 0;
        self.gravity = BASE_GRAVITY;
        self.rotate();
    }

    pub fn hit_pipe(&mut self, audio: &mut dyn Audio) {
        self.play_hit_once(audio);
        self.dead = true;
        audio.play(Cue::Die);
    }

    pub fn hit_ground(&mut self, audio: &mut dyn Audio) {
        self.play_hit_once(audio);
        self.dead = true;
    }

    pub fn point(&self, audio: &mut dyn Audio) {
        audio.play(Cue::Point);
    }

    /// Pin the bird where it is; gravity stays at zero from now on.
    pub fn stop(&mut self) {
        self.gravity = 0.0;
    }

    fn play_hit_once(&mut self, audio: &mut dyn Audio) {
        if self.hit_cue_pending {
            audio.play(Cue::Hit);
            self.hit_cue_pending = false;
        }
    }

    fn compound_gravity(&mut self) {
        self.gravity = (self.gravity * GRAVITY_RAMP).min(MAX_GRAVITY);
    }

    fn tilt(&mut self, delta: f64) {
        self.angle = (self.angle + delta).clamp(MIN_ANGLE, MAX_ANGLE);
    }

    fn animate(&mut self) {
        if self.falling {
            self.frame = WingFrame::Mid;
            return;
        }
        if self.frame_ticks == 0 {
            self.frame = WingFrame::CYCLE[self.frame_index];
            self.frame_index = (self.frame_index + 1) % WingFrame::CYCLE.len();
        }
        self.frame_ticks = (self.frame_ticks + 1) % FLAP_FRAME_TICKS;
    }
}

impl Entity for Bird {
    fn tick(&mut self) {
        if self.dead {
            self.tilt(-DEAD_TILT_STEP);
            self.compound_gravity();
            self.rect.y += self.gravity;
            return;
        }

        self.animate();

        if self.distance < JUMP_HEIGHT {
            // Before the first jump the velocity is zero and the bird hovers.
            self.rect.y += self.velocity;
            if self.velocity == JUMP_IMPULSE {
                self.distance += 1;
                self.tilt(TILT_UP_STEP);
            }
        } else {
            self.tilt(-TILT_DOWN_STEP);
            if self.angle < FALLING_ANGLE {
                self.falling = true;
                self.frame = WingFrame::Mid;
            }
            self.compound_gravity();
            self.rect.y += self.gravity;
        }
    }

    fn visuals(&self, out: &mut Vec<Visual>) {
        out.push(Visual::Bird {
            rect: self.rect,
            angle: self.angle,
            frame: self.frame,
        });
    }
}
