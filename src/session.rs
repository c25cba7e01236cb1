//! The game session: owns every world object and runs one fixed tick at a
//! time.

use log::{debug, info, trace};
use rand::{RngCore, SeedableRng, rngs::SmallRng};

use crate::audio::Audio;
use crate::bird::Bird;
use crate::config::{CEILING, PIPE_SPAWN_X};
use crate::entity::{Entity, Visual};
use crate::ground::GroundBand;
use crate::input::InputEvent;
use crate::overlay::Overlay;
use crate::pipe::ObstaclePair;
use crate::score::ScoreCounter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Bird hovers, pipes wait off-screen until the first press.
    NotStarted,
    Playing,
    /// The bird has hit something; the world is frozen.
    Dying,
    /// The end message is up and the OK button restarts.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Pipe,
    Ceiling,
}

impl Collision {
    /// Evaluation order. Only the first match in a tick takes effect.
    pub const PRIORITY: [Collision; 3] = [Collision::Ground, Collision::Pipe, Collision::Ceiling];
}

pub struct Session {
    rng: SmallRng,
    state: State,
    bird: Bird,
    pipes: [ObstaclePair; 3],
    ground: GroundBand,
    score: ScoreCounter,
    instructions: Overlay,
    end_message: Overlay,
    /// Pipes stop counting as obstacles after any collision.
    pipes_solid: bool,
    /// The ground stops counting as an obstacle once the bird lands on it.
    ground_solid: bool,
    ticks: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let pipes = PIPE_SPAWN_X.map(|x| ObstaclePair::spawn(x, &mut rng));
        info!("new session (seed {seed})");
        Self {
            rng,
            state: State::NotStarted,
            bird: Bird::new(),
            pipes,
            ground: GroundBand::new(),
            score: ScoreCounter::new(),
            instructions: Overlay::instructions(),
            end_message: Overlay::end_message(),
            pipes_solid: true,
            ground_solid: true,
            ticks: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[ObstaclePair] {
        &self.pipes
    }

    pub fn ground(&self) -> &GroundBand {
        &self.ground
    }

    pub fn instructions(&self) -> &Overlay {
        &self.instructions
    }

    pub fn end_message(&self) -> &Overlay {
        &self.end_message
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Render order, back to front.
    fn entities(&self) -> [&dyn Entity; 8] {
        let [p0, p1, p2] = &self.pipes;
        [
            p0,
            p1,
            p2,
            &self.bird,
            &self.score,
            &self.ground,
            &self.instructions,
            &self.end_message,
        ]
    }

    fn entities_mut(&mut self) -> [&mut dyn Entity; 8] {
        let [p0, p1, p2] = &mut self.pipes;
        [
            p0,
            p1,
            p2,
            &mut self.bird,
            &mut self.score,
            &mut self.ground,
            &mut self.instructions,
            &mut self.end_message,
        ]
    }

    /// Everything to draw this frame, back to front.
    pub fn visuals(&self) -> Vec<Visual> {
        let mut out = Vec::with_capacity(12);
        for entity in self.entities() {
            entity.visuals(&mut out);
        }
        out
    }

    /// Run one tick. A press on the OK button after game over rebuilds the
    /// whole session before this returns.
    pub fn tick(&mut self, events: &[InputEvent], audio: &mut dyn Audio) -> Flow {
        self.ticks += 1;

        for event in events {
            match *event {
                InputEvent::Quit => return Flow::Quit,
                InputEvent::Press(at) => {
                    self.bird.jump(audio);
                    if self.state == State::NotStarted {
                        self.begin();
                    }
                    if self.state == State::GameOver && at.on_ok_button() {
                        self.restart();
                        return Flow::Continue;
                    }
                }
            }
        }

        // A death is observable as `Dying` for one tick before game over.
        let was_dying = self.state == State::Dying;

        if let Some(collision) = self.first_collision() {
            self.collide(collision, audio);
        }

        self.check_pipes(audio);

        self.bird.rotate();

        if was_dying && self.bird.is_dead() {
            info!("game over, score {}", self.score.value());
            self.state = State::GameOver;
            self.end_message.start_fade();
        }

        for entity in self.entities_mut() {
            entity.tick();
        }
        Flow::Continue
    }

    fn begin(&mut self) {
        debug!("state {:?} -> Playing", self.state);
        self.state = State::Playing;
        for pipe in &mut self.pipes {
            pipe.start();
        }
        self.instructions.start_fade();
    }

    fn restart(&mut self) {
        let seed = self.rng.next_u64();
        info!("restart after scoring {}", self.score.value());
        *self = Session::new(seed);
    }

    fn first_collision(&self) -> Option<Collision> {
        Collision::PRIORITY
            .into_iter()
            .find(|&collision| self.collides(collision))
    }

    fn collides(&self, collision: Collision) -> bool {
        let bird = self.bird.rect();
        match collision {
            Collision::Ground => self.ground_solid && self.ground.rect().intersects(&bird),
            Collision::Pipe => self.pipes_solid && self.pipes.iter().any(|p| p.collides(&bird)),
            Collision::Ceiling => !self.bird.is_dead() && bird.top() <= CEILING,
        }
    }

    fn collide(&mut self, collision: Collision, audio: &mut dyn Audio) {
        debug!("{collision:?} collision at tick {}", self.ticks);
        match collision {
            Collision::Ground => {
                self.ground_solid = false;
                self.bird.hit_ground(audio);
                self.bird.stop();
            }
            Collision::Pipe | Collision::Ceiling => self.bird.hit_pipe(audio),
        }
        self.pipes_solid = false;
        self.ground.stop();
        for pipe in &mut self.pipes {
            pipe.stop();
        }
        if self.state == State::Playing {
            debug!("state Playing -> Dying");
            self.state = State::Dying;
        }
    }

    fn check_pipes(&mut self, audio: &mut dyn Audio) {
        let playing = self.state == State::Playing;
        for pipe in &mut self.pipes {
            if pipe.is_offscreen() {
                pipe.reset(&mut self.rng);
                debug!("recycled pipe, new offset {}", pipe.offset());
            }
            if playing && pipe.passes_score_line() {
                self.score.increment();
                self.bird.point(audio);
                trace!("score {}", self.score.value());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Cue, CueLog};
    use crate::config::{SCORE_TRIGGER_X, SCREEN_HEIGHT};

    /// Started session whose bird hovers at its start height, with every
    /// pipe opening lined up around it.
    fn hovering(audio: &mut CueLog) -> Session {
        let mut session = Session::new(1);
        session.pipes = PIPE_SPAWN_X.map(|x| ObstaclePair::new(x, -150));
        session.tick(&[InputEvent::FLAP], audio);
        session.bird = Bird::new();
        session
    }

    #[test]
    fn hovering_bird_scores_each_pair_once() {
        let mut audio = CueLog::default();
        let mut session = hovering(&mut audio);
        for _ in 0..200 {
            session.tick(&[], &mut audio);
        }
        assert_eq!(session.state(), State::Playing);
        assert_eq!(session.score(), 2);
        assert_eq!(audio.count(Cue::Point), 2);
    }

    #[test]
    fn pair_standing_on_score_line_counts_once() {
        let mut audio = CueLog::default();
        let mut session = hovering(&mut audio);
        session.pipes[0] = ObstaclePair::new(SCORE_TRIGGER_X, -150);
        for _ in 0..10 {
            session.tick(&[], &mut audio);
        }
        assert_eq!(session.pipes[0].x(), SCORE_TRIGGER_X);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn offscreen_pairs_are_recycled_to_the_right_edge() {
        let mut audio = CueLog::default();
        let mut session = hovering(&mut audio);
        session.pipes[1] = ObstaclePair::new(-40, -150);
        session.pipes[1].start();
        session.tick(&[], &mut audio);
        assert_eq!(session.pipes[1].x(), -45);
        session.tick(&[], &mut audio);
        // Reset to the edge, then scrolled once more in the same tick.
        assert_eq!(session.pipes[1].x(), 635);
    }

    #[test]
    fn ground_wins_over_pipe_in_the_same_tick() {
        let mut audio = CueLog::default();
        let mut session = Session::new(3);
        session.tick(&[InputEvent::FLAP], &mut audio);

        // Let the bird fall onto the ground without anything being solid.
        session.ground_solid = false;
        session.pipes_solid = false;
        while session.bird.rect().bottom() <= SCREEN_HEIGHT as f64 - 30.0 {
            session.tick(&[], &mut audio);
        }
        session.pipes[0] = ObstaclePair::new(230, -350);
        session.ground_solid = true;
        session.pipes_solid = true;
        assert!(session.collides(Collision::Ground));
        assert!(session.collides(Collision::Pipe));
        assert_eq!(session.first_collision(), Some(Collision::Ground));

        audio.cues.clear();
        session.tick(&[], &mut audio);
        assert_eq!(audio.cues, vec![Cue::Hit], "the pipe hit must not also fire");
        assert_eq!(session.state(), State::Dying);
        assert!(!session.ground_solid);
        assert!(!session.pipes_solid);
    }

    #[test]
    fn no_score_once_dead() {
        let mut audio = CueLog::default();
        let mut session = hovering(&mut audio);
        session.pipes[0] = ObstaclePair::new(240, -90);
        session.tick(&[], &mut audio);
        assert_eq!(session.state(), State::Dying);

        session.pipes[1] = ObstaclePair::new(SCORE_TRIGGER_X, -150);
        for _ in 0..5 {
            session.tick(&[], &mut audio);
        }
        assert_eq!(session.score(), 0);
        assert_eq!(audio.count(Cue::Point), 0);
    }

    #[test]
    fn visuals_follow_render_order() {
        let session = Session::new(9);
        let visuals = session.visuals();
        // Six pipe pieces, bird, score, ground, instructions; no end message yet.
        assert_eq!(visuals.len(), 10);
        assert!(matches!(visuals[0], Visual::Pipe { .. }));
        assert!(matches!(visuals[6], Visual::Bird { .. }));
        assert!(matches!(visuals[7], Visual::Score { value: 0 }));
        assert!(matches!(visuals[8], Visual::Ground { .. }));
        assert!(matches!(visuals[9], Visual::Overlay { .. }));
    }
}
