//! The capability every world object shares: advance one tick, and describe
//! how it should be drawn.

use crate::geom::Rect;

pub trait Entity {
    /// Advance by one fixed tick.
    fn tick(&mut self);

    /// Push the entity's drawable parts, in back-to-front order. Entities that
    /// are not currently part of the scene push nothing.
    fn visuals(&self, out: &mut Vec<Visual>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WingFrame {
    Up,
    Mid,
    Down,
}

impl WingFrame {
    pub const CYCLE: [WingFrame; 3] = [WingFrame::Up, WingFrame::Mid, WingFrame::Down];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeEnd {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    Instructions,
    EndMessage,
}

/// Position and visual state of one drawable part, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Bird {
        rect: Rect,
        /// Degrees, positive tilts the beak up.
        angle: f64,
        frame: WingFrame,
    },
    Pipe {
        rect: Rect,
        end: PipeEnd,
    },
    Ground {
        rect: Rect,
    },
    Score {
        value: u32,
    },
    Overlay {
        kind: OverlayKind,
        rect: Rect,
        alpha: u8,
    },
}
