//! Fading screen overlays: the start-up instructions and the game-over card.

use crate::config::*;
use crate::entity::{Entity, OverlayKind, Visual};
use crate::geom::{Point, Rect};

#[derive(Debug, Clone)]
pub struct Overlay {
    kind: OverlayKind,
    alpha: i32,
    fading: bool,
    /// Part of the render set. Instructions leave it for good once faded.
    active: bool,
}

impl Overlay {
    /// Fully opaque until [`Overlay::start_fade`], then fades out.
    pub fn instructions() -> Self {
        Self {
            kind: OverlayKind::Instructions,
            alpha: 255,
            fading: false,
            active: true,
        }
    }

    /// Hidden until [`Overlay::start_fade`], then fades in and stays.
    pub fn end_message() -> Self {
        Self {
            kind: OverlayKind::EndMessage,
            alpha: 0,
            fading: false,
            active: false,
        }
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn alpha(&self) -> u8 {
        self.alpha.clamp(0, 255) as u8
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_fade(&mut self) {
        self.fading = true;
        if self.kind == OverlayKind::EndMessage {
            self.active = true;
        }
    }

    pub fn rect(&self) -> Rect {
        match self.kind {
            OverlayKind::Instructions => {
                let (cx, cy) = INSTRUCTIONS_CENTER;
                let (w, h) = INSTRUCTIONS_SIZE;
                Rect::from_center(Point::new(cx as f64, cy as f64), w as f64, h as f64)
            }
            OverlayKind::EndMessage => {
                let (x, y) = END_MESSAGE_TOPLEFT;
                let (w, h) = END_MESSAGE_SIZE;
                Rect::new(x as f64, y as f64, w as f64, h as f64)
            }
        }
    }
}

impl Entity for Overlay {
    fn tick(&mut self) {
        if !self.fading || !self.active {
            return;
        }
        match self.kind {
            OverlayKind::Instructions => {
                self.alpha -= INSTRUCTIONS_FADE_STEP;
                if self.alpha <= 0 {
                    self.alpha = 0;
                    self.active = false;
                }
            }
            OverlayKind::EndMessage => {
                self.alpha = (self.alpha + END_MESSAGE_FADE_STEP).min(255);
            }
        }
    }

    fn visuals(&self, out: &mut Vec<Visual>) {
        if self.active {
            out.push(Visual::Overlay {
                kind: self.kind,
                rect: self.rect(),
                alpha: self.alpha(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_fade_out_and_leave() {
        let mut overlay = Overlay::instructions();
        overlay.tick();
        assert_eq!(overlay.alpha(), 255, "no fade before start");

        overlay.start_fade();
        let ticks = 255 / INSTRUCTIONS_FADE_STEP;
        for _ in 0..ticks - 1 {
            overlay.tick();
            assert!(overlay.is_active());
        }
        overlay.tick();
        assert_eq!(overlay.alpha(), 0);
        assert!(!overlay.is_active());

        let mut out = Vec::new();
        overlay.visuals(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn end_message_fades_in_and_clamps() {
        let mut overlay = Overlay::end_message();
        let mut out = Vec::new();
        overlay.visuals(&mut out);
        assert!(out.is_empty(), "hidden until the game ends");

        overlay.start_fade();
        let mut last = 0;
        for _ in 0..30 {
            overlay.tick();
            assert!(overlay.alpha() >= last);
            last = overlay.alpha();
        }
        assert_eq!(overlay.alpha(), 255);
        assert!(overlay.is_active());

        overlay.visuals(&mut out);
        assert!(matches!(
            out[..],
            [Visual::Overlay {
                kind: OverlayKind::EndMessage,
                alpha: 255,
                ..
            }]
        ));
    }

    #[test]
    fn end_message_contains_ok_button() {
        let rect = Overlay::end_message().rect();
        let (left, right, top, bottom) = OK_BUTTON;
        assert!(rect.left() <= left as f64 && rect.right() >= right as f64);
        assert!(rect.top() <= top as f64 && rect.bottom() >= bottom as f64);
    }
}
