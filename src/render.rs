//! Half-block terminal renderer.
//!
//! The scene is rasterized into a pixel buffer twice as tall as the terminal
//! (each cell shows two pixels with `▀`), scaling the 640×480 world onto
//! whatever size the terminal currently has.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::config::{OK_BUTTON, SCORE_CENTER, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entity::{OverlayKind, PipeEnd, Visual, WingFrame};
use crate::geom::Rect;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    fn to_color(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const BUTTON: Rgb = Rgb(232, 97, 1);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer ────────────────────────────────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    /// Sized for a terminal of `cols` × `rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Paint `c` over the rectangle with `alpha` opacity.
    fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb, alpha: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.w as i32);
        let y1 = (y + h).min(self.h as i32);
        // 0..=255 onto 0..=256 so full opacity replaces the pixel exactly.
        let t = alpha as u16 + (alpha >> 7) as u16;
        for py in y0..y1 {
            for px in x0..x1 {
                let under = self.get(px as usize, py as usize);
                self.set(px, py, Rgb::lerp(under, c, t));
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.to_color()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.to_color()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.to_color()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }

    /// Rasterize a frame. `visuals` is drawn in order, later entries on top.
    pub fn draw_scene(&mut self, visuals: &[Visual]) {
        let view = View::new(self.w, self.h);
        let ground = visuals.iter().find_map(|v| match v {
            Visual::Ground { rect } => Some(*rect),
            _ => None,
        });
        let scroll = ground.map_or(0.0, |r| -r.x);
        let horizon = ground.map_or(self.h as i32, |r| view.y(r.y));

        self.draw_sky(horizon);
        self.draw_hills(horizon, scroll * view.sx);

        let mut score = 0;
        for visual in visuals {
            match *visual {
                Visual::Pipe { rect, end } => self.draw_pipe(&view, rect, end),
                Visual::Bird { rect, angle, frame } => self.draw_bird(&view, rect, angle, frame),
                Visual::Ground { rect } => self.draw_ground(&view, rect),
                Visual::Score { value } => {
                    score = value;
                    let (cx, cy) = SCORE_CENTER;
                    draw_number(self, view.x(cx as f64), view.y(cy as f64) - 2, value, WHITE);
                }
                Visual::Overlay { kind, rect, alpha } => match kind {
                    OverlayKind::Instructions => self.draw_instructions(&view, rect, alpha),
                    OverlayKind::EndMessage => self.draw_end_message(&view, rect, alpha, score),
                },
            }
        }
    }

    fn draw_sky(&mut self, horizon: i32) {
        let sky_h = horizon.max(1) as usize;
        for y in 0..sky_h.min(self.h) {
            let t = (y * 256 / sky_h) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in 0..self.w {
                self.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_hills(&mut self, base: i32, scroll: f64) {
        let scale = self.h as f64 / 48.0;
        // Far hills
        for x in 0..self.w as i32 {
            let fx = (x as f64 + scroll * 0.2) * 0.04;
            let h = (fx.sin() * 6.0 + (fx * 1.7).sin() * 3.0) * scale;
            let top = base - h as i32 - (4.0 * scale) as i32;
            for y in top..base {
                self.set(x, y, HILL_FAR);
            }
        }
        // Near hills
        for x in 0..self.w as i32 {
            let fx = (x as f64 + scroll * 0.4) * 0.06;
            let h = (fx.sin() * 4.0 + (fx * 2.3).sin() * 2.0) * scale;
            let top = base - h as i32 - (2.0 * scale) as i32;
            for y in top..base {
                self.set(x, y, HILL_NEAR);
            }
        }
    }

    fn draw_ground(&mut self, view: &View, rect: Rect) {
        let gy = view.y(rect.y);
        let scroll = -rect.x * view.sx;
        // Grass strip
        for x in 0..self.w as i32 {
            let alt = ((x as f64 + scroll) as i32 / 3) % 2 == 0;
            self.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
            self.set(x, gy + 1, GRASS);
        }
        // Dirt
        for y in (gy + 2)..self.h as i32 {
            for x in 0..self.w as i32 {
                let stripe = ((x as f64 + scroll) as i32 + (y - gy) * 2) % 12 < 6;
                self.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }

    fn draw_pipe(&mut self, view: &View, rect: Rect, end: PipeEnd) {
        let (px, py, pw, ph) = view.rect(rect);
        let pw = pw.max(2);
        let cap_extra = (pw / 6).max(1);
        let cap_h = view.y(rect.y + 24.0) - view.y(rect.y);
        let cap_h = cap_h.max(2);

        for x in 0..pw {
            let c = pipe_shade(x, pw);
            for y in py..py + ph {
                self.set(px + x, y, c);
            }
        }

        let cap_y = match end {
            PipeEnd::Top => py + ph - cap_h,
            PipeEnd::Bottom => py,
        };
        for x in -cap_extra..(pw + cap_extra) {
            let c = pipe_shade(x + cap_extra, pw + cap_extra * 2);
            for y in cap_y..cap_y + cap_h {
                self.set(px + x, y, c);
            }
            // Cap edge darkening
            self.set(px + x, cap_y, CAP_DARK);
            self.set(px + x, cap_y + cap_h - 1, CAP_DARK);
        }
    }

    fn draw_bird(&mut self, view: &View, rect: Rect, angle: f64, frame: WingFrame) {
        let center = rect.center();
        let cx = view.x(center.x);
        let cy = view.y(center.y);
        let s = (self.h as f64 / 48.0).max(0.5);

        // Nose up shifts the beak up; a dive shifts it down.
        let tilt = (-angle / 30.0).round().clamp(-1.0, 1.0) as i32;

        // Body core
        let bw = (3.0 * s).max(2.0) as i32;
        let bh = (2.0 * s).max(2.0) as i32;
        self.fill_rect(cx - bw, cy - bh, bw * 2 + 1, bh * 2, BIRD_Y);

        // Highlight (top of body)
        self.fill_rect(cx - bw + 1, cy - bh, bw * 2 - 2, 1.max((s * 0.8) as i32), BIRD_HI);

        // Wing
        let wing_y_off = match frame {
            WingFrame::Up => -1,
            WingFrame::Mid => 0,
            WingFrame::Down => 1,
        };
        let wing_h = (1.5 * s).max(1.0) as i32;
        let wing_w = (2.0 * s).max(1.0) as i32;
        self.fill_rect(cx - bw + 1, cy + wing_y_off + tilt, wing_w, wing_h, BIRD_WING);

        // Eye
        let ex = cx + bw - (1.5 * s) as i32;
        let ey = cy - bh + (1.0 * s).max(1.0) as i32;
        let eye_r = (0.8 * s).max(1.0) as i32;
        self.fill_rect(ex, ey, eye_r + 1, eye_r + 1, BIRD_EYE);
        self.set(ex + eye_r, ey + eye_r, BIRD_PUPIL);

        // Beak
        let beak_x = cx + bw;
        let beak_y = cy - (0.5 * s) as i32 + tilt;
        let beak_w = (2.5 * s).max(2.0) as i32;
        let beak_h = (1.5 * s).max(1.0) as i32;
        self.fill_rect(beak_x, beak_y, beak_w, beak_h / 2 + 1, BIRD_BEAK_HI);
        self.fill_rect(beak_x, beak_y + beak_h / 2 + 1, beak_w, beak_h / 2, BIRD_BEAK);

        // Tail
        let tail_w = (1.5 * s).max(1.0) as i32;
        self.fill_rect(cx - bw - tail_w, cy - 1 - tilt, tail_w, 2, BIRD_WING);
    }

    fn draw_instructions(&mut self, view: &View, rect: Rect, alpha: u8) {
        let (x, y, w, h) = view.rect(rect);
        let cx = x + w / 2;

        // "FLAPPY" in big blocky letters
        let char_w = (w / 7).max(2);
        let char_h = (h / 6).max(2);
        let sx = cx - char_w * 3;
        for i in 0..6 {
            let bx = sx + i * char_w;
            self.blend_rect(bx + 1, y + 1, char_w - 1, char_h, SHADOW, alpha / 2);
            self.blend_rect(bx, y, char_w - 1, char_h, BIRD_Y, alpha);
            self.blend_rect(bx, y, char_w - 1, 1, BIRD_HI, alpha);
        }

        // "TAP TO FLAP"
        let msg = "TAP TO FLAP";
        let sub_y = y + h * 3 / 4;
        let msg_x = cx - msg.len() as i32 * 2;
        for (i, ch) in msg.chars().enumerate() {
            if ch != ' ' {
                self.blend_rect(msg_x + i as i32 * 4, sub_y, 3, 3, WHITE, alpha);
            }
        }
    }

    fn draw_end_message(&mut self, view: &View, rect: Rect, alpha: u8, score: u32) {
        // Dim the scene behind the card.
        self.blend_rect(0, 0, self.w as i32, self.h as i32, SHADOW, alpha / 2);

        let (px, py, pw, ph) = view.rect(rect);
        self.blend_rect(px - 1, py - 1, pw + 2, ph + 2, SHADOW, alpha);
        self.blend_rect(px, py, pw, ph, DIRT, alpha);
        self.blend_rect(px + 1, py + 1, pw - 2, ph - 2, PANEL, alpha);

        let (left, right, top, bottom) = OK_BUTTON;
        let button = Rect::new(
            left as f64,
            top as f64,
            (right - left) as f64,
            (bottom - top) as f64,
        );
        let (bx, by, bw, bh) = view.rect(button);
        self.blend_rect(bx, by, bw.max(3), bh.max(2), BUTTON, alpha);

        if alpha == u8::MAX {
            draw_number(self, px + pw / 2, py + ph / 4, score, WHITE);
        }
    }
}

/// World to pixel scaling for the current buffer size.
struct View {
    sx: f64,
    sy: f64,
}

impl View {
    fn new(w: usize, h: usize) -> Self {
        Self {
            sx: w as f64 / SCREEN_WIDTH as f64,
            sy: h as f64 / SCREEN_HEIGHT as f64,
        }
    }

    fn x(&self, x: f64) -> i32 {
        (x * self.sx).round() as i32
    }

    fn y(&self, y: f64) -> i32 {
        (y * self.sy).round() as i32
    }

    fn rect(&self, r: Rect) -> (i32, i32, i32, i32) {
        let x = self.x(r.x);
        let y = self.y(r.y);
        (x, y, self.x(r.right()) - x, self.y(r.bottom()) - y)
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    let s = n.to_string();
    let total_w = s.len() as i32 * 4 - 1; // 3px per digit + 1px spacing
    let start_x = cx - total_w / 2;
    for (i, ch) in s.bytes().enumerate() {
        draw_digit(buf, start_x + i as i32 * 4, y, ch - b'0', fg);
    }
}
