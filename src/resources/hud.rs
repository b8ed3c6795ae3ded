//! HUD layout and hit-testing.
//!
//! Pure geometry: the renderer draws into these rectangles and the mouse
//! handler asks [`HudLayout::hit`] which button, if any, was clicked. No
//! raylib calls happen here so the layout is testable without a window.

use bevy_ecs::prelude::Resource;

use crate::resources::gamestate::GameStates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Clickable HUD elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudButton {
    Flashlight,
    Start,
    Restart,
}

const MARGIN: f32 = 20.0;
const BAR_WIDTH: f32 = 200.0;
const BAR_HEIGHT: f32 = 12.0;
const BAR_GAP: f32 = 34.0;
const BUTTON_W: f32 = 200.0;
const BUTTON_H: f32 = 50.0;
const FLASHLIGHT_W: f32 = 160.0;
const FLASHLIGHT_H: f32 = 40.0;
const MESSAGE_LINE: f32 = 26.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    pub width: f32,
    pub height: f32,
    pub sanity_bar: Rect,
    pub battery_bar: Rect,
    pub flashlight_button: Rect,
    /// Shared by the start and restart buttons, below the screen title.
    pub screen_button: Rect,
}

impl Default for HudLayout {
    fn default() -> Self {
        HudLayout::new(1280, 720)
    }
}

impl HudLayout {
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        HudLayout {
            width: w,
            height: h,
            sanity_bar: Rect::new(MARGIN, MARGIN + 20.0, BAR_WIDTH, BAR_HEIGHT),
            battery_bar: Rect::new(MARGIN, MARGIN + 20.0 + BAR_GAP, BAR_WIDTH, BAR_HEIGHT),
            flashlight_button: Rect::new(
                w - MARGIN - FLASHLIGHT_W,
                h - MARGIN - FLASHLIGHT_H,
                FLASHLIGHT_W,
                FLASHLIGHT_H,
            ),
            screen_button: Rect::new(
                (w - BUTTON_W) / 2.0,
                h * 0.6,
                BUTTON_W,
                BUTTON_H,
            ),
        }
    }

    /// Recompute if the framebuffer size changed.
    pub fn resize(&mut self, width: i32, height: i32) {
        if width as f32 != self.width || height as f32 != self.height {
            *self = HudLayout::new(width, height);
        }
    }

    /// Width of a stat bar filled to `level` out of 100.
    pub fn fill(bar: &Rect, level: f32) -> Rect {
        let k = (level / 100.0).clamp(0.0, 1.0);
        Rect::new(bar.x, bar.y, bar.w * k, bar.h)
    }

    /// Baseline of the `i`th message line, stacked upwards from the bottom
    /// centre.
    pub fn message_line(&self, i: usize, count: usize) -> (f32, f32) {
        let from_bottom = count.saturating_sub(i) as f32;
        (self.width / 2.0, self.height - 100.0 - from_bottom * MESSAGE_LINE)
    }

    pub fn crosshair(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Which button is under `(x, y)` in `state`. The flashlight button is
    /// only live while playing with battery left.
    pub fn hit(&self, x: f32, y: f32, state: &GameStates, battery: f32) -> Option<HudButton> {
        match state {
            GameStates::Start if self.screen_button.contains(x, y) => Some(HudButton::Start),
            GameStates::GameOver if self.screen_button.contains(x, y) => {
                Some(HudButton::Restart)
            }
            GameStates::Playing
                if battery > 0.0 && self.flashlight_button.contains(x, y) =>
            {
                Some(HudButton::Flashlight)
            }
            _ => None,
        }
    }
}
