//! Application state: the die widget plus everything needed to draw it.

use ::rand::rngs::StdRng;
use macroquad::prelude::*;
use tumble_core::{DiceWidget, RollConfig, RollResult};

use crate::haptics::ShakeHaptics;
use crate::input::{self, Gesture, PointerTracker};
use crate::theme::faces::{FaceTextures, build_faces};
use crate::theme::{CANVAS_H, CANVAS_W, DIE_SIZE, palette};
use crate::widget::Rect2;
use crate::widget::button::draw_roll_button;

/// Frames longer than this are treated as a stall and clamped.
const MAX_FRAME_MS: f64 = 100.0;

/// The running app.
pub struct App {
    widget: DiceWidget<StdRng, ShakeHaptics>,
    faces: FaceTextures,
    pointer: PointerTracker,
    die_center: (f32, f32),
    button_area: Rect2,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Build the widget and face textures. Needs a live window.
    pub fn new(config: RollConfig) -> RollResult<Self> {
        Ok(Self {
            widget: DiceWidget::from_config(config, ShakeHaptics::new())?,
            faces: build_faces(),
            pointer: PointerTracker::new(),
            die_center: (CANVAS_W / 2.0, CANVAS_H * 0.42),
            button_area: Rect2::centered(CANVAS_W / 2.0, CANVAS_H * 0.8, 180.0, 44.0),
            should_quit: false,
        })
    }

    /// Handle input and advance the widget by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for gesture in input::poll(&mut self.pointer, &self.button_area) {
            match gesture {
                Gesture::PressIn => {
                    self.widget.press_in();
                }
                Gesture::PressOut => {
                    self.widget.press_out();
                }
                Gesture::Press => {
                    self.widget.press();
                }
                Gesture::Tap => {
                    self.widget.tap();
                }
                Gesture::Quit => self.should_quit = true,
            }
        }

        let dt_ms = (f64::from(dt) * 1000.0).min(MAX_FRAME_MS);
        self.widget.advance(dt_ms);
        self.widget.roller_mut().haptics_mut().update(dt);
    }

    /// Draw the die and the button onto the virtual canvas.
    pub fn draw(&self) {
        let view = self.widget.view();
        let shake = self.widget.roller().haptics().offset();

        draw_rectangle(0.0, 0.0, CANVAS_W, CANVAS_H, palette::BACKGROUND);

        let size = DIE_SIZE * view.die.scale as f32;
        let (cx, cy) = self.die_center;
        let tint = Color::new(1.0, 1.0, 1.0, view.die.opacity as f32);
        draw_texture_ex(
            self.faces.for_face(view.face),
            cx - size / 2.0 + shake,
            cy - size / 2.0,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(size, size)),
                rotation: (view.die.rotation_deg as f32).to_radians(),
                ..Default::default()
            },
        );

        let (mx, my) = crate::theme::mouse_canvas_position();
        let hovered = self.button_area.contains(mx, my);
        draw_roll_button(&view.button, &self.button_area, hovered);
    }
}
