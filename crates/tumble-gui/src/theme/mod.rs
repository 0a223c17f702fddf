//! Visual theme: colors, layout constants, and virtual canvas scaling.

pub mod faces;

use macroquad::prelude::*;

/// Virtual canvas width in pixels. The window scales this up.
pub const CANVAS_W: f32 = 270.0;
/// Virtual canvas height in pixels. The window scales this up.
pub const CANVAS_H: f32 = 480.0;

/// Edge length of the die on the canvas.
pub const DIE_SIZE: f32 = 128.0;
/// Font size of the button label.
pub const LABEL_SIZE: f32 = 24.0;

/// Pastel palette of the widget.
pub mod palette {
    use macroquad::prelude::Color;

    /// Letterbox bars around the canvas.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Canvas background, `#FFF2F2`.
    pub const BACKGROUND: Color = Color::new(1.0, 0.949, 0.949, 1.0);
    /// Button label, `#8EA7E9`.
    pub const TEXT: Color = Color::new(0.557, 0.655, 0.914, 1.0);
    /// Button border, `#E5E0FF`.
    pub const BORDER: Color = Color::new(0.898, 0.878, 1.0, 1.0);
    /// Button fill.
    pub const BUTTON: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Die body.
    pub const DIE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Die outline.
    pub const DIE_EDGE: Color = Color::new(0.557, 0.655, 0.914, 1.0);
    /// Pips.
    pub const PIP: Color = Color::new(0.231, 0.259, 0.400, 1.0);
}

fn canvas_scale() -> (f32, f32, f32) {
    let scale = (screen_width() / CANVAS_W).min(screen_height() / CANVAS_H);
    let offset_x = (screen_width() - CANVAS_W * scale) / 2.0;
    let offset_y = (screen_height() - CANVAS_H * scale) / 2.0;
    (scale, offset_x, offset_y)
}

/// Set up a `Camera2D` that maps the virtual canvas to the current window.
pub fn setup_virtual_canvas() {
    let (scale, offset_x, offset_y) = canvas_scale();
    set_camera(&Camera2D {
        zoom: vec2(2.0 / CANVAS_W, 2.0 / CANVAS_H),
        target: vec2(CANVAS_W / 2.0, CANVAS_H / 2.0),
        viewport: Some((
            offset_x as i32,
            offset_y as i32,
            (CANVAS_W * scale) as i32,
            (CANVAS_H * scale) as i32,
        )),
        ..Default::default()
    });
}

/// Convert screen-space mouse position to virtual canvas coordinates.
pub fn mouse_canvas_position() -> (f32, f32) {
    let (mx, my) = mouse_position();
    let (scale, offset_x, offset_y) = canvas_scale();
    ((mx - offset_x) / scale, (my - offset_y) / scale)
}
