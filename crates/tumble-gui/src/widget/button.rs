//! The roll button: press scale, hover border, and dimmed disabled label.

use macroquad::prelude::*;
use tumble_core::ButtonView;

use super::Rect2;
use crate::theme::{LABEL_SIZE, palette};

/// Draw the button described by `view` inside `area`.
pub fn draw_roll_button(view: &ButtonView, area: &Rect2, hovered: bool) {
    let rect = area.scaled(view.scale as f32);
    let border = if hovered && view.enabled {
        palette::TEXT
    } else {
        palette::BORDER
    };
    super::bordered_rect(rect.x, rect.y, rect.w, rect.h, palette::BUTTON, border);

    let font_size = (LABEL_SIZE * view.scale as f32).round() as u16;
    let dims = measure_text(view.label, None, font_size, 1.0);
    let (cx, cy) = rect.center();
    let mut color = palette::TEXT;
    color.a = view.label_opacity as f32;
    draw_text(
        view.label,
        cx - dims.width / 2.0,
        cy + dims.offset_y / 2.0,
        f32::from(font_size),
        color,
    );
}
