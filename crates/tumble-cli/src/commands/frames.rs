use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tumble_core::{RollEvent, RollEventKind};

use super::Widget;

pub fn run(fps: f64, seed: Option<u64>, config: Option<&Path>, every: u32) -> Result<(), String> {
    if every == 0 {
        return Err("--every must be at least 1".into());
    }
    let frame = super::frame_ms(fps)?;
    let config = super::load_config(config, seed)?;
    let mut widget = super::build_widget(config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Frame", "t (ms)", "Rotation", "Scale", "Opacity", "Button", "Face", "Rolling", "Events",
    ]);

    widget.tap();
    add_row(&mut table, 0, &widget, &[]);

    let mut frames: u32 = 0;
    while !widget.is_idle() && widget.now_ms() < super::IDLE_LIMIT_MS {
        let events = widget.advance(frame);
        frames += 1;
        if frames % every == 0 || widget.is_idle() || !events.is_empty() {
            add_row(&mut table, frames, &widget, &events);
        }
    }
    if widget.is_rolling() {
        return Err(format!(
            "roll did not settle within {} ms",
            super::IDLE_LIMIT_MS
        ));
    }

    println!(
        "  {} {}",
        "Frames".bold(),
        format!("({fps} fps, every {every})").dimmed()
    );
    println!();
    println!("{table}");
    println!();
    println!(
        "  {frames} frames, settled after {:.1} ms on face {}",
        widget.now_ms(),
        widget.face()
    );

    Ok(())
}

fn add_row(table: &mut Table, frame: u32, widget: &Widget, events: &[RollEvent]) {
    let view = widget.view();
    let notes: Vec<String> = events
        .iter()
        .map(|e| match e.kind {
            RollEventKind::FaceChanged { to, .. } => format!("face -> {to}"),
            other => other.name().to_string(),
        })
        .collect();
    table.add_row(vec![
        frame.to_string(),
        format!("{:.1}", widget.now_ms()),
        format!("{:.1}", view.die.rotation_deg),
        format!("{:.3}", view.die.scale),
        format!("{:.3}", view.die.opacity),
        format!("{:.3}", view.button.scale),
        view.face.to_string(),
        if widget.is_rolling() { "yes" } else { "no" }.to_string(),
        notes.join(", "),
    ]);
}
