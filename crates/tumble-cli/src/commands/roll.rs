use std::path::Path;

use colored::{ColoredString, Colorize};
use tumble_core::{RollAttempt, RollEvent, RollEventKind};

pub fn run(
    taps: u32,
    interval_ms: f64,
    fps: f64,
    seed: Option<u64>,
    config: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    if !interval_ms.is_finite() || interval_ms < 0.0 {
        return Err(format!(
            "--interval-ms must be a non-negative number, got {interval_ms}"
        ));
    }
    let frame = super::frame_ms(fps)?;
    let config = super::load_config(config, seed)?;
    let mut widget = super::build_widget(config)?;

    let mut rejected = 0;
    for i in 0..taps {
        let at = f64::from(i) * interval_ms;
        while widget.now_ms() + 1e-9 < at {
            widget.advance(frame);
        }
        if widget.tap() == RollAttempt::Rejected {
            rejected += 1;
        }
    }
    widget.run_until_idle(frame, super::IDLE_LIMIT_MS);
    if widget.is_rolling() {
        return Err(format!(
            "roll did not settle within {} ms",
            super::IDLE_LIMIT_MS
        ));
    }

    let roller = widget.roller();
    if json {
        for event in widget.log().events() {
            let line = serde_json::to_string(event).map_err(|e| e.to_string())?;
            println!("{line}");
        }
        let summary = serde_json::json!({
            "taps": taps,
            "rolls": roller.rolls_started(),
            "rejected": rejected,
            "haptic_pulses": roller.haptics().count(),
            "face": widget.face().value(),
        });
        println!("{summary}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Roll".bold(),
        format!("({taps} taps every {interval_ms} ms, {fps} fps)").dimmed()
    );
    println!();
    for event in widget.log().events() {
        println!("  {}", colorize(event));
    }
    if widget.log().is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
    println!(
        "  {} rolls, {} rejected taps, {} haptic pulses",
        roller.rolls_started(),
        rejected,
        roller.haptics().count()
    );
    println!(
        "  Final face: {} ({})",
        widget.face().to_string().bold(),
        widget.face().asset_name()
    );
    println!();
    for line in super::face_art(widget.face()).lines() {
        println!("  {line}");
    }

    Ok(())
}

fn colorize(event: &RollEvent) -> ColoredString {
    let line = event.to_string();
    match event.kind {
        RollEventKind::Started { .. } => line.green(),
        RollEventKind::Rejected { .. } => line.yellow(),
        RollEventKind::HapticFired { .. } => line.magenta(),
        RollEventKind::FaceChanged { .. } => line.cyan().bold(),
        RollEventKind::Finished { .. } => line.blue(),
    }
}
