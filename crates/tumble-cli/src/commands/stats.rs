use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tumble_core::{Face, RollEventKind};

/// Width of the histogram bar for the most frequent face.
const BAR_WIDTH: usize = 30;

pub fn run(rolls: u32, seed: Option<u64>) -> Result<(), String> {
    if rolls == 0 {
        return Err("--rolls must be at least 1".into());
    }
    let config = super::load_config(None, seed)?;
    let frame = super::frame_ms(60.0)?;
    let mut widget = super::build_widget(config)?;

    let mut counts = [0u32; 6];
    let mut total_ms = 0.0;
    for _ in 0..rolls {
        let started = widget.now_ms();
        widget.tap();
        widget.run_until_idle(frame, super::IDLE_LIMIT_MS);
        if widget.is_rolling() {
            return Err(format!(
                "roll did not settle within {} ms",
                super::IDLE_LIMIT_MS
            ));
        }
        total_ms += widget.now_ms() - started;
        counts[widget.face().index()] += 1;
    }

    let interrupted = widget
        .log()
        .events()
        .iter()
        .filter(|e| matches!(e.kind, RollEventKind::Finished { completed: false, .. }))
        .count();

    println!(
        "  {} {}",
        "Face statistics".bold(),
        format!("({rolls} rolls)").dimmed()
    );
    println!();

    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Face", "Count", "Share", ""]);
    for face in Face::ALL {
        let count = counts[face.index()];
        let share = f64::from(count) / f64::from(rolls) * 100.0;
        let bar = "#".repeat(count as usize * BAR_WIDTH / max as usize);
        table.add_row(vec![
            face.to_string(),
            count.to_string(),
            format!("{share:.1}%"),
            bar,
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  Mean roll: {:.1} ms, {} haptic pulses, {interrupted} interrupted",
        total_ms / f64::from(rolls),
        widget.roller().haptics().count()
    );

    Ok(())
}
