//! Tumble GUI: macroquad entry point.
//!
//! The virtual canvas (270x480) is scaled to fit the window.

use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use tumble_core::RollConfig;
use tumble_gui::app::App;
use tumble_gui::theme::{CANVAS_H, CANVAS_W, palette, setup_virtual_canvas};

fn window_conf() -> Conf {
    Conf {
        window_title: "Tumble".to_owned(),
        window_width: (CANVAS_W * 1.5) as i32,
        window_height: (CANVAS_H * 1.5) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Value following `flag` on the command line.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn load_config(args: &[String]) -> Result<RollConfig, String> {
    let mut config = match arg_value(args, "--config") {
        Some(path) => RollConfig::load(std::path::Path::new(&path))
            .map_err(|e| format!("{path}: {e}"))?,
        None => RollConfig::default(),
    };
    if let Some(seed) = arg_value(args, "--seed") {
        let seed = seed
            .parse()
            .map_err(|_| format!("--seed expects a number, got {seed:?}"))?;
        config = config.with_seed(seed);
    }
    Ok(config.with_max_events(256))
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse CLI args: --seed <n>, --config <file>, -v
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut app = match load_config(&args).and_then(|c| App::new(c).map_err(|e| e.to_string())) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    loop {
        // Clear with black (letterbox bars)
        clear_background(palette::BLACK);
        setup_virtual_canvas();

        app.update(get_frame_time());
        app.draw();

        if app.should_quit {
            break;
        }

        next_frame().await;
    }
}
