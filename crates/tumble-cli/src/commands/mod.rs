pub mod frames;
pub mod roll;
pub mod stats;

use std::path::Path;

use rand::rngs::StdRng;
use tumble_core::{DiceWidget, Face, RecordingHaptics, RollConfig};

/// Give up on a roll that has not settled after this long.
const IDLE_LIMIT_MS: f64 = 60_000.0;

type Widget = DiceWidget<StdRng, RecordingHaptics>;

/// Load the config file (or defaults) and apply a seed override.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<RollConfig, String> {
    let mut config = match path {
        Some(path) => RollConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => RollConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Frame duration for a frame rate.
fn frame_ms(fps: f64) -> Result<f64, String> {
    if fps.is_finite() && fps > 0.0 {
        Ok(1000.0 / fps)
    } else {
        Err(format!("--fps must be a positive number, got {fps}"))
    }
}

fn build_widget(config: RollConfig) -> Result<Widget, String> {
    DiceWidget::from_config(config, RecordingHaptics::new()).map_err(|e| e.to_string())
}

/// A face drawn as ASCII pips.
fn face_art(face: Face) -> String {
    let mut grid = [[' '; 3]; 3];
    for &(col, row) in face.pips() {
        grid[usize::from(row)][usize::from(col)] = 'o';
    }
    let mut out = String::from("+-------+\n");
    for row in grid {
        out.push_str(&format!("| {} {} {} |\n", row[0], row[1], row[2]));
    }
    out.push_str("+-------+");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_is_drawn_as_a_cross() {
        assert_eq!(
            face_art(Face::Five),
            "+-------+\n| o   o |\n|   o   |\n| o   o |\n+-------+"
        );
    }

    #[test]
    fn bad_frame_rates_are_rejected() {
        assert!(frame_ms(0.0).is_err());
        assert!(frame_ms(f64::NAN).is_err());
        assert!((frame_ms(50.0).unwrap() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn seed_overrides_defaults() {
        let config = load_config(None, Some(5)).unwrap();
        assert_eq!(config.seed, Some(5));
    }
}
