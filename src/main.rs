//! Coin Chase headless runner
//!
//! Plays a scripted session without a renderer: the player chases the
//! nearest coin with pointer input until it gets caught or time runs out.

use std::process::ExitCode;

use clap::Parser;

use coin_chase::audio::{AudioManager, LogSink};
use coin_chase::scene::Scene;
use coin_chase::sim::{Category, PlayerInput, tick};
use coin_chase::{SceneDescription, Settings, SetupError, VariantPreset};

/// Presentation frame rate of the scripted session
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "coin-chase")]
#[command(about = "Play a scripted Coin Chase session without a renderer")]
struct Args {
    /// Variant preset (`pursuit` or `classic`) or path to a settings JSON file
    preset_or_path: Option<String>,

    /// Session length in seconds
    #[arg(default_value_t = 60.0, value_parser = parse_seconds)]
    seconds: f32,
}

fn parse_seconds(s: &str) -> Result<f32, String> {
    let secs: f32 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(format!("duration must be a positive number, got {s}"))
    }
}

fn load_settings(arg: Option<&str>) -> Result<Settings, SetupError> {
    let Some(arg) = arg else {
        return Ok(Settings::default());
    };
    if let Some(preset) = VariantPreset::from_str(arg) {
        return Ok(Settings::from_preset(preset));
    }
    Ok(Settings::load(arg)?)
}

/// Aim at the closest coin, or stand still when there is none
fn steer(scene: &Scene) -> PlayerInput {
    let player_pos = scene.state.player().pos;
    scene
        .state
        .registry()
        .of_category(Category::Coin)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player_pos)
                .partial_cmp(&b.pos.distance_squared(player_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|coin| PlayerInput::Target(coin.pos))
        .unwrap_or(PlayerInput::Target(player_pos))
}

fn run(args: &Args) -> Result<(), SetupError> {
    let settings = load_settings(args.preset_or_path.as_deref())?;

    let mut scene = SceneDescription::default_scene().build(settings)?;
    let mut audio = AudioManager::new(LogSink);
    audio.start_music();

    let frames = (args.seconds / FRAME_DT).ceil() as u32;
    for _ in 0..frames {
        let input = steer(&scene);
        scene.state.set_player_input(input);

        let report = tick(&mut scene.state, FRAME_DT);
        scene.hud.apply(&report, &scene.state);
        audio.handle_events(&report.events);

        if report.game_over_triggered {
            break;
        }
    }

    let state = &scene.state;
    println!(
        "{} after {:.1}s, {}",
        if state.is_game_over() {
            coin_chase::ui::GAME_OVER_TEXT
        } else {
            "Time up"
        },
        state.time,
        scene.hud.score_text().unwrap_or("no score label")
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Coin Chase (headless) starting...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["coin-chase"]).unwrap();
        assert_eq!(args.preset_or_path, None);
        assert_eq!(args.seconds, 60.0);
    }

    #[test]
    fn test_preset_and_duration() {
        let args = Args::try_parse_from(["coin-chase", "classic", "12.5"]).unwrap();
        assert_eq!(args.preset_or_path.as_deref(), Some("classic"));
        assert_eq!(args.seconds, 12.5);
    }

    #[test]
    fn test_help_is_not_a_settings_path() {
        let err = Args::try_parse_from(["coin-chase", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_bad_duration_rejected() {
        for bad in ["1x", "0", "NaN", "inf"] {
            let err = Args::try_parse_from(["coin-chase", "classic", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{bad}");
        }
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["coin-chase", "--fast"]).is_err());
    }

    #[test]
    fn test_load_settings_presets() {
        let settings = load_settings(Some("classic")).unwrap();
        assert_eq!(settings, Settings::from_preset(VariantPreset::Classic));
        assert_eq!(load_settings(None).unwrap(), Settings::default());
    }
}
