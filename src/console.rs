use crate::config::Pacing;
use crate::display::{self, StatusBoard};
use crate::simulation::Phase;
use crate::simulation::messages::{Command, JunctionDecision, PlayerCommand};
use crate::simulation::train::Train;
use bevy::prelude::*;
use std::io::{self, BufRead, Write};
use std::thread;

/// Drives the app from the terminal: one line of input per turn.
pub struct ConsolePlugin {
    pub pacing: Pacing,
}

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        let pacing = self.pacing;
        app.set_runner(move |app| run_console(app, pacing));
    }
}

fn run_console(mut app: App, pacing: Pacing) -> AppExit {
    app.finish();
    app.cleanup();

    display::play_intro(&pacing);
    let stdin = io::stdin();
    drive(&mut app, stdin.lock(), &pacing)
}

/// Reads a line after showing the prompt. `None` once the input is closed.
fn prompt<R: BufRead>(input: &mut R) -> Option<String> {
    print!("> ");
    if let Err(err) = io::stdout().flush() {
        warn!("Failed to flush stdout: {}", err);
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(err) => {
            warn!("Failed to read input: {}", err);
            None
        }
    }
}

/// Runs turns until the game is over or the input runs dry. Closed input counts as quitting.
pub fn drive<R: BufRead>(app: &mut App, mut input: R, pacing: &Pacing) -> AppExit {
    loop {
        if let Some(exit) = app.should_exit() {
            return exit;
        }
        match *app.world().resource::<Phase>() {
            Phase::Over(ending) => {
                info!("Game over: {:?}", ending);
                break;
            }
            Phase::Driving => {
                println!("{}", StatusBoard(app.world().resource::<Train>()));
                println!("{}", display::menu());
                let Some(line) = prompt(&mut input) else {
                    info!("Input closed, leaving the cab");
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => {
                        app.world_mut().write_message(PlayerCommand(command));
                    }
                    Err(err) => {
                        debug!("{:?}", err);
                        println!("{}", err);
                    }
                }
                app.update();
                if !matches!(app.world().resource::<Phase>(), Phase::Over(_)) {
                    thread::sleep(pacing.turn_pause());
                }
            }
            Phase::AtJunction => {
                let Some(answer) = prompt(&mut input) else {
                    info!("Input closed at the junction, leaving the cab");
                    break;
                };
                app.world_mut().write_message(JunctionDecision::from_answer(&answer));
                app.update();
            }
        }
    }
    println!("Game Over.");
    AppExit::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::simulation::{Ending, SimulationPlugin};
    use std::io::Cursor;

    fn build_app(config: Config) -> App {
        let mut app = App::new();
        app.add_plugins(SimulationPlugin { config });
        app
    }

    fn quick_config() -> Config {
        Config {
            seed: Some(77),
            ..Default::default()
        }
    }

    fn play(app: &mut App, input: &str) -> AppExit {
        let pacing = Pacing {
            intro_beat_ms: 0,
            turn_pause_ms: 0,
        };
        drive(app, Cursor::new(input.to_string()), &pacing)
    }

    fn phase(app: &App) -> Phase {
        *app.world().resource::<Phase>()
    }

    #[test]
    fn test_quit_from_menu() {
        let mut app = build_app(quick_config());
        assert_eq!(play(&mut app, "1\n3\nq\n"), AppExit::Success);
        assert_eq!(phase(&app), Phase::Over(Ending::Quit));
        let boiler = app.world().resource::<Train>().boiler();
        assert!(boiler.fire_lit());
        assert_eq!(boiler.coal_in_fire(), 4);
    }

    #[test]
    fn test_invalid_input_still_runs_a_turn() {
        let mut app = build_app(quick_config());
        play(&mut app, "1\n3\nstoke\n8\n");
        let boiler = app.world().resource::<Train>().boiler();
        assert_eq!(boiler.coal_in_fire(), 3);
        assert_eq!(boiler.pressure(), 8);
    }

    #[test]
    fn test_closed_input_ends_game() {
        let mut app = build_app(quick_config());
        assert_eq!(play(&mut app, "1\n"), AppExit::Success);
        // the game is left mid-run, not ended by the simulation
        assert_eq!(phase(&app), Phase::Driving);
        assert_eq!(app.world().resource::<Train>().boiler().coal_in_fire(), 5);
    }

    #[test]
    fn test_stranded_run_stops_reading() {
        let mut config = quick_config();
        config.boiler.tender_coal = 0;
        let mut app = build_app(config);
        assert_eq!(play(&mut app, "7\n7\n7\n"), AppExit::Success);
        assert_eq!(phase(&app), Phase::Over(Ending::Stranded));
    }

    #[test]
    fn test_junction_answer_read_from_input() {
        let mut config = quick_config();
        config.boiler.pressure_gain = 60;
        config.train.throttle_boost_kmh = 100_000;
        let mut app = build_app(config);
        play(&mut app, "1\n3\n5\nyes\nq\n");
        assert_eq!(phase(&app), Phase::Over(Ending::Quit));
        let train = app.world().resource::<Train>();
        assert_eq!(train.speed_kmh(), 0);
        assert!(!train.environment().junction.is_reached());
    }
}
