use crate::config::Pacing;
use crate::simulation::messages::Command;
use crate::simulation::train::Train;
use crossterm::style::{Color, Stylize};
use itertools::Itertools;
use std::fmt;
use std::thread;

const BOARD_WIDTH: usize = 26;
const GAUGE_ROWS: usize = 5;
const FIRE_ROWS: usize = 2;
const RULE: &str = "==============================================================";

/// Intro scenes: how many beats to wait before each one, then its lines.
const INTRO: [(u64, &[&str]); 7] = [
    (
        2,
        &[
            RULE,
            "The train races through the cold winter countryside,",
            "wheels thundering on the tracks.",
            RULE,
        ],
    ),
    (2, &["You are sleeping in your bed.", RULE]),
    (
        2,
        &["A sharp jolt wakes you.", "The train is slowing down and stopping...", RULE],
    ),
    (2, &["A guard pokes his head into your room.", RULE]),
    (2, &["\u{201c}Please sir, you are our only hope in getting to our location\u{201d}", RULE]),
    (
        3,
        &[
            "The guard takes you to the cab of the engine and",
            "informs you that the driver and fireman have both collapsed.",
            RULE,
        ],
    ),
    (3, &["\nIt\u{2019}s up to YOU to drive the train!\n"]),
];

pub fn play_intro(pacing: &Pacing) {
    println!();
    for (beats, lines) in INTRO {
        thread::sleep(pacing.intro_pause(beats));
        for line in lines {
            println!("{}", line);
        }
    }
    println!("Welcome to the Steam Train Simulator!");
    println!("Keep the fire burning, water filled,");
    println!("and pressure steady to keep running.");
}

pub fn menu() -> String {
    let options = Command::ALL
        .iter()
        .map(|command| format!("{}. {}", command.key(), command.label()))
        .join("\n");
    format!("What do you want to do?\n{}", options)
}

/// Whether a tender gauge row is lit. Row 0 is the top of the gauge and only lights
/// when the tender is fuller than the level the row below needs.
fn gauge_filled(amount: u32, row: usize) -> bool {
    match row {
        0 => amount > 400,
        _ => amount >= 100 * (GAUGE_ROWS - row) as u32,
    }
}

fn paint(cell: &str, filled: bool, color: Color) -> String {
    if filled {
        " ".repeat(cell.chars().count()).on(color).to_string()
    } else {
        cell.to_string()
    }
}

/// The cab readout shown at the start of every turn.
pub struct StatusBoard<'a>(pub &'a Train);

impl StatusBoard<'_> {
    fn write_gauges(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boiler = self.0.boiler();
        for row in 0..GAUGE_ROWS {
            let coal = paint("     ", gauge_filled(boiler.tender_coal(), row), Color::Black);
            let water = paint("     ", gauge_filled(boiler.tender_water(), row), Color::Blue);
            write!(f, "|{}|{}|", coal, water)?;
            if row < FIRE_ROWS {
                let grate = (if row == 0 { " " } else { "_" }).repeat(14);
                write!(f, "{}|", paint(&grate, boiler.fire_lit(), Color::Red))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let train = self.0;
        let boiler = train.boiler();
        let environment = train.environment();

        let readings = [
            format!("Water in boiler: {}/{}", boiler.water_level(), boiler.water_capacity()),
            format!("Coal in firebox: {}", boiler.coal_in_fire()),
            format!("Tender coal: {} units", boiler.tender_coal()),
            format!("Tender water: {} units", boiler.tender_water()),
            format!("Pressure: {} psi", boiler.pressure()),
            format!("Fire lit: {}", if boiler.fire_lit() { "Yes" } else { "No" }),
            format!("Throttle: {}", if train.throttle_open() { "Open" } else { "Closed" }),
            format!("Brake: {}", if train.brake_applied() { "Applied" } else { "Off" }),
        ];
        writeln!(f, " {}", "_".repeat(BOARD_WIDTH))?;
        writeln!(f, "|{:w$}|", "", w = BOARD_WIDTH)?;
        for reading in readings {
            writeln!(f, "|{:<w$}|", reading, w = BOARD_WIDTH)?;
        }
        writeln!(f, "|{}|", "_".repeat(BOARD_WIDTH))?;
        self.write_gauges(f)?;

        writeln!(f, "Speed: {} km/h", train.speed_kmh())?;
        writeln!(f, "Distance traveled: {:.2} km", train.distance_km())?;
        writeln!(f, "Track speed limit: {} km/h", environment.speed_limit.limit_kmh())?;
        writeln!(f, "Track steepness: {}", environment.steepness)?;
        writeln!(f, "Weather: {}", environment.weather)?;
        writeln!(f, "Terrain: {}", environment.terrain)?;
        writeln!(f, "Distance to next junction: {:.2} km", environment.junction.distance_km())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::simulation::random::SimRng;

    fn board_lines(train: &Train) -> Vec<String> {
        StatusBoard(train).to_string().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_menu_lists_every_command() {
        let menu = menu();
        let lines: Vec<&str> = menu.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "What do you want to do?");
        assert_eq!(lines[1], "1. Add coal");
        assert_eq!(lines[5], "5. Open throttle");
        assert_eq!(lines[8], "8. Quit");
    }

    #[test]
    fn test_gauge_levels() {
        assert!(gauge_filled(500, 0));
        assert!(!gauge_filled(400, 0));
        assert!(gauge_filled(400, 1));
        assert!(gauge_filled(300, 2));
        assert!(!gauge_filled(299, 2));
        assert!(gauge_filled(100, 4));
        assert!(!gauge_filled(99, 4));
        assert!(!gauge_filled(0, 4));
    }

    #[test]
    fn test_board_readings() {
        let mut rng = SimRng::seeded(3);
        let mut train = Train::new(&Config::default(), &mut *rng);
        train.boiler_mut().shovel_coal().unwrap();
        let lines = board_lines(&train);

        let readings = &lines[2..10];
        for line in readings {
            assert_eq!(line.chars().count(), BOARD_WIDTH + 2, "{:?}", line);
        }
        assert_eq!(readings[0], "|Water in boiler: 100/100  |");
        assert_eq!(readings[1], "|Coal in firebox: 5        |");
        assert_eq!(readings[2], "|Tender coal: 495 units    |");
        assert_eq!(readings[5], "|Fire lit: No              |");
        assert_eq!(readings[6], "|Throttle: Closed          |");
        assert_eq!(readings[7], "|Brake: Off                |");

        let tail = &lines[lines.len() - 7..];
        assert_eq!(tail[0], "Speed: 0 km/h");
        assert_eq!(tail[1], "Distance traveled: 0.00 km");
        let limit = train.environment().speed_limit.limit_kmh();
        assert_eq!(tail[2], format!("Track speed limit: {} km/h", limit));
        assert!(tail[6].starts_with("Distance to next junction: "));
    }

    #[test]
    fn test_board_shows_controls() {
        let mut rng = SimRng::seeded(5);
        let mut train = Train::new(&Config::default(), &mut *rng);
        train.apply_brake();
        let board = StatusBoard(&train).to_string();
        assert!(board.contains("|Throttle: Closed          |"));
        assert!(board.contains("|Brake: Applied            |"));
    }

    #[test]
    fn test_unlit_firebox_draws_grate() {
        let mut rng = SimRng::seeded(4);
        let train = Train::new(&Config::default(), &mut *rng);
        let board = StatusBoard(&train).to_string();
        assert!(board.contains(&format!("{}|", "_".repeat(14))));
    }
}
