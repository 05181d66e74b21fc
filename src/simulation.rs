pub mod boiler;
pub mod environment;
pub mod messages;
pub mod random;
pub mod train;

use crate::config::Config;
use crate::error::Refusal;
use crate::simulation::messages::{Command, JunctionDecision, MessagingPlugin, PlayerCommand};
use crate::simulation::random::SimRng;
use crate::simulation::train::Train;
use bevy::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Exploded,
    Stranded,
    Quit,
}

/// Where the turn loop currently is.
#[derive(Resource, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Driving,
    /// The junction has been reached and the player's answer is awaited.
    AtJunction,
    Over(Ending),
}

pub struct SimulationPlugin {
    pub config: Config,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let mut rng = SimRng::new(self.config.seed);
        info!("Simulation seed {}", rng.seed());
        let train = Train::new(&self.config, &mut *rng);

        app.add_plugins(MessagingPlugin)
            .insert_resource(train)
            .insert_resource(rng)
            .init_resource::<Phase>()
            .add_systems(
                Update,
                (
                    apply_player_commands.run_if(resource_equals(Phase::Driving)),
                    advance_train.run_if(resource_equals(Phase::Driving)),
                    resolve_junction.run_if(resource_equals(Phase::AtJunction)),
                )
                    .chain(),
            );
    }
}

/// Carries out one cab command and returns what the player sees.
fn carry_out(train: &mut Train, command: Command) -> Result<String, Refusal> {
    let text = match command {
        Command::AddCoal => {
            let amount = train.boiler_mut().shovel_coal()?;
            format!("You shovel {} coal into the firebox.", amount)
        }
        Command::AddWater => {
            let amount = train.boiler_mut().add_water()?;
            format!("You add {} units of water to the boiler.", amount)
        }
        Command::LightFire => {
            train.boiler_mut().light_fire()?;
            "You strike a match and light the fire. The firebox glows warmly.".into()
        }
        Command::ExtinguishFire => {
            train.boiler_mut().extinguish_fire()?;
            "You douse the flames. The fire is extinguished.".into()
        }
        Command::OpenThrottle => {
            train.apply_throttle()?;
            "You open the throttle. The train surges forward!".into()
        }
        Command::ApplyBrake => {
            train.apply_brake();
            "You apply the brake. The train slows down.".into()
        }
        Command::Wait | Command::Quit => "You wait...".into(),
    };
    Ok(text)
}

fn apply_player_commands(
    mut commands: MessageReader<PlayerCommand>,
    mut train: ResMut<Train>,
    mut phase: ResMut<Phase>,
) {
    for &PlayerCommand(command) in commands.read() {
        if command == Command::Quit {
            info!("Player left the cab at {:.2} km", train.distance_km());
            *phase = Phase::Over(Ending::Quit);
            return;
        }
        match carry_out(&mut train, command) {
            Ok(text) => println!("{}", text),
            Err(refusal) => {
                debug!("{:?} refused: {:?}", command, refusal);
                println!("{}", refusal);
            }
        }
    }
}

fn advance_train(mut train: ResMut<Train>, mut rng: ResMut<SimRng>, mut phase: ResMut<Phase>) {
    let report = train.update(&mut **rng);
    for event in &report.boiler_events {
        println!("{}", event);
    }
    debug!(
        "Turn done: {} km/h, {:.3} km, {} psi",
        train.speed_kmh(),
        train.distance_km(),
        train.boiler().pressure()
    );

    if let Some(ending) = report.ending() {
        info!("Run ended ({:?}) after {:.2} km", ending, train.distance_km());
        *phase = Phase::Over(ending);
        return;
    }

    if report.junction_reached {
        println!("\nJunction ahead! The track splits {}.", train.environment().junction.direction());
        println!("Do you want to stop and choose a route? (yes/no)");
        *phase = Phase::AtJunction;
    }
}

fn resolve_junction(
    mut decisions: MessageReader<JunctionDecision>,
    mut train: ResMut<Train>,
    mut rng: ResMut<SimRng>,
    mut phase: ResMut<Phase>,
) {
    let Some(decision) = decisions.read().last().copied() else {
        return;
    };
    if train.resolve_junction(decision.stop, &mut **rng) {
        let environment = train.environment();
        println!("You stop at the junction and decide your route.");
        println!("{}", environment.terrain.describe());
        info!(
            "New route at {:.2} km: limit {} km/h, next junction in {:.0} km",
            train.distance_km(),
            environment.speed_limit.limit_kmh(),
            environment.junction.distance_km()
        );
    }
    *phase = Phase::Driving;
}
