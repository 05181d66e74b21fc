use crate::common::SpeedConv;
use crate::config::{Config, TrainConfig};
use crate::error::Refusal;
use crate::simulation::boiler::{Boiler, BoilerEvent};
use crate::simulation::Ending;
use crate::simulation::environment::{Environment, Randomizable};
use bevy::prelude::*;
use rand::Rng;

/// What a single turn did to the train.
#[derive(Debug, Default, PartialEq)]
pub struct TurnReport {
    pub boiler_events: Vec<BoilerEvent>,
    /// Set when the train ran into a section with a freshly drawn limit.
    pub new_speed_limit_kmh: Option<u32>,
    pub junction_reached: bool,
}

impl TurnReport {
    pub fn ending(&self) -> Option<Ending> {
        self.boiler_events.iter().find_map(BoilerEvent::ending)
    }
}

#[derive(Resource, Clone, Debug)]
pub struct Train {
    config: TrainConfig,
    boiler: Boiler,
    speed_kmh: u32,
    throttle_open: bool,
    brake_applied: bool,
    distance_km: f64,
    environment: Environment,
}

impl Train {
    pub fn new<R: Rng>(config: &Config, rng: &mut R) -> Self {
        Train {
            config: config.train,
            boiler: Boiler::new(config.boiler),
            speed_kmh: 0,
            throttle_open: false,
            brake_applied: false,
            distance_km: 0.0,
            environment: Environment::random(rng),
        }
    }

    /// Opens the regulator. Needs a lit fire and more than the minimum working pressure;
    /// a dead fire is reported first when both are missing.
    pub fn apply_throttle(&mut self) -> Result<(), Refusal> {
        if !self.boiler.fire_lit() {
            return Err(Refusal::FireOut);
        }
        if self.boiler.pressure() <= self.config.throttle_min_pressure {
            return Err(Refusal::InsufficientPressure);
        }
        self.throttle_open = true;
        self.speed_kmh += self.config.throttle_boost_kmh;
        self.boiler.draw_steam(self.config.throttle_steam_cost);
        Ok(())
    }

    pub fn apply_brake(&mut self) {
        self.speed_kmh = self.speed_kmh.saturating_sub(self.config.brake_step_kmh);
        self.brake_applied = true;
    }

    /// Advances the whole train by one turn: boiler first, then the line ahead, then motion.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> TurnReport {
        let boiler_events = self.boiler.update(self.speed_kmh);

        let new_speed_limit_kmh =
            self.environment
                .speed_limit
                .update(self.speed_kmh, self.config.speed_limit_change_chance, rng);
        if let Some(limit) = new_speed_limit_kmh {
            debug!("Speed limit changed to {} km/h at {:.2} km", limit, self.distance_km);
        }

        if self.throttle_open && self.boiler.pressure() > 0 && self.boiler.fire_lit() {
            self.speed_kmh += self.config.powered_acceleration_kmh;
        } else {
            self.speed_kmh = self.speed_kmh.saturating_sub(self.config.coasting_decay_kmh);
        }

        let travelled_km = self.speed_kmh.km_per_turn();
        self.distance_km += travelled_km;
        let junction_reached = self.environment.junction.approach(travelled_km);

        TurnReport {
            boiler_events,
            new_speed_limit_kmh,
            junction_reached,
        }
    }

    /// Acts on the player's answer at a junction. Stopping brings the train to a stand and
    /// puts it on a new route; carrying on changes nothing. Returns whether a new route was taken.
    pub fn resolve_junction<R: Rng>(&mut self, stop: bool, rng: &mut R) -> bool {
        if !stop {
            return false;
        }
        self.speed_kmh = 0;
        self.environment.reroll(rng);
        true
    }

    pub fn boiler(&self) -> &Boiler {
        &self.boiler
    }

    pub fn boiler_mut(&mut self) -> &mut Boiler {
        &mut self.boiler
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn speed_kmh(&self) -> u32 {
        self.speed_kmh
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn throttle_open(&self) -> bool {
        self.throttle_open
    }

    pub fn brake_applied(&self) -> bool {
        self.brake_applied
    }
}
