use crate::common::Direction;
use rand::Rng;
use std::fmt;

pub const SPEED_LIMITS_KMH: [u32; 4] = [60, 80, 100, 120];
pub const JUNCTION_DISTANCE_KM: std::ops::RangeInclusive<u32> = 5..=20;

/// A fact about the line ahead that is drawn at random whenever the train takes a new route.
pub trait Randomizable: Sized {
    fn random<R: Rng>(rng: &mut R) -> Self;
}

fn pick<T: Copy, R: Rng>(rng: &mut R, options: &[T]) -> T {
    options[rng.random_range(0..options.len())]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackSpeed {
    limit_kmh: u32,
}

impl Randomizable for TrackSpeed {
    fn random<R: Rng>(rng: &mut R) -> Self {
        TrackSpeed {
            limit_kmh: pick(rng, &SPEED_LIMITS_KMH),
        }
    }
}

impl TrackSpeed {
    pub fn limit_kmh(&self) -> u32 {
        self.limit_kmh
    }

    /// A moving train may run into a section with another limit. Returns the freshly drawn
    /// limit when that happens; a stationary train never sees the limit change.
    pub fn update<R: Rng>(&mut self, train_speed_kmh: u32, change_chance: f64, rng: &mut R) -> Option<u32> {
        if train_speed_kmh == 0 {
            return None;
        }
        if rng.random::<f64>() < change_chance {
            *self = TrackSpeed::random(rng);
            return Some(self.limit_kmh);
        }
        None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Steepness {
    Flat,
    Mild,
    Steep,
    VerySteep,
}

impl Randomizable for Steepness {
    fn random<R: Rng>(rng: &mut R) -> Self {
        pick(rng, &[Steepness::Flat, Steepness::Mild, Steepness::Steep, Steepness::VerySteep])
    }
}

impl fmt::Display for Steepness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Steepness::Flat => "Flat",
            Steepness::Mild => "Mild",
            Steepness::Steep => "Steep",
            Steepness::VerySteep => "Very Steep",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Weather {
    Clear,
    Snowing,
    Blizzard,
}

impl Randomizable for Weather {
    fn random<R: Rng>(rng: &mut R) -> Self {
        pick(rng, &[Weather::Clear, Weather::Snowing, Weather::Blizzard])
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weather::Clear => "Clear",
            Weather::Snowing => "Snowing",
            Weather::Blizzard => "Blizzard",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Terrain {
    Rocky,
    Fields,
    Hilly,
    Forest,
}

impl Terrain {
    pub fn describe(&self) -> String {
        format!("The train is now passing through {} terrain.", self)
    }
}

impl Randomizable for Terrain {
    fn random<R: Rng>(rng: &mut R) -> Self {
        pick(rng, &[Terrain::Rocky, Terrain::Fields, Terrain::Hilly, Terrain::Forest])
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Rocky => "Rocky",
            Terrain::Fields => "Fields",
            Terrain::Hilly => "Hilly",
            Terrain::Forest => "Forest",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Junction {
    distance_km: f64,
    direction: Direction,
}

impl Randomizable for Junction {
    fn random<R: Rng>(rng: &mut R) -> Self {
        Junction {
            distance_km: rng.random_range(JUNCTION_DISTANCE_KM) as f64,
            direction: pick(rng, &[Direction::Left, Direction::Right]),
        }
    }
}

impl Junction {
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves `km` closer. Returns true once the junction has been reached or passed.
    pub fn approach(&mut self, km: f64) -> bool {
        self.distance_km -= km;
        self.is_reached()
    }

    pub fn is_reached(&self) -> bool {
        self.distance_km <= 0.0
    }
}

/// Everything about the current route, regenerated as a whole at each junction stop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Environment {
    pub speed_limit: TrackSpeed,
    pub steepness: Steepness,
    pub weather: Weather,
    pub terrain: Terrain,
    pub junction: Junction,
}

impl Randomizable for Environment {
    fn random<R: Rng>(rng: &mut R) -> Self {
        Environment {
            speed_limit: TrackSpeed::random(rng),
            steepness: Steepness::random(rng),
            weather: Weather::random(rng),
            terrain: Terrain::random(rng),
            junction: Junction::random(rng),
        }
    }
}

impl Environment {
    pub fn reroll<R: Rng>(&mut self, rng: &mut R) {
        *self = Environment::random(rng);
    }
}
