use crate::config::BoilerConfig;
use crate::error::Refusal;
use crate::simulation::Ending;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoilerEvent {
    /// The last coal burned away and the fire died on its own.
    FireWentOut,
    Exploded,
    /// No coal anywhere and no fire: the engine can never make steam again.
    Stranded,
}

impl BoilerEvent {
    /// The way the game ends, if this event ends it.
    pub fn ending(&self) -> Option<Ending> {
        match self {
            BoilerEvent::FireWentOut => None,
            BoilerEvent::Exploded => Some(Ending::Exploded),
            BoilerEvent::Stranded => Some(Ending::Stranded),
        }
    }
}

impl fmt::Display for BoilerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoilerEvent::FireWentOut => write!(f, "The fire has gone out because the firebox is empty!"),
            BoilerEvent::Exploded => write!(f, "BOOM! The boiler exploded due to no water."),
            BoilerEvent::Stranded => write!(f, "No coal left at all. The train grinds to a halt."),
        }
    }
}

/// Firebox, boiler drum and tender of the locomotive.
///
/// All quantities are whole units; pressure is in psi. Once `is_running` drops to false the
/// boiler is dead and `update` does nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Boiler {
    config: BoilerConfig,
    pub(super) water_level: u32,
    pub(super) coal_in_fire: u32,
    pub(super) tender_coal: u32,
    pub(super) tender_water: u32,
    pub(super) pressure: u32,
    pub(super) fire_lit: bool,
    pub(super) is_running: bool,
}

impl Default for Boiler {
    fn default() -> Self {
        Boiler::new(BoilerConfig::default())
    }
}

impl Boiler {
    pub fn new(config: BoilerConfig) -> Self {
        Boiler {
            config,
            water_level: config.initial_water.min(config.water_capacity),
            coal_in_fire: 0,
            tender_coal: config.tender_coal,
            tender_water: config.tender_water,
            pressure: 0,
            fire_lit: false,
            is_running: true,
        }
    }

    pub fn light_fire(&mut self) -> Result<(), Refusal> {
        if self.fire_lit {
            return Err(Refusal::FireAlreadyLit);
        }
        if self.coal_in_fire == 0 {
            return Err(Refusal::FireboxEmpty);
        }
        self.fire_lit = true;
        Ok(())
    }

    pub fn extinguish_fire(&mut self) -> Result<(), Refusal> {
        if !self.fire_lit {
            return Err(Refusal::FireAlreadyOut);
        }
        self.fire_lit = false;
        Ok(())
    }

    /// Moves `amount` coal from the tender into the firebox, all or nothing.
    pub fn add_coal(&mut self, amount: u32) -> Result<u32, Refusal> {
        if self.tender_coal < amount {
            return Err(Refusal::TenderCoalShort);
        }
        self.tender_coal -= amount;
        self.coal_in_fire += amount;
        Ok(amount)
    }

    /// One shovelful, the amount a player moves per turn.
    pub fn shovel_coal(&mut self) -> Result<u32, Refusal> {
        self.add_coal(self.config.shovel_amount)
    }

    /// Tops the boiler up by one measure from the tender.
    ///
    /// A nearly empty tender still delivers a full measure; the tender just bottoms out at zero.
    pub fn add_water(&mut self) -> Result<u32, Refusal> {
        if !self.is_running {
            return Err(Refusal::BoilerStopped);
        }
        if self.tender_water == 0 {
            return Err(Refusal::TenderWaterEmpty);
        }
        let amount = self.config.water_amount;
        if self.water_level + amount > self.config.water_capacity {
            return Err(Refusal::BoilerFull);
        }
        self.water_level += amount;
        self.tender_water = self.tender_water.saturating_sub(amount);
        Ok(amount)
    }

    /// Advances the boiler by one turn and reports what happened.
    ///
    /// `_train_speed` is accepted for callers but has no effect yet: steam and water
    /// consumption do not depend on how fast the train is going.
    pub fn update(&mut self, _train_speed: u32) -> Vec<BoilerEvent> {
        let mut events = Vec::new();
        if !self.is_running {
            return events;
        }

        let mut burned = false;
        if self.fire_lit {
            if self.coal_in_fire > 0 {
                burned = true;
                self.coal_in_fire = self.coal_in_fire.saturating_sub(self.config.burn_rate);
                self.pressure = (self.pressure + self.config.pressure_gain)
                    .saturating_sub(self.config.pressure_loss)
                    .min(self.config.max_pressure);
                self.water_level = self.water_level.saturating_sub(self.config.steam_water_use);
            } else {
                self.fire_lit = false;
                events.push(BoilerEvent::FireWentOut);
            }
        }

        // a fire that burned this turn over a dry boiler, even if it took the last lump
        if burned && self.water_level == 0 {
            self.is_running = false;
            events.push(BoilerEvent::Exploded);
        }

        if self.tender_coal == 0 && self.coal_in_fire == 0 && !self.fire_lit {
            self.is_running = false;
            events.push(BoilerEvent::Stranded);
        }

        events
    }

    /// Spends steam on the cylinders. Never takes pressure below zero.
    pub(super) fn draw_steam(&mut self, amount: u32) {
        self.pressure = self.pressure.saturating_sub(amount);
    }

    pub fn water_level(&self) -> u32 {
        self.water_level
    }

    pub fn water_capacity(&self) -> u32 {
        self.config.water_capacity
    }

    pub fn coal_in_fire(&self) -> u32 {
        self.coal_in_fire
    }

    pub fn tender_coal(&self) -> u32 {
        self.tender_coal
    }

    pub fn tender_water(&self) -> u32 {
        self.tender_water
    }

    pub fn pressure(&self) -> u32 {
        self.pressure
    }

    pub fn fire_lit(&self) -> bool {
        self.fire_lit
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.is_running
    }
}
