use thiserror::Error;

/// A player action the locomotive refused. Nothing changes when one of these is returned;
/// the message is shown to the player as is.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Refusal {
    #[error("You need coal in the firebox to light it.")]
    FireboxEmpty,
    #[error("The fire is already burning.")]
    FireAlreadyLit,
    #[error("The fire is already out.")]
    FireAlreadyOut,
    #[error("Not enough coal in the tender!")]
    TenderCoalShort,
    #[error("No water left in the tender!")]
    TenderWaterEmpty,
    #[error("Unable to add more water.")]
    BoilerFull,
    #[error("The boiler has stopped for good.")]
    BoilerStopped,
    #[error("The fire is out! You need to relight it before moving.")]
    FireOut,
    #[error("Not enough pressure to move!")]
    InsufficientPressure,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid option.")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
