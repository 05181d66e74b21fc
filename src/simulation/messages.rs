use crate::error::CommandError;
use bevy::prelude::*;
use std::str::FromStr;

/// The cab controls offered on the menu, in menu order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddCoal,
    AddWater,
    LightFire,
    ExtinguishFire,
    OpenThrottle,
    ApplyBrake,
    Wait,
    Quit,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::AddCoal,
        Command::AddWater,
        Command::LightFire,
        Command::ExtinguishFire,
        Command::OpenThrottle,
        Command::ApplyBrake,
        Command::Wait,
        Command::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Command::AddCoal => "Add coal",
            Command::AddWater => "Add water",
            Command::LightFire => "Light fire",
            Command::ExtinguishFire => "Extinguish fire",
            Command::OpenThrottle => "Open throttle",
            Command::ApplyBrake => "Apply brake",
            Command::Wait => "Wait",
            Command::Quit => "Quit",
        }
    }

    /// One-based position on the menu.
    pub fn key(&self) -> usize {
        *self as usize + 1
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(Command::Quit);
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(|key| key.checked_sub(1))
            .and_then(|index| Command::ALL.get(index).copied())
            .ok_or_else(|| CommandError::Unknown(input.to_string()))
    }
}

#[derive(Message, Copy, Clone, Debug)]
pub struct PlayerCommand(pub Command);

/// The player's answer to the junction prompt.
#[derive(Message, Copy, Clone, Debug)]
pub struct JunctionDecision {
    pub stop: bool,
}

impl JunctionDecision {
    /// Only an explicit "yes" stops the train.
    pub fn from_answer(answer: &str) -> Self {
        JunctionDecision {
            stop: answer.trim().eq_ignore_ascii_case("yes"),
        }
    }
}

pub struct MessagingPlugin;

impl Plugin for MessagingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerCommand>().add_message::<JunctionDecision>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_keys() {
        for command in Command::ALL {
            let parsed: Command = command.key().to_string().parse().unwrap();
            assert_eq!(parsed, command);
        }
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("Q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(" 5 \n".parse::<Command>(), Ok(Command::OpenThrottle));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "0", "9", "-1", "coal", "1 2", "quit"] {
            assert_eq!(
                input.parse::<Command>(),
                Err(CommandError::Unknown(input.trim().to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_junction_answer() {
        assert!(JunctionDecision::from_answer("yes").stop);
        assert!(JunctionDecision::from_answer("YES\n").stop);
        assert!(!JunctionDecision::from_answer("y").stop);
        assert!(!JunctionDecision::from_answer("no").stop);
        assert!(!JunctionDecision::from_answer("").stop);
    }
}
