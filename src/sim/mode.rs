//! Game mode state machine
//!
//! Modes and the actions that move between them. Transitions that need a
//! full run reset say so via [`Transition::StartRun`]; the tick applies it.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, no run yet
    #[default]
    Menu,
    /// Resuming from pause
    Countdown,
    /// Active gameplay
    Playing,
    Paused,
    /// Run ended by a crash
    GameOver,
}

/// Logical player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Start from the menu / restart after game over
    Confirm,
    /// Pause, or resume into the countdown
    Cancel,
    MoveLeft,
    MoveRight,
    Jump,
}

/// What an action does in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Action ignored
    Ignore,
    /// Reset everything and start playing
    StartRun,
    /// Enter the countdown with a fresh timer
    BeginCountdown,
    /// Plain mode change
    Enter(GameMode),
    /// Player control, only while playing
    Control(Action),
}

impl GameMode {
    /// Exhaustive input table
    pub fn on_action(self, action: Action) -> Transition {
        use Action::*;
        use GameMode::*;

        match (self, action) {
            (Menu, Confirm) => Transition::StartRun,
            (Menu, Cancel | MoveLeft | MoveRight | Jump) => Transition::Ignore,

            (Playing, Cancel) => Transition::Enter(Paused),
            (Playing, MoveLeft | MoveRight | Jump) => Transition::Control(action),
            (Playing, Confirm) => Transition::Ignore,

            (Paused, Cancel) => Transition::BeginCountdown,
            (Paused, Confirm | MoveLeft | MoveRight | Jump) => Transition::Ignore,

            (Countdown, _) => Transition::Ignore,

            (GameOver, Confirm) => Transition::StartRun,
            (GameOver, Cancel | MoveLeft | MoveRight | Jump) => Transition::Ignore,
        }
    }

    /// Modes in which a run exists and the world is shown
    pub fn in_run(self) -> bool {
        !matches!(self, GameMode::Menu)
    }

    /// Modes in which the simulation clock does any work
    pub fn is_ticking(self) -> bool {
        matches!(self, GameMode::Playing | GameMode::Countdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [Action; 5] = [
        Action::Confirm,
        Action::Cancel,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
    ];

    #[test]
    fn test_menu_only_accepts_confirm() {
        for action in ACTIONS {
            let expected = if action == Action::Confirm {
                Transition::StartRun
            } else {
                Transition::Ignore
            };
            assert_eq!(GameMode::Menu.on_action(action), expected);
        }
    }

    #[test]
    fn test_pause_cycle() {
        assert_eq!(
            GameMode::Playing.on_action(Action::Cancel),
            Transition::Enter(GameMode::Paused)
        );
        assert_eq!(GameMode::Paused.on_action(Action::Cancel), Transition::BeginCountdown);
        assert_eq!(GameMode::Countdown.on_action(Action::Cancel), Transition::Ignore);
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        assert_eq!(GameMode::Playing.on_action(Action::Confirm), Transition::Ignore);
        assert_eq!(GameMode::Paused.on_action(Action::Confirm), Transition::Ignore);
    }

    #[test]
    fn test_controls_only_while_playing() {
        for mode in [
            GameMode::Menu,
            GameMode::Countdown,
            GameMode::Paused,
            GameMode::GameOver,
        ] {
            for action in [Action::MoveLeft, Action::MoveRight, Action::Jump] {
                assert_eq!(mode.on_action(action), Transition::Ignore, "{mode:?} {action:?}");
            }
        }
        assert_eq!(
            GameMode::Playing.on_action(Action::Jump),
            Transition::Control(Action::Jump)
        );
    }

    #[test]
    fn test_restart_from_game_over() {
        assert_eq!(GameMode::GameOver.on_action(Action::Confirm), Transition::StartRun);
        assert_eq!(GameMode::GameOver.on_action(Action::Cancel), Transition::Ignore);
    }
}
