//! Game modes and the actions each one accepts.
//!
//! Actions are typed per mode, so a mode can only ever be handed the
//! actions it knows how to resolve.

use crate::dungeon::Direction;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Start,
    Combat,
    Peace,
    GameOver,
    Inventory,
    Map,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Start => "start",
            Mode::Combat => "combat",
            Mode::Peace => "peace",
            Mode::GameOver => "gameOver",
            Mode::Inventory => "inventory",
            Mode::Map => "map",
        }
    }

    /// The legal actions, as shown to the player.
    pub fn options(&self) -> &'static str {
        match self {
            Mode::Start => "(N)ew game, (L)oad game",
            Mode::Combat => "(A)ttack, (D)efend, (R)un",
            Mode::Peace => "(C)ontinue, (R)est, (I)nventory, (S)ave",
            Mode::GameOver => "(R)estart, (Q)uit",
            Mode::Inventory => "(E)quip, (U)se, (P)rev, (N)ext, (F)ilter, (C)lose",
            Mode::Map => "(N)orth, (S)outh, (E)ast, (W)est, (U)p, (D)own, (B)ack",
        }
    }

    /// Parses one input line for this mode. Only the first character counts,
    /// case-insensitively; anything unrecognised is `None`.
    pub fn parse(&self, input: &str) -> Option<Action> {
        let key = input.trim().chars().next()?.to_ascii_uppercase();
        let action = match self {
            Mode::Start => Action::Start(match key {
                'N' => StartAction::NewGame,
                'L' => StartAction::Load,
                _ => return None,
            }),
            Mode::Combat => Action::Combat(match key {
                'A' => CombatAction::Attack,
                'D' => CombatAction::Defend,
                'R' => CombatAction::Run,
                _ => return None,
            }),
            Mode::Peace => Action::Peace(match key {
                'C' => PeaceAction::Continue,
                'R' => PeaceAction::Rest,
                'I' => PeaceAction::Inventory,
                'S' => PeaceAction::Save,
                _ => return None,
            }),
            Mode::GameOver => Action::GameOver(match key {
                'R' => GameOverAction::Restart,
                'Q' => GameOverAction::Quit,
                _ => return None,
            }),
            Mode::Inventory => Action::Inventory(match key {
                'E' => InventoryAction::Equip,
                'U' => InventoryAction::Use,
                'P' => InventoryAction::Previous,
                'N' => InventoryAction::Next,
                'F' => InventoryAction::Filter,
                'C' => InventoryAction::Close,
                _ => return None,
            }),
            Mode::Map => Action::Map(match key {
                'B' => MapAction::Back,
                other => MapAction::Move(Direction::from_key(other)?),
            }),
        };
        Some(action)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start(StartAction),
    Combat(CombatAction),
    Peace(PeaceAction),
    GameOver(GameOverAction),
    Inventory(InventoryAction),
    Map(MapAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    NewGame,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Defend,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeaceAction {
    Continue,
    Rest,
    Inventory,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverAction {
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAction {
    Equip,
    Use,
    Previous,
    Next,
    Filter,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAction {
    Back,
    Move(Direction),
}

/// An inline question waiting for its answer on the next input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    PlayerName,
    ExitDungeon,
    AfterSave,
    ItemNumber(ItemCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCommand {
    Equip,
    Use,
}

impl Prompt {
    pub fn question(&self) -> &'static str {
        match self {
            Prompt::PlayerName => "What is your name?",
            Prompt::ExitDungeon => "Leave the dungeon? (Y)es, (N)o",
            Prompt::AfterSave => "(C)ontinue or (Q)uit?",
            Prompt::ItemNumber(ItemCommand::Equip) => "Equip which item? (blank to cancel)",
            Prompt::ItemNumber(ItemCommand::Use) => "Use which item? (blank to cancel)",
        }
    }
}
