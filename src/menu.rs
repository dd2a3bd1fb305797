//! Main-menu buttons and hit-testing, in world coordinates.

use crate::entities::Hitbox;
use crate::tuning::WORLD_WIDTH;

pub const TITLE: &str = "ZOMBIE ISLAND";

const BUTTON_WIDTH: f64 = 240.0;
const BUTTON_HEIGHT: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    ToggleAudio,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuButton {
    pub action: MenuAction,
    pub rect: Hitbox,
}

impl MenuButton {
    fn at(action: MenuAction, top: f64) -> Self {
        MenuButton {
            action,
            rect: Hitbox {
                x: WORLD_WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
                y: top,
                w: BUTTON_WIDTH,
                h: BUTTON_HEIGHT,
            },
        }
    }

    pub fn label(&self, audio_enabled: bool) -> String {
        match self.action {
            MenuAction::Start => "Start Game".to_string(),
            MenuAction::ToggleAudio => {
                format!("Audio: {}", if audio_enabled { "ON" } else { "OFF" })
            }
            MenuAction::Exit => "Exit".to_string(),
        }
    }

    pub fn is_clicked(&self, x: f64, y: f64) -> bool {
        self.rect.contains(x, y)
    }
}

/// Buttons top to bottom.
pub fn buttons() -> [MenuButton; 3] {
    [
        MenuButton::at(MenuAction::Start, 220.0),
        MenuButton::at(MenuAction::ToggleAudio, 290.0),
        MenuButton::at(MenuAction::Exit, 360.0),
    ]
}

/// The button under `(x, y)`, if any.
pub fn button_at(x: f64, y: f64) -> Option<MenuAction> {
    buttons()
        .into_iter()
        .find(|b| b.is_clicked(x, y))
        .map(|b| b.action)
}
