//! Externally driven player
//!
//! `ChannelPlayer` forwards every decision to whoever holds the matching
//! `ChannelHandle`: a console loop, a web-socket session, a test harness.
//! Prompts are plain serde values so a transport can encode them as it likes.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::GameError;
use crate::player::Player;
use crate::situation::{MissionResult, Situation};

const PICK_MESSAGE: &str = "Pick a card";

/// Message sent to the external side
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msgType", rename_all = "camelCase")]
pub enum Prompt {
    /// A card is wanted; `message` carries a warning after an illegal pick
    Situation {
        situation: Situation,
        message: String,
    },
    /// The round has been resolved
    Result {
        situation: Situation,
        result: MissionResult,
    },
}

/// The external end of a `ChannelPlayer`
pub struct ChannelHandle {
    pub prompts: Receiver<Prompt>,
    pub picks: Sender<Card>,
}

/// A player whose picks arrive over a channel. `pick` blocks until the
/// external side answers.
pub struct ChannelPlayer {
    name: String,
    prompts: Sender<Prompt>,
    picks: Receiver<Card>,
    warning: Option<String>,
}

/// Create a connected player/handle pair
pub fn channel_player(name: impl Into<String>) -> (ChannelPlayer, ChannelHandle) {
    let (prompt_tx, prompt_rx) = mpsc::channel();
    let (pick_tx, pick_rx) = mpsc::channel();
    let player = ChannelPlayer {
        name: name.into(),
        prompts: prompt_tx,
        picks: pick_rx,
        warning: None,
    };
    let handle = ChannelHandle {
        prompts: prompt_rx,
        picks: pick_tx,
    };
    (player, handle)
}

impl ChannelPlayer {
    fn unavailable(&self) -> GameError {
        GameError::PlayerUnavailable {
            name: self.name.clone(),
        }
    }
}

impl Player for ChannelPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        let message = self
            .warning
            .take()
            .unwrap_or_else(|| PICK_MESSAGE.to_string());
        self.prompts
            .send(Prompt::Situation {
                situation: situation.clone(),
                message,
            })
            .map_err(|_| self.unavailable())?;
        self.picks.recv().map_err(|_| self.unavailable())
    }

    fn receive(&mut self, situation: &Situation, result: &MissionResult) {
        let sent = self.prompts.send(Prompt::Result {
            situation: situation.clone(),
            result: *result,
        });
        if sent.is_err() {
            tracing::debug!(player = %self.name, "result dropped, external side has gone away");
        }
    }

    fn warn_illegal_pick(&mut self, _situation: &Situation, card: Card) -> bool {
        self.warning = Some(format!("{} is not a valid card", card));
        true
    }
}
