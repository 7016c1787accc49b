//! Global state machine.
//!
//! `GameOver` is terminal: every gameplay system is gated on `InGame`, so
//! entering it stops the simulation pipeline and despawns state-scoped
//! entities. There is no restart path within a session.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    GameOver,
}
