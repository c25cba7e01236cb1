//! Flappy Bird for the terminal.
//!
//! [`session::Session`] is the whole game: it owns the bird, the pipes, the
//! ground, the score and the overlays, and advances them one fixed tick at a
//! time. Sound, input and drawing are collaborators handed to it from outside
//! ([`audio`], [`input`], [`render`]).

pub mod audio;
pub mod bird;
pub mod config;
pub mod entity;
pub mod geom;
pub mod ground;
pub mod input;
pub mod overlay;
pub mod pipe;
pub mod render;
pub mod score;
pub mod session;

pub use audio::{Audio, Cue};
pub use entity::{Entity, Visual};
pub use input::InputEvent;
pub use session::{Flow, Session, State};
