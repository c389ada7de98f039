//! Event types and observers used by the game.
//!
//! Events decouple the systems that notice something (a key press, a frog
//! in the water, a new level) from the code that reacts to it.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transitions and their enter hooks
//! - [`input`] – key presses mapped to logical actions, typed characters
//! - [`level`] – the score crossed into another level
//! - [`skin`] – make the selected skin the active one
//! - [`splash`] – a frog fell into the water
//! - [`switchdebug`] – toggle the debug overlay
//! - [`switchfullscreen`] – toggle fullscreen
pub mod audio;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod skin;
pub mod splash;
pub mod switchdebug;
pub mod switchfullscreen;
