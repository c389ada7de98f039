//! Skin application.
//!
//! Triggering [`ApplySkinEvent`] makes the skin currently selected in
//! [`SkinManager`](crate::resources::skins::SkinManager) the active one:
//! pad and frog art, life icon and music all follow it. Browsing the skin
//! list alone does not change what is on screen.
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ApplySkinEvent {}
