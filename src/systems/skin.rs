//! Making a skin the active one.
//!
//! [`apply_skin_observer`] reacts to [`ApplySkinEvent`] by pointing the pad
//! and every frog at the selected skin's textures, resizing them to the new
//! art, and switching the music track. Pad rescaling itself happens in
//! [`sync_pad_geometry`] so that level changes and skin changes share it.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::{Color, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::Frog;
use crate::components::mapposition::MapPosition;
use crate::components::pad::Pad;
use crate::components::sprite::{FallbackShape, Sprite};
use crate::events::audio::AudioCmd;
use crate::events::skin::ApplySkinEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::session::Session;
use crate::resources::skins::{SkinDef, SkinManager, SkinPart};
use crate::resources::texturestore::TextureStore;
use crate::systems::audio::music_commands;

pub const FALLBACK_FROG_SIZE: Vector2 = Vector2 { x: 40.0, y: 40.0 };
pub const FALLBACK_PAD_SIZE: Vector2 = Vector2 { x: 120.0, y: 24.0 };
pub const FALLBACK_LIFE_SIZE: Vector2 = Vector2 { x: 24.0, y: 24.0 };

pub const SKY_BLUE: Color = Color::new(140, 180, 220, 255);
pub const FROG_GREEN: Color = Color::new(0, 200, 0, 255);
pub const PAD_GREEN: Color = Color::new(40, 140, 60, 255);
pub const LIFE_GREEN: Color = Color::new(0, 180, 0, 255);

/// Texture keys and on-screen sizes of a skin's frog and pad.
///
/// Sizes come from the loaded textures. A skin whose art is missing gets
/// the procedural sizes (40x40 frog, 120x24 pad).
#[derive(Debug, Clone, PartialEq)]
pub struct SkinLook {
    pub frog_key: String,
    pub frog_size: Vector2,
    pub pad_key: String,
    pub pad_size: Vector2,
}

impl SkinLook {
    pub fn of(skin: &SkinDef, textures: &TextureStore) -> Self {
        let frog_key = skin.texture_key(SkinPart::Frog);
        let pad_key = skin.texture_key(SkinPart::Pad);
        Self {
            frog_size: texture_size(textures, &frog_key).unwrap_or(FALLBACK_FROG_SIZE),
            pad_size: texture_size(textures, &pad_key).unwrap_or(FALLBACK_PAD_SIZE),
            frog_key,
            pad_key,
        }
    }

    pub fn frog_sprite(&self) -> Sprite {
        Sprite::new(
            self.frog_key.clone(),
            self.frog_size,
            FallbackShape::Circle(FROG_GREEN),
        )
    }

    pub fn pad_sprite(&self, size: Vector2) -> Sprite {
        Sprite::new(self.pad_key.clone(), size, FallbackShape::Ellipse(PAD_GREEN))
    }
}

/// Size of the texture stored under `key`, if it is loaded.
pub fn texture_size(textures: &TextureStore, key: &str) -> Option<Vector2> {
    textures.get(key).map(|tex| Vector2 {
        x: tex.width as f32,
        y: tex.height as f32,
    })
}

/// Activate the skin currently selected in [`SkinManager`].
///
/// - records it as the session's active skin
/// - swaps pad art (size follows via [`sync_pad_geometry`])
/// - swaps frog art, keeping each frog's centre
/// - moves music to the skin's track, or the global one
pub fn apply_skin_observer(
    _trigger: On<ApplySkinEvent>,
    skins: Res<SkinManager>,
    textures: Res<TextureStore>,
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut pads: Query<(&mut Pad, &mut Sprite), Without<Frog>>,
    mut frogs: Query<(&mut MapPosition, &mut Sprite, &mut BoxCollider), (With<Frog>, Without<Pad>)>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    let index = skins.index();
    let skin = skins.current();
    let look = SkinLook::of(skin, &textures);
    session.active_skin = index;

    for (mut pad, mut sprite) in pads.iter_mut() {
        pad.base_size = look.pad_size;
        sprite.tex_key = look.pad_key.clone();
    }

    for (mut position, mut sprite, mut collider) in frogs.iter_mut() {
        let center = position.center(sprite.size());
        sprite.tex_key = look.frog_key.clone();
        sprite.set_size(look.frog_size);
        collider.size = look.frog_size;
        *position = MapPosition::from_center(center, look.frog_size);
    }

    let target = skins
        .music_for(index)
        .map(|p| p.to_string_lossy().into_owned());
    let cmds = music_commands(
        session.current_music.as_deref(),
        target.as_deref(),
        session.muted,
        config.volume,
    );
    session.current_music = target;
    audio_cmd_writer.write_batch(cmds);

    info!("Applied skin '{}'", skin.name);
}

/// Resize pads whose base size or scale changed. The bottom-centre stays
/// where it was.
pub fn sync_pad_geometry(
    mut pads: Query<(&Pad, &mut MapPosition, &mut Sprite, &mut BoxCollider), Changed<Pad>>,
) {
    for (pad, mut position, mut sprite, mut collider) in pads.iter_mut() {
        let size = pad.scaled_size();
        if sprite.size() == size && collider.size == size {
            continue;
        }
        let anchor = position.midbottom(collider.size);
        sprite.set_size(size);
        collider.size = size;
        *position = MapPosition::from_midbottom(anchor, size);
    }
}
