use crate::AddressSpace;
use crate::constants::OAM_BEGIN;

/// Number of sprite entries in the attribute table.
pub const SPRITE_COUNT: u16 = 40;

bitflags! {
    /// Attribute byte of an OAM entry.
    #[derive(Copy, Clone, Default, Debug)]
    pub struct SpriteAttributes: u8 {
        const PALETTE  = 0b0001_0000; // OBP1 instead of OBP0
        const FLIP_X   = 0b0010_0000; // Mirror horizontally
        const FLIP_Y   = 0b0100_0000; // Mirror vertically
        const PRIORITY = 0b1000_0000; // Background colors 1-3 draw over the sprite
    }
}

/// View over one 4-byte OAM entry.
///
/// The stored position is offset by (8, 16) so sprites can slide in from
/// the screen edges; `screen_x`/`screen_y` give the top-left corner in
/// framebuffer coordinates.
#[derive(Copy, Clone, Default, Debug)]
pub struct Sprite {
    pub y: u8,
    pub x: u8,
    pub tile: u8,
    pub attributes: SpriteAttributes,
}

impl Sprite {
    /// Reads the sprite with the given index (0..40) from OAM.
    pub fn read(bus: &dyn AddressSpace, index: u16) -> Self {
        let base = OAM_BEGIN + index * 4;
        Self {
            y: bus.read(base),
            x: bus.read(base + 1),
            tile: bus.read(base + 2),
            attributes: SpriteAttributes::from_bits_truncate(bus.read(base + 3)),
        }
    }

    #[inline]
    pub const fn screen_x(&self) -> i32 {
        self.x as i32 - 8
    }

    #[inline]
    pub const fn screen_y(&self) -> i32 {
        self.y as i32 - 16
    }

    /// Entries parked at (0, 0) are the idiom for "unused".
    #[inline]
    pub const fn is_hidden(&self) -> bool {
        self.y == 0 && self.x == 0
    }
}
