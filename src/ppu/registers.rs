/// The two 32x32 tile maps in VRAM.
pub const TILE_MAP_LOW: u16 = 0x9800;
pub const TILE_MAP_HIGH: u16 = 0x9C00;

/// Unsigned tile ids count up from here; 16 bytes per tile.
pub const TILE_DATA_UNSIGNED: u16 = 0x8000;

/// In the signed addressing mode tile ids are offsets around this base,
/// so ids 128..=255 reach down into 0x8800-0x8FFF.
pub const TILE_DATA_SIGNED: u16 = 0x9000;

/// Bytes per 8x8 tile, two bitplane bytes per pixel row.
pub const TILE_BYTES: u16 = 16;

bitflags! {
    /// LCDC at 0xFF40, the master display control. Each bit independently
    /// gates one feature of the frame composition.
    #[derive(Copy, Clone, Default)]
    pub struct LCDControl: u8 {
        const BG_ON           = 1 << 0;
        const SPRITES_ON      = 1 << 1;
        const TALL_SPRITES    = 1 << 2; // 8x16 instead of 8x8
        const BG_MAP_HIGH     = 1 << 3;
        const UNSIGNED_TILES  = 1 << 4;
        const WINDOW_ON       = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const LCD_ON          = 1 << 7;
    }

    /// STAT at 0xFF41, minus the two mode bits which the scanline engine
    /// maintains itself and mirrors in. Bits 3-6 choose which events
    /// raise the LCD STAT interrupt.
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct StatRegister: u8 {
        const COINCIDENCE        = 1 << 2; // LY == LYC right now
        const HBLANK_SELECT      = 1 << 3;
        const VBLANK_SELECT      = 1 << 4;
        const OAM_SELECT         = 1 << 5;
        const COINCIDENCE_SELECT = 1 << 6;
    }
}

impl LCDControl {
    /// Base address of the tile map the background layer reads.
    pub fn background_map(self) -> u16 {
        match self.contains(LCDControl::BG_MAP_HIGH) {
            true => TILE_MAP_HIGH,
            false => TILE_MAP_LOW,
        }
    }

    /// Resolves a background map entry to the first byte of its tile data,
    /// honoring the selected addressing mode.
    pub fn tile_address(self, id: u8) -> u16 {
        match self.contains(LCDControl::UNSIGNED_TILES) {
            true => TILE_DATA_UNSIGNED + u16::from(id) * TILE_BYTES,
            false => TILE_DATA_SIGNED.wrapping_add_signed(i16::from(id as i8) * TILE_BYTES as i16),
        }
    }

    /// Sprite height in pixel rows for the current OBJ size.
    pub fn sprite_rows(self) -> u8 {
        match self.contains(LCDControl::TALL_SPRITES) {
            true => 16,
            false => 8,
        }
    }
}

/// Phase of the scanline engine, exposed through STAT bits 1..0.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PPUMode {
    #[default]
    HBlank,
    VBlank,
    OamScan,
    PixelTransfer,
}

impl PPUMode {
    /// The value this mode occupies in the low two STAT bits.
    pub const fn stat_bits(self) -> u8 {
        match self {
            PPUMode::HBlank => 0b00,
            PPUMode::VBlank => 0b01,
            PPUMode::OamScan => 0b10,
            PPUMode::PixelTransfer => 0b11,
        }
    }

    /// The STAT bit that, when selected, raises the LCD interrupt as this
    /// mode begins. Pixel transfer has no select bit.
    pub fn interrupt_select(self) -> Option<StatRegister> {
        match self {
            PPUMode::HBlank => Some(StatRegister::HBLANK_SELECT),
            PPUMode::VBlank => Some(StatRegister::VBLANK_SELECT),
            PPUMode::OamScan => Some(StatRegister::OAM_SELECT),
            PPUMode::PixelTransfer => None,
        }
    }
}
