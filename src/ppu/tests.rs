use crate::bus::Bus;
use crate::constants::*;
use crate::interrupt::InterruptRegister;
use crate::ppu::palette::{Palette, Shade};
use crate::ppu::registers::{LCDControl, PPUMode, StatRegister};
use crate::ppu::{DOTS_PER_SCANLINE, PPU, tile_row};
use crate::{AddressSpace, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Identity palette: every pixel value maps to its own shade.
const IDENTITY_PALETTE: u8 = 0b1110_0100;

fn lcd_on() -> (PPU, Bus) {
    let mut bus = Bus::default();
    bus.write(PPU_LCDC, 0b1001_0001); // LCD on, BG on, unsigned tile data
    bus.write(PPU_BGP, IDENTITY_PALETTE);
    (PPU::default(), bus)
}

fn stat_mode(bus: &Bus) -> u8 {
    bus.read(PPU_STAT) & 0b11
}

#[test]
fn test_palette_slot_lookup() {
    // Slots 0..=3 hold the shades 3, 2, 1, 0
    let palette = Palette::new(0b0001_1011);
    assert_eq!(palette.bits(), 0b0001_1011);

    assert_eq!(palette.shade(0), Shade::Darkest);
    assert_eq!(palette.shade(1), Shade::Dark);
    assert_eq!(palette.shade(2), Shade::Light);
    assert_eq!(palette.shade(3), Shade::Lightest);

    // Pixel values only have two bits, higher bits are ignored
    assert_eq!(palette.shade(0b111), palette.shade(0b11));
}

#[test]
fn test_post_boot_background_palette() {
    // 0xFC maps value 0 to the lightest shade and everything else dark
    let palette = Palette::new(0xFC);
    assert_eq!(palette.shade(0), Shade::Lightest);
    assert_eq!(palette.shade(1), Shade::Darkest);
    assert_eq!(palette.shade(2), Shade::Darkest);
    assert_eq!(palette.shade(3), Shade::Darkest);
}

#[test]
fn test_background_map_selection() {
    assert_eq!(LCDControl::empty().background_map(), 0x9800);
    assert_eq!(LCDControl::BG_MAP_HIGH.background_map(), 0x9C00);

    assert_eq!(LCDControl::empty().sprite_rows(), 8);
    assert_eq!(LCDControl::TALL_SPRITES.sprite_rows(), 16);
}

#[test]
fn test_tile_data_addressing_modes() {
    let unsigned = LCDControl::UNSIGNED_TILES;
    assert_eq!(unsigned.tile_address(0), 0x8000);
    assert_eq!(unsigned.tile_address(0xFF), 0x8FF0);

    let signed = LCDControl::empty();
    assert_eq!(signed.tile_address(0), 0x9000);
    assert_eq!(signed.tile_address(1), 0x9010);
    assert_eq!(signed.tile_address(0x80), 0x8800); // -128
    assert_eq!(signed.tile_address(0xFF), 0x8FF0); // -1
}

#[test]
fn test_mode_stat_encoding() {
    assert_eq!(PPUMode::HBlank.stat_bits(), 0b00);
    assert_eq!(PPUMode::VBlank.stat_bits(), 0b01);
    assert_eq!(PPUMode::OamScan.stat_bits(), 0b10);
    assert_eq!(PPUMode::PixelTransfer.stat_bits(), 0b11);

    assert_eq!(
        PPUMode::HBlank.interrupt_select(),
        Some(StatRegister::HBLANK_SELECT)
    );
    assert_eq!(
        PPUMode::VBlank.interrupt_select(),
        Some(StatRegister::VBLANK_SELECT)
    );
    assert_eq!(PPUMode::OamScan.interrupt_select(), Some(StatRegister::OAM_SELECT));
    assert_eq!(PPUMode::PixelTransfer.interrupt_select(), None);
}

#[test]
fn test_tile_row_decode() {
    let mut bus = Bus::default();
    // Low plane 0b1100_0110, high plane 0b0101_0101
    bus.write(0x8000, 0b1100_0110);
    bus.write(0x8001, 0b0101_0101);

    let values = tile_row(&bus, 0x8000, 0);
    assert_eq!(values, [1, 3, 0, 2, 0, 3, 1, 2]);
}

#[test]
fn test_scanline_advance() {
    let (mut ppu, mut bus) = lcd_on();

    ppu.step(&mut bus, DOTS_PER_SCANLINE - 1);
    assert_eq!(bus.read(PPU_LY), 0);

    ppu.step(&mut bus, 1);
    assert_eq!(bus.read(PPU_LY), 1);
}

#[test]
fn test_vblank_interrupt_at_line_144() {
    let (mut ppu, mut bus) = lcd_on();

    ppu.step(&mut bus, DOTS_PER_SCANLINE * 143);
    assert_eq!(bus.read(PPU_LY), 143);
    assert!(!bus.interrupt_flag.contains(InterruptRegister::VBLANK));

    ppu.step(&mut bus, DOTS_PER_SCANLINE);
    assert_eq!(bus.read(PPU_LY), 144);
    assert!(bus.interrupt_flag.contains(InterruptRegister::VBLANK));
    assert_eq!(stat_mode(&bus), PPUMode::VBlank.stat_bits());
}

#[test]
fn test_ly_wraps_after_153() {
    let (mut ppu, mut bus) = lcd_on();

    ppu.step(&mut bus, DOTS_PER_SCANLINE * 153);
    assert_eq!(bus.read(PPU_LY), 153);

    ppu.step(&mut bus, DOTS_PER_SCANLINE);
    assert_eq!(bus.read(PPU_LY), 0);
}

#[test]
fn test_lyc_coincidence() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_LYC, 0x01);
    bus.write(PPU_STAT, StatRegister::COINCIDENCE_SELECT.bits());

    ppu.step(&mut bus, DOTS_PER_SCANLINE);
    let flags = StatRegister::from_bits_truncate(bus.read(PPU_STAT));
    assert!(flags.contains(StatRegister::COINCIDENCE));
    assert!(bus.interrupt_flag.contains(InterruptRegister::STAT));

    bus.interrupt_flag.remove(InterruptRegister::STAT);
    ppu.step(&mut bus, DOTS_PER_SCANLINE);
    let flags = StatRegister::from_bits_truncate(bus.read(PPU_STAT));
    assert!(!flags.contains(StatRegister::COINCIDENCE), "LY moved past LYC");
    assert!(!bus.interrupt_flag.contains(InterruptRegister::STAT));
}

#[test]
fn test_mode_progression_within_scanline() {
    let (mut ppu, mut bus) = lcd_on();

    ppu.step(&mut bus, 1);
    assert_eq!(stat_mode(&bus), PPUMode::OamScan.stat_bits());

    ppu.step(&mut bus, 80);
    assert_eq!(stat_mode(&bus), PPUMode::PixelTransfer.stat_bits());

    ppu.step(&mut bus, 172);
    assert_eq!(stat_mode(&bus), PPUMode::HBlank.stat_bits());
}

#[test]
fn test_hblank_stat_interrupt() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_STAT, StatRegister::HBLANK_SELECT.bits());

    // Leave the reset mode first, then cross into HBlank
    ppu.step(&mut bus, 1);
    assert!(!bus.interrupt_flag.contains(InterruptRegister::STAT));
    ppu.step(&mut bus, 80 + 172 - 1);
    assert!(bus.interrupt_flag.contains(InterruptRegister::STAT));
}

#[test]
fn test_lcd_off_resets_scanline() {
    let (mut ppu, mut bus) = lcd_on();
    ppu.step(&mut bus, DOTS_PER_SCANLINE * 10);
    assert_eq!(bus.read(PPU_LY), 10);

    bus.write(PPU_LCDC, 0x00);
    ppu.step(&mut bus, 4);
    assert_eq!(bus.read(PPU_LY), 0);

    // No scanline progress while the screen is off
    ppu.step(&mut bus, DOTS_PER_SCANLINE * 4);
    assert_eq!(bus.read(PPU_LY), 0);
}

#[test]
fn test_background_composition() {
    let (mut ppu, mut bus) = lcd_on();
    // Tile 1: first row entirely pixel value 1
    bus.write(0x8010, 0xFF);
    bus.write(0x8011, 0x00);
    // Map slot 0 selects tile 1
    bus.write(0x9800, 0x01);

    ppu.compose_frame(&bus);

    let frame = ppu.frame();
    // First tile row shows the tile, the rest of the frame stays at shade 0
    assert_eq!(frame.pixels()[0], [0x88, 0xC0, 0x70, 0xFF]);
    assert_eq!(frame.pixels()[7], [0x88, 0xC0, 0x70, 0xFF]);
    assert_eq!(frame.pixels()[8], [0xE0, 0xF8, 0xD0, 0xFF]);
    assert_eq!(frame.pixels()[SCREEN_WIDTH as usize], [0xE0, 0xF8, 0xD0, 0xFF]);
}

#[test]
fn test_background_scroll_translation() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(0x8010, 0xFF);
    bus.write(0x8011, 0x00);
    // Tile 1 in the second slot of the second map row
    bus.write(0x9800 + 33, 0x01);
    bus.write(PPU_SCX, 8);
    bus.write(PPU_SCY, 8);

    ppu.compose_frame(&bus);

    // The scrolled tile lands at the frame origin
    assert_eq!(ppu.frame().pixels()[0], [0x88, 0xC0, 0x70, 0xFF]);
}

#[test]
fn test_background_palette_mapping() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(0x8010, 0xFF);
    bus.write(0x8011, 0x00);
    bus.write(0x9800, 0x01);
    // Map pixel value 1 to the darkest shade
    bus.write(PPU_BGP, 0b0000_1100);

    ppu.compose_frame(&bus);
    assert_eq!(ppu.frame().pixels()[0], [0x08, 0x18, 0x20, 0xFF]);
}

#[test]
fn test_sprite_composition_and_flip() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_LCDC, 0b1001_0011); // sprites on
    bus.write(PPU_OBP0, IDENTITY_PALETTE);
    // Tile 2: leftmost pixel of the first row is value 3
    bus.write(0x8020, 0x80);
    bus.write(0x8021, 0x80);
    // Sprite 0 at screen origin
    bus.write(OAM_BEGIN, 16); // y
    bus.write(OAM_BEGIN + 1, 8); // x
    bus.write(OAM_BEGIN + 2, 2); // tile
    bus.write(OAM_BEGIN + 3, 0);

    ppu.compose_frame(&bus);
    assert_eq!(ppu.frame().pixels()[0], [0x08, 0x18, 0x20, 0xFF]);
    // Sprite value 0 is transparent, the background shade shows through
    assert_eq!(ppu.frame().pixels()[1], [0xE0, 0xF8, 0xD0, 0xFF]);

    // Horizontal flip moves the pixel to the other edge
    bus.write(OAM_BEGIN + 3, 0b0010_0000);
    ppu.compose_frame(&bus);
    assert_eq!(ppu.frame().pixels()[0], [0xE0, 0xF8, 0xD0, 0xFF]);
    assert_eq!(ppu.frame().pixels()[7], [0x08, 0x18, 0x20, 0xFF]);
}

#[test]
fn test_sprite_priority_behind_background() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_LCDC, 0b1001_0011);
    bus.write(PPU_OBP0, IDENTITY_PALETTE);
    // Background tile 1 with value 1 in the first row
    bus.write(0x8010, 0xFF);
    bus.write(0x8011, 0x00);
    bus.write(0x9800, 0x01);
    // Sprite tile 2 with value 3 in the first pixel, priority bit set
    bus.write(0x8020, 0x80);
    bus.write(0x8021, 0x80);
    bus.write(OAM_BEGIN, 16);
    bus.write(OAM_BEGIN + 1, 8);
    bus.write(OAM_BEGIN + 2, 2);
    bus.write(OAM_BEGIN + 3, 0b1000_0000);

    ppu.compose_frame(&bus);
    // The nonzero background pixel wins
    assert_eq!(ppu.frame().pixels()[0], [0x88, 0xC0, 0x70, 0xFF]);
}

#[test]
fn test_hidden_sprites_are_skipped() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_LCDC, 0b1001_0011);
    bus.write(PPU_OBP0, IDENTITY_PALETTE);
    bus.write(0x8000, 0xFF);
    bus.write(0x8001, 0xFF);
    // Entry parked at (0, 0), tile would otherwise draw at (-8, -16)
    bus.write(OAM_BEGIN, 0);
    bus.write(OAM_BEGIN + 1, 0);
    bus.write(OAM_BEGIN + 2, 0);
    bus.write(OAM_BEGIN + 3, 0);

    ppu.compose_frame(&bus);
    for pixel in ppu.frame().pixels() {
        assert_eq!(*pixel, [0xE0, 0xF8, 0xD0, 0xFF]);
    }
}

#[test]
fn test_tall_sprite_mode() {
    let (mut ppu, mut bus) = lcd_on();
    bus.write(PPU_LCDC, 0b1001_0111); // 8x16 sprites
    bus.write(PPU_OBP0, IDENTITY_PALETTE);
    // Second tile of the pair: value 3 in its first row
    bus.write(0x8030, 0x80);
    bus.write(0x8031, 0x80);
    // Tile index 3 rounds down to the pair (2, 3)
    bus.write(OAM_BEGIN, 16);
    bus.write(OAM_BEGIN + 1, 8);
    bus.write(OAM_BEGIN + 2, 3);
    bus.write(OAM_BEGIN + 3, 0);

    ppu.compose_frame(&bus);
    // Row 8 of the sprite comes from the second tile
    assert_eq!(
        ppu.frame().pixels()[8 * SCREEN_WIDTH as usize],
        [0x08, 0x18, 0x20, 0xFF]
    );
}

#[test]
fn test_framebuffer_dimensions() {
    let ppu = PPU::default();
    let frame = ppu.frame();
    assert_eq!(frame.width(), SCREEN_WIDTH as usize);
    assert_eq!(frame.height(), SCREEN_HEIGHT as usize);
    assert_eq!(frame.pixels().len(), 160 * 144);
}
