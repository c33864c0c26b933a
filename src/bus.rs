use crate::constants::*;
use crate::interrupt::InterruptRegister;
use crate::joypad::Joypad;
use crate::timer::Timer;
use crate::{AddressSpace, EmulatorError};

/// Defines the global memory bus, all processing units access memory
/// through it. It owns every memory buffer of the system together with
/// the timer unit and the joypad register file.
///
/// Reads never fail: the whole u16 address space is covered and unmapped
/// areas fall back to documented defaults.
#[derive(Clone)]
pub struct Bus {
    rom0: [u8; ROM_BANK_SIZE],
    rom1: [u8; ROM_BANK_SIZE],
    vram: [u8; VRAM_SIZE],
    ext_ram: [u8; EXT_RAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    boot_rom: Option<[u8; BOOT_SIZE]>,
    pub is_boot_rom_active: bool,
    pub interrupt_enable: InterruptRegister,
    pub interrupt_flag: InterruptRegister,
    pub timer: Timer,
    pub joypad: Joypad,
}

impl Default for Bus {
    fn default() -> Self {
        Self {
            // A missing cartridge reads as all 1s on the data lines
            rom0: [UNDEFINED_READ; ROM_BANK_SIZE],
            rom1: [UNDEFINED_READ; ROM_BANK_SIZE],
            vram: [0u8; VRAM_SIZE],
            ext_ram: [0u8; EXT_RAM_SIZE],
            wram: [0u8; WRAM_SIZE],
            oam: [0u8; OAM_SIZE],
            io: [0u8; IO_SIZE],
            hram: [0u8; HRAM_SIZE],
            boot_rom: None,
            is_boot_rom_active: false,
            interrupt_enable: InterruptRegister::empty(),
            interrupt_flag: InterruptRegister::empty(),
            timer: Timer::default(),
            joypad: Joypad::default(),
        }
    }
}

impl Bus {
    /// Copies the first 16 KiB of the given image into ROM bank 0 and the
    /// next up to 16 KiB into ROM bank 1. Anything beyond the flat 32 KiB
    /// would belong to a bank controller and is discarded.
    pub fn load_rom(&mut self, bytes: &[u8]) {
        let low = bytes.len().min(ROM_BANK_SIZE);
        self.rom0[..low].copy_from_slice(&bytes[..low]);

        if bytes.len() > ROM_BANK_SIZE {
            let high = (bytes.len() - ROM_BANK_SIZE).min(ROM_BANK_SIZE);
            self.rom1[..high].copy_from_slice(&bytes[ROM_BANK_SIZE..ROM_BANK_SIZE + high]);
        }
        log::info!("Loaded {} bytes of cartridge ROM", bytes.len().min(2 * ROM_BANK_SIZE));
    }

    /// Installs the 256 byte boot ROM overlay, which shadows 0x0000-0x00FF
    /// until the game writes a nonzero value to `BOOT_ROM_OFF`.
    pub fn install_boot_rom(&mut self, bytes: &[u8]) -> Result<(), EmulatorError> {
        if bytes.len() != BOOT_SIZE {
            return Err(EmulatorError::BootRomSize(bytes.len()));
        }
        let mut boot = [0u8; BOOT_SIZE];
        boot.copy_from_slice(bytes);
        self.boot_rom = Some(boot);
        self.is_boot_rom_active = true;
        Ok(())
    }

    /// Indicates whether an enabled interrupt is pending.
    #[inline]
    pub fn has_pending_interrupt(&self) -> bool {
        let enabled = self.interrupt_enable.bits() & 0b0001_1111;
        let flag = self.interrupt_flag.bits() & 0b0001_1111;
        enabled & flag != 0
    }

    /// Requests an interrupt by ORing the source into IF.
    #[inline]
    pub fn request_interrupt(&mut self, irq: InterruptRegister) {
        self.interrupt_flag.insert(irq);
    }

    /// Advances the bus-owned units (timer and divider) by the given T-cycles.
    pub fn advance(&mut self, cycles: u32) {
        self.timer.step(cycles, &mut self.interrupt_flag);
    }

    /// Applies the register state the boot ROM would leave behind.
    /// Used when no boot ROM overlay is installed.
    pub(crate) fn skip_boot(&mut self) {
        self.io[(PPU_LCDC - IO_BEGIN) as usize] = POST_BOOT_LCDC;
        self.io[(PPU_STAT - IO_BEGIN) as usize] = POST_BOOT_STAT;
        self.io[(PPU_BGP - IO_BEGIN) as usize] = POST_BOOT_BGP;
        self.timer.divider = u16::from(POST_BOOT_DIV) << 8;
        self.timer.control = crate::timer::TimerControl::from_bits_truncate(POST_BOOT_TAC);
    }

    /// Reads from ROM bank 0, honoring the boot ROM overlay.
    fn read_rom_low(&self, address: u16) -> u8 {
        match &self.boot_rom {
            Some(boot) if self.is_boot_rom_active && address <= BOOT_END => boot[address as usize],
            _ => self.rom0[address as usize],
        }
    }

    /// Initiates a DMA transfer, the passed value specifies the upper byte
    /// of the source address. 160 bytes are copied into OAM synchronously.
    fn dma_transfer(&mut self, value: u8) {
        self.io[(PPU_DMA - IO_BEGIN) as usize] = value;
        let address = u16::from(value) << 8;
        for offset in 0..DMA_TRANSFER_SIZE {
            self.oam[offset as usize] = self.read(address + offset);
        }
    }

    /// The scanline register is owned by the PPU, which updates it here
    /// on every scanline advance. CPU writes to LY are dropped.
    #[inline]
    pub(crate) fn set_ly(&mut self, value: u8) {
        self.io[(PPU_LY - IO_BEGIN) as usize] = value;
    }

    /// Raw STAT update for the PPU, bypassing the read-only bit mask
    /// the CPU write path enforces.
    #[inline]
    pub(crate) fn set_stat(&mut self, value: u8) {
        self.io[(PPU_STAT - IO_BEGIN) as usize] = value;
    }

    /// Handles all writes to the I/O registers (0xFF00-0xFF7F).
    fn write_io(&mut self, address: u16, value: u8) {
        match address {
            // Only the selector bits are CPU-writable
            JOYPAD => self.joypad.write(value),
            TIMER_DIVIDER..=TIMER_CTRL => self.timer.write(address, value),
            INTERRUPT_FLAG => self.interrupt_flag = InterruptRegister::from_bits_retain(value),
            // The mode and coincidence bits are read-only
            PPU_STAT => {
                let current = self.io[(PPU_STAT - IO_BEGIN) as usize];
                self.set_stat(0b1000_0000 | (value & 0b0111_1000) | (current & 0b0000_0111));
            }
            PPU_LY => {}
            PPU_DMA => self.dma_transfer(value),
            // The lock can only transition from active to disabled
            BOOT_ROM_OFF => {
                if value > 0 {
                    self.is_boot_rom_active = false;
                }
            }
            _ => self.io[(address - IO_BEGIN) as usize] = value,
        }
    }

    /// Handles all reads from the I/O registers (0xFF00-0xFF7F).
    fn read_io(&self, address: u16) -> u8 {
        match address {
            JOYPAD => self.joypad.read(),
            TIMER_DIVIDER..=TIMER_CTRL => self.timer.read(address),
            // Undocumented bits read as 1
            INTERRUPT_FLAG => self.interrupt_flag.bits() | 0b1110_0000,
            // When read, this register is always 0xFF
            BOOT_ROM_OFF => UNDEFINED_READ,
            _ => self.io[(address - IO_BEGIN) as usize],
        }
    }
}

impl AddressSpace for Bus {
    fn write(&mut self, address: u16, value: u8) {
        match address {
            // Writes to the flat ROM image are dropped; a bank controller
            // would intercept 0x2000-0x3FFF here
            ROM_LOW_BANK_BEGIN..=ROM_HIGH_BANK_END => {}
            VRAM_BEGIN..=VRAM_END => self.vram[(address - VRAM_BEGIN) as usize] = value,
            EXT_RAM_BEGIN..=EXT_RAM_END => self.ext_ram[(address - EXT_RAM_BEGIN) as usize] = value,
            WRAM_BEGIN..=WRAM_END => self.wram[(address - WRAM_BEGIN) as usize] = value,
            // Echo RAM lands in Work RAM, the two windows share storage
            ECHO_BEGIN..=ECHO_END => self.wram[(address - ECHO_BEGIN) as usize] = value,
            OAM_BEGIN..=OAM_END => self.oam[(address - OAM_BEGIN) as usize] = value,
            UNUSED_BEGIN..=UNUSED_END => {}
            IO_BEGIN..=IO_END => self.write_io(address, value),
            HRAM_BEGIN..=HRAM_END => self.hram[(address - HRAM_BEGIN) as usize] = value,
            INTERRUPT_ENABLE => self.interrupt_enable = InterruptRegister::from_bits_retain(value),
        }
    }

    fn read(&self, address: u16) -> u8 {
        match address {
            ROM_LOW_BANK_BEGIN..=ROM_LOW_BANK_END => self.read_rom_low(address),
            ROM_HIGH_BANK_BEGIN..=ROM_HIGH_BANK_END => {
                self.rom1[(address - ROM_HIGH_BANK_BEGIN) as usize]
            }
            VRAM_BEGIN..=VRAM_END => self.vram[(address - VRAM_BEGIN) as usize],
            EXT_RAM_BEGIN..=EXT_RAM_END => self.ext_ram[(address - EXT_RAM_BEGIN) as usize],
            WRAM_BEGIN..=WRAM_END => self.wram[(address - WRAM_BEGIN) as usize],
            ECHO_BEGIN..=ECHO_END => self.wram[(address - ECHO_BEGIN) as usize],
            OAM_BEGIN..=OAM_END => self.oam[(address - OAM_BEGIN) as usize],
            UNUSED_BEGIN..=UNUSED_END => UNDEFINED_READ,
            IO_BEGIN..=IO_END => self.read_io(address),
            HRAM_BEGIN..=HRAM_END => self.hram[(address - HRAM_BEGIN) as usize],
            INTERRUPT_ENABLE => self.interrupt_enable.bits(),
        }
    }
}
