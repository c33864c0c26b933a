use crate::bus::Bus;
use crate::constants::*;
use crate::cpu::{CPU, STEP_BREAKPOINT};
use crate::interrupt::{self, InterruptRegister};
use crate::joypad::Button;
use crate::ppu::PPU;
use crate::ppu::buffer::FrameBuffer;
use crate::{AddressSpace, EmulatorError};
use itertools::Itertools;
use std::path::PathBuf;

/// Options recognized by [`Emulator::new`]. How they are gathered
/// (files, command line, GUI) is up to the frontend.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// A 256 byte boot ROM image to overlay at 0x0000. If the file is
    /// missing or invalid the overlay is skipped and the post-boot
    /// register state is preset instead; this is not an error.
    pub boot_rom_path: Option<PathBuf>,
    /// Addresses at which `step_frame` stops with a breakpoint error.
    pub breakpoints: Vec<u16>,
    /// Addresses whose current values are appended to `debug_snapshot`.
    pub watches: Vec<u16>,
    /// Opcodes logged with PC and mnemonic whenever they execute.
    pub opcode_debug: Vec<u8>,
}

/// Ties CPU, bus and PPU together and drives them frame by frame.
pub struct Emulator {
    pub cpu: CPU,
    pub bus: Bus,
    pub ppu: PPU,
    watches: Vec<u16>,
}

impl Emulator {
    pub fn new(config: Config) -> Self {
        let mut cpu = CPU::default();
        let mut bus = Bus::default();
        cpu.breakpoints = config.breakpoints;
        cpu.traced_opcodes = config.opcode_debug;

        if let Some(path) = &config.boot_rom_path {
            match std::fs::read(path) {
                Ok(bytes) => match bus.install_boot_rom(&bytes) {
                    Ok(()) => log::info!("Boot ROM loaded from {}", path.display()),
                    Err(err) => log::warn!("Ignoring boot ROM {}: {err}", path.display()),
                },
                Err(err) => log::warn!("Unable to read boot ROM {}: {err}", path.display()),
            }
        }

        if !bus.is_boot_rom_active {
            Self::skip_boot(&mut cpu, &mut bus);
        }

        Self {
            cpu,
            bus,
            ppu: PPU::default(),
            watches: config.watches,
        }
    }

    /// Applies the register state the boot ROM would have produced and
    /// starts execution at the cartridge entry point.
    fn skip_boot(cpu: &mut CPU, bus: &mut Bus) {
        cpu.r.set_af(POST_BOOT_AF);
        cpu.r.set_bc(POST_BOOT_BC);
        cpu.r.set_de(POST_BOOT_DE);
        cpu.r.set_hl(POST_BOOT_HL);
        cpu.sp = POST_BOOT_SP;
        cpu.pc = POST_BOOT_PC;
        cpu.ime = false;
        bus.skip_boot();
    }

    /// Copies a flat ROM image into the two 16 KiB banks.
    pub fn load_rom(&mut self, bytes: &[u8]) {
        self.bus.load_rom(bytes);
    }

    /// Installs a boot ROM overlay after construction and restarts
    /// execution at 0x0000. Fails unless the image is exactly 256 bytes.
    pub fn install_boot_rom(&mut self, bytes: &[u8]) -> Result<(), EmulatorError> {
        self.bus.install_boot_rom(bytes)?;
        self.cpu.pc = BOOT_BEGIN;
        Ok(())
    }

    /// Runs the CPU -> timer -> PPU -> interrupt pipeline until the
    /// accumulated T-cycles exceed the budget, and returns them. A budget
    /// of zero or less executes exactly one instruction with breakpoints
    /// suppressed, which is how a debugger steps past a break address.
    ///
    /// On a breakpoint or unknown opcode the loop stops with PC pointing
    /// at the offending address and all state inspectable.
    pub fn step_frame(&mut self, cycle_budget: i32) -> Result<u32, EmulatorError> {
        let single_step = cycle_budget <= 0;
        let mut cycles: u32 = 0;

        loop {
            let spent = self.cpu.step(&mut self.bus, single_step);
            if spent < 0 {
                return Err(self.fault(spent));
            }
            let spent = spent as u32;

            self.bus.advance(spent);
            self.ppu.step(&mut self.bus, spent);
            cycles += spent;
            cycles += interrupt::handle(&mut self.cpu, &mut self.bus);

            if self.bus.joypad.take_changed() {
                self.bus.request_interrupt(InterruptRegister::JOYPAD);
            }

            if single_step || i64::from(cycles) > i64::from(cycle_budget) {
                break;
            }
        }

        self.drain_serial();
        Ok(cycles)
    }

    /// Maps a negative step result to the matching error value.
    fn fault(&self, sentinel: i32) -> EmulatorError {
        let pc = self.cpu.pc;
        match sentinel {
            STEP_BREAKPOINT => EmulatorError::Breakpoint(pc),
            _ => EmulatorError::UnknownOpcode {
                opcode: self.bus.read(pc),
                pc,
            },
        }
    }

    /// Test ROMs print through the serial port: a write of 0x81 to SC
    /// means the byte in SB is ready to be shipped.
    fn drain_serial(&mut self) {
        if self.bus.read(SERIAL_TRANSFER_CTRL) == 0x81 {
            let data = self.bus.read(SERIAL_TRANSFER_DATA);
            log::debug!("Serial data: {:?}", data as char);
            self.bus.write(SERIAL_TRANSFER_CTRL, 0x00);
        }
    }

    /// The composed 160x144 RGBA frame.
    #[inline]
    pub fn framebuffer(&self) -> &FrameBuffer {
        self.ppu.frame()
    }

    /// Updates the pressed state of one button. The joypad interrupt is
    /// raised on the next `step_frame` iteration.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.joypad.set_button(button, pressed);
    }

    /// Renders the machine state for debugging: registers, flags,
    /// interrupt state, the next few bytes at PC, the display registers
    /// and the configured watch addresses.
    pub fn debug_snapshot(&self) -> String {
        let cpu = &self.cpu;
        let bus = &self.bus;

        let mut out = String::new();
        out += &format!("PC: {:#06X} -> {}\n\n", cpu.pc, cpu.current_mnemonic(bus));
        out += &format!(
            "A:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X}\n",
            cpu.r.a, cpu.r.b, cpu.r.c, cpu.r.d, cpu.r.e, cpu.r.h, cpu.r.l
        );
        out += &format!(
            "AF:{:04X} BC:{:04X} DE:{:04X} HL:{:04X} SP:{:04X}\n",
            cpu.r.get_af(),
            cpu.r.get_bc(),
            cpu.r.get_de(),
            cpu.r.get_hl(),
            cpu.sp
        );
        out += &format!(
            "IE:{:08b} IF:{:08b} IME:{}\n",
            bus.interrupt_enable.bits(),
            bus.interrupt_flag.bits(),
            u8::from(cpu.ime)
        );
        out += &format!(
            "Z:{} N:{} H:{} C:{}\n\n",
            u8::from(cpu.r.f.zero()),
            u8::from(cpu.r.f.negative()),
            u8::from(cpu.r.f.half_carry()),
            u8::from(cpu.r.f.carry())
        );

        for offset in 0..5 {
            let address = cpu.pc.wrapping_add(offset);
            out += &format!("{:04X}: {:#04X}\n", address, bus.read(address));
        }

        out += &format!("\nLCDC: {0:#04X} {0:08b}\n", bus.read(PPU_LCDC));
        out += &format!("STAT: {:#04X}\n", bus.read(PPU_STAT));
        out += &format!("  LY: {:#04X}\n", bus.read(PPU_LY));

        if !self.watches.is_empty() {
            out.push('\n');
            out += &self
                .watches
                .iter()
                .map(|address| format!("Watch {:04X}:{:02X}", address, bus.read(*address)))
                .join("\n");
            out.push('\n');
        }
        out
    }
}
