use crate::bus::Bus;
use crate::cpu::CPU;

const VBLANK_IRQ_ADDRESS: u16 = 0x0040;
const LCD_IRQ_ADDRESS: u16 = 0x0048;
const TIMER_IRQ_ADDRESS: u16 = 0x0050;
const SERIAL_IRQ_ADDRESS: u16 = 0x0058;
const JOYPAD_IRQ_ADDRESS: u16 = 0x0060;

/// T-cycles spent to push PC and jump to an interrupt vector.
pub const DISPATCH_CYCLES: u32 = 20;

bitflags! {
    /// Represents interrupt registers IE at 0xFFFF and IF at 0xFF0F
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub struct InterruptRegister: u8 {
        const VBLANK = 0b00000001; // V-Blank Interrupt
        const STAT   = 0b00000010; // LCD STAT Interrupt
        const TIMER  = 0b00000100; // Timer Overflow Interrupt
        const SERIAL = 0b00001000; // Serial Transfer Completion Interrupt
        const JOYPAD = 0b00010000; // Joypad Input Interrupt
    }
}

impl InterruptRegister {
    /// Returns the handler address for a single interrupt source.
    pub fn vector(self) -> u16 {
        match self {
            InterruptRegister::VBLANK => VBLANK_IRQ_ADDRESS,
            InterruptRegister::STAT => LCD_IRQ_ADDRESS,
            InterruptRegister::TIMER => TIMER_IRQ_ADDRESS,
            InterruptRegister::SERIAL => SERIAL_IRQ_ADDRESS,
            InterruptRegister::JOYPAD => JOYPAD_IRQ_ADDRESS,
            _ => unreachable!("vector() takes a single interrupt source"),
        }
    }
}

/// Handles pending interrupt requests and returns the T-cycles spent.
///
/// A halted CPU is always woken up when any enabled interrupt is pending,
/// even with IME disabled. Dispatching only happens with IME set, in
/// priority order VBLANK > STAT > TIMER > SERIAL > JOYPAD.
pub fn handle(cpu: &mut CPU, bus: &mut Bus) -> u32 {
    if !bus.has_pending_interrupt() {
        return 0;
    }

    cpu.is_halted = false;

    if !cpu.ime {
        return 0;
    }

    for irq in [
        InterruptRegister::VBLANK,
        InterruptRegister::STAT,
        InterruptRegister::TIMER,
        InterruptRegister::SERIAL,
        InterruptRegister::JOYPAD,
    ] {
        if bus.interrupt_enable.contains(irq) && bus.interrupt_flag.contains(irq) {
            cpu.handle_interrupt(bus, irq);
            return DISPATCH_CYCLES;
        }
    }
    0
}
