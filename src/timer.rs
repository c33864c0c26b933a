use crate::constants::*;
use crate::interrupt::InterruptRegister;

bitflags! {
    /// Represents the timer control register TAC at 0xFF07.
    /// Only the lower 3 bits are mapped, the rest reads as 1.
    #[derive(Copy, Clone, Default, Debug)]
    pub struct TimerControl: u8 {
        const FREQ_LO = 0b0000_0001;
        const FREQ_HI = 0b0000_0010;
        const ENABLE  = 0b0000_0100;
    }
}

impl TimerControl {
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.contains(TimerControl::ENABLE)
    }

    /// Returns the TIMA tick period in T-cycles for the selected frequency.
    pub const fn period(&self) -> u32 {
        match self.bits() & 0b11 {
            0b00 => 1024, // 4096 Hz
            0b01 => 16,   // 262144 Hz
            0b10 => 64,   // 65536 Hz
            _ => 256,     // 16384 Hz
        }
    }
}

/// Implements the timer unit with the registers DIV, TIMA, TMA and TAC.
///
/// The divider is a free-running 16-bit counter incremented every T-cycle;
/// its upper 8 bits are visible as DIV, which makes DIV tick at 16384 Hz.
/// TIMA counts at the TAC-selected rate while enabled and reloads from TMA
/// on overflow, requesting a timer interrupt.
#[derive(Clone)]
pub struct Timer {
    pub divider: u16,
    pub counter: u8,
    pub modulo: u8,
    pub control: TimerControl,
    prescaler: u32,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            divider: 0,
            counter: 0,
            modulo: 0,
            control: TimerControl::empty(),
            prescaler: 0,
        }
    }
}

impl Timer {
    /// Advances the unit by the given T-cycles and requests a timer
    /// interrupt if TIMA overflowed.
    pub fn step(&mut self, cycles: u32, int_flag: &mut InterruptRegister) {
        self.divider = self.divider.wrapping_add(cycles as u16);

        if !self.control.is_enabled() {
            return;
        }

        self.prescaler += cycles;
        let period = self.control.period();
        while self.prescaler >= period {
            self.prescaler -= period;

            match self.counter.checked_add(1) {
                Some(counter) => self.counter = counter,
                None => {
                    self.counter = self.modulo;
                    int_flag.insert(InterruptRegister::TIMER);
                }
            }
        }
    }

    /// Handles reads for the 0xFF04-0xFF07 register range.
    pub fn read(&self, address: u16) -> u8 {
        match address {
            TIMER_DIVIDER => (self.divider >> 8) as u8,
            TIMER_COUNTER => self.counter,
            TIMER_MODULO => self.modulo,
            // Undocumented bits read as 1
            TIMER_CTRL => self.control.bits() | 0b1111_1000,
            _ => unreachable!("timer read outside 0xFF04-0xFF07"),
        }
    }

    /// Handles writes for the 0xFF04-0xFF07 register range.
    pub fn write(&mut self, address: u16, value: u8) {
        match address {
            // Whenever a ROM writes to DIV the whole divider resets to 0
            TIMER_DIVIDER => self.divider = 0,
            TIMER_COUNTER => self.counter = value,
            TIMER_MODULO => self.modulo = value,
            TIMER_CTRL => self.control = TimerControl::from_bits_truncate(value),
            _ => unreachable!("timer write outside 0xFF04-0xFF07"),
        }
    }
}

/// Represents the internal T-cycle counter used by the CPU to account
/// for the cost of a single instruction step.
#[derive(Clone, Default)]
pub struct Clock {
    t_cycles: u32,
}

impl Clock {
    #[inline]
    pub fn advance(&mut self, cycles: u32) {
        self.t_cycles = self.t_cycles.wrapping_add(cycles);
    }

    #[inline]
    pub fn ticks(&self) -> u32 {
        self.t_cycles
    }

    #[inline]
    pub fn reset(&mut self) {
        self.t_cycles = 0;
    }
}
