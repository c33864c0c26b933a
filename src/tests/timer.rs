use crate::constants::*;
use crate::interrupt::InterruptRegister;
use crate::timer::{Timer, TimerControl};

#[test]
fn test_divider_rate() {
    let mut int_reg = InterruptRegister::empty();
    let mut timer = Timer::default();

    timer.step(255, &mut int_reg);
    assert_eq!(timer.read(TIMER_DIVIDER), 0);

    timer.step(1, &mut int_reg);
    assert_eq!(timer.read(TIMER_DIVIDER), 1);

    timer.step(256 * 4, &mut int_reg);
    assert_eq!(timer.read(TIMER_DIVIDER), 5);
}

#[test]
fn test_divider_wraps() {
    let mut int_reg = InterruptRegister::empty();
    let mut timer = Timer::default();
    timer.divider = 0xFFFF;

    timer.step(1, &mut int_reg);
    assert_eq!(timer.read(TIMER_DIVIDER), 0);
    assert!(!int_reg.contains(InterruptRegister::TIMER));
}

#[test]
fn test_counter_disabled() {
    let mut int_reg = InterruptRegister::empty();
    let mut timer = Timer::default();
    timer.control = TimerControl::from_bits_truncate(0b0000_0001);
    assert!(!timer.control.is_enabled());

    timer.step(1024, &mut int_reg);
    assert_eq!(timer.counter, 0);
    // The divider runs regardless
    assert_eq!(timer.read(TIMER_DIVIDER), 4);
}

#[test]
fn test_counter_period_selection() {
    assert_eq!(TimerControl::from_bits_truncate(0b100).period(), 1024);
    assert_eq!(TimerControl::from_bits_truncate(0b101).period(), 16);
    assert_eq!(TimerControl::from_bits_truncate(0b110).period(), 64);
    assert_eq!(TimerControl::from_bits_truncate(0b111).period(), 256);
}

#[test]
fn test_counter_increments() {
    let mut int_reg = InterruptRegister::empty();
    let mut timer = Timer::default();
    timer.control = TimerControl::from_bits_truncate(0b0000_0101);
    assert!(timer.control.is_enabled());

    timer.step(15, &mut int_reg);
    assert_eq!(timer.counter, 0);

    timer.step(1, &mut int_reg);
    assert_eq!(timer.counter, 1);

    // Excess cycles accumulate instead of getting lost
    timer.step(40, &mut int_reg);
    assert_eq!(timer.counter, 3);
    assert!(!int_reg.contains(InterruptRegister::TIMER));
}

#[test]
fn test_counter_overflow_reloads_modulo() {
    let mut int_reg = InterruptRegister::empty();
    let mut timer = Timer::default();
    timer.control = TimerControl::from_bits_truncate(0b0000_0101);
    timer.counter = 0xFF;
    timer.modulo = 0x42;

    timer.step(16, &mut int_reg);
    assert_eq!(timer.counter, 0x42);
    assert!(int_reg.contains(InterruptRegister::TIMER));
}

#[test]
fn test_timer_read() {
    let mut timer = Timer::default();
    timer.divider = 0b0000_0011_1111_1111;
    timer.counter = 0b1010_1010;
    timer.modulo = 0b1011_1011;
    timer.control = TimerControl::from_bits_truncate(0b0000_0100);

    assert_eq!(timer.read(TIMER_DIVIDER), 0b0000_0011);
    assert_eq!(timer.read(TIMER_COUNTER), 0b1010_1010);
    assert_eq!(timer.read(TIMER_MODULO), 0b1011_1011);
    assert_eq!(
        timer.read(TIMER_CTRL),
        0b1111_1100,
        "Undocumented bits should be 1"
    );
}

#[test]
fn test_timer_write() {
    let mut timer = Timer::default();
    timer.divider = 0xCAFE;

    timer.write(TIMER_COUNTER, 0x11);
    timer.write(TIMER_MODULO, 0x22);
    timer.write(TIMER_CTRL, 0xFF);
    assert_eq!(timer.counter, 0x11);
    assert_eq!(timer.modulo, 0x22);
    assert_eq!(timer.control.bits(), 0b0000_0111);

    // Any value written to DIV zeroes the whole internal divider
    timer.write(TIMER_DIVIDER, 0x99);
    assert_eq!(timer.divider, 0);
}
