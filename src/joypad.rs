/// The eight physical buttons of the DMG, split internally into the
/// d-pad half and the action half of the 2x4 button matrix.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Button {
    A,
    B,
    Start,
    Select,
    Up,
    Down,
    Left,
    Right,
}

/// Represents the Joypad at register 0xFF00.
///
/// The CPU writes bits 4-5 to select either the d-pad or the action half;
/// the lower nibble is read-only and reflects the selected half with
/// pressed buttons reading as 0, not 1.
#[derive(Copy, Clone, Debug, Default)]
pub struct Joypad {
    a: bool,
    b: bool,
    start: bool,
    select: bool,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    select_dpad: bool,
    select_action: bool,
    changed: bool,
}

impl Joypad {
    /// Updates the pressed state of a single button and marks the
    /// state as changed so the driver can raise a joypad interrupt.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        match button {
            Button::A => self.a = pressed,
            Button::B => self.b = pressed,
            Button::Start => self.start = pressed,
            Button::Select => self.select = pressed,
            Button::Up => self.up = pressed,
            Button::Down => self.down = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
        }
        self.changed = true;
    }

    /// Returns whether the button state changed since the last call
    /// and clears the change flag.
    #[inline]
    pub fn take_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    /// Stores the selector bits; only bits 4 and 5 are writable.
    pub fn write(&mut self, value: u8) {
        // 0 means selected here, the register is fully active-low.
        self.select_dpad = value & 0b0001_0000 == 0;
        self.select_action = value & 0b0010_0000 == 0;
    }

    /// Composes the register value from the stored selector bits and the
    /// current button state. With neither half selected the state nibble
    /// reads as 0xF.
    pub fn read(&self) -> u8 {
        let selector =
            (u8::from(!self.select_dpad) << 4) | (u8::from(!self.select_action) << 5);
        let state = if self.select_dpad {
            self.dpad_nibble()
        } else if self.select_action {
            self.action_nibble()
        } else {
            0x0F
        };
        0b1100_0000 | selector | state
    }

    /// Collects the pressed d-pad buttons and inverts them into the
    /// active-low state nibble.
    fn dpad_nibble(&self) -> u8 {
        let pressed = u8::from(self.right)
            | u8::from(self.left) << 1
            | u8::from(self.up) << 2
            | u8::from(self.down) << 3;
        !pressed & 0x0F
    }

    fn action_nibble(&self) -> u8 {
        let pressed = u8::from(self.a)
            | u8::from(self.b) << 1
            | u8::from(self.select) << 2
            | u8::from(self.start) << 3;
        !pressed & 0x0F
    }
}
