//! Tegra234 pad control register decoding
//!
//! Decodes a raw 32-bit pad control register value into its configuration
//! fields. Bit positions come from the Orin TRM pinmux register layout:
//! pull on bits 3:2, input enable on bit 4, tristate on bit 6, GPIO/SFIO
//! select on bit 10, low-power drive on bit 11.

use std::fmt;

/// GPIO/SFIO select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Pad is in general-purpose I/O mode
    Gpio,
    /// Pad is in special-function I/O mode (routed to a peripheral)
    Sfio,
}

/// Pull resistor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// No pull resistor
    None,
    /// Pull-down enabled
    Down,
    /// Pull-up enabled
    Up,
    /// Reserved encoding
    Reserved,
}

/// Effective signal direction, derivable only in GPIO mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Input only (tristated with input enabled)
    Input,
    /// Output only (input buffer disabled)
    Output,
    /// Driven with the input buffer also enabled
    Bidirectional,
}

/// Decoded pad control register fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDecode {
    /// Raw register value the decode came from
    pub raw_value: u32,
    /// GPIO/SFIO select
    pub mode: PadMode,
    /// Output driver tristated
    pub tristate: bool,
    /// Input buffer enabled
    pub input_enable: bool,
    /// Pull resistor configuration
    pub pull: Pull,
    /// Low-power drive enabled
    pub low_power: bool,
    /// Effective direction; `None` in SFIO mode
    pub direction: Option<Direction>,
}

/// Decode one pad control register value
pub fn decode_pad_register(value: u32) -> RegisterDecode {
    let mode = if value & (1 << 10) == 0 {
        PadMode::Gpio
    } else {
        PadMode::Sfio
    };
    let tristate = value & (1 << 6) != 0;
    let input_enable = value & (1 << 4) != 0;
    let low_power = value & (1 << 11) != 0;

    let pull = match (value >> 2) & 0x3 {
        0 => Pull::None,
        1 => Pull::Down,
        2 => Pull::Up,
        _ => Pull::Reserved,
    };

    let direction = match mode {
        PadMode::Sfio => None,
        PadMode::Gpio => Some(if input_enable {
            if tristate {
                Direction::Input
            } else {
                Direction::Bidirectional
            }
        } else {
            Direction::Output
        }),
    };

    RegisterDecode {
        raw_value: value,
        mode,
        tristate,
        input_enable,
        pull,
        low_power,
        direction,
    }
}

impl fmt::Display for PadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio => write!(f, "GPIO"),
            Self::Sfio => write!(f, "SFIO"),
        }
    }
}

impl fmt::Display for Pull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Down => write!(f, "pull-down"),
            Self::Up => write!(f, "pull-up"),
            Self::Reserved => write!(f, "reserved"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Bidirectional => write!(f, "bidirectional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gpio_input() {
        // GPIO mode, tristate, input enable: a plain input pad.
        let decoded = decode_pad_register(0x0000_0050);
        assert_eq!(decoded.mode, PadMode::Gpio);
        assert!(decoded.tristate);
        assert!(decoded.input_enable);
        assert_eq!(decoded.pull, Pull::None);
        assert_eq!(decoded.direction, Some(Direction::Input));
    }

    #[test]
    fn test_decode_gpio_output() {
        let decoded = decode_pad_register(0x0000_0000);
        assert_eq!(decoded.mode, PadMode::Gpio);
        assert!(!decoded.input_enable);
        assert_eq!(decoded.direction, Some(Direction::Output));
    }

    #[test]
    fn test_decode_gpio_bidirectional() {
        // Input enable without tristate.
        let decoded = decode_pad_register(0x0000_0010);
        assert_eq!(decoded.direction, Some(Direction::Bidirectional));
    }

    #[test]
    fn test_decode_sfio_has_no_direction() {
        let decoded = decode_pad_register(1 << 10);
        assert_eq!(decoded.mode, PadMode::Sfio);
        assert_eq!(decoded.direction, None);
    }

    #[test]
    fn test_decode_pull_bits() {
        assert_eq!(decode_pad_register(0x0).pull, Pull::None);
        assert_eq!(decode_pad_register(0x4).pull, Pull::Down);
        assert_eq!(decode_pad_register(0x8).pull, Pull::Up);
        assert_eq!(decode_pad_register(0xC).pull, Pull::Reserved);
    }

    #[test]
    fn test_decode_low_power() {
        assert!(decode_pad_register(1 << 11).low_power);
        assert!(!decode_pad_register(0).low_power);
    }
}
