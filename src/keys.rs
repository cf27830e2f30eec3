// src/keys.rs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Represents a keyboard modifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// A key symbol as delivered by the display driver.
///
/// Only the keys a viewer can meaningfully bind are represented; anything
/// else arrives as `Unknown` and is ignored by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    /// A plain character key. Drivers report the unshifted symbol.
    Char(char),

    // Navigation keys
    Left,
    Right,
    Up,
    Down,

    // Other common keys
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,

    #[default]
    Unknown,
}
