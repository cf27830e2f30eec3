// src/input.rs

//! Maps key-press events to view operations.
//!
//! The mapper is built once from the keybinding configuration and then
//! consulted for every key press the display driver reports. Key releases
//! and auto-repeats never reach this module; the driver only forwards
//! presses.

use crate::config::{KeyCombination, KeybindingsConfig};
use crate::keys::{KeySymbol, Modifiers};
use crate::transform::EditAction;
use log::trace;
use std::collections::HashMap;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Apply one discrete edit to the transform state.
    Edit(EditAction),
    /// Close the window and exit.
    Quit,
}

/// Resolves `(KeySymbol, Modifiers)` pairs to [`ViewerAction`]s.
pub struct InputMapper {
    bindings: HashMap<KeyCombination, ViewerAction>,
}

impl InputMapper {
    /// Builds the lookup table from a keybinding configuration.
    pub fn from_config(keys: &KeybindingsConfig) -> Self {
        use EditAction::*;
        let pairs = [
            (&keys.quit, ViewerAction::Quit),
            (&keys.reset, ViewerAction::Edit(Reset)),
            (&keys.scale_up, ViewerAction::Edit(ScaleUp)),
            (&keys.scale_down, ViewerAction::Edit(ScaleDown)),
            (&keys.rotate_clockwise, ViewerAction::Edit(RotateClockwise)),
            (
                &keys.rotate_counter_clockwise,
                ViewerAction::Edit(RotateCounterClockwise),
            ),
            (&keys.scale_up_x, ViewerAction::Edit(ScaleUpX)),
            (&keys.scale_down_x, ViewerAction::Edit(ScaleDownX)),
            (&keys.scale_up_y, ViewerAction::Edit(ScaleUpY)),
            (&keys.scale_down_y, ViewerAction::Edit(ScaleDownY)),
            (&keys.translate_right, ViewerAction::Edit(TranslateRight)),
            (&keys.translate_left, ViewerAction::Edit(TranslateLeft)),
            (&keys.translate_up, ViewerAction::Edit(TranslateUp)),
            (&keys.translate_down, ViewerAction::Edit(TranslateDown)),
            (
                &keys.shear_right_increase,
                ViewerAction::Edit(ShearRightIncrease),
            ),
            (
                &keys.shear_right_decrease,
                ViewerAction::Edit(ShearRightDecrease),
            ),
            (&keys.shear_up_increase, ViewerAction::Edit(ShearUpIncrease)),
            (&keys.shear_up_decrease, ViewerAction::Edit(ShearUpDecrease)),
        ];

        let mut bindings = HashMap::with_capacity(pairs.len());
        for (combo, action) in pairs {
            bindings.insert(normalize(combo.clone()), action);
        }
        InputMapper { bindings }
    }

    /// Resolves one key press. Unbound keys resolve to `None`.
    pub fn map(&self, symbol: KeySymbol, modifiers: Modifiers) -> Option<ViewerAction> {
        let combo = normalize(KeyCombination { symbol, modifiers });
        let action = self.bindings.get(&combo).copied();
        trace!("key {:?} + {:?} -> {:?}", symbol, modifiers, action);
        action
    }
}

/// Character bindings are case-insensitive: drivers report the unshifted
/// symbol, and configs may spell bindings either way.
fn normalize(mut combo: KeyCombination) -> KeyCombination {
    if let KeySymbol::Char(c) = combo.symbol {
        combo.symbol = KeySymbol::Char(c.to_ascii_lowercase());
    }
    combo
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> InputMapper {
        InputMapper::from_config(&KeybindingsConfig::default())
    }

    fn press(mapper: &InputMapper, symbol: KeySymbol) -> Option<ViewerAction> {
        mapper.map(symbol, Modifiers::empty())
    }

    #[test]
    fn default_layout_maps_every_operation() {
        use EditAction::*;
        let m = mapper();
        let table = [
            ('r', Reset),
            ('w', ScaleUp),
            ('s', ScaleDown),
            ('d', RotateClockwise),
            ('a', RotateCounterClockwise),
            ('h', TranslateRight),
            ('f', TranslateLeft),
            ('t', TranslateUp),
            ('g', TranslateDown),
            ('l', ShearRightIncrease),
            ('j', ShearRightDecrease),
            ('i', ShearUpIncrease),
            ('k', ShearUpDecrease),
        ];
        for (c, action) in table {
            assert_eq!(
                press(&m, KeySymbol::Char(c)),
                Some(ViewerAction::Edit(action)),
                "binding for '{}'",
                c
            );
        }
        assert_eq!(
            press(&m, KeySymbol::Right),
            Some(ViewerAction::Edit(ScaleUpX))
        );
        assert_eq!(
            press(&m, KeySymbol::Left),
            Some(ViewerAction::Edit(ScaleDownX))
        );
        assert_eq!(press(&m, KeySymbol::Up), Some(ViewerAction::Edit(ScaleUpY)));
        assert_eq!(
            press(&m, KeySymbol::Down),
            Some(ViewerAction::Edit(ScaleDownY))
        );
        assert_eq!(press(&m, KeySymbol::Char('e')), Some(ViewerAction::Quit));
    }

    #[test]
    fn uppercase_characters_resolve_like_lowercase() {
        assert_eq!(
            press(&mapper(), KeySymbol::Char('W')),
            Some(ViewerAction::Edit(EditAction::ScaleUp))
        );
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        let m = mapper();
        assert_eq!(press(&m, KeySymbol::Char('z')), None);
        assert_eq!(press(&m, KeySymbol::Escape), None);
        assert_eq!(press(&m, KeySymbol::Unknown), None);
    }

    #[test]
    fn modifiers_are_part_of_the_binding() {
        let m = mapper();
        assert_eq!(m.map(KeySymbol::Char('w'), Modifiers::CONTROL), None);
    }
}
