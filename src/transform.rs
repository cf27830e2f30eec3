// src/transform.rs

//! Accumulated view transform and the per-frame model matrix.
//!
//! `TransformState` collects the scale, shear, rotation, and translation
//! parameters edited by keyboard input; `model_matrix` folds them (plus
//! the viewport aspect ratio) into the single matrix the renderer applies
//! to the quad each frame.

use crate::math::Mat4;

/// Degrees added or removed per rotation key press.
pub const ROTATION_STEP_DEGREES: f32 = 0.5;
/// Units added or removed per translation key press.
pub const TRANSLATION_STEP: f32 = 1.0;
/// Units added or removed per shear key press.
pub const SHEAR_STEP: f32 = 1.0;
/// Multiplicative factor applied per scale key press.
pub const SCALE_FACTOR: f32 = 2.0;

/// One discrete edit of the view transform, triggered by a single key
/// press. Every action is total: no operation can fail, and no field is
/// clamped (repeated scaling may run toward zero or overflow; that is the
/// accepted behavior, not a defect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    ScaleUp,
    ScaleDown,
    ScaleUpX,
    ScaleDownX,
    ScaleUpY,
    ScaleDownY,
    RotateClockwise,
    RotateCounterClockwise,
    TranslateRight,
    TranslateLeft,
    TranslateUp,
    TranslateDown,
    ShearRightIncrease,
    ShearRightDecrease,
    ShearUpIncrease,
    ShearUpDecrease,
    Reset,
}

/// The live view transform. Created once at startup with the defaults,
/// mutated in place by [`TransformState::apply`], and read every frame by
/// [`model_matrix`]. Single-threaded: one writer, one reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
    pub rotation_degrees: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        TransformState {
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            rotation_degrees: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one discrete edit to the state.
    pub fn apply(&mut self, action: EditAction) {
        use EditAction::*;
        match action {
            ScaleUp => {
                self.scale_x *= SCALE_FACTOR;
                self.scale_y *= SCALE_FACTOR;
            }
            ScaleDown => {
                self.scale_x /= SCALE_FACTOR;
                self.scale_y /= SCALE_FACTOR;
            }
            ScaleUpX => self.scale_x *= SCALE_FACTOR,
            ScaleDownX => self.scale_x /= SCALE_FACTOR,
            ScaleUpY => self.scale_y *= SCALE_FACTOR,
            ScaleDownY => self.scale_y /= SCALE_FACTOR,
            RotateClockwise => self.rotation_degrees += ROTATION_STEP_DEGREES,
            RotateCounterClockwise => self.rotation_degrees -= ROTATION_STEP_DEGREES,
            TranslateRight => self.translation_x += TRANSLATION_STEP,
            TranslateLeft => self.translation_x -= TRANSLATION_STEP,
            TranslateUp => self.translation_y += TRANSLATION_STEP,
            TranslateDown => self.translation_y -= TRANSLATION_STEP,
            ShearRightIncrease => self.shear_x += SHEAR_STEP,
            ShearRightDecrease => self.shear_x -= SHEAR_STEP,
            ShearUpIncrease => self.shear_y += SHEAR_STEP,
            ShearUpDecrease => self.shear_y -= SHEAR_STEP,
            Reset => *self = Self::default(),
        }
    }
}

/// Composes the per-frame model matrix from the current state and the
/// viewport aspect ratio.
///
/// The composition order is `projection * ((scale * shear) * translation)
/// * rotation`: scale and shear are coupled before translation, and
/// rotation is applied last, outside the translation. This is not the
/// conventional scale-rotate-translate pipeline; the order is kept
/// deliberately so the on-screen behavior matches the historical one
/// key-for-key.
pub fn model_matrix(state: &TransformState, aspect_ratio: f32) -> Mat4 {
    let projection = Mat4::ortho(-aspect_ratio, aspect_ratio, -1.0, 1.0, 1.0, -1.0);
    let scale = Mat4::scale(state.scale_x, state.scale_y);
    let shear = Mat4::shear_xy(state.shear_x, state.shear_y);
    let translation = Mat4::translation(state.translation_x, state.translation_y, 0.0);
    let rotation = Mat4::rotation_z(state.rotation_degrees.to_radians());

    projection * ((scale * shear) * translation) * rotation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_identity_parameters() {
        let state = TransformState::default();
        assert_eq!(state.scale_x, 1.0);
        assert_eq!(state.scale_y, 1.0);
        assert_eq!(state.shear_x, 0.0);
        assert_eq!(state.shear_y, 0.0);
        assert_eq!(state.rotation_degrees, 0.0);
        assert_eq!(state.translation_x, 0.0);
        assert_eq!(state.translation_y, 0.0);
    }

    #[test]
    fn rotate_clockwise_twice_then_reset() {
        let mut state = TransformState::new();
        state.apply(EditAction::RotateClockwise);
        state.apply(EditAction::RotateClockwise);
        assert_eq!(state.rotation_degrees, 1.0);
        state.apply(EditAction::Reset);
        assert_eq!(state.rotation_degrees, 0.0);
    }

    #[test]
    fn reset_restores_defaults_after_any_edit_sequence() {
        let mut state = TransformState::new();
        for action in [
            EditAction::ScaleUp,
            EditAction::ScaleUpX,
            EditAction::ScaleDownY,
            EditAction::RotateCounterClockwise,
            EditAction::TranslateRight,
            EditAction::TranslateDown,
            EditAction::ShearRightIncrease,
            EditAction::ShearUpDecrease,
        ] {
            state.apply(action);
        }
        assert_ne!(state, TransformState::default());
        state.apply(EditAction::Reset);
        assert_eq!(state, TransformState::default());
    }

    #[test]
    fn scale_up_then_down_is_exact_inverse() {
        // Doubling and halving are exact in binary floating point for a
        // useful range of magnitudes.
        let mut state = TransformState::new();
        for _ in 0..40 {
            state.apply(EditAction::ScaleUp);
        }
        for _ in 0..40 {
            state.apply(EditAction::ScaleDown);
        }
        assert_eq!(state.scale_x, 1.0);
        assert_eq!(state.scale_y, 1.0);

        state.apply(EditAction::ScaleUpX);
        state.apply(EditAction::ScaleDownX);
        assert_eq!(state.scale_x, 1.0);
    }

    #[test]
    fn per_axis_scale_edits_are_independent() {
        let mut state = TransformState::new();
        state.apply(EditAction::ScaleUpX);
        state.apply(EditAction::ScaleDownY);
        assert_eq!(state.scale_x, 2.0);
        assert_eq!(state.scale_y, 0.5);
    }

    #[test]
    fn translation_and_shear_steps_accumulate() {
        let mut state = TransformState::new();
        state.apply(EditAction::TranslateLeft);
        state.apply(EditAction::TranslateLeft);
        state.apply(EditAction::TranslateUp);
        state.apply(EditAction::ShearRightIncrease);
        state.apply(EditAction::ShearUpDecrease);
        assert_eq!(state.translation_x, -2.0);
        assert_eq!(state.translation_y, 1.0);
        assert_eq!(state.shear_x, 1.0);
        assert_eq!(state.shear_y, -1.0);
    }

    #[test]
    fn model_matrix_matches_manual_factor_product() {
        let state = TransformState {
            scale_x: 2.0,
            scale_y: 0.5,
            shear_x: 1.0,
            shear_y: -1.0,
            rotation_degrees: 30.0,
            translation_x: 3.0,
            translation_y: -2.0,
        };
        let aspect = 1.5;

        let projection = Mat4::ortho(-aspect, aspect, -1.0, 1.0, 1.0, -1.0);
        let scale = Mat4::scale(2.0, 0.5);
        let shear = Mat4::shear_xy(1.0, -1.0);
        let translation = Mat4::translation(3.0, -2.0, 0.0);
        let rotation = Mat4::rotation_z(30.0f32.to_radians());
        let expected = projection * ((scale * shear) * translation) * rotation;

        assert_eq!(model_matrix(&state, aspect), expected);
    }

    #[test]
    fn composition_order_differs_from_conventional_pipeline() {
        // Scale-shear before translation with rotation outside is NOT the
        // conventional translate*rotate*scale order; pin the difference so
        // a well-meaning reorder shows up as a test failure.
        let state = TransformState {
            scale_x: 2.0,
            scale_y: 2.0,
            shear_x: 0.0,
            shear_y: 0.0,
            rotation_degrees: 90.0,
            translation_x: 1.0,
            translation_y: 0.0,
        };
        let ours = model_matrix(&state, 1.0);

        let projection = Mat4::ortho(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0);
        let conventional = projection
            * Mat4::translation(1.0, 0.0, 0.0)
            * Mat4::rotation_z(90.0f32.to_radians())
            * Mat4::scale(2.0, 2.0);

        let p = ours.transform_point([1.0, 0.0, 0.0, 1.0]);
        let q = conventional.transform_point([1.0, 0.0, 0.0, 1.0]);
        assert!((p[0] - q[0]).abs() > 1e-3 || (p[1] - q[1]).abs() > 1e-3);
    }

    #[test]
    fn identity_state_model_matrix_is_identity_in_xy_for_square_viewport() {
        let m = model_matrix(&TransformState::default(), 1.0);
        let p = m.transform_point([0.25, -0.75, 0.0, 1.0]);
        assert!((p[0] - 0.25).abs() < 1e-6);
        assert!((p[1] + 0.75).abs() < 1e-6);
    }

    #[test]
    fn wider_viewport_shrinks_x() {
        let m = model_matrix(&TransformState::default(), 2.0);
        let p = m.transform_point([1.0, 1.0, 0.0, 1.0]);
        assert!((p[0] - 0.5).abs() < 1e-6);
        assert!((p[1] - 1.0).abs() < 1e-6);
    }
}
