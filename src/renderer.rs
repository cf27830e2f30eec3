// src/renderer.rs

//! Software renderer for the one textured quad the viewer draws.
//!
//! The quad spans `[-1, 1]` in both axes of its local space, with the
//! texture mapped corner-to-corner (top-left texel at local `(-1, 1)`).
//! Each frame the renderer clears the framebuffer to the background color
//! and inverse-maps every pixel through the model matrix's 2D affine part
//! back into quad-local coordinates; pixels that land inside the quad
//! sample the texture with nearest-neighbor filtering.
//!
//! The renderer is backend-agnostic: it only writes into the
//! `RenderSnapshot` the display driver handed out, and never touches
//! platform drawing APIs itself.

use crate::display::messages::{RenderSnapshot, BYTES_PER_PIXEL};
use crate::math::Mat4;
use crate::ppm::PixelBuffer;
use log::trace;

pub struct Renderer {
    texture: PixelBuffer,
    background: [u8; 3],
}

impl Renderer {
    /// Takes ownership of the decoded image; it is the process-lifetime
    /// texture and is never mutated afterwards.
    pub fn new(texture: PixelBuffer, background: [u8; 3]) -> Self {
        Self {
            texture,
            background,
        }
    }

    /// Renders one frame: background fill, then the transformed quad.
    pub fn draw(&self, matrix: &Mat4, frame: &mut RenderSnapshot) {
        let [bg_r, bg_g, bg_b] = self.background;
        for pixel in frame.framebuffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[0] = bg_b;
            pixel[1] = bg_g;
            pixel[2] = bg_r;
            pixel[3] = 0;
        }

        // The quad lives in z = 0 and none of the composed factors
        // produce perspective, so the matrix acts on it as a 2D affine
        // map: clip = A * local + t.
        let a = matrix.0[0][0];
        let b = matrix.0[0][1];
        let c = matrix.0[1][0];
        let d = matrix.0[1][1];
        let tx = matrix.0[3][0];
        let ty = matrix.0[3][1];

        let det = a * d - b * c;
        if !det.is_finite() || det.abs() <= f32::EPSILON {
            trace!("degenerate model matrix (det {}), background only", det);
            return;
        }
        let inv_det = 1.0 / det;

        let width = frame.width_px as usize;
        let height = frame.height_px as usize;
        let tex_w = self.texture.width();
        let tex_h = self.texture.height();

        for py in 0..height {
            let y_ndc = 1.0 - 2.0 * (py as f32 + 0.5) / height as f32;
            for px in 0..width {
                let x_ndc = 2.0 * (px as f32 + 0.5) / width as f32 - 1.0;

                let dx = x_ndc - tx;
                let dy = y_ndc - ty;
                let local_x = (d * dx - c * dy) * inv_det;
                let local_y = (a * dy - b * dx) * inv_det;
                if !(-1.0..=1.0).contains(&local_x) || !(-1.0..=1.0).contains(&local_y) {
                    continue;
                }

                // Nearest-neighbor sample, texture corners on quad corners.
                let u = (local_x + 1.0) * 0.5;
                let v = (1.0 - local_y) * 0.5;
                let tex_x = ((u * tex_w as f32) as u32).min(tex_w - 1);
                let tex_y = ((v * tex_h as f32) as u32).min(tex_h - 1);
                let texel = self.texture.pixel(tex_x, tex_y);

                let offset = (py * width + px) * BYTES_PER_PIXEL;
                frame.framebuffer[offset] = texel.b;
                frame.framebuffer[offset + 1] = texel.g;
                frame.framebuffer[offset + 2] = texel.r;
                frame.framebuffer[offset + 3] = 0;
            }
        }
    }
}
