//! Procedural die face textures.
//!
//! Each face is a 32x32 rounded tile with pips laid out on a 3x3 grid,
//! generated once at startup from [`Face::pips`].

use macroquad::prelude::*;
use tumble_core::Face;

use super::palette;

/// Edge length of a face texture in pixels.
pub const FACE_PX: usize = 32;

const EDGE: f32 = 2.0;
const CORNER_RADIUS: f32 = 5.0;
const PIP_RADIUS: f32 = 3.2;
const PIP_SPACING: f32 = 8.0;

/// What a single texel of a face shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Texel {
    /// Outside the rounded tile.
    Clear,
    /// Tile outline.
    Edge,
    /// Tile body.
    Body,
    /// Part of a pip.
    Pip,
}

impl Texel {
    fn color(self) -> Color {
        match self {
            Self::Clear => Color::new(0.0, 0.0, 0.0, 0.0),
            Self::Edge => palette::DIE_EDGE,
            Self::Body => palette::DIE,
            Self::Pip => palette::PIP,
        }
    }
}

/// Classify the texel at `(x, y)` of `face`.
pub fn texel(face: Face, x: usize, y: usize) -> Texel {
    let size = FACE_PX as f32;
    let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

    // Distance outside the rounded square, measured from the inset corner centers.
    let cx = px.clamp(CORNER_RADIUS, size - CORNER_RADIUS);
    let cy = py.clamp(CORNER_RADIUS, size - CORNER_RADIUS);
    let corner_dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    if corner_dist > CORNER_RADIUS {
        return Texel::Clear;
    }
    let inset = px.min(py).min(size - px).min(size - py);
    if inset <= EDGE || corner_dist > CORNER_RADIUS - EDGE {
        return Texel::Edge;
    }

    let center = size / 2.0;
    let on_pip = face.pips().iter().any(|&(col, row)| {
        let pip_x = center + (f32::from(col) - 1.0) * PIP_SPACING;
        let pip_y = center + (f32::from(row) - 1.0) * PIP_SPACING;
        (px - pip_x).powi(2) + (py - pip_y).powi(2) <= PIP_RADIUS * PIP_RADIUS
    });
    if on_pip { Texel::Pip } else { Texel::Body }
}

/// RGBA pixels of one face, row by row.
pub fn face_pixels(face: Face) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(FACE_PX * FACE_PX * 4);
    for y in 0..FACE_PX {
        for x in 0..FACE_PX {
            let color = texel(face, x, y).color();
            pixels.extend([
                (color.r * 255.0) as u8,
                (color.g * 255.0) as u8,
                (color.b * 255.0) as u8,
                (color.a * 255.0) as u8,
            ]);
        }
    }
    pixels
}

/// Textures for all six faces.
pub struct FaceTextures {
    textures: [Texture2D; 6],
}

/// Build all face textures. Call once after the window exists.
pub fn build_faces() -> FaceTextures {
    FaceTextures {
        textures: Face::ALL.map(|face| {
            let texture = Texture2D::from_rgba8(FACE_PX as u16, FACE_PX as u16, &face_pixels(face));
            texture.set_filter(FilterMode::Nearest);
            texture
        }),
    }
}

impl FaceTextures {
    /// The texture for a face.
    pub fn for_face(&self, face: Face) -> &Texture2D {
        &self.textures[face.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(face: Face, kind: Texel) -> usize {
        (0..FACE_PX)
            .flat_map(|y| (0..FACE_PX).map(move |x| (x, y)))
            .filter(|&(x, y)| texel(face, x, y) == kind)
            .count()
    }

    #[test]
    fn corners_are_transparent() {
        assert_eq!(texel(Face::One, 0, 0), Texel::Clear);
        assert_eq!(texel(Face::One, FACE_PX - 1, FACE_PX - 1), Texel::Clear);
        assert_eq!(texel(Face::One, FACE_PX / 2, 0), Texel::Edge);
    }

    #[test]
    fn center_pip_only_on_odd_faces() {
        let mid = FACE_PX / 2;
        for face in Face::ALL {
            let expected = if face.value() % 2 == 1 { Texel::Pip } else { Texel::Body };
            assert_eq!(texel(face, mid, mid), expected, "face {face}");
        }
    }

    #[test]
    fn pip_area_grows_with_value() {
        let one = count(Face::One, Texel::Pip);
        assert!(one > 0);
        for face in Face::ALL {
            assert_eq!(count(face, Texel::Pip), one * usize::from(face.value()));
        }
    }

    #[test]
    fn pixel_buffer_size() {
        assert_eq!(face_pixels(Face::Six).len(), FACE_PX * FACE_PX * 4);
    }
}
