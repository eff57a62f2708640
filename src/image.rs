//! A fixed-size RGB pixel grid.

/// Image width in pixels.
pub const WIDTH: usize = 32;
/// Image height in pixels.
pub const HEIGHT: usize = 32;
/// Number of color channels (red, green, blue).
pub const CHANNELS: usize = 3;
/// Pixels per channel.
pub const PLANE_LEN: usize = WIDTH * HEIGHT;
/// Total number of intensity values in one image.
pub const IMAGE_LEN: usize = PLANE_LEN * CHANNELS;

/// A 32×32×3 grid of 8-bit intensities, addressed as `[row][col][channel]`.
///
/// Pixels are stored interleaved in row-major order, which is also the layout
/// of a binary PPM body.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Box<[u8; IMAGE_LEN]>,
}

impl Image {
    /// Creates an all-black image.
    pub fn new() -> Self {
        Image {
            pixels: Box::new([0; IMAGE_LEN]),
        }
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.pixels[offset(row, col, channel)]
    }

    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        self.pixels[offset(row, col, channel)] = value;
    }

    /// Returns the `(r, g, b)` triple at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> [u8; CHANNELS] {
        let start = offset(row, col, 0);
        [
            self.pixels[start],
            self.pixels[start + 1],
            self.pixels[start + 2],
        ]
    }

    /// Interleaved row-major RGB bytes.
    pub fn as_interleaved(&self) -> &[u8] {
        &self.pixels[..]
    }
}

impl Default for Image {
    fn default() -> Self {
        Image::new()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish()
    }
}

fn offset(row: usize, col: usize, channel: usize) -> usize {
    assert!(
        row < HEIGHT && col < WIDTH && channel < CHANNELS,
        "pixel ({}, {}, {}) out of bounds",
        row,
        col,
        channel
    );
    (row * WIDTH + col) * CHANNELS + channel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut image = Image::new();
        image.set(31, 0, 2, 200);
        assert_eq!(image.get(31, 0, 2), 200);
        assert_eq!(image.pixel(31, 0), [0, 0, 200]);
    }

    #[test]
    fn interleaved_layout() {
        let mut image = Image::new();
        image.set(1, 2, 1, 9);
        assert_eq!(image.as_interleaved()[(WIDTH + 2) * CHANNELS + 1], 9);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_channel() {
        Image::new().get(0, 0, 3);
    }
}
