//! Pixel buffer type for the grading engine.
//!
//! The engine works on interleaved 8-bit rasters (RGB or RGBA), row-major,
//! top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! A transform never mutates its input buffer; it always allocates and
//! returns a new [`PixelBuffer`], so "original" and "processed" images can
//! coexist for comparison views.

use crate::{CoreError, CoreResult};

/// Owned, interleaved 8-bit image buffer.
///
/// Channels is 3 (RGB) or 4 (RGBA). Arbitrary dimensions are accepted,
/// including zero-sized buffers.
///
/// # Example
///
/// ```rust
/// use grade_core::PixelBuffer;
///
/// let buf = PixelBuffer::filled(2, 2, 4, [128, 128, 128, 255]).unwrap();
/// assert_eq!(buf.pixel(1, 1), &[128, 128, 128, 255]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: u8) -> CoreResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(CoreError::InvalidChannels(channels));
        }
        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer filled with a single color.
    ///
    /// `fill` must carry at least `channels` components; extra components
    /// are ignored.
    pub fn filled(width: u32, height: u32, channels: u8, fill: [u8; 4]) -> CoreResult<Self> {
        let mut buf = Self::new(width, height, channels)?;
        let c = channels as usize;
        for px in buf.data.chunks_exact_mut(c) {
            px.copy_from_slice(&fill[..c]);
        }
        Ok(buf)
    }

    /// Wraps existing interleaved data.
    ///
    /// Fails if `data.len() != width * height * channels`.
    pub fn from_data(data: Vec<u8>, width: u32, height: u32, channels: u8) -> CoreResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(CoreError::InvalidChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(CoreError::InvalidDimensions(format!(
                "expected {} bytes for {}x{}x{}, got {}",
                expected,
                width,
                height,
                channels,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Components per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of pixels.
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Components of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds or `px` is shorter than the
    /// channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: &[u8]) {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        self.data[idx..idx + c].copy_from_slice(&px[..c]);
    }

    /// Row `y` as an interleaved slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zeroed() {
        let buf = PixelBuffer::new(4, 2, 3).unwrap();
        assert_eq!(buf.data().len(), 4 * 2 * 3);
        assert!(buf.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn rejects_bad_channels() {
        assert!(PixelBuffer::new(4, 4, 2).is_err());
        assert!(PixelBuffer::new(4, 4, 5).is_err());
    }

    #[test]
    fn from_data_validates_len() {
        let err = PixelBuffer::from_data(vec![0; 10], 2, 2, 4);
        assert!(err.is_err());

        let ok = PixelBuffer::from_data(vec![0; 16], 2, 2, 4);
        assert!(ok.is_ok());
    }

    #[test]
    fn pixel_roundtrip() {
        let mut buf = PixelBuffer::new(8, 8, 4).unwrap();
        buf.set_pixel(3, 5, &[1, 2, 3, 4]);
        assert_eq!(buf.pixel(3, 5), &[1, 2, 3, 4]);
        assert_eq!(buf.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn rows() {
        let buf = PixelBuffer::filled(3, 2, 3, [9, 9, 9, 0]).unwrap();
        assert_eq!(buf.row(1).len(), 9);
        assert!(buf.row(0).iter().all(|&v| v == 9));
    }
}
