//! Owned RGBA pixel buffer.
//!
//! Samples are stored row-major, four bytes per pixel, straight (not
//! premultiplied) alpha.

use serde::Serialize;

use crate::font_pipeline::common::error::{CompileError, Result};

const CHANNELS: usize = 4;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a fully transparent black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * CHANNELS],
        }
    }

    /// Wraps existing RGBA samples. Fails unless `data.len() == width * height * 4`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * CHANNELS {
            return Err(CompileError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Returns the RGBA sample at `(x, y)`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn check_region(&self, rect: Rect) -> Result<()> {
        let fits = rect.x.checked_add(rect.width).is_some_and(|r| r <= self.width)
            && rect.y.checked_add(rect.height).is_some_and(|b| b <= self.height);
        if fits {
            Ok(())
        } else {
            Err(CompileError::RegionOutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                bounds_width: self.width,
                bounds_height: self.height,
            })
        }
    }

    /// Borrows a read-only window onto `rect`.
    pub fn view(&self, rect: Rect) -> Result<PixelView<'_>> {
        self.check_region(rect)?;
        Ok(PixelView { buffer: self, rect })
    }

    /// Copies the `src` rectangle of `self` into `dst` with its top-left corner at `(dst_x, dst_y)`.
    pub fn copy_to(&self, dst: &mut PixelBuffer, src: Rect, dst_x: usize, dst_y: usize) -> Result<()> {
        self.check_region(src)?;
        dst.check_region(Rect::new(dst_x, dst_y, src.width, src.height))?;

        let row_bytes = src.width * CHANNELS;
        for row in 0..src.height {
            let from = self.index(src.x, src.y + row);
            let to = dst.index(dst_x, dst_y + row);
            dst.data[to..to + row_bytes].copy_from_slice(&self.data[from..from + row_bytes]);
        }
        Ok(())
    }

    /// Copies `rect` out into a new buffer of the same size.
    pub fn crop(&self, rect: Rect) -> Result<PixelBuffer> {
        let mut out = PixelBuffer::new(rect.width, rect.height);
        self.copy_to(&mut out, rect, 0, 0)?;
        Ok(out)
    }
}

/// A borrowed sub-rectangle of a [`PixelBuffer`]. Coordinates are relative to the view.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    buffer: &'a PixelBuffer,
    rect: Rect,
}

impl<'a> PixelView<'a> {
    /// `rect` must lie inside `buffer`; use [`PixelBuffer::view`] for untrusted rectangles.
    pub(crate) fn new(buffer: &'a PixelBuffer, rect: Rect) -> Self {
        debug_assert!(buffer.check_region(rect).is_ok());
        Self { buffer, rect }
    }

    pub fn width(&self) -> usize {
        self.rect.width
    }

    pub fn height(&self) -> usize {
        self.rect.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        debug_assert!(x < self.rect.width && y < self.rect.height);
        self.buffer.pixel(self.rect.x + x, self.rect.y + y)
    }

    /// Iterates the alpha samples of column `x`, top to bottom.
    pub fn column_alpha(&self, x: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.rect.height).map(move |y| self.pixel(x, y)[3])
    }

    pub fn to_buffer(&self) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.rect.width, self.rect.height);
        for y in 0..self.rect.height {
            let from = self.buffer.index(self.rect.x, self.rect.y + y);
            let to = out.index(0, y);
            let n = self.rect.width * CHANNELS;
            out.data[to..to + n].copy_from_slice(&self.buffer.data[from..from + n]);
        }
        out
    }
}
