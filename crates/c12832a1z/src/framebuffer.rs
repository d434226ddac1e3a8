//! In-memory framebuffer for the C12832A1Z.

use core::convert::TryFrom;

use crate::protocol::{
    self, BUFFER_SIZE, HEIGHT, ORIENTATION_SKEW, Orientation, PAGE_BYTES, PAGE_HEIGHT, PAGES,
    WIDTH,
};

/// Filler streamed in place of the bytes before the start of page 0.
static SKEW_PADDING: [u8; ORIENTATION_SKEW] = [0u8; ORIENTATION_SKEW];

/// 1bpp page-packed framebuffer.
///
/// Each byte holds eight vertical pixels of one column; bit 0 is the top row
/// of its page. Pixel `(x, y)` lives in byte `x + (y / 8) * 128`, bit `y % 8`.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
    if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
        return None;
    }

    let (x, y) = (x as usize, y as usize);
    Some((x + (y / PAGE_HEIGHT) * PAGE_BYTES, 1u8 << (y % PAGE_HEIGHT)))
}

impl FrameBuffer {
    /// Creates a new blank framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Switches every pixel off.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Switches every pixel off (`on = false`) or on (`on = true`).
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when the pixel is in bounds. Out-of-range writes leave the
    /// buffer untouched so shape algorithms may overscan the panel edges.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> bool {
        let Some((index, mask)) = locate(x, y) else {
            return false;
        };

        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (index, mask) = locate(x, y)?;
        Some((self.bytes[index] & mask) != 0)
    }

    /// Returns the 128 column bytes of page `0..4`.
    pub fn page(&self, page: usize) -> Option<&[u8; PAGE_BYTES]> {
        if page >= PAGES {
            return None;
        }

        let start = page * PAGE_BYTES;
        <&[u8; PAGE_BYTES]>::try_from(&self.bytes[start..start + PAGE_BYTES]).ok()
    }

    /// Returns the bytes streamed to the controller for `page`, split into a
    /// lead-in and the page itself.
    ///
    /// The lead-in is empty for [`Orientation::Top`]. For
    /// [`Orientation::Bottom`] it is the four bytes preceding the page, with
    /// zero filler standing in for the bytes before page 0.
    pub fn page_window(&self, page: usize, orientation: Orientation) -> Option<(&[u8], &[u8])> {
        let window = protocol::page_window(page, orientation)?;
        let body: &[u8] = self.page(page)?;
        let page_start = page * PAGE_BYTES;

        let lead = match usize::try_from(window.start) {
            Ok(start) => self.bytes.get(start..page_start)?,
            Err(_) => SKEW_PADDING.get(..window.start.unsigned_abs())?,
        };

        Some((lead, body))
    }

    /// Number of pixels currently on.
    pub fn lit_pixels(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}
