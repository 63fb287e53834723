//! A fixed-size RGBA surface for painting decoded tile sheets.

use crate::tilesheet::{self, SCALE, SHEET_LEN};
use std::io::{self, Write};

/// Width and height of the surface a sheet is rendered onto.
pub const SURFACE_SIZE: usize = 1000;

pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// An owned RGBA8 pixel buffer. Painting is the only mutation; there
/// is no shared drawing context.
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Creates a surface cleared to black.
    pub fn new(width: usize, height: usize) -> Bitmap {
        let mut bitmap = Bitmap {
            width,
            height,
            data: vec![0; width * height * 4],
        };
        bitmap.clear(BLACK);
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixels, row-major RGBA.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let base = (y * self.width + x) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[base..base + 4]);
        px
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.data.chunks_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Fills a rectangle, silently clipping whatever falls outside
    /// the surface.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: [u8; 4]) {
        let x_end = self.width.min(x.saturating_add(w));
        let y_end = self.height.min(y.saturating_add(h));

        for row in y..y_end {
            for col in x..x_end {
                let base = (row * self.width + col) * 4;
                self.data[base..base + 4].copy_from_slice(&color);
            }
        }
    }

    /// Clears the surface to black, then paints `sheet` decoded as a
    /// tile sheet, each pixel as a [`SCALE`]-sided block. Only the
    /// first [`SHEET_LEN`] bytes of `sheet` are consumed. Pixels with
    /// alpha 0 paint nothing and leave the clear color showing.
    pub fn render_sheet(&mut self, sheet: &[u8]) {
        self.clear(BLACK);

        let sheet = &sheet[..sheet.len().min(SHEET_LEN)];
        for px in tilesheet::decode(sheet) {
            if px.a == 0 {
                continue;
            }
            self.fill_rect(px.x, px.y, SCALE, SCALE, [px.r, px.g, px.b, 255]);
        }
    }

    /// Writes the surface as a binary PPM (P6). Alpha has already been
    /// composited over the clear color, so dropping it loses nothing.
    pub fn write_ppm<W: Write>(&self, dst: &mut W) -> io::Result<()> {
        write!(dst, "P6\n{} {}\n255\n", self.width, self.height)?;
        for px in self.data.chunks(4) {
            dst.write_all(&px[..3])?;
        }
        Ok(())
    }
}

/// Renders a texture blob onto the standard 1000x1000 surface.
pub fn render(sheet: &[u8]) -> Bitmap {
    let mut bitmap = Bitmap::new(SURFACE_SIZE, SURFACE_SIZE);
    bitmap.render_sheet(sheet);
    bitmap
}
