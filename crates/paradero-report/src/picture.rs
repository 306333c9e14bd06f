//! Pictures downloaded from Drive, normalised to PNG for embedding

use docx_rs::{Pic, Run};
use image::{GenericImageView, ImageFormat};
use paradero_core::error::{ParaderoError, Result};
use std::io::Cursor;

pub const EMU_PER_INCH: f64 = 914_400.0;

/// Width of project and stops location figures
pub const FIGURE_WIDTH_IN: f64 = 5.3;
/// Width of photos inside evidence blocks
pub const EVIDENCE_WIDTH_IN: f64 = 6.0;
/// Width of the footer logo
pub const LOGO_WIDTH_IN: f64 = 0.65;
/// Tallest picture that fits the page body; narrower widths are used past it
pub const MAX_HEIGHT_IN: f64 = 9.0;

/// Longest edge kept when embedding; larger photos are scaled down
const MAX_EDGE_PX: u32 = 2000;

/// A decoded picture re-encoded as PNG
#[derive(Clone)]
pub struct Picture {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

impl Picture {
    /// Decode any format the `image` crate understands
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut img = image::load_from_memory(bytes)
            .map_err(|e| ParaderoError::Document(format!("undecodable image: {}", e)))?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ParaderoError::Document("empty image".to_string()));
        }
        if width.max(height) > MAX_EDGE_PX {
            img = img.thumbnail(MAX_EDGE_PX, MAX_EDGE_PX);
        }

        let (width, height) = img.dimensions();
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)
            .map_err(|e| ParaderoError::Document(format!("png encoding failed: {}", e)))?;

        Ok(Self {
            png: png.into_inner(),
            width,
            height,
        })
    }

    /// Size in EMU at the given display width, keeping the aspect ratio.
    /// Tall pictures shrink until they are at most `MAX_HEIGHT_IN` high.
    pub fn extent(&self, width_in: f64) -> (u32, u32) {
        let ratio = f64::from(self.height) / f64::from(self.width);
        let width = width_in.min(MAX_HEIGHT_IN / ratio) * EMU_PER_INCH;
        let height = width * ratio;
        (width.round() as u32, height.round() as u32)
    }

    /// A run holding the picture at the given display width
    pub fn run(&self, width_in: f64) -> Run {
        let (cx, cy) = self.extent(width_in);
        Run::new().add_image(Pic::new(&self.png).size(cx, cy))
    }
}
