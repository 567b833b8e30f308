use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use crate::atlas::AtlasPage;
use crate::cli::CompressionLevel;
use crate::error::QuiltError;

/// Save one atlas page as PNG, optionally recompressed with oxipng
pub fn save_page_image(
    page: &AtlasPage,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    // Encode to PNG in memory
    let mut png_data = Cursor::new(Vec::new());
    page.image
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| QuiltError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let output_data = if let Some(level) = compress {
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
            QuiltError::PngCompress {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?
    } else {
        png_data.into_inner()
    };

    fs::write(path, output_data).map_err(|e| QuiltError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
