//! # Image Files
//!
//! Thin layer between image files on disk and the pixel grids used by
//! [`processing`](crate::processing). Input may be any format the `image`
//! crate can decode; output is always PNG, since a lossy format would destroy
//! the hidden bits.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use log::info;
use std::path::{Path, PathBuf};

use crate::processing::{self, EmbedSummary};

/// Load an image and convert it to 8-bit RGBA.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("Unable to load \"{}\"", path.display()))?;
    Ok(img.to_rgba8())
}

/// Write `img` to `path` as PNG, whatever the extension says.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Unable to write image \"{}\"", path.display()))?;
    Ok(())
}

/// Output path next to `input`: `dir/foo.png` -> `dir/foo<suffix>.png`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.png", stem, suffix))
}

/// Load `input`, hide `message` in it and save the result to `output`.
pub fn hide_in_file(input: &Path, output: &Path, message: &[u8]) -> Result<EmbedSummary> {
    let mut img = load_image(input)?;
    let summary = processing::hide(message, &mut img)?;
    save_png(&img, output)?;

    info!(
        "Hid {} bytes in {} ({} of {} bits used)",
        summary.message_bytes,
        output.display(),
        summary.bits_written,
        summary.capacity_bits
    );
    Ok(summary)
}

/// Load `path` and recover the raw message hidden in it.
pub fn reveal_from_file(path: &Path) -> Result<Vec<u8>> {
    let img = load_image(path)?;
    let message = processing::reveal(&img)
        .with_context(|| format!("No readable message in \"{}\"", path.display()))?;
    info!("Recovered {} bytes from {}", message.len(), path.display());
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("small_kitten.png"), "_out"),
            PathBuf::from("small_kitten_out.png")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/pics/cat.jpg"), "_stego"),
            PathBuf::from("/tmp/pics/cat_stego.png")
        );
    }

    #[test]
    fn test_load_missing_image() {
        let err = load_image("/nonexistent/kitten.png").unwrap_err();
        assert!(err.to_string().contains("Unable to load"));
    }
}
