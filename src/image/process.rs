//! Decode → transform → encode for a single file.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::recolor::{DarkRule, WhiteRule, recolor_image};
use super::trim::{BoundingBox, Tolerance, trim};

/// Errors raised while processing one image file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot read image `{}`", .0.display())]
    Read(PathBuf, #[source] image::ImageError),

    #[error("cannot create directory `{}`", .0.display())]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("cannot write image `{}`", .0.display())]
    Write(PathBuf, #[source] image::ImageError),

    #[error("cannot replace `{}`", .0.display())]
    Replace(PathBuf, #[source] std::io::Error),
}

/// One of the supported pixel transforms, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Dark pixels to white.
    Dark(DarkRule),
    /// Crop a uniform border.
    Trim(Tolerance),
    /// Near-white pixels to transparent.
    NoBackground(WhiteRule),
}

impl Operation {
    /// Short name used as the log prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dark(_) => "dark",
            Self::Trim(_) => "trim",
            Self::NoBackground(_) => "nobg",
        }
    }

    /// Run the transform on an in-memory image.
    pub fn apply(&self, mut img: RgbaImage) -> (RgbaImage, Change) {
        match self {
            Self::Dark(rule) => {
                let pixels = recolor_image(&mut img, |px| rule.apply(px));
                (img, Change::Recolored(pixels))
            }
            Self::NoBackground(rule) => {
                let pixels = recolor_image(&mut img, |px| rule.apply(px));
                (img, Change::Recolored(pixels))
            }
            Self::Trim(tolerance) => {
                let from = img.dimensions();
                let trimmed = trim(img, tolerance);
                let change = match trimmed.crop {
                    Some(crop) => Change::Cropped { from, to: crop },
                    None => Change::Uncropped,
                };
                (trimmed.image, change)
            }
        }
    }
}

/// What a transform did to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Number of pixels whose value changed.
    Recolored(usize),
    /// Original dimensions and the applied crop.
    Cropped { from: (u32, u32), to: BoundingBox },
    /// Nothing to trim.
    Uncropped,
}

/// Apply `op` to the image at `input` and write a PNG to `output`.
///
/// Nothing is written unless decoding and transforming succeed.
/// `input` and `output` may be the same path.
pub fn process_file(input: &Path, output: &Path, op: &Operation) -> Result<Change, ProcessError> {
    let img = image::open(input)
        .map_err(|err| ProcessError::Read(input.to_path_buf(), err))?
        .to_rgba8();

    let (processed, change) = op.apply(img);

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| ProcessError::CreateDir(dir.to_path_buf(), err))?;

    let like = if output.exists() { output } else { input };
    save_png(&processed, dir, output, like)?;

    Ok(change)
}

/// Encode into a temporary file next to `output`, then rename it over
/// `output`. The previous file stays intact until the rename.
///
/// The new file takes the permissions of `like`.
fn save_png(img: &RgbaImage, dir: &Path, output: &Path, like: &Path) -> Result<(), ProcessError> {
    let replace_err = |err| ProcessError::Replace(output.to_path_buf(), err);
    let write_err = |err| ProcessError::Write(output.to_path_buf(), err);

    let mut tmp = NamedTempFile::new_in(dir).map_err(replace_err)?;
    if let Ok(meta) = fs::metadata(like) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(replace_err)?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        img.write_to(&mut writer, ImageFormat::Png)
            .map_err(write_err)?;
        writer
            .flush()
            .map_err(|err| write_err(image::ImageError::IoError(err)))?;
    }

    tmp.persist(output)
        .map_err(|err| replace_err(err.error))?;
    Ok(())
}
