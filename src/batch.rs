// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageBuffer, Pixel};
use log::{debug, error, info};
use ndarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::ScrambleError;
use crate::extract::Sample;
use crate::scramble::{ScrambleReport, Scrambler};

/// Suffix inserted before the extension of output files.
pub const OUTPUT_SUFFIX: &str = "_shuffled";

/// Settings for processing a directory of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// File extensions to pick up, without the dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Name of the output directory, created inside the input directory.
    pub output_dir_name: String,
    /// Seed string. Each image gets its own generator derived from it.
    pub seed: Option<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["bmp".into()],
            output_dir_name: "output_data".into(),
            seed: None,
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Output files written.
    pub processed: Vec<PathBuf>,
    /// Input files that failed, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// List files in `dir` (not recursive) whose extension is in `extensions`.
///
/// Result is sorted by path.
pub fn find_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut ret = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(OsStr::to_str) else {
            continue;
        };
        if extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            ret.push(path);
        }
    }
    ret.sort_unstable();
    Ok(ret)
}

/// Output file name for an input path, e.g. `cat.bmp` -> `cat_shuffled.bmp`.
pub fn output_name(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_stem()?.to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    Some(name.into())
}

/// Random generator for one image.
///
/// With a seed, the generator depends only on the seed and the file name,
/// so parallel runs give the same result as sequential ones.
pub fn image_rng(seed: Option<&str>, file_name: &OsStr) -> Xoshiro256StarStar {
    match seed {
        Some(seed) => {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.update([0u8]);
            hasher.update(file_name.to_string_lossy().as_bytes());
            Xoshiro256StarStar::from_seed(hasher.finalize().into())
        }
        None => Xoshiro256StarStar::from_entropy(),
    }
}

fn scramble_buffer<P, R>(
    scrambler: &Scrambler,
    buf: &ImageBuffer<P, Vec<P::Subpixel>>,
    random: &mut R,
) -> Result<(ImageBuffer<P, Vec<P::Subpixel>>, ScrambleReport), ScrambleError>
where
    P: Pixel,
    P::Subpixel: Sample,
    R: Rng + ?Sized,
{
    let (width, height) = buf.dimensions();
    let arr = <ArrayView3<P::Subpixel>>::from_shape(
        (height as usize, width as usize, P::CHANNEL_COUNT as usize),
        buf.as_raw(),
    )
    .map_err(|e| ScrambleError::UnsupportedImage(e.to_string()))?;

    let (out, report) = scrambler.scramble_with_report(arr, random)?;
    debug_assert!(out.is_standard_layout());

    let out = ImageBuffer::from_raw(width, height, out.into_raw_vec()).ok_or_else(|| {
        ScrambleError::UnsupportedImage("output buffer size mismatch".into())
    })?;
    Ok((out, report))
}

/// Scramble a decoded image, keeping its color type.
pub fn scramble_image<R: Rng + ?Sized>(
    scrambler: &Scrambler,
    im: &DynamicImage,
    random: &mut R,
) -> Result<(DynamicImage, ScrambleReport), ScrambleError> {
    macro_rules! dispatch {
        ($($variant:ident),* $(,)?) => {
            match im {
                $(DynamicImage::$variant(buf) => {
                    let (out, report) = scramble_buffer(scrambler, buf, random)?;
                    (DynamicImage::$variant(out), report)
                })*
                _ => {
                    return Err(ScrambleError::UnsupportedImage(format!(
                        "unsupported color type {:?}",
                        im.color(),
                    )))
                }
            }
        };
    }

    Ok(dispatch!(
        ImageLuma8,
        ImageLumaA8,
        ImageRgb8,
        ImageRgba8,
        ImageLuma16,
        ImageLumaA16,
        ImageRgb16,
        ImageRgba16,
        ImageRgb32F,
        ImageRgba32F,
    ))
}

/// Read, scramble and write one file.
pub fn scramble_file<R: Rng + ?Sized>(
    scrambler: &Scrambler,
    input: &Path,
    output: &Path,
    random: &mut R,
) -> Result<ScrambleReport, Error> {
    let im = ImageReader::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("cannot decode {}", input.display()))?;

    let (out, report) = scramble_image(scrambler, &im, random)
        .with_context(|| format!("cannot scramble {}", input.display()))?;

    out.save(output)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(report)
}

/// Scramble every matching image in `input_dir`.
///
/// Images are processed in parallel. A failing image is logged and recorded
/// in the summary without stopping the others.
pub fn run(
    input_dir: &Path,
    scrambler: &Scrambler,
    config: &BatchConfig,
) -> Result<BatchSummary, Error> {
    if !input_dir.is_dir() {
        bail!("{} is not a directory", input_dir.display());
    }

    let files = find_images(input_dir, &config.extensions)?;
    info!(
        "Found {} image(s) in {} (extensions: {})",
        files.len(),
        input_dir.display(),
        config.extensions.join(", "),
    );

    let out_dir = input_dir.join(&config.output_dir_name);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let results: Vec<_> = files
        .into_par_iter()
        .map(|path| {
            let res = (|| -> Result<PathBuf, Error> {
                let name = output_name(&path)
                    .with_context(|| format!("no file name in {}", path.display()))?;
                let output = out_dir.join(name);
                let mut random = image_rng(
                    config.seed.as_deref(),
                    path.file_name().unwrap_or_default(),
                );
                let report = scramble_file(scrambler, &path, &output, &mut random)?;
                debug!(
                    "{}: {} tile(s) retained, {} moved",
                    path.display(),
                    report.retained(),
                    report.moved(),
                );
                Ok(output)
            })();
            (path, res)
        })
        .collect();

    let mut summary = BatchSummary::default();
    for (path, res) in results {
        match res {
            Ok(output) => {
                info!("{} -> {}", path.display(), output.display());
                summary.processed.push(output);
            }
            Err(e) => {
                error!("{}: {e:#}", path.display());
                summary.failed.push((path, e));
            }
        }
    }

    info!(
        "Processed {} of {} image(s)",
        summary.processed.len(),
        summary.total(),
    );
    Ok(summary)
}
