//! Binary PPM (`P6`) output for inspecting images.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image::{Image, HEIGHT, WIDTH};

const MAGIC: &str = "P6";
const MAX_VALUE: usize = 255;
const SUFFIX: &str = "cifar_image_output.ppm";

/// How dumped image files are named.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `<label>_cifar_image_output.ppm`. Images sharing a label overwrite
    /// each other; the last one written wins.
    #[default]
    Label,
    /// `<index>_<label>_cifar_image_output.ppm`.
    IndexedLabel,
}

impl FileNaming {
    /// Returns the file name for the image at `index` with `label`.
    pub fn file_name(&self, index: usize, label: i8) -> String {
        match *self {
            FileNaming::Label => format!("{}_{}", label, SUFFIX),
            FileNaming::IndexedLabel => format!("{}_{}_{}", index, label, SUFFIX),
        }
    }
}

/// Writes `image` as a binary PPM.
pub fn write_ppm<W: Write>(writer: &mut W, image: &Image) -> io::Result<()> {
    write!(writer, "{}\n{} {} {}\n", MAGIC, WIDTH, HEIGHT, MAX_VALUE)?;
    writer.write_all(image.as_interleaved())
}

/// Writes `image` into `dir`, named according to `naming`, replacing any
/// existing file. Returns the path written.
pub fn dump_image(
    dir: &Path,
    image: &Image,
    index: usize,
    label: i8,
    naming: FileNaming,
) -> Result<PathBuf> {
    let path = dir.join(naming.file_name(index, label));
    write_file(&path, image).map_err(|source| Error::OutputWriteError {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn write_file(path: &Path, image: &Image) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, image)?;
    writer.flush()
}
