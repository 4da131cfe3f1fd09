use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use polars::prelude::*;

use crate::mode::ScalingMode;
use crate::table::ResultTable;

/// Extension of the written results file.
pub const OUTPUT_EXTENSION: &str = "csv";

/// Writes a [ResultTable] to a file that does not exist yet.
///
/// The first candidate is `<dir>/<base>.csv`. If that is taken, `<base>_1.csv`, `<base>_2.csv`
/// and so on are tried in order, so earlier results are never overwritten.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    base: String,
}

impl OutputWriter {
    pub fn new<P>(dir: P, base: impl Into<String>) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            dir: dir.into(),
            base: base.into(),
        }
    }

    /// The path for the `n`th candidate, where `0` is the unsuffixed name.
    fn candidate(&self, n: usize) -> PathBuf {
        let file_name = if n == 0 {
            format!("{}.{OUTPUT_EXTENSION}", self.base)
        } else {
            format!("{}_{n}.{OUTPUT_EXTENSION}", self.base)
        };
        self.dir.join(file_name)
    }

    /// The first candidate path that is not present on disk.
    pub fn next_free_path(&self) -> PathBuf {
        (0..)
            .map(|n| self.candidate(n))
            .find(|path| !path.exists())
            .unwrap_or_else(|| self.candidate(0))
    }

    /// Create the first free candidate file.
    ///
    /// Creation uses [File::create_new], so a name taken between probing and creating moves on
    /// to the next candidate instead of truncating someone else's file.
    fn create(&self) -> anyhow::Result<(PathBuf, File)> {
        for n in 0.. {
            let path = self.candidate(n);
            if path.exists() {
                continue;
            }
            match File::create_new(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("Output file {} appeared while probing", path.display());
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to create {}", path.display()));
                }
            }
        }

        anyhow::bail!("No free output file name for {}", self.base)
    }

    /// Write `table` with the headers for `mode` and return the path written to.
    pub fn write(&self, table: &ResultTable, mode: ScalingMode) -> anyhow::Result<PathBuf> {
        let mut frame = table
            .to_data_frame(mode)
            .context("Failed to build results frame")?;

        let (path, mut file) = self.create()?;
        log::debug!("Writing {} table entries to {}", frame.height(), path.display());

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;

        Ok(path)
    }
}
