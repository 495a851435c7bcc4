//! Rewrites decimal-comma exports into decimal-point CSV.
//!
//! The monitoring exports separate fields with `;`, so every `,` in them is a
//! decimal separator and can be replaced blindly. An export that used `,` as
//! its field delimiter would be corrupted by this step.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Token written in place of an empty quoted field.
pub const MISSING_TOKEN: &str = "NaN";

/// Normalizes a single line, keeping its line terminator.
pub fn normalize_line(line: &str) -> String {
    line.replace(',', ".").replace("\"\"", MISSING_TOKEN)
}

/// Streams `reader` into `writer` one line at a time.
///
/// Returns the number of lines written.
///
/// # Errors
///
/// Returns an `io::Error` if reading or writing fails.
pub fn normalize_stream<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<usize> {
    let mut line = String::new();
    let mut count = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        writer.write_all(normalize_line(&line).as_bytes())?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Path of the normalized copy: `processed_<name>` next to the input.
pub fn processed_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("processed_{name}"))
}

/// Normalizes `input` into `output`, creating or overwriting it.
///
/// # Errors
///
/// Returns a `LoadError` if the input cannot be opened, the output cannot be
/// created, or either side fails mid-stream.
pub fn normalize_file(input: &Path, output: &Path) -> Result<usize, LoadError> {
    let src = File::open(input).map_err(|source| LoadError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let dst = File::create(output).map_err(|source| LoadError::Create {
        path: output.to_path_buf(),
        source,
    })?;
    let lines = normalize_stream(BufReader::new(src), BufWriter::new(dst)).map_err(|source| {
        LoadError::Io {
            path: output.to_path_buf(),
            source,
        }
    })?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        lines,
        "normalized export"
    );
    Ok(lines)
}

/// Normalizes `input` into [`processed_path`] and returns that path.
///
/// # Errors
///
/// See [`normalize_file`].
pub fn normalize_alongside(input: &Path) -> Result<PathBuf, LoadError> {
    let output = processed_path(input);
    normalize_file(input, &output)?;
    Ok(output)
}
