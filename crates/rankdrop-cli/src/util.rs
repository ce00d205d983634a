use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use rankdrop_engine::Board;
use rankdrop_evaluator::Weights;

/// Pretty-prints `value` as JSON to `path`, or to stdout when no path is given.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize + ?Sized,
{
    let target = path.map_or_else(|| "stdout".to_owned(), |path| path.display().to_string());
    let mut writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {target}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {target}"))?;
    Ok(())
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} file: {}", path.display()))
}

/// Reads a weights file, or returns the defaults when no path is given.
pub fn read_weights_file(path: Option<&Path>) -> anyhow::Result<Weights> {
    path.map_or_else(|| Ok(Weights::default()), |path| read_json_file("weights", path))
}

/// Reads a board drawn with `#` and `.`, top row first.
pub fn read_board_file(path: &Path, height: usize) -> anyhow::Result<Board> {
    let art = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file: {}", path.display()))?;
    Board::from_ascii(height, &art)
        .with_context(|| format!("Failed to parse board file: {}", path.display()))
}
