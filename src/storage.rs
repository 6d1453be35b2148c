use crate::assemble::DrawCommand;
use crate::chart::ChartOptions;
use crate::layout::ChartLayout;
use crate::models::Dataset;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Read and validate a dataset from a JSON file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    Dataset::from_json_str(&text).with_context(|| format!("parsing dataset {}", path.display()))
}

/// Read chart options from a JSON file; missing fields take their defaults.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<ChartOptions> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

/// Save drawing instructions as a pretty JSON array.
pub fn save_instructions_json<P: AsRef<Path>>(commands: &[DrawCommand], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(commands)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a computed layout as pretty JSON.
pub fn save_layout_json<P: AsRef<Path>>(layout: &ChartLayout, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(layout)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
