//! Command-line replay driver.

use crate::app::{AppResult, ExportedFile, Sketchpad};
use crate::script::Script;
use crate::shortcuts::ShortcutRegistry;
use clap::Parser;
use rasterpad_core::config::AppConfig;
use rasterpad_core::input::ExportFormat;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Replay drawing input against a raster canvas")]
pub struct Cli {
    #[arg(help = "JSON input script to replay")]
    pub script: Option<PathBuf>,

    #[arg(help = "JSON configuration file", long)]
    pub config: Option<PathBuf>,

    #[arg(help = "Directory exported files are written to", long, short, default_value = ".")]
    pub out: PathBuf,

    #[arg(
        help = "Export the final canvas in these formats (png, jpeg, svg)",
        long,
        short,
        value_delimiter = ','
    )]
    pub export: Vec<ExportFormat>,

    #[arg(help = "Print keyboard shortcuts and exit", long, default_value_t = false)]
    pub shortcuts: bool,
}

/// Run the driver. Returns the paths of every file written.
pub fn run(cli: &Cli) -> AppResult<Vec<PathBuf>> {
    if cli.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(Vec::new());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let mut pad = Sketchpad::new(config)?;

    let mut files = Vec::new();
    if let Some(path) = &cli.script {
        let script = Script::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        files.extend(script.run(&mut pad, base_dir)?);
    }
    for format in &cli.export {
        files.push(pad.export(*format)?);
    }

    write_all(&files, &cli.out)
}

/// Write exports into `dir`, suffixing names that would collide.
fn write_all(files: &[ExportedFile], dir: &Path) -> AppResult<Vec<PathBuf>> {
    if files.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(dir)?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let mut file = file.clone();
        let suffix = format!(".{}", file.format.extension());
        let stem = file.file_name.trim_end_matches(&suffix).to_string();
        let mut n = 1;
        while !used.insert(file.file_name.clone()) {
            file.file_name = format!("{}-{}.{}", stem, n, file.format.extension());
            n += 1;
        }
        let path = file.write_to(dir)?;
        log::info!("Wrote {:?}", path);
        written.push(path);
    }
    Ok(written)
}
