use serde::{Deserialize, Serialize};
use sheet_splitter::image::io::{load_rgba_image, save_tiles, write_json_file};
use sheet_splitter::image::ImageRgba8;
use sheet_splitter::{
    process_batch, DetectionParams, DetectionResult, EdgeDetectorKind, GridSpec, OutputFormat,
    SheetSplitter, SplitRequest,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SplitToolConfig {
    /// Sheets to split, at most 10 per run.
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_grid")]
    pub grid: GridSpec,
    #[serde(default)]
    pub detector: EdgeDetectorKind,
    #[serde(default)]
    pub rotation_deg: f32,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub params: DetectionParams,
    pub output: SplitOutputConfig,
}

fn default_grid() -> GridSpec {
    GridSpec::Auto
}

#[derive(Debug, Deserialize)]
pub struct SplitOutputConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<SplitToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let splitter = SheetSplitter::new(config.params).map_err(|e| e.to_string())?;
    let request = SplitRequest {
        grid: config.grid,
        detector: config.detector,
        rotation_deg: config.rotation_deg,
        format: config.format,
    };

    // Unreadable inputs are reported per file; the rest still run.
    let mut entries: Vec<SheetReport> = Vec::with_capacity(config.inputs.len());
    let mut loaded: Vec<(usize, ImageRgba8)> = Vec::with_capacity(config.inputs.len());
    for (i, path) in config.inputs.iter().enumerate() {
        entries.push(SheetReport::new(path));
        match load_rgba_image(path) {
            Ok(image) => loaded.push((i, image)),
            Err(err) => entries[i].error = Some(err.to_string()),
        }
    }

    let images: Vec<ImageRgba8> = loaded.iter().map(|(_, img)| img.clone()).collect();
    let outcomes = process_batch(&splitter, &images, &request).map_err(|e| e.to_string())?;

    for ((i, _), outcome) in loaded.iter().zip(outcomes) {
        let entry = &mut entries[*i];
        match outcome {
            Ok(outcome) => {
                let stem = config.inputs[*i]
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| format!("sheet{}", i + 1));
                for saved in save_tiles(&outcome.tiles, &config.output.dir, &stem, config.format) {
                    match saved {
                        Ok(path) => entry.tile_files.push(path),
                        Err(err) => entry.error = Some(err.to_string()),
                    }
                }
                entry.detection = Some(outcome.detection);
                entry.latency_ms = Some(outcome.latency_ms);
            }
            Err(err) => entry.error = Some(err.to_string()),
        }
    }

    let ok = entries.iter().filter(|e| e.error.is_none()).count();
    println!(
        "Split {ok}/{} sheets into {}",
        entries.len(),
        config.output.dir.display()
    );

    if let Some(report_path) = &config.output.report_json {
        let report = SplitReport {
            sheets: entries,
            output_dir: config.output.dir.clone(),
        };
        write_json_file(report_path, &report).map_err(|e| e.to_string())?;
        println!("Saved report to {}", report_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: split_sheet <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitReport {
    output_dir: PathBuf,
    sheets: Vec<SheetReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetReport {
    input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    detection: Option<DetectionResult>,
    tile_files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SheetReport {
    fn new(input: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            detection: None,
            tile_files: Vec::new(),
            latency_ms: None,
            error: None,
        }
    }
}
