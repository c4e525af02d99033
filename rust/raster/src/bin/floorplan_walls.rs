// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: extract consolidated wall lines from a floor plan
//!
//! Reads either a raster image (PNG/JPEG) or a JSON file holding raw
//! `[x1, y1, x2, y2]` detections, and prints the normalized wall list.
//!
//! Usage:
//!   floorplan-walls <input> [options]

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use wallscan_lines::{consolidate, to_json, ConsolidationConfig, LineSegment};
use wallscan_raster::{decode_grayscale, detect_segments, RasterConfig};

struct Options {
    input: String,
    config: ConsolidationConfig,
    raw: bool,
    stats: bool,
    output: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let opts = parse_args(&args)?;
    let raw = load_segments(&opts.input)?;

    if opts.raw {
        return emit(&to_json(&raw)?, opts.output.as_deref());
    }

    let result = consolidate(&raw, &opts.config)
        .with_context(|| format!("Cannot consolidate lines from '{}'", opts.input))?;

    if opts.stats {
        let s = &result.stats;
        eprintln!("Input segments:   {}", s.input_count);
        eprintln!("Clusters:         {}", s.cluster_count);
        eprintln!("  kept:           {}", s.kept_clusters);
        eprintln!("  dropped:        {}", s.dropped_clusters);
        eprintln!("Output walls:     {}", s.output_count);
        if let Some(b) = &result.bounds {
            eprintln!(
                "Pixel bounds:     ({:.1}, {:.1}) - ({:.1}, {:.1})",
                b.min_x, b.min_y, b.max_x, b.max_y
            );
        }
    }

    emit(&to_json(&result.lines)?, opts.output.as_deref())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options {
        input: args[1].clone(),
        config: ConsolidationConfig::final_output(),
        raw: false,
        stats: false,
        output: None,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--delta-theta" => {
                opts.config.delta_theta = value(args, &mut i)?
                    .parse()
                    .context("Invalid delta-theta value")?;
            }
            "--delta-rho" => {
                opts.config.delta_rho = value(args, &mut i)?
                    .parse()
                    .context("Invalid delta-rho value")?;
            }
            "--min-parallel" => {
                opts.config.min_parallel_lines = value(args, &mut i)?
                    .parse()
                    .context("Invalid min-parallel value")?;
            }
            "--output" => {
                opts.output = Some(value(args, &mut i)?.to_string());
            }
            "--raw" => opts.raw = true,
            "--stats" => opts.stats = true,
            other => {
                print_usage();
                bail!("Unknown option: {}", other);
            }
        }
        i += 1;
    }

    Ok(opts)
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("Missing value for {}", args[*i - 1]))
}

/// Raw detections from a JSON list or from the raster detector
fn load_segments(input: &str) -> Result<Vec<LineSegment>> {
    let bytes = fs::read(input).with_context(|| format!("Cannot read '{}'", input))?;

    let is_json = Path::new(input)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let segments: Vec<LineSegment> = serde_json::from_slice(&bytes)
            .with_context(|| format!("'{}' is not a list of [x1, y1, x2, y2] arrays", input))?;
        tracing::info!(segments = segments.len(), "Loaded raw segments");
        return Ok(segments);
    }

    let grayscale =
        decode_grayscale(&bytes).with_context(|| format!("Cannot decode image '{}'", input))?;
    tracing::info!(
        width = grayscale.width(),
        height = grayscale.height(),
        "Loaded image"
    );
    Ok(detect_segments(&grayscale, &RasterConfig::default())?)
}

fn emit(json: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write '{}'", path))?;
            eprintln!("Written to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: floorplan-walls <input> [options]");
    eprintln!();
    eprintln!("Input is a PNG/JPEG floor plan or a .json list of [x1, y1, x2, y2]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --delta-theta <f>   Angle bucket width in radians (default: 1.0)");
    eprintln!("  --delta-rho <f>     Distance bucket width in pixels (default: 4.0)");
    eprintln!("  --min-parallel <n>  Minimum cluster size to keep (default: 5)");
    eprintln!("  --raw               Print raw detections without consolidation");
    eprintln!("  --stats             Print consolidation counters to stderr");
    eprintln!("  --output <path>     Write JSON to a file instead of stdout");
}
