use anyhow::Result;
use clap::Parser;
use pixel_squeeze::config::SqueezeConfig;
use pixel_squeeze::FileOutcome;
use squeeze_scale::presets::{clamp_target_kb, BudgetPreset};
use std::path::PathBuf;

/// Budget-targeted WebP compression:
/// re-encodes each input at shrinking resolution until it fits the byte
/// budget or the scale floor is reached.
#[derive(Parser, Debug)]
#[command(name = "squeeze")]
#[command(about = "🗜  Compress images to fit a byte budget as WebP")]
#[command(long_about = "Compress raster images to fit under a byte budget by re-encoding them as WebP
at geometrically decreasing resolution. Quality stays fixed; only scale varies.")]
struct Args {
    /// Input image files
    #[arg(required = true, help = "Source images (PNG, JPEG, ...)")]
    inputs: Vec<PathBuf>,

    /// Byte budget per image
    #[arg(short, long, default_value = "500k",
          help = "Target size per image: 500 (KB), 500k (500 KB), 2m (2 MB)")]
    target: String,

    /// Named budget preset (overrides --target)
    #[arg(short, long,
          help = "Named budget: avatar (100 KB), email (500 KB), web (1 MB), print (5 MB)")]
    preset: Option<BudgetPreset>,

    /// Fixed encode quality
    #[arg(short, long, default_value_t = 0.97,
          help = "WebP quality in (0, 1]; held fixed while scale shrinks")]
    quality: f32,

    /// Output directory
    #[arg(short, long, help = "Directory for compressed files (default: next to each input)")]
    out_dir: Option<PathBuf>,

    /// Pause between attempts in milliseconds
    #[arg(long, default_value_t = 80,
          help = "Cooperative pause between attempts (0 to disable)")]
    delay_ms: u64,

    /// Emit JSON event records instead of text
    #[arg(long, help = "One JSON object per progress/terminal event on stdout")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Preset wins over the free-form target string.
    let target_kb = match args.preset {
        Some(preset) => preset.target_kb(),
        None => parse_target(&args.target)?,
    };

    let config = SqueezeConfig {
        inputs: args.inputs,
        target_kb,
        quality: args.quality,
        out_dir: args.out_dir,
        delay_ms: args.delay_ms,
        json: args.json,
    };

    config.validate().map_err(anyhow::Error::msg)?;
    let results = pixel_squeeze::squeeze_files(config.to_options()).await?;

    let mut failures = 0usize;
    for result in &results {
        match &result.outcome {
            FileOutcome::Fit {
                attempts, output, ..
            } => {
                println!(
                    "{} → {} ({} attempts)",
                    result.input.display(),
                    output.display(),
                    attempts
                );
            }
            FileOutcome::Closest {
                attempts,
                size_bytes,
            } => {
                println!(
                    "{}: budget not reachable, closest {} bytes after {} attempts",
                    result.input.display(),
                    size_bytes,
                    attempts
                );
            }
            FileOutcome::Cancelled { attempts } => {
                println!(
                    "{}: cancelled after {} attempts",
                    result.input.display(),
                    attempts
                );
            }
            FileOutcome::Failed { reason } => {
                failures += 1;
                eprintln!("{}: {}", result.input.display(), reason);
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Parse a target size string like "500", "500k", "2m" into KB, clamped to
/// the supported range.
fn parse_target(target: &str) -> Result<u32> {
    if let Ok(kb) = target.parse::<u32>() {
        return Ok(clamp_target_kb(kb));
    }

    // Lowercasing can change the byte length, so split on the lowered
    // string's own char boundaries.
    let lower = target.to_lowercase();
    let (num_str, unit) = if let Some(stripped) = lower.strip_suffix("kb") {
        (stripped, "k")
    } else if let Some(stripped) = lower.strip_suffix("mb") {
        (stripped, "m")
    } else {
        match lower.char_indices().next_back() {
            Some((idx, _)) => lower.split_at(idx),
            None => return Err(anyhow::anyhow!("Invalid target format: {}", target)),
        }
    };
    let num: u32 = num_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid number in target: {}", num_str))?;

    let kb = match unit {
        "k" => num,
        "m" => num.saturating_mul(1024),
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid target unit: {}. Use 'k' for KB, 'm' for MB",
                unit
            ))
        }
    };
    Ok(clamp_target_kb(kb))
}
