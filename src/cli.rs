// ============================================================================
// PixelShift CLI — headless encrypt/decrypt via command-line arguments
// ============================================================================
//
// Usage examples:
//   pixelshift --input photo.png --key 42 --output locked.png
//   pixelshift -i locked.png -k 42 --decrypt -o restored.png
//   pixelshift -i photo.jpg -k 7 --format bmp          (writes photo_encrypted.bmp)
//   pixelshift -i photo.png -k 300 --verify -v
//
// No window is opened in CLI mode. One file per run.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use image::RgbImage;

use crate::components::dialogs::SaveFormat;
use crate::io::{DEFAULT_QUALITY, encode_and_write, load_rgb};
use crate::ops::key::parse_key;
use crate::ops::shift::{Direction, shift_image};
use crate::{log_err, log_info, log_warn};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// PixelShift headless image processor.
#[derive(Parser, Debug)]
#[command(
    name = "pixelshift",
    about = "Shift every RGB channel of an image by a key, modulo 256",
    long_about = "Encrypt (add the key) or decrypt (subtract the key) every red, green\n\
                  and blue value of an image, wrapping modulo 256, without opening the\n\
                  window. Reads PNG, JPEG, BMP and GIF; writes PNG, JPEG or BMP.\n\n\
                  This is a reversible pixel shuffle, not real encryption.\n\n\
                  Example:\n  \
                  pixelshift --input photo.png --key 42 --output locked.png\n  \
                  pixelshift -i locked.png -k 42 --decrypt -o photo.png"
)]
pub struct CliArgs {
    /// Input image file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Integer key. 1-255 is the usual range; larger values wrap modulo 256.
    #[arg(short, long, value_name = "KEY", allow_hyphen_values = true)]
    pub key: String,

    /// Subtract the key instead of adding it.
    #[arg(short, long)]
    pub decrypt: bool,

    /// Output file path. Defaults to `<stem>_encrypted.<ext>` or
    /// `<stem>_decrypted.<ext>` next to the input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: png, jpeg, bmp.
    /// When omitted, the format is inferred from --output's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100, default 90). JPEG is lossy, so a decrypted
    /// JPEG will not match the original exactly.
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_name = "1-100",
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Reload the written file and check that the opposite shift restores
    /// the input. Fails for lossy output such as JPEG.
    #[arg(long)]
    pub verify: bool,

    /// Print timing and the resolved output path.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process arguments.
    /// Used by `main()` to route before creating an eframe window.
    pub fn is_cli_mode() -> bool {
        is_cli_mode_in(std::env::args())
    }

    pub fn direction(&self) -> Direction {
        if self.decrypt {
            Direction::Inverse
        } else {
            Direction::Forward
        }
    }
}

fn is_cli_mode_in<I: IntoIterator<Item = String>>(args: I) -> bool {
    args.into_iter()
        .any(|a| a == "--input" || a == "-i" || a.starts_with("--input="))
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run the CLI and return an OS exit code.
/// `0` = saved, `1` = anything went wrong.
pub fn run(args: CliArgs) -> ExitCode {
    let start = Instant::now();
    match run_one(&args) {
        Ok(output) => {
            log_info!("cli: wrote {}", output.display());
            if args.verbose {
                println!(
                    "  → {} ({:.0}ms)",
                    output.display(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
            } else {
                println!("Image saved to {}", output.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_err!("cli: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Processing pipeline
// ============================================================================

fn run_one(args: &CliArgs) -> Result<PathBuf, String> {
    // -- Step 1: Validate key --------------------------------------------
    let key = parse_key(&args.key).map_err(|e| format!("invalid key '{}': {}", args.key, e))?;

    let format = parse_format(args.format.as_deref(), args.output.as_deref())?;
    if let Some(warning) = format_mismatch(format, args.output.as_deref()) {
        log_warn!("cli: {}", warning);
        eprintln!("warning: {}", warning);
    }
    let direction = args.direction();
    let output = build_output_path(&args.input, args.output.as_deref(), direction, format)
        .ok_or_else(|| format!("cannot determine output path for '{}'", args.input.display()))?;

    // -- Step 2: Load ----------------------------------------------------
    let loaded = load_rgb(&args.input).map_err(|e| format!("load failed: {}", e))?;
    if args.verbose {
        println!("{} ← {}", loaded.info, args.input.display());
        if format.supports_quality() {
            println!("  {} quality {}", format.label(), args.quality);
        }
    }

    // -- Step 3: Shift ---------------------------------------------------
    let result = shift_image(&loaded.pixels, key, direction);

    // -- Step 4: Save ----------------------------------------------------
    encode_and_write(&result, &output, format, args.quality)
        .map_err(|e| format!("save failed: {}", e))?;

    // -- Step 5: Verify (optional) ---------------------------------------
    if args.verify {
        verify_written(&output, &loaded.pixels, key, direction)?;
        if args.verbose {
            println!("  verified: {} restores the input", output.display());
        }
    }

    Ok(output)
}

// ============================================================================
// Helpers
// ============================================================================

/// Choose the [`SaveFormat`] from the `--format` string or infer it from the
/// output file extension. Defaults to PNG when neither is given.
fn parse_format(format_arg: Option<&str>, output: Option<&Path>) -> Result<SaveFormat, String> {
    if let Some(f) = format_arg {
        return SaveFormat::from_name(f)
            .ok_or_else(|| format!("unsupported format '{}' (use png, jpeg or bmp)", f));
    }

    Ok(output.map(SaveFormat::from_path).unwrap_or_default())
}

/// Warn when `--format` disagrees with the extension of `--output`. The
/// file is still written in the requested format.
fn format_mismatch(format: SaveFormat, output: Option<&Path>) -> Option<String> {
    let out = output?;
    let ext = out.extension()?.to_string_lossy().to_ascii_lowercase();
    if format.filter_extensions().contains(&ext.as_str()) {
        return None;
    }
    Some(format!(
        "writing {} data to '{}' (extension .{} suggests another format)",
        format.label(),
        out.display(),
        ext
    ))
}

/// Decode what was written and undo the shift. The output is kept either
/// way; the error only reports that it cannot restore `input`.
fn verify_written(
    output: &Path,
    input: &RgbImage,
    key: i64,
    direction: Direction,
) -> Result<(), String> {
    let written = load_rgb(output).map_err(|e| format!("verify: reload failed: {}", e))?;
    let restored = shift_image(&written.pixels, key, direction.inverse());
    if restored != *input {
        return Err(format!(
            "verification failed: {} does not restore the input",
            output.display()
        ));
    }
    Ok(())
}

/// Compute the output path.
///
/// Priority:
/// 1. `--output` (explicit path)
/// 2. Next to the input: `<stem>_<encrypted|decrypted>.<ext>`
fn build_output_path(
    input: &Path,
    output: Option<&Path>,
    direction: Direction,
    format: SaveFormat,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return Some(out.to_path_buf());
    }

    let stem = input.file_stem()?.to_string_lossy().into_owned();
    let parent = input.parent().unwrap_or(Path::new("."));
    Some(parent.join(format!(
        "{}_{}.{}",
        stem,
        direction.past_tense(),
        format.extension()
    )))
}
