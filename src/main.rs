use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use b64filter::backend;
use b64filter::params::Quality;
use b64filter::pipeline::{Pipeline, PipelineConfig};

/// Shared flags for commands that produce an image payload.
#[derive(clap::Args, Clone)]
struct OutputArgs {
    /// JPEG quality of the output payload (1-100)
    #[arg(long, default_value_t = 90)]
    quality: u32,

    /// Frame the output as a data URI instead of bare base64
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser)]
#[command(name = "b64filter")]
#[command(about = "Base64-in, base64-out image filters")]
#[command(long_about = "\
Base64-in, base64-out image filters

Reads a base64 image payload (bare or data-URI framed; JPEG, PNG, or WebP),
applies a filter, and writes the result to stdout as base64 JPEG.

Payload handling:

  input        a file containing the payload, or '-' for stdin
  data URIs    'data:image/png;base64,AAAA...' headers are stripped
  whitespace   surrounding whitespace is ignored

Filters:

  grayscale    single-channel conversion; oversized images are downscaled
               so the longer edge fits --max-dimension (aspect preserved)
  edges        edge map at the original resolution

Edge detection uses a hysteresis detector when compiled in (cargo feature
'canny', on by default) and falls back to a 3x3 find-edges kernel otherwise.
Run 'b64filter backend' to see what this build runs on. Set RUST_LOG=debug
for per-stage logging.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a payload to grayscale, downscaling oversized images
    Grayscale {
        /// Bound on the longer output edge, in pixels
        #[arg(long, default_value_t = 800)]
        max_dimension: u32,

        #[command(flatten)]
        output: OutputArgs,

        /// Payload file, or '-' for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Extract an edge map at the original resolution
    Edges {
        #[command(flatten)]
        output: OutputArgs,

        /// Payload file, or '-' for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Show which filter backend this build runs on
    Backend,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Grayscale {
            max_dimension,
            output,
            input,
        } => {
            let payload = read_payload(&input)?;
            let config = PipelineConfig {
                max_dimension,
                quality: Quality::new(output.quality),
                ..PipelineConfig::default()
            };
            let result = Pipeline::with_config(config).grayscale_filter(&payload)?;
            print_payload(&result, output.data_uri);
        }
        Command::Edges { output, input } => {
            let payload = read_payload(&input)?;
            let config = PipelineConfig {
                quality: Quality::new(output.quality),
                ..PipelineConfig::default()
            };
            let result = Pipeline::with_config(config).edge_detection_filter(&payload)?;
            print_payload(&result, output.data_uri);
        }
        Command::Backend => {
            println!("{}", Pipeline::new().backend_name());
            if !backend::canny_available() {
                println!("degraded: hysteresis edge detection not compiled in");
            }
        }
    }

    Ok(())
}

/// Read the payload from a file, or stdin when the path is '-'.
fn read_payload(input: &Path) -> std::io::Result<String> {
    if input.as_os_str() == "-" {
        let mut payload = String::new();
        std::io::stdin().read_to_string(&mut payload)?;
        Ok(payload)
    } else {
        std::fs::read_to_string(input)
    }
}

fn print_payload(payload: &str, data_uri: bool) {
    if data_uri {
        println!("data:image/jpeg;base64,{payload}");
    } else {
        println!("{payload}");
    }
}
