use std::{num::NonZeroU64, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use pnginator::{
  pack_file, Compression, FormatOptions, PackOptions, DEFAULT_DEFLATE_LEVEL, DEFAULT_ZOPFLI_ITERATIONS,
};

/// Embed a script in a PNG that unpacks and runs it when opened as HTML.
#[derive(Parser, Debug)]
#[command(name = "pnginator", version)]
struct Cli {
  /// The script to pack.
  script: PathBuf,
  /// Where to write the PNG. Name it `.png.html` to open it in a browser.
  output: PathBuf,
  /// Use standard zlib deflate instead of zopfli.
  #[arg(long)]
  no_zopfli: bool,
  /// Number of zopfli iterations. More iterations take more time but can
  /// provide slightly better compression.
  #[arg(long, default_value_t = DEFAULT_ZOPFLI_ITERATIONS)]
  zopfli_iterations: NonZeroU64,
  /// Do not use zopfli block splitting.
  #[arg(long)]
  no_blocksplitting: bool,
  /// Write a valid PNG: keep the IEND chunk, don't overflow the custom chunk
  /// into its CRC, keep the IDAT CRC.
  #[arg(long)]
  no_format_hacks: bool,
  /// Do not show statistics.
  #[arg(long)]
  no_statistics: bool,
}
impl Cli {
  fn pack_options(&self) -> PackOptions {
    let compression = if self.no_zopfli {
      Compression::Deflate { level: DEFAULT_DEFLATE_LEVEL }
    } else {
      Compression::Zopfli {
        iterations: self.zopfli_iterations,
        block_splitting: !self.no_blocksplitting,
      }
    };
    PackOptions { compression, format: FormatOptions { apply_format_hacks: !self.no_format_hacks } }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let options = cli.pack_options();
  log::debug!("{options:?}");
  let stats = pack_file(&cli.script, &cli.output, &options).with_context(|| {
    format!("packing `{}` into `{}`", cli.script.display(), cli.output.display())
  })?;
  if !cli.no_statistics {
    println!("{stats}");
  }
  Ok(())
}

fn main() -> ExitCode {
  env_logger::init();
  let cli = Cli::parse();
  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("Error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

#[test]
fn test_cli_defaults_match_library_defaults() {
  let cli = Cli::try_parse_from(["pnginator", "in.js", "out.png.html"]).unwrap();
  assert_eq!(cli.zopfli_iterations, DEFAULT_ZOPFLI_ITERATIONS);
  assert_eq!(cli.pack_options(), PackOptions::default());

  let cli = Cli::try_parse_from([
    "pnginator",
    "--no-zopfli",
    "--no-format-hacks",
    "in.js",
    "out.png.html",
  ])
  .unwrap();
  let options = cli.pack_options();
  assert_eq!(options.compression, Compression::Deflate { level: DEFAULT_DEFLATE_LEVEL });
  assert!(!options.format.apply_format_hacks);

  assert!(Cli::try_parse_from(["pnginator", "--zopfli-iterations=0", "a", "b"]).is_err());
}
