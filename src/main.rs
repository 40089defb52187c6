use anyhow::Context;
use clap::{Parser, ValueEnum};
use imgico::{IcoConfig, ImageRenderer, ImageSource, SvgConfig, DEFAULT_SIZES};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    Ico,
    Svg,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Ico => "ico",
            Format::Svg => "svg",
        }
    }
}

/// Converts an image into ICO or SVG icons, one file per size.
#[derive(Debug, Parser)]
#[command(name = "imgico", version)]
struct Cli {
    /// Input image path
    input: PathBuf,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        ignore_case = true,
        default_value_t = Format::Ico
    )]
    format: Format,

    /// Comma-separated icon sizes, each between 1 and 256
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES
    )]
    sizes: Vec<u32>,

    /// Output directory (default: a new imgico-<timestamp> directory)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

//===========================================================================//

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(out_dir) => {
            println!(
                "Extracted {} images to {}",
                cli.format.extension().to_uppercase(),
                out_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    // Read the input once; every size renders from the same bytes.
    let source = ImageSource::Path(cli.input.clone());
    let source = ImageSource::Bytes(source.load()?.into_owned());
    for &size in cli.sizes.iter() {
        imgico::IconSize::new(size)?;
    }
    let out_dir = match cli.out_dir {
        Some(ref dir) => dir.clone(),
        None => timestamped_dir_name(),
    };
    fs::create_dir_all(&out_dir).with_context(|| {
        format!("Failed to create directory {}", out_dir.display())
    })?;
    let renderer = ImageRenderer::new();
    for &size in cli.sizes.iter() {
        let data = match cli.format {
            Format::Ico => {
                let config = IcoConfig::with_sizes(&[size]);
                imgico::to_ico(&renderer, &source, &config)?
            }
            Format::Svg => {
                let config =
                    SvgConfig { size: Some(size), ..SvgConfig::default() };
                imgico::to_svg(&renderer, &source, &config)?.into_bytes()
            }
        };
        let file_name = format!("{}.{}", size, cli.format.extension());
        let path = out_dir.join(file_name);
        write_output(&path, &data)?;
    }
    Ok(out_dir)
}

fn timestamped_dir_name() -> PathBuf {
    let timestamp = chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace(|c: char| c == ':' || c == '.', "-");
    PathBuf::from(format!("imgico-{}", timestamp))
}

fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    fs::write(path, data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "wrote icon");
    Ok(())
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{timestamped_dir_name, Cli, Format};
    use clap::Parser;

    #[test]
    fn defaults_match_library_defaults() {
        let cli = Cli::parse_from(["imgico", "logo.png"]);
        assert_eq!(cli.format, Format::Ico);
        assert_eq!(cli.sizes, imgico::DEFAULT_SIZES.to_vec());
        assert!(cli.out_dir.is_none());
    }

    #[test]
    fn parses_format_and_sizes() {
        let args = ["imgico", "logo.png", "-f", "SVG", "-s", "16,48"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.format, Format::Svg);
        assert_eq!(cli.sizes, vec![16, 48]);
    }

    #[test]
    fn timestamped_dir_has_no_separators() {
        let name = timestamped_dir_name();
        let name = name.to_str().unwrap();
        assert!(name.starts_with("imgico-"));
        assert!(!name.contains(':'));
        assert!(!name.contains('.'));
    }
}

//===========================================================================//
