use clap::{App, Arg, ArgMatches, SubCommand};
use icogen::{ClipboardArt, IconDir, InvalidImageError, PixelFormat};
use log::{error, info};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use thiserror::Error;

//===========================================================================//

const DEFAULT_OUTPUT: &str = "icon.ico";
const DEFAULT_SIZES: &str = "16,32,48";
const DEFAULT_DEPTH: &str = "32";
const DEFAULT_STYLE: &str = "scaled";

//===========================================================================//

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    InvalidImage(#[from] InvalidImageError),
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

//===========================================================================//

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    let matches = App::new("icogen")
        .version("0.1")
        .about("Generates clipboard ICO files")
        .subcommand(
            SubCommand::with_name("generate")
                .about("Draws the clipboard icon and writes an ICO file")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path (default: icon.ico)"),
                )
                .arg(
                    Arg::with_name("sizes")
                        .takes_value(true)
                        .value_name("LIST")
                        .short("s")
                        .long("sizes")
                        .help("Sets icon sizes (default: 16,32,48)"),
                )
                .arg(
                    Arg::with_name("depth")
                        .takes_value(true)
                        .value_name("BPP")
                        .short("d")
                        .long("depth")
                        .possible_values(&["24", "32"])
                        .help("Sets bits per pixel (default: 32)"),
                )
                .arg(
                    Arg::with_name("style")
                        .takes_value(true)
                        .value_name("STYLE")
                        .long("style")
                        .possible_values(&["scaled", "grid"])
                        .help("Sets art style (default: scaled)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists icons in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    let result = match matches.subcommand() {
        ("list", Some(submatches)) => list(submatches),
        ("generate", Some(submatches)) => generate(Some(submatches)),
        _ => generate(None),
    };
    if let Err(err) = result {
        error!("{}", err);
        process::exit(1);
    }
}

//===========================================================================//

fn generate(matches: Option<&ArgMatches>) -> Result<(), CliError> {
    let value = |name: &str, default: &'static str| -> String {
        matches
            .and_then(|m| m.value_of(name))
            .unwrap_or(default)
            .to_string()
    };
    let out_path = PathBuf::from(value("output", DEFAULT_OUTPUT));
    let sizes = parse_sizes(&value("sizes", DEFAULT_SIZES))?;
    let (format, channel_order) = match value("depth", DEFAULT_DEPTH).as_str()
    {
        "24" => (PixelFormat::Rgb, "BGR"),
        _ => (PixelFormat::Rgba, "BGRA"),
    };
    let style = value("style", DEFAULT_STYLE);
    let art = match ClipboardArt::from_name(&style) {
        Some(art) => art,
        None => {
            return Err(CliError::Usage(format!("Unknown style {:?}", style)))
        }
    };

    let mut images = Vec::with_capacity(sizes.len());
    for &size in sizes.iter() {
        images.push(art.render(size, format)?);
    }
    let bytes = icogen::encode(&images)?;
    info!("Writing {} images to {:?}", images.len(), out_path);
    fs::write(&out_path, &bytes)
        .map_err(|source| CliError::Io { path: out_path.clone(), source })?;

    let dimensions: Vec<String> =
        sizes.iter().map(|size| format!("{}x{}", size, size)).collect();
    println!("Generated {} ({} bytes)", out_path.display(), bytes.len());
    println!(
        "Contains: {} pixels ({}-bit {})",
        dimensions.join(", "),
        format.channels() * 8,
        channel_order
    );
    Ok(())
}

fn list(matches: &ArgMatches) -> Result<(), CliError> {
    let path = PathBuf::from(matches.value_of("ico").unwrap_or_default());
    let io_error = |source| CliError::Io { path: path.clone(), source };
    let file = fs::File::open(&path).map_err(io_error)?;
    let icondir = IconDir::read(file).map_err(io_error)?;
    for (index, entry) in icondir.entries().iter().enumerate() {
        println!(
            "{:5}: {}x{} BMP, {} bpp, {} bytes",
            index,
            entry.width(),
            entry.height(),
            entry.bits_per_pixel(),
            entry.data().len()
        );
    }
    Ok(())
}

//===========================================================================//

fn parse_sizes(list: &str) -> Result<Vec<u32>, CliError> {
    let mut sizes = Vec::new();
    for item in list.split(',') {
        match item.trim().parse::<u32>() {
            Ok(size) if size >= 1 => sizes.push(size),
            _ => {
                return Err(CliError::Usage(format!(
                    "Invalid icon size {:?} (must be a positive integer)",
                    item
                )))
            }
        }
    }
    Ok(sizes)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::parse_sizes;

    #[test]
    fn parses_size_list() {
        assert_eq!(parse_sizes("16,32, 48").unwrap(), vec![16, 32, 48]);
        assert_eq!(parse_sizes("256").unwrap(), vec![256]);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(parse_sizes("0").is_err());
        assert!(parse_sizes("16,,32").is_err());
        assert!(parse_sizes("big").is_err());
    }
}

//===========================================================================//
