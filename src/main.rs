//! Native viewer binary.

use std::path::PathBuf;

use clap::Parser;
use tiltscroll::{options::Options, Viewer};

#[derive(Parser, Debug)]
#[command(name = "tiltscroll")]
#[command(about = "Tilt-driven 3D panel scroller", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML options file; missing keys keep their defaults
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 390, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 844, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => match Options::load(path) {
            Ok(options) => {
                log::info!("loaded options from {}", path.display());
                options
            }
            Err(e) => {
                log::error!("{}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let result = Viewer::builder()
        .with_options(options)
        .with_size(cli.width, cli.height)
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_phone_sized_window() {
        let cli = Cli::try_parse_from(["tiltscroll"]).unwrap();
        assert_eq!((cli.width, cli.height), (390, 844));
        assert!(cli.options.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "tiltscroll",
            "--options",
            "tilt.toml",
            "--width",
            "1280",
            "--height",
            "800",
        ])
        .unwrap();
        assert_eq!(cli.options, Some(PathBuf::from("tilt.toml")));
        assert_eq!((cli.width, cli.height), (1280, 800));
    }

    #[test]
    fn rejects_zero_and_non_numeric_sizes() {
        assert!(Cli::try_parse_from(["tiltscroll", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["tiltscroll", "--height", "tall"]).is_err());
        assert!(Cli::try_parse_from(["tiltscroll", "--depth", "3"]).is_err());
    }
}
