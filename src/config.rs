//! Command line configuration shared by the viewer and the dump tool.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};

use crate::ByteOrder;

/// Location the logger's files are copied to for plotting.
pub const DEFAULT_PATH: &str = "data_plot/adc_log.bin";

/// ADC0 is sampled at 4 kHz by the logger firmware.
pub const DEFAULT_SAMPLE_RATE: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub path: PathBuf,
    pub byte_order: ByteOrder,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            byte_order: Default::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl Configuration {
    pub fn command(name: &'static str) -> Command {
        Command::new(name)
            .about("Load a raw log of 16-bit ADC samples")
            .arg(
                Arg::new("path")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_PATH)
                    .help("Sample log file"),
            )
            .arg(
                Arg::new("byte-order")
                    .short('b')
                    .long("byte-order")
                    .value_parser(value_parser!(ByteOrder))
                    .default_value(ByteOrder::default().name())
                    .help("Byte order of samples in the log (little, big, or native)"),
            )
            .arg(
                Arg::new("sample-rate")
                    .short('r')
                    .long("sample-rate")
                    .value_parser(value_parser!(u32))
                    .default_value("4000")
                    .help("Sample rate in Hz"),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Configuration {
        let defaults = Configuration::default();
        Configuration {
            path: matches.get_one::<PathBuf>("path").cloned().unwrap_or(defaults.path),
            byte_order: matches.get_one::<ByteOrder>("byte-order").copied()
                .unwrap_or(defaults.byte_order),
            sample_rate: matches.get_one::<u32>("sample-rate").copied()
                .unwrap_or(defaults.sample_rate),
        }
    }

    /// Parse the process arguments, exiting with a usage message if they are invalid.
    pub fn from_args(name: &'static str) -> Configuration {
        Self::from_matches(&Self::command(name).get_matches())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<Configuration, clap::Error> {
        Configuration::command("adclog")
            .try_get_matches_from(std::iter::once("adclog").chain(args.iter().copied()))
            .map(|matches| Configuration::from_matches(&matches))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), Configuration::default());
        assert_eq!(Configuration::default().path, PathBuf::from("data_plot/adc_log.bin"));
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["capture/a0007.bin", "--byte-order", "big", "-r", "500"]).unwrap();
        assert_eq!(config, Configuration {
            path: PathBuf::from("capture/a0007.bin"),
            byte_order: ByteOrder::Big,
            sample_rate: 500,
        });
    }

    #[test]
    fn test_invalid_byte_order() {
        assert!(parse(&["-b", "pdp"]).is_err());
    }
}
