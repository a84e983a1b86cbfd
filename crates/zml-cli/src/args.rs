//! Command-line argument definitions for the ZML CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Styling options override the matching values from the
//! configuration file.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the ZML diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input ZML file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output PNG file [default: <INPUT>.png]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory containing the font files
    #[arg(short, long)]
    pub font_dir: Option<String>,

    /// Title font as FILE[,SIZE]
    #[arg(short, long)]
    pub title_font: Option<String>,

    /// Element label font as FILE[,SIZE]
    #[arg(short, long)]
    pub element_font: Option<String>,

    /// Connection label font as FILE[,SIZE]
    #[arg(short, long)]
    pub label_font: Option<String>,

    /// Image width in pixels [default: 1024]
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Image height in pixels [default: 1024]
    #[arg(long)]
    pub height: Option<u32>,

    /// Background color name, hex value or color function [default: white]
    #[arg(short, long)]
    pub background_color: Option<String>,

    /// Enable debug logging, overriding --log-level
    #[arg(short, long)]
    pub debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The output path, defaulting to the input path with `.png` appended.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => PathBuf::from(format!("{}.png", self.input)),
        }
    }

    /// The effective log level name.
    pub fn log_level(&self) -> &str {
        if self.debug { "debug" } else { &self.log_level }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["zml", "flow.zml"]).unwrap();

        assert_eq!(args.input, "flow.zml");
        assert_eq!(args.output_path(), PathBuf::from("flow.zml.png"));
        assert_eq!(args.log_level(), "info");
        assert!(args.width.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "zml",
            "-f",
            "/fonts",
            "-t",
            "Bold.ttf,30",
            "-e",
            "Regular.ttf",
            "-l",
            "Italic.ttf,12",
            "-w",
            "800",
            "--height",
            "600",
            "-b",
            "#202020",
            "-o",
            "out.png",
            "-d",
            "flow.zml",
        ])
        .unwrap();

        assert_eq!(args.font_dir.as_deref(), Some("/fonts"));
        assert_eq!(args.title_font.as_deref(), Some("Bold.ttf,30"));
        assert_eq!(args.element_font.as_deref(), Some("Regular.ttf"));
        assert_eq!(args.label_font.as_deref(), Some("Italic.ttf,12"));
        assert_eq!(args.width, Some(800));
        assert_eq!(args.height, Some(600));
        assert_eq!(args.background_color.as_deref(), Some("#202020"));
        assert_eq!(args.output_path(), PathBuf::from("out.png"));
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let err = Args::try_parse_from(["zml"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
