use crate::msa::{PlotType, SeqWindow};
use crate::utils::Result;
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="msaplot",
          version=&**FULL_VERSION,
          about="Multiple sequence alignment figure renderer",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) {}. Distributed under the MIT license.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Render an alignment figure to an image file")]
    Plot(PlotArgs),
    #[clap(about = "Render a JSON request to a JSON image payload")]
    Render(RenderArgs),
    #[clap(about = "Validate a plot request without drawing it")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["request_path", "fasta_path"])))]
#[command(arg_required_else_help(true))]
pub struct PlotArgs {
    #[clap(short = 'r')]
    #[clap(long = "request")]
    #[clap(help = "JSON plot request (optionally gzipped)")]
    #[clap(value_name = "REQUEST")]
    #[arg(value_parser = check_file_exists)]
    pub request_path: Option<PathBuf>,

    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(help = "Aligned FASTA file (optionally gzipped)")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub fasta_path: Option<PathBuf>,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "image")]
    #[clap(help = "Output image path")]
    #[clap(value_name = "IMAGE")]
    #[arg(value_parser = check_image_path)]
    pub output_path: String,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "plot-type")]
    #[clap(value_name = "PLOT_TYPE")]
    #[clap(help = "Type of plot to generate")]
    #[arg(value_parser = check_plot_type)]
    pub plot_type: Option<String>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "panels")]
    #[clap(value_name = "PANELS")]
    #[clap(help = "Comma-separated panels of a complex plot (msa, consensus, logo, annotation)")]
    #[clap(value_delimiter = ',')]
    pub panels: Option<Vec<String>>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "window")]
    #[clap(value_name = "START-END")]
    #[clap(help = "Half-open column window to display, 0-based")]
    #[arg(value_parser = window_from_string)]
    pub window: Option<SeqWindow>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "wrap")]
    #[clap(value_name = "COLUMNS")]
    #[clap(help = "Wrap the alignment every COLUMNS columns")]
    #[arg(value_parser = wrap_in_range)]
    pub wrap: Option<usize>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "figsize")]
    #[clap(value_name = "WxH")]
    #[clap(help = "Figure size in inches")]
    #[arg(value_parser = figsize_from_string)]
    pub figsize: Option<(f64, f64)>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "annotations")]
    #[clap(value_name = "ANNOTATIONS")]
    #[clap(help = "Tab-separated annotation intervals: START END LABEL [COLOR]")]
    #[arg(value_parser = check_file_exists)]
    pub annotations_path: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "font-family")]
    #[clap(value_name = "FONT_FAMILY")]
    #[clap(help = "Font family used for all text")]
    pub font_family: Option<String>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct RenderArgs {
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "request")]
    #[clap(help = "JSON plot request, or - for standard input")]
    #[clap(value_name = "REQUEST")]
    #[arg(value_parser = check_input_path)]
    pub request_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Write the JSON payload here instead of standard output")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<String>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "request")]
    #[clap(help = "JSON plot request, or - for standard input")]
    #[clap(value_name = "REQUEST")]
    #[arg(value_parser = check_input_path)]
    pub request_path: PathBuf,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn check_image_path(s: &str) -> Result<String> {
    let prefix_check = check_prefix_path(s)?;
    let path = Path::new(s);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("svg") | Some("png") | Some("pdf") => Ok(prefix_check),
        _ => Err("Image must have an extension of .svg, .png, or .pdf".to_string()),
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_input_path(s: &str) -> Result<PathBuf> {
    if s == "-" {
        return Ok(PathBuf::from(s));
    }
    check_file_exists(s)
}

fn check_plot_type(s: &str) -> Result<String> {
    s.parse::<PlotType>().map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

fn window_from_string(s: &str) -> Result<SeqWindow> {
    SeqWindow::from_string(s).map_err(|e| e.to_string())
}

fn wrap_in_range(s: &str) -> Result<usize> {
    let wrap: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid column count", s))?;
    if wrap >= 1 {
        Ok(wrap)
    } else {
        Err("Wrap width must be at least 1".into())
    }
}

fn figsize_from_string(s: &str) -> Result<(f64, f64)> {
    let error_msg = || format!("Expected figure size as WIDTHxHEIGHT, got: {}", s);
    let (width, height) = s.split_once(['x', 'X']).ok_or_else(error_msg)?;
    let width: f64 = width.trim().parse().map_err(|_| error_msg())?;
    let height: f64 = height.trim().parse().map_err(|_| error_msg())?;
    if !(width > 0.0 && height > 0.0) {
        return Err(format!(
            "Figure dimensions must be positive, got: {}x{}",
            width, height
        ));
    }
    Ok((width, height))
}
