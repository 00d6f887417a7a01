use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Five coloured spheres over a large grey one
    Spheres,
    /// Spheres scattered from `--seed`
    Random,
    /// An OBJ model given by `--mesh`
    Mesh,
}

#[derive(Parser, Debug)]
#[command(name = "phongtracer")]
#[command(about = "Multithreaded Phong ray tracer written in rust")]
pub struct CliArguments {
    #[arg(short = 'W', long, default_value = "800")]
    pub width: usize,

    #[arg(short = 'H', long, default_value = "800")]
    pub height: usize,

    /// Sub-samples per axis for each pixel, 0 for a single unreflected ray
    #[arg(short = 's', long, default_value = "2")]
    pub supersamples: usize,

    /// Total threads, the main thread included. Defaults to every core
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    #[arg(short = 'r', long, default_value = "8")]
    pub reflections: usize,

    #[arg(long, action)]
    pub shadows: bool,

    /// Lens radius in pixels, enables depth of field
    #[arg(long)]
    pub aperture: Option<f64>,

    #[arg(long, default_value = "8")]
    pub aperture_samples: usize,

    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneKind,

    #[arg(long, required_if_eq("scene", "mesh"))]
    pub mesh: Option<PathBuf>,

    #[arg(long, default_value = "1")]
    pub seed: u64,

    #[arg(short = 'o', long, default_value = "render.png")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[arg(long, action)]
    pub no_progress: bool,
}
