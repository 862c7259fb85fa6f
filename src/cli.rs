use clap::{Parser, ValueEnum};
use log::LevelFilter;

use raycaster::Pattern;

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

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PatternArg {
    Square,
    Circle,
    Hexagon,
}

impl From<PatternArg> for Pattern {
    fn from(pattern: PatternArg) -> Self {
        match pattern {
            PatternArg::Square => Pattern::Square,
            PatternArg::Circle => Pattern::Circle,
            PatternArg::Hexagon => Pattern::Hexagon,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    /// White ball under a blue cube
    Demo,
    /// Reflective balls over a floor
    Mirrors,
}

#[derive(Parser)]
#[command(name = "raycaster")]
#[command(about = "Renders a small scene of spheres and cubes to a PNG")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "100")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "100")]
    pub height: u32,

    /// Sub-pixel sampling layout
    #[arg(long, value_enum, default_value = "circle")]
    pub pattern: PatternArg,

    /// Samples per pixel, at most the size of the pattern
    #[arg(long, short = 's', default_value = "5")]
    pub samples: usize,

    #[arg(long, value_enum, default_value = "demo")]
    pub scene: SceneArg,

    /// Camera keys applied in order before the final frame (w a s d q e z x + -)
    #[arg(long, default_value = "")]
    pub keys: String,

    #[arg(short, long, default_value = "render.png")]
    pub output: String,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
