use burgers_waves::{
    presets::from_preset,
    riemann_solver::{CharacteristicFamily, CharacteristicResolution},
    sampling::{drive, frame_times, Frame, Grid, SampleSink},
    Composer, ComposerOptions, PiecewiseInitialData,
};
use clap::Parser;
use std::{
    error::Error,
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{self, PathBuf},
};
use tracing_subscriber::EnvFilter;
use yaml_rust::{Yaml, YamlLoader};

#[derive(Debug)]
pub enum ConfigError {
    MissingParameter(String),
    UnknownInitialConditionsKind(String),
    InvalidArrayFormat(Yaml),
    InvalidArrayLength(usize, usize),
    InvalidCount(String, i64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingParameter(name) => {
                write!(f, "Missing required parameter in configuration: {}", name)
            }
            ConfigError::UnknownInitialConditionsKind(name) => {
                write!(f, "Unknown kind of initial conditions configured: {}", name)
            }
            ConfigError::InvalidArrayFormat(value) => {
                write!(f, "Expected array of numbers but found: {:?}", value)
            }
            ConfigError::InvalidArrayLength(a, b) => {
                write!(f, "Expected array of length {}, but found {}", a, b)
            }
            ConfigError::InvalidCount(name, value) => {
                write!(f, "Expected a non-negative count for {}, but found {}", name, value)
            }
        }
    }
}

impl Error for ConfigError {}

/// Yaml only reports numbers with a decimal point or exponent as reals.
fn as_float(yaml: &Yaml) -> Option<f64> {
    match yaml {
        Yaml::Integer(i) => Some(*i as f64),
        _ => yaml.as_f64(),
    }
}

fn parse_floats(yaml: &Yaml, name: &str) -> Result<Vec<f64>, ConfigError> {
    match yaml.as_vec() {
        Some(arr) => arr
            .iter()
            .map(|y| as_float(y).ok_or_else(|| ConfigError::InvalidArrayFormat(yaml.clone())))
            .collect(),
        None => Err(ConfigError::MissingParameter(format!(
            "initial_conditions:{}",
            name
        ))),
    }
}

fn required_float(yaml: &Yaml, name: &str) -> Result<f64, ConfigError> {
    as_float(&yaml[name]).ok_or(ConfigError::MissingParameter(name.to_string()))
}

fn optional_count(yaml: &Yaml, name: &str, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = yaml[name].as_i64() else {
        return Ok(default);
    };
    usize::try_from(value).map_err(|_| ConfigError::InvalidCount(name.to_string(), value))
}

enum InitialConditionsCfg {
    Preset {
        name: String,
    },
    Config {
        breakpoints: Vec<f64>,
        states: Vec<f64>,
    },
}

impl InitialConditionsCfg {
    fn parse(yaml: &Yaml) -> Result<Self, ConfigError> {
        let kind = yaml["kind"].as_str().ok_or(ConfigError::MissingParameter(
            "initial_conditions:kind".to_string(),
        ))?;

        Ok(match kind {
            "preset" => {
                let name = yaml["name"]
                    .as_str()
                    .ok_or(ConfigError::MissingParameter(
                        "initial_conditions:name".to_string(),
                    ))?
                    .to_string();
                Self::Preset { name }
            }
            "config" => {
                let breakpoints = parse_floats(&yaml["breakpoints"], "breakpoints")?;
                let states = parse_floats(&yaml["states"], "states")?;
                if states.len() != breakpoints.len() + 1 {
                    return Err(ConfigError::InvalidArrayLength(
                        breakpoints.len() + 1,
                        states.len(),
                    ));
                }
                Self::Config {
                    breakpoints,
                    states,
                }
            }
            _ => return Err(ConfigError::UnknownInitialConditionsKind(kind.to_string())),
        })
    }

    fn build(self) -> burgers_waves::Result<PiecewiseInitialData> {
        match self {
            Self::Preset { name } => from_preset(&name),
            Self::Config {
                breakpoints,
                states,
            } => PiecewiseInitialData::new(breakpoints, states),
        }
    }
}

struct ComposerCfg {
    options: ComposerOptions,
}

impl ComposerCfg {
    fn parse(yaml: &Yaml) -> Self {
        let defaults = ComposerOptions::default();
        Self {
            options: ComposerOptions {
                horizon: as_float(&yaml["horizon"]).unwrap_or(defaults.horizon),
                speed_tolerance: as_float(&yaml["speed_tolerance"])
                    .unwrap_or(defaults.speed_tolerance),
            },
        }
    }
}

struct SamplingCfg {
    x_min: f64,
    x_max: f64,
    num_x: usize,
    t_end: f64,
    num_frames: usize,
    prefix: String,
}

impl SamplingCfg {
    fn parse(yaml: &Yaml) -> Result<Self, ConfigError> {
        let prefix = yaml["prefix"]
            .as_str()
            .ok_or(ConfigError::MissingParameter("sampling:prefix".to_string()))?;
        Ok(Self {
            x_min: required_float(yaml, "x_min")?,
            x_max: required_float(yaml, "x_max")?,
            num_x: optional_count(yaml, "num_x", 401)?,
            t_end: required_float(yaml, "t_end")?,
            num_frames: optional_count(yaml, "num_frames", 21)?,
            prefix: prefix.to_string(),
        })
    }
}

struct CharacteristicsCfg {
    resolution: Option<CharacteristicResolution>,
}

impl CharacteristicsCfg {
    fn parse(yaml: &Yaml) -> Result<Self, Box<dyn Error>> {
        if yaml.is_badvalue() {
            return Ok(Self { resolution: None });
        }
        let defaults = CharacteristicResolution::default();
        let resolution = CharacteristicResolution::new(
            as_float(&yaml["half_width"]).unwrap_or(defaults.half_width),
            optional_count(yaml, "lines", defaults.lines)?,
        )?;
        Ok(Self {
            resolution: Some(resolution),
        })
    }
}

struct Config {
    initial_conditions: InitialConditionsCfg,
    composer: ComposerCfg,
    sampling: SamplingCfg,
    characteristics: CharacteristicsCfg,
}

impl Config {
    fn parse(file: PathBuf) -> Result<Self, Box<dyn Error>> {
        let docs = YamlLoader::load_from_str(&fs::read_to_string(file)?)?;
        let config_yml = &docs[0];

        Ok(Self {
            initial_conditions: InitialConditionsCfg::parse(&config_yml["initial_conditions"])?,
            composer: ComposerCfg::parse(&config_yml["composer"]),
            sampling: SamplingCfg::parse(&config_yml["sampling"])?,
            characteristics: CharacteristicsCfg::parse(&config_yml["characteristics"])?,
        })
    }
}

/// Writes every frame to its own csv file.
struct CsvSink {
    prefix: String,
}

impl SampleSink for CsvSink {
    type Error = std::io::Error;

    fn write_frame(&mut self, index: usize, frame: &Frame) -> Result<(), Self::Error> {
        let mut writer = BufWriter::new(File::create(format!("{}{:04}.csv", self.prefix, index))?);
        writeln!(writer, "# t = {}", frame.time)?;
        writeln!(writer, "x,q")?;
        for (x, q) in frame.x.iter().zip(frame.q.iter()) {
            writeln!(writer, "{},{}", x, q)?;
        }
        writer.flush()
    }
}

fn write_events(composer: &Composer, prefix: &str) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(format!("{}events.csv", prefix))?);
    writeln!(writer, "x,t,left,right,result,kind")?;
    for event in composer.events() {
        let (result, kind) = match event.result.and_then(|id| composer.segment(id)) {
            Some(segment) => (
                segment.id().to_string(),
                format!("{:?}", segment.solution().wave_kind()),
            ),
            None => ("none".to_string(), "Degenerate".to_string()),
        };
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            event.x, event.t, event.left, event.right, result, kind
        )?;
    }
    writer.flush()
}

fn write_characteristics(
    composer: &Composer,
    resolution: CharacteristicResolution,
    prefix: &str,
) -> Result<(), Box<dyn Error>> {
    let mut writer = BufWriter::new(File::create(format!("{}characteristics.csv", prefix))?);
    writeln!(writer, "interface,family,x0,speed,t_end")?;
    let initial_waves = composer
        .segments()
        .iter()
        .filter(|segment| segment.t_created() == 0.);
    for segment in initial_waves {
        for characteristic in segment.solution().characteristics(resolution)? {
            let family = match characteristic.family {
                CharacteristicFamily::Left => "left",
                CharacteristicFamily::Right => "right",
                CharacteristicFamily::Fan => "fan",
            };
            let t_end = characteristic
                .t_end
                .map_or("inf".to_string(), |t| t.to_string());
            writeln!(
                writer,
                "{},{},{},{},{}",
                segment.interfaces().start(),
                family,
                segment.x0() + characteristic.start_point().x,
                characteristic.speed,
                t_end
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[derive(Parser)]
pub struct Cli {
    /// The path to the config file to read
    #[clap(parse(from_os_str))]
    pub config: path::PathBuf,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // parse command line parameters
    let args = Cli::parse();

    // read configuration
    let config = Config::parse(args.config)?;

    // Solve
    let initial_data = config.initial_conditions.build()?;
    tracing::info!(
        breakpoints = ?initial_data.breakpoints(),
        states = ?initial_data.states(),
        "Composing exact solution"
    );
    let composer = Composer::with_options(initial_data, config.composer.options)?;
    for event in composer.events() {
        tracing::info!(x = event.x, t = event.t, "Wave collision");
    }

    // Sample
    let sampling = &config.sampling;
    let grid = Grid::new(sampling.x_min, sampling.x_max, sampling.num_x)?;
    let times = frame_times(sampling.t_end, sampling.num_frames)?;
    let mut sink = CsvSink {
        prefix: sampling.prefix.clone(),
    };
    drive(&composer, &grid, &times, &mut sink)?;
    write_events(&composer, &sampling.prefix)?;
    if let Some(resolution) = config.characteristics.resolution {
        write_characteristics(&composer, resolution, &sampling.prefix)?;
    }
    tracing::info!(frames = times.len(), prefix = %sampling.prefix, "Wrote output");

    println!("Done!");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn load(source: &str) -> Yaml {
        YamlLoader::load_from_str(source).unwrap().remove(0)
    }

    #[test]
    fn test_counts() {
        let yaml = load("num_x: 11\nnum_frames: -3\n");
        assert_eq!(optional_count(&yaml, "num_x", 401).unwrap(), 11);
        assert_eq!(optional_count(&yaml, "missing", 401).unwrap(), 401);
        assert!(matches!(
            optional_count(&yaml, "num_frames", 21),
            Err(ConfigError::InvalidCount(name, -3)) if name == "num_frames"
        ));
    }

    #[test]
    fn test_negative_sampling_counts() {
        let yaml = load("x_min: -1\nx_max: 1\nt_end: 2.\nnum_x: -1\nprefix: out_\n");
        assert!(matches!(
            SamplingCfg::parse(&yaml),
            Err(ConfigError::InvalidCount(_, -1))
        ));
    }

    #[test]
    fn test_characteristics_cfg() {
        assert!(CharacteristicsCfg::parse(&load("lines: -2\n")).is_err());
        assert!(CharacteristicsCfg::parse(&load("half_width: -1.\n")).is_err());
        let cfg = CharacteristicsCfg::parse(&load("half_width: 2.\nlines: 4\n")).unwrap();
        assert_eq!(
            cfg.resolution,
            Some(CharacteristicResolution {
                half_width: 2.,
                lines: 4
            })
        );
        let missing = load("other: 1\n");
        assert!(CharacteristicsCfg::parse(&missing["characteristics"])
            .unwrap()
            .resolution
            .is_none());
    }
}
