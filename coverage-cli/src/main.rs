mod report;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use spray_coverage_core::coverage::parse_model_param;
use spray_coverage_core::{
    compare_models, sweep_turns, try_evaluate, AreaConversion, EvaluationConfig,
    IdealAreaMethod, LossModel, LossModelKind, SprayInputError, SprayParameters,
};
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

/// Agricultural drone spray coverage calculator
#[derive(Parser, Debug)]
#[command(name = "coverage-cli")]
#[command(about = "Area covered by one drone tank, with and without turn losses", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Drone speed in m/s
    #[arg(short, long, default_value_t = 5.0)]
    speed: f64,

    /// Spray swath width in m
    #[arg(short, long, default_value_t = 5.5)]
    width: f64,

    /// Pump discharge in L/min (kg/min for granules)
    #[arg(short, long, default_value_t = 3.33)]
    flow: f64,

    /// Tank capacity in L (kg for granules)
    #[arg(short, long, default_value_t = 10.0)]
    tank: f64,

    /// Number of turns made while emptying the tank
    #[arg(short = 'n', long, default_value_t = 12)]
    turns: u32,

    /// Turn-loss model
    #[arg(short, long, value_enum, default_value_t = ModelArg::Exponential)]
    model: ModelArg,

    /// Model parameter as key=value (eta, percent, duration, ks, kw); repeatable
    #[arg(short = 'p', long = "model-param", value_parser = parse_model_param)]
    model_params: Vec<(String, f64)>,

    /// Square-metres-per-acre constant
    #[arg(long, value_enum, default_value_t = ConversionArg::Canonical)]
    conversion: ConversionArg,

    /// Custom square metres per acre (overrides --conversion)
    #[arg(long)]
    sqm_per_acre: Option<f64>,

    /// Ideal-area derivation
    #[arg(long, value_enum, default_value_t = MethodArg::ApplicationRate)]
    method: MethodArg,

    /// Decimal places for areas (3-5)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=5))]
    precision: u8,

    /// Show intermediate quantities
    #[arg(short, long)]
    breakdown: bool,

    /// Evaluate every turn count from 0 up to this value
    #[arg(long, conflicts_with = "compare")]
    sweep_to: Option<u32>,

    /// Evaluate all four loss models side by side
    #[arg(short, long)]
    compare: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); the environment log filter takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    /// Real = Ideal x eta^N
    #[value(alias = "per-turn-exponential")]
    Exponential,
    /// Real = Ideal x (1 - p/100)^N
    #[value(alias = "linear-percent-per-turn")]
    Linear,
    /// Turn time as a share of tank spray time
    #[value(alias = "time-fraction-loss")]
    TimeFraction,
    /// Speed and swath-width penalties
    #[value(alias = "speed-width-efficiency")]
    SpeedWidth,
}

impl From<ModelArg> for LossModelKind {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Exponential => LossModelKind::PerTurnExponential,
            ModelArg::Linear => LossModelKind::LinearPercentPerTurn,
            ModelArg::TimeFraction => LossModelKind::TimeFractionLoss,
            ModelArg::SpeedWidth => LossModelKind::SpeedWidthEfficiency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ConversionArg {
    /// 4046.86 m² per acre
    Canonical,
    /// 4047 m² per acre (rounded)
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Litres per acre from the application rate
    ApplicationRate,
    /// Swept area over the tank's spray time
    SprayTime,
}

/// Inputs echoed alongside JSON output
#[derive(Serialize)]
struct JsonReport<'a, T: Serialize> {
    parameters: &'a SprayParameters,
    config: &'a EvaluationConfig,
    results: T,
}

impl Args {
    fn parameters(&self) -> Result<SprayParameters, SprayInputError> {
        let loss_model = LossModel::from_kind_params(self.model.into(), &self.model_params)?;
        let params = SprayParameters::default()
            .with_speed(self.speed)
            .with_spray_width(self.width)
            .with_flow_rate(self.flow)
            .with_tank_capacity(self.tank)
            .with_turn_count(self.turns)
            .with_loss_model(loss_model);
        params.validate()?;
        Ok(params)
    }

    fn config(&self) -> Result<EvaluationConfig, SprayInputError> {
        let conversion = match (self.sqm_per_acre, self.conversion) {
            (Some(value), _) => {
                if !(value.is_finite() && value > 0.0) {
                    return Err(SprayInputError::NotPositive {
                        field: "sqm_per_acre",
                        value,
                    });
                }
                AreaConversion::custom(value)
            }
            (None, ConversionArg::Canonical) => AreaConversion::CANONICAL,
            (None, ConversionArg::Legacy) => AreaConversion::LEGACY_APPROXIMATE,
        };
        let ideal_method = match self.method {
            MethodArg::ApplicationRate => IdealAreaMethod::ApplicationRate,
            MethodArg::SprayTime => IdealAreaMethod::SprayTime,
        };
        Ok(EvaluationConfig {
            conversion,
            ideal_method,
        })
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(report: &JsonReport<'_, T>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let params = args.parameters()?;
    let config = args.config()?;
    let precision = usize::from(args.precision);

    for out in params.out_of_range_fields() {
        warn!(
            "{} is outside the calculator range {}..={}",
            out.field,
            out.range.start(),
            out.range.end()
        );
    }
    debug!(?params, ?config, "Parsed inputs");

    if let Some(max_turns) = args.sweep_to {
        let points = sweep_turns(&params, &config, 0..=max_turns);
        if args.json {
            print_json(&JsonReport {
                parameters: &params,
                config: &config,
                results: &points,
            })?;
        } else {
            print!("{}", report::render_sweep(&points, precision));
        }
    } else if args.compare {
        let results = compare_models(&params, &config);
        if args.json {
            print_json(&JsonReport {
                parameters: &params,
                config: &config,
                results: &results,
            })?;
        } else {
            print!("{}", report::render_comparison(&results, precision));
        }
    } else {
        let result = try_evaluate(&params, &config)?;
        if args.json {
            print_json(&JsonReport {
                parameters: &params,
                config: &config,
                results: &result,
            })?;
        } else {
            print!("{}", report::render_result(&result, precision, args.breakdown));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
