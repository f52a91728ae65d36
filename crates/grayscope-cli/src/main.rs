use clap::{Args, Parser, Subcommand, ValueEnum};
use grayscope_core::{Histogram, PixelBuffer};
use grayscope_filter::catalog::{self, CatalogKernel};
use grayscope_filter::{
    GradientOperator, GradientPair, KernelSource, NoiseModel, RangePolicy, Reducer, SubtractPolicy,
};
use grayscope_io::ImageFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "grayscope")]
#[command(about = "Spatial-domain filtering for 8-bit grayscale images")]
#[command(version)]
struct Cli {
    /// Input image (PNG, JPEG or PNM); color input is folded to luma
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the intensity histogram of the input
    Histogram {
        /// Fold intensities into this many levels first
        #[arg(long)]
        levels: Option<u32>,
    },

    /// Reduce the number of intensity levels
    ReduceLevels {
        #[arg(long)]
        levels: u32,
    },

    /// Log transformation, c * ln(1 + r)
    Log {
        #[arg(long, default_value_t = 1.0)]
        c: f64,
    },

    /// Power-law transformation, (c * ln(1 + r))^gamma
    PowerLaw {
        #[arg(long, default_value_t = 1.0)]
        c: f64,
        #[arg(long)]
        gamma: f64,
    },

    /// Clear the lowest bit planes
    BitSlice {
        /// Number of low bits to clear (1-7)
        #[arg(long)]
        bits: u32,
    },

    /// Clear a single bit plane
    BitClear {
        /// Bit to clear, 0 = least significant
        #[arg(long)]
        bit: u32,
    },

    /// Histogram equalization
    Equalize,

    /// Smooth with a non-negative catalog kernel
    Smooth {
        #[arg(long, default_value = "gaussian3")]
        kernel: String,
    },

    /// Order-statistic filter
    Rank {
        /// Window parameter; the window spans window - 1 samples per axis
        #[arg(long, default_value_t = 3)]
        window: u32,
        #[arg(long, value_enum, default_value_t = ReducerArg::Median)]
        reducer: ReducerArg,
    },

    /// Laplacian response
    Laplacian(LaplacianArgs),

    /// Add k times the Laplacian response back onto the input
    LaplacianSharpen {
        #[command(flatten)]
        laplacian: LaplacianArgs,
        /// Mask multiplier; negative for kernels with a negative center
        #[arg(long, allow_negative_numbers = true, default_value_t = -1.0)]
        k: f64,
    },

    /// Unsharp masking (k = 1) or highboost filtering (k > 1)
    Unsharp {
        #[arg(long, default_value_t = 1.0)]
        k: f64,
        /// Shift negative mask values instead of clipping them
        #[arg(long)]
        scaled: bool,
    },

    /// Gradient of a single operator, or the magnitude of a pair
    Gradient {
        /// Single operator; without it the magnitude of --pair is computed
        #[arg(long, value_enum)]
        operator: Option<OperatorArg>,
        #[arg(long, value_enum, default_value_t = PairArg::Sobel)]
        pair: PairArg,
        /// Shift negative responses instead of clipping them
        #[arg(long)]
        rescale: bool,
    },

    /// Add seeded random noise
    Noise(NoiseArgs),

    /// List the kernel catalog
    Kernels,
}

#[derive(Args)]
struct LaplacianArgs {
    #[arg(long, default_value = "laplacian1")]
    kernel: String,
    /// Shift negative responses instead of clipping them
    #[arg(long)]
    rescale: bool,
}

#[derive(Args)]
struct NoiseArgs {
    #[arg(long, value_enum, default_value_t = ModelArg::Gaussian)]
    model: ModelArg,
    /// Gaussian mean
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    mean: f64,
    /// Gaussian standard deviation
    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
    /// Rayleigh offset
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    a: f64,
    /// Rayleigh scale
    #[arg(long, default_value_t = 100.0)]
    b: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReducerArg {
    Min,
    Max,
    Median,
}

impl From<ReducerArg> for Reducer {
    fn from(arg: ReducerArg) -> Self {
        match arg {
            ReducerArg::Min => Reducer::Min,
            ReducerArg::Max => Reducer::Max,
            ReducerArg::Median => Reducer::Median,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OperatorArg {
    Sobel1,
    Sobel2,
    Roberts1,
    Roberts2,
}

impl From<OperatorArg> for GradientOperator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Sobel1 => GradientOperator::Sobel1,
            OperatorArg::Sobel2 => GradientOperator::Sobel2,
            OperatorArg::Roberts1 => GradientOperator::Roberts1,
            OperatorArg::Roberts2 => GradientOperator::Roberts2,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PairArg {
    Sobel,
    Roberts,
}

impl From<PairArg> for GradientPair {
    fn from(arg: PairArg) -> Self {
        match arg {
            PairArg::Sobel => GradientPair::Sobel,
            PairArg::Roberts => GradientPair::Roberts,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Gaussian,
    Rayleigh,
}

fn range_policy(rescale: bool) -> RangePolicy {
    if rescale {
        RangePolicy::Rescale
    } else {
        RangePolicy::Clamp
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let io = Paths {
        input: cli.input,
        output: cli.output,
    };

    match cli.command {
        Commands::Kernels => run_kernels(),
        Commands::Histogram { levels } => run_histogram(&io, levels),
        command => {
            let input = io.read()?;
            let output = apply(&input, command)?;
            io.write(&output)
        }
    }
}

// ── input / output ─────────────────────────────────────────────────────

struct Paths {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Paths {
    fn read(&self) -> CliResult<PixelBuffer> {
        let path = require(self.input.as_deref(), "--input")?;
        let buf = grayscope_io::read_image(path)?;
        log::info!("loaded {} ({}x{})", path.display(), buf.width(), buf.height());
        Ok(buf)
    }

    fn write(&self, buf: &PixelBuffer) -> CliResult<()> {
        let path = require(self.output.as_deref(), "--output")?;
        grayscope_io::write_image(buf, path, ImageFormat::Unknown)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn require<'a>(path: Option<&'a Path>, flag: &str) -> CliResult<&'a Path> {
    path.ok_or_else(|| format!("{flag} is required for this command").into())
}

fn lookup_kernel(name: &str) -> CliResult<&'static CatalogKernel> {
    catalog::by_name(name).ok_or_else(|| {
        format!("unknown kernel '{name}', see `grayscope kernels`").into()
    })
}

// ── image operations ───────────────────────────────────────────────────

fn apply(buf: &PixelBuffer, command: Commands) -> CliResult<PixelBuffer> {
    let out = match command {
        Commands::ReduceLevels { levels } => {
            log::info!("reducing to {levels} levels");
            grayscope_filter::reduce_levels(buf, levels)?
        }
        Commands::Log { c } => {
            log::info!("log transform, c = {c}");
            grayscope_filter::log_transform(buf, c)?
        }
        Commands::PowerLaw { c, gamma } => {
            log::info!("power-law transform, c = {c}, gamma = {gamma}");
            grayscope_filter::power_law_transform(buf, c, gamma)?
        }
        Commands::BitSlice { bits } => {
            log::info!("clearing the {bits} low bit planes");
            grayscope_filter::slice_low_bits(buf, bits)?
        }
        Commands::BitClear { bit } => {
            log::info!("clearing bit plane {bit}");
            grayscope_filter::clear_bit(buf, bit)?
        }
        Commands::Equalize => {
            log::info!("equalizing histogram");
            grayscope_filter::equalize_histogram(buf)
        }
        Commands::Smooth { kernel } => {
            let kernel = lookup_kernel(&kernel)?;
            log::info!("smoothing with {}", kernel.name());
            grayscope_filter::smooth(buf, kernel)?
        }
        Commands::Rank { window, reducer } => {
            let reducer = Reducer::from(reducer);
            log::info!("{reducer:?} filter, window {window}");
            grayscope_filter::rank_filter(buf, window, reducer)?
        }
        Commands::Laplacian(args) => {
            let kernel = lookup_kernel(&args.kernel)?;
            log::info!("laplacian with {}", kernel.name());
            grayscope_filter::laplacian(buf, kernel, range_policy(args.rescale))?
        }
        Commands::LaplacianSharpen { laplacian, k } => {
            let kernel = lookup_kernel(&laplacian.kernel)?;
            log::info!("laplacian sharpening with {}, k = {k}", kernel.name());
            grayscope_filter::laplacian_sharpen(buf, kernel, range_policy(laplacian.rescale), k)?
        }
        Commands::Unsharp { k, scaled } => {
            let policy = if scaled {
                SubtractPolicy::Scaled
            } else {
                SubtractPolicy::Plain
            };
            log::info!("unsharp masking, k = {k}, {policy:?} mask");
            grayscope_filter::unsharp_mask(buf, k, policy)?
        }
        Commands::Gradient {
            operator,
            pair,
            rescale,
        } => match operator {
            Some(op) => {
                let op = GradientOperator::from(op);
                log::info!("{op:?} gradient");
                grayscope_filter::gradient(buf, op, range_policy(rescale))?
            }
            None => {
                let pair = GradientPair::from(pair);
                log::info!("{pair:?} gradient magnitude");
                grayscope_filter::gradient_magnitude(buf, pair)?
            }
        },
        Commands::Noise(args) => {
            let model = match args.model {
                ModelArg::Gaussian => NoiseModel::Gaussian {
                    mean: args.mean,
                    std_dev: args.std_dev,
                },
                ModelArg::Rayleigh => NoiseModel::Rayleigh {
                    a: args.a,
                    b: args.b,
                },
            };
            log::info!("adding {model:?} noise, seed {}", args.seed);
            grayscope_filter::add_noise(buf, model, args.seed)?
        }
        Commands::Histogram { .. } | Commands::Kernels => {
            return Err("command does not produce an image".into());
        }
    };
    Ok(out)
}

// ── histogram ──────────────────────────────────────────────────────────

fn run_histogram(io: &Paths, levels: Option<u32>) -> CliResult<()> {
    let buf = io.read()?;
    let hist = match levels {
        Some(n) => Histogram::with_levels(&buf, n)?,
        None => buf.histogram(),
    };

    println!("pixels: {}", hist.total());
    println!("mean:   {:.3}", hist.mean_intensity());
    for (level, &count) in hist.counts().iter().enumerate() {
        if count > 0 {
            println!("{level:>5} {count}");
        }
    }
    Ok(())
}

// ── kernels ────────────────────────────────────────────────────────────

fn run_kernels() -> CliResult<()> {
    println!("grayscope kernel catalog");
    for kernel in catalog::ALL {
        let kind = if kernel.is_non_negative() {
            "smoothing"
        } else {
            "signed"
        };
        println!(
            "  {:<12} {}x{}  {:<9}  sum {}",
            kernel.name(),
            kernel.size(),
            kernel.size(),
            kind,
            kernel.weight_sum()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank() {
        let cli = Cli::parse_from([
            "grayscope", "rank", "-i", "in.png", "-o", "out.png", "--window", "5", "--reducer",
            "max",
        ]);
        assert_eq!(cli.input.as_deref(), Some(Path::new("in.png")));
        assert!(matches!(
            cli.command,
            Commands::Rank {
                window: 5,
                reducer: ReducerArg::Max
            }
        ));
    }

    #[test]
    fn test_parse_negative_multiplier() {
        let cli = Cli::parse_from(["grayscope", "laplacian-sharpen", "--k", "-2.5"]);
        match cli.command {
            Commands::LaplacianSharpen { laplacian, k } => {
                assert_eq!(k, -2.5);
                assert_eq!(laplacian.kernel, "laplacian1");
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_missing_input_reported() {
        let io = Paths {
            input: None,
            output: None,
        };
        let err = io.read().unwrap_err();
        assert!(err.to_string().contains("--input"));
    }

    #[test]
    fn test_unknown_kernel() {
        assert!(lookup_kernel("box7").is_err());
        assert_eq!(lookup_kernel("Sobel1").unwrap().name(), "sobel1");
    }

    #[test]
    fn test_apply_smooth_rejects_signed_kernel() {
        let buf = PixelBuffer::filled(4, 4, 10).unwrap();
        let cmd = Commands::Smooth {
            kernel: "laplacian1".to_string(),
        };
        assert!(apply(&buf, cmd).is_err());
    }

    #[test]
    fn test_apply_equalize() {
        let buf = PixelBuffer::filled(1, 1, 200).unwrap();
        let out = apply(&buf, Commands::Equalize).unwrap();
        assert_eq!(out.get(0, 0), Some(255));
    }
}
