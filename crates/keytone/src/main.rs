use std::io::Write;

use clap::{Args, Parser, Subcommand};
use keytone_dtmf::decode::{DEFAULT_STEP_HZ, DEFAULT_TOP_K, DEFAULT_VICINITY_HZ};
use keytone_dtmf::{Decoder, ToneTable};
use keytone_goertzel::{estimate, BinResult, FrequencyRange, SampleWindow};
use keytone_siggen::{am, fm, samples_for, spectral_gate, two_tone, GaussianNoise, Modulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keytone", about = "Goertzel-based DTMF tone decoder")]
struct Cli {
    /// Raise log verbosity (-v for info, -vv for debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize each symbol, then estimate and decode it.
    Decode {
        /// Symbols to send, e.g. "159#".
        symbols: String,
        #[command(flatten)]
        signal: SignalArgs,
        #[command(flatten)]
        decoder: DecoderArgs,
    },
    /// Print the Goertzel power listing for one symbol.
    Spectrum {
        symbol: char,
        #[command(flatten)]
        signal: SignalArgs,
        /// Lower edge of the listing in Hz.
        #[arg(long, requires = "high")]
        low: Option<f64>,
        /// Upper edge of the listing in Hz.
        #[arg(long, requires = "low")]
        high: Option<f64>,
    },
    /// Print the Goertzel power listing of a noisy AM signal over the keypad bands.
    Am(ModulationArgs),
    /// Print the Goertzel power listing of a noisy FM signal over the keypad bands.
    Fm(ModulationArgs),
}

#[derive(Args, Debug, Clone)]
struct SignalArgs {
    /// Sample rate in Hz.
    #[arg(long, default_value_t = 8000.0, value_parser = parse_sample_rate)]
    sample_rate: f64,
    /// Window duration in seconds.
    #[arg(long, default_value_t = 0.512)]
    duration: f64,
    /// Amplitude of each of the two tones.
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,
    /// Standard deviation of added Gaussian noise.
    #[arg(long, default_value_t = 0.0)]
    noise_std: f64,
    /// Noise seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Use the 16-key table with the A-D column.
    #[arg(long)]
    extended: bool,
}

#[derive(Args, Debug, Clone)]
struct DecoderArgs {
    /// Number of strongest bins considered.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// Half-width of the fallback search in Hz.
    #[arg(long, default_value_t = DEFAULT_VICINITY_HZ)]
    vicinity: u32,
    /// Candidate spacing of the fallback search in Hz.
    #[arg(long, default_value_t = DEFAULT_STEP_HZ)]
    step: u32,
}

#[derive(Args, Debug, Clone)]
struct ModulationArgs {
    #[arg(long, default_value_t = 150.0)]
    carrier: f64,
    #[arg(long, default_value_t = 2000.0)]
    signal: f64,
    #[arg(long, default_value_t = 10.0)]
    carrier_amp: f64,
    #[arg(long, default_value_t = 2.0)]
    signal_amp: f64,
    /// Modulation index.
    #[arg(long, default_value_t = 1.0)]
    depth: f64,
    #[arg(long, default_value_t = 2.0)]
    noise_std: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 8000.0, value_parser = parse_sample_rate)]
    sample_rate: f64,
    #[arg(long, default_value_t = 0.5)]
    duration: f64,
    /// Zero every spectral component weaker than this magnitude before the listing.
    #[arg(long)]
    gate: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("symbol {0:?} is not in the tone table")]
    UnknownSymbol(char),
}

fn parse_sample_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("sample rate must be a positive number of Hz, got {value}"))
    }
}

impl SignalArgs {
    fn table(&self) -> &'static ToneTable {
        if self.extended {
            ToneTable::extended()
        } else {
            ToneTable::standard()
        }
    }

    fn synthesize(&self, symbol: char) -> Result<Vec<f64>, CliError> {
        let pair = self
            .table()
            .tones(symbol)
            .ok_or(CliError::UnknownSymbol(symbol))?;
        let len = samples_for(self.duration, self.sample_rate);
        let mut samples = two_tone(
            f64::from(pair.low_hz),
            f64::from(pair.high_hz),
            self.amplitude,
            self.sample_rate,
            len,
        );
        if self.noise_std > 0.0 {
            GaussianNoise::seeded(self.noise_std, self.seed).add_to(&mut samples);
        }
        Ok(samples)
    }
}

impl DecoderArgs {
    fn decoder(&self) -> Decoder {
        Decoder::builder()
            .top_k(self.top_k)
            .vicinity_hz(self.vicinity)
            .step_hz(self.step)
            .build()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Decode {
            symbols,
            signal,
            decoder,
        } => run_decode(&symbols, &signal, &decoder, &mut out),
        Command::Spectrum {
            symbol,
            signal,
            low,
            high,
        } => {
            let ranges = match (low, high) {
                (Some(low), Some(high)) => Some(vec![FrequencyRange::new(low, high)]),
                _ => None,
            };
            run_spectrum(symbol, &signal, ranges, &mut out)
        }
        Command::Am(args) => run_modulated(&args, am, &mut out),
        Command::Fm(args) => run_modulated(&args, fm, &mut out),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_decode(
    symbols: &str,
    signal: &SignalArgs,
    decoder: &DecoderArgs,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = signal.table();
    let decoder = decoder.decoder();
    for symbol in symbols.chars().filter(|c| !c.is_whitespace()) {
        let samples = signal.synthesize(symbol)?;
        let window = SampleWindow::new(&samples, signal.sample_rate);
        info!(%symbol, samples = samples.len(), "decoding symbol");
        let decision = decoder.detect(&window, table)?;
        writeln!(out, "{} -> {}", symbol, decision)?;
    }
    Ok(())
}

fn run_spectrum(
    symbol: char,
    signal: &SignalArgs,
    ranges: Option<Vec<FrequencyRange>>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let samples = signal.synthesize(symbol)?;
    let window = SampleWindow::new(&samples, signal.sample_rate);
    let ranges = ranges.unwrap_or_else(|| signal.table().search_ranges(DEFAULT_VICINITY_HZ));
    let bins = estimate(&window, &ranges)?;
    write_listing(&bins, out)
}

type Generator = fn(&Modulation, f64, usize) -> Vec<f64>;

fn run_modulated(
    args: &ModulationArgs,
    generate: Generator,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = Modulation {
        carrier_hz: args.carrier,
        signal_hz: args.signal,
        carrier_amp: args.carrier_amp,
        signal_amp: args.signal_amp,
        depth: args.depth,
    };
    let len = samples_for(args.duration, args.sample_rate);
    let mut samples = generate(&params, args.sample_rate, len);
    GaussianNoise::seeded(args.noise_std, args.seed).add_to(&mut samples);
    if let Some(threshold) = args.gate {
        samples = spectral_gate(&samples, threshold);
    }

    let window = SampleWindow::new(&samples, args.sample_rate);
    let bins = estimate(&window, &ToneTable::standard().search_ranges(0))?;
    info!(bins = bins.len(), "modulated listing");
    write_listing(&bins, out)
}

fn write_listing(bins: &[BinResult], out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    for bin in bins {
        writeln!(out, "{}\t{}", bin.frequency_hz, bin.power)?;
    }
    Ok(())
}
