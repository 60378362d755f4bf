use clap::{Parser, Subcommand};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use qpskmodem_core::{Demodulator, ModemConfig, ModemError, Modulator, SampleSink};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "qpskmodem")]
#[command(about = "QPSK modem: bit strings to carrier WAV files and back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modulate a text file of '0'/'1' characters into a WAV file
    Modulate {
        /// Input bit file
        #[arg(value_name = "INPUT.TXT")]
        input: PathBuf,

        /// Output WAV file (default: input with .wav extension)
        #[arg(value_name = "OUTPUT.WAV")]
        output: Option<PathBuf>,

        /// Samples per symbol
        #[arg(short, long, default_value_t = qpskmodem_core::SYMBOL_LEN)]
        symbol_len: usize,

        /// Output sample rate in Hz
        #[arg(short = 'r', long, default_value_t = qpskmodem_core::SAMPLE_RATE)]
        sample_rate: u32,
    },

    /// Demodulate a WAV file back into a text file of bits
    Demodulate {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output bit file (default: input with .txt extension)
        #[arg(value_name = "OUTPUT.TXT")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("bad input file name {0}: expected a .{1} file")]
    BadExtension(PathBuf, &'static str),

    #[error("unsupported WAV format: {0}")]
    UnsupportedFormat(String),
}

/// Streams modulator output straight into a WAV writer
struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
}

impl<W: Write + Seek> SampleSink for WavSink<W> {
    fn write_sample(&mut self, sample: i32) -> qpskmodem_core::Result<()> {
        self.writer
            .write_sample(sample)
            .map_err(|e| ModemError::Sink(e.to_string()))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Modulate { input, output, symbol_len, sample_rate } => {
            modulate_command(&input, output, symbol_len, sample_rate)
        }
        Commands::Demodulate { input, output } => demodulate_command(&input, output),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Check the input extension and derive the default output path from it
fn resolve_paths(
    input: &Path,
    output: Option<PathBuf>,
    expected: &'static str,
    produced: &str,
) -> Result<PathBuf, CliError> {
    if input.extension().and_then(|ext| ext.to_str()) != Some(expected) {
        return Err(CliError::BadExtension(input.to_path_buf(), expected));
    }
    Ok(output.unwrap_or_else(|| input.with_extension(produced)))
}

fn modulate_command(
    input_path: &Path,
    output_path: Option<PathBuf>,
    symbol_len: usize,
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = resolve_paths(input_path, output_path, "txt", "wav")?;

    let config = ModemConfig::default()
        .with_sample_rate(sample_rate)
        .with_symbol_len(symbol_len);
    let mut modulator = Modulator::new(&config)?;

    let bits = std::fs::read(input_path)?;
    println!("Read {} characters from {}", bits.len(), input_path.display());

    // 32-bit integer PCM, mono
    let spec = WavSpec {
        channels: 1,
        sample_rate: config.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Int,
    };

    let file = BufWriter::new(File::create(&output_path)?);
    let mut sink = WavSink {
        writer: WavWriter::new(file, spec)?,
    };
    let symbols = modulator.modulate_into(&bits, &mut sink)?;
    sink.writer.finalize()?;

    println!(
        "Modulated {} symbols ({} samples, {} per symbol, {:.0} bit/s)",
        symbols,
        modulator.time(),
        config.symbol_len,
        config.bit_rate()
    );
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn demodulate_command(
    input_path: &Path,
    output_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = resolve_paths(input_path, output_path, "wav", "txt")?;

    let reader = WavReader::open(input_path)?;
    let spec = reader.spec();
    println!(
        "Read WAV: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    if spec.channels != 1 {
        return Err(CliError::UnsupportedFormat(format!(
            "{} channels, expected mono",
            spec.channels
        ))
        .into());
    }
    let supported_depth = (1..=32).contains(&spec.bits_per_sample);
    if spec.sample_format != SampleFormat::Int || !supported_depth {
        return Err(CliError::UnsupportedFormat(format!(
            "{:?} samples of {} bits, expected integer PCM",
            spec.sample_format, spec.bits_per_sample
        ))
        .into());
    }

    // Scale narrower integer samples up to the 32-bit full-scale range
    let shift = 32 - u32::from(spec.bits_per_sample);
    let samples = reader
        .into_samples::<i32>()
        .map(|sample| sample.map(|s| s << shift));

    let config = ModemConfig::default().with_sample_rate(spec.sample_rate);
    let demodulator = Demodulator::new(&config)?;
    let result = demodulator.demodulate(samples)?;

    match result.symbol_len {
        Some(symbol_len) => println!(
            "Synchronized on symbol length {} ({:.0} bit/s), decoded {} symbols",
            symbol_len,
            config.with_symbol_len(symbol_len).bit_rate(),
            result.symbols.len()
        ),
        None => println!("Recording ended inside the synchronization sequence, no payload"),
    }

    std::fs::write(&output_path, result.render())?;
    println!("Wrote {}", output_path.display());
    Ok(())
}
