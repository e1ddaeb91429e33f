//! File-based processing command.

use crate::preset::Preset;
use crate::wav::{StereoSamples, read_wav_stereo, write_wav_stereo};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;
use vokomp_chain::{ParameterSnapshot, SignalChain};
use vokomp_core::linear_to_db;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Compression amount (0-10)
    #[arg(long)]
    compression: Option<f32>,

    /// Output level in dB (-18..18)
    #[arg(long)]
    level: Option<f32>,

    /// Attack time in ms (1-100)
    #[arg(long)]
    attack: Option<f32>,

    /// Wet mix in percent (10-100)
    #[arg(long)]
    mix: Option<f32>,

    /// Voice preset (0-2)
    #[arg(long)]
    voice: Option<u8>,

    /// Bypass the chain (still writes the file)
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!(
            "unsupported bit depth '{s}' (expected 16, 24, or 32)"
        )),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        input.len(),
        spec.sample_rate,
        input.len() as f32 / sample_rate
    );

    let params = build_snapshot(&args)?;
    info!(?params, sample_rate, "processing");

    let mut chain = SignalChain::new();
    chain.prepare(sample_rate, args.block_size)?;

    let pb = ProgressBar::new(input.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut left = input.left.clone();
    let mut right = input.right.clone();
    let mut max_reduction = 0.0f32;

    let mut done = 0usize;
    for (l_chunk, r_chunk) in left
        .chunks_mut(args.block_size)
        .zip(right.chunks_mut(args.block_size))
    {
        chain.process(l_chunk, r_chunk, &params);
        max_reduction = max_reduction.max(chain.meter_db());
        done += l_chunk.len();
        pb.set_position(done as u64);
    }
    pb.finish_with_message("done");

    let output = StereoSamples::new(left, right);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input.left)),
        linear_to_db(peak(&input.left))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output.left)),
        linear_to_db(peak(&output.left))
    );
    println!("  Max gain reduction: {max_reduction:.1} dB");

    let out_spec = crate::wav::WavSpec {
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

/// Resolve the snapshot: defaults, then preset file, then explicit flags.
fn build_snapshot(args: &ProcessArgs) -> anyhow::Result<ParameterSnapshot> {
    let mut snap = ParameterSnapshot::default();

    if let Some(preset_path) = &args.preset {
        let preset = Preset::load(preset_path)?;
        println!("Loading preset: {}", preset.name);
        snap = preset.apply(snap);
    }

    if let Some(v) = args.compression {
        snap.comp_raw = v;
    }
    if let Some(v) = args.level {
        snap.output_db = v;
    }
    if let Some(v) = args.attack {
        snap.attack_ms = v;
    }
    if let Some(v) = args.mix {
        snap.mix_percent = v;
    }
    if let Some(v) = args.voice {
        snap.voice = v;
    }
    if args.bypass {
        snap.enabled = false;
    }

    Ok(snap)
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
