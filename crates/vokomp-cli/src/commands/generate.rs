//! Test signal generation command.

use crate::wav::{StereoSamples, WavSpec, write_wav_stereo};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a tone burst: loud attack, quiet tail
    Burst {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Loud segment duration in seconds
        #[arg(long, default_value = "0.5")]
        loud: f32,

        /// Quiet segment duration in seconds
        #[arg(long, default_value = "0.5")]
        quiet: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Loud amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, duration);

            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    (2.0 * std::f32::consts::PI * freq * t).sin() * amplitude
                })
                .collect();

            write_tone(&output, samples, sample_rate)?;
        }

        GenerateCommand::Burst {
            output,
            freq,
            loud,
            quiet,
            sample_rate,
            amplitude,
        } => {
            println!("Generating tone burst...");
            println!("  {} Hz, {:.2}s loud then {:.2}s quiet", freq, loud, quiet);

            let loud_samples = (loud * sample_rate as f32) as usize;
            let total = loud_samples + (quiet * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..total)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    let amp = if i < loud_samples {
                        amplitude
                    } else {
                        amplitude * 0.1
                    };
                    (2.0 * std::f32::consts::PI * freq * t).sin() * amp
                })
                .collect();

            write_tone(&output, samples, sample_rate)?;
        }

        GenerateCommand::Silence {
            output,
            duration,
            sample_rate,
        } => {
            println!("Generating silence...");
            println!("  {:.2}s at {} Hz", duration, sample_rate);

            let num_samples = (duration * sample_rate as f32) as usize;
            write_tone(&output, vec![0.0; num_samples], sample_rate)?;
        }
    }

    Ok(())
}

fn write_tone(output: &Path, samples: Vec<f32>, sample_rate: u32) -> anyhow::Result<()> {
    let frames = samples.len();
    let stereo = StereoSamples::from_mono(samples);
    let spec = WavSpec {
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav_stereo(output, &stereo, spec)?;
    println!("Wrote {} frames to {}", frames, output.display());
    Ok(())
}
