use anyhow::{Context, Result};
use clap::Args;
use handsign::{
    animation::Interpolation, backend::RecordingBackend, core::Frame, write_gesture,
};
use indexmap::IndexMap;
use serde::Serialize;

use super::{GestureArgs, OutputFormat};
use crate::config::Config;

/// Sequence a gesture in memory and print its channel curves, in degrees.
#[derive(Debug, Args)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub gesture: GestureArgs,

    /// Sample every N frames; keyed frames are always included
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub step: u32,

    #[arg(long, default_value = "linear")]
    pub interpolation: Interpolation,

    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PreviewSample {
    frame: Frame,
    degrees: [f64; 3],
}

impl PreviewCommand {
    pub fn run(self, config: Config) -> Result<()> {
        let (id, definition) = self.gesture.resolve(&config)?;
        let armature = definition.armature.clone();

        let mut backend = RecordingBackend::with_skeleton(&config.skeleton(&armature)?);
        let sequence = write_gesture(&definition, &mut backend)
            .with_context(|| format!("sequencing {id}"))?;
        let timeline = definition.timeline();

        let mut curves: IndexMap<String, Vec<PreviewSample>> = IndexMap::new();
        for channel in sequence.channel_names() {
            let keyed = sequence.keys(channel).into_iter().flat_map(|keys| keys.keys().copied());
            let mut frames: Vec<Frame> = (timeline.start()..=timeline.end())
                .step_by(self.step as usize)
                .chain(keyed)
                .collect();
            frames.sort_unstable();
            frames.dedup();

            let samples = frames
                .into_iter()
                .map(|frame| -> handsign::animation::Result<PreviewSample> {
                    let rotation =
                        backend.sample(&armature, channel, f64::from(frame), self.interpolation)?;
                    Ok(PreviewSample {
                        frame,
                        degrees: rotation.to_degrees().to_array(),
                    })
                })
                .collect::<handsign::animation::Result<Vec<_>>>()?;

            curves.insert(channel.to_string(), samples);
        }

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&curves)?),
            OutputFormat::Table => print_table(&id, &curves),
        }
        Ok(())
    }
}

fn print_table(id: &str, curves: &IndexMap<String, Vec<PreviewSample>>) {
    if curves.is_empty() {
        println!("{id}: no channels keyed");
        return;
    }

    println!("{:<18} {:>6} {:>10} {:>10} {:>10}", "channel", "frame", "x", "y", "z");
    for (channel, samples) in curves {
        for sample in samples {
            let [x, y, z] = sample.degrees;
            println!("{channel:<18} {:>6} {x:>10.3} {y:>10.3} {z:>10.3}", sample.frame);
        }
    }
}
