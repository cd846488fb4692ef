use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
    thread,
    time::Instant,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossbeam_channel::{Sender, bounded, unbounded};
use serde::Deserialize;

use fingerspell::{
    Finger, GestureClassifier, Landmark, LandmarkFrame, RecognizedFrame, RecognizerOptions,
    ScoreScale, config::Settings, start_recognizer,
};

/// Recognise static ASL letters from hand landmark frames.
///
/// Each input line is one frame: `{"sequence": 1, "hands": [[{"x":..,"y":..,"z":..}, ...]]}`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Landmark frames, one JSON object per line. Reads stdin when omitted.
    input: Option<PathBuf>,
    /// TOML config with threshold, score scale and extra gestures.
    /// Defaults to the file named by `FINGERSPELL_CONFIG`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum score a gesture needs to be reported.
    #[arg(long)]
    threshold: Option<f32>,
    /// Report scores on a 0..10 scale relative to each gesture's maximum.
    #[arg(long)]
    normalized: bool,
    /// Only classify the newest frame when input arrives faster than it is processed.
    #[arg(long)]
    latest_only: bool,
    /// Print one JSON object per frame.
    #[arg(long)]
    json: bool,
    /// List the configured gestures and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Deserialize)]
struct FrameLine {
    sequence: Option<u64>,
    #[serde(default, alias = "landmarks")]
    hands: Vec<Vec<Landmark>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => {
            Settings::load_from(Some(path.as_path()), |key| std::env::var(key).ok())?
        }
        None => Settings::load()?,
    };
    if let Some(threshold) = args.threshold {
        settings.threshold = threshold;
    }
    if args.normalized {
        settings.score_scale = ScoreScale::Normalized;
    }
    let classifier = settings.classifier()?;

    if args.list {
        print_library(&classifier);
        return Ok(());
    }

    let input: Box<dyn BufRead + Send> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    // The reader never drops frames; the recognizer decides what to skip.
    let (frame_tx, frame_rx) = unbounded();
    let (result_tx, result_rx) = bounded(1);

    let options = RecognizerOptions {
        latest_only: args.latest_only,
    };
    let worker = start_recognizer(classifier, options, frame_rx, result_tx);
    let reader = thread::spawn(move || read_frames(input, frame_tx));

    for recognized in result_rx.iter() {
        if args.json {
            println!("{}", serde_json::to_string(&recognized)?);
        } else {
            print_frame(&recognized);
        }
    }

    reader.join().map_err(|_| anyhow!("frame reader panicked"))??;
    worker.join().map_err(|_| anyhow!("recognizer panicked"))?;
    Ok(())
}

fn read_frames(
    input: Box<dyn BufRead + Send>,
    frame_tx: Sender<LandmarkFrame>,
) -> Result<()> {
    for (line_no, line) in input.lines().enumerate() {
        let line = line.context("failed to read landmark input")?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed: FrameLine = match serde_json::from_str(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("skipping malformed frame on line {}: {err}", line_no + 1);
                continue;
            }
        };

        let frame = LandmarkFrame {
            sequence: parsed.sequence.unwrap_or(line_no as u64 + 1),
            timestamp: Instant::now(),
            hands: parsed.hands,
        };

        if frame_tx.send(frame).is_err() {
            break;
        }
    }
    Ok(())
}

fn print_frame(recognized: &RecognizedFrame) {
    if recognized.gestures.is_empty() {
        println!("frame {}: no hands", recognized.sequence);
        return;
    }
    for (hand, gesture) in recognized.gestures.iter().enumerate() {
        match gesture {
            Some(result) => println!(
                "frame {} hand {}: {}",
                recognized.sequence,
                hand,
                result.display_text()
            ),
            None => println!("frame {} hand {}: no gesture", recognized.sequence, hand),
        }
    }
}

fn print_library(classifier: &GestureClassifier) {
    println!(
        "{} gestures, threshold {} ({:?} scores)",
        classifier.library().len(),
        classifier.threshold(),
        classifier.scale()
    );
    for gesture in classifier.library().iter() {
        println!("{:>12}  max {:.2}", gesture.name(), gesture.score_max());
        for finger in Finger::ALL {
            let rules = gesture.rules(finger);
            if rules.is_unconstrained() {
                continue;
            }
            let expected: Vec<String> = rules
                .curls
                .iter()
                .map(|(curl, weight)| format!("{} {weight:.2}", curl.label()))
                .chain(
                    rules
                        .directions
                        .iter()
                        .map(|(direction, weight)| format!("{} {weight:.2}", direction.label())),
                )
                .collect();
            println!("{:>14}{}: {}", "", finger.label(), expected.join(", "));
        }
    }
}
