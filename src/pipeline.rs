use std::{thread, time::Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    gesture::GestureClassifier,
    types::{Landmark, MatchResult},
};

/// Everything the landmark source reported for one video frame.
#[derive(Clone, Debug)]
pub struct LandmarkFrame {
    /// Monotonic frame counter; frames that do not advance it are skipped.
    pub sequence: u64,
    pub timestamp: Instant,
    pub hands: Vec<Vec<Landmark>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecognizedFrame {
    pub sequence: u64,
    /// One entry per input hand, `None` where no gesture was recognised.
    pub gestures: Vec<Option<MatchResult>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RecognizerOptions {
    /// Drain queued frames and only classify the newest one. A result is
    /// dropped when the consumer is busy and a newer frame is already
    /// waiting, so the last frame of a stream is always reported.
    pub latest_only: bool,
}

pub fn start_recognizer(
    classifier: GestureClassifier,
    options: RecognizerOptions,
    frame_rx: Receiver<LandmarkFrame>,
    result_tx: Sender<RecognizedFrame>,
) -> thread::JoinHandle<()> {
    log::info!(
        "starting recognizer: {} gestures, threshold {}, latest_only {}",
        classifier.library().len(),
        classifier.threshold(),
        options.latest_only
    );

    thread::spawn(move || run_worker_loop(classifier, options, frame_rx, result_tx))
}

fn run_worker_loop(
    classifier: GestureClassifier,
    options: RecognizerOptions,
    frame_rx: Receiver<LandmarkFrame>,
    result_tx: Sender<RecognizedFrame>,
) {
    let mut last_sequence = None;

    while let Some(frame) = next_frame(&frame_rx, options.latest_only) {
        if last_sequence.is_some_and(|last| frame.sequence <= last) {
            log::debug!("skipping stale frame {}", frame.sequence);
            continue;
        }
        last_sequence = Some(frame.sequence);

        let captured = frame.timestamp;
        let recognized = recognize_frame(&classifier, frame);
        log::trace!(
            "frame {} recognised {:?} after capture",
            recognized.sequence,
            captured.elapsed()
        );

        if options.latest_only && !frame_rx.is_empty() {
            match result_tx.try_send(recognized) {
                Ok(()) => {}
                Err(TrySendError::Full(dropped)) => {
                    log::debug!("consumer busy, dropping result for frame {}", dropped.sequence);
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("result receiver dropped, stopping recognizer");
                    break;
                }
            }
        } else if result_tx.send(recognized).is_err() {
            log::debug!("result receiver dropped, stopping recognizer");
            break;
        }
    }
}

fn next_frame(frame_rx: &Receiver<LandmarkFrame>, latest_only: bool) -> Option<LandmarkFrame> {
    let mut frame = frame_rx.recv().ok()?;
    if latest_only {
        while let Ok(newer) = frame_rx.try_recv() {
            frame = newer;
        }
    }
    Some(frame)
}

pub fn recognize_frame(classifier: &GestureClassifier, frame: LandmarkFrame) -> RecognizedFrame {
    let gestures = frame
        .hands
        .par_iter()
        .map(|hand| classifier.classify(hand))
        .collect();

    RecognizedFrame {
        sequence: frame.sequence,
        gestures,
    }
}
