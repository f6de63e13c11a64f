//! Audio output backends.
//!
//! Playback goes through the [`AudioSink`] trait so the controller can be
//! driven without an audio device. [`RodioSink`] plays through the system
//! output on a dedicated thread (rodio's `OutputStream` is not `Send`, so it
//! must live on the thread that created it); [`NullSink`] swallows clips and
//! records what it was asked to do.

use std::io::Cursor;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::NarrationError;

/// Callback fired when a clip runs out on its own (not via `stop`).
pub type CompletionHandler = Box<dyn Fn() + Send + Sync>;

/// Plays one clip at a time. Starting a clip replaces whatever was playing.
pub trait AudioSink: Send + Sync {
    fn play_clip(&self, clip: Bytes) -> Result<(), NarrationError>;
    fn stop(&self);

    /// Registers the callback invoked when a clip finishes naturally.
    /// `stop` and clip replacement do not fire it.
    fn set_completion_handler(&self, handler: CompletionHandler) {
        // Sinks with no way to observe natural completion may ignore it.
        let _ = handler;
    }
}

enum SinkCommand {
    Play(Bytes),
    Stop,
}

/// How often the playback thread checks a running clip for completion.
const COMPLETION_POLL: Duration = Duration::from_millis(100);

/// System audio output via rodio, running on its own playback thread.
///
/// Dropping the sink hangs up the command channel, which ends the thread.
pub struct RodioSink {
    tx: mpsc::Sender<SinkCommand>,
    on_complete: Arc<Mutex<Option<CompletionHandler>>>,
}

impl RodioSink {
    pub fn new() -> Result<Self, NarrationError> {
        let (tx, rx) = mpsc::channel::<SinkCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
        let on_complete: Arc<Mutex<Option<CompletionHandler>>> = Arc::new(Mutex::new(None));
        let thread_handler = Arc::clone(&on_complete);

        thread::Builder::new()
            .name("narration-audio".to_string())
            .spawn(move || Self::playback_loop(rx, ready_tx, thread_handler))
            .map_err(|e| NarrationError::Playback(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx, on_complete }),
            Ok(Err(message)) => Err(NarrationError::Playback(message)),
            Err(_) => Err(NarrationError::Playback(
                "audio thread exited before initializing".to_string(),
            )),
        }
    }

    fn playback_loop(
        rx: mpsc::Receiver<SinkCommand>,
        ready_tx: mpsc::Sender<Result<(), String>>,
        on_complete: Arc<Mutex<Option<CompletionHandler>>>,
    ) {
        let (_stream, handle) = match rodio::OutputStream::try_default() {
            Ok(pair) => {
                let _ = ready_tx.send(Ok(()));
                pair
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        let fire_completion = |current: &mut Option<rodio::Sink>| {
            *current = None;
            if let Some(handler) = on_complete.lock().as_ref() {
                handler();
            }
        };

        let mut current: Option<rodio::Sink> = None;
        loop {
            // While a clip is running, wake periodically to notice it
            // finishing; otherwise block until the next command.
            let command = if current.is_some() {
                match rx.recv_timeout(COMPLETION_POLL) {
                    Ok(command) => Some(command),
                    Err(mpsc::RecvTimeoutError::Timeout) => None,
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match rx.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                }
            };

            match command {
                Some(SinkCommand::Play(clip)) => {
                    if let Some(previous) = current.take() {
                        previous.stop();
                    }
                    let decoder = match rodio::Decoder::new(Cursor::new(clip)) {
                        Ok(decoder) => decoder,
                        Err(e) => {
                            warn!(error = %e, "failed to decode narration clip");
                            fire_completion(&mut current);
                            continue;
                        }
                    };
                    match rodio::Sink::try_new(&handle) {
                        Ok(sink) => {
                            sink.append(decoder);
                            current = Some(sink);
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to open audio sink");
                            fire_completion(&mut current);
                        }
                    }
                }
                Some(SinkCommand::Stop) => {
                    if let Some(previous) = current.take() {
                        previous.stop();
                    }
                }
                None => {}
            }

            if current.as_ref().is_some_and(|sink| sink.empty()) {
                debug!("narration clip finished");
                fire_completion(&mut current);
            }
        }
        debug!("narration audio thread exiting");
    }
}

impl AudioSink for RodioSink {
    fn play_clip(&self, clip: Bytes) -> Result<(), NarrationError> {
        self.tx
            .send(SinkCommand::Play(clip))
            .map_err(|_| NarrationError::Playback("audio thread is gone".to_string()))
    }

    fn stop(&self) {
        // A failed send means the thread already exited, so nothing is
        // playing anyway.
        let _ = self.tx.send(SinkCommand::Stop);
    }

    fn set_completion_handler(&self, handler: CompletionHandler) {
        *self.on_complete.lock() = Some(handler);
    }
}

/// Sink for headless use and tests: records commands, plays nothing.
#[derive(Clone, Default)]
pub struct NullSink {
    inner: Arc<Mutex<NullSinkLog>>,
    on_complete: Arc<Mutex<Option<CompletionHandler>>>,
}

#[derive(Default)]
struct NullSinkLog {
    clips: Vec<Bytes>,
    stops: u64,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clips handed to the sink.
    pub fn play_count(&self) -> usize {
        self.inner.lock().clips.len()
    }

    /// The most recently played clip.
    pub fn last_clip(&self) -> Option<Bytes> {
        self.inner.lock().clips.last().cloned()
    }

    pub fn stop_count(&self) -> u64 {
        self.inner.lock().stops
    }

    /// Simulates the current clip running out, firing the completion
    /// handler the way [`RodioSink`] does.
    pub fn complete_current(&self) {
        if let Some(handler) = self.on_complete.lock().as_ref() {
            handler();
        }
    }
}

impl AudioSink for NullSink {
    fn play_clip(&self, clip: Bytes) -> Result<(), NarrationError> {
        self.inner.lock().clips.push(clip);
        Ok(())
    }

    fn stop(&self) {
        self.inner.lock().stops += 1;
    }

    fn set_completion_handler(&self, handler: CompletionHandler) {
        *self.on_complete.lock() = Some(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_null_sink_records_commands() {
        let sink = NullSink::new();
        sink.play_clip(Bytes::from_static(b"clip a")).unwrap();
        sink.play_clip(Bytes::from_static(b"clip b")).unwrap();
        sink.stop();

        assert_eq!(sink.play_count(), 2);
        assert_eq!(sink.last_clip(), Some(Bytes::from_static(b"clip b")));
        assert_eq!(sink.stop_count(), 1);
    }

    #[test]
    fn test_null_sink_fires_completion_handler() {
        let sink = NullSink::new();
        let fired = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&fired);
        sink.set_completion_handler(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.play_clip(Bytes::from_static(b"clip")).unwrap();
        sink.complete_current();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
