//! Audio module - looping background music on a worker thread
//!
//! The output stream is not Send, so stream and sink both live on the
//! playback thread. The handle owns a stop token the thread polls; a
//! missing audio device silently means no music, never a dead session.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::source::Source;
use rodio::{Decoder, OutputStream, Sink};

/// How often the playback thread checks the stop token (milliseconds)
const STOP_POLL_MS: u64 = 100;

/// Owning handle to the background music thread
pub struct AudioHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl AudioHandle {
    /// Start looping the track at `path` on a dedicated thread.
    /// Fails when the file cannot be opened or decoded; output device
    /// problems are detected later on the thread and simply mute the game.
    pub fn spawn(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("open music file {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("decode music file {}", path.display()))?
            .repeat_infinite();

        let stop = Arc::new(AtomicBool::new(false));
        let stop_token = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("bgm".into())
            .spawn(move || {
                // The stream must stay alive for as long as the sink plays.
                let Ok((_stream, handle)) = OutputStream::try_default() else {
                    return;
                };
                let Ok(sink) = Sink::try_new(&handle) else {
                    return;
                };
                sink.append(source);

                while !stop_token.load(Ordering::Relaxed) {
                    thread::sleep(Duration::from_millis(STOP_POLL_MS));
                }
                sink.stop();
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Signal the stop token and wait for the playback thread to exit
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        // A dropped handle still signals the thread so it winds down on
        // its next poll instead of playing forever.
        self.stop.store(true, Ordering::Relaxed);
    }
}
