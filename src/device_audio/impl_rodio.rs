use crate::device_audio::interface::{AudioHandle, DeviceAudio};
use crate::library::logger::interface::Logger;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

/// Plays clips on the default output device.
///
/// The output stream is not `Send`, so it lives on its own thread for as
/// long as this value does; sinks created from its handle can move freely.
pub struct DeviceAudioRodio {
    stream_handle: OutputStreamHandle,
    logger: Arc<dyn Logger + Send + Sync>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    stream_thread: Option<std::thread::JoinHandle<()>>,
}

impl DeviceAudioRodio {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (handle_tx, handle_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let stream_thread = std::thread::spawn(move || match OutputStream::try_default() {
            Ok((_stream, handle)) => {
                if handle_tx.send(Ok(handle)).is_ok() {
                    // keeps _stream alive until shutdown or the sender is dropped
                    let _ = shutdown_rx.recv();
                }
            }
            Err(e) => {
                let _ = handle_tx.send(Err(e.to_string()));
            }
        });

        let stream_handle = handle_rx
            .recv()
            .map_err(|e| e.to_string())?
            .map_err(|e| format!("no audio output: {}", e))?;

        Ok(Self {
            stream_handle,
            logger: logger.with_namespace("audio").with_namespace("rodio"),
            shutdown_tx: Some(shutdown_tx),
            stream_thread: Some(stream_thread),
        })
    }
}

struct SinkHandle {
    sink: Sink,
}

impl AudioHandle for SinkHandle {
    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

impl Drop for SinkHandle {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

impl DeviceAudio for DeviceAudioRodio {
    fn play(
        &self,
        asset: &Path,
    ) -> Result<Box<dyn AudioHandle>, Box<dyn std::error::Error + Send + Sync>> {
        let file = File::open(asset)
            .map_err(|e| format!("failed to open {}: {}", asset.display(), e))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| format!("failed to decode {}: {}", asset.display(), e))?;

        let sink = Sink::try_new(&self.stream_handle)?;
        sink.append(source);
        sink.play();

        self.logger
            .info(&format!("Playing {}", asset.display()))?;

        Ok(Box::new(SinkHandle { sink }))
    }
}

impl Drop for DeviceAudioRodio {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.stream_thread.take() {
            let _ = handle.join();
        }
    }
}
