use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use flashdeck_logging::{deck_error, deck_info};

use crate::generator::{GeminiGenerator, GeneratorSettings, TextGenerator};
use crate::pipeline::generate_flashcards;
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    Generate { request_id: RequestId, topic: String },
}

/// Runs generation requests on a background tokio runtime and reports
/// completions over a channel the UI thread polls.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GeneratorSettings) -> io::Result<Self> {
        Self::with_generator(Arc::new(GeminiGenerator::new(settings)))
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(generator.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn generate(&self, request_id: RequestId, topic: impl Into<String>) {
        let command = EngineCommand::Generate {
            request_id,
            topic: topic.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            deck_error!("Engine worker is gone; request {} dropped", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    generator: &dyn TextGenerator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { request_id, topic } => {
            deck_info!(
                "Generate request_id={} topic_len={}",
                request_id,
                topic.len()
            );
            let result = generate_flashcards(generator, &topic).await;
            if let Err(err) = &result {
                deck_error!("Generation {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
        }
    }
}
