//! Sketch session: periodic classification of an image file
//!
//! The watched file plays the role of the drawing canvas. A change of its
//! modification time counts as drawing activity; while the activity gate is
//! open the current file is uploaded on every send tick.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

use super::gate::ActivityGate;
use super::SessionError;
use crate::client::{image_content_type, InferenceBackend};
use crate::config::SketchConfig;
use crate::model::SketchResult;

pub struct SketchSession {
    backend: Arc<dyn InferenceBackend>,
    config: SketchConfig,
    gate: ActivityGate,
}

impl SketchSession {
    pub fn new(backend: Arc<dyn InferenceBackend>, config: SketchConfig) -> Self {
        Self {
            backend,
            config,
            gate: ActivityGate::new(),
        }
    }

    pub fn gate(&self) -> &ActivityGate {
        &self.gate
    }

    /// Classify the image at `path` once
    pub async fn classify_once(&self, path: &Path) -> Result<SketchResult, SessionError> {
        let image = tokio::fs::read(path).await?;
        let content_type = image_content_type(&image);
        tracing::debug!(path = ?path, bytes = image.len(), content_type, "sending sketch");

        let labels = self.backend.classify_sketch(image, content_type).await?;
        Ok(SketchResult::top(labels, self.config.top_k))
    }

    /// Watch `path` and classify it while it keeps changing.
    ///
    /// Each result is handed to `on_result`. Failed uploads are logged and the
    /// loop goes on. Returns as soon as `shutdown` completes, also while an
    /// upload is in flight. The file existing at
    /// start counts as activity, so a first result arrives without edits.
    pub async fn run<F, S>(
        &mut self,
        path: &Path,
        mut on_result: F,
        shutdown: S,
    ) -> Result<(), SessionError>
    where
        F: FnMut(&SketchResult),
        S: Future<Output = ()>,
    {
        let send_every = Duration::from_millis(self.config.send_interval_ms.max(1));
        let idle_every = Duration::from_millis(self.config.idle_interval_ms.max(1));
        let poll_every = Duration::from_millis(self.config.poll_interval_ms.max(1));

        let mut send_timer = interval_at(Instant::now() + send_every, send_every);
        let mut idle_timer = interval_at(Instant::now() + idle_every, idle_every);
        let mut poll_timer = interval(poll_every);
        for timer in [&mut send_timer, &mut idle_timer, &mut poll_timer] {
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut last_modified = modified(path).await;
        if last_modified.is_some() {
            self.gate.mark_activity();
        }

        tracing::info!(path = ?path, "watching sketch");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,

                _ = poll_timer.tick() => {
                    let current = modified(path).await;
                    if current.is_some() && current != last_modified {
                        tracing::trace!("sketch changed");
                        last_modified = current;
                        self.gate.mark_activity();
                    }
                }

                _ = send_timer.tick() => {
                    if self.gate.take_send() {
                        tracing::debug!("timed callback - sending");
                        // An upload in flight is abandoned on shutdown
                        tokio::select! {
                            biased;

                            _ = &mut shutdown => break,
                            outcome = self.classify_once(path) => match outcome {
                                Ok(result) => on_result(&result),
                                Err(e) => tracing::error!(error = %e, "sketch classification failed"),
                            },
                        }
                    }
                }

                _ = idle_timer.tick() => {
                    self.gate.expire();
                }
            }
        }

        tracing::info!(sends = self.gate.sends(), "stopped watching sketch");
        Ok(())
    }
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}
