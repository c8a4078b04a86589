use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use pcmanager::error::QueryError;
use pcmanager::system::sample::ResourceSample;
use pcmanager::system::sampler::Sampler;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Sample(Result<ResourceSample, QueryError>),
    Resize,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _input_task: tokio::task::JoinHandle<()>,
    _sampler_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// `sample_interval` is the pause after each completed sample, so a slow
    /// measurement pushes the next one back instead of overlapping it.
    pub fn new(sampler: Sampler, sample_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let input_tx = tx.clone();
        let input_task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(Ok(evt)) = reader.next().await {
                let mapped = match evt {
                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(e) = mapped
                    && input_tx.send(e).is_err()
                {
                    break;
                }
            }
        });

        let sampler_task = tokio::spawn(async move {
            let mut sampler = sampler;
            loop {
                let (returned, result) = sample_cycle(sampler, Sampler::sample).await;
                sampler = returned;

                if let Some(result) = result {
                    if let Err(err) = &result {
                        tracing::warn!(%err, "resource sample failed");
                    }
                    if tx.send(Event::Sample(result)).is_err() {
                        break;
                    }
                }
                tokio::time::sleep(sample_interval).await;
            }
        });

        Self {
            rx,
            _input_task: input_task,
            _sampler_task: sampler_task,
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Runs one blocking measurement off the async thread. If the measurement
/// panics, a fresh sampler with the same window replaces the lost one and
/// the cycle yields no result.
async fn sample_cycle<F>(
    sampler: Sampler,
    measure: F,
) -> (Sampler, Option<Result<ResourceSample, QueryError>>)
where
    F: FnOnce(&mut Sampler) -> Result<ResourceSample, QueryError> + Send + 'static,
{
    let window = sampler.window();
    let joined = tokio::task::spawn_blocking(move || {
        let mut sampler = sampler;
        let result = measure(&mut sampler);
        (sampler, result)
    })
    .await;

    match joined {
        Ok((sampler, result)) => (sampler, Some(result)),
        Err(err) => {
            tracing::error!(%err, "sampler thread failed, restarting sampler");
            (Sampler::new(window), None)
        }
    }
}
