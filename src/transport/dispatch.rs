use std::sync::Arc;
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vidscout_stream::{DataStream, Generation};

use super::SearchBackend;
use crate::search::{FetchEnvelope, FetchError, FetchExecutor, FetchRequest};

const WORKER_THREADS: usize = 2;

/// Runs requests on a private tokio runtime and posts each completion to the
/// event loop's channel.
///
/// A cancelled request resolves to [`FetchError::Cancelled`] as soon as its
/// token fires, without waiting for the network.
pub struct Dispatcher {
    runtime: Option<Runtime>,
    backend: Arc<dyn SearchBackend>,
    tx: Sender<FetchEnvelope>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn SearchBackend>, tx: Sender<FetchEnvelope>) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .thread_name("vidscout-fetch")
            .enable_all()
            .build()
            .context("failed to start the request runtime")?;
        Ok(Self {
            runtime: Some(runtime),
            backend,
            tx,
        })
    }
}

impl FetchExecutor for Dispatcher {
    fn execute(&mut self, id: Generation, request: FetchRequest) -> CancellationToken {
        let token = CancellationToken::new();
        let Some(runtime) = &self.runtime else {
            token.cancel();
            return token;
        };

        let stream = DataStream::new(self.tx.clone(), id, request.key.facet);
        let backend = Arc::clone(&self.backend);
        let cancelled = token.clone();
        runtime.spawn(async move {
            let result = tokio::select! {
                () = cancelled.cancelled() => Err(FetchError::Cancelled),
                result = backend.fetch(&request) => result,
            };
            if !stream.send(result, true) {
                debug!(generation = %stream.id(), "event loop gone; dropping completion");
            }
        });
        token
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use async_trait::async_trait;
    use vidscout_stream::GenerationTracker;

    use super::*;
    use crate::search::{Facet, FacetResponse, FetchKey, FetchPayload, TitleResult};

    struct Fake {
        delay: Option<Duration>,
    }

    #[async_trait]
    impl SearchBackend for Fake {
        async fn fetch(&self, request: &FetchRequest) -> Result<FetchPayload, FetchError> {
            match self.delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
            Ok(FetchPayload::Titles(FacetResponse {
                data: vec![TitleResult {
                    video_id: "abc".into(),
                    title: request.key.query.clone(),
                    channel_name: None,
                    upload_date: None,
                    is_available: true,
                }],
                total_count: Some(1),
            }))
        }
    }

    fn request(query: &str) -> FetchRequest {
        FetchRequest {
            key: FetchKey::new(Facet::Titles, query, None),
            limit: 50,
            offset: 0,
        }
    }

    #[test]
    fn completions_arrive_tagged_with_their_generation() {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(Fake {
            delay: Some(Duration::from_millis(5)),
        });
        let mut dispatcher = Dispatcher::new(backend, tx).expect("dispatcher");
        let mut generations = GenerationTracker::default();
        let id = generations.advance();
        dispatcher.execute(id, request("rust"));

        let envelope = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
        assert_eq!(envelope.id, id);
        assert_eq!(envelope.kind, Facet::Titles);
        assert!(envelope.complete);
        match envelope.payload {
            Ok(FetchPayload::Titles(response)) => assert_eq!(response.data[0].title, "rust"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn cancellation_resolves_without_the_network() {
        let (tx, rx) = mpsc::channel();
        let mut dispatcher = Dispatcher::new(Arc::new(Fake { delay: None }), tx).expect("dispatcher");
        let mut generations = GenerationTracker::default();
        let token = dispatcher.execute(generations.advance(), request("rust"));
        token.cancel();

        let envelope = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
        assert_eq!(envelope.payload.expect_err("cancelled"), FetchError::Cancelled);
    }
}
