/// The search worker channel.
///
/// `SearchWorker::spawn` starts two background tasks: the worker proper,
/// which decodes request envelopes, runs the matcher, and emits response
/// envelopes; and a dispatcher, which routes each response back to its
/// caller by correlation id. Handles are cheap to clone; in-flight requests
/// may overlap without ambiguity. A caller that loses interest simply drops
/// its future; the late response is discarded at the dispatcher.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::matcher;
use super::{SearchError, SearchHit, SearchRequest};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestEnvelope {
    id: u64,
    request: SearchRequest,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseEnvelope {
    id: u64,
    hits: Vec<SearchHit>,
}

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Vec<SearchHit>>>>>;

pub struct SearchWorker;

impl SearchWorker {
    /// Spawn the worker and dispatcher tasks. Must be called within a tokio
    /// runtime. Both tasks exit once every handle clone is dropped.
    pub fn spawn() -> SearchHandle {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<String>();
        let (response_tx, mut response_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            while let Some(raw) = request_rx.recv().await {
                let envelope: RequestEnvelope = match serde_json::from_str(&raw) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        log::warn!("[quadro.search] Dropping undecodable request: {e}");
                        continue;
                    }
                };
                let response = ResponseEnvelope {
                    id: envelope.id,
                    hits: matcher::rank(&envelope.request),
                };
                match serde_json::to_string(&response) {
                    Ok(raw) => {
                        if response_tx.send(raw).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("[quadro.search] Failed to encode response: {e}"),
                }
            }
        });

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let dispatch_pending = pending.clone();
        tokio::spawn(async move {
            while let Some(raw) = response_rx.recv().await {
                let envelope: ResponseEnvelope = match serde_json::from_str(&raw) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        log::warn!("[quadro.search] Dropping undecodable response: {e}");
                        continue;
                    }
                };
                let reply = dispatch_pending.lock().unwrap().remove(&envelope.id);
                if let Some(reply) = reply {
                    // a closed receiver means the caller lost interest
                    let _ = reply.send(envelope.hits);
                }
            }
        });

        SearchHandle {
            request_tx,
            pending,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[derive(Clone)]
pub struct SearchHandle {
    request_tx: mpsc::UnboundedSender<String>,
    pending: PendingMap,
    next_id: Arc<AtomicU64>,
}

impl SearchHandle {
    /// Ship a query to the worker and await the ranked response.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<SearchHit>, SearchError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let raw = serde_json::to_string(&RequestEnvelope { id, request })?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(id, reply_tx);

        if self.request_tx.send(raw).is_err() {
            self.pending.lock().unwrap().remove(&id);
            return Err(SearchError::WorkerGone);
        }
        reply_rx.await.map_err(|_| SearchError::WorkerGone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchDoc;

    fn doc(id: &str, title: &str, description: Option<&str>) -> SearchDoc {
        SearchDoc {
            id: id.into(),
            title: Some(title.into()),
            description: description.map(Into::into),
        }
    }

    #[tokio::test]
    async fn test_search_ranks_through_worker() {
        let handle = SearchWorker::spawn();
        let hits = handle
            .search(SearchRequest {
                query: "design".into(),
                data: vec![
                    doc("a", "Design Document", None),
                    doc("b", "Zebra", None),
                ],
            })
            .await
            .unwrap();

        assert_eq!(hits[0].id, "a");
        assert!(hits.iter().all(|h| h.id != "b"));
    }

    #[tokio::test]
    async fn test_short_query_yields_empty_response() {
        let handle = SearchWorker::spawn();
        let hits = handle
            .search(SearchRequest {
                query: "ab".into(),
                data: vec![doc("a", "abc", None)],
            })
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_correlated() {
        let handle = SearchWorker::spawn();
        let data = vec![
            doc("cards", "Card layout", Some("arrange cards by priority")),
            doc("themes", "Theme picker", Some("background images")),
        ];

        let (cards, themes) = tokio::join!(
            handle.search(SearchRequest {
                query: "card".into(),
                data: data.clone(),
            }),
            handle.search(SearchRequest {
                query: "theme".into(),
                data: data.clone(),
            }),
        );

        assert_eq!(cards.unwrap()[0].id, "cards");
        assert_eq!(themes.unwrap()[0].id, "themes");
    }

    #[tokio::test]
    async fn test_handle_clones_share_worker() {
        let handle = SearchWorker::spawn();
        let clone = handle.clone();
        let hits = clone
            .search(SearchRequest {
                query: "zebra".into(),
                data: vec![doc("b", "Zebra", None)],
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0.0);
    }
}
