//! Async driver tying selections, fetch cycles and the controller together.
//!
//! `Dashboard::run` is a single task: it waits on selection events and on
//! every in-flight cycle at once. Superseded cycles keep running until their
//! request finishes; the controller then drops their result.

use crate::state::{Commit, Controller, Cycle, ViewState};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use gwl_core::{ConfigurationError, DataSource, FetchBundle, FetchError, LocationKey};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

type CycleOutcome = (Cycle, Result<FetchBundle, FetchError>);

/// Owns the controller and drives fetch cycles.
pub struct Dashboard<S> {
    source: Arc<S>,
    controller: Controller,
    first: Cycle,
    selections: mpsc::UnboundedReceiver<LocationKey>,
    views: watch::Sender<Arc<ViewState>>,
}

/// Input and output side of a running dashboard.
///
/// The dashboard stops accepting selections once every handle is dropped.
#[derive(Clone)]
pub struct DashboardHandle {
    selections: mpsc::UnboundedSender<LocationKey>,
    views: watch::Receiver<Arc<ViewState>>,
}

impl DashboardHandle {
    /// Send a selection event. Returns false if the dashboard has stopped.
    pub fn select(&self, key: LocationKey) -> bool {
        self.selections.send(key).is_ok()
    }

    /// Receiver that observes every committed state snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.views.clone()
    }

    pub fn current(&self) -> Arc<ViewState> {
        Arc::clone(&*self.views.borrow())
    }
}

impl<S: DataSource + 'static> Dashboard<S> {
    /// Create a dashboard that starts loading `initial` once run.
    pub fn new(
        source: Arc<S>,
        initial: LocationKey,
    ) -> Result<(Self, DashboardHandle), ConfigurationError> {
        let (controller, first) = Controller::new(initial)?;
        let (selection_tx, selection_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(controller.state());
        let dashboard = Self {
            source,
            controller,
            first,
            selections: selection_rx,
            views: view_tx,
        };
        let handle = DashboardHandle {
            selections: selection_tx,
            views: view_rx,
        };
        Ok((dashboard, handle))
    }

    fn launch(source: &Arc<S>, cycle: Cycle) -> BoxFuture<'static, CycleOutcome> {
        let source = Arc::clone(source);
        async move {
            let outcome = source.fetch_all(cycle.key).await;
            (cycle, outcome)
        }
        .boxed()
    }

    /// Run until all handles are dropped and no cycle is in flight.
    ///
    /// Returns the last committed state.
    pub async fn run(self) -> Result<Arc<ViewState>, ConfigurationError> {
        let Dashboard {
            source,
            mut controller,
            first,
            mut selections,
            views,
        } = self;

        let mut in_flight: FuturesUnordered<BoxFuture<'static, CycleOutcome>> =
            FuturesUnordered::new();
        in_flight.push(Self::launch(&source, first));
        let mut accepting = true;

        loop {
            tokio::select! {
                selection = selections.recv(), if accepting => match selection {
                    Some(key) => {
                        let cycle = controller.select(key)?;
                        views.send_replace(controller.state());
                        in_flight.push(Self::launch(&source, cycle));
                    }
                    None => {
                        debug!("Selection channel closed, draining {} cycle(s)", in_flight.len());
                        accepting = false;
                    }
                },
                Some((cycle, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    if let Commit::Applied(state) = controller.complete(cycle, outcome) {
                        views.send_replace(state);
                    }
                }
                else => break,
            }
        }

        info!("Dashboard stopped on {}", controller.selected());
        Ok(controller.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ErrorClass;
    use async_trait::async_trait;
    use gwl_core::{AnalysisRecord, Endpoint, ForecastRecord, WellRecord};
    use tokio::sync::oneshot;

    type Reply = oneshot::Sender<Result<FetchBundle, FetchError>>;

    /// Source whose every request is answered by the test, in any order.
    struct ScriptedSource {
        requests: mpsc::UnboundedSender<(LocationKey, Reply)>,
    }

    impl ScriptedSource {
        fn new() -> (Self, mpsc::UnboundedReceiver<(LocationKey, Reply)>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { requests: tx }, rx)
        }
    }

    #[async_trait]
    impl DataSource for ScriptedSource {
        async fn fetch_all(&self, key: LocationKey) -> Result<FetchBundle, FetchError> {
            let (tx, rx) = oneshot::channel();
            self.requests.send((key, tx)).expect("test stopped listening");
            rx.await.expect("test dropped the reply")
        }
    }

    fn bundle(condition: &str) -> FetchBundle {
        FetchBundle {
            well: WellRecord {
                dates: vec!["2024-05-01".to_string(), "2024-05-02".to_string()],
                levels: vec![2.4, 2.38],
            },
            forecast: ForecastRecord {
                predicted_levels: vec![2.37],
                future_dates: vec![],
            },
            analysis: AnalysisRecord {
                condition: condition.to_string(),
                steps: vec![],
            },
        }
    }

    fn location_of(state: &ViewState) -> &'static str {
        state.location().expect("state is settled").display_name
    }

    #[tokio::test]
    async fn test_newer_selection_wins_when_it_resolves_first() {
        let (source, mut requests) = ScriptedSource::new();
        let (dashboard, handle) = Dashboard::new(Arc::new(source), LocationKey::Jaipur).unwrap();
        let views = handle.subscribe();
        let task = tokio::spawn(dashboard.run());

        let (first_key, first_reply) = requests.recv().await.unwrap();
        assert_eq!(first_key, LocationKey::Jaipur);
        assert!(handle.select(LocationKey::Nagpur));
        let (second_key, second_reply) = requests.recv().await.unwrap();
        assert_eq!(second_key, LocationKey::Nagpur);

        second_reply.send(Ok(bundle("Safe 🟢"))).unwrap();
        first_reply.send(Ok(bundle("Critical 🔴"))).unwrap();
        drop(handle);

        let last = task.await.unwrap().unwrap();
        assert_eq!(location_of(&last), "Nagpur");
        assert_eq!(location_of(&views.borrow()), "Nagpur");
    }

    #[tokio::test]
    async fn test_newer_selection_wins_when_it_resolves_last() {
        let (source, mut requests) = ScriptedSource::new();
        let (dashboard, handle) = Dashboard::new(Arc::new(source), LocationKey::Jaipur).unwrap();
        let mut views = handle.subscribe();
        let task = tokio::spawn(dashboard.run());

        let (_, first_reply) = requests.recv().await.unwrap();
        handle.select(LocationKey::Bhubaneswar);
        let (_, second_reply) = requests.recv().await.unwrap();

        first_reply.send(Ok(bundle("Critical 🔴"))).unwrap();
        second_reply
            .send(Err(FetchError::HttpStatus {
                endpoint: Endpoint::Predict,
                status: 500,
                message: None,
            }))
            .unwrap();

        let settled = views
            .wait_for(|state| !state.is_loading())
            .await
            .unwrap()
            .clone();
        match &*settled {
            ViewState::Failed { error, location } => {
                assert_eq!(error.class, ErrorClass::HttpStatus);
                assert_eq!(location.display_name, "Bhubaneswar");
            }
            other => panic!("expected failure, got {:?}", other),
        }

        drop(handle);
        assert_eq!(task.await.unwrap().unwrap(), settled);
    }

    #[tokio::test]
    async fn test_selection_publishes_loading() {
        let (source, mut requests) = ScriptedSource::new();
        let (dashboard, handle) = Dashboard::new(Arc::new(source), LocationKey::Nagpur).unwrap();
        let mut views = handle.subscribe();
        let task = tokio::spawn(dashboard.run());

        let (_, reply) = requests.recv().await.unwrap();
        reply.send(Ok(bundle("Safe 🟢"))).unwrap();
        views.wait_for(|state| !state.is_loading()).await.unwrap();

        handle.select(LocationKey::Jaipur);
        views.wait_for(|state| state.is_loading()).await.unwrap();

        let (key, reply) = requests.recv().await.unwrap();
        assert_eq!(key, LocationKey::Jaipur);
        reply.send(Ok(bundle("Semi-Critical 🟡"))).unwrap();
        drop(handle);

        match &*task.await.unwrap().unwrap() {
            ViewState::Ready { analysis, location, .. } => {
                assert_eq!(analysis.condition, "Semi-Critical 🟡");
                assert_eq!(location.display_name, "Jaipur");
            }
            other => panic!("expected ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_drains_in_flight_cycle_after_handles_drop() {
        let (source, mut requests) = ScriptedSource::new();
        let (dashboard, handle) = Dashboard::new(Arc::new(source), LocationKey::Jaipur).unwrap();
        drop(handle);
        let task = tokio::spawn(dashboard.run());

        let (_, reply) = requests.recv().await.unwrap();
        reply.send(Ok(bundle("Safe 🟢"))).unwrap();
        let last = task.await.unwrap().unwrap();
        assert_eq!(location_of(&last), "Jaipur");
    }
}
