use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_core::normalize_term;
use lexis_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod search;

use search::handle_search;

const UNREACHABLE_STATUS: &str =
    "Dictionary service is unreachable. Check your API key and connection; lookups may fail.";

/// Receives input events and runs lookups concurrently. Each search takes a
/// ticket on arrival so the display can tell which completion is newest.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut in_flight = JoinSet::new();

    if !state.service.check_connection().await {
        app_to_ui_tx
            .send(AppEvent::Status(UNREACHABLE_STATUS.to_string()))
            .await?;
    }

    tracing::info!("[EVENT_LOOP] Waiting for searches");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                in_flight.abort_all();
                let _ = app_to_ui_tx.send(AppEvent::Shutdown).await;
                return Ok(());
            }
            event = ui_to_app_rx.recv() => event?,
        };

        while let Some(done) = in_flight.try_join_next() {
            log_search_outcome(done);
        }

        match event {
            AppEvent::Search(term) => {
                if normalize_term(&term).is_empty() {
                    continue;
                }
                let ticket = state.sequencer.issue();
                tracing::debug!("Search #{ticket}: {term}");
                in_flight.spawn(handle_search(
                    state.clone(),
                    ticket,
                    term,
                    app_to_ui_tx.clone(),
                ));
            }
            AppEvent::Shutdown => {
                while let Some(done) = in_flight.join_next().await {
                    log_search_outcome(done);
                }
                app_to_ui_tx.send(AppEvent::Shutdown).await?;
                return Ok(());
            }
            AppEvent::ShowRecord { .. } | AppEvent::ShowTrending(_) | AppEvent::Status(_) => {
                // Display-only events
            }
        }
    }
}

fn log_search_outcome(done: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match done {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("search task failed: {e}"),
        Err(e) => tracing::error!("search task panicked: {e}"),
    }
}
