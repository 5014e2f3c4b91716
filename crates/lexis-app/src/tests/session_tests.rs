use std::sync::Arc;
use std::time::Duration;

use lexis_store::Database;
use lexis_types::AppEvent;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::support::{BARK, ScriptedGenerator, service};
use crate::events::event_loop;
use crate::sequencer::RequestSequencer;
use crate::state::AppState;
use crate::ui::{RenderMode, ui_loop};

fn state(generator: ScriptedGenerator) -> Arc<AppState> {
    let service = service(Arc::new(generator), Database::in_memory());
    Arc::new(AppState::with_service(service))
}

async fn next_event(rx: &kanal::AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - event never arrived!"),
    }
}

#[test]
fn tickets_increase_and_only_the_newest_is_current() {
    let sequencer = RequestSequencer::new();
    let first = sequencer.issue();
    let second = sequencer.issue();

    assert!(second > first);
    assert!(!sequencer.is_current(first));
    assert!(sequencer.is_current(second));
}

#[tokio::test]
async fn search_event_produces_ticketed_record_then_trending() {
    let state = state(ScriptedGenerator::ok(BARK));
    let (in_tx, in_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    let task = tokio::spawn(event_loop(
        state.clone(),
        in_rx,
        out_tx,
        CancellationToken::new(),
    ));

    in_tx.send(AppEvent::Search("Bark".into())).await.unwrap();

    match next_event(&out_rx).await {
        AppEvent::ShowRecord { ticket, record } => {
            assert_eq!(record.word, "bark");
            assert!(state.sequencer.is_current(ticket));
        }
        other => panic!("Wrong event type: {other:?}"),
    }
    match next_event(&out_rx).await {
        AppEvent::ShowTrending(entries) => assert_eq!(entries[0].word, "bark"),
        other => panic!("Wrong event type: {other:?}"),
    }

    in_tx.send(AppEvent::Shutdown).await.unwrap();
    assert!(matches!(next_event(&out_rx).await, AppEvent::Shutdown));
    assert!(task.await.unwrap().is_ok());
}

#[tokio::test]
async fn superseded_search_is_stale_when_it_lands() {
    let state = state(ScriptedGenerator::ok(BARK).with_delay(Duration::from_millis(50)));
    let (in_tx, in_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    tokio::spawn(event_loop(
        state.clone(),
        in_rx,
        out_tx,
        CancellationToken::new(),
    ));

    in_tx.send(AppEvent::Search("bark".into())).await.unwrap();
    in_tx.send(AppEvent::Search("growl".into())).await.unwrap();
    in_tx.send(AppEvent::Shutdown).await.unwrap();

    let mut current = Vec::new();
    loop {
        match next_event(&out_rx).await {
            AppEvent::ShowRecord { ticket, record } => {
                if state.sequencer.is_current(ticket) {
                    current.push(record.word);
                }
            }
            AppEvent::Shutdown => break,
            _ => {}
        }
    }

    assert_eq!(current, vec!["growl"]);
}

#[tokio::test]
async fn unreachable_backend_is_reported_before_searches() {
    let state = state(ScriptedGenerator::ok(BARK).unreachable());
    let (in_tx, in_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    tokio::spawn(event_loop(state, in_rx, out_tx, CancellationToken::new()));
    in_tx.send(AppEvent::Shutdown).await.unwrap();

    match next_event(&out_rx).await {
        AppEvent::Status(status) => assert!(status.contains("unreachable")),
        other => panic!("Wrong event type: {other:?}"),
    }
    assert!(matches!(next_event(&out_rx).await, AppEvent::Shutdown));
}

#[tokio::test]
async fn blank_search_takes_no_ticket() {
    let state = state(ScriptedGenerator::ok(BARK));
    let (in_tx, in_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    tokio::spawn(event_loop(
        state.clone(),
        in_rx,
        out_tx,
        CancellationToken::new(),
    ));

    in_tx.send(AppEvent::Search("   ".into())).await.unwrap();
    in_tx.send(AppEvent::Shutdown).await.unwrap();

    assert!(matches!(next_event(&out_rx).await, AppEvent::Shutdown));
    assert!(state.sequencer.is_current(0));
}

#[tokio::test]
async fn cancellation_tells_the_display_to_stop() {
    let state = state(ScriptedGenerator::ok(BARK));
    let (_in_tx, in_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();

    let task = tokio::spawn(event_loop(state, in_rx, out_tx, cancel.child_token()));
    cancel.cancel();

    assert!(matches!(next_event(&out_rx).await, AppEvent::Shutdown));
    assert!(task.await.unwrap().is_ok());
}

#[tokio::test]
async fn display_skips_stale_records_and_stops_on_shutdown() {
    let sequencer = Arc::new(RequestSequencer::new());
    let stale = sequencer.issue();
    sequencer.issue();

    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let record = lexis_core::failure::error_record(
        "bark",
        lexis_core::FailureKind::Other,
        chrono::Utc::now(),
    );
    tx.send(AppEvent::ShowRecord {
        ticket: stale,
        record,
    })
    .await
    .unwrap();
    tx.send(AppEvent::Shutdown).await.unwrap();

    let result = timeout(
        Duration::from_secs(2),
        ui_loop(rx, sequencer, RenderMode::Text),
    )
    .await;
    assert!(matches!(result, Ok(Ok(()))));
}
