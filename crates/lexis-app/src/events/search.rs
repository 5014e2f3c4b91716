use std::sync::Arc;

use kanal::AsyncSender;
use lexis_types::AppEvent;
use lexis_types::events::Ticket;

use crate::state::AppState;

const TRENDING_SHOWN: usize = 5;

pub async fn handle_search(
    state: Arc<AppState>,
    ticket: Ticket,
    term: String,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(record) = state.service.search(&term).await else {
        return Ok(());
    };

    if record.is_error() {
        tracing::debug!("Search #{ticket} for {} failed", record.word);
    }

    app_to_ui_tx
        .send(AppEvent::ShowRecord { ticket, record })
        .await?;
    app_to_ui_tx
        .send(AppEvent::ShowTrending(state.service.trending(TRENDING_SHOWN)))
        .await?;

    Ok(())
}
