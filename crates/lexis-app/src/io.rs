use std::io::{BufRead, Write};

use kanal::AsyncSender;
use lexis_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Forward stdin lines as search events. Reading happens on a plain thread
/// so a pending read never holds up runtime shutdown.
pub async fn watch_stdin(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let tx = event_tx.clone_sync();
    let interactive = atty::is(atty::Stream::Stdin);

    std::thread::Builder::new()
        .name("lexis-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            prompt(interactive);

            for line in stdin.lock().lines() {
                if cancel.is_cancelled() {
                    return;
                }
                let Ok(line) = line else { break };

                if let Some(event) = parse_input(&line) {
                    let quit = matches!(event, AppEvent::Shutdown);
                    if tx.send(event).is_err() || quit {
                        return;
                    }
                }
                prompt(interactive);
            }

            let _ = tx.send(AppEvent::Shutdown);
        })?;

    Ok(())
}

/// `:q` or `:quit` ends the session; any other non-blank line is a search
pub fn parse_input(line: &str) -> Option<AppEvent> {
    match line.trim() {
        "" => None,
        ":q" | ":quit" => Some(AppEvent::Shutdown),
        term => Some(AppEvent::Search(term.to_string())),
    }
}

fn prompt(interactive: bool) {
    if interactive {
        let mut out = std::io::stdout();
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
}
