use std::sync::Arc;

use clap::{Parser, Subcommand};
use lexis_core::featured::suggestions;
use lexis_core::normalize_term;

use crate::controller::AppController;
use crate::state::AppState;
use crate::ui::{self, RenderMode};

#[derive(Parser, Debug)]
#[command(name = "lexis", version, about = "AI-assisted English dictionary")]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Profile under `<data_dir>/profiles`
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single word
    Lookup { word: String },
    /// Interactive session; one search per line, `:q` to quit
    Search,
    /// Lookup history, newest first
    History {
        #[arg(long)]
        clear: bool,
        /// Remove every entry for this word
        #[arg(long)]
        remove: Option<String>,
    },
    /// List favorite words
    Favorites {
        #[arg(long)]
        clear: bool,
    },
    Favorite { word: String },
    Unfavorite { word: String },
    /// Save a word for offline use, or list saved words
    Offline {
        word: Option<String>,
        #[arg(long)]
        remove: bool,
    },
    /// Featured words: trending searches padded with defaults
    Trending {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Full entries for the featured words
    Featured {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    WordOfTheDay,
    /// Completions for a partial word
    Suggest { query: String },
}

impl Cli {
    pub fn mode(&self) -> RenderMode {
        if self.json {
            RenderMode::Json
        } else {
            RenderMode::Text
        }
    }
}

pub async fn run(cli: Cli, state: Arc<AppState>) -> anyhow::Result<()> {
    let mode = cli.mode();
    let service = state.service.clone();
    let db = service.db();

    match cli.command {
        Command::Lookup { word } => match service.lookup(&word).await {
            Some(record) => println!("{}", ui::render_record(&record, mode)?),
            None => anyhow::bail!("Nothing to look up"),
        },
        Command::Search => interactive(state.clone(), mode).await?,
        Command::History { clear, remove } => {
            if clear {
                db.clear_history().await?;
                tracing::info!("History cleared");
            } else if let Some(word) = remove {
                let removed = db.remove_word_from_history(&normalize_term(&word)).await?;
                tracing::info!("Removed {removed} history entries");
            } else {
                let items = db.history().await?;
                print_list(&items, mode, ui::render_history)?;
            }
        }
        Command::Favorites { clear } => {
            if clear {
                db.clear_favorites().await?;
            } else {
                let items = db.favorites().await?;
                print_list(&items, mode, ui::render_favorites)?;
            }
        }
        Command::Favorite { word } => {
            let word = normalize_term(&word);
            db.add_favorite(&word).await?;
            println!("Added {word} to favorites");
        }
        Command::Unfavorite { word } => {
            let word = normalize_term(&word);
            db.remove_favorite(&word).await?;
            println!("Removed {word} from favorites");
        }
        Command::Offline { word: None, .. } => {
            let words: Vec<String> = db
                .offline_words()
                .await?
                .into_iter()
                .map(|record| record.word)
                .collect();
            print_list(&words, mode, |words| words.join("\n"))?;
        }
        Command::Offline {
            word: Some(word),
            remove,
        } => {
            let word = normalize_term(&word);
            if remove {
                db.remove_from_offline(&word).await?;
                println!("Removed {word} from offline words");
            } else if service.save_offline(&word).await? {
                println!("Saved {word} for offline use");
            } else {
                anyhow::bail!("Could not fetch {word}; nothing saved");
            }
        }
        Command::Trending { limit } => {
            let words = service.featured_words(limit);
            print_list(&words, mode, |words| words.join("\n"))?;
        }
        Command::Featured { limit } => {
            let records = service.featured(limit).await;
            match mode {
                RenderMode::Json => println!("{}", ui::to_json(&records)?),
                RenderMode::Text => {
                    for record in &records {
                        println!("{}\n", ui::render_record(record, mode)?);
                    }
                }
            }
        }
        Command::WordOfTheDay => {
            let record = service.word_of_the_day().await;
            println!("{}", ui::render_record(&record, mode)?);
        }
        Command::Suggest { query } => {
            let words = suggestions(&query);
            print_list(&words, mode, |words| words.join("\n"))?;
        }
    }

    Ok(())
}

fn print_list<T, F>(items: &[T], mode: RenderMode, text: F) -> anyhow::Result<()>
where
    T: serde::Serialize,
    F: Fn(&[T]) -> String,
{
    match mode {
        RenderMode::Json => println!("{}", ui::to_json(items)?),
        RenderMode::Text if items.is_empty() => println!("(none)"),
        RenderMode::Text => println!("{}", text(items)),
    }
    Ok(())
}

async fn interactive(state: Arc<AppState>, mode: RenderMode) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(mode);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
                tasks.shutdown().await;
                break;
            }
            next = tasks.join_next() => match next {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("task exited: {e}");
                    controller.shutdown();
                    tasks.shutdown().await;
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    controller.shutdown();
                    tasks.shutdown().await;
                    break;
                }
            }
        }
    }

    Ok(())
}
