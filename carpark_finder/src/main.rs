use crate::cli::{Args, Command};
use crate::settings::Settings;
use anyhow::Context;
use carpark_search::config::CarparkApiConfig;
use carpark_search::lookup::HttpCarparkLookup;
use carpark_search::query::SearchParameter;
use carpark_search::search::{render, submit_label, SearchDisplay, SearchState, SearchView};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use update_banner::banner::UpdateBanner;
use update_banner::store::JsonFileStore;

mod cli;
mod settings;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    shared_kernel::tracing::config_telemetry("carpark_finder");
    start(args).await
}

async fn start(args: Args) -> anyhow::Result<()> {
    let settings = Settings::parse(args.config_dir.as_deref())?;
    let parameter = args
        .variant
        .map(SearchParameter::from)
        .unwrap_or(settings.carpark_api.search_parameter);

    let api = HttpCarparkLookup::new(CarparkApiConfig {
        search_parameter: parameter,
        ..settings.carpark_api
    });
    let view = Arc::new(SearchView::new(Arc::new(api), parameter));

    if let Some(query) = args.query {
        return search_once(&view, query).await;
    }

    let store = JsonFileStore::new(settings.banner.storage_path);
    let banner = UpdateBanner::new(Arc::new(store));
    interactive(view, banner).await
}

async fn search_once(view: &SearchView, query: String) -> anyhow::Result<()> {
    view.submit(query).await?;
    terminal::write_display(&mut std::io::stdout(), &view.display())
        .context("Failed to write results")
}

async fn interactive(view: Arc<SearchView>, banner: UpdateBanner) -> anyhow::Result<()> {
    let parameter = view.parameter();
    {
        let mut out = std::io::stdout();
        terminal::write_title(&mut out)?;
        if banner.should_show() {
            terminal::write_banner(&mut out, banner.message())?;
        }
        terminal::write_prompt(&mut out, parameter, submit_label(&view.state()))?;
    }

    let renderer = tokio::spawn(render_changes(view.subscribe(), parameter));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        match Command::from(line.as_str()) {
            Command::Quit => break,
            Command::Dismiss => {
                if let Err(err) = banner.dismiss() {
                    tracing::warn!("Failed to persist banner dismissal: {err:?}");
                }
                let label = submit_label(&view.state());
                terminal::write_prompt(&mut std::io::stdout(), parameter, label)?;
            }
            Command::Search(query) => {
                let view = view.clone();
                tokio::spawn(async move {
                    if let Err(err) = view.submit(query).await {
                        let mut out = std::io::stdout();
                        let label = submit_label(&view.state());
                        let written = terminal::write_display(
                            &mut out,
                            &SearchDisplay::Message(err.to_string()),
                        )
                        .and_then(|_| terminal::write_prompt(&mut out, parameter, label));
                        if let Err(err) = written {
                            tracing::warn!("Failed to write to stdout: {err:?}");
                        }
                    }
                });
            }
        }
    }

    renderer.abort();
    Ok(())
}

/// Re-renders after every state change until the view is dropped.
async fn render_changes(mut receiver: watch::Receiver<SearchState>, parameter: SearchParameter) {
    while receiver.changed().await.is_ok() {
        let state = receiver.borrow_and_update().clone();
        let mut out = std::io::stdout();
        let written = terminal::write_display(&mut out, &render(&state))
            .and_then(|_| terminal::write_prompt(&mut out, parameter, submit_label(&state)));
        if let Err(err) = written {
            tracing::warn!("Failed to write to stdout: {err:?}");
        }
    }
}
