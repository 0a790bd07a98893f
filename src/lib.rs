pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod view;

use cli::Args;
use client::HttpBackend;
use controller::{ ConversationController, SubmitOutcome };
use log::info;
use std::error::Error;
use tokio::io::{ AsyncBufReadExt, BufReader };
use view::{ ConsoleView, Transcript };

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Chat Client Configuration ---");
    info!("Backend URL: {}", args.backend_url);
    info!("Response Mode: {}", args.response_mode);
    info!("Related Articles: {}", args.related_articles);
    info!("Request Timeout (s): {}", args.request_timeout_secs);
    if let Some(path) = &args.transcript {
        info!("Transcript Path: {}", path);
    }
    info!("---------------------------------");

    let backend = HttpBackend::new(args.backend_config())?;
    let view = Transcript::new(ConsoleView::stdout());
    let mut controller = ConversationController::new(backend, view, args.controller_config());

    let mut failed = false;
    match &args.query {
        Some(query) => {
            failed = controller.submit(query).await == SubmitOutcome::Failed;
        }
        None => {
            controller.notify(
                &format!("Connected to {}. Type a question, Ctrl-D to quit.", args.backend_url)
            );
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                controller.submit(&line).await;
            }
        }
    }

    if let Some(path) = &args.transcript {
        let transcript = controller.view();
        transcript.write_to(path)?;
        info!("Transcript written to {} ({} messages)", path, transcript.message_count());
    }

    if failed {
        return Err("chat request failed".into());
    }
    Ok(())
}
