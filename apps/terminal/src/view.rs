//! Terminal rendering of the two addition screens.

use std::sync::Arc;

use anyhow::Result;
use client_core::{AdditionController, Session, SubmitOutcome, ViewState};
use tokio::io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::debug;

const QUIT_COMMAND: &str = "quit";
const REJECTED_NOTICE: &str = "A previous request is still pending; new additions are refused.";

pub fn format_result(result: Option<f64>) -> String {
    match result {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    }
}

pub fn render_input_page(session: &Session) -> String {
    let mut page = String::from("== Add two numbers ==\n");
    if session.is_pending {
        page.push_str("Talking to the server...\n");
    }
    page
}

pub fn render_result_page(session: &Session) -> String {
    format!(
        "== Result ==\nThe sum is {}\nPress Enter to add more numbers.\n",
        format_result(session.result)
    )
}

/// Line shown after a submit. Failures stay silent on screen.
pub fn outcome_notice(outcome: &SubmitOutcome) -> Option<&'static str> {
    match outcome {
        SubmitOutcome::Rejected => Some(REJECTED_NOTICE),
        SubmitOutcome::Completed { .. } | SubmitOutcome::Failed(_) => None,
    }
}

pub async fn run_interactive(controller: Arc<AdditionController>) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let session = controller.session().await;
        match session.current_view {
            ViewState::InputPage => {
                stdout
                    .write_all(render_input_page(&session).as_bytes())
                    .await?;
                let Some(first) = prompt(&mut lines, "First number: ").await? else {
                    return Ok(());
                };
                let Some(second) = prompt(&mut lines, "Second number: ").await? else {
                    return Ok(());
                };
                controller.set_first_operand(first).await;
                controller.set_second_operand(second).await;

                stdout.write_all(b"Talking to the server...\n").await?;
                stdout.flush().await?;
                let outcome = controller.submit().await;
                debug!(?outcome, "submit finished");
                if let Some(notice) = outcome_notice(&outcome) {
                    stdout.write_all(format!("{notice}\n").as_bytes()).await?;
                }
            }
            ViewState::ResultPage => {
                stdout
                    .write_all(render_result_page(&session).as_bytes())
                    .await?;
                stdout.flush().await?;
                if prompt(&mut lines, "").await?.is_none() {
                    return Ok(());
                }
                controller.return_to_input().await;
            }
        }
    }
}

pub async fn run_once<W: AsyncWrite + Unpin>(
    controller: &AdditionController,
    first: String,
    second: String,
    out: &mut W,
) -> Result<()> {
    controller.set_first_operand(first).await;
    controller.set_second_operand(second).await;

    match controller.submit().await {
        SubmitOutcome::Completed { result } => {
            out.write_all(format!("{}\n", format_result(result)).as_bytes()).await?;
            out.flush().await?;
            Ok(())
        }
        SubmitOutcome::Failed(err) => Err(anyhow::anyhow!("addition request failed: {err}")),
        SubmitOutcome::Rejected => Err(anyhow::anyhow!(REJECTED_NOTICE)),
    }
}

/// Reads one line; `None` on end of input or the quit command.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    match lines.next_line().await? {
        Some(line) if line.trim() == QUIT_COMMAND => Ok(None),
        Some(line) => Ok(Some(line)),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
