use std::process::ExitCode;

use anyhow::Result;
use nearme_core::{AppError, Config};
use nearme_view::{render, Session, ViewState};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    nearme_core::init()?;

    let config = match Config::load_validated() {
        Ok((config, _)) => config,
        Err(e) => {
            let error = AppError::from(e);
            tracing::error!("{}", error);
            println!("{}", render(&ViewState::failed("", &error)));
            return Ok(ExitCode::FAILURE);
        }
    };

    let session = match Session::from_config(&config).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", render(&ViewState::failed(&config.places.query, &e)));
            return Ok(ExitCode::FAILURE);
        }
    };

    // Ctrl-C tears the session down; in-flight requests are abandoned
    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let state = session
        .run(|state| tracing::debug!("View updated:\n{}", render(state)))
        .await;

    println!("{}", render(&state));
    if state.is_failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
