//! Interactive selection loop.
//!
//! Each non-empty stdin line is a location selection. States are printed as
//! the dashboard publishes them; a burst of fast transitions may be printed
//! as its latest state only.

use crate::render::render;
use anyhow::Context;
use gwl_core::fetcher::{FetchConfig, Fetcher};
use gwl_core::LocationKey;
use gwl_dashboard::Dashboard;
use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// What a line typed by the user asks for.
#[derive(Debug, PartialEq)]
pub enum Input {
    Select(LocationKey),
    Quit,
    Skip,
}

pub fn parse_input(line: &str) -> anyhow::Result<Input> {
    match line.trim() {
        "" => Ok(Input::Skip),
        "quit" | "exit" => Ok(Input::Quit),
        other => Ok(Input::Select(other.parse()?)),
    }
}

pub async fn run_watch(config: FetchConfig, initial: Option<&str>) -> anyhow::Result<()> {
    let initial = match initial {
        Some(location) => location.parse()?,
        None => LocationKey::ALL[0],
    };
    let fetcher = Fetcher::new(config).context("failed to build HTTP client")?;
    let (dashboard, handle) = Dashboard::new(Arc::new(fetcher), initial)?;

    let mut views = handle.subscribe();
    let printer = tokio::spawn(async move {
        println!("{}", render(&views.borrow_and_update()));
        while views.changed().await.is_ok() {
            println!("{}", render(&views.borrow_and_update()));
        }
    });
    let driver = tokio::spawn(dashboard.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(Input::Select(key)) => {
                if !handle.select(key) {
                    break;
                }
            }
            Ok(Input::Quit) => break,
            Ok(Input::Skip) => {}
            Err(e) => warn!("{}", e),
        }
    }

    drop(handle);
    let last = driver.await??;
    printer.await?;
    info!("Watch finished, last state loading={}", last.is_loading());
    Ok(())
}
