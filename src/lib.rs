pub mod cli;
pub mod config;
pub mod domain;
pub mod fetchers;
pub mod http;
pub mod pagination;
pub mod parsers;
pub mod rate_limiter;
pub mod report;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::config::AppConfig;
use crate::services::ReportService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_report(card: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ReportService::new(config)?;
        service.run(card).await
    })
}
