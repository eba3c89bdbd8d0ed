use crate::config::resolve_config;
use crate::feed::parse_date_like;
use crate::feed::transport::transport_for;
use crate::render::Orchestrator;
use crate::render::leaflet;
use crate::render::surface::MapDocument;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
}

#[derive(Debug, Clone)]
pub struct RenderCommand {
    pub config: Option<PathBuf>,
    pub feed: Option<PathBuf>,
    pub now: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

pub fn execute_render(cmd: RenderCommand) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config = resolve_config(cmd.config.as_deref(), &cwd)?;
    let now = resolve_now(cmd.now.as_deref())?;
    let transport = transport_for(cmd.feed.as_deref())?;

    let mut surface = MapDocument::new(config.map.clone());
    let mut orchestrator = Orchestrator::new(cmd.log);
    let session = orchestrator.run(transport.as_ref(), &config, &mut surface, now)?;

    let rendered = match cmd.format {
        OutputFormat::Json => surface.to_json()?,
        OutputFormat::Html => leaflet::to_html(&surface)?,
    };
    write_output(cmd.output.as_deref(), &rendered)?;

    let summary = session.summary();
    eprintln!(
        "Placed {} of {} events ({} dropped), run {}",
        summary.placed, summary.received, summary.dropped, summary.run_id
    );
    Ok(())
}

pub fn print_fetch_url(config: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config = resolve_config(config.as_deref(), &cwd)?;
    println!("{}", config.fetch_url());
    Ok(())
}

pub fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => parse_date_like(raw)
            .ok_or_else(|| anyhow!("invalid --now `{raw}`; expected RFC 3339 or YYYY-MM-DD")),
    }
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("write output {}", path.display()))
        }
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
