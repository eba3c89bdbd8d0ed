use crate::command::{self, OutputFormat};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swmap", version)]
#[command(
    about = "Turn an event feed into styled map markers",
    long_about = "swmap fetches an event feed, keeps the events that can be mapped, labels and colors each one by whether it is past or upcoming, and renders the markers as JSON or a standalone Leaflet page."
)]
#[command(arg_required_else_help = true)]
#[command(after_long_help = "Examples:
  swmap render --config swmap.toml --format html --output events.html
  swmap render --feed saved.json --now 2013-06-01
  swmap url --config swmap.toml
  swmap completion zsh > ~/.zsh/completions/_swmap
  swmap man > swmap.1")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Fetch the feed and render map markers",
        long_about = "Fetch the configured feed (or read a saved one), filter it to mappable events, and write the rendered markers."
    )]
    #[command(after_long_help = "Examples:
  swmap render
  swmap render --config swmap.toml --format html --output events.html
  swmap render --feed saved.json --now 2013-06-01T00:00:00Z --log run.ndjson")]
    Render {
        #[arg(
            long,
            value_name = "PATH",
            help = "Config file (default: ./swmap.toml when present)"
        )]
        config: Option<PathBuf>,
        #[arg(
            long,
            value_name = "PATH",
            help = "Read the feed body from a file instead of fetching it"
        )]
        feed: Option<PathBuf>,
        #[arg(
            long,
            value_name = "TIMESTAMP",
            help = "Reference time for past/upcoming styling (default: now)"
        )]
        now: Option<String>,
        #[arg(
            long,
            value_enum,
            default_value = "json",
            value_name = "FORMAT",
            help = "Output format"
        )]
        format: OutputFormat,
        #[arg(
            long,
            value_name = "PATH",
            help = "Write output to file (stdout when omitted)"
        )]
        output: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Write NDJSON step log to file")]
        log: Option<PathBuf>,
    },
    #[command(about = "Print the feed URL built from the config")]
    #[command(after_long_help = "Example:
  swmap url --config swmap.toml")]
    Url {
        #[arg(
            long,
            value_name = "PATH",
            help = "Config file (default: ./swmap.toml when present)"
        )]
        config: Option<PathBuf>,
    },
    #[command(
        about = "Generate shell completion script",
        long_about = "Generate shell completion script for your shell. Redirect output to your shell completion directory."
    )]
    #[command(arg_required_else_help = true)]
    #[command(after_long_help = "Examples:
  swmap completion bash > ~/.local/share/bash-completion/completions/swmap
  swmap completion zsh > ~/.zsh/completions/_swmap
  swmap completion fish > ~/.config/fish/completions/swmap.fish")]
    Completion {
        #[arg(value_enum, value_name = "SHELL", help = "Target shell")]
        shell: Shell,
    },
    #[command(
        about = "Generate a man page",
        long_about = "Generate a roff man page for swmap."
    )]
    #[command(after_long_help = "Examples:
  swmap man > swmap.1
  swmap man --output docs/swmap.1")]
    Man {
        #[arg(
            long,
            value_name = "PATH",
            help = "Write man page to file (stdout when omitted)"
        )]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            config,
            feed,
            now,
            format,
            output,
            log,
        } => command::execute_render(command::RenderCommand {
            config,
            feed,
            now,
            format,
            output,
            log,
        }),
        Commands::Url { config } => command::print_fetch_url(config),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Man { output } => {
            let man = clap_mangen::Man::new(Cli::command());
            match output {
                Some(path) => {
                    let mut bytes = Vec::new();
                    man.render(&mut bytes)?;
                    fs::write(path, bytes)?;
                }
                None => {
                    man.render(&mut io::stdout())?;
                }
            }
            Ok(())
        }
    }
}
