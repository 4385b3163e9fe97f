use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use amspot::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert an exported Apple Music playlist into a Spotify playlist
    Convert(ConvertOptions),

    /// Show the tracks of an export without contacting Spotify
    Preview(PreviewOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertOptions {
    /// Exported Apple Music playlist (File > Library > Export Playlist..., Text)
    #[clap(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Name of the Spotify playlist to create
    #[clap(long, value_name = "NAME")]
    playlist: String,

    /// Create the playlist as public (default private)
    #[clap(long)]
    public: bool,

    /// Add to an existing playlist with the same name instead of creating a new one
    #[clap(long)]
    append: bool,

    /// Write tracks that could not be converted to this file
    #[clap(long, value_name = "PATH")]
    misses: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewOptions {
    /// Exported Apple Music playlist
    #[clap(long = "in", value_name = "FILE")]
    input: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Convert(opt) => {
            cli::convert(cli::ConvertArgs {
                input: opt.input,
                playlist: opt.playlist,
                public: opt.public,
                append: opt.append,
                misses: opt.misses,
            })
            .await
        }
        Command::Preview(opt) => cli::preview(&opt.input).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
