use std::path::PathBuf;

use crate::{
    builder::{self, PlaylistOptions},
    config::Config,
    error, info, parser, report,
    spotify::{self, SpotifyClient},
    warning,
};

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub playlist: String,
    pub public: bool,
    pub append: bool,
    pub misses: Option<PathBuf>,
}

pub async fn convert(args: ConvertArgs) {
    let tracks = match parser::parse_export(&args.input).await {
        Ok(tracks) => tracks,
        Err(e) => error!("{}", e),
    };
    info!("Loaded {} tracks from Apple Music export.", tracks.len());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let options = PlaylistOptions {
        public: args.public,
        append: args.append,
        ..PlaylistOptions::new(args.playlist.clone())
    };

    let api_url = config.api_url.clone();
    let result = match builder::authorize_and_build(
        spotify::auth::authorize(&config),
        |tokens| SpotifyClient::new(api_url, tokens),
        &tracks,
        &options,
    )
    .await
    {
        Ok(result) => result,
        Err(e) => error!("{}", e),
    };

    report::print_report(&result, &args.playlist);

    if let Some(path) = args.misses {
        if result.failed.is_empty() {
            return;
        }
        if let Err(e) = report::write_misses(&path, &result.failed).await {
            warning!("Failed to write misses file {}: {}", path.display(), e);
        }
    }
}
