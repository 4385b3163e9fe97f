use async_trait::async_trait;
use reqwest::{Client, Response};
use tokio::sync::Mutex;

use crate::{
    Res,
    errors::Error,
    management::TokenManager,
    spotify::MusicService,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        GetUserPlaylistsResponse, Playlist, SearchResponse, Track, User,
    },
};

const PLAYLIST_PAGE_SIZE: usize = 50;
const SEARCH_LIMIT: &str = "5";

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, tokens: TokenManager) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    async fn bearer(&self) -> Res<String> {
        self.tokens.lock().await.get_valid_token().await
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url)
    }
}

async fn check(res: Response) -> Res<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn current_user(&self) -> Res<User> {
        let token = self.bearer().await?;
        let res = self.http.get(self.url("/me")).bearer_auth(token).send().await?;
        Ok(check(res).await?.json::<User>().await?)
    }

    async fn find_owned_playlist(&self, user_id: &str, name: &str) -> Res<Option<Playlist>> {
        let mut offset = 0;

        loop {
            let token = self.bearer().await?;
            let res = self
                .http
                .get(self.url("/me/playlists"))
                .query(&[("limit", PLAYLIST_PAGE_SIZE), ("offset", offset)])
                .bearer_auth(token)
                .send()
                .await?;
            let page = check(res).await?.json::<GetUserPlaylistsResponse>().await?;

            let found = page
                .items
                .into_iter()
                .find(|p| p.name == name && p.owner.id == user_id);
            if found.is_some() || page.next.is_none() {
                return Ok(found);
            }
            offset += PLAYLIST_PAGE_SIZE;
        }
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<Playlist> {
        let token = self.bearer().await?;
        let res = self
            .http
            .post(self.url(&format!("/users/{user_id}/playlists")))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        match check(res).await {
            Ok(res) => Ok(res.json::<Playlist>().await?),
            Err(Error::Api { status, message }) => Err(Error::PlaylistCreateFailed {
                name: request.name.clone(),
                status,
                message,
            }),
            Err(e) => Err(e),
        }
    }

    async fn search_track(&self, query: &str) -> Res<Option<Track>> {
        let token = self.bearer().await?;
        let res = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", "track"), ("limit", SEARCH_LIMIT)])
            .bearer_auth(token)
            .send()
            .await?;
        let found = check(res).await?.json::<SearchResponse>().await?;

        Ok(found.tracks.items.into_iter().next())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let token = self.bearer().await?;
        let res = self
            .http
            .post(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&AddTrackToPlaylistRequest {
                uris: uris.to_vec(),
            })
            .send()
            .await?;
        check(res).await?.json::<AddTrackToPlaylistResponse>().await?;
        Ok(())
    }
}
