//! Catalog backend client

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, Result};
use super::types::{Collection, CollectionEntry, ItemId, NewEntry, Song};
use crate::{log_api_request, log_api_result};

const ITEMS_PATH: &str = "items";

/// Operations the songs view needs from the backend.
///
/// Each call is a single request: no retries and no caching.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /items`
    async fn fetch_songs(&self) -> Result<Vec<Song>>;

    /// `GET /{collection}`
    async fn fetch_entries(&self, collection: Collection) -> Result<Vec<CollectionEntry>>;

    /// `POST /{collection}` with the song's fields and `itemId`
    async fn create_entry(&self, collection: Collection, song: &Song) -> Result<()>;

    /// `DELETE /{collection}/{entry_id}`
    async fn delete_entry(&self, collection: Collection, entry_id: &ItemId) -> Result<()>;
}

/// Reqwest-based implementation of [`CatalogApi`]
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("songs-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<&NewEntry<'_>>) -> Result<Response> {
        let method_name = method.to_string();
        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: method_name,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url, kind: &'static str) -> Result<Vec<T>> {
        let response = self.send(Method::GET, url, None).await?;
        let rows = response.json::<Vec<Value>>().await?;
        Ok(decode_rows(rows, kind))
    }
}

/// Decode each row on its own; rows that do not fit `T` are logged and dropped.
fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, kind: &'static str) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_songs(&self) -> Result<Vec<Song>> {
        let url = self.endpoint(&[ITEMS_PATH]);
        log_api_request!("fetch_songs", url = %url);

        let result = self.fetch_list::<Song>(url, "song").await;

        log_api_result!("fetch_songs", result);
        result
    }

    async fn fetch_entries(&self, collection: Collection) -> Result<Vec<CollectionEntry>> {
        let url = self.endpoint(&[collection.path()]);
        log_api_request!("fetch_entries", collection = collection.path(), url = %url);

        let result = self.fetch_list::<CollectionEntry>(url, collection.path()).await;

        log_api_result!("fetch_entries", result);
        result
    }

    async fn create_entry(&self, collection: Collection, song: &Song) -> Result<()> {
        let url = self.endpoint(&[collection.path()]);
        log_api_request!("create_entry", collection = collection.path(), song_id = %song.id);

        let body = NewEntry::from_song(song);
        let result = self.send(Method::POST, url, Some(&body)).await.map(|_| ());

        log_api_result!("create_entry", result);
        result
    }

    async fn delete_entry(&self, collection: Collection, entry_id: &ItemId) -> Result<()> {
        let entry_segment = entry_id.to_string();
        let url = self.endpoint(&[collection.path(), &entry_segment]);
        log_api_request!("delete_entry", collection = collection.path(), entry_id = %entry_id);

        let result = self.send(Method::DELETE, url, None).await.map(|_| ());

        log_api_result!("delete_entry", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve a single HTTP response and hand back the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(raw).unwrap()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn local_client(base_url: &str) -> HttpCatalogClient {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpCatalogClient::with_client(client, base_url).unwrap()
    }

    fn request_line(raw: &str) -> &str {
        raw.lines().next().unwrap_or_default()
    }

    fn request_body(raw: &str) -> Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn blue_song() -> Song {
        serde_json::from_value(json!({
            "id": 7,
            "title": "Blue",
            "singer": "Joni",
            "genre": "Folk",
            "imgUrl": "i.jpg",
            "songUrl": "s.mp3"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_songs_keeps_rows_with_null_fields() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"title":null,"singer":"Queen"},{"title":"no id"},{"id":2,"title":"B"}]"#,
        )
        .await;
        let client = local_client(&base_url);

        let songs = client.fetch_songs().await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, ItemId::Number(1));
        assert_eq!(songs[0].title, "");
        assert_eq!(songs[1].title, "B");
        assert!(request_line(&server.await.unwrap()).starts_with("GET /items "));
    }

    #[tokio::test]
    async fn fetch_entries_skips_rows_without_item_id() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"itemId":1},{"id":2,"note":"legacy"}]"#,
        )
        .await;
        let client = local_client(&base_url);

        let entries = client.fetch_entries(Collection::Favorites).await.unwrap();

        assert_eq!(
            entries,
            vec![CollectionEntry {
                id: ItemId::Number(1),
                item_id: ItemId::Number(1),
            }]
        );
        assert!(request_line(&server.await.unwrap()).starts_with("GET /favorites "));
    }

    #[tokio::test]
    async fn create_entry_posts_song_fields_to_collection() {
        let (base_url, server) = serve_once("201 Created", r#"{"id":100,"itemId":7}"#).await;
        let client = local_client(&base_url);

        client.create_entry(Collection::Playlist, &blue_song()).await.unwrap();

        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /playlist "));
        assert_eq!(
            request_body(&raw),
            json!({
                "itemId": 7,
                "title": "Blue",
                "singer": "Joni",
                "genre": "Folk",
                "imgUrl": "i.jpg",
                "songUrl": "s.mp3"
            })
        );
    }

    #[tokio::test]
    async fn delete_entry_targets_the_entry_id() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let client = local_client(&base_url);

        client
            .delete_entry(Collection::Favorites, &ItemId::Number(9))
            .await
            .unwrap();

        assert!(request_line(&server.await.unwrap()).starts_with("DELETE /favorites/9 "));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base_url, server) = serve_once("404 Not Found", "{}").await;
        let client = local_client(&base_url);

        let result = client.delete_entry(Collection::Favorites, &ItemId::Number(9)).await;

        assert!(matches!(
            result,
            Err(ApiError::Status { ref method, status: 404, .. }) if method == "DELETE"
        ));
        server.await.unwrap();

        let (base_url, server) = serve_once("500 Internal Server Error", "[]").await;
        let client = local_client(&base_url);

        let result = client.fetch_entries(Collection::Playlist).await;

        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        server.await.unwrap();
    }

    #[test]
    fn decode_rows_drops_only_rows_that_do_not_fit() {
        let rows = vec![json!({"id": 1, "itemId": "a"}), json!("junk"), json!({"id": "x", "itemId": 2})];

        let entries: Vec<CollectionEntry> = decode_rows(rows, "favorites");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, ItemId::Text("x".into()));
    }

    #[test]
    fn builds_collection_endpoints() {
        let client = HttpCatalogClient::new("http://localhost:3000").unwrap();

        assert_eq!(client.endpoint(&["items"]).as_str(), "http://localhost:3000/items");
        assert_eq!(
            client.endpoint(&[Collection::Playlist.path(), "9"]).as_str(),
            "http://localhost:3000/playlist/9"
        );
    }

    #[test]
    fn keeps_base_path_and_encodes_entry_ids() {
        let client = HttpCatalogClient::new("http://music.local/api/").unwrap();

        assert_eq!(
            client.endpoint(&["favorites", "a b"]).as_str(),
            "http://music.local/api/favorites/a%20b"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpCatalogClient::new("not a url"),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpCatalogClient::new("mailto:someone@example.com"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
