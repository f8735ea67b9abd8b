//! Playlist retrieval and parsing.
//!
//! The transport sits behind a trait so the engine never touches the network
//! in tests; the real implementation is a thin `reqwest` wrapper. Parsing is
//! delegated to `m3u8-rs` and is deliberately forgiving: a body that is not a
//! usable playlist yields an empty channel list rather than an error, and
//! individual entries without a URI are dropped.

use std::sync::Arc;

use async_trait::async_trait;
use m3u8_rs::parse_playlist_res;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::ZapError;
use crate::events::{EventBus, LifecycleEvent};

/// One playable entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub url: String,
}

/// What the playlist source observes from the transport: the final status
/// code and the body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait PlaylistTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, ZapError>;
}

/// `reqwest`-backed transport.
///
/// Redirects are not followed: only a direct 200 counts as a successful
/// playlist download, so a redirect must surface as its 3xx status.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ZapError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PlaylistTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, ZapError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

pub struct PlaylistSource<T> {
    transport: T,
    bus: Arc<EventBus>,
}

impl<T: PlaylistTransport> PlaylistSource<T> {
    pub fn new(transport: T, bus: Arc<EventBus>) -> Self {
        Self { transport, bus }
    }

    /// Downloads the playlist at `url` and parses it into channels.
    ///
    /// Publishes `DownloadStart` before the request and, once a response
    /// resolved, `DownloadEnd { success }` where success means HTTP 200
    /// exactly. A non-200 response fails with [`ZapError::Download`];
    /// malformed playlist content never fails, it only shrinks the result.
    /// An empty result is valid here, the scheduler rejects it.
    pub async fn fetch_and_parse(&self, url: &str) -> Result<Vec<Channel>, ZapError> {
        self.bus.publish(LifecycleEvent::DownloadStart {
            url: url.to_string(),
        });

        let response = self.transport.get(url).await?;
        debug!(status = %response.status, "playlist response received");

        let success = response.status == StatusCode::OK;
        self.bus.publish(LifecycleEvent::DownloadEnd { success });

        if !success {
            return Err(ZapError::download(response.status, url));
        }

        Ok(parse_channels(&response.body))
    }
}

/// Parses an M3U document into channels, document order preserved.
///
/// Entries without a URI are dropped; an `#EXTINF` title is used when present
/// and the URI stands in otherwise.
pub fn parse_channels(body: &str) -> Vec<Channel> {
    let (channels, total) = match parse_playlist_res(body.as_bytes()) {
        Ok(m3u8_rs::Playlist::MediaPlaylist(playlist)) => {
            let mut titles = ExtinfTitles::parse(body);
            let total = playlist.segments.len();
            let channels: Vec<Channel> = playlist
                .segments
                .into_iter()
                .filter_map(|segment| {
                    let title = titles.take(&segment.uri).or(segment.title);
                    channel_from_entry(segment.uri, title)
                })
                .collect();
            (channels, total)
        }
        Ok(m3u8_rs::Playlist::MasterPlaylist(playlist)) => {
            let total = playlist.variants.len();
            let channels: Vec<Channel> = playlist
                .variants
                .into_iter()
                .filter_map(|variant| channel_from_entry(variant.uri, None))
                .collect();
            (channels, total)
        }
        Err(e) => {
            warn!("body did not parse as an M3U playlist: {e}");
            return Vec::new();
        }
    };

    let dropped = total - channels.len();
    if dropped > 0 {
        warn!(dropped, "dropped playlist entries without a usable URI");
    }
    debug!(count = channels.len(), "playlist parsed");

    channels
}

/// `#EXTINF` titles recovered from the raw document, paired with the URI
/// line that follows each tag, in document order.
///
/// `m3u8-rs` does not retain the title of the `#EXTINF:-1,<title>` entries
/// IPTV playlists use (the segment comes back with `title: None`), so titles
/// are taken from the text and overlaid onto the parsed segments.
struct ExtinfTitles {
    entries: Vec<(String, Option<String>)>,
    cursor: usize,
}

impl ExtinfTitles {
    fn parse(body: &str) -> Self {
        let mut entries = Vec::new();
        let mut pending: Option<String> = None;
        for line in body.lines() {
            let line = line.trim();
            if let Some(info) = line.strip_prefix("#EXTINF:") {
                pending = info
                    .split_once(',')
                    .map(|(_, title)| title.trim().to_string())
                    .filter(|title| !title.is_empty());
            } else if !line.is_empty() && !line.starts_with('#') {
                entries.push((line.to_string(), pending.take()));
            }
        }
        Self { entries, cursor: 0 }
    }

    /// Title of the next entry matching `uri`, advancing past it so repeated
    /// URIs resolve in document order.
    fn take(&mut self, uri: &str) -> Option<String> {
        let uri = uri.trim();
        let found = self.entries[self.cursor..]
            .iter()
            .position(|(entry_uri, _)| entry_uri == uri)?;
        let index = self.cursor + found;
        self.cursor = index + 1;
        self.entries[index].1.clone()
    }
}

fn channel_from_entry(uri: String, title: Option<String>) -> Option<Channel> {
    let url = uri.trim().to_string();
    if url.is_empty() {
        return None;
    }
    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.clone());
    Some(Channel { title, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const TWO_CHANNELS: &str =
        "#EXTM3U\n#EXTINF:-1,Channel A\nhttp://a\n#EXTINF:-1,Channel B\nhttp://b\n";

    struct StubTransport {
        status: StatusCode,
        body: &'static str,
    }

    #[async_trait]
    impl PlaylistTransport for StubTransport {
        async fn get(&self, _url: &str) -> Result<TransportResponse, ZapError> {
            Ok(TransportResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    fn capturing_bus() -> (Arc<EventBus>, Arc<Mutex<Vec<LifecycleEvent>>>) {
        let bus = Arc::new(EventBus::new());
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (bus, captured)
    }

    #[tokio::test]
    async fn ok_response_parses_channels_in_document_order() {
        let (bus, captured) = capturing_bus();
        let source = PlaylistSource::new(
            StubTransport {
                status: StatusCode::OK,
                body: TWO_CHANNELS,
            },
            bus,
        );

        let channels = source
            .fetch_and_parse("http://example.com/pl.m3u")
            .await
            .unwrap();

        assert_eq!(
            channels,
            vec![
                Channel {
                    title: "Channel A".into(),
                    url: "http://a".into(),
                },
                Channel {
                    title: "Channel B".into(),
                    url: "http://b".into(),
                },
            ]
        );
        assert_eq!(
            *captured.lock().unwrap(),
            vec![
                LifecycleEvent::DownloadStart {
                    url: "http://example.com/pl.m3u".into(),
                },
                LifecycleEvent::DownloadEnd { success: true },
            ]
        );
    }

    #[tokio::test]
    async fn non_200_fails_after_publishing_failed_download_end() {
        let (bus, captured) = capturing_bus();
        let source = PlaylistSource::new(
            StubTransport {
                status: StatusCode::NOT_FOUND,
                body: "",
            },
            bus,
        );

        let err = source
            .fetch_and_parse("http://example.com/pl.m3u")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ZapError::Download {
                status: StatusCode::NOT_FOUND,
                ..
            }
        ));
        assert_eq!(
            *captured.lock().unwrap(),
            vec![
                LifecycleEvent::DownloadStart {
                    url: "http://example.com/pl.m3u".into(),
                },
                LifecycleEvent::DownloadEnd { success: false },
            ]
        );
    }

    #[tokio::test]
    async fn redirect_status_counts_as_failure() {
        let (bus, _captured) = capturing_bus();
        let source = PlaylistSource::new(
            StubTransport {
                status: StatusCode::MOVED_PERMANENTLY,
                body: "",
            },
            bus,
        );

        let err = source
            .fetch_and_parse("http://example.com/pl.m3u")
            .await
            .unwrap_err();
        assert!(matches!(err, ZapError::Download { .. }));
    }

    #[tokio::test]
    async fn unparseable_body_yields_an_empty_list_not_an_error() {
        let (bus, _captured) = capturing_bus();
        let source = PlaylistSource::new(
            StubTransport {
                status: StatusCode::OK,
                body: "not a playlist at all",
            },
            bus,
        );

        let channels = source
            .fetch_and_parse("http://example.com/pl.m3u")
            .await
            .unwrap();
        assert!(channels.is_empty());
    }

    #[test]
    fn extinf_titles_survive_negative_durations() {
        // IPTV playlists mark live channels with `#EXTINF:-1,<title>`; the
        // titles must come through even though the parsed segments carry
        // `title: None` for them.
        let channels = parse_channels(TWO_CHANNELS);
        assert_eq!(
            channels,
            vec![
                Channel {
                    title: "Channel A".into(),
                    url: "http://a".into(),
                },
                Channel {
                    title: "Channel B".into(),
                    url: "http://b".into(),
                },
            ]
        );
    }

    #[test]
    fn repeated_uris_keep_their_own_titles() {
        let channels = parse_channels(
            "#EXTM3U\n#EXTINF:-1,First\nhttp://same\n#EXTINF:-1,Second\nhttp://same\n",
        );
        assert_eq!(channels[0].title, "First");
        assert_eq!(channels[1].title, "Second");
    }

    #[test]
    fn entry_without_title_falls_back_to_its_url() {
        let channels = parse_channels("#EXTM3U\n#EXTINF:-1,\nhttp://only-a-url\n");
        assert_eq!(
            channels,
            vec![Channel {
                title: "http://only-a-url".into(),
                url: "http://only-a-url".into(),
            }]
        );
    }

    #[test]
    fn titles_are_trimmed() {
        let channels = parse_channels("#EXTM3U\n#EXTINF:-1, Channel A \nhttp://a\n");
        assert_eq!(channels[0].title, "Channel A");
    }
}
