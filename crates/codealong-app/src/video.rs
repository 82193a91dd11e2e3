// Video identifier parsing: pasted URLs, page query parameters, share links.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// Length of a provider video identifier.
pub const VIDEO_ID_LEN: usize = 11;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VideoError {
    #[error("not a recognized video URL: {0}")]
    NotRecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accept a bare identifier of the right length and alphabet.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page on the provider.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn video_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .expect("video URL pattern is valid")
    })
}

/// Pull the video id out of a pasted watch/embed/short URL.
pub fn extract_video_id(input: &str) -> Result<VideoId, VideoError> {
    video_url_regex()
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
        .ok_or_else(|| VideoError::NotRecognized(input.to_string()))
}

/// Query parameters the page understands on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoParams {
    pub v: Option<String>,
    pub list: Option<String>,
    pub index: Option<String>,
    pub watch: Option<String>,
}

impl VideoParams {
    /// Parse a query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "v" => &mut params.v,
                "list" => &mut params.list,
                "index" => &mut params.index,
                "watch" => &mut params.watch,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// `v` wins; otherwise `watch`, which may carry its own `v=` prefix.
    pub fn initial_video_id(&self) -> Option<VideoId> {
        let raw = match (&self.v, &self.watch) {
            (Some(v), _) => v.as_str(),
            (None, Some(watch)) => watch.strip_prefix("v=").unwrap_or(watch),
            (None, None) => return None,
        };
        VideoId::parse(raw)
    }
}

/// Link that reopens this page on `id`. Any existing query or fragment on
/// `base` is dropped.
pub fn share_url(base: &Url, id: &VideoId) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair("v", id.as_str());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn extracts_from_common_url_shapes() {
        let urls = [
            format!("https://www.youtube.com/watch?v={ID}"),
            format!("https://www.youtube.com/watch?feature=share&v={ID}&t=42"),
            format!("https://youtu.be/{ID}"),
            format!("https://www.youtube.com/embed/{ID}"),
            format!("https://www.youtube.com/v/{ID}?version=3"),
            format!("  youtube.com/watch?v={ID}  "),
        ];
        for url in urls {
            assert_eq!(extract_video_id(&url).unwrap().as_str(), ID, "{url}");
        }
    }

    #[test]
    fn rejects_unrelated_input() {
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_video_id("not a url").is_err());
        assert_eq!(
            extract_video_id("https://youtu.be/short"),
            Err(VideoError::NotRecognized("https://youtu.be/short".to_string()))
        );
    }

    #[test]
    fn query_prefers_v_over_watch() {
        let params = VideoParams::from_query(&format!("?watch=aaaaaaaaaaa&v={ID}&list=PL1"));
        assert_eq!(params.list.as_deref(), Some("PL1"));
        assert_eq!(params.initial_video_id().unwrap().as_str(), ID);
    }

    #[test]
    fn watch_param_may_carry_v_prefix() {
        let params = VideoParams::from_query(&format!("watch=v%3D{ID}"));
        assert_eq!(params.watch.as_deref(), Some(&*format!("v={ID}")));
        assert_eq!(params.initial_video_id().unwrap().as_str(), ID);

        let bare = VideoParams::from_query(&format!("watch={ID}"));
        assert_eq!(bare.initial_video_id().unwrap().as_str(), ID);
    }

    #[test]
    fn wrong_length_id_is_ignored() {
        assert!(VideoParams::from_query("v=tooshort").initial_video_id().is_none());
        assert!(VideoParams::from_query("").initial_video_id().is_none());
    }

    #[test]
    fn share_url_replaces_query() {
        let base = Url::parse("https://codealong.dev/app?v=old&list=x#frag").unwrap();
        let id = VideoId::parse(ID).unwrap();
        assert_eq!(
            share_url(&base, &id).as_str(),
            format!("https://codealong.dev/app?v={ID}")
        );
    }
}
