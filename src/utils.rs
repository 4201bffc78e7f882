use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

const URL_HOST: &str = "open.spotify.com";
const URL_MARKER: &str = "/playlist/";
const URI_MARKER: &str = "spotify:playlist:";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn now_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Extracts the bare playlist id from a share URL or a `spotify:playlist:` URI.
///
/// Accepts `https://open.spotify.com/playlist/<id>?si=...` and
/// `spotify:playlist:<id>`. Anything else, including an empty or
/// non-alphanumeric id, yields `None`.
pub fn playlist_id_from_link(link: &str) -> Option<String> {
    let link = link.trim();

    let id = if let Some((_, rest)) = link.split_once(URI_MARKER) {
        rest
    } else {
        let (host, rest) = link.split_once(URL_MARKER)?;
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host);
        if host != URL_HOST {
            return None;
        }
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    };

    is_playlist_id(id).then(|| id.to_string())
}

/// Resolves a filter source given either as a link or as a bare id.
///
/// Bare ids follow the same rule as ids inside links, so anything that is
/// not plain ASCII alphanumerics yields `None`.
pub fn playlist_id(value: &str) -> Option<String> {
    let value = value.trim();
    playlist_id_from_link(value).or_else(|| is_playlist_id(value).then(|| value.to_string()))
}

fn is_playlist_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Escapes text for embedding in an HTML fragment.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Splits ids into consecutive batches of at most `size` entries.
pub fn batches(ids: &[String], size: usize) -> std::slice::Chunks<'_, String> {
    ids.chunks(size.max(1))
}

pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}
