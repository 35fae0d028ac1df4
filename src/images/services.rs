use anyhow::Context;
use bytes::Bytes;
use time::OffsetDateTime;

use crate::state::AppState;

/// Write prefix for uploaded originals.
pub const ORIGINALS_PREFIX: &str = "original-images/";
/// Read prefix for externally produced thumbnails.
pub const THUMBNAILS_PREFIX: &str = "thumbnails/";

/// Upload bytes under a collision-free key and return the public URL. The
/// write completes before the URL is returned.
pub async fn store_original(
    st: &AppState,
    body: Bytes,
    filename: &str,
    content_type: &str,
) -> anyhow::Result<String> {
    let key = original_image_key(filename);
    let url = st
        .storage
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    Ok(url)
}

/// Keys under the thumbnails prefix, mapped to public URLs by templating.
pub async fn list_thumbnail_urls(st: &AppState) -> anyhow::Result<Vec<String>> {
    let keys = st
        .storage
        .list_objects(THUMBNAILS_PREFIX)
        .await
        .context("list thumbnails")?;
    Ok(keys.iter().map(|k| st.storage.object_url(k)).collect())
}

/// `original-images/<unix-millis>_<sanitized filename>`. The timestamp prefix
/// only exists to avoid name collisions.
fn original_image_key(filename: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{}{}_{}", ORIGINALS_PREFIX, millis, sanitize_file_name(filename))
}

/// Client-supplied filenames become part of the storage key, so anything that
/// could alter the key structure is replaced. Characters outside
/// `[A-Za-z0-9._-]` map to `_`; leading dots and underscores are stripped so
/// relative-looking names cannot survive.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("poster.jpg"), "poster.jpg");
        assert_eq!(sanitize_file_name("cover-art_01.png"), "cover-art_01.png");
    }

    #[test]
    fn sanitize_replaces_separators_and_spaces() {
        assert_eq!(sanitize_file_name("my poster.jpg"), "my_poster.jpg");
        assert_eq!(sanitize_file_name("a/b\\c.png"), "a_b_c.png");
    }

    #[test]
    fn sanitize_defuses_path_traversal() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
    }

    #[test]
    fn sanitize_replaces_non_ascii() {
        assert_eq!(sanitize_file_name("pöster.jpg"), "p_ster.jpg");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("..."), "upload");
    }

    #[test]
    fn key_carries_prefix_and_filename() {
        let key = original_image_key("poster.jpg");
        assert!(key.starts_with(ORIGINALS_PREFIX));
        assert!(key.ends_with("_poster.jpg"));
    }

    #[tokio::test]
    async fn store_original_returns_a_url_with_the_filename() {
        let state = AppState::fake();
        let url = store_original(&state, Bytes::from_static(b"bytes"), "poster.jpg", "image/jpeg")
            .await
            .unwrap();
        assert!(url.contains("original-images/"));
        assert!(url.ends_with("_poster.jpg"));
    }

    #[tokio::test]
    async fn list_thumbnail_urls_maps_keys() {
        let state = AppState::fake();
        let urls = list_thumbnail_urls(&state).await.unwrap();
        assert!(urls.is_empty());
    }
}
