//! `RemoteFsService` implementation over the file-store HTTP API.

use platform_host::{FsError, RemoteEntry, RemoteFsFuture, RemoteFsService, RemoteListing};

#[cfg(target_arch = "wasm32")]
use serde_json::json;

use crate::fetch;

#[derive(Debug, Clone)]
/// Fetch-backed file-store adapter.
pub struct HttpRemoteFsService {
    base_url: String,
}

impl HttpRemoteFsService {
    /// Creates an adapter rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn url(&self, op: &str) -> String {
        format!("{}/{op}", self.base_url)
    }

    #[cfg(target_arch = "wasm32")]
    fn url_with_path(&self, op: &str, path: &str) -> String {
        format!(
            "{}/{op}?path={}",
            self.base_url,
            fetch::encode_component(path)
        )
    }
}

impl RemoteFsService for HttpRemoteFsService {
    fn list_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteListing, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::get_json(&self.url_with_path("list", path), path).await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = path;
                Err(fetch::unsupported("list_dir"))
            }
        })
    }

    fn create_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json(
                    &self.url("create-file"),
                    &json!({ "path": path, "content": content }),
                    path,
                )
                .await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (path, content);
                Err(fetch::unsupported("create_file"))
            }
        })
    }

    fn create_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json(&self.url("create-folder"), &json!({ "path": path }), path).await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = path;
                Err(fetch::unsupported("create_dir"))
            }
        })
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json(
                    &self.url("rename"),
                    &json!({ "path": path, "new_name": new_name }),
                    path,
                )
                .await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (path, new_name);
                Err(fetch::unsupported("rename"))
            }
        })
    }

    fn move_entry<'a>(
        &'a self,
        path: &'a str,
        dest_dir: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json(
                    &self.url("move"),
                    &json!({ "path": path, "dest_dir": dest_dir }),
                    path,
                )
                .await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (path, dest_dir);
                Err(fetch::unsupported("move_entry"))
            }
        })
    }

    fn trash<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json_unit(&self.url("trash"), &json!({ "path": path }), path).await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = path;
                Err(fetch::unsupported("trash"))
            }
        })
    }

    fn empty_trash<'a>(&'a self) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::post_json_unit(&self.url("empty-trash"), &json!({}), "").await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                Err(fetch::unsupported("empty_trash"))
            }
        })
    }

    fn stat<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch::get_json(&self.url_with_path("info", path), path).await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = path;
                Err(fetch::unsupported("stat"))
            }
        })
    }

    fn upload<'a>(
        &'a self,
        dir: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                // Content travels base64-armored inside JSON; the store decodes it server-side.
                let encoded = encode_base64(bytes);
                fetch::post_json(
                    &self.url("upload"),
                    &json!({ "dir": dir, "name": file_name, "content_base64": encoded }),
                    dir,
                )
                .await
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (dir, file_name, bytes);
                Err(fetch::unsupported("upload"))
            }
        })
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn encode_base64(bytes: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        out.push(ALPHABET[(triple >> 18) as usize & 0x3f] as char);
        out.push(ALPHABET[(triple >> 12) as usize & 0x3f] as char);
        out.push(if chunk.len() > 1 {
            ALPHABET[(triple >> 6) as usize & 0x3f] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            ALPHABET[triple as usize & 0x3f] as char
        } else {
            '='
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{FsError, RemoteFsService};

    use super::*;

    #[test]
    fn non_wasm_target_reports_typed_unavailability() {
        let fs = HttpRemoteFsService::new("/api/files");
        let err = block_on(fs.list_dir("Desktop")).expect_err("native list fails");
        assert!(matches!(err, FsError::Network(_)));
    }

    #[test]
    fn base64_armoring_matches_reference_vectors() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64(b"f"), "Zg==");
        assert_eq!(encode_base64(b"fo"), "Zm8=");
        assert_eq!(encode_base64(b"foo"), "Zm9v");
        assert_eq!(encode_base64(b"foobar"), "Zm9vYmFy");
    }
}
