//! Shared fetch plumbing and URL encoding for the file-store HTTP API.

use platform_host::FsError;

/// Percent-encodes one URI component with `encodeURIComponent` semantics.
pub(crate) fn encode_component(raw: &str) -> String {
    const KEEP: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Maps an HTTP status to the typed failure surfaced at the action boundary.
pub(crate) fn error_for_status(status: u16, path: &str, body: &str) -> FsError {
    match status {
        404 => FsError::NotFound {
            path: path.to_string(),
        },
        409 => FsError::Conflict {
            name: platform_host::basename(path).to_string(),
        },
        400..=499 => FsError::Rejected {
            reason: if body.is_empty() {
                format!("status {status}")
            } else {
                body.to_string()
            },
        },
        _ => FsError::Network(format!("status {status}")),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use platform_host::FsError;
    use serde::de::DeserializeOwned;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::error_for_status;

    fn network_error(value: JsValue) -> FsError {
        FsError::Network(
            value
                .as_string()
                .unwrap_or_else(|| "request failed".to_string()),
        )
    }

    async fn run_request(
        request: web_sys::Request,
        path_hint: &str,
    ) -> Result<String, FsError> {
        let window = web_sys::window().ok_or_else(|| {
            FsError::Network("no browser window".to_string())
        })?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?;
        let response: web_sys::Response = response.dyn_into().map_err(network_error)?;
        let text = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        if !response.ok() {
            return Err(error_for_status(response.status(), path_hint, text.trim()));
        }
        Ok(text)
    }

    /// GETs `url` and decodes the JSON response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        url: &str,
        path_hint: &str,
    ) -> Result<T, FsError> {
        let request = web_sys::Request::new_with_str(url).map_err(network_error)?;
        let text = run_request(request, path_hint).await?;
        serde_json::from_str(&text).map_err(|err| FsError::Network(err.to_string()))
    }

    /// POSTs a JSON payload to `url` and decodes the JSON response body.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        url: &str,
        payload: &serde_json::Value,
        path_hint: &str,
    ) -> Result<T, FsError> {
        let mut init = web_sys::RequestInit::new();
        init.method("POST");
        init.body(Some(&JsValue::from_str(&payload.to_string())));
        let request =
            web_sys::Request::new_with_str_and_init(url, &init).map_err(network_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network_error)?;
        let text = run_request(request, path_hint).await?;
        serde_json::from_str(&text).map_err(|err| FsError::Network(err.to_string()))
    }

    /// POSTs a JSON payload to `url`, ignoring the response body.
    pub(crate) async fn post_json_unit(
        url: &str,
        payload: &serde_json::Value,
        path_hint: &str,
    ) -> Result<(), FsError> {
        let mut init = web_sys::RequestInit::new();
        init.method("POST");
        init.body(Some(&JsValue::from_str(&payload.to_string())));
        let request =
            web_sys::Request::new_with_str_and_init(url, &init).map_err(network_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network_error)?;
        run_request(request, path_hint).await.map(|_| ())
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::{get_json, post_json, post_json_unit};

/// Typed failure for operations attempted outside the browser.
pub(crate) fn unsupported(op: &str) -> FsError {
    FsError::Network(format!("file store unavailable on this target: {op}"))
}

#[cfg(test)]
mod tests {
    use platform_host::FsError;

    use super::*;

    #[test]
    fn encode_component_matches_encode_uri_component_semantics() {
        assert_eq!(encode_component("Desktop/a b.md"), "Desktop%2Fa%20b.md");
        assert_eq!(encode_component("safe-name_1.md"), "safe-name_1.md");
        assert_eq!(encode_component("100%"), "100%25");
    }

    #[test]
    fn status_mapping_produces_typed_failures() {
        assert_eq!(
            error_for_status(404, "Desktop/x.md", ""),
            FsError::NotFound {
                path: "Desktop/x.md".to_string()
            }
        );
        assert_eq!(
            error_for_status(409, "work/Notes", ""),
            FsError::Conflict {
                name: "Notes".to_string()
            }
        );
        assert!(matches!(
            error_for_status(403, "x", "forbidden"),
            FsError::Rejected { .. }
        ));
        assert!(matches!(error_for_status(502, "x", ""), FsError::Network(_)));
    }
}
