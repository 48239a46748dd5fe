//! Browser file-picker interop for uploads.

use std::rc::Rc;

use platform_host::{FsError, RemoteEntry, RemoteFsService};

/// Callback invoked once the picked file has been uploaded (or the upload failed).
pub type UploadDone = Rc<dyn Fn(Result<RemoteEntry, FsError>)>;

/// Opens the browser file picker and uploads the chosen file into `dir`.
///
/// Cancelling the picker invokes nothing. Outside the browser this reports the upload surface
/// as unavailable.
pub fn pick_and_upload(fs: Rc<dyn RemoteFsService>, dir: String, on_done: UploadDone) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::{closure::Closure, JsCast};
        use wasm_bindgen_futures::JsFuture;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            on_done(Err(FsError::Network("no browser document".to_string())));
            return;
        };
        let Ok(element) = document.create_element("input") else {
            on_done(Err(FsError::Network("picker creation failed".to_string())));
            return;
        };
        let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() else {
            on_done(Err(FsError::Network("picker creation failed".to_string())));
            return;
        };
        input.set_type("file");

        let picker = input.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let Some(file) = picker.files().and_then(|files| files.item(0)) else {
                return;
            };
            let fs = fs.clone();
            let dir = dir.clone();
            let on_done = on_done.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let buffer = match JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => buffer,
                    Err(_) => {
                        on_done(Err(FsError::Network("file read failed".to_string())));
                        return;
                    }
                };
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                let result = fs.upload(&dir, &file.name(), &bytes).await;
                on_done(result);
            });
        });
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        on_change.forget();
        input.click();
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (fs, dir);
        on_done(Err(FsError::Network(
            "upload picker unavailable on this target".to_string(),
        )));
    }
}
