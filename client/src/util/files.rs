//! Reading picked files out of an `<input type="file">`.
//!
//! TRADE-OFFS
//! ==========
//! Each file is read fully into memory before the upload starts. The batch
//! is released file by file as the orchestrator hands bytes to the
//! transport, so peak memory is the size of the selection.

#[cfg(feature = "csr")]
use gallery::upload::LocalFile;

/// Read every selected file, in selection order.
///
/// # Errors
///
/// Returns the browser's message if any file cannot be read.
#[cfg(feature = "csr")]
pub async fn read_selected(input: &web_sys::HtmlInputElement) -> Result<Vec<LocalFile>, String> {
    let Some(list) = input.files() else {
        return Ok(Vec::new());
    };
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("could not read {}: {e:?}", file.name()))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        files.push(LocalFile::new(file.name(), bytes));
    }
    Ok(files)
}

/// Number of files currently selected in `input`.
#[cfg(feature = "csr")]
pub fn selected_count(input: &web_sys::HtmlInputElement) -> usize {
    input.files().map_or(0, |list| list.length() as usize)
}
