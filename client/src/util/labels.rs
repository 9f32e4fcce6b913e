//! Display text derived from gallery data.
//!
//! Kept free of Leptos so the wording can be tested on the host.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use gallery::directory::Listing;
use gallery::types::Photo;

pub const SIGNED_OUT_MESSAGE: &str = "Please sign in to view albums.";

/// Text to show in place of a list, or `None` once items are loaded.
pub fn listing_placeholder<T>(listing: &Listing<T>, loading: &str) -> Option<String> {
    match listing {
        Listing::Loading => Some(loading.to_owned()),
        Listing::Failed(message) => Some(message.clone()),
        Listing::Loaded(_) => None,
    }
}

/// A title typed into the create-album dialog, or `None` if blank.
pub fn album_title_input(raw: &str) -> Option<String> {
    let title = raw.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Caption under a photo tile.
pub fn photo_caption(photo: &Photo) -> &str {
    if photo.filename.is_empty() { &photo.id } else { &photo.filename }
}

pub fn selected_files_summary(count: usize) -> String {
    match count {
        0 => "No files selected".to_owned(),
        1 => "1 file selected".to_owned(),
        n => format!("{n} files selected"),
    }
}

pub fn upload_button_label(uploading: bool) -> &'static str {
    if uploading { "Uploading..." } else { "Start upload" }
}
