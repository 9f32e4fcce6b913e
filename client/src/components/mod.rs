//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dialogs replace blocking browser prompts: every notice must be
//! acknowledged, and destructive actions ask first.

pub mod album_card;
pub mod confirm_dialog;
pub mod notice_dialog;
pub mod status_log;
pub mod text_dialog;
pub mod toolbar;
