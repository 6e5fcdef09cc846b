pub mod attachment;
pub mod config;
pub mod llm;
pub mod models;
pub mod router;

#[cfg(feature = "desktop")]
mod commands;

pub use attachment::{Attachment, AttachmentError};
pub use config::{ConfigError, ImageAttempt, ModelTable, ModelVariant, RouterConfig};
pub use llm::{GenerativeBackend, LlmError};
pub use models::{AspectRatio, ChatMessage, GroundingChunk, Role, RouterResponse, WebSource};
pub use router::{ChatOutcome, Router};

#[cfg(feature = "desktop")]
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

/// Tauri plugin exposing the router to the webview.
///
/// The host app must also register `tauri-plugin-dialog` and
/// `tauri-plugin-opener` for the file picker and source links.
#[cfg(feature = "desktop")]
pub fn init<R: Runtime>(router: Router) -> TauriPlugin<R> {
    Builder::new("nexus-mentor")
        .invoke_handler(tauri::generate_handler![
            commands::chat::start_conversation,
            commands::chat::send_message,
            commands::chat::load_attachment,
            commands::chat::pick_attachment,
            commands::chat::open_source,
            commands::image::generate_phase_image,
            commands::image::edit_phase_image,
        ])
        .setup(move |app, _api| {
            app.manage(router);
            Ok(())
        })
        .build()
}

#[cfg(test)]
mod tests {
    /// Commands registered in `init` and listed in `build.rs`.
    const COMMANDS: &[&str] = &[
        "start_conversation",
        "send_message",
        "load_attachment",
        "pick_attachment",
        "open_source",
        "generate_phase_image",
        "edit_phase_image",
    ];

    #[test]
    fn test_default_permissions_cover_every_command() {
        let manifest = include_str!("../permissions/default.toml");
        let build_script = include_str!("../build.rs");
        for command in COMMANDS {
            let permission = format!("\"allow-{}\"", command.replace('_', "-"));
            assert!(manifest.contains(&permission), "missing {permission}");
            assert!(
                build_script.contains(&format!("\"{command}\"")),
                "build.rs does not generate {command}"
            );
        }
        assert_eq!(manifest.matches("\"allow-").count(), COMMANDS.len());
    }
}
