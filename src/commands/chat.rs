use crate::attachment::Attachment;
use crate::models::ChatMessage;
use crate::router::Router;
use std::path::Path;
use tauri::{AppHandle, Runtime, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tokio::sync::oneshot;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "heic", "heif"];

#[tauri::command]
pub fn start_conversation() -> Vec<ChatMessage> {
    vec![ChatMessage::greeting()]
}

#[tauri::command]
pub async fn send_message(
    router: State<'_, Router>,
    content: String,
    api_key: Option<String>,
    attachment: Option<Attachment>,
    use_search: Option<bool>,
) -> Result<ChatMessage, String> {
    if content.trim().is_empty() && attachment.is_none() {
        return Err("Message is empty".into());
    }

    let response = router
        .generate_chat_response(
            &content,
            api_key.as_deref(),
            attachment.as_ref(),
            use_search.unwrap_or(false),
        )
        .await;

    Ok(ChatMessage::from_response(response))
}

#[tauri::command]
pub fn load_attachment(file_path: String) -> Result<Attachment, String> {
    Attachment::from_path(Path::new(&file_path)).map_err(|e| e.to_string())
}

/// Let the user choose an image with the native file dialog.
#[tauri::command]
pub async fn pick_attachment<R: Runtime>(app: AppHandle<R>) -> Result<Option<Attachment>, String> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file(move |file| {
            let _ = tx.send(file);
        });

    let Some(file) = rx.await.map_err(|e| e.to_string())? else {
        return Ok(None);
    };

    let path = file.into_path().map_err(|e| e.to_string())?;
    Attachment::from_path(&path)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Open a grounding source in the system browser.
#[tauri::command]
pub fn open_source<R: Runtime>(app: AppHandle<R>, uri: String) -> Result<(), String> {
    if !(uri.starts_with("https://") || uri.starts_with("http://")) {
        return Err(format!("Refusing to open non-web source: {}", uri));
    }
    app.opener()
        .open_url(uri, None::<&str>)
        .map_err(|e| e.to_string())
}
