use crate::models::AspectRatio;
use crate::router::Router;
use tauri::State;

#[tauri::command]
pub async fn generate_phase_image(
    router: State<'_, Router>,
    phase_title: String,
    goal: String,
    aspect_ratio: Option<AspectRatio>,
    api_key: Option<String>,
) -> Result<Option<String>, String> {
    Ok(router
        .generate_phase_image(
            &phase_title,
            &goal,
            aspect_ratio.unwrap_or_default(),
            api_key.as_deref(),
        )
        .await)
}

#[tauri::command]
pub async fn edit_phase_image(
    router: State<'_, Router>,
    base64_image: String,
    edit_prompt: String,
    api_key: Option<String>,
) -> Result<Option<String>, String> {
    Ok(router
        .edit_phase_image(&base64_image, &edit_prompt, api_key.as_deref())
        .await)
}
