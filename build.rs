#[cfg(feature = "desktop")]
const COMMANDS: &[&str] = &[
    "start_conversation",
    "send_message",
    "load_attachment",
    "pick_attachment",
    "open_source",
    "generate_phase_image",
    "edit_phase_image",
];

fn main() {
    // Generates `permissions/autogenerated` so host capabilities can grant
    // `nexus-mentor:allow-*` identifiers.
    #[cfg(feature = "desktop")]
    tauri_plugin::Builder::new(COMMANDS).build();
}
