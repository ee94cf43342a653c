fn main() {
    // The Tauri context (config, icons, frontend) is only generated for the desktop shell.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
