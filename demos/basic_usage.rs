// Basic usage example for prefstore
//
// Run with: cargo run --example basic_usage

use prefstore::{ConfigOverrides, SettingsStore};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let store = SettingsStore::builder("my-app")
        .directory("./example_config")
        .build()?;

    println!("Settings file: {}", store.file_path().display());

    // Remember where the window was
    store.set("position", json!({"x": 120, "y": 80, "maximized": false}))?;
    store.set("position.maximized", true)?;

    // Recently opened files, addressed by index
    store.set("recent[0]", "notes.md")?;
    store.set("recent[1]", "todo.md")?;

    println!("Position: {}", store.get("position")?.unwrap_or_default());
    println!("Has recent[1]: {}", store.has("recent[1]")?);

    // Drop one entry; recent[1] keeps its index
    store.unset("recent[0]")?;
    println!("Recent: {}", store.get_or("recent", json!([]))?);

    let width: Option<u32> = store.get_as("window.width")?;
    println!("Window width: {width:?}");

    // Keep theme values in their own file
    store.configure(ConfigOverrides::new().file_name("theme.yaml"))?;
    store.set("textColor", "#e8e8e8")?;
    println!("Theme file: {}", store.file_path().display());
    println!("\nTheme document:\n{:#?}", store.get_all()?);

    // Back to the platform data directory; nothing is written until the next access
    store.reset();
    println!("Default file: {}", store.file_path().display());

    Ok(())
}
