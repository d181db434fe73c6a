use i18n_resources::{json, Config, I18n, MemoryPreferences, Settings, TextToken};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), i18n_resources::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("i18n_resources=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings: Settings = Config::builder()
        .with_file("demos/i18n.toml", true)
        .with_env("I18N", "__")
        .build()?;

    let i18n = I18n::builder()
        .with_settings(settings)
        .with_preferences(MemoryPreferences::new().with("language", "fr"))
        .build()?;
    i18n.initialize();

    // The French bundle only exists as TOML; a missing JSON variant is logged and skipped.
    i18n.load_resources(["app.json", "app.toml"]);

    let params = json!({"file": {"name": "cat.png", "size": 5120}});
    println!("[{}] {}", i18n.language(), i18n.text("app.title"));
    println!("{}", i18n.text_with("app.status.loaded", &params));

    let status = i18n.create_resource_proxy(
        json!({"zoom": "Zoom: {{percent}}%", "fit": "Fit to window"}),
        "app",
        Some("status"),
    );
    println!("{}", status.text("fit"));
    println!("{}", i18n.format_text(&status.text("zoom"), Some(&json!({"percent": 150}))));
    println!("{}", status.text("rotate"));

    let token = TextToken::new("app.menu.quit", "Quit");
    println!("{}", i18n.get_i18n_text(&token, None));

    Ok(())
}
