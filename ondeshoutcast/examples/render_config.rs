//! Example: Render a SHOUTcast configuration for a demo station
//!
//! Run with: cargo run -p ondeshoutcast --example render_config

use std::sync::Arc;

use ondecore::{Environment, FrontendSettings, MemoryStore, Mount, Station};
use ondefrontend::FrontendAdapter;
use ondeshoutcast::ShoutcastFrontend;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // A temporary installation root so the example never touches /var.
    let root = tempfile::tempdir()?;
    let env = Arc::new(Environment {
        base_dir: root.path().to_path_buf(),
        ..Environment::default()
    });

    let mut main_mount = Mount::new(1, "/radio.mp3");
    main_mount.is_default = true;
    main_mount.max_listener_duration = Some(7200);

    let mut low_mount = Mount::new(2, "/radio_low.mp3");
    low_mount.intro_path = Some("intro.mp3".to_string());

    let station = Station {
        id: 1,
        name: "Onde Nocturne".to_string(),
        short_name: "onde_nocturne".to_string(),
        is_enabled: true,
        frontend_type: "shoutcast2".to_string(),
        frontend: FrontendSettings {
            port: 8000,
            source_password: "source_pw".to_string(),
            admin_password: "admin_pw".to_string(),
            max_listeners: Some(500),
            custom_config: Some("; tuning\nnamelookups=0\n".to_string()),
            ..FrontendSettings::default()
        },
        timezone: "Europe/Paris".to_string(),
        public_url: Url::parse("https://radio.example.com")?,
        mounts: vec![main_mount, low_mount],
    };

    let store = Arc::new(MemoryStore::new());
    let frontend = ShoutcastFrontend::new(env, store)?;

    println!("Configuration path: {:?}", frontend.configuration_path(&station));
    println!("Admin URL: {}", frontend.admin_url(&station));
    match frontend.command(&station) {
        Some(command) => println!("Launch command: {}", command),
        None => println!("Launch command: (sc_serv binary not installed)"),
    }
    println!("---");

    let generated = frontend.generate_configuration(&station).await?;
    println!("{}", generated.config);

    Ok(())
}
