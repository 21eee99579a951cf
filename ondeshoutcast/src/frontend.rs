//! SHOUTcast DNAS v2 frontend adapter.
//!
//! Wraps everything OndeCast needs from a local DNAS installation:
//! locating and version-probing the `sc_serv` binary, rendering
//! `sc_serv.conf` with its ban side files, building the launch command,
//! and polling listener statistics across a station's mounts.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ondecore::{Environment, MemoryStore};
//! use ondefrontend::FrontendAdapter;
//! use ondeshoutcast::ShoutcastFrontend;
//!
//! # async fn example(station: ondecore::Station) -> anyhow::Result<()> {
//! let env = Arc::new(Environment::load()?);
//! let store = Arc::new(MemoryStore::new());
//! let frontend = ShoutcastFrontend::new(env, store)?;
//!
//! let config = frontend.generate_configuration(&station).await?;
//! println!("{}", config.config);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ondecore::{
    AcmeCertificates, CertificateProvider, Environment, NowPlaying, ProcessRunner, Station,
    StationStore, StatsClient, TokioProcessRunner, DEFAULT_MAX_LISTENERS,
};
use ondefrontend::{
    write_ban_list, AdapterConfig, ConfigAssembly, FrontendAdapter, FrontendType,
    NowPlayingAggregator,
};
use regex::Regex;
use tracing::info;
use url::Url;

use crate::stats::ShoutcastStatsClient;

/// Directory under the servers root where the DNAS lives.
pub const SHOUTCAST_SERVER_DIR: &str = "shoutcast2";

/// Name of the DNAS binary.
pub const SHOUTCAST_BINARY: &str = "sc_serv";

/// Name of the generated configuration file.
pub const CONFIG_FILE: &str = "sc_serv.conf";

/// Bounded wait for the `--version` probe.
pub const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

const LOG_FILE: &str = "sc_serv.log";
const W3C_LOG_FILE: &str = "sc_w3c.log";
const IP_BAN_FILE: &str = "sc_serv.ban";
const AGENT_BAN_FILE: &str = "sc_serv.agent";
const RIP_FILE: &str = "sc_serv.rip";

// ============================================================================
// Adapter
// ============================================================================

/// The SHOUTcast frontend adapter.
///
/// One instance serves every SHOUTcast-fronted station of an
/// installation. Collaborators are injected at construction; the builder
/// substitutes test doubles for any of them.
pub struct ShoutcastFrontend {
    env: Arc<Environment>,
    store: Arc<dyn StationStore>,
    stats: Arc<dyn StatsClient>,
    certs: Arc<dyn CertificateProvider>,
    runner: Arc<dyn ProcessRunner>,
}

impl ShoutcastFrontend {
    /// Creates the adapter with its default collaborators: a
    /// [`ShoutcastStatsClient`], ACME certificates under the environment's
    /// ACME directory, and real process spawning.
    pub fn new(env: Arc<Environment>, store: Arc<dyn StationStore>) -> crate::Result<Self> {
        Self::builder(env, store).build()
    }

    /// Creates a builder to override individual collaborators.
    pub fn builder(env: Arc<Environment>, store: Arc<dyn StationStore>) -> ShoutcastFrontendBuilder {
        ShoutcastFrontendBuilder {
            env,
            store,
            stats: None,
            certs: None,
            runner: None,
        }
    }
}

/// Extracts the version token from a `sc_serv --version` banner.
fn version_from_banner(banner: &str) -> Option<String> {
    let pattern = Regex::new(r"(?im)^SHOUTcast .* v(\S+) .*$").ok()?;
    pattern
        .captures(banner)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str().to_string())
}

#[async_trait]
impl FrontendAdapter for ShoutcastFrontend {
    fn kind(&self) -> FrontendType {
        FrontendType::Shoutcast
    }

    fn binary_path(&self) -> Option<PathBuf> {
        let path = self
            .env
            .servers_dir()
            .join(SHOUTCAST_SERVER_DIR)
            .join(SHOUTCAST_BINARY);
        path.is_file().then_some(path)
    }

    async fn version(&self) -> Option<String> {
        let binary = self.binary_path()?;
        let output = self
            .runner
            .run(&binary, &["--version"], binary.parent(), VERSION_PROBE_TIMEOUT)
            .await
            .ok()?;
        if !output.success {
            return None;
        }
        version_from_banner(&output.stdout)
    }

    fn configuration_path(&self, station: &Station) -> PathBuf {
        self.env.station_config_dir(station).join(CONFIG_FILE)
    }

    async fn generate_configuration(&self, station: &Station) -> ondefrontend::Result<AdapterConfig> {
        let config_dir = self.env.station_config_dir(station);
        tokio::fs::create_dir_all(&config_dir).await?;

        let settings = &station.frontend;
        let (cert_path, cert_key_path) = self.certs.certificate_paths();

        let ip_ban_path = config_dir.join(IP_BAN_FILE);
        let user_agent_ban_path = config_dir.join(AGENT_BAN_FILE);
        write_ban_list(&ip_ban_path, &settings.banned_ip_list()).await?;
        write_ban_list(&user_agent_ban_path, &settings.banned_user_agent_list()).await?;

        let mut assembly = ConfigAssembly::new();
        assembly.set("password", &settings.source_password);
        assembly.set("adminpassword", &settings.admin_password);
        assembly.set("logfile", config_dir.join(LOG_FILE).display());
        assembly.set("w3clog", config_dir.join(W3C_LOG_FILE).display());
        assembly.set("banfile", ip_ban_path.display());
        assembly.set("agentfile", user_agent_ban_path.display());
        assembly.set("ripfile", config_dir.join(RIP_FILE).display());
        assembly.set(
            "maxuser",
            settings.max_listeners.unwrap_or(DEFAULT_MAX_LISTENERS),
        );
        assembly.set("portbase", settings.port);
        assembly.set("requirestreamconfigs", 1);
        assembly.set("savebanlistonexit", 0);
        assembly.set("saveagentlistonexit", 0);
        assembly.set("licenceid", settings.sc_license_id.as_deref().unwrap_or(""));
        assembly.set("userid", settings.sc_user_id.as_deref().unwrap_or(""));
        assembly.set("sslcertificatefile", cert_path.display());
        assembly.set("sslcertificatekeyfile", cert_key_path.display());

        for (index, mount) in station.mounts.iter().enumerate() {
            let i = index + 1;
            assembly.set(format!("streamid_{i}"), i);
            assembly.set(format!("streampath_{i}"), &mount.name);

            if let Some(intro) = mount.intro_path.as_deref().filter(|p| !p.is_empty()) {
                assembly.set(format!("streamintrofile_{i}"), config_dir.join(intro).display());
            }
            if let Some(relay) = mount.relay_url.as_deref().filter(|u| !u.is_empty()) {
                assembly.set(format!("streamrelayurl_{i}"), relay);
            }
            if let Some(authhash) = mount.authhash.as_deref().filter(|h| !h.is_empty()) {
                assembly.set(format!("streamauthhash_{i}"), authhash);
            }
            if let Some(duration) = mount.max_listener_duration.filter(|d| *d > 0) {
                assembly.set(format!("streamlistenertime_{i}"), duration);
            }
        }

        // The operator fragment is applied last so it wins over every
        // generated directive, mount entries included.
        if let Some(custom) = settings.custom_config.as_deref() {
            assembly.apply_custom_fragment(custom);
        }

        Ok(AdapterConfig {
            config: assembly.render(),
            ip_ban_path,
            user_agent_ban_path,
        })
    }

    async fn write_configuration(&self, station: &Station) -> ondefrontend::Result<PathBuf> {
        let generated = self.generate_configuration(station).await?;
        let path = self.configuration_path(station);
        tokio::fs::write(&path, generated.config.as_bytes()).await?;
        info!(
            station = %station.short_name,
            path = %path.display(),
            "wrote SHOUTcast configuration"
        );
        Ok(path)
    }

    fn command(&self, station: &Station) -> Option<String> {
        let binary = self.binary_path()?;
        Some(format!(
            "{} {}",
            binary.display(),
            self.configuration_path(station).display()
        ))
    }

    fn admin_url(&self, station: &Station) -> Url {
        let mut url = station.public_url.clone();
        let path = format!("{}/admin.cgi", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    async fn now_playing(
        &self,
        station: &mut Station,
        include_clients: bool,
    ) -> ondefrontend::Result<NowPlaying> {
        let base_url = self.env.local_uri_with_port(station.frontend.port);
        let aggregator = NowPlayingAggregator::new(
            Arc::clone(&self.stats),
            Arc::clone(&self.store),
            base_url,
            station.frontend.admin_password.clone(),
        );
        aggregator.aggregate(station, include_clients).await
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ShoutcastFrontend`].
pub struct ShoutcastFrontendBuilder {
    env: Arc<Environment>,
    store: Arc<dyn StationStore>,
    stats: Option<Arc<dyn StatsClient>>,
    certs: Option<Arc<dyn CertificateProvider>>,
    runner: Option<Arc<dyn ProcessRunner>>,
}

impl ShoutcastFrontendBuilder {
    /// Replaces the stats client.
    pub fn stats_client(mut self, stats: Arc<dyn StatsClient>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Replaces the certificate provider.
    pub fn certificate_provider(mut self, certs: Arc<dyn CertificateProvider>) -> Self {
        self.certs = Some(certs);
        self
    }

    /// Replaces the process runner.
    pub fn process_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Builds the adapter, filling in default collaborators.
    pub fn build(self) -> crate::Result<ShoutcastFrontend> {
        let stats = match self.stats {
            Some(stats) => stats,
            None => Arc::new(ShoutcastStatsClient::new()?),
        };
        let certs = self
            .certs
            .unwrap_or_else(|| Arc::new(AcmeCertificates::new(self.env.acme_dir())));
        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(TokioProcessRunner));

        Ok(ShoutcastFrontend {
            env: self.env,
            store: self.store,
            stats,
            certs,
            runner,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use ondecore::{FrontendSettings, MemoryStore, Mount};

    fn environment(base_dir: &Path) -> Arc<Environment> {
        Arc::new(Environment {
            base_dir: base_dir.to_path_buf(),
            ..Environment::default()
        })
    }

    fn frontend(env: Arc<Environment>) -> ShoutcastFrontend {
        ShoutcastFrontend::builder(env, Arc::new(MemoryStore::new()))
            .certificate_provider(Arc::new(AcmeCertificates::new("/certs")))
            .build()
            .unwrap()
    }

    fn station(mounts: Vec<Mount>) -> Station {
        Station {
            id: 1,
            name: "Test Station".to_string(),
            short_name: "test_station".to_string(),
            is_enabled: true,
            frontend_type: "shoutcast2".to_string(),
            frontend: FrontendSettings {
                port: 8000,
                source_password: "hackme".to_string(),
                admin_password: "admin_pw".to_string(),
                ..FrontendSettings::default()
            },
            timezone: "UTC".to_string(),
            public_url: Url::parse("https://radio.example.com").unwrap(),
            mounts,
        }
    }

    // ------------------------------------------------------------------
    // Version banner parsing
    // ------------------------------------------------------------------

    #[test]
    fn banner_yields_the_version_token() {
        let banner = "SHOUTcast Distributed Network Audio Server v2.6.1.777 (posix(linux x64))\n";
        assert_eq!(version_from_banner(banner).as_deref(), Some("2.6.1.777"));
    }

    #[test]
    fn banner_matching_ignores_case() {
        let banner = "shoutcast server v2.5 (x64)";
        assert_eq!(version_from_banner(banner).as_deref(), Some("2.5"));
    }

    #[test]
    fn banner_version_is_found_on_any_line() {
        let banner = "Copyright startup notice\nSHOUTcast Server v2.6.0 (build 750)\n";
        assert_eq!(version_from_banner(banner).as_deref(), Some("2.6.0"));
    }

    #[test]
    fn foreign_banner_is_rejected() {
        assert!(version_from_banner("Icecast 2.4.4").is_none());
        assert!(version_from_banner("").is_none());
    }

    // ------------------------------------------------------------------
    // Binary discovery and command line
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn missing_binary_means_no_command_and_no_version() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = frontend(environment(dir.path()));
        let station = station(Vec::new());

        assert!(frontend.binary_path().is_none());
        assert!(frontend.command(&station).is_none());
        assert!(frontend.version().await.is_none());
    }

    #[test]
    fn command_concatenates_binary_and_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let server_dir = dir.path().join("servers").join(SHOUTCAST_SERVER_DIR);
        std::fs::create_dir_all(&server_dir).unwrap();
        let binary = server_dir.join(SHOUTCAST_BINARY);
        std::fs::write(&binary, b"").unwrap();

        let frontend = frontend(environment(dir.path()));
        let station = station(Vec::new());

        let command = frontend.command(&station).unwrap();
        let expected = format!(
            "{} {}",
            binary.display(),
            frontend.configuration_path(&station).display()
        );
        assert_eq!(command, expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn version_probe_runs_the_binary() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let server_dir = dir.path().join("servers").join(SHOUTCAST_SERVER_DIR);
        std::fs::create_dir_all(&server_dir)?;
        let binary = server_dir.join(SHOUTCAST_BINARY);
        std::fs::write(
            &binary,
            "#!/bin/sh\necho 'SHOUTcast Distributed Network Audio Server v2.6.1.777 (posix)'\n",
        )?;
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755))?;

        let frontend = frontend(environment(dir.path()));
        assert_eq!(frontend.version().await.as_deref(), Some("2.6.1.777"));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin URL
    // ------------------------------------------------------------------

    #[test]
    fn admin_url_appends_the_cgi_path() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = frontend(environment(dir.path()));
        let station = station(Vec::new());

        assert_eq!(
            frontend.admin_url(&station).as_str(),
            "https://radio.example.com/admin.cgi"
        );
    }

    #[test]
    fn admin_url_preserves_an_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = frontend(environment(dir.path()));
        let mut station = station(Vec::new());
        station.public_url = Url::parse("https://example.com/fm").unwrap();

        assert_eq!(
            frontend.admin_url(&station).as_str(),
            "https://example.com/fm/admin.cgi"
        );
    }

    // ------------------------------------------------------------------
    // Configuration generation
    // ------------------------------------------------------------------

    fn full_station() -> Station {
        let mut main = Mount::new(5, "/radio.mp3");
        main.is_default = true;
        main.intro_path = Some("intro.mp3".to_string());
        main.authhash = Some("abc123".to_string());
        main.max_listener_duration = Some(3600);

        let mut relay = Mount::new(7, "/relay.mp3");
        relay.relay_url = Some("http://upstream.example.com:8000/stream".to_string());

        station(vec![main, relay])
    }

    #[tokio::test]
    async fn generates_the_full_configuration_in_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let station = full_station();
        let config_dir = dir.path().join("stations/test_station/config");

        let generated = frontend.generate_configuration(&station).await?;

        let d = config_dir.display();
        let expected = format!(
            "password=hackme\n\
             adminpassword=admin_pw\n\
             logfile={d}/sc_serv.log\n\
             w3clog={d}/sc_w3c.log\n\
             banfile={d}/sc_serv.ban\n\
             agentfile={d}/sc_serv.agent\n\
             ripfile={d}/sc_serv.rip\n\
             maxuser=250\n\
             portbase=8000\n\
             requirestreamconfigs=1\n\
             savebanlistonexit=0\n\
             saveagentlistonexit=0\n\
             licenceid=\n\
             userid=\n\
             sslcertificatefile=/certs/ssl.crt\n\
             sslcertificatekeyfile=/certs/ssl.key\n\
             streamid_1=1\n\
             streampath_1=/radio.mp3\n\
             streamintrofile_1={d}/intro.mp3\n\
             streamauthhash_1=abc123\n\
             streamlistenertime_1=3600\n\
             streamid_2=2\n\
             streampath_2=/relay.mp3\n\
             streamrelayurl_2=http://upstream.example.com:8000/stream\n"
        );
        assert_eq!(generated.config, expected);
        Ok(())
    }

    #[tokio::test]
    async fn generation_is_deterministic() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let station = full_station();

        let first = frontend.generate_configuration(&station).await?;
        let second = frontend.generate_configuration(&station).await?;
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn custom_fragment_overrides_generated_values() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let mut station = full_station();
        station.frontend.max_listeners = Some(500);
        station.frontend.custom_config =
            Some("; operator tuning\nmaxuser=32\nlogclients=1\n".to_string());

        let generated = frontend.generate_configuration(&station).await?;

        assert!(generated.config.contains("maxuser=32\n"));
        assert!(!generated.config.contains("maxuser=500"));
        // New keys land after the generated ones.
        assert!(generated.config.ends_with("logclients=1\n"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_custom_fragment_leaves_the_configuration_alone() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let mut station = full_station();
        station.frontend.custom_config = Some("maxuser=32\nnot a directive\n".to_string());

        let generated = frontend.generate_configuration(&station).await?;
        assert!(generated.config.contains("maxuser=250\n"));
        assert!(!generated.config.contains("maxuser=32"));
        Ok(())
    }

    #[tokio::test]
    async fn ban_files_are_written_with_the_dnas_separator() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let mut station = station(Vec::new());
        station.frontend.banned_ips = "10.0.0.1\n192.168.1.5".to_string();

        let generated = frontend.generate_configuration(&station).await?;

        let ip_bans = std::fs::read_to_string(&generated.ip_ban_path)?;
        assert_eq!(ip_bans, "10.0.0.1;255;\n192.168.1.5;255;\n");
        let agent_bans = std::fs::read_to_string(&generated.user_agent_ban_path)?;
        assert_eq!(agent_bans, "");
        Ok(())
    }

    #[tokio::test]
    async fn write_configuration_lands_at_the_configuration_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));
        let station = full_station();

        let path = frontend.write_configuration(&station).await?;
        assert_eq!(path, frontend.configuration_path(&station));
        assert!(path.ends_with("sc_serv.conf"));

        let written = std::fs::read_to_string(&path)?;
        let generated = frontend.generate_configuration(&station).await?;
        assert_eq!(written, generated.config);
        Ok(())
    }

    #[tokio::test]
    async fn listener_cap_defaults_and_overrides() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let frontend = frontend(environment(dir.path()));

        let mut station = station(Vec::new());
        let generated = frontend.generate_configuration(&station).await?;
        assert!(generated.config.contains("maxuser=250\n"));

        station.frontend.max_listeners = Some(500);
        let generated = frontend.generate_configuration(&station).await?;
        assert!(generated.config.contains("maxuser=500\n"));
        Ok(())
    }
}
