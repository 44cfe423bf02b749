//! Plugin lifecycle
//!
//! Entry point the host loader calls once per process: read the instance
//! config, then bind the enabled presets and the game-specific runtime
//! patches. Without a usable config the plugin stays in passthrough mode
//! and installs nothing.

use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};

use crate::actions::PatchContext;
use crate::config::{SplituxConfig, config_path, load_config};
use crate::host::{Interceptor, ObjectModel};
use crate::patcher::{ApplyReport, Patcher};
use crate::presets::preset_groups;

pub const PLUGIN_GUID: &str = "gg.splitux.facepunch";
pub const PLUGIN_NAME: &str = "SplituxFacepunch";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Plugin {
    config: Option<SplituxConfig>,
    patcher: Option<Patcher>,
    presets: ApplyReport,
    runtime: ApplyReport,
}

impl Plugin {
    /// Load `splitux.cfg` from `config_dir` and apply everything it enables
    pub fn load(
        model: Arc<dyn ObjectModel>,
        interceptor: Box<dyn Interceptor>,
        config_dir: &Path,
    ) -> Self {
        info!("[{}] {} v{} loading...", PLUGIN_NAME, PLUGIN_NAME, PLUGIN_VERSION);

        match load_config(&config_path(config_dir)) {
            Ok(Some(config)) => Self::with_config(model, interceptor, config),
            Ok(None) => {
                warn!(
                    "[{}] No splitux config found - running in passthrough mode",
                    PLUGIN_NAME
                );
                Self::passthrough()
            }
            Err(e) => {
                error!("[{}] {} - running in passthrough mode", PLUGIN_NAME, e);
                Self::passthrough()
            }
        }
    }

    /// Apply an already parsed config
    pub fn with_config(
        model: Arc<dyn ObjectModel>,
        interceptor: Box<dyn Interceptor>,
        config: SplituxConfig,
    ) -> Self {
        log_config(&config);

        let context = Arc::new(PatchContext::new(config.identity.clone()));
        let mut patcher = Patcher::new(model, interceptor, context);

        let mut presets = ApplyReport::default();
        for (name, specs) in preset_groups(&config.facepunch) {
            info!("[{}] Applying {} patches...", PLUGIN_NAME, name);
            for spec in specs {
                let outcome = patcher.apply_guarded(&spec);
                presets.entries.push((spec, outcome));
            }
        }

        let runtime = patcher.apply_all(&config.runtime_patches);

        info!("[{}] {} loaded successfully!", PLUGIN_NAME, PLUGIN_NAME);
        Self {
            config: Some(config),
            patcher: Some(patcher),
            presets,
            runtime,
        }
    }

    fn passthrough() -> Self {
        Self {
            config: None,
            patcher: None,
            presets: ApplyReport::default(),
            runtime: ApplyReport::default(),
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.config.is_none()
    }

    pub fn config(&self) -> Option<&SplituxConfig> {
        self.config.as_ref()
    }

    pub fn preset_report(&self) -> &ApplyReport {
        &self.presets
    }

    pub fn runtime_report(&self) -> &ApplyReport {
        &self.runtime
    }

    /// Remove every installed hook. Also happens on drop.
    pub fn unload(&mut self) {
        if let Some(patcher) = self.patcher.as_mut() {
            patcher.unpatch_all();
        }
    }
}

fn log_config(config: &SplituxConfig) {
    let id = &config.identity;
    info!("[{}] Player Index: {}", PLUGIN_NAME, id.player_index);
    info!("[{}] Spoofed Steam ID: {}", PLUGIN_NAME, id.steam_id);
    info!("[{}] Spoofed Name: {}", PLUGIN_NAME, id.account_name);

    let fp = &config.facepunch;
    info!("[{}] Facepunch Settings:", PLUGIN_NAME);
    info!("[{}]   spoof_identity: {}", PLUGIN_NAME, fp.spoof_identity);
    info!("[{}]   force_valid: {}", PLUGIN_NAME, fp.force_valid);
    info!("[{}]   photon_bypass: {}", PLUGIN_NAME, fp.photon_bypass);
    info!(
        "[{}]   runtime_patches: {}",
        PLUGIN_NAME,
        config.runtime_patches.len()
    );
}
