use {
    anyhow::{bail, Context},
    clap::Args,
    colored_json::ToColoredJson,
    lens_registry::{try_load, Registry},
    lens_types::config::LensConfig,
    serde::Serialize,
    std::path::PathBuf,
};

/// Where to read the cached market registry from.
#[derive(Args)]
pub struct RegistryArgs {
    /// Path to a registry cache file [default: `registry.cache_path` from the config]
    #[arg(long)]
    registry: Option<PathBuf>,
}

impl RegistryArgs {
    pub fn load(&self, cfg: &LensConfig) -> anyhow::Result<Registry> {
        let Some(path) = self.registry.as_ref().or(cfg.registry.cache_path.as_ref()) else {
            bail!("no registry given: pass `--registry` or set `registry.cache_path`");
        };

        let registry = try_load(path)
            .with_context(|| format!("failed to load registry from {}", path.display()))?;

        tracing::debug!(path = %path.display(), markets = registry.len(), "Loaded registry");

        Ok(registry)
    }
}

pub fn print_json_pretty<T>(data: T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(&data)?;
    let colored = json.to_colored_json_auto()?;

    println!("{colored}");

    Ok(())
}
