//! Implementação dos comandos CLI do flowwatch.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::detection::{classify_path, classify_risk, RiskSample};
use crate::monitor::Monitor;
use crate::trace::Tracer;
use crate::types::config::{Config, LogFormat, DEFAULT_CONFIG_FILE};
use crate::types::requests::Observation;
use crate::types::responses::Verdict;
use crate::{FlowWatchError, FlowWatchResult};

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> FlowWatchResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        tokio::fs::create_dir_all(&target_dir).await?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Edit it directly or run 'flowwatch config' to inspect it.");
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("flowwatch initialized successfully!");
    println!("Configuration created at: {}", config_path.display());

    Ok(())
}

/// Cria o tracer conforme a configuração.
pub fn build_tracer(config: &Config) -> Tracer {
    if config.trace.enabled {
        Tracer::with_defaults()
    } else {
        Tracer::new()
    }
}

/// Classifica um caminho e imprime o rótulo.
pub async fn path(hops: &[String], config: &Config) -> FlowWatchResult<()> {
    let status = classify_path(hops, &config.detection.path);
    build_tracer(config).emit(
        crate::trace::PATH_ANALYSIS,
        &serde_json::json!({ "path": hops, "status": status }),
    );
    println!("{}", status);
    Ok(())
}

/// Classifica uma amostra de risco e imprime o rótulo.
pub async fn risk(sample: RiskSample, config: &Config) -> FlowWatchResult<()> {
    Observation::risk(sample.clone()).validate()?;

    let level = classify_risk(&sample, &config.detection.risk);
    build_tracer(config).emit(
        crate::trace::RISK_ASSESSMENT,
        &serde_json::json!({ "sample": sample, "level": level }),
    );
    println!("{}", level);
    Ok(())
}

/// Processa um arquivo de observações e mostra os vereditos recentes.
pub async fn batch(
    input: &Path,
    latest: Option<usize>,
    json: bool,
    config: &Config,
) -> FlowWatchResult<()> {
    let content = tokio::fs::read_to_string(input).await?;
    let observations = Observation::parse_batch(&content)?;

    tracing::info!(
        count = observations.len(),
        file = %input.display(),
        "Processing observations"
    );

    let monitor = Monitor::new(config, build_tracer(config))?;

    let progress = ProgressBar::new(observations.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .map_err(|e| FlowWatchError::other(e.to_string()))?
            .progress_chars("=> "),
    );

    for observation in &observations {
        let verdict = monitor.process(observation);
        progress.set_message(verdict.label);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let window = monitor.latest(latest);
    let stats = monitor.stats();

    if json {
        let output = serde_json::json!({
            "processed": observations.len(),
            "latest": window,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Processadas {} observações; mostrando {} de {} no cache.\n",
        observations.len(),
        window.len(),
        stats.size
    );
    print_verdicts(&window);
    println!();
    println!(
        "Cache: {}/{} entradas, {} chaves, {} descartes",
        stats.size, stats.capacity, stats.indexed, stats.evictions
    );

    Ok(())
}

fn print_verdicts(verdicts: &[Verdict]) {
    for verdict in verdicts {
        println!(
            "  {} {}",
            verdict.timestamp.format("%H:%M:%S%.3f"),
            verdict
        );
    }
}

/// Executa o exemplo padrão.
pub async fn demo(config: &Config) -> FlowWatchResult<()> {
    let monitor = Monitor::new(config, build_tracer(config))?;

    let path = [
        "walletA",
        "unknown_wallet",
        "walletB",
        "unknown_wallet",
        "walletC",
        "walletD",
    ];
    let status = monitor.inspect_path(&path);
    tracing::info!("dark_track: {}", status.label);
    println!("dark_track: {}", status.label);

    let alert = monitor.assess_risk(&RiskSample::new(320.0, 2.0, 3));
    tracing::info!("risk_alert: {}", alert.label);
    println!("risk_alert: {}", alert.label);

    Ok(())
}

/// Mostra a configuração efetiva.
pub async fn config_cmd(config_path: &Path, config: &Config) -> FlowWatchResult<()> {
    if config_path.exists() {
        println!("Arquivo: {}", config_path.display());
    } else {
        println!(
            "Arquivo {} não encontrado, usando valores padrão.",
            config_path.display()
        );
    }
    show_config_summary(config);
    Ok(())
}

/// Mostra resumo da configuração.
pub fn show_config_summary(config: &Config) {
    let path = &config.detection.path;
    let risk = &config.detection.risk;

    println!("\nResumo da Configuração\n");
    println!("┌─────────────────────────────────────────┐");
    println!("│ Geral                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Log level: {:<28} │", config.general.log_level);
    println!(
        "│ Log format: {:<27} │",
        match config.general.log_format {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    );
    println!("├─────────────────────────────────────────┤");
    println!("│ Cache                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Capacidade: {:<27} │", config.cache.capacity);
    println!("├─────────────────────────────────────────┤");
    println!("│ Caminho                                 │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Comprimento suspeito: > {:<15} │", path.min_suspicious_length);
    println!(
        "│ Carteiras desconhecidas: >= {:<11} │",
        path.unknown_wallet_threshold
    );
    println!("│ Marcador: {:<29} │", path.unknown_marker);
    println!("├─────────────────────────────────────────┤");
    println!("│ Risco                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Imediato: densidade > {:<17} │", risk.immediate_tx_density);
    println!("│           idade < {:<21} │", risk.immediate_token_age_days);
    println!("│           alertas >= {:<18} │", risk.immediate_alerts);
    println!("│ Watchlist: densidade > {:<16} │", risk.watchlist_tx_density);
    println!("├─────────────────────────────────────────┤");
    println!(
        "│ Trace: {:<32} │",
        if config.trace.enabled {
            "habilitado"
        } else {
            "desabilitado"
        }
    );
    println!("└─────────────────────────────────────────┘");
    println!();
}

/// Mostra versão.
pub fn version() {
    println!("flowwatch {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_summary() {
        let config = Config::default_config();
        // Apenas verifica que não causa panic
        show_config_summary(&config);
    }

    #[test]
    fn test_build_tracer_respects_config() {
        let mut config = Config::default_config();
        assert_eq!(build_tracer(&config).len(), 1);

        config.trace.enabled = false;
        assert!(build_tracer(&config).is_empty());
    }

    #[tokio::test]
    async fn test_init_creates_config() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");

        init(Some(target.clone())).await.unwrap();

        let loaded = Config::load(target.join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(loaded, Config::default_config());
    }

    #[tokio::test]
    async fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config_path, "[cache]\ncapacity = 3\n").unwrap();

        init(Some(dir.path().to_path_buf())).await.unwrap();

        let loaded = Config::load(&config_path).unwrap();
        assert_eq!(loaded.cache.capacity, 3);
    }

    #[tokio::test]
    async fn test_batch_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("obs.json");
        std::fs::write(&input, "{not json").unwrap();

        let result = batch(&input, None, false, &Config::default_config()).await;
        assert!(matches!(result, Err(FlowWatchError::Json(_))));
    }

    #[tokio::test]
    async fn test_risk_rejects_negative_age() {
        let result = risk(RiskSample::new(10.0, -1.0, 0), &Config::default_config()).await;
        assert!(matches!(result, Err(FlowWatchError::InvalidObservation(_))));
    }
}
