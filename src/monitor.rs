//! Monitor de transações.
//!
//! Executa as regras de detecção, reporta cada veredito ao [`Tracer`] e o
//! guarda no cache de resultados recentes.
//!
//! ## Exemplo
//!
//! ```rust
//! use flowwatch::monitor::Monitor;
//! use flowwatch::trace::Tracer;
//! use flowwatch::Config;
//!
//! let monitor = Monitor::new(&Config::default_config(), Tracer::new()).unwrap();
//! let verdict = monitor.inspect_path(&["walletA", "walletB", "walletC"]);
//! assert_eq!(verdict.label, "Obscured Transaction Trail");
//! assert_eq!(monitor.last(), Some(verdict));
//! ```

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::cache::{CacheStats, SharedResultCache};
use crate::detection::{
    classify_path, classify_risk, PathThresholds, RiskSample, RiskThresholds,
};
use crate::trace::{self, Tracer};
use crate::types::config::Config;
use crate::types::requests::Observation;
use crate::types::responses::Verdict;
use crate::FlowWatchResult;

/// Monitor de transações.
#[derive(Debug, Clone)]
pub struct Monitor {
    cache: SharedResultCache<Verdict>,
    path_thresholds: PathThresholds,
    risk_thresholds: RiskThresholds,
    tracer: Tracer,
}

impl Monitor {
    /// Cria um monitor a partir da configuração.
    ///
    /// Falha se `cache.capacity` for zero.
    pub fn new(config: &Config, tracer: Tracer) -> FlowWatchResult<Self> {
        let cache = SharedResultCache::new(config.cache.capacity)?;
        tracing::debug!(
            capacity = config.cache.capacity,
            sinks = tracer.len(),
            "Monitor created"
        );
        Ok(Self::with_cache(config, tracer, cache))
    }

    /// Cria um monitor que grava em um cache já existente.
    pub fn with_cache(config: &Config, tracer: Tracer, cache: SharedResultCache<Verdict>) -> Self {
        Self {
            cache,
            path_thresholds: config.detection.path.clone(),
            risk_thresholds: config.detection.risk.clone(),
            tracer,
        }
    }

    /// Gera a chave de um caminho.
    ///
    /// A chave é um hash SHA256 dos saltos exatos, cada um prefixado pelo
    /// seu comprimento. Caminhos diferentes geram chaves diferentes, então
    /// a mesma chave sempre corresponde à mesma classificação.
    pub fn path_key<S: AsRef<str>>(path: &[S]) -> String {
        let mut hasher = Sha256::new();
        for hop in path {
            let hop = hop.as_ref().as_bytes();
            hasher.update((hop.len() as u64).to_le_bytes());
            hasher.update(hop);
        }
        hex::encode(hasher.finalize())
    }

    /// Analisa um caminho de transação.
    pub fn inspect_path<S: AsRef<str>>(&self, path: &[S]) -> Verdict {
        let status = classify_path(path, &self.path_thresholds);
        let key = Self::path_key(path);

        let hops: Vec<&str> = path.iter().map(|hop| hop.as_ref()).collect();
        self.tracer.emit(
            trace::PATH_ANALYSIS,
            &json!({ "path": hops, "status": status }),
        );

        if status.is_flagged() {
            tracing::info!(hops = hops.len(), status = %status, "Path flagged");
        }

        let verdict = Verdict::path(status, Some(key));
        self.store(verdict)
    }

    /// Classifica uma amostra de risco.
    ///
    /// A amostra só é indexada quando traz o token.
    pub fn assess_risk(&self, sample: &RiskSample) -> Verdict {
        let level = classify_risk(sample, &self.risk_thresholds);

        self.tracer.emit(
            trace::RISK_ASSESSMENT,
            &json!({
                "token": sample.token,
                "tx_density": sample.tx_density,
                "token_age_days": sample.token_age_days,
                "recent_alerts": sample.recent_alerts,
                "level": level,
            }),
        );

        tracing::info!(
            token = sample.token.as_deref().unwrap_or("-"),
            level = %level,
            "Risk assessed"
        );

        let verdict = Verdict::risk(level, sample.token.clone());
        self.store(verdict)
    }

    /// Processa uma observação qualquer.
    pub fn process(&self, observation: &Observation) -> Verdict {
        match observation {
            Observation::Path { path } => self.inspect_path(path.as_slice()),
            Observation::Risk(sample) => self.assess_risk(sample),
        }
    }

    fn store(&self, verdict: Verdict) -> Verdict {
        self.cache.add_result(verdict.clone(), verdict.key.as_deref());
        verdict
    }

    /// Vereditos mais recentes, do mais antigo ao mais novo.
    pub fn latest(&self, n: Option<usize>) -> Vec<Verdict> {
        self.cache.get_latest(n)
    }

    /// Último veredito.
    pub fn last(&self) -> Option<Verdict> {
        self.cache.get_last()
    }

    /// Busca um veredito pela chave (hash do caminho ou token).
    pub fn lookup(&self, key: &str) -> Option<Verdict> {
        self.cache.get_by_key(key)
    }

    /// Busca o último veredito de um caminho.
    pub fn lookup_path<S: AsRef<str>>(&self, path: &[S]) -> Option<Verdict> {
        self.lookup(&Self::path_key(path))
    }

    /// Limpa o cache.
    pub fn clear(&self) {
        self.cache.clear();
        self.tracer.emit(trace::CACHE_CLEARED, &serde_json::Value::Null);
    }

    /// Estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Handle compartilhado para o cache.
    pub fn cache(&self) -> SharedResultCache<Verdict> {
        self.cache.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{PathStatus, RiskLevel};
    use crate::trace::MetricsSink;
    use crate::types::responses::VerdictKind;
    use std::sync::Arc;

    fn monitor_with_capacity(capacity: usize) -> (Monitor, Arc<MetricsSink>) {
        let mut config = Config::default_config();
        config.cache.capacity = capacity;

        let metrics = Arc::new(MetricsSink::new());
        let mut tracer = Tracer::new();
        tracer.register(metrics.clone());

        (Monitor::new(&config, tracer).unwrap(), metrics)
    }

    #[test]
    fn test_path_key_uses_exact_hops() {
        let key1 = Monitor::path_key(&["a", "b", "c"]);
        let key2 = Monitor::path_key(&["a", "b", "c"]);

        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 64);

        // Ordem, saltos vazios, espaços e separadores embutidos importam
        for other in [
            vec!["c", "b", "a"],
            vec!["a", "", "b", "c"],
            vec![" a ", "b", "c"],
            vec!["a->b", "c"],
            vec!["ab", "c"],
        ] {
            assert_ne!(key1, Monitor::path_key(&other), "{:?}", other);
        }
    }

    #[test]
    fn test_lookup_path_matches_own_classification() {
        let (monitor, _) = monitor_with_capacity(10);
        let paths: [&[&str]; 6] = [
            &["a", "b"],
            &["a", "", "b"],
            &[" a ", "b"],
            &["w1", "unknown_wallet", "w2", "unknown_wallet", "w3", "w4"],
            &["w1", "unknown_wallet ", "w2", "unknown_wallet", "w3", "w4"],
            &["a->b"],
        ];

        for path in paths {
            monitor.inspect_path(path);
        }

        for path in paths {
            let stored = monitor.lookup_path(path).map(|v| v.label);
            assert_eq!(
                stored.as_deref(),
                Some(crate::detection::dark_track(path).as_str()),
                "{:?}",
                path
            );
        }
        assert_eq!(monitor.stats().indexed, paths.len());
    }

    #[test]
    fn test_inspect_path_stores_and_traces() {
        let (monitor, metrics) = monitor_with_capacity(5);
        let path = [
            "walletA",
            "unknown_wallet",
            "walletB",
            "unknown_wallet",
            "walletC",
            "walletD",
        ];

        let verdict = monitor.inspect_path(&path);

        assert_eq!(verdict.kind, VerdictKind::Path);
        assert_eq!(verdict.label, PathStatus::SuspiciousMovement.as_str());
        assert_eq!(monitor.lookup_path(&path), Some(verdict.clone()));
        assert_eq!(monitor.last(), Some(verdict));
        assert_eq!(metrics.count(trace::PATH_ANALYSIS), 1);
    }

    #[test]
    fn test_assess_risk_keyed_by_token() {
        let (monitor, metrics) = monitor_with_capacity(5);

        let keyed = monitor.assess_risk(&RiskSample::new(320.0, 2.0, 3).with_token("MINT1"));
        let anonymous = monitor.assess_risk(&RiskSample::new(10.0, 90.0, 0));

        assert_eq!(keyed.label, RiskLevel::ImmediateRisk.as_str());
        assert_eq!(anonymous.label, RiskLevel::Stable.as_str());
        assert_eq!(anonymous.key, None);

        assert_eq!(monitor.lookup("MINT1"), Some(keyed));
        assert_eq!(monitor.stats().indexed, 1);
        assert_eq!(metrics.count(trace::RISK_ASSESSMENT), 2);
    }

    #[test]
    fn test_custom_thresholds_from_config() {
        let mut config = Config::default_config();
        config.detection.risk.watchlist_tx_density = 10.0;
        let monitor = Monitor::new(&config, Tracer::new()).unwrap();

        let verdict = monitor.assess_risk(&RiskSample::new(11.0, 30.0, 0));
        assert_eq!(verdict.label, "Watchlist");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default_config();
        config.cache.capacity = 0;
        assert!(Monitor::new(&config, Tracer::new()).is_err());
    }

    #[test]
    fn test_clear_emits_event() {
        let (monitor, metrics) = monitor_with_capacity(2);
        monitor.inspect_path(&["a"]);
        monitor.clear();

        assert!(monitor.latest(None).is_empty());
        assert_eq!(monitor.last(), None);
        assert_eq!(metrics.count(trace::CACHE_CLEARED), 1);
    }
}
