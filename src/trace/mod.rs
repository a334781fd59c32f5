//! Canal de trace do flowwatch.
//!
//! Eventos de trace são um canal lateral: um nome de evento mais um valor
//! de metadados, enviados sem esperar resposta. Quem precisa reportar
//! recebe um [`Tracer`] explicitamente; a biblioteca não mantém nenhum
//! logger global.
//!
//! - [`LoggingSink`]: Registra eventos via `tracing`
//! - [`MetricsSink`]: Conta eventos por nome

mod builtin;

pub use builtin::{LoggingSink, MetricsSink};

use std::sync::Arc;

use serde_json::Value;

/// Evento emitido após analisar um caminho.
pub const PATH_ANALYSIS: &str = "TX_PATH_ANALYSIS";

/// Evento emitido após classificar uma amostra de risco.
pub const RISK_ASSESSMENT: &str = "TX_RISK_ASSESSMENT";

/// Evento emitido quando o cache do monitor é limpo.
pub const CACHE_CLEARED: &str = "CACHE_CLEARED";

// ═══════════════════════════════════════════════════════════════════════════
// Trait TraceSink
// ═══════════════════════════════════════════════════════════════════════════

/// Destino de eventos de trace.
///
/// `record` não retorna nada e não pode falhar: um sink com problema deve
/// descartar o evento em vez de interromper quem o emitiu.
pub trait TraceSink: Send + Sync {
    /// Nome do sink.
    fn name(&self) -> &str;

    /// Registra um evento.
    fn record(&self, event: &str, metadata: &Value);
}

// ═══════════════════════════════════════════════════════════════════════════
// Tracer
// ═══════════════════════════════════════════════════════════════════════════

/// Distribui eventos para todos os sinks registrados.
#[derive(Clone, Default)]
pub struct Tracer {
    sinks: Vec<Arc<dyn TraceSink>>,
}

impl Tracer {
    /// Cria um tracer sem sinks. Eventos são descartados.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Cria um tracer com os sinks padrão (logging).
    pub fn with_defaults() -> Self {
        let mut tracer = Self::new();
        tracer.register(Arc::new(LoggingSink::new()));
        tracer
    }

    /// Registra um sink.
    pub fn register(&mut self, sink: Arc<dyn TraceSink>) {
        tracing::debug!(sink_name = sink.name(), "Registering trace sink");
        self.sinks.push(sink);
    }

    /// Envia um evento a todos os sinks.
    pub fn emit(&self, event: &str, metadata: &Value) {
        for sink in &self.sinks {
            sink.record(event, metadata);
        }
    }

    /// Número de sinks registrados.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Verifica se não há sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Nomes dos sinks registrados.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("sinks", &self.sink_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_tracer_discards() {
        let tracer = Tracer::new();
        assert!(tracer.is_empty());
        tracer.emit(PATH_ANALYSIS, &json!({"status": "Normal Flow"}));
    }

    #[test]
    fn test_with_defaults_registers_logging() {
        let tracer = Tracer::with_defaults();
        assert_eq!(tracer.sink_names(), vec!["logging"]);
    }

    #[test]
    fn test_emit_fans_out() {
        let first = Arc::new(MetricsSink::new());
        let second = Arc::new(MetricsSink::new());

        let mut tracer = Tracer::new();
        tracer.register(first.clone());
        tracer.register(second.clone());
        assert_eq!(tracer.len(), 2);

        tracer.emit(RISK_ASSESSMENT, &json!("Stable"));
        tracer.emit(RISK_ASSESSMENT, &json!("Watchlist"));

        assert_eq!(first.count(RISK_ASSESSMENT), 2);
        assert_eq!(second.count(RISK_ASSESSMENT), 2);
    }

    #[test]
    fn test_clone_shares_sinks() {
        let metrics = Arc::new(MetricsSink::new());
        let mut tracer = Tracer::new();
        tracer.register(metrics.clone());

        let cloned = tracer.clone();
        cloned.emit(CACHE_CLEARED, &Value::Null);

        assert_eq!(metrics.total(), 1);
    }
}
