//! Classificação de risco por densidade de transações.

use serde::{Deserialize, Serialize};

/// Nível de risco de um token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// Token novo, muito ativo e já com alertas.
    #[serde(rename = "Immediate Risk Alert")]
    ImmediateRisk,

    /// Densidade alta, acompanhar.
    #[serde(rename = "Watchlist")]
    Watchlist,

    /// Sem sinais.
    #[serde(rename = "Stable")]
    Stable,
}

impl RiskLevel {
    /// Rótulo do nível.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::ImmediateRisk => "Immediate Risk Alert",
            RiskLevel::Watchlist => "Watchlist",
            RiskLevel::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amostra de atividade de um token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskSample {
    /// Identificador do token (mint), usado como chave no cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Transações por hora.
    pub tx_density: f64,

    /// Dias desde o lançamento do token.
    pub token_age_days: f64,

    /// Alertas nas últimas 24h.
    pub recent_alerts: u32,
}

impl RiskSample {
    /// Cria uma amostra sem token associado.
    pub fn new(tx_density: f64, token_age_days: f64, recent_alerts: u32) -> Self {
        Self {
            token: None,
            tx_density,
            token_age_days,
            recent_alerts,
        }
    }

    /// Associa o token à amostra.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Limites da regra de risco.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskThresholds {
    /// Densidade acima da qual um token novo é risco imediato.
    #[serde(default = "default_immediate_tx_density")]
    pub immediate_tx_density: f64,

    /// Idade (dias) abaixo da qual um token é considerado novo.
    #[serde(default = "default_immediate_token_age_days")]
    pub immediate_token_age_days: f64,

    /// Alertas recentes necessários para risco imediato.
    #[serde(default = "default_immediate_alerts")]
    pub immediate_alerts: u32,

    /// Densidade acima da qual o token entra na watchlist.
    #[serde(default = "default_watchlist_tx_density")]
    pub watchlist_tx_density: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            immediate_tx_density: default_immediate_tx_density(),
            immediate_token_age_days: default_immediate_token_age_days(),
            immediate_alerts: default_immediate_alerts(),
            watchlist_tx_density: default_watchlist_tx_density(),
        }
    }
}

fn default_immediate_tx_density() -> f64 {
    300.0
}

fn default_immediate_token_age_days() -> f64 {
    5.0
}

fn default_immediate_alerts() -> u32 {
    2
}

fn default_watchlist_tx_density() -> f64 {
    150.0
}

/// Classifica uma amostra de atividade.
pub fn classify_risk(sample: &RiskSample, thresholds: &RiskThresholds) -> RiskLevel {
    if sample.tx_density > thresholds.immediate_tx_density
        && sample.token_age_days < thresholds.immediate_token_age_days
        && sample.recent_alerts >= thresholds.immediate_alerts
    {
        return RiskLevel::ImmediateRisk;
    }
    if sample.tx_density > thresholds.watchlist_tx_density {
        return RiskLevel::Watchlist;
    }
    RiskLevel::Stable
}

/// Classifica com os limites padrão.
pub fn risk_alert(tx_density: f64, token_age_days: f64, recent_alerts: u32) -> RiskLevel {
    classify_risk(
        &RiskSample::new(tx_density, token_age_days, recent_alerts),
        &RiskThresholds::default(),
    )
}
