//! Pontuação de ofuscação de caminhos de transação.

use serde::{Deserialize, Serialize};

/// Marcador padrão para um salto por carteira não identificada.
pub const UNKNOWN_WALLET: &str = "unknown_wallet";

/// Resultado da análise de um caminho.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PathStatus {
    /// Caminho longo com várias carteiras desconhecidas.
    #[serde(rename = "Suspicious Movement Detected")]
    SuspiciousMovement,

    /// Caminho longo o bastante para esconder a origem.
    #[serde(rename = "Obscured Transaction Trail")]
    ObscuredTrail,

    /// Fluxo normal.
    #[serde(rename = "Normal Flow")]
    NormalFlow,
}

impl PathStatus {
    /// Rótulo do status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PathStatus::SuspiciousMovement => "Suspicious Movement Detected",
            PathStatus::ObscuredTrail => "Obscured Transaction Trail",
            PathStatus::NormalFlow => "Normal Flow",
        }
    }

    /// Verifica se o status exige atenção.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, PathStatus::NormalFlow)
    }
}

impl std::fmt::Display for PathStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limites da regra de caminho.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathThresholds {
    /// Comprimento acima do qual um caminho pode ser suspeito.
    #[serde(default = "default_min_suspicious_length")]
    pub min_suspicious_length: usize,

    /// Mínimo de carteiras desconhecidas para movimento suspeito.
    #[serde(default = "default_unknown_wallet_threshold")]
    pub unknown_wallet_threshold: usize,

    /// Identificador usado para carteiras desconhecidas.
    #[serde(default = "default_unknown_marker")]
    pub unknown_marker: String,
}

impl Default for PathThresholds {
    fn default() -> Self {
        Self {
            min_suspicious_length: default_min_suspicious_length(),
            unknown_wallet_threshold: default_unknown_wallet_threshold(),
            unknown_marker: default_unknown_marker(),
        }
    }
}

fn default_min_suspicious_length() -> usize {
    5
}

fn default_unknown_wallet_threshold() -> usize {
    2
}

fn default_unknown_marker() -> String {
    UNKNOWN_WALLET.to_string()
}

/// Classifica um caminho de transação.
///
/// - Mais longo que `min_suspicious_length` e com pelo menos
///   `unknown_wallet_threshold` carteiras desconhecidas: movimento suspeito.
/// - Mais longo que metade de `min_suspicious_length` (divisão inteira):
///   trilha ofuscada.
/// - Caso contrário: fluxo normal.
pub fn classify_path<S: AsRef<str>>(path: &[S], thresholds: &PathThresholds) -> PathStatus {
    let length = path.len();
    let unknown = path
        .iter()
        .filter(|hop| hop.as_ref() == thresholds.unknown_marker)
        .count();

    if length > thresholds.min_suspicious_length && unknown >= thresholds.unknown_wallet_threshold
    {
        return PathStatus::SuspiciousMovement;
    }
    if length > thresholds.min_suspicious_length / 2 {
        return PathStatus::ObscuredTrail;
    }
    PathStatus::NormalFlow
}

/// Classifica um caminho com os limites padrão.
pub fn dark_track<S: AsRef<str>>(path: &[S]) -> PathStatus {
    classify_path(path, &PathThresholds::default())
}
