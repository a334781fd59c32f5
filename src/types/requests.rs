//! Tipos de entrada do flowwatch.

use serde::{Deserialize, Serialize};

use crate::detection::RiskSample;
use crate::types::errors::FlowWatchError;
use crate::FlowWatchResult;

/// Uma observação a ser classificada pelo monitor.
///
/// No arquivo de lote cada observação é um objeto JSON com o campo `kind`:
///
/// ```json
/// [
///   {"kind": "path", "path": ["walletA", "unknown_wallet", "walletB"]},
///   {"kind": "risk", "token": "MINT1", "tx_density": 320, "token_age_days": 2, "recent_alerts": 3}
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// Caminho de transação (sequência de carteiras).
    Path {
        /// Saltos do caminho, em ordem.
        path: Vec<String>,
    },

    /// Amostra de densidade de transações de um token.
    Risk(RiskSample),
}

impl Observation {
    /// Cria uma observação de caminho.
    pub fn path<I, S>(hops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Observation::Path {
            path: hops.into_iter().map(Into::into).collect(),
        }
    }

    /// Cria uma observação de risco.
    pub fn risk(sample: RiskSample) -> Self {
        Observation::Risk(sample)
    }

    /// Valida os campos numéricos da observação.
    pub fn validate(&self) -> FlowWatchResult<()> {
        match self {
            Observation::Path { .. } => Ok(()),
            Observation::Risk(sample) => {
                if !sample.tx_density.is_finite() || sample.tx_density < 0.0 {
                    return Err(FlowWatchError::InvalidObservation(format!(
                        "tx_density deve ser finito e não negativo (recebido {})",
                        sample.tx_density
                    )));
                }
                if !sample.token_age_days.is_finite() || sample.token_age_days < 0.0 {
                    return Err(FlowWatchError::InvalidObservation(format!(
                        "token_age_days deve ser finito e não negativo (recebido {})",
                        sample.token_age_days
                    )));
                }
                Ok(())
            }
        }
    }

    /// Lê uma lista de observações a partir de um array JSON.
    ///
    /// Falha na primeira observação inválida, indicando sua posição.
    pub fn parse_batch(json: &str) -> FlowWatchResult<Vec<Observation>> {
        let observations: Vec<Observation> = serde_json::from_str(json)?;
        for (i, obs) in observations.iter().enumerate() {
            obs.validate().map_err(|e| match e {
                FlowWatchError::InvalidObservation(msg) => {
                    FlowWatchError::InvalidObservation(format!("#{}: {}", i, msg))
                }
                other => other,
            })?;
        }
        Ok(observations)
    }
}
