//! Interface de linha de comando do flowwatch.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::DEFAULT_CONFIG_FILE;

/// flowwatch - classificação de fluxo de transações com cache de vereditos.
#[derive(Parser, Debug)]
#[command(name = "flowwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cria flowwatch.toml com valores padrão.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Classifica um caminho de transação.
    Path {
        /// Carteiras do caminho, em ordem.
        #[arg(required = true)]
        hops: Vec<String>,
    },

    /// Classifica o risco de um token.
    Risk {
        /// Transações por hora.
        #[arg(short, long)]
        density: f64,

        /// Idade do token em dias.
        #[arg(short, long)]
        age: f64,

        /// Alertas nas últimas 24h.
        #[arg(long, default_value_t = 0)]
        alerts: u32,

        /// Identificador do token.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Processa um arquivo JSON de observações.
    Batch {
        /// Arquivo com um array JSON de observações.
        input: PathBuf,

        /// Quantos vereditos recentes mostrar (padrão: todo o cache).
        #[arg(short, long)]
        latest: Option<usize>,

        /// Saída em JSON.
        #[arg(long)]
        json: bool,
    },

    /// Executa o exemplo padrão (um caminho e uma amostra de risco).
    Demo,

    /// Mostra a configuração efetiva.
    Config,

    /// Mostra versão.
    Version,
}
