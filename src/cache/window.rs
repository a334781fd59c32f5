//! Janela de recência com índice por chave.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::types::errors::FlowWatchError;
use crate::FlowWatchResult;

use super::DEFAULT_CAPACITY;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Número atual de entradas na janela.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de chaves no índice.
    pub indexed: usize,

    /// Entradas removidas da janela por excesso de capacidade.
    pub evictions: u64,

    /// Buscas por chave encontradas.
    pub hits: u64,

    /// Buscas por chave não encontradas.
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto das buscas por chave.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache de capacidade fixa com os resultados mais recentes.
///
/// A janela preserva a ordem de inserção (mais antigo primeiro). O índice
/// por chave é independente da janela: sobrescrever uma chave não toca na
/// janela, e remover uma entrada da janela não toca no índice.
#[derive(Debug)]
pub struct ResultCache<T> {
    buffer: VecDeque<T>,
    index: HashMap<String, T>,
    capacity: NonZeroUsize,
    evictions: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> ResultCache<T> {
    /// Cria um novo cache.
    ///
    /// Retorna [`FlowWatchError::InvalidCapacity`] se `capacity` for zero.
    pub fn new(capacity: usize) -> FlowWatchResult<Self> {
        let cap = NonZeroUsize::new(capacity).ok_or(FlowWatchError::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(cap))
    }

    /// Cria um cache a partir de uma capacidade já validada.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity.get()),
            index: HashMap::new(),
            capacity,
            evictions: 0,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Capacidade máxima da janela.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Número de entradas na janela.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Verifica se a janela está vazia.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Verifica se a janela atingiu a capacidade.
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity.get()
    }

    /// Verifica se existe um valor indexado sob `key`.
    ///
    /// Não conta como hit nem miss.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Limpa a janela e o índice.
    ///
    /// Os contadores também são zerados: depois de `clear` o cache é
    /// indistinguível de um cache novo com a mesma capacidade.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.index.clear();
        self.evictions = 0;
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.buffer.len(),
            capacity: self.capacity.get(),
            indexed: self.index.len(),
            evictions: self.evictions,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T: Clone> ResultCache<T> {
    /// Adiciona um resultado ao final da janela.
    ///
    /// Se a janela já está cheia, o resultado mais antigo é removido.
    /// Com `key`, o índice passa a apontar para este resultado,
    /// sobrescrevendo qualquer valor anterior da mesma chave.
    pub fn add_result(&mut self, result: T, key: Option<&str>) {
        if let Some(key) = key {
            self.index.insert(key.to_owned(), result.clone());
        }

        if self.buffer.len() == self.capacity.get() {
            self.buffer.pop_front();
            self.evictions += 1;
            tracing::debug!(
                capacity = self.capacity.get(),
                evictions = self.evictions,
                "Evicted oldest result"
            );
        }
        self.buffer.push_back(result);
    }

    /// Retorna os `n` resultados mais recentes, do mais antigo ao mais novo.
    ///
    /// Sem `n`, ou com `n` maior que a janela, retorna a janela inteira.
    /// O vetor retornado é uma cópia: mutações posteriores não o afetam.
    pub fn get_latest(&self, n: Option<usize>) -> Vec<T> {
        let len = self.buffer.len();
        let take = n.map_or(len, |n| n.min(len));
        self.buffer.iter().skip(len - take).cloned().collect()
    }

    /// Busca um resultado pela chave.
    ///
    /// Consulta apenas o índice, então o valor continua acessível mesmo
    /// depois de sair da janela.
    pub fn get_by_key(&self, key: &str) -> Option<T> {
        match self.index.get(key) {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(result.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Retorna o resultado mais recente, ou `None` se a janela está vazia.
    pub fn get_last(&self) -> Option<T> {
        self.buffer.back().cloned()
    }
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}
