// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use anyhow::{Result, anyhow};
use std::sync::{Arc, RwLock};

/// An immutable view of the full collection, shared cheaply between readers.
pub type Snapshot = Arc<[Transaction]>;

/// Supplies the full transaction collection. No filtering happens here;
/// every query works from one snapshot taken at its start.
pub trait TransactionSource {
    fn all_transactions(&self) -> Result<Snapshot>;
}

impl<S: TransactionSource + ?Sized> TransactionSource for &S {
    fn all_transactions(&self) -> Result<Snapshot> {
        (**self).all_transactions()
    }
}

impl<S: TransactionSource + ?Sized> TransactionSource for Arc<S> {
    fn all_transactions(&self) -> Result<Snapshot> {
        (**self).all_transactions()
    }
}

/// In-process store. Writers build a new collection and swap it in, so a
/// snapshot handed out earlier never changes underneath its reader.
#[derive(Debug, Default)]
pub struct MemorySource {
    inner: RwLock<Snapshot>,
}

impl MemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        MemorySource {
            inner: RwLock::new(transactions.into()),
        }
    }

    pub fn replace(&self, transactions: Vec<Transaction>) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow!("Transaction store lock poisoned"))?;
        *guard = transactions.into();
        Ok(())
    }

    pub fn push(&self, tx: Transaction) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow!("Transaction store lock poisoned"))?;
        let mut next = guard.to_vec();
        next.push(tx);
        *guard = next.into();
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.all_transactions()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl TransactionSource for MemorySource {
    fn all_transactions(&self) -> Result<Snapshot> {
        let guard = self
            .inner
            .read()
            .map_err(|_| anyhow!("Transaction store lock poisoned"))?;
        Ok(Arc::clone(&guard))
    }
}
