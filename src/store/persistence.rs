//! Sled-backed record store
//!
//! Three trees: `records` keyed by big-endian id (key order is id order),
//! `names` mapping materialized path to id, and `meta` holding the seed marker.

use super::{RecordStore, SeedInfo, SeedOutcome};
use crate::error::StorageError;
use crate::record::FlatRecord;
use crate::types::RecordId;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::Transactional;
use std::path::Path;
use tracing::{debug, info};

const RECORDS_TREE: &str = "records";
const NAMES_TREE: &str = "names";
const META_TREE: &str = "meta";
const SEED_KEY: &[u8] = b"seed";

pub struct SledRecordStore {
    db: sled::Db,
    records: sled::Tree,
    names: sled::Tree,
    meta: sled::Tree,
}

impl SledRecordStore {
    /// Open or create a store at `path`
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Throwaway store for tests and one-shot runs
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            records: db.open_tree(RECORDS_TREE)?,
            names: db.open_tree(NAMES_TREE)?,
            meta: db.open_tree(META_TREE)?,
            db,
        })
    }

    fn decode(bytes: &[u8]) -> Result<FlatRecord, StorageError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn decode_id(bytes: &[u8]) -> Result<RecordId, StorageError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| StorageError::Corrupt(format!("id key has {} bytes", bytes.len())))?;
        Ok(RecordId::from_be_bytes(raw))
    }

    fn encode_all(records: &[FlatRecord]) -> Result<Vec<(&FlatRecord, Vec<u8>)>, StorageError> {
        records
            .iter()
            .map(|record| -> Result<(&FlatRecord, Vec<u8>), StorageError> {
                Ok((record, bincode::serialize(record)?))
            })
            .collect()
    }

    fn get_by_id(&self, id: RecordId) -> Result<Option<FlatRecord>, StorageError> {
        match self.records.get(id.to_be_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }
}

impl RecordStore for SledRecordStore {
    fn is_seeded(&self) -> Result<bool, StorageError> {
        Ok(self.meta.contains_key(SEED_KEY)? || !self.records.is_empty())
    }

    fn seed(&self, records: &[FlatRecord]) -> Result<SeedOutcome, StorageError> {
        if records.is_empty() {
            return Err(StorageError::EmptySeed);
        }
        if self.is_seeded()? {
            debug!("Store already populated, skipping seed");
            return Ok(SeedOutcome::AlreadySeeded(self.seed_info()?));
        }

        let info = SeedInfo::for_records(records)?;
        let info_bytes = bincode::serialize(&info)?;
        let encoded = Self::encode_all(records)?;

        // The marker check and every write commit together, so concurrent
        // seeders serialize and only one of them writes.
        let written: Result<bool, TransactionError<()>> = (&self.records, &self.names, &self.meta)
            .transaction(|(records_tx, names_tx, meta_tx)| {
                if meta_tx.get(SEED_KEY)?.is_some() {
                    return Ok(false);
                }
                for (record, value) in &encoded {
                    let key = record.id.to_be_bytes();
                    records_tx.insert(&key[..], value.as_slice())?;
                    names_tx.insert(record.name.as_bytes(), &key[..])?;
                }
                meta_tx.insert(SEED_KEY, info_bytes.as_slice())?;
                Ok::<bool, ConflictableTransactionError<()>>(true)
            });

        match written {
            Ok(true) => {
                self.db.flush()?;
                info!(records = info.record_count, digest = %info.digest, "Seeded record store");
                Ok(SeedOutcome::Seeded(info))
            }
            Ok(false) => Ok(SeedOutcome::AlreadySeeded(self.seed_info()?)),
            Err(TransactionError::Storage(e)) => Err(StorageError::Sled(e)),
            Err(TransactionError::Abort(())) => {
                Err(StorageError::Transaction("seed transaction aborted".to_string()))
            }
        }
    }

    fn reseed(&self, records: &[FlatRecord]) -> Result<SeedInfo, StorageError> {
        if records.is_empty() {
            return Err(StorageError::EmptySeed);
        }
        let info = SeedInfo::for_records(records)?;
        let info_bytes = bincode::serialize(&info)?;
        let encoded = Self::encode_all(records)?;

        // Transactions cannot scan, so the old keys are listed up front and the
        // marker read here must still be current when the swap commits.
        let marker = self.meta.get(SEED_KEY)?;
        let old_records = self.records.iter().keys().collect::<Result<Vec<_>, _>>()?;
        let old_names = self.names.iter().keys().collect::<Result<Vec<_>, _>>()?;

        let swapped: Result<(), TransactionError<()>> = (&self.records, &self.names, &self.meta)
            .transaction(|(records_tx, names_tx, meta_tx)| {
                if meta_tx.get(SEED_KEY)? != marker {
                    return Err(ConflictableTransactionError::Abort(()));
                }
                for key in &old_records {
                    records_tx.remove(key.clone())?;
                }
                for key in &old_names {
                    names_tx.remove(key.clone())?;
                }
                for (record, value) in &encoded {
                    let key = record.id.to_be_bytes();
                    records_tx.insert(&key[..], value.as_slice())?;
                    names_tx.insert(record.name.as_bytes(), &key[..])?;
                }
                meta_tx.insert(SEED_KEY, info_bytes.as_slice())?;
                Ok::<(), ConflictableTransactionError<()>>(())
            });

        match swapped {
            Ok(()) => {
                self.db.flush()?;
                info!(records = info.record_count, digest = %info.digest, "Reseeded record store");
                Ok(info)
            }
            Err(TransactionError::Storage(e)) => Err(StorageError::Sled(e)),
            Err(TransactionError::Abort(())) => Err(StorageError::Transaction(
                "store changed while reseeding".to_string(),
            )),
        }
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.records.len())
    }

    fn all(&self) -> Result<Vec<FlatRecord>, StorageError> {
        self.records
            .iter()
            .values()
            .map(|value| Self::decode(&value?))
            .collect()
    }

    fn root(&self) -> Result<Option<FlatRecord>, StorageError> {
        match self.records.first()? {
            Some((_, value)) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn get_by_name(&self, name: &str) -> Result<Option<FlatRecord>, StorageError> {
        let Some(id_bytes) = self.names.get(name.as_bytes())? else {
            return Ok(None);
        };
        let id = Self::decode_id(&id_bytes)?;
        let record = self.get_by_id(id)?.ok_or_else(|| {
            StorageError::Corrupt(format!("name index points at missing record {}", id))
        })?;
        Ok(Some(record))
    }

    fn range(&self, first: RecordId, last: RecordId) -> Result<Vec<FlatRecord>, StorageError> {
        if first > last {
            return Ok(Vec::new());
        }
        self.records
            .range(first.to_be_bytes()..=last.to_be_bytes())
            .values()
            .map(|value| Self::decode(&value?))
            .collect()
    }

    fn seed_info(&self) -> Result<Option<SeedInfo>, StorageError> {
        match self.meta.get(SEED_KEY)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }
}
