//! Transaction store
//!
//! Owns one user's transactions in insertion order, assigns ids, and loads
//! and saves the user's record file through the record codec. The query
//! engine lives in `storage::query`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::{LedgerPaths, ReloadPolicy, Settings, UserSession};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Member, Transaction, TransactionFactory, TransactionId, TransactionUpdate,
};

use super::codec::RecordCodec;
use super::file_io::{read_records, write_records_atomic, FileStamp};
use super::members::MemberRegistry;

/// File-backed collection of one user's transactions
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    session: UserSession,
    reload_policy: ReloadPolicy,
    pub(crate) transactions: Vec<Transaction>,
    members: MemberRegistry,
    /// Highest id handed out or loaded since the last load
    high_water: TransactionId,
    /// Stamp of the file as of the last load or save
    synced: Option<FileStamp>,
}

impl TransactionStore {
    /// Create an empty store backed by `path`
    pub fn new(path: PathBuf, session: UserSession, members: MemberRegistry) -> Self {
        Self {
            path,
            session,
            reload_policy: ReloadPolicy::default(),
            transactions: Vec::new(),
            members,
            high_water: 0,
            synced: None,
        }
    }

    /// Open the store for a session, creating the user's file if needed.
    ///
    /// The store starts empty; call `load` to read the file.
    pub fn open(
        paths: &LedgerPaths,
        session: UserSession,
        settings: &Settings,
    ) -> LedgerResult<Self> {
        let path = paths.resolve_user_file(&session)?;
        let mut store = Self::new(path, session, MemberRegistry::new());
        store.reload_policy = settings.reload_policy;
        Ok(store)
    }

    /// Set the refresh behaviour
    pub fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn reload_policy(&self) -> ReloadPolicy {
        self.reload_policy
    }

    /// Replace the in-memory collection with the contents of the file.
    ///
    /// Any bad record aborts the load and leaves the collection empty.
    /// Members met before the bad record stay registered.
    pub fn load(&mut self) -> LedgerResult<()> {
        self.transactions.clear();
        self.high_water = 0;
        self.synced = None;

        let stamp = FileStamp::of(&self.path);
        let records = read_records(&self.path)?;

        let mut loaded = Vec::with_capacity(records.len());
        for (line, record) in &records {
            match RecordCodec::decode_record(record, &mut self.members) {
                Ok(txn) => loaded.push(txn),
                Err(e) => {
                    warn!(
                        user = self.session.username(),
                        line,
                        error = %e,
                        "rejected record, load aborted"
                    );
                    return Err(e);
                }
            }
        }

        self.high_water = loaded.iter().map(Transaction::id).max().unwrap_or(0);
        self.transactions = loaded;
        self.synced = stamp;

        info!(
            user = self.session.username(),
            count = self.transactions.len(),
            "loaded transactions"
        );
        Ok(())
    }

    /// Write every transaction to the file, one record per line
    pub fn save(&mut self) -> LedgerResult<()> {
        let records = self.transactions.iter().map(RecordCodec::encode_fields);
        write_records_atomic(&self.path, records)?;
        self.synced = FileStamp::of(&self.path);

        info!(
            user = self.session.username(),
            count = self.transactions.len(),
            "saved transactions"
        );
        Ok(())
    }

    /// Bring the collection up to date with the file per the reload policy.
    ///
    /// Returns true if the file was re-read.
    pub fn refresh(&mut self) -> LedgerResult<bool> {
        let reload = match self.reload_policy {
            ReloadPolicy::Always => true,
            ReloadPolicy::OnChange => {
                self.synced.is_none() || FileStamp::of(&self.path) != self.synced
            }
        };

        debug!(user = self.session.username(), reload, "refresh");
        if reload {
            self.load()?;
        }
        Ok(reload)
    }

    /// Add a new transaction and return its id
    pub fn add(
        &mut self,
        category: Category,
        amount: f64,
        date: Option<NaiveDate>,
        member: Member,
    ) -> LedgerResult<TransactionId> {
        let id = self.generate_new_id();
        let mut txn = TransactionFactory::create(Some(category), amount, date, member)?;
        txn.set_id(id);

        self.members.add(txn.member().clone());
        self.transactions.push(txn);
        self.high_water = id;

        debug!(user = self.session.username(), id, "added transaction");
        Ok(id)
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Remove the first transaction equal to `txn` (same id).
    ///
    /// Returns false if nothing matched.
    pub fn remove(&mut self, txn: &Transaction) -> bool {
        match self.transactions.iter().position(|t| t == txn) {
            Some(index) => {
                self.transactions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first transaction with `id`.
    ///
    /// Returns false if nothing matched.
    pub fn remove_by_id(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|t| t.id() == id) {
            Some(index) => {
                self.transactions.remove(index);
                debug!(user = self.session.username(), id, "removed transaction");
                true
            }
            None => false,
        }
    }

    /// Overwrite the fields present in `update` on the transaction with `id`.
    ///
    /// Returns false if no transaction has that id.
    pub fn update(&mut self, id: TransactionId, update: TransactionUpdate) -> bool {
        if let Some(member) = &update.member {
            self.members.add(member.clone());
        }

        match self.transactions.iter_mut().find(|t| t.id() == id) {
            Some(txn) => {
                update.apply_to(txn);
                true
            }
            None => false,
        }
    }

    /// Find a transaction by id
    pub fn find_by_id(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Largest id currently in the store, 0 when empty
    pub fn current_max_id(&self) -> TransactionId {
        self.transactions.iter().map(Transaction::id).max().unwrap_or(0)
    }

    /// Next id to assign: one past the largest id seen since the last load
    pub fn generate_new_id(&self) -> TransactionId {
        self.current_max_id().max(self.high_water) + 1
    }

    /// Members registered in this session
    pub fn members(&self) -> &MemberRegistry {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut MemberRegistry {
        &mut self.members
    }

    /// Rename a member in the registry and on every transaction that
    /// references it. Returns the number of transactions changed.
    ///
    /// `old_name` resolves exactly before falling back to a case-insensitive
    /// match. Renaming onto a name held by another member fails with
    /// `MemberExists` and changes nothing.
    pub fn rename_member(&mut self, old_name: &str, new_name: &str) -> LedgerResult<usize> {
        let old = self
            .members
            .resolve(old_name)
            .cloned()
            .ok_or_else(|| LedgerError::member_not_found(old_name))?;

        if !self.members.rename_exact(&old, new_name) {
            return Err(LedgerError::MemberExists(new_name.to_string()));
        }

        let renamed = Member::new(new_name);
        let mut changed = 0;
        for txn in self.transactions.iter_mut().filter(|t| *t.member() == old) {
            txn.set_member(renamed.clone());
            changed += 1;
        }

        info!(
            user = self.session.username(),
            from = old.name(),
            to = new_name,
            changed,
            "renamed member"
        );
        Ok(changed)
    }
}
