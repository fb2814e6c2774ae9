//! In-memory database shared by every in-memory port implementation.
//!
//! Used by tests and by local runs without PostgreSQL. State lives behind a
//! single `tokio::sync::RwLock`; item-level exclusion for lending is a
//! separate registry of per-item async mutexes (see `lending.rs`).

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::account::StoredAccount;
use crate::domain::equipment::{
    EquipmentItem, EquipmentNote, Instruction, InstructionSummary, NewInstruction, NewItem,
    NewNote, Stock, DEFAULT_STATUS,
};
use crate::domain::foundation::{
    Actor, BorrowId, DomainError, ErrorCode, InstructionId, ItemId, NoteId, Role, Timestamp,
    UserId,
};
use crate::domain::lending::{ActivityEntry, BorrowRecord, ItemRef};
use crate::domain::session::SessionToken;
use crate::ports::{
    AccountRecord, AttachmentRepository, CatalogRepository, CredentialStore, ItemQuery,
};

/// Committed rows.
#[derive(Debug, Default)]
pub(super) struct State {
    pub items: BTreeMap<ItemId, EquipmentItem>,
    pub records: BTreeMap<BorrowId, BorrowRecord>,
    pub activity: Vec<ActivityEntry>,
    pub users: BTreeMap<UserId, StoredAccount>,
    pub last_login: HashMap<UserId, Timestamp>,
    /// SHA-256 digest -> owner.
    pub api_tokens: HashMap<String, UserId>,
    pub notes: Vec<EquipmentNote>,
    pub instructions: Vec<Instruction>,
}

impl State {
    pub fn resolve_item(&self, item: &ItemRef) -> Option<&EquipmentItem> {
        match item {
            ItemRef::Id(id) => self.items.get(id),
            ItemRef::Sku(sku) => self.items.values().find(|i| i.sku() == sku),
        }
    }
}

/// Id generators. Ids taken by a rolled-back transaction are not reused.
#[derive(Debug, Default)]
pub(super) struct Sequences {
    item: AtomicI64,
    borrow: AtomicI64,
    user: AtomicI64,
    note: AtomicI64,
    instruction: AtomicI64,
}

impl Sequences {
    fn next(counter: &AtomicI64) -> i64 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn next_borrow(&self) -> BorrowId {
        BorrowId::from_raw(Self::next(&self.borrow))
    }
}

pub(super) type LockRegistry = Mutex<HashMap<ItemId, Arc<Mutex<()>>>>;

/// In-memory implementation of the lending, catalog, attachment and
/// credential ports.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    pub(super) state: Arc<RwLock<State>>,
    pub(super) locks: Arc<LockRegistry>,
    pub(super) sequences: Arc<Sequences>,
    pub(super) fail_activity: Arc<AtomicBool>,
    fail_credentials: AtomicBool,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding and inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts an item with the given stock and default profile.
    pub async fn seed_item(&self, sku: &str, name: &str, stock: Stock) -> EquipmentItem {
        let id = ItemId::from_raw(Sequences::next(&self.sequences.item));
        let item = EquipmentItem::from_new(
            id,
            NewItem {
                sku: sku.to_string(),
                name: name.to_string(),
                profile: crate::domain::equipment::ItemProfile {
                    status: DEFAULT_STATUS.to_string(),
                    ..Default::default()
                },
                stock,
            },
            Timestamp::now(),
        );
        self.state.write().await.items.insert(id, item.clone());
        item
    }

    /// Inserts a user with an already-hashed password.
    pub async fn seed_user(&self, username: &str, email: &str, password_hash: &str, role: Role) -> Actor {
        let id = UserId::from_raw(Sequences::next(&self.sequences.user));
        let actor = Actor::new(id, username, username, email, role);
        self.state.write().await.users.insert(
            id,
            StoredAccount {
                actor: actor.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        actor
    }

    /// Provisions a persistent API token for a user. Only the digest is kept.
    pub async fn seed_api_token(&self, user_id: UserId, token: &str) {
        if let Some(token) = SessionToken::parse(token) {
            self.state
                .write()
                .await
                .api_tokens
                .insert(token.digest(), user_id);
        }
    }

    /// Committed stock of an item.
    pub async fn stock_of(&self, item: &ItemRef) -> Option<Stock> {
        self.state.read().await.resolve_item(item).map(|i| i.stock())
    }

    /// All committed items, ordered by id.
    pub async fn items(&self) -> Vec<EquipmentItem> {
        self.state.read().await.items.values().cloned().collect()
    }

    /// All committed borrow records, ordered by id.
    pub async fn records(&self) -> Vec<BorrowRecord> {
        self.state.read().await.records.values().cloned().collect()
    }

    /// The committed activity log in write order.
    pub async fn activity(&self) -> Vec<ActivityEntry> {
        self.state.read().await.activity.clone()
    }

    /// Makes every subsequent activity write fail.
    pub fn fail_activity_writes(&self, fail: bool) {
        self.fail_activity.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent credential lookup fail as a storage error.
    pub fn fail_credential_lookups(&self, fail: bool) {
        self.fail_credentials.store(fail, Ordering::SeqCst);
    }

    fn check_credentials_available(&self) -> Result<(), DomainError> {
        if self.fail_credentials.load(Ordering::SeqCst) {
            return Err(DomainError::database("credential store unavailable"));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl CatalogRepository for InMemoryDatabase {
    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<EquipmentItem>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .rev()
            .filter(|item| match &query.search {
                Some(needle) => item.matches(needle),
                None => true,
            })
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<EquipmentItem>, DomainError> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn insert_item(&self, item: &NewItem) -> Result<EquipmentItem, DomainError> {
        let mut state = self.state.write().await;
        if state.items.values().any(|i| i.sku() == item.sku) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("duplicate sku: {}", item.sku),
            ));
        }
        let id = ItemId::from_raw(Sequences::next(&self.sequences.item));
        let created = EquipmentItem::from_new(id, item.clone(), Timestamp::now());
        state.items.insert(id, created.clone());
        Ok(created)
    }

    async fn set_image_url(&self, id: ItemId, url: &str) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.items.get_mut(&id) {
            Some(item) => {
                item.set_image_url(url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryDatabase {
    async fn list_notes(&self, item_id: ItemId) -> Result<Vec<EquipmentNote>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .notes
            .iter()
            .rev()
            .filter(|n| n.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn insert_note(&self, note: &NewNote) -> Result<NoteId, DomainError> {
        let id = NoteId::from_raw(Sequences::next(&self.sequences.note));
        self.state.write().await.notes.push(EquipmentNote {
            id,
            item_id: note.item_id,
            note_text: note.note_text.clone(),
            created_by: note.created_by.clone(),
            created_at: Timestamp::now(),
        });
        Ok(id)
    }

    async fn list_instructions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InstructionSummary>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .instructions
            .iter()
            .rev()
            .filter(|i| i.item_id == item_id)
            .map(InstructionSummary::from)
            .collect())
    }

    async fn find_instruction(
        &self,
        id: InstructionId,
    ) -> Result<Option<Instruction>, DomainError> {
        let state = self.state.read().await;
        Ok(state.instructions.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_instruction(
        &self,
        instruction: &NewInstruction,
    ) -> Result<InstructionId, DomainError> {
        let id = InstructionId::from_raw(Sequences::next(&self.sequences.instruction));
        let now = Timestamp::now();
        self.state.write().await.instructions.push(Instruction {
            id,
            item_id: instruction.item_id,
            title: instruction.title.clone(),
            body: instruction.body.clone(),
            image_url: instruction.image_url.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Credentials
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl CredentialStore for InMemoryDatabase {
    async fn find_by_api_token(&self, digest: &str) -> Result<Option<Actor>, DomainError> {
        self.check_credentials_available()?;
        let state = self.state.read().await;
        Ok(state
            .api_tokens
            .get(digest)
            .and_then(|id| state.users.get(id))
            .map(|account| account.actor.clone()))
    }

    async fn find_by_login(&self, identifier: &str) -> Result<Option<StoredAccount>, DomainError> {
        self.check_credentials_available()?;
        let email = identifier.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|a| a.actor.email == email || a.actor.username == identifier)
            .cloned())
    }

    async fn create_account(&self, record: &AccountRecord) -> Result<Actor, DomainError> {
        self.check_credentials_available()?;
        let mut state = self.state.write().await;
        let taken = state.users.values().any(|a| {
            a.actor.email.eq_ignore_ascii_case(&record.email) || a.actor.username == record.username
        });
        if taken {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "email or username already exists",
            ));
        }
        let id = UserId::from_raw(Sequences::next(&self.sequences.user));
        let actor = Actor::new(
            id,
            record.username.clone(),
            record.full_name.clone(),
            record.email.clone(),
            record.role,
        );
        state.users.insert(
            id,
            StoredAccount {
                actor: actor.clone(),
                password_hash: record.password_hash.clone(),
            },
        );
        Ok(actor)
    }

    async fn touch_last_login(&self, user_id: UserId) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .last_login
            .insert(user_id, Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_item_rejects_duplicate_sku_with_conflict() {
        let db = InMemoryDatabase::new();
        db.seed_item("A-1", "Thing", Stock::full(1).unwrap()).await;
        let dup = NewItem {
            sku: "A-1".into(),
            name: "Other".into(),
            profile: Default::default(),
            stock: Stock::full(1).unwrap(),
        };
        let err = db.insert_item(&dup).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn find_by_login_matches_email_case_insensitively() {
        let db = InMemoryDatabase::new();
        db.seed_user("ana", "ana@lab.test", "h", Role::User).await;
        assert!(db.find_by_login("ANA@lab.test").await.unwrap().is_some());
        assert!(db.find_by_login("ana").await.unwrap().is_some());
        assert!(db.find_by_login("ANA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn api_tokens_are_stored_as_digests() {
        let db = InMemoryDatabase::new();
        let user = db.seed_user("ana", "ana@lab.test", "h", Role::User).await;
        db.seed_api_token(user.id, "plain-token").await;

        assert!(db.find_by_api_token("plain-token").await.unwrap().is_none());
        let digest = SessionToken::parse("plain-token").unwrap().digest();
        assert_eq!(db.find_by_api_token(&digest).await.unwrap(), Some(user));
    }
}
