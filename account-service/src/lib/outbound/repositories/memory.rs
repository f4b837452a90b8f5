use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::errors::UniqueField;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

#[derive(Debug, Default)]
struct Store {
    accounts: BTreeMap<AccountId, Account>,
    last_id: i64,
}

impl Store {
    /// Reject a username or email already held by an account other than `except`.
    fn check_unique(
        &self,
        username: &Username,
        email: &EmailAddress,
        except: Option<AccountId>,
    ) -> Result<(), AccountError> {
        for account in self.accounts.values() {
            if Some(account.id) == except {
                continue;
            }
            if account.username == *username {
                return Err(AccountError::DuplicateAccount {
                    field: UniqueField::Username,
                    value: username.to_string(),
                });
            }
            if account.email == *email {
                return Err(AccountError::DuplicateAccount {
                    field: UniqueField::Email,
                    value: email.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Account store kept in process memory.
///
/// Uniqueness checks and writes happen under one write lock, so concurrent
/// registrations of the same username cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut store = self.store.write().await;
        store.check_unique(&account.username, &account.email, None)?;

        store.last_id += 1;
        let id = AccountId(store.last_id);
        let account = account.into_account(id);
        store.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self
            .store
            .read()
            .await
            .accounts
            .values()
            .find(|account| account.username == *username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.store.read().await.accounts.values().cloned().collect())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut store = self.store.write().await;
        if !store.accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }
        store.check_unique(&account.username, &account.email, Some(account.id))?;

        store.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.store
            .write()
            .await
            .accounts
            .remove(id)
            .map(|_| ())
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryAccountRepository::new();

        let alice = repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();
        let bob = repository
            .create(new_account("bob", "bob@x.com"))
            .await
            .unwrap();

        assert_eq!(alice.id, AccountId(1));
        assert_eq!(bob.id, AccountId(2));
    }

    #[tokio::test]
    async fn test_create_duplicate_username_keeps_original() {
        let repository = InMemoryAccountRepository::new();
        let original = repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();

        let result = repository
            .create(new_account("alice", "other@x.com"))
            .await;
        assert!(matches!(
            result,
            Err(AccountError::DuplicateAccount {
                field: UniqueField::Username,
                ..
            })
        ));

        let stored = repository
            .find_by_username(&original.username)
            .await
            .unwrap();
        assert_eq!(stored, Some(original));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repository = InMemoryAccountRepository::new();
        repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();

        let result = repository
            .create(new_account("alice2", "alice@x.com"))
            .await;
        assert!(matches!(
            result,
            Err(AccountError::DuplicateAccount {
                field: UniqueField::Email,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_and_rename() {
        let repository = InMemoryAccountRepository::new();
        let mut account = repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();

        account.username = Username::new("alicia".to_string()).unwrap();
        repository.update(account.clone()).await.unwrap();

        let old_name = Username::new("alice".to_string()).unwrap();
        assert_eq!(repository.find_by_username(&old_name).await.unwrap(), None);
        assert_eq!(
            repository.find_by_username(&account.username).await.unwrap(),
            Some(account)
        );
    }

    #[tokio::test]
    async fn test_update_to_taken_username() {
        let repository = InMemoryAccountRepository::new();
        repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();
        let mut bob = repository
            .create(new_account("bob", "bob@x.com"))
            .await
            .unwrap();

        bob.username = Username::new("alice".to_string()).unwrap();
        let result = repository.update(bob).await;

        assert!(matches!(
            result,
            Err(AccountError::DuplicateAccount {
                field: UniqueField::Username,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repository = InMemoryAccountRepository::new();
        let account = repository
            .create(new_account("alice", "alice@x.com"))
            .await
            .unwrap();

        repository.delete(&account.id).await.unwrap();

        assert_eq!(
            repository.find_by_username(&account.username).await.unwrap(),
            None
        );
        assert!(matches!(
            repository.delete(&account.id).await,
            Err(AccountError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_of_same_username() {
        let repository = InMemoryAccountRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .create(new_account("alice", &format!("alice{}@x.com", i)))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AccountError::DuplicateAccount {
                    field: UniqueField::Username,
                    ..
                }) => duplicates += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }
}
