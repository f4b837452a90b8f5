use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::NewAccount;
use crate::account::models::Password;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Shared credential hasher and token handler
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Hash on the blocking pool; Argon2 is deliberately slow.
    async fn hash_password(&self, password: Password) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    fn ensure_owner(principal: &Account, target: &Username) -> Result<(), AccountError> {
        if principal.username == *target {
            Ok(())
        } else {
            tracing::warn!(
                account_id = %principal.id,
                target = %target,
                "Attempt to modify another account"
            );
            Err(AccountError::Forbidden(format!(
                "cannot modify account {}",
                target
            )))
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password).await?;

        let new_account = NewAccount {
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let account = self.repository.create(new_account).await?;
        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            "Account registered"
        );

        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    async fn update_account(
        &self,
        principal: &Account,
        target: &Username,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        Self::ensure_owner(principal, target)?;

        let password_hash = self.hash_password(command.password).await?;

        let account = Account {
            id: principal.id,
            username: command.username,
            email: command.email,
            password_hash,
            created_at: principal.created_at,
        };

        let updated = self.repository.update(account).await?;
        tracing::info!(
            account_id = %updated.id,
            username = %updated.username,
            "Account updated"
        );

        Ok(updated)
    }

    async fn delete_account(
        &self,
        principal: &Account,
        target: &Username,
    ) -> Result<(), AccountError> {
        Self::ensure_owner(principal, target)?;

        self.repository.delete(&principal.id).await?;
        tracing::info!(account_id = %principal.id, "Account deleted");

        Ok(())
    }
}
