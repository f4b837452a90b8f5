use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateAccountCommand;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateAccount` - Username or email is already taken
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Retrieve every account.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Replace username, email and password of the principal's own account.
    ///
    /// # Arguments
    /// * `principal` - Authenticated account performing the update
    /// * `target` - Username named by the request
    /// * `command` - New field values
    ///
    /// # Returns
    /// Updated account entity
    ///
    /// # Errors
    /// * `Forbidden` - `target` is not the principal's username
    /// * `NotFound` - Account vanished before the update
    /// * `DuplicateAccount` - New username or email is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        principal: &Account,
        target: &Username,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;

    /// Delete the principal's own account.
    ///
    /// # Errors
    /// * `Forbidden` - `target` is not the principal's username
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, principal: &Account, target: &Username)
        -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Implementations enforce username and email uniqueness themselves.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account and assign its identifier.
    ///
    /// # Errors
    /// * `DuplicateAccount` - Username or email is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts ordered by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Update existing account in storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DuplicateAccount` - New username or email is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Remove account from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
