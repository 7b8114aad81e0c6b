/// The distinguished username with full management rights.
pub const ADMIN_USERNAME: &str = "admin";

/// Password seeded for the admin account on first run.
pub(super) const ADMIN_SEED_PASSWORD: &str = "admin123";

pub trait CredentialRepository {
    /// Exact string match against the stored password. No hashing, no lockout.
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = anyhow::Result<bool>>;
    /// Insert or overwrite a credential, then persist the full mapping.
    fn upsert_credential(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = anyhow::Result<()>>;
    /// All known usernames, sorted.
    fn get_usernames(&self) -> impl Future<Output = anyhow::Result<Vec<String>>>;
}
