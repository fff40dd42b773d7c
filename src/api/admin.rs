use super::error::StoreError;
use super::supabase::client::SupabaseStore;
use super::supabase::types::{AdminCredentialArgs, AdminLoginRow, ApiKeyRecord, KeyIdArgs, KeyNameArgs};

/// Typed wrappers over the backend's admin remote procedures. Credential
/// checks and key generation run server-side; this surface only shapes the
/// calls and results.
pub struct AdminApi {
    store: SupabaseStore,
}

impl AdminApi {
    pub fn new(store: SupabaseStore) -> Self {
        Self { store }
    }

    /// Generates a new API key under the given label, returning the key text.
    pub async fn generate_api_key(&self, key_name: &str) -> Result<String, StoreError> {
        self.store
            .rpc("generate_api_key", &KeyNameArgs { p_key_name: key_name })
            .await
    }

    pub async fn get_api_keys(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        self.store.rpc("get_api_keys", &serde_json::json!({})).await
    }

    /// Flips the key's active flag, returning the new state.
    pub async fn toggle_api_key(&self, key_id: &str) -> Result<bool, StoreError> {
        self.store
            .rpc("toggle_api_key", &KeyIdArgs { p_key_id: key_id })
            .await
    }

    pub async fn delete_api_key(&self, key_id: &str) -> Result<bool, StoreError> {
        self.store
            .rpc("delete_api_key", &KeyIdArgs { p_key_id: key_id })
            .await
    }

    /// Checks the credentials against the backend's admin table. Returns the
    /// admin id on success, None on a wrong username or password.
    pub async fn verify_admin_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, StoreError> {
        let rows: Vec<AdminLoginRow> = self
            .store
            .rpc(
                "verify_admin_login",
                &AdminCredentialArgs { p_username: username, p_password: password },
            )
            .await?;

        Ok(rows
            .into_iter()
            .find(|row| row.success)
            .map(|row| row.admin_id))
    }

    /// First-run setup. The backend rejects the call once an admin exists.
    pub async fn create_admin_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, StoreError> {
        self.store
            .rpc(
                "create_admin_user",
                &AdminCredentialArgs { p_username: username, p_password: password },
            )
            .await
    }
}
