use serde::{Deserialize, Serialize};

/// Error body PostgREST attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgrestErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// API key record returned by the `get_api_keys` remote procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: String,
    pub key_name: String,
    pub api_key: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct KeyNameArgs<'a> {
    pub p_key_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct KeyIdArgs<'a> {
    pub p_key_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AdminCredentialArgs<'a> {
    pub p_username: &'a str,
    pub p_password: &'a str,
}

/// One row of the `verify_admin_login` result set.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRow {
    pub admin_id: String,
    pub success: bool,
}
