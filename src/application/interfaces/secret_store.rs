/// Opaque key/value lookup for credentials.
pub trait SecretStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Secret key holding the Groq API credential.
pub const GROQ_API_KEY_SECRET: &str = "groq_api_key";
