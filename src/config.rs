#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: std::net::IpAddr,
    pub port: u16,
    pub log_level: String,
    pub token: TokenConfig,
    pub hashing: HashingConfig,
    pub bootstrap_admin: Option<AdminBootstrap>,
}

/// Signing secret, issuer/audience identifiers, and token lifetime.
/// Deployment configuration, held only by this service.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub lifetime_secs: i64,
}

/// Argon2id work factor. Raising these does not invalidate stored hashes;
/// verification reads its parameters from the hash itself.
#[derive(Debug, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: std::net::IpAddr = env_or("ARCHIVISTA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ARCHIVISTA_HOST: {e}"))?;

        let port: u16 = env_or("ARCHIVISTA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ARCHIVISTA_PORT: {e}"))?;

        let log_level = env_or("ARCHIVISTA_LOG_LEVEL", "info");

        let token = TokenConfig {
            secret: env_required("ARCHIVISTA_JWT_SECRET")?,
            issuer: env_or("ARCHIVISTA_JWT_ISSUER", "archivista"),
            audience: env_or("ARCHIVISTA_JWT_AUDIENCE", "archivista-client"),
            lifetime_secs: env_or("ARCHIVISTA_TOKEN_LIFETIME_SECS", "3600")
                .parse()
                .map_err(|e| format!("Invalid ARCHIVISTA_TOKEN_LIFETIME_SECS: {e}"))?,
        };

        let hashing = HashingConfig {
            memory_kib: env_or("ARCHIVISTA_ARGON2_MEMORY_KIB", "19456")
                .parse()
                .map_err(|e| format!("Invalid ARCHIVISTA_ARGON2_MEMORY_KIB: {e}"))?,
            iterations: env_or("ARCHIVISTA_ARGON2_ITERATIONS", "2")
                .parse()
                .map_err(|e| format!("Invalid ARCHIVISTA_ARGON2_ITERATIONS: {e}"))?,
            parallelism: env_or("ARCHIVISTA_ARGON2_PARALLELISM", "1")
                .parse()
                .map_err(|e| format!("Invalid ARCHIVISTA_ARGON2_PARALLELISM: {e}"))?,
        };

        let bootstrap_admin = match (
            std::env::var("ARCHIVISTA_ADMIN_EMAIL").ok(),
            std::env::var("ARCHIVISTA_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                username: env_or("ARCHIVISTA_ADMIN_USERNAME", "admin"),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            token,
            hashing,
            bootstrap_admin,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
