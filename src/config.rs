use std::env;

/// Process-wide configuration, read from the environment exactly once at
/// startup. `JWT_SECRET` and `DATABASE_URL` are required; everything else
/// has a local-development default.
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Origin allowed by the CORS layer. When unset, any origin is accepted
    /// (local development).
    pub allowed_origin: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            allowed_origin: env::var("ALLOWED_ORIGIN").ok(),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
