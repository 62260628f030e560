// Default value functions

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    5000
}

pub fn default_workers() -> usize {
    0 // 0 = one worker per CPU
}

pub fn default_ui_path() -> Option<String> {
    None // Static UI disabled by default; set to a path like "./public" to enable
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_quiet_targets() -> Vec<String> {
    ["actix_server", "actix_http", "actix_web", "mio", "rusqlite"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

pub fn default_max_body_size() -> usize {
    1048576 // 1MB
}

pub fn default_statement_timeout_ms() -> u64 {
    5000
}

pub fn default_denied_keywords() -> Vec<String> {
    vec![
        "drop".to_string(),
        "delete".to_string(),
        "truncate".to_string(),
        "alter table".to_string(),
        "pragma writable_schema".to_string(),
    ]
}

// Seed defaults
pub fn default_seed_users() -> u32 {
    50
}

pub fn default_seed_products() -> u32 {
    100
}

pub fn default_seed_employees() -> u32 {
    50
}

pub fn default_seed_orders() -> u32 {
    200
}

pub fn default_seed_max_items_per_order() -> u32 {
    5
}

// CORS defaults
pub fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn default_cors_max_age() -> u64 {
    3600 // 1 hour
}
