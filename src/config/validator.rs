//! Registry validation: identifier safety and internal consistency.

use crate::config::registry::{EntityDef, SYSTEM_COLUMNS};
use crate::error::ConfigError;
use std::collections::HashSet;

/// Plain lower-case SQL identifier: `[a-z_][a-z0-9_]*`.
pub fn is_safe_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn is_safe_type(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
}

pub fn validate(entities: &[EntityDef]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for e in entities {
        if !names.insert(e.name) {
            return Err(ConfigError::Registry(format!("duplicate entity name: {}", e.name)));
        }
        if !is_safe_identifier(e.table) {
            return Err(ConfigError::Registry(format!("unsafe table name: {}", e.table)));
        }
        if e.fields.is_empty() {
            return Err(ConfigError::Registry(format!("{}: no writable fields", e.name)));
        }
        if e.operations.is_empty() {
            return Err(ConfigError::Registry(format!("{}: no operations", e.name)));
        }

        let mut fields = HashSet::new();
        for f in e.fields {
            if !is_safe_identifier(f.name) || !is_safe_type(f.sql_type) {
                return Err(ConfigError::Registry(format!("{}: unsafe field {}", e.name, f.name)));
            }
            if SYSTEM_COLUMNS.contains(&f.name) {
                return Err(ConfigError::Registry(format!(
                    "{}: system column {} cannot be writable",
                    e.name, f.name
                )));
            }
            if !fields.insert(f.name) {
                return Err(ConfigError::Registry(format!("{}: duplicate field {}", e.name, f.name)));
            }
        }

        let known = |c: &str| fields.contains(c) || SYSTEM_COLUMNS.contains(&c);
        if !known(e.order_by.column) {
            return Err(ConfigError::Registry(format!(
                "{}: order column {} does not exist",
                e.name, e.order_by.column
            )));
        }
        if let Some(col) = e.public_requires {
            if !known(col) {
                return Err(ConfigError::Registry(format!(
                    "{}: public filter column {} does not exist",
                    e.name, col
                )));
            }
        }
    }
    Ok(())
}
