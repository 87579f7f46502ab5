//! # Client Module
//!
//! The owner of an account: a name and a validated CPF.

use crate::cpf;
use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Bank client.
///
/// Immutable once built. Two clients are equal when their tax IDs are equal,
/// whatever their names.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    name: String,
    tax_id: String,
}

impl Client {
    /// Validate and build a client.
    ///
    /// The name is trimmed and the tax ID is stored digits-only.
    pub fn new(name: &str, tax_id: &str) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("Name must not be blank"));
        }
        if !cpf::is_valid(tax_id) {
            return Err(CoreError::invalid(format!("CPF is invalid: {}", tax_id)));
        }

        Ok(Self {
            name: name.to_string(),
            tax_id: cpf::normalize(tax_id),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized tax ID (11 digits)
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    /// Tax ID as `XXX.XXX.XXX-XX`
    pub fn formatted_tax_id(&self) -> String {
        cpf::format(&self.tax_id)
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.tax_id == other.tax_id
    }
}

impl Eq for Client {}

impl Hash for Client {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tax_id.hash(state);
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.formatted_tax_id())
    }
}
