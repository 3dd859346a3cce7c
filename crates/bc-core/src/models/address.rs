use serde::{Deserialize, Serialize};

/// Brazilian postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter UF code.
    pub state: String,
}

/// Partial address returned by a CEP lookup. Number and complement are never
/// known by the postal service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookup {
    pub cep: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
}

/// Company registry entry returned by a CNPJ lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub cnpj: String,
    pub legal_name: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    /// Registry status; only active companies may sign up.
    pub active: bool,
    #[serde(default)]
    pub address: Option<AddressLookup>,
}

impl CompanyRecord {
    /// Name shown to adopters: trade name when present.
    pub fn display_name(&self) -> &str {
        self.trade_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.legal_name)
    }
}
