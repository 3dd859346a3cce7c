use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{AddressLookup, CompanyRecord};

/// Third-party registries proxied by the backend. Inputs are digits only.
#[async_trait]
pub trait LookupPort: Send + Sync {
    async fn address_by_cep(&self, cep: &str) -> Result<AddressLookup, ApiError>;

    async fn company_by_cnpj(&self, cnpj: &str) -> Result<CompanyRecord, ApiError>;
}
