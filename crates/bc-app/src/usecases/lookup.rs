//! Debounced CEP / CNPJ autofill.
//!
//! Each keystroke is observed by a [`LookupTrigger`]; once the input holds a
//! complete, new value the lookup waits for the debounce window and is
//! dropped if a newer keystroke arrived meanwhile. A value is committed to
//! the trigger only when its lookup actually starts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use bc_core::error::ApiError;
use bc_core::form::{Draft, FormField, LookupKind, LookupTrigger};
use bc_core::models::{AddressLookup, CompanyRecord};
use bc_core::ports::LookupPort;

pub const MSG_CEP_NOT_FOUND: &str = "CEP não encontrado.";
pub const MSG_CNPJ_NOT_FOUND: &str = "CNPJ não encontrado.";
pub const MSG_CNPJ_INACTIVE: &str = "Este CNPJ não está ativo na Receita Federal.";

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<F: FormField> {
    /// Input incomplete or unchanged since the last lookup.
    Skipped,
    /// A newer keystroke took over while waiting.
    Superseded,
    /// Values to merge into the draft.
    Filled(Draft<F>),
    /// The registry answered but the value cannot be used.
    Rejected { field: F, message: &'static str },
}

/// Latest-wins delay. Every call takes a ticket; only the newest ticket is
/// still current when its sleep ends.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            latest: AtomicU64::new(0),
        }
    }

    /// `true` when no newer call arrived during the window.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Invalidate any pending call.
    pub fn supersede(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

struct LookupChannel {
    trigger: Mutex<LookupTrigger>,
    debouncer: Debouncer,
}

impl LookupChannel {
    fn new(kind: LookupKind, window: Duration) -> Self {
        Self {
            trigger: Mutex::new(LookupTrigger::new(kind)),
            debouncer: Debouncer::new(window),
        }
    }

    /// Digits to look up, once the debounce settles.
    async fn ready(&self, raw: &str) -> Result<String, bool> {
        let fired = self.trigger.lock().await.observe(raw);
        match fired {
            Some(digits) => {
                if !self.debouncer.settle().await {
                    return Err(true);
                }
                self.trigger.lock().await.commit(&digits);
                Ok(digits)
            }
            None => {
                // incomplete input cancels a pending lookup
                self.debouncer.supersede();
                Err(false)
            }
        }
    }

    async fn rearm(&self) {
        self.trigger.lock().await.rearm();
    }
}

pub struct LookupAutofill {
    lookup: Arc<dyn LookupPort>,
    cep: LookupChannel,
    cnpj: LookupChannel,
}

impl LookupAutofill {
    pub fn new(lookup: Arc<dyn LookupPort>, debounce: Duration) -> Self {
        Self {
            lookup,
            cep: LookupChannel::new(LookupKind::Cep, debounce),
            cnpj: LookupChannel::new(LookupKind::Cnpj, debounce),
        }
    }

    /// Feed the raw CEP input; `patch` maps the found address onto the
    /// caller's form.
    pub async fn on_cep_input<F: FormField>(
        &self,
        raw: &str,
        field: F,
        patch: fn(&AddressLookup) -> Draft<F>,
    ) -> Result<LookupOutcome<F>, ApiError> {
        let cep = match self.cep.ready(raw).await {
            Ok(cep) => cep,
            Err(superseded) => return Ok(skipped(superseded)),
        };
        debug!(%cep, "looking up address");
        match self.lookup.address_by_cep(&cep).await {
            Ok(address) => Ok(LookupOutcome::Filled(patch(&address))),
            Err(err) if err.status_code() == Some(404) => Ok(LookupOutcome::Rejected {
                field,
                message: MSG_CEP_NOT_FOUND,
            }),
            Err(err) => {
                warn!(error = %err, "address lookup failed");
                self.cep.rearm().await;
                Err(err)
            }
        }
    }

    /// Feed the raw CNPJ input. Inactive companies are rejected on `field`.
    pub async fn on_cnpj_input<F: FormField>(
        &self,
        raw: &str,
        field: F,
        patch: fn(&CompanyRecord) -> Draft<F>,
    ) -> Result<LookupOutcome<F>, ApiError> {
        let cnpj = match self.cnpj.ready(raw).await {
            Ok(cnpj) => cnpj,
            Err(superseded) => return Ok(skipped(superseded)),
        };
        debug!(%cnpj, "looking up company");
        match self.lookup.company_by_cnpj(&cnpj).await {
            Ok(record) if !record.active => Ok(LookupOutcome::Rejected {
                field,
                message: MSG_CNPJ_INACTIVE,
            }),
            Ok(record) => Ok(LookupOutcome::Filled(patch(&record))),
            Err(err) if err.status_code() == Some(404) => Ok(LookupOutcome::Rejected {
                field,
                message: MSG_CNPJ_NOT_FOUND,
            }),
            Err(err) => {
                warn!(error = %err, "company lookup failed");
                self.cnpj.rearm().await;
                Err(err)
            }
        }
    }
}

fn skipped<F: FormField>(superseded: bool) -> LookupOutcome<F> {
    if superseded {
        LookupOutcome::Superseded
    } else {
        LookupOutcome::Skipped
    }
}
