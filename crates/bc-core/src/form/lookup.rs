//! Length-triggered external lookups (CEP → address, CNPJ → company).
//!
//! The trigger only decides *whether* a lookup should fire for the current
//! input; debouncing and the request itself live in the application layer.

use super::rules::{digits_only, CEP_DIGITS, CNPJ_DIGITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Cep,
    Cnpj,
}

impl LookupKind {
    pub fn expected_digits(self) -> usize {
        match self {
            LookupKind::Cep => CEP_DIGITS,
            LookupKind::Cnpj => CNPJ_DIGITS,
        }
    }
}

/// Fires once per distinct complete value.
///
/// [`observe`](Self::observe) only proposes a query; the value counts as
/// looked up once the caller [`commit`](Self::commit)s it.
#[derive(Debug, Clone)]
pub struct LookupTrigger {
    kind: LookupKind,
    last_fired: Option<String>,
}

impl LookupTrigger {
    pub fn new(kind: LookupKind) -> Self {
        Self {
            kind,
            last_fired: None,
        }
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// Feed the raw field content; returns the normalized query when a
    /// lookup should start.
    pub fn observe(&mut self, raw: &str) -> Option<String> {
        let digits = digits_only(raw);
        if digits.len() != self.kind.expected_digits() {
            // Editing away from a complete value allows the same value to fire again.
            self.last_fired = None;
            return None;
        }
        if self.last_fired.as_deref() == Some(digits.as_str()) {
            return None;
        }
        Some(digits)
    }

    /// Record `digits` as looked up; `observe` skips it until the input changes.
    pub fn commit(&mut self, digits: &str) {
        self.last_fired = Some(digits.to_string());
    }

    /// Forget the last fired value, e.g. after a failed lookup so the user
    /// can retry by retyping.
    pub fn rearm(&mut self) {
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_when_cep_is_complete() {
        let mut trigger = LookupTrigger::new(LookupKind::Cep);
        assert_eq!(trigger.observe("50030-2"), None);
        assert_eq!(trigger.observe("50030-23"), None);
        assert_eq!(trigger.observe("50030-230"), Some("50030230".to_string()));
    }

    #[test]
    fn same_value_fires_once_until_edited() {
        let mut trigger = LookupTrigger::new(LookupKind::Cep);
        let digits = trigger.observe("50030230").unwrap();
        trigger.commit(&digits);
        assert!(trigger.observe("50030-230").is_none());
        assert!(trigger.observe("5003023").is_none());
        assert!(trigger.observe("50030230").is_some());
    }

    #[test]
    fn uncommitted_value_is_proposed_again() {
        let mut trigger = LookupTrigger::new(LookupKind::Cep);
        assert!(trigger.observe("50030230").is_some());
        assert_eq!(trigger.observe("50030-230").as_deref(), Some("50030230"));
    }

    #[test]
    fn overlong_input_rearms_the_value() {
        let mut trigger = LookupTrigger::new(LookupKind::Cep);
        let digits = trigger.observe("50030230").unwrap();
        trigger.commit(&digits);
        assert!(trigger.observe("500302301").is_none());
        assert!(trigger.observe("50030230").is_some());
    }

    #[test]
    fn cnpj_needs_fourteen_digits() {
        let mut trigger = LookupTrigger::new(LookupKind::Cnpj);
        assert!(trigger.observe("11.222.333/0001-8").is_none());
        assert_eq!(
            trigger.observe("11.222.333/0001-81").as_deref(),
            Some("11222333000181")
        );
    }

    #[test]
    fn rearm_allows_retry() {
        let mut trigger = LookupTrigger::new(LookupKind::Cep);
        let digits = trigger.observe("50030230").unwrap();
        trigger.commit(&digits);
        assert!(trigger.observe("50030230").is_none());
        trigger.rearm();
        assert!(trigger.observe("50030230").is_some());
    }
}
