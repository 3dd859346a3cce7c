//! Format predicates used by the field validators.
//!
//! All predicates accept the raw user input; punctuation in documents, CEPs
//! and phone numbers is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

static MASKED_CEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("cep regex is valid"));

pub const CEP_DIGITS: usize = 8;
pub const CPF_DIGITS: usize = 11;
pub const CNPJ_DIGITS: usize = 14;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Brazilian federative units accepted in addresses.
pub const STATES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw.trim())
}

pub fn is_valid_cep(raw: &str) -> bool {
    MASKED_CEP_RE.is_match(raw.trim())
}

/// Landline (10 digits) or mobile (11 digits) with area code.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = digits_only(raw);
    matches!(digits.len(), 10 | 11) && !digits.starts_with('0')
}

pub fn is_valid_state(raw: &str) -> bool {
    let upper = raw.trim().to_ascii_uppercase();
    STATES.contains(&upper.as_str())
}

pub fn is_valid_cpf(raw: &str) -> bool {
    let digits = to_digit_vec(raw);
    if digits.len() != CPF_DIGITS || all_equal(&digits) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rest = sum * 10 % 11;
        if rest == 10 {
            0
        } else {
            rest
        }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

pub fn is_valid_cnpj(raw: &str) -> bool {
    const FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let digits = to_digit_vec(raw);
    if digits.len() != CNPJ_DIGITS || all_equal(&digits) {
        return false;
    }

    let check = |weights: &[u32]| -> u32 {
        let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
        match sum % 11 {
            rest if rest < 2 => 0,
            rest => 11 - rest,
        }
    };

    check(&FIRST) == digits[12] && check(&SECOND) == digits[13]
}

fn to_digit_vec(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_equal(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}
