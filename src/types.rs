//! Shared types used across the pages

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Calendar month selected for the finance summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSelection {
    pub year: i32,
    pub month: u32,
}

impl MonthSelection {
    pub fn new(year: i32, month: u32) -> ClientResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ClientError::validation(format!("Mês inválido: {}", month)));
        }
        if !(1900..=9999).contains(&year) {
            return Err(ClientError::validation(format!("Ano inválido: {}", year)));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }
}

/// Trimmed, non-empty text field
pub fn required(field: &str, value: &str) -> ClientResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::validation(format!("O campo {} é obrigatório.", field)));
    }
    Ok(value.to_string())
}

/// Password plus its confirmation must agree before anything is sent
pub fn matching_passwords(password: &str, confirmation: &str) -> ClientResult<()> {
    if password.is_empty() {
        return Err(ClientError::validation("A senha não pode ser vazia."));
    }
    if password != confirmation {
        return Err(ClientError::validation("As senhas não coincidem."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds() {
        assert!(MonthSelection::new(2024, 0).is_err());
        assert!(MonthSelection::new(2024, 13).is_err());
        assert_eq!(
            MonthSelection::new(2024, 2).unwrap(),
            MonthSelection { year: 2024, month: 2 }
        );
    }

    #[test]
    fn required_trims() {
        assert_eq!(required("título", "  Viagem ").unwrap(), "Viagem");
        assert!(required("título", "   ").is_err());
    }

    #[test]
    fn password_confirmation() {
        assert!(matching_passwords("abc123", "abc123").is_ok());
        assert!(matching_passwords("abc123", "abc124").is_err());
        assert!(matching_passwords("", "").is_err());
    }
}
