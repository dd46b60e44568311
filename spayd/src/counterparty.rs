use crate::account::CzechBankAccount;
use crate::error::ParseError;
use crate::model::Counterparty;
use std::str::FromStr;

/// Разбирает строку вида `IBAN+BIC` или просто `IBAN`.
///
/// `None` на входе это ошибка вызывающего кода ([`ParseError::MissingArgument`]),
/// а не ошибка формата.
pub fn parse_counterparty(raw: Option<&str>) -> Result<Counterparty, ParseError> {
    let raw = raw.ok_or(ParseError::MissingArgument("counterparty"))?;

    let parts: Vec<&str> = raw.split('+').collect();
    if parts.len() > 2 || raw.ends_with('+') {
        return Err(ParseError::InvalidCounterparty(raw.to_string()));
    }

    let iban = parts[0];
    if iban.is_empty() {
        return Err(ParseError::InvalidCounterparty(raw.to_string()));
    }

    Ok(Counterparty {
        iban: iban.to_string(),
        bic: parts.get(1).map(|bic| bic.to_string()),
    })
}

impl FromStr for Counterparty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_counterparty(Some(s))
    }
}

impl Counterparty {
    /// Чешский счёт, закодированный в IBAN получателя
    pub fn czech_account(&self) -> Result<CzechBankAccount, ParseError> {
        CzechBankAccount::from_iban(&self.iban)
    }
}
