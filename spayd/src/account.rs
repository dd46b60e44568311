use crate::error::ParseError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const CZ_IBAN_LEN: usize = 24;

/// Чешский банковский счёт в обычной записи `prefix-accountNumber/bankCode`.
///
/// Хранит нормализованные части: без пробелов и ведущих нулей (кроме кода банка).
/// Два счёта равны, если равны их нормализованные части, поэтому
/// `000019-02000145399/0800` и `19-2000145399/0800` это один и тот же счёт.
///
/// ```
/// use spayd::CzechBankAccount;
///
/// let from_iban = CzechBankAccount::from_iban("CZ65 0800 0000 1920 0014 5399")?;
/// let parsed: CzechBankAccount = "19-2000145399/0800".parse()?;
/// assert_eq!(from_iban, parsed);
/// assert_eq!(parsed.to_iban(), "CZ6508000000192000145399");
/// # Ok::<(), spayd::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CzechBankAccount {
    prefix: Option<String>,
    account_number: String,
    bank_code: String,
}

impl CzechBankAccount {
    /// Собирает счёт из отдельных частей.
    ///
    /// Префикс до 6 цифр, номер счёта от 2 до 10 цифр, код банка ровно 4 цифры.
    /// Пробелы внутри частей игнорируются.
    pub fn new(
        prefix: Option<&str>,
        account_number: &str,
        bank_code: &str,
    ) -> Result<Self, ParseError> {
        Ok(CzechBankAccount {
            prefix: normalize_prefix(prefix.unwrap_or(""))?,
            account_number: normalize_account_number(account_number)?,
            bank_code: normalize_bank_code(bank_code)?,
        })
    }

    /// Разбирает счёт, закодированный в чешском IBAN.
    ///
    /// Контрольные цифры IBAN не проверяются, только длина и код страны.
    pub fn from_iban(iban: &str) -> Result<Self, ParseError> {
        let sanitized: String = iban.chars().filter(|c| c.is_alphanumeric()).collect();

        // срезы ниже по байтам, поэтому не-ASCII буквы отсекаем сразу
        if !sanitized.is_ascii() || sanitized.len() != CZ_IBAN_LEN || !sanitized.starts_with("CZ") {
            return Err(ParseError::InvalidIban(iban.to_string()));
        }

        let bank_code = &sanitized[4..8];
        let prefix = &sanitized[8..14];
        let account_number = &sanitized[14..24];

        Self::new(Some(prefix), account_number, bank_code)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn bank_code(&self) -> &str {
        &self.bank_code
    }

    /// Чешский IBAN для счёта, с посчитанными контрольными цифрами (ISO 7064, mod 97)
    pub fn to_iban(&self) -> String {
        let bban = format!(
            "{}{:0>6}{:0>10}",
            self.bank_code,
            self.prefix.as_deref().unwrap_or(""),
            self.account_number,
        );
        let check = 98 - mod97(&format!("{bban}CZ00"));

        format!("CZ{check:02}{bban}")
    }
}

/// Остаток от деления на 97 для строки из цифр и латинских букв (A=10 ... Z=35)
fn mod97(s: &str) -> u32 {
    s.chars()
        .filter_map(|c| c.to_digit(36))
        .fold(0, |rem, d| {
            if d < 10 {
                (rem * 10 + d) % 97
            } else {
                (rem * 100 + d) % 97
            }
        })
}

fn strip_spaces(raw: &str) -> String {
    raw.replace(' ', "")
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn normalize_prefix(raw: &str) -> Result<Option<String>, ParseError> {
    let prefix = strip_spaces(raw);
    if !is_digits(&prefix) || prefix.len() > 6 {
        return Err(ParseError::InvalidAccount(format!("bad prefix '{raw}'")));
    }

    // ведущие нули убираем только после проверки длины
    let trimmed = prefix.trim_start_matches('0');
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn normalize_account_number(raw: &str) -> Result<String, ParseError> {
    let number = strip_spaces(raw);

    if !number.is_empty() && number.bytes().all(|b| b == b'0') {
        return Err(ParseError::ZeroAccountNumber);
    }

    if !is_digits(&number) || !(2..=10).contains(&number.len()) {
        return Err(ParseError::InvalidAccount(format!("bad account number '{raw}'")));
    }

    Ok(number.trim_start_matches('0').to_string())
}

fn normalize_bank_code(raw: &str) -> Result<String, ParseError> {
    let code = strip_spaces(raw);
    if !is_digits(&code) || code.len() != 4 {
        return Err(ParseError::InvalidAccount(format!("bad bank code '{raw}'")));
    }

    Ok(code)
}

impl FromStr for CzechBankAccount {
    type Err = ParseError;

    /// Разбирает запись `[prefix-]accountNumber/bankCode`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by_slash: Vec<&str> = s.split('/').collect();
        let [number_part, bank_code] = by_slash[..] else {
            return Err(ParseError::InvalidAccount(format!(
                "expected exactly one '/' in '{s}'"
            )));
        };

        let by_dash: Vec<&str> = number_part.split('-').collect();
        let (prefix, account_number) = match by_dash[..] {
            [account_number] => (None, account_number),
            [prefix, account_number] => (Some(prefix), account_number),
            _ => {
                return Err(ParseError::InvalidAccount(format!(
                    "more than one '-' in '{s}'"
                )));
            }
        };

        Self::new(prefix, account_number, bank_code)
    }
}

impl fmt::Display for CzechBankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}-{}/{}", prefix, self.account_number, self.bank_code),
            None => write!(f, "{}/{}", self.account_number, self.bank_code),
        }
    }
}
