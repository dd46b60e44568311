use crate::error::ParseError;
use crate::model::{NotificationType, PaymentFrequency, PaymentType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Сумма платежа: десятичное число с точкой, неотрицательное.
///
/// Запятая допускается только как разделитель тысяч в целой части (`1,000.50`).
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ParseError> {
    if !raw
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b',' | b'+' | b'-'))
    {
        return Err(ParseError::InvalidAmount(format!("unexpected character in amount: {raw}")));
    }

    let cleaned = match raw.split_once('.') {
        Some((_, frac)) if frac.contains(',') => {
            return Err(ParseError::InvalidAmount(format!(
                "thousands separator in fractional part: {raw}"
            )));
        }
        Some((int, frac)) => format!("{}.{frac}", int.replace(',', "")),
        None => raw.replace(',', ""),
    };

    let value = Decimal::from_str(&cleaned)
        .map_err(|e| ParseError::InvalidAmount(format!("{raw}: {e}")))?;

    if value < Decimal::ZERO {
        return Err(ParseError::InvalidAmount(format!(
            "only non-negative amounts are allowed: {raw}"
        )));
    }

    Ok(value)
}

/// Код валюты: ровно 3 символа, по списку ISO 4217 не проверяется
pub(crate) fn parse_currency_code(raw: &str) -> Result<String, ParseError> {
    if raw.chars().count() != 3 {
        return Err(ParseError::InvalidCurrency(raw.to_string()));
    }

    Ok(raw.to_string())
}

pub(crate) fn parse_numeric_string(raw: &str) -> Result<String, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumericString(raw.to_string()));
    }

    Ok(raw.to_string())
}

pub(crate) fn parse_number(raw: &str) -> Result<i32, ParseError> {
    Ok(raw.parse()?)
}

/// Дата строго в формате YYYYMMDD
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidDate(raw.to_string()));
    }

    // длина и цифры проверены выше, срезы по байтам безопасны
    let yyyy: i32 = raw[0..4]
        .parse()
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))?;
    let mm: u32 = raw[4..6]
        .parse()
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))?;
    let dd: u32 = raw[6..8]
        .parse()
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))?;

    NaiveDate::from_ymd_opt(yyyy, mm, dd).ok_or_else(|| ParseError::InvalidDate(raw.to_string()))
}

pub(crate) fn parse_payment_type(raw: &str) -> Result<PaymentType, ParseError> {
    match raw {
        "IP" => Ok(PaymentType::InstantPayment),
        other => Err(ParseError::InvalidPaymentType(other.to_string())),
    }
}

pub(crate) fn parse_notification_type(raw: &str) -> Result<NotificationType, ParseError> {
    match raw {
        "P" => Ok(NotificationType::Phone),
        "E" => Ok(NotificationType::Email),
        other => Err(ParseError::InvalidNotificationType(other.to_string())),
    }
}

pub(crate) fn parse_payment_frequency(raw: &str) -> Result<PaymentFrequency, ParseError> {
    match raw {
        "1D" => Ok(PaymentFrequency::Daily),
        "1M" => Ok(PaymentFrequency::Monthly),
        "3M" => Ok(PaymentFrequency::Quarterly),
        "6M" => Ok(PaymentFrequency::HalfYearly),
        "1Y" => Ok(PaymentFrequency::Yearly),
        other => Err(ParseError::InvalidFrequency(other.to_string())),
    }
}

pub(crate) fn parse_boolean(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(ParseError::InvalidBoolean(other.to_string())),
    }
}

/// Текстовое поле: '+' становится пробелом, %XX раскодируется,
/// остальное (в т.ч. UTF-8) остаётся как есть.
///
/// Никогда не падает: битые последовательности остаются в тексте,
/// невалидный UTF-8 заменяется на U+FFFD.
pub(crate) fn parse_text(raw: &str) -> String {
    // '+' заменяем до раскодирования, чтобы %2B остался плюсом
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
