mod attributes;

use crate::counterparty::parse_counterparty;
use crate::error::ParseError;
use crate::fields::*;
use crate::model::{Counterparty, ShortPaymentDescriptor};
use log::{debug, trace};
use std::str::FromStr;

pub use attributes::SpaydAttributes;

/// Единственный поддерживаемый заголовок
pub const SPD_HEADER: &str = "SPD*1.0*";
const SCD_PREFIX: &str = "SCD*";
const SPD_PREFIX: &str = "SPD*";

// ключи, которые разбирает TryFrom ниже
const KNOWN_KEYS: [&str; 21] = [
    "ACC", "ALT-ACC", "AM", "CC", "RF", "RN", "DT", "PT", "MSG", "NT", "NTA", "DL", "FRQ", "DH",
    "X-PER", "X-VS", "X-SS", "X-KS", "X-ID", "X-URL", "X-SELF",
];

/// Проверяет заголовок и возвращает всё, что после него
fn strip_header(input: &str) -> Result<&str, ParseError> {
    if let Some(body) = input.strip_prefix(SPD_HEADER) {
        return Ok(body);
    }

    // инкасо (SCD) вместо платежа
    if input.starts_with(SCD_PREFIX) {
        return Err(ParseError::CollectionDescriptor);
    }

    if input.starts_with(SPD_PREFIX) {
        let header: String = input.split('*').take(2).collect::<Vec<_>>().join("*");
        return Err(ParseError::UnsupportedVersion(header));
    }

    Err(ParseError::UnrecognizedDescriptor)
}

/// Декодирует необязательный атрибут, привязывая ошибку к ключу
fn decode<T>(
    attrs: &SpaydAttributes,
    key: &'static str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    let Some(raw) = attrs.get(key) else {
        return Ok(None);
    };

    trace!("decoding {key}: {raw}");
    parse(raw).map(Some).map_err(|e| e.in_field(key))
}

fn decode_text(attrs: &SpaydAttributes, key: &'static str) -> Option<String> {
    attrs.get(key).map(parse_text)
}

fn parse_alternative_counterparties(raw: &str) -> Result<Vec<Counterparty>, ParseError> {
    raw.split(',').map(Counterparty::from_str).collect()
}

impl ShortPaymentDescriptor {
    /// Разбирает строку SPD (обычно из QR-кода) целиком.
    ///
    /// Любая ошибка в любом атрибуте прерывает разбор, частичного результата нет.
    /// Неизвестные ключи пропускаются.
    ///
    /// ```
    /// use spayd::{ShortPaymentDescriptor, PaymentFrequency};
    ///
    /// let spd = ShortPaymentDescriptor::parse(
    ///     "SPD*1.0*ACC:CZ3301000000000002970297*AM:555.55*CC:CZK*FRQ:1M*DT:20210430*DL:20230430",
    /// )?;
    /// assert_eq!(spd.payment_frequency, PaymentFrequency::Monthly);
    /// assert!(spd.is_standing_order());
    /// # Ok::<(), spayd::ParseError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let body = strip_header(input)?;
        let attrs = SpaydAttributes::tokenize(body)?;
        Self::try_from(attrs)
    }
}

impl FromStr for ShortPaymentDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<SpaydAttributes> for ShortPaymentDescriptor {
    type Error = ParseError;

    fn try_from(attrs: SpaydAttributes) -> Result<Self, Self::Error> {
        let acc = attrs.get("ACC").ok_or(ParseError::MissingField("ACC"))?;
        let counterparty = parse_counterparty(Some(acc)).map_err(|e| e.in_field("ACC"))?;

        for key in attrs.keys().filter(|k| !KNOWN_KEYS.contains(k)) {
            debug!("skipped unknown SPD attribute {key}");
        }

        let mut spd = ShortPaymentDescriptor::new(counterparty);

        spd.alternative_counterparties =
            decode(&attrs, "ALT-ACC", parse_alternative_counterparties)?.unwrap_or_default();
        spd.amount = decode(&attrs, "AM", parse_amount)?;
        spd.currency = decode(&attrs, "CC", parse_currency_code)?;
        spd.creditor_reference = decode(&attrs, "RF", parse_numeric_string)?;
        spd.creditor_name = decode_text(&attrs, "RN");
        spd.due_date = decode(&attrs, "DT", parse_date)?;
        spd.payment_type = decode(&attrs, "PT", parse_payment_type)?.unwrap_or_default();
        spd.message = decode_text(&attrs, "MSG");
        spd.notification_type =
            decode(&attrs, "NT", parse_notification_type)?.unwrap_or_default();
        spd.notification_address = decode_text(&attrs, "NTA");
        spd.standing_order_expiry_date = decode(&attrs, "DL", parse_date)?;
        spd.payment_frequency = decode(&attrs, "FRQ", parse_payment_frequency)?.unwrap_or_default();
        spd.keep_executing_after_death = decode(&attrs, "DH", parse_boolean)?;
        spd.retry_count_limit = decode(&attrs, "X-PER", parse_number)?;
        spd.variable_symbol = decode(&attrs, "X-VS", parse_numeric_string)?;
        spd.specific_symbol = decode(&attrs, "X-SS", parse_numeric_string)?;
        spd.constant_symbol = decode(&attrs, "X-KS", parse_numeric_string)?;
        spd.payer_internal_payment_identifier = decode_text(&attrs, "X-ID");
        spd.url = decode_text(&attrs, "X-URL");
        spd.note_to_self = decode_text(&attrs, "X-SELF");

        // FRQ/DL/DT между собой не сверяем, только сообщаем о смене смысла DT и MSG
        if spd.is_standing_order() {
            debug!(
                "FRQ:{} present, DT is the first standing order payment and MSG is its name",
                spd.payment_frequency
            );
        }

        Ok(spd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{NotificationType, PaymentFrequency, PaymentType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    const ACC: &str = "SPD*1.0*ACC:CZ3301000000000002970297";

    fn parse(tail: &str) -> Result<ShortPaymentDescriptor, ParseError> {
        ShortPaymentDescriptor::parse(&format!("{ACC}{tail}"))
    }

    // strip_header

    #[test]
    fn strip_header_returns_body() {
        assert_eq!(strip_header("SPD*1.0*ACC:X").unwrap(), "ACC:X");
        assert_eq!(strip_header("SPD*1.0*").unwrap(), "");
    }

    #[test]
    fn strip_header_classifies_failures() {
        assert!(matches!(strip_header("SCD*1.0*ACC:X"), Err(ParseError::CollectionDescriptor)));
        assert!(matches!(
            strip_header("SPD*2.0*ACC:X"),
            Err(ParseError::UnsupportedVersion(ref h)) if h == "SPD*2.0"
        ));
        assert!(matches!(strip_header("SPD*1.0"), Err(ParseError::UnsupportedVersion(_))));
        assert!(matches!(strip_header("8594001234567"), Err(ParseError::UnrecognizedDescriptor)));
        assert!(matches!(strip_header(""), Err(ParseError::UnrecognizedDescriptor)));
        assert!(matches!(strip_header("spd*1.0*ACC:X"), Err(ParseError::UnrecognizedDescriptor)));
    }

    // parse

    #[test]
    fn minimal_descriptor_has_defaults() {
        let spd = parse("").unwrap();
        assert_eq!(spd.counterparty.iban, "CZ3301000000000002970297");
        assert_eq!(
            spd,
            ShortPaymentDescriptor::new(Counterparty {
                iban: "CZ3301000000000002970297".into(),
                bic: None,
            })
        );
    }

    #[test]
    fn missing_acc_fails() {
        let err = ShortPaymentDescriptor::parse("SPD*1.0*AM:100*CC:CZK").unwrap_err();
        assert!(matches!(err, ParseError::MissingField("ACC")));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn bad_acc_is_reported_with_key() {
        let err = ShortPaymentDescriptor::parse("SPD*1.0*ACC:+RZBCCZPP").unwrap_err();
        assert!(matches!(err, ParseError::Field { key: "ACC", .. }));
        assert!(matches!(err.root(), ParseError::InvalidCounterparty(_)));
    }

    #[test]
    fn parses_every_known_field() {
        let spd = parse(
            "+RZBCCZPP*ALT-ACC:CZ5855000000001265098001+RZBCCZPP,CZ6508000000192000145399\
             *AM:480.50*CC:EUR*RF:1234*RN:PETR%20DVORAK*DT:20250809*PT:IP*MSG:Hi\
             *NT:E*NTA:frantisek.koudelka%40abc.cz*DL:20260809*FRQ:1Y*DH:1*X-PER:7\
             *X-VS:1*X-SS:2*X-KS:0308*X-ID:ABC123*X-URL:HTTP://WWW.SOMEURL.COM*X-SELF:note",
        )
        .unwrap();

        assert_eq!(spd.counterparty.bic.as_deref(), Some("RZBCCZPP"));
        assert_eq!(spd.alternative_counterparties.len(), 2);
        assert_eq!(spd.alternative_counterparties[0].bic.as_deref(), Some("RZBCCZPP"));
        assert_eq!(spd.alternative_counterparties[1].iban, "CZ6508000000192000145399");
        assert!(spd.alternative_counterparties[1].bic.is_none());
        assert_eq!(spd.amount, Some(Decimal::new(48050, 2)));
        assert_eq!(spd.currency.as_deref(), Some("EUR"));
        assert_eq!(spd.creditor_reference.as_deref(), Some("1234"));
        assert_eq!(spd.creditor_name.as_deref(), Some("PETR DVORAK"));
        assert_eq!(spd.due_date, NaiveDate::from_ymd_opt(2025, 8, 9));
        assert_eq!(spd.payment_type, PaymentType::InstantPayment);
        assert_eq!(spd.message.as_deref(), Some("Hi"));
        assert_eq!(spd.notification_type, NotificationType::Email);
        assert_eq!(spd.notification_address.as_deref(), Some("frantisek.koudelka@abc.cz"));
        assert_eq!(spd.standing_order_expiry_date, NaiveDate::from_ymd_opt(2026, 8, 9));
        assert_eq!(spd.payment_frequency, PaymentFrequency::Yearly);
        assert_eq!(spd.keep_executing_after_death, Some(true));
        assert_eq!(spd.retry_count_limit, Some(7));
        assert_eq!(spd.variable_symbol.as_deref(), Some("1"));
        assert_eq!(spd.specific_symbol.as_deref(), Some("2"));
        assert_eq!(spd.constant_symbol.as_deref(), Some("0308"));
        assert_eq!(spd.payer_internal_payment_identifier.as_deref(), Some("ABC123"));
        assert_eq!(spd.url.as_deref(), Some("HTTP://WWW.SOMEURL.COM"));
        assert_eq!(spd.note_to_self.as_deref(), Some("note"));
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let a = ShortPaymentDescriptor::parse("SPD*1.0*AM:1.00*ACC:CZ3301000000000002970297*CC:CZK")
            .unwrap();
        let b = ShortPaymentDescriptor::parse("SPD*1.0*CC:CZK*ACC:CZ3301000000000002970297*AM:1.00")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn one_bad_alternative_counterparty_aborts() {
        let err = parse("*ALT-ACC:CZ5855000000001265098001,+BIC").unwrap_err();
        assert!(matches!(err, ParseError::Field { key: "ALT-ACC", .. }));
    }

    #[test]
    fn field_errors_name_the_key() {
        let cases = [
            ("*AM:-1", "AM"),
            ("*CC:CZKK", "CC"),
            ("*RF:12a", "RF"),
            ("*DT:2021-04-30", "DT"),
            ("*PT:XX", "PT"),
            ("*NT:SMS", "NT"),
            ("*DL:20211331", "DL"),
            ("*FRQ:2W", "FRQ"),
            ("*DH:yes", "DH"),
            ("*X-PER:many", "X-PER"),
            ("*X-VS:12 34", "X-VS"),
            ("*X-SS:", "X-SS"),
            ("*X-KS:abc", "X-KS"),
        ];
        for (tail, expected_key) in cases {
            match parse(tail) {
                Err(ParseError::Field { key, .. }) => assert_eq!(key, expected_key, "tail {tail}"),
                other => panic!("tail {tail}: expected field error, got {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_keys_fail() {
        assert!(matches!(
            parse("*ACC:CZ3301000000000002970297"),
            Err(ParseError::DuplicateKey(ref k)) if k == "ACC"
        ));
        assert!(matches!(parse("*AM:1*AM:1"), Err(ParseError::DuplicateKey(_))));
    }

    #[test]
    fn plus_in_text_fields_is_a_space() {
        let spd = parse("*MSG:PLATBA+ZA+FAKTURU*RN:PETR+DVORAK").unwrap();
        assert_eq!(spd.message.as_deref(), Some("PLATBA ZA FAKTURU"));
        assert_eq!(spd.creditor_name.as_deref(), Some("PETR DVORAK"));
    }

    #[test]
    fn amount_with_underscore_is_rejected() {
        let err = parse("*AM:1_000.50").unwrap_err();
        assert!(matches!(err, ParseError::Field { key: "AM", .. }));
        assert!(matches!(err.root(), ParseError::InvalidAmount(_)));

        let spd = parse("*AM:1,000.50").unwrap();
        assert_eq!(spd.amount, Some(Decimal::new(100050, 2)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let spd = parse("*CRC32:1234ABCD*X-FOO:bar").unwrap();
        assert!(spd.message.is_none());
    }

    #[test]
    fn frequency_does_not_require_expiry_date() {
        let spd = parse("*FRQ:1D").unwrap();
        assert!(spd.is_standing_order());
        assert!(spd.standing_order_expiry_date.is_none());

        let spd = parse("*DL:20230430").unwrap();
        assert!(!spd.is_standing_order());
        assert_eq!(spd.standing_order_expiry_date, NaiveDate::from_ymd_opt(2023, 4, 30));
    }

    #[test]
    fn scd_is_unsupported_not_format() {
        let err = ShortPaymentDescriptor::parse(
            "SCD*1.0*ACC:CZ3301000000000002970297*AM:555.55*CC:CZK*FRQ:1M*DT:20210430",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn from_str_matches_parse() {
        let input = format!("{ACC}*AM:10");
        let a: ShortPaymentDescriptor = input.parse().unwrap();
        assert_eq!(a, ShortPaymentDescriptor::parse(&input).unwrap());
    }
}
