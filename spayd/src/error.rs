use std::num::ParseIntError;
use thiserror::Error;

/// Категория ошибки, см. [`ParseError::kind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// отсутствует обязательный аргумент
    Argument,
    /// плохие входные данные
    Format,
    /// корректные, но неподдерживаемые данные (SCD, другая версия SPD)
    Unsupported,
}

/// Ошибки при парсинге платёжных строк и номеров счетов
#[derive(Debug, Error)]
pub enum ParseError {
    // ошибки аргументов

    /// обязательный аргумент не передан
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    // обёртки

    /// обёртка std::num::ParseIntError
    #[error("number parse error: {0}")]
    Int(#[from] ParseIntError),

    /// ошибка в значении конкретного атрибута SPD
    #[error("attribute {key}: {source}")]
    Field {
        key: &'static str,
        #[source]
        source: Box<ParseError>,
    },

    // ошибки формата значений

    /// ошибка при парсинге денежной суммы
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// ошибка при парсинге валюты
    #[error("invalid currency format: {0}")]
    InvalidCurrency(String),
    /// значение должно состоять только из цифр 0-9
    #[error("the value must be a non-empty string composed only of digits (0 to 9): '{0}'")]
    InvalidNumericString(String),
    /// ошибка при парсинге даты YYYYMMDD
    #[error("invalid YYYYMMDD date: '{0}'")]
    InvalidDate(String),
    #[error("invalid payment type: {0}")]
    InvalidPaymentType(String),
    #[error("invalid notification type: {0}")]
    InvalidNotificationType(String),
    #[error("invalid payment frequency: {0}")]
    InvalidFrequency(String),
    #[error("invalid boolean value: {0}")]
    InvalidBoolean(String),
    /// строка IBAN+BIC в неверном формате
    #[error("the IBAN+BIC string must be in the format 'IBAN+BIC' or just 'IBAN': '{0}'")]
    InvalidCounterparty(String),

    // ошибки номеров счетов

    /// неверный формат чешского счёта
    #[error("invalid bank account format: {0}")]
    InvalidAccount(String),
    /// номер счёта из одних нулей
    #[error("the account number cannot be all zeros")]
    ZeroAccountNumber,
    #[error("not a valid Czech IBAN: '{0}'")]
    InvalidIban(String),

    // ошибки структуры строки SPD

    /// ключ атрибута встречается больше одного раза
    #[error("duplicate key found: {0}")]
    DuplicateKey(String),
    /// ошибка отсутствия обязательного поля
    #[error("the mandatory '{0}' attribute is missing")]
    MissingField(&'static str),
    /// строка вообще не похожа на SPD/SCD (например, EAN с пакета молока)
    #[error("the provided string does not look like a short payment descriptor (SPD) or short collection descriptor (SCD)")]
    UnrecognizedDescriptor,

    // неподдерживаемые варианты

    /// SCD (инкасо) не поддерживается
    #[error("short collection descriptors (SCD) are not supported")]
    CollectionDescriptor,
    /// SPD другой версии, не 1.0
    #[error("only short payment descriptors (SPD) version 1.0 are supported, got header '{0}'")]
    UnsupportedVersion(String),
}

impl ParseError {
    /// Категория ошибки. Для [`ParseError::Field`] берётся категория вложенной ошибки
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MissingArgument(_) => ErrorKind::Argument,
            ParseError::CollectionDescriptor | ParseError::UnsupportedVersion(_) => {
                ErrorKind::Unsupported
            }
            ParseError::Field { source, .. } => source.kind(),
            _ => ErrorKind::Format,
        }
    }

    /// Ошибка, лежащая под обёрткой [`ParseError::Field`] (или сама ошибка)
    pub fn root(&self) -> &ParseError {
        match self {
            ParseError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn in_field(self, key: &'static str) -> Self {
        ParseError::Field {
            key,
            source: Box::new(self),
        }
    }
}
