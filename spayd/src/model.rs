use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Получатель платежа: IBAN и необязательный BIC
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Counterparty {
    /// IBAN получателя, никогда не пустой
    pub iban: String,
    /// BIC (SWIFT) банка получателя
    pub bic: Option<String>,
}

/// Тип платежа. Пока используется только для мгновенных платежей
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentType {
    #[default]
    Unspecified,
    /// мгновенный платёж (`PT:IP`)
    InstantPayment,
}

/// Канал для уведомления плательщика
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationType {
    #[default]
    Unspecified,
    /// SMS на телефон (`NT:P`)
    Phone,
    /// письмо на почту (`NT:E`)
    Email,
}

/// Периодичность повторения платежа (для постоянного поручения)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentFrequency {
    #[default]
    Unspecified,
    Daily,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

/// Центральная структура библиотеки: одна платёжная строка SPD (Short Payment Descriptor).
///
/// Обязательно только поле [`ShortPaymentDescriptor::counterparty`] (`ACC`),
/// остальные поля по умолчанию пустые.
///
/// Поля `due_date` (`DT`) и `message` (`MSG`) меняют смысл, если задана периодичность (`FRQ`):
/// тогда строка описывает постоянное поручение, `DT` это дата первого платежа,
/// а `MSG` это название поручения. См. [`ShortPaymentDescriptor::is_standing_order`].
///
/// Пример использования:
/// ```
/// use spayd::ShortPaymentDescriptor;
///
/// let spd = ShortPaymentDescriptor::parse("SPD*1.0*ACC:CZ5855000000001265098001*AM:480.50*CC:CZK")?;
/// assert_eq!(spd.counterparty.iban, "CZ5855000000001265098001");
/// assert_eq!(spd.currency.as_deref(), Some("CZK"));
/// # Ok::<(), spayd::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortPaymentDescriptor {
    /// `ACC`: счёт получателя
    pub counterparty: Counterparty,
    /// `ALT-ACC`: альтернативные счета получателя (например, для экономии на комиссиях)
    pub alternative_counterparties: Vec<Counterparty>,
    /// `AM`: сумма платежа, неотрицательная
    pub amount: Option<Decimal>,
    /// `CC`: трёхбуквенный код валюты
    pub currency: Option<String>,
    /// `RF`: числовой идентификатор платежа для получателя
    pub creditor_reference: Option<String>,
    /// `RN`: имя получателя
    pub creditor_name: Option<String>,
    /// `DT`: дата платежа или дата первого платежа постоянного поручения
    pub due_date: Option<NaiveDate>,
    /// `PT`
    pub payment_type: PaymentType,
    /// `MSG`: сообщение получателю или название постоянного поручения
    pub message: Option<String>,
    /// `NT`
    pub notification_type: NotificationType,
    /// `NTA`: телефон или e-mail для уведомления, см. `notification_type`
    pub notification_address: Option<String>,
    /// `DL`: дата окончания постоянного поручения
    pub standing_order_expiry_date: Option<NaiveDate>,
    /// `FRQ`
    pub payment_frequency: PaymentFrequency,
    /// `DH`: продолжать ли платежи после смерти владельца счёта
    pub keep_executing_after_death: Option<bool>,
    /// `X-PER`: сколько дней повторять неудачный платёж
    pub retry_count_limit: Option<i32>,
    /// `X-VS`: variabilní symbol
    pub variable_symbol: Option<String>,
    /// `X-SS`: specifický symbol
    pub specific_symbol: Option<String>,
    /// `X-KS`: konstantní symbol
    pub constant_symbol: Option<String>,
    /// `X-ID`: внутренний идентификатор платежа на стороне плательщика
    pub payer_internal_payment_identifier: Option<String>,
    /// `X-URL`
    pub url: Option<String>,
    /// `X-SELF`: заметка плательщика для себя
    pub note_to_self: Option<String>,
}

impl ShortPaymentDescriptor {
    /// Go to [`ShortPaymentDescriptor`]
    pub fn new(counterparty: Counterparty) -> Self {
        ShortPaymentDescriptor {
            counterparty,
            alternative_counterparties: Vec::new(),
            amount: None,
            currency: None,
            creditor_reference: None,
            creditor_name: None,
            due_date: None,
            payment_type: PaymentType::default(),
            message: None,
            notification_type: NotificationType::default(),
            notification_address: None,
            standing_order_expiry_date: None,
            payment_frequency: PaymentFrequency::default(),
            keep_executing_after_death: None,
            retry_count_limit: None,
            variable_symbol: None,
            specific_symbol: None,
            constant_symbol: None,
            payer_internal_payment_identifier: None,
            url: None,
            note_to_self: None,
        }
    }

    /// Строка описывает постоянное поручение (задан `FRQ`)
    pub fn is_standing_order(&self) -> bool {
        self.payment_frequency != PaymentFrequency::Unspecified
    }
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bic {
            Some(bic) => write!(f, "{}+{}", self.iban, bic),
            None => write!(f, "{}", self.iban),
        }
    }
}

// Display выдаёт код из строки SPD, для Unspecified пустую строку

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Unspecified => Ok(()),
            PaymentType::InstantPayment => write!(f, "IP"),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::Unspecified => Ok(()),
            NotificationType::Phone => write!(f, "P"),
            NotificationType::Email => write!(f, "E"),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            PaymentFrequency::Unspecified => "",
            PaymentFrequency::Daily => "1D",
            PaymentFrequency::Monthly => "1M",
            PaymentFrequency::Quarterly => "3M",
            PaymentFrequency::HalfYearly => "6M",
            PaymentFrequency::Yearly => "1Y",
        };
        write!(f, "{code}")
    }
}
