//! Разбор чешских платёжных строк SPD (Short Payment Descriptor, "QR Platba")
//! и нормализация чешских номеров счетов.

pub mod error;
pub mod model;
pub mod account;
pub mod counterparty;
pub mod spayd;

mod fields;

pub use crate::model::{
    Counterparty, NotificationType, PaymentFrequency, PaymentType, ShortPaymentDescriptor,
};
pub use crate::account::CzechBankAccount;
pub use crate::counterparty::parse_counterparty;
pub use crate::spayd::{SpaydAttributes, SPD_HEADER};
pub use crate::error::{ErrorKind, ParseError};
