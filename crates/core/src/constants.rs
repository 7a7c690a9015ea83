use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept on every stored or returned money amount
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Processing fee withheld from a cancellation refund
pub const DEFAULT_PROCESSING_FEE: Decimal = dec!(25.00);

/// Cancellations strictly before this many days after enrollment are refunded
pub const DEFAULT_REFUND_WINDOW_DAYS: i64 = 15;

/// A payment plan always has at least this many installments
pub const MIN_INSTALLMENTS: u32 = 2;

/// Environment variable overriding the cancellation processing fee
pub const PROCESSING_FEE_ENV: &str = "ENROLLWISE_PROCESSING_FEE";

/// Environment variable overriding the refund window length in days
pub const REFUND_WINDOW_DAYS_ENV: &str = "ENROLLWISE_REFUND_WINDOW_DAYS";
