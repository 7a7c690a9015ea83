//! Payments module - installment schedules and cancellation refunds.

mod installments;
mod refunds;

pub use installments::{calculate_installment_schedule, InstallmentScheduleItem, PaymentFrequency};
pub use refunds::{
    calculate_cancellation_refund, CancellationRefund, RefundCalculator, RefundPolicy,
};
