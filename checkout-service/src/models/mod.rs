pub mod order;
pub mod payment;

pub use order::{to_minor_units, InvalidOrder, LineItem, OrderData};
pub use payment::{
    CaptureOutcome, CaptureResult, PaymentMethod, PaymentOutcome, PaymentResult,
    UnknownPaymentMethod,
};
