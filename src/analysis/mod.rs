mod summary;
#[cfg(test)]
mod tests;

pub use summary::{
    payment_pattern, payment_windows, summarize_account, summarize_vehicles, AccountSummary,
    PaymentPattern, TimeWindow, VehicleSummary, WindowSummary
};
