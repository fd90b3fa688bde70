//! Calendar constants and calculator input hints

/// Contributions are made monthly
pub const MONTHS_IN_YEAR: u32 = 12;

/// Day-count basis for XIRR discounting (actual/365)
pub const DAYS_IN_YEAR: f64 = 365.0;

/// Calculator input hints. The engine never enforces these; callers may warn.
pub const MIN_SIP_AMOUNT: f64 = 500.0;
pub const MAX_SIP_AMOUNT: f64 = 100_000.0;
pub const MIN_DURATION_YEARS: u32 = 1;
pub const MAX_DURATION_YEARS: u32 = 40;
pub const MIN_RETURN_RATE: f64 = 1.0;
pub const MAX_RETURN_RATE: f64 = 30.0;

/// Years shown in the calculator's milestone table
pub const MILESTONE_YEARS: [u32; 6] = [5, 10, 15, 20, 25, 30];
