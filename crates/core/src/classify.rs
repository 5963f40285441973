//! Location classification for collected payments.
//!
//! Location is not stored on the record; it is derived from the payment
//! method and the account the payment was booked to.

use tahsilat_shared::types::{LocationKey, MethodName};

/// Bank transfers.
pub const LOCATION_BANK: &str = "BANKA HAVALESİ";
/// Shopping-area cash desk.
pub const LOCATION_MARKET: &str = "CARŞI";
/// Jewelry district cash desk.
pub const LOCATION_KUYUMCUKENT: &str = "KUYUMCUKENT";
/// Head office, also the fallback.
pub const LOCATION_OFFICE: &str = "OFİS";
/// Checks.
pub const LOCATION_CHECK: &str = "ÇEK";

/// Account-name fragments per location, checked in order.
///
/// Turkish dotless/dotted `i` variants are listed explicitly since
/// lower-casing `I` yields `ı`.
const ACCOUNT_RULES: &[(&str, &[&str])] = &[
    (LOCATION_MARKET, &["çarşi", "çarşı", "carsi"]),
    (LOCATION_KUYUMCUKENT, &["kuyumcukent"]),
    (LOCATION_BANK, &["yapi kredi", "yapı kredi", "banka", "havale"]),
    (LOCATION_CHECK, &["çek", "cek"]),
    (LOCATION_OFFICE, &["ofis", "office", "kasa"]),
];

/// Returns the location a payment is reported under.
///
/// Check payments always land in `ÇEK`, whatever account they were booked to.
#[must_use]
pub fn location_for(method: &MethodName, account_name: &str) -> LocationKey {
    if method.is_check() {
        return LocationKey::from_static(LOCATION_CHECK);
    }
    location_for_account(account_name)
}

/// Classifies an account name; unknown accounts fall back to the office.
#[must_use]
pub fn location_for_account(account_name: &str) -> LocationKey {
    let account = account_name.to_lowercase();
    let location = ACCOUNT_RULES
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|f| account.contains(*f)))
        .map_or(LOCATION_OFFICE, |(location, _)| *location);
    LocationKey::from_static(location)
}
