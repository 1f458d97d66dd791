//! Turkish locale helpers.
//!
//! Casing follows Turkish rules for the dotted and dotless i, which the
//! default Unicode mappings get wrong (`i` upper-cases to `I`, not `İ`).

use chrono::{Datelike, Local, NaiveDate};

const MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Upper-case `value` with Turkish rules (`i` → `İ`, `ı` → `I`).
pub fn to_upper_tr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            'i' => result.push('İ'),
            'ı' => result.push('I'),
            other => result.extend(other.to_uppercase()),
        }
    }
    result
}

/// Lower-case `value` with Turkish rules (`I` → `ı`, `İ` → `i`).
pub fn to_lower_tr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            'I' => result.push('ı'),
            'İ' => result.push('i'),
            other => result.extend(other.to_lowercase()),
        }
    }
    result
}

/// Long Turkish date, e.g. "17 Ekim 2026".
pub fn format_turkish_date(date: NaiveDate) -> String {
    let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Today's date in the long Turkish form.
pub fn today_turkish() -> String {
    format_turkish_date(Local::now().date_naive())
}

/// Amount in kuruş rendered as Turkish lira, e.g. 2490 → "24,90 ₺".
pub fn format_lira(kurus: u64) -> String {
    format!("{},{:02} ₺", kurus / 100, kurus % 100)
}
