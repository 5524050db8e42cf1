use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

use crate::entities::Account;

fn decimal_places(currency: Currency) -> usize {
    currency.exponent().unwrap_or(0) as usize
}

/// Amount with thousands separators, the currency's standard number of
/// decimal places and its symbol (ex. `1,234.50 $`, `45,000 ₩`).
///
/// Always uses en separators regardless of the user's locale.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    format_with(amount, decimal_places(currency), &currency.symbol().to_string())
}

fn format_with(amount: f64, places: usize, unit: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let scaled = (amount.abs() * 10f64.powi(places as i32)).round() as i64;
    let divisor = 10i64.pow(places as u32);
    let integer_part = (scaled / divisor).to_formatted_string(&Locale::en);
    if places == 0 {
        format!("{sign}{integer_part} {unit}")
    } else {
        format!("{sign}{integer_part}.{:0places$} {unit}", scaled % divisor)
    }
}

impl Account {
    /// Balance in the account's currency. An unrecognized currency code is
    /// shown as-is with two decimal places.
    pub fn balance_label(&self) -> String {
        match self.currency.currency() {
            Some(currency) => format_amount(self.balance, currency),
            None => format_with(self.balance, 2, &self.currency.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_per_currency_exponent() {
        let usd = Currency::USD.symbol();
        assert_eq!(format_amount(1234.5, Currency::USD), format!("1,234.50 {usd}"));
        assert_eq!(format_amount(0.999, Currency::USD), format!("1.00 {usd}"));
        assert_eq!(
            format_amount(-0.994, Currency::EUR),
            format!("-0.99 {}", Currency::EUR.symbol())
        );
        assert_eq!(
            format_amount(45000.0, Currency::KRW),
            format!("45,000 {}", Currency::KRW.symbol())
        );
    }

    #[test]
    fn unknown_currency_label_uses_code() {
        let at = chrono::Utc::now();
        let account = Account {
            id: 9,
            user_id: "u-1".to_string(),
            name: "Wallet".to_string(),
            kind: "crypto".to_string(),
            is_activated: true,
            balance: 1234.5,
            currency: crate::entities::CurrencyCode::Other("USDT".to_string()),
            account_type: "crypto".to_string(),
            bank_name: String::new(),
            created_at: at,
            updated_at: at,
        };
        assert_eq!(account.balance_label(), "1,234.50 USDT");
    }
}
