//! Currency rates and display formatting

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Currencies offered by the planner. Prices are always stored in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
    Usd,
    Jpy,
    Idr,
}

impl Currency {
    /// Reference currency all catalog prices are expressed in
    pub const REFERENCE: Currency = Currency::Inr;

    pub const ALL: [Currency; 5] = [
        Currency::Inr,
        Currency::Eur,
        Currency::Usd,
        Currency::Jpy,
        Currency::Idr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Jpy => "JPY",
            Currency::Idr => "IDR",
        }
    }

    /// Conversion rate from the reference currency
    pub fn rate(&self) -> CurrencyRate {
        let (symbol, multiplier) = match self {
            Currency::Inr => ("₹", 1.0),
            Currency::Eur => ("€", 0.011),
            Currency::Usd => ("$", 0.012),
            Currency::Jpy => ("¥", 1.80),
            Currency::Idr => ("Rp", 192.0),
        };
        CurrencyRate {
            code: *self,
            symbol,
            multiplier,
        }
    }

    fn display_rule(&self) -> DisplayRule {
        match self {
            Currency::Inr | Currency::Idr => DisplayRule {
                max_fraction_digits: 0,
                grouping: Grouping::Indian,
            },
            Currency::Eur | Currency::Usd | Currency::Jpy => DisplayRule {
                max_fraction_digits: 2,
                grouping: Grouping::Western,
            },
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown currency: {}", s))
    }
}

/// Symbol and multiplier for one currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyRate {
    pub code: Currency,
    pub symbol: &'static str,
    pub multiplier: f64,
}

impl CurrencyRate {
    /// Convert an amount in the reference currency
    pub fn convert(&self, amount: u64) -> f64 {
        amount as f64 * self.multiplier
    }

    /// Convert and format an amount in the reference currency
    pub fn format(&self, amount: u64) -> String {
        let rule = self.code.display_rule();
        format!(
            "{}{}",
            self.symbol,
            format_number(self.convert(amount), rule)
        )
    }
}

/// Format a reference-currency amount for display in `currency`
pub fn convert_for_display(amount: u64, currency: Currency) -> String {
    currency.rate().format(amount)
}

#[derive(Debug, Clone, Copy)]
enum Grouping {
    /// 1,234,567
    Western,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, Copy)]
struct DisplayRule {
    max_fraction_digits: u32,
    grouping: Grouping,
}

fn format_number(value: f64, rule: DisplayRule) -> String {
    let scale = 10u64.pow(rule.max_fraction_digits);
    let scaled = (value.max(0.0) * scale as f64).round() as u64;
    let whole = group_digits(scaled / scale, rule.grouping);

    let mut fraction = scaled % scale;
    if fraction == 0 {
        return whole;
    }
    // maximum fraction digits only: trailing zeros are dropped
    let mut digits = rule.max_fraction_digits as usize;
    while fraction % 10 == 0 {
        fraction /= 10;
        digits -= 1;
    }
    format!("{}.{:0width$}", whole, fraction, width = digits)
}

fn group_digits(value: u64, grouping: Grouping) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = match grouping {
        Grouping::Western => 3,
        Grouping::Indian => 2,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
