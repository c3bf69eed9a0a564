//! Display formatting for amounts and dates

use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Format an amount in US dollars with cents, e.g. `$250,000.00`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    dollars(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Format an amount in whole US dollars, e.g. `$300`.
#[must_use]
pub fn format_whole_currency(amount: Decimal) -> String {
    let formatted =
        dollars(amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero));

    formatted
        .strip_suffix(".00")
        .unwrap_or(&formatted)
        .to_owned()
}

fn dollars(mut amount: Decimal) -> String {
    amount.rescale(2);

    Money::from_decimal(amount, iso::USD).to_string()
}

/// Format a deadline as month/day/year, e.g. `9/30/2024`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.strftime("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn currency_has_grouping_and_cents() {
        assert_eq!(format_currency(Decimal::from(250_000)), "$250,000.00");
        assert_eq!(format_currency(Decimal::new(12_345, 1)), "$1,234.50");
    }

    #[test]
    fn whole_currency_drops_cents() {
        assert_eq!(format_whole_currency(Decimal::from(300)), "$300");
        assert_eq!(format_whole_currency(Decimal::new(1_234_567, 0)), "$1,234,567");
        assert_eq!(format_whole_currency(Decimal::new(995, 1)), "$100");
    }

    #[test]
    fn dates_render_without_padding() {
        assert_eq!(format_date(date(2024, 9, 30)), "9/30/2024");
        assert_eq!(format_date(date(2024, 12, 15)), "12/15/2024");
    }
}
