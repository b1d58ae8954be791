//! Closed tax-lot models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accounting convention that decided which lot was sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasisMethod {
    Fifo,
    SpecificId,
}

/// A bought-then-sold quantity with its own cost basis, used for realized
/// P&L attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLot {
    pub lot_id: String,
    pub symbol: String,
    pub open_date: NaiveDate,
    pub close_date: NaiveDate,
    pub qty: Decimal,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub buy_fees: Decimal,
    pub sell_fees: Decimal,
    pub basis_method: BasisMethod,
    pub wash_sale_adj: Decimal,
}

impl TaxLot {
    /// Realized gain of the lot: proceeds net of fees, minus basis
    /// including fees, plus any wash-sale adjustment.
    pub fn realized_gain(&self) -> Decimal {
        let proceeds = self.sell_price * self.qty - self.sell_fees;
        let basis = self.buy_price * self.qty + self.buy_fees;
        proceeds - basis + self.wash_sale_adj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lot() -> TaxLot {
        TaxLot {
            lot_id: "L-1013".to_string(),
            symbol: "MSFT".to_string(),
            open_date: NaiveDate::from_ymd_opt(2025, 4, 11).unwrap(),
            close_date: NaiveDate::from_ymd_opt(2025, 10, 7).unwrap(),
            qty: dec!(20),
            buy_price: dec!(389.40),
            sell_price: dec!(411.10),
            buy_fees: dec!(2.80),
            sell_fees: dec!(2.90),
            basis_method: BasisMethod::Fifo,
            wash_sale_adj: dec!(0),
        }
    }

    #[test]
    fn test_realized_gain_nets_fees() {
        // (411.10*20 - 2.90) - (389.40*20 + 2.80) = 428.30
        assert_eq!(lot().realized_gain(), dec!(428.30));
    }

    #[test]
    fn test_wash_sale_adjustment_applies() {
        let mut adjusted = lot();
        adjusted.wash_sale_adj = dec!(-12.20);
        assert_eq!(adjusted.realized_gain(), dec!(416.10));
    }
}
