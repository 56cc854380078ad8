use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a sale: a product at the price it was sold for on the day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: u32,
    pub price_per_unit: Decimal,
}

impl SaleLine {
    /// Line subtotal: quantity times the unit price at sale time.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price_per_unit
    }
}

/// A completed sale. `customer_id` is `None` for walk-in cash sales.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub products: Vec<SaleLine>,
    pub total_amount: Decimal,
}

impl Sale {
    /// Total units across all lines of the sale.
    pub fn unit_count(&self) -> u32 {
        self.products.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn subtotal_is_quantity_times_unit_price() {
        let line = SaleLine {
            product_id: "p1".into(),
            quantity: 12,
            price_per_unit: dec!(15.50),
        };
        assert_eq!(line.subtotal(), dec!(186.00));
    }
}
