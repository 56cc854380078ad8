//! Sales report: a per-sale summary plus a per-line product breakdown
//! with derived subtotals.

use tracing::instrument;

use crate::entities::{Customer, Product, Sale};
use crate::errors::ReportError;

use super::{
    base_name, index_by_id, label_or_unknown, render, CellValue, ReportArtifact, ReportContext,
    ReportDocument, ReportFormat, Row, Section,
};

pub(crate) const DOMAIN: &str = "sales";

/// Builds the per-sale summary rows. A sale without a customer (walk-in
/// cash sale) renders `-`; a dangling customer id degrades to
/// `Unknown Customer`.
pub fn summary_rows(sales: &[Sale], customers: &[Customer]) -> Vec<Row> {
    let customers_by_id = index_by_id(customers, |c| c.id.as_str());

    sales
        .iter()
        .map(|sale| {
            let customer_cell = match &sale.customer_id {
                None => CellValue::Missing,
                Some(id) => label_or_unknown(
                    customers_by_id.get(id.as_str()).map(|c| c.name.as_str()),
                    "Customer",
                ),
            };
            vec![
                CellValue::Date(sale.date),
                customer_cell,
                CellValue::Integer(i64::from(sale.unit_count())),
                CellValue::Money(sale.total_amount),
            ]
        })
        .collect()
}

/// Builds one row per sale line with the quantity × unit-price subtotal.
pub fn line_rows(sales: &[Sale], products: &[Product]) -> Vec<Row> {
    let products_by_id = index_by_id(products, |p| p.id.as_str());

    sales
        .iter()
        .flat_map(|sale| {
            sale.products.iter().map(|line| {
                vec![
                    CellValue::Date(sale.date),
                    label_or_unknown(
                        products_by_id
                            .get(line.product_id.as_str())
                            .map(|p| p.name.as_str()),
                        "Product",
                    ),
                    CellValue::Integer(i64::from(line.quantity)),
                    CellValue::Money(line.price_per_unit),
                    CellValue::Money(line.subtotal()),
                ]
            })
        })
        .collect()
}

/// Assembles and writes the two-section sales report.
#[instrument(skip_all, fields(format = %format, sales = sales.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    sales: &[Sale],
    customers: &[Customer],
    products: &[Product],
) -> Result<ReportArtifact, ReportError> {
    if sales.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Sales Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![
            Section {
                title: "Sales Summary".to_string(),
                columns: vec!["Date", "Customer", "Items", "Total Amount"],
                rows: summary_rows(sales, customers),
            },
            Section {
                title: "Product Sales Details".to_string(),
                columns: vec!["Date", "Product", "Quantity", "Unit Price", "Subtotal"],
                rows: line_rows(sales, products),
            },
        ],
    };
    render(ctx, format, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SaleLine;
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            product_type: "Eggs".to_string(),
            condition: "Fresh".to_string(),
            current_price: dec!(15),
            price_updated_at: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sale(customer_id: Option<&str>, lines: Vec<SaleLine>) -> Sale {
        let total_amount = lines.iter().map(SaleLine::subtotal).sum();
        Sale {
            id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
            customer_id: customer_id.map(str::to_string),
            products: lines,
            total_amount,
        }
    }

    fn line(product_id: &str, quantity: u32, unit: Decimal) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
            price_per_unit: unit,
        }
    }

    #[test]
    fn two_known_lines_produce_two_detail_rows() {
        let sales = vec![sale(
            None,
            vec![line("p1", 10, dec!(15.00)), line("p2", 3, dec!(450.00))],
        )];
        let products = vec![product("p1", "Tray of Eggs"), product("p2", "Broiler")];
        let built = line_rows(&sales, &products);

        assert_eq!(built.len(), 2);
        assert_eq!(built[0][1], CellValue::Text("Tray of Eggs".into()));
        assert_eq!(built[0][4], CellValue::Money(dec!(150.00)));
        assert_eq!(built[1][1], CellValue::Text("Broiler".into()));
        assert_eq!(built[1][4], CellValue::Money(dec!(1350.00)));
    }

    #[test]
    fn walk_in_sale_has_placeholder_customer() {
        let built = summary_rows(&[sale(None, vec![line("p1", 2, dec!(15))])], &[]);
        assert_eq!(built[0][1], CellValue::Missing);
        assert_eq!(built[0][2], CellValue::Integer(2));
    }

    #[test]
    fn dangling_customer_and_product_degrade_to_unknown() {
        let sales = vec![sale(Some("ghost"), vec![line("gone", 1, dec!(10))])];
        let summary = summary_rows(&sales, &[]);
        assert_eq!(summary[0][1], CellValue::Text("Unknown Customer".into()));
        let lines = line_rows(&sales, &[]);
        assert_eq!(lines[0][1], CellValue::Text("Unknown Product".into()));
    }

    proptest! {
        #[test]
        fn subtotal_is_quantity_times_unit_price(quantity in 1u32..5_000, cents in 1i64..1_000_000) {
            let unit = Decimal::new(cents, 2);
            let sales = vec![sale(None, vec![line("p1", quantity, unit)])];
            let built = line_rows(&sales, &[]);
            prop_assert_eq!(
                &built[0][4],
                &CellValue::Money(Decimal::from(quantity) * unit)
            );
        }
    }
}
