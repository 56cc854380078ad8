//! Customer report: the customer register plus per-customer purchase
//! aggregates reduced over the sales and order books.

use rust_decimal::Decimal;
use tracing::instrument;

use crate::entities::{Customer, Order, OrderStatus, Sale};
use crate::errors::ReportError;

use super::{
    base_name, render, CellValue, ReportArtifact, ReportContext, ReportDocument, ReportFormat,
    Row, Section,
};

pub(crate) const DOMAIN: &str = "customer";

/// Builds the customer register rows.
pub fn register_rows(customers: &[Customer]) -> Vec<Row> {
    customers
        .iter()
        .map(|customer| {
            vec![
                CellValue::Text(customer.name.clone()),
                CellValue::Text(customer.contact_number.clone()),
                CellValue::Text(customer.address.clone()),
                CellValue::notes(&customer.notes),
            ]
        })
        .collect()
}

/// Builds one aggregate row per customer: purchase count, total spent,
/// pending orders, and the most recent purchase date (`-` when the
/// customer has never bought).
pub fn summary_rows(customers: &[Customer], sales: &[Sale], orders: &[Order]) -> Vec<Row> {
    customers
        .iter()
        .map(|customer| {
            let own_sales: Vec<&Sale> = sales
                .iter()
                .filter(|sale| sale.customer_id.as_deref() == Some(customer.id.as_str()))
                .collect();
            let total_spent: Decimal = own_sales.iter().map(|sale| sale.total_amount).sum();
            let last_purchase = own_sales.iter().map(|sale| sale.date).max();
            let pending_orders = orders
                .iter()
                .filter(|order| {
                    order.customer_id == customer.id && order.status == OrderStatus::Pending
                })
                .count();

            vec![
                CellValue::Text(customer.name.clone()),
                CellValue::Integer(own_sales.len() as i64),
                CellValue::Money(total_spent),
                CellValue::Integer(pending_orders as i64),
                last_purchase.map_or(CellValue::Missing, CellValue::Date),
            ]
        })
        .collect()
}

/// Assembles and writes the two-section customer report.
#[instrument(skip_all, fields(format = %format, customers = customers.len()))]
pub fn generate(
    ctx: &ReportContext,
    format: ReportFormat,
    customers: &[Customer],
    sales: &[Sale],
    orders: &[Order],
) -> Result<ReportArtifact, ReportError> {
    if customers.is_empty() {
        return Err(ReportError::NoData(DOMAIN));
    }

    let doc = ReportDocument {
        title: "Lusoi Farm - Customer Report".to_string(),
        base_name: base_name(ctx, DOMAIN),
        sections: vec![
            Section {
                title: "Customers".to_string(),
                columns: vec!["Name", "Contact Number", "Address", "Notes"],
                rows: register_rows(customers),
            },
            Section {
                title: "Customer Purchase Summary".to_string(),
                columns: vec![
                    "Customer",
                    "Purchases",
                    "Total Spent",
                    "Pending Orders",
                    "Last Purchase",
                ],
                rows: summary_rows(customers, sales, orders),
            },
        ],
    };
    render(ctx, format, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            contact_number: "+254 700 000001".to_string(),
            address: "Nyeri".to_string(),
            notes: None,
        }
    }

    fn sale(id: &str, customer_id: Option<&str>, day: u32, amount: Decimal) -> Sale {
        Sale {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, day).unwrap(),
            customer_id: customer_id.map(str::to_string),
            products: Vec::new(),
            total_amount: amount,
        }
    }

    fn order(customer_id: &str, status: OrderStatus) -> Order {
        Order {
            id: "o1".to_string(),
            customer_id: customer_id.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
            delivery_date: NaiveDate::from_ymd_opt(2023, 11, 8).unwrap(),
            products: Vec::new(),
            status,
        }
    }

    #[test]
    fn aggregates_cover_only_the_customers_own_sales() {
        let customers = vec![customer("c1", "Wambui"), customer("c2", "Otieno")];
        let sales = vec![
            sale("s1", Some("c1"), 3, dec!(1200)),
            sale("s2", Some("c1"), 9, dec!(800)),
            sale("s3", Some("c2"), 5, dec!(400)),
            sale("s4", None, 6, dec!(9999)),
        ];
        let orders = vec![
            order("c1", OrderStatus::Pending),
            order("c1", OrderStatus::Delivered),
            order("c2", OrderStatus::Cancelled),
        ];

        let built = summary_rows(&customers, &sales, &orders);
        assert_eq!(
            built[0],
            vec![
                CellValue::Text("Wambui".into()),
                CellValue::Integer(2),
                CellValue::Money(dec!(2000)),
                CellValue::Integer(1),
                CellValue::Date(NaiveDate::from_ymd_opt(2023, 11, 9).unwrap()),
            ]
        );
        assert_eq!(built[1][1], CellValue::Integer(1));
        assert_eq!(built[1][2], CellValue::Money(dec!(400)));
        assert_eq!(built[1][3], CellValue::Integer(0));
    }

    #[test]
    fn customer_without_sales_has_missing_last_purchase() {
        let built = summary_rows(&[customer("c1", "Wambui")], &[], &[]);
        assert_eq!(
            built[0],
            vec![
                CellValue::Text("Wambui".into()),
                CellValue::Integer(0),
                CellValue::Money(dec!(0)),
                CellValue::Integer(0),
                CellValue::Missing,
            ]
        );
    }
}
