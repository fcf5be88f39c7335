//! Sales ledger denormalization
//!
//! Joins sales against their reference collections and flattens each kept
//! sale into a header row, one row per line item and one row per payment.
//! The build never fails: a reference that matches nothing degrades to an
//! empty cell, or to [`DELETED_REGISTER_LABEL`] for registers.

use super::format::{format_amount, format_optional_amount, quote_note};
use super::index::EntityIndex;
use super::row::{LedgerRow, LineType};
use super::timestamp::SaleStamp;
use crate::domain::{Customer, LineItem, Payment, Product, Register, Sale, User};
use chrono_tz::Tz;

/// Register cell when the sale's register matches nothing
pub const DELETED_REGISTER_LABEL: &str = "<Deleted Register>";

/// Appended to the name of a register that has itself been deleted
pub const DELETED_SUFFIX: &str = " (Deleted)";

const DETAILS_SEPARATOR: &str = " + ";

/// Counters gathered while building a ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub sales_seen: usize,
    pub sales_included: usize,
    pub skipped_deleted: usize,
    pub skipped_open: usize,
    /// References carrying an id that matched nothing; absent ids are not counted
    pub unmatched_customers: usize,
    pub unmatched_registers: usize,
    pub unmatched_users: usize,
    pub unmatched_products: usize,
    pub rows: usize,
}

/// Rows of a built ledger plus the counters gathered on the way
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
    pub stats: LedgerStats,
}

/// Customer-derived cells of a sale header
#[derive(Default)]
struct CustomerCells {
    code: String,
    company: String,
    name: String,
}

/// Joins sales with the reference collections they point at
///
/// Indexes are built once in [`Denormalizer::new`] and reused for every
/// sale passed to [`Denormalizer::build`].
pub struct Denormalizer<'a> {
    customers: EntityIndex<'a, Customer>,
    products: EntityIndex<'a, Product>,
    registers: EntityIndex<'a, Register>,
    users: EntityIndex<'a, User>,
    timezone: Tz,
}

impl<'a> Denormalizer<'a> {
    pub fn new(
        customers: &'a [Customer],
        products: &'a [Product],
        registers: &'a [Register],
        users: &'a [User],
        timezone: Tz,
    ) -> Self {
        Self {
            customers: EntityIndex::new(customers),
            products: EntityIndex::new(products),
            registers: EntityIndex::new(registers),
            users: EntityIndex::new(users),
            timezone,
        }
    }

    /// Build the ledger for `sales`, preserving their order
    pub fn build(&self, sales: &[Sale]) -> Ledger {
        let mut ledger = Ledger::default();

        for sale in sales {
            ledger.stats.sales_seen += 1;

            if sale.is_deleted() {
                ledger.stats.skipped_deleted += 1;
                continue;
            }
            if sale.is_open() {
                ledger.stats.skipped_open += 1;
                continue;
            }

            ledger.stats.sales_included += 1;
            self.push_sale(sale, &mut ledger);
        }

        ledger.stats.rows = ledger.rows.len();
        ledger
    }

    fn push_sale(&self, sale: &Sale, ledger: &mut Ledger) {
        let stamp = SaleStamp::from_sale_date(sale.sale_date.as_deref(), self.timezone);
        let products: Vec<Option<&Product>> = sale
            .line_items
            .iter()
            .map(|item| self.products.resolve(item.product_id.as_ref()))
            .collect();

        ledger.stats.unmatched_products += sale
            .line_items
            .iter()
            .zip(&products)
            .filter(|(item, product)| item.product_id.is_some() && product.is_none())
            .count();

        let header = self.header_row(sale, &stamp, &products, &mut ledger.stats);
        ledger.rows.push(header);

        for (item, product) in sale.line_items.iter().zip(&products) {
            ledger.rows.push(line_item_row(item, *product, &stamp));
        }

        for payment in &sale.payments {
            ledger.rows.push(payment_row(payment, &stamp));
        }
    }

    fn header_row(
        &self,
        sale: &Sale,
        stamp: &SaleStamp,
        products: &[Option<&Product>],
        stats: &mut LedgerStats,
    ) -> LedgerRow {
        let customer = match self.customers.resolve(sale.customer_id.as_ref()) {
            Some(customer) => CustomerCells {
                code: customer.code.clone().unwrap_or_default(),
                company: customer.company_name.clone().unwrap_or_default(),
                name: customer.full_name(),
            },
            None => {
                if sale.customer_id.is_some() {
                    stats.unmatched_customers += 1;
                }
                CustomerCells::default()
            }
        };

        let register = match self.registers.resolve(sale.register_id.as_ref()) {
            Some(register) => register_label(register),
            None => {
                if sale.register_id.is_some() {
                    stats.unmatched_registers += 1;
                }
                DELETED_REGISTER_LABEL.to_string()
            }
        };

        let user = match self.users.resolve(sale.user_id.as_ref()) {
            Some(user) => user.display_name.clone().unwrap_or_default(),
            None => {
                if sale.user_id.is_some() {
                    stats.unmatched_users += 1;
                }
                String::new()
            }
        };

        let quantity: f64 = sale.line_items.iter().filter_map(|i| i.quantity).sum();
        let discount: f64 = sale
            .line_items
            .iter()
            .filter_map(|i| i.discount_total)
            .sum();
        let total = sale.total_price.unwrap_or(0.0) + sale.total_tax.unwrap_or(0.0);

        LedgerRow {
            invoice_number: sale.invoice_number.clone().unwrap_or_default(),
            customer_code: customer.code,
            company_name: customer.company,
            customer_name: customer.name,
            sale_note: sale.note.as_deref().map(quote_note).unwrap_or_default(),
            quantity: format_amount(quantity),
            price: format_optional_amount(sale.total_price),
            tax: format_optional_amount(sale.total_tax),
            discount: format_amount(discount),
            loyalty: format_optional_amount(sale.total_loyalty),
            total: format_amount(total),
            details: sale_details(&sale.line_items, products),
            register,
            user,
            status: sale.status.clone().unwrap_or_default(),
            ..LedgerRow::stamped(LineType::Sale, stamp)
        }
    }
}

/// Build the ledger rows for `sales` in `timezone`
///
/// # Examples
///
/// ```
/// use salesledger::core::ledger::build_ledger;
/// use salesledger::domain::{EntityId, Sale};
///
/// let sale = Sale {
///     id: EntityId::from("s1"),
///     status: Some("CLOSED".to_string()),
///     ..Default::default()
/// };
/// let rows = build_ledger(&[sale], &[], &[], &[], &[], chrono_tz::UTC);
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].register, "<Deleted Register>");
/// ```
pub fn build_ledger(
    sales: &[Sale],
    customers: &[Customer],
    products: &[Product],
    registers: &[Register],
    users: &[User],
    timezone: Tz,
) -> Vec<LedgerRow> {
    Denormalizer::new(customers, products, registers, users, timezone)
        .build(sales)
        .rows
}

fn register_label(register: &Register) -> String {
    let name = register.name.clone().unwrap_or_default();
    if register.is_deleted() {
        format!("{name}{DELETED_SUFFIX}")
    } else {
        name
    }
}

/// `"<qty> X <name>"` for each resolved line item, joined with `" + "`
fn sale_details(items: &[LineItem], products: &[Option<&Product>]) -> String {
    items
        .iter()
        .zip(products)
        .filter_map(|(item, product)| {
            let product = (*product)?;
            let name = product.name.as_deref().or(product.variant_name.as_deref())?;
            Some(format!(
                "{} X {}",
                format_amount(item.quantity.unwrap_or(0.0)),
                name
            ))
        })
        .collect::<Vec<_>>()
        .join(DETAILS_SEPARATOR)
}

fn line_item_row(item: &LineItem, product: Option<&Product>, stamp: &SaleStamp) -> LedgerRow {
    let unit = item.price.unwrap_or(0.0) + item.tax.unwrap_or(0.0);
    let total = unit * item.quantity.unwrap_or(0.0);

    LedgerRow {
        quantity: format_optional_amount(item.quantity),
        price: format_optional_amount(item.price),
        tax: format_optional_amount(item.tax),
        discount: format_optional_amount(item.discount),
        loyalty: format_optional_amount(item.loyalty_value),
        total: format_amount(total),
        details: product
            .and_then(|p| p.variant_name.clone())
            .unwrap_or_default(),
        product_sku: product.and_then(|p| p.sku.clone()).unwrap_or_default(),
        ..LedgerRow::stamped(LineType::SaleLine, stamp)
    }
}

fn payment_row(payment: &Payment, stamp: &SaleStamp) -> LedgerRow {
    LedgerRow {
        paid: format_optional_amount(payment.amount),
        details: payment.name.clone().unwrap_or_default(),
        ..LedgerRow::stamped(LineType::Payment, stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;

    fn id(value: &str) -> Option<EntityId> {
        Some(EntityId::from(value))
    }

    fn closed_sale(sale_id: &str) -> Sale {
        Sale {
            id: EntityId::from(sale_id),
            status: Some("CLOSED".to_string()),
            ..Default::default()
        }
    }

    fn scenario() -> (Vec<Sale>, Vec<Customer>, Vec<Product>, Vec<Register>) {
        let sale = Sale {
            customer_id: id("5"),
            register_id: id("9"),
            user_id: id("3"),
            total_price: Some(10.0),
            total_tax: Some(1.0),
            total_loyalty: Some(0.0),
            line_items: vec![LineItem {
                product_id: id("7"),
                quantity: Some(2.0),
                price: Some(5.0),
                tax: Some(0.5),
                discount: Some(0.0),
                discount_total: Some(0.0),
                loyalty_value: Some(0.0),
            }],
            payments: vec![Payment {
                name: Some("Cash".to_string()),
                amount: Some(11.0),
            }],
            ..closed_sale("1")
        };
        let customer = Customer {
            id: EntityId::from("5"),
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            code: Some("C5".to_string()),
            ..Default::default()
        };
        let product = Product {
            id: EntityId::from("7"),
            variant_name: Some("Widget".to_string()),
            sku: Some("W-1".to_string()),
            ..Default::default()
        };
        let register = Register {
            id: EntityId::from("9"),
            name: Some("Front".to_string()),
            ..Default::default()
        };
        (vec![sale], vec![customer], vec![product], vec![register])
    }

    #[test]
    fn test_single_sale_scenario() {
        let (sales, customers, products, registers) = scenario();
        let rows = build_ledger(&sales, &customers, &products, &registers, &[], chrono_tz::UTC);

        assert_eq!(rows.len(), 3);

        let header = &rows[0];
        assert_eq!(header.line_type, LineType::Sale);
        assert_eq!(header.quantity, "2");
        assert_eq!(header.price, "10");
        assert_eq!(header.tax, "1");
        assert_eq!(header.total, "11");
        assert_eq!(header.register, "Front");
        assert_eq!(header.user, "");
        assert_eq!(header.customer_name, "Ann Lee");
        assert_eq!(header.customer_code, "C5");
        assert_eq!(header.status, "CLOSED");
        assert_eq!(header.details, "2 X Widget");

        let line = &rows[1];
        assert_eq!(line.line_type, LineType::SaleLine);
        assert_eq!(line.quantity, "2");
        assert_eq!(line.total, "11");
        assert_eq!(line.details, "Widget");
        assert_eq!(line.product_sku, "W-1");

        let payment = &rows[2];
        assert_eq!(payment.line_type, LineType::Payment);
        assert_eq!(payment.paid, "11");
        assert_eq!(payment.details, "Cash");
    }

    #[test]
    fn test_deleted_and_open_sales_are_skipped() {
        let kept = Sale {
            line_items: vec![LineItem::default(), LineItem::default()],
            payments: vec![Payment::default()],
            ..closed_sale("keep")
        };
        let deleted = Sale {
            deleted_at: Some("2020-01-01T00:00:00Z".to_string()),
            line_items: vec![LineItem::default()],
            ..closed_sale("deleted")
        };
        let open = Sale {
            status: Some("OPEN".to_string()),
            payments: vec![Payment::default()],
            ..closed_sale("open")
        };
        let no_status = Sale {
            status: None,
            ..closed_sale("no-status")
        };

        let ledger = Denormalizer::new(&[], &[], &[], &[], chrono_tz::UTC)
            .build(&[kept, deleted, open, no_status]);

        assert_eq!(ledger.rows.len(), 4 + 1);
        assert_eq!(ledger.stats.sales_seen, 4);
        assert_eq!(ledger.stats.sales_included, 2);
        assert_eq!(ledger.stats.skipped_deleted, 1);
        assert_eq!(ledger.stats.skipped_open, 1);
        assert_eq!(ledger.stats.rows, 5);
    }

    #[test]
    fn test_row_order_within_and_across_sales() {
        let first = Sale {
            line_items: vec![LineItem::default()],
            payments: vec![
                Payment {
                    name: Some("Cash".to_string()),
                    amount: Some(1.0),
                },
                Payment {
                    name: Some("Card".to_string()),
                    amount: Some(2.0),
                },
            ],
            invoice_number: Some("A".to_string()),
            ..closed_sale("1")
        };
        let second = Sale {
            invoice_number: Some("B".to_string()),
            ..closed_sale("2")
        };

        let rows = build_ledger(&[first, second], &[], &[], &[], &[], chrono_tz::UTC);
        let kinds: Vec<LineType> = rows.iter().map(|r| r.line_type).collect();

        assert_eq!(
            kinds,
            vec![
                LineType::Sale,
                LineType::SaleLine,
                LineType::Payment,
                LineType::Payment,
                LineType::Sale
            ]
        );
        assert_eq!(rows[2].details, "Cash");
        assert_eq!(rows[3].details, "Card");
        assert_eq!(rows[0].invoice_number, "A");
        assert_eq!(rows[4].invoice_number, "B");
    }

    #[test]
    fn test_unmatched_references_degrade() {
        let sale = Sale {
            customer_id: id("missing"),
            register_id: id("missing"),
            user_id: id("missing"),
            line_items: vec![LineItem {
                product_id: id("missing"),
                quantity: Some(3.0),
                price: Some(2.0),
                ..Default::default()
            }],
            ..closed_sale("1")
        };

        let ledger = Denormalizer::new(&[], &[], &[], &[], chrono_tz::UTC).build(&[sale]);
        let header = &ledger.rows[0];

        assert_eq!(header.customer_code, "");
        assert_eq!(header.company_name, "");
        assert_eq!(header.customer_name, "");
        assert_eq!(header.register, DELETED_REGISTER_LABEL);
        assert_eq!(header.user, "");
        assert_eq!(header.details, "");
        assert_eq!(header.quantity, "3");

        let line = &ledger.rows[1];
        assert_eq!(line.total, "6");
        assert_eq!(line.details, "");
        assert_eq!(line.product_sku, "");

        assert_eq!(ledger.stats.unmatched_customers, 1);
        assert_eq!(ledger.stats.unmatched_registers, 1);
        assert_eq!(ledger.stats.unmatched_users, 1);
        assert_eq!(ledger.stats.unmatched_products, 1);
    }

    #[test]
    fn test_absent_references_are_not_counted_as_unmatched() {
        let walk_in = Sale {
            line_items: vec![LineItem {
                quantity: Some(1.0),
                price: Some(4.0),
                ..Default::default()
            }],
            ..closed_sale("1")
        };

        let ledger = Denormalizer::new(&[], &[], &[], &[], chrono_tz::UTC).build(&[walk_in]);

        assert_eq!(ledger.rows[0].customer_name, "");
        assert_eq!(ledger.rows[0].user, "");
        assert_eq!(ledger.rows[0].register, DELETED_REGISTER_LABEL);
        assert_eq!(ledger.rows[1].total, "4");
        assert_eq!(ledger.stats.unmatched_customers, 0);
        assert_eq!(ledger.stats.unmatched_registers, 0);
        assert_eq!(ledger.stats.unmatched_users, 0);
        assert_eq!(ledger.stats.unmatched_products, 0);
    }

    #[test]
    fn test_register_found_beyond_first_entry() {
        let registers = vec![
            Register {
                id: EntityId::from("r1"),
                name: Some("Back".to_string()),
                ..Default::default()
            },
            Register {
                id: EntityId::from("r2"),
                name: Some("Front".to_string()),
                ..Default::default()
            },
        ];
        let sale = Sale {
            register_id: id("r2"),
            ..closed_sale("1")
        };

        let rows = build_ledger(&[sale], &[], &[], &registers, &[], chrono_tz::UTC);
        assert_eq!(rows[0].register, "Front");
    }

    #[test]
    fn test_deleted_register_gets_suffix() {
        let registers = vec![Register {
            id: EntityId::from("r1"),
            name: Some("Kiosk".to_string()),
            deleted_at: Some("2020-01-01T00:00:00Z".to_string()),
        }];
        let sale = Sale {
            register_id: id("r1"),
            ..closed_sale("1")
        };

        let rows = build_ledger(&[sale], &[], &[], &registers, &[], chrono_tz::UTC);
        assert_eq!(rows[0].register, "Kiosk (Deleted)");
    }

    #[test]
    fn test_header_details_and_discount_aggregate() {
        let products = vec![
            Product {
                id: EntityId::from("p1"),
                name: Some("Shirt".to_string()),
                variant_name: Some("Shirt / Large".to_string()),
                sku: Some("SH-L".to_string()),
                ..Default::default()
            },
            Product {
                id: EntityId::from("p2"),
                variant_name: Some("Hat".to_string()),
                ..Default::default()
            },
            Product {
                id: EntityId::from("p3"),
                ..Default::default()
            },
        ];
        let item = |product: &str, quantity: f64, discount_total: f64| LineItem {
            product_id: id(product),
            quantity: Some(quantity),
            discount_total: Some(discount_total),
            ..Default::default()
        };
        let sale = Sale {
            line_items: vec![
                item("p1", 2.0, 1.5),
                item("p2", 1.0, 0.25),
                item("p3", 4.0, 0.0),
            ],
            ..closed_sale("1")
        };

        let rows = build_ledger(&[sale], &[], &products, &[], &[], chrono_tz::UTC);

        assert_eq!(rows[0].details, "2 X Shirt + 1 X Hat");
        assert_eq!(rows[0].quantity, "7");
        assert_eq!(rows[0].discount, "1.75");
        assert_eq!(rows[1].details, "Shirt / Large");
        assert_eq!(rows[1].product_sku, "SH-L");
    }

    #[test]
    fn test_note_is_quoted_and_timestamp_localized() {
        let sale = Sale {
            note: Some("gift wrap".to_string()),
            sale_date: Some("2018-02-27T02:51:31+00:00".to_string()),
            payments: vec![Payment::default()],
            ..closed_sale("1")
        };

        let rows = build_ledger(&[sale], &[], &[], &[], &[], chrono_tz::Pacific::Auckland);

        assert_eq!(rows[0].sale_note, "\"gift wrap\"");
        assert_eq!(rows[0].sale_date, "2018-02-27");
        assert_eq!(rows[0].sale_time, "15:51:31");
        assert_eq!(rows[1].sale_date, "2018-02-27");
        assert_eq!(rows[1].sale_time, "15:51:31");
        assert_eq!(rows[1].sale_note, "");
    }

    #[test]
    fn test_absent_numbers_render_empty() {
        let sale = Sale {
            line_items: vec![LineItem::default()],
            payments: vec![Payment::default()],
            ..closed_sale("1")
        };

        let rows = build_ledger(&[sale], &[], &[], &[], &[], chrono_tz::UTC);

        assert_eq!(rows[0].price, "");
        assert_eq!(rows[0].total, "0");
        assert_eq!(rows[1].price, "");
        assert_eq!(rows[1].quantity, "");
        assert_eq!(rows[1].total, "0");
        assert_eq!(rows[2].paid, "");
    }

    #[test]
    fn test_build_is_deterministic() {
        let (sales, customers, products, registers) = scenario();
        let denormalizer =
            Denormalizer::new(&customers, &products, &registers, &[], chrono_tz::UTC);

        assert_eq!(denormalizer.build(&sales).rows, denormalizer.build(&sales).rows);
    }

    #[test]
    fn test_no_sales_gives_no_rows() {
        let ledger = Denormalizer::new(&[], &[], &[], &[], chrono_tz::UTC).build(&[]);
        assert!(ledger.rows.is_empty());
        assert_eq!(ledger.stats, LedgerStats::default());
    }
}
