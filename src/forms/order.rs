//! Purchase and sales order forms

use super::{FieldKind, FormField, FormSpec};

/// Quantity precision shared by line items and allocations
const QUANTITY: FieldKind = FieldKind::Decimal {
    max_digits: 10,
    decimal_places: 5,
};

fn choice(name: &str, source: &str) -> FormField {
    FormField::new(
        name,
        FieldKind::Choice {
            source: source.to_string(),
        },
    )
}

fn quantity() -> FormField {
    FormField::new("quantity", QUANTITY).label("Quantity").required()
}

fn confirm_form(name: &str, model: &str, help_text: &str) -> FormSpec {
    FormSpec::new(name, model).with_field(FormField::confirm(help_text))
}

fn edit_order_form(
    name: &str,
    model: &str,
    reference_prefix: &str,
    reference_placeholder: &str,
    party: &str,
    target_help: &str,
) -> FormSpec {
    FormSpec::new(name, model)
        .with_field(
            FormField::new("reference", FieldKind::Reference)
                .label("Reference")
                .prefix(reference_prefix)
                .placeholder(reference_placeholder)
                .required(),
        )
        .with_field(choice(party, "company").required())
        .with_field(FormField::new(
            format!("{party}_reference"),
            FieldKind::Reference,
        ))
        .with_field(FormField::new("description", FieldKind::Text).required())
        .with_field(
            FormField::new("target_date", FieldKind::Date)
                .label("Target Date")
                .help(target_help)
                .prefix("fa-calendar-alt"),
        )
        .with_field(FormField::new("link", FieldKind::Link).prefix("fa-link"))
        .with_field(choice("responsible", "owner"))
}

fn allocation_form(name: &str) -> FormSpec {
    FormSpec::new(name, "SalesOrderAllocation")
        .with_field(choice("line", "sales_order_line_item").required())
        .with_field(choice("item", "stock_item").required())
        .with_field(quantity())
}

/// Every order form
pub fn catalogue() -> Vec<FormSpec> {
    vec![
        confirm_form("issue_purchase_order", "PurchaseOrder", "Place order"),
        confirm_form(
            "complete_purchase_order",
            "PurchaseOrder",
            "Mark order as complete",
        ),
        confirm_form("cancel_purchase_order", "PurchaseOrder", "Cancel order"),
        confirm_form("cancel_sales_order", "SalesOrder", "Cancel order"),
        confirm_form("ship_sales_order", "SalesOrder", "Ship order"),
        FormSpec::new("receive_purchase_order", "PurchaseOrder").with_field(
            choice("location", "stock_location")
                .label("Destination")
                .help("Receive parts to this location")
                .required(),
        ),
        edit_order_form(
            "edit_purchase_order",
            "PurchaseOrder",
            "PO",
            "Purchase Order reference",
            "supplier",
            "Target date for order delivery. Order will be overdue after this date.",
        ),
        edit_order_form(
            "edit_sales_order",
            "SalesOrder",
            "SO",
            "Enter sales order number",
            "customer",
            "Target date for order completion. Order will be overdue after this date.",
        ),
        FormSpec::new("edit_purchase_order_line_item", "PurchaseOrderLineItem")
            .with_field(choice("order", "purchase_order").required())
            .with_field(choice("part", "supplier_part").required())
            .with_field(quantity())
            .with_field(FormField::new("reference", FieldKind::Reference))
            .with_field(FormField::new(
                "purchase_price",
                FieldKind::Decimal {
                    max_digits: 19,
                    decimal_places: 5,
                },
            ))
            .with_field(choice("destination", "stock_location"))
            .with_field(FormField::new("notes", FieldKind::Text)),
        FormSpec::new("edit_sales_order_line_item", "SalesOrderLineItem")
            .with_field(choice("order", "sales_order").required())
            .with_field(choice("part", "part").required())
            .with_field(quantity())
            .with_field(FormField::new("reference", FieldKind::Reference))
            .with_field(FormField::new(
                "sale_price",
                FieldKind::Decimal {
                    max_digits: 19,
                    decimal_places: 5,
                },
            ))
            .with_field(FormField::new("notes", FieldKind::Text)),
        FormSpec::new("allocate_serials_to_sales_order", "SalesOrderLineItem")
            .with_field(choice("line", "sales_order_line_item").required())
            .with_field(choice("part", "part").required())
            .with_field(
                FormField::new("serials", FieldKind::Text)
                    .label("Serial Numbers")
                    .help("Enter stock item serial numbers")
                    .required(),
            )
            .with_field(
                FormField::new("quantity", FieldKind::Integer { min: 1 })
                    .label("Quantity")
                    .help("Enter quantity of stock items")
                    .required(),
            ),
        allocation_form("create_sales_order_allocation"),
        allocation_form("edit_sales_order_allocation"),
    ]
}

/// Look up a form by name
pub fn find(name: &str) -> Option<FormSpec> {
    catalogue().into_iter().find(|form| form.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_unique() {
        let forms = catalogue();
        let names: HashSet<&str> = forms.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), forms.len());
        assert_eq!(forms.len(), 13);
    }

    #[test]
    fn test_edit_order_prefixes() {
        let po = find("edit_purchase_order").unwrap();
        let reference = po.field("reference").unwrap();
        assert_eq!(reference.prefix.as_deref(), Some("PO"));
        assert_eq!(
            reference.placeholder.as_deref(),
            Some("Purchase Order reference")
        );
        assert_eq!(po.field("link").unwrap().prefix.as_deref(), Some("fa-link"));
        assert_eq!(
            po.field("target_date").unwrap().prefix.as_deref(),
            Some("fa-calendar-alt")
        );
        assert!(po.field("supplier_reference").is_some());

        let so = find("edit_sales_order").unwrap();
        assert_eq!(so.field("reference").unwrap().prefix.as_deref(), Some("SO"));
        assert!(so.field("customer").is_some());
    }

    #[test]
    fn test_confirm_forms() {
        for name in [
            "issue_purchase_order",
            "complete_purchase_order",
            "cancel_purchase_order",
            "cancel_sales_order",
            "ship_sales_order",
        ] {
            let form = find(name).unwrap();
            assert_eq!(form.fields.len(), 1);
            let confirm = form.field("confirm").unwrap();
            assert!(confirm.required);
            assert_eq!(confirm.kind, FieldKind::Confirm);
        }
    }

    #[test]
    fn test_quantity_precision() {
        let line = find("edit_purchase_order_line_item").unwrap();
        assert_eq!(line.field("quantity").unwrap().kind, QUANTITY);

        let serials = find("allocate_serials_to_sales_order").unwrap();
        assert_eq!(
            serials.field("quantity").unwrap().kind,
            FieldKind::Integer { min: 1 }
        );
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("delete_everything").is_none());
    }
}
