//! Bill payload sent to the assistant
//!
//! Money fields stay JSON numbers on the wire. Fields this crate does not
//! know about are kept in `extra` and forwarded untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seller or buyer on an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gst_number: String,
    #[serde(default)]
    pub contact: String,
}

/// One invoice line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    #[serde(default)]
    pub description: String,
    /// HSN (goods) or SAC (services) code
    #[serde(default)]
    pub hsn_sac: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub subtotal: Decimal,
    /// GST rate in percent
    #[serde(with = "rust_decimal::serde::float", default)]
    pub gst_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub gst_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub total: Decimal,
}

/// A GST invoice as submitted with an expense claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillDocument {
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub seller: Party,
    #[serde(default)]
    pub buyer: Party,
    #[serde(default)]
    pub bill_items: Vec<BillItem>,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub gst_total: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub grand_total: Decimal,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub signature: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BillDocument {
    /// Sum of line totals
    pub fn items_total(&self) -> Decimal {
        self.bill_items.iter().map(|item| item.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "invoice_number": "X33",
            "invoice_date": "2024-02-07",
            "due_date": "2024-02-20",
            "seller": {
                "name": "Sleek Bill",
                "address": "Long Business Co, XYZ Building, New Delhi, India",
                "gst_number": "27AABQA12S4A1Z5",
                "contact": "+91 9876543210"
            },
            "buyer": {
                "name": "AB Company",
                "address": "ABC Tower, Mumbai, India",
                "gst_number": "27AAAPA1234A1Z5",
                "contact": "+91 9123456789"
            },
            "bill_items": [{
                "description": "Service 1",
                "hsn_sac": "9983",
                "quantity": 2,
                "rate": 5000,
                "subtotal": 10000,
                "gst_rate": 18,
                "gst_amount": 1800,
                "total": 11800
            }],
            "subtotal": 10000,
            "gst_total": 1800,
            "grand_total": 11800,
            "payment_terms": "Payment due in 15 days",
            "signature": "Authorized Signatory"
        })
    }

    #[test]
    fn test_parse_invoice() {
        let bill: BillDocument = serde_json::from_value(sample()).unwrap();

        assert_eq!(bill.invoice_number, "X33");
        assert_eq!(bill.seller.gst_number, "27AABQA12S4A1Z5");
        assert_eq!(bill.bill_items.len(), 1);
        assert_eq!(bill.bill_items[0].gst_amount, dec!(1800));
        assert_eq!(bill.grand_total, dec!(11800));
        assert_eq!(bill.items_total(), dec!(11800));
        assert!(bill.extra.is_empty());
    }

    #[test]
    fn test_money_serialized_as_numbers() {
        let bill: BillDocument = serde_json::from_value(sample()).unwrap();
        let json = serde_json::to_value(&bill).unwrap();

        assert!(json["grand_total"].is_number());
        assert_eq!(json["bill_items"][0]["rate"].as_f64(), Some(5000.0));
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let mut raw = sample();
        raw["place_of_supply"] = serde_json::json!("Maharashtra");

        let bill: BillDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(
            bill.extra.get("place_of_supply"),
            Some(&serde_json::json!("Maharashtra"))
        );

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["place_of_supply"], "Maharashtra");
    }

    #[test]
    fn test_missing_invoice_number_rejected() {
        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("invoice_number");

        assert!(serde_json::from_value::<BillDocument>(raw).is_err());
    }
}
