//! Work Order Billing
//!
//! Totals shown on the work order form and list.
//! taxes = 18% of (services + parts - discount), never negative.
//! total = services + parts + taxes + parking - discount.

use crate::models::{PartLine, ServiceLine, WorkOrder};
use crate::money::Money;

/// GST on labour and parts, in basis points
pub const TAX_RATE_BPS: u32 = 1800;

/// Anything that bills as quantity x unit price
pub trait LineItem {
    fn quantity(&self) -> f64;
    fn unit_price(&self) -> f64;

    fn line_total(&self) -> Money {
        Money::from_amount(self.unit_price()).times(self.quantity())
    }
}

impl LineItem for ServiceLine {
    fn quantity(&self) -> f64 {
        self.quantity
    }
    fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

impl LineItem for PartLine {
    fn quantity(&self) -> f64 {
        self.quantity
    }
    fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

pub fn subtotal<L: LineItem>(lines: &[L]) -> Money {
    lines.iter().map(LineItem::line_total).sum()
}

pub fn services_subtotal(lines: &[ServiceLine]) -> Money {
    subtotal(lines)
}

pub fn parts_subtotal(lines: &[PartLine]) -> Money {
    subtotal(lines)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkOrderTotals {
    pub services: Money,
    pub parts: Money,
    pub discount: Money,
    pub parking: Money,
    pub taxes: Money,
    pub total: Money,
}

impl WorkOrderTotals {
    pub fn compute(services: &[ServiceLine], parts: &[PartLine], discount: f64, parking: f64) -> Self {
        let services = services_subtotal(services);
        let parts = parts_subtotal(parts);
        let discount = Money::from_amount(discount);
        let parking = Money::from_amount(parking);

        let taxable = (services + parts - discount).max(Money::ZERO);
        let taxes = taxable.percentage(TAX_RATE_BPS);
        let total = services + parts + taxes + parking - discount;

        Self { services, parts, discount, parking, taxes, total }
    }

    pub fn for_order(order: &WorkOrder) -> Self {
        Self::compute(&order.services, &order.parts, order.discount, order.parking_charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(price: f64, qty: f64) -> ServiceLine {
        ServiceLine { service_id: None, name: "Labour".into(), quantity: qty, unit_price: price }
    }

    fn part(price: f64, qty: f64) -> PartLine {
        PartLine { inventory_id: None, name: "Part".into(), quantity: qty, unit_price: price }
    }

    #[test]
    fn test_total_with_tax_parking_and_discount() {
        let totals = WorkOrderTotals::compute(
            &[service(500.0, 1.0), service(250.0, 2.0)],
            &[part(300.0, 2.0)],
            100.0,
            50.0,
        );
        assert_eq!(totals.services, Money::from_amount(1000.0));
        assert_eq!(totals.parts, Money::from_amount(600.0));
        // 18% of 1500
        assert_eq!(totals.taxes, Money::from_amount(270.0));
        // 1000 + 600 + 270 + 50 - 100
        assert_eq!(totals.total, Money::from_amount(1820.0));
    }

    #[test]
    fn test_empty_order_is_zero() {
        let totals = WorkOrderTotals::compute(&[], &[], 0.0, 0.0);
        assert_eq!(totals, WorkOrderTotals::default());
    }

    #[test]
    fn test_discount_larger_than_subtotal_has_no_negative_tax() {
        let totals = WorkOrderTotals::compute(&[service(100.0, 1.0)], &[], 150.0, 0.0);
        assert_eq!(totals.taxes, Money::ZERO);
        assert_eq!(totals.total, Money::from_amount(-50.0));
    }

    #[test]
    fn test_malformed_numbers_count_as_zero() {
        let totals = WorkOrderTotals::compute(&[service(f64::NAN, 1.0)], &[part(10.0, f64::NAN)], f64::NAN, 0.0);
        assert_eq!(totals.total, Money::ZERO);
    }

    #[test]
    fn test_tax_rounding_on_paise() {
        // 18% of 99.99 = 17.9982 -> 18.00
        let totals = WorkOrderTotals::compute(&[service(99.99, 1.0)], &[], 0.0, 0.0);
        assert_eq!(totals.taxes.paise(), 1800);
        assert_eq!(totals.total.paise(), 11799);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let totals = WorkOrderTotals::compute(&[service(100.0, 1.0)], &[], 0.0, 1e300);
        assert_eq!(totals.parking.paise(), i64::MAX);
        assert_eq!(totals.total.paise(), i64::MAX);

        let lines = vec![service(500.0, 1e20), service(500.0, 1e20)];
        let totals = WorkOrderTotals::compute(&lines, &[], 0.0, 0.0);
        assert_eq!(totals.services.paise(), i64::MAX);
        assert!(!totals.taxes.is_negative());

        let totals = WorkOrderTotals::compute(&[service(100.0, 1.0)], &[], 1e300, 0.0);
        assert_eq!(totals.taxes, Money::ZERO);
        assert!(totals.total.is_negative());
    }
}
