//! Work Order Draft
//!
//! What the creation form collects before anything is sent. The customer and
//! vehicle may already exist; matching decides whether they are reused.

use crate::api::{CustomerInput, VehicleInput, WorkOrderInput};
use crate::billing::WorkOrderTotals;
use crate::matching::{find_customer, find_vehicle};
use crate::models::{Customer, PartLine, ServiceLine, Vehicle, WorkOrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderDraft {
    pub customer: CustomerInput,
    pub vehicle: VehicleInput,
    pub services: Vec<ServiceLine>,
    pub parts: Vec<PartLine>,
    pub worker_ids: Vec<u32>,
    pub discount: f64,
    pub parking_charge: f64,
    pub notes: Option<String>,
}

/// Existing records the draft resolves to; `None` means create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub customer_id: Option<u32>,
    pub vehicle_id: Option<u32>,
}

/// Something a submit created before the work order itself
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedRecord {
    Customer(Customer),
    Vehicle(Vehicle),
}

/// Records created by submits that failed part-way. They take part in
/// matching until the cache catches up, so a resubmit reuses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatedRecords {
    pub customers: Vec<Customer>,
    pub vehicles: Vec<Vehicle>,
}

impl CreatedRecords {
    pub fn push(&mut self, record: CreatedRecord) {
        match record {
            CreatedRecord::Customer(c) => self.customers.push(c),
            CreatedRecord::Vehicle(v) => self.vehicles.push(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.vehicles.is_empty()
    }

    /// Cached lists plus whatever they do not have yet
    pub fn merge_into(&self, mut customers: Vec<Customer>, mut vehicles: Vec<Vehicle>) -> (Vec<Customer>, Vec<Vehicle>) {
        for c in &self.customers {
            if !customers.iter().any(|known| known.id == c.id) {
                customers.push(c.clone());
            }
        }
        for v in &self.vehicles {
            if !vehicles.iter().any(|known| known.id == v.id) {
                vehicles.push(v.clone());
            }
        }
        (customers, vehicles)
    }
}

impl WorkOrderDraft {
    pub fn resolve(&self, customers: &[Customer], vehicles: &[Vehicle]) -> Resolution {
        let customer = find_customer(customers, &self.customer.name, &self.customer.phone);
        let vehicle = find_vehicle(
            vehicles,
            self.vehicle.vin.as_deref().unwrap_or(""),
            &self.vehicle.registration_number,
        );
        Resolution {
            customer_id: customer.map(|c| c.id),
            vehicle_id: vehicle.map(|v| v.id),
        }
    }

    pub fn totals(&self) -> WorkOrderTotals {
        WorkOrderTotals::compute(&self.services, &self.parts, self.discount, self.parking_charge)
    }

    /// New vehicles are registered to the resolved customer
    pub fn vehicle_for(&self, customer_id: u32) -> VehicleInput {
        VehicleInput {
            customer_id: Some(customer_id),
            ..self.vehicle.clone()
        }
    }

    pub fn to_input(&self, customer_id: u32, vehicle_id: u32) -> WorkOrderInput {
        let totals = self.totals();
        WorkOrderInput {
            customer_id,
            vehicle_id,
            status: WorkOrderStatus::Pending,
            services: self.services.clone(),
            parts: self.parts.clone(),
            worker_ids: self.worker_ids.clone(),
            discount: totals.discount.as_amount(),
            parking_charge: totals.parking.as_amount(),
            taxes: totals.taxes.as_amount(),
            total: totals.total.as_amount(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> WorkOrderDraft {
        WorkOrderDraft {
            customer: CustomerInput {
                name: "RAVI kumar".into(),
                phone: "+91 98450 12345".into(),
                ..Default::default()
            },
            vehicle: VehicleInput {
                make: "Hyundai".into(),
                model: "i20".into(),
                registration_number: "ka 05 mn 4321".into(),
                ..Default::default()
            },
            services: vec![ServiceLine { service_id: Some(1), name: "General service".into(), quantity: 1.0, unit_price: 2000.0 }],
            parts: vec![PartLine { inventory_id: Some(7), name: "Oil filter".into(), quantity: 1.0, unit_price: 350.0 }],
            worker_ids: vec![3],
            discount: 350.0,
            parking_charge: 100.0,
            notes: None,
        }
    }

    fn customer(id: u32, name: &str, phone: &str) -> Customer {
        Customer { id, name: name.into(), phone: phone.into(), email: None, address: None, notes: None, created_at: None }
    }

    #[test]
    fn test_resolve_reuses_existing_records() {
        let customers = vec![customer(5, "Ravi Kumar", "9845012345")];
        let vehicles = vec![Vehicle {
            id: 11,
            customer_id: Some(5),
            make: "Hyundai".into(),
            model: "i20".into(),
            year: None,
            registration_number: "KA05MN4321".into(),
            vin: None,
            mileage: None,
            color: None,
        }];
        let resolution = draft().resolve(&customers, &vehicles);
        assert_eq!(resolution, Resolution { customer_id: Some(5), vehicle_id: Some(11) });
    }

    #[test]
    fn test_resolve_new_records() {
        let resolution = draft().resolve(&[customer(1, "Anita", "9000000000")], &[]);
        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn test_to_input_carries_totals() {
        let input = draft().to_input(5, 11);
        // taxable = 2000 + 350 - 350 = 2000 -> 360 tax
        assert_eq!(input.taxes, 360.0);
        // 2000 + 350 + 360 + 100 - 350
        assert_eq!(input.total, 2460.0);
        assert_eq!(input.status, WorkOrderStatus::Pending);
        assert_eq!(draft().vehicle_for(5).customer_id, Some(5));
    }

    #[test]
    fn test_partial_submit_is_reused_on_retry() {
        let created_customer = customer(7, "Ravi Kumar", "+91 98450 12345");
        let mut created = CreatedRecords::default();
        assert!(created.is_empty());
        created.push(CreatedRecord::Customer(created_customer.clone()));

        // Vehicle creation failed; cache still has neither
        let (customers, vehicles) = created.merge_into(vec![customer(1, "Anita", "9000000000")], vec![]);
        let resolution = draft().resolve(&customers, &vehicles);
        assert_eq!(resolution, Resolution { customer_id: Some(7), vehicle_id: None });

        // Once the cache has it, nothing is listed twice
        let (customers, _) = created.merge_into(vec![created_customer], vec![]);
        assert_eq!(customers.len(), 1);
    }

    #[test]
    fn test_created_customer_ignored_after_edit() {
        let mut created = CreatedRecords::default();
        created.push(CreatedRecord::Customer(customer(7, "Ravi Kumar", "9845012345")));
        let mut edited = draft();
        edited.customer.name = "Meena".into();
        edited.customer.phone = "9123456780".into();
        let (customers, vehicles) = created.merge_into(vec![], vec![]);
        assert_eq!(edited.resolve(&customers, &vehicles).customer_id, None);
    }
}
