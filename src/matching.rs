//! Existing Record Matching
//!
//! Used by the work order form to reuse a customer or vehicle that is
//! already on file instead of creating a duplicate.

use crate::models::{Customer, Vehicle};

/// Digits only: "+91 98450-12345" -> "919845012345"
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trimmed, lowercased, single-spaced
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercased with spaces and hyphens removed ("ka-01 ab 1234" -> "KA01AB1234")
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn normalize_vin(vin: &str) -> String {
    normalize_plate(vin)
}

/// Equal digit strings, or the same trailing 10 digits when a country
/// code is present on one side only.
pub fn phones_match(a: &str, b: &str) -> bool {
    let a = normalize_phone(a);
    let b = normalize_phone(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    a.len() >= 10 && b.len() >= 10 && a[a.len() - 10..] == b[b.len() - 10..]
}

/// Phone match wins over name match.
pub fn find_customer<'a>(customers: &'a [Customer], name: &str, phone: &str) -> Option<&'a Customer> {
    if !normalize_phone(phone).is_empty() {
        if let Some(found) = customers.iter().find(|c| phones_match(&c.phone, phone)) {
            return Some(found);
        }
    }
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    customers.iter().find(|c| normalize_name(&c.name) == wanted)
}

/// VIN match wins over registration match.
pub fn find_vehicle<'a>(vehicles: &'a [Vehicle], vin: &str, registration: &str) -> Option<&'a Vehicle> {
    let vin = normalize_vin(vin);
    if !vin.is_empty() {
        let hit = vehicles
            .iter()
            .find(|v| v.vin.as_deref().map(normalize_vin).as_deref() == Some(vin.as_str()));
        if hit.is_some() {
            return hit;
        }
    }
    let plate = normalize_plate(registration);
    if plate.is_empty() {
        return None;
    }
    vehicles.iter().find(|v| normalize_plate(&v.registration_number) == plate)
}

/// Case-insensitive substring filter used by list page search boxes
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = normalize_name(query);
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| normalize_name(f).contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: u32, name: &str, phone: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
            notes: None,
            created_at: None,
        }
    }

    fn vehicle(id: u32, plate: &str, vin: Option<&str>) -> Vehicle {
        Vehicle {
            id,
            customer_id: Some(1),
            make: "Honda".into(),
            model: "City".into(),
            year: Some(2019),
            registration_number: plate.to_string(),
            vin: vin.map(String::from),
            mileage: None,
            color: None,
        }
    }

    #[test]
    fn test_normalize_phone_strips_non_digits() {
        assert_eq!(normalize_phone("(984) 501-2345"), "9845012345");
        assert_eq!(normalize_phone("n/a"), "");
    }

    #[test]
    fn test_customer_matched_by_formatted_phone() {
        let customers = vec![customer(1, "Ravi Kumar", "98450 12345"), customer(2, "Anita", "9000000000")];
        let found = find_customer(&customers, "Someone Else", "+91-98450-12345").unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_customer_matched_by_name_case_insensitive() {
        let customers = vec![customer(1, "Ravi  Kumar", "")];
        let found = find_customer(&customers, "  ravi KUMAR ", "").unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_phone_takes_priority_over_name() {
        let customers = vec![customer(1, "Ravi", "111"), customer(2, "Anita", "9845012345")];
        let found = find_customer(&customers, "Ravi", "9845012345").unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_empty_inputs_never_match() {
        let customers = vec![customer(1, "", "")];
        assert!(find_customer(&customers, "   ", "--").is_none());
        let vehicles = vec![vehicle(1, "", None)];
        assert!(find_vehicle(&vehicles, "", " ").is_none());
    }

    #[test]
    fn test_vehicle_matched_by_vin_then_plate() {
        let vehicles = vec![
            vehicle(1, "KA01AB1234", None),
            vehicle(2, "MH12XY0001", Some("1HGCM82633A004352")),
        ];
        assert_eq!(find_vehicle(&vehicles, "1hgcm82633a004352", "").unwrap().id, 2);
        assert_eq!(find_vehicle(&vehicles, "", "ka-01 ab 1234").unwrap().id, 1);
        assert_eq!(find_vehicle(&vehicles, "UNKNOWNVIN", "ka01ab1234").unwrap().id, 1);
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("", &["anything"]));
        assert!(matches_query("swift", &["Maruti", "SWIFT Dzire"]));
        assert!(!matches_query("city", &["Maruti", "Swift"]));
    }
}
