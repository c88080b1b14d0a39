//! Vehicle details scraped from a vahanx.in registration page

pub mod extract;
pub mod record;

pub use extract::VehiclePage;
pub use record::{Insurance, OtherInfo, OwnershipDetails, Validity, VehicleDetails, VehicleRecord};

use indexmap::IndexMap;

/// The page only renders the insurance block for lapsed policies
const INSURANCE_STATUS: &str = "Expired";

fn take(fields: &mut IndexMap<String, String>, key: &str) -> String {
    fields.shift_remove(key).unwrap_or_default()
}

/// Build a [`VehicleRecord`] from the page markup
pub fn parse_vehicle_page(html: &str) -> VehicleRecord {
    let page = VehiclePage::parse(html);

    let mut ownership = page.section_fields(
        "Ownership Details",
        &["Owner Name", "Owner Serial No", "Registration Number", "Registered RTO"],
    );
    let mut vehicle =
        page.section_fields("Vehicle Details", &["Model Name", "Maker Model", "Vehicle Class", "Fuel Type", "Fuel Norms"]);
    let mut insurance = page.section_fields("Insurance Information", &["Insurance Expiry"]);
    let mut validity = page.section_fields(
        "Important Dates",
        &["Registration Date", "Vehicle Age", "Fitness Upto", "Insurance Upto", "Insurance Expiry In"],
    );
    let mut other = page.section_fields(
        "Other Information",
        &["Financer Name", "Cubic Capacity", "Seating Capacity", "Permit Type", "Blacklist Status", "NOC Details"],
    );

    VehicleRecord {
        registration_number: page.heading(),
        modal_name: page.card_value("Modal Name"),
        owner_name: page.card_value("Owner Name"),
        code: page.card_value("Code"),
        city: page.card_value("City Name"),
        phone: page.card_value("Phone"),
        website: page.card_value("Website"),
        address: page.card_value("Address"),
        ownership_details: OwnershipDetails {
            owner_name: take(&mut ownership, "owner_name"),
            serial_no: take(&mut ownership, "owner_serial_no"),
            rto: take(&mut ownership, "registered_rto"),
        },
        vehicle_details: VehicleDetails {
            maker: take(&mut vehicle, "model_name"),
            model: take(&mut vehicle, "maker_model"),
            vehicle_class: take(&mut vehicle, "vehicle_class"),
            fuel_type: take(&mut vehicle, "fuel_type"),
            fuel_norms: take(&mut vehicle, "fuel_norms"),
        },
        insurance: Insurance {
            status: INSURANCE_STATUS.to_string(),
            expiry_date: take(&mut insurance, "insurance_expiry"),
            expired_days_ago: page.expired_days(),
        },
        validity: Validity {
            registration_date: take(&mut validity, "registration_date"),
            vehicle_age: take(&mut validity, "vehicle_age"),
            fitness_upto: take(&mut validity, "fitness_upto"),
            insurance_upto: take(&mut validity, "insurance_upto"),
            insurance_status: take(&mut validity, "insurance_expiry_in"),
        },
        other_info: OtherInfo {
            financer: take(&mut other, "financer_name"),
            cubic_capacity: take(&mut other, "cubic_capacity"),
            seating_capacity: take(&mut other, "seating_capacity"),
            permit_type: take(&mut other, "permit_type"),
            blacklist_status: take(&mut other, "blacklist_status"),
            noc: take(&mut other, "noc_details"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_PAGE: &str = r#"
        <html><body>
          <h1>MH12AB1234</h1>
          <div class="hrcd-cardbody"><span>Modal Name</span><p>SWIFT DZIRE</p></div>
          <div class="hrcd-cardbody"><span>Owner Name</span><p>A*** K****</p></div>
          <div class="hrcd-cardbody"><span>Code</span><p>MH12</p></div>
          <div class="hrcd-cardbody"><span>City Name</span><p>Pune</p></div>
          <div class="hrcd-cardbody"><span>Phone</span><p>020-26058080</p></div>
          <div class="hrcd-cardbody"><span>Website</span><p>transport.maharashtra.gov.in</p></div>
          <div class="hrcd-cardbody"><span>Address</span><p>Sangam Bridge, Pune</p></div>

          <div class="hrc-details-card"><h3>Ownership Details</h3>
            <span>Owner Name</span><p>A*** K****</p>
            <span>Owner Serial No</span><p>1</p>
            <span>Registered RTO</span><p>PUNE</p>
          </div>
          <div class="hrc-details-card"><h3>Vehicle Details</h3>
            <span>Model Name</span><p>MARUTI SUZUKI INDIA LTD</p>
            <span>Maker Model</span><p>SWIFT DZIRE VXI</p>
            <span>Vehicle Class</span><p>Motor Car(LMV)</p>
            <span>Fuel Type</span><p>PETROL</p>
            <span>Fuel Norms</span><p>BHARAT STAGE IV</p>
          </div>
          <div class="insurance-alert-box expired"><p class="title">Expired 42 days ago</p></div>
          <div class="hrc-details-card"><h3>Insurance Information</h3>
            <span>Insurance Expiry</span><p>07-Sep-2026</p>
          </div>
          <div class="hrc-details-card"><h3>Important Dates</h3>
            <span>Registration Date</span><p>12-Mar-2014</p>
            <span>Vehicle Age</span><p>12 years 7 months</p>
            <span>Fitness Upto</span><p>11-Mar-2029</p>
            <span>Insurance Upto</span><p>07-Sep-2026</p>
            <span>Insurance Expiry In</span><p>Expired</p>
          </div>
          <div class="hrc-details-card"><h3>Other Information</h3>
            <span>Financer Name</span><p>HDFC BANK</p>
            <span>Cubic Capacity</span><p>1197</p>
            <span>Seating Capacity</span><p>5</p>
            <span>Permit Type</span><p>NA</p>
            <span>Blacklist Status</span><p>NA</p>
            <span>NOC Details</span><p>NA</p>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_full_page() {
        let record = parse_vehicle_page(FULL_PAGE);

        let expected = VehicleRecord {
            registration_number: "MH12AB1234".to_string(),
            modal_name: "SWIFT DZIRE".to_string(),
            owner_name: "A*** K****".to_string(),
            code: "MH12".to_string(),
            city: "Pune".to_string(),
            phone: "020-26058080".to_string(),
            website: "transport.maharashtra.gov.in".to_string(),
            address: "Sangam Bridge, Pune".to_string(),
            ownership_details: OwnershipDetails {
                owner_name: "A*** K****".to_string(),
                serial_no: "1".to_string(),
                rto: "PUNE".to_string(),
            },
            vehicle_details: VehicleDetails {
                maker: "MARUTI SUZUKI INDIA LTD".to_string(),
                model: "SWIFT DZIRE VXI".to_string(),
                vehicle_class: "Motor Car(LMV)".to_string(),
                fuel_type: "PETROL".to_string(),
                fuel_norms: "BHARAT STAGE IV".to_string(),
            },
            insurance: Insurance {
                status: "Expired".to_string(),
                expiry_date: "07-Sep-2026".to_string(),
                expired_days_ago: Some(42),
            },
            validity: Validity {
                registration_date: "12-Mar-2014".to_string(),
                vehicle_age: "12 years 7 months".to_string(),
                fitness_upto: "11-Mar-2029".to_string(),
                insurance_upto: "07-Sep-2026".to_string(),
                insurance_status: "Expired".to_string(),
            },
            other_info: OtherInfo {
                financer: "HDFC BANK".to_string(),
                cubic_capacity: "1197".to_string(),
                seating_capacity: "5".to_string(),
                permit_type: "NA".to_string(),
                blacklist_status: "NA".to_string(),
                noc: "NA".to_string(),
            },
        };
        assert_eq!(record, expected);
    }

    #[test]
    fn test_only_modal_name_card() {
        let html = r#"<h1>MH12AB1234</h1><div class="hrcd-cardbody"><span>Modal Name</span><p>Swift</p></div>"#;
        let record = parse_vehicle_page(html);

        assert_eq!(record.registration_number, "MH12AB1234");
        assert_eq!(record.modal_name, "Swift");
        assert_eq!(record.vehicle_details.maker, "");
        assert_eq!(record.vehicle_details.model, "");
        assert_eq!(record.owner_name, "");
        assert_eq!(record.insurance.status, "Expired");
        assert_eq!(record.insurance.expired_days_ago, None);
    }

    #[test]
    fn test_absent_fields_serialize_as_empty_strings() {
        let json = serde_json::to_value(parse_vehicle_page("<html><body></body></html>")).unwrap();

        assert_eq!(json["registration_number"], "");
        assert_eq!(json["ownership_details"]["serial_no"], "");
        assert_eq!(json["vehicle_details"]["fuel_norms"], "");
        assert_eq!(json["validity"]["insurance_status"], "");
        assert_eq!(json["other_info"]["noc"], "");
        assert_eq!(json["insurance"]["expiry_date"], "");
        assert!(json["insurance"]["expired_days_ago"].is_null());
        assert_eq!(json["other_info"].as_object().unwrap().len(), 6);
    }
}
