use serde::{Deserialize, Serialize};

/// Everything the service reports about one registration
///
/// String fields are empty when the page does not show them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub registration_number: String,
    pub modal_name: String,
    pub owner_name: String,
    pub code: String,
    pub city: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub ownership_details: OwnershipDetails,
    pub vehicle_details: VehicleDetails,
    pub insurance: Insurance,
    pub validity: Validity,
    pub other_info: OtherInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipDetails {
    pub owner_name: String,
    pub serial_no: String,
    pub rto: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// Taken from the "Model Name" row
    pub maker: String,
    /// Taken from the "Maker Model" row
    pub model: String,
    pub vehicle_class: String,
    pub fuel_type: String,
    pub fuel_norms: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    pub status: String,
    pub expiry_date: String,
    /// `null` unless the page shows the expired-insurance banner with a day count
    pub expired_days_ago: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub registration_date: String,
    pub vehicle_age: String,
    pub fitness_upto: String,
    pub insurance_upto: String,
    pub insurance_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherInfo {
    pub financer: String,
    pub cubic_capacity: String,
    pub seating_capacity: String,
    pub permit_type: String,
    pub blacklist_status: String,
    pub noc: String,
}
