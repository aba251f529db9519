pub mod allocation_types;
pub mod allocations;
pub mod barangays;
pub mod commodities;
pub mod crop_damages;
pub mod dashboard;
pub mod eligibilities;
pub mod farmers;
pub mod farms;
pub mod health;
pub mod users;
