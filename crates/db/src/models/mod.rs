pub mod allocation;
pub mod allocation_type;
pub mod barangay;
pub mod commodity;
pub mod crop_damage;
pub mod eligibility;
pub mod farm;
pub mod farmer;
pub mod user;
