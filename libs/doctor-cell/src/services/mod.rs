pub mod availability;
pub mod directory;

pub use availability::AvailabilityIndex;
pub use directory::{
    filter, resolve_doctor_name, specialties, Directory, DirectoryFilter, SpecialtyFilter,
    ALL_SPECIALTIES,
};
