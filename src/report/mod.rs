pub mod aggregate;
pub mod html;

pub use aggregate::ArchetypeGroups;
