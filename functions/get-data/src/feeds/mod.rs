//! The two upstream feeds merged by the function

pub(crate) const OCTOPUS_API_BASE: &str = "https://api.octopus.energy/v1";
pub(crate) const CARBON_INTENSITY_API_BASE: &str = "https://api.carbonintensity.org.uk";

pub(crate) mod carbon;
pub(crate) mod prices;
