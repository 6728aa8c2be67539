//! e2sm - E2SM-KPM and E2SM-RC grammar subset with APER codecs

pub mod ids;
mod kpm;
mod rc;
mod rrc;

pub use kpm::*;
pub use rc::*;
pub use rrc::*;
