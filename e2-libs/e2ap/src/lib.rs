//! e2ap - E2AP envelope subset for the RIC procedures this node takes part in

mod ies;
mod pdu;

pub use ies::*;
pub use pdu::*;
