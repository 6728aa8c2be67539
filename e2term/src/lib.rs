//! e2term - E2 termination layer of a RAN simulation node
//!
//! Builds RIC indication headers/messages from typed measurement values,
//! decodes inbound RIC control messages, answers subscription requests
//! and advertises the KPM and RC service models.  Transport is a
//! collaborator behind the [`transport::E2Transport`] trait.

pub mod control;
pub mod function_description;
pub mod helper;
pub mod indication;
pub mod measurement;
pub mod rrc_measurements;
pub mod subscription;
pub mod transport;

pub use control::{RequestType, RicControlMessage};
pub use indication::{
    IndicationHeaderValues, IndicationMessageValues, KpmIndicationHeader, KpmIndicationMessage,
    NodeType, SubscriptionParameters, UeIdentityProvider,
};
pub use measurement::{MeasurementItem, MeasurementItemList};
