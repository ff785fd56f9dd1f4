pub mod application;
pub mod response;

pub use application::{
    ApplicationEmail, ApplicationRecord, ApplicationStatus, ApplicationUpdate,
    ApplicationsSnapshot, ManualApplication, RecordId,
};
pub use response::{
    BackendAck, CreatedApplication, GmailConnectResponse, GmailStatus, Recommendation,
    ScanSummary,
};
