//! Section builders shared by every claim composer

pub mod affidavit;
pub mod attachments;
pub mod details_form;
pub mod employment;
pub mod power_of_attorney;
pub mod property_summary;
pub mod relationship;

pub use affidavit::affidavit;
pub use attachments::{attachment_index, attachments_section, AttachmentPlan};
pub use details_form::statement_of_details;
pub use employment::employment_narrative;
pub use power_of_attorney::power_of_attorney;
pub use property_summary::property_summary;
pub use relationship::relationship_narrative;
