//! Types shared between the composition engine and document serializers
//!
//! - [`case`]: the client intake record
//! - [`document`]: the document node algebra and the serializer capability

pub mod case;
pub mod document;

pub use case::{
    non_blank, AlimonyAnswers, AmountText, Attachment, CaseRecord, Child, ClaimType,
    CustodyAnswers, DivorceAgreementAnswers, DivorceAnswers, DomesticViolence, Employment,
    EmploymentStatus, Housing, ImageData, Lawyer, MaritalStatus, OtherCase, Party,
    PropertyAnswers, PropertyItem, Questionnaire, Relationship, Sex, Signatures, WelfareContact,
};
pub use document::{
    Align, Cell, Direction, Document, DocumentSerializer, Heading, Image, Node, Paragraph, Run,
    StyleConfig, Table,
};
