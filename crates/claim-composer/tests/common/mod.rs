//! Shared fixtures for the integration tests

#![allow(dead_code)]

use base64::Engine;
use chrono::NaiveDate;
use claim_composer::{ClaimEngine, EngineConfig};
use serde_json::json;
use shared_types::CaseRecord;

/// PNG file signature, enough for an image node to be emitted
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// `bytes` as a base64 data URL, the way the intake wizard uploads images
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

pub fn engine() -> ClaimEngine {
    ClaimEngine::new(EngineConfig::default())
        .unwrap()
        .with_today(today())
}

/// Property claim: two apartments ("both" and "claimant"), one joint debt,
/// a client signature and no attachments
pub fn property_case() -> CaseRecord {
    serde_json::from_value(json!({
        "id": "case-001",
        "submittedAt": "2024-08-28T09:15:00.000Z",
        "courtCity": "תל אביב",
        "claimTypes": ["property"],
        "claimant": {
            "fullName": "דנה כהן",
            "idNumber": "123456782",
            "address": "רחוב הרצל 10, תל אביב",
            "phone": "050-1234567",
            "sex": "female",
            "employment": {
                "status": "employee",
                "employer": "משרד החינוך",
                "grossSalary": "12,000"
            }
        },
        "respondent": {
            "fullName": "יוסי כהן",
            "idNumber": "987654321",
            "sex": "male",
            "employment": {
                "status": "selfEmployed",
                "employer": "כהן הנדסה",
                "grossSalary": 30000
            }
        },
        "children": [
            {"firstName": "נועה", "lastName": "כהן", "birthDate": "2014-03-02", "sex": "female"},
            {"firstName": "איתי", "lastName": "כהן", "birthDate": "2017-11-20", "sex": "male"}
        ],
        "relationship": {
            "maritalStatus": "married",
            "weddingDate": "2010-06-15",
            "separationDate": "2023-01-10"
        },
        "questionnaire": {
            "housing": {"currentOccupant": "claimant", "tenure": "owned"},
            "domesticViolence": {"occurred": false},
            "welfareContact": {"contacted": true, "unit": "יחידת הסיוע תל אביב"}
        },
        "property": {
            "apartments": [
                {"description": "דירה ברמת גן", "value": "3200000", "owner": "both"},
                {"description": "דירה בחולון", "value": "2800000", "owner": "claimant"}
            ],
            "debts": [
                {"description": "משכנתא", "amount": "450000", "debtor": "both"}
            ]
        },
        "signatures": {"client": data_url("image/png", &PNG_SIGNATURE)}
    }))
    .unwrap()
}

/// Divorce claim with free-text answers that go through the transformer
pub fn divorce_case() -> CaseRecord {
    serde_json::from_value(json!({
        "courtCity": "חיפה",
        "claimTypes": ["divorce"],
        "claimant": {"fullName": "רותם לוי", "sex": "female"},
        "respondent": {"fullName": "עמית לוי", "sex": "male"},
        "relationship": {"maritalStatus": "separated", "weddingDate": "2015-09-01"},
        "divorce": {
            "whoWantsDivorce": "אני רוצה להתגרש כי אין בינינו כבר כלום",
            "grounds": "הוא לא חוזר הביתה בלילות ולא משתתף בכלום",
            "reconciliationAttempts": true,
            "reconciliationDetails": "הלכנו לייעוץ זוגי חצי שנה"
        }
    }))
    .unwrap()
}
