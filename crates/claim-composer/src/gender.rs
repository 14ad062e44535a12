//! Gendered legal terms for each party
//!
//! Hebrew legal prose inflects the party title, pronouns and most verbs by
//! the party's sex. When the sex is absent the configured default (feminine)
//! is used.

use shared_types::{non_blank, Party, Sex};

use crate::format::NOT_SPECIFIED;

/// Procedural role of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Claimant,
    Respondent,
}

impl Role {
    pub fn other(&self) -> Role {
        match self {
            Role::Claimant => Role::Respondent,
            Role::Respondent => Role::Claimant,
        }
    }
}

/// Title, pronoun and possessive forms for one party
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderTerms {
    pub role: Role,
    pub sex: Sex,
    /// "התובע" / "התובעת"
    pub title: &'static str,
    /// "הוא" / "היא"
    pub pronoun: &'static str,
    /// "שלו" / "שלה"
    pub possessive: &'static str,
    pub name: String,
}

impl GenderTerms {
    /// Resolve the terms for a role from a recorded sex and display name
    pub fn resolve(role: Role, sex: Option<Sex>, name: &str, default_sex: Sex) -> Self {
        let sex = sex.unwrap_or(default_sex);
        let (title, pronoun, possessive) = match (role, sex) {
            (Role::Claimant, Sex::Male) => ("התובע", "הוא", "שלו"),
            (Role::Claimant, Sex::Female) => ("התובעת", "היא", "שלה"),
            (Role::Respondent, Sex::Male) => ("הנתבע", "הוא", "שלו"),
            (Role::Respondent, Sex::Female) => ("הנתבעת", "היא", "שלה"),
        };
        Self {
            role,
            sex,
            title,
            pronoun,
            possessive,
            name: name.to_string(),
        }
    }

    /// Resolve the terms for a party record
    pub fn for_party(role: Role, party: &Party, default_sex: Sex) -> Self {
        let name = non_blank(party.full_name.as_deref()).unwrap_or(NOT_SPECIFIED);
        Self::resolve(role, party.sex, name, default_sex)
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Choose between the masculine and feminine form of a word
    pub fn pick<'a>(&self, male: &'a str, female: &'a str) -> &'a str {
        if self.is_male() {
            male
        } else {
            female
        }
    }

    /// Title followed by the name, e.g. "התובעת, דנה כהן"
    pub fn titled_name(&self) -> String {
        format!("{}, {}", self.title, self.name)
    }
}
