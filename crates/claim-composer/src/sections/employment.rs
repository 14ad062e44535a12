//! Employment narrative per party

use shared_types::{non_blank, EmploymentStatus};

use crate::context::ComposeContext;
use crate::format::{format_currency, NOT_SPECIFIED};
use crate::gender::Role;

/// One sentence describing a party's employment
///
/// The salary is printed as a grouped amount when it parses; otherwise the
/// text the client typed is shown as-is.
pub fn employment_narrative(ctx: &ComposeContext<'_>, role: Role) -> String {
    let terms = ctx.terms(role);
    let employment = &ctx.party(role).employment;
    let employer = non_blank(employment.employer.as_deref());
    let salary = employment
        .gross_salary
        .as_ref()
        .and_then(|amount| non_blank(Some(amount.as_str())).map(|text| (amount.coerce(), text)))
        .map(|(value, text)| {
            if value > 0 {
                format_currency(value)
            } else {
                text.to_string()
            }
        });

    match employment.status {
        Some(EmploymentStatus::Employee) => {
            let mut sentence = format!(
                "{} {} כ{}",
                terms.title,
                terms.pick("מועסק", "מועסקת"),
                terms.pick("שכיר", "שכירה")
            );
            if let Some(employer) = employer {
                sentence.push_str(&format!(" אצל {}", employer));
            }
            match &salary {
                Some(salary) => sentence.push_str(&format!(
                    " ומשתכר{} שכר ברוטו חודשי בסך {}.",
                    terms.pick("", "ת"),
                    salary
                )),
                None => sentence.push_str(&format!(", שכר{}: {}.", terms.pick("ו", "ה"), NOT_SPECIFIED)),
            }
            sentence
        }
        Some(EmploymentStatus::SelfEmployed) => {
            let mut sentence = format!(
                "{} {} כעצמאי{}",
                terms.title,
                terms.pick("עובד", "עובדת"),
                terms.pick("", "ת")
            );
            if let Some(business) = employer {
                sentence.push_str(&format!(" בעסק \"{}\"", business));
            }
            match &salary {
                Some(income) => sentence.push_str(&format!(
                    " והכנסת{} החודשית הממוצעת עומדת על סך {}.",
                    terms.pick("ו", "ה"),
                    income
                )),
                None => sentence.push_str(&format!(
                    ", הכנסת{}: {}.",
                    terms.pick("ו", "ה"),
                    NOT_SPECIFIED
                )),
            }
            sentence
        }
        Some(EmploymentStatus::Unemployed) => format!(
            "{} אינ{} {} כיום ואין {} הכנסה קבועה מעבודה.",
            terms.title,
            terms.pick("ו", "ה"),
            terms.pick("עובד", "עובדת"),
            terms.pick("לו", "לה")
        ),
        None => format!("מצב התעסוקה של {}: {}.", terms.title, NOT_SPECIFIED),
    }
}
