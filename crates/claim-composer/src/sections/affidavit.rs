//! Sworn affidavit supporting the claim

use shared_types::Node;

use crate::context::ComposeContext;
use crate::format::{self, format_naive_date, or_not_specified};
use crate::gender::Role;
use crate::sections::power_of_attorney::lawyer_signature;

pub fn affidavit(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let style = ctx.style();
    let case = ctx.case;
    let deponent = ctx.terms(Role::Claimant);
    let id_number = or_not_specified(case.claimant.id_number.as_deref());

    let mut nodes = vec![
        format::title(style, "תצהיר"),
        format::paragraph(format!(
            "אני {}, {}, ת.ז. {}, לאחר שהוזהרתי כי עליי לומר את האמת וכי {} לעונשים הקבועים בחוק אם לא אעשה כן, {} בזה בכתב כדלקמן:",
            deponent.pick("החתום מטה", "החתומה מטה"),
            deponent.name,
            id_number,
            deponent.pick("אהיה צפוי", "אהיה צפויה"),
            deponent.pick("מצהיר", "מצהירה")
        )),
    ];
    nodes.extend(format::numbered_list([
        format!("אני {} בהליך זה.", deponent.title),
        format!(
            "תצהירי זה ניתן בתמיכה ל{} שהגשתי נגד {}.",
            ctx.claim.label(),
            ctx.respondent.titled_name()
        ),
        "העובדות המפורטות בכתב התביעה ובהרצאת הפרטים ידועות לי מידיעה אישית, אלא אם צוין אחרת, והן אמת.".to_string(),
        "זהו שמי, זו חתימתי ותוכן תצהירי אמת.".to_string(),
    ]));
    nodes.extend(format::signature_block(
        style,
        case.signatures.client.as_ref(),
        &deponent.name,
    ));

    if let Some(lawyer) = &case.lawyer {
        nodes.push(format::subsection_header(style, "אישור"));
        nodes.push(format::paragraph(format!(
            "אני {}, עו\"ד, מאשר/ת כי ביום {} {} בפניי {}, ת.ז. {}, ולאחר {} כי {} לומר את האמת וכי {} לעונשים הקבועים בחוק אם לא {} כן, {} את נכונות הצהרת{} דלעיל {} עליה בפניי.",
            or_not_specified(lawyer.full_name.as_deref()),
            format_naive_date(ctx.today),
            deponent.pick("הופיע", "הופיעה"),
            deponent.name,
            id_number,
            deponent.pick("שהזהרתיו", "שהזהרתיה"),
            deponent.pick("עליו", "עליה"),
            deponent.pick("יהיה צפוי", "תהיה צפויה"),
            deponent.pick("יעשה", "תעשה"),
            deponent.pick("אישר", "אישרה"),
            deponent.pick("ו", "ה"),
            deponent.pick("וחתם", "וחתמה")
        )));
        nodes.extend(lawyer_signature(style, &case.signatures, lawyer));
    }

    nodes
}
