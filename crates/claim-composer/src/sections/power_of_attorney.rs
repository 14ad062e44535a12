//! Power of attorney

use shared_types::{Align, Lawyer, Node, Paragraph, Run, Signatures, StyleConfig};

use crate::context::ComposeContext;
use crate::format::{self, format_naive_date, or_not_specified, BLANK_FIELD};
use crate::gender::Role;

/// Powers granted to the representative, in printed order
const GRANTED_POWERS: [&str; 8] = [
    "להגיש כל תביעה, בקשה, תגובה, ערעור או הליך אחר בקשר לעניין, ולהופיע בשמי בפני כל ערכאה שיפוטית",
    "לחתום על כל מסמך, תצהיר או כתב טענות ולמסור הודעות בשמי",
    "לנהל משא ומתן, להתפשר ולחתום על הסכם פשרה, לרבות הסכם גירושין, ולבקש את אישורו",
    "לבקש ולקבל צווים זמניים, צווי עיקול, צווי מניעה וכל סעד ביניים אחר",
    "לפנות לגישור או ליחידת הסיוע שליד בית המשפט ולייצגני בהליכים אלה",
    "לגבות כל סכום שייפסק לטובתי, לרבות הוצאות ושכר טרחה, ולתת קבלות ושחרורים",
    "להעביר ייפוי כוח זה, כולו או מקצתו, לעורך דין אחר עם זכות העברה נוספת",
    "לעשות כל פעולה נוספת הדרושה לדעתו לשם ניהול העניין עד לסיומו",
];

pub fn power_of_attorney(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let style = ctx.style();
    let case = ctx.case;
    let client = ctx.terms(Role::Claimant);
    let opponent = ctx.terms(Role::Respondent);
    let lawyer_name = case
        .lawyer
        .as_ref()
        .map(|lawyer| or_not_specified(lawyer.full_name.as_deref()))
        .unwrap_or(BLANK_FIELD);

    let mut nodes = vec![
        format::title(style, "ייפוי כוח"),
        format::paragraph(format!(
            "אני {}, {}, ת.ז. {}, ממנה בזה את עו\"ד {} להיות בא כוחי בעניין {} נגד {}, ולפעול בשמי ובמקומי בכל הפעולות המפורטות להלן:",
            client.pick("החתום מטה", "החתומה מטה"),
            client.name,
            or_not_specified(case.claimant.id_number.as_deref()),
            lawyer_name,
            ctx.claim.label(),
            opponent.name
        )),
    ];
    nodes.extend(format::numbered_list(GRANTED_POWERS));
    nodes.push(format::paragraph(
        "ייפוי כוח זה יחול גם על כל הליך ערעור, בקשת רשות ערעור והליכי הוצאה לפועל הנובעים מהעניין.",
    ));
    nodes.push(format::paragraph(format!(
        "ולראיה באתי על החתום, היום {}.",
        format_naive_date(ctx.today)
    )));
    nodes.extend(format::signature_block(
        style,
        case.signatures.client.as_ref(),
        &client.name,
    ));

    if let Some(lawyer) = &case.lawyer {
        nodes.push(format::subsection_header(style, "אישור עורך הדין"));
        nodes.push(format::paragraph(format!(
            "אני {} מאשר/ת את חתימת {} על ייפוי כוח זה.",
            or_not_specified(lawyer.full_name.as_deref()),
            client.pick("מרשי", "מרשתי")
        )));
        nodes.extend(lawyer_signature(style, &case.signatures, lawyer));
    }

    nodes
}

/// Lawyer signature and stamp, each an image when present
pub(crate) fn lawyer_signature(
    style: &StyleConfig,
    signatures: &Signatures,
    lawyer: &Lawyer,
) -> Vec<Node> {
    let name_line = format!(
        "{}, עו\"ד, מ.ר. {}",
        or_not_specified(lawyer.full_name.as_deref()),
        or_not_specified(lawyer.license_number.as_deref())
    );
    let mut nodes = format::signature_block(style, signatures.lawyer.as_ref(), &name_line);
    if let Some(stamp) = format::signature_image(style, signatures.lawyer_stamp.as_ref()) {
        nodes.push(stamp);
    } else {
        nodes.push(Node::Paragraph(
            Paragraph::new(vec![Run::plain("חותמת").sized(style.small_size)]).aligned(Align::End),
        ));
    }
    nodes
}
