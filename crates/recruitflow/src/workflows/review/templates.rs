//! Candidate-facing message bodies.
//!
//! Pure text generation: callers pre-populate these as editable defaults and
//! re-invoke generation when an input (e.g. the interview date) changes.
//! Recipients are addressed in French, matching the emails the collaborator
//! sends out.

use chrono::NaiveDateTime;

/// Below this AI score a rejection may carry a feedback paragraph.
pub const FEEDBACK_SCORE_THRESHOLD: u8 = 15;

/// Literal substituted by the mailer for each recipient of a bulk send.
pub const BULK_RECIPIENT_PLACEHOLDER: &str = "[nom du candidat]";

const SIGNATURE: &str = "Cordialement,\nL'équipe de recrutement";

/// Analysis markers and the clause each contributes to the feedback list.
const FEEDBACK_MARKERS: [(&str, &str); 3] = [
    ("Expérience", "le niveau d'expérience requis pour ce poste"),
    ("Compétences", "l'adéquation des compétences techniques"),
    ("Motivation", "l'alignement avec nos critères de sélection"),
];

/// Inputs for a validation body.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    pub recipient: &'a str,
    pub job_title: &'a str,
    pub company: &'a str,
    pub interview: Option<NaiveDateTime>,
}

/// Inputs for a rejection body. Score and analysis feed the optional
/// feedback paragraph; either missing means no paragraph.
#[derive(Debug, Clone)]
pub struct RejectionContext<'a> {
    pub recipient: &'a str,
    pub job_title: &'a str,
    pub ai_score: Option<u8>,
    pub ai_analysis: Option<&'a str>,
}

fn interview_paragraph(interview: Option<NaiveDateTime>) -> String {
    match interview {
        Some(when) => format!(
            "\n\nNous souhaitons vous rencontrer pour un entretien le {} à {}.",
            when.format("%d/%m/%Y"),
            when.format("%H:%M")
        ),
        None => {
            "\n\nNous vous recontacterons prochainement pour organiser un entretien.".to_string()
        }
    }
}

pub fn validation_body(ctx: &ValidationContext<'_>) -> String {
    format!(
        "Bonjour {},\n\nNous avons le plaisir de vous informer que votre candidature pour le poste de {} chez {} a retenu notre attention.{}\n\n{}",
        ctx.recipient,
        ctx.job_title,
        ctx.company,
        interview_paragraph(ctx.interview),
        SIGNATURE
    )
}

/// Bulk variant: recipients vary, so the body carries the placeholder token.
pub fn bulk_validation_body(
    job_title: &str,
    company: &str,
    interview: Option<NaiveDateTime>,
) -> String {
    validation_body(&ValidationContext {
        recipient: BULK_RECIPIENT_PLACEHOLDER,
        job_title,
        company,
        interview,
    })
}

fn feedback_paragraph(ai_score: Option<u8>, ai_analysis: Option<&str>) -> String {
    let (Some(score), Some(analysis)) = (ai_score, ai_analysis) else {
        return String::new();
    };
    if score >= FEEDBACK_SCORE_THRESHOLD {
        return String::new();
    }

    let reasons: Vec<&str> = FEEDBACK_MARKERS
        .iter()
        .filter(|(marker, _)| analysis.contains(marker))
        .map(|(_, clause)| *clause)
        .collect();

    if reasons.is_empty() {
        return String::new();
    }

    format!(
        "\n\nAprès analyse de votre profil, nous avons identifié des écarts concernant {}. Bien que votre candidature présente des aspects intéressants, nous recherchons un profil correspondant plus précisément à nos besoins actuels.",
        reasons.join(", ")
    )
}

pub fn rejection_body(ctx: &RejectionContext<'_>) -> String {
    format!(
        "Bonjour {},\n\nNous vous remercions pour l'intérêt que vous portez à notre entreprise et pour le temps consacré à votre candidature pour le poste de {}.\n\nAprès étude attentive de votre profil, nous regrettons de vous informer que nous ne pouvons pas donner suite à votre candidature pour ce poste.{}\n\nNous vous encourageons à postuler à nouveau pour d'autres opportunités qui pourraient mieux correspondre à votre profil.\n\nNous vous souhaitons pleine réussite dans vos recherches.\n\n{}",
        ctx.recipient,
        ctx.job_title,
        feedback_paragraph(ctx.ai_score, ctx.ai_analysis),
        SIGNATURE
    )
}

/// Bulk rejection: no per-candidate feedback, no encouragement to reapply.
pub fn bulk_rejection_body(job_title: &str) -> String {
    format!(
        "Bonjour {},\n\nNous vous remercions pour l'intérêt que vous portez à notre entreprise et pour le temps consacré à votre candidature pour le poste de {}.\n\nAprès étude attentive de votre profil, nous regrettons de vous informer que nous ne pouvons pas donner suite à votre candidature pour ce poste.\n\nNous vous souhaitons pleine réussite dans vos recherches.\n\n{}",
        BULK_RECIPIENT_PLACEHOLDER, job_title, SIGNATURE
    )
}

/// One-line default for the per-row quick validate action.
pub fn quick_validation_body(candidate_name: &str) -> String {
    format!(
        "Félicitations {} ! Votre candidature a été retenue.",
        candidate_name
    )
}

/// One-line default for the per-row quick reject action.
pub fn quick_rejection_body(candidate_name: &str) -> String {
    format!(
        "Bonjour {}, nous ne pouvons pas donner suite à votre candidature.",
        candidate_name
    )
}
