use chrono::NaiveDate;

use crate::workflows::review::templates::{
    bulk_rejection_body, bulk_validation_body, quick_rejection_body, quick_validation_body,
    rejection_body, validation_body, RejectionContext, ValidationContext,
    BULK_RECIPIENT_PLACEHOLDER,
};

#[test]
fn validation_with_interview_states_date_and_time() {
    let interview = NaiveDate::from_ymd_opt(2025, 7, 3)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let body = validation_body(&ValidationContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        company: "Acme",
        interview: Some(interview),
    });

    assert!(body.starts_with("Bonjour Alice Martin,"));
    assert!(body.contains("poste de Backend Engineer chez Acme"));
    assert!(body.contains("un entretien le 03/07/2025 à 14:30"));
    assert!(!body.contains("Nous vous recontacterons prochainement"));
    assert!(body.ends_with("Cordialement,\nL'équipe de recrutement"));
}

#[test]
fn validation_without_interview_promises_follow_up() {
    let body = validation_body(&ValidationContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        company: "Acme",
        interview: None,
    });

    assert!(body.contains("Nous vous recontacterons prochainement pour organiser un entretien."));
    assert!(!body.contains("un entretien le "));
}

#[test]
fn low_score_rejection_lists_matched_feedback_clauses() {
    let analysis = "Expérience insuffisante pour le poste. Compétences en retrait sur la stack.";
    let body = rejection_body(&RejectionContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        ai_score: Some(8),
        ai_analysis: Some(analysis),
    });

    assert!(body.contains(
        "des écarts concernant le niveau d'expérience requis pour ce poste, l'adéquation des compétences techniques."
    ));
    assert!(!body.contains("l'alignement avec nos critères de sélection"));
    assert!(body.contains("Nous vous encourageons à postuler à nouveau"));
}

#[test]
fn high_score_rejection_carries_no_feedback() {
    let body = rejection_body(&RejectionContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        ai_score: Some(15),
        ai_analysis: Some("Expérience solide. Compétences complètes."),
    });

    assert!(!body.contains("Après analyse de votre profil"));
}

#[test]
fn missing_score_or_analysis_suppresses_feedback() {
    let without_score = rejection_body(&RejectionContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        ai_score: None,
        ai_analysis: Some("Expérience insuffisante."),
    });
    assert!(!without_score.contains("Après analyse de votre profil"));

    let without_analysis = rejection_body(&RejectionContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        ai_score: Some(5),
        ai_analysis: None,
    });
    assert!(!without_analysis.contains("Après analyse de votre profil"));
}

#[test]
fn unrecognized_analysis_yields_no_feedback_paragraph() {
    let body = rejection_body(&RejectionContext {
        recipient: "Alice Martin",
        job_title: "Backend Engineer",
        ai_score: Some(5),
        ai_analysis: Some("Profil atypique."),
    });

    assert!(!body.contains("Après analyse de votre profil"));
}

#[test]
fn bulk_bodies_use_the_recipient_placeholder() {
    let validation = bulk_validation_body("Backend Engineer", "Acme", None);
    assert!(validation.contains(BULK_RECIPIENT_PLACEHOLDER));

    let rejection = bulk_rejection_body("Backend Engineer");
    assert!(rejection.contains(BULK_RECIPIENT_PLACEHOLDER));
    // Bulk rejections skip the personalized closing encouragement.
    assert!(!rejection.contains("Nous vous encourageons à postuler à nouveau"));
}

#[test]
fn quick_bodies_address_the_candidate_by_name() {
    assert_eq!(
        quick_validation_body("Alice Martin"),
        "Félicitations Alice Martin ! Votre candidature a été retenue."
    );
    assert_eq!(
        quick_rejection_body("Alice Martin"),
        "Bonjour Alice Martin, nous ne pouvons pas donner suite à votre candidature."
    );
}
