use crate::models::{EventDetails, EventDraft, EventType, MedicationStatus, VisitKind};

/// Expand one submitted draft into the ordered batch of drafts to persist.
///
/// A serious doctor visit with a diagnosis and/or a prescription materializes
/// sibling `Disease`/`Medication` events at the same age and date; a disease
/// logged together with a medication materializes the medication. The
/// synthesized events reference their origin only in prose — after creation
/// they are independent entities and nothing cascades on edit or delete.
pub fn expand(draft: EventDraft) -> Vec<EventDraft> {
    match draft.event_type {
        EventType::DoctorVisit => expand_doctor_visit(draft),
        EventType::Disease => expand_disease(draft),
        _ => vec![draft],
    }
}

fn expand_doctor_visit(draft: EventDraft) -> Vec<EventDraft> {
    let Some(EventDetails::DoctorVisit {
        visit_kind: VisitKind::Serious,
        ref disease_name,
        ref medications_prescribed,
    }) = draft.details
    else {
        return vec![draft];
    };

    let disease_name = disease_name.as_deref().filter(|s| !s.trim().is_empty());
    let prescribed = medications_prescribed
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    let mut batch = Vec::with_capacity(3);

    if let Some(disease) = disease_name {
        batch.push(EventDraft {
            age: draft.age,
            date: draft.date.clone(),
            title: disease.to_string(),
            description: format!("Diagnosed during doctor visit: {}", draft.title),
            event_type: EventType::Disease,
            details: None,
            companion_medication: None,
        });
    }

    if let Some(medication) = prescribed {
        let reason = disease_name.unwrap_or(&draft.title);
        batch.push(EventDraft {
            age: draft.age,
            date: draft.date.clone(),
            title: medication.to_string(),
            description: format!("Prescribed for {reason}"),
            event_type: EventType::Medication,
            details: Some(EventDetails::Medication {
                status: MedicationStatus::Stopped,
            }),
            companion_medication: None,
        });
    }

    // Visit first, then what it caused.
    batch.insert(0, draft);
    batch
}

fn expand_disease(mut draft: EventDraft) -> Vec<EventDraft> {
    let companion = draft
        .companion_medication
        .take()
        .filter(|s| !s.trim().is_empty());

    let Some(medication) = companion else {
        return vec![draft];
    };

    let medication_draft = EventDraft {
        age: draft.age,
        date: draft.date.clone(),
        title: medication,
        description: format!("Prescribed for {}", draft.title),
        event_type: EventType::Medication,
        details: Some(EventDetails::Medication {
            status: MedicationStatus::Stopped,
        }),
        companion_medication: None,
    };

    vec![draft, medication_draft]
}
