//! Derived timeline views and the add-event cascade.
//!
//! The stored collection is a flat, append-only sequence of events. This
//! module turns it into what the views consume (age-grouped buckets, per-type
//! sub-lists) and expands a single submitted draft into the batch of events
//! it materializes.

mod cascade;
mod derive;

pub use cascade::*;
pub use derive::*;

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use uuid::Uuid;

    fn event(age: u32, date: &str, title: &str, event_type: EventType) -> TimelineEvent {
        TimelineEvent {
            id: Uuid::new_v4(),
            age,
            date: date.into(),
            title: title.into(),
            description: String::new(),
            event_type,
            details: None,
        }
    }

    fn visit_draft(
        kind: VisitKind,
        disease: Option<&str>,
        medication: Option<&str>,
    ) -> EventDraft {
        EventDraft {
            age: 30,
            date: "2024-03-10".into(),
            title: "Checkup at City Clinic".into(),
            description: "Persistent fever".into(),
            event_type: EventType::DoctorVisit,
            details: Some(EventDetails::DoctorVisit {
                visit_kind: kind,
                disease_name: disease.map(Into::into),
                medications_prescribed: medication.map(Into::into),
            }),
            companion_medication: None,
        }
    }

    // ── Grouping Tests ─────────────────────────────────────────────────

    #[test]
    fn group_by_age_buckets_events() {
        let events = vec![
            event(30, "2024-01-01", "A", EventType::Other),
            event(25, "2019-06-01", "B", EventType::Vaccination),
            event(30, "2024-02-01", "C", EventType::Disease),
        ];
        let grouped = group_by_age(&events);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&30].len(), 2);
        assert_eq!(grouped[&25].len(), 1);
    }

    #[test]
    fn buckets_sorted_ascending_by_date() {
        let events = vec![
            event(30, "2024-05-01", "later", EventType::Other),
            event(30, "2024-01-01", "earlier", EventType::Other),
            event(30, "2024-03-01", "middle", EventType::Other),
        ];
        let grouped = group_by_age(&events);
        let titles: Vec<_> = grouped[&30].iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["earlier", "middle", "later"]);
    }

    #[test]
    fn date_ties_keep_insertion_order() {
        let events = vec![
            event(30, "2024-01-01", "first", EventType::Other),
            event(30, "2024-01-01", "second", EventType::Other),
            event(30, "2024-01-01", "third", EventType::Other),
        ];
        let grouped = group_by_age(&events);
        let titles: Vec<_> = grouped[&30].iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let events = vec![
            event(30, "2024-05-01", "A", EventType::Other),
            event(30, "2024-01-01", "B", EventType::Other),
            event(25, "2019-06-01", "C", EventType::Vaccination),
        ];
        let first = group_by_age(&events);
        let second = group_by_age(&events);
        assert_eq!(first.len(), second.len());
        for (age, bucket) in &first {
            let other = &second[age];
            let ids: Vec<_> = bucket.iter().map(|e| e.id).collect();
            let other_ids: Vec<_> = other.iter().map(|e| e.id).collect();
            assert_eq!(ids, other_ids);
        }
    }

    #[test]
    fn ages_sorted_descending() {
        let events = vec![
            event(12, "2006-01-01", "A", EventType::Vaccination),
            event(30, "2024-01-01", "B", EventType::Other),
            event(25, "2019-01-01", "C", EventType::Disease),
        ];
        let grouped = group_by_age(&events);
        assert_eq!(sorted_ages_descending(&grouped), vec![30, 25, 12]);
    }

    // ── Filter Tests ───────────────────────────────────────────────────

    #[test]
    fn filter_by_type_preserves_relative_order() {
        let events = vec![
            event(30, "2024-03-01", "med B", EventType::Medication),
            event(30, "2024-01-01", "visit", EventType::DoctorVisit),
            event(30, "2024-02-01", "med A", EventType::Medication),
        ];
        let meds = filter_by_type(&events, EventType::Medication);
        let titles: Vec<_> = meds.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["med B", "med A"]);
    }

    #[test]
    fn sub_views_resort_newest_first() {
        let events = vec![
            event(30, "2024-01-01", "old", EventType::Disease),
            event(30, "2024-06-01", "new", EventType::Disease),
        ];
        let mut diseases = filter_by_type(&events, EventType::Disease);
        sort_by_date_descending(&mut diseases);
        assert_eq!(diseases[0].title, "new");
        assert_eq!(diseases[1].title, "old");
    }

    // ── Parse Tests ────────────────────────────────────────────────────

    #[test]
    fn parse_valid_collection() {
        let raw = r#"[{
            "id": "5f0c64a2-94a4-4be3-9b2e-2c0f8a7c2a11",
            "age": 30,
            "date": "2024-03-10",
            "title": "Flu shot",
            "description": "",
            "type": "Vaccination"
        }]"#;
        let events = parse_stored_events(raw).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Vaccination);
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(parse_stored_events("{\"not\": \"an array\"}").is_err());
        assert!(parse_stored_events("garbage").is_err());
    }

    #[test]
    fn parse_rejects_missing_required_fields() {
        let raw = r#"[{"title": "half an event"}]"#;
        assert!(parse_stored_events(raw).is_err());
    }

    // ── Cascade Tests ──────────────────────────────────────────────────

    #[test]
    fn serious_visit_with_diagnosis_and_prescription_expands_to_three() {
        let batch = expand(visit_draft(VisitKind::Serious, Some("Flu"), Some("Tamiflu")));
        assert_eq!(batch.len(), 3);

        assert_eq!(batch[0].event_type, EventType::DoctorVisit);
        assert_eq!(batch[0].title, "Checkup at City Clinic");

        assert_eq!(batch[1].event_type, EventType::Disease);
        assert_eq!(batch[1].title, "Flu");
        assert!(batch[1].description.contains("Checkup at City Clinic"));

        assert_eq!(batch[2].event_type, EventType::Medication);
        assert_eq!(batch[2].title, "Tamiflu");
        assert_eq!(
            batch[2].details,
            Some(EventDetails::Medication {
                status: MedicationStatus::Stopped
            })
        );
        assert!(batch[2].description.contains("Flu"));

        for draft in &batch {
            assert_eq!(draft.age, 30);
            assert_eq!(draft.date, "2024-03-10");
        }
    }

    #[test]
    fn serious_visit_without_extras_expands_to_itself() {
        let batch = expand(visit_draft(VisitKind::Serious, None, None));
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].event_type, EventType::DoctorVisit);
    }

    #[test]
    fn serious_visit_blank_extras_are_ignored() {
        let batch = expand(visit_draft(VisitKind::Serious, Some("  "), Some("")));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn serious_visit_with_only_diagnosis() {
        let batch = expand(visit_draft(VisitKind::Serious, Some("Bronchitis"), None));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].event_type, EventType::Disease);
        assert_eq!(batch[1].title, "Bronchitis");
    }

    #[test]
    fn serious_visit_with_only_prescription_references_visit() {
        let batch = expand(visit_draft(VisitKind::Serious, None, Some("Ibuprofen")));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].event_type, EventType::Medication);
        assert!(batch[1].description.contains("Checkup at City Clinic"));
    }

    #[test]
    fn casual_visit_never_cascades() {
        let batch = expand(visit_draft(VisitKind::Casual, Some("Flu"), Some("Tamiflu")));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn disease_with_companion_medication_expands_to_two() {
        let draft = EventDraft {
            age: 42,
            date: "2023-11-02".into(),
            title: "Pneumonia".into(),
            description: String::new(),
            event_type: EventType::Disease,
            details: None,
            companion_medication: Some("Amoxicillin".into()),
        };
        let batch = expand(draft);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].event_type, EventType::Disease);
        assert!(batch[0].companion_medication.is_none());
        assert_eq!(batch[1].event_type, EventType::Medication);
        assert_eq!(batch[1].title, "Amoxicillin");
        assert!(batch[1].description.contains("Pneumonia"));
        assert_eq!(batch[1].age, 42);
        assert_eq!(batch[1].date, "2023-11-02");
    }

    #[test]
    fn plain_events_expand_to_themselves() {
        let draft = EventDraft {
            age: 5,
            date: "1999-04-01".into(),
            title: "MMR booster".into(),
            description: String::new(),
            event_type: EventType::Vaccination,
            details: None,
            companion_medication: None,
        };
        let batch = expand(draft);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title, "MMR booster");
    }
}
