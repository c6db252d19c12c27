//! Health record summary — the one-way, client-side export artifact.
//!
//! Assembles everything held for one user (personal info, the three timeline
//! sub-lists, family history, travel history) into a `HealthReport`, then
//! renders it to PDF. Sections without records are omitted entirely; page
//! breaks are a rendering concern with no effect on the data.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use printpdf::*;
use thiserror::Error;

use crate::models::{EventDetails, EventType, PersonalInfo, TimelineEvent, TravelRecord, User};
use crate::record::HealthRecord;
use crate::store::{Store, StoreError};
use crate::timeline;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No authenticated user — report not generated")]
    NoActiveUser,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Cannot write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Complete snapshot of one user's record, ready for rendering.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub personal: PersonalInfo,
    pub doctor_visits: Vec<TimelineEvent>,
    pub medications: Vec<TimelineEvent>,
    pub diseases: Vec<TimelineEvent>,
    pub family_history: String,
    pub travel: Vec<TravelRecord>,
}

/// Gather the full per-user record set.
///
/// Fails before touching anything when no user is signed in; no artifact is
/// produced in that case.
pub fn build_report(store: &dyn Store, user: Option<&User>) -> Result<HealthReport, ExportError> {
    let user = user.ok_or(ExportError::NoActiveUser)?;
    let record = HealthRecord::new(store, user.clone());

    let events = record.events()?;
    let mut doctor_visits = timeline::filter_by_type(&events, EventType::DoctorVisit);
    let mut medications = timeline::filter_by_type(&events, EventType::Medication);
    let mut diseases = timeline::filter_by_type(&events, EventType::Disease);
    timeline::sort_by_date_descending(&mut doctor_visits);
    timeline::sort_by_date_descending(&mut medications);
    timeline::sort_by_date_descending(&mut diseases);

    let mut travel = record.travel_records()?;
    travel.sort_by(|a, b| b.year.cmp(&a.year));

    Ok(HealthReport {
        personal: record.personal_info()?,
        doctor_visits,
        medications,
        diseases,
        family_history: record.family_history()?,
        travel,
    })
}

/// Deterministic artifact name: user's name (spaces to underscores) plus the
/// export date.
pub fn report_filename(name: &str, date: NaiveDate) -> String {
    format!(
        "Health_Record_{}_{}.pdf",
        name.replace(' ', "_"),
        date.format("%Y-%m-%d")
    )
}

/// Save rendered PDF bytes under the given directory.
pub fn export_report_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, pdf_bytes)?;
    Ok(path)
}

// ─── PDF rendering ────────────────────────────────────────────────────────────

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// Cursor over a growing document: tracks the current layer and y position,
/// starting a fresh page whenever a line would cross the bottom margin.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Self {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        Self {
            doc,
            layer,
            y: TOP_Y,
        }
    }

    fn line(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        if self.y - advance < BOTTOM_MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= advance;
    }

    fn space(&mut self, gap: f32) {
        self.y -= gap;
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
    }
}

/// Render the report to PDF bytes. Empty sections produce nothing, not an
/// empty table.
pub fn render_pdf(report: &HealthReport) -> Result<Vec<u8>, ExportError> {
    let mut writer = PageWriter::new("Health Record Summary");
    let font = writer
        .doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = writer
        .doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let courier = writer
        .doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    writer.line("Health Record Summary", 20.0, 14.0, &bold, 12.0);

    // Personal information
    writer.line("Personal Information", 16.0, 14.0, &bold, 8.0);
    let p = &report.personal;
    for (label, value) in [
        ("Name", p.name.clone()),
        ("Age", p.age.clone().unwrap_or_else(|| "N/A".into())),
        ("Height", p.height.clone().unwrap_or_else(|| "N/A".into())),
        ("Weight", p.weight.clone().unwrap_or_else(|| "N/A".into())),
    ] {
        writer.line(&format!("  {label}: {value}"), 10.0, 14.0, &font, 5.0);
    }
    writer.space(6.0);

    if !report.doctor_visits.is_empty() {
        render_section(
            &mut writer,
            &bold,
            &courier,
            "Doctor Visits",
            "Date | Reason | Type | Diagnosis | Prescription",
            report.doctor_visits.iter().map(|e| {
                let (kind, diagnosis, prescription) = visit_columns(e);
                format!(
                    "{} | {} | {} | {} | {}",
                    e.date, e.title, kind, diagnosis, prescription
                )
            }),
        );
    }

    if !report.medications.is_empty() {
        render_section(
            &mut writer,
            &bold,
            &courier,
            "Medications",
            "Date Started | Medication | Status | Reason",
            report.medications.iter().map(|e| {
                format!(
                    "{} | {} | {} | {}",
                    e.date,
                    e.title,
                    medication_status(e),
                    e.description
                )
            }),
        );
    }

    if !report.diseases.is_empty() {
        render_section(
            &mut writer,
            &bold,
            &courier,
            "Diagnosed Diseases",
            "Date | Disease | Notes",
            report
                .diseases
                .iter()
                .map(|e| format!("{} | {} | {}", e.date, e.title, e.description)),
        );
    }

    if !report.family_history.is_empty() {
        writer.line("Family History", 16.0, 14.0, &bold, 8.0);
        for paragraph in report.family_history.lines() {
            for line in wrap_text(paragraph, 95) {
                writer.line(&format!("  {line}"), 10.0, 14.0, &font, 5.0);
            }
        }
        writer.space(6.0);
    }

    if !report.travel.is_empty() {
        render_section(
            &mut writer,
            &bold,
            &courier,
            "Travel History",
            "Year | Location | Duration | Notes",
            report.travel.iter().map(|t| {
                format!(
                    "{} | {} | {} | {}",
                    t.year,
                    t.location,
                    t.duration.as_deref().unwrap_or(""),
                    t.notes.as_deref().unwrap_or("")
                )
            }),
        );
    }

    writer.finish()
}

fn render_section(
    writer: &mut PageWriter,
    bold: &IndirectFontRef,
    courier: &IndirectFontRef,
    title: &str,
    header: &str,
    rows: impl Iterator<Item = String>,
) {
    writer.line(title, 16.0, 14.0, bold, 8.0);
    writer.line(&format!("  {header}"), 9.0, 14.0, bold, 5.0);
    for row in rows {
        for line in wrap_text(&row, 100) {
            writer.line(&format!("  {line}"), 8.0, 14.0, courier, 4.0);
        }
    }
    writer.space(6.0);
}

fn visit_columns(event: &TimelineEvent) -> (String, String, String) {
    match &event.details {
        Some(EventDetails::DoctorVisit {
            visit_kind,
            disease_name,
            medications_prescribed,
        }) => (
            visit_kind.to_string(),
            disease_name.clone().unwrap_or_default(),
            medications_prescribed.clone().unwrap_or_default(),
        ),
        _ => (String::new(), String::new(), String::new()),
    }
}

fn medication_status(event: &TimelineEvent) -> String {
    match &event.details {
        Some(EventDetails::Medication { status }) => status.to_string(),
        // Legacy entries without details display as stopped.
        _ => "Stopped".into(),
    }
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ─── Tests ────────────────────────────────────────────────────────────────────
