use docx_rs::{BreakType, Docx, Paragraph, Run};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Cursor;

/// Columns of the RSVP / check-in record-keeping sheet.
pub const RSVP_CSV_HEADERS: [&str; 6] = [
    "Name",
    "Email",
    "Phone",
    "ZIP",
    "RSVP Date",
    "Checked In",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv template: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv template is not valid UTF-8")]
    Encoding,
    #[error("failed to build word document: {0}")]
    Docx(String),
}

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Html,
    Docx,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

/// Turns a composed narrative into a downloadable artifact.
pub trait DocumentExporter {
    fn format(&self) -> ExportFormat;
    fn export(&self, plan_text: &str, church_name: &str) -> Result<ExportedDocument, ExportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExporter;

impl DocumentExporter for PlainTextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn export(&self, plan_text: &str, church_name: &str) -> Result<ExportedDocument, ExportError> {
        Ok(ExportedDocument {
            file_name: plan_file_name(church_name, self.format()),
            content_type: mime::TEXT_PLAIN_UTF_8,
            bytes: plan_text.as_bytes().to_vec(),
        })
    }
}

/// Standalone HTML document: one heading, one paragraph per blank-line block.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocumentExporter;

impl DocumentExporter for HtmlDocumentExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn export(&self, plan_text: &str, church_name: &str) -> Result<ExportedDocument, ExportError> {
        let title = document_title(church_name);
        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>").expect("write doctype");
        writeln!(
            html,
            "<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>",
            escape_html(&title)
        )
        .expect("write head");
        writeln!(html, "<h1>{}</h1>", escape_html(&title)).expect("write heading");

        for block in paragraph_blocks(plan_text) {
            let lines: Vec<String> = block.lines().map(escape_html).collect();
            writeln!(html, "<p>{}</p>", lines.join("<br>\n")).expect("write paragraph");
        }

        html.push_str("</body></html>\n");

        Ok(ExportedDocument {
            file_name: plan_file_name(church_name, self.format()),
            content_type: mime::TEXT_HTML_UTF_8,
            bytes: html.into_bytes(),
        })
    }
}

/// Word document with the same heading and paragraph layout as the HTML export.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxDocumentExporter;

impl DocumentExporter for DocxDocumentExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn export(&self, plan_text: &str, church_name: &str) -> Result<ExportedDocument, ExportError> {
        let heading = Run::new().add_text(document_title(church_name)).bold().size(32);
        let mut docx = Docx::new().add_paragraph(Paragraph::new().add_run(heading));

        for block in paragraph_blocks(plan_text) {
            let mut run = Run::new();
            for (index, line) in block.lines().enumerate() {
                if index > 0 {
                    run = run.add_break(BreakType::TextWrapping);
                }
                run = run.add_text(line);
            }
            docx = docx.add_paragraph(Paragraph::new().add_run(run));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|err| ExportError::Docx(err.to_string()))?;
        let content_type = DOCX_CONTENT_TYPE
            .parse::<mime::Mime>()
            .map_err(|err| ExportError::Docx(err.to_string()))?;

        Ok(ExportedDocument {
            file_name: plan_file_name(church_name, self.format()),
            content_type,
            bytes: buffer.into_inner(),
        })
    }
}

pub fn exporter_for(format: ExportFormat) -> Box<dyn DocumentExporter + Send + Sync> {
    match format {
        ExportFormat::Text => Box::new(PlainTextExporter),
        ExportFormat::Html => Box::new(HtmlDocumentExporter),
        ExportFormat::Docx => Box::new(DocxDocumentExporter),
    }
}

fn document_title(church_name: &str) -> String {
    format!("12-Month Implementation Plan – {}", church_name.trim())
}

/// Blank-line separated blocks of the composed plan, empty ones dropped.
fn paragraph_blocks(plan_text: &str) -> impl Iterator<Item = &str> {
    plan_text
        .trim()
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
}

/// `Grace Fellowship` -> `grace_fellowship_12_month_plan.txt`
pub fn plan_file_name(church_name: &str, format: ExportFormat) -> String {
    format!(
        "{}_12_month_plan.{}",
        church_name.trim().replace(' ', "_").to_lowercase(),
        format.extension()
    )
}

/// Header-only CSV sheet for tracking RSVPs and check-ins by hand.
pub fn rsvp_csv_template() -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(RSVP_CSV_HEADERS)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_template_has_fixed_header_and_no_rows() {
        let template = rsvp_csv_template().expect("template renders");
        assert_eq!(template, "Name,Email,Phone,ZIP,RSVP Date,Checked In\n");
        assert_eq!(template, rsvp_csv_template().expect("template renders"));

        let mut reader = csv::Reader::from_reader(template.as_bytes());
        let headers = reader.headers().expect("headers parse").clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), RSVP_CSV_HEADERS);
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn file_names_are_slugged() {
        assert_eq!(
            plan_file_name("Peniel Baptist Church", ExportFormat::Text),
            "peniel_baptist_church_12_month_plan.txt"
        );
        assert_eq!(
            plan_file_name(" Grace ", ExportFormat::Html),
            "grace_12_month_plan.html"
        );
    }

    #[test]
    fn text_export_passes_plan_through() {
        let doc = PlainTextExporter
            .export("line one\n\nline two", "Grace")
            .expect("text export");
        assert_eq!(doc.bytes, b"line one\n\nline two");
        assert_eq!(doc.content_type, mime::TEXT_PLAIN_UTF_8);
    }

    #[test]
    fn html_export_escapes_and_splits_blocks() {
        let doc = HtmlDocumentExporter
            .export("Intro <b>\n\nQ1 & Q2\nnext line\n", "St. Mark's")
            .expect("html export");
        let html = String::from_utf8(doc.bytes).expect("utf-8 html");
        assert!(html.contains("<h1>12-Month Implementation Plan – St. Mark&#39;s</h1>"));
        assert!(html.contains("<p>Intro &lt;b&gt;</p>"));
        assert!(html.contains("<p>Q1 &amp; Q2<br>\nnext line</p>"));
        assert_eq!(doc.file_name, "st._mark's_12_month_plan.html");
        assert_eq!(exporter_for(ExportFormat::Html).format(), ExportFormat::Html);
    }

    #[test]
    fn docx_export_is_a_word_package() {
        let doc = exporter_for(ExportFormat::Docx)
            .export("Quarter one\nkickoff\n\nQuarter two", "Grace Fellowship")
            .expect("docx export");
        assert_eq!(doc.file_name, "grace_fellowship_12_month_plan.docx");
        assert_eq!(doc.content_type.essence_str(), DOCX_CONTENT_TYPE);
        // OOXML documents are zip archives
        assert!(doc.bytes.starts_with(b"PK"));
    }
}
