//! PREMIS object inventory: record assembly and XML rendering.
//!
//! The document layout is fixed. Records are emitted in the order they were
//! built, which is the content walk order; nothing here sorts.
use crate::classify::ClassifiedFile;
use crate::error::{StageError, StageResult};
use crate::identifier::{IdentifierSource, IDENTIFIER_TYPE};
use crate::staging::publish_bytes;
use rand::RngCore;
use std::path::Path;

pub const PREMIS_NAMESPACE: &str = "http://www.loc.gov/premis/v3";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const PREMIS_SCHEMA_URL: &str = "https://www.loc.gov/standards/premis/premis.xsd";
pub const PREMIS_VERSION: &str = "3.0";

/// One `premis:object` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub identifier: String,
    pub identifier_type: &'static str,
    /// Left empty here; format identification fills it in later.
    pub format_name: String,
    pub original_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDocument {
    pub records: Vec<InventoryRecord>,
}

/// Stamp each classified file with a fresh identifier, preserving order.
pub fn build_records<R: RngCore>(
    files: &[ClassifiedFile],
    ids: &mut IdentifierSource<R>,
) -> Vec<InventoryRecord> {
    files
        .iter()
        .map(|file| InventoryRecord {
            identifier: ids.next_identifier(),
            identifier_type: IDENTIFIER_TYPE,
            format_name: String::new(),
            original_name: file.original_name.clone(),
        })
        .collect()
}

impl InventoryDocument {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<premis:premis xmlns:premis=\"{PREMIS_NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\" xmlns:xsi=\"{XSI_NAMESPACE}\" xsi:schemaLocation=\"{PREMIS_NAMESPACE} {PREMIS_SCHEMA_URL}\" version=\"{PREMIS_VERSION}\">\n"
        ));
        for record in &self.records {
            render_object(&mut out, record);
        }
        out.push_str("</premis:premis>\n");
        out
    }

    /// Render and publish the document at `path`, replacing any prior file.
    pub fn write_to(&self, path: &Path) -> StageResult<()> {
        publish_bytes(path, self.render().as_bytes()).map_err(|error| StageError::Write {
            path: path.to_path_buf(),
            error,
        })
    }
}

fn render_object(out: &mut String, record: &InventoryRecord) {
    out.push_str("  <premis:object xsi:type=\"premis:file\">\n");
    out.push_str("    <premis:objectIdentifier>\n");
    leaf(out, 6, "objectIdentifierType", record.identifier_type);
    leaf(out, 6, "objectIdentifierValue", &record.identifier);
    out.push_str("    </premis:objectIdentifier>\n");
    out.push_str("    <premis:objectCharacteristics>\n");
    out.push_str("      <premis:format>\n");
    out.push_str("        <premis:formatDesignation>\n");
    leaf(out, 10, "formatName", &record.format_name);
    out.push_str("        </premis:formatDesignation>\n");
    out.push_str("      </premis:format>\n");
    out.push_str("    </premis:objectCharacteristics>\n");
    leaf(out, 4, "originalName", &record.original_name);
    out.push_str("  </premis:object>\n");
}

fn leaf(out: &mut String, indent: usize, name: &str, text: &str) {
    out.push_str(&" ".repeat(indent));
    if text.is_empty() {
        out.push_str(&format!("<premis:{name}/>\n"));
    } else {
        out.push_str(&format!(
            "<premis:{name}>{}</premis:{name}>\n",
            escape_text(text)
        ));
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            _ if !is_xml_char(ch) => escaped.push('\u{FFFD}'),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// XML 1.0 `Char` production; tab, newline and carriage return are escaped above.
fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
