//! Document type classification.
//!
//! [`detect`] is total: every bag gets exactly one [`DocumentType`]. The MIME
//! family from `Content-Type` is consulted first; when it is missing or
//! unrecognized the parser identifiers in `X-Parsed-By` are matched, most
//! specific (last) first. Anything else is [`DocumentType::Generic`].
//!
//! Both rule tables are `const` data, so detection holds no state and can run
//! on any number of threads at once.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bag::MetadataBag;

/// Upstream field carrying the MIME type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Upstream field listing the parsers that handled the document.
pub const PARSED_BY: &str = "X-Parsed-By";

/// Closed set of document type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Pdf,
    Office,
    Image,
    Email,
    Media,
    Html,
    Rtf,
    Database,
    Font,
    Epub,
    Warc,
    ClimateForecast,
    CreativeCommons,
    Generic,
}

impl DocumentType {
    pub const ALL: [DocumentType; 14] = [
        DocumentType::Pdf,
        DocumentType::Office,
        DocumentType::Image,
        DocumentType::Email,
        DocumentType::Media,
        DocumentType::Html,
        DocumentType::Rtf,
        DocumentType::Database,
        DocumentType::Font,
        DocumentType::Epub,
        DocumentType::Warc,
        DocumentType::ClimateForecast,
        DocumentType::CreativeCommons,
        DocumentType::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Office => "office",
            DocumentType::Image => "image",
            DocumentType::Email => "email",
            DocumentType::Media => "media",
            DocumentType::Html => "html",
            DocumentType::Rtf => "rtf",
            DocumentType::Database => "database",
            DocumentType::Font => "font",
            DocumentType::Epub => "epub",
            DocumentType::Warc => "warc",
            DocumentType::ClimateForecast => "climate_forecast",
            DocumentType::CreativeCommons => "creative_commons",
            DocumentType::Generic => "generic",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule family produced a [`DocumentType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionReason {
    Mime,
    Parser,
    Default,
}

impl DetectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionReason::Mime => "mime",
            DetectionReason::Parser => "parser",
            DetectionReason::Default => "default",
        }
    }
}

impl fmt::Display for DetectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum MimePattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl MimePattern {
    fn matches(self, mime: &str) -> bool {
        match self {
            MimePattern::Exact(exact) => mime == exact,
            MimePattern::Prefix(prefix) => mime.starts_with(prefix),
        }
    }
}

use DocumentType as T;
use MimePattern::{Exact, Prefix};

/// Priority-ordered MIME rules; the first match wins.
const MIME_RULES: &[(MimePattern, DocumentType)] = &[
    (Exact("application/pdf"), T::Pdf),
    (Prefix("image/"), T::Image),
    (Prefix("message/"), T::Email),
    (Exact("application/mbox"), T::Email),
    (Exact("application/vnd.ms-outlook"), T::Email),
    (Prefix("audio/"), T::Media),
    (Prefix("video/"), T::Media),
    (Exact("application/ogg"), T::Media),
    (Exact("application/mp4"), T::Media),
    (Exact("text/html"), T::Html),
    (Exact("application/xhtml+xml"), T::Html),
    (Prefix("application/vnd.openxmlformats-officedocument."), T::Office),
    (Exact("application/msword"), T::Office),
    (Exact("application/vnd.ms-excel"), T::Office),
    (Exact("application/vnd.ms-powerpoint"), T::Office),
    (Prefix("application/vnd.oasis.opendocument."), T::Office),
    (Exact("application/x-tika-ooxml"), T::Office),
    (Exact("application/x-tika-msoffice"), T::Office),
    (Exact("application/rtf"), T::Rtf),
    (Exact("text/rtf"), T::Rtf),
    (Exact("application/x-sqlite3"), T::Database),
    (Exact("application/vnd.sqlite3"), T::Database),
    (Exact("application/x-dbf"), T::Database),
    (Exact("application/x-msaccess"), T::Database),
    (Prefix("font/"), T::Font),
    (Exact("application/font-sfnt"), T::Font),
    (Exact("application/x-font-ttf"), T::Font),
    (Exact("application/x-font-otf"), T::Font),
    (Exact("application/x-font-type1"), T::Font),
    (Exact("application/x-font-adobe-metric"), T::Font),
    (Exact("application/epub+zip"), T::Epub),
    (Exact("application/warc"), T::Warc),
    (Exact("application/x-warc"), T::Warc),
    (Exact("application/warc+gz"), T::Warc),
    (Exact("application/x-netcdf"), T::ClimateForecast),
    (Exact("application/netcdf"), T::ClimateForecast),
    (Exact("application/x-hdf"), T::ClimateForecast),
    (Exact("application/xmp+xml"), T::CreativeCommons),
    (Exact("application/rdf+xml"), T::CreativeCommons),
];

/// Lowercase substrings of parser identifiers.
const PARSER_RULES: &[(&str, DocumentType)] = &[
    ("pdfparser", T::Pdf),
    ("ooxmlparser", T::Office),
    ("officeparser", T::Office),
    ("opendocumentparser", T::Office),
    ("imageparser", T::Image),
    ("jpegparser", T::Image),
    ("tiffparser", T::Image),
    ("pngparser", T::Image),
    ("rfc822parser", T::Email),
    ("mboxparser", T::Email),
    ("outlookparser", T::Email),
    ("mp3parser", T::Media),
    ("mp4parser", T::Media),
    ("audioparser", T::Media),
    ("flvparser", T::Media),
    ("midiparser", T::Media),
    ("htmlparser", T::Html),
    ("rtfparser", T::Rtf),
    ("sqlite3parser", T::Database),
    ("dbfparser", T::Database),
    ("jackcessparser", T::Database),
    ("truetypeparser", T::Font),
    ("adobefontmetricparser", T::Font),
    ("epubparser", T::Epub),
    ("warcparser", T::Warc),
    ("netcdfparser", T::ClimateForecast),
    ("hdfparser", T::ClimateForecast),
    ("gribparser", T::ClimateForecast),
    ("xmprightsparser", T::CreativeCommons),
    ("creativecommons", T::CreativeCommons),
];

/// Classifies `bag`; never fails.
pub fn detect(bag: &MetadataBag) -> DocumentType {
    detect_with_reason(bag).0
}

/// Like [`detect`], also reporting which rule family decided.
pub fn detect_with_reason(bag: &MetadataBag) -> (DocumentType, DetectionReason) {
    if let Some(doc_type) = mime_type(bag).as_deref().and_then(match_mime) {
        return (doc_type, DetectionReason::Mime);
    }
    if let Some(doc_type) = bag.values(PARSED_BY).iter().rev().find_map(|id| match_parser(id)) {
        return (doc_type, DetectionReason::Parser);
    }
    (DocumentType::Generic, DetectionReason::Default)
}

/// MIME essence of `Content-Type`: lowercased, parameters removed.
pub fn mime_type(bag: &MetadataBag) -> Option<String> {
    let raw = bag.get(CONTENT_TYPE)?;
    let essence = raw.split(';').next().unwrap_or_default().trim();
    (!essence.is_empty()).then(|| essence.to_ascii_lowercase())
}

/// Most specific parser identifier (the last non-blank `X-Parsed-By` value).
pub fn parser_id(bag: &MetadataBag) -> Option<&str> {
    bag.values(PARSED_BY)
        .iter()
        .rev()
        .map(|id| id.trim())
        .find(|id| !id.is_empty())
}

fn match_mime(mime: &str) -> Option<DocumentType> {
    MIME_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(mime))
        .map(|&(_, doc_type)| doc_type)
}

fn match_parser(parser: &str) -> Option<DocumentType> {
    let parser = parser.to_ascii_lowercase();
    PARSER_RULES
        .iter()
        .find(|(needle, _)| parser.contains(needle))
        .map(|&(_, doc_type)| doc_type)
}
