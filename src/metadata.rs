//! Stable PDF metadata.
//!
//! printpdf stamps every file with the wall-clock time and random document
//! identifiers.  [`pin_metadata`] reopens the finished bytes with `lopdf` and
//! replaces those fields with values derived from the generation date and a
//! fingerprint of the layout, so equal input always yields equal bytes.

use chrono::NaiveDate;
use log::debug;
use lopdf::{Document, Object, StringFormat};
use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::model::Layout;

static XMP_DATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<xmp:(?:CreateDate|ModifyDate|MetadataDate)>)[^<]*")
        .expect("valid XMP date pattern")
});

static XMP_IDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<xmpMM:(?:DocumentID|InstanceID)>)[^<]*").expect("valid XMP id pattern")
});

/// Hex digest identifying a layout; 32 characters like the identifiers it replaces.
pub fn layout_fingerprint(layout: &Layout, generated_on: NaiveDate) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{layout:?}").as_bytes());
    hasher.update(generated_on.to_string().as_bytes());
    hasher
        .finalize()
        .iter()
        .take(16)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// `D:20240401000000+00'00'`, the info dictionary form.
fn info_date(date: NaiveDate) -> String {
    format!("D:{}000000+00'00'", date.format("%Y%m%d"))
}

/// `D:2024-04-01T00:00:00+00'00'`, the form printpdf writes into XMP.
fn xmp_date(date: NaiveDate) -> String {
    format!("D:{}T00:00:00+00'00'", date.format("%Y-%m-%d"))
}

/// Rewrites creation/modification dates and document identifiers in `bytes`.
pub fn pin_metadata(bytes: &[u8], generated_on: NaiveDate, fingerprint: &str) -> Result<Vec<u8>> {
    let mut document = Document::load_mem(bytes)?;

    if let Ok(info_id) = document.trailer.get(b"Info").and_then(Object::as_reference) {
        if let Ok(Object::Dictionary(info)) = document.get_object_mut(info_id) {
            let date = info_date(generated_on);
            info.set("CreationDate", Object::string_literal(date.clone()));
            info.set("ModDate", Object::string_literal(date));
        }
    }

    let id = Object::String(fingerprint.as_bytes().to_vec(), StringFormat::Literal);
    document.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let xmp_date = xmp_date(generated_on);
    let uuid = format!("uuid:{fingerprint}");
    for object in document.objects.values_mut() {
        let Object::Stream(stream) = object else {
            continue;
        };
        let is_metadata = stream
            .dict
            .get(b"Type")
            .and_then(Object::as_name)
            .map_or(false, |name| name == b"Metadata");
        if !is_metadata {
            continue;
        }

        let content = if stream.dict.has(b"Filter") {
            stream.decompressed_content()?
        } else {
            stream.content.clone()
        };
        let content = XMP_DATES.replace_all(&content, |caps: &Captures<'_>| {
            [&caps[1], xmp_date.as_bytes()].concat()
        });
        let content = XMP_IDS.replace_all(&content, |caps: &Captures<'_>| {
            [&caps[1], uuid.as_bytes()].concat()
        });
        stream.set_plain_content(content.into_owned());
    }

    let mut pinned = Vec::with_capacity(bytes.len());
    document.save_to(&mut pinned)?;
    debug!("Pinned PDF metadata to {} ({})", generated_on, fingerprint);
    Ok(pinned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date")
    }

    #[test]
    fn dates_use_pdf_notation() {
        assert_eq!(info_date(date()), "D:20240401000000+00'00'");
        assert_eq!(xmp_date(date()), "D:2024-04-01T00:00:00+00'00'");
    }

    #[test]
    fn fingerprint_follows_layout_and_date() {
        let mut layout = Layout::new("Jane Doe");
        let first = layout_fingerprint(&layout, date());
        assert_eq!(first.len(), 32);
        assert_eq!(first, layout_fingerprint(&layout, date()));

        let next_day = date().succ_opt().expect("valid date");
        assert_ne!(first, layout_fingerprint(&layout, next_day));

        layout.push_section(Section::new("Education"));
        assert_ne!(first, layout_fingerprint(&layout, date()));
    }

    #[test]
    fn xmp_fields_are_rewritten() {
        let xmp = b"<xmp:CreateDate>D:2026-10-18T20:26:14+00'00'</xmp:CreateDate>\
                    <xmpMM:InstanceID>uuid:abc</xmpMM:InstanceID>";
        let dated = XMP_DATES.replace_all(xmp, |caps: &Captures<'_>| {
            [&caps[1], xmp_date(date()).as_bytes()].concat()
        });
        let pinned = XMP_IDS.replace_all(&dated, |caps: &Captures<'_>| {
            [&caps[1], b"uuid:0123".as_slice()].concat()
        });
        assert_eq!(
            &*pinned,
            b"<xmp:CreateDate>D:2024-04-01T00:00:00+00'00'</xmp:CreateDate>\
              <xmpMM:InstanceID>uuid:0123</xmpMM:InstanceID>"
                .as_slice()
        );
    }

    #[test]
    fn unparsable_bytes_are_an_error() {
        assert!(pin_metadata(b"not a pdf", date(), "0").is_err());
    }
}
