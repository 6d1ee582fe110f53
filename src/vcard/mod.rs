//! Contact card (vCard 3.0) built from text visible on the page
//!
//! Every field is optional: anything missing from the page is left out of
//! the card rather than written empty.

pub mod extract;

pub use extract::{find_birth_date, find_blood_type, normalize_birth_date};

/// MIME type of the generated file
pub const VCARD_MIME: &str = "text/vcard";

const BEGIN: &str = "BEGIN:VCARD";
const END: &str = "END:VCARD";
const VERSION: &str = "VERSION:3.0";
const CRLF: &str = "\r\n";
/// Maximum line length in octets, excluding the line break
const FOLD_AT: usize = 75;

/// Raw text read from the page at export time; absent elements are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Free text scanned for blood type and date of birth
    pub details: String,
    pub page_url: String,
}

/// Typed contact card fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCard {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Address components, in the order they appear on the page
    pub address: Vec<String>,
    /// `YYYYMMDD`
    pub birth_date: Option<String>,
    pub blood_type: Option<String>,
    pub page_url: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ContactCard {
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        let address = snapshot
            .address
            .split(',')
            .filter_map(non_empty)
            .collect();

        Self {
            full_name: non_empty(&snapshot.name),
            phone: non_empty(&snapshot.phone),
            email: non_empty(&snapshot.email),
            address,
            birth_date: find_birth_date(&snapshot.details),
            blood_type: find_blood_type(&snapshot.details),
            page_url: non_empty(&snapshot.page_url),
        }
    }

    /// Free-text note: blood type and page reference, when present
    pub fn note(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(blood) = &self.blood_type {
            parts.push(format!("Blood type: {blood}"));
        }
        if let Some(url) = &self.page_url {
            parts.push(format!("ICE page {url}"));
        }
        (!parts.is_empty()).then(|| parts.join("\n"))
    }

    /// Download file name: the contact's name with whitespace runs as `_`
    pub fn file_name(&self) -> String {
        match &self.full_name {
            Some(name) => {
                let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
                format!("{stem}.vcf")
            }
            None => "contact.vcf".to_string(),
        }
    }

    /// Render as vCard 3.0 text with CRLF line endings
    pub fn to_vcard(&self) -> String {
        let mut lines = vec![BEGIN.to_string(), VERSION.to_string()];

        if let Some(name) = &self.full_name {
            let (given, family) = split_name(name);
            lines.push(format!("N:{};{};;;", escape(family), escape(given)));
            lines.push(format!("FN:{}", escape(name)));
        }
        if let Some(phone) = &self.phone {
            lines.push(format!("TEL;TYPE=CELL:{}", escape(phone)));
        }
        if let Some(email) = &self.email {
            lines.push(format!("EMAIL:{}", escape(email)));
        }
        if !self.address.is_empty() {
            let components: Vec<_> = self.address.iter().map(|c| escape(c)).collect();
            lines.push(format!("ADR;TYPE=HOME:;;{}", components.join(";")));
        }
        if let Some(bday) = &self.birth_date {
            lines.push(format!("BDAY:{bday}"));
        }
        if let Some(note) = self.note() {
            lines.push(format!("NOTE:{}", escape(&note)));
        }

        lines.push(END.to_string());
        let lines: Vec<_> = lines.iter().map(|l| fold(l)).collect();
        let mut out = lines.join(CRLF);
        out.push_str(CRLF);
        out
    }
}

/// Split a display name into (given, family); single words are given names.
fn split_name(name: &str) -> (&str, &str) {
    let name = name.trim();
    match name.rsplit_once(char::is_whitespace) {
        Some((given, family)) => (given.trim_end(), family),
        None => (name, ""),
    }
}

/// Fold a content line so no physical line exceeds [`FOLD_AT`] octets.
///
/// Continuation lines start with a single space, which counts toward their
/// length. Breaks fall on char boundaries.
fn fold(line: &str) -> String {
    if line.len() <= FOLD_AT {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / FOLD_AT * 3);
    let mut width = 0;
    for c in line.chars() {
        if width + c.len_utf8() > FOLD_AT {
            out.push_str(CRLF);
            out.push(' ');
            width = 1;
        }
        out.push(c);
        width += c.len_utf8();
    }
    out
}

/// Escape a text value for a vCard 3.0 property
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_snapshot() -> PageSnapshot {
        PageSnapshot {
            name: "  Jane Q Doe ".into(),
            phone: "+15551234567".into(),
            email: "jane@example.com".into(),
            address: "12 High St, Springfield, IL 62701".into(),
            details: "Allergic to latex. Blood type: O negative. DOB: May 26, 1999".into(),
            page_url: "https://example.com/ice".into(),
        }
    }

    #[test]
    fn test_full_card() {
        let card = ContactCard::from_snapshot(&full_snapshot());
        let expected = [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "N:Doe;Jane Q;;;",
            "FN:Jane Q Doe",
            "TEL;TYPE=CELL:+15551234567",
            "EMAIL:jane@example.com",
            "ADR;TYPE=HOME:;;12 High St;Springfield;IL 62701",
            "BDAY:19990526",
            "NOTE:Blood type: O-\\nICE page https://example.com/ice",
            "END:VCARD",
            "",
        ]
        .join("\r\n");
        assert_eq!(card.to_vcard(), expected);
        assert_eq!(card.file_name(), "Jane_Q_Doe.vcf");
    }

    #[test]
    fn test_absent_fields_have_no_lines() {
        let snapshot = PageSnapshot {
            name: "Solo".into(),
            ..PageSnapshot::default()
        };
        let text = ContactCard::from_snapshot(&snapshot).to_vcard();
        assert_eq!(text, "BEGIN:VCARD\r\nVERSION:3.0\r\nN:;Solo;;;\r\nFN:Solo\r\nEND:VCARD\r\n");
        for prop in ["TEL", "EMAIL", "ADR", "BDAY", "NOTE"] {
            assert!(!text.contains(prop), "unexpected {prop} line");
        }
    }

    #[test]
    fn test_empty_page_still_framed() {
        let card = ContactCard::from_snapshot(&PageSnapshot::default());
        assert_eq!(card.to_vcard(), "BEGIN:VCARD\r\nVERSION:3.0\r\nEND:VCARD\r\n");
        assert_eq!(card.file_name(), "contact.vcf");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape(r"a;b,c\d"), r"a\;b\,c\\d");
        assert_eq!(escape("line1\r\nline2"), r"line1\nline2");
    }

    #[test]
    fn test_long_note_is_folded() {
        let url = format!("https://example.com/{}", "emergency-contact/".repeat(6));
        let card = ContactCard {
            page_url: Some(url.clone()),
            ..ContactCard::default()
        };
        let text = card.to_vcard();

        for line in text.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {line:?}");
        }
        assert!(text.contains("\r\n "));
        let unfolded = text.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("\r\nNOTE:ICE page {url}\r\n")));
    }

    #[test]
    fn test_fold_keeps_multibyte_chars_whole() {
        let line = format!("FN:{}", "\u{e9}".repeat(60));
        let folded = fold(&line);
        for part in folded.split("\r\n") {
            assert!(part.len() <= 75);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
        assert_eq!(fold("FN:short"), "FN:short");
    }

    #[test]
    fn test_address_skips_empty_components() {
        let snapshot = PageSnapshot {
            address: " 1 Main St,, Town ,".into(),
            ..PageSnapshot::default()
        };
        let card = ContactCard::from_snapshot(&snapshot);
        assert_eq!(card.address, vec!["1 Main St", "Town"]);
    }

    proptest! {
        #[test]
        fn test_file_name_has_no_whitespace(name in "[A-Za-z \t]{0,24}") {
            let card = ContactCard {
                full_name: non_empty(&name),
                ..ContactCard::default()
            };
            let file = card.file_name();
            prop_assert!(file.ends_with(".vcf"));
            prop_assert!(!file.chars().any(char::is_whitespace));
            prop_assert!(!file.starts_with('_'));
        }

        #[test]
        fn test_markers_always_balanced(
            name in ".{0,20}",
            phone in "[0-9+ ]{0,12}",
            email in "[a-z@.]{0,16}",
            address in "[A-Za-z0-9 ,]{0,30}",
            details in ".{0,40}",
        ) {
            let snapshot = PageSnapshot {
                name,
                phone,
                email,
                address,
                details,
                page_url: String::new(),
            };
            let text = ContactCard::from_snapshot(&snapshot).to_vcard();
            let lines: Vec<_> = text.split("\r\n").collect();
            prop_assert_eq!(lines.first().copied(), Some(BEGIN));
            prop_assert_eq!(lines.iter().filter(|l| **l == BEGIN).count(), 1);
            prop_assert_eq!(lines.iter().filter(|l| **l == END).count(), 1);
            prop_assert_eq!(lines[lines.len() - 2], END);
            let bare = ["FN:", "TEL;TYPE=CELL:", "EMAIL:", "ADR;TYPE=HOME:;;", "BDAY:", "NOTE:"];
            prop_assert!(lines.iter().all(|l| !bare.contains(l)));
            prop_assert!(lines.iter().all(|l| l.len() <= FOLD_AT));
        }
    }
}
