//! Profile-request document construction.
//!
//! Renders the one message this tool ever sends: a signon block plus a
//! `PROFTRNRQ` asking for the server's capability profile, with the
//! profile-updated timestamp pinned to the epoch so the server always
//! answers with a full profile.
//!
//! OFX 1.x requests are SGML: a `KEY:VALUE` header block, a blank line,
//! then a body whose leaf elements are left unclosed. OFX 2.x requests are
//! XML: prolog, `<?OFX …?>` processing instruction, fully closed elements.
//! The indent flag switches between pretty-printed and single-line bodies.

use chrono::{DateTime, TimeZone, Utc};

use crate::ofx::uid::Uid;
use crate::types::{Candidate, SignonInfo};

/// English, the only language this client requests.
const LANGUAGE: &str = "ENG";

/// OFX datetime rendering (GMT, second precision).
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%d%H%M%S").to_string()
}

/// The epoch-zero sentinel for `DTPROFUP`.
fn epoch_datetime() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}

/// A complete profile request, ready to render for one candidate.
#[derive(Debug)]
pub struct ProfileRequest<'a> {
    pub candidate: &'a Candidate,
    pub signon: &'a SignonInfo,
    pub trn_uid: &'a Uid,
    /// Client-side timestamp for the `DTCLIENT` element.
    pub dt_client: DateTime<Utc>,
}

impl ProfileRequest<'_> {
    /// Render the full on-wire document, header included.
    pub fn render(&self) -> String {
        let xml = self.candidate.spec_version.is_xml();
        let mut w = DocWriter::new(xml, self.candidate.indent);

        self.render_header(&mut w);

        w.open("OFX");
        w.open("SIGNONMSGSRQV1");
        w.open("SONRQ");
        w.leaf("DTCLIENT", &format_datetime(self.dt_client));
        w.leaf("USERID", &self.signon.user_id);
        w.leaf("USERPASS", &self.signon.user_pass);
        w.leaf("LANGUAGE", LANGUAGE);
        if !self.signon.org.is_empty() || !self.signon.fid.is_empty() {
            w.open("FI");
            if !self.signon.org.is_empty() {
                w.leaf("ORG", &self.signon.org);
            }
            if !self.signon.fid.is_empty() {
                w.leaf("FID", &self.signon.fid);
            }
            w.close("FI");
        }
        w.leaf("APPID", &self.candidate.app_id);
        w.leaf("APPVER", &self.candidate.app_version);
        w.close("SONRQ");
        w.close("SIGNONMSGSRQV1");

        w.open("PROFMSGSRQV1");
        w.open("PROFTRNRQ");
        w.leaf("TRNUID", self.trn_uid.as_str());
        w.open("PROFRQ");
        w.leaf("CLIENTROUTING", "NONE");
        w.leaf("DTPROFUP", &format_datetime(epoch_datetime()));
        w.close("PROFRQ");
        w.close("PROFTRNRQ");
        w.close("PROFMSGSRQV1");
        w.close("OFX");

        w.finish()
    }

    fn render_header(&self, w: &mut DocWriter) {
        let version = self.candidate.spec_version.as_str();
        if self.candidate.spec_version.is_xml() {
            w.raw_line(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
            w.raw_line(&format!(
                r#"<?OFX OFXHEADER="200" VERSION="{version}" SECURITY="NONE" OLDFILEUID="NONE" NEWFILEUID="NONE"?>"#
            ));
        } else {
            for line in [
                "OFXHEADER:100",
                "DATA:OFXSGML",
                &format!("VERSION:{version}"),
                "SECURITY:NONE",
                "ENCODING:USASCII",
                "CHARSET:1252",
                "COMPRESSION:NONE",
                "OLDFILEUID:NONE",
                "NEWFILEUID:NONE",
            ] {
                w.raw_line(line);
            }
            w.raw_line("");
        }
    }
}

// ---------------------------------------------------------------------------
// Document writer
// ---------------------------------------------------------------------------

/// Minimal element writer covering exactly what the request needs:
/// aggregate open/close, leaf elements, and the SGML/XML + indent split.
struct DocWriter {
    out: String,
    xml: bool,
    indent: bool,
    depth: usize,
}

impl DocWriter {
    fn new(xml: bool, indent: bool) -> Self {
        Self {
            out: String::new(),
            xml,
            indent,
            depth: 0,
        }
    }

    /// Header line, written verbatim and always newline-terminated.
    fn raw_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn break_line(&mut self) {
        if self.indent {
            self.out.push('\n');
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
        }
    }

    fn open(&mut self, tag: &str) {
        if self.depth > 0 {
            self.break_line();
        }
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.break_line();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Leaf element. SGML leaves the element unclosed; XML closes it.
    fn leaf(&mut self, tag: &str, value: &str) {
        self.break_line();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.out.push_str(&escape(value));
        if self.xml {
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push('>');
        }
    }

    fn finish(mut self) -> String {
        self.out.push('\n');
        self.out
    }
}

/// Escape the markup-significant characters in element content.
fn escape(value: &str) -> String {
    if !value.contains(['&', '<', '>']) {
        return value.to_string();
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ofx::version::OfxVersion;

    fn candidate(spec_version: OfxVersion, indent: bool) -> Candidate {
        Candidate {
            app_id: "QWIN".to_string(),
            app_version: "2600".to_string(),
            spec_version,
            indent,
        }
    }

    fn signon() -> SignonInfo {
        SignonInfo {
            user_id: "alice".to_string(),
            user_pass: "hunter2".to_string(),
            org: "BANK".to_string(),
            fid: "1234".to_string(),
        }
    }

    fn render(spec_version: OfxVersion, indent: bool) -> String {
        let candidate = candidate(spec_version, indent);
        let signon = signon();
        let trn_uid = Uid::random().unwrap();
        ProfileRequest {
            candidate: &candidate,
            signon: &signon,
            trn_uid: &trn_uid,
            dt_client: Utc.with_ymd_and_hms(2017, 3, 14, 15, 9, 26).unwrap(),
        }
        .render()
    }

    #[test]
    fn test_sgml_header_and_unclosed_leaves() {
        let doc = render(OfxVersion::V103, true);
        assert!(doc.starts_with("OFXHEADER:100\nDATA:OFXSGML\nVERSION:103\n"));
        assert!(doc.contains("<USERID>alice"));
        assert!(!doc.contains("</USERID>"));
        // aggregates still close in SGML
        assert!(doc.contains("</SONRQ>"));
        assert!(doc.contains("</OFX>"));
    }

    #[test]
    fn test_xml_header_and_closed_leaves() {
        let doc = render(OfxVersion::V203, true);
        assert!(doc.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#));
        assert!(doc.contains(r#"VERSION="203""#));
        assert!(doc.contains("<USERID>alice</USERID>"));
    }

    #[test]
    fn test_noindent_body_is_one_line() {
        let doc = render(OfxVersion::V203, false);
        let body = doc.split("?>\n").last().unwrap();
        assert_eq!(body.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_indent_breaks_body_lines() {
        let doc = render(OfxVersion::V203, true);
        assert!(doc.contains("<OFX>\n    <SIGNONMSGSRQV1>"));
    }

    #[test]
    fn test_profile_block_pins_epoch() {
        let doc = render(OfxVersion::V103, true);
        assert!(doc.contains("<CLIENTROUTING>NONE"));
        assert!(doc.contains("<DTPROFUP>19700101000000"));
        assert!(doc.contains("<DTCLIENT>20170314150926"));
    }

    #[test]
    fn test_fi_block_omitted_without_institution() {
        let candidate = candidate(OfxVersion::V203, true);
        let signon = SignonInfo {
            user_id: "alice".to_string(),
            user_pass: "hunter2".to_string(),
            org: String::new(),
            fid: String::new(),
        };
        let trn_uid = Uid::random().unwrap();
        let doc = ProfileRequest {
            candidate: &candidate,
            signon: &signon,
            trn_uid: &trn_uid,
            dt_client: Utc::now(),
        }
        .render();
        assert!(!doc.contains("<FI>"));
    }

    #[test]
    fn test_content_is_escaped() {
        let candidate = candidate(OfxVersion::V203, false);
        let signon = SignonInfo {
            user_id: "a&b".to_string(),
            user_pass: "p<w".to_string(),
            org: "BANK".to_string(),
            fid: "1234".to_string(),
        };
        let trn_uid = Uid::random().unwrap();
        let doc = ProfileRequest {
            candidate: &candidate,
            signon: &signon,
            trn_uid: &trn_uid,
            dt_client: Utc::now(),
        }
        .render();
        assert!(doc.contains("<USERID>a&amp;b</USERID>"));
        assert!(doc.contains("<USERPASS>p&lt;w</USERPASS>"));
    }
}
