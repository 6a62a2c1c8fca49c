//! Document (PDF) checks.
//!
//! Content inspection is out of scope; only the extension is verified
//! against the declared intent.

use crate::report::{check_id, CheckResult};

pub struct DocumentInspector;

impl DocumentInspector {
    pub fn inspect(&self, extension: &str) -> CheckResult {
        if extension == "pdf" {
            CheckResult::pass(
                check_id::PDF_CHECK,
                "PDF uploaded - content checks are limited",
            )
        } else {
            CheckResult::fail(
                check_id::PDF_CHECK,
                "Asset type is PDF but file is not PDF",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_passes() {
        let check = DocumentInspector.inspect("pdf");
        assert!(check.passed);
        assert_eq!(check.id, check_id::PDF_CHECK);
    }

    #[test]
    fn test_mismatch_reported() {
        let check = DocumentInspector.inspect("docx");
        assert!(!check.passed);
        assert_eq!(check.message, "Asset type is PDF but file is not PDF");
    }
}
