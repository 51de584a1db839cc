//! Declaration and formatting checks on the raw text.

use crate::issue::Issue;

const DECLARATION_START: &str = "<?xml";
/// Body content glued onto its opening tag is the shape of unindented output.
const COMPACT_SIGNATURE: &str = "<body><label id=";

/// Missing declaration is reported alone; nothing else can be trusted then.
pub fn check(text: &str) -> Vec<Issue> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with(DECLARATION_START) {
        return vec![Issue::MissingDeclaration];
    }

    let mut issues = Vec::new();
    if !declares_utf8(trimmed) {
        issues.push(Issue::MissingUtf8Encoding);
    }
    if is_compact(trimmed) {
        issues.push(Issue::CompactMarkup);
    }
    issues
}

fn declares_utf8(text: &str) -> bool {
    let declaration = text.split_once("?>").map_or(text, |(decl, _)| decl);
    let declaration = declaration.to_ascii_lowercase();
    declaration.contains("encoding=\"utf-8\"") || declaration.contains("encoding='utf-8'")
}

fn is_compact(text: &str) -> bool {
    let body = text.split_once("?>").map_or(text, |(_, rest)| rest).trim();
    text.contains(COMPACT_SIGNATURE) || (body.matches('<').count() > 2 && !body.contains('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_declaration_stops_early() {
        assert_eq!(check("<report/>"), vec![Issue::MissingDeclaration]);
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        assert!(check("\n  <?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<report/>").is_empty());
    }

    #[test]
    fn test_encoding_and_compact_warnings() {
        let issues = check("<?xml version=\"1.0\"?><report><body><label id=\"3\"/></body></report>");
        assert_eq!(issues, vec![Issue::MissingUtf8Encoding, Issue::CompactMarkup]);
        assert!(check("<?xml version='1.0' encoding='utf-8'?>\n<report/>").is_empty());
    }
}
