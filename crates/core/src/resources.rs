use crate::error::AssistantError;

pub const EXTRACTION_INSTRUCTIONS: &str = "find-entity-names.txt";
pub const ANSWER_INSTRUCTIONS: &str = "answer-question.txt";
pub const CHEAT_SHEET: &str = "rql-cheat-sheet.md";
pub const TABULAR_PATTERN: &str = "rql-tabular-queries.md";
pub const DOC_JSON: &str = "rql-doc-json.md";
pub const DOC_XML: &str = "rql-doc-xml.md";
pub const ROUTES: &str = "routes.json";
pub const SCHEMAS: &str = "schemas.json";

const BUNDLE: &[(&str, &str)] = &[
    (
        EXTRACTION_INSTRUCTIONS,
        include_str!("../resources/find-entity-names.txt"),
    ),
    (
        ANSWER_INSTRUCTIONS,
        include_str!("../resources/answer-question.txt"),
    ),
    (CHEAT_SHEET, include_str!("../resources/rql-cheat-sheet.md")),
    (
        TABULAR_PATTERN,
        include_str!("../resources/rql-tabular-queries.md"),
    ),
    (DOC_JSON, include_str!("../resources/rql-doc-json.md")),
    (DOC_XML, include_str!("../resources/rql-doc-xml.md")),
    (ROUTES, include_str!("../resources/routes.json")),
    (SCHEMAS, include_str!("../resources/schemas.json")),
];

/// Load a bundled resource by name. Absence is a packaging defect, never a
/// transient condition.
pub fn load(name: &str) -> Result<&'static str, AssistantError> {
    BUNDLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| AssistantError::ResourceNotFound(name.to_string()))
}
