use thiserror::Error;

#[derive(Debug, Error)]
pub enum BiolinkError {
    #[error("Biolink document should be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("Biolink {section} should be an object, found {found}")]
    SectionNotAnObject {
        section: &'static str,
        found: &'static str,
    },

    #[error("invalid Biolink JSON: {0}")]
    Json(#[from] serde_json::Error),
}
