/// A piece of a SQL statement: raw text, or a positional parameter placeholder
/// whose index is assigned at render time.
#[derive(Debug, Clone)]
pub(crate) enum SqlPart {
    Raw(String),
    Param,
}
