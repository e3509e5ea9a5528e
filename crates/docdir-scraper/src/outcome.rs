//! Tagged result for HTML/JSON shape extraction.
//!
//! Extractors that used to degrade silently to an empty collection return
//! a `ParseOutcome` instead, so callers (and tests) can tell "the element
//! was not there" apart from "the element was there but unreadable".

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    /// The expected shape was found and parsed.
    Ok(T),
    /// The expected element/block is absent from the document.
    Missing,
    /// The element is present but its content does not parse.
    Malformed,
}

impl<T> ParseOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ParseOutcome::Ok(value) => Some(value),
            ParseOutcome::Missing | ParseOutcome::Malformed => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ParseOutcome::Missing)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_option_keeps_only_ok() {
        assert_eq!(ParseOutcome::Ok(3).into_option(), Some(3));
        assert_eq!(ParseOutcome::<u32>::Missing.into_option(), None);
        assert_eq!(ParseOutcome::<u32>::Malformed.into_option(), None);
    }

    #[test]
    fn branch_predicates() {
        assert!(ParseOutcome::<u32>::Missing.is_missing());
        assert!(ParseOutcome::<u32>::Malformed.is_malformed());
        assert!(!ParseOutcome::Ok(1).is_missing());
    }
}
