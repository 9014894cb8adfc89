pub mod error;
pub mod pathway;
pub mod request;

pub use error::{ModelError, Result};
pub use pathway::TriagePathway;
pub use request::{EchoRequest, RequestId, RequestStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathway_targets() {
        assert_eq!(TriagePathway::Purple.target_working_hours(), Some(1));
        assert_eq!(TriagePathway::Red.target_working_hours(), Some(24));
        assert_eq!(TriagePathway::Amber.target_working_hours(), Some(72));
        assert_eq!(TriagePathway::GreenRejected.target_working_hours(), None);
    }

    #[test]
    fn rejected_folds_into_green() {
        let parsed: TriagePathway = "REJECTED".parse().expect("parse rejected");
        assert_eq!(parsed, TriagePathway::GreenRejected);
        assert_eq!(parsed.as_str(), "GREEN PATHWAY");
    }

    #[test]
    fn unknown_pathway_is_rejected() {
        let err = "BLUE PATHWAY".parse::<TriagePathway>().unwrap_err();
        assert!(matches!(err, ModelError::InvalidPathway(_)));
    }
}
