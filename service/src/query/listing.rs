//! [`Query`] collection related to filling a [`Draft`] listing.

use std::convert::Infallible;

use crate::{
    domain::property::{Draft, Score, Step, Violation},
    Service,
};
#[cfg(doc)]
use crate::domain::property::Wizard;

use super::Query;

/// Checks a single [`Step`] of a [`Draft`] without keeping any state.
///
/// Lets clients gate the [`Wizard`] navigation on their side.
#[derive(Clone, Debug)]
pub struct ValidateStep {
    /// [`Draft`] to check.
    pub draft: Draft,

    /// [`Step`] whose fields are checked.
    pub step: Step,
}

/// Output of [`ValidateStep`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepReport {
    /// [`Violation`]s of the checked [`Step`].
    pub violations: Vec<Violation>,

    /// Completeness [`Score`] of the whole [`Draft`].
    pub score: Score,

    /// [`Step`] the client may move to, if the checked one is valid and is
    /// not the last.
    pub next: Option<Step>,
}

impl<Db> Query<ValidateStep> for Service<Db> {
    type Ok = StepReport;
    type Err = Infallible;

    async fn execute(
        &self,
        ValidateStep { draft, step }: ValidateStep,
    ) -> Result<Self::Ok, Self::Err> {
        let violations = draft.validate(step).err().unwrap_or_default();
        let next = violations.is_empty().then(|| step.next()).flatten();

        Ok(StepReport {
            violations,
            score: draft.score(),
            next,
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::property::{draft::Field, fixture, Draft, Score, Step},
        query::Query as _,
        test_service,
    };

    use super::ValidateStep;

    #[tokio::test]
    async fn reports_next_step_for_valid_one() {
        let report = test_service()
            .execute(ValidateStep {
                draft: fixture::draft(),
                step: Step::Location,
            })
            .await
            .unwrap();

        assert!(report.violations.is_empty());
        assert_eq!(report.score, Score::MAX);
        assert_eq!(report.next, Some(Step::Profile));
    }

    #[tokio::test]
    async fn reports_violations_of_checked_step_only() {
        let mut draft = fixture::draft();
        draft.pincode = Some("012345".into());
        draft.images.clear();

        let report = test_service()
            .execute(ValidateStep {
                draft,
                step: Step::Location,
            })
            .await
            .unwrap();

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, Field::Pincode);
        assert_eq!(report.score.get(), 60);
        assert_eq!(report.next, None);
    }

    #[tokio::test]
    async fn last_step_has_no_next() {
        let report = test_service()
            .execute(ValidateStep {
                draft: fixture::draft(),
                step: Step::AdditionalDetails,
            })
            .await
            .unwrap();

        assert_eq!(report.next, None);

        let report = test_service()
            .execute(ValidateStep {
                draft: Draft::default(),
                step: Step::BasicDetails,
            })
            .await
            .unwrap();

        assert!(!report.violations.is_empty());
        assert_eq!(report.score, Score::default());
    }
}
