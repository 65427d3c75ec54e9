//! [`Wizard`] guiding a [`Draft`] through its [`Step`]s.

use super::{Draft, Listing, Score, Step, Violation};

/// Linear state machine filling a [`Draft`] step by step.
///
/// Moving forward is allowed only once the fields of the current [`Step`]
/// are valid, while moving backward is always allowed.
#[derive(Clone, Debug)]
pub struct Wizard {
    /// Current [`Step`].
    step: Step,

    /// [`Draft`] being filled.
    draft: Draft,

    /// Completeness [`Score`] as of the last advance.
    score: Score,
}

/// Outcome of a successful [`Wizard::next()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Advance {
    /// [`Wizard`] moved to the contained [`Step`].
    Moved(Step),

    /// The last [`Step`] is valid, so the [`Wizard`] may be finished.
    Finished,
}

impl Wizard {
    /// Starts a new [`Wizard`] over the provided [`Draft`] at
    /// [`Step::BasicDetails`].
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        Self {
            step: Step::BasicDetails,
            score: draft.score(),
            draft,
        }
    }

    /// Returns the current [`Step`].
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Returns the [`Draft`] being filled.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the completeness [`Score`] as of the last advance.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns the [`Draft`] being filled, dropping this [`Wizard`].
    #[must_use]
    pub fn into_draft(self) -> Draft {
        self.draft
    }

    /// Validates the current [`Step`] and moves to the next one.
    ///
    /// The [`Score`] is recomputed on success.
    ///
    /// # Errors
    ///
    /// With [`Violation`]s of the current [`Step`], staying on it.
    pub fn next(&mut self) -> Result<Advance, Vec<Violation>> {
        self.draft.validate(self.step)?;
        self.score = self.draft.score();

        Ok(match self.step.next() {
            Some(step) => {
                self.step = step;
                Advance::Moved(step)
            }
            None => Advance::Finished,
        })
    }

    /// Moves to the previous [`Step`] without any validation.
    ///
    /// Stays on [`Step::BasicDetails`].
    pub fn back(&mut self) -> Step {
        if let Some(step) = self.step.prev() {
            self.step = step;
        }
        self.step
    }

    /// Jumps to the provided [`Step`].
    ///
    /// Jumping backward is always allowed, while jumping forward requires
    /// every [`Step`] before the `target` to be valid.
    ///
    /// # Errors
    ///
    /// With [`Violation`]s of the first invalid [`Step`] before the `target`,
    /// staying on the current [`Step`].
    pub fn go_to(&mut self, target: Step) -> Result<Step, Vec<Violation>> {
        if target > self.step {
            for step in Step::ALL.iter().take_while(|s| **s < target) {
                self.draft.validate(*step)?;
            }
            self.score = self.draft.score();
        }
        self.step = target;
        Ok(target)
    }

    /// Modifies the [`Draft`] without moving or rescoring.
    pub fn edit(&mut self, f: impl FnOnce(&mut Draft)) {
        f(&mut self.draft);
    }

    /// Validates every [`Step`] and produces a complete [`Listing`].
    ///
    /// # Errors
    ///
    /// With [`Violation`]s of all the invalid [`Step`]s, moving to the first
    /// of them.
    pub fn finish(&mut self) -> Result<Listing, Vec<Violation>> {
        self.draft.listing().inspect_err(|_| {
            if let Some(step) = Step::ALL
                .iter()
                .find(|s| self.draft.validate(**s).is_err())
            {
                self.step = *step;
            }
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::property::{
        draft::Field, fixture, Draft, Score, Step,
    };

    use super::{Advance, Wizard};

    #[test]
    fn starts_at_basic_details() {
        let wizard = Wizard::new(Draft::default());

        assert_eq!(wizard.step(), Step::BasicDetails);
        assert_eq!(wizard.score(), Score::default());
    }

    #[test]
    fn walks_valid_draft_to_the_end() {
        let mut wizard = Wizard::new(fixture::draft());

        for expected in &Step::ALL[1..] {
            assert_eq!(wizard.next(), Ok(Advance::Moved(*expected)));
        }
        assert_eq!(wizard.next(), Ok(Advance::Finished));
        assert_eq!(wizard.step(), Step::AdditionalDetails);
        assert_eq!(wizard.score(), Score::MAX);
        assert!(wizard.finish().is_ok());
    }

    #[test]
    fn gates_advance_on_current_step_only() {
        let mut draft = fixture::draft();
        draft.images.clear();
        let mut wizard = Wizard::new(draft);

        assert_eq!(wizard.next(), Ok(Advance::Moved(Step::Location)));
        assert_eq!(wizard.next(), Ok(Advance::Moved(Step::Profile)));
        assert_eq!(wizard.next(), Ok(Advance::Moved(Step::Media)));

        let violations = wizard.next().unwrap_err();
        assert_eq!(violations[0].field, Field::Images);
        assert_eq!(wizard.step(), Step::Media);

        wizard.edit(|d| d.images.push("https://cdn.example.com/1.jpg".into()));
        assert_eq!(wizard.step(), Step::Media);
        assert_eq!(wizard.score().get(), 80);

        assert_eq!(
            wizard.next(),
            Ok(Advance::Moved(Step::AdditionalDetails)),
        );
        assert_eq!(wizard.score(), Score::MAX);
    }

    #[test]
    fn recomputes_score_on_advance() {
        let mut wizard = Wizard::new(Draft::default());
        wizard.edit(|d| *d = fixture::draft());
        assert_eq!(wizard.score(), Score::default());

        assert!(wizard.next().is_ok());
        assert_eq!(wizard.score(), Score::MAX);
    }

    #[test]
    fn goes_back_freely() {
        let mut wizard = Wizard::new(Draft::default());
        assert_eq!(wizard.back(), Step::BasicDetails);

        let mut wizard = Wizard::new(fixture::draft());
        assert!(wizard.next().is_ok());
        assert!(wizard.next().is_ok());
        wizard.edit(|d| d.title = None);

        assert_eq!(wizard.back(), Step::Location);
        assert_eq!(wizard.back(), Step::BasicDetails);
    }

    #[test]
    fn jumps_forward_only_over_valid_steps() {
        let mut draft = fixture::draft();
        draft.pincode = None;
        let mut wizard = Wizard::new(draft);

        assert_eq!(wizard.go_to(Step::Location), Ok(Step::Location));

        let violations = wizard.go_to(Step::Media).unwrap_err();
        assert_eq!(violations[0].field, Field::Pincode);
        assert_eq!(wizard.step(), Step::Location);

        wizard.edit(|d| d.pincode = Some("560038".into()));
        assert_eq!(wizard.go_to(Step::Media), Ok(Step::Media));
        assert_eq!(wizard.go_to(Step::BasicDetails), Ok(Step::BasicDetails));
    }

    #[test]
    fn finish_points_to_first_invalid_step() {
        let mut draft = fixture::draft();
        draft.area = None;
        draft.description = None;
        let mut wizard = Wizard::new(draft);

        let violations = wizard.finish().unwrap_err();
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            [Field::Area, Field::Description],
        );
        assert_eq!(wizard.step(), Step::Profile);
        assert_eq!(wizard.into_draft().area, None);
    }
}
