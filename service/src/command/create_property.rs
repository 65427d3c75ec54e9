//! [`Command`] for listing a new [`Property`].

use std::fmt;

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        property::{Draft, PostedBy, Step, Violation, Wizard},
        user::{self, ListChange},
        Property, User,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, UpdateUserLists};

/// [`Command`] for listing a new [`Property`] out of a [`Draft`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// ID of the [`User`] posting the [`Property`].
    pub poster_id: user::Id,

    /// [`Draft`] of the [`Property`] listing.
    pub draft: Draft,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Command<UpdateUserLists, Err: fmt::Display>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty { poster_id, draft } = cmd;

        let mut wizard = Wizard::new(draft);
        let listing = wizard
            .finish()
            .map_err(|violations| E::InvalidListing {
                step: wizard.step(),
                violations,
            })
            .map_err(tracerr::wrap!())?;

        let poster = self
            .database()
            .execute(Select(By::new(poster_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|u| u.deleted_at.is_none())
            .ok_or(E::UserNotExists(poster_id))
            .map_err(tracerr::wrap!())?;

        let property = Property::new(listing, PostedBy::from(&poster));

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.update_user_lists(poster_id, ListChange::ListProperty(property.id))
            .await;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Draft`] doesn't pass the [`Wizard`].
    #[display(
        "`Property` listing is invalid at `{step}` step: {} violation(s)",
        violations.len(),
    )]
    #[from(ignore)]
    InvalidListing {
        /// First [`Step`] having [`Violation`]s.
        step: Step,

        /// All the [`Violation`]s of the [`Draft`].
        violations: Vec<Violation>,
    },

    /// Posting [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{
            property::{fixture, Score, Step},
            user,
        },
        test_service,
    };

    use super::{CreateProperty, ExecutionError};

    #[tokio::test]
    async fn lists_property_for_poster() {
        let service = test_service();
        let poster = user::fixture::user("asha@example.com");
        drop(
            service.database().state().users.insert(poster.id, poster.clone()),
        );

        let property = service
            .execute(CreateProperty {
                poster_id: poster.id,
                draft: fixture::draft(),
            })
            .await
            .unwrap();

        assert_eq!(property.posted_by.id, poster.id);
        assert_eq!(property.posted_by.name, poster.name);
        assert_eq!(property.score(), Score::MAX);
        assert!(!property.verified);

        let state = service.database().state();
        assert!(state.properties.contains_key(&property.id));
        assert_eq!(state.users[&poster.id].listed_properties, [property.id]);
    }

    #[tokio::test]
    async fn keeps_property_when_list_update_fails() {
        let service = test_service();
        let poster = user::fixture::user("asha@example.com");
        {
            let mut state = service.database().state();
            drop(state.users.insert(poster.id, poster.clone()));
            state.failing_user_updates = true;
        }

        let property = service
            .execute(CreateProperty {
                poster_id: poster.id,
                draft: fixture::draft(),
            })
            .await
            .unwrap();

        let state = service.database().state();
        assert!(state.properties.contains_key(&property.id));
        assert!(state.users[&poster.id].listed_properties.is_empty());
    }

    #[tokio::test]
    async fn rejects_incomplete_draft() {
        let service = test_service();
        let poster = user::fixture::user("asha@example.com");
        drop(
            service.database().state().users.insert(poster.id, poster.clone()),
        );
        let mut draft = fixture::draft();
        draft.pincode = None;
        draft.images.clear();

        let err = service
            .execute(CreateProperty {
                poster_id: poster.id,
                draft,
            })
            .await
            .unwrap_err();

        let ExecutionError::InvalidListing { step, violations } = err.as_ref()
        else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*step, Step::Location);
        assert_eq!(violations.len(), 2);
        assert!(service.database().state().properties.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_poster() {
        let err = test_service()
            .execute(CreateProperty {
                poster_id: user::Id::new(),
                draft: fixture::draft(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
