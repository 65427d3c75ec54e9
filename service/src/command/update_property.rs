//! [`Command`] for revising a listed [`Property`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        property::{self, Draft, Step, Violation, Wizard},
        user, Property,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for revising a listed [`Property`] with a new [`Draft`].
///
/// Only the [`User`] who posted the [`Property`] may revise it.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to revise.
    pub property_id: property::Id,

    /// ID of the [`User`] revising the [`Property`].
    pub editor_id: user::Id,

    /// [`Draft`] replacing the [`Property`] contents.
    pub draft: Draft,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
            editor_id,
            draft,
        } = cmd;

        let mut wizard = Wizard::new(draft);
        let listing = wizard
            .finish()
            .map_err(|violations| E::InvalidListing {
                step: wizard.step(),
                violations,
            })
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        if !property.is_posted_by(editor_id) {
            return Err(tracerr::new!(E::NotPoster(editor_id)));
        }

        property.revise(listing);
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
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

    /// [`User`] revising the [`Property`] didn't post it.
    #[display("`User(id: {_0})` is not the poster")]
    #[from(ignore)]
    NotPoster(#[error(not(source))] user::Id),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{
            property::{fixture, Draft, Score},
            user,
        },
        test_service,
    };

    use super::{ExecutionError, UpdateProperty};

    #[tokio::test]
    async fn revises_property_of_poster() {
        let service = test_service();
        let property = fixture::property("Old title");
        drop(
            service
                .database()
                .state()
                .properties
                .insert(property.id, property.clone()),
        );

        let mut draft = Draft::from(&property);
        draft.title = Some("New title".into());
        draft.price = Some(9_500_000.into());

        let revised = service
            .execute(UpdateProperty {
                property_id: property.id,
                editor_id: property.posted_by.id,
                draft,
            })
            .await
            .unwrap();

        assert_eq!(revised.title.to_string(), "New title");
        assert_eq!(revised.created_at, property.created_at);
        assert!(revised.updated_at >= property.updated_at);
        assert_eq!(revised.score(), Score::MAX);
        assert_eq!(
            service.database().state().properties[&property.id]
                .title
                .to_string(),
            "New title",
        );
    }

    #[tokio::test]
    async fn forbids_other_users() {
        let service = test_service();
        let property = fixture::property("Old title");
        drop(
            service
                .database()
                .state()
                .properties
                .insert(property.id, property.clone()),
        );

        let err = service
            .execute(UpdateProperty {
                property_id: property.id,
                editor_id: user::Id::new(),
                draft: Draft::from(&property),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotPoster(_)));
    }
}
