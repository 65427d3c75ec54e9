//! [`Command`] for removing a listed [`Property`].

use std::fmt;

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        property,
        user::{self, ListChange},
        Property,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, UpdateUserLists};

/// [`Command`] for removing a listed [`Property`].
///
/// Only the [`User`] who posted the [`Property`] may remove it.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to remove.
    pub property_id: property::Id,

    /// ID of the [`User`] removing the [`Property`].
    pub editor_id: user::Id,
}

impl<Db> Command<DeleteProperty> for Service<Db>
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
        > + Database<
            Delete<By<Property, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
    Self: Command<UpdateUserLists, Err: fmt::Display>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty {
            property_id,
            editor_id,
        } = cmd;

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

        let property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        if !property.is_posted_by(editor_id) {
            return Err(tracerr::new!(E::NotPoster(editor_id)));
        }

        tx.execute(Delete(By::<Property, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.update_user_lists(
            editor_id,
            ListChange::UnlistProperty(property_id),
        )
        .await;

        Ok(property)
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] removing the [`Property`] didn't post it.
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
        command::{Command as _, CreateProperty},
        domain::{property::fixture, user},
        test_service,
    };

    use super::{DeleteProperty, ExecutionError};

    #[tokio::test]
    async fn removes_property_and_unlists_it() {
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

        drop(
            service
                .execute(DeleteProperty {
                    property_id: property.id,
                    editor_id: poster.id,
                })
                .await
                .unwrap(),
        );

        let state = service.database().state();
        assert!(state.properties.is_empty());
        assert!(state.users[&poster.id].listed_properties.is_empty());
    }

    #[tokio::test]
    async fn forbids_other_users() {
        let service = test_service();
        let property = fixture::property("Mine");
        drop(
            service
                .database()
                .state()
                .properties
                .insert(property.id, property.clone()),
        );

        let err = service
            .execute(DeleteProperty {
                property_id: property.id,
                editor_id: user::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotPoster(_)));
        assert_eq!(service.database().state().properties.len(), 1);
    }
}
