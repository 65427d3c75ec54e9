//! [`Command`] for saving or unsaving a [`Property`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        property,
        user::{self, ListChange},
        Property, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Property`] by a [`User`], or unsaving it if
/// it's saved already.
#[derive(Clone, Copy, Debug)]
pub struct ToggleSavedProperty {
    /// ID of the [`User`] saving the [`Property`].
    pub user_id: user::Id,

    /// ID of the [`Property`] to save or unsave.
    pub property_id: property::Id,
}

impl<Db> Command<ToggleSavedProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    /// Indicator whether the [`Property`] is saved afterwards.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleSavedProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ToggleSavedProperty {
            user_id,
            property_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut user = tx
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        // Unsaving a removed `Property` is still allowed.
        if !user.has_saved(property_id) {
            drop(
                self.database()
                    .execute(Select(By::<Option<Property>, _>::new(
                        property_id,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::PropertyNotExists(property_id))
                    .map_err(tracerr::wrap!())?,
            );
        }

        _ = user.apply(ListChange::ToggleSavedProperty(property_id));
        user.updated_at = DateTime::now().coerce();
        tx.execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user.has_saved(property_id))
    }
}

/// Error of [`ToggleSavedProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{
            property::{self, fixture},
            user,
        },
        test_service,
    };

    use super::{ExecutionError, ToggleSavedProperty};

    #[tokio::test]
    async fn saves_and_unsaves() {
        let service = test_service();
        let user = user::fixture::user("ravi@example.com");
        let property = fixture::property("Saved");
        {
            let mut state = service.database().state();
            drop(state.users.insert(user.id, user.clone()));
            drop(state.properties.insert(property.id, property.clone()));
        }
        let cmd = ToggleSavedProperty {
            user_id: user.id,
            property_id: property.id,
        };

        assert!(service.execute(cmd).await.unwrap());
        assert_eq!(
            service.database().state().users[&user.id].saved_properties,
            [property.id],
        );

        assert!(!service.execute(cmd).await.unwrap());
        assert!(service.database().state().users[&user.id]
            .saved_properties
            .is_empty());
    }

    #[tokio::test]
    async fn cannot_save_unknown_property() {
        let service = test_service();
        let user = user::fixture::user("ravi@example.com");
        drop(service.database().state().users.insert(user.id, user.clone()));

        let err = service
            .execute(ToggleSavedProperty {
                user_id: user.id,
                property_id: property::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(_),
        ));
    }
}
