//! [`Command`] for updating the ID lists of a [`User`].

use std::fmt;

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{self, ListChange},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for applying a [`ListChange`] to a [`User`].
///
/// Accompanies the primary write of another [`Command`], so is usually
/// executed via [`Service::update_user_lists()`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateUserLists {
    /// ID of the [`User`] whose lists should be updated.
    pub user_id: user::Id,

    /// [`ListChange`] to apply.
    pub change: ListChange,
}

impl<Db> Command<UpdateUserLists> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
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
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateUserLists,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUserLists { user_id, change } = cmd;

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
        if !user.apply(change) {
            return Ok(user);
        }

        user.updated_at = DateTime::now().coerce();
        tx.execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

impl<Db> Service<Db> {
    /// Executes [`UpdateUserLists`] as a best-effort secondary write.
    ///
    /// A failure is logged and swallowed, since the primary write has been
    /// committed already.
    pub async fn update_user_lists(&self, user_id: user::Id, change: ListChange)
    where
        Self: Command<UpdateUserLists, Err: fmt::Display>,
    {
        if let Err(e) =
            self.execute(UpdateUserLists { user_id, change }).await
        {
            log::error!(
                "Failed to apply `{change:?}` to lists of `User(id: \
                 {user_id})`: {e}",
            );
        }
    }
}

/// Error of [`UpdateUserLists`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{property, user, user::ListChange},
        test_service,
    };

    use super::UpdateUserLists;

    #[tokio::test]
    async fn applies_change() {
        let service = test_service();
        let user = user::fixture::user("asha@example.com");
        drop(service.database().state().users.insert(user.id, user.clone()));
        let property_id = property::Id::new();

        let updated = service
            .execute(UpdateUserLists {
                user_id: user.id,
                change: ListChange::ListProperty(property_id),
            })
            .await
            .unwrap();

        assert_eq!(updated.listed_properties, [property_id]);
        assert_eq!(
            service.database().state().users[&user.id].listed_properties,
            [property_id],
        );
    }

    #[tokio::test]
    async fn swallows_failures_when_best_effort() {
        let service = test_service();
        let user = user::fixture::user("asha@example.com");
        {
            let mut state = service.database().state();
            drop(state.users.insert(user.id, user.clone()));
            state.failing_user_updates = true;
        }

        service
            .update_user_lists(
                user.id,
                ListChange::ListProperty(property::Id::new()),
            )
            .await;
        service
            .update_user_lists(
                user::Id::new(),
                ListChange::ListProperty(property::Id::new()),
            )
            .await;

        assert!(service.database().state().users[&user.id]
            .listed_properties
            .is_empty());
    }
}
