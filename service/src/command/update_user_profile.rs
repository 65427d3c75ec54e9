//! [`Command`] for updating a [`User`] profile.

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Avatar, Kind, Name, Phone};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`User`] profile.
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateUserProfile {
    /// ID of the [`User`] whose profile should be updated.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`].
    pub name: Option<user::Name>,

    /// New [`Phone`] of the [`User`], or its removal.
    pub phone: Option<Option<user::Phone>>,

    /// New [`Kind`] of the [`User`].
    pub kind: Option<user::Kind>,

    /// New [`Avatar`] of the [`User`], or its removal.
    pub avatar: Option<Option<user::Avatar>>,
}

impl<Db> Command<UpdateUserProfile> for Service<Db>
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
        cmd: UpdateUserProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUserProfile {
            user_id,
            name,
            phone,
            kind,
            avatar,
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
            .filter(|u| u.deleted_at.is_none())
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let mut changed = false;
        if let Some(name) = name.filter(|n| *n != user.name) {
            user.name = name;
            changed = true;
        }
        if let Some(phone) = phone.filter(|p| *p != user.phone) {
            user.phone = phone;
            changed = true;
        }
        if let Some(kind) = kind.filter(|k| *k != user.kind) {
            user.kind = kind;
            changed = true;
        }
        if let Some(avatar) = avatar.filter(|a| *a != user.avatar) {
            user.avatar = avatar;
            changed = true;
        }
        if !changed {
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

/// Error of [`UpdateUserProfile`] [`Command`] execution.
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
    use crate::{command::Command as _, domain::user, test_service};

    use super::{ExecutionError, UpdateUserProfile};

    #[tokio::test]
    async fn updates_only_provided_fields() {
        let service = test_service();
        let mut user = user::fixture::user("asha@example.com");
        user.phone = user::Phone::new("9876543210");
        drop(service.database().state().users.insert(user.id, user.clone()));

        let updated = service
            .execute(UpdateUserProfile {
                user_id: user.id,
                kind: Some(user::Kind::Builder),
                avatar: Some(user::Avatar::new(
                    "https://cdn.example.com/a.png",
                )),
                ..UpdateUserProfile::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.kind, user::Kind::Builder);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.phone, user.phone);
        assert!(updated.avatar.is_some());
        assert!(updated.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn fails_for_unknown_user() {
        let err = test_service()
            .execute(UpdateUserProfile {
                user_id: user::Id::new(),
                ..UpdateUserProfile::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
