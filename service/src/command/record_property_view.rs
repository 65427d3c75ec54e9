//! [`Command`] for counting a view of a [`Property`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Views},
        Property,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for counting a view of a [`Property`].
///
/// Doesn't bump the modification date of the [`Property`].
#[derive(Clone, Copy, Debug)]
pub struct RecordPropertyView {
    /// ID of the viewed [`Property`].
    pub property_id: property::Id,
}

impl<Db> Command<RecordPropertyView> for Service<Db>
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
    type Ok = Views;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordPropertyView,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPropertyView { property_id } = cmd;

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

        property.views = property.views.increment();
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(property.views)
    }
}

/// Error of [`RecordPropertyView`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::property::{self, fixture, Views},
        test_service,
    };

    use super::{ExecutionError, RecordPropertyView};

    #[tokio::test]
    async fn counts_views() {
        let service = test_service();
        let property = fixture::property("Viewed");
        drop(
            service
                .database()
                .state()
                .properties
                .insert(property.id, property.clone()),
        );

        for _ in 0..2 {
            drop(
                service
                    .execute(RecordPropertyView {
                        property_id: property.id,
                    })
                    .await
                    .unwrap(),
            );
        }

        let stored = service.database().state().properties[&property.id]
            .clone();
        assert_eq!(stored.views, Views::from(2));
        assert_eq!(stored.updated_at, property.updated_at);
    }

    #[tokio::test]
    async fn fails_for_unknown_property() {
        let err = test_service()
            .execute(RecordPropertyView {
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
