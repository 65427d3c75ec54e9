//! [`Command`] for contacting the poster of a [`Property`].

use std::fmt;

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{inquiry::Message, User};
use crate::{
    domain::{
        inquiry, property,
        user::{self, ListChange},
        Inquiry, Property,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, UpdateUserLists};

/// [`Command`] for sending an [`Inquiry`] about a [`Property`].
#[derive(Clone, Debug)]
pub struct CreateInquiry {
    /// ID of the [`Property`] being inquired about.
    pub property_id: property::Id,

    /// ID of the logged in [`User`] sending the [`Inquiry`], if any.
    pub sender_id: Option<user::Id>,

    /// Name of the sender.
    pub name: user::Name,

    /// Phone number of the sender.
    pub phone: user::Phone,

    /// Email address of the sender.
    pub email: Option<user::Email>,

    /// [`Message`] to the poster.
    pub message: inquiry::Message,
}

impl<Db> Command<CreateInquiry> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Inquiry>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Command<UpdateUserLists, Err: fmt::Display>,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInquiry {
            property_id,
            sender_id,
            name,
            phone,
            email,
            message,
        } = cmd;

        let property = self
            .database()
            .execute(Select(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        if let Some(id) = sender_id.filter(|id| property.is_posted_by(*id)) {
            return Err(tracerr::new!(E::OwnProperty(id)));
        }

        let inquiry = Inquiry {
            id: inquiry::Id::new(),
            property_id,
            owner_id: property.posted_by.id,
            sender_id,
            name,
            phone,
            email,
            message,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(inquiry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if let Some(sender_id) = sender_id {
            self.update_user_lists(
                sender_id,
                ListChange::AddInquiry(inquiry.id),
            )
            .await;
        }

        Ok(inquiry)
    }
}

/// Error of [`CreateInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Sender is the poster of the [`Property`].
    #[display("`User(id: {_0})` cannot inquire about own `Property`")]
    #[from(ignore)]
    OwnProperty(#[error(not(source))] user::Id),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{inquiry, property::fixture, user, Property},
        test_service,
    };

    use super::{CreateInquiry, ExecutionError};

    fn inquiry(
        property: &Property,
        sender_id: Option<user::Id>,
    ) -> CreateInquiry {
        CreateInquiry {
            property_id: property.id,
            sender_id,
            name: user::Name::new("Ravi Kumar").unwrap(),
            phone: user::Phone::new("9876543210").unwrap(),
            email: None,
            message: inquiry::Message::new("Is the flat still available?")
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn notifies_owner_and_records_for_sender() {
        let service = test_service();
        let sender = user::fixture::user("ravi@example.com");
        let property = fixture::property("Wanted");
        {
            let mut state = service.database().state();
            drop(state.users.insert(sender.id, sender.clone()));
            drop(state.properties.insert(property.id, property.clone()));
        }

        let created = service
            .execute(inquiry(&property, Some(sender.id)))
            .await
            .unwrap();

        assert_eq!(created.owner_id, property.posted_by.id);
        let state = service.database().state();
        assert!(state.inquiries.contains_key(&created.id));
        assert_eq!(state.users[&sender.id].inquiries, [created.id]);
    }

    #[tokio::test]
    async fn accepts_anonymous_sender() {
        let service = test_service();
        let property = fixture::property("Wanted");
        drop(
            service
                .database()
                .state()
                .properties
                .insert(property.id, property.clone()),
        );

        let created = service.execute(inquiry(&property, None)).await.unwrap();

        assert_eq!(created.sender_id, None);
    }

    #[tokio::test]
    async fn forbids_inquiring_own_property() {
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
            .execute(inquiry(&property, Some(property.posted_by.id)))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OwnProperty(_)));
        assert!(service.database().state().inquiries.is_empty());
    }
}
