//! [`Inquiry`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::Inquiry,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of an [`Inquiry`] row.
const COLUMNS: &str = "\
    id, property_id, owner_id, sender_id, \
    name, phone, email, message, \
    created_at";

/// Reads an [`Inquiry`] out of the provided [`Row`].
fn from_row(row: &Row) -> Inquiry {
    Inquiry {
        id: row.get("id"),
        property_id: row.get("property_id"),
        owner_id: row.get("owner_id"),
        sender_id: row.get("sender_id"),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<Inquiry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(inquiry): Insert<Inquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Inquiry {
            id,
            property_id,
            owner_id,
            sender_id,
            name,
            phone,
            email,
            message,
            created_at,
        } = inquiry;

        const SQL: &str = "\
            INSERT INTO inquiries (\
                id, property_id, owner_id, sender_id, \
                name, phone, email, message, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &owner_id,
                &sender_id,
                &name,
                &phone,
                &email,
                &message,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Inquiry>, read::inquiry::Owner>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Inquiry>, read::inquiry::Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::inquiry::Owner(owner_id) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM inquiries \
             WHERE owner_id = $1::UUID \
             ORDER BY created_at DESC, id DESC",
        );
        Ok(self
            .query(&sql, &[&owner_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Inquiry>, read::inquiry::Sender>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Inquiry>, read::inquiry::Sender>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::inquiry::Sender(sender_id) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM inquiries \
             WHERE sender_id = $1::UUID \
             ORDER BY created_at DESC, id DESC",
        );
        Ok(self
            .query(&sql, &[&sender_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}
