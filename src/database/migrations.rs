use log::debug;
use tokio_postgres::Client;

use crate::repositories::message_repository::{FROM_USER_CONSTRAINT, TO_USER_CONSTRAINT};

// Creates the users and messages tables if they are missing.
pub async fn apply_migrations(client: &Client) -> Result<(), tokio_postgres::Error> {
    let create_users_table_query = "
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone TEXT NOT NULL,
            join_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            last_login_at TIMESTAMPTZ
        )
    ";
    client.execute(create_users_table_query, &[]).await?;
    debug!("users table ready");

    // read_at stays NULL until the recipient marks the message read
    let create_messages_table_query = format!(
        "
        CREATE TABLE IF NOT EXISTS messages (
            id SERIAL PRIMARY KEY,
            from_username TEXT NOT NULL CONSTRAINT {} REFERENCES users(username),
            to_username TEXT NOT NULL CONSTRAINT {} REFERENCES users(username),
            body TEXT NOT NULL,
            sent_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            read_at TIMESTAMPTZ
        )
    ",
        FROM_USER_CONSTRAINT, TO_USER_CONSTRAINT
    );
    client.execute(create_messages_table_query.as_str(), &[]).await?;
    debug!("messages table ready");

    Ok(())
}
