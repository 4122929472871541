use mongodb::{Client, bson::doc};

/// `Ok` when the server answers a `ping` on the `admin` database.
pub(crate) async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}
