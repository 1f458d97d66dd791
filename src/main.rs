#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dilekce_server::run().await
}
