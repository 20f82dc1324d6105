#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sales_data::app::run().await
}
