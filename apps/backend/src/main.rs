#[tokio::main]
async fn main() -> anyhow::Result<()> {
    korean_learner_backend::run().await
}
