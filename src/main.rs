use consultplus::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("consultplus".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;
    info!("Starting the application...");

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;

    Ok(())
}
