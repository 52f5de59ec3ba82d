//! AMSKY01 weather station driver binary

use amsky01::Amsky01Station;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    skybridge::run_station::<Amsky01Station>().await?;
    Ok(())
}
