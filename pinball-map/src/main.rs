use netkit_core::UreqTransport;
use pinball_map::{
    AppStateContainer, Credentials, PinballMapApi, PinballMapConfig, RemoteData, StateRequest,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PinballMapConfig::from_env()?;
    let credentials = Credentials::from_env()?;
    tracing::info!(host = %config.host, scheme = %config.scheme, "connecting");

    let api = PinballMapApi::new(&config, UreqTransport::new())?;
    let mut app = AppStateContainer::new(api);

    app.login(&credentials);
    app.next_update().await;
    match &app.state().current_user {
        RemoteData::Loaded(user) => tracing::info!(user = %user.username, "logged in"),
        RemoteData::Errored(err) => return Err(format!("login failed: {err}").into()),
        RemoteData::Undefined | RemoteData::Loading => return Err("login did not complete".into()),
    }

    app.request(StateRequest::Regions)?;
    app.request(StateRequest::FaveLocations)?;
    for _ in 0..2 {
        app.next_update().await;
    }

    let state = app.state();
    match &state.region_list {
        RemoteData::Loaded(list) => {
            let mut regions: Vec<_> = list.regions.iter().collect();
            regions.sort();
            println!("{} regions", regions.len());
            for region in regions {
                println!("  {:<20} {}", region.name, region.full_name);
            }
        }
        RemoteData::Errored(err) => tracing::warn!(%err, "could not load regions"),
        RemoteData::Undefined | RemoteData::Loading => {}
    }
    match &state.user_fave_locations {
        RemoteData::Loaded(faves) => {
            println!("{} favourite locations", faves.len());
            for location in faves.sorted_by_name() {
                println!("  {}", location.name);
            }
        }
        RemoteData::Errored(err) => tracing::warn!(%err, "could not load favourites"),
        RemoteData::Undefined | RemoteData::Loading => {}
    }
    Ok(())
}
