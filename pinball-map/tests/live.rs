//! `AppStateContainer` against the live mock server over HTTP.

use std::net::SocketAddr;

use netkit_core::UreqTransport;
use pinball_map::{
    AppStateContainer, Credentials, Location, PinballMapApi, PinballMapConfig, RemoteData, Slot,
    StateRequest,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn container(addr: SocketAddr) -> AppStateContainer {
    let config = PinballMapConfig {
        host: addr.to_string(),
        scheme: "http".into(),
        ..PinballMapConfig::default()
    };
    AppStateContainer::new(PinballMapApi::new(&config, UreqTransport::new()).unwrap())
}

#[tokio::test]
async fn login_then_manage_favourites() {
    let mut app = container(start_server());

    app.login(&Credentials::new(mock_server::SEED_LOGIN, mock_server::SEED_PASSWORD));
    assert_eq!(app.next_update().await, Some(Slot::CurrentUser));
    let user = app.state().current_user.value().unwrap();
    assert_eq!(user.email, mock_server::SEED_EMAIL);
    assert_eq!(user.authentication_token, mock_server::SEED_TOKEN);

    app.request(StateRequest::FaveLocations).unwrap();
    assert_eq!(app.next_update().await, Some(Slot::UserFaveLocations));
    let ground_kontrol = Location { id: 10, name: "Ground Kontrol".into() };
    let avalon = Location { id: 11, name: "Avalon".into() };
    assert!(app.state().is_location_favorite(&ground_kontrol));
    assert!(!app.state().is_location_favorite(&avalon));

    app.request(StateRequest::AddFaveLocation { location_id: 11 }).unwrap();
    assert_eq!(app.next_update().await, Some(Slot::LastFavedLocation));
    assert_eq!(app.state().last_faved_location.value().unwrap().location.name, "Avalon");

    app.request(StateRequest::FaveLocations).unwrap();
    app.next_update().await;
    assert!(app.state().is_location_favorite(&avalon));
    assert_eq!(app.state().user_fave_locations.value().unwrap().len(), 2);
}

#[tokio::test]
async fn wrong_password_leaves_login_errored() {
    let mut app = container(start_server());
    app.login(&Credentials::new(mock_server::SEED_LOGIN, "nope"));
    app.next_update().await;
    assert!(matches!(app.state().current_user, RemoteData::Errored(_)));
}

#[tokio::test]
async fn region_queries_share_a_slot() {
    let mut app = container(start_server());

    app.request(StateRequest::Regions).unwrap();
    app.next_update().await;
    let mut names: Vec<_> = app.state().region_list.value().unwrap().regions.clone();
    names.sort();
    assert_eq!(names[0].name, "portland");

    app.request(StateRequest::ClosestRegion { lat: 47.6, lon: -122.3 }).unwrap();
    assert_eq!(app.next_update().await, Some(Slot::LastCheckedRegion));
    assert_eq!(app.state().last_checked_region.value().unwrap().name, "seattle");

    app.request(StateRequest::DoesRegionExist { name: "atlantis".into() }).unwrap();
    app.next_update().await;
    assert!(app.state().last_checked_region.error().unwrap().is_decode());

    app.request(StateRequest::LocationsForRegion { name: "portland".into() }).unwrap();
    app.next_update().await;
    let names: Vec<_> = app
        .state()
        .last_checked_locations
        .value()
        .unwrap()
        .sorted_by_name()
        .into_iter()
        .map(|l| l.name.clone())
        .collect();
    assert_eq!(names, ["Avalon", "Ground Kontrol"]);
}
