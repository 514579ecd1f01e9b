//! Resource operations against a mock remote.

mod common;

use anyhow::Result;
use lantern::error::LanternError;
use lantern::models::{Asset, RefId, NO_OWNER_UID};
use lantern::resolver::Category;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{init_tracing, instance, mount_applications, test_config};

/// Mounts the ticket status listing for the "ITS Tickets" application.
async fn mount_ticket_statuses(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/31/tickets/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 77, "Name": "Open"},
            {"ID": 78, "Name": "Closed"}
        ])))
        .mount(server)
        .await;
}

/// Returns the bodies of requests the server saw on `target_path`.
async fn recorded_bodies(server: &MockServer, target_path: &str) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .expect("request recording should be on")
        .into_iter()
        .filter(|request| request.url.path() == target_path)
        .map(|request| serde_json::from_slice(&request.body).expect("request body should be JSON"))
        .collect()
}

#[tokio::test]
async fn ticket_search_filters_titles_locally() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    mount_ticket_statuses(&server).await;
    Mock::given(method("POST"))
        .and(path("/31/tickets/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 101, "Title": "Printer Issue"},
            {"ID": 102, "Title": "VPN"},
            {"ID": 103, "Title": "Printer Issue"}
        ])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;
    tdx.resolver()
        .populate(Category::TicketStatuses, Some("ITS Tickets"))
        .await?;

    let tickets = tdx
        .search_tickets("uid-1", &["Open"], "Printer Issue", None, None)
        .await?;

    let ids: Vec<&RefId> = tickets.iter().map(|ticket| &ticket.id).collect();
    assert_eq!(ids, [&RefId::Number(101), &RefId::Number(103)]);

    // The remote saw resolved identifiers and no group criterion.
    let bodies = recorded_bodies(&server, "/31/tickets/search").await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["RequestorUids"], json!(["uid-1"]));
    assert_eq!(bodies[0]["StatusIDs"], json!([77]));
    assert!(bodies[0].get("ResponsibilityGroupIDs").is_none());
    Ok(())
}

#[tokio::test]
async fn ticket_search_resolves_the_responsible_group() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    mount_ticket_statuses(&server).await;
    Mock::given(method("POST"))
        .and(path("/groups/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 800, "Name": "Desktop Support"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/31/tickets/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    let resolver = tdx.resolver();
    resolver.populate(Category::AppIds, None).await?;
    resolver
        .populate(Category::TicketStatuses, Some("ITS Tickets"))
        .await?;
    resolver.populate(Category::GroupIds, None).await?;

    tdx.search_tickets(
        "uid-1",
        &["Open", "Closed"],
        "anything",
        Some("Desktop Support"),
        None,
    )
    .await?;

    let bodies = recorded_bodies(&server, "/31/tickets/search").await;
    assert_eq!(bodies[0]["StatusIDs"], json!([77, 78]));
    assert_eq!(bodies[0]["ResponsibilityGroupIDs"], json!([800]));
    Ok(())
}

#[tokio::test]
async fn update_ticket_status_posts_a_private_plain_feed_entry() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    mount_ticket_statuses(&server).await;
    Mock::given(method("POST"))
        .and(path("/31/tickets/4321/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": 1})))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;
    tdx.resolver()
        .populate(Category::TicketStatuses, Some("ITS Tickets"))
        .await?;

    tdx.update_ticket_status("4321", "Closed", "resolved at the desk", None)
        .await?;

    let bodies = recorded_bodies(&server, "/31/tickets/4321/feed").await;
    assert_eq!(
        bodies[0],
        json!({
            "NewStatusID": 78,
            "Comments": "resolved at the desk",
            "IsPrivate": true,
            "IsRichHTML": false
        })
    );
    Ok(())
}

#[tokio::test]
async fn find_person_returns_a_single_match_unwrapped() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"UID": "abc-123", "FullName": "Jordan Doe", "AlternateID": "jdoe"}
        ])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    let person = tdx.find_person("jdoe").await?;
    assert_eq!(person.uid, "abc-123");

    let bodies = recorded_bodies(&server, "/people/search").await;
    assert_eq!(bodies[0], json!({"AlternateID": "jdoe"}));
    Ok(())
}

#[tokio::test]
async fn find_person_with_no_matches_carries_the_criteria() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    let err = tdx.find_person("ghost").await.unwrap_err();
    match err {
        LanternError::PersonNotFound { criteria } => {
            assert!(criteria.contains("ghost"));
        }
        other => panic!("expected PersonNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn find_person_with_several_matches_is_ambiguous() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"UID": "abc-123"},
            {"UID": "def-456"}
        ])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    let err = tdx.find_person("jdoe").await.unwrap_err();
    match err {
        LanternError::AmbiguousMatch { entity, matches } => {
            assert_eq!(entity, "person");
            assert_eq!(matches, 2);
        }
        other => panic!("expected AmbiguousMatch, got {other:?}"),
    }
}

/// Mounts everything asset check-in resolves against.
async fn mount_asset_fixtures(server: &MockServer) {
    mount_applications(server).await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 4, "Name": "Media Union"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/27/assets/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 5, "Name": "In Stock"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/attributes/custom"))
        .and(query_param("componentId", "27"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 111, "Name": "Notes"},
            {"ID": 112, "Name": "Last Inventoried"}
        ])))
        .mount(server)
        .await;
}

/// Populates the categories check-in needs.
async fn populate_asset_categories(tdx: &lantern::instance::TdxInstance) -> Result<()> {
    let resolver = tdx.resolver();
    resolver.populate(Category::AppIds, None).await?;
    resolver.populate(Category::LocationIds, None).await?;
    resolver.populate(Category::AssetAttributes, None).await?;
    resolver
        .populate(Category::AssetStatuses, Some("IT Assets"))
        .await?;
    Ok(())
}

/// Asserts a value looks like an MM/DD/YYYY date.
fn assert_inventory_stamp(value: &serde_json::Value) {
    let stamp = value.as_str().expect("stamp should be a string");
    let parts: Vec<&str> = stamp.split('/').collect();
    assert_eq!(parts.len(), 3, "stamp {stamp:?} should be MM/DD/YYYY");
    assert_eq!(parts[0].len(), 2);
    assert_eq!(parts[1].len(), 2);
    assert_eq!(parts[2].len(), 4);
    for part in parts {
        assert!(part.chars().all(|c| c.is_ascii_digit()));
    }
}

#[tokio::test]
async fn check_in_appends_missing_attributes() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_asset_fixtures(&server).await;
    Mock::given(method("POST"))
        .and(path("/27/assets/41"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ID": 41, "Attributes": []})),
        )
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    populate_asset_categories(&tdx).await?;

    let asset: Asset = serde_json::from_value(json!({
        "ID": 41,
        "Name": "LT-00412",
        "Attributes": []
    }))?;

    tdx.check_in_asset(asset, "Media Union", "In Stock", None, Some("returned"), None)
        .await?;

    let bodies = recorded_bodies(&server, "/27/assets/41").await;
    assert_eq!(bodies.len(), 1);
    let submitted = &bodies[0];

    assert_eq!(submitted["LocationID"], json!(4));
    assert_eq!(submitted["StatusID"], json!(5));
    assert_eq!(submitted["OwningCustomerID"], json!(NO_OWNER_UID));

    let attributes = submitted["Attributes"].as_array().expect("attribute list");
    let notes: Vec<_> = attributes
        .iter()
        .filter(|attr| attr["Name"] == json!("Notes"))
        .collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["ID"], json!(111));
    assert_eq!(notes[0]["Value"], json!("returned"));

    let inventoried: Vec<_> = attributes
        .iter()
        .filter(|attr| attr["Name"] == json!("Last Inventoried"))
        .collect();
    assert_eq!(inventoried.len(), 1);
    assert_eq!(inventoried[0]["ID"], json!(112));
    assert_inventory_stamp(&inventoried[0]["Value"]);
    Ok(())
}

#[tokio::test]
async fn check_in_updates_existing_attributes_in_place() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_asset_fixtures(&server).await;
    Mock::given(method("POST"))
        .and(path("/27/assets/41"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ID": 41, "Attributes": []})),
        )
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    populate_asset_categories(&tdx).await?;

    let asset: Asset = serde_json::from_value(json!({
        "ID": 41,
        "OwningCustomerID": "guid-of-previous-owner",
        "Attributes": [
            {"ID": 12, "Name": "Notes", "Value": "old notes"},
            {"ID": 13, "Name": "Warranty", "Value": "2027-01-01"}
        ]
    }))?;

    tdx.check_in_asset(
        asset,
        "Media Union",
        "In Stock",
        Some("guid-of-new-owner"),
        Some("fresh notes"),
        None,
    )
    .await?;

    let bodies = recorded_bodies(&server, "/27/assets/41").await;
    let submitted = &bodies[0];

    assert_eq!(submitted["OwningCustomerID"], json!("guid-of-new-owner"));

    // Notes mutated in place (same definition id), Warranty untouched,
    // Last Inventoried appended: three entries total.
    let attributes = submitted["Attributes"].as_array().expect("attribute list");
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[0]["ID"], json!(12));
    assert_eq!(attributes[0]["Name"], json!("Notes"));
    assert_eq!(attributes[0]["Value"], json!("fresh notes"));
    assert_eq!(attributes[1]["Value"], json!("2027-01-01"));
    assert_eq!(attributes[2]["Name"], json!("Last Inventoried"));
    Ok(())
}

#[tokio::test]
async fn search_assets_sends_the_serial_query() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    Mock::given(method("POST"))
        .and(path("/27/assets/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 41, "Name": "LT-00412", "SerialNumber": "C02XL0GWJG5H"}
        ])))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;

    let matches = tdx.search_assets("C02", None).await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].serial_number.as_deref(), Some("C02XL0GWJG5H"));

    let bodies = recorded_bodies(&server, "/27/assets/search").await;
    assert_eq!(bodies[0], json!({"SerialLike": "C02"}));
    Ok(())
}

#[tokio::test]
async fn attach_asset_succeeds_on_2xx() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    Mock::given(method("POST"))
        .and(path("/31/tickets/4321/assets/41"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;

    tdx.attach_asset_to_ticket("4321", "41", None).await?;
    Ok(())
}

#[tokio::test]
async fn attach_asset_failure_carries_both_identifiers() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    Mock::given(method("POST"))
        .and(path("/31/tickets/4321/assets/41"))
        .respond_with(ResponseTemplate::new(400).set_body_string("asset already attached"))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;

    let err = tdx
        .attach_asset_to_ticket("4321", "41", None)
        .await
        .unwrap_err();
    match err {
        LanternError::AttachFailed {
            ticket_id,
            asset_id,
        } => {
            assert_eq!(ticket_id, "4321");
            assert_eq!(asset_id, "41");
        }
        other => panic!("expected AttachFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unauthorized_responses_surface_as_not_authorized() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    Mock::given(method("GET"))
        .and(path("/27/assets/41"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;

    let err = tdx.get_asset("41", None).await.unwrap_err();
    assert!(matches!(err, LanternError::NotAuthorized));
    Ok(())
}

#[tokio::test]
async fn plain_request_failures_carry_status_and_body() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    mount_applications(&server).await;
    Mock::given(method("GET"))
        .and(path("/27/assets/41"))
        .respond_with(ResponseTemplate::new(500).set_body_string("remote exploded"))
        .mount(&server)
        .await;

    let tdx = instance(&server, test_config());
    tdx.resolver().populate(Category::AppIds, None).await?;

    let err = tdx.get_asset("41", None).await.unwrap_err();
    match err {
        LanternError::RequestFailed { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "remote exploded");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    Ok(())
}
