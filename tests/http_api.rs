mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{DEFAULT_DEVICE, add_interface, build_test_context, get, post_json};
use snmp_monitor::SnmpError;
use snmp_monitor::collector::Poller;
use snmp_monitor::config::Device;
use snmp_monitor::snmp::memory::Operation;

#[tokio::test]
async fn health_reports_ready() {
    let ctx = build_test_context();

    let (status, body) = get(&ctx.app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "im ready");
    assert!(body["UTC_time"].is_string());
    assert_eq!(body["devices"], 3);
    assert_eq!(body["snapshots"], 0);
}

#[tokio::test]
async fn default_device_interfaces_use_fixed_range() {
    let ctx = build_test_context();
    add_interface(&ctx.transport, DEFAULT_DEVICE, 1, "FastEthernet0/0", 1);
    add_interface(&ctx.transport, DEFAULT_DEVICE, 2, "FastEthernet0/1", 2);
    ctx.transport
        .insert_integer(DEFAULT_DEVICE, "1.3.6.1.2.1.4.20.1.2.42.42.42.1", 1);

    let (status, body) = get(&ctx.app, "/interfaces").await;

    assert_eq!(status, StatusCode::OK);
    let interfaces = body.as_array().expect("array of interfaces");
    assert_eq!(interfaces.len(), 2);
    assert_eq!(
        interfaces[0],
        json!({
            "ifIndex": "1",
            "name": "FastEthernet0/0",
            "ip": "42.42.42.1",
            "status": "UP",
            "speed": "100 Mbps",
        })
    );
    assert_eq!(interfaces[1]["status"], "DOWN");
    assert_eq!(interfaces[1]["ip"], serde_json::Value::Null);
}

#[tokio::test]
async fn empty_dynamic_discovery_is_ok_with_message() {
    let ctx = build_test_context();
    ctx.transport.insert_text("10.1.1.1", "1.3.6.1.2.1.1.5.0", "R9");

    let (status, body) = get(&ctx.app, "/interfaces/10.1.1.1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No interfaces found");
    assert_eq!(body["data"], json!([]));
    // Без индексов таблицы IP не опрашиваются
    assert_eq!(ctx.transport.calls(Operation::Walk, "1.3.6.1.2.1.3.1.1.3"), 0);
}

#[tokio::test]
async fn dynamic_discovery_maps_addresses() {
    let ctx = build_test_context();
    let device = "10.2.2.2";
    ctx.transport.insert_integer(device, "1.3.6.1.2.1.2.2.1.1.1", 1);
    ctx.transport.insert_integer(device, "1.3.6.1.2.1.2.2.1.1.2", 2);
    add_interface(&ctx.transport, device, 1, "Gi0/0", 1);
    add_interface(&ctx.transport, device, 2, "Gi0/1", 1);
    ctx.transport
        .insert_text(device, "1.3.6.1.2.1.4.20.1.1.10.2.2.2", "10.2.2.2");
    ctx.transport
        .insert_integer(device, "1.3.6.1.2.1.4.20.1.2.10.2.2.2", 2);

    let (status, body) = get(&ctx.app, &format!("/interfaces/{}", device)).await;

    assert_eq!(status, StatusCode::OK);
    let interfaces = body.as_array().expect("array of interfaces");
    assert_eq!(interfaces.len(), 2);
    assert_eq!(interfaces[0]["ip"], serde_json::Value::Null);
    assert_eq!(interfaces[1]["ip"], "10.2.2.2");

    let (status, body) = get(&ctx.app, &format!("/interface/{}/2", device)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gi0/1");
    assert_eq!(body["ip"], "10.2.2.2");
}

#[tokio::test]
async fn missing_interface_is_404() {
    let ctx = build_test_context();
    add_interface(&ctx.transport, DEFAULT_DEVICE, 1, "FastEthernet0/0", 1);

    let (status, body) = get(&ctx.app, "/interface/99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    // Отсутствующий интерфейс не запускает разрешение топологии
    assert_eq!(ctx.transport.calls(Operation::Walk, "1.3.6.1.2.1.3.1.1.3"), 0);
}

#[tokio::test]
async fn unreachable_device_is_500() {
    let ctx = build_test_context();
    ctx.transport.fail_target(
        DEFAULT_DEVICE,
        SnmpError::Timeout {
            target: DEFAULT_DEVICE.to_string(),
            timeout_secs: 30,
        },
    );

    let (status, body) = get(&ctx.app, "/interface/1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains(DEFAULT_DEVICE));
}

#[tokio::test]
async fn non_numeric_interface_id_is_400() {
    let ctx = build_test_context();

    let (status, _) = get(&ctx.app, "/interface/eth0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.transport.exchanges(DEFAULT_DEVICE), 0);
}

#[tokio::test]
async fn system_info_formats_uptime() {
    let ctx = build_test_context();
    ctx.transport
        .insert_text(DEFAULT_DEVICE, "1.3.6.1.2.1.1.1.0", "Cisco IOS Software, 3700");
    ctx.transport
        .insert_integer(DEFAULT_DEVICE, "1.3.6.1.2.1.1.3.0", 8_640_000);

    let (status, body) = get(&ctx.app, "/system").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "description": "Cisco IOS Software, 3700",
            "uptime": "1d 0h 0m 0s",
        })
    );
}

#[tokio::test]
async fn snmp_query_returns_values_by_oid() {
    let ctx = build_test_context();
    ctx.transport.insert_text("10.3.3.3", "1.3.6.1.2.1.1.5.0", "R3");

    let (status, body) = post_json(
        &ctx.app,
        "/snmp",
        r#"{
            "ip": "10.3.3.3",
            "community": "public",
            "oids": ["iso.3.6.1.2.1.1.5.0", "1.3.6.1.2.1.1.6.0"]
        }"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "ip": "10.3.3.3",
            "data": {
                "1.3.6.1.2.1.1.5.0": "R3",
                "1.3.6.1.2.1.1.6.0": "N/A",
            }
        })
    );
}

#[tokio::test]
async fn snmp_query_rejects_incomplete_body_without_exchange() {
    let ctx = build_test_context();

    let (status, body) = post_json(
        &ctx.app,
        "/snmp",
        r#"{"ip": "10.3.3.3", "oids": ["1.3.6.1.2.1.1.5.0"]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(&ctx.app, "/snmp", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &ctx.app,
        "/snmp",
        r#"{"ip": "10.3.3.3", "community": "public", "oids": ["not.an.oid"]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(ctx.transport.exchanges("10.3.3.3"), 0);
}

#[tokio::test]
async fn monitor_exposes_collected_history() {
    let ctx = build_test_context();
    ctx.transport
        .insert_text("192.168.220.134", "1.3.6.1.2.1.1.5.0", "R1");
    ctx.transport
        .insert_integer("192.168.220.134", "1.3.6.1.2.1.2.2.1.8.2", 1);

    let (status, body) = get(&ctx.app, "/monitor").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let poller = Poller::new(
        ctx.transport.clone(),
        ctx.state.history.clone(),
        vec![Device {
            ip: "192.168.220.134".to_string(),
            community: "public".to_string(),
            oids: vec!["1.3.6.1.2.1.2.2.1.8.2".to_string()],
        }],
        true,
    );
    poller.tick().await;

    let (status, body) = get(&ctx.app, "/monitor").await;
    assert_eq!(status, StatusCode::OK);
    let snapshots = body.as_array().expect("array of snapshots");
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0]["ip"], "192.168.220.134");
    assert_eq!(snapshots[0]["sysName"], "R1");
    assert_eq!(snapshots[0]["metrics"]["ifOperStatus"], "1");
    assert!(snapshots[0]["timestamp"].is_string());
}
