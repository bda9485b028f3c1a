// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device connection using wiremock.

use std::time::Duration;

use nanoleaf_gateway::protocol::{HttpConfig, StreamProtocol, request_token};
use nanoleaf_gateway::{Device, Error, RgbColor, StateCommand};
use nanoleaf_gateway::types::{Brightness, Hue};
use serde_json::{Value, json};
use tokio::net::UdpSocket;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "test-token";

fn api(suffix: &str) -> String {
    format!("/api/v1/{TOKEN}{suffix}")
}

/// Device description with two light panels and one controller.
fn info_body(model: &str, effect: &str, hue: i32, sat: i32, brightness: i32) -> Value {
    json!({
        "name": "Shapes 4F2A",
        "serialNo": "S1234",
        "manufacturer": "Nanoleaf",
        "firmwareVersion": "9.2.4",
        "model": model,
        "state": {
            "on": {"value": true},
            "brightness": {"value": brightness, "min": 0, "max": 100},
            "hue": {"value": hue, "min": 0, "max": 360},
            "sat": {"value": sat, "min": 0, "max": 100},
            "ct": {"value": 4000, "min": 1200, "max": 6500},
            "colorMode": "effect"
        },
        "effects": {"select": effect, "effectsList": ["Forest", "Northern Lights"]},
        "panelLayout": {
            "globalOrientation": {"value": 0, "min": 0, "max": 360},
            "layout": {
                "numPanels": 3,
                "sideLength": 100,
                "positionData": [
                    {"panelId": 11, "x": 0, "y": 0, "o": 0, "shapeType": 7},
                    {"panelId": 22, "x": 100, "y": 0, "o": 60, "shapeType": 7},
                    {"panelId": 33, "x": 50, "y": 80, "o": 0, "shapeType": 12}
                ]
            }
        }
    })
}

async fn mount_info(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(api("/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_put(server: &MockServer, suffix: &str) {
    Mock::given(method("PUT"))
        .and(path(api(suffix)))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

fn device_for(server: &MockServer) -> Device {
    Device::builder("127.0.0.1", TOKEN)
        .with_http_port(server.address().port())
        .with_timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

fn summary(requests: &[Request]) -> Vec<String> {
    requests
        .iter()
        .map(|r| format!("{} {}", r.method.as_str(), r.url.path()))
        .collect()
}

// ============================================================================
// Static-mode reconciliation
// ============================================================================

mod reconcile {
    use super::*;

    #[tokio::test]
    async fn animated_effect_is_frozen_before_brightness_write() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Dynamic*", 200, 80, 60)).await;
        mount_put(&server, "/effects").await;
        mount_put(&server, "/state").await;

        let device = device_for(&server);
        device.set_brightness(40).await.unwrap();

        let received = requests(&server).await;
        assert_eq!(
            summary(&received),
            vec![
                format!("GET {}", api("/")),
                format!("PUT {}", api("/effects")),
                format!("PUT {}", api("/state")),
            ]
        );

        let freeze: Value = received[1].body_json().unwrap();
        assert_eq!(freeze["write"]["animType"], "static");
        assert_eq!(
            freeze["write"]["animData"],
            "2 11 1 31 112 153 0 1 22 1 31 112 153 0 1"
        );

        let write: Value = received[2].body_json().unwrap();
        assert_eq!(write, json!({"brightness": {"value": 40}}));
    }

    #[tokio::test]
    async fn static_device_gets_no_freeze_write() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Static*", 0, 0, 50)).await;
        mount_put(&server, "/state").await;

        let device = device_for(&server);
        device.set_saturation(30).await.unwrap();

        assert_eq!(
            summary(&requests(&server).await),
            vec![format!("GET {}", api("/")), format!("PUT {}", api("/state"))]
        );
    }

    #[tokio::test]
    async fn solid_marker_counts_as_static() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Solid*", 0, 0, 50)).await;
        mount_put(&server, "/state").await;

        let device = device_for(&server);
        device.set_hue(120).await.unwrap();

        assert_eq!(requests(&server).await.len(), 2);
    }

    #[tokio::test]
    async fn power_write_skips_state_check() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(api("/state")))
            .and(body_json(json!({"on": {"value": true}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let device = device_for(&server);
        device.turn_on().await.unwrap();

        assert_eq!(requests(&server).await.len(), 1);
    }

    #[tokio::test]
    async fn combined_update_is_one_write() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Static*", 0, 0, 50)).await;
        mount_put(&server, "/state").await;

        let device = device_for(&server);
        let update = StateCommand::new()
            .on(true)
            .hue(Hue::clamped(10))
            .brightness(Brightness::clamped(70));
        device.set_state(update).await.unwrap();

        let received = requests(&server).await;
        assert_eq!(received.len(), 2);
        let write: Value = received[1].body_json().unwrap();
        assert_eq!(
            write,
            json!({"on": {"value": true}, "brightness": {"value": 70}, "hue": {"value": 10}})
        );
    }

    #[tokio::test]
    async fn empty_update_sends_nothing() {
        let server = MockServer::start().await;
        let device = device_for(&server);

        device.set_state(StateCommand::new()).await.unwrap();

        assert!(requests(&server).await.is_empty());
    }

    #[tokio::test]
    async fn failed_state_check_aborts_write() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("/")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_put(&server, "/state").await;

        let device = device_for(&server);
        let err = device.set_brightness(10).await.unwrap_err();

        assert!(err.is_connectivity());
        assert_eq!(requests(&server).await.len(), 1);
    }
}

// ============================================================================
// Field clamping
// ============================================================================

mod clamping {
    use super::*;

    async fn last_state_write(server: &MockServer) -> Value {
        let received = requests(server).await;
        received
            .iter()
            .rev()
            .find(|r| r.url.path() == api("/state"))
            .map(|r| r.body_json().unwrap())
            .unwrap()
    }

    async fn static_server() -> MockServer {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Static*", 0, 0, 50)).await;
        mount_put(&server, "/state").await;
        server
    }

    #[tokio::test]
    async fn hue_above_range() {
        let server = static_server().await;
        device_for(&server).set_hue(400).await.unwrap();
        assert_eq!(last_state_write(&server).await, json!({"hue": {"value": 360}}));
    }

    #[tokio::test]
    async fn color_temperature_below_range() {
        let server = static_server().await;
        device_for(&server).set_color_temperature(100).await.unwrap();
        assert_eq!(last_state_write(&server).await, json!({"ct": {"value": 1200}}));
    }

    #[tokio::test]
    async fn negative_brightness() {
        let server = static_server().await;
        device_for(&server).set_brightness(-5).await.unwrap();
        assert_eq!(
            last_state_write(&server).await,
            json!({"brightness": {"value": 0}})
        );
    }

    #[tokio::test]
    async fn saturation_above_range() {
        let server = static_server().await;
        device_for(&server).set_saturation(250).await.unwrap();
        assert_eq!(last_state_write(&server).await, json!({"sat": {"value": 100}}));
    }
}

// ============================================================================
// Panel colors and effects
// ============================================================================

mod panels {
    use super::*;

    #[tokio::test]
    async fn set_color_skips_controller_and_remembers_panels() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        mount_put(&server, "/effects").await;

        let device = device_for(&server);
        device.set_color(RgbColor::new(255, 0, 0)).await.unwrap();
        device.set_color(RgbColor::new(0, 255, 0)).await.unwrap();

        let received = requests(&server).await;
        assert_eq!(
            summary(&received),
            vec![
                format!("GET {}", api("/")),
                format!("PUT {}", api("/effects")),
                format!("PUT {}", api("/effects")),
            ]
        );
        let second: Value = received[2].body_json().unwrap();
        assert_eq!(
            second["write"]["animData"],
            "2 11 1 0 255 0 0 1 22 1 0 255 0 0 1"
        );
    }

    #[tokio::test]
    async fn clear_panel_cache_refetches_layout() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        mount_put(&server, "/effects").await;

        let device = device_for(&server);
        device.set_color(RgbColor::white()).await.unwrap();
        device.clear_panel_cache();
        device.set_color(RgbColor::white()).await.unwrap();

        let gets = requests(&server)
            .await
            .iter()
            .filter(|r| r.method.as_str() == "GET")
            .count();
        assert_eq!(gets, 2);
    }

    #[tokio::test]
    async fn set_panel_colors_writes_only_given_panels() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(api("/effects")))
            .and(body_json(json!({"write": {
                "command": "display",
                "animType": "static",
                "animData": "1 22 1 0 0 255 0 1",
                "loop": false,
                "palette": []
            }})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let device = device_for(&server);
        device
            .set_panel_colors([(22, RgbColor::new(0, 0, 255))])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_panel_colors_send_nothing() {
        let server = MockServer::start().await;
        let device = device_for(&server);

        device.set_panel_colors(Vec::new()).await.unwrap();

        assert!(requests(&server).await.is_empty());
    }

    #[tokio::test]
    async fn list_effects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("/effects/effectsList")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Forest", "Snowfall"])))
            .mount(&server)
            .await;

        let effects = device_for(&server).list_effects().await.unwrap();
        assert_eq!(effects, vec!["Forest".to_string(), "Snowfall".to_string()]);
    }

    #[tokio::test]
    async fn get_current_effect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("/effects/select")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("Snowfall")))
            .mount(&server)
            .await;

        let effect = device_for(&server).get_current_effect().await.unwrap();
        assert_eq!(effect, "Snowfall");
    }

    #[tokio::test]
    async fn set_effect_selects_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(api("/effects")))
            .and(body_json(json!({"select": "Forest"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        device_for(&server).set_effect("Forest").await.unwrap();
    }

    #[tokio::test]
    async fn unknown_effect_is_connectivity_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(api("/effects")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = device_for(&server).set_effect("Nope").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Connectivity(nanoleaf_gateway::ProtocolError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn identify() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(api("/identify")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        device_for(&server).identify().await.unwrap();
    }
}

// ============================================================================
// Queries
// ============================================================================

mod queries {
    use super::*;
    use nanoleaf_gateway::EffectMode;

    #[tokio::test]
    async fn get_info_maps_description() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 200, 80, 60)).await;

        let info = device_for(&server).get_info().await.unwrap();
        assert_eq!(info.name, "Shapes 4F2A");
        assert_eq!(info.model, "NL42");
        assert_eq!(info.firmware_version, "9.2.4");
        assert_eq!(info.state.effect_mode(), EffectMode::Animated);
        assert_eq!(info.layout.len(), 3);
        assert_eq!(info.layout.light_panel_ids(), vec![11, 22]);
    }

    #[tokio::test]
    async fn get_state() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Static*", 200, 80, 60)).await;

        let state = device_for(&server).get_state().await.unwrap();
        assert!(state.on);
        assert_eq!(state.brightness.value, 60);
        assert_eq!(state.rgb(), RgbColor::new(31, 112, 153));
    }

    #[tokio::test]
    async fn get_panel_layout_bounds() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "*Static*", 0, 0, 0)).await;

        let layout = device_for(&server).get_panel_layout().await.unwrap();
        assert_eq!(layout.bounds().width, 100);
        assert_eq!(layout.bounds().height, 80);
    }

    #[tokio::test]
    async fn rejected_token_is_connectivity_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = device_for(&server).get_info().await.unwrap_err();
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("/")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = device_for(&server).get_info().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn connect_returns_info() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL29", "*Static*", 0, 0, 0)).await;

        let (device, info) = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .connect()
            .await
            .unwrap();
        assert_eq!(device.host(), "127.0.0.1");
        assert_eq!(info.model, "NL29");
    }
}

// ============================================================================
// Pairing
// ============================================================================

mod pairing {
    use super::*;

    fn config_for(server: &MockServer) -> HttpConfig {
        HttpConfig::new("127.0.0.1").with_port(server.address().port())
    }

    #[tokio::test]
    async fn issues_token_in_pairing_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/new"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"auth_token": "fresh-token"})),
            )
            .mount(&server)
            .await;

        let token = request_token(&config_for(&server)).await.unwrap();
        assert_eq!(token, "fresh-token");
    }

    #[tokio::test]
    async fn forbidden_means_not_in_pairing_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/new"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = request_token(&config_for(&server)).await.unwrap_err();
        assert!(err.is_pairing_not_active());
    }

    #[tokio::test]
    async fn server_error_is_connectivity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/new"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = request_token(&config_for(&server)).await.unwrap_err();
        assert!(err.is_connectivity());
    }
}

// ============================================================================
// Streaming
// ============================================================================

mod streaming {
    use super::*;

    async fn receiver() -> (UdpSocket, u16) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    async fn recv_frame(socket: &UdpSocket) -> Vec<u8> {
        let mut buf = [0u8; 2048];
        let len = tokio::time::timeout(Duration::from_secs(2), socket.recv(&mut buf))
            .await
            .unwrap()
            .unwrap();
        buf[..len].to_vec()
    }

    async fn mount_ext_control(server: &MockServer, version: &str) {
        Mock::given(method("PUT"))
            .and(path(api("/effects")))
            .and(body_json(json!({"write": {
                "command": "display",
                "animType": "extControl",
                "extControlVersion": version
            }})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn v2_device_streams_wide_frames() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        mount_ext_control(&server, "v2").await;
        let (socket, port) = receiver().await;

        let device = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .with_stream_port(StreamProtocol::V2, port)
            .build()
            .unwrap();

        assert!(!device.is_streaming().await);
        let protocol = device.initialize_streaming().await.unwrap();
        assert_eq!(protocol, StreamProtocol::V2);
        assert_eq!(device.stream_protocol().await, Some(StreamProtocol::V2));

        device
            .stream_colors([(11, RgbColor::new(255, 0, 0))])
            .await
            .unwrap();
        assert_eq!(recv_frame(&socket).await, vec![0, 1, 0, 11, 255, 0, 0, 0, 0, 1]);
    }

    #[tokio::test]
    async fn legacy_model_streams_v1_lazily() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL22", "Forest", 0, 0, 50)).await;
        mount_ext_control(&server, "v1").await;
        let (socket, port) = receiver().await;

        let device = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .with_stream_port(StreamProtocol::V1, port)
            .build()
            .unwrap();

        device
            .stream_colors([(7, RgbColor::new(0, 255, 0))])
            .await
            .unwrap();
        assert_eq!(recv_frame(&socket).await, vec![1, 7, 1, 0, 255, 0, 0, 1]);
        assert_eq!(device.stream_protocol().await, Some(StreamProtocol::V1));
    }

    #[tokio::test]
    async fn solid_color_targets_every_panel() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        mount_ext_control(&server, "v2").await;
        let (socket, port) = receiver().await;

        let device = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .with_stream_port(StreamProtocol::V2, port)
            .build()
            .unwrap();

        device.stream_solid_color(RgbColor::new(1, 2, 3)).await.unwrap();
        let frame = recv_frame(&socket).await;
        assert_eq!(&frame[..2], &[0, 3]);
        assert_eq!(frame.len(), 2 + 3 * 8);
    }

    #[tokio::test]
    async fn v1_rejects_wide_panel_id_without_sending() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL22", "Forest", 0, 0, 50)).await;
        mount_ext_control(&server, "v1").await;
        let (_socket, port) = receiver().await;

        let device = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .with_stream_port(StreamProtocol::V1, port)
            .build()
            .unwrap();

        let err = device
            .stream_colors([(256, RgbColor::white())])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn stop_streaming_closes_session() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        mount_ext_control(&server, "v2").await;
        let (_socket, port) = receiver().await;

        let device = Device::builder("127.0.0.1", TOKEN)
            .with_http_port(server.address().port())
            .with_stream_port(StreamProtocol::V2, port)
            .build()
            .unwrap();

        assert!(!device.stop_streaming().await);
        device.initialize_streaming().await.unwrap();
        assert!(device.stop_streaming().await);
        assert!(!device.is_streaming().await);
        assert_eq!(device.stream_protocol().await, None);
    }

    #[tokio::test]
    async fn failed_init_keeps_no_session() {
        let server = MockServer::start().await;
        mount_info(&server, info_body("NL42", "Forest", 0, 0, 50)).await;
        Mock::given(method("PUT"))
            .and(path(api("/effects")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let device = device_for(&server);
        let err = device.initialize_streaming().await.unwrap_err();

        assert!(err.is_connectivity());
        assert!(!device.is_streaming().await);
    }
}
