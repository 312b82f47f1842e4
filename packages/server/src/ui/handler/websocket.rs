//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{ChannelId, ChannelIdFactory, EmployeeId, GeoLocation},
    infrastructure::{
        ChannelHandle, OutboundFrame,
        dto::websocket::{ClientEvent, LocationPayloadDto, ServerEvent},
    },
    ui::state::AppState,
    usecase::{
        DisconnectChannelUseCase, LocationReport, RegisterEmployeeUseCase, ReportLocationUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let channel = ChannelIdFactory::generate();

    // Create a queue for frames addressed to this channel
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = ChannelHandle::new(tx);
    state
        .registry
        .connect(channel.clone(), handle.clone())
        .await;
    tracing::info!("Channel '{}' connected", channel);

    match serde_json::to_string(&ServerEvent::Connected {
        id: channel.to_string(),
    }) {
        Ok(json) => {
            handle.send_text(json);
        }
        Err(e) => tracing::error!("Failed to encode connected event: {}", e),
    }
    // Only the registry keeps the sender from here on
    drop(handle);

    let (mut sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_channel = channel.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_channel, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_event(&recv_state, &recv_channel, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Channel '{}' requested close", recv_channel);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued frames to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    DisconnectChannelUseCase::new(state.registry.clone())
        .execute(&channel)
        .await;
    tracing::info!("Channel '{}' disconnected", channel);
}

async fn handle_client_event(state: &AppState, channel: &ChannelId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed event from '{}': {}", channel, e);
            return;
        }
    };

    match event {
        ClientEvent::RegisterEmpId(id) => {
            let employee = match EmployeeId::try_from(id.into_string()) {
                Ok(employee) => employee,
                Err(e) => {
                    tracing::warn!("Invalid employee id from '{}': {}", channel, e);
                    return;
                }
            };
            let usecase = RegisterEmployeeUseCase::new(state.registry.clone());
            if let Err(e) = usecase.execute(employee, channel.clone()).await {
                tracing::warn!("Failed to register channel '{}': {}", channel, e);
            }
        }
        ClientEvent::SendLocation(data) => {
            let Some(report) = parse_location_report(channel, data) else {
                return;
            };
            let usecase = ReportLocationUseCase::new(
                state.repository.clone(),
                state.registry.clone(),
                state.clock.clone(),
            );
            // Failures are logged by the use case; the channel keeps running
            if let Ok(outcome) = usecase.execute(report).await {
                tracing::debug!("Location from '{}' handled: {:?}", channel, outcome);
            }
        }
    }
}

/// Turn a raw `sendLocation` payload into a report.
///
/// Returns `None` (after logging) only when the payload is not an object or
/// `empId` is missing or unusable; loosely typed fields read as absent.
fn parse_location_report(channel: &ChannelId, data: Value) -> Option<LocationReport> {
    let Value::Object(payload) = data else {
        tracing::warn!("sendLocation payload from '{}' is not an object", channel);
        return None;
    };
    let parsed = LocationPayloadDto::from_payload(&payload);

    let Some(emp_id) = parsed.emp_id else {
        tracing::warn!("empId is not defined in sendLocation from '{}'", channel);
        return None;
    };
    let employee = match EmployeeId::try_from(emp_id) {
        Ok(employee) => employee,
        Err(e) => {
            tracing::warn!("Invalid empId in sendLocation from '{}': {}", channel, e);
            return None;
        }
    };

    let location = match (parsed.latitude, parsed.longitude) {
        (Some(latitude), Some(longitude)) => GeoLocation::new(latitude, longitude)
            .map_err(|e| tracing::warn!("Ignoring location from '{}': {}", channel, e))
            .ok(),
        _ => None,
    };
    let inside_office = parsed.inside;

    tracing::debug!(
        "Received location {:?} for employee '{}' (inside: {})",
        location,
        employee,
        inside_office
    );

    Some(LocationReport {
        channel: channel.clone(),
        employee,
        inside_office,
        location,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_location_report() {
        // テスト項目: sendLocation のペイロードからレポートを作成できる
        // given (前提条件):
        let channel = ChannelIdFactory::generate();
        let data = json!({"latitude": 1.0, "longitude": 2.0, "inside": true, "empId": "E1"});

        // when (操作):
        let report = parse_location_report(&channel, data.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(report.channel, channel);
        assert_eq!(report.employee.as_str(), "E1");
        assert!(report.inside_office);
        assert_eq!(report.location, Some(GeoLocation::new(1.0, 2.0).unwrap()));
        assert_eq!(Value::Object(report.payload), data);
    }

    #[test]
    fn test_parse_location_report_without_emp_id() {
        // テスト項目: empId がない場合は破棄される
        // given (前提条件):
        let channel = ChannelIdFactory::generate();

        // when (操作):
        let report = parse_location_report(&channel, json!({"inside": true}));

        // then (期待する結果):
        assert!(report.is_none());
    }

    #[test]
    fn test_parse_location_report_missing_inside_means_outside() {
        // テスト項目: inside がない場合はオフィス外として扱い、数値の empId も受け付ける
        // given (前提条件):
        let channel = ChannelIdFactory::generate();

        // when (操作):
        let report = parse_location_report(&channel, json!({"empId": 7})).unwrap();

        // then (期待する結果):
        assert!(!report.inside_office);
        assert_eq!(report.employee.as_str(), "7");
        assert!(report.location.is_none());
    }

    #[test]
    fn test_parse_location_report_invalid_coordinates_dropped() {
        // テスト項目: 範囲外の座標は位置情報なしとして処理される
        // given (前提条件):
        let channel = ChannelIdFactory::generate();

        // when (操作):
        let report = parse_location_report(
            &channel,
            json!({"latitude": 200.0, "longitude": 2.0, "inside": true, "empId": "E1"}),
        )
        .unwrap();

        // then (期待する結果):
        assert!(report.location.is_none());
        assert!(report.inside_office);
    }

    #[test]
    fn test_parse_location_report_loosely_typed_fields() {
        // テスト項目: 型の緩いフィールドがあってもレポートは破棄されない
        // given (前提条件):
        let channel = ChannelIdFactory::generate();
        let cases = vec![
            (json!({"empId": "E1", "inside": "true", "latitude": 1.0, "longitude": 2.0}), true, true),
            (json!({"empId": "E1", "inside": 1, "latitude": 1.0, "longitude": 2.0}), true, true),
            (json!({"empId": "E1", "inside": true, "latitude": "1.0", "longitude": "2.0"}), true, true),
            (json!({"empId": "E1", "inside": 0, "latitude": "far", "longitude": 2.0}), false, false),
        ];

        for (data, inside, has_location) in cases {
            // when (操作):
            let report = parse_location_report(&channel, data.clone());

            // then (期待する結果): 元のペイロードはそのまま保持される
            let report = report.unwrap_or_else(|| panic!("report dropped: {data}"));
            assert_eq!(report.inside_office, inside, "{data}");
            assert_eq!(report.location.is_some(), has_location, "{data}");
            assert_eq!(Value::Object(report.payload), data);
        }
    }

    #[test]
    fn test_parse_location_report_non_object() {
        // テスト項目: オブジェクト以外のペイロードは破棄される
        // given (前提条件):
        let channel = ChannelIdFactory::generate();

        // when (操作):
        let report = parse_location_report(&channel, json!("hello"));

        // then (期待する結果):
        assert!(report.is_none());
    }
}
