//! HTTP API integration tests.
//!
//! Tests for the attendance endpoints (check-in, check-out, status) and the
//! liveness/debug endpoints.

mod fixtures;
use fixtures::TestServer;
use serde_json::{Value, json};

// 2024-05-01T01:00:00Z
const T0: i64 = 1_714_525_200_000;
// 2024-05-01T09:00:00Z
const T1: i64 = 1_714_554_000_000;

async fn post(server: &TestServer, path: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}{}", server.base_url(), path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

async fn get(server: &TestServer, path: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .get(format!("{}{}", server.base_url(), path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

fn attendance_body(user_id: &str, timestamp: i64) -> Value {
    json!({"userId": user_id, "timestamp": timestamp, "latitude": 1, "longitude": 2})
}

#[tokio::test]
async fn test_root_endpoint() {
    // テスト項目: / エンドポイントがウェルカムメッセージを返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get(&server, "/").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Welcome to the RTA System");
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get(&server, "/api/health").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_check_in_success() {
    // テスト項目: 記録のない日のチェックインは 200 で、チェックイン時刻は申告値になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = post(&server, "/api/checkin", attendance_body("E1", T0)).await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Check-in successful.");

    let (_, status_body) = get(&server, "/api/status/E1").await;
    assert_eq!(status_body["status"], "Checked In");
    assert_eq!(status_body["checkInTime"], "2024-05-01T01:00:00.000Z");
    assert_eq!(status_body["checkOutTime"], Value::Null);
}

#[tokio::test]
async fn test_check_in_twice_is_rejected() {
    // テスト項目: 同じ日の 2 回目のチェックインは 400 "already recorded"
    // given (前提条件):
    let server = TestServer::start().await;
    post(&server, "/api/checkin", attendance_body("E1", T0)).await;

    // when (操作):
    let (status, body) = post(&server, "/api/checkin", attendance_body("E1", T0)).await;

    // then (期待する結果): 記録は 1 件のまま
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Check-in already recorded for today.");
    assert_eq!(server.repository.count().await, 1);
}

#[tokio::test]
async fn test_check_out_success() {
    // テスト項目: チェックイン後の同日チェックアウトは 200 で、チェックアウト時刻は申告値になる
    // given (前提条件):
    let server = TestServer::start().await;
    post(&server, "/api/checkin", attendance_body("E1", T0)).await;

    // when (操作):
    let (status, body) = post(&server, "/api/checkout", attendance_body("E1", T1)).await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Check-out successful.");

    let (_, status_body) = get(&server, "/api/status/E1").await;
    assert_eq!(status_body["status"], "Checked Out");
    assert_eq!(status_body["checkInTime"], "2024-05-01T01:00:00.000Z");
    assert_eq!(status_body["checkOutTime"], "2024-05-01T09:00:00.000Z");
}

#[tokio::test]
async fn test_check_out_without_check_in_is_rejected() {
    // テスト項目: 本日チェックインしていない従業員のチェックアウトは 400
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = post(&server, "/api/checkout", attendance_body("E2", T1)).await;

    // then (期待する結果):
    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        "Check-out not possible or already done for today."
    );
    assert_eq!(server.repository.count().await, 0);
}

#[tokio::test]
async fn test_check_out_twice_is_rejected() {
    // テスト項目: 2 回目のチェックアウトは 400 で、最初の時刻が残る
    // given (前提条件):
    let server = TestServer::start().await;
    post(&server, "/api/checkin", attendance_body("E1", T0)).await;
    post(&server, "/api/checkout", attendance_body("E1", T1)).await;

    // when (操作):
    let (status, _) = post(&server, "/api/checkout", attendance_body("E1", T1 + 1000)).await;

    // then (期待する結果):
    assert_eq!(status, 400);
    let (_, status_body) = get(&server, "/api/status/E1").await;
    assert_eq!(status_body["checkOutTime"], "2024-05-01T09:00:00.000Z");
}

#[tokio::test]
async fn test_check_in_after_check_out_is_rejected() {
    // テスト項目: チェックアウト後の同日再チェックインはできない
    // given (前提条件):
    let server = TestServer::start().await;
    post(&server, "/api/checkin", attendance_body("E1", T0)).await;
    post(&server, "/api/checkout", attendance_body("E1", T1)).await;

    // when (操作):
    let (status, _) = post(&server, "/api/checkin", attendance_body("E1", T1 + 1000)).await;

    // then (期待する結果):
    assert_eq!(status, 400);
    let (_, status_body) = get(&server, "/api/status/E1").await;
    assert_eq!(status_body["status"], "Checked Out");
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    // テスト項目: 必須項目が欠けたリクエストは 400 で error を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let bodies = vec![
        json!({"timestamp": T0, "latitude": 1, "longitude": 2}),
        json!({"userId": "E1", "latitude": 1, "longitude": 2}),
        json!({"userId": "E1", "timestamp": T0, "longitude": 2}),
        json!({"userId": "E1", "timestamp": T0, "latitude": 1}),
    ];

    for body in bodies {
        // when (操作):
        let (checkin_status, checkin_body) = post(&server, "/api/checkin", body.clone()).await;
        let (checkout_status, checkout_body) = post(&server, "/api/checkout", body).await;

        // then (期待する結果):
        assert_eq!(checkin_status, 400);
        assert_eq!(
            checkin_body["error"],
            "User ID, timestamp, latitude, and longitude are required."
        );
        assert_eq!(checkout_status, 400);
        assert!(checkout_body["error"].is_string());
    }
    assert_eq!(server.repository.count().await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    // テスト項目: JSON として解釈できないボディは 400
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::Client::new()
        .post(format!("{}/api/checkin", server.base_url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_rfc3339_timestamp_is_accepted() {
    // テスト項目: RFC 3339 形式のタイムスタンプでもチェックインできる
    // given (前提条件):
    let server = TestServer::start().await;
    let body = json!({
        "userId": "E1",
        "timestamp": "2024-05-01T10:00:00+09:00",
        "latitude": 35.68,
        "longitude": 139.76
    });

    // when (操作):
    let (status, _) = post(&server, "/api/checkin", body).await;

    // then (期待する結果):
    assert_eq!(status, 200);
    let (_, status_body) = get(&server, "/api/status/E1").await;
    assert_eq!(status_body["checkInTime"], "2024-05-01T01:00:00.000Z");
}

#[tokio::test]
async fn test_status_without_record() {
    // テスト項目: 記録のない従業員のステータスは Not Checked In で時刻は null
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get(&server, "/api/status/nobody").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"status": "Not Checked In", "checkInTime": null, "checkOutTime": null})
    );
}

#[tokio::test]
async fn test_connections_endpoint_empty() {
    // テスト項目: 接続がない場合 /api/connections は空配列
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get(&server, "/api/connections").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_status_and_check_in_with_long_user_id() {
    // テスト項目: 長い従業員 ID でもステータス取得は 200 で、チェックインもできる
    // given (前提条件):
    let server = TestServer::start().await;
    let long_id = "a".repeat(101);

    // when (操作):
    let (before_status, before) = get(&server, &format!("/api/status/{long_id}")).await;
    let (checkin_status, _) = post(&server, "/api/checkin", attendance_body(&long_id, T0)).await;
    let (_, after) = get(&server, &format!("/api/status/{long_id}")).await;

    // then (期待する結果):
    assert_eq!(before_status, 200);
    assert_eq!(
        before,
        json!({"status": "Not Checked In", "checkInTime": null, "checkOutTime": null})
    );
    assert_eq!(checkin_status, 200);
    assert_eq!(after["status"], "Checked In");
}

#[tokio::test]
async fn test_numeric_string_coordinates_are_accepted() {
    // テスト項目: 緯度経度が数値文字列でもチェックインできる
    // given (前提条件):
    let server = TestServer::start().await;
    let body = json!({"userId": 5, "timestamp": T0, "latitude": "35.68", "longitude": "139.76"});

    // when (操作):
    let (status, _) = post(&server, "/api/checkin", body).await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(get(&server, "/api/status/5").await.1["status"], "Checked In");
}

#[tokio::test]
async fn test_concurrent_check_ins_record_once() {
    // テスト項目: 同じ従業員の同時チェックインは 1 件だけ成功し、記録は 1 件
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/checkin", server.base_url());

    // when (操作):
    let requests = (0..8).map(|i| {
        let client = client.clone();
        let url = url.clone();
        async move {
            client
                .post(url)
                .json(&attendance_body("E1", T0 + i))
                .send()
                .await
                .expect("Failed to send request")
                .status()
                .as_u16()
        }
    });
    let statuses = futures_util::future::join_all(requests).await;

    // then (期待する結果):
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == 400).count(), 7);
    assert_eq!(server.repository.count().await, 1);
}
