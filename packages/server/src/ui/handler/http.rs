//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use shukkin_shared::time::{rfc3339_to_timestamp, timestamp_to_rfc3339};

use crate::{
    domain::{AttendanceStatus, EmployeeId, GeoLocation, Timestamp},
    infrastructure::dto::http::{
        AttendanceRequestDto, AttendanceStatusDto, ConnectionDto, MessageDto, TimestampDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{CheckInUseCase, CheckOutUseCase, GetAttendanceStatusUseCase},
};

/// Validated body of a check-in/check-out request
#[derive(Debug, Clone, PartialEq)]
struct AttendanceCommand {
    employee: EmployeeId,
    time: Timestamp,
    location: GeoLocation,
}

/// Liveness banner
pub async fn root() -> Json<MessageDto> {
    Json(MessageDto::new("Welcome to the RTA System"))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/checkin`
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AttendanceRequestDto>, JsonRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let command = parse_attendance_request(payload)?;

    let usecase = CheckInUseCase::new(state.repository.clone(), state.clock.clone());
    usecase
        .execute(command.employee, command.time, command.location)
        .await?;

    Ok(Json(MessageDto::new("Check-in successful.")))
}

/// `POST /api/checkout`
pub async fn check_out(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AttendanceRequestDto>, JsonRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let command = parse_attendance_request(payload)?;

    let usecase = CheckOutUseCase::new(state.repository.clone(), state.clock.clone());
    usecase
        .execute(command.employee, command.time, command.location)
        .await?;

    Ok(Json(MessageDto::new("Check-out successful.")))
}

/// `GET /api/status/{id}`
///
/// Never rejects the id: one that cannot name an employee has no record.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AttendanceStatusDto>, ApiError> {
    let Ok(employee) = EmployeeId::try_from(id) else {
        return Ok(Json(AttendanceStatusDto {
            status: AttendanceStatus::NotCheckedIn.label().to_string(),
            check_in_time: None,
            check_out_time: None,
        }));
    };

    let usecase = GetAttendanceStatusUseCase::new(state.repository.clone(), state.clock.clone());
    let view = usecase.execute(&employee).await?;

    let offset = state.clock.offset();
    let render = |t: Timestamp| timestamp_to_rfc3339(t.value(), &offset);
    Ok(Json(AttendanceStatusDto {
        status: view.status.label().to_string(),
        check_in_time: view.check_in_time.and_then(render),
        check_out_time: view.check_out_time.and_then(render),
    }))
}

/// Currently registered employees and their channels
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<Vec<ConnectionDto>> {
    let bindings = state.registry.snapshot().await;
    Json(
        bindings
            .into_iter()
            .map(|(employee, channel)| ConnectionDto {
                employee_id: employee.into_string(),
                channel_id: channel.into_string(),
            })
            .collect(),
    )
}

fn parse_attendance_request(
    payload: Result<Json<AttendanceRequestDto>, JsonRejection>,
) -> Result<AttendanceCommand, ApiError> {
    let Json(dto) = payload.map_err(|e| {
        tracing::warn!("Rejected attendance request body: {}", e);
        ApiError::validation()
    })?;

    let (Some(user_id), Some(timestamp), Some(latitude), Some(longitude)) =
        (dto.user_id, dto.timestamp, dto.latitude, dto.longitude)
    else {
        return Err(ApiError::validation());
    };

    let employee = EmployeeId::try_from(user_id.into_string()).map_err(|_| ApiError::validation())?;
    let time = parse_timestamp(timestamp).ok_or_else(ApiError::validation)?;
    let (Some(latitude), Some(longitude)) = (latitude.to_f64(), longitude.to_f64()) else {
        return Err(ApiError::validation());
    };
    let location =
        GeoLocation::new(latitude, longitude).map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(AttendanceCommand {
        employee,
        time,
        location,
    })
}

/// Epoch milliseconds (number or numeric string) or RFC 3339.
/// Zero and empty values count as missing.
fn parse_timestamp(dto: TimestampDto) -> Option<Timestamp> {
    let millis = match dto {
        TimestampDto::Millis(0) => return None,
        TimestampDto::Millis(ms) => ms,
        TimestampDto::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            rfc3339_to_timestamp(text).or_else(|| text.parse::<i64>().ok())?
        }
    };
    DateTime::<Utc>::from_timestamp_millis(millis).map(|_| Timestamp::new(millis))
}
