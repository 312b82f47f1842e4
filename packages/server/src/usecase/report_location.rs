//! UseCase: ジオフェンスによる位置情報レポート処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReportLocationUseCase::execute() メソッド
//! - オフィス内/外の判定による自動チェックイン・チェックアウト
//! - receiveLocation の全チャンネルへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 定期的に届くレポートで記録が重複・上書きされないことを保証
//! - ストア障害時もイベントループが止まらず、ブロードキャストは行われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：オフィス内で初回 → チェックイン、オフィス外 → チェックアウト
//! - エッジケース：チェックイン済みで再度オフィス内、記録なしでオフィス外、チェックアウト済みでオフィス外
//! - 異常系：ストア障害

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    domain::{
        AttendanceMark, AttendanceRecord, AttendanceRepository, ChannelId, Clock, EmployeeId,
        GeoLocation, RepositoryError,
    },
    infrastructure::{ConnectionRegistry, dto::websocket::ServerEvent},
};

use super::error::ReportLocationError;

/// ジオフェンスレポート
#[derive(Debug, Clone)]
pub struct LocationReport {
    /// 送信元チャンネル
    pub channel: ChannelId,
    pub employee: EmployeeId,
    pub inside_office: bool,
    pub location: Option<GeoLocation>,
    /// 受信したままのペイロード（ブロードキャスト用）
    pub payload: Map<String, Value>,
}

/// レポートによって起きた状態遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceOutcome {
    CheckedIn,
    CheckedOut,
    NoChange,
}

/// 位置情報レポートのユースケース
pub struct ReportLocationUseCase {
    repository: Arc<dyn AttendanceRepository>,
    registry: Arc<ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl ReportLocationUseCase {
    pub fn new(
        repository: Arc<dyn AttendanceRepository>,
        registry: Arc<ConnectionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            registry,
            clock,
        }
    }

    /// レポートを処理し、結果に関わらず receiveLocation をブロードキャストする
    pub async fn execute(
        &self,
        report: LocationReport,
    ) -> Result<GeofenceOutcome, ReportLocationError> {
        let outcome = self
            .apply_transition(&report.employee, report.inside_office, report.location)
            .await;
        if let Err(e) = &outcome {
            tracing::error!(
                "Geofence transition failed for employee '{}': {}",
                report.employee,
                e
            );
        }

        let event = ServerEvent::receive_location(report.channel.as_str(), report.payload);
        match serde_json::to_string(&event) {
            Ok(json) => {
                self.registry.broadcast(&json).await;
            }
            Err(e) => tracing::error!("Failed to encode receiveLocation: {}", e),
        }

        outcome
    }

    /// オフィス内/外に応じて本日の記録を遷移させる
    async fn apply_transition(
        &self,
        employee: &EmployeeId,
        inside_office: bool,
        location: Option<GeoLocation>,
    ) -> Result<GeofenceOutcome, ReportLocationError> {
        let today = self
            .clock
            .today()
            .map_err(|e| ReportLocationError::Internal(e.to_string()))?;
        let existing = self
            .repository
            .find(employee, today)
            .await
            .map_err(|e| ReportLocationError::Internal(e.to_string()))?;
        let mark = AttendanceMark::new(self.clock.now(), location);

        match (inside_office, existing) {
            (true, None) => {
                let record = AttendanceRecord::check_in(employee.clone(), today, mark);
                match self.repository.insert(record).await {
                    Ok(()) => {
                        tracing::info!("Check-in recorded for employee '{}'", employee);
                        Ok(GeofenceOutcome::CheckedIn)
                    }
                    Err(RepositoryError::Duplicate { .. }) => Ok(GeofenceOutcome::NoChange),
                    Err(e) => Err(ReportLocationError::Internal(e.to_string())),
                }
            }
            (false, Some(mut record)) if !record.is_checked_out() => {
                record
                    .check_out(mark)
                    .map_err(|e| ReportLocationError::Internal(e.to_string()))?;
                match self.repository.save_check_out(record).await {
                    Ok(()) => {
                        tracing::info!("Check-out recorded for employee '{}'", employee);
                        Ok(GeofenceOutcome::CheckedOut)
                    }
                    Err(RepositoryError::Conflict { .. }) => Ok(GeofenceOutcome::NoChange),
                    Err(e) => Err(ReportLocationError::Internal(e.to_string())),
                }
            }
            _ => Ok(GeofenceOutcome::NoChange),
        }
    }
}
