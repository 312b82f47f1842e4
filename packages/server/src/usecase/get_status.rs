//! UseCase: 勤怠ステータス取得
//!
//! 記録の有無と内容から「未出勤 / 出勤中 / 退勤済み」を導出します。
//! 記録がないことはエラーではありません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetAttendanceStatusUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：記録なし、チェックイン後、チェックアウト後
//! - 異常系：ストア障害

use std::sync::Arc;

use crate::domain::{AttendanceRepository, AttendanceStatus, Clock, EmployeeId, Timestamp};

use super::error::StatusError;

/// 本日の勤怠ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceStatusView {
    pub status: AttendanceStatus,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
}

/// 勤怠ステータス取得のユースケース
pub struct GetAttendanceStatusUseCase {
    repository: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
}

impl GetAttendanceStatusUseCase {
    pub fn new(repository: Arc<dyn AttendanceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 本日のステータスを取得
    pub async fn execute(&self, employee: &EmployeeId) -> Result<AttendanceStatusView, StatusError> {
        let today = self
            .clock
            .today()
            .map_err(|e| StatusError::Internal(e.to_string()))?;
        let record = self
            .repository
            .find(employee, today)
            .await
            .map_err(|e| StatusError::Internal(e.to_string()))?;

        Ok(AttendanceStatusView {
            status: AttendanceStatus::of(record.as_ref()),
            check_in_time: record.as_ref().map(|r| r.check_in.time),
            check_out_time: record.as_ref().and_then(|r| r.check_out).map(|m| m.time),
        })
    }
}
