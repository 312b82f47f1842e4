//! UseCase: チェックイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CheckInUseCase::execute() メソッド
//! - 本日分の記録の作成（重複チェックはストアの一意制約に任せる）
//!
//! ### なぜこのテストが必要か
//! - 1 日 1 件の不変条件を守る
//! - 日付はリクエストのタイムスタンプではなくサーバーの「今日」で決まることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：本日初めてのチェックイン
//! - 異常系：2 回目のチェックイン、ストア障害

use std::sync::Arc;

use crate::domain::{
    AttendanceMark, AttendanceRecord, AttendanceRepository, Clock, EmployeeId, GeoLocation,
    RepositoryError, Timestamp,
};

use super::error::CheckInError;

/// チェックインのユースケース
pub struct CheckInUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckInUseCase {
    /// 新しい CheckInUseCase を作成
    pub fn new(repository: Arc<dyn AttendanceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// チェックインを実行
    ///
    /// # Arguments
    ///
    /// * `employee` - 従業員 ID
    /// * `time` - クライアントが申告したチェックイン時刻
    /// * `location` - チェックイン地点
    ///
    /// # Returns
    ///
    /// * `Ok(AttendanceRecord)` - 作成された記録
    /// * `Err(CheckInError)` - 記録済み、またはストア障害
    pub async fn execute(
        &self,
        employee: EmployeeId,
        time: Timestamp,
        location: GeoLocation,
    ) -> Result<AttendanceRecord, CheckInError> {
        let today = self
            .clock
            .today()
            .map_err(|e| CheckInError::Internal(e.to_string()))?;

        // 1. 既存の記録を確認
        let existing = self
            .repository
            .find(&employee, today)
            .await
            .map_err(|e| CheckInError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(CheckInError::AlreadyRecorded);
        }

        // 2. 記録を作成（同時リクエストはストアの一意制約で弾かれる）
        let record = AttendanceRecord::check_in(
            employee,
            today,
            AttendanceMark::new(time, Some(location)),
        );
        match self.repository.insert(record.clone()).await {
            Ok(()) => {
                tracing::info!("Check-in recorded for employee '{}' on {}", record.employee, today);
                Ok(record)
            }
            Err(RepositoryError::Duplicate { .. }) => Err(CheckInError::AlreadyRecorded),
            Err(e) => Err(CheckInError::Internal(e.to_string())),
        }
    }
}
