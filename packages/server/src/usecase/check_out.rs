//! UseCase: チェックアウト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CheckOutUseCase::execute() メソッド
//! - 本日のチェックイン済み記録へのチェックアウト時刻の設定
//!
//! ### なぜこのテストが必要か
//! - チェックインなしのチェックアウトを防ぐ
//! - チェックアウトは 1 日 1 回で、上書きされないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：チェックイン済みの従業員のチェックアウト
//! - 異常系：チェックインなし、2 回目のチェックアウト、同時チェックアウト

use std::sync::Arc;

use crate::domain::{
    AttendanceMark, AttendanceRecord, AttendanceRepository, Clock, EmployeeId, GeoLocation,
    RepositoryError, Timestamp,
};

use super::error::CheckOutError;

/// チェックアウトのユースケース
pub struct CheckOutUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckOutUseCase {
    /// 新しい CheckOutUseCase を作成
    pub fn new(repository: Arc<dyn AttendanceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// チェックアウトを実行
    ///
    /// # Returns
    ///
    /// * `Ok(AttendanceRecord)` - 更新後の記録
    /// * `Err(CheckOutError)` - チェックインなし、チェックアウト済み、またはストア障害
    pub async fn execute(
        &self,
        employee: EmployeeId,
        time: Timestamp,
        location: GeoLocation,
    ) -> Result<AttendanceRecord, CheckOutError> {
        let today = self
            .clock
            .today()
            .map_err(|e| CheckOutError::Internal(e.to_string()))?;

        // 1. 本日の記録を取得
        let mut record = self
            .repository
            .find(&employee, today)
            .await
            .map_err(|e| CheckOutError::Internal(e.to_string()))?
            .ok_or(CheckOutError::NotCheckedIn)?;

        // 2. ドメインモデルでチェックアウト
        record
            .check_out(AttendanceMark::new(time, Some(location)))
            .map_err(|_| CheckOutError::AlreadyCheckedOut)?;

        // 3. 条件付き更新で保存
        match self.repository.save_check_out(record.clone()).await {
            Ok(()) => {
                tracing::info!("Check-out recorded for employee '{}' on {}", record.employee, today);
                Ok(record)
            }
            Err(RepositoryError::Conflict { .. }) => Err(CheckOutError::AlreadyCheckedOut),
            Err(RepositoryError::NotFound { .. }) => Err(CheckOutError::NotCheckedIn),
            Err(e) => Err(CheckOutError::Internal(e.to_string())),
        }
    }
}
