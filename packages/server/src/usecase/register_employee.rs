//! UseCase: 従業員とチャンネルの紐付け
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterEmployeeUseCase::execute() メソッド
//! - 再登録時の古いチャンネルの強制切断
//!
//! ### なぜこのテストが必要か
//! - 1 人の従業員が複数のチャンネルから古い位置情報を送り続けることを防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回登録、再登録（古いチャンネルの追い出し）
//! - 異常系：接続していないチャンネルの登録

use std::sync::Arc;

use crate::{
    domain::{ChannelId, EmployeeId},
    infrastructure::{ConnectionRegistry, RegistryError},
};

use super::error::RegisterError;

/// 従業員登録のユースケース
pub struct RegisterEmployeeUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl RegisterEmployeeUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 従業員をチャンネルに紐付ける
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChannelId))` - 追い出された古いチャンネル
    /// * `Ok(None)` - 追い出しなし
    pub async fn execute(
        &self,
        employee: EmployeeId,
        channel: ChannelId,
    ) -> Result<Option<ChannelId>, RegisterError> {
        let evicted = self
            .registry
            .register(employee.clone(), channel.clone())
            .await
            .map_err(|e| match e {
                RegistryError::UnknownChannel(id) => RegisterError::UnknownChannel(id),
            })?;

        if let Some(previous) = &evicted {
            tracing::info!(
                "Employee '{}' already had channel '{}'. Disconnecting the previous channel.",
                employee,
                previous
            );
        }
        tracing::info!("Mapped employee '{}' to channel '{}'", employee, channel);

        Ok(evicted)
    }
}
