//! UseCase: チャンネル切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectChannelUseCase::execute() メソッド
//! - レジストリからの削除と userDisconnected の通知
//!
//! ### なぜこのテストが必要か
//! - 追い出された古いチャンネルの切断が、新しいチャンネルの紐付けを消さないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みチャンネルの切断
//! - エッジケース：未登録のチャンネル、追い出し済みのチャンネルの切断

use std::sync::Arc;

use crate::{
    domain::{ChannelId, EmployeeId},
    infrastructure::{ConnectionRegistry, dto::websocket::ServerEvent},
};

/// チャンネル切断のユースケース
pub struct DisconnectChannelUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl DisconnectChannelUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// チャンネル切断を実行
    ///
    /// 残りの全チャンネルに userDisconnected を通知します。
    ///
    /// # Returns
    ///
    /// 紐付いていた従業員（いれば）
    pub async fn execute(&self, channel: &ChannelId) -> Option<EmployeeId> {
        let employee = self.registry.unregister_by_channel(channel).await;
        if let Some(employee) = &employee {
            tracing::info!("Removed employee '{}' from active connections", employee);
        }

        match serde_json::to_string(&ServerEvent::UserDisconnected(channel.to_string())) {
            Ok(json) => {
                let delivered = self.registry.broadcast(&json).await;
                tracing::debug!(
                    "Broadcasted userDisconnected for '{}' to {} channel(s)",
                    channel,
                    delivered
                );
            }
            Err(e) => tracing::error!("Failed to encode userDisconnected: {}", e),
        }

        employee
    }
}
