//! UseCase 層のエラー定義

use thiserror::Error;

/// チェックインのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckInError {
    /// 本日のチェックインは記録済み
    #[error("Check-in already recorded for today")]
    AlreadyRecorded,

    /// ストアなど想定外の失敗
    #[error("Check-in failed: {0}")]
    Internal(String),
}

/// チェックアウトのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckOutError {
    /// 本日のチェックインがない
    #[error("No check-in recorded for today")]
    NotCheckedIn,

    /// 本日のチェックアウトは記録済み
    #[error("Check-out already recorded for today")]
    AlreadyCheckedOut,

    /// ストアなど想定外の失敗
    #[error("Check-out failed: {0}")]
    Internal(String),
}

/// ステータス取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Status lookup failed: {0}")]
    Internal(String),
}

/// 位置情報レポート処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportLocationError {
    #[error("Geofence transition failed: {0}")]
    Internal(String),
}

/// 従業員登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// チャンネルが接続されていない
    #[error("Channel '{0}' is not connected")]
    UnknownChannel(String),
}
