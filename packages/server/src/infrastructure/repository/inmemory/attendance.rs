//! InMemory Attendance Repository 実装
//!
//! ドメイン層が定義する AttendanceRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! (employee, date) をキーにしているため、同じキーの記録は構造的に 2 件存在できません。
//! 存在チェックと書き込みは同じロックの中で行うので、
//! 同時に届いたチェックインが両方とも成功することはありません。

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AttendanceDate, AttendanceRecord, AttendanceRepository, EmployeeId, RepositoryError,
};

type RecordKey = (EmployeeId, AttendanceDate);

/// インメモリ Attendance Repository 実装
#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    /// (従業員, 日付) ごとの勤怠記録
    records: Mutex<HashMap<RecordKey, AttendanceRecord>>,
}

impl InMemoryAttendanceRepository {
    /// 新しい InMemoryAttendanceRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されている記録の件数
    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find(
        &self,
        employee: &EmployeeId,
        date: AttendanceDate,
    ) -> Result<Option<AttendanceRecord>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records.get(&(employee.clone(), date)).cloned())
    }

    async fn insert(&self, record: AttendanceRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        match records.entry((record.employee.clone(), record.date)) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate {
                employee: record.employee.into_string(),
                date: record.date,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn save_check_out(&self, record: AttendanceRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        let key = (record.employee.clone(), record.date);
        let Some(stored) = records.get_mut(&key) else {
            return Err(RepositoryError::NotFound {
                employee: record.employee.into_string(),
                date: record.date,
            });
        };

        // 条件付き更新: まだチェックアウトされていない記録のみ
        if stored.check_out.is_some() {
            return Err(RepositoryError::Conflict {
                employee: record.employee.into_string(),
                date: record.date,
            });
        }
        stored.check_out = record.check_out;
        Ok(())
    }
}
