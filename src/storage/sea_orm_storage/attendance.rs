//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{EduDeskError, Result};
use crate::models::attendance::{entities::AttendanceRecord, requests::MarkAttendanceRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn list_attendance_impl(
        &self,
        class_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::AttendanceDate.eq(date))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 批量登记考勤，(学生, 班级, 日期) 已存在时覆盖状态与备注
    pub async fn upsert_attendance_impl(
        &self,
        req: MarkAttendanceRequest,
    ) -> Result<Vec<AttendanceRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut saved = Vec::with_capacity(req.entries.len());

        for entry in req.entries {
            let existing = Attendance::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::ClassId.eq(req.class_id))
                .filter(Column::AttendanceDate.eq(req.attendance_date))
                .one(&txn)
                .await
                .map_err(|e| EduDeskError::database_operation(format!("查询考勤失败: {e}")))?;

            let model = match existing {
                Some(record) => {
                    let mut model: ActiveModel = record.into();
                    model.status = Set(entry.status.to_string());
                    model.notes = Set(entry.notes);
                    model.session_id = Set(req.session_id);
                    model.recorded_at = Set(now);
                    model.update(&txn).await
                }
                None => {
                    ActiveModel {
                        student_id: Set(entry.student_id),
                        class_id: Set(req.class_id),
                        session_id: Set(req.session_id),
                        attendance_date: Set(req.attendance_date),
                        status: Set(entry.status.to_string()),
                        notes: Set(entry.notes),
                        recorded_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| EduDeskError::database_operation(format!("保存考勤失败: {e}")))?;

            saved.push(model.into_attendance());
        }

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }
}
