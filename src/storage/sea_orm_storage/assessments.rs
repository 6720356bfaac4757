//! 测评与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::entity::grades::{
    ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as Grades,
};
use crate::errors::{EduDeskError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    assessments::{
        entities::{Assessment, Grade},
        requests::{AssessmentListQuery, CreateAssessmentRequest, GradeEntry},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        let model = ActiveModel {
            class_id: Set(req.class_id),
            title: Set(req.title),
            kind: Set(req.kind.to_string()),
            max_score: Set(req.max_score),
            assessment_date: Set(req.assessment_date),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("创建测评失败: {e}")))?;

        Ok(result.into_assessment())
    }

    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询测评失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>> {
        let (page, size) = query.pagination.normalized();

        let mut select = Assessments::find();
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::AssessmentDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询测评总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询测评页数失败: {e}")))?;
        let assessments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询测评列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: assessments
                .into_iter()
                .map(|m| m.into_assessment())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 删除测评及其成绩
    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        Grades::delete_many()
            .filter(GradeColumn::AssessmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("删除成绩失败: {e}")))?;

        let result = Assessments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("删除测评失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_grades_impl(&self, assessment_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(GradeColumn::AssessmentId.eq(assessment_id))
            .order_by_asc(GradeColumn::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| EduDeskError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 批量录入成绩，(测评, 学生) 已存在时覆盖
    pub async fn upsert_grades_impl(
        &self,
        assessment_id: i64,
        grades: Vec<GradeEntry>,
    ) -> Result<Vec<Grade>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut saved = Vec::with_capacity(grades.len());

        for entry in grades {
            let existing = Grades::find()
                .filter(GradeColumn::AssessmentId.eq(assessment_id))
                .filter(GradeColumn::StudentId.eq(entry.student_id))
                .one(&txn)
                .await
                .map_err(|e| EduDeskError::database_operation(format!("查询成绩失败: {e}")))?;

            let model = match existing {
                Some(grade) => {
                    let mut model: GradeActiveModel = grade.into();
                    model.score = Set(entry.score);
                    model.remarks = Set(entry.remarks);
                    model.graded_at = Set(now);
                    model.update(&txn).await
                }
                None => {
                    GradeActiveModel {
                        assessment_id: Set(assessment_id),
                        student_id: Set(entry.student_id),
                        score: Set(entry.score),
                        remarks: Set(entry.remarks),
                        graded_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| EduDeskError::database_operation(format!("保存成绩失败: {e}")))?;

            saved.push(model.into_grade());
        }

        txn.commit()
            .await
            .map_err(|e| EduDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }
}
