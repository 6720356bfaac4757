use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学费记录表
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::EnrollmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Amount).double().not_null())
                    .col(ColumnDef::new(FeePayments::AmountPaid).double().null())
                    .col(ColumnDef::new(FeePayments::PaymentMonth).date().not_null())
                    .col(ColumnDef::new(FeePayments::DueDate).date().not_null())
                    .col(ColumnDef::new(FeePayments::Status).string().not_null())
                    .col(ColumnDef::new(FeePayments::PaymentMethod).string().null())
                    .col(ColumnDef::new(FeePayments::TransactionId).string().null())
                    .col(ColumnDef::new(FeePayments::PaymentDate).date().null())
                    .col(ColumnDef::new(FeePayments::Notes).text().null())
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通讯记录表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(CommunicationLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunicationLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunicationLogs::StudentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CommunicationLogs::PaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(CommunicationLogs::Kind).string().not_null())
                    .col(
                        ColumnDef::new(CommunicationLogs::Channel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunicationLogs::RecipientEmail)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CommunicationLogs::RecipientPhone)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(CommunicationLogs::Subject).string().null())
                    .col(ColumnDef::new(CommunicationLogs::Message).text().not_null())
                    .col(ColumnDef::new(CommunicationLogs::Status).string().not_null())
                    .col(ColumnDef::new(CommunicationLogs::Error).text().null())
                    .col(
                        ColumnDef::new(CommunicationLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CommunicationLogs::Table, CommunicationLogs::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CommunicationLogs::Table, CommunicationLogs::PaymentId)
                            .to(FeePayments::Table, FeePayments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 幂等键：同一选课同一月份只生成一条学费记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_fee_payments_enrollment_month")
                    .table(FeePayments::Table)
                    .col(FeePayments::EnrollmentId)
                    .col(FeePayments::PaymentMonth)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_payments_status_due_date")
                    .table(FeePayments::Table)
                    .col(FeePayments::Status)
                    .col(FeePayments::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_payments_student_id")
                    .table(FeePayments::Table)
                    .col(FeePayments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_communication_logs_payment_id")
                    .table(CommunicationLogs::Table)
                    .col(CommunicationLogs::PaymentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunicationLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FeePayments {
    #[sea_orm(iden = "fee_payments")]
    Table,
    Id,
    StudentId,
    EnrollmentId,
    Amount,
    AmountPaid,
    PaymentMonth,
    DueDate,
    Status,
    PaymentMethod,
    TransactionId,
    PaymentDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommunicationLogs {
    #[sea_orm(iden = "communication_logs")]
    Table,
    Id,
    StudentId,
    PaymentId,
    Kind,
    Channel,
    RecipientEmail,
    RecipientPhone,
    Subject,
    Message,
    Status,
    Error,
    CreatedAt,
}
