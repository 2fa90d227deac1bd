use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // coleções fonte de atividade (append-only)
        manager
            .create_table(
                Table::create()
                    .table(QuizAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizAttempts::StudentId).string().not_null())
                    .col(ColumnDef::new(QuizAttempts::ModuleId).string().not_null())
                    .col(ColumnDef::new(QuizAttempts::Score).double().not_null())
                    .col(ColumnDef::new(QuizAttempts::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(QuizAttempts::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ModuleProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::StudentId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ModuleProgress::ModuleId).string().not_null())
                    .col(ColumnDef::new(ModuleProgress::Score).double().not_null())
                    .col(ColumnDef::new(ModuleProgress::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(ModuleProgress::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameProgress::StudentId).string().not_null())
                    .col(ColumnDef::new(GameProgress::ModuleId).string().not_null())
                    .col(ColumnDef::new(GameProgress::Score).double().not_null())
                    .col(ColumnDef::new(GameProgress::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(GameProgress::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // melhores tentativas (um registro por par aluno/módulo)
        manager
            .create_table(
                Table::create()
                    .table(ModuleBestScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleBestScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::StudentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::ModuleId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::BestScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::Attempts)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::FirstAttemptAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::LastAttemptAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModuleBestScores::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // pontuação unificada (documento derivado, sobrescrito por inteiro)
        manager
            .create_table(
                Table::create()
                    .table(UnifiedScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnifiedScores::StudentId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UnifiedScores::ClassId).string().null())
                    .col(
                        ColumnDef::new(UnifiedScores::TotalScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnifiedScores::NormalizedScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnifiedScores::CompletedModules)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UnifiedScores::ModuleScores).text().not_null())
                    .col(
                        ColumnDef::new(UnifiedScores::LastActivity)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UnifiedScores::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // matrículas
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).string().not_null())
                    .col(ColumnDef::new(Enrollments::ClassId).string().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // contadores denormalizados por turma
        manager
            .create_table(
                Table::create()
                    .table(ClassCounters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassCounters::ClassId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassCounters::StudentsCount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassCounters::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // catálogo de módulos do curso
        manager
            .create_table(
                Table::create()
                    .table(CourseModules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseModules::ModuleId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseModules::Title).string().not_null())
                    .col(ColumnDef::new(CourseModules::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(CourseModules::PassingThreshold)
                            .double()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // snapshots de ranking
        manager
            .create_table(
                Table::create()
                    .table(RankingSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RankingSnapshots::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RankingSnapshots::Scope).string().not_null())
                    .col(ColumnDef::new(RankingSnapshots::Entries).text().not_null())
                    .col(
                        ColumnDef::new(RankingSnapshots::TakenAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // índices
        // coleções fonte: busca por par e por aluno
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_attempts_student_module")
                    .table(QuizAttempts::Table)
                    .col(QuizAttempts::StudentId)
                    .col(QuizAttempts::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_module_progress_student_module")
                    .table(ModuleProgress::Table)
                    .col(ModuleProgress::StudentId)
                    .col(ModuleProgress::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_progress_student_module")
                    .table(GameProgress::Table)
                    .col(GameProgress::StudentId)
                    .col(GameProgress::ModuleId)
                    .to_owned(),
            )
            .await?;

        // uma melhor tentativa por par (aluno, módulo)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_module_best_scores_pair")
                    .table(ModuleBestScores::Table)
                    .col(ModuleBestScores::StudentId)
                    .col(ModuleBestScores::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_unified_scores_class_id")
                    .table(UnifiedScores::Table)
                    .col(UnifiedScores::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_class_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_class_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ranking_snapshots_scope_taken_at")
                    .table(RankingSnapshots::Table)
                    .col(RankingSnapshots::Scope)
                    .col(RankingSnapshots::TakenAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // remove na ordem inversa da criação
        manager
            .drop_table(Table::drop().table(RankingSnapshots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseModules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassCounters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UnifiedScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModuleBestScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModuleProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizAttempts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum QuizAttempts {
    Table,
    Id,
    StudentId,
    ModuleId,
    Score,
    MaxScore,
    CompletedAt,
}

#[derive(DeriveIden)]
enum ModuleProgress {
    Table,
    Id,
    StudentId,
    ModuleId,
    Score,
    MaxScore,
    CompletedAt,
}

#[derive(DeriveIden)]
enum GameProgress {
    Table,
    Id,
    StudentId,
    ModuleId,
    Score,
    MaxScore,
    CompletedAt,
}

#[derive(DeriveIden)]
enum ModuleBestScores {
    Table,
    Id,
    StudentId,
    ModuleId,
    BestScore,
    Attempts,
    FirstAttemptAt,
    LastAttemptAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UnifiedScores {
    Table,
    StudentId,
    ClassId,
    TotalScore,
    NormalizedScore,
    CompletedModules,
    ModuleScores,
    LastActivity,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ClassId,
    Status,
    EnrolledAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassCounters {
    Table,
    ClassId,
    StudentsCount,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseModules {
    Table,
    ModuleId,
    Title,
    MaxScore,
    PassingThreshold,
}

#[derive(DeriveIden)]
enum RankingSnapshots {
    Table,
    Id,
    Scope,
    Entries,
    TakenAt,
}
